/// Knowledge store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("collection not found: {name}")]
    CollectionNotFound { name: String },

    #[error("dimension mismatch in {collection}: expected {expected}, got {actual}")]
    DimensionMismatch {
        collection: String,
        expected: usize,
        actual: usize,
    },

    #[error("request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("store returned {status}: {body}")]
    BadStatus { status: u16, body: String },

    #[error("malformed store response: {reason}")]
    MalformedResponse { reason: String },

    #[error("snapshot I/O failed: {reason}")]
    Snapshot { reason: String },
}
