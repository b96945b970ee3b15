// Single source of truth for all default values.

// --- Store ---
pub const DEFAULT_USE_CLOUD: bool = false;
pub const DEFAULT_LOCAL_PATH: &str = "./local_store.json";
pub const DEFAULT_CASE_COLLECTION: &str = "scam_genome";
pub const DEFAULT_MEMORY_COLLECTION: &str = "user_memory";
pub const DEFAULT_COLLECTION_DIMENSIONS: usize = 1024;
pub const DEFAULT_STORE_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_INGEST_BATCH_SIZE: usize = 64;

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "hashed";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_TEXT_DIMENSIONS: usize = 1024;
pub const DEFAULT_IMAGE_DIMENSIONS: usize = 512;
pub const DEFAULT_L1_CACHE_SIZE: u64 = 10_000;
pub const DEFAULT_EMBEDDING_TIMEOUT_SECS: u64 = 15;

// --- Retrieval ---
pub const DEFAULT_CASE_TOP_K: usize = 5;
pub const DEFAULT_MEMORY_TOP_K: usize = 3;
pub const DEFAULT_MEMORY_THRESHOLD: f32 = 0.85;
pub const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_VISUAL_SCAM_THRESHOLD: f32 = 0.28;
pub const DEFAULT_QUERY_CHAR_CAP: usize = 2_000;

// --- Reasoning ---
pub const DEFAULT_REASONING_PROVIDER: &str = "gemini";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_REASONING_TIMEOUT_SECS: u64 = 30;

// --- Extraction ---
pub const DEFAULT_EXTRACTION_TIMEOUT_SECS: u64 = 60;

// --- Memory ---
pub const DEFAULT_MEMORY_ENABLED: bool = true;
pub const DEFAULT_EXCERPT_CHARS: usize = 1_000;
pub const DEFAULT_PERSIST_TIMEOUT_SECS: u64 = 10;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
