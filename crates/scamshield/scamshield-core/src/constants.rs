/// ScamShield engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Payload `type` tag written on every memory record.
pub const MEMORY_RECORD_TYPE: &str = "user_submission";

/// Payload `category` tag for text corpus entries.
pub const CATEGORY_GROUND_TRUTH: &str = "ground_truth";

/// Payload `category` tag for image corpus entries.
pub const CATEGORY_IMAGE_EVIDENCE: &str = "image_evidence";

/// Risk label for known scam examples.
pub const LABEL_SCAM: &str = "scam";

/// Risk label for known legitimate examples.
pub const LABEL_LEGIT: &str = "legit";

/// Risk label used when a payload carries none.
pub const LABEL_UNKNOWN: &str = "unknown";

/// Heuristic probability above which a verdict is `High`.
pub const HEURISTIC_HIGH_RISK_THRESHOLD: f64 = 0.6;

/// Maximum characters of analysis text carried into a verdict summary.
pub const VERDICT_SUMMARY_ANALYSIS_CHARS: usize = 200;
