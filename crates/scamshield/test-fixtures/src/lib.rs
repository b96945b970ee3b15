//! Test fixtures and test doubles for the ScamShield workspace.
//!
//! Fixture files live under `fixtures/` next to this crate: a small labeled
//! corpus in the numbered-chunk text format that ingestion reads, and raw
//! reasoning-model outputs for the verdict parser.

pub mod doubles;

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Deserialize;

fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// Read a fixture file as text.
///
/// # Panics
/// Panics if the file doesn't exist.
pub fn load_text(relative_path: &str) -> String {
    let path = fixture_path(relative_path);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let content = load_text(relative_path);
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", relative_path, e))
}

/// Known scam conversations, numbered chunks separated by blank lines.
pub fn scam_corpus() -> String {
    load_text("corpus/scam.txt")
}

/// Known legitimate conversations, same format.
pub fn legit_corpus() -> String {
    load_text("corpus/legit.txt")
}

/// One raw reasoning-model output and whether it should validate.
#[derive(Debug, Clone, Deserialize)]
pub struct ReasoningSample {
    pub name: String,
    pub raw: String,
    pub valid: bool,
    #[serde(default)]
    pub risk_level: Option<String>,
    #[serde(default)]
    pub probability: Option<f64>,
}

pub fn reasoning_samples() -> Vec<ReasoningSample> {
    load_fixture("reasoning/samples.json")
}
