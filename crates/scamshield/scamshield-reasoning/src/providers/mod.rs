//! Reasoning providers and their construction from config.

pub mod gemini;
pub mod heuristic;
pub mod openai;

use std::sync::Arc;
use std::time::Duration;

use scamshield_core::config::ReasoningConfig;
use scamshield_core::traits::IReasoningProvider;
use tracing::warn;

pub use gemini::GeminiReasoner;
pub use heuristic::HeuristicReasoner;
pub use openai::OpenAiReasoner;

/// Build one named provider.
///
/// Returns `None` for the heuristic (the dispatcher always runs it last),
/// and for unknown names or missing keys, with a warning. A `None` simply
/// leaves the provider out of the chain.
pub fn create_provider(name: &str, config: &ReasoningConfig) -> Option<Arc<dyn IReasoningProvider>> {
    let timeout = Duration::from_secs(config.timeout_secs.max(1));
    let built = match name.trim().to_ascii_lowercase().as_str() {
        gemini::GEMINI_PROVIDER => {
            let Some(key) = config.google_api_key.clone() else {
                warn!(provider = name, "GOOGLE_API_KEY not set; provider skipped");
                return None;
            };
            GeminiReasoner::new(key, &config.gemini_model, config.gemini_endpoint.clone(), timeout)
                .map(|p| Arc::new(p) as Arc<dyn IReasoningProvider>)
        }
        openai::OPENAI_PROVIDER => {
            let Some(key) = config.openai_api_key.clone() else {
                warn!(provider = name, "OPENAI_API_KEY not set; provider skipped");
                return None;
            };
            OpenAiReasoner::new(key, &config.openai_model, config.openai_endpoint.clone(), timeout)
                .map(|p| Arc::new(p) as Arc<dyn IReasoningProvider>)
        }
        heuristic::HEURISTIC_PROVIDER => return None,
        other => {
            warn!(provider = other, "unknown reasoning provider; skipped");
            return None;
        }
    };
    match built {
        Ok(provider) => Some(provider),
        Err(e) => {
            warn!(provider = name, error = %e, "reasoning provider unavailable; skipped");
            None
        }
    }
}

/// The ordered provider chain: `provider`, then `fallback_providers`.
/// Duplicates are dropped.
pub fn build_chain(config: &ReasoningConfig) -> Vec<Arc<dyn IReasoningProvider>> {
    let mut seen = Vec::new();
    std::iter::once(&config.provider)
        .chain(config.fallback_providers.iter())
        .filter_map(|name| {
            let key = name.trim().to_ascii_lowercase();
            if seen.contains(&key) {
                return None;
            }
            seen.push(key);
            create_provider(name, config)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_leave_empty_chain() {
        let config = ReasoningConfig {
            provider: "gemini".into(),
            fallback_providers: vec!["openai".into()],
            ..Default::default()
        };
        assert!(build_chain(&config).is_empty());
    }

    #[test]
    fn configured_chain_keeps_order() {
        let config = ReasoningConfig {
            provider: "openai".into(),
            fallback_providers: vec!["gemini".into(), "OpenAI".into(), "heuristic".into()],
            google_api_key: Some("g".into()),
            openai_api_key: Some("o".into()),
            ..Default::default()
        };
        let names: Vec<_> = build_chain(&config).iter().map(|p| p.name().to_string()).collect();
        assert_eq!(names, vec!["openai", "gemini"]);
    }

    #[test]
    fn unknown_provider_is_skipped() {
        let config = ReasoningConfig {
            provider: "claude-9000".into(),
            ..Default::default()
        };
        assert!(create_provider("claude-9000", &config).is_none());
    }
}
