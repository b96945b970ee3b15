//! Verdict parser against recorded model outputs.

use scamshield_core::models::RiskLevel;
use scamshield_reasoning::parse::parse_verdict;
use test_fixtures::reasoning_samples;

#[test]
fn every_sample_validates_as_labeled() {
    let samples = reasoning_samples();
    assert!(!samples.is_empty());
    for sample in samples {
        let result = parse_verdict(&sample.raw);
        assert_eq!(
            result.is_ok(),
            sample.valid,
            "sample {} expected valid={} got {:?}",
            sample.name,
            sample.valid,
            result
        );
        if let Ok(verdict) = result {
            if let Some(level) = &sample.risk_level {
                assert_eq!(Some(verdict.risk_level), RiskLevel::parse(level), "{}", sample.name);
            }
            if let Some(p) = sample.probability {
                assert!((verdict.probability - p).abs() < 1e-9, "{}", sample.name);
            }
        }
    }
}
