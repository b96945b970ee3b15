//! Feature-hashed text encoder.
//!
//! Deterministic, offline, and always available. Unigrams and adjacent-word
//! bigrams are hashed into fixed buckets with a sign bit, weighted by
//! sublinear term frequency, then L2-normalized. Texts sharing vocabulary
//! land close in cosine space, which is all the case corpus needs for
//! local and test runs.

use std::collections::HashMap;

use async_trait::async_trait;
use scamshield_core::errors::ShieldResult;
use scamshield_core::traits::IEncoder;

/// Hashed bag-of-words encoder.
pub struct HashedTextEncoder {
    dimensions: usize,
}

impl HashedTextEncoder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    /// FNV-1a over the feature bytes. The top bit selects the sign.
    fn hash_feature(feature: &str, dims: usize) -> (usize, f32) {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in feature.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        let sign = if h >> 63 == 0 { 1.0 } else { -1.0 };
        ((h as usize) % dims, sign)
    }

    fn tokenize(text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|s| s.chars().count() >= 2)
            .map(str::to_lowercase)
            .collect()
    }

    /// Encode synchronously. Used directly by corpus ingestion.
    pub fn encode(&self, text: &str) -> Vec<f32> {
        let tokens = Self::tokenize(text);
        let mut vec = vec![0.0f32; self.dimensions];
        if tokens.is_empty() {
            return vec;
        }

        let mut counts: HashMap<String, u32> = HashMap::new();
        for tok in &tokens {
            *counts.entry(tok.clone()).or_default() += 1;
        }
        for pair in tokens.windows(2) {
            *counts.entry(format!("{} {}", pair[0], pair[1])).or_default() += 1;
        }

        for (feature, count) in &counts {
            let (bucket, sign) = Self::hash_feature(feature, self.dimensions);
            vec[bucket] += sign * (1.0 + (*count as f32).ln());
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        vec
    }
}

#[async_trait]
impl IEncoder for HashedTextEncoder {
    async fn encode_text(&self, text: &str) -> ShieldResult<Vec<f32>> {
        Ok(self.encode(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashed-text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cosine(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    #[test]
    fn empty_text_returns_zero_vector() {
        let e = HashedTextEncoder::new(128);
        let v = e.encode("");
        assert_eq!(v.len(), 128);
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn output_is_unit_norm() {
        let e = HashedTextEncoder::new(1024);
        let v = e.encode("Your account has been suspended, verify now");
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5, "expected unit norm, got {norm}");
    }

    #[test]
    fn deterministic_and_case_insensitive() {
        let e = HashedTextEncoder::new(256);
        assert_eq!(e.encode("Send the OTP"), e.encode("send the otp"));
    }

    #[test]
    fn shared_vocabulary_scores_higher() {
        let e = HashedTextEncoder::new(1024);
        let a = e.encode("urgent: your bank account is locked, send the otp code");
        let b = e.encode("your bank account is locked. send otp code to unlock");
        let c = e.encode("lunch at noon tomorrow with the team");
        assert!(cosine(&a, &b) > cosine(&a, &c));
    }

    #[tokio::test]
    async fn trait_encoding_matches_sync() {
        let e = HashedTextEncoder::new(64);
        let via_trait = e.encode_text("prize claim fee").await.unwrap();
        assert_eq!(via_trait, e.encode("prize claim fee"));
        assert!(e.encode_image(b"\x89PNG").await.is_err());
    }
}
