//! Property tests for dimension reconciliation.

use proptest::prelude::*;
use scamshield_embeddings::padding::{pad_to, validate_dimensions};

proptest! {
    #[test]
    fn padding_preserves_prefix_and_zero_fills(
        v in prop::collection::vec(-1.0f32..1.0, 0..600),
        extra in 0usize..600,
    ) {
        let target = v.len() + extra;
        let padded = pad_to(&v, target).unwrap();
        prop_assert_eq!(padded.len(), target);
        prop_assert_eq!(&padded[..v.len()], v.as_slice());
        prop_assert!(padded[v.len()..].iter().all(|&x| x == 0.0));
        prop_assert!(validate_dimensions(&padded, target).is_ok());
    }

    #[test]
    fn padding_never_truncates(
        v in prop::collection::vec(-1.0f32..1.0, 1..300),
        shortfall in 1usize..300,
    ) {
        let target = v.len().saturating_sub(shortfall);
        prop_assert!(pad_to(&v, target).is_err());
    }
}
