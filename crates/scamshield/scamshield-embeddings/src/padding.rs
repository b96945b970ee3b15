//! Dimension reconciliation between encoders and collections.
//!
//! A collection declares one dimensionality. Encoders may produce fewer
//! components (e.g. a 512-d visual encoder against a 1024-d collection); the
//! shorter vector is zero-padded at the end. Vectors are never truncated or
//! rescaled, so a longer vector is an error.

use scamshield_core::errors::{EmbeddingError, ShieldResult};

/// Zero-pad `embedding` to exactly `target_dims` components.
///
/// The first `embedding.len()` components are copied verbatim; the rest are 0.
///
/// # Errors
/// Returns `DimensionMismatch` if `embedding.len() > target_dims`.
pub fn pad_to(embedding: &[f32], target_dims: usize) -> ShieldResult<Vec<f32>> {
    if embedding.len() > target_dims {
        return Err(EmbeddingError::DimensionMismatch {
            expected: target_dims,
            actual: embedding.len(),
        }
        .into());
    }
    let mut padded = Vec::with_capacity(target_dims);
    padded.extend_from_slice(embedding);
    padded.resize(target_dims, 0.0);
    Ok(padded)
}

/// Owned variant of [`pad_to`] that reuses the allocation.
pub fn pad_into(mut embedding: Vec<f32>, target_dims: usize) -> ShieldResult<Vec<f32>> {
    if embedding.len() > target_dims {
        return Err(EmbeddingError::DimensionMismatch {
            expected: target_dims,
            actual: embedding.len(),
        }
        .into());
    }
    embedding.resize(target_dims, 0.0);
    Ok(embedding)
}

/// Validate that an embedding has the expected dimensions.
///
/// # Errors
/// Returns `DimensionMismatch` if dimensions don't match.
pub fn validate_dimensions(embedding: &[f32], expected: usize) -> ShieldResult<()> {
    if embedding.len() != expected {
        return Err(EmbeddingError::DimensionMismatch {
            expected,
            actual: embedding.len(),
        }
        .into());
    }
    Ok(())
}
