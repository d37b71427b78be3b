//! Logit mask filter applied before sampling.

use std::sync::Arc;

use super::bitmask::AllowMask;
use super::vocabulary::NumericTokenMask;
use crate::error::ConstraintError;

/// Trait for logit transformations applied before sampling.
///
/// Implementors modify the logits slice in place. The slice has length
/// `vocab_size` and contains raw (unnormalized) log-probabilities.
pub trait LogitsProcessor: Send + Sync {
    /// Apply this processor's transformation to the logit vector.
    fn process(&self, logits: &mut [f32], generated_tokens: &[u32]);

    /// Human-readable name for debugging and metrics.
    fn name(&self) -> &'static str;
}

/// Masks every token outside the numeric allow-mask to `-inf`.
///
/// Pure function of (mask, logits): stateless across calls, idempotent,
/// never reorders or rescales allowed scores. Holds a shared reference to
/// the mask, which is built once per tokenizer.
pub struct NumericMaskFilter {
    mask: Arc<AllowMask>,
}

impl NumericMaskFilter {
    pub fn new(mask: Arc<AllowMask>) -> Self {
        Self { mask }
    }

    pub fn from_mask(mask: &NumericTokenMask) -> Self {
        Self::new(mask.mask())
    }

    /// Verify at setup time that the model's logit vector length matches
    /// the mask's vocabulary size. `process` itself stays infallible.
    pub fn check_len(&self, logits_len: usize) -> Result<(), ConstraintError> {
        if logits_len != self.mask.vocab_size() {
            return Err(ConstraintError::MaskLengthMismatch {
                vocab_size: self.mask.vocab_size(),
                logits_len,
            });
        }
        Ok(())
    }
}

impl LogitsProcessor for NumericMaskFilter {
    fn process(&self, logits: &mut [f32], _generated_tokens: &[u32]) {
        self.mask.apply_to_logits(logits);
    }

    fn name(&self) -> &'static str {
        "numeric_mask"
    }
}

/// Whether a filtered logit vector still has at least one samplable entry.
///
/// An all-`-inf` vector cannot be sampled after softmax; the generation
/// loop is expected to check this after filtering and fail the request
/// rather than sample from an undefined distribution.
pub fn has_samplable_token(logits: &[f32]) -> bool {
    logits.iter().any(|&l| l > f32::NEG_INFINITY)
}
