//! Numeric vocabulary classification.
//!
//! Scans a tokenizer's entire vocabulary once, decoding each token in
//! isolation, and records in an [`AllowMask`] which tokens may appear in a
//! numeric literal. The scan is O(vocab_size) decode calls and is the
//! dominant cost of the whole controller, so the result must be cached and
//! shared, never rebuilt per request.

use std::sync::Arc;

use tracing::{debug, warn};

use super::bitmask::AllowMask;
use crate::error::ConstraintError;
use crate::tokenizer::TokenizerWrapper;

/// Whether a decoded surface form may appear inside a numeric literal:
/// empty after trimming whitespace, or ASCII digits with at most one `.`.
///
/// Trimming first is what admits pure-whitespace tokens; the number
/// stopping criterion later uses a trailing whitespace token as the end of
/// the literal.
pub fn is_numeric_surface(surface: &str) -> bool {
    let trimmed = surface.trim();
    if trimmed.is_empty() {
        return true;
    }
    let mut dots = 0usize;
    for c in trimmed.chars() {
        match c {
            '.' => dots += 1,
            '0'..='9' => {}
            _ => return false,
        }
    }
    dots <= 1
}

/// Allow-mask of numeric-compatible tokens for one tokenizer.
///
/// Built once per tokenizer; the inner [`AllowMask`] is handed out via
/// `Arc` so every [`NumericMaskFilter`](super::filter::NumericMaskFilter)
/// references the same bits instead of copying them.
#[derive(Debug, Clone)]
pub struct NumericTokenMask {
    mask: Arc<AllowMask>,
    decode_failures: usize,
}

impl NumericTokenMask {
    /// Classify every vocabulary token of `tokenizer`.
    ///
    /// A token that fails to decode is counted and left disallowed; the
    /// scan never aborts for a single malformed entry. Fails fast with
    /// [`ConstraintError::EmptyVocabulary`] before any generation begins.
    pub fn from_tokenizer(tokenizer: &TokenizerWrapper) -> Result<Self, ConstraintError> {
        let vocab_size = tokenizer.vocab_size();
        if vocab_size == 0 {
            return Err(ConstraintError::EmptyVocabulary);
        }

        let mut mask = AllowMask::new(vocab_size);
        let mut decode_failures = 0usize;
        for (_, token_id) in tokenizer.vocab() {
            let id = token_id as usize;
            if id >= vocab_size {
                continue;
            }
            match tokenizer.decode_token(token_id) {
                Ok(surface) => {
                    if is_numeric_surface(&surface) {
                        mask.set(id);
                    }
                }
                Err(err) => {
                    decode_failures += 1;
                    debug!(token_id, %err, "vocabulary entry failed to decode, disallowed");
                }
            }
        }
        if decode_failures > 0 {
            warn!(
                decode_failures,
                vocab_size, "vocabulary entries failed to decode during numeric classification"
            );
        }

        Ok(Self {
            mask: Arc::new(mask),
            decode_failures,
        })
    }

    /// Whether a token id is allowed in a numeric literal.
    #[inline]
    pub fn is_allowed(&self, token_id: u32) -> bool {
        self.mask.is_allowed(token_id as usize)
    }

    /// Number of allowed tokens.
    pub fn allowed_count(&self) -> usize {
        self.mask.allowed_count()
    }

    /// Vocabulary size the mask covers.
    pub fn vocab_size(&self) -> usize {
        self.mask.vocab_size()
    }

    /// Number of vocabulary entries that failed to decode during the scan.
    pub fn decode_failures(&self) -> usize {
        self.decode_failures
    }

    /// Shared handle to the underlying allow-mask.
    pub fn mask(&self) -> Arc<AllowMask> {
        Arc::clone(&self.mask)
    }
}
