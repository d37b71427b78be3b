//! Per-step stopping criteria for string and number fields.
//!
//! Both variants are pure predicates over their fixed state plus the
//! current token sequence. The string variant decodes only the most recent
//! token (O(1) per step); the number variant decodes the whole generated
//! suffix because decimal points and digit runs can span token boundaries
//! in either direction. That asymmetry is a deliberate cost/correctness
//! trade-off, not an oversight.

use tracing::warn;

use crate::tokenizer::TokenizerWrapper;

/// Maximum fractional digits allowed in a number field unless overridden.
pub const DEFAULT_PRECISION: usize = 3;

/// Stopping criterion for the field currently being generated.
///
/// The generation loop constructs one per request, dispatches on the field
/// kind, and calls [`should_stop`](Self::should_stop) after appending each
/// sampled token. Once it returns `true` the field is closed and the
/// criterion must not be consulted again for that request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoppingCriterion {
    /// Stop when the closing double quote arrives.
    StringField { prompt_length: usize },
    /// Stop when the numeric literal is malformed, exceeds the fractional
    /// precision, or runs past its end into separator text.
    NumberField {
        prompt_length: usize,
        precision: usize,
    },
}

impl StoppingCriterion {
    pub fn string_field(prompt_length: usize) -> Self {
        Self::StringField { prompt_length }
    }

    pub fn number_field(prompt_length: usize, precision: usize) -> Self {
        Self::NumberField {
            prompt_length,
            precision,
        }
    }

    pub fn number_field_default(prompt_length: usize) -> Self {
        Self::number_field(prompt_length, DEFAULT_PRECISION)
    }

    /// Decide whether generation of the current field should halt.
    ///
    /// `sequence` is the full token sequence, prompt prefix included.
    /// Read-only: never mutates the sequence, never requests regeneration.
    /// A decode failure is logged and treated as "continue"; a transient
    /// decode issue must not spuriously close the field.
    pub fn should_stop(&self, tokenizer: &TokenizerWrapper, sequence: &[u32]) -> bool {
        match *self {
            Self::StringField { prompt_length } => {
                string_should_stop(tokenizer, sequence, prompt_length)
            }
            Self::NumberField {
                prompt_length,
                precision,
            } => number_should_stop(tokenizer, sequence, prompt_length, precision),
        }
    }
}

/// Closing-quote detection.
///
/// The closing quote frequently arrives fused with adjacent punctuation,
/// but the `"` character is reliably present in the decoded fragment of
/// that one token, so decoding only the last token suffices.
fn string_should_stop(
    tokenizer: &TokenizerWrapper,
    sequence: &[u32],
    prompt_length: usize,
) -> bool {
    if sequence.len() <= prompt_length {
        return false;
    }
    let last = sequence[sequence.len() - 1];
    match tokenizer.decode_token(last) {
        Ok(fragment) => fragment.contains('"'),
        Err(err) => {
            warn!(token_id = last, %err, "failed to decode last token, continuing");
            false
        }
    }
}

/// Malformed/overrun numeric literal detection over the whole suffix.
///
/// Known edge case: the trailing-separator rule can fire prematurely if
/// the tokenizer emits a pure-whitespace token after a digit but before
/// the literal is actually finished.
fn number_should_stop(
    tokenizer: &TokenizerWrapper,
    sequence: &[u32],
    prompt_length: usize,
    precision: usize,
) -> bool {
    let suffix_ids = match sequence.get(prompt_length..) {
        Some(ids) if !ids.is_empty() => ids,
        _ => return false,
    };
    let decoded = match tokenizer.decode(suffix_ids) {
        Ok(text) => text,
        Err(err) => {
            warn!(%err, "failed to decode generated suffix, continuing");
            return false;
        }
    };

    let dots = decoded.matches('.').count();
    if dots > 1 {
        // A numeric literal has at most one decimal point
        return true;
    }
    if dots == 1 {
        if let Some((_, fractional)) = decoded.trim().split_once('.') {
            if fractional.chars().count() > precision {
                return true;
            }
        }
    }
    // The model has moved past the value into separator text. Integers are
    // unconstrained by precision; only this rule can stop an all-digit run.
    !decoded.is_empty()
        && decoded.chars().any(|c| c.is_ascii_digit())
        && matches!(decoded.chars().last(), Some(' ' | '\n'))
}
