use thiserror::Error;

/// Configuration errors surfaced at construction time, before any
/// generation step runs. Per-step decode problems are deliberately not
/// represented here: those are absorbed locally (logged, fail-safe
/// default) and never cross the generation-loop boundary.
#[derive(Error, Debug)]
pub enum ConstraintError {
    #[error("tokenizer vocabulary is empty")]
    EmptyVocabulary,

    #[error("logits length {logits_len} does not match mask vocabulary size {vocab_size}")]
    MaskLengthMismatch { vocab_size: usize, logits_len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_empty_vocabulary() {
        let e = ConstraintError::EmptyVocabulary;
        assert_eq!(e.to_string(), "tokenizer vocabulary is empty");
    }

    #[test]
    fn error_display_mask_length_mismatch() {
        let e = ConstraintError::MaskLengthMismatch {
            vocab_size: 100,
            logits_len: 50,
        };
        assert_eq!(
            e.to_string(),
            "logits length 50 does not match mask vocabulary size 100"
        );
    }
}
