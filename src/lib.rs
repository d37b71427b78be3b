//! Token-level constrained decoding for numeric and quoted-string fields.
//!
//! This crate steers an autoregressive generation loop so that the text it
//! produces for a single field conforms to a restricted sub-grammar:
//! either a numeric literal or a double-quoted string. It operates on token
//! ids and logit vectors only; it never runs model inference itself.
//!
//! Three primitives, built bottom-up:
//! - [`NumericTokenMask`]: one-time scan of the tokenizer vocabulary
//!   producing an allow-mask of numeric-compatible tokens.
//! - [`NumericMaskFilter`]: per-step logits filter that sets every
//!   disallowed token to `-inf` before sampling.
//! - [`StoppingCriterion`]: per-step predicate deciding whether the field
//!   being generated is syntactically complete.
//!
//! The embedding generation loop owns the token sequence and the logits;
//! this crate only reads the former and masks the latter. The allow-mask is
//! built once per tokenizer and shared read-only (via `Arc`) across
//! concurrent generation requests.
//!
//! # Usage
//! ```ignore
//! let tokenizer = TokenizerWrapper::from_file(path)?;
//! let mask = NumericTokenMask::from_tokenizer(&tokenizer)?;
//! let filter = NumericMaskFilter::from_mask(&mask);
//! let stop = StoppingCriterion::number_field_default(prompt_ids.len());
//!
//! loop {
//!     filter.process(&mut logits, &generated);
//!     let token = sample(&logits);
//!     sequence.push(token);
//!     if stop.should_stop(&tokenizer, &sequence) {
//!         break;
//!     }
//! }
//! ```

pub mod constraint;
pub mod error;
pub mod tokenizer;

pub use constraint::{
    has_samplable_token, AllowMask, LogitsProcessor, NumericMaskFilter, NumericTokenMask,
    StoppingCriterion, DEFAULT_PRECISION,
};
pub use error::ConstraintError;
pub use tokenizer::TokenizerWrapper;
