//! Constrained field decoding primitives.
//!
//! The pieces compose bottom-up: [`vocabulary`] classifies the tokenizer
//! vocabulary once into an [`AllowMask`], [`filter`] applies that mask to
//! logit vectors on every decoding step, and [`stopping`] decides when the
//! field being generated is syntactically complete.

pub mod bitmask;
pub mod filter;
pub mod stopping;
pub mod vocabulary;

pub use bitmask::AllowMask;
pub use filter::{has_samplable_token, LogitsProcessor, NumericMaskFilter};
pub use stopping::{StoppingCriterion, DEFAULT_PRECISION};
pub use vocabulary::NumericTokenMask;
