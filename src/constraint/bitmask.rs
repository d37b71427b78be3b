//! Packed allow-mask over a tokenizer vocabulary.
//!
//! Layout: `vocab_size.div_ceil(64)` words stored as `Vec<u64>`.
//! Each bit corresponds to one token id: bit set = token allowed.

/// Packed per-token allow-mask.
///
/// Built once per tokenizer, immutable afterwards, and shared read-only
/// (via `Arc`) across every filter instance and generation request using
/// that tokenizer. Masking a logits slice walks 64 tokens at a time with
/// fast paths for all-set and all-clear words.
#[derive(Debug, Clone)]
pub struct AllowMask {
    words: Vec<u64>,
    vocab_size: usize,
}

impl AllowMask {
    /// Create a mask with all bits cleared (all tokens disallowed).
    pub fn new(vocab_size: usize) -> Self {
        Self {
            words: vec![0u64; vocab_size.div_ceil(64)],
            vocab_size,
        }
    }

    /// Mark a token as allowed.
    #[inline]
    pub fn set(&mut self, token_id: usize) {
        debug_assert!(token_id < self.vocab_size);
        self.words[token_id / 64] |= 1u64 << (token_id % 64);
    }

    /// Mark a token as disallowed.
    #[inline]
    pub fn clear(&mut self, token_id: usize) {
        debug_assert!(token_id < self.vocab_size);
        self.words[token_id / 64] &= !(1u64 << (token_id % 64));
    }

    /// Whether a token is allowed. Ids outside the vocabulary are
    /// disallowed.
    #[inline]
    pub fn is_allowed(&self, token_id: usize) -> bool {
        if token_id >= self.vocab_size {
            return false;
        }
        (self.words[token_id / 64] >> (token_id % 64)) & 1 != 0
    }

    /// Number of allowed tokens.
    pub fn allowed_count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Vocabulary size this mask was built for.
    pub fn vocab_size(&self) -> usize {
        self.vocab_size
    }

    /// Set every disallowed token's logit to `-inf`, leaving allowed
    /// entries untouched. Idempotent: reapplying to its own output is a
    /// no-op.
    pub fn apply_to_logits(&self, logits: &mut [f32]) {
        for (word_idx, &word) in self.words.iter().enumerate() {
            let base_token = word_idx * 64;
            if word == !0u64 {
                // All 64 tokens allowed, skip
                continue;
            }
            if word == 0 {
                let end = (base_token + 64).min(logits.len());
                if base_token >= logits.len() {
                    break;
                }
                for logit in &mut logits[base_token..end] {
                    *logit = f32::NEG_INFINITY;
                }
                continue;
            }
            // Mixed word — check individual bits
            for bit in 0..64 {
                let token_id = base_token + bit;
                if token_id >= logits.len() {
                    break;
                }
                if (word >> bit) & 1 == 0 {
                    logits[token_id] = f32::NEG_INFINITY;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_mask_disallows_everything() {
        let mask = AllowMask::new(100);
        for token in 0..100 {
            assert!(!mask.is_allowed(token));
        }
        assert_eq!(mask.allowed_count(), 0);
    }

    #[test]
    fn set_and_clear_roundtrip() {
        let mut mask = AllowMask::new(128);
        mask.set(0);
        mask.set(63);
        mask.set(64);
        mask.set(127);

        assert!(mask.is_allowed(0));
        assert!(mask.is_allowed(63));
        assert!(mask.is_allowed(64));
        assert!(mask.is_allowed(127));
        assert!(!mask.is_allowed(1));
        assert_eq!(mask.allowed_count(), 4);

        mask.clear(63);
        assert!(!mask.is_allowed(63));
        assert_eq!(mask.allowed_count(), 3);
    }

    #[test]
    fn out_of_range_is_disallowed() {
        let mask = AllowMask::new(10);
        assert!(!mask.is_allowed(10));
        assert!(!mask.is_allowed(9999));
    }

    #[test]
    fn apply_to_logits_masks_disallowed() {
        let mut mask = AllowMask::new(5);
        mask.set(0);
        mask.set(1);
        mask.set(2);

        let mut logits = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        mask.apply_to_logits(&mut logits);

        assert_eq!(logits[0], 1.0);
        assert_eq!(logits[1], 2.0);
        assert_eq!(logits[2], 3.0);
        assert_eq!(logits[3], f32::NEG_INFINITY);
        assert_eq!(logits[4], f32::NEG_INFINITY);
    }

    #[test]
    fn apply_to_logits_idempotent() {
        let mut mask = AllowMask::new(5);
        mask.set(1);
        mask.set(3);

        let mut once = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        mask.apply_to_logits(&mut once);
        let mut twice = once.clone();
        mask.apply_to_logits(&mut twice);
        assert_eq!(once, twice);
    }

    #[test]
    fn apply_to_logits_empty_mask_all_neg_inf() {
        let mask = AllowMask::new(70);
        let mut logits = vec![1.0f32; 70];
        mask.apply_to_logits(&mut logits);
        assert!(logits.iter().all(|&l| l == f32::NEG_INFINITY));
    }

    #[test]
    fn non_aligned_vocab_size() {
        // vocab_size not a multiple of 64
        let mut mask = AllowMask::new(70);
        mask.set(69);
        assert!(mask.is_allowed(69));

        let mut logits = vec![1.0f32; 70];
        mask.apply_to_logits(&mut logits);
        assert_eq!(logits[69], 1.0);
        assert_eq!(logits[68], f32::NEG_INFINITY);
    }
}
