use std::path::Path;
use tokenizers::Tokenizer;

/// Thin wrapper around a HuggingFace tokenizer.
///
/// The constraint machinery treats the tokenizer as an opaque capability:
/// decode token ids to text (with special tokens stripped), encode text to
/// ids, and enumerate the vocabulary. It is never mutated after load.
pub struct TokenizerWrapper {
    inner: Tokenizer,
}

impl TokenizerWrapper {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let inner =
            Tokenizer::from_file(path).map_err(|e| anyhow::anyhow!("tokenizer load: {e}"))?;
        Ok(Self { inner })
    }

    /// Character-level test tokenizer: digits, `.`, `"`, a few letters,
    /// whitespace tokens and a handful of multi-character tokens. The
    /// `Fuse` decoder concatenates tokens without separators so multi-token
    /// decode behaves like real byte-level tokenizers.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn for_testing() -> Self {
        use tokenizers::decoders::fuse::Fuse;
        use tokenizers::models::wordlevel::WordLevel;
        use tokenizers::pre_tokenizers::whitespace::Whitespace;

        const TEST_VOCAB: &[&str] = &[
            "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", ".", "\"", "e", "x", " ", "\n",
            "hello", "he said\"", "Value", ":", "42", "3.14",
        ];

        let mut vocab = ahash::AHashMap::new();
        for (id, surface) in TEST_VOCAB.iter().enumerate() {
            vocab.insert((*surface).to_string(), id as u32);
        }
        let model = WordLevel::builder()
            .vocab(vocab)
            .unk_token("x".into())
            .build()
            .expect("build test tokenizer model");
        let mut tokenizer = Tokenizer::new(model);
        tokenizer.with_pre_tokenizer(Some(Whitespace {}));
        tokenizer.with_decoder(Some(Fuse::new()));
        Self { inner: tokenizer }
    }

    pub fn encode(&self, text: &str) -> anyhow::Result<Vec<u32>> {
        let encoding = self
            .inner
            .encode(text, false)
            .map_err(|e| anyhow::anyhow!("encode: {e}"))?;
        Ok(encoding.get_ids().to_vec())
    }

    /// Decode a token id sequence to text, skipping special tokens.
    pub fn decode(&self, ids: &[u32]) -> anyhow::Result<String> {
        self.inner
            .decode(ids, true)
            .map_err(|e| anyhow::anyhow!("decode: {e}"))
    }

    /// Decode a single token id in isolation.
    pub fn decode_token(&self, id: u32) -> anyhow::Result<String> {
        self.decode(&[id])
    }

    /// Vocabulary size, including added tokens.
    pub fn vocab_size(&self) -> usize {
        self.inner.get_vocab_size(true)
    }

    /// Enumerate the full vocabulary as `(surface, token id)` pairs.
    pub fn vocab(&self) -> Vec<(String, u32)> {
        self.inner.get_vocab(true).into_iter().collect()
    }
}
