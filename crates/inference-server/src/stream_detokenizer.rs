//! Token-by-token text assembly that hides incomplete UTF-8 boundaries.
//!
//! Ported byte-for-byte from the heuristic in
//! `language_models/server/models/_stream_detokenizer.py`: a model's
//! tokenizer can split a multi-byte character across two tokens, so a
//! single new token may decode (together with however much prior context
//! the tokenizer needs) to a string ending in the Unicode replacement
//! character. When that happens nothing is emitted yet and the pending
//! token bytes are carried into the next call (`spec.md` §9, "Stream
//! detokenizer replacement character").

const REPLACEMENT_CHAR: char = '\u{FFFD}';

#[derive(Debug, Default)]
pub struct StreamDetokenizer {
    pending: Vec<u8>,
}

impl StreamDetokenizer {
    pub fn new() -> Self {
        StreamDetokenizer { pending: Vec::new() }
    }

    /// Feeds one token's raw bytes, returning the newly completed text, or
    /// `""` while the decoded suffix is still incomplete.
    pub fn push(&mut self, token_bytes: &[u8]) -> String {
        self.pending.extend_from_slice(token_bytes);

        let decoded = String::from_utf8_lossy(&self.pending);
        if decoded.ends_with(REPLACEMENT_CHAR) {
            return String::new();
        }

        let text = decoded.into_owned();
        self.pending.clear();
        text
    }
}
