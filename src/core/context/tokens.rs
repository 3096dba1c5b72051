//! Word tokenization with character offsets.
//!
//! A token is any maximal run of non-whitespace characters.
//! Offsets are measured in **characters** (Unicode scalar
//! values), not bytes, so spans reported by an entity recognizer
//! line up with tokens even when the document contains accented
//! or other multi-byte characters.
//!
//! # Example
//!
//! ```
//! use toponym::core::context::TokenIndex;
//!
//! let index = TokenIndex::build("Up the  Madeira river");
//! assert_eq!(index.len(), 4);
//! assert_eq!(index.get(2).unwrap().start, 8);
//!
//! // Offsets inside the double space resolve to the preceding word
//! assert_eq!(index.locate(7), Some(1));
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

use crate::core::types::Token;

static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").expect("word pattern is valid"));

/// Ordered, immutable token sequence for one document.
#[derive(Debug, Clone, Default)]
pub struct TokenIndex {
    tokens: Vec<Token>,

    /// Document length in characters
    char_len: usize,
}

impl TokenIndex {
    /// Tokenize a document.
    ///
    /// Whitespace is discarded but still counted in the offsets,
    /// so every character of `document` lies either inside exactly
    /// one token or in a discarded whitespace gap.
    pub fn build(document: &str) -> Self {
        let mut tokens = Vec::new();

        // Walk matches in order, converting byte positions to
        // character positions incrementally
        let mut byte_cursor = 0;
        let mut char_cursor = 0;

        for word in WORD_PATTERN.find_iter(document) {
            char_cursor += document[byte_cursor..word.start()].chars().count();
            let char_count = word.as_str().chars().count();

            tokens.push(Token {
                text: word.as_str().to_string(),
                start: char_cursor,
                end: char_cursor + char_count,
                index: tokens.len(),
            });

            char_cursor += char_count;
            byte_cursor = word.end();
        }

        let char_len = char_cursor + document[byte_cursor..].chars().count();

        tracing::debug!(
            "Tokenized document: {} tokens over {} chars",
            tokens.len(),
            char_len
        );

        Self { tokens, char_len }
    }

    /// Find the token covering or most closely preceding `char_idx`.
    ///
    /// - inside a token: that token
    /// - in the whitespace between tokens `i` and `i + 1`: `i`
    /// - before the first token: `0`
    /// - at or past the end of the last token: `len() - 1`
    ///
    /// Binary search over the start offsets, O(log n). Returns
    /// `None` only when the document has no tokens at all.
    pub fn locate(&self, char_idx: usize) -> Option<usize> {
        if self.tokens.is_empty() {
            return None;
        }

        let following = self.tokens.partition_point(|token| token.start <= char_idx);
        Some(following.saturating_sub(1))
    }

    /// Join the texts of tokens in `range` with single spaces.
    ///
    /// The range is clipped to the token sequence.
    pub fn join(&self, range: Range<usize>) -> String {
        let end = range.end.min(self.tokens.len());
        let start = range.start.min(end);

        self.tokens[start..end]
            .iter()
            .map(|token| token.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Length of the tokenized document in characters.
    pub fn char_len(&self) -> usize {
        self.char_len
    }
}
