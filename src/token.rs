//! Token and occurrence representation.
//!
//! A [`WordToken`] is what the tokenizer yields while scanning text; a
//! [`Locator`] is the compact back-reference a trie leaf keeps for each
//! occurrence, pointing into the list of stored [`Sentence`]s.

use serde::{Deserialize, Serialize};

/// A single word token produced by the tokenizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordToken<'a> {
    /// Index of the sentence this token belongs to (dense, in document order)
    pub sentence_id: usize,

    /// The sentence text the token was found in
    pub sentence: &'a str,

    /// The surface text of the token, casing preserved
    pub text: &'a str,

    /// Starting byte offset within the sentence
    pub start: usize,
}

impl WordToken<'_> {
    /// Length in bytes of the surface text
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Tokens are never empty; provided for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A sentence of the indexed text, stored once and referenced by id
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sentence {
    /// The sentence text, after normalization and trimming
    pub text: String,
}

impl Sentence {
    /// Create a new sentence
    pub fn new(text: impl Into<String>) -> Self {
        Sentence { text: text.into() }
    }

    /// Get the surface text a locator points at, if it lies inside this sentence
    pub fn slice(&self, start_offset: usize, word_length: usize) -> Option<&str> {
        self.text.get(start_offset..start_offset + word_length)
    }
}

impl std::fmt::Display for Sentence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A pointer to one occurrence of a word.
///
/// Ordering is by `(sentence_id, start_offset)`, which is the order occurrences
/// are grouped in for display.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct Locator {
    /// Index into the sentence list
    pub sentence_id: usize,
    /// Starting byte offset within the sentence
    pub start_offset: usize,
    /// Length of the surface word in bytes
    pub word_length: usize,
}

impl Locator {
    /// Create a new locator
    pub fn new(sentence_id: usize, start_offset: usize, word_length: usize) -> Self {
        Locator {
            sentence_id,
            start_offset,
            word_length,
        }
    }

    /// The span this locator covers within its sentence
    pub fn span(&self) -> TextSpan {
        TextSpan {
            start_offset: self.start_offset,
            word_length: self.word_length,
        }
    }
}

/// A highlighted span within one sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSpan {
    /// Starting byte offset within the sentence
    pub start_offset: usize,
    /// Length in bytes
    pub word_length: usize,
}

impl TextSpan {
    /// Byte offset one past the end of the span
    pub fn end_offset(&self) -> usize {
        self.start_offset + self.word_length
    }
}
