//! Word tokenizer.
//!
//! The tokenizer lazily walks a text sentence by sentence and yields every word
//! token together with its sentence id and byte offset inside that sentence.
//! A word is a maximal run of letters, optionally joined by internal
//! apostrophes or hyphens ("don't", "well-known").

use once_cell::sync::Lazy;
use regex::{Matches, Regex};
use unicode_normalization::UnicodeNormalization;

use crate::sentence::SentenceSplitter;
use crate::token::WordToken;

/// Pattern for one word token
pub(crate) static WORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\p{Alphabetic}+(?:['’ʼ‘‐‑-]\p{Alphabetic}+)*").expect("Invalid regex")
});

/// Normalize raw text before segmentation (NFC)
pub fn normalize(text: &str) -> String {
    text.nfc().collect()
}

/// Lazy tokenizer over an already normalized text
pub struct Tokenizer<'a> {
    sentences: SentenceSplitter<'a>,
    /// The sentence being scanned: (id, text, remaining word matches)
    current: Option<(usize, &'a str, Matches<'static, 'a>)>,
    next_sentence_id: usize,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer over `text`.
    ///
    /// The text should already be normalized with [`normalize`]; offsets refer
    /// to the text exactly as given.
    pub fn new(text: &'a str) -> Self {
        Tokenizer {
            sentences: SentenceSplitter::new(text),
            current: None,
            next_sentence_id: 0,
        }
    }

    /// Number of sentences started so far
    pub fn sentence_count(&self) -> usize {
        self.next_sentence_id
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = WordToken<'a>;

    fn next(&mut self) -> Option<WordToken<'a>> {
        loop {
            if let Some((sentence_id, sentence, matches)) = self.current.as_mut() {
                if let Some(m) = matches.next() {
                    return Some(WordToken {
                        sentence_id: *sentence_id,
                        sentence: *sentence,
                        text: m.as_str(),
                        start: m.start(),
                    });
                }
            }

            let sentence = self.sentences.next()?;
            let sentence_id = self.next_sentence_id;
            self.next_sentence_id += 1;
            self.current = Some((sentence_id, sentence, WORD_RE.find_iter(sentence)));
        }
    }
}

/// Tokenize a text into owned `(sentence_id, word, start)` triples.
///
/// Mostly useful for debugging and tests; the trie consumes [`Tokenizer`]
/// directly.
pub fn tokenize(text: &str) -> Vec<(usize, String, usize)> {
    let normalized = normalize(text);
    Tokenizer::new(&normalized)
        .map(|t| (t.sentence_id, t.text.to_string(), t.start))
        .collect()
}
