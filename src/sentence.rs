//! Sentence segmentation.
//!
//! Text is cut after a run of sentence terminators (plus any closing quotes or
//! brackets that follow them) and at line breaks. Each piece is trimmed, and
//! pieces that contain no word are dropped so that sentence ids stay dense.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::char_categories::{get_char_category, CharCategory};
use crate::tokenizer::WORD_RE;

/// Iterator over the sentences of a text
pub struct SentenceSplitter<'a> {
    text: &'a str,
    chars: Peekable<CharIndices<'a>>,
    start: usize,
}

impl<'a> SentenceSplitter<'a> {
    /// Create a splitter over `text`
    pub fn new(text: &'a str) -> Self {
        SentenceSplitter {
            text,
            chars: text.char_indices().peekable(),
            start: 0,
        }
    }

    /// Find the end of the next raw segment, returning `(segment_end, next_start)`
    fn next_boundary(&mut self) -> Option<(usize, usize)> {
        while let Some((i, c)) = self.chars.next() {
            match get_char_category(c) {
                CharCategory::SentenceEnd => {
                    let mut end = i + c.len_utf8();
                    // Swallow "?!", "..." and any closing quotes after them
                    while let Some(&(j, next)) = self.chars.peek() {
                        match get_char_category(next) {
                            CharCategory::SentenceEnd | CharCategory::Closing => {
                                end = j + next.len_utf8();
                                self.chars.next();
                            }
                            _ => break,
                        }
                    }
                    return Some((end, end));
                }
                CharCategory::LineBreak => return Some((i, i + c.len_utf8())),
                _ => {}
            }
        }

        if self.start < self.text.len() {
            Some((self.text.len(), self.text.len()))
        } else {
            None
        }
    }
}

impl<'a> Iterator for SentenceSplitter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            let (end, next_start) = self.next_boundary()?;
            let segment = self.text[self.start..end].trim();
            self.start = next_start;

            if WORD_RE.is_match(segment) {
                return Some(segment);
            }
        }
    }
}

/// Split text into sentences (convenience wrapper around [`SentenceSplitter`])
pub fn split_sentences(text: &str) -> Vec<&str> {
    SentenceSplitter::new(text).collect()
}
