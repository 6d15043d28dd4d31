//! Character classification for word and sentence segmentation.
//!
//! This module decides which characters may appear in a trie path and folds
//! typographic variants (curly apostrophes, Unicode hyphens) onto the ASCII
//! characters the trie is keyed by.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Character categories used when segmenting text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharCategory {
    /// Any alphabetic character (Unicode-aware)
    Letter,
    /// Apostrophe, straight or typographic
    Apostrophe,
    /// Hyphen, ASCII or Unicode
    Hyphen,
    /// Sentence terminator (`.`, `!`, `?`, ellipsis, CJK full stops)
    SentenceEnd,
    /// Closing quote or bracket that may trail a sentence terminator
    Closing,
    /// Line break
    LineBreak,
    /// Spaces and tabs
    Transparent,
    /// Anything else (digits, symbols, other punctuation)
    #[default]
    Other,
}

impl CharCategory {
    /// Whether characters of this category may appear in a trie path
    pub fn is_path_char(&self) -> bool {
        matches!(
            self,
            CharCategory::Letter | CharCategory::Apostrophe | CharCategory::Hyphen
        )
    }
}

/// Typographic characters folded onto the trie alphabet
static FOLD_MAP: Lazy<HashMap<char, char>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert('\u{2019}', '\''); // right single quotation mark
    m.insert('\u{2018}', '\''); // left single quotation mark
    m.insert('\u{02BC}', '\''); // modifier letter apostrophe
    m.insert('\u{2010}', '-'); // hyphen
    m.insert('\u{2011}', '-'); // non-breaking hyphen
    m
});

static SENTENCE_END_CHARS: &[char] = &['.', '!', '?', '…', '。', '！', '？'];

static CLOSING_CHARS: &[char] = &['"', '\u{201D}', ')', ']', '}', '»', '」', '』'];

/// Get the category of a character
pub fn get_char_category(c: char) -> CharCategory {
    let c = fold_char(c);
    match c {
        '\'' => CharCategory::Apostrophe,
        '-' => CharCategory::Hyphen,
        '\n' | '\r' => CharCategory::LineBreak,
        c if SENTENCE_END_CHARS.contains(&c) => CharCategory::SentenceEnd,
        c if CLOSING_CHARS.contains(&c) => CharCategory::Closing,
        c if c.is_whitespace() => CharCategory::Transparent,
        c if c.is_alphabetic() => CharCategory::Letter,
        _ => CharCategory::Other,
    }
}

/// Fold typographic apostrophes and hyphens onto `'` and `-`
pub fn fold_char(c: char) -> char {
    *FOLD_MAP.get(&c).unwrap_or(&c)
}

/// Turn a surface word into the trie path it is indexed under.
///
/// The word is folded and lowercased. Returns `None` when any character falls
/// outside the trie alphabet (letters, apostrophe, hyphen) or the word is empty.
pub fn to_path(word: &str) -> Option<String> {
    let mut path = String::with_capacity(word.len());
    for c in word.chars() {
        if !get_char_category(c).is_path_char() {
            return None;
        }
        path.extend(fold_char(c).to_lowercase());
    }

    if path.is_empty() {
        None
    } else {
        Some(path)
    }
}
