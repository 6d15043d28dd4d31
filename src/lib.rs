//! # lexitrie
//!
//! Index free-form text (subtitles, articles) into a character-keyed prefix
//! tree, fold inflected forms into word families, cross-reference them with a
//! user's tracked vocabulary and produce per-family display rows with
//! per-sentence highlight spans.
//!
//! ## Quick Start
//!
//! ```rust
//! use lexitrie::{LearningPhase, TrackedWord, Trie};
//!
//! let mut trie = Trie::new();
//! trie.add("The cat runs. The cats ran fast.");
//!
//! let tracked = vec![TrackedWord::new("cat", LearningPhase::Acquainted)];
//! let rows = trie.generate([("run", "ran")], &tracked);
//!
//! for row in &rows {
//!     println!("{}: {:?} ({})", row.stem(), row.forms(), row.tracked_word.learning_phase);
//! }
//! ```
//!
//! ## Reusing a configuration
//!
//! An [`Indexer`] keeps the irregular forms and tracked words between texts
//! and builds a fresh trie for each one:
//!
//! ```rust
//! use lexitrie::Indexer;
//!
//! let indexer = Indexer::builder().english_irregulars().build();
//! let report = indexer.index("Children went home. A child goes home.");
//!
//! let child = report.row("child").unwrap();
//! assert_eq!(child.occurrence_count(), 2);
//! ```
//!
//! ## Case policy
//!
//! Trie paths are lowercased, so "Cat" and "cat" share one leaf. The surface
//! casing stays available through the locators, which point into the stored
//! sentences.

pub mod char_categories;
pub mod error;
pub mod family;
pub mod indexer;
pub mod irregular;
pub mod sentence;
pub mod stemmer;
pub mod token;
pub mod tokenizer;
pub mod trie;
pub mod vocabulary;

// Re-export main types for convenience
pub use char_categories::{get_char_category, to_path, CharCategory};
pub use error::{LexiconError, Result};
pub use family::{Segment, VocabularySourceData, WordOccurrence};
pub use indexer::{IndexOptions, IndexReport, Indexer, IndexerBuilder};
pub use irregular::IrregularTable;
pub use sentence::{split_sentences, SentenceSplitter};
pub use stemmer::{inflections, SuffixRule, SuffixShape, SUFFIX_RULES};
pub use token::{Locator, Sentence, TextSpan, WordToken};
pub use tokenizer::{normalize, tokenize, Tokenizer};
pub use trie::{Leaf, LeafId, Trie, TrieNode};
pub use vocabulary::{tracked_words_from_json, LearningPhase, Timestamp, TrackedWord};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_pipeline() {
        let mut trie = Trie::new();
        trie.add("The cat runs. The cats ran fast.");

        let rows = trie.generate(
            [("run", "ran")],
            &[TrackedWord::new("cat", LearningPhase::Acquainted)],
        );

        // Families: cat, fast, run, the
        assert_eq!(rows.len(), 4);

        let cat = rows.iter().find(|r| r.stem() == "cat").unwrap();
        assert_eq!(cat.occurrence_count(), 2);
        assert_eq!(cat.word_occurrences.len(), 2);
        assert_eq!(cat.tracked_word.learning_phase, LearningPhase::Acquainted);

        let run = rows.iter().find(|r| r.stem() == "run").unwrap();
        let sentences: Vec<usize> = run.word_occurrences.iter().map(|o| o.sentence_id).collect();
        assert_eq!(sentences, vec![0, 1]);
    }

    #[test]
    fn test_highlight_from_rows() {
        let mut trie = Trie::new();
        trie.add("Dogs bark at other dogs.");
        let rows = trie.generate(IrregularTable::new().iter(), &[]);

        let dog = rows.iter().find(|r| r.stem() == "dog").unwrap();
        let occurrence = &dog.word_occurrences[0];
        let sentence = &trie.sentences()[occurrence.sentence_id].text;

        assert_eq!(
            occurrence.highlight(sentence, "<b>", "</b>"),
            "<b>Dogs</b> bark at other <b>dogs</b>."
        );
    }
}
