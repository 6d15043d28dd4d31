//! Pipeline facade.
//!
//! An [`Indexer`] holds the inputs that outlive a single text (irregular
//! forms, tracked vocabulary, options) and builds a fresh [`Trie`] for every
//! text it indexes. Nothing carries over from one call to the next.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{read_to_string, Result};
use crate::family::VocabularySourceData;
use crate::irregular::IrregularTable;
use crate::token::Sentence;
use crate::trie::Trie;
use crate::vocabulary::{tracked_words_from_json, TrackedWord};

/// Options controlling an indexing pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IndexOptions {
    /// Nest regular inflections under their stems
    pub collapse_suffixes: bool,
    /// Drop families with fewer occurrences than this
    pub min_occurrences: usize,
}

impl Default for IndexOptions {
    fn default() -> Self {
        IndexOptions {
            collapse_suffixes: true,
            min_occurrences: 1,
        }
    }
}

/// The result of indexing one text
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexReport {
    /// The sentences the rows' locators point into
    pub sentences: Vec<Sentence>,
    /// One row per word family
    pub rows: Vec<VocabularySourceData>,
}

impl IndexReport {
    /// Sentence text for a sentence id
    pub fn sentence(&self, sentence_id: usize) -> Option<&str> {
        self.sentences.get(sentence_id).map(|s| s.text.as_str())
    }

    /// Find the row whose stem is `stem` (already lowercased)
    pub fn row(&self, stem: &str) -> Option<&VocabularySourceData> {
        self.rows.iter().find(|r| r.stem() == stem)
    }
}

/// Runs the indexing pipeline with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct Indexer {
    irregulars: IrregularTable,
    tracked_words: Vec<TrackedWord>,
    options: IndexOptions,
}

impl Indexer {
    /// Create a builder
    pub fn builder() -> IndexerBuilder {
        IndexerBuilder::new()
    }

    /// The options in effect
    pub fn options(&self) -> &IndexOptions {
        &self.options
    }

    /// Build the trie for `text` and run every stage up to vocabulary merging
    pub fn build_trie(&self, text: &str) -> Trie {
        let mut trie = Trie::new();
        trie.add(text);
        if self.options.collapse_suffixes {
            trie.collapse_stems();
        }
        trie.merge_derived_word_into_stem(&self.irregulars);
        trie.merged_vocabulary(&self.tracked_words);
        trie
    }

    /// Index `text` and produce its display rows
    pub fn index(&self, text: &str) -> IndexReport {
        let trie = self.build_trie(text);

        let rows: Vec<_> = trie
            .families()
            .into_iter()
            .filter(|row| row.occurrence_count() >= self.options.min_occurrences)
            .collect();

        debug!(
            sentences = trie.sentences().len(),
            leaves = trie.len(),
            rows = rows.len(),
            "Indexed text into word families"
        );

        IndexReport {
            sentences: trie.sentences().to_vec(),
            rows,
        }
    }
}

/// Builder for an [`Indexer`]
#[derive(Debug, Default)]
pub struct IndexerBuilder {
    indexer: Indexer,
}

impl IndexerBuilder {
    /// Create a new builder with no irregular forms and no tracked words
    pub fn new() -> Self {
        IndexerBuilder::default()
    }

    /// Use the built-in English irregular forms
    pub fn english_irregulars(mut self) -> Self {
        self.indexer.irregulars.extend(IrregularTable::english());
        self
    }

    /// Add irregular forms
    pub fn irregulars(mut self, table: IrregularTable) -> Self {
        self.indexer.irregulars.extend(table);
        self
    }

    /// Load irregular forms from a TSV file
    pub fn irregulars_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let content = read_to_string(path.as_ref())?;
        Ok(self.irregulars(IrregularTable::from_tsv(&content)?))
    }

    /// Set the tracked vocabulary
    pub fn tracked_words(mut self, words: Vec<TrackedWord>) -> Self {
        self.indexer.tracked_words = words;
        self
    }

    /// Load the tracked vocabulary from a JSON file
    pub fn tracked_words_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let content = read_to_string(path.as_ref())?;
        Ok(self.tracked_words(tracked_words_from_json(&content)?))
    }

    /// Set the indexing options
    pub fn options(mut self, options: IndexOptions) -> Self {
        self.indexer.options = options;
        self
    }

    /// Build and return the Indexer
    pub fn build(self) -> Indexer {
        debug!(
            irregular_pairs = self.indexer.irregulars.len(),
            tracked_words = self.indexer.tracked_words.len(),
            "Built indexer"
        );
        self.indexer
    }
}
