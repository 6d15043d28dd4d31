//! User vocabulary state and its merge into the trie.
//!
//! The learning phase of a word is owned by whoever tracks the user's
//! vocabulary. This module only reads that state and annotates matching
//! leaves with it; it never creates leaves and never changes a phase.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::char_categories::to_path;
use crate::error::Result;
use crate::trie::Trie;

/// Milliseconds since the Unix epoch
pub type Timestamp = i64;

/// Where a word stands in the user's learning process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LearningPhase {
    /// Not tracked yet
    #[default]
    New,
    /// Being acquainted
    Retaining,
    /// Known to the user
    Acquainted,
    /// Being removed from the known words
    Fading,
}

impl LearningPhase {
    /// Convert to a string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            LearningPhase::New => "NEW",
            LearningPhase::Retaining => "RETAINING",
            LearningPhase::Acquainted => "ACQUAINTED",
            LearningPhase::Fading => "FADING",
        }
    }
}

impl std::fmt::Display for LearningPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A word the user tracks, as supplied by the vocabulary store
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedWord {
    /// The word form
    pub form: String,
    /// Whether the user added the word themselves
    #[serde(default)]
    pub is_user: bool,
    /// Frequency rank of the word, if known
    #[serde(default)]
    pub rank: Option<u32>,
    /// Last modification time
    #[serde(default)]
    pub time_modified: Option<Timestamp>,
    /// Current learning phase
    #[serde(default)]
    pub learning_phase: LearningPhase,
}

impl TrackedWord {
    /// Create a tracked word in the given phase
    pub fn new(form: impl Into<String>, learning_phase: LearningPhase) -> Self {
        TrackedWord {
            form: form.into(),
            learning_phase,
            ..Default::default()
        }
    }

    /// The default state of a word nobody tracks yet
    pub fn untracked(form: impl Into<String>) -> Self {
        TrackedWord::new(form, LearningPhase::New)
    }
}

/// Parse a JSON array of tracked-word rows
pub fn tracked_words_from_json(json: &str) -> Result<Vec<TrackedWord>> {
    Ok(serde_json::from_str(json)?)
}

impl Trie {
    /// Attach each tracked word to the leaf of the same form.
    ///
    /// Forms absent from the trie are skipped; the trie's shape and locators
    /// are left untouched. Returns the number of leaves annotated.
    pub fn merged_vocabulary(&mut self, tracked_words: &[TrackedWord]) -> usize {
        let mut merged = 0;

        for tracked in tracked_words {
            let Some(id) = to_path(&tracked.form).and_then(|path| self.leaf_id_at(&path)) else {
                continue;
            };
            self.leaf_mut(id).tracked_word = Some(tracked.clone());
            merged += 1;
        }

        debug!(
            tracked = tracked_words.len(),
            merged,
            "Merged vocabulary into trie"
        );
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_attaches_to_existing_leaf() {
        let mut trie = Trie::new();
        trie.add("The cat sat.");

        let merged = trie.merged_vocabulary(&[TrackedWord::new("Cat", LearningPhase::Acquainted)]);

        assert_eq!(merged, 1);
        let cat = trie.get_leaf("cat").unwrap();
        assert_eq!(
            cat.tracked_word.as_ref().map(|t| t.learning_phase),
            Some(LearningPhase::Acquainted)
        );
    }

    #[test]
    fn test_merge_absent_word_is_noop() {
        let mut trie = Trie::new();
        trie.add("The cat sat.");
        let before = trie.leaves().to_vec();

        let merged = trie.merged_vocabulary(&[
            TrackedWord::untracked("nonexistent-word"),
            TrackedWord::untracked("ca"),
        ]);

        assert_eq!(merged, 0);
        assert_eq!(trie.leaves(), before.as_slice());
        assert!(!trie.has_word("nonexistent-word"));
    }

    #[test]
    fn test_merge_replaces_previous_state() {
        let mut trie = Trie::new();
        trie.add("word");

        trie.merged_vocabulary(&[TrackedWord::new("word", LearningPhase::Retaining)]);
        trie.merged_vocabulary(&[TrackedWord::new("word", LearningPhase::Fading)]);

        let word = trie.get_leaf("word").unwrap();
        assert_eq!(
            word.tracked_word.as_ref().unwrap().learning_phase,
            LearningPhase::Fading
        );
    }

    #[test]
    fn test_tracked_words_from_json() {
        let json = r#"[
            {"form": "cat", "isUser": true, "rank": 1200, "timeModified": 1700000000000, "learningPhase": "ACQUAINTED"},
            {"form": "dog"}
        ]"#;

        let words = tracked_words_from_json(json).unwrap();
        assert_eq!(words.len(), 2);
        assert!(words[0].is_user);
        assert_eq!(words[0].rank, Some(1200));
        assert_eq!(words[0].time_modified, Some(1_700_000_000_000));
        assert_eq!(words[0].learning_phase, LearningPhase::Acquainted);
        assert_eq!(words[1].learning_phase, LearningPhase::New);
    }

    #[test]
    fn test_tracked_words_from_bad_json() {
        assert!(tracked_words_from_json("{not json").is_err());
    }

    #[test]
    fn test_phase_names() {
        assert_eq!(LearningPhase::Retaining.to_string(), "RETAINING");
        let json = serde_json::to_string(&LearningPhase::Fading).unwrap();
        assert_eq!(json, "\"FADING\"");
    }
}
