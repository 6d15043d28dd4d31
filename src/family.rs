//! Word family generation.
//!
//! A word family is a stem leaf plus every leaf nested under it. Generating a
//! family flattens those leaves, combines their locators and groups them by
//! sentence, which is the shape the display layer renders from.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::token::{Locator, TextSpan};
use crate::trie::{Leaf, LeafId, Trie};
use crate::vocabulary::TrackedWord;

/// The highlighted spans of a word family within one sentence
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordOccurrence {
    /// The sentence the spans belong to
    pub sentence_id: usize,
    /// Spans in increasing offset order
    pub text_spans: Vec<TextSpan>,
}

/// A piece of a sentence, highlighted or not
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment<'a> {
    /// The text of the piece
    pub text: &'a str,
    /// Whether the piece is an occurrence of the word family
    pub highlighted: bool,
}

impl WordOccurrence {
    /// Split `sentence` into alternating plain and highlighted segments.
    ///
    /// Spans that fall outside the sentence or overlap an earlier span are
    /// skipped. Empty plain segments are not emitted.
    pub fn segments<'a>(&self, sentence: &'a str) -> Vec<Segment<'a>> {
        let mut segments = Vec::with_capacity(self.text_spans.len() * 2 + 1);
        let mut cursor = 0;

        for span in &self.text_spans {
            if span.start_offset < cursor {
                continue;
            }
            let Some(word) = sentence.get(span.start_offset..span.end_offset()) else {
                continue;
            };
            if span.start_offset > cursor {
                segments.push(Segment {
                    text: &sentence[cursor..span.start_offset],
                    highlighted: false,
                });
            }
            segments.push(Segment {
                text: word,
                highlighted: true,
            });
            cursor = span.end_offset();
        }

        if cursor < sentence.len() {
            segments.push(Segment {
                text: &sentence[cursor..],
                highlighted: false,
            });
        }
        segments
    }

    /// Render the sentence with every span wrapped in `open`/`close`
    pub fn highlight(&self, sentence: &str, open: &str, close: &str) -> String {
        let mut out = String::with_capacity(sentence.len() + self.text_spans.len() * 4);
        for segment in self.segments(sentence) {
            if segment.highlighted {
                out.push_str(open);
                out.push_str(segment.text);
                out.push_str(close);
            } else {
                out.push_str(segment.text);
            }
        }
        out
    }
}

/// One display row: a word family with its tracking state and occurrences
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularySourceData {
    /// Tracking state of the stem (defaults to `NEW`)
    pub tracked_word: TrackedWord,
    /// The stem first, then every nested leaf that occurs, depth-first
    pub word_family: Vec<Leaf>,
    /// All locators of the family, sorted by sentence and offset
    pub locators: Vec<Locator>,
    /// The locators grouped per sentence
    pub word_occurrences: Vec<WordOccurrence>,
}

impl VocabularySourceData {
    /// Total number of occurrences of the family
    pub fn occurrence_count(&self) -> usize {
        self.locators.len()
    }

    /// Paths of the family members, stem first
    pub fn forms(&self) -> Vec<&str> {
        self.word_family.iter().map(|l| l.pathe.as_str()).collect()
    }

    /// The stem's path
    pub fn stem(&self) -> &str {
        self.word_family.first().map_or("", |l| l.pathe.as_str())
    }
}

/// Group sorted locators by sentence
fn group_occurrences(locators: &[Locator]) -> Vec<WordOccurrence> {
    let mut occurrences: Vec<WordOccurrence> = Vec::new();

    for locator in locators {
        match occurrences.last_mut() {
            Some(last) if last.sentence_id == locator.sentence_id => {
                last.text_spans.push(locator.span());
            }
            _ => occurrences.push(WordOccurrence {
                sentence_id: locator.sentence_id,
                text_spans: vec![locator.span()],
            }),
        }
    }

    occurrences
}

impl Trie {
    /// Build the display row for the family headed by `id`.
    ///
    /// `id` is normally a root leaf, but any leaf works: its own nested forms
    /// make up the family.
    pub fn family(&self, id: LeafId) -> VocabularySourceData {
        fn visit(trie: &Trie, id: LeafId, family: &mut Vec<Leaf>, locators: &mut Vec<Locator>) {
            for &child in &trie.leaf(id).inflected_forms {
                let leaf = trie.leaf(child);
                if !leaf.locators.is_empty() {
                    family.push(leaf.clone());
                    locators.extend_from_slice(&leaf.locators);
                }
                visit(trie, child, family, locators);
            }
        }

        let stem = self.leaf(id);
        let mut word_family = vec![stem.clone()];
        let mut locators = stem.locators.clone();
        visit(self, id, &mut word_family, &mut locators);

        locators.sort_unstable_by_key(|l| (l.sentence_id, l.start_offset));
        let word_occurrences = group_occurrences(&locators);

        let tracked_word = stem
            .tracked_word
            .clone()
            .unwrap_or_else(|| TrackedWord::untracked(stem.pathe.clone()));

        VocabularySourceData {
            tracked_word,
            word_family,
            locators,
            word_occurrences,
        }
    }

    /// Build the display row for the family headed by `word`, if it is in the trie
    pub fn family_of(&self, word: &str) -> Option<VocabularySourceData> {
        self.leaf_id(word).map(|id| self.family(id))
    }

    /// Rows for every root leaf whose family occurs in the text, in trie order
    pub fn families(&self) -> Vec<VocabularySourceData> {
        self.leaf_ids()
            .into_iter()
            .filter(|&id| self.leaf(id).is_root())
            .map(|id| self.family(id))
            .filter(|row| !row.locators.is_empty())
            .collect()
    }

    /// Run the whole pipeline over the indexed text.
    ///
    /// Collapses suffixes (unless already done), links irregular pairs, merges
    /// the tracked words and returns one row per word family.
    pub fn generate<I, S, T>(&mut self, irregulars: I, tracked_words: &[TrackedWord]) -> Vec<VocabularySourceData>
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        if !self.is_collapsed() {
            self.collapse_stems();
        }
        self.merge_derived_word_into_stem(irregulars);
        self.merged_vocabulary(tracked_words);

        let rows = self.families();
        debug!(rows = rows.len(), "Generated word families");
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::LearningPhase;

    #[test]
    fn test_family_combines_inflections() {
        let mut trie = Trie::new();
        trie.add("The cat sat. Two cats sat. The cat's toy.");
        trie.collapse_stems();

        let row = trie.family_of("cat").unwrap();

        assert_eq!(row.forms(), vec!["cat", "cats", "cat's"]);
        assert_eq!(row.occurrence_count(), 3);
        assert_eq!(row.tracked_word, TrackedWord::untracked("cat"));
    }

    #[test]
    fn test_occurrences_grouped_by_sentence() {
        let mut trie = Trie::new();
        trie.add("Walk, walked, walking. Nothing here. He walks.");
        trie.collapse_stems();

        let row = trie.family_of("walk").unwrap();

        assert_eq!(row.word_occurrences.len(), 2);
        let first = &row.word_occurrences[0];
        assert_eq!(first.sentence_id, 0);
        let starts: Vec<usize> = first.text_spans.iter().map(|s| s.start_offset).collect();
        assert_eq!(starts, vec![0, 6, 14]);
        assert_eq!(row.word_occurrences[1].sentence_id, 2);
    }

    #[test]
    fn test_synthetic_stem_family() {
        let mut trie = Trie::new();
        trie.add("jumped and jumping");
        trie.collapse_stems();

        let row = trie.family_of("jump").unwrap();

        assert_eq!(row.word_family[0].pathe, "jump");
        assert!(row.word_family[0].locators.is_empty());
        assert_eq!(row.occurrence_count(), 2);
    }

    #[test]
    fn test_family_skips_nested_leaves_without_locators() {
        let mut trie = Trie::new();
        trie.add("Sprint! She runs.");
        trie.collapse_stems();
        // "run" only exists as a synthetic stem of "runs"
        trie.merge_derived_word_into_stem([("sprint", "run")]);

        let row = trie.family_of("sprint").unwrap();

        assert_eq!(row.forms(), vec!["sprint", "runs"]);
        assert_eq!(row.occurrence_count(), 2);
    }

    #[test]
    fn test_generate_attaches_tracking_state() {
        let mut trie = Trie::new();
        trie.add("The cat runs. The cats ran fast.");

        let rows = trie.generate(
            [("run", "ran")],
            &[TrackedWord::new("cat", LearningPhase::Acquainted)],
        );

        let cat = rows.iter().find(|r| r.stem() == "cat").unwrap();
        assert_eq!(cat.tracked_word.learning_phase, LearningPhase::Acquainted);
        assert_eq!(cat.occurrence_count(), 2);

        let run = rows.iter().find(|r| r.stem() == "run").unwrap();
        assert_eq!(run.forms(), vec!["run", "runs", "ran"]);
        assert_eq!(run.tracked_word.learning_phase, LearningPhase::New);
    }

    #[test]
    fn test_segments_and_highlight() {
        let occurrence = WordOccurrence {
            sentence_id: 0,
            text_spans: vec![
                TextSpan { start_offset: 4, word_length: 3 },
                TextSpan { start_offset: 12, word_length: 4 },
            ],
        };
        let sentence = "The cat and cats.";

        let segments = occurrence.segments(sentence);
        let texts: Vec<&str> = segments.iter().map(|s| s.text).collect();
        assert_eq!(texts, vec!["The ", "cat", " and ", "cats", "."]);
        assert!(segments[1].highlighted && segments[3].highlighted);

        assert_eq!(
            occurrence.highlight(sentence, "[", "]"),
            "The [cat] and [cats]."
        );
    }

    #[test]
    fn test_segments_skip_out_of_range_spans() {
        let occurrence = WordOccurrence {
            sentence_id: 0,
            text_spans: vec![TextSpan { start_offset: 40, word_length: 3 }],
        };
        assert_eq!(occurrence.highlight("short", "[", "]"), "short");
    }

    #[test]
    fn test_row_serializes_camel_case() {
        let mut trie = Trie::new();
        trie.add("Hello");
        let row = trie.family_of("hello").unwrap();

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["trackedWord"]["learningPhase"], "NEW");
        assert_eq!(json["wordOccurrences"][0]["textSpans"][0]["wordLength"], 5);
        assert_eq!(json["wordFamily"][0]["pathe"], "hello");
    }
}
