//! Trie data structure for indexing word forms.
//!
//! The Trie stores one node per character of every word path and a terminal
//! [`Leaf`] per distinct word form. Leaves live in a flat arena and refer to
//! each other by [`LeafId`], so derived forms can be nested under their stem
//! without the tree owning them twice.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::char_categories::to_path;
use crate::token::{Locator, Sentence};
use crate::tokenizer::{normalize, Tokenizer};
use crate::vocabulary::TrackedWord;

/// Index of a leaf in the trie's leaf arena.
///
/// Ids are only handed out by a [`Trie`] and are valid for that trie:
///
/// ```compile_fail
/// let id = lexitrie::LeafId(999);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeafId(pub(crate) usize);

impl LeafId {
    /// Position of the leaf in [`Trie::leaves`]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One distinct word form and its occurrences
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaf {
    /// The lowercased path spelled from the root to this leaf's node
    pub pathe: String,
    /// Every occurrence of this exact form
    pub locators: Vec<Locator>,
    /// Derived forms nested under this leaf
    pub inflected_forms: Vec<LeafId>,
    /// The stem this leaf is nested under, if any
    pub stem: Option<LeafId>,
    /// User tracking state merged from the vocabulary
    pub tracked_word: Option<TrackedWord>,
}

impl Leaf {
    /// Create a new leaf without occurrences
    pub fn new(pathe: impl Into<String>) -> Self {
        Leaf {
            pathe: pathe.into(),
            ..Default::default()
        }
    }

    /// Whether this form never occurred in the text (a synthetic stem)
    pub fn is_synthetic(&self) -> bool {
        self.locators.is_empty()
    }

    /// Whether this leaf heads its own family
    pub fn is_root(&self) -> bool {
        self.stem.is_none()
    }
}

/// A node in the Trie
#[derive(Debug, Clone, Default)]
pub struct TrieNode {
    /// Children nodes, keyed by character
    pub children: BTreeMap<char, TrieNode>,
    /// The leaf for the word ending at this node
    pub leaf: Option<LeafId>,
}

impl TrieNode {
    /// Create a new empty node
    pub fn new() -> Self {
        TrieNode::default()
    }

    /// Check if this node has any children
    pub fn can_walk(&self) -> bool {
        !self.children.is_empty()
    }

    /// Check if this node is a valid word ending
    pub fn is_match(&self) -> bool {
        self.leaf.is_some()
    }
}

/// A Trie of the word forms found in one text
#[derive(Debug, Clone, Default)]
pub struct Trie {
    /// The root node
    root: TrieNode,
    /// Leaf arena, indexed by `LeafId`
    leaves: Vec<Leaf>,
    /// Sentences in document order, indexed by sentence id
    sentences: Vec<Sentence>,
    /// Whether suffix collapsing has run over the current contents
    collapsed: bool,
}

impl Trie {
    /// Create a new empty Trie
    pub fn new() -> Self {
        Trie::default()
    }

    /// Get the number of leaves (distinct word forms, synthetic stems included)
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// Check if the trie is empty
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Total number of locators over all leaves
    pub fn locator_count(&self) -> usize {
        self.leaves.iter().map(|l| l.locators.len()).sum()
    }

    /// The indexed sentences, in document order
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// Get a sentence by id
    pub fn sentence(&self, sentence_id: usize) -> Option<&Sentence> {
        self.sentences.get(sentence_id)
    }

    /// All leaves, indexed by `LeafId`
    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    /// Get a leaf by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was handed out by a different trie.
    pub fn leaf(&self, id: LeafId) -> &Leaf {
        &self.leaves[id.0]
    }

    pub(crate) fn leaf_mut(&mut self, id: LeafId) -> &mut Leaf {
        &mut self.leaves[id.0]
    }

    /// Get a reference to the root node (for external traversal)
    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    /// Whether suffix collapsing has run since the last insertion
    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub(crate) fn set_collapsed(&mut self) {
        self.collapsed = true;
    }

    /// Walk or create one node per character of `path`, returning the last one
    pub fn get_or_create_node(&mut self, path: &str) -> &mut TrieNode {
        let mut current = &mut self.root;
        for c in path.chars() {
            current = current.children.entry(c).or_default();
        }
        current
    }

    /// Walk the trie along `path` without creating anything
    pub fn find_node(&self, path: &str) -> Option<&TrieNode> {
        let mut current = &self.root;
        for c in path.chars() {
            current = current.children.get(&c)?;
        }
        Some(current)
    }

    /// Walk the trie by one character, starting at the root when `current` is `None`
    pub fn walk<'a>(&'a self, c: char, current: Option<&'a TrieNode>) -> Option<&'a TrieNode> {
        current.unwrap_or(&self.root).children.get(&c)
    }

    /// Resolve the leaf id of an exact path (already lowercased and folded)
    pub fn leaf_id_at(&self, path: &str) -> Option<LeafId> {
        self.find_node(path)?.leaf
    }

    /// Resolve the leaf id of a surface word, applying the case policy
    pub fn leaf_id(&self, word: &str) -> Option<LeafId> {
        self.leaf_id_at(&to_path(word)?)
    }

    /// Get the leaf of a surface word, if it is in the trie
    pub fn get_leaf(&self, word: &str) -> Option<&Leaf> {
        self.leaf_id(word).map(|id| self.leaf(id))
    }

    /// Check if a word exists in the trie
    pub fn has_word(&self, word: &str) -> bool {
        self.leaf_id(word).is_some()
    }

    /// Get the leaf at `path`, creating it (without occurrences) if absent
    pub(crate) fn get_or_create_leaf(&mut self, path: &str) -> LeafId {
        let next_id = LeafId(self.leaves.len());
        let node = self.get_or_create_node(path);
        if let Some(id) = node.leaf {
            return id;
        }

        node.leaf = Some(next_id);
        self.leaves.push(Leaf::new(path));
        next_id
    }

    /// Tokenize `text` and record every word token.
    ///
    /// Sentences are appended after any sentences indexed by earlier calls, so
    /// a trie can be fed several texts in a row.
    pub fn add(&mut self, text: &str) {
        let normalized = normalize(text);
        let first_sentence = self.sentences.len();
        let mut token_count = 0usize;

        for token in Tokenizer::new(&normalized) {
            let sentence_id = first_sentence + token.sentence_id;
            if sentence_id == self.sentences.len() {
                self.sentences.push(Sentence::new(token.sentence));
            }
            self.update(token.text, sentence_id, token.start);
            token_count += 1;
        }

        debug!(
            sentences = self.sentences.len() - first_sentence,
            tokens = token_count,
            leaves = self.leaves.len(),
            "Indexed text"
        );
    }

    /// Add several texts in order
    pub fn input<I, S>(&mut self, texts: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for text in texts {
            self.add(text.as_ref());
        }
    }

    /// Record one occurrence of `word` in sentence `sentence_id` at `start_offset`.
    ///
    /// Words with characters outside the trie alphabet are rejected: nothing is
    /// recorded and `None` is returned.
    pub fn update(&mut self, word: &str, sentence_id: usize, start_offset: usize) -> Option<LeafId> {
        let Some(path) = to_path(word) else {
            debug!(word, "Rejected word outside the trie alphabet");
            return None;
        };

        debug_assert!(
            self.sentences
                .get(sentence_id)
                .is_some_and(|s| s.slice(start_offset, word.len()) == Some(word)),
            "locator ({sentence_id}, {start_offset}) does not point at {word:?}"
        );

        let id = self.get_or_create_leaf(&path);
        self.leaves[id.0]
            .locators
            .push(Locator::new(sentence_id, start_offset, word.len()));
        self.collapsed = false;

        trace!(word, path = %path, sentence_id, start_offset, "Recorded occurrence");
        Some(id)
    }

    /// Leaf ids in trie order (alphabetical by path)
    pub fn leaf_ids(&self) -> Vec<LeafId> {
        fn collect(node: &TrieNode, out: &mut Vec<LeafId>) {
            if let Some(id) = node.leaf {
                out.push(id);
            }
            for child in node.children.values() {
                collect(child, out);
            }
        }

        let mut out = Vec::with_capacity(self.leaves.len());
        collect(&self.root, &mut out);
        out
    }

    /// Paths of every node, children before their parent (post-order)
    pub fn post_order_paths(&self) -> Vec<String> {
        fn collect(node: &TrieNode, path: &mut String, out: &mut Vec<String>) {
            for (&c, child) in &node.children {
                path.push(c);
                collect(child, path, out);
                path.pop();
            }
            out.push(path.clone());
        }

        let mut out = Vec::new();
        collect(&self.root, &mut String::new(), &mut out);
        out
    }

    /// Check whether `id` is `ancestor` or nested (transitively) under it
    pub fn is_within(&self, id: LeafId, ancestor: LeafId) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            if c == ancestor {
                return true;
            }
            current = self.leaves[c.0].stem;
        }
        false
    }

    /// Nest `inflected` under `stem`.
    ///
    /// A leaf already nested elsewhere is moved. Returns `false` when nothing
    /// changed: the leaf is already there, or the link would make a leaf its
    /// own ancestor.
    pub(crate) fn attach(&mut self, stem: LeafId, inflected: LeafId) -> bool {
        if self.leaves[inflected.0].stem == Some(stem) || self.is_within(stem, inflected) {
            return false;
        }

        if let Some(old) = self.leaves[inflected.0].stem.take() {
            self.leaves[old.0].inflected_forms.retain(|&id| id != inflected);
        }
        self.leaves[stem.0].inflected_forms.push(inflected);
        self.leaves[inflected.0].stem = Some(stem);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trie_add_and_lookup() {
        let mut trie = Trie::new();
        trie.add("The cat sat on the mat.");

        assert!(trie.has_word("cat"));
        assert!(trie.has_word("mat"));
        assert!(!trie.has_word("ca")); // Partial word
        assert!(!trie.has_word("cats")); // Non-existent
        assert_eq!(trie.len(), 5);
    }

    #[test]
    fn test_case_insensitive_paths() {
        let mut trie = Trie::new();
        trie.add("The cat. the CAT.");

        let the = trie.get_leaf("THE").unwrap();
        assert_eq!(the.pathe, "the");
        assert_eq!(the.locators.len(), 2);
        assert_eq!(trie.get_leaf("cat").unwrap().locators.len(), 2);
    }

    #[test]
    fn test_locators_point_at_surface_form() {
        let mut trie = Trie::new();
        trie.add("Dogs bark. Big dogs bark loudly.");

        let dogs = trie.get_leaf("dogs").unwrap();
        assert_eq!(dogs.locators, vec![Locator::new(0, 0, 4), Locator::new(1, 4, 4)]);

        let first = dogs.locators[0];
        let sentence = trie.sentence(first.sentence_id).unwrap();
        assert_eq!(sentence.slice(first.start_offset, first.word_length), Some("Dogs"));
    }

    #[test]
    fn test_trie_walk() {
        let mut trie = Trie::new();
        trie.add("go");

        let node1 = trie.walk('g', None);
        assert!(node1.is_some());
        assert!(!node1.unwrap().is_match()); // Not a complete word yet

        let node2 = trie.walk('o', node1);
        assert!(node2.is_some());
        assert!(node2.unwrap().is_match()); // Complete word
    }

    #[test]
    fn test_get_or_create_node() {
        let mut trie = Trie::new();
        trie.get_or_create_node("abc");

        assert!(trie.find_node("ab").unwrap().can_walk());
        assert!(!trie.find_node("abc").unwrap().is_match());
        assert!(trie.is_empty());
    }

    #[test]
    fn test_update_rejects_foreign_chars() {
        let mut trie = Trie::new();
        trie.add("Room 101 is ready.");

        assert!(trie.update("101", 0, 5).is_none());
        assert!(!trie.has_word("101"));
        assert_eq!(trie.locator_count(), 3);
    }

    #[test]
    fn test_update_appends_locator() {
        let mut trie = Trie::new();
        trie.add("walk and walk");

        let id = trie.leaf_id("walk").unwrap();
        assert_eq!(trie.update("walk", 0, 9), Some(id));
        assert_eq!(trie.leaf(id).locators.len(), 3);
    }

    #[test]
    fn test_input_continues_sentence_ids() {
        let mut trie = Trie::new();
        trie.input(["First line.", "Second line."]);

        assert_eq!(trie.sentences().len(), 2);
        let line = trie.get_leaf("line").unwrap();
        assert_eq!(line.locators[1].sentence_id, 1);
    }

    #[test]
    fn test_leaf_ids_in_trie_order() {
        let mut trie = Trie::new();
        trie.add("zebra apple mango");

        let paths: Vec<&str> = trie
            .leaf_ids()
            .into_iter()
            .map(|id| trie.leaf(id).pathe.as_str())
            .collect();
        assert_eq!(paths, vec!["apple", "mango", "zebra"]);
    }

    #[test]
    fn test_post_order_paths() {
        let mut trie = Trie::new();
        trie.add("ab ac");

        assert_eq!(trie.post_order_paths(), vec!["ab", "ac", "a", ""]);
    }

    #[test]
    fn test_attach_moves_and_rejects_cycles() {
        let mut trie = Trie::new();
        trie.add("a b c");
        let (a, b, c) = (
            trie.leaf_id("a").unwrap(),
            trie.leaf_id("b").unwrap(),
            trie.leaf_id("c").unwrap(),
        );

        assert!(trie.attach(a, b));
        assert!(!trie.attach(a, b));
        assert!(trie.attach(b, c));
        assert!(!trie.attach(c, a)); // a is an ancestor of c

        assert!(trie.attach(a, c)); // moved from b to a
        assert!(trie.leaf(b).inflected_forms.is_empty());
        assert_eq!(trie.leaf(a).inflected_forms, vec![b, c]);
        assert_eq!(trie.leaf(c).stem, Some(a));
    }

    #[test]
    fn test_leaf_id_indexes_leaves() {
        let mut trie = Trie::new();
        trie.add("zebra apple");

        for word in ["zebra", "apple"] {
            let id = trie.leaf_id(word).unwrap();
            assert_eq!(trie.leaves()[id.index()].pathe, word);
        }
        assert_eq!(serde_json::to_string(&trie.leaf_id("apple")).unwrap(), "1");
    }
}
