//! Stem collapsing.
//!
//! Regularly inflected forms ("walks", "walked", "walking", "cat's") are
//! nested under their stem leaf so they count towards one word family. The
//! suffixed leaves are not merged into the stem: they keep their own
//! locators, which is what lets each occurrence be highlighted exactly.
//!
//! Collapsing walks the trie in post-order twice. The first pass lets stems
//! that occur in the text claim their inflections; deeper stems come first,
//! so "use" claims "used" before "us" gets a chance to. The second pass
//! creates synthetic stems for inflections whose stem never occurs ("runs"
//! without "run").

use tracing::debug;

use crate::trie::{LeafId, Trie};

/// How a suffix attaches to a stem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuffixShape {
    /// stem + suffix ("walk" + "ed")
    Append,
    /// stem ending in `e` + suffix, the `e` shared ("use" + "d")
    AfterE,
    /// stem without its final `e` + suffix ("make" -> "making")
    DropE,
    /// stem + its final consonant again + suffix ("run" -> "running")
    DoubleFinal,
    /// stem ending in consonant + `y`, the `y` replaced by the suffix ("study" -> "studies")
    YToI,
}

/// One regular inflection pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuffixRule {
    /// Text appended (after the shape's adjustment of the stem)
    pub suffix: &'static str,
    /// How the suffix attaches
    pub shape: SuffixShape,
    /// Minimum stem length in characters
    pub min_stem: usize,
    /// Whether a single match is enough to create a stem that never occurs
    pub synthesizes: bool,
}

const fn rule(suffix: &'static str, shape: SuffixShape, min_stem: usize, synthesizes: bool) -> SuffixRule {
    SuffixRule {
        suffix,
        shape,
        min_stem,
        synthesizes,
    }
}

/// The suffix rule table, tried in order for every stem
pub static SUFFIX_RULES: &[SuffixRule] = &[
    rule("s", SuffixShape::Append, 3, true),
    rule("es", SuffixShape::Append, 2, true),
    rule("'s", SuffixShape::Append, 1, true),
    rule("'ll", SuffixShape::Append, 1, true),
    rule("'ve", SuffixShape::Append, 1, true),
    rule("'d", SuffixShape::Append, 1, true),
    rule("'re", SuffixShape::Append, 1, true),
    rule("'m", SuffixShape::Append, 1, true),
    rule("ed", SuffixShape::Append, 3, false),
    rule("ing", SuffixShape::Append, 2, false),
    rule("d", SuffixShape::AfterE, 3, false),
    rule("ing", SuffixShape::DropE, 3, false),
    rule("ed", SuffixShape::DoubleFinal, 3, false),
    rule("ing", SuffixShape::DoubleFinal, 3, false),
    rule("ies", SuffixShape::YToI, 3, false),
    rule("ied", SuffixShape::YToI, 3, false),
];

/// Forms that look inflected but are words of their own
static NON_INFLECTED: &[&str] = &[
    "always", "perhaps", "towards", "afterwards", "whereas", "besides", "sometimes", "news",
    "series", "species", "means", "thanks", "lens", "chaos", "thing", "things", "nothing",
    "something", "anything", "everything", "morning", "evening", "during", "ceiling",
    "sibling", "darling", "hundred", "naked", "sacred", "wicked", "kindred", "seed", "feed",
    "breed", "deed", "weed", "reed",
];

/// Endings of paths that are usually an `-es`/`-ed`/`-ing` stem plus a stray `e`
/// ("watche" from "watches", "watched")
static ES_PLURAL_STEM_ENDINGS: &[&str] = &["xe", "che", "she", "sse", "zze"];

/// Paths that look like stems of common words but are not ("goes", "does")
static NON_STEMS: &[&str] = &["goe", "doe"];

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn last_chars<const N: usize>(s: &str) -> Option<[char; N]> {
    let mut out = ['\0'; N];
    let mut chars = s.chars().rev();
    for slot in out.iter_mut().rev() {
        *slot = chars.next()?;
    }
    Some(out)
}

/// Consonant-vowel-consonant ending whose final consonant doubles ("run", "stop")
fn ends_cvc(stem: &str) -> bool {
    match last_chars::<3>(stem) {
        Some([a, b, c]) => {
            [a, b, c].iter().all(char::is_ascii_lowercase)
                && !is_vowel(a)
                && is_vowel(b)
                && !is_vowel(c)
                && !matches!(c, 'w' | 'x' | 'y')
        }
        None => false,
    }
}

fn drop_last(stem: &str) -> &str {
    match stem.char_indices().last() {
        Some((i, _)) => &stem[..i],
        None => stem,
    }
}

impl SuffixRule {
    /// Build the inflected form this rule derives from `stem`, if the rule applies
    pub fn apply(&self, stem: &str) -> Option<String> {
        if stem.chars().count() < self.min_stem {
            return None;
        }
        let last = stem.chars().last()?;

        match self.shape {
            SuffixShape::Append => {
                let applies = match self.suffix {
                    "s" => !matches!(last, 's' | 'i' | 'u' | '\'' | '-'),
                    "es" => ["s", "x", "z", "ch", "sh", "o"].iter().any(|e| stem.ends_with(e)),
                    _ => last.is_alphabetic(),
                };
                applies.then(|| format!("{stem}{}", self.suffix))
            }
            SuffixShape::AfterE => (last == 'e').then(|| format!("{stem}{}", self.suffix)),
            SuffixShape::DropE => (last == 'e' && !stem.ends_with("ee"))
                .then(|| format!("{}{}", drop_last(stem), self.suffix)),
            SuffixShape::DoubleFinal => {
                ends_cvc(stem).then(|| format!("{stem}{last}{}", self.suffix))
            }
            SuffixShape::YToI => match last_chars::<2>(stem) {
                Some([c, 'y']) if c.is_ascii_lowercase() && !is_vowel(c) => {
                    Some(format!("{}{}", drop_last(stem), self.suffix))
                }
                _ => None,
            },
        }
    }
}

/// Every inflected form the rule table derives from `stem`, with the deriving rule
pub fn inflections(stem: &str) -> Vec<(String, &'static SuffixRule)> {
    let mut out: Vec<(String, &'static SuffixRule)> = Vec::new();
    for rule in SUFFIX_RULES {
        if let Some(form) = rule.apply(stem) {
            if !out.iter().any(|(f, _)| *f == form) {
                out.push((form, rule));
            }
        }
    }
    out
}

/// Whether a stem that never occurs may be created at `path`
fn can_synthesize(path: &str) -> bool {
    path.chars().count() >= 3
        && path.chars().any(|c| is_vowel(c) || c == 'y')
        && !NON_STEMS.contains(&path)
        && !defers_to_shorter_stem(path)
}

/// Whether the stem at `path` is better read without its final `e`.
///
/// "watche" gives way to "watch", which takes "watches" through `-es` and
/// "watched"/"watching" through plain appending. "axe" keeps its `e` because
/// "ax" is too short to become a stem.
fn defers_to_shorter_stem(path: &str) -> bool {
    if !ES_PLURAL_STEM_ENDINGS.iter().any(|e| path.ends_with(e)) {
        return false;
    }
    let shorter = drop_last(path);
    let es = SUFFIX_RULES.iter().find(|r| r.suffix == "es");
    shorter.chars().count() >= 3 && es.is_some_and(|r| r.apply(shorter).is_some())
}

impl Trie {
    /// Inflections of `stem` that are in the trie and not yet nested anywhere
    fn unclaimed_inflections(&self, stem: &str) -> Vec<(LeafId, &'static SuffixRule)> {
        inflections(stem)
            .into_iter()
            .filter(|(form, _)| !NON_INFLECTED.contains(&form.as_str()))
            .filter_map(|(form, rule)| {
                let id = self.leaf_id_at(&form)?;
                self.leaf(id).is_root().then_some((id, rule))
            })
            .collect()
    }

    /// Nest regularly inflected leaves under their stems.
    ///
    /// Returns the number of leaves nested. Running it again without adding
    /// text changes nothing.
    pub fn collapse_stems(&mut self) -> usize {
        let paths = self.post_order_paths();
        let mut nested = 0;

        for path in &paths {
            let Some(stem) = self.leaf_id_at(path) else {
                continue;
            };
            for (inflected, _) in self.unclaimed_inflections(path) {
                if self.attach(stem, inflected) {
                    nested += 1;
                }
            }
        }

        let mut synthesized = 0;
        for path in &paths {
            if self.leaf_id_at(path).is_some() || !can_synthesize(path) {
                continue;
            }

            let candidates = self.unclaimed_inflections(path);
            let qualifies =
                candidates.len() >= 2 || candidates.iter().any(|(_, rule)| rule.synthesizes);
            if !qualifies {
                continue;
            }

            let stem = self.get_or_create_leaf(path);
            synthesized += 1;
            for (inflected, _) in candidates {
                if self.attach(stem, inflected) {
                    nested += 1;
                }
            }
        }

        self.set_collapsed();
        debug!(nested, synthesized, leaves = self.len(), "Collapsed stems");
        nested
    }
}
