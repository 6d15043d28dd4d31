//! Irregular form linking.
//!
//! Forms the suffix rules cannot derive ("went", "children") are linked to
//! their stem from an external table of `(stem, inflected)` pairs.

use tracing::{debug, trace};

use crate::char_categories::to_path;
use crate::error::{LexiconError, Result};
use crate::trie::Trie;

/// Built-in English irregular verbs and plurals (stem, then its irregular forms)
const ENGLISH_TSV: &str = "\
# verbs
be\tam\tis\tare\twas\twere\tbeen
have\thas\thad
do\tdid\tdone
go\twent\tgone
say\tsaid
make\tmade
get\tgot\tgotten
know\tknew\tknown
think\tthought
take\ttook\ttaken
see\tsaw\tseen
come\tcame
give\tgave\tgiven
find\tfound
tell\ttold
become\tbecame
leave\tleft
feel\tfelt
bring\tbrought
begin\tbegan\tbegun
keep\tkept
hold\theld
write\twrote\twritten
stand\tstood
hear\theard
mean\tmeant
meet\tmet
run\tran
pay\tpaid
sit\tsat
speak\tspoke\tspoken
lead\tled
grow\tgrew\tgrown
lose\tlost
fall\tfell\tfallen
send\tsent
build\tbuilt
understand\tunderstood
draw\tdrew\tdrawn
break\tbroke\tbroken
spend\tspent
rise\trose\trisen
drive\tdrove\tdriven
buy\tbought
wear\twore\tworn
choose\tchose\tchosen
seek\tsought
throw\tthrew\tthrown
catch\tcaught
deal\tdealt
win\twon
forget\tforgot\tforgotten
sell\tsold
fight\tfought
teach\ttaught
eat\tate\teaten
sing\tsang\tsung
swim\tswam\tswum
drink\tdrank\tdrunk
fly\tflew\tflown
sleep\tslept
feed\tfed
shoot\tshot
hide\thid\thidden
ride\trode\tridden
steal\tstole\tstolen
wake\twoke\twoken
bite\tbit\tbitten
blow\tblew\tblown
freeze\tfroze\tfrozen
shake\tshook\tshaken
forgive\tforgave\tforgiven
dig\tdug
stick\tstuck
bend\tbent
bleed\tbled
lend\tlent
sink\tsank\tsunk
spin\tspun
strike\tstruck
swear\tswore\tsworn
tear\ttore\ttorn
weep\twept
# plurals
child\tchildren
man\tmen
woman\twomen
person\tpeople
mouse\tmice
goose\tgeese
foot\tfeet
tooth\tteeth
ox\toxen
life\tlives
wife\twives
knife\tknives
leaf\tleaves
wolf\twolves
half\thalves
shelf\tshelves
thief\tthieves
loaf\tloaves
calf\tcalves
criterion\tcriteria
phenomenon\tphenomena
analysis\tanalyses
crisis\tcrises
cactus\tcacti
fungus\tfungi
# comparatives
good\tbetter\tbest
bad\tworse\tworst
";

/// A table of `(stem, inflected)` pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IrregularTable {
    pairs: Vec<(String, String)>,
}

impl IrregularTable {
    /// Create an empty table
    pub fn new() -> Self {
        IrregularTable::default()
    }

    /// The built-in English table
    pub fn english() -> Self {
        Self::from_tsv(ENGLISH_TSV).expect("built-in irregular table is well-formed")
    }

    /// Load a table where each line is `stem<TAB>form[<TAB>form…]`.
    ///
    /// Commas are accepted as separators too. Empty lines and lines starting
    /// with `#` are skipped.
    pub fn from_tsv(content: &str) -> Result<Self> {
        let mut table = IrregularTable::new();

        for (i, line) in content.lines().enumerate() {
            // Skip comments and empty lines
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line
                .split(['\t', ','])
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect();
            let [stem, forms @ ..] = fields.as_slice() else {
                continue;
            };
            if forms.is_empty() {
                return Err(LexiconError::InvalidIrregularLine {
                    line: i + 1,
                    content: line.to_string(),
                });
            }

            for form in forms {
                table.push(*stem, *form);
            }
        }

        Ok(table)
    }

    /// Add one pair; a form equal to its stem is ignored
    pub fn push(&mut self, stem: impl Into<String>, inflected: impl Into<String>) {
        let (stem, inflected) = (stem.into(), inflected.into());
        if stem != inflected {
            self.pairs.push((stem, inflected));
        }
    }

    /// Append all pairs of another table
    pub fn extend(&mut self, other: IrregularTable) {
        self.pairs.extend(other.pairs);
    }

    /// Number of pairs
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over `(stem, inflected)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(s, f)| (s.as_str(), f.as_str()))
    }
}

impl<'a> IntoIterator for &'a IrregularTable {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl Trie {
    /// Nest each inflected form under its stem.
    ///
    /// Pairs naming a word absent from the trie are skipped, as are pairs that
    /// would make a leaf its own ancestor. A form already nested under another
    /// stem is moved. Returns the number of forms linked.
    pub fn merge_derived_word_into_stem<I, S, T>(&mut self, pairs: I) -> usize
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let mut requested = 0;
        let mut linked = 0;

        for (stem, inflected) in pairs {
            requested += 1;
            let (stem, inflected) = (stem.as_ref(), inflected.as_ref());
            let Some(stem_id) = to_path(stem).and_then(|p| self.leaf_id_at(&p)) else {
                continue;
            };
            let Some(inflected_id) = to_path(inflected).and_then(|p| self.leaf_id_at(&p)) else {
                continue;
            };

            if self.attach(stem_id, inflected_id) {
                trace!(stem, inflected, "Linked irregular form");
                linked += 1;
            } else if !self.is_within(inflected_id, stem_id) {
                debug!(stem, inflected, "Skipped irregular pair that would form a cycle");
            }
        }

        debug!(pairs = requested, linked, "Linked irregular forms");
        linked
    }
}
