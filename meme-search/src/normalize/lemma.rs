//! Dictionary lemmatizer.
//!
//! Lookup order for a token:
//! 1. the token itself, if it is a known base form
//! 2. irregular form table (`mice` → `mouse`, `running` → `run`)
//! 3. noun, then verb, then adjective suffix detachment rules; the first
//!    candidate that is a known base form wins
//! 4. for partial vocabularies only, an orthographic guess at the singular
//!    of a regular plural (`yeets` → `yeet`, `churches` → `church`)
//!
//! Tokens that resolve to nothing are returned unchanged.
//!
//! The embedded dictionary is a curated subset. A complete vocabulary can be
//! loaded from a WordNet `dict/` directory with
//! [`LemmaDictionary::from_wordnet_dir`]; plural guessing is then disabled.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::error::SearchError;

/// The lemma dictionary compiled into the crate.
pub const EMBEDDED_LEMMAS: &str = include_str!("../../data/lemmas_en.tsv");

/// WordNet index files, read in this order.
const WORDNET_INDEXES: &[&str] = &["index.noun", "index.verb", "index.adj"];

/// WordNet exception lists. Earlier files win when a form appears twice.
const WORDNET_EXCEPTIONS: &[&str] = &["noun.exc", "verb.exc", "adj.exc"];

/// `(suffix, replacement)` pairs, tried in order.
const NOUN_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

const VERB_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ies", "y"),
    ("es", "e"),
    ("es", ""),
    ("ed", "e"),
    ("ed", ""),
    ("ing", "e"),
    ("ing", ""),
];

const ADJ_RULES: &[(&str, &str)] = &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")];

/// Plural endings whose singular drops `es` rather than `s`.
const ES_PLURALS: &[&str] = &["sses", "xes", "ches", "shes", "zzes"];

/// Irregular forms plus the set of known base forms.
#[derive(Debug, Clone)]
pub struct LemmaDictionary {
    irregular: HashMap<String, String>,
    bases: HashSet<String>,
    guess_plurals: bool,
}

impl LemmaDictionary {
    /// Parse a lemma file.
    ///
    /// Each non-comment line is either `inflected<TAB>lemma` or a single
    /// base form. Lemma targets count as base forms too. Such files are
    /// treated as partial vocabularies, so unknown regular plurals are
    /// still reduced by guessing.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Resource`] on a line with more than two
    /// columns or an empty column, or if the file declares no entries.
    pub fn parse(text: &str) -> Result<Self, SearchError> {
        let mut irregular = HashMap::new();
        let mut bases = HashSet::new();

        for (number, line) in text.lines().enumerate() {
            // Only strip spaces here: a trailing tab marks an empty lemma column.
            let line = line.trim_matches(|c| c == ' ' || c == '\r');
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let columns: Vec<&str> = line.split('\t').map(str::trim).collect();
            match columns.as_slice() {
                [base] => {
                    bases.insert(base.to_lowercase());
                }
                [inflected, lemma] if !inflected.is_empty() && !lemma.is_empty() => {
                    let lemma = lemma.to_lowercase();
                    bases.insert(lemma.clone());
                    irregular.insert(inflected.to_lowercase(), lemma);
                }
                _ => {
                    return Err(SearchError::Resource(format!(
                        "lemma dictionary line {}: expected `word` or `inflected<TAB>lemma`",
                        number + 1
                    )));
                }
            }
        }

        if bases.is_empty() {
            return Err(SearchError::Resource("lemma dictionary is empty".into()));
        }
        Ok(Self {
            irregular,
            bases,
            guess_plurals: true,
        })
    }

    /// The built-in English dictionary.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded dictionary is broken.
    pub fn english() -> Result<Self, SearchError> {
        Self::parse(EMBEDDED_LEMMAS)
    }

    /// Build a dictionary from the contents of WordNet database files.
    ///
    /// `indexes` are `index.*` files: the first field of every data line is
    /// a lemma, and lines starting with a space are the license header.
    /// `exceptions` are `*.exc` files: `inflected base [base ...]`, of which
    /// the first base is used. Collocations (`ice_cream`) and entries with
    /// non-letters are skipped, since tokens never contain them.
    ///
    /// The result is a complete vocabulary: plural guessing is off.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Resource`] if no usable lemma was found.
    pub fn from_wordnet(indexes: &[&str], exceptions: &[&str]) -> Result<Self, SearchError> {
        let mut bases = HashSet::new();
        for index in indexes {
            bases.extend(
                wordnet_lines(index)
                    .filter_map(|line| line.split_whitespace().next())
                    .filter(|lemma| is_plain_word(lemma))
                    .map(str::to_owned),
            );
        }

        let mut irregular = HashMap::new();
        for file in exceptions {
            for line in wordnet_lines(file) {
                let mut fields = line.split_whitespace();
                if let (Some(inflected), Some(lemma)) = (fields.next(), fields.next()) {
                    if is_plain_word(inflected) && is_plain_word(lemma) {
                        irregular
                            .entry(inflected.to_owned())
                            .or_insert_with(|| lemma.to_owned());
                    }
                }
            }
        }

        if bases.is_empty() {
            return Err(SearchError::Resource(
                "WordNet index files contain no lemmas".into(),
            ));
        }
        Ok(Self {
            irregular,
            bases,
            guess_plurals: false,
        })
    }

    /// Load `index.{noun,verb,adj}` and `{noun,verb,adj}.exc` from a WordNet
    /// `dict/` directory.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Resource`] if any of the six files cannot be
    /// read, or if they contain no lemmas.
    pub fn from_wordnet_dir(dir: &Path) -> Result<Self, SearchError> {
        let read_all = |names: &[&str]| -> Result<Vec<String>, SearchError> {
            names
                .iter()
                .map(|name| super::read_resource(&dir.join(name)))
                .collect()
        };
        let indexes = read_all(WORDNET_INDEXES)?;
        let exceptions = read_all(WORDNET_EXCEPTIONS)?;

        let indexes: Vec<&str> = indexes.iter().map(String::as_str).collect();
        let exceptions: Vec<&str> = exceptions.iter().map(String::as_str).collect();
        let dict = Self::from_wordnet(&indexes, &exceptions)?;
        tracing::debug!(
            dir = %dir.display(),
            lemmas = dict.bases.len(),
            exceptions = dict.irregular.len(),
            "WordNet dictionary loaded"
        );
        Ok(dict)
    }

    /// Returns `true` if `word` is a known base form.
    pub fn is_base(&self, word: &str) -> bool {
        self.bases.contains(word)
    }

    /// Number of known base forms.
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// Map `token` to its base form, or return it unchanged.
    pub fn lemmatize<'a>(&self, token: &'a str) -> Cow<'a, str> {
        if self.is_base(token) {
            return Cow::Borrowed(token);
        }
        if let Some(lemma) = self.irregular.get(token) {
            return Cow::Owned(lemma.clone());
        }
        let detached = [NOUN_RULES, VERB_RULES, ADJ_RULES]
            .iter()
            .flat_map(|rules| rules.iter())
            .filter_map(|(suffix, replacement)| {
                token
                    .strip_suffix(suffix)
                    .filter(|stem| !stem.is_empty())
                    .map(|stem| format!("{stem}{replacement}"))
            })
            .find(|candidate| self.is_base(candidate));
        if let Some(lemma) = detached {
            return Cow::Owned(lemma);
        }
        if self.guess_plurals {
            if let Some(singular) = guess_singular(token) {
                return Cow::Owned(singular);
            }
        }
        Cow::Borrowed(token)
    }
}

/// Data lines of a WordNet file, skipping the indented license header.
fn wordnet_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .filter(|line| !line.is_empty() && !line.starts_with(' '))
}

fn is_plain_word(word: &str) -> bool {
    !word.is_empty() && word.bytes().all(|b| b.is_ascii_lowercase())
}

/// Singular of a regular English plural, or `None` if `token` does not
/// look like one.
///
/// Words ending in `ss`, `us` or `is` are singular (`boss`, `bonus`,
/// `basis`), and tokens under four letters are left alone (`bus`, `gas`).
fn guess_singular(token: &str) -> Option<String> {
    if token.len() < 4 || ["ss", "us", "is"].iter().any(|end| token.ends_with(end)) {
        return None;
    }
    if token.len() > 4 {
        if let Some(stem) = token.strip_suffix("ies") {
            return Some(format!("{stem}y"));
        }
    }
    if ES_PLURALS.iter().any(|end| token.ends_with(end)) {
        return Some(token[..token.len() - 2].to_owned());
    }
    token.strip_suffix('s').map(str::to_owned)
}
