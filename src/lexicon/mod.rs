//! The lexicon adapter.
//!
//! A lexicon is written category-first, the way a semanticist lists it:
//!
//! ```json
//! { "<e, t>": ["Idiot", "Junge"], "e": ["Peter"], "": ["wo"],
//!   "pron": ["she"], "trace": ["$t$"], "index": ["1", "2"] }
//! ```
//!
//! and inverted here into the terminal → category lookup used by Terminal Typing.
mod error;

pub use self::error::LexiconError;

use crate::type_system::{Rule, SemType};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

pub const PRONOUN_KEY: &str = "pron";
pub const TRACE_KEY: &str = "trace";
pub const INDEX_KEY: &str = "index";

/// What the lexicon says about one terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    Pronoun,
    Trace,
    Index,
    Typed(SemType),
}

impl Category {
    /// The type and rule Terminal Typing assigns to a terminal of this category.
    pub fn classify(&self) -> (SemType, Rule) {
        match self {
            Category::Pronoun | Category::Trace => (SemType::entity(), Rule::TerminalPronoun),
            Category::Index => (SemType::Untyped, Rule::NoRule),
            Category::Typed(SemType::Vacuous) => (SemType::Vacuous, Rule::NoRule),
            Category::Typed(ty) => (ty.clone(), Rule::TerminalContentful),
        }
    }

    /// Indices, traces and pronouns seed Predicate Abstraction under branching mothers.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Category::Pronoun | Category::Trace | Category::Index)
    }

    fn from_key(key: &str) -> Result<Self, LexiconError> {
        match key {
            PRONOUN_KEY => Ok(Category::Pronoun),
            TRACE_KEY => Ok(Category::Trace),
            INDEX_KEY => Ok(Category::Index),
            _ => SemType::parse(key)
                .map(Category::Typed)
                .map_err(|source| LexiconError::InvalidType {
                    category: key.to_string(),
                    source,
                }),
        }
    }
}

/// Read-only terminal → category lookup, shared across composition runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    entries: HashMap<String, Category>,
}

impl Lexicon {
    pub fn new() -> Self { Self::default() }
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Inverts a category → terminals listing.
    ///
    /// Categories are processed in sorted key order. A terminal listed under two
    /// categories keeps the last one, with a warning.
    pub fn from_categories<K, V, T>(categories: impl IntoIterator<Item = (K, V)>) -> Result<Self, LexiconError>
    where
        K: AsRef<str>,
        V: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let sorted: BTreeMap<String, Vec<String>> = categories
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_string(), v.into_iter().map(Into::into).collect()))
            .collect();

        let mut entries = HashMap::new();
        for (key, terminals) in sorted {
            let category = Category::from_key(&key)?;
            for terminal in terminals {
                if let Some(previous) = entries.insert(terminal.clone(), category.clone()) {
                    if previous != category {
                        tracing::warn!(
                            terminal = %terminal,
                            dropped = ?previous,
                            kept = %key,
                            "terminal listed under two lexicon categories; keeping the last"
                        );
                    }
                }
            }
        }
        Ok(Self { entries })
    }

    pub fn from_json_str(json: &str) -> Result<Self, LexiconError> {
        let categories: BTreeMap<String, Vec<String>> = serde_json::from_str(json)?;
        Self::from_categories(categories)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| LexiconError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&text)
    }

    pub fn category(&self, terminal: &str) -> Option<&Category> {
        self.entries.get(terminal)
    }

    pub fn contains(&self, terminal: &str) -> bool { self.entries.contains_key(terminal) }

    /// A lexicon entry equal to `terminal` ignoring case, for error hints.
    pub fn case_insensitive_match(&self, terminal: &str) -> Option<&str> {
        let wanted = terminal.to_lowercase();
        let mut candidates: Vec<&str> = self
            .entries
            .keys()
            .filter(|k| k.to_lowercase() == wanted)
            .map(String::as_str)
            .collect();
        candidates.sort_unstable();
        candidates.into_iter().next()
    }
}
