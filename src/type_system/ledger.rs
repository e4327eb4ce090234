//! Write-once storage for the type and rule assigned to each node.
use super::semtype::SemType;
use crate::store::HierarchyMap;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// The composition rule that justified a node's type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// `TN_1`: lexical, contentful terminal.
    TerminalContentful,
    /// `TN_2`: pronoun or trace, typed `e`.
    TerminalPronoun,
    /// `NN`: non-branching node, or a branching node with a vacuous daughter.
    NonBranching,
    /// `FA-right`: the right daughter is the function.
    FaRightIsFunction,
    /// `FA-left`: the left daughter is the function.
    FaLeftIsFunction,
    /// `PA`
    PredicateAbstraction,
    /// `PM`
    PredicateModification,
    /// `-`: indices and vacuous terminals.
    NoRule,
    /// `?`: unresolved or mismatched.
    Error,
}

impl Rule {
    pub fn tag(&self) -> &'static str {
        match self {
            Rule::TerminalContentful => "TN_1",
            Rule::TerminalPronoun => "TN_2",
            Rule::NonBranching => "NN",
            Rule::FaRightIsFunction => "FA-right",
            Rule::FaLeftIsFunction => "FA-left",
            Rule::PredicateAbstraction => "PA",
            Rule::PredicateModification => "PM",
            Rule::NoRule => "-",
            Rule::Error => "?",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl Serialize for Rule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

/// A node's entry in the type assignment: a real type, or the `?` marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Typing {
    Type(SemType),
    Error,
}

impl Typing {
    pub fn as_type(&self) -> Option<&SemType> {
        match self {
            Typing::Type(t) => Some(t),
            Typing::Error => None,
        }
    }

    pub fn is_error(&self) -> bool { matches!(self, Typing::Error) }
}

impl fmt::Display for Typing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Typing::Type(t) => write!(f, "{}", t),
            Typing::Error => write!(f, "?"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derivation {
    pub typing: Typing,
    pub rule: Rule,
}

/// Type and rule assignment for one composition run.
///
/// Every mother of the hierarchy starts with an empty slot; terminals get a
/// slot when Terminal Typing first types them. A filled slot is never
/// overwritten: `assign` on a resolved label is a no-op returning `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignments {
    slots: HashMap<String, Option<Derivation>>,
    /// Labels in first-seen order, for deterministic reporting.
    order: Vec<String>,
}

impl Assignments {
    pub fn new() -> Self { Self::default() }

    /// An empty slot for every mother in the hierarchy.
    pub fn for_hierarchy(hierarchy: &HierarchyMap) -> Self {
        let mut ledger = Self::new();
        for label in hierarchy.labels() {
            if !ledger.slots.contains_key(label) {
                ledger.slots.insert(label.to_string(), None);
                ledger.order.push(label.to_string());
            }
        }
        ledger
    }

    /// Sets the entry for `label` if it is still open. Returns whether it was written.
    pub fn assign(&mut self, label: &str, typing: Typing, rule: Rule) -> bool {
        match self.slots.get_mut(label) {
            Some(Some(_)) => false,
            Some(slot) => {
                *slot = Some(Derivation { typing, rule });
                true
            }
            None => {
                self.slots.insert(label.to_string(), Some(Derivation { typing, rule }));
                self.order.push(label.to_string());
                true
            }
        }
    }

    pub fn assign_type(&mut self, label: &str, ty: SemType, rule: Rule) -> bool {
        self.assign(label, Typing::Type(ty), rule)
    }

    pub fn mark_error(&mut self, label: &str) -> bool {
        self.assign(label, Typing::Error, Rule::Error)
    }

    /// `None` if the label has no slot at all; `Some(None)` if the slot is still open.
    pub fn slot(&self, label: &str) -> Option<Option<&Derivation>> {
        self.slots.get(label).map(Option::as_ref)
    }

    pub fn get(&self, label: &str) -> Option<&Derivation> {
        self.slots.get(label)?.as_ref()
    }

    pub fn typing(&self, label: &str) -> Option<&Typing> {
        self.get(label).map(|d| &d.typing)
    }

    pub fn type_of(&self, label: &str) -> Option<&SemType> {
        self.typing(label)?.as_type()
    }

    pub fn rule(&self, label: &str) -> Option<Rule> {
        self.get(label).map(|d| d.rule)
    }

    pub fn is_resolved(&self, label: &str) -> bool { self.get(label).is_some() }

    pub fn is_complete(&self) -> bool { self.slots.values().all(Option::is_some) }

    pub fn len(&self) -> usize { self.order.len() }
    pub fn is_empty(&self) -> bool { self.order.is_empty() }

    pub fn unresolved(&self) -> Vec<&str> {
        self.order
            .iter()
            .filter(|l| matches!(self.slots.get(l.as_str()), Some(None)))
            .map(String::as_str)
            .collect()
    }

    /// Labels carrying the `?` marker, in first-seen order.
    pub fn errors(&self) -> Vec<&str> {
        self.order
            .iter()
            .filter(|l| self.typing(l).is_some_and(Typing::is_error))
            .map(String::as_str)
            .collect()
    }

    pub fn has_errors(&self) -> bool {
        self.slots
            .values()
            .any(|s| matches!(s, Some(Derivation { typing: Typing::Error, .. })))
    }

    /// Resolved entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Derivation)> {
        self.order
            .iter()
            .filter_map(|l| self.get(l).map(|d| (l.as_str(), d)))
    }

    /// The type assignment as text, keyed by label.
    pub fn types(&self) -> BTreeMap<String, String> {
        self.iter().map(|(l, d)| (l.to_string(), d.typing.to_string())).collect()
    }

    /// The rule assignment as tags, keyed by label.
    pub fn rules(&self) -> BTreeMap<String, String> {
        self.iter().map(|(l, d)| (l.to_string(), d.rule.tag().to_string())).collect()
    }
}
