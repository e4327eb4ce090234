//! The flat mother → daughters map consumed by the composition engine.
use super::error::HierarchyError;
use super::tree::Tree;
use super::types::{Child, Daughters};
use std::collections::HashMap;

/// One entry of the hierarchy map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mother {
    pub label: String,
    pub daughters: Daughters,
}

/// Maps every internal node's label to its ordered daughters.
///
/// Entries keep insertion order (pre-order when built from a [`Tree`]) so that
/// composition visits mothers deterministically. Labels are unique keys: a
/// label reused for a node with different daughters is rejected, while an
/// exact repeat (e.g. two `[.$t$ ]` traces) collapses into one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HierarchyMap {
    mothers: Vec<Mother>,
    index: HashMap<String, usize>,
}

impl HierarchyMap {
    pub fn new() -> Self { Self::default() }
    pub fn len(&self) -> usize { self.mothers.len() }
    pub fn is_empty(&self) -> bool { self.mothers.is_empty() }

    /// Adds a mother, enforcing binary branching and label uniqueness.
    pub fn insert(&mut self, label: &str, daughters: Daughters) -> Result<(), HierarchyError> {
        if daughters.len() > 2 {
            return Err(HierarchyError::TernaryBranching {
                label: label.to_string(),
                daughters: daughters.into_vec(),
            });
        }

        if let Some(&existing) = self.index.get(label) {
            let previous = &self.mothers[existing].daughters;
            if *previous == daughters {
                tracing::debug!(label, "collapsing repeated node with identical daughters");
                return Ok(());
            }
            return Err(HierarchyError::DuplicateLabel {
                label: label.to_string(),
                first: previous.to_vec(),
                second: daughters.into_vec(),
            });
        }

        self.index.insert(label.to_string(), self.mothers.len());
        self.mothers.push(Mother { label: label.to_string(), daughters });
        Ok(())
    }

    /// Builds a map from literal pairs, e.g. `[("S", vec!["NP", "VP"]), ...]`.
    pub fn from_pairs<I, L, D, S>(pairs: I) -> Result<Self, HierarchyError>
    where
        I: IntoIterator<Item = (L, D)>,
        L: AsRef<str>,
        D: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut map = Self::new();
        for (label, daughters) in pairs {
            let daughters: Daughters = daughters.into_iter().map(Into::into).collect();
            map.insert(label.as_ref(), daughters)?;
        }
        Ok(map)
    }

    /// Walks the tree in pre-order and records every internal node.
    pub fn from_tree(tree: &Tree) -> Result<Self, HierarchyError> {
        let mut map = Self::new();
        for id in tree.subtrees() {
            let daughters: Daughters = tree
                .children(id)
                .iter()
                .map(|child| match child {
                    Child::Node(c) => tree.label(*c).to_string(),
                    Child::Leaf(word) => word.clone(),
                })
                .collect();
            map.insert(tree.label(id), daughters)?;
        }
        Ok(map)
    }

    pub fn get(&self, label: &str) -> Option<&[String]> {
        self.index.get(label).map(|&i| self.mothers[i].daughters.as_slice())
    }

    pub fn contains(&self, label: &str) -> bool { self.index.contains_key(label) }

    pub fn iter(&self) -> impl Iterator<Item = &Mother> { self.mothers.iter() }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.mothers.iter().map(|m| m.label.as_str())
    }
}
