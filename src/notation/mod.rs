//! The tree hierarchy parser: bracket notation in, ordered tree plus flat
//! hierarchy map out.
//!
//! Labels are taken verbatim. Decorations such as numeric subscripts are the
//! caller's business and must be normalized before parsing.
pub mod reader;

pub use reader::{normalize_escapes, read_tree};

use crate::store::{HierarchyError, HierarchyMap, Tree};

/// Parses bracket notation into the tree and its hierarchy map.
///
/// # Errors
/// - `HierarchyError::Escape` for a root marker whose backslash was lost.
/// - `HierarchyError::Bracket` for unbalanced or otherwise malformed brackets.
/// - `HierarchyError::TernaryBranching` for a node with a third daughter.
/// - `HierarchyError::DuplicateLabel` for a label reused with different daughters.
pub fn parse_hierarchy(text: &str) -> Result<(Tree, HierarchyMap), HierarchyError> {
    let normalized = normalize_escapes(text)?;
    let tree = read_tree(&normalized)?;
    let hierarchy = HierarchyMap::from_tree(&tree)?;
    Ok((tree, hierarchy))
}
