//! Tree storage: the ordered parse tree and the flat hierarchy map derived from it.
pub mod error;
pub mod hierarchy;
pub mod tree;
pub mod types;

pub use error::{BracketError, HierarchyError};
pub use hierarchy::{HierarchyMap, Mother};
pub use tree::Tree;
pub use types::{Child, Daughters, NodeId, TreeNode};
