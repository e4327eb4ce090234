use serde::{Serialize, Deserialize};
use smallvec::SmallVec;

/// Arena index of an internal node in a [`super::Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline(always)]
    pub fn index(&self) -> usize { self.0 as usize }
    pub fn new(idx: usize) -> Self { Self(idx as u32) }
}

/// A daughter of an internal node: another internal node, or a terminal symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Child {
    Node(NodeId),
    Leaf(String),
}

/// The ordered daughters of a mother as they appear in the hierarchy map:
/// labels for internal daughters, literal strings for terminals.
pub type Daughters = SmallVec<[String; 2]>;

/// An internal node of the tree. Zero daughters is legal (`[.1 ]`, `[.$t$ ]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub label: String,
    pub children: SmallVec<[Child; 2]>,
}
