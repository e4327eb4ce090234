//! The ordered, immutable parse tree, stored as an arena of internal nodes.
use super::types::{Child, NodeId, TreeNode};
use crate::analysis::topology;
use smallvec::SmallVec;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    nodes: Vec<TreeNode>,
}

impl Tree {
    /// The first node added is the root.
    pub(crate) fn new() -> Self { Self { nodes: Vec::new() } }

    pub fn root(&self) -> NodeId { NodeId(0) }
    pub fn count(&self) -> usize { self.nodes.len() }

    pub(crate) fn add_node(&mut self, label: String) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(TreeNode { label, children: SmallVec::new() });
        id
    }

    /// Appends a daughter. Arity is checked by the reader before this is called.
    pub(crate) fn push_child(&mut self, parent: NodeId, child: Child) {
        self.nodes[parent.index()].children.push(child);
    }

    #[inline(always)]
    pub fn label(&self, id: NodeId) -> &str { &self.nodes[id.index()].label }

    #[inline(always)]
    pub fn children(&self, id: NodeId) -> &[Child] { &self.nodes[id.index()].children }

    pub fn node(&self, id: NodeId) -> &TreeNode { &self.nodes[id.index()] }

    /// Internal nodes in pre-order, root first.
    pub fn subtrees(&self) -> Vec<NodeId> { topology::preorder(self) }

    /// Terminal symbols, left to right. Leaf-less nodes such as `[.1 ]` contribute nothing.
    pub fn leaves(&self) -> Vec<&str> { topology::leaves(self) }

    pub fn depth(&self) -> usize { topology::depth(self) }

    /// The terminals read as a sentence: capitalized, space-joined, with a final period.
    pub fn sentence(&self) -> String {
        let joined = self.leaves().join(" ");
        let mut chars = joined.chars();
        match chars.next() {
            Some(first) => format!("{}{}.", first.to_uppercase(), chars.as_str()),
            None => String::new(),
        }
    }

    fn write_node(&self, id: NodeId, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}", self.label(id))?;
        for child in self.children(id) {
            match child {
                Child::Node(c) => {
                    write!(f, " ")?;
                    self.write_node(*c, f)?;
                }
                Child::Leaf(word) => write!(f, " {}", word)?,
            }
        }
        write!(f, ")")
    }
}

/// Generic parenthesis tree form: `(S (NP (N Andrew)) (VP ...))`.
impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.nodes.is_empty() {
            return Ok(());
        }
        self.write_node(self.root(), f)
    }
}
