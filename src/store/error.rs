//! Errors raised while reading tree notation and building the hierarchy.
use thiserror::Error;

/// Bracket nesting problems in the tree notation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BracketError {
    #[error("too many closing brackets: unmatched ']' at byte {position}")]
    UnmatchedClose { position: usize },
    #[error("too few closing brackets: {open} node(s) still open at end of input (innermost '{innermost}')")]
    Unclosed { open: usize, innermost: String },
    #[error("terminal '{token}' at byte {position} is outside of any node")]
    StrayTerminal { token: String, position: usize },
    #[error("a second top-level node starts at byte {position}; a tree has exactly one root")]
    MultipleRoots { position: usize },
    #[error("node opened at byte {position} has no label")]
    MissingLabel { position: usize },
    #[error("malformed root marker at byte {position}: {reason}")]
    RootMarker { position: usize, reason: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HierarchyError {
    #[error("Escape error: {0}")]
    Escape(String),
    #[error("Tree bracket error: {0}")]
    Bracket(#[from] BracketError),
    #[error("Ternary branching error: node '{label}' has more than two daughters: {daughters:?}")]
    TernaryBranching { label: String, daughters: Vec<String> },
    #[error("Duplicate label error: '{label}' labels two different nodes ({first:?} vs {second:?}); disambiguate the labels first")]
    DuplicateLabel {
        label: String,
        first: Vec<String>,
        second: Vec<String>,
    },
    #[error("Empty tree: the input contains no node")]
    Empty,
}
