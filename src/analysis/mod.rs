//! Structural queries over the parse tree.
pub mod topology;
