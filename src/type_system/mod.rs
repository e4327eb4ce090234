//! The semantic type system: the type grammar and the composition engine
//! that derives a type for every node of a hierarchy.
//!
//! Composition is a fixed point over a write-once ledger. Each pass runs
//! Terminal Typing, Non-Branching, Functional Application, Predicate
//! Abstraction and Predicate Modification in that order; a node's entry, once
//! written, is never revisited.

// Publicly export the primary components for use by other modules.
pub use self::composer::{compose, compose_all, compose_with, Composer, Composition};
pub use self::error::{CompositionError, TypeSyntaxError};
pub use self::ledger::{Assignments, Derivation, Rule, Typing};
pub use self::semtype::{codomain_of, domain_of, is_left_prefix, SemType};

// --- MODULE DECLARATIONS ---
mod composer;
mod error;
mod ledger;
mod rules;
mod semtype;
