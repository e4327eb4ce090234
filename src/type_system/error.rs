//! Defines the error types for the type system module.
use thiserror::Error;

/// Malformed type notation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeSyntaxError {
    #[error("expected '{expected}' at position {position} in type '{text}', found {}", describe(.found))]
    Expected {
        expected: char,
        found: Option<char>,
        position: usize,
        text: String,
    },
    #[error("expected an atomic type or '<' at position {position} in type '{text}', found {}", describe(.found))]
    ExpectedType {
        found: Option<char>,
        position: usize,
        text: String,
    },
    #[error("unexpected input after position {position} in type '{text}'")]
    TrailingInput { position: usize, text: String },
}

fn describe(found: &Option<char>) -> String {
    match found {
        Some(c) => format!("'{}'", c),
        None => "end of input".to_string(),
    }
}

fn hint_suffix(hint: &Option<String>) -> String {
    match hint {
        Some(h) => format!(" (did you mean '{}'?)", h),
        None => String::new(),
    }
}

fn note_suffix(note: &Option<String>) -> String {
    match note {
        Some(n) => format!("; {}", n),
        None => String::new(),
    }
}

/// Aborting failures of a composition run.
///
/// `UnknownTerminal` and `TreeStructure` are always fatal. `NotConverged` and
/// `Mismatch` are only produced under [`crate::config::ExhaustionPolicy::Fail`];
/// the default policy reports those nodes in-band with the `?` marker.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompositionError {
    #[error("Lexicon error: terminal node '{terminal}' not in lexicon{}", hint_suffix(.hint))]
    UnknownTerminal {
        terminal: String,
        hint: Option<String>,
    },
    #[error("Tree structure error: '{missing}' (daughter of '{mother}') is neither a typed terminal nor a mother node{}", note_suffix(.note))]
    TreeStructure {
        mother: String,
        missing: String,
        note: Option<String>,
    },
    #[error("Composition error: tree could not be composed within {iterations} iterations; unresolved: {unresolved:?}")]
    NotConverged {
        iterations: usize,
        unresolved: Vec<String>,
    },
    #[error("Composition error: predicate modification only applies to <e, t> daughters; '{mother}' got {found}")]
    Mismatch { mother: String, found: String },
}
