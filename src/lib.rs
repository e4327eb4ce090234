// Core of the semantic type derivation: bracket trees in, a type and rule
// for every node out. The optional `python` feature builds the `_core`
// extension module on top of the same API.

pub mod analysis;
pub mod config;
pub mod display {
    pub mod trace;
}
pub mod lexicon;
pub mod notation;
pub mod store;
pub mod type_system;

#[cfg(feature = "python")]
mod bindings {
    pub mod python;
}

pub use config::{ComposeConfig, ExhaustionPolicy};
pub use lexicon::Lexicon;
pub use notation::parse_hierarchy;
pub use store::{HierarchyMap, Tree};
pub use type_system::{compose, compose_all, compose_with, Composition, SemType};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// A simple function to confirm the Rust core is callable from Python.
#[cfg(feature = "python")]
#[pyfunction]
fn rust_core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// --- Module Definition ---
/// The name `_core` is chosen to indicate it's an internal, compiled component.
#[cfg(feature = "python")]
#[pymodule]
fn _core(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    use bindings::python;

    m.add_function(wrap_pyfunction!(rust_core_version, m)?)?;
    m.add_function(wrap_pyfunction!(python::parse_hierarchy, m)?)?;
    m.add_function(wrap_pyfunction!(python::compose, m)?)?;
    m.add_class::<python::PyParsedTree>()?;
    m.add_class::<python::PyLexicon>()?;
    m.add_class::<python::PyComposition>()?;
    Ok(())
}
