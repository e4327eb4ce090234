use crate::config::ComposeConfig;
use crate::display::trace;
use crate::lexicon::Lexicon;
use crate::notation;
use crate::store::{HierarchyMap, Tree};
use crate::type_system::{self, Composition};
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use std::collections::{BTreeMap, HashMap};

#[pyclass(name = "_ParsedTree")]
#[derive(Debug, Clone)]
pub struct PyParsedTree {
    tree: Tree,
    hierarchy: HierarchyMap,
}

#[pymethods]
impl PyParsedTree {
    pub fn leaves(&self) -> Vec<String> {
        self.tree.leaves().into_iter().map(str::to_string).collect()
    }

    pub fn sentence(&self) -> String { self.tree.sentence() }

    /// The flat mother -> daughters mapping.
    pub fn hierarchy(&self) -> BTreeMap<String, Vec<String>> {
        self.hierarchy
            .iter()
            .map(|m| (m.label.clone(), m.daughters.to_vec()))
            .collect()
    }

    pub fn __str__(&self) -> String { self.tree.to_string() }
}

#[pyclass(name = "_Lexicon")]
#[derive(Debug, Clone, Default)]
pub struct PyLexicon {
    inner: Lexicon,
}

#[pymethods]
impl PyLexicon {
    #[new]
    pub fn new(categories: HashMap<String, Vec<String>>) -> PyResult<Self> {
        let inner = Lexicon::from_categories(categories).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { inner })
    }

    #[staticmethod]
    pub fn from_json(json: &str) -> PyResult<Self> {
        let inner = Lexicon::from_json_str(json).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { inner })
    }

    pub fn __len__(&self) -> usize { self.inner.len() }
    pub fn __contains__(&self, terminal: &str) -> bool { self.inner.contains(terminal) }
}

#[pyclass(name = "_Composition")]
#[derive(Debug, Clone)]
pub struct PyComposition {
    tree: Tree,
    inner: Composition,
}

#[pymethods]
impl PyComposition {
    pub fn types(&self) -> BTreeMap<String, String> { self.inner.types() }
    pub fn rules(&self) -> BTreeMap<String, String> { self.inner.rules() }

    #[getter]
    pub fn iterations(&self) -> usize { self.inner.iterations() }

    pub fn has_errors(&self) -> bool { self.inner.has_errors() }

    pub fn trace(&self) -> String { trace::format_derivation(&self.tree, &self.inner) }

    pub fn to_json(&self) -> PyResult<String> {
        self.inner.to_json().map_err(|e| PyRuntimeError::new_err(e.to_string()))
    }
}

#[pyfunction]
pub fn parse_hierarchy(text: &str) -> PyResult<PyParsedTree> {
    let (tree, hierarchy) = notation::parse_hierarchy(text).map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok(PyParsedTree { tree, hierarchy })
}

#[pyfunction]
#[pyo3(signature = (tree, lexicon, max_iterations = 15, fail_fast = false))]
pub fn compose(
    tree: PyRef<'_, PyParsedTree>,
    lexicon: PyRef<'_, PyLexicon>,
    max_iterations: usize,
    fail_fast: bool,
) -> PyResult<PyComposition> {
    let mut config = ComposeConfig::with_max_iterations(max_iterations).map_err(|e| PyValueError::new_err(e.to_string()))?;
    if fail_fast {
        config = config.fail_fast();
    }
    let inner = type_system::compose_with(&tree.hierarchy, &lexicon.inner, &config)
        .map_err(|e| PyRuntimeError::new_err(e.to_string()))?;
    Ok(PyComposition { tree: tree.tree.clone(), inner })
}
