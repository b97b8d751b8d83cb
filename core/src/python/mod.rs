//! Python bindings for tbiextract
//!
//! This module provides PyO3 bindings enabling Python users to extract
//! head CT findings from report text.

// Suppress false positive warnings from PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;

use crate::types::TargetGroup;

mod enums;
mod errors;
mod extractor;
mod record;

pub use enums::*;
pub use errors::*;
pub use extractor::*;
pub use record::*;

/// All concept ids in canonical order
#[pyfunction]
#[pyo3(name = "target_groups")]
fn py_target_groups() -> Vec<&'static str> {
    TargetGroup::ALL.iter().map(|group| group.name()).collect()
}

/// Python module definition
#[pymodule]
fn _tbiextract(py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Register exception classes
    m.add(
        "TbiExtractError",
        py.get_type_bound::<errors::PyTbiExtractError>(),
    )?;
    m.add(
        "ConfigurationError",
        py.get_type_bound::<errors::PyConfigurationError>(),
    )?;
    m.add(
        "LexiconLoadError",
        py.get_type_bound::<errors::PyLexiconLoadError>(),
    )?;
    m.add(
        "SentenceAnnotationError",
        py.get_type_bound::<errors::PySentenceAnnotationError>(),
    )?;
    m.add(
        "AggregationError",
        py.get_type_bound::<errors::PyAggregationError>(),
    )?;

    // Register classes
    m.add_class::<PyModifierGroup>()?;
    m.add_class::<PyTargetAnnotation>()?;
    m.add_class::<PyReportResult>()?;
    m.add_class::<PyReportExtractor>()?;

    // Register functions
    m.add_function(wrap_pyfunction!(py_target_groups, m)?)?;

    // Add version
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add("LEXICON_VERSION", crate::lexicon::LEXICON_VERSION)?;

    Ok(())
}
