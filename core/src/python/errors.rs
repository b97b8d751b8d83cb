//! Python exception types for tbiextract
//!
//! This module defines Python exception classes that map to Rust error types.

// Suppress warnings from PyO3's create_exception! macro about gil-refs feature
#![allow(unexpected_cfgs)]

use pyo3::{create_exception, exceptions::PyException, prelude::*};

use crate::error::TbiError;

// Base exception
create_exception!(
    tbiextract,
    PyTbiExtractError,
    PyException,
    "Base exception for all tbiextract errors"
);

create_exception!(
    tbiextract,
    PyConfigurationError,
    PyTbiExtractError,
    "Invalid or contradictory extraction options"
);

create_exception!(
    tbiextract,
    PyLexiconLoadError,
    PyTbiExtractError,
    "Unknown target id or malformed lexicon entry"
);

create_exception!(
    tbiextract,
    PySentenceAnnotationError,
    PyTbiExtractError,
    "A sentence could not be annotated"
);

create_exception!(
    tbiextract,
    PyAggregationError,
    PyTbiExtractError,
    "A report-level rule referenced an unresolved concept"
);

/// Convert Rust TbiError to appropriate Python exception
pub fn convert_error(err: TbiError) -> PyErr {
    let message = err.to_string();
    match err {
        TbiError::Configuration(_) => PyConfigurationError::new_err(message),
        TbiError::LexiconLoad(_) => PyLexiconLoadError::new_err(message),
        TbiError::SentenceAnnotation(_) => PySentenceAnnotationError::new_err(message),
        TbiError::Aggregation { .. } => PyAggregationError::new_err(message),
        TbiError::IoError(_) => pyo3::exceptions::PyIOError::new_err(message),
    }
}
