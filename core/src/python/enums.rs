//! Python wrapper for the annotation value enum

use pyo3::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use super::errors::PyConfigurationError;
use crate::types::ModifierGroup;

#[pyclass(name = "ModifierGroup", module = "tbiextract")]
#[derive(Clone, Debug)]
pub struct PyModifierGroup {
    pub(crate) inner: ModifierGroup,
}

#[pymethods]
impl PyModifierGroup {
    #[classattr]
    const PRESENT: Self = Self {
        inner: ModifierGroup::Present,
    };
    #[classattr]
    const ABSENT: Self = Self {
        inner: ModifierGroup::Absent,
    };
    #[classattr]
    const SUSPECTED: Self = Self {
        inner: ModifierGroup::Suspected,
    };
    #[classattr]
    const INDETERMINATE: Self = Self {
        inner: ModifierGroup::Indeterminate,
    };
    #[classattr]
    const ABNORMAL: Self = Self {
        inner: ModifierGroup::Abnormal,
    };
    #[classattr]
    const NORMAL: Self = Self {
        inner: ModifierGroup::Normal,
    };
    #[classattr]
    const NOT_SPECIFIED: Self = Self {
        inner: ModifierGroup::NotSpecified,
    };

    /// Parse a group from "absent", "NOT SPECIFIED", "not_specified", ...
    #[staticmethod]
    fn from_str(value: &str) -> PyResult<Self> {
        ModifierGroup::from_str(value)
            .map(Self::from)
            .ok_or_else(|| PyConfigurationError::new_err(format!("unknown modifier group '{}'", value)))
    }

    fn is_specified(&self) -> bool {
        self.inner.is_specified()
    }

    fn is_positive(&self) -> bool {
        self.inner.is_positive()
    }

    pub fn simple_name(&self) -> &'static str {
        self.inner.simple_name()
    }

    fn __str__(&self) -> String {
        self.inner.simple_name().to_uppercase()
    }

    fn __repr__(&self) -> String {
        format!("ModifierGroup.{:?}", self.inner)
    }

    fn __eq__(&self, other: &PyModifierGroup) -> bool {
        self.inner == other.inner
    }

    fn __hash__(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.inner.hash(&mut hasher);
        hasher.finish()
    }
}

impl From<ModifierGroup> for PyModifierGroup {
    fn from(inner: ModifierGroup) -> Self {
        Self { inner }
    }
}
