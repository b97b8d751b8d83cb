//! Python wrappers for report output

use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::enums::PyModifierGroup;
use crate::types::{ReportResult, TargetAnnotationRecord, TargetGroup};

/// Annotation of one concept in one report
#[pyclass(name = "TargetAnnotation", module = "tbiextract")]
#[derive(Clone)]
pub struct PyTargetAnnotation {
    pub(crate) inner: TargetAnnotationRecord,
}

#[pymethods]
impl PyTargetAnnotation {
    /// Concept id, e.g. "subdural_hemorrhage"
    #[getter]
    fn target_group(&self) -> &'static str {
        self.inner.target_group.name()
    }

    /// Comma-joined target phrases, or None
    #[getter]
    fn target_phrase(&self) -> Option<String> {
        self.inner.target_phrase()
    }

    /// Comma-joined modifier phrases, or None
    #[getter]
    fn modifier_phrase(&self) -> Option<String> {
        self.inner.modifier_phrase()
    }

    #[getter]
    fn modifier_group(&self) -> PyModifierGroup {
        self.inner.modifier_group.into()
    }

    /// Convert to a dictionary with the output table columns
    fn to_dict(&self, py: Python) -> PyResult<Py<PyDict>> {
        let dict = PyDict::new_bound(py);
        dict.set_item("target_phrase", self.target_phrase())?;
        dict.set_item("target_group", self.target_group())?;
        dict.set_item("modifier_phrase", self.modifier_phrase())?;
        dict.set_item(
            "modifier_group",
            self.inner.modifier_group.simple_name().to_uppercase(),
        )?;
        Ok(dict.unbind())
    }

    fn __repr__(&self) -> String {
        format!(
            "TargetAnnotation(target_group={}, modifier_group={})",
            self.inner.target_group,
            self.inner.modifier_group.simple_name().to_uppercase()
        )
    }
}

impl From<TargetAnnotationRecord> for PyTargetAnnotation {
    fn from(inner: TargetAnnotationRecord) -> Self {
        Self { inner }
    }
}

/// Findings of one report: one annotation per requested concept
#[pyclass(name = "ReportResult", module = "tbiextract")]
#[derive(Clone)]
pub struct PyReportResult {
    pub(crate) inner: ReportResult,
}

#[pymethods]
impl PyReportResult {
    /// Annotations in requested order
    #[getter]
    fn records(&self) -> Vec<PyTargetAnnotation> {
        self.inner.records.iter().cloned().map(Into::into).collect()
    }

    /// Messages of the sentences that were skipped
    #[getter]
    fn warnings(&self) -> Vec<String> {
        self.inner.warnings.iter().map(|w| w.to_string()).collect()
    }

    /// Look up the annotation of one concept id
    fn get(&self, target_group: &str) -> Option<PyTargetAnnotation> {
        TargetGroup::from_str(target_group)
            .and_then(|group| self.inner.get(group))
            .cloned()
            .map(Into::into)
    }

    /// Rows as a list of dictionaries
    fn to_dicts(&self, py: Python) -> PyResult<Vec<Py<PyDict>>> {
        self.records().iter().map(|r| r.to_dict(py)).collect()
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "ReportResult(records={}, warnings={})",
            self.inner.len(),
            self.inner.warnings.len()
        )
    }
}

impl From<ReportResult> for PyReportResult {
    fn from(inner: ReportResult) -> Self {
        Self { inner }
    }
}
