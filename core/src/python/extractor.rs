//! Python wrapper for ReportExtractor

use pyo3::prelude::*;
use std::path::PathBuf;

use super::errors::{convert_error, PyConfigurationError};
use super::record::PyReportResult;
use crate::cli::report_id;
use crate::types::{DuplicatePolicy, ExtractionOptions, DEFAULT_MAX_MODIFIER_DISTANCE};

/// Extracts traumatic brain injury findings from head CT report text
///
/// The lexicon is loaded and compiled once at construction; one extractor
/// can process any number of reports.
#[pyclass(name = "ReportExtractor", module = "tbiextract")]
pub struct PyReportExtractor {
    inner: crate::api::ReportExtractor,
}

#[pymethods]
impl PyReportExtractor {
    /// Create an extractor
    ///
    /// Args:
    ///     include_targets: Concept ids to report, in this order
    ///     exclude_targets: Concept ids to leave out (not with include_targets)
    ///     save_target_phrases: Keep literal target phrases (default: False)
    ///     save_modifier_phrases: Keep literal modifier phrases (default: False)
    ///     max_modifier_distance: Words allowed between modifier and target
    ///     duplicate_policy: "precedence" or "majority-vote"
    ///     synthesize_derived_phrases: Phrase derived concepts by constituents
    ///
    /// Raises:
    ///     ConfigurationError: If the options are contradictory
    ///     LexiconLoadError: If a concept id is unknown
    ///
    /// Example:
    ///     >>> from tbiextract import ReportExtractor
    ///     >>> extractor = ReportExtractor(include_targets=["hemorrhage"])
    ///     >>> extractor.extract("No evidence of hemorrhage.").get("hemorrhage")
    #[new]
    #[pyo3(signature = (
        include_targets=None,
        exclude_targets=None,
        save_target_phrases=false,
        save_modifier_phrases=false,
        max_modifier_distance=DEFAULT_MAX_MODIFIER_DISTANCE,
        duplicate_policy="precedence",
        synthesize_derived_phrases=false
    ))]
    fn new(
        include_targets: Option<Vec<String>>,
        exclude_targets: Option<Vec<String>>,
        save_target_phrases: bool,
        save_modifier_phrases: bool,
        max_modifier_distance: usize,
        duplicate_policy: &str,
        synthesize_derived_phrases: bool,
    ) -> PyResult<Self> {
        let duplicate_policy = match duplicate_policy {
            "precedence" => DuplicatePolicy::Precedence,
            "majority-vote" | "majority_vote" => DuplicatePolicy::MajorityVote,
            other => {
                return Err(PyConfigurationError::new_err(format!(
                    "unknown duplicate policy '{}'",
                    other
                )))
            }
        };

        let options = ExtractionOptions {
            include_targets,
            exclude_targets,
            save_target_phrases,
            save_modifier_phrases,
            max_modifier_distance,
            duplicate_policy,
            synthesize_derived_phrases,
        };

        let inner = crate::api::ReportExtractor::new(options).map_err(convert_error)?;
        Ok(Self { inner })
    }

    /// Extract findings from report text
    ///
    /// Args:
    ///     text: Full report text
    ///     report_id: Identifier used in warnings (default: "-")
    ///
    /// Returns:
    ///     ReportResult: One annotation per requested concept
    ///
    /// Raises:
    ///     AggregationError: If a report-level rule cannot be evaluated
    #[pyo3(signature = (text, report_id=None))]
    fn extract(&self, text: &str, report_id: Option<&str>) -> PyResult<PyReportResult> {
        self.inner
            .extract_report(report_id.unwrap_or("-"), text)
            .map(Into::into)
            .map_err(convert_error)
    }

    /// Extract findings from a report file (str or pathlib.Path)
    ///
    /// The file stem is used as the report identifier.
    fn extract_file(&self, path: PathBuf) -> PyResult<PyReportResult> {
        let text = std::fs::read_to_string(&path).map_err(|e| convert_error(e.into()))?;
        self.inner
            .extract_report(&report_id(&path), &text)
            .map(Into::into)
            .map_err(convert_error)
    }

    /// Requested concept ids in output order
    #[getter]
    fn targets(&self) -> Vec<&'static str> {
        self.inner
            .lexicon()
            .requested()
            .iter()
            .map(|group| group.name())
            .collect()
    }

    #[getter]
    fn lexicon_version(&self) -> String {
        self.inner.lexicon().version().to_string()
    }

    fn __repr__(&self) -> String {
        format!(
            "ReportExtractor(targets={}, lexicon={})",
            self.inner.lexicon().requested().len(),
            self.inner.lexicon().version()
        )
    }
}
