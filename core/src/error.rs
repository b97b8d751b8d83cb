use thiserror::Error;

/// Result type for tbiextract operations
pub type Result<T> = std::result::Result<T, TbiError>;

/// Error types for tbiextract operations
#[derive(Error, Debug)]
pub enum TbiError {
    /// Invalid or contradictory extraction options
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed, missing, or unknown lexicon entries
    #[error("Lexicon load error: {0}")]
    LexiconLoad(String),

    /// A single sentence could not be annotated
    #[error(transparent)]
    SentenceAnnotation(#[from] SentenceAnnotationError),

    /// A report-level rule referenced a concept that was never resolved
    #[error("Aggregation error for {concept}: {message}")]
    Aggregation { concept: String, message: String },

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Failure to annotate one sentence of a report
///
/// Recovered locally by the pipeline: the sentence is skipped and the
/// error is kept as a warning on the report result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Sentence annotation error (report {report}, sentence {sentence_index}): {message}")]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct SentenceAnnotationError {
    /// Report identifier supplied by the caller, or "-" when unnamed
    pub report: String,

    /// Zero-based index of the sentence within the report
    pub sentence_index: usize,

    /// What went wrong
    pub message: String,
}

impl SentenceAnnotationError {
    pub fn new(sentence_index: usize, message: impl Into<String>) -> Self {
        Self {
            report: "-".to_string(),
            sentence_index,
            message: message.into(),
        }
    }

    /// Attaches the report identifier
    pub fn in_report(mut self, report: &str) -> Self {
        self.report = report.to_string();
        self
    }
}

/// Failure of the pattern-matching primitive on one piece of text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// The pattern could not be compiled or executed
    #[error("pattern '{pattern}' failed: {message}")]
    Pattern { pattern: String, message: String },

    /// The matcher reported offsets outside the text or inside a character
    #[error("pattern '{pattern}' produced invalid span {start}..{end} for text of {len} bytes")]
    InvalidSpan {
        pattern: String,
        start: usize,
        end: usize,
        len: usize,
    },
}
