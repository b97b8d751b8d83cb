//! Core type definitions for report annotation
//!
//! This module provides the fundamental types used throughout the tbiextract library:
//! - [`TargetGroup`]: The 27 clinical concepts tracked in head CT reports
//! - [`ModifierCategory`]: Lexical modifier categories, including termination and pseudo
//! - [`ScopeDirection`]: Which side of a modifier its targets may sit on
//! - [`ModifierGroup`]: Final annotation value of a concept
//! - [`Span`] / [`ModifierLink`]: Sentence-level matches and their candidate links
//! - [`ExtractionOptions`]: Configuration for one extraction run
//! - [`TargetAnnotationRecord`] / [`ReportResult`]: Report-level output

mod enums;
mod options;
mod record;
mod span;
mod target;

pub use enums::{
    GroupScale, ModifierCategory, ModifierGroup, ScopeDirection, REPORT_PRECEDENCE,
    REPORT_PRECEDENCE_UMBRELLA, SENTENCE_PRECEDENCE,
};
pub use options::{DuplicatePolicy, ExtractionOptions, DEFAULT_MAX_MODIFIER_DISTANCE};
pub use record::{ReportResult, TargetAnnotationRecord};
pub use span::{LinkDirection, ModifierLink, Span, SpanKind};
pub use target::{TargetGroup, TARGET_COUNT};
