use super::enums::ModifierGroup;
use super::target::TargetGroup;
use crate::error::SentenceAnnotationError;

/// Final annotation of one concept for one report
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct TargetAnnotationRecord {
    /// Concept id
    pub target_group: TargetGroup,

    /// Literal target phrases, first appearance order, deduplicated
    pub target_phrases: Vec<String>,

    /// Literal modifier phrases, first appearance order, deduplicated
    pub modifier_phrases: Vec<String>,

    /// Resolved annotation value
    pub modifier_group: ModifierGroup,
}

impl TargetAnnotationRecord {
    /// Creates a record for a concept with no surviving evidence
    pub fn not_specified(target_group: TargetGroup) -> Self {
        Self {
            target_group,
            target_phrases: Vec::new(),
            modifier_phrases: Vec::new(),
            modifier_group: ModifierGroup::NotSpecified,
        }
    }

    /// Comma-joined target phrases, `None` when there are none
    pub fn target_phrase(&self) -> Option<String> {
        join_phrases(&self.target_phrases)
    }

    /// Comma-joined modifier phrases, `None` when there are none
    pub fn modifier_phrase(&self) -> Option<String> {
        join_phrases(&self.modifier_phrases)
    }

    /// Appends a phrase to a list unless already present
    pub(crate) fn push_unique(phrases: &mut Vec<String>, phrase: &str) {
        if !phrases.iter().any(|p| p == phrase) {
            phrases.push(phrase.to_string());
        }
    }
}

fn join_phrases(phrases: &[String]) -> Option<String> {
    if phrases.is_empty() {
        None
    } else {
        Some(phrases.join(", "))
    }
}

/// Structured output for one report
///
/// One record per requested concept, in requested order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ReportResult {
    /// Per-concept annotations
    pub records: Vec<TargetAnnotationRecord>,

    /// Sentences skipped during annotation
    pub warnings: Vec<SentenceAnnotationError>,
}

impl ReportResult {
    /// Looks up the record of a concept
    pub fn get(&self, group: TargetGroup) -> Option<&TargetAnnotationRecord> {
        self.records.iter().find(|r| r.target_group == group)
    }

    /// Returns the annotation value of a concept, if it was requested
    pub fn group_of(&self, group: TargetGroup) -> Option<ModifierGroup> {
        self.get(group).map(|r| r.modifier_group)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TargetAnnotationRecord> {
        self.records.iter()
    }
}
