use std::fmt;

/// Default maximum number of word tokens between a modifier and its target
pub const DEFAULT_MAX_MODIFIER_DISTANCE: usize = 8;

/// How conflicting mentions of one concept are merged across a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "kebab-case"))]
pub enum DuplicatePolicy {
    /// Pick the highest-ranked group in the concept's precedence table
    #[default]
    Precedence,

    /// Keep the most frequent groups, then apply the precedence table
    MajorityVote,
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicatePolicy::Precedence => write!(f, "precedence"),
            DuplicatePolicy::MajorityVote => write!(f, "majority-vote"),
        }
    }
}

/// Options controlling one extraction run
///
/// `include_targets` and `exclude_targets` are mutually exclusive; the
/// lexicon rejects options carrying both.
///
/// # Example
///
/// ```
/// use tbiextract_core::ExtractionOptions;
///
/// let options = ExtractionOptions::default()
///     .with_include_targets(["hemorrhage", "contusion"])
///     .save_modifier_phrases(true);
///
/// assert_eq!(options.include_targets.as_ref().unwrap().len(), 2);
/// assert!(options.save_modifier_phrases);
/// assert!(!options.save_target_phrases);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtractionOptions {
    /// Concept ids to report, in output order
    pub include_targets: Option<Vec<String>>,

    /// Concept ids to drop from the canonical list
    pub exclude_targets: Option<Vec<String>>,

    /// Keep the literal target text in output rows
    pub save_target_phrases: bool,

    /// Keep the literal modifier text in output rows
    pub save_modifier_phrases: bool,

    /// Maximum word tokens between a modifier and the target it qualifies
    pub max_modifier_distance: usize,

    /// Merge strategy for repeated mentions
    pub duplicate_policy: DuplicatePolicy,

    /// Report constituent concepts as the phrase of derived targets
    pub synthesize_derived_phrases: bool,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            include_targets: None,
            exclude_targets: None,
            save_target_phrases: false,
            save_modifier_phrases: false,
            max_modifier_distance: DEFAULT_MAX_MODIFIER_DISTANCE,
            duplicate_policy: DuplicatePolicy::Precedence,
            synthesize_derived_phrases: false,
        }
    }
}

impl ExtractionOptions {
    /// Creates options that keep every phrase in the output
    ///
    /// # Example
    ///
    /// ```
    /// use tbiextract_core::ExtractionOptions;
    ///
    /// let verbose = ExtractionOptions::with_phrases();
    /// assert!(verbose.save_target_phrases);
    /// assert!(verbose.save_modifier_phrases);
    /// ```
    pub fn with_phrases() -> Self {
        Self {
            save_target_phrases: true,
            save_modifier_phrases: true,
            ..Self::default()
        }
    }

    /// Builder: Restrict output to the given concept ids
    pub fn with_include_targets<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_targets = Some(targets.into_iter().map(Into::into).collect());
        self
    }

    /// Builder: Drop the given concept ids from output
    pub fn with_exclude_targets<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_targets = Some(targets.into_iter().map(Into::into).collect());
        self
    }

    /// Builder: Keep target phrases
    pub fn save_target_phrases(mut self, save: bool) -> Self {
        self.save_target_phrases = save;
        self
    }

    /// Builder: Keep modifier phrases
    pub fn save_modifier_phrases(mut self, save: bool) -> Self {
        self.save_modifier_phrases = save;
        self
    }

    /// Builder: Set the distance pruning window
    ///
    /// # Example
    ///
    /// ```
    /// use tbiextract_core::ExtractionOptions;
    ///
    /// let options = ExtractionOptions::default().max_modifier_distance(3);
    /// assert_eq!(options.max_modifier_distance, 3);
    /// ```
    pub fn max_modifier_distance(mut self, tokens: usize) -> Self {
        self.max_modifier_distance = tokens;
        self
    }

    /// Builder: Set the duplicate merge policy
    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Builder: Synthesize phrases for derived targets
    pub fn synthesize_derived_phrases(mut self, synthesize: bool) -> Self {
        self.synthesize_derived_phrases = synthesize;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ExtractionOptions::default();
        assert!(options.include_targets.is_none());
        assert!(options.exclude_targets.is_none());
        assert!(!options.save_target_phrases);
        assert!(!options.save_modifier_phrases);
        assert_eq!(options.max_modifier_distance, DEFAULT_MAX_MODIFIER_DISTANCE);
        assert_eq!(options.duplicate_policy, DuplicatePolicy::Precedence);
        assert!(!options.synthesize_derived_phrases);
    }

    #[test]
    fn test_builder_chain() {
        let options = ExtractionOptions::default()
            .with_exclude_targets(vec!["atrophy".to_string()])
            .save_target_phrases(true)
            .duplicate_policy(DuplicatePolicy::MajorityVote)
            .synthesize_derived_phrases(true);

        assert_eq!(options.exclude_targets, Some(vec!["atrophy".to_string()]));
        assert!(options.save_target_phrases);
        assert!(!options.save_modifier_phrases);
        assert_eq!(options.duplicate_policy, DuplicatePolicy::MajorityVote);
        assert!(options.synthesize_derived_phrases);
    }

    #[test]
    fn test_policy_display() {
        assert_eq!(DuplicatePolicy::MajorityVote.to_string(), "majority-vote");
        assert_eq!(DuplicatePolicy::default().to_string(), "precedence");
    }
}
