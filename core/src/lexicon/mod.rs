//! Lexicon store
//!
//! Holds the fixed catalog of lexical targets and lexical modifiers. The
//! built-in catalog is static data; [`Lexicon::load`] copies it once and
//! applies the include/exclude target filters of [`ExtractionOptions`].

mod modifiers;
mod targets;

use crate::error::{Result, TbiError};
use crate::types::{
    ExtractionOptions, ModifierCategory, ScopeDirection, SpanKind, TargetGroup,
};
use log::debug;
use std::collections::HashSet;

use modifiers::MODIFIER_LEXICON;
use targets::TARGET_LEXICON;

/// Version of the built-in lexicon
pub const LEXICON_VERSION: &str = "1.0.0";

/// Anything the phrase matcher can search for
pub trait PatternDefinition {
    /// Ordered pattern set
    fn patterns(&self) -> &[String];

    /// Classification given to spans produced by this definition
    fn span_kind(&self) -> SpanKind;
}

/// A lexical target: one clinical concept and its patterns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDefinition {
    pub group: TargetGroup,
    pub literal: String,
    pub patterns: Vec<String>,
}

impl TargetDefinition {
    pub fn new<I, S>(group: TargetGroup, literal: &str, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            group,
            literal: literal.to_string(),
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether this concept is computed from other concepts
    pub fn is_derived(&self) -> bool {
        self.group.is_derived()
    }
}

impl PatternDefinition for TargetDefinition {
    fn patterns(&self) -> &[String] {
        &self.patterns
    }

    fn span_kind(&self) -> SpanKind {
        SpanKind::Target(self.group)
    }
}

/// A lexical modifier: category, scope, and patterns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifierDefinition {
    pub literal: String,
    pub category: ModifierCategory,
    pub direction: ScopeDirection,
    pub patterns: Vec<String>,
}

impl ModifierDefinition {
    /// Creates a modifier that matches its own literal
    pub fn literal(literal: &str, category: ModifierCategory, direction: ScopeDirection) -> Self {
        Self {
            literal: literal.to_string(),
            category,
            direction,
            patterns: vec![literal_pattern(literal)],
        }
    }

    /// Creates a modifier with an explicit pattern
    pub fn with_pattern(
        literal: &str,
        category: ModifierCategory,
        direction: ScopeDirection,
        pattern: &str,
    ) -> Self {
        Self {
            literal: literal.to_string(),
            category,
            direction,
            patterns: vec![pattern.to_string()],
        }
    }
}

impl PatternDefinition for ModifierDefinition {
    fn patterns(&self) -> &[String] {
        &self.patterns
    }

    fn span_kind(&self) -> SpanKind {
        SpanKind::Modifier {
            category: self.category,
            direction: self.direction,
        }
    }
}

/// Escapes a literal phrase, accepting any whitespace between its words
pub fn literal_pattern(literal: &str) -> String {
    literal
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+")
}

/// Immutable catalog of targets and modifiers plus the requested output list
///
/// The lexicon always keeps every target definition it was built with;
/// `requested` only selects and orders the concepts reported in output.
///
/// # Example
///
/// ```
/// use tbiextract_core::{ExtractionOptions, Lexicon, TargetGroup};
///
/// let options = ExtractionOptions::default().with_include_targets(["swelling", "aneurysm"]);
/// let lexicon = Lexicon::load(&options).unwrap();
///
/// assert_eq!(lexicon.requested(), &[TargetGroup::Swelling, TargetGroup::Aneurysm]);
/// assert_eq!(lexicon.targets().len(), 27);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    targets: Vec<TargetDefinition>,
    modifiers: Vec<ModifierDefinition>,
    requested: Vec<TargetGroup>,
    version: String,
}

impl Lexicon {
    /// Loads the built-in lexicon filtered by the options' target lists
    ///
    /// # Errors
    ///
    /// - `Configuration` if both include and exclude lists are supplied, or
    ///   the filter leaves no targets
    /// - `LexiconLoad` if a listed id is not one of the 27 catalog concepts
    pub fn load(options: &ExtractionOptions) -> Result<Self> {
        Self::builtin().filtered(options)
    }

    /// Returns the unfiltered built-in lexicon
    pub fn builtin() -> Self {
        let targets = TARGET_LEXICON
            .iter()
            .map(|entry| {
                TargetDefinition::new(entry.group, entry.literal, entry.patterns.iter().copied())
            })
            .collect::<Vec<_>>();

        let modifiers = MODIFIER_LEXICON
            .iter()
            .map(|entry| match entry.pattern {
                Some(pattern) => ModifierDefinition::with_pattern(
                    entry.literal,
                    entry.category,
                    entry.direction,
                    pattern,
                ),
                None => ModifierDefinition::literal(entry.literal, entry.category, entry.direction),
            })
            .collect();

        let requested = targets.iter().map(|t| t.group).collect();

        Self {
            targets,
            modifiers,
            requested,
            version: LEXICON_VERSION.to_string(),
        }
    }

    /// Builds a custom lexicon from explicit definitions
    ///
    /// Targets are requested in the order given.
    ///
    /// # Errors
    ///
    /// `LexiconLoad` if a target group is defined twice, or a non-derived
    /// target or any modifier has no patterns.
    pub fn from_parts(
        targets: Vec<TargetDefinition>,
        modifiers: Vec<ModifierDefinition>,
    ) -> Result<Self> {
        let mut seen = HashSet::new();
        for target in &targets {
            if !seen.insert(target.group) {
                return Err(TbiError::LexiconLoad(format!(
                    "target '{}' is defined more than once",
                    target.group
                )));
            }
            if target.patterns.is_empty() && !target.is_derived() {
                return Err(TbiError::LexiconLoad(format!(
                    "target '{}' has no patterns",
                    target.group
                )));
            }
        }

        if let Some(empty) = modifiers.iter().find(|m| m.patterns.is_empty()) {
            return Err(TbiError::LexiconLoad(format!(
                "modifier '{}' has no patterns",
                empty.literal
            )));
        }

        let requested = targets.iter().map(|t| t.group).collect();

        Ok(Self {
            targets,
            modifiers,
            requested,
            version: "custom".to_string(),
        })
    }

    /// Applies include/exclude target lists to the requested output
    pub fn filtered(mut self, options: &ExtractionOptions) -> Result<Self> {
        let requested = match (&options.include_targets, &options.exclude_targets) {
            (Some(_), Some(_)) => {
                return Err(TbiError::Configuration(
                    "include_targets and exclude_targets are mutually exclusive".to_string(),
                ))
            }
            (Some(include), None) => {
                let mut requested = Vec::new();
                for id in include {
                    let group = self.parse_target(id)?;
                    if !requested.contains(&group) {
                        requested.push(group);
                    }
                }
                requested
            }
            (None, Some(exclude)) => {
                let mut excluded = HashSet::new();
                for id in exclude {
                    excluded.insert(self.parse_target(id)?);
                }
                self.requested
                    .iter()
                    .copied()
                    .filter(|group| !excluded.contains(group))
                    .collect()
            }
            (None, None) => self.requested.clone(),
        };

        if requested.is_empty() {
            return Err(TbiError::Configuration(
                "target filters leave no targets to annotate".to_string(),
            ));
        }

        debug!(
            "Lexicon {}: {} targets requested, {} modifiers",
            self.version,
            requested.len(),
            self.modifiers.len()
        );

        self.requested = requested;
        Ok(self)
    }

    /// Resolves a concept id against the catalog and this lexicon
    fn parse_target(&self, id: &str) -> Result<TargetGroup> {
        let group = TargetGroup::from_str(id).ok_or_else(|| {
            TbiError::LexiconLoad(format!("unknown target id '{}'", id.trim()))
        })?;

        if self.target(group).is_none() {
            return Err(TbiError::LexiconLoad(format!(
                "target '{}' is not defined in lexicon {}",
                group, self.version
            )));
        }

        Ok(group)
    }

    pub fn targets(&self) -> &[TargetDefinition] {
        &self.targets
    }

    pub fn modifiers(&self) -> &[ModifierDefinition] {
        &self.modifiers
    }

    /// Concepts reported in output, in output order
    pub fn requested(&self) -> &[TargetGroup] {
        &self.requested
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Looks up the definition of a concept
    pub fn target(&self, group: TargetGroup) -> Option<&TargetDefinition> {
        self.targets.iter().find(|t| t.group == group)
    }

    /// Every pattern in the lexicon, targets first
    pub fn all_patterns(&self) -> impl Iterator<Item = &str> {
        self.targets
            .iter()
            .flat_map(|t| t.patterns.iter())
            .chain(self.modifiers.iter().flat_map(|m| m.patterns.iter()))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TARGET_COUNT;

    #[test]
    fn test_builtin_covers_catalog() {
        let lexicon = Lexicon::builtin();
        assert_eq!(lexicon.targets().len(), TARGET_COUNT);
        assert_eq!(lexicon.requested(), &TargetGroup::ALL);
        assert_eq!(lexicon.version(), LEXICON_VERSION);
        for group in TargetGroup::ALL {
            let def = lexicon.target(group).unwrap();
            assert_eq!(def.patterns.is_empty(), group.is_derived(), "{}", group);
        }
    }

    #[test]
    fn test_builtin_patterns_compile() {
        for pattern in Lexicon::builtin().all_patterns() {
            assert!(regex::Regex::new(pattern).is_ok(), "bad pattern: {}", pattern);
        }
    }

    #[test]
    fn test_load_include_keeps_order_and_dedupes() {
        let options = ExtractionOptions::default().with_include_targets([
            "subdural_hemorrhage",
            "aneurysm",
            "subdural_hemorrhage",
        ]);
        let lexicon = Lexicon::load(&options).unwrap();
        assert_eq!(
            lexicon.requested(),
            &[TargetGroup::SubduralHemorrhage, TargetGroup::Aneurysm]
        );
    }

    #[test]
    fn test_load_exclude_keeps_canonical_order() {
        let options = ExtractionOptions::default().with_exclude_targets(["aneurysm", "swelling"]);
        let lexicon = Lexicon::load(&options).unwrap();
        assert_eq!(lexicon.requested().len(), TARGET_COUNT - 2);
        assert_eq!(lexicon.requested()[0], TargetGroup::Anoxic);
        assert!(!lexicon.requested().contains(&TargetGroup::Swelling));
        // definitions are kept for derived rules
        assert!(lexicon.target(TargetGroup::Aneurysm).is_some());
    }

    #[test]
    fn test_load_include_and_exclude_is_configuration_error() {
        let options = ExtractionOptions::default()
            .with_include_targets(["aneurysm"])
            .with_exclude_targets(["contusion"]);
        assert!(matches!(
            Lexicon::load(&options),
            Err(TbiError::Configuration(_))
        ));
    }

    #[test]
    fn test_load_unknown_target_is_lexicon_error() {
        let options = ExtractionOptions::default().with_include_targets(["aneurysm", "sdh"]);
        assert!(matches!(Lexicon::load(&options), Err(TbiError::LexiconLoad(_))));

        let options = ExtractionOptions::default().with_exclude_targets(["tumor"]);
        assert!(matches!(Lexicon::load(&options), Err(TbiError::LexiconLoad(_))));
    }

    #[test]
    fn test_load_empty_selection_is_configuration_error() {
        let options = ExtractionOptions::default().with_include_targets(Vec::<String>::new());
        assert!(matches!(
            Lexicon::load(&options),
            Err(TbiError::Configuration(_))
        ));

        let all: Vec<_> = TargetGroup::ALL.iter().map(|g| g.name()).collect();
        let options = ExtractionOptions::default().with_exclude_targets(all);
        assert!(matches!(
            Lexicon::load(&options),
            Err(TbiError::Configuration(_))
        ));
    }

    #[test]
    fn test_from_parts_validation() {
        let hemorrhage = TargetDefinition::new(TargetGroup::Hemorrhage, "hemorrhage", ["hemorrhage"]);
        let no = ModifierDefinition::literal("no", ModifierCategory::Absent, ScopeDirection::Forward);

        let lexicon = Lexicon::from_parts(vec![hemorrhage.clone()], vec![no.clone()]).unwrap();
        assert_eq!(lexicon.requested(), &[TargetGroup::Hemorrhage]);
        assert_eq!(lexicon.version(), "custom");

        let duplicate = Lexicon::from_parts(vec![hemorrhage.clone(), hemorrhage.clone()], vec![]);
        assert!(matches!(duplicate, Err(TbiError::LexiconLoad(_))));

        let empty = TargetDefinition::new(TargetGroup::Contusion, "contusion", Vec::<String>::new());
        assert!(matches!(
            Lexicon::from_parts(vec![empty], vec![no]),
            Err(TbiError::LexiconLoad(_))
        ));

        let derived = TargetDefinition::new(
            TargetGroup::IntracranialPathology,
            "intracranial pathology",
            Vec::<String>::new(),
        );
        assert!(Lexicon::from_parts(vec![hemorrhage, derived], vec![]).is_ok());
    }

    #[test]
    fn test_filter_rejects_target_missing_from_custom_lexicon() {
        let lexicon = Lexicon::from_parts(
            vec![TargetDefinition::new(TargetGroup::Hemorrhage, "hemorrhage", ["hemorrhage"])],
            vec![],
        )
        .unwrap();
        let options = ExtractionOptions::default().with_include_targets(["contusion"]);
        assert!(matches!(
            lexicon.filtered(&options),
            Err(TbiError::LexiconLoad(_))
        ));
    }

    #[test]
    fn test_literal_pattern_escapes_and_relaxes_whitespace() {
        assert_eq!(literal_pattern("no  evidence of"), r"no\s+evidence\s+of");
        assert_eq!(literal_pattern("e.g."), r"e\.g\.");
    }
}
