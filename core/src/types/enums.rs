use std::fmt;

/// Category of a lexical modifier
///
/// The first six categories qualify a target. `Termination` marks a clause
/// boundary and `Pseudo` shadows phrases that look like modifiers but are
/// not (e.g. "no change").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ModifierCategory {
    Present,
    Absent,
    Suspected,
    Indeterminate,
    Abnormal,
    Normal,
    Termination,
    Pseudo,
}

impl ModifierCategory {
    /// Returns whether this category qualifies targets
    pub fn is_qualifier(&self) -> bool {
        !matches!(
            self,
            ModifierCategory::Termination | ModifierCategory::Pseudo
        )
    }

    /// Returns the annotation group this category contributes, if any
    pub fn group(&self) -> Option<ModifierGroup> {
        match self {
            ModifierCategory::Present => Some(ModifierGroup::Present),
            ModifierCategory::Absent => Some(ModifierGroup::Absent),
            ModifierCategory::Suspected => Some(ModifierGroup::Suspected),
            ModifierCategory::Indeterminate => Some(ModifierGroup::Indeterminate),
            ModifierCategory::Abnormal => Some(ModifierGroup::Abnormal),
            ModifierCategory::Normal => Some(ModifierGroup::Normal),
            ModifierCategory::Termination | ModifierCategory::Pseudo => None,
        }
    }

    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            ModifierCategory::Present => "present",
            ModifierCategory::Absent => "absent",
            ModifierCategory::Suspected => "suspected",
            ModifierCategory::Indeterminate => "indeterminate",
            ModifierCategory::Abnormal => "abnormal",
            ModifierCategory::Normal => "normal",
            ModifierCategory::Termination => "termination",
            ModifierCategory::Pseudo => "pseudo",
        }
    }
}

impl fmt::Display for ModifierCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Direction in which a modifier may reach a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "lowercase"))]
pub enum ScopeDirection {
    /// Qualifies targets that follow the modifier
    Forward,
    /// Qualifies targets that precede the modifier
    Backward,
    /// Qualifies targets on either side
    Bidirectional,
}

impl ScopeDirection {
    /// Whether a modifier with this scope reaches a target after it
    pub fn reaches_forward(&self) -> bool {
        matches!(self, ScopeDirection::Forward | ScopeDirection::Bidirectional)
    }

    /// Whether a modifier with this scope reaches a target before it
    pub fn reaches_backward(&self) -> bool {
        matches!(
            self,
            ScopeDirection::Backward | ScopeDirection::Bidirectional
        )
    }
}

/// Final annotation value for one target concept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ModifierGroup {
    Present,
    Absent,
    Suspected,
    Indeterminate,
    Abnormal,
    Normal,
    #[cfg_attr(feature = "json", serde(rename = "NOT SPECIFIED"))]
    NotSpecified,
}

/// Sentence-level conflict order: explicit negation dominates
pub const SENTENCE_PRECEDENCE: [ModifierGroup; 6] = [
    ModifierGroup::Absent,
    ModifierGroup::Suspected,
    ModifierGroup::Indeterminate,
    ModifierGroup::Present,
    ModifierGroup::Abnormal,
    ModifierGroup::Normal,
];

/// Report-level duplicate order for most concepts
pub const REPORT_PRECEDENCE: [ModifierGroup; 6] = [
    ModifierGroup::Present,
    ModifierGroup::Suspected,
    ModifierGroup::Indeterminate,
    ModifierGroup::Absent,
    ModifierGroup::Abnormal,
    ModifierGroup::Normal,
];

/// Report-level duplicate order for umbrella concepts (fluid, hemorrhage)
pub const REPORT_PRECEDENCE_UMBRELLA: [ModifierGroup; 6] = [
    ModifierGroup::Absent,
    ModifierGroup::Indeterminate,
    ModifierGroup::Suspected,
    ModifierGroup::Present,
    ModifierGroup::Normal,
    ModifierGroup::Abnormal,
];

impl ModifierGroup {
    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            ModifierGroup::Present => "present",
            ModifierGroup::Absent => "absent",
            ModifierGroup::Suspected => "suspected",
            ModifierGroup::Indeterminate => "indeterminate",
            ModifierGroup::Abnormal => "abnormal",
            ModifierGroup::Normal => "normal",
            ModifierGroup::NotSpecified => "not specified",
        }
    }

    /// Returns whether any evidence backs this value
    pub fn is_specified(&self) -> bool {
        !matches!(self, ModifierGroup::NotSpecified)
    }

    /// Returns whether this value reports a finding
    pub fn is_positive(&self) -> bool {
        matches!(
            self,
            ModifierGroup::Present | ModifierGroup::Suspected | ModifierGroup::Abnormal
        )
    }

    /// Position in a precedence table; lower is preferred
    ///
    /// Values missing from the table rank last.
    pub fn rank_in(&self, order: &[ModifierGroup]) -> usize {
        order
            .iter()
            .position(|group| group == self)
            .unwrap_or(order.len())
    }

    /// Returns the most preferred group from a list under an ordering
    pub fn most_preferred(groups: &[ModifierGroup], order: &[ModifierGroup]) -> Option<Self> {
        groups
            .iter()
            .copied()
            .min_by_key(|group| group.rank_in(order))
    }

    /// Parses a group from its display or constant name
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('_', " ").as_str() {
            "present" => Some(ModifierGroup::Present),
            "absent" => Some(ModifierGroup::Absent),
            "suspected" => Some(ModifierGroup::Suspected),
            "indeterminate" => Some(ModifierGroup::Indeterminate),
            "abnormal" => Some(ModifierGroup::Abnormal),
            "normal" => Some(ModifierGroup::Normal),
            "not specified" => Some(ModifierGroup::NotSpecified),
            _ => None,
        }
    }
}

impl fmt::Display for ModifierGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Reporting scale of a target concept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "lowercase"))]
pub enum GroupScale {
    /// Reported as present / suspected / indeterminate / absent
    Presence,
    /// Reported as normal / abnormal
    Normality,
}

impl GroupScale {
    /// Maps a resolved group onto this scale
    ///
    /// `NotSpecified` is never rewritten.
    pub fn normalize(&self, group: ModifierGroup) -> ModifierGroup {
        match (self, group) {
            (_, ModifierGroup::NotSpecified) => ModifierGroup::NotSpecified,
            (GroupScale::Normality, ModifierGroup::Absent | ModifierGroup::Normal) => {
                ModifierGroup::Normal
            }
            (GroupScale::Normality, _) => ModifierGroup::Abnormal,
            (GroupScale::Presence, ModifierGroup::Abnormal) => ModifierGroup::Present,
            (GroupScale::Presence, ModifierGroup::Normal) => ModifierGroup::Absent,
            (GroupScale::Presence, other) => other,
        }
    }
}
