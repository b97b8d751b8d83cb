use super::enums::{ModifierCategory, ScopeDirection};
use super::target::TargetGroup;

/// What a matched span stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    /// A lexical target of the given concept
    Target(TargetGroup),
    /// A lexical modifier with its category and scope
    Modifier {
        category: ModifierCategory,
        direction: ScopeDirection,
    },
}

impl SpanKind {
    pub fn is_target(&self) -> bool {
        matches!(self, SpanKind::Target(_))
    }

    /// Pruning tier: lower tiers are resolved first
    ///
    /// Targets outrank every modifier. Between modifiers the longer match
    /// wins and the tier only breaks ties, so "no change" (pseudo) still
    /// shadows "no".
    pub fn tier(&self) -> u8 {
        match self {
            SpanKind::Target(_) => 0,
            SpanKind::Modifier { category, .. } if category.is_qualifier() => 1,
            SpanKind::Modifier { .. } => 2,
        }
    }
}

/// A matched phrase within one sentence
///
/// Offsets are byte offsets into the sentence text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Start offset (inclusive)
    pub start: usize,

    /// End offset (exclusive)
    pub end: usize,

    /// Matched text, lowercased with whitespace runs collapsed
    pub text: String,

    /// Declaration index of the definition that produced the match
    pub definition: usize,

    /// Target or modifier classification
    pub kind: SpanKind,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether the two offset ranges intersect
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Which side of the target a linked modifier sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "lowercase"))]
pub enum LinkDirection {
    /// Modifier precedes the target and scopes forward onto it
    Forward,
    /// Modifier follows the target and scopes backward onto it
    Backward,
}

/// Candidate association between a target span and a modifier span
///
/// Indices refer to the surviving span list of the owning sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModifierLink {
    pub target: usize,
    pub modifier: usize,
    pub category: ModifierCategory,
    /// Word tokens strictly between the two spans
    pub distance: usize,
    pub direction: LinkDirection,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: usize, end: usize, kind: SpanKind) -> Span {
        Span {
            start,
            end,
            text: String::new(),
            definition: 0,
            kind,
        }
    }

    #[test]
    fn test_overlap_is_non_empty_intersection() {
        let target = SpanKind::Target(TargetGroup::Hemorrhage);
        assert!(span(0, 5, target).overlaps(&span(4, 8, target)));
        assert!(!span(0, 5, target).overlaps(&span(5, 8, target)));
        assert!(span(2, 3, target).overlaps(&span(0, 10, target)));
    }

    #[test]
    fn test_tiers() {
        let target = SpanKind::Target(TargetGroup::Contusion);
        let absent = SpanKind::Modifier {
            category: ModifierCategory::Absent,
            direction: ScopeDirection::Forward,
        };
        let term = SpanKind::Modifier {
            category: ModifierCategory::Termination,
            direction: ScopeDirection::Bidirectional,
        };
        assert!(target.tier() < absent.tier());
        assert!(absent.tier() < term.tier());
    }
}
