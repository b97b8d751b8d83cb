use super::enums::{GroupScale, ModifierGroup, REPORT_PRECEDENCE, REPORT_PRECEDENCE_UMBRELLA};
use std::fmt;

/// Number of concepts in the target catalog
pub const TARGET_COUNT: usize = 27;

/// Clinical concept tracked by the extractor
///
/// Variants are declared in canonical output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "snake_case"))]
pub enum TargetGroup {
    Aneurysm,
    Anoxic,
    Atrophy,
    Cistern,
    Contusion,
    DiffuseAxonal,
    EpiduralHemorrhage,
    FacialFracture,
    Fluid,
    GrayWhiteDifferentiation,
    Hemorrhage,
    Herniation,
    Hydrocephalus,
    Hyperdensities,
    Hypodensities,
    IntracranialPathology,
    IntraparenchymalHemorrhage,
    IntraventricularHemorrhage,
    Ischemia,
    MassEffect,
    Microhemorrhage,
    MidlineShift,
    Pneumocephalus,
    SkullFracture,
    SubarachnoidHemorrhage,
    SubduralHemorrhage,
    Swelling,
}

impl TargetGroup {
    /// All concepts in canonical order
    pub const ALL: [TargetGroup; TARGET_COUNT] = [
        TargetGroup::Aneurysm,
        TargetGroup::Anoxic,
        TargetGroup::Atrophy,
        TargetGroup::Cistern,
        TargetGroup::Contusion,
        TargetGroup::DiffuseAxonal,
        TargetGroup::EpiduralHemorrhage,
        TargetGroup::FacialFracture,
        TargetGroup::Fluid,
        TargetGroup::GrayWhiteDifferentiation,
        TargetGroup::Hemorrhage,
        TargetGroup::Herniation,
        TargetGroup::Hydrocephalus,
        TargetGroup::Hyperdensities,
        TargetGroup::Hypodensities,
        TargetGroup::IntracranialPathology,
        TargetGroup::IntraparenchymalHemorrhage,
        TargetGroup::IntraventricularHemorrhage,
        TargetGroup::Ischemia,
        TargetGroup::MassEffect,
        TargetGroup::Microhemorrhage,
        TargetGroup::MidlineShift,
        TargetGroup::Pneumocephalus,
        TargetGroup::SkullFracture,
        TargetGroup::SubarachnoidHemorrhage,
        TargetGroup::SubduralHemorrhage,
        TargetGroup::Swelling,
    ];

    /// Returns the concept id used in output
    pub fn name(&self) -> &'static str {
        match self {
            TargetGroup::Aneurysm => "aneurysm",
            TargetGroup::Anoxic => "anoxic",
            TargetGroup::Atrophy => "atrophy",
            TargetGroup::Cistern => "cistern",
            TargetGroup::Contusion => "contusion",
            TargetGroup::DiffuseAxonal => "diffuse_axonal",
            TargetGroup::EpiduralHemorrhage => "epidural_hemorrhage",
            TargetGroup::FacialFracture => "facial_fracture",
            TargetGroup::Fluid => "fluid",
            TargetGroup::GrayWhiteDifferentiation => "gray_white_differentiation",
            TargetGroup::Hemorrhage => "hemorrhage",
            TargetGroup::Herniation => "herniation",
            TargetGroup::Hydrocephalus => "hydrocephalus",
            TargetGroup::Hyperdensities => "hyperdensities",
            TargetGroup::Hypodensities => "hypodensities",
            TargetGroup::IntracranialPathology => "intracranial_pathology",
            TargetGroup::IntraparenchymalHemorrhage => "intraparenchymal_hemorrhage",
            TargetGroup::IntraventricularHemorrhage => "intraventricular_hemorrhage",
            TargetGroup::Ischemia => "ischemia",
            TargetGroup::MassEffect => "mass_effect",
            TargetGroup::Microhemorrhage => "microhemorrhage",
            TargetGroup::MidlineShift => "midline_shift",
            TargetGroup::Pneumocephalus => "pneumocephalus",
            TargetGroup::SkullFracture => "skull_fracture",
            TargetGroup::SubarachnoidHemorrhage => "subarachnoid_hemorrhage",
            TargetGroup::SubduralHemorrhage => "subdural_hemorrhage",
            TargetGroup::Swelling => "swelling",
        }
    }

    /// Parses a concept id (case-insensitive, exact)
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        let s_lower = s.trim().to_lowercase();
        TargetGroup::ALL
            .iter()
            .copied()
            .find(|group| group.name() == s_lower)
    }

    /// Position in canonical order
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Returns the reporting scale of this concept
    pub fn scale(&self) -> GroupScale {
        match self {
            TargetGroup::Cistern | TargetGroup::GrayWhiteDifferentiation => GroupScale::Normality,
            _ => GroupScale::Presence,
        }
    }

    /// Whether this concept is computed from other concepts only
    pub fn is_derived(&self) -> bool {
        matches!(self, TargetGroup::IntracranialPathology)
    }

    /// Duplicate-resolution order for this concept
    ///
    /// Umbrella concepts (fluid, hemorrhage) rank absent first.
    pub fn report_precedence(&self) -> &'static [ModifierGroup] {
        match self {
            TargetGroup::Fluid | TargetGroup::Hemorrhage | TargetGroup::IntracranialPathology => {
                &REPORT_PRECEDENCE_UMBRELLA
            }
            _ => &REPORT_PRECEDENCE,
        }
    }
}

impl fmt::Display for TargetGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_is_complete_and_unique() {
        let names: HashSet<_> = TargetGroup::ALL.iter().map(|g| g.name()).collect();
        assert_eq!(names.len(), TARGET_COUNT);
    }

    #[test]
    fn test_index_matches_canonical_order() {
        for (i, group) in TargetGroup::ALL.iter().enumerate() {
            assert_eq!(group.index(), i);
        }
    }

    #[test]
    fn test_from_str_round_trip() {
        for group in TargetGroup::ALL {
            assert_eq!(TargetGroup::from_str(group.name()), Some(group));
        }
        assert_eq!(
            TargetGroup::from_str("Mass_Effect"),
            Some(TargetGroup::MassEffect)
        );
        assert_eq!(TargetGroup::from_str("sdh"), None);
    }

    #[test]
    fn test_scales() {
        assert_eq!(TargetGroup::Cistern.scale(), GroupScale::Normality);
        assert_eq!(
            TargetGroup::GrayWhiteDifferentiation.scale(),
            GroupScale::Normality
        );
        assert_eq!(TargetGroup::Hemorrhage.scale(), GroupScale::Presence);
    }

    #[test]
    fn test_only_pathology_is_derived() {
        let derived: Vec<_> = TargetGroup::ALL
            .iter()
            .filter(|g| g.is_derived())
            .collect();
        assert_eq!(derived, vec![&TargetGroup::IntracranialPathology]);
    }
}
