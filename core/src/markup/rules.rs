//! Report-level revision and derivation rules
//!
//! Each rule is keyed by the concept it rewrites and is a pure function of
//! the finalized groups of its constituent concepts.

use crate::error::{Result, TbiError};
use crate::types::{ModifierGroup, TargetAnnotationRecord, TargetGroup};
use log::debug;
use std::collections::BTreeMap;

const SPECIFIC_HEMORRHAGES: &[TargetGroup] = &[
    TargetGroup::EpiduralHemorrhage,
    TargetGroup::SubarachnoidHemorrhage,
    TargetGroup::SubduralHemorrhage,
];

const INTRACRANIAL_CONSTITUENTS: &[TargetGroup] = &[
    TargetGroup::GrayWhiteDifferentiation,
    TargetGroup::Cistern,
    TargetGroup::Hydrocephalus,
    TargetGroup::Pneumocephalus,
    TargetGroup::MidlineShift,
    TargetGroup::MassEffect,
    TargetGroup::DiffuseAxonal,
    TargetGroup::Anoxic,
    TargetGroup::Herniation,
    TargetGroup::Aneurysm,
    TargetGroup::Contusion,
    TargetGroup::Fluid,
    TargetGroup::Swelling,
    TargetGroup::Ischemia,
    TargetGroup::Hemorrhage,
    TargetGroup::EpiduralHemorrhage,
    TargetGroup::SubarachnoidHemorrhage,
    TargetGroup::SubduralHemorrhage,
    TargetGroup::IntraventricularHemorrhage,
    TargetGroup::IntraparenchymalHemorrhage,
];

/// A concept-specific rule applied after duplicate resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Hemorrhage is absent when a specific hemorrhage subtype explains it
    SpecificHemorrhage,
    /// A specific hemorrhage implies an extra-axial fluid collection
    ExtraaxialFluidCollection,
    /// Umbrella concept over the intracranial findings
    IntracranialPathology,
}

impl Rule {
    /// Rules in application order; revisions before derivations
    pub const ALL: [Rule; 3] = [
        Rule::SpecificHemorrhage,
        Rule::ExtraaxialFluidCollection,
        Rule::IntracranialPathology,
    ];

    /// Looks up the rule that rewrites a concept
    pub fn for_target(group: TargetGroup) -> Option<Rule> {
        match group {
            TargetGroup::Hemorrhage => Some(Rule::SpecificHemorrhage),
            TargetGroup::Fluid => Some(Rule::ExtraaxialFluidCollection),
            TargetGroup::IntracranialPathology => Some(Rule::IntracranialPathology),
            _ => None,
        }
    }

    /// Concept rewritten by this rule
    pub fn target(&self) -> TargetGroup {
        match self {
            Rule::SpecificHemorrhage => TargetGroup::Hemorrhage,
            Rule::ExtraaxialFluidCollection => TargetGroup::Fluid,
            Rule::IntracranialPathology => TargetGroup::IntracranialPathology,
        }
    }

    /// Concepts whose finalized groups the rule reads
    pub fn constituents(&self) -> &'static [TargetGroup] {
        match self {
            Rule::SpecificHemorrhage | Rule::ExtraaxialFluidCollection => SPECIFIC_HEMORRHAGES,
            Rule::IntracranialPathology => INTRACRANIAL_CONSTITUENTS,
        }
    }

    /// Tag appended to the modifier phrases of a rewritten record
    pub fn tag(&self) -> &'static str {
        match self {
            Rule::SpecificHemorrhage => "is_specific_hemorrhage",
            Rule::ExtraaxialFluidCollection => "is_extraaxial_fluid_collection",
            Rule::IntracranialPathology => "is_intracranial_pathology",
        }
    }

    /// Whether the rule computes its concept rather than revising evidence
    pub fn is_derivation(&self) -> bool {
        matches!(self, Rule::IntracranialPathology)
    }

    /// Evaluates the rule over the constituent groups
    ///
    /// Returns the new group, or `None` when the rule does not fire.
    /// Derivations always fire.
    pub fn evaluate(&self, constituents: &[ModifierGroup]) -> Option<ModifierGroup> {
        let any = |wanted: &[ModifierGroup]| constituents.iter().any(|g| wanted.contains(g));
        match self {
            Rule::SpecificHemorrhage => any(&[ModifierGroup::Present, ModifierGroup::Suspected])
                .then_some(ModifierGroup::Absent),
            Rule::ExtraaxialFluidCollection => {
                any(&[ModifierGroup::Present]).then_some(ModifierGroup::Present)
            }
            Rule::IntracranialPathology => Some(derive_intracranial(constituents)),
        }
    }
}

/// Umbrella value over the constituent groups
///
/// PRESENT if any constituent is present or abnormal, else SUSPECTED, else
/// INDETERMINATE, else ABSENT if any is absent or normal, else NOT SPECIFIED.
pub fn derive_intracranial(constituents: &[ModifierGroup]) -> ModifierGroup {
    let any = |wanted: &[ModifierGroup]| constituents.iter().any(|g| wanted.contains(g));

    if any(&[ModifierGroup::Present, ModifierGroup::Abnormal]) {
        ModifierGroup::Present
    } else if any(&[ModifierGroup::Suspected]) {
        ModifierGroup::Suspected
    } else if any(&[ModifierGroup::Indeterminate]) {
        ModifierGroup::Indeterminate
    } else if any(&[ModifierGroup::Absent, ModifierGroup::Normal]) {
        ModifierGroup::Absent
    } else {
        ModifierGroup::NotSpecified
    }
}

/// Whether a constituent group drove a derived value
fn drives(derived: ModifierGroup, constituent: ModifierGroup) -> bool {
    match derived {
        ModifierGroup::Present => {
            matches!(constituent, ModifierGroup::Present | ModifierGroup::Abnormal)
        }
        ModifierGroup::Absent => matches!(constituent, ModifierGroup::Absent | ModifierGroup::Normal),
        ModifierGroup::NotSpecified => false,
        other => constituent == other,
    }
}

/// Applies every rule whose concept has a record, in rule order
///
/// Revisions only touch concepts that already carry evidence. Derived
/// records are recomputed from scratch; with `synthesize_phrases` their
/// target phrases list the constituents that drove the value.
///
/// # Errors
///
/// `Aggregation` if a constituent of an applicable rule has no record
pub fn apply_rules(
    records: &mut BTreeMap<TargetGroup, TargetAnnotationRecord>,
    synthesize_phrases: bool,
) -> Result<()> {
    for rule in Rule::ALL {
        let target = rule.target();
        let Some(current) = records.get(&target).map(|r| r.modifier_group) else {
            continue;
        };

        let constituents = rule
            .constituents()
            .iter()
            .map(|group| {
                records
                    .get(group)
                    .map(|r| (*group, r.modifier_group))
                    .ok_or_else(|| TbiError::Aggregation {
                        concept: target.to_string(),
                        message: format!("constituent {} was not resolved", group),
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        let groups: Vec<_> = constituents.iter().map(|(_, g)| *g).collect();

        if rule.is_derivation() {
            let derived = rule.evaluate(&groups).unwrap_or(ModifierGroup::NotSpecified);
            let mut record = TargetAnnotationRecord::not_specified(target);
            record.modifier_group = derived;
            if synthesize_phrases && derived.is_specified() {
                for (group, value) in &constituents {
                    if drives(derived, *value) {
                        TargetAnnotationRecord::push_unique(&mut record.target_phrases, group.name());
                    }
                }
                TargetAnnotationRecord::push_unique(&mut record.modifier_phrases, rule.tag());
            }
            debug!("Derived {} = {}", target, derived);
            records.insert(target, record);
        } else if current.is_specified() {
            if let Some(revised) = rule.evaluate(&groups) {
                if let Some(record) = records.get_mut(&target) {
                    debug!("Revised {} from {} to {} ({})", target, current, revised, rule.tag());
                    record.modifier_group = revised;
                    TargetAnnotationRecord::push_unique(&mut record.modifier_phrases, rule.tag());
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn records(groups: &[(TargetGroup, ModifierGroup)]) -> BTreeMap<TargetGroup, TargetAnnotationRecord> {
        let mut records: BTreeMap<_, _> = TargetGroup::ALL
            .iter()
            .map(|g| (*g, TargetAnnotationRecord::not_specified(*g)))
            .collect();
        for (group, value) in groups {
            records.get_mut(group).unwrap().modifier_group = *value;
        }
        records
    }

    #[rstest]
    #[case(&[], ModifierGroup::NotSpecified)]
    #[case(&[ModifierGroup::Absent, ModifierGroup::Normal], ModifierGroup::Absent)]
    #[case(&[ModifierGroup::Absent, ModifierGroup::Indeterminate], ModifierGroup::Indeterminate)]
    #[case(&[ModifierGroup::Indeterminate, ModifierGroup::Suspected], ModifierGroup::Suspected)]
    #[case(&[ModifierGroup::Suspected, ModifierGroup::Abnormal], ModifierGroup::Present)]
    #[case(&[ModifierGroup::NotSpecified, ModifierGroup::Present], ModifierGroup::Present)]
    fn test_derive_intracranial(#[case] groups: &[ModifierGroup], #[case] expected: ModifierGroup) {
        assert_eq!(derive_intracranial(groups), expected);
    }

    #[test]
    fn test_rule_lookup() {
        assert_eq!(Rule::for_target(TargetGroup::Fluid), Some(Rule::ExtraaxialFluidCollection));
        assert_eq!(Rule::for_target(TargetGroup::Contusion), None);
        for rule in Rule::ALL {
            assert_eq!(Rule::for_target(rule.target()), Some(rule));
            assert!(!rule.constituents().contains(&rule.target()));
        }
    }

    #[test]
    fn test_specific_hemorrhage_revises_hemorrhage_and_fluid() {
        let mut records = records(&[
            (TargetGroup::Hemorrhage, ModifierGroup::Present),
            (TargetGroup::Fluid, ModifierGroup::Absent),
            (TargetGroup::SubduralHemorrhage, ModifierGroup::Present),
        ]);
        apply_rules(&mut records, false).unwrap();

        let hemorrhage = &records[&TargetGroup::Hemorrhage];
        assert_eq!(hemorrhage.modifier_group, ModifierGroup::Absent);
        assert_eq!(hemorrhage.modifier_phrases, vec!["is_specific_hemorrhage"]);
        assert_eq!(records[&TargetGroup::Fluid].modifier_group, ModifierGroup::Present);
        // fluid now counts toward the umbrella
        assert_eq!(
            records[&TargetGroup::IntracranialPathology].modifier_group,
            ModifierGroup::Present
        );
    }

    #[test]
    fn test_revisions_skip_unevidenced_concepts() {
        let mut records = records(&[(TargetGroup::EpiduralHemorrhage, ModifierGroup::Present)]);
        apply_rules(&mut records, false).unwrap();
        assert_eq!(records[&TargetGroup::Hemorrhage].modifier_group, ModifierGroup::NotSpecified);
        assert_eq!(records[&TargetGroup::Fluid].modifier_group, ModifierGroup::NotSpecified);
        assert!(records[&TargetGroup::Fluid].modifier_phrases.is_empty());
    }

    #[test]
    fn test_suspected_subtype_only_revises_hemorrhage() {
        let mut records = records(&[
            (TargetGroup::Hemorrhage, ModifierGroup::Present),
            (TargetGroup::Fluid, ModifierGroup::Absent),
            (TargetGroup::SubarachnoidHemorrhage, ModifierGroup::Suspected),
        ]);
        apply_rules(&mut records, false).unwrap();
        assert_eq!(records[&TargetGroup::Hemorrhage].modifier_group, ModifierGroup::Absent);
        assert_eq!(records[&TargetGroup::Fluid].modifier_group, ModifierGroup::Absent);
    }

    #[test]
    fn test_specific_hemorrhage_drives_umbrella_without_fluid() {
        let mut records = records(&[
            (TargetGroup::Hemorrhage, ModifierGroup::Absent),
            (TargetGroup::SubduralHemorrhage, ModifierGroup::Present),
        ]);
        apply_rules(&mut records, true).unwrap();

        assert_eq!(records[&TargetGroup::Fluid].modifier_group, ModifierGroup::NotSpecified);
        let derived = &records[&TargetGroup::IntracranialPathology];
        assert_eq!(derived.modifier_group, ModifierGroup::Present);
        assert_eq!(derived.target_phrase().as_deref(), Some("subdural_hemorrhage"));
    }

    #[test]
    fn test_synthesized_phrases() {
        let mut records = records(&[
            (TargetGroup::Cistern, ModifierGroup::Abnormal),
            (TargetGroup::MassEffect, ModifierGroup::Present),
            (TargetGroup::Swelling, ModifierGroup::Absent),
        ]);
        apply_rules(&mut records, true).unwrap();

        let derived = &records[&TargetGroup::IntracranialPathology];
        assert_eq!(derived.modifier_group, ModifierGroup::Present);
        assert_eq!(derived.target_phrase().as_deref(), Some("cistern, mass_effect"));
        assert_eq!(derived.modifier_phrase().as_deref(), Some("is_intracranial_pathology"));
    }

    #[test]
    fn test_missing_constituent_is_aggregation_error() {
        let mut records = records(&[]);
        records.remove(&TargetGroup::Swelling);
        match apply_rules(&mut records, false) {
            Err(TbiError::Aggregation { concept, message }) => {
                assert_eq!(concept, "intracranial_pathology");
                assert!(message.contains("swelling"));
            }
            other => panic!("expected aggregation error, got {:?}", other),
        }
    }
}
