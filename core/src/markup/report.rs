//! Report-level markup
//!
//! Merges the sentence annotations of one report into one record per
//! concept: collect, resolve duplicates, fill omissions, normalize onto each
//! concept's scale, then apply revision and derivation rules.

use super::rules::{apply_rules, Rule};
use super::sentence::{ResolvedMention, SentenceAnnotation};
use crate::error::Result;
use crate::lexicon::Lexicon;
use crate::types::{
    DuplicatePolicy, ExtractionOptions, ModifierGroup, TargetAnnotationRecord, TargetGroup,
};
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

/// Builds report records from sentence annotations
pub struct DocumentAggregator<'a> {
    lexicon: &'a Lexicon,
    policy: DuplicatePolicy,
    synthesize_derived_phrases: bool,
}

impl<'a> DocumentAggregator<'a> {
    pub fn new(lexicon: &'a Lexicon, options: &ExtractionOptions) -> Self {
        Self {
            lexicon,
            policy: options.duplicate_policy,
            synthesize_derived_phrases: options.synthesize_derived_phrases,
        }
    }

    /// Aggregates the annotations of one report
    ///
    /// Returns one record per requested concept, in requested order.
    /// Concepts that rules depend on are resolved internally even when they
    /// are not requested.
    ///
    /// # Errors
    ///
    /// `Aggregation` if a rule references a concept the lexicon cannot resolve
    pub fn aggregate(&self, sentences: &[SentenceAnnotation]) -> Result<Vec<TargetAnnotationRecord>> {
        let needed = self.needed_groups();

        let mut mentions: BTreeMap<TargetGroup, Vec<&ResolvedMention>> = BTreeMap::new();
        for sentence in sentences {
            for mention in sentence.mentions.iter().filter(|m| m.is_evidence()) {
                mentions.entry(mention.target_group).or_default().push(mention);
            }
        }

        let mut records = BTreeMap::new();
        for group in &needed {
            let record = match mentions.get(group) {
                Some(evidence) if !group.is_derived() => self.resolve_duplicates(*group, evidence),
                _ => TargetAnnotationRecord::not_specified(*group),
            };
            records.insert(*group, record);
        }

        apply_rules(&mut records, self.synthesize_derived_phrases)?;

        let output: Vec<_> = self
            .lexicon
            .requested()
            .iter()
            .map(|group| {
                records
                    .remove(group)
                    .unwrap_or_else(|| TargetAnnotationRecord::not_specified(*group))
            })
            .collect();

        debug!(
            "Aggregated {} sentences: {} of {} concepts specified",
            sentences.len(),
            output.iter().filter(|r| r.modifier_group.is_specified()).count(),
            output.len()
        );

        Ok(output)
    }

    /// Requested concepts plus every concept their rules read, transitively
    ///
    /// Concepts without a definition in the lexicon are left out so that a
    /// rule reading them fails loudly.
    fn needed_groups(&self) -> BTreeSet<TargetGroup> {
        let mut needed = BTreeSet::new();
        let mut pending: Vec<TargetGroup> = self.lexicon.requested().to_vec();

        while let Some(group) = pending.pop() {
            if self.lexicon.target(group).is_none() || !needed.insert(group) {
                continue;
            }
            if let Some(rule) = Rule::for_target(group) {
                pending.extend_from_slice(rule.constituents());
            }
        }

        needed
    }

    /// Picks one group for a concept from all of its evidenced mentions
    fn resolve_duplicates(
        &self,
        group: TargetGroup,
        evidence: &[&ResolvedMention],
    ) -> TargetAnnotationRecord {
        let groups: Vec<ModifierGroup> = evidence.iter().filter_map(|m| m.modifier_group).collect();
        let candidates = match self.policy {
            DuplicatePolicy::Precedence => groups,
            DuplicatePolicy::MajorityVote => most_frequent(&groups),
        };

        let resolved = ModifierGroup::most_preferred(&candidates, group.report_precedence())
            .unwrap_or(ModifierGroup::NotSpecified);

        let mut record = TargetAnnotationRecord::not_specified(group);
        record.modifier_group = group.scale().normalize(resolved);
        for mention in evidence {
            TargetAnnotationRecord::push_unique(&mut record.target_phrases, &mention.target_phrase);
            if let Some(phrase) = &mention.modifier_phrase {
                TargetAnnotationRecord::push_unique(&mut record.modifier_phrases, phrase);
            }
        }
        record
    }
}

/// Groups sharing the highest mention count
fn most_frequent(groups: &[ModifierGroup]) -> Vec<ModifierGroup> {
    let mut counts: BTreeMap<ModifierGroup, usize> = BTreeMap::new();
    for group in groups {
        *counts.entry(*group).or_default() += 1;
    }
    let top = counts.values().copied().max().unwrap_or(0);
    counts
        .into_iter()
        .filter(|(_, count)| *count == top)
        .map(|(group, _)| group)
        .collect()
}
