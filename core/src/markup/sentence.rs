//! Sentence-level markup
//!
//! Turns the raw spans of one sentence into resolved mentions in four
//! stages: span pruning, scope linking, distance pruning and category
//! conflict resolution. Every stage is a free function over the
//! offset-ordered span list so it can be exercised on its own.

use super::matcher::{find_spans, select_disjoint, PatternMatcher};
use super::splitter::count_tokens;
use crate::error::SentenceAnnotationError;
use crate::lexicon::Lexicon;
use crate::types::{
    LinkDirection, ModifierCategory, ModifierGroup, ModifierLink, Span, SpanKind, TargetGroup,
    SENTENCE_PRECEDENCE,
};
use log::trace;
use std::collections::BTreeMap;

/// One target span of a sentence with its resolved modifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMention {
    /// Index of the target span in [`SentenceAnnotation::spans`]
    pub span: usize,

    pub target_group: TargetGroup,

    /// Matched target text, lowercased
    pub target_phrase: String,

    /// `None` when no modifier survived linking and pruning
    pub modifier_group: Option<ModifierGroup>,

    /// Literal of the modifier definition that decided the group
    pub modifier_phrase: Option<String>,
}

impl ResolvedMention {
    /// Whether this mention counts as evidence at report level
    pub fn is_evidence(&self) -> bool {
        self.modifier_group.is_some()
    }
}

/// Evidence graph of one sentence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceAnnotation {
    /// Zero-based position of the sentence in its report
    pub index: usize,
    pub text: String,
    /// Surviving spans, disjoint and ordered by offset
    pub spans: Vec<Span>,
    /// Surviving links, one per (target, category)
    pub links: Vec<ModifierLink>,
    /// One entry per surviving target span
    pub mentions: Vec<ResolvedMention>,
}

/// Annotates single sentences against a lexicon
///
/// # Example
///
/// ```
/// use tbiextract_core::markup::{RegexMatcher, SentenceAnnotator};
/// use tbiextract_core::{ExtractionOptions, Lexicon, ModifierGroup, TargetGroup};
///
/// let lexicon = Lexicon::load(&ExtractionOptions::default()).unwrap();
/// let matcher = RegexMatcher::for_lexicon(&lexicon).unwrap();
/// let annotator = SentenceAnnotator::new(&lexicon, &matcher, 8);
///
/// let sentence = annotator.annotate(0, "No evidence of hemorrhage.").unwrap();
/// assert_eq!(sentence.mentions[0].target_group, TargetGroup::Hemorrhage);
/// assert_eq!(sentence.mentions[0].modifier_group, Some(ModifierGroup::Absent));
/// ```
pub struct SentenceAnnotator<'a, M: PatternMatcher + ?Sized> {
    lexicon: &'a Lexicon,
    matcher: &'a M,
    max_distance: usize,
}

impl<'a, M: PatternMatcher + ?Sized> SentenceAnnotator<'a, M> {
    pub fn new(lexicon: &'a Lexicon, matcher: &'a M, max_distance: usize) -> Self {
        Self {
            lexicon,
            matcher,
            max_distance,
        }
    }

    /// Runs all four stages on one sentence
    ///
    /// # Errors
    ///
    /// `SentenceAnnotationError` if the matcher fails on any pattern
    pub fn annotate(
        &self,
        index: usize,
        sentence: &str,
    ) -> Result<SentenceAnnotation, SentenceAnnotationError> {
        let to_error = |e: crate::error::MatchError| SentenceAnnotationError::new(index, e.to_string());

        let mut candidates: Vec<Span> =
            find_spans(sentence, self.lexicon.targets(), self.matcher)
                .map_err(to_error)?
                .collect();
        candidates.extend(
            find_spans(sentence, self.lexicon.modifiers(), self.matcher).map_err(to_error)?,
        );

        let candidate_count = candidates.len();
        let spans = prune_spans(candidates);
        let links = link_scopes(sentence, &spans);
        let linked = links.len();
        let links = prune_distance(links, self.max_distance);
        let mentions = resolve_mentions(self.lexicon, &spans, &links);

        trace!(
            "Sentence {}: {} candidate spans, {} kept, {} links ({} after pruning), {} mentions",
            index,
            candidate_count,
            spans.len(),
            linked,
            links.len(),
            mentions.len()
        );

        Ok(SentenceAnnotation {
            index,
            text: sentence.to_string(),
            spans,
            links,
            mentions,
        })
    }
}

/// Stage 1: drops spans that overlap a higher-priority span
///
/// Targets are resolved first. Modifiers follow, longest first, with
/// termination and pseudo modifiers losing ties. The result is disjoint and
/// ordered by offset.
pub fn prune_spans(candidates: Vec<Span>) -> Vec<Span> {
    select_disjoint(candidates, true)
}

/// Stage 2: links every target to the modifiers whose scope reaches it
///
/// Walks backward and forward from each target over the offset-ordered
/// spans. A termination span ends the walk on its side; pseudo spans and
/// other targets are stepped over.
pub fn link_scopes(sentence: &str, spans: &[Span]) -> Vec<ModifierLink> {
    let mut links = Vec::new();

    for (target, target_span) in spans.iter().enumerate() {
        if !target_span.kind.is_target() {
            continue;
        }

        for modifier in (0..target).rev() {
            match spans[modifier].kind {
                SpanKind::Target(_) => continue,
                SpanKind::Modifier {
                    category: ModifierCategory::Termination,
                    ..
                } => break,
                SpanKind::Modifier {
                    category,
                    direction,
                } => {
                    if category.is_qualifier() && direction.reaches_forward() {
                        links.push(ModifierLink {
                            target,
                            modifier,
                            category,
                            distance: count_tokens(&sentence[spans[modifier].end..target_span.start]),
                            direction: LinkDirection::Forward,
                        });
                    }
                }
            }
        }

        for modifier in target + 1..spans.len() {
            match spans[modifier].kind {
                SpanKind::Target(_) => continue,
                SpanKind::Modifier {
                    category: ModifierCategory::Termination,
                    ..
                } => break,
                SpanKind::Modifier {
                    category,
                    direction,
                } => {
                    if category.is_qualifier() && direction.reaches_backward() {
                        links.push(ModifierLink {
                            target,
                            modifier,
                            category,
                            distance: count_tokens(&sentence[target_span.end..spans[modifier].start]),
                            direction: LinkDirection::Backward,
                        });
                    }
                }
            }
        }
    }

    links
}

/// Stage 3: applies the distance window and keeps the closest link per
/// (target, category)
///
/// Ties prefer the modifier that precedes the target, then the one that
/// starts earlier.
pub fn prune_distance(links: Vec<ModifierLink>, max_distance: usize) -> Vec<ModifierLink> {
    let mut closest: BTreeMap<(usize, ModifierCategory), ModifierLink> = BTreeMap::new();

    for link in links.into_iter().filter(|l| l.distance <= max_distance) {
        let key = (link.target, link.category);
        match closest.get(&key) {
            Some(kept) if link_rank(kept) <= link_rank(&link) => {}
            _ => {
                closest.insert(key, link);
            }
        }
    }

    let mut kept: Vec<_> = closest.into_values().collect();
    kept.sort_by_key(|l| (l.target, l.modifier));
    kept
}

fn link_rank(link: &ModifierLink) -> (usize, bool, usize) {
    (
        link.distance,
        link.direction == LinkDirection::Backward,
        link.modifier,
    )
}

/// Stage 4: picks one modifier group per target span
pub fn resolve_mentions(
    lexicon: &Lexicon,
    spans: &[Span],
    links: &[ModifierLink],
) -> Vec<ResolvedMention> {
    spans
        .iter()
        .enumerate()
        .filter_map(|(index, span)| match span.kind {
            SpanKind::Target(group) => Some((index, span, group)),
            SpanKind::Modifier { .. } => None,
        })
        .map(|(index, span, target_group)| {
            let winner = links
                .iter()
                .filter(|l| l.target == index)
                .filter_map(|l| l.category.group().map(|g| (g, l)))
                .min_by_key(|(group, link)| (group.rank_in(&SENTENCE_PRECEDENCE), link.modifier));

            let (modifier_group, modifier_phrase) = match winner {
                Some((group, link)) => {
                    let literal = lexicon
                        .modifiers()
                        .get(spans[link.modifier].definition)
                        .map(|m| m.literal.clone())
                        .unwrap_or_else(|| spans[link.modifier].text.clone());
                    (Some(group), Some(literal))
                }
                None => (None, None),
            };

            ResolvedMention {
                span: index,
                target_group,
                target_phrase: span.text.clone(),
                modifier_group,
                modifier_phrase,
            }
        })
        .collect()
}
