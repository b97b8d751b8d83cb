use crate::error::{MatchError, Result, TbiError};
use crate::lexicon::{Lexicon, PatternDefinition};
use crate::types::Span;
use log::trace;
use regex::{Regex, RegexBuilder};
use std::cmp::Reverse;
use std::collections::HashMap;

/// Pattern-matching primitive used by the phrase matcher
///
/// Implementations return the byte ranges of every non-overlapping, non-empty
/// match of `pattern` in `text`, case-insensitively and on word boundaries.
pub trait PatternMatcher {
    fn find(&self, pattern: &str, text: &str) -> std::result::Result<Vec<(usize, usize)>, MatchError>;
}

/// Regex-backed matcher with a cache of precompiled lexicon patterns
///
/// Patterns not seen at construction are compiled on demand for each call.
#[derive(Debug, Clone, Default)]
pub struct RegexMatcher {
    compiled: HashMap<String, Regex>,
}

impl RegexMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Precompiles every pattern of a lexicon
    ///
    /// # Errors
    ///
    /// `LexiconLoad` naming the first pattern that does not compile
    pub fn for_lexicon(lexicon: &Lexicon) -> Result<Self> {
        let mut compiled = HashMap::new();
        for pattern in lexicon.all_patterns() {
            if compiled.contains_key(pattern) {
                continue;
            }
            let regex = compile(pattern).map_err(|e| {
                TbiError::LexiconLoad(format!("pattern '{}' does not compile: {}", pattern, e))
            })?;
            compiled.insert(pattern.to_string(), regex);
        }
        trace!("Compiled {} lexicon patterns", compiled.len());
        Ok(Self { compiled })
    }

    /// Number of cached patterns
    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }
}

impl PatternMatcher for RegexMatcher {
    fn find(&self, pattern: &str, text: &str) -> std::result::Result<Vec<(usize, usize)>, MatchError> {
        let ranges = |regex: &Regex| {
            regex
                .find_iter(text)
                .filter(|m| !m.is_empty())
                .map(|m| (m.start(), m.end()))
                .collect::<Vec<_>>()
        };

        match self.compiled.get(pattern) {
            Some(regex) => Ok(ranges(regex)),
            None => {
                let regex = compile(pattern).map_err(|e| MatchError::Pattern {
                    pattern: pattern.to_string(),
                    message: e.to_string(),
                })?;
                Ok(ranges(&regex))
            }
        }
    }
}

fn compile(pattern: &str) -> std::result::Result<Regex, regex::Error> {
    RegexBuilder::new(&format!(r"\b(?:{})\b", pattern))
        .case_insensitive(true)
        .build()
}

/// Matched spans of one sentence, ordered by start offset
///
/// Cloning the iterator restarts consumption from the clone's position.
#[derive(Debug, Clone)]
pub struct Spans(std::vec::IntoIter<Span>);

impl Spans {
    /// Remaining spans without consuming them
    pub fn as_slice(&self) -> &[Span] {
        self.0.as_slice()
    }
}

impl Iterator for Spans {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl ExactSizeIterator for Spans {}

/// Finds the spans of every definition in a sentence
///
/// All patterns of all definitions are run; where candidate matches overlap
/// the longest one wins, then (for modifiers) qualifiers over termination and
/// pseudo, then the earliest start, then declaration order. Matched text is
/// lowercased with internal whitespace collapsed to single spaces.
///
/// # Arguments
///
/// * `sentence` - Sentence text to search
/// * `definitions` - Targets or modifiers, in declaration order
/// * `matcher` - Pattern-matching primitive
///
/// # Returns
///
/// Pairwise disjoint spans with normalized text, ordered by start
pub fn find_spans<D, M>(
    sentence: &str,
    definitions: &[D],
    matcher: &M,
) -> std::result::Result<Spans, MatchError>
where
    D: PatternDefinition,
    M: PatternMatcher + ?Sized,
{
    let mut candidates = Vec::new();

    for (definition, def) in definitions.iter().enumerate() {
        for pattern in def.patterns() {
            for (start, end) in matcher.find(pattern, sentence)? {
                if start >= end
                    || end > sentence.len()
                    || !sentence.is_char_boundary(start)
                    || !sentence.is_char_boundary(end)
                {
                    return Err(MatchError::InvalidSpan {
                        pattern: pattern.clone(),
                        start,
                        end,
                        len: sentence.len(),
                    });
                }
                candidates.push(Span {
                    start,
                    end,
                    text: normalize_phrase(&sentence[start..end]),
                    definition,
                    kind: def.span_kind(),
                });
            }
        }
    }

    Ok(Spans(select_disjoint(candidates, true).into_iter()))
}

/// Lowercases a matched phrase and collapses runs of whitespace
fn normalize_phrase(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Greedy overlap resolution shared by matching and sentence pruning
///
/// With `tiered`, targets are ranked ahead of every modifier and, between
/// modifiers of equal length, qualifiers ahead of termination and pseudo.
/// Otherwise candidates rank by length descending, then start, then
/// definition index. A candidate survives only if it is disjoint from every
/// span already kept. The result is ordered by start.
pub(crate) fn select_disjoint(mut candidates: Vec<Span>, tiered: bool) -> Vec<Span> {
    candidates.sort_by_key(|span| {
        let tier = if tiered { span.kind.tier() } else { 0 };
        (
            tier.min(1),
            Reverse(span.len()),
            tier,
            span.start,
            span.definition,
        )
    });

    let mut kept: Vec<Span> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if kept.iter().all(|span| !span.overlaps(&candidate)) {
            kept.push(candidate);
        }
    }

    kept.sort_by_key(|span| (span.start, span.end));
    kept
}
