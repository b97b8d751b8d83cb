pub mod matcher;
pub mod report;
pub mod rules;
pub mod sentence;
pub mod splitter;

pub use matcher::{find_spans, PatternMatcher, RegexMatcher, Spans};
pub use report::DocumentAggregator;
pub use rules::{derive_intracranial, Rule};
pub use sentence::{
    link_scopes, prune_distance, prune_spans, resolve_mentions, ResolvedMention,
    SentenceAnnotation, SentenceAnnotator,
};
pub use splitter::{count_tokens, RuleSplitter, SentenceSplitter};
