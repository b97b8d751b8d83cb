pub mod api;
pub mod cli;
pub mod error;
pub mod lexicon;
pub mod markup;
pub mod types;

#[cfg(feature = "python")]
pub mod python;

pub use api::ReportExtractor;
pub use cli::report::{TextReport, TsvReport};
pub use error::{MatchError, Result, SentenceAnnotationError, TbiError};
pub use lexicon::{Lexicon, ModifierDefinition, TargetDefinition, LEXICON_VERSION};
pub use markup::{ResolvedMention, SentenceAnnotation};
pub use types::*;
