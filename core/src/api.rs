use crate::error::{Result, SentenceAnnotationError, TbiError};
use crate::lexicon::Lexicon;
use crate::markup::{
    DocumentAggregator, PatternMatcher, RegexMatcher, RuleSplitter, SentenceAnnotation,
    SentenceAnnotator, SentenceSplitter,
};
use crate::types::{ExtractionOptions, ReportResult};
use log::{debug, warn};

/// Main extractor for head CT report findings
///
/// Provides a high-level API that runs the whole markup pipeline on report
/// text: sentence splitting, sentence annotation, report aggregation and
/// phrase retention. The lexicon and matcher are built once and reused for
/// every report.
///
/// # Example
///
/// ```
/// use tbiextract_core::{ExtractionOptions, ModifierGroup, ReportExtractor, TargetGroup};
///
/// let options = ExtractionOptions::default()
///     .with_include_targets(["hemorrhage", "mass_effect", "pneumocephalus"])
///     .save_modifier_phrases(true);
/// let extractor = ReportExtractor::new(options).unwrap();
///
/// let result = extractor
///     .extract("No evidence of hemorrhage. There is mild mass effect.")
///     .unwrap();
///
/// assert_eq!(result.group_of(TargetGroup::Hemorrhage), Some(ModifierGroup::Absent));
/// assert_eq!(result.group_of(TargetGroup::MassEffect), Some(ModifierGroup::Present));
/// assert_eq!(result.group_of(TargetGroup::Pneumocephalus), Some(ModifierGroup::NotSpecified));
/// assert_eq!(
///     result.get(TargetGroup::Hemorrhage).unwrap().modifier_phrase().as_deref(),
///     Some("no evidence of")
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ReportExtractor<S = RuleSplitter, M = RegexMatcher> {
    options: ExtractionOptions,
    lexicon: Lexicon,
    splitter: S,
    matcher: M,
}

impl ReportExtractor {
    /// Creates an extractor over the built-in lexicon
    ///
    /// # Errors
    ///
    /// Returns an error before any text is processed if:
    /// - The options are contradictory (`Configuration`)
    /// - A target id is unknown or a pattern does not compile (`LexiconLoad`)
    pub fn new(options: ExtractionOptions) -> Result<Self> {
        Self::with_lexicon(options, Lexicon::builtin())
    }

    /// Creates an extractor over a custom lexicon
    pub fn with_lexicon(options: ExtractionOptions, lexicon: Lexicon) -> Result<Self> {
        let lexicon = lexicon.filtered(&options)?;
        let matcher = RegexMatcher::for_lexicon(&lexicon)?;
        Ok(Self {
            options,
            lexicon,
            splitter: RuleSplitter::default(),
            matcher,
        })
    }
}

impl<S: SentenceSplitter, M: PatternMatcher> ReportExtractor<S, M> {
    /// Assembles an extractor from explicit collaborators
    pub fn from_parts(options: ExtractionOptions, lexicon: Lexicon, splitter: S, matcher: M) -> Result<Self> {
        let lexicon = lexicon.filtered(&options)?;
        Ok(Self {
            options,
            lexicon,
            splitter,
            matcher,
        })
    }

    /// Replaces the sentence splitter
    pub fn with_splitter<T: SentenceSplitter>(self, splitter: T) -> ReportExtractor<T, M> {
        ReportExtractor {
            options: self.options,
            lexicon: self.lexicon,
            splitter,
            matcher: self.matcher,
        }
    }

    /// Extracts findings from an unnamed report
    pub fn extract(&self, text: &str) -> Result<ReportResult> {
        self.extract_report("-", text)
    }

    /// Extracts findings from one report
    ///
    /// Sentences that fail annotation are skipped, logged, and listed in
    /// [`ReportResult::warnings`].
    ///
    /// # Errors
    ///
    /// `Aggregation` if a report-level rule cannot be evaluated
    pub fn extract_report(&self, report_id: &str, text: &str) -> Result<ReportResult> {
        let (sentences, warnings) = self.annotate(report_id, text);

        let mut records = DocumentAggregator::new(&self.lexicon, &self.options)
            .aggregate(&sentences)
            .map_err(|e| match e {
                TbiError::Aggregation { concept, message } => TbiError::Aggregation {
                    concept,
                    message: format!("report {}: {}", report_id, message),
                },
                other => other,
            })?;

        for record in &mut records {
            if !self.options.save_target_phrases {
                record.target_phrases.clear();
            }
            if !self.options.save_modifier_phrases {
                record.modifier_phrases.clear();
            }
        }

        Ok(ReportResult { records, warnings })
    }

    /// Runs sentence splitting and annotation only
    ///
    /// Returns the annotations of every sentence that could be annotated and
    /// the errors of those that could not.
    pub fn annotate(
        &self,
        report_id: &str,
        text: &str,
    ) -> (Vec<SentenceAnnotation>, Vec<SentenceAnnotationError>) {
        let annotator = SentenceAnnotator::new(
            &self.lexicon,
            &self.matcher,
            self.options.max_modifier_distance,
        );

        let mut annotations = Vec::new();
        let mut warnings = Vec::new();
        let sentences = self.splitter.split(text);
        debug!("Report {}: {} sentences", report_id, sentences.len());

        for (index, sentence) in sentences.into_iter().enumerate() {
            match annotator.annotate(index, sentence) {
                Ok(annotation) => annotations.push(annotation),
                Err(e) => {
                    let e = e.in_report(report_id);
                    warn!("Skipping sentence: {}", e);
                    warnings.push(e);
                }
            }
        }

        (annotations, warnings)
    }

    pub fn options(&self) -> &ExtractionOptions {
        &self.options
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MatchError;
    use crate::markup::{derive_intracranial, Rule};
    use crate::types::{ModifierGroup, TargetGroup, TARGET_COUNT};

    const REPORT: &str = "HEAD CT WITHOUT CONTRAST.\n\n\
        FINDINGS: There is a small left subdural hematoma measuring 4 mm. \
        No evidence of epidural hemorrhage. Mild mass effect on the left lateral ventricle. \
        No mass effect on the fourth ventricle. The basal cisterns are patent. \
        Gray-white differentiation is preserved.\n\n\
        IMPRESSION: Small subdural hematoma. Possible contusion in the right frontal lobe.";

    /// Fails on every sentence containing "corrupt"
    struct FlakyMatcher(RegexMatcher);

    impl PatternMatcher for FlakyMatcher {
        fn find(
            &self,
            pattern: &str,
            text: &str,
        ) -> std::result::Result<Vec<(usize, usize)>, MatchError> {
            if text.contains("corrupt") {
                return Err(MatchError::Pattern {
                    pattern: pattern.to_string(),
                    message: "engine failure".to_string(),
                });
            }
            self.0.find(pattern, text)
        }
    }

    #[test]
    fn test_full_report() {
        let extractor = ReportExtractor::new(ExtractionOptions::with_phrases()).unwrap();
        let result = extractor.extract_report("ct-001", REPORT).unwrap();

        assert_eq!(result.len(), TARGET_COUNT);
        assert!(result.warnings.is_empty());
        assert_eq!(result.group_of(TargetGroup::SubduralHemorrhage), Some(ModifierGroup::Present));
        assert_eq!(result.group_of(TargetGroup::EpiduralHemorrhage), Some(ModifierGroup::Absent));
        assert_eq!(result.group_of(TargetGroup::MassEffect), Some(ModifierGroup::Present));
        assert_eq!(result.group_of(TargetGroup::Cistern), Some(ModifierGroup::Normal));
        assert_eq!(result.group_of(TargetGroup::GrayWhiteDifferentiation), Some(ModifierGroup::Normal));
        assert_eq!(result.group_of(TargetGroup::Contusion), Some(ModifierGroup::Suspected));
        assert_eq!(result.group_of(TargetGroup::Pneumocephalus), Some(ModifierGroup::NotSpecified));
        assert_eq!(result.group_of(TargetGroup::IntracranialPathology), Some(ModifierGroup::Present));

        let subdural = result.get(TargetGroup::SubduralHemorrhage).unwrap();
        assert_eq!(subdural.target_phrase().as_deref(), Some("subdural hematoma"));
    }

    #[test]
    fn test_mass_effect_duplicates_keep_both_phrases() {
        let options = ExtractionOptions::default()
            .with_include_targets(["mass_effect"])
            .save_modifier_phrases(true);
        let extractor = ReportExtractor::new(options).unwrap();
        let result = extractor
            .extract("No mass effect. There is mass effect on the ventricle.")
            .unwrap();

        let record = result.get(TargetGroup::MassEffect).unwrap();
        assert_eq!(record.modifier_group, ModifierGroup::Present);
        assert_eq!(record.modifier_phrase().as_deref(), Some("no, there is"));
        // target phrases were not requested
        assert_eq!(record.target_phrase(), None);
    }

    #[test]
    fn test_phrases_cleared_by_default() {
        let extractor = ReportExtractor::new(ExtractionOptions::default()).unwrap();
        let result = extractor.extract(REPORT).unwrap();
        for record in result.iter() {
            assert_eq!(record.target_phrase(), None);
            assert_eq!(record.modifier_phrase(), None);
        }
    }

    #[test]
    fn test_idempotent() {
        let extractor = ReportExtractor::new(ExtractionOptions::with_phrases()).unwrap();
        assert_eq!(extractor.extract(REPORT).unwrap(), extractor.extract(REPORT).unwrap());
    }

    #[test]
    fn test_omission_law() {
        let extractor = ReportExtractor::new(ExtractionOptions::with_phrases()).unwrap();
        let result = extractor.extract("The ventricles are normal in size.").unwrap();
        for group in [TargetGroup::Pneumocephalus, TargetGroup::Aneurysm, TargetGroup::Hemorrhage] {
            let record = result.get(group).unwrap();
            assert_eq!(record.modifier_group, ModifierGroup::NotSpecified);
            assert_eq!(record.target_phrase(), None);
        }
    }

    #[test]
    fn test_specific_hemorrhage_alone_is_intracranial_pathology() {
        let extractor = ReportExtractor::new(ExtractionOptions::default()).unwrap();
        for (text, subtype) in [
            ("Subdural hematoma is present. No hemorrhage elsewhere.", TargetGroup::SubduralHemorrhage),
            ("Small subdural hematoma.", TargetGroup::SubduralHemorrhage),
            ("Acute epidural hematoma is present.", TargetGroup::EpiduralHemorrhage),
        ] {
            let result = extractor.extract(text).unwrap();
            assert_eq!(result.group_of(subtype), Some(ModifierGroup::Present), "{}", text);
            assert_eq!(
                result.group_of(TargetGroup::IntracranialPathology),
                Some(ModifierGroup::Present),
                "{}",
                text
            );
        }
    }

    #[test]
    fn test_derivation_recomputable_from_result() {
        let extractor = ReportExtractor::new(ExtractionOptions::default()).unwrap();
        for text in [REPORT, "", "No acute intracranial hemorrhage. No hydrocephalus."] {
            let result = extractor.extract(text).unwrap();
            let constituents: Vec<_> = Rule::IntracranialPathology
                .constituents()
                .iter()
                .map(|g| result.group_of(*g).unwrap())
                .collect();
            assert_eq!(
                result.group_of(TargetGroup::IntracranialPathology),
                Some(derive_intracranial(&constituents))
            );
        }
    }

    #[test]
    fn test_include_and_exclude_is_configuration_error() {
        let options = ExtractionOptions::default()
            .with_include_targets(["aneurysm"])
            .with_exclude_targets(["contusion"]);
        assert!(matches!(ReportExtractor::new(options), Err(TbiError::Configuration(_))));
    }

    #[test]
    fn test_failed_sentence_is_skipped_with_warning() {
        let lexicon = Lexicon::builtin();
        let matcher = FlakyMatcher(RegexMatcher::for_lexicon(&lexicon).unwrap());
        let extractor = ReportExtractor::from_parts(
            ExtractionOptions::default(),
            lexicon,
            RuleSplitter::default(),
            matcher,
        )
        .unwrap();

        let result = extractor
            .extract_report("ct-002", "Acute subdural hematoma. corrupt no hemorrhage.")
            .unwrap();
        assert_eq!(result.group_of(TargetGroup::SubduralHemorrhage), Some(ModifierGroup::Present));
        assert_eq!(result.group_of(TargetGroup::Hemorrhage), Some(ModifierGroup::NotSpecified));
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].report, "ct-002");
        assert_eq!(result.warnings[0].sentence_index, 1);
    }

    #[test]
    fn test_custom_splitter() {
        struct LineSplitter;
        impl SentenceSplitter for LineSplitter {
            fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
                text.lines().collect()
            }
        }

        let extractor = ReportExtractor::new(ExtractionOptions::default())
            .unwrap()
            .with_splitter(LineSplitter);
        let (sentences, _) = extractor.annotate("-", "no hemorrhage\nsubdural hematoma present");
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[1].mentions[0].modifier_group, Some(ModifierGroup::Present));
    }

    #[test]
    fn test_extractor_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReportExtractor>();
    }
}
