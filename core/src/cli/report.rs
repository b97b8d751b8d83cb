use crate::types::ReportResult;
use std::fmt;

/// Text report formatter for one report's findings
pub struct TextReport<'a> {
    report_id: &'a str,
    result: &'a ReportResult,
}

impl<'a> TextReport<'a> {
    /// Creates a new text report
    pub fn new(report_id: &'a str, result: &'a ReportResult) -> Self {
        Self { report_id, result }
    }
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = format!("Report {}", self.report_id);
        writeln!(f, "{}", title)?;
        writeln!(f, "{}", "=".repeat(title.len()))?;
        writeln!(f)?;

        for record in self.result.iter() {
            writeln!(
                f,
                "{:<29} {}",
                record.target_group.name(),
                record.modifier_group.simple_name()
            )?;
            if let Some(phrase) = record.target_phrase() {
                writeln!(f, "  Target:   {}", phrase)?;
            }
            if let Some(phrase) = record.modifier_phrase() {
                writeln!(f, "  Modifier: {}", phrase)?;
            }
        }

        if !self.result.warnings.is_empty() {
            writeln!(f)?;
            writeln!(f, "Skipped Sentences")?;
            writeln!(f, "-----------------")?;
            for warning in &self.result.warnings {
                writeln!(f, "{}: {}", warning.sentence_index, warning.message)?;
            }
        }

        Ok(())
    }
}

/// Tab-separated rows for one report, without a header
pub struct TsvReport<'a> {
    report_id: &'a str,
    result: &'a ReportResult,
}

impl<'a> TsvReport<'a> {
    pub const HEADER: &'static str =
        "report\ttarget_group\tmodifier_group\ttarget_phrase\tmodifier_phrase";

    pub fn new(report_id: &'a str, result: &'a ReportResult) -> Self {
        Self { report_id, result }
    }
}

impl<'a> fmt::Display for TsvReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in self.result.iter() {
            writeln!(
                f,
                "{}\t{}\t{}\t{}\t{}",
                self.report_id,
                record.target_group,
                record.modifier_group.simple_name().to_uppercase(),
                record.target_phrase().unwrap_or_default(),
                record.modifier_phrase().unwrap_or_default()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SentenceAnnotationError;
    use crate::types::{ModifierGroup, TargetAnnotationRecord, TargetGroup};

    fn sample() -> ReportResult {
        let mut hemorrhage = TargetAnnotationRecord::not_specified(TargetGroup::Hemorrhage);
        hemorrhage.modifier_group = ModifierGroup::Absent;
        hemorrhage.target_phrases = vec!["hemorrhage".to_string()];
        hemorrhage.modifier_phrases = vec!["no evidence of".to_string()];

        ReportResult {
            records: vec![
                hemorrhage,
                TargetAnnotationRecord::not_specified(TargetGroup::Pneumocephalus),
            ],
            warnings: vec![SentenceAnnotationError::new(2, "engine failure").in_report("ct-9")],
        }
    }

    #[test]
    fn test_text_report_format() {
        let result = sample();
        let output = format!("{}", TextReport::new("ct-9", &result));

        assert!(output.starts_with("Report ct-9\n===========\n"));
        assert!(output.contains(&format!("{:<29} absent", "hemorrhage")));
        assert!(output.contains("  Target:   hemorrhage"));
        assert!(output.contains("  Modifier: no evidence of"));
        assert!(output.contains(&format!("{:<29} not specified", "pneumocephalus")));
        assert!(output.contains("2: engine failure"));
    }

    #[test]
    fn test_tsv_rows() {
        let result = sample();
        let output = TsvReport::new("ct-9", &result).to_string();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "ct-9\themorrhage\tABSENT\themorrhage\tno evidence of");
        assert_eq!(lines[1], "ct-9\tpneumocephalus\tNOT SPECIFIED\t\t");
        assert_eq!(TsvReport::HEADER.split('\t').count(), 5);
    }

    #[test]
    fn test_tsv_row_per_record_with_wrapped_phrases() {
        let options = crate::types::ExtractionOptions::with_phrases()
            .with_include_targets(["subdural_hemorrhage"]);
        let extractor = crate::api::ReportExtractor::new(options).unwrap();
        let result = extractor
            .extract("There is a small subdural\nhematoma. Subdural hematoma is present.")
            .unwrap();

        let output = TsvReport::new("ct", &result).to_string();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 1);

        let fields: Vec<_> = lines[0].split('\t').collect();
        assert_eq!(fields.len(), 5);
        assert_eq!(fields[2], "PRESENT");
        assert_eq!(fields[3], "subdural hematoma");
    }
}
