/// Splits report text into sentences
pub trait SentenceSplitter {
    /// Returns the sentences of `text` in order, trimmed, without empty ones
    fn split<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

/// Abbreviations whose trailing period never ends a sentence
const DEFAULT_ABBREVIATIONS: &[&str] = &[
    "dr.", "mr.", "mrs.", "ms.", "e.g.", "i.e.", "vs.", "approx.", "cf.", "st.", "fig.", "sr.",
];

/// Rule-based sentence splitter
///
/// A sentence ends at `.`, `!` or `?` followed by whitespace or the end of
/// the text, unless the word before the period is a known abbreviation. A
/// blank line also ends a sentence. Fragments without any letter (list
/// numbers, stray punctuation) are dropped.
#[derive(Debug, Clone)]
pub struct RuleSplitter {
    abbreviations: Vec<String>,
}

impl Default for RuleSplitter {
    fn default() -> Self {
        Self {
            abbreviations: DEFAULT_ABBREVIATIONS.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl RuleSplitter {
    /// Builder: Adds an abbreviation such as `"approx."`
    pub fn with_abbreviation(mut self, abbreviation: &str) -> Self {
        self.abbreviations.push(abbreviation.to_lowercase());
        self
    }

    fn ends_with_abbreviation(&self, segment: &str) -> bool {
        let last_word = segment
            .rsplit(char::is_whitespace)
            .next()
            .unwrap_or("")
            .trim_start_matches(['(', '[', '"', '\''])
            .to_lowercase();
        self.abbreviations.iter().any(|a| *a == last_word)
    }
}

impl SentenceSplitter for RuleSplitter {
    fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for (i, c) in text.char_indices() {
            let boundary = match c {
                '.' | '!' | '?' => {
                    let end = i + c.len_utf8();
                    let followed_by_space = text[end..].chars().next().map_or(true, char::is_whitespace);
                    if followed_by_space && !(c == '.' && self.ends_with_abbreviation(&text[start..end])) {
                        Some(end)
                    } else {
                        None
                    }
                }
                '\n' => {
                    let rest = text[i + 1..].trim_start_matches([' ', '\t', '\r']);
                    if rest.starts_with('\n') {
                        Some(i)
                    } else {
                        None
                    }
                }
                _ => None,
            };

            if let Some(end) = boundary {
                push_sentence(&mut sentences, &text[start..end]);
                start = end;
            }
        }
        push_sentence(&mut sentences, &text[start..]);

        sentences
    }
}

fn push_sentence<'a>(sentences: &mut Vec<&'a str>, candidate: &'a str) {
    let trimmed = candidate.trim();
    if trimmed.chars().any(char::is_alphabetic) {
        sentences.push(trimmed);
    }
}

/// Counts word tokens (maximal alphanumeric runs) in a piece of text
pub fn count_tokens(text: &str) -> usize {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_split_on_terminal_punctuation() {
        let text = "No acute hemorrhage. Mild mass effect! Is there a shift? No.";
        assert_eq!(
            RuleSplitter::default().split(text),
            vec![
                "No acute hemorrhage.",
                "Mild mass effect!",
                "Is there a shift?",
                "No."
            ]
        );
    }

    #[test]
    fn test_abbreviations_and_decimals_do_not_split() {
        let text = "Discussed with Dr. Smith. Lesion measures 3.5 cm, e.g. in the left lobe.";
        assert_eq!(
            RuleSplitter::default().split(text),
            vec![
                "Discussed with Dr. Smith.",
                "Lesion measures 3.5 cm, e.g. in the left lobe."
            ]
        );
    }

    #[test]
    fn test_blank_line_splits_and_numbers_dropped() {
        let text = "FINDINGS:\n\n1. Small subdural hematoma\n  \n2. No fracture";
        assert_eq!(
            RuleSplitter::default().split(text),
            vec!["FINDINGS:", "Small subdural hematoma", "No fracture"]
        );
    }

    #[test]
    fn test_single_newline_does_not_split() {
        let text = "There is a small\nsubdural hematoma.";
        assert_eq!(RuleSplitter::default().split(text), vec![text]);
    }

    #[test]
    fn test_custom_abbreviation() {
        let splitter = RuleSplitter::default().with_abbreviation("Hx.");
        assert_eq!(splitter.split("Hx. of fall. Scan done."), vec!["Hx. of fall.", "Scan done."]);
    }

    #[test]
    fn test_empty_text() {
        assert!(RuleSplitter::default().split("  \n\n ").is_empty());
    }

    #[rstest]
    #[case("", 0)]
    #[case("no evidence of", 3)]
    #[case(" , ", 0)]
    #[case("gray-white differentiation", 3)]
    #[case("a 3.5 cm", 4)]
    fn test_count_tokens(#[case] text: &str, #[case] expected: usize) {
        assert_eq!(count_tokens(text), expected);
    }
}
