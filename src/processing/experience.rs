//! Experience-level detection

use crate::processing::normalizer::TextNormalizer;
use regex::Regex;

pub const NOT_SPECIFIED: &str = "Not specified";

/// How a pattern turns its match into a label
enum LabelRule {
    /// "<captured number> years"
    Years,
    /// The whole matched phrase
    Phrase,
}

/// Applies seniority and years-of-experience patterns in priority order
pub struct ExperienceExtractor {
    normalizer: TextNormalizer,
    patterns: Vec<(Regex, LabelRule)>,
}

impl Default for ExperienceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ExperienceExtractor {
    pub fn new() -> Self {
        let patterns = vec![
            (
                Regex::new(r"(\d+)\+?\s*(?:years|yrs)\s*(?:experience|exp)")
                    .expect("Invalid years regex"),
                LabelRule::Years,
            ),
            (
                Regex::new(r"\b(?:senior|lead|principal)(?:\s+\w+){1,2}")
                    .expect("Invalid senior regex"),
                LabelRule::Phrase,
            ),
            (
                Regex::new(r"\b(?:junior|entry level|associate)(?:\s+\w+){1,2}")
                    .expect("Invalid junior regex"),
                LabelRule::Phrase,
            ),
            (
                Regex::new(r"\b(?:mid level|mid-level|mid senior|mid-senior)(?:\s+\w+){1,2}")
                    .expect("Invalid mid-level regex"),
                LabelRule::Phrase,
            ),
        ];

        Self {
            normalizer: TextNormalizer::new(),
            patterns,
        }
    }

    /// Label from the first pattern that matches, or "Not specified"
    pub fn extract(&self, text: &str) -> String {
        let normalized = self.normalizer.normalize(text);

        for (regex, rule) in &self.patterns {
            let Some(caps) = regex.captures(&normalized) else {
                continue;
            };
            return match rule {
                LabelRule::Years => format!("{} years", &caps[1]),
                LabelRule::Phrase => caps[0].to_string(),
            };
        }

        NOT_SPECIFIED.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_years_pattern() {
        let extractor = ExperienceExtractor::new();

        assert_eq!(extractor.extract("Senior Python Developer with 5+ years experience"), "5 years");
        assert_eq!(extractor.extract("Requires 10 yrs exp in Go"), "10 years");
        assert_eq!(extractor.extract("3years experience"), "3 years");
    }

    #[test]
    fn test_seniority_phrases() {
        let extractor = ExperienceExtractor::new();

        assert_eq!(extractor.extract("We want a Senior Backend Engineer, remote"), "senior backend engineer");
        assert_eq!(extractor.extract("Principal Architect."), "principal architect");
        assert_eq!(extractor.extract("Junior developer wanted"), "junior developer wanted");
        assert_eq!(extractor.extract("Entry level analyst"), "entry level analyst");
        assert_eq!(extractor.extract("mid-level data engineer needed now"), "mid-level data engineer");
    }

    #[test]
    fn test_priority_order() {
        let extractor = ExperienceExtractor::new();

        // junior appears first in the text but senior outranks it
        assert_eq!(extractor.extract("junior folks welcome, senior staff engineer leads"), "senior staff engineer");
    }

    #[test]
    fn test_prefix_must_start_a_word() {
        let extractor = ExperienceExtractor::new();
        assert_eq!(extractor.extract("Misleading numbers everywhere"), NOT_SPECIFIED);
    }

    #[test]
    fn test_not_specified() {
        let extractor = ExperienceExtractor::new();

        assert_eq!(extractor.extract(""), NOT_SPECIFIED);
        assert_eq!(extractor.extract("Build great software with us"), NOT_SPECIFIED);
        assert_eq!(extractor.extract("5 years of experience"), NOT_SPECIFIED);
    }
}
