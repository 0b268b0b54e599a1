//! Keyword frequency comparison between a job description and a resume

use crate::config::HeatmapConfig;
use crate::processing::normalizer::{token_len, TextNormalizer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Frequent but uninformative job-posting words
pub const HEATMAP_STOPWORDS: &[&str] = &[
    "experience", "years", "development", "software", "engineer", "developer",
    "skills", "ability", "knowledge",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapEntry {
    pub keyword: String,
    pub jd_frequency: usize,
    pub resume_frequency: usize,
    /// resume_frequency / jd_frequency, capped at 1
    pub match_ratio: f64,
}

/// Token counts that remember first-occurrence order
#[derive(Debug, Default)]
struct FrequencyTable {
    counts: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    fn from_tokens(tokens: impl IntoIterator<Item = String>) -> Self {
        let mut table = Self::default();
        for token in tokens {
            match table.index.get(&token) {
                Some(&i) => table.counts[i].1 += 1,
                None => {
                    table.index.insert(token.clone(), table.counts.len());
                    table.counts.push((token, 1));
                }
            }
        }
        table
    }

    fn get(&self, token: &str) -> usize {
        self.index.get(token).map(|&i| self.counts[i].1).unwrap_or(0)
    }

    /// Highest counts first; equal counts keep first-seen order
    fn most_common(&self, n: usize) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .counts
            .iter()
            .map(|(token, count)| (token.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}

pub struct HeatmapGenerator {
    normalizer: TextNormalizer,
    config: HeatmapConfig,
}

impl Default for HeatmapGenerator {
    fn default() -> Self {
        Self::new(HeatmapConfig::default())
    }
}

impl HeatmapGenerator {
    pub fn new(config: HeatmapConfig) -> Self {
        Self {
            normalizer: TextNormalizer::new(),
            config,
        }
    }

    pub fn generate(&self, resume_text: &str, jd_text: &str) -> Vec<HeatmapEntry> {
        if resume_text.is_empty() || jd_text.is_empty() {
            return Vec::new();
        }

        let resume_freq = FrequencyTable::from_tokens(self.keyword_tokens(resume_text));
        let jd_freq = FrequencyTable::from_tokens(self.keyword_tokens(jd_text));

        // Stopwords are dropped after the top-N cut, so they still use up slots
        jd_freq
            .most_common(self.config.top_keywords)
            .into_iter()
            .filter(|(word, count)| *count > 1 && !HEATMAP_STOPWORDS.contains(word))
            .map(|(keyword, jd_count)| {
                let resume_count = resume_freq.get(keyword);
                let ratio = resume_count as f64 / jd_count.max(1) as f64;
                HeatmapEntry {
                    keyword: keyword.to_string(),
                    jd_frequency: jd_count,
                    resume_frequency: resume_count,
                    match_ratio: ratio.min(1.0),
                }
            })
            .collect()
    }

    fn keyword_tokens(&self, text: &str) -> Vec<String> {
        self.normalizer
            .tokenize(text)
            .into_iter()
            .filter(|token| token_len(token) >= self.config.min_keyword_length)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(entries: &[HeatmapEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.keyword.as_str()).collect()
    }

    #[test]
    fn test_empty_inputs() {
        let generator = HeatmapGenerator::default();

        assert!(generator.generate("", "integration integration").is_empty());
        assert!(generator.generate("integration", "").is_empty());
    }

    #[test]
    fn test_integration_ratio() {
        let generator = HeatmapGenerator::default();
        let jd = "API integration work. Integration testing and integration monitoring.";
        let resume = "Led an integration project";

        let entries = generator.generate(resume, jd);
        let entry = entries.iter().find(|e| e.keyword == "integration").unwrap();

        assert_eq!(entry.jd_frequency, 3);
        assert_eq!(entry.resume_frequency, 1);
        assert!((entry.match_ratio - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_ratio_capped_at_one() {
        let generator = HeatmapGenerator::default();
        let entries = generator.generate("kafka kafka kafka kafka", "kafka streams, kafka connect");

        assert_eq!(keywords(&entries), vec!["kafka"]);
        assert_eq!(entries[0].resume_frequency, 4);
        assert_eq!(entries[0].match_ratio, 1.0);
    }

    #[test]
    fn test_excludes_stopwords_short_tokens_and_singletons() {
        let generator = HeatmapGenerator::default();
        let jd = "skills skills skills ability ability java java java cloud cloud \
                  python python monitoring";

        let entries = generator.generate("python", jd);

        // java is four characters, monitoring appears once
        assert_eq!(keywords(&entries), vec!["cloud", "python"]);
    }

    #[test]
    fn test_order_by_frequency_then_first_seen() {
        let generator = HeatmapGenerator::default();
        let jd = "alpha1 bravo2 bravo2 charlie3 alpha1 charlie3 charlie3 delta4 delta4";

        let entries = generator.generate("delta4", jd);

        assert_eq!(keywords(&entries), vec!["charlie3", "alpha1", "bravo2", "delta4"]);
        assert!(entries.windows(2).all(|w| w[0].jd_frequency >= w[1].jd_frequency));
    }

    #[test]
    fn test_top_n_cut_happens_before_filtering() {
        let generator = HeatmapGenerator::new(HeatmapConfig {
            top_keywords: 2,
            min_keyword_length: 5,
        });
        let jd = "skills skills skills kafka kafka redis5 redis5";

        let entries = generator.generate("kafka", jd);

        assert_eq!(keywords(&entries), vec!["kafka"]);
    }
}
