//! Text normalization and tokenization

use regex::Regex;

/// Lowercases text, blanks out characters outside the allow-list and
/// collapses whitespace. Every extractor runs its input through this first.
pub struct TextNormalizer {
    disallowed_regex: Regex,
    whitespace_regex: Regex,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    pub fn new() -> Self {
        // Word characters, whitespace, comma, hyphen, period and slash survive
        let disallowed_regex = Regex::new(r"[^\w\s,\-./]")
            .expect("Invalid disallowed-character regex");

        let whitespace_regex = Regex::new(r"\s+")
            .expect("Invalid whitespace regex");

        Self {
            disallowed_regex,
            whitespace_regex,
        }
    }

    /// Normalize text for dictionary and pattern matching.
    ///
    /// Idempotent: normalizing an already-normalized string returns it unchanged.
    pub fn normalize(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let lowered = text.to_lowercase();
        let stripped = self.disallowed_regex.replace_all(&lowered, " ");
        let collapsed = self.whitespace_regex.replace_all(&stripped, " ");

        collapsed.trim().to_string()
    }

    /// Normalize and split on whitespace
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.normalize(text)
            .split(' ')
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Length of a token in characters, not bytes
pub fn token_len(token: &str) -> usize {
    token.chars().count()
}

/// Whether `c` counts as part of a word for boundary checks
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
