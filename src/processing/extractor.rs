//! Dictionary-driven skill and title extraction

use crate::error::Result;
use crate::processing::dictionary::{DictionaryEntry, SkillDictionary, TitleDictionary};
use crate::processing::normalizer::{is_word_char, TextNormalizer};
use aho_corasick::AhoCorasick;
use log::trace;
use std::collections::{BTreeSet, HashMap};

pub type SkillSet = BTreeSet<String>;
pub type TitleSet = BTreeSet<String>;

/// Whole-word matcher over every surface form of a dictionary.
///
/// A hit only counts when the characters on either side of it are not word
/// characters, so "java" never fires inside "javascript".
pub struct DictionaryMatcher {
    automaton: AhoCorasick,
    patterns: Vec<String>,
    // pattern index -> indices into `canonicals`
    owners: Vec<Vec<usize>>,
    canonicals: Vec<String>,
}

impl DictionaryMatcher {
    pub fn build<'a>(entries: impl IntoIterator<Item = &'a DictionaryEntry>) -> Result<Self> {
        let mut canonicals: Vec<String> = Vec::new();
        let mut canonical_index: HashMap<String, usize> = HashMap::new();
        let mut patterns: Vec<String> = Vec::new();
        let mut owners: Vec<Vec<usize>> = Vec::new();
        let mut pattern_index: HashMap<String, usize> = HashMap::new();

        for entry in entries {
            let owner = *canonical_index
                .entry(entry.canonical.clone())
                .or_insert_with(|| {
                    canonicals.push(entry.canonical.clone());
                    canonicals.len() - 1
                });

            for variant in entry.variants.iter().filter(|v| !v.is_empty()) {
                let idx = *pattern_index.entry(variant.clone()).or_insert_with(|| {
                    patterns.push(variant.clone());
                    owners.push(Vec::new());
                    patterns.len() - 1
                });
                if !owners[idx].contains(&owner) {
                    owners[idx].push(owner);
                }
            }
        }

        let automaton = AhoCorasick::new(&patterns)?;

        Ok(Self {
            automaton,
            patterns,
            owners,
            canonicals,
        })
    }

    /// Canonical names with at least one whole-word hit in `normalized`
    pub fn find(&self, normalized: &str) -> BTreeSet<String> {
        let mut found = vec![false; self.canonicals.len()];

        for mat in self.automaton.find_overlapping_iter(normalized) {
            let (start, end) = (mat.start(), mat.end());
            if !is_whole_word(normalized, start, end) {
                continue;
            }

            let pattern = mat.pattern().as_usize();
            trace!("dictionary hit '{}' at {}", self.patterns[pattern], start);
            for &owner in &self.owners[pattern] {
                found[owner] = true;
            }
        }

        found
            .iter()
            .zip(&self.canonicals)
            .filter(|(hit, _)| **hit)
            .map(|(_, name)| name.clone())
            .collect()
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
}

fn is_whole_word(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();

    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

/// Finds canonical skill names in free text
pub struct SkillExtractor {
    normalizer: TextNormalizer,
    matcher: DictionaryMatcher,
}

impl SkillExtractor {
    pub fn new(dictionary: &SkillDictionary) -> Result<Self> {
        Ok(Self {
            normalizer: TextNormalizer::new(),
            matcher: DictionaryMatcher::build(dictionary.entries())?,
        })
    }

    pub fn extract(&self, text: &str) -> SkillSet {
        let normalized = self.normalizer.normalize(text);
        self.extract_normalized(&normalized)
    }

    pub fn extract_normalized(&self, normalized: &str) -> SkillSet {
        if normalized.is_empty() {
            return SkillSet::new();
        }
        self.matcher.find(normalized)
    }

    pub fn pattern_count(&self) -> usize {
        self.matcher.pattern_count()
    }
}

/// Finds canonical job titles in free text
pub struct TitleExtractor {
    normalizer: TextNormalizer,
    matcher: DictionaryMatcher,
}

impl TitleExtractor {
    pub fn new(dictionary: &TitleDictionary) -> Result<Self> {
        Ok(Self {
            normalizer: TextNormalizer::new(),
            matcher: DictionaryMatcher::build(dictionary.entries())?,
        })
    }

    pub fn extract(&self, text: &str) -> TitleSet {
        let normalized = self.normalizer.normalize(text);
        if normalized.is_empty() {
            return TitleSet::new();
        }
        self.matcher.find(&normalized)
    }
}
