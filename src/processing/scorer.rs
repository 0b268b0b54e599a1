//! Match scoring between a resume and a job description

use crate::config::ScoringConfig;
use crate::error::Result;
use crate::processing::dictionary::{SkillDictionary, TitleDictionary};
use crate::processing::experience::{ExperienceExtractor, NOT_SPECIFIED};
use crate::processing::extractor::{SkillExtractor, SkillSet, TitleExtractor, TitleSet};
use crate::processing::normalizer::{token_len, TextNormalizer};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Tokens too generic to count as shared keywords in the fallback path
pub const FALLBACK_STOPWORDS: &[&str] = &[
    "experience", "years", "development", "software", "engineer", "developer",
];

/// Shared tokens must be longer than this to count
const FALLBACK_MIN_TOKEN_LEN: usize = 4;

/// Which formula produced the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringPath {
    /// One side was empty
    Degenerate,
    /// Skill overlap plus title and experience bonuses
    Skills,
    /// Job description named no known skill; shared keywords only
    KeywordFallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: u8,
    pub matched: SkillSet,
    pub missing: SkillSet,
    pub extra: SkillSet,
    /// Titles found in the job description
    pub titles: TitleSet,
    pub resume_titles: TitleSet,
    pub experience_level: String,
    pub scoring_path: ScoringPath,
}

impl MatchResult {
    /// Zero score and empty collections for an empty resume or job description
    pub fn degenerate() -> Self {
        Self {
            score: 0,
            matched: SkillSet::new(),
            missing: SkillSet::new(),
            extra: SkillSet::new(),
            titles: TitleSet::new(),
            resume_titles: TitleSet::new(),
            experience_level: NOT_SPECIFIED.to_string(),
            scoring_path: ScoringPath::Degenerate,
        }
    }
}

/// Blends skill overlap, title overlap and an experience bonus into 0-100
pub struct MatchScorer {
    skills: SkillExtractor,
    titles: TitleExtractor,
    experience: ExperienceExtractor,
    normalizer: TextNormalizer,
    weights: ScoringConfig,
}

impl MatchScorer {
    pub fn new(
        skill_dictionary: &SkillDictionary,
        title_dictionary: &TitleDictionary,
        weights: ScoringConfig,
    ) -> Result<Self> {
        Ok(Self {
            skills: SkillExtractor::new(skill_dictionary)?,
            titles: TitleExtractor::new(title_dictionary)?,
            experience: ExperienceExtractor::new(),
            normalizer: TextNormalizer::new(),
            weights,
        })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(
            &SkillDictionary::builtin(),
            &TitleDictionary::builtin(),
            ScoringConfig::default(),
        )
    }

    pub fn skill_extractor(&self) -> &SkillExtractor {
        &self.skills
    }

    pub fn score(&self, resume_text: &str, jd_text: &str) -> MatchResult {
        if resume_text.is_empty() || jd_text.is_empty() {
            return MatchResult::degenerate();
        }

        let resume_skills = self.skills.extract(resume_text);
        let jd_skills = self.skills.extract(jd_text);
        let resume_titles = self.titles.extract(resume_text);
        let jd_titles = self.titles.extract(jd_text);
        let experience_level = self.experience.extract(jd_text);

        let matched: SkillSet = resume_skills.intersection(&jd_skills).cloned().collect();
        let missing: SkillSet = jd_skills.difference(&resume_skills).cloned().collect();
        let extra: SkillSet = resume_skills.difference(&jd_skills).cloned().collect();

        debug!(
            "skills: resume={} jd={} matched={}; titles: resume={} jd={}",
            resume_skills.len(),
            jd_skills.len(),
            matched.len(),
            resume_titles.len(),
            jd_titles.len()
        );

        let (score, scoring_path) = if jd_skills.is_empty() {
            let common = self.shared_keywords(resume_text, jd_text);
            debug!("no known skills in job description, {} shared keywords", common.len());
            let base = (common.len() as f64 * self.weights.fallback_points_per_keyword)
                .min(self.weights.fallback_cap)
                .round();
            (clamp_score(base), ScoringPath::KeywordFallback)
        } else {
            let title_bonus = if !jd_titles.is_empty()
                && !resume_titles.is_empty()
                && !jd_titles.is_disjoint(&resume_titles)
            {
                self.weights.title_bonus
            } else {
                0.0
            };
            let base = matched.len() as f64 / jd_skills.len() as f64 * self.weights.skill_weight;
            let total = (base + title_bonus + self.weights.experience_bonus).round();
            (clamp_score(total), ScoringPath::Skills)
        };

        MatchResult {
            score,
            matched,
            missing,
            extra,
            titles: jd_titles,
            resume_titles,
            experience_level,
            scoring_path,
        }
    }

    /// Distinct tokens of both texts, minus short and generic ones
    pub fn shared_keywords(&self, resume_text: &str, jd_text: &str) -> BTreeSet<String> {
        let jd_words: BTreeSet<String> = self.normalizer.tokenize(jd_text).into_iter().collect();
        let resume_words: BTreeSet<String> = self.normalizer.tokenize(resume_text).into_iter().collect();

        jd_words
            .intersection(&resume_words)
            .filter(|word| token_len(word) > FALLBACK_MIN_TOKEN_LEN)
            .filter(|word| !FALLBACK_STOPWORDS.contains(&word.as_str()))
            .cloned()
            .collect()
    }
}

fn clamp_score(value: f64) -> u8 {
    value.clamp(0.0, 100.0) as u8
}
