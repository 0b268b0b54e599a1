//! Report structures handed to the formatters

use crate::processing::heatmap::HeatmapEntry;
use crate::processing::scorer::{MatchResult, ScoringPath};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One complete analysis, laid out in the JSON wire shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub match_score: u8,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub extra_skills: Vec<String>,
    pub job_titles: Vec<String>,
    pub experience_level: String,
    pub heatmap_data: Vec<HeatmapEntry>,

    /// Extra detail not needed by simple consumers
    pub details: ReportDetails,

    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDetails {
    pub resume_titles: Vec<String>,
    pub scoring_path: ScoringPath,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub resume_source: String,
    pub job_source: String,
    pub matcher_version: String,
    pub processing_time_ms: u64,
}

impl ReportMetadata {
    pub fn new(resume_source: impl Into<String>, job_source: impl Into<String>) -> Self {
        Self {
            generated_at: Utc::now(),
            resume_source: resume_source.into(),
            job_source: job_source.into(),
            matcher_version: env!("CARGO_PKG_VERSION").to_string(),
            processing_time_ms: 0,
        }
    }
}

/// Coarse verdict for a match score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    Excellent,
    VeryGood,
    Good,
    Fair,
    BelowAverage,
    Poor,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => ScoreBand::Excellent,
            80..=89 => ScoreBand::VeryGood,
            70..=79 => ScoreBand::Good,
            60..=69 => ScoreBand::Fair,
            50..=59 => ScoreBand::BelowAverage,
            _ => ScoreBand::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent",
            ScoreBand::VeryGood => "Very Good",
            ScoreBand::Good => "Good",
            ScoreBand::Fair => "Fair",
            ScoreBand::BelowAverage => "Below Average",
            ScoreBand::Poor => "Poor",
        }
    }

    pub fn verdict(&self) -> &'static str {
        match self {
            ScoreBand::Excellent | ScoreBand::VeryGood => "Strong match for this posting",
            ScoreBand::Good | ScoreBand::Fair => "Reasonable match, some gaps to close",
            ScoreBand::BelowAverage | ScoreBand::Poor => "Weak match, tailor the resume before applying",
        }
    }
}

impl AnalysisReport {
    pub fn new(result: MatchResult, heatmap: Vec<HeatmapEntry>, metadata: ReportMetadata) -> Self {
        Self {
            match_score: result.score,
            matched_skills: result.matched.into_iter().collect(),
            missing_skills: result.missing.into_iter().collect(),
            extra_skills: result.extra.into_iter().collect(),
            job_titles: result.titles.into_iter().collect(),
            experience_level: result.experience_level,
            heatmap_data: heatmap,
            details: ReportDetails {
                resume_titles: result.resume_titles.into_iter().collect(),
                scoring_path: result.scoring_path,
            },
            metadata,
        }
    }

    pub fn score_band(&self) -> ScoreBand {
        ScoreBand::from_score(self.match_score)
    }

    /// Share of the job description's skills that the resume covers
    pub fn skill_coverage(&self) -> Option<f64> {
        let total = self.matched_skills.len() + self.missing_skills.len();
        if total == 0 {
            None
        } else {
            Some(self.matched_skills.len() as f64 / total as f64)
        }
    }
}
