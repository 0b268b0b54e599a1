//! Analysis engine tying the extractors, scorer and heatmap together

use crate::config::Config;
use crate::error::{Result, MatcherError};
use crate::output::report::{AnalysisReport, ReportMetadata};
use crate::processing::dictionary::{SkillDictionary, TitleDictionary};
use crate::processing::heatmap::{HeatmapEntry, HeatmapGenerator};
use crate::processing::scorer::{MatchResult, MatchScorer};
use log::{debug, info};
use std::time::Instant;

pub const MISSING_RESUME_MESSAGE: &str = "Please upload a valid resume file (PDF, DOCX, TXT, or Markdown)";
pub const MISSING_JOB_MESSAGE: &str = "Please enter a job description";

/// Decoded inputs for one analysis, plus where they came from
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub resume_text: String,
    pub jd_text: String,
    pub resume_source: String,
    pub job_source: String,
}

impl AnalysisRequest {
    pub fn new(resume_text: impl Into<String>, jd_text: impl Into<String>) -> Self {
        Self {
            resume_text: resume_text.into(),
            jd_text: jd_text.into(),
            resume_source: "resume".to_string(),
            job_source: "job description".to_string(),
        }
    }

    pub fn with_sources(mut self, resume_source: impl Into<String>, job_source: impl Into<String>) -> Self {
        self.resume_source = resume_source.into();
        self.job_source = job_source.into();
        self
    }

    /// Reject the whole request before any scoring happens
    pub fn validate(&self) -> Result<()> {
        if self.resume_text.trim().is_empty() {
            return Err(MatcherError::InvalidInput(MISSING_RESUME_MESSAGE.to_string()));
        }
        if self.jd_text.trim().is_empty() {
            return Err(MatcherError::InvalidInput(MISSING_JOB_MESSAGE.to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct EngineStats {
    pub skill_count: usize,
    pub skill_patterns: usize,
    pub title_count: usize,
    pub heatmap_top_keywords: usize,
}

pub struct AnalysisEngine {
    scorer: MatchScorer,
    heatmap: HeatmapGenerator,
    stats: EngineStats,
}

impl AnalysisEngine {
    pub fn new(config: &Config) -> Result<Self> {
        let skills = SkillDictionary::builtin().with_custom_skills(&config.dictionary.custom_skills);
        let titles = TitleDictionary::builtin();
        Self::with_dictionaries(&skills, &titles, config)
    }

    pub fn with_dictionaries(skills: &SkillDictionary, titles: &TitleDictionary, config: &Config) -> Result<Self> {
        let scorer = MatchScorer::new(skills, titles, config.scoring.clone())?;
        let stats = EngineStats {
            skill_count: skills.skill_count(),
            skill_patterns: scorer.skill_extractor().pattern_count(),
            title_count: titles.title_count(),
            heatmap_top_keywords: config.heatmap.top_keywords,
        };
        debug!(
            "analysis engine ready: {} skills ({} surface forms), {} titles",
            stats.skill_count, stats.skill_patterns, stats.title_count
        );

        Ok(Self {
            scorer,
            heatmap: HeatmapGenerator::new(config.heatmap.clone()),
            stats,
        })
    }

    /// Score and heatmap for two decoded texts. Never fails.
    pub fn analyze(&self, resume_text: &str, jd_text: &str) -> (MatchResult, Vec<HeatmapEntry>) {
        let result = self.scorer.score(resume_text, jd_text);
        let heatmap = self.heatmap.generate(resume_text, jd_text);
        debug!(
            "score {} via {:?}, {} heatmap keywords",
            result.score,
            result.scoring_path,
            heatmap.len()
        );
        (result, heatmap)
    }

    pub fn analyze_request(&self, request: &AnalysisRequest) -> Result<AnalysisReport> {
        request.validate()?;
        info!(
            "Analyzing {} against {}",
            request.resume_source, request.job_source
        );

        let start = Instant::now();
        let (result, heatmap) = self.analyze(&request.resume_text, &request.jd_text);

        let mut metadata = ReportMetadata::new(&request.resume_source, &request.job_source);
        metadata.processing_time_ms = start.elapsed().as_millis() as u64;

        Ok(AnalysisReport::new(result, heatmap, metadata))
    }

    pub fn get_stats(&self) -> &EngineStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> AnalysisEngine {
        AnalysisEngine::new(&Config::default()).unwrap()
    }

    #[test]
    fn test_missing_resume_rejected() {
        let request = AnalysisRequest::new("  \n", "Python developer");
        match engine().analyze_request(&request) {
            Err(MatcherError::InvalidInput(msg)) => assert_eq!(msg, MISSING_RESUME_MESSAGE),
            other => panic!("expected invalid input, got {:?}", other.map(|r| r.match_score)),
        }
    }

    #[test]
    fn test_missing_job_rejected() {
        let request = AnalysisRequest::new("Python developer", "");
        match engine().analyze_request(&request) {
            Err(MatcherError::InvalidInput(msg)) => assert_eq!(msg, MISSING_JOB_MESSAGE),
            other => panic!("expected invalid input, got {:?}", other.map(|r| r.match_score)),
        }
    }

    #[test]
    fn test_analyze_degenerate_is_not_an_error() {
        let (result, heatmap) = engine().analyze("Python developer", "");
        assert_eq!(result, MatchResult::degenerate());
        assert!(heatmap.is_empty());
    }

    #[test]
    fn test_full_report() {
        let jd = "Backend developer. We use Python and Django daily. Python services, Django REST \
                  framework, PostgreSQL tuning. 3+ years experience.";
        let resume = "Backend developer: Python and Django services backed by PostgreSQL";
        let request = AnalysisRequest::new(resume, jd).with_sources("cv.txt", "posting.txt");

        let report = engine().analyze_request(&request).unwrap();

        // "postgresql" is also a surface form of sql
        assert_eq!(report.matched_skills, vec!["django", "postgresql", "python", "sql"]);
        assert_eq!(report.missing_skills, vec!["rest"]);
        assert_eq!(report.job_titles, vec!["backend developer", "software engineer"]);
        assert_eq!(report.experience_level, "3 years");
        // 4/5 * 80 + 15 + 5
        assert_eq!(report.match_score, 84);
        assert_eq!(report.metadata.resume_source, "cv.txt");

        let keywords: Vec<&str> = report.heatmap_data.iter().map(|e| e.keyword.as_str()).collect();
        assert!(keywords.contains(&"python"));
        assert!(keywords.contains(&"django"));
    }

    #[test]
    fn test_custom_skills_flow_into_scoring() {
        let mut config = Config::default();
        config
            .dictionary
            .custom_skills
            .insert("elixir".to_string(), vec!["elixir".to_string()]);
        let engine = AnalysisEngine::new(&config).unwrap();

        let (result, _) = engine.analyze("Elixir and OTP", "Elixir engineer");
        assert!(result.matched.contains("elixir"));
        assert!(engine.get_stats().skill_count > SkillDictionary::builtin().skill_count());
        assert_eq!(engine.get_stats().title_count, 10);
        assert_eq!(engine.get_stats().heatmap_top_keywords, 20);
    }

    #[test]
    fn test_custom_skills_with_stripped_characters_match() {
        let mut config = Config::default();
        let custom = &mut config.dictionary.custom_skills;
        custom.insert("f#".to_string(), vec!["F#".to_string()]);
        custom.insert("node js".to_string(), vec!["Node  JS".to_string()]);
        assert!(config.validate().is_ok());
        let engine = AnalysisEngine::new(&config).unwrap();

        let (result, _) = engine.analyze("F# and Node  JS dev", "F# and Node  JS engineer");

        assert!(result.matched.contains("f#"));
        assert!(result.matched.contains("node js"));
    }
}
