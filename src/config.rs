//! Configuration management for the resume matcher

use crate::error::{Result, MatcherError};
use crate::processing::normalizer::TextNormalizer;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub heatmap: HeatmapConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
    pub dictionary: DictionaryConfig,
}

/// Point values used by the match scorer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    /// Maximum points awarded for full skill coverage
    pub skill_weight: f64,
    pub title_bonus: f64,
    pub experience_bonus: f64,
    /// Points per shared keyword when the job description names no known skill
    pub fallback_points_per_keyword: f64,
    pub fallback_cap: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HeatmapConfig {
    pub top_keywords: usize,
    pub min_keyword_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub max_file_size_mb: u64,
    pub enable_cache: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

/// Extra skills merged into the built-in dictionary under the `custom` category
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryConfig {
    pub custom_skills: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            skill_weight: 80.0,
            title_bonus: 15.0,
            experience_bonus: 5.0,
            fallback_points_per_keyword: 5.0,
            fallback_cap: 80.0,
        }
    }
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            top_keywords: 20,
            min_keyword_length: 5,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 16,
            enable_cache: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Config {
    /// Load from `config_path`, writing defaults if no file exists yet
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("reading config file {}", config_path.display()))?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| MatcherError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| MatcherError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-matcher")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let scoring = &self.scoring;
        let weights = [
            ("scoring.skill_weight", scoring.skill_weight),
            ("scoring.title_bonus", scoring.title_bonus),
            ("scoring.experience_bonus", scoring.experience_bonus),
            ("scoring.fallback_points_per_keyword", scoring.fallback_points_per_keyword),
            ("scoring.fallback_cap", scoring.fallback_cap),
        ];
        for (key, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(MatcherError::Configuration(format!(
                    "{} must be a non-negative number, got {}",
                    key, value
                )));
            }
        }

        if self.heatmap.top_keywords == 0 {
            return Err(MatcherError::Configuration(
                "heatmap.top_keywords must be at least 1".to_string(),
            ));
        }

        // Variants are matched after normalization, so one made only of
        // stripped characters could never fire
        let normalizer = TextNormalizer::new();
        for (skill, variants) in &self.dictionary.custom_skills {
            let blank_variant = variants.iter().any(|v| normalizer.normalize(v).is_empty());
            let blank_name = variants.is_empty() && normalizer.normalize(skill).is_empty();
            if skill.trim().is_empty() || blank_variant || blank_name {
                return Err(MatcherError::Configuration(format!(
                    "custom skill '{}' has an empty name or a variant with no matchable characters",
                    skill
                )));
            }
        }

        Ok(())
    }
}
