//! Input manager for handling different file types

use crate::config::InputConfig;
use crate::error::{Result, MatcherError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{TextExtractor, PdfExtractor, PlainTextExtractor, MarkdownExtractor, DocxExtractor};
use std::path::Path;
use std::collections::HashMap;
use log::{debug, info};

const BYTES_PER_MB: u64 = 1024 * 1024;

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
    max_file_size_mb: u64,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self::from_config(&InputConfig::default())
    }

    pub fn from_config(config: &InputConfig) -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: config.enable_cache,
            max_file_size_mb: config.max_file_size_mb,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub fn with_max_file_size_mb(mut self, limit: u64) -> Self {
        self.max_file_size_mb = limit;
        self
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(MatcherError::InvalidInput(
                format!("File does not exist: {}", path.display())
            ));
        }

        let file_type = self.detect_file_type(path)?;
        self.check_size(path).await?;

        let text = match file_type {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            },
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            },
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            },
            FileType::Docx => {
                info!("Extracting text from DOCX: {}", path.display());
                DocxExtractor.extract(path).await?
            },
            FileType::Unknown => {
                return Err(MatcherError::UnsupportedFormat(
                    format!("Unsupported file type for: {}", path.display())
                ));
            }
        };
        debug!("Extracted {} characters from {}", text.chars().count(), path.display());

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    /// Job description from exactly one of a file or inline text
    pub async fn job_description(&mut self, path: Option<&Path>, inline_text: Option<&str>) -> Result<String> {
        match (path, inline_text) {
            (Some(path), None) => self.extract_text(path).await,
            (None, Some(text)) => Ok(text.to_string()),
            (Some(_), Some(_)) => Err(MatcherError::InvalidInput(
                "Provide the job description as a file or as text, not both".to_string()
            )),
            (None, None) => Err(MatcherError::InvalidInput(
                "Please enter a job description".to_string()
            )),
        }
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| MatcherError::InvalidInput(
                format!("File has no extension: {}", path.display())
            ))?;

        Ok(FileType::from_extension(extension))
    }

    async fn check_size(&self, path: &Path) -> Result<()> {
        let size = tokio::fs::metadata(path).await?.len();
        if size > self.max_file_size_mb * BYTES_PER_MB {
            return Err(MatcherError::FileTooLarge {
                path: path.display().to_string(),
                size_mb: size as f64 / BYTES_PER_MB as f64,
                limit_mb: self.max_file_size_mb,
            });
        }
        Ok(())
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
