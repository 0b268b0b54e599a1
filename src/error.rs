//! Error handling for the resume matcher application

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatcherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("DOCX extraction error: {0}")]
    DocxExtraction(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("File too large: {path} is {size_mb:.1} MB (limit {limit_mb} MB)")]
    FileTooLarge {
        path: String,
        size_mb: f64,
        limit_mb: u64,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),

    #[error("Processing error: {0}")]
    Processing(String),
}

pub type Result<T> = std::result::Result<T, MatcherError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for MatcherError {
    fn from(err: anyhow::Error) -> Self {
        MatcherError::Processing(err.to_string())
    }
}

impl From<aho_corasick::BuildError> for MatcherError {
    fn from(err: aho_corasick::BuildError) -> Self {
        MatcherError::Processing(format!("Failed to build dictionary matcher: {}", err))
    }
}
