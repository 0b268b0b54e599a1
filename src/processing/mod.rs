//! Text analysis pipeline: normalization, extraction, scoring and heatmap

pub mod normalizer;
pub mod dictionary;
pub mod extractor;
pub mod experience;
pub mod scorer;
pub mod heatmap;
pub mod analyzer;
