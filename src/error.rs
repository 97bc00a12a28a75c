//! Error handling for the resume ranker

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RankerError {
    #[error("No candidate documents were supplied")]
    EmptyBatch,

    #[error("Requirement text is empty or missing")]
    MissingRequirement,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Skill lexicon error: {0}")]
    Lexicon(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RankerError {
    /// Conditions the core reports to callers instead of recovering from.
    pub fn is_fatal_to_ranking(&self) -> bool {
        matches!(self, RankerError::EmptyBatch | RankerError::MissingRequirement)
    }
}

pub type Result<T> = std::result::Result<T, RankerError>;
