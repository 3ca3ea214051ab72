use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read input file {path}: {source}")]
    InputFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed input file {path}: {reason}")]
    MalformedInput { path: PathBuf, reason: String },

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Embedding backend unavailable: {0}")]
    EmbeddingUnavailable(String),

    #[error("Ontology error: {0}")]
    Ontology(String),

    #[error("PDF rendering error: {0}")]
    Pdf(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Report not found: {0}")]
    ReportNotFound(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
