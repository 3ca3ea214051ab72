use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbeddingBackend {
    FastEmbed,
    Http,
    Disabled,
}

impl EmbeddingBackend {
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "fastembed" | "local" => Ok(EmbeddingBackend::FastEmbed),
            "http" | "remote" => Ok(EmbeddingBackend::Http),
            "none" | "off" | "disabled" => Ok(EmbeddingBackend::Disabled),
            other => Err(Error::Config(format!(
                "Unknown embedding backend '{}' (expected fastembed, http or none)",
                other
            ))),
        }
    }
}

impl std::fmt::Display for EmbeddingBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmbeddingBackend::FastEmbed => write!(f, "fastembed"),
            EmbeddingBackend::Http => write!(f, "http"),
            EmbeddingBackend::Disabled => write!(f, "none"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub embedding_backend: EmbeddingBackend,
    pub embedding_model: String,
    pub embedding_url: Option<String>,
    pub embedding_api_key: Option<String>,
    pub model_cache_dir: PathBuf,
    pub ontology_path: Option<PathBuf>,
    pub concurrency_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        let output_dir = env::var("OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("outputs"));

        let embedding_backend = match env::var("EMBEDDING_BACKEND") {
            Ok(v) => EmbeddingBackend::parse(&v)?,
            Err(_) => EmbeddingBackend::FastEmbed,
        };

        let embedding_model =
            env::var("EMBEDDING_MODEL").unwrap_or_else(|_| "all-MiniLM-L6-v2".to_string());

        let embedding_url = env::var("EMBEDDING_URL").ok().filter(|v| !v.is_empty());
        let embedding_api_key = env::var("EMBEDDING_API_KEY").ok().filter(|v| !v.is_empty());

        if embedding_backend == EmbeddingBackend::Http && embedding_url.is_none() {
            return Err(Error::Config(
                "EMBEDDING_URL must be set when EMBEDDING_BACKEND=http".to_string(),
            ));
        }

        let model_cache_dir = env::var("MODEL_CACHE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".models"));

        let ontology_path = env::var("ONTOLOGY_PATH").ok().map(PathBuf::from);

        let concurrency_limit = env::var("CONCURRENCY_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|v: &usize| *v > 0)
            .unwrap_or(4);

        Ok(Self {
            data_dir,
            output_dir,
            embedding_backend,
            embedding_model,
            embedding_url,
            embedding_api_key,
            model_cache_dir,
            ontology_path,
            concurrency_limit,
        })
    }

    pub fn layout(&self) -> OutputLayout {
        OutputLayout::new(&self.output_dir)
    }
}

/// Locations of the pipeline's input fixtures.
#[derive(Debug, Clone)]
pub struct InputPaths {
    pub candidates: PathBuf,
    pub market: PathBuf,
    pub conversations: PathBuf,
}

impl InputPaths {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            candidates: data_dir.join("candidates.json"),
            market: data_dir.join("market_data.json"),
            conversations: data_dir.join("conversations.json"),
        }
    }
}

/// Directory tree the agents write into and the dashboard reads from.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    pub talent: PathBuf,
    pub assessments: PathBuf,
    pub behavioral: PathBuf,
    pub market: PathBuf,
    pub pdfs: PathBuf,
    /// Default target of the dashboard CSV export.
    pub exports: PathBuf,
}

impl OutputLayout {
    pub fn new(root: &Path) -> Self {
        let reports = root.join("reports");
        Self {
            talent: reports.clone(),
            assessments: root.join("assessments"),
            behavioral: reports.join("behavioral"),
            market: reports.join("market"),
            pdfs: reports.join("pdfs"),
            exports: root.join("exports"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub inputs: InputPaths,
    pub layout: OutputLayout,
    pub concurrency_limit: usize,
    pub render_pdfs: bool,
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            inputs: InputPaths::new(&config.data_dir),
            layout: config.layout(),
            concurrency_limit: config.concurrency_limit,
            render_pdfs: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_backend() {
        assert_eq!(EmbeddingBackend::parse("FastEmbed").unwrap(), EmbeddingBackend::FastEmbed);
        assert_eq!(EmbeddingBackend::parse("http").unwrap(), EmbeddingBackend::Http);
        assert_eq!(EmbeddingBackend::parse("none").unwrap(), EmbeddingBackend::Disabled);
        assert!(EmbeddingBackend::parse("word2vec").is_err());
    }

    #[test]
    fn test_output_layout() {
        let layout = OutputLayout::new(Path::new("outputs"));
        assert_eq!(layout.talent, PathBuf::from("outputs/reports"));
        assert_eq!(layout.assessments, PathBuf::from("outputs/assessments"));
        assert_eq!(layout.behavioral, PathBuf::from("outputs/reports/behavioral"));
        assert_eq!(layout.market, PathBuf::from("outputs/reports/market"));
        assert_eq!(layout.pdfs, PathBuf::from("outputs/reports/pdfs"));
        assert_eq!(layout.exports, PathBuf::from("outputs/exports"));

        let layout = OutputLayout::new(Path::new("/srv/talent"));
        assert_eq!(layout.exports, PathBuf::from("/srv/talent/exports"));
    }
}
