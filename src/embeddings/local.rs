//! Local ONNX sentence embeddings through fastembed.
//!
//! The model is downloaded into `<cache_dir>/models` on first use and kept
//! behind a mutex because `TextEmbedding::embed` needs `&mut self`.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fastembed::{InitOptions, TextEmbedding};

use crate::embeddings::provider::EmbeddingProvider;
use crate::error::{Error, Result};

pub struct FastEmbedProvider {
    model: Arc<Mutex<TextEmbedding>>,
    model_name: String,
}

impl FastEmbedProvider {
    /// Load (and download if needed) the named model. Blocking.
    pub fn new(model_name: &str, cache_dir: PathBuf) -> Result<Self> {
        let model_enum = parse_model_name(model_name)?;

        let models_dir = cache_dir.join("models");
        std::fs::create_dir_all(&models_dir)?;

        let options = InitOptions::new(model_enum)
            .with_cache_dir(models_dir)
            .with_show_download_progress(true);

        let model = TextEmbedding::try_new(options)
            .map_err(|e| Error::EmbeddingUnavailable(e.to_string()))?;

        tracing::info!("Loaded embedding model {}", model_name);

        Ok(Self {
            model: Arc::new(Mutex::new(model)),
            model_name: model_name.to_string(),
        })
    }
}

#[async_trait]
impl EmbeddingProvider for FastEmbedProvider {
    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let model = Arc::clone(&self.model);
        tokio::task::spawn_blocking(move || {
            let mut model = model.lock().map_err(|e| {
                Error::Embedding(format!("Failed to acquire model lock: {}", e))
            })?;
            model
                .embed(texts, None)
                .map_err(|e| Error::Embedding(e.to_string()))
        })
        .await
        .map_err(|e| Error::Embedding(format!("Embedding task failed: {}", e)))?
    }

    fn name(&self) -> &str {
        &self.model_name
    }
}

fn parse_model_name(name: &str) -> Result<fastembed::EmbeddingModel> {
    match name.to_lowercase().as_str() {
        "all-minilm-l6-v2" | "allminiml6v2" => Ok(fastembed::EmbeddingModel::AllMiniLML6V2),
        "all-minilm-l6-v2-q" | "allminiml6v2q" => Ok(fastembed::EmbeddingModel::AllMiniLML6V2Q),
        "bge-small-en-v1.5" | "bgesmallenv15" => Ok(fastembed::EmbeddingModel::BGESmallENV15),
        "bge-base-en-v1.5" | "bgebaseenv15" => Ok(fastembed::EmbeddingModel::BGEBaseENV15),
        _ => Err(Error::Config(format!(
            "Unknown embedding model: {}. Supported: all-MiniLM-L6-v2, bge-small-en-v1.5, bge-base-en-v1.5 (add -q for quantized MiniLM)",
            name
        ))),
    }
}
