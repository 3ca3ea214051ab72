pub mod provider;
pub mod http;
#[cfg(feature = "local-embeddings")]
pub mod local;

use std::sync::Arc;

use crate::config::{Config, EmbeddingBackend};

pub use provider::EmbeddingProvider;
pub use http::HttpEmbeddingProvider;
#[cfg(feature = "local-embeddings")]
pub use local::FastEmbedProvider;

/// Build the configured embedding backend.
///
/// Returns `None` (literal-only extraction) when embeddings are disabled or the
/// backend cannot be initialized.
pub async fn build_provider(config: &Config) -> Option<Arc<dyn EmbeddingProvider>> {
    match config.embedding_backend {
        EmbeddingBackend::Disabled => {
            tracing::info!("Embedding stage disabled, using literal skill matching only");
            None
        }
        EmbeddingBackend::Http => {
            let url = config.embedding_url.clone()?;
            match HttpEmbeddingProvider::new(
                url,
                config.embedding_model.clone(),
                config.embedding_api_key.clone(),
            ) {
                Ok(provider) => Some(Arc::new(provider)),
                Err(e) => {
                    tracing::warn!("HTTP embedding backend unavailable: {}", e);
                    None
                }
            }
        }
        EmbeddingBackend::FastEmbed => build_local(config).await,
    }
}

#[cfg(feature = "local-embeddings")]
async fn build_local(config: &Config) -> Option<Arc<dyn EmbeddingProvider>> {
    let model_name = config.embedding_model.clone();
    let cache_dir = config.model_cache_dir.clone();
    let loaded =
        tokio::task::spawn_blocking(move || FastEmbedProvider::new(&model_name, cache_dir)).await;

    match loaded {
        Ok(Ok(provider)) => Some(Arc::new(provider)),
        Ok(Err(e)) => {
            tracing::warn!(
                "Local embedding model unavailable, falling back to literal matching: {}",
                e
            );
            None
        }
        Err(e) => {
            tracing::warn!("Embedding model loader panicked: {}", e);
            None
        }
    }
}

#[cfg(not(feature = "local-embeddings"))]
async fn build_local(_config: &Config) -> Option<Arc<dyn EmbeddingProvider>> {
    tracing::warn!("Built without the local-embeddings feature, using literal skill matching only");
    None
}

/// Scale `v` to unit length in place. Zero vectors are left untouched.
pub fn normalize(v: &mut [f32]) {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > f32::EPSILON {
        v.iter_mut().for_each(|x| *x /= norm);
    }
}

/// Dot product; equals cosine similarity for normalized vectors.
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
