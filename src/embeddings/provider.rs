use async_trait::async_trait;

use crate::error::Result;

/// A sentence embedding backend.
///
/// Implementations return one vector per input text, in input order.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>>;
    fn name(&self) -> &str;
}
