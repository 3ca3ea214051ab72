use std::sync::Arc;

use crate::embeddings::{self, EmbeddingProvider};
use crate::error::{Error, Result};
use crate::models::skill::{MatchSource, SkillMatch};
use crate::ontology::SkillOntology;

/// Confidence assigned to any explicit, word-bounded mention of a skill.
pub const LITERAL_CONFIDENCE: f64 = 0.8;

/// Cosine similarity a skill label must exceed to count as an inferred mention.
pub const SIMILARITY_THRESHOLD: f32 = 0.45;

const SIMILARITY_FLOOR: f64 = 0.45;
const SIMILARITY_CEILING: f64 = 0.80;
const EMBEDDING_MIN_CONFIDENCE: f64 = 0.4;
const EMBEDDING_MAX_CONFIDENCE: f64 = 0.7;

/// Two-stage skill classifier: literal synonym matching over the ontology, then
/// embedding similarity against the labels of skills that were not mentioned.
pub struct SkillExtractor {
    ontology: Arc<SkillOntology>,
    embeddings: Option<Arc<dyn EmbeddingProvider>>,
}

impl SkillExtractor {
    pub fn new(
        ontology: Arc<SkillOntology>,
        embeddings: Option<Arc<dyn EmbeddingProvider>>,
    ) -> Self {
        Self {
            ontology,
            embeddings,
        }
    }

    pub fn literal_only(ontology: Arc<SkillOntology>) -> Self {
        Self::new(ontology, None)
    }

    pub fn ontology(&self) -> &SkillOntology {
        &self.ontology
    }

    pub fn embedding_backend(&self) -> Option<&str> {
        self.embeddings.as_ref().map(|p| p.name())
    }

    /// Ranked skills mentioned in `text`, highest confidence first.
    ///
    /// Never fails: empty text yields no skills, and an embedding failure
    /// degrades to the literal-stage result.
    pub async fn extract_skills(&self, text: &str) -> Vec<SkillMatch> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let skills = self.ontology.skills();
        let mut scores: Vec<Option<(f64, MatchSource)>> = vec![None; skills.len()];

        let lowered = text.to_lowercase();
        for (idx, skill) in skills.iter().enumerate() {
            if skill.is_mentioned_in(&lowered) {
                scores[idx] = Some((LITERAL_CONFIDENCE, MatchSource::Literal));
            }
        }

        let remaining: Vec<usize> = (0..skills.len()).filter(|&i| scores[i].is_none()).collect();

        if let Some(provider) = self.embeddings.as_ref().filter(|_| !remaining.is_empty()) {
            match self.embedding_scores(provider.as_ref(), text, &remaining).await {
                Ok(inferred) => {
                    for (idx, confidence) in inferred {
                        let current = scores[idx].map(|(c, _)| c).unwrap_or(0.0);
                        if confidence > current {
                            scores[idx] = Some((confidence, MatchSource::Embedding));
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        "Embedding stage failed ({}), using literal matches only: {}",
                        provider.name(),
                        e
                    );
                }
            }
        }

        let matches: Vec<(SkillMatch, MatchSource)> = scores
            .into_iter()
            .enumerate()
            .filter_map(|(idx, score)| {
                score.map(|(c, source)| {
                    (SkillMatch::new(skills[idx].name.clone(), round2(c)), source)
                })
            })
            .collect();

        tracing::debug!(
            literal = matches.iter().filter(|(_, s)| *s == MatchSource::Literal).count(),
            inferred = matches.iter().filter(|(_, s)| *s == MatchSource::Embedding).count(),
            "Extracted skills"
        );

        rank(matches.into_iter().map(|(m, _)| m).collect())
    }

    async fn embedding_scores(
        &self,
        provider: &dyn EmbeddingProvider,
        text: &str,
        remaining: &[usize],
    ) -> Result<Vec<(usize, f64)>> {
        let skills = self.ontology.skills();

        let mut inputs = Vec::with_capacity(remaining.len() + 1);
        inputs.push(text.to_string());
        inputs.extend(remaining.iter().map(|&i| skills[i].name.clone()));

        let mut vectors = provider.embed(inputs).await?;
        if vectors.len() != remaining.len() + 1 {
            return Err(Error::Embedding(format!(
                "Expected {} vectors, got {}",
                remaining.len() + 1,
                vectors.len()
            )));
        }
        vectors.iter_mut().for_each(|v| embeddings::normalize(v));

        let (text_vec, label_vecs) = vectors
            .split_first()
            .ok_or_else(|| Error::Embedding("No text embedding returned".to_string()))?;

        Ok(remaining
            .iter()
            .zip(label_vecs)
            .filter_map(|(&idx, label_vec)| {
                similarity_to_confidence(embeddings::dot(text_vec, label_vec)).map(|c| (idx, c))
            })
            .collect())
    }
}

/// Map a label similarity onto the inferred-mention confidence band.
///
/// Similarities in (0.45, 0.80] scale linearly onto (0.4, 0.7]; anything
/// higher is clamped to 0.7 so inferred skills always rank below explicit ones.
pub fn similarity_to_confidence(similarity: f32) -> Option<f64> {
    if similarity <= SIMILARITY_THRESHOLD {
        return None;
    }
    let similarity = f64::from(similarity);
    let scale = (EMBEDDING_MAX_CONFIDENCE - EMBEDDING_MIN_CONFIDENCE)
        / (SIMILARITY_CEILING - SIMILARITY_FLOOR);
    let confidence = EMBEDDING_MIN_CONFIDENCE + (similarity - SIMILARITY_FLOOR) * scale;
    Some(confidence.clamp(EMBEDDING_MIN_CONFIDENCE, EMBEDDING_MAX_CONFIDENCE))
}

/// Sort by confidence descending; equal confidences keep ontology order.
fn rank(mut matches: Vec<SkillMatch>) -> Vec<SkillMatch> {
    matches.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    matches
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
