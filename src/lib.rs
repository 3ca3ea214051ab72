pub mod config;
pub mod error;
pub mod models;
pub mod ontology;
pub mod embeddings;
pub mod analysis;
pub mod agents;
pub mod render;
pub mod storage;
pub mod dashboard;

pub use config::{Config, EmbeddingBackend, PipelineConfig};
pub use error::{Error, Result};
pub use ontology::SkillOntology;
pub use embeddings::{build_provider, EmbeddingProvider};
pub use analysis::{RecruitmentPipeline, RunSummary, SkillExtractor};
pub use dashboard::Dashboard;
pub use storage::ReportStore;
