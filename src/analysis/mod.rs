pub mod pipeline;
pub mod skill_extractor;
pub mod summarizer;

pub use pipeline::{RecruitmentPipeline, RunSummary};
pub use skill_extractor::SkillExtractor;
pub use summarizer::Summarizer;
