use std::path::Path;
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;

use super::{progress_bar, save_reports, AgentOutput};
use crate::analysis::skill_extractor::{SkillExtractor, LITERAL_CONFIDENCE};
use crate::analysis::summarizer::Summarizer;
use crate::error::Result;
use crate::models::candidate::CandidateRecord;
use crate::models::report::{CandidateInfo, TalentIntelligenceReport};
use crate::models::skill::{SkillCategory, SkillMatch};
use crate::storage::{load_records, ReportStore};

const SUMMARY_SENTENCES: usize = 3;

const PROFILE_NOTES: &str = "Skill confidences are heuristic: 0.8 marks an explicit mention, \
0.4-0.7 a skill inferred by semantic similarity. Generated from synthetic candidate data.";

/// Builds a talent intelligence report for every candidate record.
pub struct CandidateProfiler {
    extractor: Arc<SkillExtractor>,
    summarizer: Summarizer,
}

impl CandidateProfiler {
    pub fn new(extractor: Arc<SkillExtractor>) -> Result<Self> {
        Ok(Self {
            extractor,
            summarizer: Summarizer::new(SUMMARY_SENTENCES)?,
        })
    }

    pub async fn build_report(&self, record: &CandidateRecord) -> TalentIntelligenceReport {
        let skills = self
            .extractor
            .extract_skills(&record.extraction_text())
            .await;
        let career_summary = self.summarizer.summarize(&record.linkedin_summary);
        let highlights = self.highlights(record, &skills);

        TalentIntelligenceReport {
            candidate: CandidateInfo {
                name: record.name.clone(),
                role: record.role.clone(),
                experience_years: record.experience_years,
            },
            career_summary,
            skills,
            highlights,
            notes: PROFILE_NOTES.to_string(),
        }
    }

    fn highlights(&self, record: &CandidateRecord, skills: &[SkillMatch]) -> Vec<String> {
        let ontology = self.extractor.ontology();
        let mut highlights = vec![format!(
            "{} years of experience as {}",
            record.experience_years, record.role
        )];

        if let Some(top) = skills.first() {
            highlights.push(format!(
                "Strongest detected skill: {} (confidence {})",
                top.skill, top.confidence
            ));
        }

        let languages: Vec<&str> = skills
            .iter()
            .filter(|m| ontology.category_of(&m.skill) == SkillCategory::Language)
            .map(|m| m.skill.as_str())
            .collect();
        if !languages.is_empty() {
            highlights.push(format!("Primary languages: {}", languages.join(", ")));
        }

        let explicit = skills
            .iter()
            .filter(|m| m.confidence >= LITERAL_CONFIDENCE)
            .count();
        if explicit > 0 {
            highlights.push(format!("Explicitly mentioned skills: {}", explicit));
        }

        if !record.github_projects.is_empty() {
            highlights.push(format!(
                "GitHub projects: {}",
                record.github_projects.join(", ")
            ));
        }

        // Declared skills are part of the extraction text, so any skill the
        // ontology knows is already in `skills`.
        let outside: Vec<&str> = record
            .skills
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .filter(|s| ontology.normalize_skill_name(s).is_none())
            .collect();
        if !outside.is_empty() {
            highlights.push(format!(
                "Declared skills outside the ontology: {}",
                outside.join(", ")
            ));
        }

        highlights
    }

    /// Profile every candidate in `input` and write their reports.
    ///
    /// Reports come back in input order regardless of completion order.
    pub async fn run(
        &self,
        input: &Path,
        store: &ReportStore,
        concurrency_limit: usize,
    ) -> Result<AgentOutput<TalentIntelligenceReport>> {
        let loaded = load_records::<CandidateRecord>(input)?;
        tracing::info!("Profiling {} candidates", loaded.records.len());

        let semaphore = Arc::new(Semaphore::new(concurrency_limit.max(1)));
        let pb = progress_bar(loaded.records.len(), "candidates");

        let futures = loaded.records.iter().map(|record| {
            let sem = semaphore.clone();
            let pb = pb.clone();
            async move {
                let _permit = sem.acquire().await.ok();
                let report = self.build_report(record).await;
                pb.inc(1);
                report
            }
        });

        let built = join_all(futures).await;
        pb.finish_with_message("Profiled all candidates");

        let (reports, write_failures) = save_reports(store, built);

        tracing::info!(
            "Wrote {} talent reports to {}",
            reports.len(),
            store.layout().talent.display()
        );

        Ok(AgentOutput {
            reports,
            skipped: loaded.skipped,
            write_failures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputLayout;
    use crate::ontology::SkillOntology;

    fn profiler() -> CandidateProfiler {
        let ontology = Arc::new(SkillOntology::builtin().unwrap());
        CandidateProfiler::new(Arc::new(SkillExtractor::literal_only(ontology))).unwrap()
    }

    fn record() -> CandidateRecord {
        CandidateRecord {
            name: "Ada Lovelace".to_string(),
            linkedin_summary: "I build data pipelines in Python and ship them with Docker. \
                               Lately I have been exploring computer vision for quality control."
                .to_string(),
            github_projects: vec!["quality-inspector".to_string(), "notebooks".to_string()],
            skills: vec!["Python".to_string(), "Rust".to_string()],
            experience_years: 5,
            role: "Data Scientist".to_string(),
        }
    }

    #[tokio::test]
    async fn test_build_report() {
        let report = profiler().build_report(&record()).await;

        assert_eq!(report.candidate.name, "Ada Lovelace");
        assert_eq!(report.candidate.experience_years, 5);

        let names: Vec<&str> = report.skills.iter().map(|m| m.skill.as_str()).collect();
        assert_eq!(names, vec!["Python", "Docker", "Computer Vision"]);
        assert!(report.skills.iter().all(|m| m.confidence == 0.8));

        assert_eq!(
            report.highlights[0],
            "5 years of experience as Data Scientist"
        );
        assert!(report
            .highlights
            .contains(&"Primary languages: Python".to_string()));
        assert!(report
            .highlights
            .contains(&"Explicitly mentioned skills: 3".to_string()));
        assert!(report
            .highlights
            .contains(&"Declared skills outside the ontology: Rust".to_string()));
        assert!(report.career_summary.contains("Python"));
    }

    #[tokio::test]
    async fn test_run_preserves_order_and_writes_reports() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("candidates.json");
        let mut second = record();
        second.name = "Alan Turing".to_string();
        second.linkedin_summary = "Kubernetes operator.".to_string();
        std::fs::write(
            &input,
            serde_json::to_string(&vec![record(), second]).unwrap(),
        )
        .unwrap();

        let store = ReportStore::new(OutputLayout::new(&dir.path().join("out")));
        let output = profiler().run(&input, &store, 1).await.unwrap();

        assert_eq!(output.skipped, 0);
        assert_eq!(output.reports[0].candidate.name, "Ada Lovelace");
        assert_eq!(output.reports[1].candidate.name, "Alan Turing");
        assert!(dir.path().join("out/reports/Alan_Turing.json").exists());
        assert!(dir.path().join("out/reports/Ada_Lovelace.md").exists());
    }

    #[tokio::test]
    async fn test_run_keeps_reports_that_were_written() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("candidates.json");
        let mut second = record();
        second.name = "Alan Turing".to_string();
        std::fs::write(
            &input,
            serde_json::to_string(&vec![record(), second]).unwrap(),
        )
        .unwrap();
        std::fs::create_dir_all(dir.path().join("out/reports/Ada_Lovelace.json")).unwrap();

        let store = ReportStore::new(OutputLayout::new(&dir.path().join("out")));
        let output = profiler().run(&input, &store, 2).await.unwrap();

        assert_eq!(output.write_failures, 1);
        assert_eq!(output.reports.len(), 1);
        assert_eq!(output.reports[0].candidate.name, "Alan Turing");
        assert!(dir.path().join("out/reports/Alan_Turing.json").is_file());
    }
}
