use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{save_reports, AgentOutput};
use crate::error::Result;
use crate::models::report::{AssessmentReport, TalentIntelligenceReport};
use crate::storage::ReportStore;

const SKILL_CHALLENGES: usize = 3;

const ASSESSMENT_NOTES: &str =
    "Challenges are derived from detected skills; calibrate difficulty after the first interview.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExperienceLevel {
    Foundational,
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    pub fn from_years(years: u32) -> Self {
        match years {
            0..=2 => ExperienceLevel::Foundational,
            3..=5 => ExperienceLevel::Intermediate,
            _ => ExperienceLevel::Advanced,
        }
    }
}

impl std::fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExperienceLevel::Foundational => write!(f, "Foundational"),
            ExperienceLevel::Intermediate => write!(f, "Intermediate"),
            ExperienceLevel::Advanced => write!(f, "Advanced"),
        }
    }
}

/// Turns a talent report into a tailored assessment package.
#[derive(Debug, Default)]
pub struct AssessmentDesigner;

impl AssessmentDesigner {
    pub fn new() -> Self {
        Self
    }

    pub fn build_report(&self, talent: &TalentIntelligenceReport) -> AssessmentReport {
        let level = ExperienceLevel::from_years(talent.candidate.experience_years);

        let mut challenges: Vec<String> = talent
            .skills
            .iter()
            .take(SKILL_CHALLENGES)
            .map(|m| format!("[{}] {}: {}", level, m.skill, skill_challenge(&m.skill, level)))
            .collect();

        if challenges.is_empty() {
            challenges.push(format!(
                "[{}] General: Solve a practical coding exercise in the language of your choice \
                 and explain your approach.",
                level
            ));
        }

        challenges.push(format!(
            "[{}] System design ({}): {}",
            level,
            talent.candidate.role,
            role_task(&talent.candidate.role)
        ));

        AssessmentReport {
            candidate: talent.candidate.clone(),
            challenges,
            evaluation_framework: evaluation_framework(level),
            bias_mitigation: bias_mitigation(),
            notes: ASSESSMENT_NOTES.to_string(),
        }
    }

    pub fn run(
        &self,
        talent_reports: &[TalentIntelligenceReport],
        store: &ReportStore,
    ) -> Result<AgentOutput<AssessmentReport>> {
        let built = talent_reports
            .iter()
            .map(|talent| self.build_report(talent))
            .collect();
        let (reports, write_failures) = save_reports(store, built);

        tracing::info!(
            "Wrote {} assessment packages to {}",
            reports.len(),
            store.layout().assessments.display()
        );
        Ok(AgentOutput {
            reports,
            skipped: 0,
            write_failures,
        })
    }
}

fn skill_challenge(skill: &str, level: ExperienceLevel) -> String {
    let base = match skill {
        "Python" => "Write a data-cleaning module with pandas that handles missing values and outliers, with unit tests.".to_string(),
        "Java" => "Implement a thread-safe LRU cache with an eviction listener and document its complexity.".to_string(),
        "C++" => "Implement a fixed-capacity ring buffer using RAII and move semantics, then benchmark push and pop.".to_string(),
        "TensorFlow" => "Train and evaluate a small Keras classifier; report precision and recall and explain one failure mode.".to_string(),
        "PyTorch" => "Write a custom Dataset and training loop with checkpointing and early stopping.".to_string(),
        "SQL" => "Given an orders schema, write queries for monthly retention and explain the indexes you would add.".to_string(),
        "Docker" => "Containerize a small web service with a multi-stage Dockerfile and a health check.".to_string(),
        "Kubernetes" => "Write manifests for a stateless service with readiness probes, resource limits and a rolling update strategy.".to_string(),
        "React" => "Build a searchable, paginated list component with loading and error states.".to_string(),
        "NLP" => "Build a text classification baseline and compare a TF-IDF model against an embedding-based approach.".to_string(),
        "Computer Vision" => "Implement an image classification pipeline with augmentation and analyze the misclassified samples.".to_string(),
        "Data Engineering" => "Design an idempotent ETL job that loads daily files into a warehouse table and handles late-arriving data.".to_string(),
        other => format!(
            "Complete a small project that demonstrates practical use of {}, including tests and a short design note.",
            other
        ),
    };

    match level {
        ExperienceLevel::Advanced => {
            format!("{} Be ready to discuss how it behaves at production scale.", base)
        }
        _ => base,
    }
}

fn role_task(role: &str) -> String {
    match role {
        "AI Engineer" => "Design an inference service for a fine-tuned model, covering batching, monitoring and rollback.".to_string(),
        "Data Scientist" => "Plan an A/B test for a recommendation change, including metrics, sample size and guardrails.".to_string(),
        "Backend Developer" => "Design a rate-limited REST API for order processing, covering persistence and failure handling.".to_string(),
        "Full Stack Developer" => "Build a feature end to end: an API endpoint, its persistence and a validated UI form.".to_string(),
        other => format!(
            "Walk through the design of a recent project relevant to the {} role, including the trade-offs made.",
            other
        ),
    }
}

fn evaluation_framework(level: ExperienceLevel) -> BTreeMap<String, String> {
    let weights: &[(&str, &str)] = match level {
        ExperienceLevel::Advanced => &[
            ("Technical Accuracy", "30% - correctness and completeness of solutions"),
            ("Code Quality", "20% - readability, structure and testing"),
            ("Problem Solving", "20% - decomposition and trade-off reasoning"),
            ("System Design", "20% - scalability, reliability and operability"),
            ("Communication", "10% - clarity when explaining decisions"),
        ],
        _ => &[
            ("Technical Accuracy", "35% - correctness and completeness of solutions"),
            ("Code Quality", "25% - readability, structure and testing"),
            ("Problem Solving", "25% - decomposition and trade-off reasoning"),
            ("Communication", "15% - clarity when explaining decisions"),
        ],
    };

    weights
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn bias_mitigation() -> Vec<String> {
    [
        "Score submissions anonymously; remove names and demographic details before review.",
        "Give every candidate the same instructions, time limit and rubric.",
        "Have at least two reviewers score independently before calibrating.",
        "Evaluate demonstrated skills only; do not weigh school or employer prestige.",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::report::CandidateInfo;
    use crate::models::skill::SkillMatch;

    fn talent(years: u32, skills: Vec<SkillMatch>) -> TalentIntelligenceReport {
        TalentIntelligenceReport {
            candidate: CandidateInfo {
                name: "Linus Ng".to_string(),
                role: "Backend Developer".to_string(),
                experience_years: years,
            },
            career_summary: String::new(),
            skills,
            highlights: vec![],
            notes: String::new(),
        }
    }

    #[test]
    fn test_experience_levels() {
        assert_eq!(ExperienceLevel::from_years(0), ExperienceLevel::Foundational);
        assert_eq!(ExperienceLevel::from_years(2), ExperienceLevel::Foundational);
        assert_eq!(ExperienceLevel::from_years(3), ExperienceLevel::Intermediate);
        assert_eq!(ExperienceLevel::from_years(5), ExperienceLevel::Intermediate);
        assert_eq!(ExperienceLevel::from_years(6), ExperienceLevel::Advanced);
    }

    #[test]
    fn test_challenges_follow_top_skills() {
        let report = AssessmentDesigner::new().build_report(&talent(
            4,
            vec![
                SkillMatch::new("SQL", 0.8),
                SkillMatch::new("Java", 0.8),
                SkillMatch::new("Docker", 0.8),
                SkillMatch::new("Kubernetes", 0.52),
            ],
        ));

        assert_eq!(report.challenges.len(), 4);
        assert!(report.challenges[0].starts_with("[Intermediate] SQL:"));
        assert!(report.challenges[1].starts_with("[Intermediate] Java:"));
        assert!(report.challenges[2].starts_with("[Intermediate] Docker:"));
        assert!(report.challenges[3].starts_with("[Intermediate] System design (Backend Developer):"));
        assert!(!report.evaluation_framework.contains_key("System Design"));
        assert_eq!(report.bias_mitigation.len(), 4);
    }

    #[test]
    fn test_no_skills_gets_generic_challenge() {
        let report = AssessmentDesigner::new().build_report(&talent(8, vec![]));
        assert_eq!(report.challenges.len(), 2);
        assert!(report.challenges[0].starts_with("[Advanced] General:"));
        assert!(report.evaluation_framework.contains_key("System Design"));
        assert_eq!(report.evaluation_framework.len(), 5);
    }
}
