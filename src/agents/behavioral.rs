use std::path::Path;

use super::{save_reports, AgentOutput};
use crate::error::Result;
use crate::models::candidate::ConversationRecord;
use crate::models::report::{BehavioralReport, Themes};
use crate::storage::{load_records, ReportStore};

// Substring stems, matched against the lower-cased conversation.
const COLLABORATION: &[&str] = &["team", "collaborat", "help", "together", "support"];
const PROBLEM_SOLVING: &[&str] = &["solv", "problem", "fix", "analy", "improv"];
const COMMUNICATION: &[&str] = &["communicat", "explain", "share", "talk", "present"];

const BEHAVIOR_NOTES: &str = "Behavioral analysis performed on synthetic conversation data.";

/// Counts soft-skill themes in candidate conversations.
#[derive(Debug, Default)]
pub struct BehavioralAnalyzer;

impl BehavioralAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Number of distinct stems per theme found anywhere in the conversation.
    pub fn count_themes(&self, messages: &[String]) -> Themes {
        let text = messages.join(" ").to_lowercase();
        let hits = |stems: &[&str]| stems.iter().filter(|s| text.contains(*s)).count() as u32;
        Themes {
            collaboration: hits(COLLABORATION),
            problem_solving: hits(PROBLEM_SOLVING),
            communication: hits(COMMUNICATION),
        }
    }

    pub fn build_report(&self, record: &ConversationRecord) -> BehavioralReport {
        let themes = self.count_themes(&record.conversation);

        let strengths: Vec<&str> = themes
            .entries()
            .iter()
            .filter(|(_, count)| *count > 0)
            .map(|(label, _)| *label)
            .collect();

        let summary = if strengths.is_empty() {
            "No strong soft skills detected in limited conversation sample.".to_string()
        } else {
            format!(
                "Candidate demonstrates strengths in: {}.",
                strengths.join(", ")
            )
        };

        BehavioralReport {
            candidate: record.candidate.clone(),
            themes,
            summary,
            notes: BEHAVIOR_NOTES.to_string(),
        }
    }

    pub fn run(&self, input: &Path, store: &ReportStore) -> Result<AgentOutput<BehavioralReport>> {
        let loaded = load_records::<ConversationRecord>(input)?;

        let built = loaded
            .records
            .iter()
            .map(|record| self.build_report(record))
            .collect();
        let (reports, write_failures) = save_reports(store, built);

        tracing::info!(
            "Wrote {} behavioral reports to {}",
            reports.len(),
            store.layout().behavioral.display()
        );
        Ok(AgentOutput {
            reports,
            skipped: loaded.skipped,
            write_failures,
        })
    }
}
