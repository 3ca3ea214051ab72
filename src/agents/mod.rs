pub mod assessment;
pub mod behavioral;
pub mod market;
pub mod profiler;

pub use assessment::{AssessmentDesigner, ExperienceLevel};
pub use behavioral::BehavioralAnalyzer;
pub use market::MarketIntelligence;
pub use profiler::CandidateProfiler;

use indicatif::{ProgressBar, ProgressStyle};

use crate::models::report::Report;
use crate::storage::ReportStore;

/// Reports produced by one agent run.
#[derive(Debug, Clone)]
pub struct AgentOutput<T> {
    pub reports: Vec<T>,
    /// Input records rejected as malformed.
    pub skipped: usize,
    /// Reports built but not written; they are left out of `reports`.
    pub write_failures: usize,
}

/// Write each report, keeping the ones that made it to disk.
pub(crate) fn save_reports<T>(store: &ReportStore, reports: Vec<T>) -> (Vec<T>, usize)
where
    T: Clone + Into<Report>,
{
    let mut saved = Vec::with_capacity(reports.len());
    let mut failures = 0;
    for report in reports {
        let record: Report = report.clone().into();
        match store.save(&record) {
            Ok(_) => saved.push(report),
            Err(e) => {
                failures += 1;
                tracing::warn!(
                    "Failed to write {} report {}: {}",
                    record.kind(),
                    record.file_stem(),
                    e
                );
            }
        }
    }
    (saved, failures)
}

pub(crate) fn progress_bar(len: usize, unit: &str) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    let template = format!(
        "{{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {}",
        unit
    );
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb
}
