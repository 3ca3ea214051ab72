use std::sync::Arc;

use crate::agents::{AssessmentDesigner, BehavioralAnalyzer, CandidateProfiler, MarketIntelligence};
use crate::analysis::skill_extractor::SkillExtractor;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::report::TalentIntelligenceReport;
use crate::render::PdfRenderer;
use crate::storage::ReportStore;

/// Counts from one pipeline run.
#[derive(Debug, Default, Clone)]
pub struct RunSummary {
    pub talent_reports: usize,
    pub assessments: usize,
    pub behavioral_reports: usize,
    pub market_reports: usize,
    pub pdfs_written: usize,
    pub pdf_failures: usize,
    pub skipped_records: usize,
    /// Reports that were built but could not be written.
    pub write_failures: usize,
    /// Agents that stopped on a fatal input error.
    pub failed_agents: Vec<String>,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failed_agents.is_empty()
    }
}

/// Runs every agent in order: profiler, assessment designer, behavioral
/// analyzer, market intelligence, then PDF rendering of the talent reports.
pub struct RecruitmentPipeline {
    profiler: CandidateProfiler,
    designer: AssessmentDesigner,
    behavioral: BehavioralAnalyzer,
    market: MarketIntelligence,
    pdf: PdfRenderer,
    store: ReportStore,
    config: PipelineConfig,
}

impl RecruitmentPipeline {
    pub fn new(extractor: Arc<SkillExtractor>, config: PipelineConfig) -> Result<Self> {
        Ok(Self {
            profiler: CandidateProfiler::new(extractor)?,
            designer: AssessmentDesigner::new(),
            behavioral: BehavioralAnalyzer::new(),
            market: MarketIntelligence::new(),
            pdf: PdfRenderer::new(),
            store: ReportStore::new(config.layout.clone()),
            config,
        })
    }

    pub fn store(&self) -> &ReportStore {
        &self.store
    }

    /// A failing agent is logged and recorded; the remaining agents still run.
    pub async fn run(&self) -> RunSummary {
        let mut summary = RunSummary::default();

        // Step 1: Candidate profiling
        tracing::info!("Running candidate profiler...");
        let talent = match self
            .profiler
            .run(
                &self.config.inputs.candidates,
                &self.store,
                self.config.concurrency_limit,
            )
            .await
        {
            Ok(output) => {
                summary.skipped_records += output.skipped;
                summary.write_failures += output.write_failures;
                output.reports
            }
            Err(e) => {
                tracing::error!("Candidate profiler failed: {}", e);
                summary.failed_agents.push("profiler".to_string());
                Vec::new()
            }
        };
        summary.talent_reports = talent.len();

        // Step 2: Assessment packages from the talent reports
        tracing::info!("Designing assessments...");
        match self.designer.run(&talent, &self.store) {
            Ok(output) => {
                summary.write_failures += output.write_failures;
                summary.assessments = output.reports.len();
            }
            Err(e) => {
                tracing::error!("Assessment designer failed: {}", e);
                summary.failed_agents.push("assessment".to_string());
            }
        }

        // Step 3: Behavioral analysis
        tracing::info!("Analyzing conversations...");
        match self
            .behavioral
            .run(&self.config.inputs.conversations, &self.store)
        {
            Ok(output) => {
                summary.skipped_records += output.skipped;
                summary.write_failures += output.write_failures;
                summary.behavioral_reports = output.reports.len();
            }
            Err(e) => {
                tracing::error!("Behavioral analyzer failed: {}", e);
                summary.failed_agents.push("behavioral".to_string());
            }
        }

        // Step 4: Market intelligence
        tracing::info!("Building market intelligence...");
        match self.market.run(&self.config.inputs.market, &self.store) {
            Ok(output) => {
                summary.skipped_records += output.skipped;
                summary.write_failures += output.write_failures;
                summary.market_reports = output.reports.len();
            }
            Err(e) => {
                tracing::error!("Market intelligence failed: {}", e);
                summary.failed_agents.push("market".to_string());
            }
        }

        // Step 5: PDFs
        if self.config.render_pdfs {
            self.render_pdfs(&talent, &mut summary);
        }

        tracing::info!(
            talent = summary.talent_reports,
            assessments = summary.assessments,
            behavioral = summary.behavioral_reports,
            market = summary.market_reports,
            pdfs = summary.pdfs_written,
            write_failures = summary.write_failures,
            "Pipeline finished"
        );

        summary
    }

    fn render_pdfs(&self, talent: &[TalentIntelligenceReport], summary: &mut RunSummary) {
        for report in talent {
            match self.pdf.render(report, &self.config.layout.pdfs) {
                Ok(_) => summary.pdfs_written += 1,
                Err(e) => {
                    tracing::warn!(
                        "Failed to render PDF for {}: {}",
                        report.candidate.name,
                        e
                    );
                    summary.pdf_failures += 1;
                }
            }
        }
    }
}
