use std::path::Path;

use super::{save_reports, AgentOutput};
use crate::error::Result;
use crate::models::candidate::MarketEntry;
use crate::models::report::MarketReport;
use crate::storage::{load_records, ReportStore};

const HIGH_DEMAND: u32 = 7;
const LOW_DEMAND: u32 = 4;
const HIGH_SALARY: u64 = 120_000;
const LOW_SALARY: u64 = 70_000;

const MARKET_NOTES: &str = "Market analysis performed on synthetic data.";

/// Rule-based sourcing recommendations per role.
#[derive(Debug, Default)]
pub struct MarketIntelligence;

impl MarketIntelligence {
    pub fn new() -> Self {
        Self
    }

    pub fn recommendations(&self, entry: &MarketEntry) -> Vec<String> {
        let role = &entry.role;
        let mut recs = Vec::new();

        if entry.demand_index > HIGH_DEMAND {
            recs.push(format!(
                "⚡ {} is in very high demand. Prioritize sourcing immediately.",
                role
            ));
        } else if entry.demand_index < LOW_DEMAND {
            recs.push(format!(
                "📉 Demand for {} is currently low; maintain a passive sourcing strategy.",
                role
            ));
        } else {
            recs.push(format!(
                "↔️ Demand for {} is moderate; continue sourcing steadily.",
                role
            ));
        }

        if entry.avg_salary > HIGH_SALARY {
            recs.push(format!(
                "💰 Salaries for {} are above average; budget carefully.",
                role
            ));
        } else if entry.avg_salary < LOW_SALARY {
            recs.push(format!(
                "💡 Salaries for {} are relatively low; good cost-effective hiring opportunity.",
                role
            ));
        }

        recs.push(format!(
            "Recommended sourcing channels: {}",
            entry.top_sources.join(", ")
        ));

        recs
    }

    pub fn build_report(&self, entry: &MarketEntry) -> MarketReport {
        MarketReport {
            role: entry.role.clone(),
            avg_salary: entry.avg_salary,
            demand_index: entry.demand_index,
            recommendations: self.recommendations(entry),
            notes: MARKET_NOTES.to_string(),
        }
    }

    pub fn run(&self, input: &Path, store: &ReportStore) -> Result<AgentOutput<MarketReport>> {
        let loaded = load_records::<MarketEntry>(input)?;

        let built = loaded
            .records
            .iter()
            .map(|entry| self.build_report(entry))
            .collect();
        let (reports, write_failures) = save_reports(store, built);

        tracing::info!(
            "Wrote {} market reports to {}",
            reports.len(),
            store.layout().market.display()
        );
        Ok(AgentOutput {
            reports,
            skipped: loaded.skipped,
            write_failures,
        })
    }
}
