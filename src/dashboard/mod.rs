pub mod aggregate;
pub mod export;
pub mod view;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::models::report::{
    safe_name, AssessmentReport, BehavioralReport, MarketReport, ReportKind,
    TalentIntelligenceReport,
};
use crate::storage::ReportStore;

pub use aggregate::{MarketRow, SalarySummary, SkillFrequency};

/// Report files found under the output tree, keyed by file stem.
#[derive(Debug, Default)]
pub struct Dashboard {
    pub candidates: BTreeMap<String, TalentIntelligenceReport>,
    pub assessments: BTreeMap<String, AssessmentReport>,
    pub behavioral: BTreeMap<String, BehavioralReport>,
    pub market: BTreeMap<String, MarketReport>,
}

/// Everything shown for one candidate.
#[derive(Debug)]
pub struct CandidateView<'a> {
    pub key: &'a str,
    pub talent: &'a TalentIntelligenceReport,
    pub assessment: Option<&'a AssessmentReport>,
    pub behavioral: Option<&'a BehavioralReport>,
}

#[derive(Debug, Default)]
pub struct ExportSummary {
    pub skill_csv: Option<PathBuf>,
    pub market_csv: Option<PathBuf>,
}

impl Dashboard {
    pub fn load(store: &ReportStore) -> Self {
        let dashboard = Self {
            candidates: store.load_all(ReportKind::TalentIntelligence),
            assessments: store.load_all(ReportKind::Assessment),
            behavioral: store.load_all(ReportKind::Behavioral),
            market: store.load_all(ReportKind::Market),
        };
        tracing::debug!(
            candidates = dashboard.candidates.len(),
            assessments = dashboard.assessments.len(),
            behavioral = dashboard.behavioral.len(),
            market = dashboard.market.len(),
            "Loaded dashboard data"
        );
        dashboard
    }

    pub fn skill_frequency(&self) -> Vec<SkillFrequency> {
        aggregate::skill_frequency(&self.candidates)
    }

    pub fn market_rows(&self) -> Vec<MarketRow> {
        aggregate::market_rows(&self.market)
    }

    /// Look up a candidate by file key (`Ada_Lovelace`) or display name (`Ada Lovelace`).
    pub fn candidate(&self, key: &str) -> Result<CandidateView<'_>> {
        let key = safe_name(key.trim());
        let (key, talent) = self
            .candidates
            .get_key_value(&key)
            .ok_or_else(|| Error::ReportNotFound(key.clone()))?;

        Ok(CandidateView {
            key,
            talent,
            assessment: self.assessments.get(&format!("{}_assessment", key)),
            behavioral: self.behavioral.get(&format!("{}_behavior", key)),
        })
    }

    pub fn market_report(&self, role: &str) -> Result<&MarketReport> {
        let key = format!("{}_market", safe_name(role.trim()));
        self.market
            .get(&key)
            .or_else(|| {
                self.market
                    .values()
                    .find(|r| r.role.eq_ignore_ascii_case(role.trim()))
            })
            .ok_or_else(|| Error::ReportNotFound(role.to_string()))
    }

    pub fn export(&self, out_dir: &Path) -> Result<ExportSummary> {
        Ok(ExportSummary {
            skill_csv: export::write_csv(&self.skill_frequency(), out_dir, export::SKILL_CSV)?,
            market_csv: export::write_csv(&self.market_rows(), out_dir, export::MARKET_CSV)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputLayout;
    use crate::models::report::{CandidateInfo, Report, Themes};
    use crate::models::skill::SkillMatch;

    fn seeded_store(root: &Path) -> ReportStore {
        let store = ReportStore::new(OutputLayout::new(root));
        store
            .save(&Report::from(TalentIntelligenceReport {
                candidate: CandidateInfo {
                    name: "Ada Lovelace".to_string(),
                    role: "AI Engineer".to_string(),
                    experience_years: 7,
                },
                career_summary: "Builds models.".to_string(),
                skills: vec![SkillMatch::new("Python", 0.8)],
                highlights: vec![],
                notes: String::new(),
            }))
            .unwrap();
        store
            .save(&Report::from(BehavioralReport {
                candidate: "Ada Lovelace".to_string(),
                themes: Themes::default(),
                summary: String::new(),
                notes: String::new(),
            }))
            .unwrap();
        store
            .save(&Report::from(MarketReport {
                role: "AI Engineer".to_string(),
                avg_salary: 130_000,
                demand_index: 9,
                recommendations: vec![],
                notes: String::new(),
            }))
            .unwrap();
        store
    }

    #[test]
    fn test_candidate_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let dashboard = Dashboard::load(&seeded_store(dir.path()));

        let view = dashboard.candidate("Ada Lovelace").unwrap();
        assert_eq!(view.key, "Ada_Lovelace");
        assert!(view.behavioral.is_some());
        assert!(view.assessment.is_none());

        assert!(matches!(
            dashboard.candidate("Nobody"),
            Err(Error::ReportNotFound(_))
        ));
    }

    #[test]
    fn test_market_lookup_and_export() {
        let dir = tempfile::tempdir().unwrap();
        let dashboard = Dashboard::load(&seeded_store(dir.path()));

        assert_eq!(dashboard.market_report("ai engineer").unwrap().demand_index, 9);
        assert_eq!(dashboard.market_report("AI Engineer").unwrap().avg_salary, 130_000);

        let summary = dashboard.export(&dir.path().join("exports")).unwrap();
        let market_csv = std::fs::read_to_string(summary.market_csv.unwrap()).unwrap();
        assert_eq!(market_csv, "role,avg_salary,demand_index\nAI Engineer,130000,9\n");
        assert!(summary.skill_csv.is_some());
    }
}
