use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::config::OutputLayout;
use crate::error::Result;
use crate::models::report::{Report, ReportKind};
use crate::render::markdown::render_markdown;

/// Paths written for one report.
#[derive(Debug, Clone)]
pub struct SavedReport {
    pub json: PathBuf,
    pub markdown: PathBuf,
}

/// Reads and writes report files under the output tree.
#[derive(Debug, Clone)]
pub struct ReportStore {
    layout: OutputLayout,
}

impl ReportStore {
    pub fn new(layout: OutputLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    pub fn dir_for(&self, kind: ReportKind) -> &Path {
        match kind {
            ReportKind::TalentIntelligence => &self.layout.talent,
            ReportKind::Assessment => &self.layout.assessments,
            ReportKind::Behavioral => &self.layout.behavioral,
            ReportKind::Market => &self.layout.market,
        }
    }

    /// Write a report as pretty JSON and Markdown next to each other.
    pub fn save(&self, report: &Report) -> Result<SavedReport> {
        let dir = ensure_dir(self.dir_for(report.kind()))?;
        let stem = report.file_stem();

        let json = dir.join(format!("{}.json", stem));
        std::fs::write(&json, serde_json::to_string_pretty(report)?)?;

        let markdown = dir.join(format!("{}.md", stem));
        std::fs::write(&markdown, render_markdown(report))?;

        tracing::debug!("Saved {} report {}", report.kind(), json.display());
        Ok(SavedReport { json, markdown })
    }

    /// All parseable `*.json` reports of one kind, keyed by file stem.
    ///
    /// Only the kind's own directory is scanned, not its subdirectories.
    /// Files that fail to parse are skipped.
    pub fn load_all<T: DeserializeOwned>(&self, kind: ReportKind) -> BTreeMap<String, T> {
        let dir = self.dir_for(kind);
        let mut out = BTreeMap::new();

        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(_) => return out,
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let parsed = std::fs::read_to_string(&path)
                .map_err(crate::error::Error::from)
                .and_then(|raw| serde_json::from_str::<T>(&raw).map_err(Into::into));

            match parsed {
                Ok(report) => {
                    out.insert(stem.to_string(), report);
                }
                Err(e) => tracing::debug!("Ignoring {}: {}", path.display(), e),
            }
        }

        out
    }
}

pub fn ensure_dir(dir: &Path) -> Result<&Path> {
    std::fs::create_dir_all(dir)?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::report::{BehavioralReport, MarketReport, Themes};

    fn store(root: &Path) -> ReportStore {
        ReportStore::new(OutputLayout::new(root))
    }

    #[test]
    fn test_save_writes_json_and_markdown() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        let report = Report::Behavioral(BehavioralReport {
            candidate: "Jane Roe".to_string(),
            themes: Themes {
                collaboration: 1,
                problem_solving: 0,
                communication: 2,
            },
            summary: "Candidate demonstrates strengths in: Collaboration, Communication."
                .to_string(),
            notes: "Synthetic.".to_string(),
        });

        let saved = store.save(&report).unwrap();
        assert_eq!(
            saved.json,
            dir.path().join("reports/behavioral/Jane_Roe_behavior.json")
        );
        assert!(saved.markdown.exists());

        let loaded: BTreeMap<String, BehavioralReport> = store.load_all(ReportKind::Behavioral);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded["Jane_Roe_behavior"].themes.communication, 2);
    }

    #[test]
    fn test_load_all_skips_bad_files_and_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        let market = MarketReport {
            role: "Data Scientist".to_string(),
            avg_salary: 95_000,
            demand_index: 6,
            recommendations: vec![],
            notes: String::new(),
        };
        store.save(&Report::Market(market.clone())).unwrap();
        std::fs::write(dir.path().join("reports/market/broken.json"), "{").unwrap();

        let loaded: BTreeMap<String, MarketReport> = store.load_all(ReportKind::Market);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded["Data_Scientist_market"], market);

        // Market reports live below the talent directory but are not talent reports.
        let talent: BTreeMap<String, serde_json::Value> =
            store.load_all(ReportKind::TalentIntelligence);
        assert!(talent.is_empty());
    }

    #[test]
    fn test_load_all_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let loaded: BTreeMap<String, MarketReport> =
            store(&dir.path().join("absent")).load_all(ReportKind::Market);
        assert!(loaded.is_empty());
    }
}
