use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use crate::models::report::{MarketReport, TalentIntelligenceReport};

/// How many candidates show a skill, and how confidently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillFrequency {
    pub skill: String,
    pub count: usize,
    pub avg_confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketRow {
    pub role: String,
    pub avg_salary: u64,
    pub demand_index: u32,
}

/// Five-number summary of average salaries across roles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalarySummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Skills ranked by number of distinct candidates, then by name.
pub fn skill_frequency(
    candidates: &BTreeMap<String, TalentIntelligenceReport>,
) -> Vec<SkillFrequency> {
    let mut holders: HashMap<&str, HashSet<&str>> = HashMap::new();
    let mut confidences: HashMap<&str, Vec<f64>> = HashMap::new();

    for (key, report) in candidates {
        for m in &report.skills {
            holders.entry(&m.skill).or_default().insert(key);
            confidences.entry(&m.skill).or_default().push(m.confidence);
        }
    }

    let mut rows: Vec<SkillFrequency> = holders
        .into_iter()
        .map(|(skill, keys)| {
            let values = &confidences[skill];
            SkillFrequency {
                skill: skill.to_string(),
                count: keys.len(),
                avg_confidence: values.iter().sum::<f64>() / values.len() as f64,
            }
        })
        .collect();

    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.skill.cmp(&b.skill)));
    rows
}

pub fn market_rows(market: &BTreeMap<String, MarketReport>) -> Vec<MarketRow> {
    market
        .values()
        .map(|r| MarketRow {
            role: r.role.clone(),
            avg_salary: r.avg_salary,
            demand_index: r.demand_index,
        })
        .collect()
}

/// Rows ordered by demand index, highest first.
pub fn demand_ranking(rows: &[MarketRow]) -> Vec<MarketRow> {
    let mut ranked = rows.to_vec();
    ranked.sort_by(|a, b| {
        b.demand_index
            .cmp(&a.demand_index)
            .then_with(|| a.role.cmp(&b.role))
    });
    ranked
}

pub fn salary_summary(rows: &[MarketRow]) -> Option<SalarySummary> {
    let mut salaries: Vec<f64> = rows.iter().map(|r| r.avg_salary as f64).collect();
    if salaries.is_empty() {
        return None;
    }
    salaries.sort_by(|a, b| a.total_cmp(b));

    Some(SalarySummary {
        min: salaries[0],
        q1: quantile(&salaries, 0.25),
        median: quantile(&salaries, 0.5),
        q3: quantile(&salaries, 0.75),
        max: salaries[salaries.len() - 1],
    })
}

/// Linear interpolation between closest ranks over sorted, non-empty input.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = (sorted.len() - 1) as f64 * q;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (pos - lower as f64)
}
