use super::aggregate::{demand_ranking, salary_summary};
use super::{CandidateView, Dashboard};
use crate::models::report::MarketReport;

const TOP_SKILLS: usize = 12;
const BAR_WIDTH: usize = 30;

fn bar(value: f64, max: f64) -> String {
    if value <= 0.0 || max <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "#".repeat(len.max(1))
}

pub fn format_overview(dashboard: &Dashboard) -> String {
    let mut output = String::new();

    output.push_str("\n=== Recruitment Analytics Dashboard ===\n\n");
    output.push_str(&format!("Candidates: {}\n", dashboard.candidates.len()));
    output.push_str(&format!("Assessments: {}\n", dashboard.assessments.len()));
    output.push_str(&format!("Behavioral reports: {}\n", dashboard.behavioral.len()));
    output.push_str(&format!("Market roles: {}\n", dashboard.market.len()));

    let skills = dashboard.skill_frequency();
    output.push_str("\nTop Skills (by number of candidates):\n");
    if skills.is_empty() {
        output.push_str("  No candidate reports found.\n");
    } else {
        let max = skills[0].count as f64;
        for s in skills.iter().take(TOP_SKILLS) {
            output.push_str(&format!(
                "  {:<18} {:<width$} {} (avg confidence {:.2})\n",
                s.skill,
                bar(s.count as f64, max),
                s.count,
                s.avg_confidence,
                width = BAR_WIDTH
            ));
        }
    }

    let rows = dashboard.market_rows();
    output.push_str("\nSalary Distribution (average salary per role):\n");
    match salary_summary(&rows) {
        Some(summary) => {
            output.push_str(&format!(
                "  min {:.0} | q1 {:.0} | median {:.0} | q3 {:.0} | max {:.0}\n",
                summary.min, summary.q1, summary.median, summary.q3, summary.max
            ));
        }
        None => output.push_str("  No market reports found.\n"),
    }

    let ranked = demand_ranking(&rows);
    if !ranked.is_empty() {
        output.push_str("\nDemand Index by Role:\n");
        for r in &ranked {
            output.push_str(&format!(
                "  {:<24} {:<width$} {}\n",
                r.role,
                bar(r.demand_index as f64, 10.0),
                r.demand_index,
                width = BAR_WIDTH
            ));
        }
    }

    output
}

pub fn format_candidate(view: &CandidateView<'_>) -> String {
    let talent = view.talent;
    let mut output = String::new();

    output.push_str(&format!("\n=== {} ===\n\n", talent.candidate.name));
    output.push_str(&format!("Role: {}\n", talent.candidate.role));
    output.push_str(&format!(
        "Experience: {} years\n",
        talent.candidate.experience_years
    ));

    output.push_str("\nCareer Summary:\n");
    output.push_str(&format!("  {}\n", talent.career_summary));

    output.push_str("\nSkills:\n");
    for m in &talent.skills {
        output.push_str(&format!(
            "  - {:<18} {} {:.2}\n",
            m.skill,
            bar(m.confidence, 1.0),
            m.confidence
        ));
    }

    if !talent.highlights.is_empty() {
        output.push_str("\nHighlights:\n");
        for h in &talent.highlights {
            output.push_str(&format!("  + {}\n", h));
        }
    }

    match view.assessment {
        Some(assessment) => {
            output.push_str("\nAssessment Challenges:\n");
            for c in &assessment.challenges {
                output.push_str(&format!("  - {}\n", c));
            }
        }
        None => output.push_str("\nNo assessment package found.\n"),
    }

    match view.behavioral {
        Some(behavioral) => {
            output.push_str("\nBehavioral Themes:\n");
            for (theme, count) in behavioral.themes.entries() {
                output.push_str(&format!("  {:<16} {}\n", theme, count));
            }
            output.push_str(&format!("  {}\n", behavioral.summary));
        }
        None => output.push_str("\nNo behavioral report found.\n"),
    }

    output
}

pub fn format_market(report: &MarketReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("\n=== Market: {} ===\n\n", report.role));
    output.push_str(&format!("Average salary: {}\n", report.avg_salary));
    output.push_str(&format!("Demand index: {}\n", report.demand_index));

    output.push_str("\nRecommendations:\n");
    for r in &report.recommendations {
        output.push_str(&format!("  - {}\n", r));
    }

    output
}
