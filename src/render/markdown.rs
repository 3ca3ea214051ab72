use crate::models::report::{
    AssessmentReport, BehavioralReport, MarketReport, Report, TalentIntelligenceReport,
};

pub fn render_markdown(report: &Report) -> String {
    match report {
        Report::TalentIntelligence(r) => talent(r),
        Report::Assessment(r) => assessment(r),
        Report::Behavioral(r) => behavioral(r),
        Report::Market(r) => market(r),
    }
}

fn talent(report: &TalentIntelligenceReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "# Talent Intelligence Report — {}\n\n",
        report.candidate.name
    ));
    output.push_str(&format!("- **Role**: {}\n", report.candidate.role));
    output.push_str(&format!(
        "- **Experience (years)**: {}\n\n",
        report.candidate.experience_years
    ));

    output.push_str("## Career Summary\n");
    output.push_str(&format!("{}\n\n", report.career_summary));

    output.push_str("## Detected Skills (with confidence)\n");
    for m in &report.skills {
        output.push_str(&format!("- {}: **{}**\n", m.skill, m.confidence));
    }

    output.push_str("\n## Highlights\n");
    for h in &report.highlights {
        output.push_str(&format!("- {}\n", h));
    }

    output.push_str("\n## Notes\n");
    output.push_str(&format!("{}\n", report.notes));

    output
}

fn assessment(report: &AssessmentReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "# Assessment Package — {}\n\n",
        report.candidate.name
    ));

    output.push_str("## Challenges\n");
    for c in &report.challenges {
        output.push_str(&format!("- {}\n", c));
    }

    output.push_str("\n## Evaluation Framework\n");
    for (criterion, weight) in &report.evaluation_framework {
        output.push_str(&format!("- {}: {}\n", criterion, weight));
    }

    output.push_str("\n## Bias Mitigation Protocol\n");
    for g in &report.bias_mitigation {
        output.push_str(&format!("- {}\n", g));
    }

    output.push_str("\n## Notes\n");
    output.push_str(&format!("{}\n", report.notes));

    output
}

fn behavioral(report: &BehavioralReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "# Behavioral & Cultural Fit Report — {}\n\n",
        report.candidate
    ));

    output.push_str("## Detected Themes\n");
    for (theme, count) in report.themes.entries() {
        output.push_str(&format!("- {}: {}\n", theme, count));
    }

    output.push_str("\n## Summary\n");
    output.push_str(&format!("{}\n", report.summary));

    output.push_str("\n## Notes\n");
    output.push_str(&format!("{}\n", report.notes));

    output
}

fn market(report: &MarketReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "# Market Intelligence Report — {}\n\n",
        report.role
    ));
    output.push_str(&format!("- **Average Salary**: {}\n", report.avg_salary));
    output.push_str(&format!("- **Demand Index**: {}\n\n", report.demand_index));

    output.push_str("## Recommendations\n");
    for r in &report.recommendations {
        output.push_str(&format!("- {}\n", r));
    }

    output.push_str("\n## Notes\n");
    output.push_str(&format!("{}\n", report.notes));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::report::{CandidateInfo, Themes};
    use crate::models::skill::SkillMatch;

    #[test]
    fn test_talent_markdown() {
        let report = Report::from(TalentIntelligenceReport {
            candidate: CandidateInfo {
                name: "Ada Lovelace".to_string(),
                role: "AI Engineer".to_string(),
                experience_years: 7,
            },
            career_summary: "Builds models.".to_string(),
            skills: vec![SkillMatch::new("Python", 0.8), SkillMatch::new("NLP", 0.53)],
            highlights: vec!["7 years of experience as AI Engineer".to_string()],
            notes: "Synthetic.".to_string(),
        });

        let md = render_markdown(&report);
        assert!(md.starts_with("# Talent Intelligence Report — Ada Lovelace\n\n- **Role**: AI Engineer\n"));
        assert!(md.contains("- **Experience (years)**: 7\n"));
        assert!(md.contains("## Detected Skills (with confidence)\n- Python: **0.8**\n- NLP: **0.53**\n"));
        assert!(md.contains("## Highlights\n- 7 years of experience as AI Engineer\n"));
        assert!(md.ends_with("## Notes\nSynthetic.\n"));
    }

    #[test]
    fn test_behavioral_markdown_lists_all_themes() {
        let report = Report::from(BehavioralReport {
            candidate: "Jane Roe".to_string(),
            themes: Themes {
                collaboration: 2,
                problem_solving: 0,
                communication: 1,
            },
            summary: "Candidate demonstrates strengths in: Collaboration, Communication."
                .to_string(),
            notes: "Synthetic.".to_string(),
        });

        let md = render_markdown(&report);
        assert!(md.contains(
            "## Detected Themes\n- Collaboration: 2\n- Problem-Solving: 0\n- Communication: 1\n"
        ));
    }

    #[test]
    fn test_market_markdown() {
        let report = Report::from(MarketReport {
            role: "AI Engineer".to_string(),
            avg_salary: 130_000,
            demand_index: 9,
            recommendations: vec!["Recommended sourcing channels: GitHub".to_string()],
            notes: "Synthetic.".to_string(),
        });

        let md = render_markdown(&report);
        assert!(md.starts_with("# Market Intelligence Report — AI Engineer\n"));
        assert!(md.contains("- **Average Salary**: 130000\n- **Demand Index**: 9\n"));
        assert!(md.contains("## Recommendations\n- Recommended sourcing channels: GitHub\n"));
    }
}
