use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::skill::SkillMatch;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateInfo {
    pub name: String,
    pub role: String,
    pub experience_years: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalentIntelligenceReport {
    pub candidate: CandidateInfo,
    pub career_summary: String,
    pub skills: Vec<SkillMatch>,
    pub highlights: Vec<String>,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub candidate: CandidateInfo,
    pub challenges: Vec<String>,
    pub evaluation_framework: BTreeMap<String, String>,
    pub bias_mitigation: Vec<String>,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Themes {
    #[serde(rename = "Collaboration")]
    pub collaboration: u32,
    #[serde(rename = "Problem-Solving")]
    pub problem_solving: u32,
    #[serde(rename = "Communication")]
    pub communication: u32,
}

impl Themes {
    /// Theme labels and counts in report order.
    pub fn entries(&self) -> [(&'static str, u32); 3] {
        [
            ("Collaboration", self.collaboration),
            ("Problem-Solving", self.problem_solving),
            ("Communication", self.communication),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehavioralReport {
    pub candidate: String,
    pub themes: Themes,
    pub summary: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketReport {
    pub role: String,
    pub avg_salary: u64,
    pub demand_index: u32,
    pub recommendations: Vec<String>,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    TalentIntelligence,
    Assessment,
    Behavioral,
    Market,
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportKind::TalentIntelligence => write!(f, "Talent Intelligence"),
            ReportKind::Assessment => write!(f, "Assessment"),
            ReportKind::Behavioral => write!(f, "Behavioral"),
            ReportKind::Market => write!(f, "Market Intelligence"),
        }
    }
}

/// Any report the agents produce. Serializes as the bare inner record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Report {
    TalentIntelligence(TalentIntelligenceReport),
    Assessment(AssessmentReport),
    Behavioral(BehavioralReport),
    Market(MarketReport),
}

impl Report {
    pub fn kind(&self) -> ReportKind {
        match self {
            Report::TalentIntelligence(_) => ReportKind::TalentIntelligence,
            Report::Assessment(_) => ReportKind::Assessment,
            Report::Behavioral(_) => ReportKind::Behavioral,
            Report::Market(_) => ReportKind::Market,
        }
    }

    /// File name without extension, as written under the output tree.
    pub fn file_stem(&self) -> String {
        match self {
            Report::TalentIntelligence(r) => safe_name(&r.candidate.name),
            Report::Assessment(r) => format!("{}_assessment", safe_name(&r.candidate.name)),
            Report::Behavioral(r) => format!("{}_behavior", safe_name(&r.candidate)),
            Report::Market(r) => format!("{}_market", safe_name(&r.role)),
        }
    }
}

impl From<TalentIntelligenceReport> for Report {
    fn from(r: TalentIntelligenceReport) -> Self {
        Report::TalentIntelligence(r)
    }
}

impl From<AssessmentReport> for Report {
    fn from(r: AssessmentReport) -> Self {
        Report::Assessment(r)
    }
}

impl From<BehavioralReport> for Report {
    fn from(r: BehavioralReport) -> Self {
        Report::Behavioral(r)
    }
}

impl From<MarketReport> for Report {
    fn from(r: MarketReport) -> Self {
        Report::Market(r)
    }
}

/// File-name stem for a record name: anything but letters, digits, `-` and `_`
/// becomes `_`, so a name can never leave its output directory.
pub fn safe_name(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if stem.is_empty() {
        "unnamed".to_string()
    } else {
        stem
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn talent_report() -> TalentIntelligenceReport {
        TalentIntelligenceReport {
            candidate: CandidateInfo {
                name: "Grace Hopper".to_string(),
                role: "Backend Developer".to_string(),
                experience_years: 9,
            },
            career_summary: "Compiler pioneer.".to_string(),
            skills: vec![SkillMatch::new("Java", 0.8), SkillMatch::new("SQL", 0.52)],
            highlights: vec!["9 years of experience as Backend Developer".to_string()],
            notes: "Synthetic.".to_string(),
        }
    }

    #[test]
    fn test_talent_report_json_round_trip() {
        let report = talent_report();
        let json = serde_json::to_string_pretty(&report).unwrap();
        let parsed: TalentIntelligenceReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
        assert_eq!(parsed.skills[0].skill, "Java");
        assert_eq!(parsed.skills[1].confidence, 0.52);
    }

    #[test]
    fn test_report_serializes_without_tag() {
        let report = Report::from(talent_report());
        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("career_summary").is_some());
        assert_eq!(value["skills"][0], serde_json::json!(["Java", 0.8]));
    }

    #[test]
    fn test_themes_use_display_keys() {
        let themes = Themes {
            collaboration: 2,
            problem_solving: 1,
            communication: 0,
        };
        let value = serde_json::to_value(themes).unwrap();
        assert_eq!(value["Problem-Solving"], 1);
        assert_eq!(value["Collaboration"], 2);
    }

    #[test]
    fn test_safe_name_stays_inside_directory() {
        assert_eq!(safe_name("Ada Lovelace"), "Ada_Lovelace");
        assert_eq!(safe_name("AC/DC Fan"), "AC_DC_Fan");
        assert_eq!(safe_name("../../escaped"), "______escaped");
        assert_eq!(safe_name("a\\b"), "a_b");
        assert_eq!(safe_name("José-Luis"), "José-Luis");
        assert_eq!(safe_name(""), "unnamed");
    }

    #[test]
    fn test_file_stems() {
        let report = Report::from(talent_report());
        assert_eq!(report.file_stem(), "Grace_Hopper");

        let market = Report::from(MarketReport {
            role: "AI Engineer".to_string(),
            avg_salary: 130_000,
            demand_index: 9,
            recommendations: vec![],
            notes: String::new(),
        });
        assert_eq!(market.file_stem(), "AI_Engineer_market");
        assert_eq!(market.kind(), ReportKind::Market);
    }
}
