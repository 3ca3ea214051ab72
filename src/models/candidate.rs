use serde::{Deserialize, Serialize};

/// Candidate fixture as produced by the data generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub name: String,
    #[serde(default)]
    pub linkedin_summary: String,
    #[serde(default)]
    pub github_projects: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub experience_years: u32,
    pub role: String,
}

impl CandidateRecord {
    /// Text fed to the skill extractor: summary, project names and declared skills.
    pub fn extraction_text(&self) -> String {
        let mut parts = Vec::with_capacity(1 + self.github_projects.len() + self.skills.len());
        parts.push(self.linkedin_summary.as_str());
        parts.extend(self.github_projects.iter().map(String::as_str));
        parts.extend(self.skills.iter().map(String::as_str));
        parts
            .into_iter()
            .filter(|p| !p.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketEntry {
    pub role: String,
    pub avg_salary: u64,
    pub demand_index: u32,
    #[serde(default)]
    pub top_sources: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub candidate: String,
    #[serde(default)]
    pub conversation: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_text_joins_fields() {
        let record = CandidateRecord {
            name: "Ada Lovelace".to_string(),
            linkedin_summary: "Built analytical engines.".to_string(),
            github_projects: vec!["engine".to_string(), "notes".to_string()],
            skills: vec!["Python".to_string()],
            experience_years: 4,
            role: "Data Scientist".to_string(),
        };
        assert_eq!(
            record.extraction_text(),
            "Built analytical engines. engine notes Python"
        );
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let value = serde_json::json!({ "name": "No Role", "experience_years": 2 });
        assert!(serde_json::from_value::<CandidateRecord>(value).is_err());
    }
}
