use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum SkillCategory {
    Language,
    Framework,
    Tool,
    Domain,
    #[default]
    Concept,
}

impl SkillCategory {
    pub fn parse(category_str: &str) -> Self {
        match category_str.to_lowercase().as_str() {
            "language" => SkillCategory::Language,
            "framework" | "library" => SkillCategory::Framework,
            "tool" => SkillCategory::Tool,
            "domain" => SkillCategory::Domain,
            _ => SkillCategory::Concept,
        }
    }
}

impl std::fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkillCategory::Language => write!(f, "Language"),
            SkillCategory::Framework => write!(f, "Framework"),
            SkillCategory::Tool => write!(f, "Tool"),
            SkillCategory::Domain => write!(f, "Domain"),
            SkillCategory::Concept => write!(f, "Concept"),
        }
    }
}

/// How a skill was detected in a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSource {
    Literal,
    Embedding,
}

/// A detected skill with its heuristic confidence.
///
/// Serialized as a `[name, confidence]` pair so report files keep the
/// two-column layout consumers expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "(String, f64)", into = "(String, f64)")]
pub struct SkillMatch {
    pub skill: String,
    pub confidence: f64,
}

impl SkillMatch {
    pub fn new(skill: impl Into<String>, confidence: f64) -> Self {
        Self {
            skill: skill.into(),
            confidence,
        }
    }
}

impl From<(String, f64)> for SkillMatch {
    fn from((skill, confidence): (String, f64)) -> Self {
        Self { skill, confidence }
    }
}

impl From<SkillMatch> for (String, f64) {
    fn from(m: SkillMatch) -> Self {
        (m.skill, m.confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_match_serializes_as_pair() {
        let json = serde_json::to_string(&SkillMatch::new("Python", 0.8)).unwrap();
        assert_eq!(json, r#"["Python",0.8]"#);

        let parsed: SkillMatch = serde_json::from_str(r#"["SQL", 0.55]"#).unwrap();
        assert_eq!(parsed, SkillMatch::new("SQL", 0.55));
    }

    #[test]
    fn test_parse_category() {
        assert_eq!(SkillCategory::parse("Language"), SkillCategory::Language);
        assert_eq!(SkillCategory::parse("library"), SkillCategory::Framework);
        assert_eq!(SkillCategory::parse("whatever"), SkillCategory::Concept);
    }
}
