mod defaults;

use std::collections::HashSet;
use std::path::Path;

use regex::Regex;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::skill::SkillCategory;

/// One canonical skill and the lower-cased strings that count as a mention of it.
#[derive(Debug, Clone)]
pub struct OntologySkill {
    pub name: String,
    pub category: SkillCategory,
    /// Lower-cased synonyms, canonical name included.
    pub synonyms: Vec<String>,
    matcher: Regex,
}

impl OntologySkill {
    fn new(name: &str, category: SkillCategory, synonyms: &[impl AsRef<str>]) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Ontology("skill name must not be empty".to_string()));
        }

        let mut seen = HashSet::new();
        let mut all: Vec<String> = Vec::with_capacity(synonyms.len() + 1);
        for syn in synonyms
            .iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .chain(std::iter::once(name.to_lowercase()))
        {
            if !syn.is_empty() && seen.insert(syn.clone()) {
                all.push(syn);
            }
        }

        // Longest first so the alternation prefers the full multi-token form.
        let mut alternatives: Vec<&str> = all.iter().map(String::as_str).collect();
        alternatives.sort_by_key(|s| std::cmp::Reverse(s.len()));
        let pattern = format!(
            r"(?:^|\W)(?:{})(?:\W|$)",
            alternatives
                .iter()
                .map(|s| regex::escape(s))
                .collect::<Vec<_>>()
                .join("|")
        );

        Ok(Self {
            name: name.to_string(),
            category,
            synonyms: all,
            matcher: Regex::new(&pattern)?,
        })
    }

    /// Whole-word test against text that is already lower-cased.
    pub fn is_mentioned_in(&self, lowered_text: &str) -> bool {
        self.matcher.is_match(lowered_text)
    }
}

#[derive(Debug, Deserialize)]
struct OntologyFileEntry {
    name: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    synonyms: Vec<String>,
}

/// Ordered, immutable mapping from canonical skill to synonyms.
#[derive(Debug, Clone)]
pub struct SkillOntology {
    skills: Vec<OntologySkill>,
}

impl SkillOntology {
    pub fn builtin() -> Result<Self> {
        let skills = defaults::builtin_entries()
            .into_iter()
            .map(|(name, category, synonyms)| {
                OntologySkill::new(name, category, synonyms.as_slice())
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_skills(skills)
    }

    /// Load an ontology from a JSON array of `{name, category?, synonyms}` objects.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| Error::InputFile {
            path: path.to_path_buf(),
            source,
        })?;
        let entries: Vec<OntologyFileEntry> =
            serde_json::from_str(&raw).map_err(|e| Error::MalformedInput {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let skills = entries
            .iter()
            .map(|e| {
                let category = e
                    .category
                    .as_deref()
                    .map(SkillCategory::parse)
                    .unwrap_or_default();
                OntologySkill::new(&e.name, category, e.synonyms.as_slice())
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::info!("Loaded {} skills from {}", skills.len(), path.display());
        Self::from_skills(skills)
    }

    fn from_skills(skills: Vec<OntologySkill>) -> Result<Self> {
        if skills.is_empty() {
            return Err(Error::Ontology("ontology has no skills".to_string()));
        }
        let mut names = HashSet::new();
        for skill in &skills {
            if !names.insert(skill.name.to_lowercase()) {
                return Err(Error::Ontology(format!("duplicate skill '{}'", skill.name)));
            }
        }
        Ok(Self { skills })
    }

    pub fn skills(&self) -> &[OntologySkill] {
        &self.skills
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn get_skill(&self, name: &str) -> Option<&OntologySkill> {
        let lower = name.to_lowercase();
        self.skills.iter().find(|s| s.name.to_lowercase() == lower)
    }

    /// Canonical name for a canonical name or synonym, if known.
    pub fn normalize_skill_name(&self, name: &str) -> Option<&str> {
        let lower = name.trim().to_lowercase();
        self.skills
            .iter()
            .find(|s| s.synonyms.iter().any(|syn| *syn == lower))
            .map(|s| s.name.as_str())
    }

    pub fn category_of(&self, name: &str) -> SkillCategory {
        self.get_skill(name)
            .map(|s| s.category)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ontology() -> SkillOntology {
        SkillOntology::builtin().unwrap()
    }

    #[test]
    fn test_builtin_order_and_size() {
        let ontology = ontology();
        assert_eq!(ontology.len(), 12);
        assert_eq!(ontology.skills()[0].name, "Python");
        assert_eq!(ontology.skills()[11].name, "Data Engineering");
    }

    #[test]
    fn test_canonical_name_is_implicit_synonym() {
        let ontology = ontology();
        let cv = ontology.get_skill("computer vision").unwrap();
        assert!(cv.synonyms.contains(&"computer vision".to_string()));
        assert!(cv.is_mentioned_in("worked on computer vision pipelines"));
    }

    #[test]
    fn test_word_boundaries() {
        let ontology = ontology();
        let react = ontology.get_skill("React").unwrap();
        assert!(!react.is_mentioned_in("a reactive programming fan"));
        assert!(react.is_mentioned_in("shipped a next.js storefront"));
        assert!(react.is_mentioned_in("react"));

        let cpp = ontology.get_skill("C++").unwrap();
        assert!(cpp.is_mentioned_in("modern c++ developer"));
        assert!(cpp.is_mentioned_in("i write c++."));
        assert!(!cpp.is_mentioned_in("abc++"));

        let java = ontology.get_skill("Java").unwrap();
        assert!(!java.is_mentioned_in("javascript only"));
    }

    #[test]
    fn test_normalize_skill_name() {
        let ontology = ontology();
        assert_eq!(ontology.normalize_skill_name("k8s"), Some("Kubernetes"));
        assert_eq!(ontology.normalize_skill_name("PyTorch"), Some("PyTorch"));
        assert_eq!(ontology.normalize_skill_name("cobol"), None);
        assert_eq!(ontology.category_of("Python"), SkillCategory::Language);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ontology.json");
        std::fs::write(
            &path,
            r#"[{"name": "Rust", "category": "language", "synonyms": ["cargo", "tokio"]},
                {"name": "Go", "synonyms": ["golang"]}]"#,
        )
        .unwrap();

        let ontology = SkillOntology::from_file(&path).unwrap();
        assert_eq!(ontology.len(), 2);
        assert_eq!(ontology.category_of("Rust"), SkillCategory::Language);
        assert_eq!(ontology.category_of("Go"), SkillCategory::Concept);
        assert!(ontology.skills()[0].is_mentioned_in("async with tokio"));
    }

    #[test]
    fn test_invalid_ontologies_are_rejected() {
        let dir = tempfile::tempdir().unwrap();

        let empty = dir.path().join("empty.json");
        std::fs::write(&empty, "[]").unwrap();
        assert!(matches!(SkillOntology::from_file(&empty), Err(Error::Ontology(_))));

        let dup = dir.path().join("dup.json");
        std::fs::write(&dup, r#"[{"name": "Go"}, {"name": "go"}]"#).unwrap();
        assert!(matches!(SkillOntology::from_file(&dup), Err(Error::Ontology(_))));

        let missing = dir.path().join("missing.json");
        assert!(matches!(
            SkillOntology::from_file(&missing),
            Err(Error::InputFile { .. })
        ));
    }
}
