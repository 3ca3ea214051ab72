use std::cmp::Ordering;
use std::collections::HashSet;

use regex::Regex;

use crate::error::Result;

const MIN_SENTENCE_CHARS: usize = 20;
const MAX_SENTENCE_CHARS: usize = 220;
const FALLBACK_CHARS: usize = 240;

/// Extractive summarizer: keeps the longest, most lexically varied sentences.
pub struct Summarizer {
    whitespace: Regex,
    sentence_break: Regex,
    word: Regex,
    max_sentences: usize,
}

impl Summarizer {
    pub fn new(max_sentences: usize) -> Result<Self> {
        Ok(Self {
            whitespace: Regex::new(r"\s+")?,
            sentence_break: Regex::new(r"[.!?]\s+")?,
            word: Regex::new(r"\w+")?,
            max_sentences,
        })
    }

    /// Collapse newlines and runs of whitespace into single spaces.
    pub fn clean_text(&self, text: &str) -> String {
        self.whitespace
            .replace_all(text.trim(), " ")
            .trim()
            .to_string()
    }

    pub fn summarize(&self, text: &str) -> String {
        let text = self.clean_text(text);

        let mut scored: Vec<(f64, &str)> = self
            .split_sentences(&text)
            .into_iter()
            .filter(|s| {
                let len = s.chars().count();
                (MIN_SENTENCE_CHARS..=MAX_SENTENCE_CHARS).contains(&len)
            })
            .map(|s| (self.score(s), s))
            .collect();

        if scored.is_empty() {
            return text.chars().take(FALLBACK_CHARS).collect();
        }

        scored.sort_by(|a, b| match b.0.total_cmp(&a.0) {
            Ordering::Equal => b.1.cmp(a.1),
            other => other,
        });

        scored
            .into_iter()
            .take(self.max_sentences)
            .map(|(_, s)| s)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Split after `.`, `!` or `?` followed by whitespace.
    fn split_sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut sentences = Vec::new();
        let mut start = 0;
        for m in self.sentence_break.find_iter(text) {
            sentences.push(text[start..m.start() + 1].trim());
            start = m.end();
        }
        sentences.push(text[start..].trim());
        sentences.retain(|s| !s.is_empty());
        sentences
    }

    fn score(&self, sentence: &str) -> f64 {
        let lowered = sentence.to_lowercase();
        let unique: HashSet<&str> = self.word.find_iter(&lowered).map(|m| m.as_str()).collect();
        unique.len() as f64 + sentence.chars().count() as f64 * 0.01
    }
}
