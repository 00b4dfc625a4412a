//! Builtin ATS vocabulary, job-description keyword extraction and keyword matching

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Maximum number of keywords pulled out of a job description
pub const MAX_JOB_KEYWORDS: usize = 20;

/// Job-description tokens must be longer than this to count as keywords
const MIN_JOB_KEYWORD_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    High,
    Medium,
    Low,
}

impl Importance {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "high" => Some(Importance::High),
            "medium" => Some(Importance::Medium),
            "low" => Some(Importance::Low),
            _ => None,
        }
    }

    /// Sort rank, lower is more important
    fn rank(self) -> u8 {
        match self {
            Importance::High => 0,
            Importance::Medium => 1,
            Importance::Low => 2,
        }
    }
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Importance::High => write!(f, "high"),
            Importance::Medium => write!(f, "medium"),
            Importance::Low => write!(f, "low"),
        }
    }
}

/// A member of the builtin ATS vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeywordEntry {
    pub word: &'static str,
    pub importance: Importance,
}

const fn entry(word: &'static str, importance: Importance) -> KeywordEntry {
    KeywordEntry { word, importance }
}

/// Default keyword set every resume is checked against
pub static BUILTIN_KEYWORDS: &[KeywordEntry] = &[
    // Technical skills
    entry("JavaScript", Importance::High),
    entry("TypeScript", Importance::High),
    entry("React", Importance::High),
    entry("Node.js", Importance::High),
    entry("Python", Importance::High),
    entry("SQL", Importance::High),
    entry("AWS", Importance::High),
    entry("Docker", Importance::Medium),
    entry("Kubernetes", Importance::Medium),
    entry("Git", Importance::Medium),
    entry("REST API", Importance::Medium),
    entry("CI/CD", Importance::Medium),
    entry("GraphQL", Importance::Low),
    entry("Agile", Importance::Medium),
    // Soft skills
    entry("Leadership", Importance::High),
    entry("Communication", Importance::Medium),
    entry("Problem Solving", Importance::Medium),
    entry("Teamwork", Importance::Medium),
    entry("Collaboration", Importance::Low),
    // Action verbs
    entry("Led", Importance::High),
    entry("Managed", Importance::Medium),
    entry("Developed", Importance::Medium),
    entry("Designed", Importance::Medium),
    entry("Implemented", Importance::Medium),
    entry("Achieved", Importance::Low),
    entry("Improved", Importance::Low),
    entry("Optimized", Importance::Low),
];

/// Importance of a keyword, looked up in the builtin table by case-insensitive
/// exact match. Unknown keywords are `Low`.
pub fn importance_of(keyword: &str) -> Importance {
    BUILTIN_KEYWORDS
        .iter()
        .find(|e| e.word.eq_ignore_ascii_case(keyword))
        .map(|e| e.importance)
        .unwrap_or(Importance::Low)
}

/// Where a matched keyword came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordSource {
    Builtin,
    Job,
}

/// Per-keyword match result against one resume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordAnalysis {
    pub keyword: String,
    pub found: bool,
    pub count: usize,
    /// Occurrences per hundred resume words
    pub density: f64,
    pub importance: Importance,
    pub source: KeywordSource,
}

/// Tokenizer for job descriptions; keeps `c++`, `c#` and `node.js` whole
pub struct KeywordExtractor {
    token_regex: Regex,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordExtractor {
    pub fn new() -> Self {
        let token_regex = Regex::new(r"[a-z0-9+#.]+").expect("Invalid keyword token regex");
        Self { token_regex }
    }

    /// Extract up to 20 unique candidate keywords, in order of first appearance
    pub fn extract(&self, job_description: &str) -> Vec<String> {
        let lowered = job_description.to_lowercase();
        let mut seen = HashSet::new();
        let mut keywords = Vec::new();

        for token in self.token_regex.find_iter(&lowered) {
            let token = token.as_str();
            if token.len() <= MIN_JOB_KEYWORD_LEN {
                continue;
            }
            if seen.insert(token) {
                keywords.push(token.to_string());
                if keywords.len() == MAX_JOB_KEYWORDS {
                    break;
                }
            }
        }

        keywords
    }
}

/// Count non-overlapping, case-insensitive occurrences of `keyword` in a
/// resume that has already been lowercased.
pub fn count_occurrences(lowered_resume: &str, keyword: &str) -> usize {
    let needle = keyword.to_lowercase();
    if needle.is_empty() {
        return 0;
    }
    lowered_resume.matches(needle.as_str()).count()
}

/// Match builtin keywords followed by job keywords against the resume.
///
/// Keywords present in both lists are analysed twice.
pub fn match_keywords(
    lowered_resume: &str,
    word_count: usize,
    job_keywords: &[String],
) -> Vec<KeywordAnalysis> {
    let analyse = |keyword: &str, source: KeywordSource| {
        let count = count_occurrences(lowered_resume, keyword);
        let density = if word_count == 0 {
            0.0
        } else {
            count as f64 / word_count as f64 * 100.0
        };

        KeywordAnalysis {
            keyword: keyword.to_string(),
            found: count > 0,
            count,
            density,
            importance: importance_of(keyword),
            source,
        }
    };

    let builtin = BUILTIN_KEYWORDS
        .iter()
        .map(|e| analyse(e.word, KeywordSource::Builtin));
    let job = job_keywords
        .iter()
        .map(|k| analyse(k, KeywordSource::Job));

    builtin.chain(job).collect()
}

/// Keywords the resume lacks: job-description keywords first, then builtin
/// ones by descending importance. Case-insensitively unique, at most `limit`.
pub fn missing_keywords(keywords: &[KeywordAnalysis], limit: usize) -> Vec<String> {
    let mut builtin: Vec<&KeywordAnalysis> = keywords
        .iter()
        .filter(|k| !k.found && k.source == KeywordSource::Builtin)
        .collect();
    builtin.sort_by_key(|k| k.importance.rank());

    let job = keywords
        .iter()
        .filter(|k| !k.found && k.source == KeywordSource::Job);

    let mut seen = HashSet::new();
    job.chain(builtin)
        .filter(|k| seen.insert(k.keyword.to_lowercase()))
        .take(limit)
        .map(|k| k.keyword.clone())
        .collect()
}
