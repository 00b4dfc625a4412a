//! Sub-score heuristics: format, content, keyword and experience

use crate::scoring::keywords::{Importance, KeywordAnalysis};
use aho_corasick::AhoCorasick;
use regex::Regex;

const MAX_SCORE: u32 = 100;

const FORMAT_BASE: u32 = 50;
const FORMAT_SIGNAL_BONUS: u32 = 10;

const CONTENT_BASE: u32 = 30;
const CONTENT_LENGTH_BONUS: u32 = 20;
const CONTENT_VERB_BONUS: u32 = 30;
const CONTENT_QUANTIFIED_BONUS: u32 = 20;
/// Word count must fall strictly inside this range
const CONTENT_WORD_RANGE: (usize, usize) = (200, 1000);
const MIN_ACTION_VERBS: usize = 4;

const EXPERIENCE_BASE: u32 = 40;
const EXPERIENCE_YEARS_BONUS: u32 = 15;
const EXPERIENCE_COMPANY_BONUS: u32 = 10;
const EXPERIENCE_COMPANY_CAP: u32 = 20;
const EXPERIENCE_LEADERSHIP_BONUS: u32 = 15;

const KEYWORD_COVERAGE_WEIGHT: f64 = 60.0;
const KEYWORD_HIGH_WEIGHT: f64 = 40.0;

const ACTION_VERBS: [&str; 6] = ["achieved", "designed", "developed", "implemented", "led", "managed"];
const LEADERSHIP_VERBS: [&str; 5] = ["led", "managed", "directed", "oversaw", "spearheaded"];
const NOTABLE_COMPANIES: [&str; 7] = ["Google", "Amazon", "Microsoft", "Apple", "Meta", "Netflix", "Tesla"];

/// Weighted combination of the four sub-scores
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub format: f64,
    pub content: f64,
    pub keyword: f64,
    pub experience: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            format: 0.2,
            content: 0.2,
            keyword: 0.4,
            experience: 0.2,
        }
    }
}

/// Precompiled matchers shared by every sub-score heuristic
pub struct ScoreCalculator {
    email_regex: Regex,
    phone_regex: Regex,
    quantified_regex: Regex,
    years_regex: Regex,
    action_verbs: AhoCorasick,
    leadership_verbs: AhoCorasick,
    companies: AhoCorasick,
    weights: ScoreWeights,
}

impl Default for ScoreCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreCalculator {
    pub fn new() -> Self {
        let email_regex = Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
            .expect("Invalid email regex");

        let phone_regex = Regex::new(r"\b(?:\+?1[-. ]?)?\(?[0-9]{3}\)?[-. ]?[0-9]{3}[-. ]?[0-9]{4}\b")
            .expect("Invalid phone regex");

        let quantified_regex = Regex::new(r"(?i)\d+(?:\.\d+)?\s?%|\$\s?\d[\d,]*|increased|decreased|improved")
            .expect("Invalid quantified achievement regex");

        let years_regex = Regex::new(r"(?i)\d+\+?\s*years?")
            .expect("Invalid years regex");

        let action_verbs = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(ACTION_VERBS)
            .expect("Invalid action verb matcher");

        let leadership_verbs = AhoCorasick::new(LEADERSHIP_VERBS)
            .expect("Invalid leadership verb matcher");

        let companies = AhoCorasick::new(NOTABLE_COMPANIES)
            .expect("Invalid company matcher");

        Self {
            email_regex,
            phone_regex,
            quantified_regex,
            years_regex,
            action_verbs,
            leadership_verbs,
            companies,
            weights: ScoreWeights::default(),
        }
    }

    pub fn weights(&self) -> ScoreWeights {
        self.weights
    }

    /// Contact details an ATS can parse, checked on the raw resume
    pub fn format_score(&self, resume: &str) -> u8 {
        let signals = [
            self.email_regex.is_match(resume),
            self.phone_regex.is_match(resume),
            resume.contains("linkedin.com"),
            resume.contains("github.com"),
        ];

        let score = FORMAT_BASE + signals.iter().filter(|&&s| s).count() as u32 * FORMAT_SIGNAL_BONUS;
        cap(score)
    }

    /// Length, action verbs and quantified achievements
    pub fn content_score(&self, resume: &str, word_count: usize) -> u8 {
        let mut score = CONTENT_BASE;

        let (min_words, max_words) = CONTENT_WORD_RANGE;
        if word_count > min_words && word_count < max_words {
            score += CONTENT_LENGTH_BONUS;
        }

        if distinct_matches(&self.action_verbs, resume, ACTION_VERBS.len()) >= MIN_ACTION_VERBS {
            score += CONTENT_VERB_BONUS;
        }

        if self.quantified_regex.is_match(resume) {
            score += CONTENT_QUANTIFIED_BONUS;
        }

        cap(score)
    }

    /// Keyword coverage plus a bonus for high-importance keywords.
    ///
    /// Either ratio is 0 when its denominator is empty.
    pub fn keyword_score(&self, keywords: &[KeywordAnalysis]) -> u8 {
        let total = keywords.len();
        let found = keywords.iter().filter(|k| k.found).count();

        let high: Vec<&KeywordAnalysis> = keywords
            .iter()
            .filter(|k| k.importance == Importance::High)
            .collect();
        let high_found = high.iter().filter(|k| k.found).count();

        let base = ratio(found, total) * KEYWORD_COVERAGE_WEIGHT;
        let high_bonus = ratio(high_found, high.len()) * KEYWORD_HIGH_WEIGHT;

        cap((base + high_bonus).round() as u32)
    }

    /// Seniority signals: tenure, notable employers and leadership verbs
    pub fn experience_score(&self, resume: &str, lowered_resume: &str) -> u8 {
        let mut score = EXPERIENCE_BASE;

        if self.years_regex.is_match(resume) {
            score += EXPERIENCE_YEARS_BONUS;
        }

        let companies = distinct_matches(&self.companies, resume, NOTABLE_COMPANIES.len()) as u32;
        score += (companies * EXPERIENCE_COMPANY_BONUS).min(EXPERIENCE_COMPANY_CAP);

        if self.leadership_verbs.is_match(lowered_resume) {
            score += EXPERIENCE_LEADERSHIP_BONUS;
        }

        cap(score)
    }

    pub fn total_score(&self, format: u8, content: u8, keyword: u8, experience: u8) -> u8 {
        let w = self.weights;
        let weighted = f64::from(format) * w.format
            + f64::from(content) * w.content
            + f64::from(keyword) * w.keyword
            + f64::from(experience) * w.experience;

        cap((weighted / 100.0 * 100.0).round() as u32)
    }
}

/// Number of distinct patterns of `matcher` occurring anywhere in `text`
fn distinct_matches(matcher: &AhoCorasick, text: &str, pattern_count: usize) -> usize {
    let mut seen = vec![false; pattern_count];
    for mat in matcher.find_overlapping_iter(text) {
        seen[mat.pattern().as_usize()] = true;
    }
    seen.into_iter().filter(|&s| s).count()
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

fn cap(score: u32) -> u8 {
    score.min(MAX_SCORE) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::keywords::KeywordSource;

    fn keyword(found: bool, importance: Importance) -> KeywordAnalysis {
        KeywordAnalysis {
            keyword: "k".to_string(),
            found,
            count: usize::from(found),
            density: 0.0,
            importance,
            source: KeywordSource::Builtin,
        }
    }

    #[test]
    fn test_format_score_signals() {
        let calc = ScoreCalculator::new();
        assert_eq!(calc.format_score(""), 50);
        assert_eq!(calc.format_score("jane@example.com"), 60);
        assert_eq!(calc.format_score("jane@example.com (555) 123-4567"), 70);
        assert_eq!(
            calc.format_score("jane@example.com 555.123.4567 linkedin.com/in/jane github.com/jane"),
            90
        );
    }

    #[test]
    fn test_content_score_bonuses() {
        let calc = ScoreCalculator::new();
        assert_eq!(calc.content_score("", 0), 30);

        let verbs = "Achieved goals, designed systems, developed apps, implemented pipelines";
        assert_eq!(calc.content_score(verbs, 8), 60);

        let quantified = "Cut costs by 15%";
        assert_eq!(calc.content_score(quantified, 4), 50);
        assert_eq!(calc.content_score("Saved $20,000", 2), 50);

        let everything = format!("{} and increased revenue", verbs);
        assert_eq!(calc.content_score(&everything, 500), 100);
        // boundary is exclusive
        assert_eq!(calc.content_score("", 200), 30);
        assert_eq!(calc.content_score("", 1000), 30);
    }

    #[test]
    fn test_keyword_score() {
        let calc = ScoreCalculator::new();
        let keywords = vec![
            keyword(true, Importance::High),
            keyword(false, Importance::High),
            keyword(true, Importance::Low),
            keyword(false, Importance::Low),
        ];
        // 2/4 * 60 + 1/2 * 40
        assert_eq!(calc.keyword_score(&keywords), 50);
    }

    #[test]
    fn test_keyword_score_without_high_importance() {
        let calc = ScoreCalculator::new();
        let keywords = vec![keyword(true, Importance::Low), keyword(true, Importance::Medium)];
        assert_eq!(calc.keyword_score(&keywords), 60);
        assert_eq!(calc.keyword_score(&[]), 0);
    }

    #[test]
    fn test_experience_score() {
        let calc = ScoreCalculator::new();
        assert_eq!(calc.experience_score("", ""), 40);

        let resume = "8+ years at Google, Amazon and Netflix. Led the platform team.";
        let lowered = resume.to_lowercase();
        // 40 + 15 + min(30, 20) + 15
        assert_eq!(calc.experience_score(resume, &lowered), 90);

        // company names are case-sensitive
        assert_eq!(calc.experience_score("google", "google"), 40);
    }

    #[test]
    fn test_total_score_weights() {
        let calc = ScoreCalculator::new();
        assert_eq!(calc.total_score(100, 100, 100, 100), 100);
        assert_eq!(calc.total_score(50, 30, 0, 40), 24);
        assert_eq!(calc.total_score(70, 50, 50, 55), 55);
    }
}
