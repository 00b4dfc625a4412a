//! Recommendations, interview probability and the plain-language explanation

use crate::scoring::sections::Section;

/// Below this total score the resume gets a general optimization warning
const LOW_SCORE_THRESHOLD: u8 = 70;
const WEAK_KEYWORD_THRESHOLD: u8 = 50;
const WEAK_CONTENT_THRESHOLD: u8 = 50;
const WEAK_FORMAT_THRESHOLD: u8 = 60;
const RECOMMENDED_KEYWORDS: usize = 3;

pub const MAX_INTERVIEW_PROBABILITY: u8 = 95;

pub const LOW_SCORE_WARNING: &str =
    "Your resume needs significant optimization to pass ATS filters. Address the items below first.";
pub const KEYWORD_DENSITY_WARNING: &str =
    "Increase keyword density by naturally weaving relevant skills and technologies into your experience bullets";

pub const CLOSING_TIPS: [&str; 3] = [
    "Use a clean, single-column layout so ATS parsers read sections in order",
    "Avoid graphics, tables, and text boxes, which ATS parsers often skip",
    "Use standard fonts such as Arial, Calibri, or Times New Roman",
];

/// Inputs the recommendation and explanation rules look at
#[derive(Debug, Clone, Copy)]
pub struct ScoreSummary {
    pub total: u8,
    pub format: u8,
    pub content: u8,
    pub keyword: u8,
}

/// Ordered, rule-based improvement suggestions.
///
/// `job_missing` is how many leading entries of `missing_keywords` came from
/// the job description rather than the builtin vocabulary.
pub fn recommendations(
    scores: ScoreSummary,
    missing_sections: &[Section],
    missing_keywords: &[String],
    job_missing: usize,
) -> Vec<String> {
    let mut recs = Vec::new();

    if scores.total < LOW_SCORE_THRESHOLD {
        recs.push(LOW_SCORE_WARNING.to_string());
    }

    if !missing_sections.is_empty() {
        let names: Vec<String> = missing_sections.iter().map(|s| s.to_string()).collect();
        recs.push(format!("Add missing sections: {}", names.join(", ")));
    }

    if !missing_keywords.is_empty() {
        let top: Vec<&str> = missing_keywords
            .iter()
            .take(RECOMMENDED_KEYWORDS)
            .map(String::as_str)
            .collect();
        let origin = if job_missing >= top.len() {
            "from the job description"
        } else if job_missing == 0 {
            "commonly screened by ATS filters"
        } else {
            "from the job description and common ATS screens"
        };
        recs.push(format!("Include these keywords {}: {}", origin, top.join(", ")));
    }

    if scores.keyword < WEAK_KEYWORD_THRESHOLD {
        recs.push(KEYWORD_DENSITY_WARNING.to_string());
    }

    recs.extend(CLOSING_TIPS.iter().map(|tip| tip.to_string()));
    recs
}

/// Total score boosted by up to 50% from the keyword score, capped at 95
pub fn interview_probability(total: u8, keyword: u8) -> u8 {
    let boosted = (f64::from(total) / 100.0) * 100.0 * (1.0 + f64::from(keyword) / 200.0);
    boosted.round().min(f64::from(MAX_INTERVIEW_PROBABILITY)) as u8
}

pub fn explanation(scores: ScoreSummary) -> String {
    let opening = match scores.total {
        90..=u8::MAX => "Your resume is excellently optimized for ATS systems and should pass most automated filters.",
        75..=89 => "Your resume is well optimized for ATS systems, with room for a few targeted improvements.",
        60..=74 => "Your resume has moderate ATS compatibility but needs some improvements to stand out.",
        _ => "Your resume may struggle to pass ATS filters in its current form.",
    };

    let mut sentences = vec![opening];

    if scores.keyword < WEAK_KEYWORD_THRESHOLD {
        sentences.push("Adding more keywords from the job description would significantly improve your match.");
    }
    if scores.content < WEAK_CONTENT_THRESHOLD {
        sentences.push("Strengthen your content with action verbs and quantifiable achievements.");
    }
    if scores.format < WEAK_FORMAT_THRESHOLD {
        sentences.push("Include complete contact details such as email, phone, and LinkedIn so parsers can identify you.");
    }

    sentences.join(" ")
}
