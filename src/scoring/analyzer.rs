//! ATS analyzer: turns a resume and an optional job description into a score report

use crate::scoring::advice::{self, ScoreSummary};
use crate::scoring::keywords::{self, KeywordAnalysis, KeywordExtractor, KeywordSource};
use crate::scoring::scores::ScoreCalculator;
use crate::scoring::sections::{self, Section, SectionDetector};
use log::debug;
use serde::{Deserialize, Serialize};

/// Missing keywords reported per analysis
pub const MAX_MISSING_KEYWORDS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsScoreBreakdown {
    pub total_score: u8,
    pub format_score: u8,
    pub content_score: u8,
    pub keyword_score: u8,
    pub experience_score: u8,
    pub sections: Vec<Section>,
    pub missing_sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsAnalysis {
    pub score: u8,
    pub breakdown: AtsScoreBreakdown,
    pub keywords: Vec<KeywordAnalysis>,
    pub missing_keywords: Vec<String>,
    pub recommendations: Vec<String>,
    pub interview_probability: u8,
    pub explanation: String,
}

impl AtsAnalysis {
    pub fn found_keywords(&self) -> impl Iterator<Item = &KeywordAnalysis> {
        self.keywords.iter().filter(|k| k.found)
    }
}

/// Stateless scorer; every call to [`AtsAnalyzer::analyze`] is independent, so
/// one instance can be shared freely across threads.
pub struct AtsAnalyzer {
    extractor: KeywordExtractor,
    detector: SectionDetector,
    calculator: ScoreCalculator,
}

impl Default for AtsAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl AtsAnalyzer {
    pub fn new() -> Self {
        Self {
            extractor: KeywordExtractor::new(),
            detector: SectionDetector::new(),
            calculator: ScoreCalculator::new(),
        }
    }

    pub fn calculator(&self) -> &ScoreCalculator {
        &self.calculator
    }

    /// Score `resume` against `job_description` (may be empty).
    ///
    /// Never fails: empty inputs fall back to the base score of each heuristic.
    pub fn analyze(&self, resume: &str, job_description: &str) -> AtsAnalysis {
        let lowered = resume.to_lowercase();
        let word_count = resume.split_whitespace().count();

        let job_keywords = self.extractor.extract(job_description);
        let keywords = keywords::match_keywords(&lowered, word_count, &job_keywords);

        let format_score = self.calculator.format_score(resume);
        let content_score = self.calculator.content_score(resume, word_count);
        let keyword_score = self.calculator.keyword_score(&keywords);
        let experience_score = self.calculator.experience_score(resume, &lowered);
        let total_score = self.calculator.total_score(
            format_score,
            content_score,
            keyword_score,
            experience_score,
        );

        debug!(
            "ATS scores: total={} format={} content={} keyword={} experience={} ({} words, {} job keywords)",
            total_score,
            format_score,
            content_score,
            keyword_score,
            experience_score,
            word_count,
            job_keywords.len()
        );

        let found_sections = self.detector.detect(&lowered);
        let missing_sections = sections::missing_sections(&found_sections);
        let missing_keywords = keywords::missing_keywords(&keywords, MAX_MISSING_KEYWORDS);

        let summary = ScoreSummary {
            total: total_score,
            format: format_score,
            content: content_score,
            keyword: keyword_score,
        };

        // job keywords are already unique and lead the missing list
        let job_missing = keywords
            .iter()
            .filter(|k| k.source == KeywordSource::Job && !k.found)
            .count()
            .min(missing_keywords.len());
        let recommendations =
            advice::recommendations(summary, &missing_sections, &missing_keywords, job_missing);
        let interview_probability = advice::interview_probability(total_score, keyword_score);
        let explanation = advice::explanation(summary);

        AtsAnalysis {
            score: total_score,
            breakdown: AtsScoreBreakdown {
                total_score,
                format_score,
                content_score,
                keyword_score,
                experience_score,
                sections: found_sections,
                missing_sections,
            },
            keywords,
            missing_keywords,
            recommendations,
            interview_probability,
            explanation,
        }
    }
}

/// Convenience wrapper building a throwaway analyzer
pub fn analyze_resume(resume: &str, job_description: &str) -> AtsAnalysis {
    AtsAnalyzer::new().analyze(resume, job_description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::advice::{CLOSING_TIPS, KEYWORD_DENSITY_WARNING, LOW_SCORE_WARNING};

    const SAMPLE_RESUME: &str = "Contact: a@b.com, 555-123-4567. Summary: ... Experience: Led a team and developed features, increased revenue by 20%. Education: B.S. Skills: JavaScript, React.";

    fn keyword<'a>(analysis: &'a AtsAnalysis, name: &str) -> &'a KeywordAnalysis {
        analysis.keywords.iter().find(|k| k.keyword == name).unwrap()
    }

    #[test]
    fn test_empty_inputs_are_well_formed() {
        let analysis = analyze_resume("", "");

        assert_eq!(analysis.breakdown.format_score, 50);
        assert_eq!(analysis.breakdown.content_score, 30);
        assert_eq!(analysis.breakdown.keyword_score, 0);
        assert_eq!(analysis.breakdown.experience_score, 40);
        assert_eq!(analysis.score, 24);
        assert_eq!(analysis.interview_probability, 24);
        assert!(analysis.breakdown.sections.is_empty());
        assert_eq!(analysis.breakdown.missing_sections, Section::REQUIRED.to_vec());
        assert_eq!(analysis.missing_keywords.len(), MAX_MISSING_KEYWORDS);
        assert!(!analysis.explanation.is_empty());
    }

    #[test]
    fn test_sample_resume_scenario() {
        let analysis = analyze_resume(SAMPLE_RESUME, "");
        let b = &analysis.breakdown;

        assert!(b.missing_sections.is_empty());
        for section in Section::REQUIRED {
            assert!(b.sections.contains(&section));
        }
        assert_eq!(b.format_score, 70);
        // quantified achievement only, two of six action verbs
        assert_eq!(b.content_score, 50);
        // leadership verb, no tenure or notable employer
        assert_eq!(b.experience_score, 55);

        for name in ["JavaScript", "React", "Led", "Developed"] {
            assert!(keyword(&analysis, name).found, "{} should be found", name);
        }

        let expected_total = ((f64::from(b.format_score) * 0.2
            + f64::from(b.content_score) * 0.2
            + f64::from(b.keyword_score) * 0.4
            + f64::from(b.experience_score) * 0.2)
            / 100.0
            * 100.0)
            .round() as u8;
        assert_eq!(b.total_score, expected_total);
        assert_eq!(analysis.score, b.total_score);
    }

    #[test]
    fn test_keyword_counts() {
        let analysis = analyze_resume("Built on AWS. Migrated to AWS. AWS certified.", "");
        let aws = keyword(&analysis, "AWS");
        assert!(aws.found);
        assert_eq!(aws.count, 3);

        let analysis = analyze_resume("Built on GCP only.", "");
        let aws = keyword(&analysis, "AWS");
        assert!(!aws.found);
        assert_eq!(aws.count, 0);
    }

    #[test]
    fn test_job_keywords_follow_builtin_keywords() {
        let analysis = analyze_resume("Terraform modules", "Terraform and Kubernetes experience");
        let job: Vec<&KeywordAnalysis> = analysis
            .keywords
            .iter()
            .skip(keywords::BUILTIN_KEYWORDS.len())
            .collect();

        let names: Vec<&str> = job.iter().map(|k| k.keyword.as_str()).collect();
        assert_eq!(names, vec!["terraform", "kubernetes", "experience"]);
        assert!(job[0].found);
        assert!(!job[1].found);
        assert_eq!(analysis.missing_keywords[0], "kubernetes");
    }

    #[test]
    fn test_low_score_recommendation_order() {
        let resume = "Contact: jane@example.com. Experience: Developed internal tools. Education: BSc.";
        let job = "Seeking kubernetes terraform golang expertise";
        let analysis = analyze_resume(resume, job);

        assert!(analysis.score < 70);
        assert_eq!(
            analysis.breakdown.missing_sections,
            vec![Section::Summary, Section::Skills]
        );

        let recs = &analysis.recommendations;
        assert_eq!(recs[0], LOW_SCORE_WARNING);
        assert_eq!(recs[1], "Add missing sections: Summary, Skills");
        assert_eq!(
            recs[2],
            "Include these keywords from the job description: seeking, kubernetes, terraform"
        );
        assert_eq!(recs[3], KEYWORD_DENSITY_WARNING);
        assert_eq!(&recs[4..], &CLOSING_TIPS.map(String::from)[..]);
    }

    #[test]
    fn test_builtin_only_keyword_recommendation() {
        let analysis = analyze_resume("Contact: a@b.com", "");

        assert_eq!(
            analysis.missing_keywords,
            vec!["JavaScript", "TypeScript", "React", "Node.js", "Python"]
        );
        assert!(analysis
            .recommendations
            .contains(&"Include these keywords commonly screened by ATS filters: JavaScript, TypeScript, React".to_string()));
        assert!(!analysis.recommendations.iter().any(|r| r.contains("from the job description")));
    }

    #[test]
    fn test_invariants_hold_for_varied_inputs() {
        let analyzer = AtsAnalyzer::new();
        let inputs = [
            ("", "rust rust rust"),
            (SAMPLE_RESUME, "JavaScript React Node.js engineer with AWS"),
            ("Google Amazon Microsoft Apple Meta 10+ years led managed directed", ""),
            ("c++ c# node.js $$$ 100% 100%", "c++ c# node.js"),
        ];

        for (resume, job) in inputs {
            let analysis = analyzer.analyze(resume, job);
            let b = &analysis.breakdown;

            for score in [b.total_score, b.format_score, b.content_score, b.keyword_score, b.experience_score] {
                assert!(score <= 100);
            }
            assert!(analysis.interview_probability <= 95);
            assert!(analysis.missing_keywords.len() <= MAX_MISSING_KEYWORDS);

            for k in &analysis.keywords {
                assert!(k.density >= 0.0);
                assert_eq!(k.found, k.count > 0);
            }

            for section in &b.missing_sections {
                assert!(section.is_required());
                assert!(!b.sections.contains(section));
            }
            for section in Section::REQUIRED {
                assert!(b.sections.contains(&section) ^ b.missing_sections.contains(&section));
            }

            assert_eq!(analyzer.analyze(resume, job), analysis);
        }
    }

    #[test]
    fn test_serializes_camel_case() {
        let analysis = analyze_resume(SAMPLE_RESUME, "");
        let json = serde_json::to_value(&analysis).unwrap();

        assert!(json.get("interviewProbability").is_some());
        assert!(json["breakdown"].get("missingSections").is_some());
        assert_eq!(json["keywords"][0]["importance"], "high");
        assert_eq!(json["breakdown"]["sections"][0], "Contact");
    }
}
