//! ATS scoring: keyword matching, section detection, sub-score heuristics and advice

pub mod keywords;
pub mod sections;
pub mod scores;
pub mod advice;
pub mod analyzer;

pub use analyzer::{analyze_resume, AtsAnalysis, AtsAnalyzer, AtsScoreBreakdown};
