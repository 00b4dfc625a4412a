//! Resume ATS compatibility scoring library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod scoring;

pub use config::Config;
pub use error::{AtsScorerError, Result};
pub use scoring::{analyze_resume, AtsAnalysis, AtsAnalyzer, AtsScoreBreakdown};
