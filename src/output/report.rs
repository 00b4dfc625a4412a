//! Report structures wrapping an ATS analysis with run metadata

use crate::scoring::scores::ScoreWeights;
use crate::scoring::AtsAnalysis;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsReport {
    pub analysis: AtsAnalysis,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub scorer_version: String,
    pub resume_file: String,
    /// `None` when the resume was scored against the builtin vocabulary only
    pub job_file: Option<String>,
    pub processing_time_ms: u64,
    pub weights: ReportWeights,
}

/// Sub-score weights as percentages
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReportWeights {
    pub format: f64,
    pub content: f64,
    pub keyword: f64,
    pub experience: f64,
}

impl From<ScoreWeights> for ReportWeights {
    fn from(w: ScoreWeights) -> Self {
        Self {
            format: w.format * 100.0,
            content: w.content * 100.0,
            keyword: w.keyword * 100.0,
            experience: w.experience * 100.0,
        }
    }
}

impl AtsReport {
    pub fn new(
        analysis: AtsAnalysis,
        resume_file: &Path,
        job_file: Option<&Path>,
        processing_time_ms: u64,
        weights: ScoreWeights,
    ) -> Self {
        Self {
            analysis,
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                scorer_version: env!("CARGO_PKG_VERSION").to_string(),
                resume_file: display_name(resume_file),
                job_file: job_file.map(display_name),
                processing_time_ms,
                weights: weights.into(),
            },
        }
    }

    pub fn generated_at_display(&self) -> String {
        self.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    }

    pub fn job_display(&self) -> &str {
        self.metadata.job_file.as_deref().unwrap_or("builtin keywords only")
    }
}

/// File name without directories; `-` is shown as stdin
fn display_name(path: &Path) -> String {
    if path.as_os_str() == "-" {
        return "stdin".to_string();
    }
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Human label for a 0-100 score
pub fn score_label(score: u8) -> &'static str {
    match score {
        90..=u8::MAX => "Excellent",
        80..=89 => "Very Good",
        70..=79 => "Good",
        60..=69 => "Fair",
        50..=59 => "Below Average",
        _ => "Poor",
    }
}
