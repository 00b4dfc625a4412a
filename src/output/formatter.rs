//! Output formatters: console, JSON, Markdown and HTML

use crate::config::{OutputConfig, OutputFormat};
use crate::error::Result;
use crate::output::report::{score_label, AtsReport};
use crate::scoring::keywords::{Importance, KeywordAnalysis};
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting ATS reports
pub trait OutputFormatter {
    fn format_report(&self, report: &AtsReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors and score badges
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for API integration and structured data
pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// HTML formatter with inline styling
pub struct HtmlFormatter {
    include_styles: bool,
    include_metadata: bool,
}

/// Report generator that dispatches to the formatter for a format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>ATS Compatibility Report</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        .header {
            text-align: center;
            border-bottom: 3px solid #007acc;
            padding-bottom: 20px;
        }
        .score-badge {
            display: inline-block;
            padding: 8px 16px;
            border-radius: 20px;
            font-weight: bold;
            color: white;
            margin-left: 10px;
        }
        .score-excellent { background: #28a745; }
        .score-good { background: #17a2b8; }
        .score-fair { background: #ffc107; color: #000; }
        .score-poor { background: #dc3545; }
        .score-breakdown {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
            gap: 15px;
        }
        .score-item {
            background: #f8f9fa;
            padding: 15px;
            border-radius: 6px;
            border-left: 4px solid #007acc;
        }
        .keyword {
            display: inline-block;
            padding: 2px 10px;
            margin: 3px;
            border-radius: 12px;
            font-size: 0.9em;
        }
        .keyword-found { background: #d4edda; }
        .keyword-missing { background: #f8d7da; }
        .metadata {
            background: #e9ecef;
            padding: 15px;
            border-radius: 6px;
            margin-top: 30px;
            font-size: 0.9em;
            color: #6c757d;
        }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>ATS Compatibility Report</h1>
            <p>Generated: {{ generated_at }} | Processing time: {{ processing_time }}ms</p>
        </div>

        <h2>Overall Score: {{ total_score }}% <span class="score-badge {{ score_class }}">{{ score_label }}</span></h2>
        <p><strong>Interview probability:</strong> {{ interview_probability }}%</p>
        <p>{{ explanation }}</p>

        <div class="score-breakdown">
            {% for item in sub_scores %}
            <div class="score-item">
                <h4>{{ item.name }}</h4>
                <p><strong>{{ item.score }}%</strong> (weight: {{ item.weight }}%)</p>
            </div>
            {% endfor %}
        </div>

        <h2>Sections</h2>
        <p><strong>Detected:</strong> {{ sections }}</p>
        {% if has_missing_sections %}
        <p><strong>Missing:</strong> {{ missing_sections }}</p>
        {% endif %}

        <h2>Keywords</h2>
        <div>
            {% for kw in found_keywords %}
            <span class="keyword keyword-found">{{ kw.keyword }} &times;{{ kw.count }}</span>
            {% endfor %}
        </div>
        {% if has_missing_keywords %}
        <h3>Missing keywords</h3>
        <div>
            {% for kw in missing_keywords %}
            <span class="keyword keyword-missing">{{ kw }}</span>
            {% endfor %}
        </div>
        {% endif %}

        <h2>Recommendations</h2>
        <ol>
            {% for rec in recommendations %}
            <li>{{ rec }}</li>
            {% endfor %}
        </ol>

        {% if include_metadata %}
        <div class="metadata">
            <p><strong>Generated by ATS Scorer v{{ version }}</strong></p>
            <p><strong>Resume:</strong> {{ resume_file }} | <strong>Job:</strong> {{ job_file }}</p>
        </div>
        {% endif %}
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    include_metadata: bool,
    generated_at: String,
    processing_time: u64,
    total_score: u8,
    score_class: &'static str,
    score_label: &'static str,
    interview_probability: u8,
    explanation: String,
    sub_scores: Vec<HtmlSubScore>,
    sections: String,
    missing_sections: String,
    has_missing_sections: bool,
    found_keywords: Vec<HtmlKeyword>,
    missing_keywords: Vec<String>,
    has_missing_keywords: bool,
    recommendations: Vec<String>,
    version: String,
    resume_file: String,
    job_file: String,
}

struct HtmlSubScore {
    name: &'static str,
    score: u8,
    weight: String,
}

struct HtmlKeyword {
    keyword: String,
    count: usize,
}

/// (label, score, weight percentage) for each sub-score, in display order
fn sub_scores(report: &AtsReport) -> [(&'static str, u8, f64); 4] {
    let b = &report.analysis.breakdown;
    let w = &report.metadata.weights;
    [
        ("Format", b.format_score, w.format),
        ("Content", b.content_score, w.content),
        ("Keywords", b.keyword_score, w.keyword),
        ("Experience", b.experience_score, w.experience),
    ]
}

fn join_display<T: ToString>(items: &[T]) -> String {
    items.iter().map(|i| i.to_string()).collect::<Vec<_>>().join(", ")
}

/// Found keywords, most frequent first
fn ranked_found_keywords(report: &AtsReport) -> Vec<&KeywordAnalysis> {
    let mut found: Vec<&KeywordAnalysis> = report.analysis.found_keywords().collect();
    found.sort_by(|a, b| b.count.cmp(&a.count));
    found
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let (prefix, color) = match level {
            1 => ("█", Color::Blue),
            2 => ("▓", Color::Green),
            _ => ("▒", Color::Yellow),
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn score_color(score: u8) -> Color {
        match score {
            80..=u8::MAX => Color::Green,
            60..=79 => Color::Yellow,
            _ => Color::Red,
        }
    }

    fn format_score_badge(&self, score: u8) -> String {
        let badge = score_label(score).to_uppercase();
        if self.use_colors {
            format!("[{}]", badge.color(Self::score_color(score)).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_bar(&self, score: u8) -> String {
        let filled = usize::from(score) / 5;
        let bar = format!("{}{}", "■".repeat(filled), "·".repeat(20 - filled));
        self.colorize(&bar, Self::score_color(score))
    }

    fn importance_marker(importance: Importance) -> &'static str {
        match importance {
            Importance::High => "!!!",
            Importance::Medium => "!!",
            Importance::Low => "!",
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AtsReport) -> Result<String> {
        let analysis = &report.analysis;
        let breakdown = &analysis.breakdown;
        let mut output = String::new();

        output.push_str(&self.format_header("ATS COMPATIBILITY ANALYSIS", 1));
        output.push_str(&format!(
            "Resume: {} | Job: {}\n",
            report.metadata.resume_file,
            report.job_display()
        ));

        output.push_str(&self.format_header("Overall", 2));
        output.push_str(&format!(
            "ATS Score: {}% {}\n",
            analysis.score,
            self.format_score_badge(analysis.score)
        ));
        output.push_str(&format!("Interview Probability: {}%\n\n", analysis.interview_probability));
        output.push_str(&format!("{}\n", self.colorize(&analysis.explanation, Color::Cyan)));

        output.push_str(&self.format_header("Score Breakdown", 3));
        for (name, score, weight) in sub_scores(report) {
            output.push_str(&format!(
                "  {:<11} {} {:>3}% (weight: {:.0}%)\n",
                name,
                self.format_bar(score),
                score,
                weight
            ));
        }

        output.push_str(&self.format_header("Sections", 3));
        output.push_str(&format!("  Detected: {}\n", join_display(&breakdown.sections)));
        if !breakdown.missing_sections.is_empty() {
            output.push_str(&format!(
                "  Missing:  {}\n",
                self.colorize(&join_display(&breakdown.missing_sections), Color::Red)
            ));
        }

        output.push_str(&self.format_header("Keywords", 3));
        let found = ranked_found_keywords(report);
        let shown = if self.detailed { found.len() } else { found.len().min(10) };
        for keyword in found.iter().take(shown) {
            output.push_str(&format!(
                "  {} {} (x{}, {:.1}% density)\n",
                self.colorize("✓", Color::Green),
                keyword.keyword,
                keyword.count,
                keyword.density
            ));
        }
        if found.len() > shown {
            output.push_str(&format!("  ... and {} more\n", found.len() - shown));
        }
        if !analysis.missing_keywords.is_empty() {
            output.push_str(&format!(
                "  Missing: {}\n",
                self.colorize(&analysis.missing_keywords.join(", "), Color::Yellow)
            ));
        }

        if self.detailed {
            output.push_str(&self.format_header("All Keywords", 3));
            for keyword in &analysis.keywords {
                let status = if keyword.found {
                    self.colorize("found  ", Color::Green)
                } else {
                    self.colorize("missing", Color::Red)
                };
                output.push_str(&format!(
                    "  {} {:<3} {} [{:?}]\n",
                    status,
                    Self::importance_marker(keyword.importance),
                    keyword.keyword,
                    keyword.source
                ));
            }
        }

        output.push_str(&self.format_header("Recommendations", 2));
        for (i, rec) in analysis.recommendations.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, rec));
        }

        output.push_str(&format!(
            "\n{} ATS Scorer v{} | {} | {}ms\n",
            self.colorize("ℹ", Color::Blue),
            report.metadata.scorer_version,
            report.generated_at_display(),
            report.metadata.processing_time_ms
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AtsReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AtsReport) -> Result<String> {
        let analysis = &report.analysis;
        let breakdown = &analysis.breakdown;
        let mut output = String::new();

        output.push_str("# ATS Compatibility Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                report.generated_at_display(),
                report.metadata.processing_time_ms
            ));
            output.push_str(&format!(
                "**Resume:** `{}` | **Job:** `{}`\n\n",
                report.metadata.resume_file,
                report.job_display()
            ));
        }

        output.push_str("## Summary\n\n");
        output.push_str(&format!(
            "**ATS Score:** {}% ({})\n\n",
            analysis.score,
            score_label(analysis.score)
        ));
        output.push_str(&format!(
            "**Interview Probability:** {}%\n\n",
            analysis.interview_probability
        ));
        output.push_str(&format!("> {}\n\n", analysis.explanation));

        output.push_str("### Score Breakdown\n\n");
        output.push_str("| Component | Score | Weight |\n");
        output.push_str("|-----------|-------|--------|\n");
        for (name, score, weight) in sub_scores(report) {
            output.push_str(&format!("| {} | {}% | {:.0}% |\n", name, score, weight));
        }
        output.push('\n');

        output.push_str("## Sections\n\n");
        output.push_str(&format!("- **Detected:** {}\n", join_display(&breakdown.sections)));
        if !breakdown.missing_sections.is_empty() {
            output.push_str(&format!("- **Missing:** {}\n", join_display(&breakdown.missing_sections)));
        }
        output.push('\n');

        output.push_str("## Keywords\n\n");
        let found = ranked_found_keywords(report);
        if found.is_empty() {
            output.push_str("No keywords matched.\n\n");
        } else {
            output.push_str("| Keyword | Count | Density | Importance |\n");
            output.push_str("|---------|-------|---------|------------|\n");
            for keyword in found {
                output.push_str(&format!(
                    "| {} | {} | {:.1}% | {} |\n",
                    keyword.keyword, keyword.count, keyword.density, keyword.importance
                ));
            }
            output.push('\n');
        }
        if !analysis.missing_keywords.is_empty() {
            output.push_str(&format!(
                "**Missing keywords:** `{}`\n\n",
                analysis.missing_keywords.join("`, `")
            ));
        }

        output.push_str("## Recommendations\n\n");
        for (i, rec) in analysis.recommendations.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, rec));
        }

        if self.include_metadata {
            output.push_str("\n---\n\n");
            output.push_str(&format!(
                "*Generated by ATS Scorer v{}*\n",
                report.metadata.scorer_version
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool, include_metadata: bool) -> Self {
        Self {
            include_styles,
            include_metadata,
        }
    }

    fn create_template_data(&self, report: &AtsReport) -> HtmlTemplate {
        let analysis = &report.analysis;
        let breakdown = &analysis.breakdown;

        let score_class = match analysis.score {
            90..=u8::MAX => "score-excellent",
            70..=89 => "score-good",
            60..=69 => "score-fair",
            _ => "score-poor",
        };

        let sub_scores = sub_scores(report)
            .into_iter()
            .map(|(name, score, weight)| HtmlSubScore {
                name,
                score,
                weight: format!("{:.0}", weight),
            })
            .collect();

        let found_keywords = ranked_found_keywords(report)
            .into_iter()
            .map(|k| HtmlKeyword {
                keyword: k.keyword.clone(),
                count: k.count,
            })
            .collect();

        HtmlTemplate {
            include_styles: self.include_styles,
            include_metadata: self.include_metadata,
            generated_at: report.generated_at_display(),
            processing_time: report.metadata.processing_time_ms,
            total_score: analysis.score,
            score_class,
            score_label: score_label(analysis.score),
            interview_probability: analysis.interview_probability,
            explanation: analysis.explanation.clone(),
            sub_scores,
            sections: join_display(&breakdown.sections),
            missing_sections: join_display(&breakdown.missing_sections),
            has_missing_sections: !breakdown.missing_sections.is_empty(),
            found_keywords,
            missing_keywords: analysis.missing_keywords.clone(),
            has_missing_keywords: !analysis.missing_keywords.is_empty(),
            recommendations: analysis.recommendations.clone(),
            version: report.metadata.scorer_version.clone(),
            resume_file: report.metadata.resume_file.clone(),
            job_file: report.job_display().to_string(),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &AtsReport) -> Result<String> {
        Ok(self.create_template_data(report).render()?)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true, true),
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(config.color_output, config.detailed),
            json_formatter: JsonFormatter::new(config.pretty_json),
            markdown_formatter: MarkdownFormatter::new(config.include_metadata),
            html_formatter: HtmlFormatter::new(true, config.include_metadata),
        }
    }

    pub fn generate_report(&self, report: &AtsReport, format: OutputFormat) -> Result<String> {
        let formatter: &dyn OutputFormatter = match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
            OutputFormat::Html => &self.html_formatter,
        };
        debug_assert_eq!(formatter.supports_format(), format);
        formatter.format_report(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };

    format!("{}_ats{}.{}", base_name, timestamp_suffix, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::scores::ScoreWeights;
    use crate::scoring::AtsAnalyzer;
    use tempfile::TempDir;

    fn sample_report() -> AtsReport {
        let analyzer = AtsAnalyzer::new();
        let analysis = analyzer.analyze(
            "Contact: jane@example.com. Skills: React and Python.",
            "React developer wanted",
        );
        AtsReport::new(
            analysis,
            Path::new("resume.txt"),
            Some(Path::new("job.md")),
            5,
            ScoreWeights::default(),
        )
    }

    #[test]
    fn test_console_without_colors() {
        let report = sample_report();
        let output = ConsoleFormatter::new(false, false).format_report(&report).unwrap();

        assert!(output.contains("ATS COMPATIBILITY ANALYSIS"));
        assert!(output.contains(&format!("ATS Score: {}%", report.analysis.score)));
        assert!(output.contains("Recommendations"));
        assert!(!output.contains("\u{1b}["));
        assert!(!output.contains("All Keywords"));
    }

    #[test]
    fn test_console_detailed_lists_all_keywords() {
        let report = sample_report();
        let output = ConsoleFormatter::new(false, true).format_report(&report).unwrap();

        assert!(output.contains("All Keywords"));
        assert!(output.contains("TypeScript"));
    }

    #[test]
    fn test_json_round_trips() {
        let report = sample_report();
        let json = JsonFormatter::new(false).format_report(&report).unwrap();
        let parsed: AtsReport = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.analysis.score, report.analysis.score);
        assert_eq!(parsed.analysis.recommendations, report.analysis.recommendations);
        assert_eq!(parsed.analysis.keywords.len(), report.analysis.keywords.len());
        assert_eq!(parsed.metadata.job_file.as_deref(), Some("job.md"));
    }

    #[test]
    fn test_markdown_sections() {
        let report = sample_report();
        let output = MarkdownFormatter::new(true).format_report(&report).unwrap();

        assert!(output.starts_with("# ATS Compatibility Report"));
        assert!(output.contains("| Keywords |"));
        assert!(output.contains("**Resume:** `resume.txt`"));
        assert!(output.contains("| React |"));
    }

    #[test]
    fn test_html_output() {
        let report = sample_report();
        let html = HtmlFormatter::new(false, true).format_report(&report).unwrap();

        assert!(html.contains("ATS Compatibility Report"));
        assert!(html.contains("keyword-found"));
        assert!(html.contains("<strong>Resume:</strong> resume.txt"));
        assert!(!html.contains("<style>"));
    }

    #[test]
    fn test_generator_dispatch_and_save() {
        let report = sample_report();
        let generator = ReportGenerator::from_config(&crate::config::Config::default().output);
        let json = generator.generate_report(&report, OutputFormat::Json).unwrap();
        assert!(json.contains("\"interviewProbability\""));

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out").join(suggest_filename(OutputFormat::Json, "resume.txt", false));
        save_report_to_file(&json, &path).unwrap();

        assert!(path.ends_with("resume_ats.json"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), json);
    }
}
