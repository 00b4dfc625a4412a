//! CLI interface for the ATS scorer

use crate::config::OutputFormat;
use crate::scoring::keywords::Importance;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ats-scorer")]
#[command(version)]
#[command(about = "Score how well a resume will survive an Applicant Tracking System")]
#[command(long_about = "Score resume ATS compatibility from formatting, content, keyword and experience heuristics, optionally against a job description")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a resume, optionally against a job description
    Analyze {
        /// Path to resume file (PDF, TXT, MD), or - for stdin
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: Option<PathBuf>,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// List every keyword checked
        #[arg(short, long)]
        detailed: bool,

        /// Save output to file (a directory gets a generated file name)
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Disable colored console output
        #[arg(long)]
        no_color: bool,
    },

    /// List the builtin ATS keyword vocabulary
    Keywords {
        /// Only show keywords of this importance: high, medium, low
        #[arg(short, long)]
        importance: Option<String>,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "output.format")
        key: String,

        /// Configuration value
        value: String,
    },
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    format.parse()
}

pub fn parse_importance(value: &str) -> Result<Importance, String> {
    Importance::parse(value)
        .ok_or_else(|| format!("Invalid importance: {}. Supported: high, medium, low", value))
}

/// Validate file extension; `-` (stdin) is always accepted
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    if path.as_os_str() == "-" {
        return Ok(());
    }

    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
