//! ATS scorer: resume Applicant Tracking System compatibility scoring tool

use ats_scorer::cli::{self, Cli, Commands, ConfigAction};
use ats_scorer::config::{Config, OutputFormat};
use ats_scorer::input::InputManager;
use ats_scorer::output::formatter::{save_report_to_file, suggest_filename};
use ats_scorer::output::{AtsReport, ReportGenerator};
use ats_scorer::scoring::keywords::BUILTIN_KEYWORDS;
use ats_scorer::scoring::AtsAnalyzer;
use ats_scorer::{AtsScorerError, Result};
use clap::Parser;
use log::{debug, error, info};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            output,
            detailed,
            save,
            no_color,
        } => {
            cli::validate_file_extension(&resume, &["pdf", "txt", "md", "markdown"])
                .map_err(|e| AtsScorerError::InvalidInput(format!("Resume file: {}", e)))?;
            if let Some(job) = &job {
                cli::validate_file_extension(job, &["txt", "md", "markdown"])
                    .map_err(|e| AtsScorerError::InvalidInput(format!("Job description file: {}", e)))?;
            }
            if resume.as_os_str() == "-" && job.as_deref().is_some_and(|j| j.as_os_str() == "-") {
                return Err(AtsScorerError::InvalidInput(
                    "Only one of --resume and --job can read from stdin".to_string(),
                ));
            }

            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(AtsScorerError::InvalidInput)?,
                None => config.output.format,
            };
            config.output.detailed |= detailed;
            if no_color {
                config.output.color_output = false;
            }

            let mut input_manager = InputManager::from_config(&config.input);

            info!("Reading resume: {}", resume.display());
            let resume_text = input_manager.extract_text(&resume).await?;

            let job_text = match &job {
                Some(job) => {
                    info!("Reading job description: {}", job.display());
                    input_manager.extract_text(job).await?
                }
                None => {
                    info!("No job description given, scoring against builtin keywords only");
                    String::new()
                }
            };

            debug!(
                "Resume: {} characters, job description: {} characters",
                resume_text.len(),
                job_text.len()
            );

            let started = Instant::now();
            let analyzer = AtsAnalyzer::new();
            let analysis = analyzer.analyze(&resume_text, &job_text);
            let elapsed_ms = started.elapsed().as_millis() as u64;

            info!(
                "ATS score {}% (interview probability {}%)",
                analysis.score, analysis.interview_probability
            );

            let report = AtsReport::new(
                analysis,
                &resume,
                job.as_deref(),
                elapsed_ms,
                analyzer.calculator().weights(),
            );

            let generator = ReportGenerator::from_config(&config.output);
            let rendered = generator.generate_report(&report, output_format)?;

            match save {
                Some(target) => {
                    let path = resolve_save_path(target, output_format, &report.metadata.resume_file);
                    save_report_to_file(&rendered, &path)?;
                    println!("Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Keywords { importance } => {
            let filter = importance
                .map(|i| cli::parse_importance(&i))
                .transpose()
                .map_err(AtsScorerError::InvalidInput)?;

            println!("Builtin ATS keywords\n");
            for entry in BUILTIN_KEYWORDS
                .iter()
                .filter(|e| filter.map_or(true, |f| e.importance == f))
            {
                println!("  • {:<16} {}", entry.word, entry.importance);
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let content = toml::to_string_pretty(&config)
                    .map_err(|e| AtsScorerError::Configuration(e.to_string()))?;
                println!("Configuration ({})\n", config_path.display());
                println!("{}", content);
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }

            Some(ConfigAction::Reset) => {
                Config::default().save_to(config_path)?;
                println!("Configuration reset to defaults");
            }

            Some(ConfigAction::Set { key, value }) => {
                config.set(&key, &value)?;
                config.save_to(config_path)?;
                println!("Set {} = {}", key, value);
            }
        },
    }

    Ok(())
}

/// Saving into a directory picks a file name from the resume name and format
fn resolve_save_path(target: PathBuf, format: OutputFormat, resume_name: &str) -> PathBuf {
    if target.is_dir() {
        target.join(suggest_filename(format, resume_name, true))
    } else {
        target
    }
}
