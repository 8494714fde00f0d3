//! CLI interface for the resume screener

use clap::{ArgGroup, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-screener")]
#[command(about = "Screen resumes against a job description")]
#[command(long_about = "Rank resumes by TF-IDF similarity to a job description and report matched and missing skills")]
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
    /// Screen one or more resumes against a job description
    #[command(group(ArgGroup::new("job_source").required(true).args(["job", "job_text", "sample_job"])))]
    Screen {
        /// Resume files (PDF, TXT, MD)
        #[arg(required = true)]
        resumes: Vec<PathBuf>,

        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: Option<PathBuf>,

        /// Job description text given inline
        #[arg(long)]
        job_text: Option<String>,

        /// Use the bundled sample job description
        #[arg(long)]
        sample_job: bool,

        /// Skills CSV with a `skill` column
        #[arg(short, long)]
        skills: Option<PathBuf>,

        /// Number of top contributing terms per resume
        #[arg(short = 'n', long)]
        top_n: Option<usize>,

        /// Output format: console, json, csv, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(long)]
        save: Option<PathBuf>,

        /// Show per-resume details
        #[arg(short, long)]
        detailed: bool,

        /// Include parsed resume text in console details
        #[arg(long)]
        show_raw: bool,
    },

    /// List the skill vocabulary in use
    Skills {
        /// Skills CSV with a `skill` column
        #[arg(short, long)]
        skills: Option<PathBuf>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "csv" => Ok(crate::config::OutputFormat::Csv),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        "html" => Ok(crate::config::OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, csv, markdown, html",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
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
