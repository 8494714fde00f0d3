//! Resume screener: rank resumes against a job description

use clap::Parser;
use log::{error, info, warn};
use resume_screener::cli::{self, Cli, Commands, ConfigAction};
use resume_screener::config::{Config, OutputFormat};
use resume_screener::error::{Result, ScreenerError};
use resume_screener::input::{InputManager, SAMPLE_JOB_DESCRIPTION};
use resume_screener::output::formatter::{save_report_to_file, ReportGenerator};
use resume_screener::output::ScreeningReport;
use resume_screener::processing::document::Document;
use resume_screener::processing::screener::Screener;
use resume_screener::processing::vocabulary::SkillVocabulary;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

struct ScreenArgs {
    resumes: Vec<PathBuf>,
    job: Option<PathBuf>,
    job_text: Option<String>,
    sample_job: bool,
    skills: Option<PathBuf>,
    top_n: Option<usize>,
    output: Option<String>,
    save: Option<PathBuf>,
    detailed: bool,
    show_raw: bool,
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Screen {
            resumes,
            job,
            job_text,
            sample_job,
            skills,
            top_n,
            output,
            save,
            detailed,
            show_raw,
        } => {
            let args = ScreenArgs {
                resumes,
                job,
                job_text,
                sample_job,
                skills,
                top_n,
                output,
                save,
                detailed,
                show_raw,
            };
            run_screen(args, &config).await
        }

        Commands::Skills { skills } => {
            let path = skills.unwrap_or_else(|| config.skills.skills_csv.clone());
            let vocabulary = SkillVocabulary::load_or_default(&path);

            if vocabulary.is_builtin() {
                println!("Using built-in skills (add {} for a custom list)", path.display());
            } else {
                println!("Skills from {}", path.display());
            }
            for skill in vocabulary.skills() {
                println!("  • {}", skill);
            }
            println!("{} skills", vocabulary.len());
            Ok(())
        }

        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => {
                let content = toml::to_string_pretty(&config).map_err(|e| {
                    ScreenerError::Configuration(format!("Failed to serialize config: {}", e))
                })?;
                println!("{}", content);
                Ok(())
            }
            ConfigAction::Reset => {
                Config::default().save()?;
                println!("Configuration reset: {}", Config::config_path().display());
                Ok(())
            }
            ConfigAction::Path => {
                println!("{}", Config::config_path().display());
                Ok(())
            }
        },
    }
}

async fn run_screen(args: ScreenArgs, config: &Config) -> Result<()> {
    for resume in &args.resumes {
        cli::validate_file_extension(resume, &["pdf", "txt", "md", "markdown"])
            .map_err(|e| ScreenerError::InvalidInput(format!("Resume {}: {}", resume.display(), e)))?;
    }

    let output_format = match &args.output {
        Some(format) => cli::parse_output_format(format).map_err(ScreenerError::InvalidInput)?,
        None => config.output.format,
    };

    let mut input_manager = InputManager::new();

    let job_raw = if let Some(path) = &args.job {
        cli::validate_file_extension(path, &["txt", "md", "markdown"])
            .map_err(|e| ScreenerError::InvalidInput(format!("Job description file: {}", e)))?;
        input_manager.extract_text(path).await
    } else if let Some(text) = args.job_text {
        text
    } else if args.sample_job {
        info!("Using bundled sample job description");
        SAMPLE_JOB_DESCRIPTION.to_string()
    } else {
        String::new()
    };

    let job = Document::job_description(job_raw);
    if job.is_blank() {
        return Err(ScreenerError::InvalidInput(
            "Please provide a job description with some text".to_string(),
        ));
    }

    let skills_path = args.skills.unwrap_or_else(|| config.skills.skills_csv.clone());
    let vocabulary = SkillVocabulary::load_or_default(&skills_path);

    let mut documents = Vec::with_capacity(args.resumes.len());
    for path in &args.resumes {
        let text = input_manager.extract_text(path).await;
        documents.push(Document::resume(display_name(path), text));
    }

    let top_n = args.top_n.unwrap_or(config.scoring.top_n);
    let screener = Screener::new(&vocabulary, &config.scoring)?.with_top_n(top_n);

    let start = Instant::now();
    let job_skills: Vec<String> = screener.job_skills(&job).into_iter().collect();
    let results = screener.screen_batch(&job, &documents)?;
    let elapsed_ms = start.elapsed().as_millis() as u64;

    let mut report = ScreeningReport::new(&job, job_skills, &vocabulary, top_n, results, elapsed_ms);
    if vocabulary.is_builtin() {
        report.add_warning(format!(
            "Add {} for custom skill matching. Using built-in defaults.",
            skills_path.display()
        ));
    }
    if !input_manager.pdf_available() && documents.iter().any(|d| d.id().to_lowercase().ends_with(".pdf")) {
        report.add_warning("PDF support is not available in this build; PDF resumes were scored as empty.");
    }

    let use_colors = config.output.color_output && args.save.is_none();
    let generator = ReportGenerator::with_options(
        use_colors,
        args.detailed || config.output.detailed,
        args.show_raw || config.output.show_raw,
        config.output.raw_preview_chars,
    );
    let rendered = generator.generate_report(&report, &output_format)?;

    if output_format != OutputFormat::Console {
        log_warnings(&report);
    }

    match &args.save {
        Some(path) => {
            save_report_to_file(&rendered, path)?;
            println!("Results saved to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Non-console formats may not show warnings, so surface them in the log
fn log_warnings(report: &ScreeningReport) {
    for warning in &report.warnings {
        warn!("{}", warning);
    }
}
