//! Resume scorer: ATS, writing quality and keyword alignment scoring

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use resume_scorer::cli::{self, Cli, Commands, ConfigAction, DOCUMENT_EXTENSIONS};
use resume_scorer::config::{Config, OutputFormat};
use resume_scorer::cover_letter::{
    CoverLetterGenerator, CoverLetterRequest, OpenAiGenerator, TemplateGenerator, TextGenerator,
};
use resume_scorer::input::InputManager;
use resume_scorer::output::formatter::{save_report_to_file, ReportGenerator};
use resume_scorer::output::report::AnalysisReport;
use resume_scorer::processing::text_processor::TextProcessor;
use resume_scorer::processing::AnalysisEngine;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to read config file {}", path.display())),
        None => Config::load().context("Failed to load default configuration"),
    }
}

async fn run_command(command: Commands, config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Score {
            resume,
            job,
            output,
            save,
            cover_letter,
            company,
            position,
            offline,
        } => {
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(anyhow::Error::msg)?,
                None => config.output.format,
            };

            let mut input_manager = InputManager::new();
            let resume_text = read_document(&mut input_manager, &resume, "Resume").await?;
            let job_text = read_document(&mut input_manager, &job, "Job description").await?;

            info!(
                "Extracted {} resume characters and {} job description characters",
                resume_text.len(),
                job_text.len()
            );

            let engine = AnalysisEngine::new(Arc::new(TextProcessor::new()))
                .with_parallelism(config.analysis.parallel);

            let spinner = spinner("Analyzing resume...");
            let result = engine
                .analyze_async(resume_text.clone(), job_text.clone())
                .await
                .context("Resume analysis failed");
            spinner.finish_and_clear();
            let result = result?;

            let letter = if cover_letter {
                let request = CoverLetterRequest::new(resume_text, job_text)
                    .with_company(company)
                    .with_position(position);
                Some(generate_cover_letter(&config, &request, offline).await?)
            } else {
                None
            };

            let report = AnalysisReport::new(result, display_name(&resume), display_name(&job))
                .with_cover_letter(letter);

            let use_colors = config.output.color_output && save.is_none();
            let generator = ReportGenerator::with_options(use_colors, config.output.pretty_json);
            let rendered = generator
                .generate_report(&report, output_format)
                .context("Failed to render report")?;

            match save {
                Some(path) => {
                    save_report_to_file(&rendered, &path)
                        .with_context(|| format!("Failed to save report to {}", path.display()))?;
                    println!("📁 Report saved to: {}", path.display());
                }
                None if output_format == OutputFormat::Pdf => {
                    anyhow::bail!("PDF output requires --save <file>");
                }
                None => {
                    std::io::stdout()
                        .write_all(&rendered)
                        .context("Failed to write report")?;
                    println!();
                }
            }
        }

        Commands::Extract { file } => {
            let mut input_manager = InputManager::new();
            let text = read_document(&mut input_manager, &file, "Document").await?;
            println!("{}", text);
        }

        Commands::CoverLetter {
            resume,
            job,
            company,
            position,
            offline,
            save,
        } => {
            let mut input_manager = InputManager::new();
            let resume_text = read_document(&mut input_manager, &resume, "Resume").await?;
            let job_text = read_document(&mut input_manager, &job, "Job description").await?;

            let request = CoverLetterRequest::new(resume_text, job_text)
                .with_company(company)
                .with_position(position);
            let letter = generate_cover_letter(&config, &request, offline).await?;

            match save {
                Some(path) => {
                    save_report_to_file(letter.as_bytes(), &path)
                        .with_context(|| format!("Failed to save cover letter to {}", path.display()))?;
                    println!("📁 Cover letter saved to: {}", path.display());
                }
                None => println!("{}", letter),
            }
        }

        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => {
                println!("⚙️  Current Configuration:");
                println!("{}", config.to_toml()?);
            }
            ConfigAction::Reset => {
                println!("🔄 Resetting configuration to defaults...");
                let path = config_path.unwrap_or_else(Config::config_path);
                Config::default()
                    .save_to(&path)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("✅ Configuration reset: {}", path.display());
            }
            ConfigAction::Path => {
                println!("{}", config_path.unwrap_or_else(Config::config_path).display());
            }
        },
    }

    Ok(())
}

async fn read_document(manager: &mut InputManager, path: &Path, label: &str) -> Result<String> {
    cli::validate_file_extension(path, &DOCUMENT_EXTENSIONS)
        .map_err(|e| anyhow::anyhow!("{} file: {}", label, e))?;

    manager
        .extract_text(path)
        .await
        .with_context(|| format!("{} could not be read from {}", label, path.display()))
}

async fn generate_cover_letter(config: &Config, request: &CoverLetterRequest, offline: bool) -> Result<String> {
    if offline {
        return write_letter(TemplateGenerator, request).await;
    }

    match OpenAiGenerator::from_env(&config.cover_letter) {
        Ok(backend) => write_letter(backend, request).await,
        Err(e) => {
            warn!("{}; falling back to the offline template", e);
            write_letter(TemplateGenerator, request).await
        }
    }
}

async fn write_letter<G: TextGenerator>(backend: G, request: &CoverLetterRequest) -> Result<String> {
    let spinner = spinner("Writing cover letter...");
    let letter = CoverLetterGenerator::new(backend).generate(request).await;
    spinner.finish_and_clear();
    letter.context("Cover letter generation failed")
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
