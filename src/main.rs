//! Resume ranker: scores resumes against a job description and explains the gap

use clap::Parser;
use log::{error, info};
use resume_ranker::cli::{self, Cli, Commands, ConfigAction, JobSource, SkillsAction};
use resume_ranker::config::{Config, OutputFormat};
use resume_ranker::error::{RankerError, Result};
use resume_ranker::input::InputManager;
use resume_ranker::output::formatter::{save_report_to_file, suggest_filename, ReportGenerator};
use resume_ranker::output::RankingReport;
use resume_ranker::processing::{CandidateInput, CandidateRanker, RankingOutcome, SkillLexicon};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "txt", "md", "markdown"];

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        if e.is_fatal_to_ranking() {
            error!(
                "Nothing was ranked: give a job description (--job or --job-text) and at least \
                 one existing resume with a {} extension",
                SUPPORTED_EXTENSIONS.join(", ")
            );
        }
        process::exit(1);
    }
}

fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Rank {
            job,
            resumes,
            output,
            save,
            detailed,
            top,
        } => {
            let format = resolve_format(output.as_deref(), &config)?;
            let mut input_manager = InputManager::new().with_progress(format == OutputFormat::Console);

            let (requirement, source) = load_requirement(&job, &mut input_manager).await?;
            let candidates = input_manager.load_candidates(&resumes).await?;

            let ranker = build_ranker(&config)?;
            let outcome = ranker.rank_and_analyze(&requirement, &candidates)?;

            let top = Some(top.unwrap_or(config.output.top_candidates));
            emit_report(
                &outcome,
                &config,
                &source,
                top,
                format,
                detailed || config.output.detailed,
                save.as_deref(),
            )?;
        }

        Commands::Analyze {
            job,
            resume,
            output,
            save,
        } => {
            cli::validate_file_extension(&resume, SUPPORTED_EXTENSIONS)
                .map_err(|e| RankerError::InvalidInput(format!("Resume file: {}", e)))?;
            let format = resolve_format(output.as_deref(), &config)?;
            let mut input_manager = InputManager::new();

            let (requirement, source) = load_requirement(&job, &mut input_manager).await?;
            let text = input_manager.extract_text(&resume).await?;
            let candidate = CandidateInput::new(InputManager::candidate_id(&resume), text);

            let ranker = build_ranker(&config)?;
            let outcome = ranker.rank_and_analyze(&requirement, &[candidate])?;

            emit_report(&outcome, &config, &source, None, format, true, save.as_deref())?;
        }

        Commands::Skills {
            action: SkillsAction::List { filter },
        } => {
            let lexicon = SkillLexicon::from_config(&config.lexicon)?;
            let filter = filter.map(|f| f.to_lowercase());

            let mut shown = 0;
            for term in lexicon.terms() {
                if let Some(filter) = &filter {
                    if !term.name.contains(filter.as_str()) {
                        continue;
                    }
                }

                if lexicon.unreachable_terms().contains(&term.name) {
                    println!("  {} (never matches: contains a stopword)", term.name);
                } else if lexicon.ambiguous_terms().contains(&term.name) {
                    println!("  {} (matches any standalone \"{}\")", term.name, term.pattern);
                } else if term.name != term.pattern {
                    println!("  {} (matches \"{}\")", term.name, term.pattern);
                } else {
                    println!("  {}", term.name);
                }
                shown += 1;
            }

            println!("\n{} of {} skills shown", shown, lexicon.len());
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration ({})\n", config_path.display());
                let rendered = toml::to_string_pretty(&config).map_err(|e| {
                    RankerError::Configuration(format!("Failed to serialize config: {}", e))
                })?;
                println!("{}", rendered);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(config_path)?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}

fn resolve_format(output: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match output {
        Some(format) => cli::parse_output_format(format).map_err(RankerError::InvalidInput),
        None => Ok(config.output.format),
    }
}

fn build_ranker(config: &Config) -> Result<CandidateRanker> {
    let lexicon = Arc::new(SkillLexicon::from_config(&config.lexicon)?);
    let ranker = CandidateRanker::new(config, lexicon)?;
    info!("Skill lexicon ready with {} terms", ranker.lexicon().len());
    Ok(ranker)
}

/// Requirement text plus a label naming where it came from.
async fn load_requirement(
    job: &JobSource,
    input_manager: &mut InputManager,
) -> Result<(String, String)> {
    match (&job.job, &job.job_text) {
        (Some(path), _) => {
            cli::validate_file_extension(path, SUPPORTED_EXTENSIONS)
                .map_err(|e| RankerError::InvalidInput(format!("Job description file: {}", e)))?;
            let text = input_manager.extract_text(path).await?;
            Ok((text, InputManager::candidate_id(path)))
        }
        (None, Some(text)) => Ok((text.clone(), "inline".to_string())),
        (None, None) => Err(RankerError::MissingRequirement),
    }
}

fn emit_report(
    outcome: &RankingOutcome,
    config: &Config,
    source: &str,
    top: Option<usize>,
    format: OutputFormat,
    detailed: bool,
    save: Option<&Path>,
) -> Result<()> {
    let weights = (config.scoring.similarity_weight, config.scoring.skill_weight);
    let report = RankingReport::from_outcome(outcome, source, weights, top);

    let generator = ReportGenerator::with_options(config.output.color_output, detailed);
    println!("{}", generator.generate_report(&report, format)?);

    if let Some(path) = save {
        let path = if path.is_dir() {
            path.join(suggest_filename(format, source, true))
        } else {
            path.to_path_buf()
        };
        // Saved console reports never carry color codes
        let content = ReportGenerator::with_options(false, detailed).generate_report(&report, format)?;
        save_report_to_file(&content, &path)?;
        println!("💾 Report saved to {}", display_path(&path).display());
    }

    Ok(())
}

fn display_path(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
