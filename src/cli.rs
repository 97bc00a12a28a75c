//! CLI interface for the resume ranker

use crate::config::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-ranker")]
#[command(about = "Rank resumes against a job description and explain the skill gap")]
#[command(long_about = "Score a batch of resumes against one job description using TF-IDF \
                        similarity and skill overlap, then report which required skills the \
                        best candidate has, mentions too little, or lacks")]
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

/// Where the job description comes from
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct JobSource {
    /// Path to job description file (PDF, TXT, MD)
    #[arg(short, long)]
    pub job: Option<PathBuf>,

    /// Job description given inline
    #[arg(long)]
    pub job_text: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank a batch of resumes against a job description
    Rank {
        #[command(flatten)]
        job: JobSource,

        /// Resume files (PDF, TXT, MD)
        #[arg(required = true)]
        resumes: Vec<PathBuf>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Include rationale and score components
        #[arg(short, long)]
        detailed: bool,

        /// Only show the best N candidates
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Score one resume and explain its skill gap
    Analyze {
        #[command(flatten)]
        job: JobSource,

        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Inspect the skill lexicon
    Skills {
        #[command(subcommand)]
        action: SkillsAction,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum SkillsAction {
    /// List known skills
    List {
        /// Only show skills containing this text
        #[arg(short, long)]
        filter: Option<String>,
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
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
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
