//! Configuration management for the resume ranker

use crate::error::{Result, RankerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub gap: GapConfig,
    pub lexicon: LexiconConfig,
    pub output: OutputConfig,
}

/// Weights of the hybrid score. Both signals are in [0,1] before weighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub similarity_weight: f64,
    pub skill_weight: f64,
}

/// Frequency thresholds used by the skill gap classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapConfig {
    /// A matched skill can only be weak when the requirement mentions it more often than this.
    pub weak_requirement_above: usize,
    /// A matched skill is weak when the candidate mentions it exactly this often.
    pub weak_candidate_frequency: usize,
    /// A missing skill is high priority when the requirement mentions it more often than this.
    pub high_priority_above: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LexiconConfig {
    /// Newline-delimited skill catalog replacing the built-in one
    pub path: Option<PathBuf>,
    /// Terms appended after the catalog
    #[serde(default)]
    pub extra_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
    pub top_candidates: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            similarity_weight: 0.4,
            skill_weight: 0.6,
        }
    }
}

impl Default for GapConfig {
    fn default() -> Self {
        Self {
            weak_requirement_above: 1,
            weak_candidate_frequency: 1,
            high_priority_above: 2,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
            top_candidates: 10,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            gap: GapConfig::default(),
            lexicon: LexiconConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults there on first run.
    pub fn load() -> Result<Self> {
        Self::load_or_create(&Self::config_path())
    }

    /// Read `path`, writing the defaults there first if it does not exist yet.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| RankerError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| RankerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-ranker")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("scoring.similarity_weight", self.scoring.similarity_weight),
            ("scoring.skill_weight", self.scoring.skill_weight),
        ];
        for (key, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(RankerError::Configuration(format!(
                    "{} must be a non-negative number, got {}",
                    key, value
                )));
            }
        }

        if self.output.top_candidates == 0 {
            return Err(RankerError::Configuration(
                "output.top_candidates must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
