//! Resume ranker library
//!
//! Scores a batch of resumes against one job description by combining TF-IDF
//! cosine similarity with lexicon-based skill overlap, then explains the best
//! candidate's skill gap.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod output;

pub use config::Config;
pub use error::{RankerError, Result};
pub use processing::{
    CandidateInput, CandidateRanker, GapReport, RankingOutcome, ScoredCandidate, SkillLexicon,
};
