//! Report structures shared by every output format

use crate::processing::gap_analyzer::GapReport;
use crate::processing::ranker::RankingOutcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything one run produces: the leaderboard and the gap analysis of
/// the top candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingReport {
    pub metadata: ReportMetadata,
    pub ranking: Vec<RankedEntry>,
    pub top_candidate: String,
    pub gap_analysis: GapReport,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    /// File name of the job description, or "inline" for `--job-text`
    pub requirement_source: String,
    /// Size of the scored batch, before any `--top` truncation
    pub candidate_count: usize,
    pub similarity_weight: f64,
    pub skill_weight: f64,
    pub tool_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// 1-based position in the ranking
    pub rank: usize,
    pub id: String,
    pub hybrid_score: f64,
    pub similarity: f64,
    pub skill_overlap: f64,
}

impl RankingReport {
    pub fn from_outcome(
        outcome: &RankingOutcome,
        requirement_source: &str,
        weights: (f64, f64),
        top: Option<usize>,
    ) -> Self {
        let shown = top.unwrap_or(outcome.ranked.len());
        let ranking = outcome
            .ranked
            .iter()
            .take(shown)
            .enumerate()
            .map(|(index, candidate)| RankedEntry {
                rank: index + 1,
                id: candidate.id.clone(),
                hybrid_score: candidate.hybrid_score,
                similarity: candidate.similarity,
                skill_overlap: candidate.skill_overlap,
            })
            .collect();

        Self {
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                requirement_source: requirement_source.to_string(),
                candidate_count: outcome.ranked.len(),
                similarity_weight: weights.0,
                skill_weight: weights.1,
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
            },
            ranking,
            top_candidate: outcome
                .top()
                .map(|candidate| candidate.id.clone())
                .unwrap_or_default(),
            gap_analysis: outcome.report.clone(),
        }
    }

    pub fn top_score(&self) -> f64 {
        self.ranking.first().map(|entry| entry.hybrid_score).unwrap_or(0.0)
    }

    pub fn is_truncated(&self) -> bool {
        self.ranking.len() < self.metadata.candidate_count
    }
}
