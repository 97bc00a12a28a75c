//! Hybrid score: weighted vector similarity plus skill overlap, on a 0-100 scale

use crate::config::ScoringConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One candidate with its final score and the two signals behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub id: String,
    #[serde(skip_serializing)]
    #[serde(default)]
    pub raw_text: String,
    /// 0 to 100, two decimals
    pub hybrid_score: f64,
    pub similarity: f64,
    pub skill_overlap: f64,
}

#[derive(Debug, Clone)]
pub struct HybridScorer {
    similarity_weight: f64,
    skill_weight: f64,
}

impl Default for HybridScorer {
    fn default() -> Self {
        Self::new(&ScoringConfig::default())
    }
}

impl HybridScorer {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            similarity_weight: config.similarity_weight,
            skill_weight: config.skill_weight,
        }
    }

    /// Share of requirement skills present in the candidate; 0 when the
    /// requirement has no detected skills.
    pub fn skill_overlap<V>(
        requirement_skills: &BTreeMap<String, V>,
        candidate_skills: &BTreeMap<String, V>,
    ) -> f64 {
        if requirement_skills.is_empty() {
            return 0.0;
        }

        let shared = requirement_skills
            .keys()
            .filter(|skill| candidate_skills.contains_key(*skill))
            .count();

        shared as f64 / requirement_skills.len() as f64
    }

    pub fn score(&self, similarity: f64, skill_overlap: f64) -> f64 {
        let combined = self.similarity_weight * similarity + self.skill_weight * skill_overlap;
        let percent = (combined * 100.0).clamp(0.0, 100.0);
        (percent * 100.0).round() / 100.0
    }

    pub fn score_candidate(
        &self,
        id: &str,
        raw_text: &str,
        similarity: f64,
        skill_overlap: f64,
    ) -> ScoredCandidate {
        ScoredCandidate {
            id: id.to_string(),
            raw_text: raw_text.to_string(),
            hybrid_score: self.score(similarity, skill_overlap),
            similarity,
            skill_overlap,
        }
    }

    pub fn weights(&self) -> (f64, f64) {
        (self.similarity_weight, self.skill_weight)
    }
}
