//! Candidate ranking: scores a batch against one requirement and explains the winner

use crate::config::Config;
use crate::error::{Result, RankerError};
use crate::processing::document::{CandidateInput, Document};
use crate::processing::gap_analyzer::{GapReport, SkillGapAnalyzer};
use crate::processing::hybrid_scorer::{HybridScorer, ScoredCandidate};
use crate::processing::lexicon::SkillLexicon;
use crate::processing::skill_extractor::SkillExtractor;
use crate::processing::text_normalizer::TextNormalizer;
use crate::processing::vectorizer::VectorSimilarityEngine;
use log::{debug, info, warn};
use std::sync::Arc;

/// Ranked batch plus the gap report of the best candidate.
#[derive(Debug, Clone)]
pub struct RankingOutcome {
    /// Descending by hybrid score; ties keep batch order
    pub ranked: Vec<ScoredCandidate>,
    pub report: GapReport,
}

impl RankingOutcome {
    /// Highest-scoring candidate, or `None` for an outcome with no candidates.
    pub fn top(&self) -> Option<&ScoredCandidate> {
        self.ranked.first()
    }
}

pub struct CandidateRanker {
    normalizer: TextNormalizer,
    extractor: SkillExtractor,
    engine: VectorSimilarityEngine,
    scorer: HybridScorer,
    analyzer: SkillGapAnalyzer,
}

impl CandidateRanker {
    pub fn new(config: &Config, lexicon: Arc<SkillLexicon>) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            normalizer: TextNormalizer::new(),
            extractor: SkillExtractor::new(lexicon)?,
            engine: VectorSimilarityEngine::new(),
            scorer: HybridScorer::new(&config.scoring),
            analyzer: SkillGapAnalyzer::new(config.gap.clone()),
        })
    }

    /// Hybrid score for every candidate, in input order.
    pub fn score_batch(
        &self,
        requirement_text: &str,
        candidates: &[CandidateInput],
    ) -> Result<Vec<ScoredCandidate>> {
        Self::ensure_requirement(requirement_text)?;
        if candidates.is_empty() {
            return Err(RankerError::EmptyBatch);
        }

        let requirement = Document::requirement(requirement_text, &self.normalizer);
        let documents: Vec<Document> = candidates
            .iter()
            .map(|input| {
                if !input.is_readable() {
                    warn!(
                        "{}",
                        RankerError::InvalidInput(format!(
                            "candidate '{}' has no readable text; scoring it as empty",
                            input.id
                        ))
                    );
                }
                Document::from_candidate(input, &self.normalizer)
            })
            .collect();

        let normalized: Vec<&str> = documents.iter().map(Document::normalized_text).collect();
        let similarities = self
            .engine
            .similarities_normalized(requirement.normalized_text(), &normalized[..]);

        let requirement_skills = self.extractor.extract(requirement.normalized_text());
        debug!(
            "Requirement ({} words) mentions {} lexicon skills",
            requirement.word_count(),
            requirement_skills.len()
        );

        let scored = documents
            .iter()
            .zip(similarities)
            .map(|(doc, similarity)| {
                let candidate_skills = self.extractor.extract(doc.normalized_text());
                let overlap = HybridScorer::skill_overlap(&requirement_skills, &candidate_skills);
                let scored = self
                    .scorer
                    .score_candidate(doc.id(), doc.raw_text(), similarity, overlap);
                debug!(
                    "{:?} {} ({} words): similarity {:.4}, skill overlap {:.4}, score {:.2}",
                    doc.document_type(),
                    scored.id,
                    doc.word_count(),
                    similarity,
                    overlap,
                    scored.hybrid_score
                );
                scored
            })
            .collect();

        Ok(scored)
    }

    /// Gap report for any candidate text against the requirement.
    pub fn analyze_gap(&self, requirement_text: &str, candidate_text: &str) -> Result<GapReport> {
        Self::ensure_requirement(requirement_text)?;

        let requirement_skills = self.extractor.extract_raw(requirement_text);
        let candidate_skills = self.extractor.extract_raw(candidate_text);
        Ok(self.analyzer.analyze(&requirement_skills, &candidate_skills))
    }

    /// Score, rank and explain the top candidate.
    pub fn rank_and_analyze(
        &self,
        requirement_text: &str,
        candidates: &[CandidateInput],
    ) -> Result<RankingOutcome> {
        let mut ranked = self.score_batch(requirement_text, candidates)?;
        // `sort_by` is stable, so ties keep their batch order
        ranked.sort_by(|a, b| b.hybrid_score.total_cmp(&a.hybrid_score));

        let top = ranked.first().ok_or(RankerError::EmptyBatch)?;
        info!(
            "Top candidate: {} ({:.2}) out of {}",
            top.id,
            top.hybrid_score,
            ranked.len()
        );

        let report = self.analyze_gap(requirement_text, &top.raw_text)?;

        Ok(RankingOutcome { ranked, report })
    }

    pub fn lexicon(&self) -> &SkillLexicon {
        self.extractor.lexicon()
    }

    fn ensure_requirement(requirement_text: &str) -> Result<()> {
        if requirement_text.trim().is_empty() {
            Err(RankerError::MissingRequirement)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIREMENT: &str = "Looking for a Data Scientist with strong Python and SQL skills. \
                               Experience with TensorFlow is a huge plus.";

    fn ranker() -> CandidateRanker {
        CandidateRanker::new(&Config::default(), Arc::new(SkillLexicon::builtin())).unwrap()
    }

    fn batch() -> Vec<CandidateInput> {
        vec![
            CandidateInput::new(
                "b.txt",
                "Pastry chef with ten years of bakery management and catering.",
            ),
            CandidateInput::new(
                "a.txt",
                "Data analyst. Python for reporting, Python for automation, Python \
                 notebooks and SQL dashboards.",
            ),
        ]
    }

    #[test]
    fn test_data_scientist_scenario() {
        let outcome = ranker().rank_and_analyze(REQUIREMENT, &batch()).unwrap();

        assert_eq!(outcome.top().unwrap().id, "a.txt");
        assert!(outcome.ranked[0].hybrid_score > outcome.ranked[1].hybrid_score);

        let report = &outcome.report;
        assert!(report.strong.contains(&"python".to_string()));
        assert!(report.strong.contains(&"sql".to_string()));
        assert!(report.weak.is_empty());
        assert_eq!(report.missing.len(), 1);
        assert_eq!(report.missing[0].name, "tensorflow");
        assert_eq!(
            report.missing[0].priority,
            crate::processing::gap_analyzer::Priority::Standard
        );
    }

    #[test]
    fn test_score_batch_keeps_input_order() {
        let scored = ranker().score_batch(REQUIREMENT, &batch()).unwrap();

        assert_eq!(scored[0].id, "b.txt");
        assert_eq!(scored[1].id, "a.txt");
        assert!((scored[1].skill_overlap - 2.0 / 3.0).abs() < 1e-12);
        for candidate in &scored {
            assert!((0.0..=100.0).contains(&candidate.hybrid_score));
        }
    }

    #[test]
    fn test_empty_requirement() {
        let ranker = ranker();
        assert!(matches!(
            ranker.rank_and_analyze("   \n", &batch()),
            Err(RankerError::MissingRequirement)
        ));
        assert!(matches!(
            ranker.analyze_gap("", "python"),
            Err(RankerError::MissingRequirement)
        ));
    }

    #[test]
    fn test_empty_batch() {
        assert!(matches!(
            ranker().rank_and_analyze(REQUIREMENT, &[]),
            Err(RankerError::EmptyBatch)
        ));
    }

    #[test]
    fn test_unreadable_candidate_degrades() {
        let mut candidates = batch();
        candidates.push(CandidateInput::unreadable("scan.pdf"));

        let outcome = ranker().rank_and_analyze(REQUIREMENT, &candidates).unwrap();
        let unreadable = outcome
            .ranked
            .iter()
            .find(|c| c.id == "scan.pdf")
            .unwrap();

        assert_eq!(unreadable.hybrid_score, 0.0);
        assert_eq!(outcome.ranked.len(), 3);
    }

    #[test]
    fn test_ties_keep_batch_order() {
        let candidates = vec![
            CandidateInput::new("first", "gardening"),
            CandidateInput::new("second", "knitting"),
            CandidateInput::new("third", "python sql tensorflow"),
        ];

        let outcome = ranker().rank_and_analyze(REQUIREMENT, &candidates).unwrap();
        let order: Vec<&str> = outcome.ranked.iter().map(|c| c.id.as_str()).collect();

        assert_eq!(order, vec!["third", "first", "second"]);
    }

    #[test]
    fn test_ranking_independent_of_input_order() {
        let ranker = ranker();
        let forward = batch();
        let mut reversed = batch();
        reversed.reverse();

        let a = ranker.rank_and_analyze(REQUIREMENT, &forward).unwrap();
        let b = ranker.rank_and_analyze(REQUIREMENT, &reversed).unwrap();

        let ids = |o: &RankingOutcome| o.ranked.iter().map(|c| c.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&a), ids(&b));
        for pair in a.ranked.windows(2) {
            assert!(pair[0].hybrid_score >= pair[1].hybrid_score);
        }
    }

    #[test]
    fn test_identical_candidates_get_identical_scores() {
        let text = "Data analyst. Python for reporting, Python for automation, SQL \
                    dashboards in Tableau and Excel, some TensorFlow experiments.";
        let candidates: Vec<CandidateInput> = (0..150)
            .map(|i| CandidateInput::new(format!("resume_{i}.txt"), text))
            .collect();

        let scored = ranker().score_batch(REQUIREMENT, &candidates).unwrap();

        let first = &scored[0];
        assert!(first.similarity > 0.0);
        for candidate in &scored {
            assert_eq!(candidate.similarity.to_bits(), first.similarity.to_bits());
            assert_eq!(candidate.hybrid_score.to_bits(), first.hybrid_score.to_bits());
        }

        let outcome = ranker().rank_and_analyze(REQUIREMENT, &candidates).unwrap();
        let order: Vec<&str> = outcome.ranked.iter().map(|c| c.id.as_str()).collect();
        let expected: Vec<String> = (0..150).map(|i| format!("resume_{i}.txt")).collect();
        assert_eq!(order, expected);
    }

    #[test]
    fn test_top_of_empty_outcome() {
        let outcome = RankingOutcome {
            ranked: Vec::new(),
            report: GapReport::default(),
        };
        assert!(outcome.top().is_none());
    }

    #[test]
    fn test_gap_report_for_any_pair() {
        let report = ranker()
            .analyze_gap(
                "Docker, Docker and more Docker. Kubernetes too.",
                "I used Docker once. Also React.",
            )
            .unwrap();

        assert_eq!(report.weak.len(), 1);
        assert_eq!(report.weak[0].name, "docker");
        assert_eq!(report.missing[0].name, "kubernetes");
        assert_eq!(report.candidate_skills, vec!["docker", "react"]);
    }
}
