//! Matching and scoring engine

pub mod document;
pub mod text_normalizer;
pub mod lexicon;
pub mod skill_extractor;
pub mod vectorizer;
pub mod hybrid_scorer;
pub mod gap_analyzer;
pub mod ranker;

pub use document::{CandidateInput, Document, DocumentType};
pub use gap_analyzer::{GapReport, MissingSkill, Priority, SkillGapAnalyzer, SkillRecord, WeakSkill};
pub use hybrid_scorer::{HybridScorer, ScoredCandidate};
pub use lexicon::{SkillLexicon, SkillTerm};
pub use ranker::{CandidateRanker, RankingOutcome};
pub use skill_extractor::{SkillExtractor, SkillFrequencyMap};
pub use text_normalizer::TextNormalizer;
pub use vectorizer::VectorSimilarityEngine;
