//! Vector-space similarity: TF-IDF over unigrams and bigrams
//!
//! Vocabulary and IDF weights are built from the batch being scored, so the
//! absolute similarity of a candidate changes with the batch it is scored in.
//! Only the ordering of candidates within one batch is meaningful.

use crate::processing::text_normalizer::TextNormalizer;
use log::debug;
use std::collections::{BTreeMap, HashMap};

/// Tokens shorter than this are ignored when building the vocabulary.
const MIN_TOKEN_CHARS: usize = 2;

/// Keyed by vocabulary id; ordered so sums accumulate in the same order every run.
type SparseVector = BTreeMap<usize, f64>;

pub struct VectorSimilarityEngine {
    normalizer: TextNormalizer,
    max_ngram: usize,
}

impl Default for VectorSimilarityEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl VectorSimilarityEngine {
    pub fn new() -> Self {
        Self {
            normalizer: TextNormalizer::new(),
            max_ngram: 2,
        }
    }

    /// Cosine similarity of every candidate to the requirement, in candidate order.
    pub fn similarities<S: AsRef<str>>(&self, requirement: &str, candidates: &[S]) -> Vec<f64> {
        let requirement = self.normalizer.normalize(requirement);
        let candidates: Vec<String> = candidates
            .iter()
            .map(|c| self.normalizer.normalize(c.as_ref()))
            .collect();
        self.similarities_normalized(&requirement, &candidates[..])
    }

    /// Same as [`similarities`](Self::similarities) for text that is already
    /// normalized. Normalization is idempotent, so both give identical results.
    pub fn similarities_normalized<S: AsRef<str>>(
        &self,
        requirement: &str,
        candidates: &[S],
    ) -> Vec<f64> {
        if candidates.is_empty() {
            return Vec::new();
        }

        let corpus: Vec<Vec<String>> = std::iter::once(requirement)
            .chain(candidates.iter().map(|c| c.as_ref()))
            .map(|text| self.terms(text))
            .collect();

        let mut vocabulary: HashMap<&str, usize> = HashMap::new();
        let mut document_frequency: Vec<usize> = Vec::new();
        let mut term_counts: Vec<SparseVector> = Vec::with_capacity(corpus.len());

        for terms in &corpus {
            let mut counts = SparseVector::new();
            for term in terms {
                let next_id = vocabulary.len();
                let id = *vocabulary.entry(term.as_str()).or_insert(next_id);
                if id == document_frequency.len() {
                    document_frequency.push(0);
                }
                let count = counts.entry(id).or_insert(0.0);
                if *count == 0.0 {
                    document_frequency[id] += 1;
                }
                *count += 1.0;
            }
            term_counts.push(counts);
        }

        debug!(
            "TF-IDF vocabulary: {} terms over {} documents",
            vocabulary.len(),
            corpus.len()
        );

        let idf = Self::smoothed_idf(&document_frequency, corpus.len());
        let vectors: Vec<SparseVector> = term_counts
            .into_iter()
            .map(|counts| Self::weight_and_normalize(counts, &idf))
            .collect();

        let Some((requirement_vector, candidate_vectors)) = vectors.split_first() else {
            return vec![0.0; candidates.len()];
        };

        candidate_vectors
            .iter()
            .map(|candidate| Self::cosine(requirement_vector, candidate))
            .collect()
    }

    /// Unigrams and contiguous n-grams up to `max_ngram` over the document's tokens.
    fn terms(&self, normalized: &str) -> Vec<String> {
        let tokens: Vec<&str> = normalized
            .split_whitespace()
            .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS)
            .collect();

        let mut terms: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
        for n in 2..=self.max_ngram {
            terms.extend(tokens.windows(n).map(|window| window.join(" ")));
        }
        terms
    }

    /// `ln((1 + n) / (1 + df)) + 1`; terms present in every document keep weight 1.
    fn smoothed_idf(document_frequency: &[usize], documents: usize) -> Vec<f64> {
        let n = documents as f64;
        document_frequency
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect()
    }

    fn weight_and_normalize(mut counts: SparseVector, idf: &[f64]) -> SparseVector {
        for (id, weight) in counts.iter_mut() {
            *weight *= idf[*id];
        }

        let norm = counts.values().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for weight in counts.values_mut() {
                *weight /= norm;
            }
        }
        counts
    }

    /// Vectors are unit length (or empty), so the dot product is the cosine.
    fn cosine(a: &SparseVector, b: &SparseVector) -> f64 {
        let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
        let dot: f64 = small
            .iter()
            .filter_map(|(id, w)| large.get(id).map(|other| w * other))
            .sum();
        dot.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_text_scores_one() {
        let engine = VectorSimilarityEngine::new();
        let scores = engine.similarities(
            "Python engineer building data pipelines",
            &["Python engineer building data pipelines", "Pastry chef"],
        );

        assert_eq!(scores.len(), 2);
        assert!((scores[0] - 1.0).abs() < 1e-9);
        assert_eq!(scores[1], 0.0);
    }

    #[test]
    fn test_scores_are_bounded() {
        let engine = VectorSimilarityEngine::new();
        let candidates = [
            "python sql python",
            "java kubernetes docker",
            "sql tensorflow",
            "",
        ];
        let scores = engine.similarities("python sql tensorflow", &candidates);

        for score in &scores {
            assert!((0.0..=1.0).contains(score));
        }
        assert_eq!(scores[3], 0.0);
    }

    #[test]
    fn test_relative_ranking() {
        let engine = VectorSimilarityEngine::new();
        let scores = engine.similarities(
            "Data scientist with python and machine learning",
            &[
                "Accountant with spreadsheet background",
                "Machine learning researcher, python daily",
                "Python scripting",
            ],
        );

        assert!(scores[1] > scores[2]);
        assert!(scores[2] > scores[0]);
    }

    #[test]
    fn test_bigrams_add_signal() {
        let engine = VectorSimilarityEngine::new();
        let scores = engine.similarities(
            "machine learning",
            &["machine learning", "learning machine"],
        );

        assert!(scores[0] > scores[1]);
    }

    #[test]
    fn test_normalized_and_raw_paths_agree() {
        let engine = VectorSimilarityEngine::new();
        let normalizer = TextNormalizer::new();
        let requirement = "Looking for a Rust developer!";
        let candidates = ["Rust, Go and C developer.", "Frontend: React & CSS"];

        let raw = engine.similarities(requirement, &candidates);
        let normalized_candidates: Vec<String> =
            candidates.iter().map(|c| normalizer.normalize(c)).collect();
        let pre = engine
            .similarities_normalized(&normalizer.normalize(requirement), &normalized_candidates[..]);

        assert_eq!(raw.len(), pre.len());
        for (a, b) in raw.iter().zip(&pre) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_identical_candidates_score_bit_identical() {
        let engine = VectorSimilarityEngine::new();
        let resume = "Senior data engineer: python, sql, spark, airflow, kafka, \
                      dbt and snowflake pipelines for analytics and machine learning teams";
        let candidates = vec![resume; 200];
        let scores = engine.similarities(
            "Data engineer with python sql spark kafka airflow and machine learning",
            &candidates[..],
        );

        let first = scores[0].to_bits();
        assert!(scores[0] > 0.0);
        assert!(scores.iter().all(|s| s.to_bits() == first));
    }

    #[test]
    fn test_empty_batch() {
        let engine = VectorSimilarityEngine::new();
        let candidates: [&str; 0] = [];
        assert!(engine.similarities("python", &candidates).is_empty());
    }
}
