//! Document structures used by the ranking pipeline

use crate::processing::text_normalizer::TextNormalizer;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    Requirement,
    Candidate,
}

/// Candidate text as handed over by the ingestion layer.
///
/// `text` is `None` when the source could not be read as text; such a
/// candidate is still ranked, with empty content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateInput {
    pub id: String,
    pub text: Option<String>,
}

impl CandidateInput {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: Some(text.into()),
        }
    }

    pub fn unreadable(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: None,
        }
    }

    pub fn is_readable(&self) -> bool {
        self.text.is_some()
    }
}

/// A document with its normalized form computed once at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    id: String,
    raw_text: String,
    normalized_text: String,
    document_type: DocumentType,
}

impl Document {
    pub fn new(
        id: impl Into<String>,
        raw_text: impl Into<String>,
        document_type: DocumentType,
        normalizer: &TextNormalizer,
    ) -> Self {
        let raw_text = raw_text.into();
        let normalized_text = normalizer.normalize(&raw_text);

        Self {
            id: id.into(),
            raw_text,
            normalized_text,
            document_type,
        }
    }

    pub fn requirement(raw_text: &str, normalizer: &TextNormalizer) -> Self {
        Self::new("requirement", raw_text, DocumentType::Requirement, normalizer)
    }

    /// Unreadable candidates become empty documents.
    pub fn from_candidate(input: &CandidateInput, normalizer: &TextNormalizer) -> Self {
        Self {
            id: input.id.clone(),
            raw_text: input.text.clone().unwrap_or_default(),
            normalized_text: normalizer.normalize_input(input.text.as_deref()),
            document_type: DocumentType::Candidate,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn normalized_text(&self) -> &str {
        &self.normalized_text
    }

    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }

    pub fn word_count(&self) -> usize {
        self.raw_text.split_whitespace().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_caches_normalized_text() {
        let normalizer = TextNormalizer::new();
        let doc = Document::new(
            "resume.txt",
            "John Doe\nSoftware Engineer\n\nSkills:\nRust, Python",
            DocumentType::Candidate,
            &normalizer,
        );

        assert_eq!(doc.id(), "resume.txt");
        assert_eq!(doc.normalized_text(), "john doe software engineer skills rust python");
        assert_eq!(doc.word_count(), 7);
        assert_eq!(doc.document_type(), DocumentType::Candidate);
    }

    #[test]
    fn test_unreadable_candidate_is_empty() {
        let normalizer = TextNormalizer::new();
        let input = CandidateInput::unreadable("scan.pdf");
        let doc = Document::from_candidate(&input, &normalizer);

        assert!(!input.is_readable());
        assert_eq!(doc.raw_text(), "");
        assert_eq!(doc.normalized_text(), "");
        assert_eq!(doc.word_count(), 0);
    }

    #[test]
    fn test_readable_candidate_matches_new() {
        let normalizer = TextNormalizer::new();
        let input = CandidateInput::new("cv.md", "Built ETL jobs in Python & SQL.");
        let doc = Document::from_candidate(&input, &normalizer);
        let direct = Document::new("cv.md", "Built ETL jobs in Python & SQL.", DocumentType::Candidate, &normalizer);

        assert_eq!(doc, direct);
        assert_eq!(doc.normalized_text(), "built etl jobs python sql");
        assert_eq!(doc.document_type(), DocumentType::Candidate);
    }
}
