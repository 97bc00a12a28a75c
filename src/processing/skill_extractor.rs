//! Skill extraction: counts lexicon terms in normalized text

use crate::error::{Result, RankerError};
use crate::processing::lexicon::SkillLexicon;
use crate::processing::text_normalizer::TextNormalizer;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Skill name to number of whole-phrase occurrences (always > 0).
pub type SkillFrequencyMap = BTreeMap<String, usize>;

pub struct SkillExtractor {
    lexicon: Arc<SkillLexicon>,
    normalizer: TextNormalizer,
    matchers: Vec<(String, Regex)>,
}

impl SkillExtractor {
    /// Compile one word-boundary matcher per lexicon term.
    pub fn new(lexicon: Arc<SkillLexicon>) -> Result<Self> {
        let matchers = lexicon
            .terms()
            .iter()
            .map(|term| {
                let pattern = format!(r"(?i)\b{}\b", regex::escape(&term.pattern));
                Regex::new(&pattern)
                    .map(|re| (term.name.clone(), re))
                    .map_err(|e| {
                        RankerError::Lexicon(format!(
                            "Failed to compile matcher for '{}': {}",
                            term.name, e
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            lexicon,
            normalizer: TextNormalizer::new(),
            matchers,
        })
    }

    /// Count skills in text that has already been normalized.
    pub fn extract(&self, normalized_text: &str) -> SkillFrequencyMap {
        let mut counts = SkillFrequencyMap::new();
        if normalized_text.is_empty() {
            return counts;
        }

        for (name, matcher) in &self.matchers {
            let count = matcher.find_iter(normalized_text).count();
            if count > 0 {
                counts.insert(name.clone(), count);
            }
        }

        counts
    }

    /// Normalize raw text, then count skills.
    pub fn extract_raw(&self, text: &str) -> SkillFrequencyMap {
        self.extract(&self.normalizer.normalize(text))
    }

    pub fn lexicon(&self) -> &SkillLexicon {
        &self.lexicon
    }
}
