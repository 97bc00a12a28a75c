//! Skill lexicon: the ordered catalog of recognized skill terms

use crate::config::LexiconConfig;
use crate::error::{Result, RankerError};
use crate::processing::text_normalizer::TextNormalizer;
use log::{debug, warn};
use std::collections::HashSet;
use std::path::Path;

/// Built-in catalog of IT, data and development skills (unigrams to trigrams).
const DEFAULT_SKILLS: &[&str] = &[
    "python", "java", "c++", "sql", "nosql", "machine learning", "deep learning",
    "data analysis", "data science", "nlp", "natural language processing", "flask",
    "django", "streamlit", "aws", "gcp", "azure", "docker", "kubernetes", "html",
    "css", "javascript", "react", "vue", "angular", "git", "linux", "statistics",
    "mathematics", "communication", "problem solving", "tensorflow", "pytorch",
    "keras", "scikit-learn", "pandas", "numpy", "matplotlib", "seaborn", "tableau",
    "power bi", "excel", "agile", "scrum", "backend", "frontend", "full stack",
    "rest api", "graphql", "c#", "ruby", "php", "swift", "kotlin", "go", "rust",
    "apache spark", "hadoop", "kafka", "ci/cd", "jenkins", "github actions",
    "data visualization", "data mining", "predictive modeling", "artificial intelligence",
    "computer vision", "opencv", "generative ai", "llm", "chatgpt", "prompt engineering",
    "mongodb", "postgresql", "mysql", "redis", "elasticsearch", "cassandra",
    "snowflake", "redshift", "bigquery", "dbt", "airflow", "luigi", "fastapi",
    "spring boot", "express.js", "node.js", "next.js", "tailwind css", "bootstrap",
    "figma", "ui/ux", "product management", "project management", "jira", "confluence",
    "ansible", "terraform", "cloudformation", "linux administration", "bash scripting",
    "powershell", "cybersecurity", "penetration testing", "cryptography",
    "time series analysis", "ab testing", "hypothesis testing", "regression analysis",
    "classification", "clustering", "decision trees", "random forest", "xgboost",
    "lightgbm", "catboost", "svm", "neural networks", "cnn", "rnn", "lstm", "transformer",
    "bert", "gpt", "hugging face", "mlops", "model deployment", "sagemaker",
    "vertex ai", "data engineering", "etl", "elt", "data warehousing", "data lakes",
    "data modeling", "scala", "r", "julia", "matlab", "perl", "shell", "typescript",
    "dart", "flutter", "react native", "ionic", "xamarin", "android", "ios",
];

/// A catalog entry and the form it takes inside normalized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillTerm {
    pub name: String,
    pub pattern: String,
}

/// Immutable, ordered skill catalog. Built once and shared by reference.
#[derive(Debug, Clone)]
pub struct SkillLexicon {
    terms: Vec<SkillTerm>,
    unreachable: Vec<String>,
    ambiguous: Vec<String>,
}

impl SkillLexicon {
    pub fn builtin() -> Self {
        Self::from_terms(DEFAULT_SKILLS.iter().copied())
    }

    /// Build a lexicon from catalog spellings, in order.
    ///
    /// Each spelling is canonicalized with the normalizer's character rule.
    /// Spellings that canonicalize to nothing are skipped, and when two
    /// spellings share a pattern the first one keeps it.
    pub fn from_terms<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let normalizer = TextNormalizer::new();
        let mut terms: Vec<SkillTerm> = Vec::new();
        let mut claimed: HashSet<String> = HashSet::new();
        let mut unreachable = Vec::new();
        let mut ambiguous = Vec::new();

        for name in names {
            let name = name.as_ref().trim().to_lowercase();
            if name.is_empty() {
                continue;
            }

            let pattern = normalizer.canonicalize(&name);
            if pattern.is_empty() {
                warn!("Skill '{}' has no letters and can never match; skipping", name);
                continue;
            }

            if !claimed.insert(pattern.clone()) {
                match terms.iter().find(|t| t.pattern == pattern) {
                    Some(owner) if owner.name != name => warn!(
                        "Skill '{}' matches the same text as '{}'; keeping '{}'",
                        name, owner.name, owner.name
                    ),
                    _ => debug!("Duplicate skill '{}' ignored", name),
                }
                continue;
            }

            if pattern.split(' ').any(|token| normalizer.is_stop_word(token)) {
                warn!(
                    "Skill '{}' contains a stop word and will never appear in normalized text",
                    name
                );
                unreachable.push(name.clone());
            } else if pattern.chars().count() == 1 {
                warn!(
                    "Skill '{}' matches any standalone \"{}\" in normalized text",
                    name, pattern
                );
                ambiguous.push(name.clone());
            }

            terms.push(SkillTerm { name, pattern });
        }

        debug!("Skill lexicon built with {} terms", terms.len());

        Self {
            terms,
            unreachable,
            ambiguous,
        }
    }

    /// Load a newline-delimited catalog. Blank lines and `#` comments are ignored.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RankerError::Lexicon(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let lexicon = Self::from_terms(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        );

        if lexicon.is_empty() {
            return Err(RankerError::Lexicon(format!(
                "No usable skills in {}",
                path.display()
            )));
        }

        Ok(lexicon)
    }

    pub fn from_config(config: &LexiconConfig) -> Result<Self> {
        let base = match &config.path {
            Some(path) => Self::from_file(path)?,
            None => Self::builtin(),
        };

        if config.extra_skills.is_empty() {
            return Ok(base);
        }

        let names: Vec<String> = base
            .terms
            .into_iter()
            .map(|t| t.name)
            .chain(config.extra_skills.iter().cloned())
            .collect();

        Ok(Self::from_terms(names))
    }

    pub fn terms(&self) -> &[SkillTerm] {
        &self.terms
    }

    pub fn contains(&self, name: &str) -> bool {
        self.terms.iter().any(|t| t.name == name)
    }

    /// Terms with a stop word in their pattern; normalization removes those
    /// words, so these terms are never detected.
    pub fn unreachable_terms(&self) -> &[String] {
        &self.unreachable
    }

    /// Terms whose pattern is a single letter, such as "c++" (pattern "c").
    /// They count every standalone occurrence of that letter, including ones
    /// left behind by "objective-c" or "c-suite".
    pub fn ambiguous_terms(&self) -> &[String] {
        &self.ambiguous
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl Default for SkillLexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_lexicon() {
        let lexicon = SkillLexicon::builtin();
        assert!(lexicon.len() > 100);
        assert!(lexicon.contains("machine learning"));
        assert!(lexicon.contains("tensorflow"));
    }

    #[test]
    fn test_patterns_are_canonical() {
        let lexicon = SkillLexicon::builtin();
        let pattern_of = |name: &str| {
            lexicon
                .terms()
                .iter()
                .find(|t| t.name == name)
                .map(|t| t.pattern.clone())
        };

        assert_eq!(pattern_of("ci/cd").as_deref(), Some("ci cd"));
        assert_eq!(pattern_of("node.js").as_deref(), Some("node js"));
        assert_eq!(pattern_of("scikit-learn").as_deref(), Some("scikit learn"));
    }

    #[test]
    fn test_colliding_pattern_keeps_first() {
        let lexicon = SkillLexicon::builtin();
        assert!(lexicon.contains("c++"));
        assert!(!lexicon.contains("c#"));
    }

    #[test]
    fn test_stop_word_terms_reported() {
        let lexicon = SkillLexicon::builtin();
        let unreachable = lexicon.unreachable_terms();
        assert!(unreachable.contains(&"full stack".to_string()));
        assert!(unreachable.contains(&"go".to_string()));
        assert!(!unreachable.contains(&"python".to_string()));
    }

    #[test]
    fn test_single_letter_patterns_reported() {
        let lexicon = SkillLexicon::builtin();
        let ambiguous = lexicon.ambiguous_terms();

        assert_eq!(ambiguous, ["c++".to_string(), "r".to_string()]);
        assert!(!ambiguous.contains(&"go".to_string()));

        let custom = SkillLexicon::from_terms(["C#", "rust"]);
        assert_eq!(custom.ambiguous_terms(), ["c#".to_string()]);
    }

    #[test]
    fn test_from_file_skips_comments() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# data skills").unwrap();
        writeln!(file, "Python").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "apache spark").unwrap();

        let lexicon = SkillLexicon::from_file(file.path()).unwrap();
        assert_eq!(lexicon.len(), 2);
        assert!(lexicon.contains("python"));
    }

    #[test]
    fn test_from_file_requires_skills() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# nothing here").unwrap();
        writeln!(file, "+++").unwrap();

        assert!(matches!(
            SkillLexicon::from_file(file.path()),
            Err(RankerError::Lexicon(_))
        ));
    }

    #[test]
    fn test_extra_skills_appended() {
        let config = LexiconConfig {
            path: None,
            extra_skills: vec!["Solidity".to_string(), "python".to_string()],
        };
        let lexicon = SkillLexicon::from_config(&config).unwrap();

        assert!(lexicon.contains("solidity"));
        assert_eq!(lexicon.len(), SkillLexicon::builtin().len() + 1);
    }
}
