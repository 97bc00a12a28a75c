//! Skill gap analysis: strong, weak and missing skills with rationale

use crate::config::GapConfig;
use crate::processing::skill_extractor::SkillFrequencyMap;
use serde::{Deserialize, Serialize};
use std::fmt;

const HIGH_PRIORITY_REASON: &str =
    "Critical requirement for this role. Absence significantly impacts candidate eligibility.";
const STANDARD_PRIORITY_REASON: &str =
    "Standard requirement. Including this would strengthen professional alignment with the role.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    High,
    Standard,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Priority::High => write!(f, "High"),
            Priority::Standard => write!(f, "Standard"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingSkill {
    pub name: String,
    pub reason: String,
    pub improvement: String,
    pub priority: Priority,
    pub requirement_frequency: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeakSkill {
    pub name: String,
    pub reason: String,
    pub details: String,
    pub requirement_frequency: usize,
    pub candidate_frequency: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkillRecord {
    Missing(MissingSkill),
    Weak(WeakSkill),
    Strong { name: String },
}

impl SkillRecord {
    pub fn name(&self) -> &str {
        match self {
            SkillRecord::Missing(skill) => &skill.name,
            SkillRecord::Weak(skill) => &skill.name,
            SkillRecord::Strong { name } => name,
        }
    }
}

/// Gap between one candidate and one requirement document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GapReport {
    /// Every skill detected in the candidate, required or not
    pub candidate_skills: Vec<String>,
    pub strong: Vec<String>,
    pub weak: Vec<WeakSkill>,
    pub missing: Vec<MissingSkill>,
}

impl GapReport {
    /// All classifications: missing first, then weak, then strong.
    pub fn records(&self) -> Vec<SkillRecord> {
        self.missing
            .iter()
            .cloned()
            .map(SkillRecord::Missing)
            .chain(self.weak.iter().cloned().map(SkillRecord::Weak))
            .chain(
                self.strong
                    .iter()
                    .map(|name| SkillRecord::Strong { name: name.clone() }),
            )
            .collect()
    }

    /// Share of requirement skills found in the candidate at all.
    pub fn coverage(&self) -> f64 {
        let found = self.strong.len() + self.weak.len();
        let total = found + self.missing.len();
        if total == 0 {
            0.0
        } else {
            found as f64 / total as f64
        }
    }

    pub fn high_priority_missing(&self) -> impl Iterator<Item = &MissingSkill> {
        self.missing.iter().filter(|s| s.priority == Priority::High)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SkillGapAnalyzer {
    thresholds: GapConfig,
}

impl SkillGapAnalyzer {
    pub fn new(thresholds: GapConfig) -> Self {
        Self { thresholds }
    }

    pub fn analyze(
        &self,
        requirement_skills: &SkillFrequencyMap,
        candidate_skills: &SkillFrequencyMap,
    ) -> GapReport {
        let mut report = GapReport {
            candidate_skills: candidate_skills.keys().cloned().collect(),
            ..GapReport::default()
        };

        for (name, &requirement_frequency) in requirement_skills {
            let candidate_frequency = candidate_skills.get(name).copied();
            match self.classify(name, requirement_frequency, candidate_frequency) {
                SkillRecord::Missing(skill) => report.missing.push(skill),
                SkillRecord::Weak(skill) => report.weak.push(skill),
                SkillRecord::Strong { name } => report.strong.push(name),
            }
        }

        report.missing.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then_with(|| b.requirement_frequency.cmp(&a.requirement_frequency))
                .then_with(|| a.name.cmp(&b.name))
        });
        report.weak.sort_by(|a, b| {
            b.requirement_frequency
                .cmp(&a.requirement_frequency)
                .then_with(|| a.name.cmp(&b.name))
        });

        report
    }

    /// Classify one requirement skill given how often the candidate mentions it.
    pub fn classify(
        &self,
        name: &str,
        requirement_frequency: usize,
        candidate_frequency: Option<usize>,
    ) -> SkillRecord {
        match candidate_frequency {
            None | Some(0) => {
                let priority = if requirement_frequency > self.thresholds.high_priority_above {
                    Priority::High
                } else {
                    Priority::Standard
                };
                let reason = match priority {
                    Priority::High => HIGH_PRIORITY_REASON,
                    Priority::Standard => STANDARD_PRIORITY_REASON,
                };

                SkillRecord::Missing(MissingSkill {
                    name: name.to_string(),
                    reason: reason.to_string(),
                    improvement: format!(
                        "Integrating {} into your profile will demonstrate competency in a core \
                         requirement, allowing you to execute higher-level tasks and align with \
                         the technical expectations for this specific position.",
                        name
                    ),
                    priority,
                    requirement_frequency,
                })
            }
            Some(candidate_frequency)
                if requirement_frequency > self.thresholds.weak_requirement_above
                    && candidate_frequency == self.thresholds.weak_candidate_frequency =>
            {
                SkillRecord::Weak(WeakSkill {
                    name: name.to_string(),
                    reason: format!(
                        "Highly requested (appears {} times in the job description), but only \
                         mentioned once in your resume.",
                        requirement_frequency
                    ),
                    details: format!(
                        "Consider adding more specific projects or experience related to {}.",
                        name
                    ),
                    requirement_frequency,
                    candidate_frequency,
                })
            }
            Some(_) => SkillRecord::Strong {
                name: name.to_string(),
            },
        }
    }
}
