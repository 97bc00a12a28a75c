//! Output formatters: console, JSON and Markdown renderings of a ranking report

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::RankingReport;
use crate::processing::gap_analyzer::{GapReport, MissingSkill, Priority};
use colored::{Color, Colorize};
use std::path::Path;

pub trait OutputFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Terminal output with colors and a compact leaderboard
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
    detailed: bool,
}

/// Dispatches a report to the formatter for the requested format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

fn score_label(score: f64) -> (&'static str, Color) {
    match score {
        s if s >= 80.0 => ("EXCELLENT", Color::Green),
        s if s >= 65.0 => ("STRONG", Color::BrightGreen),
        s if s >= 50.0 => ("GOOD", Color::Yellow),
        s if s >= 35.0 => ("FAIR", Color::BrightYellow),
        s if s >= 20.0 => ("WEAK", Color::Red),
        _ => ("POOR", Color::BrightRed),
    }
}

/// Comma-separated names of missing High priority skills, if there are any.
fn high_priority_summary(gap: &GapReport) -> Option<String> {
    let names: Vec<&str> = gap
        .high_priority_missing()
        .map(|skill| skill.name.as_str())
        .collect();
    if names.is_empty() {
        None
    } else {
        Some(names.join(", "))
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: f64) -> String {
        let (badge, color) = score_label(score);

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_priority_icon(&self, priority: Priority) -> String {
        match (priority, self.use_colors) {
            (Priority::High, true) => "🚨".to_string(),
            (Priority::Standard, true) => "📋".to_string(),
            (Priority::High, false) => "[!]".to_string(),
            (Priority::Standard, false) => "[-]".to_string(),
        }
    }

    fn format_missing(&self, skill: &MissingSkill) -> String {
        let mut line = format!(
            "  {} {} ({} priority, {}x in job description)\n",
            self.format_priority_icon(skill.priority),
            self.colorize(&skill.name, Color::Red),
            skill.priority,
            skill.requirement_frequency
        );
        if self.detailed {
            line.push_str(&format!("      {}\n", skill.reason));
            line.push_str(&format!("      {}\n", self.colorize(&skill.improvement, Color::Cyan)));
        }
        line
    }

    fn format_gap(&self, gap: &GapReport) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Requirement coverage: {:.0}%\n",
            gap.coverage() * 100.0
        ));
        if let Some(names) = high_priority_summary(gap) {
            output.push_str(&format!(
                "High-priority gaps: {}\n",
                self.colorize(&names, Color::Red)
            ));
        }

        output.push_str(&self.format_header("Strong Matches", 3));
        if gap.strong.is_empty() {
            output.push_str("  (none)\n");
        }
        for name in &gap.strong {
            output.push_str(&format!("  ✓ {}\n", self.colorize(name, Color::Green)));
        }

        output.push_str(&self.format_header("Weak Matches", 3));
        if gap.weak.is_empty() {
            output.push_str("  (none)\n");
        }
        for skill in &gap.weak {
            output.push_str(&format!(
                "  ~ {} (job: {}x, resume: {}x)\n",
                self.colorize(&skill.name, Color::Yellow),
                skill.requirement_frequency,
                skill.candidate_frequency
            ));
            if self.detailed {
                output.push_str(&format!("      {}\n", skill.reason));
                output.push_str(&format!("      {}\n", skill.details));
            }
        }

        output.push_str(&self.format_header("Missing Skills", 3));
        if gap.missing.is_empty() {
            output.push_str("  (none)\n");
        }
        for skill in &gap.missing {
            output.push_str(&self.format_missing(skill));
        }

        if self.detailed && !gap.candidate_skills.is_empty() {
            output.push_str(&self.format_header("All Detected Candidate Skills", 3));
            output.push_str(&format!("  {}\n", gap.candidate_skills.join(", ")));
        }

        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("📊 CANDIDATE RANKING", 1));
        output.push_str(&format!(
            "Generated: {} | Job: {} | Candidates: {}\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.requirement_source,
            report.metadata.candidate_count
        ));

        output.push_str(&self.format_header("Leaderboard", 2));
        for entry in &report.ranking {
            let line = format!(
                "{:>3}. {:<40} {:>6.2}% {}",
                entry.rank,
                entry.id,
                entry.hybrid_score,
                self.format_score_badge(entry.hybrid_score)
            );
            output.push_str(&line);
            if self.detailed {
                output.push_str(&format!(
                    "  (similarity {:.3}, skill overlap {:.3})",
                    entry.similarity, entry.skill_overlap
                ));
            }
            output.push('\n');
        }
        if report.is_truncated() {
            output.push_str(&format!(
                "  ... {} more candidate(s) not shown\n",
                report.metadata.candidate_count - report.ranking.len()
            ));
        }

        output.push_str(&self.format_header(
            &format!("Gap Analysis: {}", report.top_candidate),
            2,
        ));
        output.push_str(&self.format_gap(&report.gap_analysis));

        if self.detailed {
            output.push_str(&format!(
                "\nWeights: similarity {:.2}, skills {:.2}\n",
                report.metadata.similarity_weight, report.metadata.skill_weight
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool, detailed: bool) -> Self {
        Self {
            include_metadata,
            detailed,
        }
    }

    fn markdown_score_badge(score: f64) -> &'static str {
        match score_label(score).0 {
            "EXCELLENT" => "🟢 Excellent",
            "STRONG" => "🟢 Strong",
            "GOOD" => "🟡 Good",
            "FAIR" => "🟠 Fair",
            "WEAK" => "🔴 Weak",
            _ => "🔴 Poor",
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        let mut md = String::new();
        let gap = &report.gap_analysis;

        md.push_str("# Candidate Ranking\n\n");
        if self.include_metadata {
            md.push_str(&format!(
                "*Generated {} from `{}` ({} candidates)*\n\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.requirement_source,
                report.metadata.candidate_count
            ));
        }

        md.push_str("## Leaderboard\n\n");
        md.push_str("| Rank | Candidate | Score | Similarity | Skill Overlap | Rating |\n");
        md.push_str("|-----:|-----------|------:|-----------:|--------------:|--------|\n");
        for entry in &report.ranking {
            md.push_str(&format!(
                "| {} | {} | {:.2} | {:.3} | {:.3} | {} |\n",
                entry.rank,
                entry.id,
                entry.hybrid_score,
                entry.similarity,
                entry.skill_overlap,
                Self::markdown_score_badge(entry.hybrid_score)
            ));
        }

        md.push_str(&format!("\n## Gap Analysis: {}\n\n", report.top_candidate));
        md.push_str(&format!(
            "Requirement coverage: **{:.0}%**\n\n",
            gap.coverage() * 100.0
        ));
        if let Some(names) = high_priority_summary(gap) {
            md.push_str(&format!("High-priority gaps: **{}**\n\n", names));
        }

        md.push_str("### Strong Matches\n\n");
        if gap.strong.is_empty() {
            md.push_str("_None_\n");
        }
        for name in &gap.strong {
            md.push_str(&format!("- {}\n", name));
        }

        md.push_str("\n### Weak Matches\n\n");
        if gap.weak.is_empty() {
            md.push_str("_None_\n");
        }
        for skill in &gap.weak {
            md.push_str(&format!("- **{}**: {}\n", skill.name, skill.reason));
            if self.detailed {
                md.push_str(&format!("  - {}\n", skill.details));
            }
        }

        md.push_str("\n### Missing Skills\n\n");
        if gap.missing.is_empty() {
            md.push_str("_None_\n");
        }
        for skill in &gap.missing {
            md.push_str(&format!(
                "- **{}** ({} priority): {}\n",
                skill.name, skill.priority, skill.reason
            ));
            if self.detailed {
                md.push_str(&format!("  - {}\n", skill.improvement));
            }
        }

        if self.include_metadata {
            md.push_str(&format!(
                "\n---\n\nScore = {:.0}% vector similarity + {:.0}% skill overlap. resume-ranker v{}\n",
                report.metadata.similarity_weight * 100.0,
                report.metadata.skill_weight * 100.0,
                report.metadata.tool_version
            ));
        }

        Ok(md)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    pub fn with_options(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true, detailed),
        }
    }

    pub fn generate_report(&self, report: &RankingReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, job_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(job_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
    };

    format!("{}_ranking{}.{}", base_name, timestamp_suffix, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::{RankedEntry, ReportMetadata};
    use crate::processing::gap_analyzer::{SkillGapAnalyzer, WeakSkill};
    use chrono::Utc;

    fn report() -> RankingReport {
        let requirement = [("python".to_string(), 3), ("docker".to_string(), 2), ("rust".to_string(), 1)]
            .into_iter()
            .collect();
        let candidate = [("python".to_string(), 2), ("docker".to_string(), 1)]
            .into_iter()
            .collect();

        RankingReport {
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                requirement_source: "backend.txt".to_string(),
                candidate_count: 3,
                similarity_weight: 0.4,
                skill_weight: 0.6,
                tool_version: "0.1.0".to_string(),
            },
            ranking: vec![
                RankedEntry {
                    rank: 1,
                    id: "alice.pdf".to_string(),
                    hybrid_score: 61.25,
                    similarity: 0.41,
                    skill_overlap: 0.75,
                },
                RankedEntry {
                    rank: 2,
                    id: "bob.md".to_string(),
                    hybrid_score: 12.0,
                    similarity: 0.3,
                    skill_overlap: 0.0,
                },
            ],
            top_candidate: "alice.pdf".to_string(),
            gap_analysis: SkillGapAnalyzer::default().analyze(&requirement, &candidate),
        }
    }

    #[test]
    fn test_console_plain_output() {
        let output = ConsoleFormatter::new(false, false).format_report(&report()).unwrap();

        assert!(output.contains("alice.pdf"));
        assert!(output.contains("61.25% [GOOD]"));
        assert!(output.contains("[-] rust"));
        assert!(output.contains("1 more candidate(s) not shown"));
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn test_console_detailed_includes_rationale() {
        let output = ConsoleFormatter::new(false, true).format_report(&report()).unwrap();

        assert!(output.contains("Integrating rust into your profile"));
        assert!(output.contains("similarity 0.410"));
    }

    #[test]
    fn test_json_is_parseable() {
        let json = JsonFormatter::new(false).format_report(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["top_candidate"], "alice.pdf");
        assert_eq!(value["ranking"][1]["rank"], 2);
        assert_eq!(value["gap_analysis"]["weak"][0]["name"], "docker");
        assert_eq!(value["gap_analysis"]["missing"][0]["priority"], "Standard");
    }

    #[test]
    fn test_markdown_sections() {
        let md = MarkdownFormatter::new(false, false).format_report(&report()).unwrap();

        assert!(md.starts_with("# Candidate Ranking"));
        assert!(md.contains("| 1 | alice.pdf | 61.25 |"));
        assert!(md.contains("### Missing Skills\n\n- **rust** (Standard priority)"));
        assert!(!md.contains("Generated"));
    }

    #[test]
    fn test_markdown_lines_end_with_newline() {
        let md = MarkdownFormatter::new(true, true).format_report(&report()).unwrap();

        assert!(md.contains("# Candidate Ranking\n\n*Generated "));
        assert!(md.contains("## Leaderboard\n\n| Rank |"));
        assert!(md.contains("| 2 | bob.md | 12.00 | 0.300 | 0.000 | 🔴 Poor |\n"));
        assert!(md.contains("### Strong Matches\n\n- python\n"));
        assert!(md.ends_with("resume-ranker v0.1.0\n"));
    }

    #[test]
    fn test_high_priority_gaps_summarized() {
        let requirement = [("kubernetes".to_string(), 4), ("python".to_string(), 1)]
            .into_iter()
            .collect();
        let candidate = [("python".to_string(), 1)].into_iter().collect();

        // Standard priority gaps alone produce no summary line
        let plain = ConsoleFormatter::new(false, false).format_report(&report()).unwrap();
        assert!(!plain.contains("High-priority gaps"));

        let mut report = report();
        report.gap_analysis = SkillGapAnalyzer::default().analyze(&requirement, &candidate);

        let md = MarkdownFormatter::new(false, false).format_report(&report).unwrap();
        assert!(md.contains("High-priority gaps: **kubernetes**"));

        let console = ConsoleFormatter::new(false, false).format_report(&report).unwrap();
        assert!(console.contains("High-priority gaps: kubernetes\n"));
        assert!(console.contains("[!] kubernetes"));
    }

    #[test]
    fn test_generator_dispatch() {
        let generator = ReportGenerator::with_options(false, false);
        let report = report();

        for format in [OutputFormat::Console, OutputFormat::Json, OutputFormat::Markdown] {
            assert!(!generator.generate_report(&report, format).unwrap().is_empty());
        }
        assert_eq!(generator.console_formatter.supports_format(), OutputFormat::Console);
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(
            suggest_filename(OutputFormat::Markdown, "jobs/backend.txt", false),
            "backend_ranking.md"
        );
        assert!(suggest_filename(OutputFormat::Json, "job.pdf", true).ends_with(".json"));
    }

    #[test]
    fn test_weak_skill_shape() {
        let report = report();
        let weak: &WeakSkill = &report.gap_analysis.weak[0];
        assert_eq!(weak.candidate_frequency, 1);
        assert_eq!(weak.requirement_frequency, 2);
    }
}
