//! Report rendering with multiple output formats
//!
//! CDD Principle: Anti-Corruption Layer - Formatters translate domain objects to external formats
//! - LintReport (domain) is converted to human-readable text or JSON
//! - Final diagnostics with file paths and severity stay with the host; this
//!   layer renders what the rule itself knows

use crate::domain::violations::{LintReport, RuleError, RuleResult, Violation};
use std::io::Write;

/// Supported output formats for lint reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format, one line per violation
    Human,
    /// JSON format for programmatic consumption
    Json,
}

impl OutputFormat {
    /// Parse format from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "human" => Some(Self::Human),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Get all available format names
    pub fn all_formats() -> &'static [&'static str] {
        &["human", "json"]
    }
}

/// Options for customizing report output
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Maximum number of violations to include
    pub max_violations: Option<usize>,
}

/// Main report formatter that dispatches to specific formatters
#[derive(Debug, Clone, Default)]
pub struct ReportFormatter {
    options: ReportOptions,
}

impl ReportFormatter {
    /// Create a new report formatter with options
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    /// Format a lint report in the specified format
    pub fn format_report(&self, report: &LintReport, format: OutputFormat) -> RuleResult<String> {
        let violations = self.filter_violations(&report.violations);

        match format {
            OutputFormat::Human => Ok(self.format_human(&violations)),
            OutputFormat::Json => self.format_json(&violations),
        }
    }

    /// Write a formatted report to a writer
    pub fn write_report<W: Write>(
        &self,
        report: &LintReport,
        format: OutputFormat,
        mut writer: W,
    ) -> RuleResult<()> {
        let formatted = self.format_report(report, format)?;
        writer.write_all(formatted.as_bytes())?;
        Ok(())
    }

    fn filter_violations<'a>(&self, violations: &'a [Violation]) -> Vec<&'a Violation> {
        let mut filtered: Vec<&Violation> = violations.iter().collect();
        if let Some(max) = self.options.max_violations {
            filtered.truncate(max);
        }
        filtered
    }

    fn format_human(&self, violations: &[&Violation]) -> String {
        let mut output = String::new();

        if violations.is_empty() {
            output.push_str("No selector violations found\n");
            return output;
        }

        for violation in violations {
            output.push_str(&violation.format_display());
            output.push('\n');
        }

        let noun = if violations.len() == 1 { "violation" } else { "violations" };
        output.push_str(&format!("\n{} {}\n", violations.len(), noun));
        output
    }

    fn format_json(&self, violations: &[&Violation]) -> RuleResult<String> {
        let json_report = serde_json::json!({
            "violations": violations,
        });

        serde_json::to_string_pretty(&json_report)
            .map_err(|e| RuleError::report(format!("JSON serialization failed: {e}")))
    }
}
