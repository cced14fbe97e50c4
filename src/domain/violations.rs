//! Core domain models for selector violations and lint results
//!
//! Architecture: Rich Domain Models - Violations are entities with behavior, not just data
//! - Violations carry the offending selector and their anchor in the tree
//! - LintReport acts as an aggregate root collecting violations in emission order
//! - Errors are local to one invocation; nothing here is fatal to a host

use crate::stylesheet::{NodeId, Position};
use serde::Serialize;

/// A restricted selector found at the top level of a stylesheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Identifier of the rule that produced this violation
    pub rule_id: String,
    /// Rendered diagnostic message
    pub message: String,
    /// The offending selector text, trimmed of surrounding whitespace
    pub selector: String,
    /// Tree node the violation is anchored to; the host resolves it to a
    /// concrete source location
    pub node: NodeId,
    /// Source position of the owning rule node, when the host parser
    /// supplied one
    pub position: Option<Position>,
}

impl Violation {
    /// Create a new violation anchored to a rule node
    pub fn new(
        rule_id: impl Into<String>,
        message: impl Into<String>,
        selector: impl Into<String>,
        node: NodeId,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            message: message.into(),
            selector: selector.into(),
            node,
            position: None,
        }
    }

    /// Set the source position
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Format violation for display
    pub fn format_display(&self) -> String {
        match self.position {
            Some(position) => format!(
                "{}:{} \u{2716} {} ({})",
                position.line, position.column, self.message, self.rule_id
            ),
            None => format!("\u{2716} {} ({})", self.message, self.rule_id),
        }
    }
}

/// Complete result of one lint run over a single stylesheet tree
#[derive(Debug, Clone, Default, Serialize)]
pub struct LintReport {
    /// All violations found, in document order then selector-list order
    pub violations: Vec<Violation>,
}

impl LintReport {
    /// Create a new empty report
    pub fn new() -> Self {
        Self { violations: Vec::new() }
    }

    /// Add a violation to the report
    pub fn add_violation(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Whether the report contains any violations
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Number of violations in the report
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Whether the report is empty
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Iterate over the collected violations
    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter()
    }

    /// Merge another report into this one, preserving emission order
    pub fn merge(&mut self, other: LintReport) {
        self.violations.extend(other.violations);
    }
}

/// Error types that can occur while configuring or rendering the rule
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// Raw options failed schema validation
    #[error("Options error: {message}")]
    Options { message: String },

    /// Pattern compilation failed
    #[error("Pattern error: {message}")]
    Pattern { message: String },

    /// Report could not be written
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Report serialization failed
    #[error("Report error: {message}")]
    Report { message: String },
}

impl RuleError {
    /// Create an options error
    pub fn options(message: impl Into<String>) -> Self {
        Self::Options { message: message.into() }
    }

    /// Create a pattern error
    pub fn pattern(message: impl Into<String>) -> Self {
        Self::Pattern { message: message.into() }
    }

    /// Create a report error
    pub fn report(message: impl Into<String>) -> Self {
        Self::Report { message: message.into() }
    }
}

/// Result type for Selector Guardian operations
pub type RuleResult<T> = Result<T, RuleError>;
