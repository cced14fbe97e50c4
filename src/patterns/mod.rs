//! Pattern engine for selector restriction matching
//!
//! Architecture: Service Layer - Patterns decide membership, nothing more
//! - A pattern is either a literal selector string or a compiled regular expression
//! - Pattern sets keep configuration order and are immutable once built
//! - Matching is a pure function over trimmed selector text

use crate::domain::violations::{RuleError, RuleResult};
use regex::{Regex, RegexBuilder};
use serde_json::Value as JsonValue;

/// A single selector pattern
///
/// Literal patterns match only on exact equality with the trimmed selector
/// text. Regex patterns match if the expression tests positive anywhere in
/// the trimmed text; they are not anchored unless the expression anchors
/// itself.
#[derive(Debug, Clone)]
pub enum Pattern {
    Literal(String),
    Regex(Regex),
}

impl Pattern {
    /// Create a literal pattern
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Compile a regex pattern
    pub fn regex(source: &str) -> RuleResult<Self> {
        Self::regex_with_flags(source, "")
    }

    /// Compile a regex pattern with host-style flags
    ///
    /// Supported flags: `i` (case-insensitive), `m` (multi-line),
    /// `s` (dot matches newline). `u` is accepted and ignored since matching
    /// is always Unicode-aware.
    pub fn regex_with_flags(source: &str, flags: &str) -> RuleResult<Self> {
        let mut builder = RegexBuilder::new(source);
        for flag in flags.chars() {
            match flag {
                'i' => {
                    builder.case_insensitive(true);
                }
                'm' => {
                    builder.multi_line(true);
                }
                's' => {
                    builder.dot_matches_new_line(true);
                }
                'u' => {}
                other => {
                    return Err(RuleError::pattern(format!(
                        "Unsupported regex flag '{other}' in pattern '/{source}/{flags}'"
                    )));
                }
            }
        }
        let regex = builder
            .build()
            .map_err(|e| RuleError::pattern(format!("Invalid regex '{source}': {e}")))?;
        Ok(Self::Regex(regex))
    }

    /// Parse a configuration string into a pattern
    ///
    /// Strings delimited as `/source/` or `/source/flags` denote regexes,
    /// the convention host linters use for regex-valued string options.
    /// Everything else is a literal.
    pub fn from_config_str(raw: &str) -> RuleResult<Self> {
        if let Some(body) = raw.strip_prefix('/') {
            if let Some((source, flags)) = body.rsplit_once('/') {
                return Self::regex_with_flags(source, flags);
            }
        }
        Ok(Self::literal(raw))
    }

    /// Test this pattern against already-trimmed selector text
    pub fn matches(&self, selector: &str) -> bool {
        match self {
            Self::Literal(text) => selector == text,
            Self::Regex(regex) => regex.is_match(selector),
        }
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Literal(a), Self::Literal(b)) => a == b,
            (Self::Regex(a), Self::Regex(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

/// An ordered sequence of patterns; the empty set matches nothing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    /// Build a set from patterns, keeping their order
    pub fn new(patterns: Vec<Pattern>) -> Self {
        Self { patterns }
    }

    /// The set that matches nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// Normalize a configuration value into a pattern set
    ///
    /// Accepts a single string or an array of strings, mirroring a host's
    /// singular-or-array option shape. Anything else is a shape error
    /// reported against `field`.
    pub fn from_config_value(field: &str, value: &JsonValue) -> RuleResult<Self> {
        let patterns = match value {
            JsonValue::String(raw) => vec![Pattern::from_config_str(raw)?],
            JsonValue::Array(items) => {
                let mut patterns = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        JsonValue::String(raw) => patterns.push(Pattern::from_config_str(raw)?),
                        other => {
                            return Err(RuleError::options(format!(
                                "Invalid value for \"{field}\": expected every array element to be a string, got {other}"
                            )));
                        }
                    }
                }
                patterns
            }
            other => {
                return Err(RuleError::options(format!(
                    "Invalid value for \"{field}\": expected a string or an array of strings, got {other}"
                )));
            }
        };

        tracing::debug!("Compiled {} pattern(s) for \"{}\"", patterns.len(), field);
        Ok(Self::new(patterns))
    }

    /// Whether the set holds no patterns
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Number of patterns in the set
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// The patterns in configuration order
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// True iff at least one pattern matches the trimmed selector text
    pub fn matches(&self, selector: &str) -> bool {
        let trimmed = selector.trim();
        self.patterns.iter().any(|pattern| pattern.matches(trimmed))
    }
}

impl FromIterator<Pattern> for PatternSet {
    fn from_iter<I: IntoIterator<Item = Pattern>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
