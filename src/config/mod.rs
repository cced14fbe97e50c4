//! Option validation and normalization for the rule
//!
//! Architecture: Anti-Corruption Layer - Loosely-typed host options become clean domain values
//! - The raw options value a host config loader produces is validated exactly once
//! - The result is a typed, immutable `RuleOptions`; the walk never re-checks shapes
//! - A builder covers programmatic construction, including message formatters

use crate::domain::violations::{RuleError, RuleResult};
use crate::patterns::{Pattern, PatternSet};
use serde_json::Value as JsonValue;
use std::fmt;
use std::sync::Arc;

/// Function rendering a violation message from the offending selector
pub type MessageFormatter = Arc<dyn Fn(&str) -> String + Send + Sync>;

const KNOWN_OPTIONS: [&str; 3] = ["restrictedSelectors", "ignoreSelectors", "customMessage"];

/// Typed, validated options for the rule
///
/// Immutable for the lifetime of one lint run. Absent fields normalize to
/// empty pattern sets; a rule with an empty restricted set has nothing to
/// check.
#[derive(Debug, Clone, Default)]
pub struct RuleOptions {
    /// Selectors that trigger violations when found at the top level
    pub restricted_selectors: PatternSet,
    /// Selectors never reported, even when they also match a restriction
    pub ignore_selectors: PatternSet,
    /// Optional override for the violation message
    pub custom_message: Option<CustomMessage>,
}

/// The accepted shapes of the `customMessage` option
///
/// The schema is deliberately permissive: a string, a formatter function,
/// or an array mixing both all validate. Only the plain `Formatter` form is
/// consulted when a message is rendered; the other shapes fall through to
/// the default template. The permissive validation is retained so that
/// configurations accepted by the host contract stay accepted here.
#[derive(Clone)]
pub enum CustomMessage {
    Text(String),
    Formatter(MessageFormatter),
    Mixed(Vec<MessagePart>),
}

/// One element of the mixed `customMessage` array shape
#[derive(Clone)]
pub enum MessagePart {
    Text(String),
    Formatter(MessageFormatter),
}

impl CustomMessage {
    /// The formatter, when this message was configured as the function form
    pub fn formatter(&self) -> Option<&MessageFormatter> {
        match self {
            Self::Formatter(formatter) => Some(formatter),
            Self::Text(_) | Self::Mixed(_) => None,
        }
    }
}

impl fmt::Debug for CustomMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Formatter(_) => f.write_str("Formatter(..)"),
            Self::Mixed(parts) => f.debug_tuple("Mixed").field(parts).finish(),
        }
    }
}

impl fmt::Debug for MessagePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Formatter(_) => f.write_str("Formatter(..)"),
        }
    }
}

impl RuleOptions {
    /// Validate and normalize a loosely-typed options value
    ///
    /// `Null` stands for absent options and validates to the empty options.
    /// Every field is optional; present fields must match the declared
    /// schema or validation fails with a descriptive [`RuleError::Options`].
    /// Slash-delimited pattern strings compile here, so a malformed regex
    /// fails construction before any tree is walked.
    pub fn from_value(value: &JsonValue) -> RuleResult<Self> {
        let object = match value {
            JsonValue::Null => return Ok(Self::default()),
            JsonValue::Object(object) => object,
            other => {
                return Err(RuleError::options(format!(
                    "Invalid options: expected an object, got {other}"
                )));
            }
        };

        for key in object.keys() {
            if !KNOWN_OPTIONS.contains(&key.as_str()) {
                return Err(RuleError::options(format!("Unknown option \"{key}\"")));
            }
        }

        let restricted_selectors = match object.get("restrictedSelectors") {
            Some(value) => PatternSet::from_config_value("restrictedSelectors", value)?,
            None => PatternSet::empty(),
        };

        let ignore_selectors = match object.get("ignoreSelectors") {
            Some(value) => PatternSet::from_config_value("ignoreSelectors", value)?,
            None => PatternSet::empty(),
        };

        let custom_message = match object.get("customMessage") {
            Some(value) => Some(Self::message_from_value(value)?),
            None => None,
        };

        Ok(Self { restricted_selectors, ignore_selectors, custom_message })
    }

    /// Validate the `customMessage` shapes expressible in configuration data
    ///
    /// A string or an array of strings. The function form cannot arrive
    /// through serialized configuration; it is supplied through
    /// [`OptionsBuilder::message_formatter`].
    fn message_from_value(value: &JsonValue) -> RuleResult<CustomMessage> {
        match value {
            JsonValue::String(text) => Ok(CustomMessage::Text(text.clone())),
            JsonValue::Array(items) => {
                let mut parts = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        JsonValue::String(text) => parts.push(MessagePart::Text(text.clone())),
                        other => {
                            return Err(RuleError::options(format!(
                                "Invalid value for \"customMessage\": expected every array element to be a string, got {other}"
                            )));
                        }
                    }
                }
                Ok(CustomMessage::Mixed(parts))
            }
            other => Err(RuleError::options(format!(
                "Invalid value for \"customMessage\": expected a string or an array, got {other}"
            ))),
        }
    }

    /// Whether these options give the rule nothing to check
    pub fn is_noop(&self) -> bool {
        self.restricted_selectors.is_empty()
    }
}

/// Builder for programmatic option construction
pub struct OptionsBuilder {
    options: RuleOptions,
}

impl OptionsBuilder {
    /// Create a builder with empty options
    pub fn new() -> Self {
        Self { options: RuleOptions::default() }
    }

    /// Add a restricted pattern
    pub fn restrict(mut self, pattern: Pattern) -> Self {
        let mut patterns: Vec<Pattern> =
            self.options.restricted_selectors.patterns().to_vec();
        patterns.push(pattern);
        self.options.restricted_selectors = PatternSet::new(patterns);
        self
    }

    /// Add several restricted patterns, keeping their order
    pub fn restrict_all(mut self, patterns: impl IntoIterator<Item = Pattern>) -> Self {
        for pattern in patterns {
            self = self.restrict(pattern);
        }
        self
    }

    /// Add an ignore pattern
    pub fn ignore(mut self, pattern: Pattern) -> Self {
        let mut patterns: Vec<Pattern> = self.options.ignore_selectors.patterns().to_vec();
        patterns.push(pattern);
        self.options.ignore_selectors = PatternSet::new(patterns);
        self
    }

    /// Add several ignore patterns, keeping their order
    pub fn ignore_all(mut self, patterns: impl IntoIterator<Item = Pattern>) -> Self {
        for pattern in patterns {
            self = self.ignore(pattern);
        }
        self
    }

    /// Set the string form of `customMessage`
    pub fn message_text(mut self, text: impl Into<String>) -> Self {
        self.options.custom_message = Some(CustomMessage::Text(text.into()));
        self
    }

    /// Set the function form of `customMessage`
    pub fn message_formatter(
        mut self,
        formatter: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.options.custom_message = Some(CustomMessage::Formatter(Arc::new(formatter)));
        self
    }

    /// Set the mixed-array form of `customMessage`
    pub fn message_parts(mut self, parts: Vec<MessagePart>) -> Self {
        self.options.custom_message = Some(CustomMessage::Mixed(parts));
        self
    }

    /// Build the final options
    pub fn build(self) -> RuleOptions {
        self.options
    }
}

impl Default for OptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
