//! Selector Guardian - top-level selector policy enforcement for stylesheets
//!
//! Architecture: Clean Architecture - Library interface serves as the application layer
//! - Pure rule logic separated from any host linter infrastructure
//! - The host hands over a parsed tree and a report sink; the rule hands back violations
//! - Clean boundaries: parsing CSS, discovering files, and final diagnostic
//!   formatting all live on the host's side of the contract
//!
//! The rule flags selectors that appear at the top (root) nesting level of a
//! stylesheet when they match a configured restriction pattern, unless they
//! also match a configured exemption pattern.
//!
//! ```
//! use selector_guardian::{lint_with_raw_options, Stylesheet};
//! use serde_json::json;
//!
//! let mut sheet = Stylesheet::new();
//! sheet.append_rule(sheet.root(), ["body"]);
//!
//! let report = lint_with_raw_options(
//!     &sheet,
//!     &json!({ "restrictedSelectors": ["body", "html"] }),
//! )
//! .unwrap();
//!
//! assert_eq!(report.len(), 1);
//! assert_eq!(report.violations[0].message, "Unexpected top-level selector: body");
//! ```

pub mod config;
pub mod domain;
pub mod patterns;
pub mod report;
pub mod rule;
pub mod stylesheet;

// Re-export main types for convenient access
pub use domain::violations::{LintReport, RuleError, RuleResult, Violation};

pub use config::{CustomMessage, MessageFormatter, MessagePart, OptionsBuilder, RuleOptions};

pub use patterns::{Pattern, PatternSet};

pub use report::{OutputFormat, ReportFormatter, ReportOptions};

pub use rule::{
    messages, rule_entry, ReportSink, RuleContext, RuleMeta, TopLevelSelectorRule, META, RULE_NAME,
};

pub use stylesheet::{Node, NodeId, NodeKind, Position, Stylesheet, Walk};

use serde_json::Value as JsonValue;

/// Lint one parsed tree with typed options
pub fn lint_stylesheet(sheet: &Stylesheet, options: RuleOptions) -> LintReport {
    let mut report = LintReport::new();
    TopLevelSelectorRule::new(options).check(sheet, &mut report);
    report
}

/// Lint one parsed tree with a loosely-typed options value
///
/// Unlike [`rule_entry`], which swallows invalid options the way a host
/// contract expects, this surfaces the validation failure to the caller.
pub fn lint_with_raw_options(sheet: &Stylesheet, raw_options: &JsonValue) -> RuleResult<LintReport> {
    let options = RuleOptions::from_value(raw_options)?;
    Ok(lint_stylesheet(sheet, options))
}
