//! The top-level selector rule: walk, match, report
//!
//! CDD Principle: Domain Services - The rule orchestrates pattern sets over one tree
//! - Options are compiled before the walk; the walk itself is a pure read
//! - Reporting goes through an injected sink so any host collector plugs in
//! - One pass, document order, no mutation of the input tree

use crate::config::{MessageFormatter, RuleOptions};
use crate::domain::violations::{LintReport, Violation};
use crate::patterns::PatternSet;
use crate::stylesheet::Stylesheet;
use serde_json::Value as JsonValue;

/// Stable identifier under which the rule registers with a host linter
pub const RULE_NAME: &str = "selector-guardian/disable-top-level-selector";

/// Static metadata a host reads at registration time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMeta {
    pub name: &'static str,
    pub url: &'static str,
}

/// Registration metadata for this rule
pub const META: RuleMeta = RuleMeta {
    name: RULE_NAME,
    url: "https://github.com/cloudfunnels/selector-guardian",
};

/// Default message templates for this rule
pub mod messages {
    /// Message for a restricted selector found at the top level
    pub fn rejected(selector: &str) -> String {
        format!("Unexpected top-level selector: {selector}")
    }
}

/// Sink receiving violations as the walker finds them
///
/// Hosts supply their own collector; tests supply a `Vec<Violation>`.
pub trait ReportSink {
    fn report(&mut self, violation: Violation);
}

impl ReportSink for LintReport {
    fn report(&mut self, violation: Violation) {
        self.add_violation(violation);
    }
}

impl ReportSink for Vec<Violation> {
    fn report(&mut self, violation: Violation) {
        self.push(violation);
    }
}

/// Host-supplied invocation context
///
/// The rule performs no fixing, so the `fix` flag is accepted and ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleContext {
    pub fix: bool,
}

/// The configured rule, ready to check any number of trees
///
/// Pattern sets are compiled before construction and read-only afterwards,
/// so one configured rule may check independent trees concurrently.
pub struct TopLevelSelectorRule {
    restricted: PatternSet,
    ignored: PatternSet,
    message: Option<MessageFormatter>,
}

impl TopLevelSelectorRule {
    /// Build the rule from validated options
    pub fn new(options: RuleOptions) -> Self {
        let message = options
            .custom_message
            .as_ref()
            .and_then(|custom| custom.formatter().cloned());
        Self {
            restricted: options.restricted_selectors,
            ignored: options.ignore_selectors,
            message,
        }
    }

    /// Check one stylesheet tree, reporting violations into `sink`
    ///
    /// Visits every style-rule node in document order, nested rules
    /// included; "top-level" is a per-node property of the immediate
    /// parent. Ignore patterns win over restrictions unconditionally.
    pub fn check(&self, sheet: &Stylesheet, sink: &mut dyn ReportSink) {
        if self.restricted.is_empty() {
            return;
        }

        tracing::debug!(
            "Checking stylesheet ({} nodes) against {} restricted and {} ignore pattern(s)",
            sheet.len(),
            self.restricted.len(),
            self.ignored.len()
        );

        for (node, selectors) in sheet.walk_rules() {
            let top_level = sheet.is_top_level(node);

            for selector in selectors {
                let trimmed = selector.trim();

                if self.ignored.matches(trimmed) {
                    continue;
                }

                if top_level && self.restricted.matches(trimmed) {
                    let mut violation =
                        Violation::new(RULE_NAME, self.render_message(trimmed), trimmed, node);
                    if let Some(position) = sheet.node(node).position {
                        violation = violation.with_position(position);
                    }
                    sink.report(violation);
                }
            }
        }
    }

    fn render_message(&self, selector: &str) -> String {
        match &self.message {
            Some(formatter) => formatter(selector),
            None => messages::rejected(selector),
        }
    }
}

/// The host invocation contract
///
/// Validates options once and returns the check closure the host runs per
/// parsed tree. A disabled rule and invalid options both yield a no-op
/// closure; invalid options are logged, never propagated, matching a host's
/// own configuration diagnostics taking over from there.
pub fn rule_entry(
    enabled: bool,
    raw_options: &JsonValue,
    context: RuleContext,
) -> impl Fn(&Stylesheet, &mut dyn ReportSink) {
    let rule = if enabled {
        match RuleOptions::from_value(raw_options) {
            Ok(options) => Some(TopLevelSelectorRule::new(options)),
            Err(error) => {
                tracing::warn!("Invalid options for {RULE_NAME}: {error}");
                None
            }
        }
    } else {
        None
    };

    if context.fix {
        tracing::debug!("{RULE_NAME} does not support fixing; fix context ignored");
    }

    move |sheet: &Stylesheet, sink: &mut dyn ReportSink| {
        if let Some(rule) = &rule {
            rule.check(sheet, sink);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OptionsBuilder;
    use crate::patterns::Pattern;
    use serde_json::json;

    fn check_with(options: RuleOptions, sheet: &Stylesheet) -> Vec<Violation> {
        let mut collected = Vec::new();
        TopLevelSelectorRule::new(options).check(sheet, &mut collected);
        collected
    }

    #[test]
    fn test_restricted_top_level_selector_is_reported() {
        // Scenario A
        let mut sheet = Stylesheet::new();
        sheet.append_rule(sheet.root(), ["body"]);

        let options = RuleOptions::from_value(&json!({
            "restrictedSelectors": ["body", "html"],
        }))
        .unwrap();

        let violations = check_with(options, &sheet);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "Unexpected top-level selector: body");
        assert_eq!(violations[0].selector, "body");
        assert_eq!(violations[0].rule_id, RULE_NAME);
    }

    #[test]
    fn test_ignore_wins_over_restriction() {
        // Scenario B
        let mut sheet = Stylesheet::new();
        sheet.append_rule(sheet.root(), ["body"]);

        let options = RuleOptions::from_value(&json!({
            "restrictedSelectors": ["body", "html"],
            "ignoreSelectors": ["body"],
        }))
        .unwrap();

        assert!(check_with(options, &sheet).is_empty());
    }

    #[test]
    fn test_regex_restriction_matches_component_class() {
        // Scenario C
        let mut sheet = Stylesheet::new();
        sheet.append_rule(sheet.root(), [".component-foo"]);

        let options = RuleOptions::from_value(&json!({
            "restrictedSelectors": ["/^\\.component-[a-z]+/i"],
        }))
        .unwrap();

        let violations = check_with(options, &sheet);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].selector, ".component-foo");
    }

    #[test]
    fn test_nested_rule_inside_media_is_not_top_level() {
        // Scenario D: the immediate parent decides, not transitive root-ness
        let mut sheet = Stylesheet::new();
        let media = sheet.append_at_rule(sheet.root(), "media", "(max-width: 100px)");
        sheet.append_rule(media, ["body"]);

        let options = RuleOptions::from_value(&json!({
            "restrictedSelectors": ["body"],
        }))
        .unwrap();

        assert!(check_with(options, &sheet).is_empty());
    }

    #[test]
    fn test_custom_message_formatter_renders_violation() {
        // Scenario E
        let mut sheet = Stylesheet::new();
        sheet.append_rule(sheet.root(), ["html"]);

        let options = OptionsBuilder::new()
            .restrict(Pattern::literal("html"))
            .message_formatter(|selector| {
                format!("Top-level selector \"{selector}\" is not allowed.")
            })
            .build();

        let violations = check_with(options, &sheet);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "Top-level selector \"html\" is not allowed.");
    }

    #[test]
    fn test_text_custom_message_falls_through_to_default() {
        let mut sheet = Stylesheet::new();
        sheet.append_rule(sheet.root(), ["html"]);

        let options = RuleOptions::from_value(&json!({
            "restrictedSelectors": ["html"],
            "customMessage": "never rendered",
        }))
        .unwrap();

        let violations = check_with(options, &sheet);
        assert_eq!(violations[0].message, messages::rejected("html"));
    }

    #[test]
    fn test_empty_restriction_set_reports_nothing() {
        let mut sheet = Stylesheet::new();
        sheet.append_rule(sheet.root(), ["body"]);

        let options = RuleOptions::from_value(&json!({
            "ignoreSelectors": [":root"],
        }))
        .unwrap();

        assert!(check_with(options, &sheet).is_empty());
    }

    #[test]
    fn test_selectors_are_trimmed_before_matching_and_reporting() {
        let mut sheet = Stylesheet::new();
        sheet.append_rule(sheet.root(), ["  body  "]);

        let options = RuleOptions::from_value(&json!({
            "restrictedSelectors": ["body"],
        }))
        .unwrap();

        let violations = check_with(options, &sheet);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].selector, "body");
        assert_eq!(violations[0].message, "Unexpected top-level selector: body");
    }

    #[test]
    fn test_violations_follow_document_then_selector_order() {
        let mut sheet = Stylesheet::new();
        sheet.append_rule(sheet.root(), ["html", "body"]);
        let media = sheet.append_at_rule(sheet.root(), "media", "screen");
        sheet.append_rule(media, ["body"]);
        sheet.append_rule(sheet.root(), ["body"]);

        let options = RuleOptions::from_value(&json!({
            "restrictedSelectors": ["body", "html"],
        }))
        .unwrap();

        let violations = check_with(options, &sheet);
        let selectors: Vec<&str> = violations
            .iter()
            .map(|violation| violation.selector.as_str())
            .collect();
        // The nested body is skipped; top-level entries keep source order.
        assert_eq!(selectors, vec!["html", "body", "body"]);
    }

    #[test]
    fn test_ignore_applies_to_nested_rules_too() {
        let mut sheet = Stylesheet::new();
        let media = sheet.append_at_rule(sheet.root(), "media", "screen");
        sheet.append_rule(media, [".safe-widget"]);
        sheet.append_rule(sheet.root(), [".safe-widget"]);

        let options = RuleOptions::from_value(&json!({
            "restrictedSelectors": ["/^\\.safe-/"],
            "ignoreSelectors": ["/^\\.safe-/"],
        }))
        .unwrap();

        assert!(check_with(options, &sheet).is_empty());
    }

    #[test]
    fn test_position_is_copied_from_the_rule_node() {
        let mut sheet = Stylesheet::new();
        let rule = sheet.append_rule(sheet.root(), ["body"]);
        sheet.set_position(rule, 12, 1);

        let options = RuleOptions::from_value(&json!({
            "restrictedSelectors": ["body"],
        }))
        .unwrap();

        let violations = check_with(options, &sheet);
        assert_eq!(violations[0].position.map(|p| (p.line, p.column)), Some((12, 1)));
        assert_eq!(violations[0].node, rule);
    }

    #[test]
    fn test_check_is_idempotent() {
        let mut sheet = Stylesheet::new();
        sheet.append_rule(sheet.root(), ["body", "html"]);

        let options = RuleOptions::from_value(&json!({
            "restrictedSelectors": ["body", "html"],
        }))
        .unwrap();
        let rule = TopLevelSelectorRule::new(options);

        let mut first = Vec::new();
        let mut second = Vec::new();
        rule.check(&sheet, &mut first);
        rule.check(&sheet, &mut second);
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_rule_entry_disabled_is_noop() {
        let mut sheet = Stylesheet::new();
        sheet.append_rule(sheet.root(), ["body"]);

        let check = rule_entry(
            false,
            &json!({ "restrictedSelectors": ["body"] }),
            RuleContext::default(),
        );

        let mut collected: Vec<Violation> = Vec::new();
        check(&sheet, &mut collected);
        assert!(collected.is_empty());
    }

    #[test]
    fn test_rule_entry_skips_run_on_invalid_options() {
        let mut sheet = Stylesheet::new();
        sheet.append_rule(sheet.root(), ["body"]);

        let check = rule_entry(
            true,
            &json!({ "restrictedSelectors": { "bad": "shape" } }),
            RuleContext::default(),
        );

        let mut collected: Vec<Violation> = Vec::new();
        check(&sheet, &mut collected);
        assert!(collected.is_empty());
    }

    #[test]
    fn test_rule_entry_checks_when_enabled() {
        let mut sheet = Stylesheet::new();
        sheet.append_rule(sheet.root(), ["body"]);

        let check = rule_entry(
            true,
            &json!({ "restrictedSelectors": ["body"] }),
            RuleContext { fix: true },
        );

        let mut collected: Vec<Violation> = Vec::new();
        check(&sheet, &mut collected);
        assert_eq!(collected.len(), 1);
    }

    #[test]
    fn test_metadata_surface() {
        assert_eq!(META.name, RULE_NAME);
        assert!(META.url.starts_with("https://"));
        assert_eq!(messages::rejected("body"), "Unexpected top-level selector: body");
    }
}
