//! Tests for the Output module
//!
//! Output provides structured result types that can be rendered as either
//! human-readable text or machine-parseable JSON.

use regram::output::{CheckReport, FailureReport, OutputMode, ParseReport};
use regram::{RuleSet, alternation, attribute, ignore, repeat_at_least_once, rule};

fn sentences() -> RuleSet {
    RuleSet::new()
        .with_rule("word", attribute("content", r"\w+"))
        .with_rule(
            "sentence",
            attribute("content", repeat_at_least_once(alternation([ignore(" +"), rule("word")]))),
        )
        .with_start("sentence")
}

// =============================================================================
// OutputMode Tests
// =============================================================================

#[test]
fn output_mode_default() {
    assert_eq!(OutputMode::default(), OutputMode::Human);
}

// =============================================================================
// ParseReport Tests
// =============================================================================

#[test]
fn parse_report_complete() {
    let rules = sentences();
    let parsed = rules.parse_start("hi there").unwrap();
    let report = ParseReport::new(&parsed);

    assert_eq!(report.rule, "sentence");
    assert!(report.complete);
    assert_eq!(report.consumed, 8);
    assert_eq!(report.value["content"][0]["content"], "hi");
    assert!(report.human().ends_with("All input consumed."));
}

#[test]
fn parse_report_partial() {
    let rules = sentences();
    let parsed = rules.parse_start("hi there!").unwrap();
    let report = ParseReport::new(&parsed);

    assert!(!report.complete);
    assert_eq!(report.remaining, "!");
    assert!(report.human().contains(r#"remaining: "!""#));
}

#[test]
fn parse_report_serialization() {
    let rules = sentences();
    let parsed = rules.parse_start("one").unwrap();
    let json = serde_json::to_value(ParseReport::new(&parsed)).unwrap();

    assert_eq!(json["rule"], "sentence");
    assert_eq!(json["complete"], true);
    assert_eq!(json["value"]["$kind"], "sentence");
    assert_eq!(json["value"]["content"][0]["$kind"], "word");
}

// =============================================================================
// FailureReport Tests
// =============================================================================

#[test]
fn failure_report_serialization() {
    let rules = sentences();
    let text = "\n  ?";
    let failure = rules.parse_start(text).unwrap_err();
    let json = serde_json::to_value(FailureReport::new(&failure, text)).unwrap();

    assert_eq!(json["recoverable"], true);
    assert_eq!(json["offset"], 0);
    assert_eq!(json["location"]["line"], 1);
    assert_eq!(json["location"]["column"], 1);
}

// =============================================================================
// CheckReport Tests
// =============================================================================

#[test]
fn check_report_lists_rules() {
    let report = CheckReport::new(&sentences());
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["start"], "sentence");
    assert_eq!(json["max_depth"], 256);
    assert_eq!(json["rules"][0]["name"], "sentence");
    assert_eq!(json["rules"][0]["notation"], "content=(~/ +/ | word)+");
    assert_eq!(json["rules"][1]["notation"], r"content=/\w+/");
}
