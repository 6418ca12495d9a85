//! Tests for runtime rule sets

use crate::common::Word;
use regram::{
    MatchFailure, MatchOptions, Record, RuleSet, Target, Value, alternation, attribute, collect,
    comma_separated_list, ignore, nested, optional, repeat_any_number, rule, sequence,
};

/// Arithmetic expressions: `term (op term)*` with parenthesised groups
fn expressions() -> RuleSet {
    RuleSet::new()
        .with_rule(
            "expr",
            sequence([
                attribute("first", rule("term")),
                attribute(
                    "rest",
                    repeat_any_number(collect([
                        ignore(r"\s*"),
                        rule("op"),
                        ignore(r"\s*"),
                        rule("term"),
                    ])),
                ),
            ]),
        )
        .with_rule("op", attribute("symbol", r"[-+*/]"))
        .with_rule(
            "term",
            alternation([
                sequence([ignore(r"\(\s*"), attribute("group", rule("expr")), ignore(r"\s*\)")]),
                attribute("number", r"\d+"),
            ]),
        )
        .with_start("expr")
}

fn text_of<'a>(record: &'a Record, name: &str) -> Option<&'a str> {
    record.get(name).and_then(Value::as_text)
}

fn record_of<'a>(record: &'a Record, name: &str) -> Option<&'a Record> {
    record.get(name).and_then(Value::downcast_ref::<Record>)
}

#[test]
fn test_expression_structure() {
    let rules = expressions();
    assert!(rules.validate().is_ok());

    let expr = rules.parse_start("1 + (2 * 3)").unwrap().complete().unwrap();
    let first = record_of(&expr, "first").unwrap();
    assert_eq!(text_of(first, "number"), Some("1"));

    let rest = expr.get("rest").and_then(Value::as_sequence).unwrap();
    assert_eq!(rest.len(), 2);
    let op = rest[0].downcast_ref::<Record>().unwrap();
    assert_eq!(op.kind(), "op");
    assert_eq!(text_of(op, "symbol"), Some("+"));

    let group = rest[1]
        .downcast_ref::<Record>()
        .and_then(|term| record_of(term, "group"))
        .unwrap();
    assert_eq!(group.kind(), "expr");
    assert_eq!(record_of(group, "first").and_then(|t| text_of(t, "number")), Some("2"));
}

#[test]
fn test_expression_stops_before_dangling_operator() {
    let parsed = expressions().parse_start("4 -").unwrap();
    assert_eq!(parsed.remaining(), " -");
    assert!(matches!(parsed.complete(), Err(MatchFailure::TrailingInput { position: 1 })));
}

#[test]
fn test_rule_set_with_typed_words() {
    let rules = RuleSet::new()
        .with_rule("tags", attribute("items", comma_separated_list(nested::<Word>())))
        .with_start("tags");
    let tags = rules.parse_start("red, green,blue").unwrap().complete().unwrap();

    let words: Vec<_> = tags
        .get("items")
        .and_then(Value::as_sequence)
        .unwrap()
        .iter()
        .filter_map(Value::downcast_ref::<Word>)
        .map(|word| word.content.as_str())
        .collect();
    assert_eq!(words, ["red", "green", "blue"]);
}

#[test]
fn test_optional_rule_reference() {
    let rules = RuleSet::new()
        .with_rule("sign", attribute("symbol", "[-+]"))
        .with_rule(
            "number",
            sequence([attribute("sign", optional(rule("sign"))), attribute("digits", r"\d+")]),
        );

    let signed = rules.parse("number", "-5").unwrap().value;
    let sign = record_of(&signed, "sign").unwrap();
    assert_eq!(sign.kind(), "sign");
    assert_eq!(text_of(sign, "symbol"), Some("-"));

    let unsigned = rules.parse("number", "5").unwrap().value;
    assert!(unsigned.get("sign").is_some_and(Value::is_empty));
    assert_eq!(text_of(&unsigned, "digits"), Some("5"));
}

#[test]
fn test_rule_set_options_limit_depth() {
    let rules = expressions().with_options(MatchOptions { max_depth: 16 });
    let deep = format!("{}1{}", "(".repeat(10), ")".repeat(10));
    assert!(matches!(
        rules.parse_start(&deep),
        Err(MatchFailure::RecursionLimit { limit: 16, .. })
    ));
    assert!(rules.parse_start("(1)").is_ok());
}
