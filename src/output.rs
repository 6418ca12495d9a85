//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use serde::Serialize;

use crate::cursor::Location;
use crate::error::MatchFailure;
use crate::matcher::Parsed;
use crate::rules::RuleSet;
use crate::value::{Record, Target};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Result of a successful parse
#[derive(Debug, Serialize)]
pub struct ParseReport {
    /// Rule the input was parsed with
    pub rule: String,
    /// Whether all input was consumed
    pub complete: bool,
    /// Number of bytes consumed
    pub consumed: usize,
    /// Unconsumed input
    pub remaining: String,
    /// The built object
    pub value: serde_json::Value,
}

impl ParseReport {
    /// Build a report from a parsed record
    #[must_use]
    pub fn new(parsed: &Parsed<'_, Record>) -> Self {
        Self {
            rule: parsed.value.kind().to_string(),
            complete: parsed.is_complete(),
            consumed: parsed.rest.offset(),
            remaining: parsed.remaining().to_string(),
            value: parsed.value.to_json(),
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => println!("{}", self.human()),
            OutputMode::Json => self.render_json(),
        }
    }

    /// Human-readable rendering
    #[must_use]
    pub fn human(&self) -> String {
        let mut out = render_tree(&self.value, 1);
        if self.complete {
            out.push_str("\n\nAll input consumed.");
        } else {
            out.push_str(&format!(
                "\n\nStopped after {} byte(s); remaining: {:?}",
                self.consumed, self.remaining
            ));
        }
        out
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

/// A failed parse, located in the input
#[derive(Debug, Serialize)]
pub struct FailureReport {
    /// Failure message
    pub error: String,
    /// Whether the failure is about the input rather than the grammar
    pub recoverable: bool,
    /// Byte offset of the failure, if it has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
    /// Line and column of the failure, if it has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl FailureReport {
    /// Build a report for a failure while parsing `text`
    #[must_use]
    pub fn new(failure: &MatchFailure, text: &str) -> Self {
        let offset = failure.position();
        Self {
            error: failure.to_string(),
            recoverable: failure.is_recoverable(),
            offset,
            location: offset.map(|offset| Location::locate(text, offset)),
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => println!("{}", self.human()),
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }

    /// Human-readable rendering
    #[must_use]
    pub fn human(&self) -> String {
        self.location.map_or_else(
            || format!("Parse failed: {}", self.error),
            |location| format!("Parse failed at {location}: {}", self.error),
        )
    }
}

/// Result of checking a grammar file
#[derive(Debug, Serialize)]
pub struct CheckReport {
    /// Start rule, if declared
    pub start: Option<String>,
    /// Nesting limit in effect
    pub max_depth: usize,
    /// Declared rules
    pub rules: Vec<RuleInfo>,
}

/// A rule in a checked grammar
#[derive(Debug, Serialize)]
pub struct RuleInfo {
    /// Rule name
    pub name: String,
    /// Grammar in compact notation
    pub notation: String,
}

impl CheckReport {
    /// Build a report for a validated rule set
    #[must_use]
    pub fn new(rules: &RuleSet) -> Self {
        Self {
            start: rules.start().map(str::to_string),
            max_depth: rules.options().max_depth,
            rules: rules
                .iter()
                .map(|(name, grammar)| RuleInfo {
                    name: name.to_string(),
                    notation: grammar.to_string(),
                })
                .collect(),
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        println!("Grammar OK: {} rule(s)\n", self.rules.len());
        for rule in &self.rules {
            let marker = if self.start.as_deref() == Some(rule.name.as_str()) {
                " (start)"
            } else {
                ""
            };
            println!("  {}{marker}", rule.name);
            println!("      {}\n", rule.notation);
        }
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

/// Render a JSON value as an indented tree
///
/// Objects carrying a `$kind` key print the kind as a heading followed by
/// their attributes.
#[must_use]
pub fn render_tree(value: &serde_json::Value, indent: usize) -> String {
    let pad = "  ".repeat(indent);
    match value {
        serde_json::Value::String(text) => format!("{text:?}"),
        serde_json::Value::Array(items) if items.is_empty() => "[]".to_string(),
        serde_json::Value::Array(items) => items
            .iter()
            .map(|item| format!("\n{pad}- {}", render_tree(item, indent + 1)))
            .collect(),
        serde_json::Value::Object(map) => {
            let mut out = map
                .get("$kind")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("object")
                .to_string();
            for (name, attribute) in map.iter().filter(|(name, _)| name.as_str() != "$kind") {
                let rendered = render_tree(attribute, indent + 1);
                let gap = if rendered.starts_with('\n') { "" } else { " " };
                out.push_str(&format!("\n{pad}{name}:{gap}{rendered}"));
            }
            out
        },
        other => other.to_string(),
    }
}
