//! Named rules for grammars assembled at runtime
//!
//! Grammar-bearing Rust types cover grammars known at compile time. A
//! [`RuleSet`] covers the rest: each rule is a named grammar tree, rules
//! refer to each other with [`GrammarNode::Rule`], and every rule activation
//! builds a fresh [`Record`] whose kind is the rule name.

use std::collections::BTreeMap;

use crate::error::MatchFailure;
use crate::grammar::GrammarNode;
use crate::matcher::{MatchOptions, Matcher, Parsed};
use crate::value::Record;

/// A set of named grammar rules
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: BTreeMap<String, GrammarNode>,
    start: Option<String>,
    options: MatchOptions,
}

impl RuleSet {
    /// Create an empty rule set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Define (or redefine) a rule
    pub fn define(&mut self, name: impl Into<String>, grammar: impl Into<GrammarNode>) {
        self.rules.insert(name.into(), grammar.into());
    }

    /// Add a rule, builder style
    #[must_use]
    pub fn with_rule(mut self, name: impl Into<String>, grammar: impl Into<GrammarNode>) -> Self {
        self.define(name, grammar);
        self
    }

    /// Set the rule used by [`RuleSet::parse_start`]
    #[must_use]
    pub fn with_start(mut self, name: impl Into<String>) -> Self {
        self.start = Some(name.into());
        self
    }

    /// Set the matcher options used by this rule set
    #[must_use]
    pub const fn with_options(mut self, options: MatchOptions) -> Self {
        self.options = options;
        self
    }

    /// Get a rule by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&GrammarNode> {
        self.rules.get(name)
    }

    /// Rule names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Rules in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &GrammarNode)> {
        self.rules.iter().map(|(name, grammar)| (name.as_str(), grammar))
    }

    /// Number of rules
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if no rule is defined
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The start rule, if set
    #[must_use]
    pub fn start(&self) -> Option<&str> {
        self.start.as_deref()
    }

    /// Matcher options used by this rule set
    #[must_use]
    pub const fn options(&self) -> MatchOptions {
        self.options
    }

    /// A matcher that resolves rules against this set
    #[must_use]
    pub fn matcher(&self) -> Matcher<'_> {
        Matcher::new().with_options(self.options).with_rules(self)
    }

    /// Check every rule, and that the start rule exists
    pub fn validate(&self) -> Result<(), MatchFailure> {
        if let Some(start) = &self.start {
            if !self.rules.contains_key(start) {
                return Err(MatchFailure::UnrecognizedPart {
                    part: format!("start rule `{start}`"),
                });
            }
        }
        self.rules.values().try_for_each(|grammar| grammar.validate(Some(self)))
    }

    /// Build a record from the start of `text` using rule `name`
    pub fn parse<'t>(&self, name: &str, text: &'t str) -> Result<Parsed<'t, Record>, MatchFailure> {
        let grammar = self.get(name).ok_or_else(|| MatchFailure::UnrecognizedPart {
            part: format!("rule `{name}`"),
        })?;
        let mut value = Record::new(name);
        let rest = self.matcher().parse_into(grammar, &mut value, text)?;
        Ok(Parsed { value, rest })
    }

    /// Build a record from the start of `text` using the start rule
    pub fn parse_start<'t>(&self, text: &'t str) -> Result<Parsed<'t, Record>, MatchFailure> {
        let start = self.start.as_deref().ok_or_else(|| MatchFailure::UnrecognizedPart {
            part: "start rule (none set)".to_string(),
        })?;
        self.parse(start, text)
    }
}
