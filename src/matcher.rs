//! The matching engine
//!
//! One recursive function, dispatched on the node variant, walks a grammar
//! tree against the input. Failures are ordinary `Err` values: alternation,
//! optional and repetition inspect them to decide between retrying and
//! propagating, and rolling back is just reusing the cursor held before the
//! failed attempt.
//!
//! Values bubble up the tree and are merged with the flattening rule of
//! [`Value::flatten_into`]. Attribute bindings mutate the object being built,
//! which is threaded through the walk as `&mut dyn Target`.

use serde::{Deserialize, Serialize};

use crate::cursor::Cursor;
use crate::error::MatchFailure;
use crate::grammar::{Grammar, GrammarNode, Terminal, TypeRef};
use crate::rules::RuleSet;
use crate::value::{AttributeError, Record, Target, Value};

/// Default for [`MatchOptions::max_depth`]
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Tunables for a matcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    /// Deepest chain of nested type and rule activations allowed before
    /// failing with `RecursionLimit`
    ///
    /// Combinators inside one grammar do not count; only entering the
    /// grammar of a nested type or a named rule does.
    pub max_depth: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// What a node produced
#[derive(Debug)]
pub enum Produced {
    /// A value to aggregate or bind
    Value(Value),
    /// The object being built (result of sequences and attribute bindings)
    ///
    /// Contributes nothing when merged into an aggregate.
    Target,
}

impl Produced {
    /// Merge into an aggregate; the object being built contributes nothing
    fn flatten_into(self, aggregate: &mut Vec<Value>) {
        if let Self::Value(value) = self {
            value.flatten_into(aggregate);
        }
    }

    /// The produced value, if it is not the object itself
    #[must_use]
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Target => None,
        }
    }
}

/// Result of a top-level parse: the built object and the unconsumed input
///
/// Parsing does not require the whole input to be consumed; use
/// [`Parsed::complete`] when it must be.
#[derive(Debug)]
pub struct Parsed<'t, T> {
    /// The built object
    pub value: T,
    /// Cursor after the last consumed byte
    pub rest: Cursor<'t>,
}

impl<'t, T> Parsed<'t, T> {
    /// Text left over after the parse
    #[must_use]
    pub fn remaining(&self) -> &'t str {
        self.rest.remaining()
    }

    /// Check if all input was consumed
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.rest.is_at_end()
    }

    /// The built object, or `TrailingInput` if input is left over
    pub fn complete(self) -> Result<T, MatchFailure> {
        if self.is_complete() {
            Ok(self.value)
        } else {
            Err(MatchFailure::TrailingInput {
                position: self.rest.offset(),
            })
        }
    }
}

/// Interprets grammar trees against input text
#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher<'g> {
    rules: Option<&'g RuleSet>,
    options: MatchOptions,
}

impl<'g> Matcher<'g> {
    /// Matcher with default options and no rule set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use these options
    #[must_use]
    pub const fn with_options(mut self, options: MatchOptions) -> Self {
        self.options = options;
        self
    }

    /// Resolve `Rule` nodes against this rule set
    #[must_use]
    pub const fn with_rules(mut self, rules: &'g RuleSet) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Options in effect
    #[must_use]
    pub const fn options(&self) -> MatchOptions {
        self.options
    }

    /// Build a `T` from the start of `text`
    pub fn parse<'t, T: Grammar>(&self, text: &'t str) -> Result<Parsed<'t, T>, MatchFailure> {
        let mut value = T::default();
        let rest = self.parse_into(T::grammar(), &mut value, text)?;
        Ok(Parsed { value, rest })
    }

    /// Build a `T` from all of `text`
    pub fn parse_complete<T: Grammar>(&self, text: &str) -> Result<T, MatchFailure> {
        self.parse::<T>(text)?.complete()
    }

    /// Match `grammar` from the start of `text` onto `target`
    ///
    /// Returns the cursor after the consumed input.
    pub fn parse_into<'t>(
        &self,
        grammar: &GrammarNode,
        target: &mut dyn Target,
        text: &'t str,
    ) -> Result<Cursor<'t>, MatchFailure> {
        log::debug!("parsing {} ({} bytes of input)", target.kind(), text.len());
        let (_, rest) = self.match_node(grammar, target, Cursor::new(text))?;
        log::debug!("parsed {}: {} bytes left over", target.kind(), rest.remaining().len());
        Ok(rest)
    }

    /// Match one node against `cursor`, binding attributes onto `target`
    pub fn match_node<'t>(
        &self,
        node: &GrammarNode,
        target: &mut dyn Target,
        cursor: Cursor<'t>,
    ) -> Result<(Produced, Cursor<'t>), MatchFailure> {
        self.descend(node, target, cursor, 0)
    }

    fn descend<'t>(
        &self,
        node: &GrammarNode,
        target: &mut dyn Target,
        cursor: Cursor<'t>,
        depth: usize,
    ) -> Result<(Produced, Cursor<'t>), MatchFailure> {
        match node {
            GrammarNode::Terminal(terminal) => Self::match_terminal(terminal, cursor),
            GrammarNode::Nested(type_ref) => self.match_nested(type_ref, cursor, depth),
            GrammarNode::Rule(name) => self.match_rule(name, cursor, depth),
            GrammarNode::Sequence(parts) => {
                let mut current = cursor;
                for part in parts {
                    let (_, next) = self.descend(part, target, current, depth)?;
                    current = next;
                }
                Ok((Produced::Target, current))
            },
            GrammarNode::Collect(parts) => {
                let mut aggregate = Vec::new();
                let mut current = cursor;
                for part in parts {
                    let (produced, next) = self.descend(part, target, current, depth)?;
                    produced.flatten_into(&mut aggregate);
                    current = next;
                }
                Ok((Produced::Value(Value::Sequence(aggregate)), current))
            },
            GrammarNode::Alternation(parts) => self.match_alternation(parts, target, cursor, depth),
            GrammarNode::Attribute { name, part } => {
                let (produced, next) = self.descend(part, target, cursor, depth)?;
                let bound = match produced {
                    Produced::Value(value) => target.set_attribute(name, value),
                    Produced::Target => Err(AttributeError::SelfReference),
                };
                bound.map_err(|source| MatchFailure::InvalidAttribute {
                    target: target.kind().to_string(),
                    name: name.clone(),
                    source,
                })?;
                Ok((Produced::Target, next))
            },
            GrammarNode::Ignore(part) => {
                let (_, next) = self.descend(part, target, cursor, depth)?;
                Ok((Produced::Value(Value::empty()), next))
            },
            GrammarNode::Optional(part) => match self.descend(part, target, cursor, depth) {
                Err(failure) if failure.is_recoverable() => {
                    Ok((Produced::Value(Value::empty()), cursor))
                },
                result => result,
            },
            GrammarNode::Repeat { part, allow_zero } => {
                self.match_repeat(part, *allow_zero, target, cursor, depth)
            },
        }
    }

    fn match_terminal<'t>(
        terminal: &Terminal,
        cursor: Cursor<'t>,
    ) -> Result<(Produced, Cursor<'t>), MatchFailure> {
        let input = cursor.remaining();
        match terminal.match_len(input)? {
            Some(len) => {
                let text = input[..len].to_string();
                Ok((Produced::Value(Value::Text(text)), cursor.advance(len)))
            },
            None => Err(MatchFailure::TerminalMismatch {
                pattern: terminal.pattern().to_string(),
                position: cursor.offset(),
            }),
        }
    }

    fn enter(&self, depth: usize, cursor: Cursor<'_>) -> Result<usize, MatchFailure> {
        let depth = depth + 1;
        if depth > self.options.max_depth {
            return Err(MatchFailure::RecursionLimit {
                limit: self.options.max_depth,
                position: cursor.offset(),
            });
        }
        Ok(depth)
    }

    fn match_nested<'t>(
        &self,
        type_ref: &TypeRef,
        cursor: Cursor<'t>,
        depth: usize,
    ) -> Result<(Produced, Cursor<'t>), MatchFailure> {
        let depth = self.enter(depth, cursor)?;
        let mut instance = type_ref.instantiate();
        let (_, next) = self.descend(type_ref.grammar(), &mut *instance, cursor, depth)?;
        Ok((Produced::Value(Value::Object(instance)), next))
    }

    fn match_rule<'t>(
        &self,
        name: &str,
        cursor: Cursor<'t>,
        depth: usize,
    ) -> Result<(Produced, Cursor<'t>), MatchFailure> {
        let grammar = self.rules.and_then(|rules| rules.get(name)).ok_or_else(|| {
            MatchFailure::UnrecognizedPart {
                part: format!("rule `{name}`"),
            }
        })?;
        let depth = self.enter(depth, cursor)?;
        let mut record = Record::new(name);
        let (_, next) = self.descend(grammar, &mut record, cursor, depth)?;
        Ok((Produced::Value(Value::Object(Box::new(record))), next))
    }

    fn match_alternation<'t>(
        &self,
        parts: &[GrammarNode],
        target: &mut dyn Target,
        cursor: Cursor<'t>,
        depth: usize,
    ) -> Result<(Produced, Cursor<'t>), MatchFailure> {
        for part in parts {
            match self.descend(part, target, cursor, depth) {
                Ok(matched) => return Ok(matched),
                Err(failure) if failure.is_recoverable() => {
                    log::trace!("alternative {part} failed: {failure}");
                },
                Err(failure) => return Err(failure),
            }
        }
        Err(MatchFailure::NoAlternativeMatched {
            attempted: parts.iter().map(ToString::to_string).collect(),
            position: cursor.offset(),
        })
    }

    fn match_repeat<'t>(
        &self,
        part: &GrammarNode,
        allow_zero: bool,
        target: &mut dyn Target,
        cursor: Cursor<'t>,
        depth: usize,
    ) -> Result<(Produced, Cursor<'t>), MatchFailure> {
        let mut aggregate = Vec::new();
        let mut iterations = 0_usize;
        let mut built_target = false;
        let mut current = cursor;

        while !current.is_at_end() {
            match self.descend(part, target, current, depth) {
                Ok((produced, next)) => {
                    if next.offset() == current.offset() {
                        return Err(MatchFailure::NoProgress {
                            position: current.offset(),
                        });
                    }
                    built_target |= matches!(produced, Produced::Target);
                    produced.flatten_into(&mut aggregate);
                    iterations += 1;
                    current = next;
                },
                Err(failure) if failure.is_recoverable() => {
                    log::trace!("repetition of {part} stopped after {iterations}: {failure}");
                    break;
                },
                Err(failure) => return Err(failure),
            }
        }

        // Iterations that only matched ignored text do not satisfy the minimum
        if aggregate.is_empty() && !built_target && !allow_zero {
            return Err(MatchFailure::RepeatRequiresAtLeastOne {
                position: cursor.offset(),
            });
        }
        Ok((Produced::Value(Value::Sequence(aggregate)), current))
    }
}

/// Build a `T` from the start of `text` with default options
///
/// Input after the matched prefix is left in [`Parsed::rest`].
pub fn parse<T: Grammar>(text: &str) -> Result<Parsed<'_, T>, MatchFailure> {
    Matcher::new().parse(text)
}

/// Build a `T` from all of `text` with default options
pub fn parse_complete<T: Grammar>(text: &str) -> Result<T, MatchFailure> {
    Matcher::new().parse_complete(text)
}
