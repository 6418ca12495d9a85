//! Construction functions for grammar trees
//!
//! None of these validate their input. Patterns are compiled lazily and rule
//! references are resolved at match time; call
//! [`GrammarNode::validate`] to check a tree up front.

use super::{Grammar, GrammarNode, Terminal, TypeRef};

/// Separator used by [`comma_separated_list`]
pub const COMMA_SEPARATOR: &str = r"\s*,\s*";

/// A regular-expression terminal
#[must_use]
pub fn terminal(pattern: impl Into<String>) -> GrammarNode {
    GrammarNode::Terminal(Terminal::new(pattern))
}

/// A nested grammar-bearing type
#[must_use]
pub fn nested<T: Grammar>() -> GrammarNode {
    GrammarNode::Nested(TypeRef::of::<T>())
}

/// A named rule, resolved against the matcher's rule set
#[must_use]
pub fn rule(name: impl Into<String>) -> GrammarNode {
    GrammarNode::Rule(name.into())
}

/// Apply every part in order to the same object, discarding their values
#[must_use]
pub fn sequence<I, P>(parts: I) -> GrammarNode
where
    I: IntoIterator<Item = P>,
    P: Into<GrammarNode>,
{
    GrammarNode::Sequence(parts.into_iter().map(Into::into).collect())
}

/// Apply every part in order, aggregating their values
#[must_use]
pub fn collect<I, P>(parts: I) -> GrammarNode
where
    I: IntoIterator<Item = P>,
    P: Into<GrammarNode>,
{
    GrammarNode::Collect(parts.into_iter().map(Into::into).collect())
}

/// The first part that matches
#[must_use]
pub fn alternation<I, P>(parts: I) -> GrammarNode
where
    I: IntoIterator<Item = P>,
    P: Into<GrammarNode>,
{
    GrammarNode::Alternation(parts.into_iter().map(Into::into).collect())
}

/// Bind the value of `part` on the object as `name`
#[must_use]
pub fn attribute(name: impl Into<String>, part: impl Into<GrammarNode>) -> GrammarNode {
    GrammarNode::Attribute {
        name: name.into(),
        part: Box::new(part.into()),
    }
}

/// Match `part` but contribute nothing to the result
#[must_use]
pub fn ignore(part: impl Into<GrammarNode>) -> GrammarNode {
    GrammarNode::Ignore(Box::new(part.into()))
}

/// Match `part` if possible
#[must_use]
pub fn optional(part: impl Into<GrammarNode>) -> GrammarNode {
    GrammarNode::Optional(Box::new(part.into()))
}

/// Repeat `part`, zero or more times when `allow_zero` is set
#[must_use]
pub fn repeat(part: impl Into<GrammarNode>, allow_zero: bool) -> GrammarNode {
    GrammarNode::Repeat {
        part: Box::new(part.into()),
        allow_zero,
    }
}

/// Repeat `part` one or more times
#[must_use]
pub fn repeat_at_least_once(part: impl Into<GrammarNode>) -> GrammarNode {
    repeat(part, false)
}

/// Repeat `part` any number of times
#[must_use]
pub fn repeat_any_number(part: impl Into<GrammarNode>) -> GrammarNode {
    repeat(part, true)
}

/// One `part`, then any number of `separator part` pairs
///
/// Separators are ignored, so the aggregate holds only the items.
#[must_use]
pub fn separated_list(part: impl Into<GrammarNode>, separator: impl Into<GrammarNode>) -> GrammarNode {
    let part = part.into();
    GrammarNode::Collect(vec![
        part.clone(),
        repeat_any_number(GrammarNode::Collect(vec![ignore(separator), part])),
    ])
}

/// [`separated_list`] with commas and optional surrounding whitespace
#[must_use]
pub fn comma_separated_list(part: impl Into<GrammarNode>) -> GrammarNode {
    separated_list(part, COMMA_SEPARATOR)
}
