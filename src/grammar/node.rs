//! Grammar node variants

use std::any::type_name;
use std::fmt;

use super::Terminal;
use crate::error::MatchFailure;
use crate::rules::RuleSet;
use crate::value::Target;

/// A type that owns a top-level grammar and can be built by matching it
///
/// Grammars are usually kept in a lazily initialised static:
///
/// ```
/// use once_cell::sync::Lazy;
/// use regram::{attribute, AttributeError, Grammar, GrammarNode, Record, Target, Value};
///
/// #[derive(Debug)]
/// struct Word(Record);
///
/// impl Default for Word {
///     fn default() -> Self {
///         Self(Record::new("Word"))
///     }
/// }
///
/// impl Target for Word {
///     fn kind(&self) -> &str {
///         self.0.kind()
///     }
///
///     fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), AttributeError> {
///         self.0.set_attribute(name, value)
///     }
///
///     fn to_json(&self) -> serde_json::Value {
///         self.0.to_json()
///     }
/// }
///
/// impl Grammar for Word {
///     fn grammar() -> &'static GrammarNode {
///         static GRAMMAR: Lazy<GrammarNode> = Lazy::new(|| attribute("content", r"\w+"));
///         &GRAMMAR
///     }
/// }
///
/// let parsed = regram::parse::<Word>("hello world").unwrap();
/// assert_eq!(parsed.remaining(), " world");
/// ```
pub trait Grammar: Target + Default {
    /// The type's top-level grammar node
    fn grammar() -> &'static GrammarNode;
}

/// Reference to a grammar-bearing type
///
/// Holds function pointers only, so a type's grammar may refer to the type
/// itself without building an infinite tree.
#[derive(Debug, Clone, Copy)]
pub struct TypeRef {
    name: &'static str,
    instantiate: fn() -> Box<dyn Target>,
    grammar: fn() -> &'static GrammarNode,
}

impl TypeRef {
    /// Reference to `T`
    #[must_use]
    pub fn of<T: Grammar>() -> Self {
        Self {
            name: short_type_name(type_name::<T>()),
            instantiate: instantiate::<T>,
            grammar: T::grammar,
        }
    }

    /// Short name of the referenced type
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// A fresh, empty instance of the type
    #[must_use]
    pub fn instantiate(&self) -> Box<dyn Target> {
        (self.instantiate)()
    }

    /// The type's top-level grammar
    #[must_use]
    pub fn grammar(&self) -> &'static GrammarNode {
        (self.grammar)()
    }
}

fn instantiate<T: Grammar>() -> Box<dyn Target> {
    Box::new(T::default())
}

fn short_type_name(full: &'static str) -> &'static str {
    let base = full.find('<').map_or(full, |pos| &full[..pos]);
    base.rsplit("::").next().unwrap_or(base)
}

/// One combinator in a grammar tree
#[derive(Debug, Clone)]
pub enum GrammarNode {
    /// Anchored regular expression
    Terminal(Terminal),
    /// A grammar-bearing type, matched into a fresh instance
    Nested(TypeRef),
    /// A named rule of the active rule set, matched into a fresh record
    Rule(String),
    /// Every part in order on the same object; values are discarded
    Sequence(Vec<GrammarNode>),
    /// Every part in order; values are flattened into one aggregate
    Collect(Vec<GrammarNode>),
    /// First part that matches, in declared order
    Alternation(Vec<GrammarNode>),
    /// Match `part` and bind its value on the object as `name`
    Attribute {
        /// Attribute name
        name: String,
        /// Part whose value is bound
        part: Box<GrammarNode>,
    },
    /// Match the part and produce the empty aggregate
    Ignore(Box<GrammarNode>),
    /// Match the part, or succeed with the empty aggregate
    Optional(Box<GrammarNode>),
    /// Match the part repeatedly, aggregating each value
    Repeat {
        /// Repeated part
        part: Box<GrammarNode>,
        /// Whether zero repetitions are a success
        allow_zero: bool,
    },
}

impl GrammarNode {
    /// Check the tree for errors that do not depend on input
    ///
    /// Compiles every terminal and resolves every rule reference against
    /// `rules`. Nested grammar-bearing types are not entered; each type
    /// validates its own grammar.
    pub fn validate(&self, rules: Option<&RuleSet>) -> Result<(), MatchFailure> {
        match self {
            Self::Terminal(terminal) => terminal.regex().map(|_| ()),
            Self::Nested(_) => Ok(()),
            Self::Rule(name) => {
                if rules.is_some_and(|rules| rules.get(name).is_some()) {
                    Ok(())
                } else {
                    Err(MatchFailure::UnrecognizedPart {
                        part: format!("rule `{name}`"),
                    })
                }
            },
            Self::Sequence(parts) | Self::Collect(parts) | Self::Alternation(parts) => {
                parts.iter().try_for_each(|part| part.validate(rules))
            },
            Self::Attribute { part, .. }
            | Self::Ignore(part)
            | Self::Optional(part)
            | Self::Repeat { part, .. } => part.validate(rules),
        }
    }
}

impl From<Terminal> for GrammarNode {
    fn from(terminal: Terminal) -> Self {
        Self::Terminal(terminal)
    }
}

impl From<&str> for GrammarNode {
    fn from(pattern: &str) -> Self {
        Self::Terminal(Terminal::new(pattern))
    }
}

impl From<String> for GrammarNode {
    fn from(pattern: String) -> Self {
        Self::Terminal(Terminal::new(pattern))
    }
}

impl From<TypeRef> for GrammarNode {
    fn from(type_ref: TypeRef) -> Self {
        Self::Nested(type_ref)
    }
}

impl fmt::Display for GrammarNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminal(terminal) => write!(f, "/{}/", terminal.pattern()),
            Self::Nested(type_ref) => f.write_str(type_ref.name()),
            Self::Rule(name) => f.write_str(name),
            Self::Sequence(parts) => write_parts(f, "(", parts, " ", ")"),
            Self::Collect(parts) => write_parts(f, "[", parts, " ", "]"),
            Self::Alternation(parts) => write_parts(f, "(", parts, " | ", ")"),
            Self::Attribute { name, part } => write!(f, "{name}={part}"),
            Self::Ignore(part) => write!(f, "~{part}"),
            Self::Optional(part) => write!(f, "{part}?"),
            Self::Repeat { part, allow_zero } => {
                write!(f, "{part}{}", if *allow_zero { '*' } else { '+' })
            },
        }
    }
}

fn write_parts(
    f: &mut fmt::Formatter<'_>,
    open: &str,
    parts: &[GrammarNode],
    separator: &str,
    close: &str,
) -> fmt::Result {
    f.write_str(open)?;
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{part}")?;
    }
    f.write_str(close)
}
