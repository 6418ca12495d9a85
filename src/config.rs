//! Grammar files
//!
//! Rule sets can be declared in TOML or JSON and loaded at runtime:
//!
//! ```toml
//! start = "sentence"
//!
//! [options]
//! max_depth = 64
//!
//! [rules.word]
//! attribute = { name = "content", part = { terminal = '\w+' } }
//!
//! [rules.sentence.attribute]
//! name = "content"
//! part = { some = { alternation = [{ ignore = { terminal = ' +' } }, { rule = "word" }] } }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::MatchFailure;
use crate::grammar::{self, GrammarNode};
use crate::matcher::MatchOptions;
use crate::rules::RuleSet;

/// Errors that can occur when loading a grammar file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        /// Path of the grammar file
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// TOML syntax or shape error
    #[error("invalid TOML grammar: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON syntax or shape error
    #[error("invalid JSON grammar: {0}")]
    Json(#[from] serde_json::Error),

    /// The file declares no rules
    #[error("grammar defines no rules")]
    NoRules,

    /// The grammar is well-formed but refers to things that do not exist
    #[error("invalid grammar: {0}")]
    Invalid(#[from] MatchFailure),
}

/// Declarative form of a grammar node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeSpec {
    /// Regular-expression terminal
    Terminal(String),
    /// Reference to another rule
    Rule(String),
    /// Parts applied in order, values discarded
    Sequence(Vec<NodeSpec>),
    /// Parts applied in order, values aggregated
    Collect(Vec<NodeSpec>),
    /// First matching part
    Alternation(Vec<NodeSpec>),
    /// Named attribute binding
    Attribute {
        /// Attribute name
        name: String,
        /// Bound part
        part: Box<NodeSpec>,
    },
    /// Matched but contributes nothing
    Ignore(Box<NodeSpec>),
    /// Matched if possible
    Optional(Box<NodeSpec>),
    /// Repetition with an explicit minimum
    Repeat {
        /// Repeated part
        part: Box<NodeSpec>,
        /// Whether zero repetitions are a success
        #[serde(default)]
        allow_zero: bool,
    },
    /// One or more repetitions
    #[serde(rename = "some")]
    AtLeastOnce(Box<NodeSpec>),
    /// Any number of repetitions
    #[serde(rename = "many")]
    AnyNumber(Box<NodeSpec>),
    /// Items separated by a pattern, separators ignored
    List {
        /// List item
        item: Box<NodeSpec>,
        /// Separator (defaults to a comma with optional whitespace)
        #[serde(default)]
        separator: Option<Box<NodeSpec>>,
    },
}

impl NodeSpec {
    /// Build the grammar node described by this entry
    #[must_use]
    pub fn to_node(&self) -> GrammarNode {
        match self {
            Self::Terminal(pattern) => grammar::terminal(pattern.as_str()),
            Self::Rule(name) => grammar::rule(name.as_str()),
            Self::Sequence(parts) => grammar::sequence(parts.iter().map(Self::to_node)),
            Self::Collect(parts) => grammar::collect(parts.iter().map(Self::to_node)),
            Self::Alternation(parts) => grammar::alternation(parts.iter().map(Self::to_node)),
            Self::Attribute { name, part } => grammar::attribute(name.as_str(), part.to_node()),
            Self::Ignore(part) => grammar::ignore(part.to_node()),
            Self::Optional(part) => grammar::optional(part.to_node()),
            Self::Repeat { part, allow_zero } => grammar::repeat(part.to_node(), *allow_zero),
            Self::AtLeastOnce(part) => grammar::repeat_at_least_once(part.to_node()),
            Self::AnyNumber(part) => grammar::repeat_any_number(part.to_node()),
            Self::List { item, separator } => match separator {
                Some(separator) => grammar::separated_list(item.to_node(), separator.to_node()),
                None => grammar::comma_separated_list(item.to_node()),
            },
        }
    }
}

/// A grammar file: rules, start rule and matcher options
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GrammarFile {
    /// Rule used when none is named explicitly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,

    /// Matcher options
    #[serde(default)]
    pub options: MatchOptions,

    /// Rules by name
    #[serde(default)]
    pub rules: BTreeMap<String, NodeSpec>,
}

impl GrammarFile {
    /// Load a grammar file, choosing the format by extension
    ///
    /// `.json` files are read as JSON, everything else as TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded grammar file {}", path.display());

        let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Parse a TOML grammar
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Parse a JSON grammar
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Build and validate the rule set
    pub fn into_rule_set(self) -> Result<RuleSet, ConfigError> {
        if self.rules.is_empty() {
            return Err(ConfigError::NoRules);
        }

        let mut rules = RuleSet::new().with_options(self.options);
        for (name, spec) in &self.rules {
            rules.define(name.as_str(), spec.to_node());
        }
        if let Some(start) = self.start {
            rules = rules.with_start(start);
        }

        rules.validate()?;
        Ok(rules)
    }
}
