//! regram - declarative grammar combinators over regular-expression terminals
//!
//! Grammars are trees of small combinators (sequence, collect, alternation,
//! repetition, attribute binding, ignore, optional) whose leaves are anchored
//! regular expressions. The matcher walks a tree against the input from left
//! to right, backtracking on alternation, optional parts and repetition, and
//! builds a structured object as it goes.
//!
//! - [`grammar`] - grammar node algebra and construction functions
//! - [`matcher`] - the matching engine and the [`parse`] entry point
//! - [`value`] - produced values and target objects
//! - [`rules`] - named rule sets for grammars assembled at runtime
//! - [`config`] - grammar files (TOML or JSON)
//! - [`output`] - rendering of results for the CLI

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod cursor;
pub mod error;
pub mod grammar;
pub mod matcher;
pub mod output;
pub mod rules;
pub mod value;

pub use cursor::{Cursor, Location};
pub use error::MatchFailure;
pub use grammar::{
    Grammar, GrammarNode, Terminal, TypeRef, alternation, attribute, collect,
    comma_separated_list, ignore, nested, optional, repeat, repeat_any_number,
    repeat_at_least_once, rule, separated_list, sequence, terminal,
};
pub use matcher::{MatchOptions, Matcher, Parsed, Produced, parse, parse_complete};
pub use rules::RuleSet;
pub use value::{AsAny, AttributeError, Record, Target, Value};
