//! Grammar node algebra
//!
//! Grammars are trees of combinators over regular-expression terminals.
//! This module only represents structure; [`crate::matcher`] interprets it.
//!
//! - [`GrammarNode`] - the combinator variants
//! - [`Terminal`] - anchored regular expressions
//! - [`Grammar`] / [`TypeRef`] - grammar-bearing types
//! - construction functions such as [`sequence`] and [`attribute`]

mod build;
mod node;
mod terminal;

pub use build::{
    COMMA_SEPARATOR, alternation, attribute, collect, comma_separated_list, ignore, nested,
    optional, repeat, repeat_any_number, repeat_at_least_once, rule, separated_list, sequence,
    terminal,
};
pub use node::{Grammar, GrammarNode, TypeRef};
pub use terminal::Terminal;
