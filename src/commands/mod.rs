//! Command implementations

mod check;
mod parse;

use std::path::Path;

use anyhow::Context;
use regram::RuleSet;
use regram::config::GrammarFile;

pub use check::check;
pub use parse::{Source, parse};

/// Load and validate a grammar file
fn load_rules(path: &Path) -> anyhow::Result<RuleSet> {
    let file = GrammarFile::load(path)?;
    file.into_rule_set()
        .with_context(|| format!("grammar {} is not usable", path.display()))
}
