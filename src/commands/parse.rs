//! Parse command - build a record from input with a grammar file

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use regram::MatchFailure;
use regram::output::{FailureReport, OutputMode, ParseReport};

/// Where the input text comes from
#[derive(Debug)]
pub enum Source {
    /// Text given on the command line
    Text(String),
    /// A file
    File(PathBuf),
    /// Standard input
    Stdin,
}

impl Source {
    fn read(self) -> anyhow::Result<String> {
        match self {
            Self::Text(text) => Ok(text),
            Self::File(path) => fs::read_to_string(&path)
                .with_context(|| format!("cannot read {}", path.display())),
            Self::Stdin => io::read_to_string(io::stdin()).context("cannot read stdin"),
        }
    }
}

/// Parse input with a rule from a grammar file
pub fn parse(
    grammar: &Path,
    rule: Option<&str>,
    strict: bool,
    source: Source,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let rules = super::load_rules(grammar)?;
    let Some(rule) = rule.or_else(|| rules.start()) else {
        bail!("no rule given and {} declares no start rule", grammar.display());
    };
    let text = source.read()?;
    log::debug!("parsing {} bytes with rule `{rule}`", text.len());

    let failure = match rules.parse(rule, &text) {
        Ok(parsed) if strict && !parsed.is_complete() => MatchFailure::TrailingInput {
            position: parsed.rest.offset(),
        },
        Ok(parsed) => {
            ParseReport::new(&parsed).render(mode);
            return Ok(());
        },
        Err(failure) => failure,
    };

    FailureReport::new(&failure, &text).render(mode);
    bail!("input does not match rule `{rule}`")
}
