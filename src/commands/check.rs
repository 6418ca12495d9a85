//! Check command - validate a grammar file

use std::path::Path;

use regram::output::{CheckReport, OutputMode};

/// Validate a grammar file and list its rules
pub fn check(grammar: &Path, mode: OutputMode) -> anyhow::Result<()> {
    let rules = super::load_rules(grammar)?;
    log::debug!("grammar {} has {} rule(s)", grammar.display(), rules.len());

    CheckReport::new(&rules).render(mode);
    Ok(())
}
