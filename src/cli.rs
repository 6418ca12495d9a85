//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands;
use regram::output::OutputMode;

/// regram - parse text with declarative grammar files
#[derive(Parser, Debug)]
#[command(
    name = "regram",
    version,
    about = "Parse text with declarative grammar files",
    long_about = "Parse text with grammars built from regular-expression terminals.\n\n\
                  Grammar files declare named rules in TOML or JSON.\n\
                  Parsing prints the object built from the input, or the\n\
                  location where matching failed."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse input with a grammar file
    Parse {
        /// Grammar file (TOML, or JSON with a .json extension)
        #[arg(short, long)]
        grammar: PathBuf,

        /// Rule to parse with (defaults to the grammar's start rule)
        #[arg(short, long)]
        rule: Option<String>,

        /// Fail if any input is left over
        #[arg(long)]
        strict: bool,

        /// Parse this text instead of reading a file
        #[arg(short, long, conflicts_with = "input")]
        text: Option<String>,

        /// Input file ("-" or omitted reads stdin)
        input: Option<PathBuf>,
    },

    /// Validate a grammar file and list its rules
    Check {
        /// Grammar file (TOML, or JSON with a .json extension)
        #[arg(short, long)]
        grammar: PathBuf,
    },

    /// Show version
    Version,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    match cli.command {
        Some(Command::Parse {
            grammar,
            rule,
            strict,
            text,
            input,
        }) => {
            let source = match (text, input) {
                (Some(text), _) => commands::Source::Text(text),
                (None, Some(path)) if path.as_os_str() != "-" => commands::Source::File(path),
                (None, _) => commands::Source::Stdin,
            };
            commands::parse(&grammar, rule.as_deref(), strict, source, output_mode)
        },
        Some(Command::Check { grammar }) => commands::check(&grammar, output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION")
                    })
                );
            } else {
                println!("regram v{}", env!("CARGO_PKG_VERSION"));
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("regram v{}", env!("CARGO_PKG_VERSION"));
                println!("\nRun 'regram --help' for usage");
                println!("Run 'regram check --grammar <file>' to validate a grammar");
            }
            Ok(())
        },
    }
}
