//! Command-line front-end for yaml-contents.
//!
//! Each invocation reads one file, applies one edit and writes the file back
//! only if the edit succeeded.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use yaml_contents::{EditError, Indentation, KeyPath, ScalarValue, YamlContents};

/// Edit YAML files without disturbing comments or formatting
#[derive(Parser, Debug)]
#[command(name = "yaml-contents")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Print the edited document instead of writing the file
    #[arg(long, global = true)]
    dry_run: bool,

    /// Spaces per nesting level when the file gives no hint
    #[arg(long, global = true, value_name = "N")]
    indent: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Add a key, creating missing parent keys
    Add {
        /// The YAML file to edit
        file: PathBuf,
        /// Dotted key path, e.g. `default.one.alpha`
        key: String,
        /// The value; `true`, `false`, `null` and numbers are typed
        value: String,
        /// Always treat the value as a string
        #[arg(long)]
        string: bool,
        /// Realign trailing comments afterwards
        #[arg(long)]
        realign: bool,
    },

    /// Replace the value of an existing key
    Set {
        /// The YAML file to edit
        file: PathBuf,
        /// Dotted key path, e.g. `default.one.alpha`
        key: String,
        /// The value; `true`, `false`, `null` and numbers are typed
        value: String,
        /// Always treat the value as a string
        #[arg(long)]
        string: bool,
        /// Realign trailing comments afterwards
        #[arg(long)]
        realign: bool,
    },

    /// Remove a key and everything nested under it
    Remove {
        /// The YAML file to edit
        file: PathBuf,
        /// Dotted key path
        key: String,
    },

    /// Align trailing comments
    Realign {
        /// The YAML file to edit
        file: PathBuf,
    },

    /// Print the value of a key as written in the file
    Get {
        /// The YAML file to read
        file: PathBuf,
        /// Dotted key path
        key: String,
    },
}

impl Command {
    fn file(&self) -> &Path {
        match self {
            Command::Add { file, .. }
            | Command::Set { file, .. }
            | Command::Remove { file, .. }
            | Command::Realign { file }
            | Command::Get { file, .. } => file,
        }
    }
}

fn scalar(value: &str, string: bool) -> ScalarValue {
    if string {
        ScalarValue::new(value)
    } else {
        ScalarValue::parse_plain(value)
    }
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let file = cli.command.file();
    let mut doc = YamlContents::from_path(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    if let Some(width) = cli.indent {
        doc.set_indentation(Indentation::Spaces(width));
    }

    match &cli.command {
        Command::Add {
            key,
            value,
            string,
            realign,
            ..
        } => {
            doc.add_key(KeyPath::from_dotted(key), scalar(value, *string))
                .with_context(|| format!("failed to add {}", key))?;
            if *realign {
                doc.realign();
            }
        }
        Command::Set {
            key,
            value,
            string,
            realign,
            ..
        } => {
            doc.set_key(KeyPath::from_dotted(key), scalar(value, *string))
                .with_context(|| format!("failed to set {}", key))?;
            if *realign {
                doc.realign();
            }
        }
        Command::Remove { key, .. } => {
            doc.remove_key(KeyPath::from_dotted(key))
                .with_context(|| format!("failed to remove {}", key))?;
        }
        Command::Realign { .. } => {
            doc.realign();
        }
        Command::Get { key, .. } => {
            let value = doc
                .get(KeyPath::from_dotted(key))
                .and_then(|line| line.value())
                .ok_or_else(|| EditError::KeyNotFound(key.clone()))?;
            println!("{}", value);
            return Ok(());
        }
    }

    if cli.dry_run {
        print!("{}", doc);
    } else {
        doc.write_to_path(file)
            .with_context(|| format!("failed to write {}", file.display()))?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.debug);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
