//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Runbook decision-tree diagnostics: concurrent truth-driven tree evaluation
#[derive(Parser, Debug)]
#[command(name = "rsdiag")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity (-d, -dd, -ddd)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Generate shell completions
    #[arg(long = "generate", value_enum)]
    pub generator: Option<clap_complete::Shell>,

    /// Print author and version information
    #[arg(long)]
    pub info: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the tree hierarchy of a source file
    Tree {
        /// Path to an indented-text tree source
        #[arg(value_hint = ValueHint::FilePath)]
        source_path: PathBuf,
    },

    /// List the leaf node names of a source file
    Leaves {
        /// Path to an indented-text tree source
        #[arg(value_hint = ValueHint::FilePath)]
        source_path: PathBuf,
    },

    /// Validate a tree source file
    Check {
        /// Path to an indented-text tree source
        #[arg(value_hint = ValueHint::FilePath)]
        source_path: PathBuf,
    },

    /// Write a placeholder check-registration module
    Scaffold {
        /// Path to an indented-text tree source
        #[arg(value_hint = ValueHint::FilePath)]
        source_path: PathBuf,

        /// Output file for the generated module
        #[arg(short, long, default_value = "checks.rs")]
        output: PathBuf,
    },
}
