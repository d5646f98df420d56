use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use super::types::OutputFormat;

/// Rewrite inline runScript blocks in test flows into helper script calls
#[derive(Parser, Debug)]
#[command(name = "runfix")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Config file (defaults to .runfix/config.toml when present)
    #[arg(short = 'c', long, global = true, value_name = "PATH", env = "RUNFIX_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Common output arguments
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output format for machine consumption
    #[arg(long, value_enum, default_value = "summary")]
    pub output: OutputFormat,

    /// Suppress summary output
    #[arg(long)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rewrite the candidate flow files in place, keeping .backup copies
    Fix {
        /// Directory holding the flow files (defaults from config)
        directory: Option<PathBuf>,

        /// Process only these files (repeatable, replaces the configured list)
        #[arg(short = 'f', long = "file", value_name = "FILE", conflicts_with = "scan")]
        files: Vec<String>,

        /// Never read or write these files (added to the configured exclusions)
        #[arg(long, value_name = "FILE", value_delimiter = ',')]
        skip: Vec<String>,

        /// Scan the directory for flow files instead of using a file list
        #[arg(long)]
        scan: bool,

        /// Include glob patterns for --scan
        #[arg(long, value_delimiter = ',', requires = "scan")]
        include: Vec<String>,

        /// Exclude glob patterns for --scan
        #[arg(long, value_delimiter = ',', requires = "scan")]
        exclude: Vec<String>,

        /// Show what would change without writing anything
        #[arg(long)]
        dry_run: bool,

        /// Print a unified diff for every changed file
        #[arg(long)]
        diff: bool,

        /// Stop at the first file that cannot be read or written
        #[arg(long)]
        fail_fast: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Put .backup content back over rewritten files
    Restore {
        /// Directory holding the flow files (defaults from config)
        directory: Option<PathBuf>,

        /// Restore only these files (repeatable)
        #[arg(short = 'f', long = "file", value_name = "FILE")]
        files: Vec<String>,

        /// Show what would be restored without writing anything
        #[arg(long)]
        dry_run: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List the rewrite rules in the order they run
    Rules {
        #[command(flatten)]
        output: OutputArgs,
    },
}
