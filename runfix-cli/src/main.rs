use anyhow::{Context, Result};
use clap::Parser;
use runfix_core::{Config, FixRequest, RestoreRequest};
use std::io::{self, IsTerminal};
use std::process;

mod cli;
mod fix;
mod logging;
mod restore;
mod rules;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let use_color = !cli.no_color && io::stdout().is_terminal();
    logging::init(!cli.no_color && io::stderr().is_terminal());

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(2);
        },
    };
    tracing::debug!(directory = %config.directory.display(), "config loaded");

    let result = match cli.command {
        Commands::Fix {
            directory,
            files,
            skip,
            scan,
            include,
            exclude,
            dry_run,
            diff,
            fail_fast,
            output,
        } => {
            let request = FixRequest {
                directory,
                files,
                skip,
                scan,
                include,
                exclude,
                dry_run,
                fail_fast,
                with_diff: diff,
            };
            fix::handle_fix(&config, &request, &output, use_color).map(|r| r.has_failures())
        },

        Commands::Restore {
            directory,
            files,
            dry_run,
            output,
        } => {
            let request = RestoreRequest {
                directory,
                files,
                dry_run,
            };
            restore::handle_restore(&config, &request, &output).map(|r| r.has_failures())
        },

        Commands::Rules { output } => rules::handle_rules(&output).map(|()| false),
    };

    match result {
        Ok(false) => process::exit(0),
        // Failed files and fail-fast aborts are in the report
        Ok(true) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(2);
        },
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load_from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Config::load(),
    }
}
