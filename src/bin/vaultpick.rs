//! Vaultpick CLI Binary
//!
//! Command-line interface for picking and opening notes in a vault.

use anyhow::Context;
use clap::Parser;
use std::process;
use vaultpick::config::ConfigLoader;
use vaultpick::logging::init_logging_or_warn;
use vaultpick::tooling::cli::{Cli, CliContext};

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
    .context("failed to load configuration")?;

    let logging = if cli.debug {
        config.logging.clone().with_debug()
    } else {
        config.logging.clone()
    };
    init_logging_or_warn(Some(&logging));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let program = std::env::args().next().unwrap_or_default();
    let kind = cli.mode.resolve(&program);

    let result = CliContext::new(kind, &config, runtime.handle().clone())
        .and_then(|context| context.execute(&cli.action()));

    // A fetch still in flight keeps running after exit.
    runtime.shutdown_background();
    Ok(result?)
}
