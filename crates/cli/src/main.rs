// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! walt - tail a write-ahead log as replication events

mod commands;
mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{append, latest, range, tail};
use std::path::{Path, PathBuf};

use crate::config::CliConfig;

#[derive(Parser)]
#[command(
    name = "walt",
    version,
    about = "walt - Tail a write-ahead log as replication events"
)]
struct Cli {
    /// Config file (default: <config dir>/walt/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// WAL file (overrides `wal` in the config)
    #[arg(long, global = true)]
    wal: Option<PathBuf>,

    /// Log filter directive, e.g. `debug` or `walt_engine=trace`
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Append write batches to the WAL
    Append(append::AppendArgs),
    /// Print replication events after a tick
    Tail(tail::TailArgs),
    /// Print the oldest and newest tick
    Range,
    /// Flush the WAL and print the newest tick
    Latest,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = setup_logging(cli.log_level.as_deref(), cli.log_file.as_deref())?;

    let config = CliConfig::load(cli.config.as_deref())?;
    let wal = cli
        .wal
        .clone()
        .or_else(|| config.wal.clone())
        .ok_or_else(|| anyhow::anyhow!("no WAL file: pass --wal or set `wal` in the config"))?;
    tracing::debug!(wal = %wal.display(), databases = config.databases.len(), "starting");

    match cli.command {
        Commands::Append(args) => append::handle(&wal, args),
        Commands::Tail(args) => tail::handle(&wal, &config, args),
        Commands::Range => range::handle(&wal),
        Commands::Latest => latest::handle(&wal),
    }
}

/// Logs go to stderr (or `log_file`) so stdout carries only command output
fn setup_logging(
    level: Option<&str>,
    log_file: Option<&Path>,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = match level {
        Some(level) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid log level '{}'", level))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    let Some(path) = log_file else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
        return Ok(None);
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("log file has no name: {}", path.display()))?;

    let (non_blocking, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(Some(guard))
}
