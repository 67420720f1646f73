// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tail command

use crate::config::CliConfig;
use anyhow::Context;
use clap::Args;
use std::io::Write;
use std::path::Path;
use walt_core::{Catalog, Tick};
use walt_engine::WalAccess;
use walt_storage::{LogSource, TracedLogSource, WalFile};

#[derive(Args)]
pub struct TailArgs {
    /// Report events after this tick
    #[arg(long, default_value_t = 0)]
    pub from: Tick,
    /// Leave batches starting after this tick for a later call
    #[arg(long)]
    pub to: Option<Tick>,
    /// Stop after the batch that brings the output to this many bytes
    #[arg(long)]
    pub chunk_size: Option<usize>,
    /// Include system collections
    #[arg(long)]
    pub include_system: bool,
    /// Keep tailing from the returned tick until no progress is made
    #[arg(long)]
    pub follow: bool,
}

/// Resolved options for a run of `tail` calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Options {
    from: Tick,
    to: Tick,
    chunk_size: usize,
    include_system: bool,
    follow: bool,
}

impl Options {
    fn resolve(args: &TailArgs, config: &CliConfig) -> Self {
        Self {
            from: args.from,
            to: args.to.unwrap_or(Tick::MAX),
            chunk_size: args.chunk_size.unwrap_or(config.tail.chunk_size),
            include_system: args.include_system || config.tail.include_system,
            follow: args.follow,
        }
    }
}

pub fn handle(wal: &Path, config: &CliConfig, args: TailArgs) -> anyhow::Result<()> {
    let options = Options::resolve(&args, config);
    let file = WalFile::open(wal).with_context(|| format!("cannot open {}", wal.display()))?;
    let access = WalAccess::new(TracedLogSource::new(file), config.catalog())
        .with_system_collections(config.tail.system_collections());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let last_tick = run(&access, config, options, &mut out)?;
    out.flush()?;
    eprintln!("lastTick {}", last_tick);
    Ok(())
}

/// Run `tail` once, or repeatedly with `--follow`, writing events to `out`
fn run<S, C, W>(
    access: &WalAccess<S, C>,
    config: &CliConfig,
    options: Options,
    out: &mut W,
) -> anyhow::Result<Tick>
where
    S: LogSource,
    C: Catalog,
    W: Write,
{
    let filter = config.tail.wal_filter();
    let mut tick = options.from;
    loop {
        let mut write_error = None;
        let result = access.tail(
            tick,
            options.to,
            options.chunk_size,
            options.include_system,
            &filter,
            |_, line| {
                if write_error.is_none() {
                    write_error = writeln!(out, "{}", line).err();
                }
            },
        );
        if let Some(e) = write_error {
            return Err(e).context("cannot write events");
        }
        if let Some(e) = result.error {
            eprintln!("lastTick {}", result.last_tick);
            return Err(anyhow::Error::new(e).context(format!("tail failed after tick {}", tick)));
        }

        let progressed = result.last_tick > tick;
        tick = result.last_tick;
        if !options.follow || !progressed {
            return Ok(tick);
        }
    }
}

#[cfg(test)]
#[path = "tail_tests.rs"]
mod tests;
