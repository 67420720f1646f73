// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append command

use anyhow::Context;
use clap::Args;
use std::io::Read;
use std::path::{Path, PathBuf};
use walt_core::RawRecord;
use walt_storage::{LogSource, WalFile};

#[derive(Args)]
pub struct AppendArgs {
    /// JSON array of batches, each an array of records (`-` reads stdin)
    pub input: PathBuf,
}

pub fn handle(wal: &Path, args: AppendArgs) -> anyhow::Result<()> {
    let content = if args.input.as_os_str() == "-" {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        content
    } else {
        std::fs::read_to_string(&args.input)
            .with_context(|| format!("cannot read {}", args.input.display()))?
    };
    let batches = parse_batches(&content)?;

    let file = WalFile::open(wal).with_context(|| format!("cannot open {}", wal.display()))?;
    for records in batches {
        let sequence = file.append(records)?;
        println!("{}", sequence);
    }
    file.sync()?;
    Ok(())
}

fn parse_batches(content: &str) -> anyhow::Result<Vec<Vec<RawRecord>>> {
    serde_json::from_str(content).context("input is not a JSON array of record batches")
}

#[cfg(test)]
#[path = "append_tests.rs"]
mod tests;
