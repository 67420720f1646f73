// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Range command

use anyhow::Context;
use std::path::Path;
use walt_storage::{LogSource, TracedLogSource, WalFile};

pub fn handle(wal: &Path) -> anyhow::Result<()> {
    let file = WalFile::open(wal).with_context(|| format!("cannot open {}", wal.display()))?;
    let range = TracedLogSource::new(file).tick_range()?;
    println!("{} {}", range.oldest, range.newest);
    Ok(())
}
