// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Latest command

use anyhow::Context;
use std::path::Path;
use walt_core::MemoryCatalog;
use walt_engine::WalAccess;
use walt_storage::{TracedLogSource, WalFile};

pub fn handle(wal: &Path) -> anyhow::Result<()> {
    let file = WalFile::open(wal).with_context(|| format!("cannot open {}", wal.display()))?;
    let access = WalAccess::new(TracedLogSource::new(file), MemoryCatalog::new());
    println!("{}", access.latest_tick()?);
    Ok(())
}
