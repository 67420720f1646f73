// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! walt-storage: ordered sources of write batches
//!
//! The tailer reads the log only through the `LogSource` trait. Two sources
//! are provided: an in-memory log with retention, and an append-only WAL
//! file with per-batch checksums.

mod error;
mod memory;
mod source;
mod traced;
pub mod wal;

pub use error::{SourceError, StorageError};
pub use memory::MemoryLog;
pub use source::{BatchIter, LogSource, TickRange};
pub use traced::TracedLogSource;
pub use wal::WalFile;
