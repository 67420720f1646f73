// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for log sources

use crate::wal::WalReadError;
use thiserror::Error;
use walt_core::Tick;

/// Errors from writing to durable storage
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from opening or advancing a log source
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("ticks after {requested} are no longer retained (purged through {purged_through})")]
    RetentionGap { requested: Tick, purged_through: Tick },
    #[error("corrupted log entry at line {line}: {reason}")]
    Corrupted { line: u64, reason: String },
    #[error("log source unavailable: {0}")]
    Unavailable(String),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<std::io::Error> for SourceError {
    fn from(e: std::io::Error) -> Self {
        SourceError::Storage(StorageError::Io(e))
    }
}

impl From<WalReadError> for SourceError {
    fn from(e: WalReadError) -> Self {
        match e {
            WalReadError::Corrupted { line, reason } => SourceError::Corrupted { line, reason },
            WalReadError::ChecksumMismatch { line } => SourceError::Corrupted {
                line,
                reason: "checksum mismatch".to_string(),
            },
            WalReadError::Io(e) => e.into(),
        }
    }
}
