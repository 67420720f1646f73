// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for tailing

use thiserror::Error;
use walt_core::Tick;
use walt_storage::SourceError;

/// Errors that abort a scan
#[derive(Debug, Error)]
pub enum TailError {
    #[error("log source unavailable: {0}")]
    SourceUnavailable(#[from] SourceError),
    /// A decoder invariant does not hold; the writer or the decoder is wrong
    #[error("internal inconsistency at tick {tick}: {message}")]
    InternalInconsistency { tick: Tick, message: String },
    #[error("malformed record at tick {tick}: {message}")]
    MalformedRecord { tick: Tick, message: String },
}

impl TailError {
    pub(crate) fn inconsistency(tick: Tick, message: impl Into<String>) -> Self {
        TailError::InternalInconsistency {
            tick,
            message: message.into(),
        }
    }

    /// Stable code reported to callers
    pub fn code(&self) -> &'static str {
        match self {
            TailError::SourceUnavailable(_) => "source_unavailable",
            TailError::InternalInconsistency { .. } => "internal_inconsistency",
            TailError::MalformedRecord { .. } => "malformed_record",
        }
    }
}

/// Outcome of one `tail` call
///
/// Progress is reported even when the scan failed: `last_tick` is the last
/// tick of the last batch whose events were all delivered, and is where the
/// next call should resume.
#[derive(Debug)]
pub struct TailingResult {
    pub error: Option<TailError>,
    /// Sequence of the first batch processed, or the start tick if none was
    pub first_tick: Tick,
    pub last_tick: Tick,
}

impl TailingResult {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn code(&self) -> &'static str {
        self.error.as_ref().map(TailError::code).unwrap_or("ok")
    }
}
