// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced log source wrapper for consistent observability

use crate::error::SourceError;
use crate::source::{BatchIter, LogSource, TickRange};
use walt_core::Tick;

/// Wrapper that adds tracing to any LogSource
#[derive(Debug, Clone)]
pub struct TracedLogSource<S> {
    inner: S,
}

impl<S> TracedLogSource<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: LogSource> LogSource for TracedLogSource<S> {
    fn updates_since(&self, tick: Tick) -> Result<BatchIter<'_>, SourceError> {
        let span = tracing::info_span!("log.updates_since", tick);
        let _guard = span.enter();

        let start = std::time::Instant::now();
        let result = self.inner.updates_since(tick);
        let elapsed = start.elapsed();

        match &result {
            Ok(_) => tracing::debug!(elapsed_ms = elapsed.as_millis() as u64, "iterator opened"),
            Err(SourceError::RetentionGap { purged_through, .. }) => tracing::warn!(
                purged_through,
                "requested ticks are no longer retained"
            ),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "open failed"
            ),
        }

        result
    }

    fn tick_range(&self) -> Result<TickRange, SourceError> {
        let result = self.inner.tick_range();
        match &result {
            Ok(range) => tracing::trace!(oldest = range.oldest, newest = range.newest, "range"),
            Err(e) => tracing::error!(error = %e, "tick range failed"),
        }
        result
    }

    fn latest_tick(&self) -> Result<Tick, SourceError> {
        let result = self.inner.latest_tick();
        tracing::trace!(latest = ?result.as_ref().ok(), "checked");
        result
    }

    fn sync(&self) -> Result<(), SourceError> {
        let span = tracing::info_span!("log.sync");
        let _guard = span.enter();

        let start = std::time::Instant::now();
        let result = self.inner.sync();
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(()) => tracing::debug!(elapsed_ms, "synced"),
            Err(e) => tracing::error!(elapsed_ms, error = %e, "sync failed"),
        }

        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
