// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory log source
//!
//! Holds write batches in sequence order with a retention horizon. Clones
//! share the same log, so writer threads can append while a tailer iterates.

use crate::error::SourceError;
use crate::source::{BatchIter, LogSource, TickRange};
use std::sync::{Arc, Mutex, MutexGuard};
use walt_core::{RawRecord, Tick, WriteBatch};

#[derive(Debug)]
struct MemoryLogState {
    batches: Vec<WriteBatch>,
    next_sequence: Tick,
    /// Every tick at or below this has been discarded
    purged_through: Tick,
    sync_count: u64,
    unavailable: Option<String>,
    fail_at: Option<Tick>,
}

impl Default for MemoryLogState {
    fn default() -> Self {
        Self {
            batches: Vec::new(),
            next_sequence: 1,
            purged_through: 0,
            sync_count: 0,
            unavailable: None,
            fail_at: None,
        }
    }
}

/// In-memory, concurrently appendable log
#[derive(Debug, Clone, Default)]
pub struct MemoryLog {
    state: Arc<Mutex<MemoryLogState>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryLogState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Append one atomic batch and return its sequence number
    pub fn append(&self, records: Vec<RawRecord>) -> Tick {
        let mut state = self.lock();
        let batch = WriteBatch::new(state.next_sequence, records);
        let sequence = batch.sequence;
        state.next_sequence += batch.tick_count();
        state.batches.push(batch);
        sequence
    }

    /// Discard every batch that ends at or before `tick`
    pub fn purge_through(&self, tick: Tick) {
        let mut state = self.lock();
        let keep_from = state.batches.partition_point(|b| b.last_tick() <= tick);
        if keep_from == 0 {
            return;
        }
        let last_purged = state.batches[keep_from - 1].last_tick();
        state.batches.drain(..keep_from);
        state.purged_through = state.purged_through.max(last_purged);
    }

    /// Make the log refuse to open iterators
    pub fn set_unavailable(&self, reason: impl Into<String>) {
        self.lock().unavailable = Some(reason.into());
    }

    /// Make iterators fail when they reach the batch starting at `sequence`
    pub fn fail_at(&self, sequence: Tick) {
        self.lock().fail_at = Some(sequence);
    }

    /// Number of times `sync` was called
    pub fn sync_count(&self) -> u64 {
        self.lock().sync_count
    }

    pub fn batches(&self) -> Vec<WriteBatch> {
        self.lock().batches.clone()
    }
}

impl LogSource for MemoryLog {
    fn updates_since(&self, tick: Tick) -> Result<BatchIter<'_>, SourceError> {
        let state = self.lock();
        if let Some(reason) = &state.unavailable {
            return Err(SourceError::Unavailable(reason.clone()));
        }
        if tick < state.purged_through {
            return Err(SourceError::RetentionGap {
                requested: tick,
                purged_through: state.purged_through,
            });
        }
        Ok(Box::new(MemoryLogIter {
            log: self.clone(),
            next_tick: tick.saturating_add(1),
            done: false,
        }))
    }

    fn tick_range(&self) -> Result<TickRange, SourceError> {
        let state = self.lock();
        Ok(TickRange {
            oldest: state.batches.first().map(|b| b.sequence).unwrap_or(0),
            newest: state.next_sequence - 1,
        })
    }

    fn latest_tick(&self) -> Result<Tick, SourceError> {
        Ok(self.lock().next_sequence - 1)
    }

    fn sync(&self) -> Result<(), SourceError> {
        self.lock().sync_count += 1;
        Ok(())
    }
}

/// Iterator that re-reads the shared log on every step
struct MemoryLogIter {
    log: MemoryLog,
    /// Smallest tick not yet returned
    next_tick: Tick,
    done: bool,
}

impl Iterator for MemoryLogIter {
    type Item = Result<WriteBatch, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let state = self.log.lock();

        // Batches were purged underneath us
        if state.purged_through >= self.next_tick {
            self.done = true;
            return Some(Err(SourceError::RetentionGap {
                requested: self.next_tick - 1,
                purged_through: state.purged_through,
            }));
        }

        let index = state
            .batches
            .partition_point(|b| b.last_tick() < self.next_tick);
        let batch = state.batches.get(index)?;

        if state.fail_at == Some(batch.sequence) {
            self.done = true;
            return Some(Err(SourceError::Unavailable(format!(
                "read failure at sequence {}",
                batch.sequence
            ))));
        }

        self.next_tick = batch.last_tick() + 1;
        Some(Ok(batch.clone()))
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
