// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event sink
//!
//! Serializes accepted events and holds them until their batch completes.
//! Only complete batches reach the callback, so an aborted batch delivers
//! nothing and the resume point never splits a transaction.

use crate::error::TailError;
use std::sync::Arc;
use walt_core::{DatabaseInfo, ReplicationEvent};

struct Staged {
    database: Option<Arc<DatabaseInfo>>,
    line: String,
}

#[derive(Default)]
pub struct EventSink {
    pending: Vec<Staged>,
    response_size: usize,
    delivered: u64,
}

impl EventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize an event into the current batch
    pub fn stage(
        &mut self,
        database: Option<Arc<DatabaseInfo>>,
        event: &ReplicationEvent,
    ) -> Result<(), TailError> {
        let line = serde_json::to_string(event).map_err(|e| TailError::MalformedRecord {
            tick: event.tick,
            message: format!("event does not serialize: {}", e),
        })?;
        self.pending.push(Staged { database, line });
        Ok(())
    }

    /// Deliver the current batch to the callback
    pub fn flush_batch<F>(&mut self, callback: &mut F)
    where
        F: FnMut(Option<&DatabaseInfo>, &str),
    {
        for staged in self.pending.drain(..) {
            self.response_size += staged.line.len();
            self.delivered += 1;
            callback(staged.database.as_deref(), &staged.line);
        }
    }

    /// Drop the current batch undelivered
    pub fn discard_batch(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    /// Bytes of serialized events delivered so far
    pub fn response_size(&self) -> usize {
        self.response_size
    }

    pub fn delivered(&self) -> u64 {
        self.delivered
    }
}

#[cfg(test)]
#[path = "sink_tests.rs"]
mod tests;
