// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tailing driver
//!
//! Pulls batches from the log source in tick order, decodes them into
//! events and stops at the requested tick or once enough output was
//! produced. Stop conditions are only checked between batches, so every
//! call ends on a batch boundary and `last_tick` is always a safe place to
//! resume from.

use crate::context::ScanContext;
use crate::decoder::Decoder;
use crate::error::{TailError, TailingResult};
use crate::filter::{Filter, SystemCollections, WalFilter};
use crate::sink::EventSink;
use walt_core::{Catalog, DatabaseInfo, Tick, WriteBatch};
use walt_storage::{LogSource, SourceError, TickRange};

/// Replication access to the write-ahead log
pub struct WalAccess<S, C> {
    source: S,
    catalog: C,
    system: SystemCollections,
}

impl<S: LogSource, C: Catalog> WalAccess<S, C> {
    pub fn new(source: S, catalog: C) -> Self {
        Self {
            source,
            catalog,
            system: SystemCollections::default(),
        }
    }

    pub fn with_system_collections(mut self, system: SystemCollections) -> Self {
        self.system = system;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Oldest retained and newest written tick
    pub fn tick_range(&self) -> Result<TickRange, SourceError> {
        self.source.tick_range()
    }

    /// Newest tick, after making everything written durable
    pub fn latest_tick(&self) -> Result<Tick, SourceError> {
        self.source.sync()?;
        self.source.latest_tick()
    }

    /// Deliver the events of batches after `tick_start` to `callback`
    ///
    /// Batches starting after `tick_end` are left for a later call, as is
    /// everything after the batch that brings the delivered output to
    /// `chunk_size` bytes. The callback receives the database the event
    /// belongs to (if it still exists) and the serialized event.
    pub fn tail<F>(
        &self,
        tick_start: Tick,
        tick_end: Tick,
        chunk_size: usize,
        include_system: bool,
        filter: &WalFilter,
        mut callback: F,
    ) -> TailingResult
    where
        F: FnMut(Option<&DatabaseInfo>, &str),
    {
        let span = tracing::debug_span!("tail", tick_start, tick_end, chunk_size);
        let _guard = span.enter();

        let mut result = TailingResult {
            error: None,
            first_tick: tick_start,
            last_tick: tick_start,
        };

        let batches = match self.source.updates_since(tick_start) {
            Ok(batches) => batches,
            Err(e) => {
                tracing::error!(error = %e, "cannot open log iterator");
                result.error = Some(e.into());
                return result;
            }
        };

        let mut decoder = Decoder::new(
            Filter::new(filter, &self.system, include_system),
            &self.catalog,
        );
        let mut sink = EventSink::new();
        let mut context = ScanContext::default();
        let mut previous: Option<Tick> = None;
        let mut processed = 0u64;

        for next in batches {
            let batch = match next {
                Ok(batch) => batch,
                Err(e) => {
                    tracing::error!(error = %e, last_tick = result.last_tick, "log read failed");
                    result.error = Some(e.into());
                    break;
                }
            };

            if let Some(previous) = previous {
                if batch.sequence < previous {
                    result.error = Some(TailError::inconsistency(
                        batch.sequence,
                        format!("batch {} follows batch {}", batch.sequence, previous),
                    ));
                    tracing::error!(batch = batch.sequence, previous, "batches out of order");
                    break;
                }
            }
            previous = Some(batch.sequence);

            if batch.sequence <= tick_start {
                continue;
            }
            if batch.sequence > tick_end {
                break;
            }

            if processed == 0 {
                result.first_tick = batch.sequence;
            }
            match scan_batch(&mut decoder, &mut sink, context, &batch) {
                Ok(next_context) => {
                    context = next_context;
                    sink.flush_batch(&mut callback);
                    result.last_tick = batch.last_tick();
                    processed += 1;
                    tracing::trace!(
                        batch = batch.sequence,
                        last_tick = result.last_tick,
                        response_size = sink.response_size(),
                        "batch delivered"
                    );
                }
                Err(e) => {
                    let dropped = sink.discard_batch();
                    tracing::error!(
                        batch = batch.sequence,
                        code = e.code(),
                        error = %e,
                        dropped,
                        "scan aborted"
                    );
                    result.error = Some(e);
                    break;
                }
            }

            if sink.response_size() >= chunk_size {
                break;
            }
        }

        tracing::debug!(
            first_tick = result.first_tick,
            last_tick = result.last_tick,
            batches = processed,
            events = sink.delivered(),
            code = result.code(),
            "tail finished"
        );
        result
    }
}

/// Decode one batch into the sink, closing any transaction left open
fn scan_batch<C: Catalog + ?Sized>(
    decoder: &mut Decoder<'_, C>,
    sink: &mut EventSink,
    context: ScanContext,
    batch: &WriteBatch,
) -> Result<ScanContext, TailError> {
    let mut context = context.start_batch(batch.sequence);
    for record in &batch.records {
        let decoded = decoder.decode(context, record)?;
        context = decoded.context;
        for event in &decoded.events {
            let database = decoder.database(event.database_id);
            sink.stage(database, event)?;
        }
    }

    let (context, commit) = context.flush_transaction();
    if let Some(commit) = commit {
        let database = decoder.database(commit.database_id);
        sink.stage(database, &commit)?;
    }
    Ok(context)
}

#[cfg(test)]
#[path = "tail_tests.rs"]
mod tests;
