// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The log source seam

use crate::error::SourceError;
use std::sync::Arc;
use walt_core::{Tick, WriteBatch};

/// Iterator over write batches in tick order
pub type BatchIter<'a> = Box<dyn Iterator<Item = Result<WriteBatch, SourceError>> + 'a>;

/// Oldest retained and newest written tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickRange {
    pub oldest: Tick,
    pub newest: Tick,
}

/// An ordered, append-only source of write batches
///
/// Writers may append while an iterator is open. Iterators observe batches
/// in non-decreasing sequence order and may or may not observe batches
/// appended after they were opened.
pub trait LogSource {
    /// Open an iterator over batches holding ticks greater than `tick`
    ///
    /// The first batch returned may start at or before `tick`.
    fn updates_since(&self, tick: Tick) -> Result<BatchIter<'_>, SourceError>;

    fn tick_range(&self) -> Result<TickRange, SourceError>;

    /// Newest tick written, whether or not it is durable yet
    fn latest_tick(&self) -> Result<Tick, SourceError>;

    /// Make every written batch durable and visible to readers
    fn sync(&self) -> Result<(), SourceError>;
}

impl<S: LogSource + ?Sized> LogSource for &S {
    fn updates_since(&self, tick: Tick) -> Result<BatchIter<'_>, SourceError> {
        (**self).updates_since(tick)
    }

    fn tick_range(&self) -> Result<TickRange, SourceError> {
        (**self).tick_range()
    }

    fn latest_tick(&self) -> Result<Tick, SourceError> {
        (**self).latest_tick()
    }

    fn sync(&self) -> Result<(), SourceError> {
        (**self).sync()
    }
}

impl<S: LogSource + ?Sized> LogSource for Arc<S> {
    fn updates_since(&self, tick: Tick) -> Result<BatchIter<'_>, SourceError> {
        (**self).updates_since(tick)
    }

    fn tick_range(&self) -> Result<TickRange, SourceError> {
        (**self).tick_range()
    }

    fn latest_tick(&self) -> Result<Tick, SourceError> {
        (**self).latest_tick()
    }

    fn sync(&self) -> Result<(), SourceError> {
        (**self).sync()
    }
}
