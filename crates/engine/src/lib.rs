// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! walt-engine: turns write batches into replication events
//!
//! `WalAccess::tail` pulls batches from a `LogSource`, decodes each record
//! against a threaded `ScanContext`, filters the results and hands complete
//! batches of serialized events to a callback.

mod cache;
pub mod config;
mod context;
mod decoder;
mod error;
mod filter;
mod sink;
mod tail;

pub use cache::ResolverCache;
pub use config::{ConfigError, FilterEntry, TailConfig};
pub use context::ScanContext;
pub use decoder::{Decoded, Decoder};
pub use error::{TailError, TailingResult};
pub use filter::{Filter, SystemCollections, WalFilter};
pub use sink::EventSink;
pub use tail::WalAccess;
