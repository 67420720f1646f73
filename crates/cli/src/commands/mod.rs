// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod append;
pub mod latest;
pub mod range;
pub mod tail;
