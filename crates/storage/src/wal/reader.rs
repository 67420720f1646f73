// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! WAL reader for iterating and validating entries
//!
//! A complete line that fails to parse or verify is corruption. A final line
//! without its newline is a write still in flight and ends the readable log.

use super::entry::WalEntry;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walt_core::Tick;

/// Errors that can occur when reading WAL entries
#[derive(Debug, Error)]
pub enum WalReadError {
    #[error("corrupted entry at line {line}: {reason}")]
    Corrupted { line: u64, reason: String },
    #[error("checksum mismatch at line {line}")]
    ChecksumMismatch { line: u64 },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// WAL reader for iterating over entries
#[derive(Debug, Clone)]
pub struct WalReader {
    path: PathBuf,
}

impl WalReader {
    /// Open a WAL file for reading
    pub fn open(path: &Path) -> Result<Self, WalReadError> {
        if !path.exists() {
            return Err(WalReadError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("WAL file not found: {}", path.display()),
            )));
        }
        Ok(Self::open_or_empty(path))
    }

    /// Create a reader that treats a missing file as an empty log
    pub fn open_or_empty(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Iterate over all valid entries
    pub fn entries(&self) -> Result<WalEntryIter, WalReadError> {
        WalEntryIter::new(&self.path, 0)
    }

    /// Iterate over entries holding at least one tick greater than `tick`
    pub fn entries_after(&self, tick: Tick) -> Result<WalEntryIter, WalReadError> {
        WalEntryIter::new(&self.path, tick)
    }

    /// Sequence number of the first entry, if any
    pub fn first_sequence(&self) -> Result<Option<Tick>, WalReadError> {
        match self.entries()?.next() {
            Some(entry) => Ok(Some(entry?.sequence)),
            None => Ok(None),
        }
    }

    /// Last tick of the last valid entry
    pub fn last_tick(&self) -> Result<Option<Tick>, WalReadError> {
        let mut last = None;
        for entry in self.entries()? {
            last = Some(entry?.last_tick());
        }
        Ok(last)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Iterator over WAL entries with position tracking
pub struct WalEntryIter {
    reader: Option<BufReader<File>>,
    line_number: u64,
    after_tick: Tick,
    /// Byte offset just past the last valid entry
    last_valid_position: u64,
    position: u64,
    failed: bool,
}

impl WalEntryIter {
    fn new(path: &Path, after_tick: Tick) -> Result<Self, WalReadError> {
        let reader = match File::open(path) {
            Ok(file) => Some(BufReader::new(file)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            reader,
            line_number: 0,
            after_tick,
            last_valid_position: 0,
            position: 0,
            failed: false,
        })
    }

    /// Byte offset just past the last successfully read entry
    pub fn last_valid_position(&self) -> u64 {
        self.last_valid_position
    }
}

impl Iterator for WalEntryIter {
    type Item = Result<WalEntry, WalReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let reader = self.reader.as_mut()?;

        loop {
            let mut line = String::new();
            let bytes_read = match reader.read_line(&mut line) {
                Ok(0) => return None,
                Ok(n) => n,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(WalReadError::Io(e)));
                }
            };

            // Partial write at the tail
            if !line.ends_with('\n') {
                return None;
            }

            self.line_number += 1;
            self.position += bytes_read as u64;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                self.last_valid_position = self.position;
                continue;
            }

            let entry = match WalEntry::from_line(trimmed) {
                Ok(entry) => entry,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(WalReadError::Corrupted {
                        line: self.line_number,
                        reason: e.to_string(),
                    }));
                }
            };

            if !entry.verify() {
                self.failed = true;
                return Some(Err(WalReadError::ChecksumMismatch {
                    line: self.line_number,
                }));
            }

            self.last_valid_position = self.position;

            if entry.last_tick() <= self.after_tick {
                continue;
            }
            return Some(Ok(entry));
        }
    }
}

#[cfg(test)]
#[path = "reader_tests.rs"]
mod tests;
