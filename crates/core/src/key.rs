// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Physical key encoding
//!
//! Definitions keys start with a one-byte entry type followed by big-endian
//! ids. Documents keys are the collection's object id followed by the
//! document revision, both big-endian `u64`.
//!
//! ```text
//! definitions:  'D' db                 database
//!               'C' db cid             collection
//!               'V' db view            view
//! documents:    object_id revision
//! ```

use crate::id::{CollectionId, DatabaseId, RevisionId, ViewId};
use thiserror::Error;

const DATABASE: u8 = b'D';
const COLLECTION: u8 = b'C';
const VIEW: u8 = b'V';

/// Errors from decoding a physical key
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("empty key")]
    Empty,
    #[error("key too short: expected {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },
}

/// A key in the definitions column family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionKey {
    Database(DatabaseId),
    Collection(DatabaseId, CollectionId),
    View(DatabaseId, ViewId),
    /// Entry types the tailer does not interpret (counters, settings, ...)
    Other(u8),
}

impl DefinitionKey {
    pub fn encode(&self) -> Vec<u8> {
        match *self {
            DefinitionKey::Database(db) => encode_ids(DATABASE, &[db]),
            DefinitionKey::Collection(db, cid) => encode_ids(COLLECTION, &[db, cid]),
            DefinitionKey::View(db, view) => encode_ids(VIEW, &[db, view]),
            DefinitionKey::Other(tag) => vec![tag],
        }
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, KeyError> {
        let (&tag, rest) = bytes.split_first().ok_or(KeyError::Empty)?;
        match tag {
            DATABASE => Ok(DefinitionKey::Database(read_u64(rest, 0)?)),
            COLLECTION => Ok(DefinitionKey::Collection(
                read_u64(rest, 0)?,
                read_u64(rest, 1)?,
            )),
            VIEW => Ok(DefinitionKey::View(read_u64(rest, 0)?, read_u64(rest, 1)?)),
            other => Ok(DefinitionKey::Other(other)),
        }
    }
}

/// A key in the documents column family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentKey {
    pub object_id: u64,
    pub revision: RevisionId,
}

impl DocumentKey {
    pub fn new(object_id: u64, revision: RevisionId) -> Self {
        Self {
            object_id,
            revision,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(16);
        bytes.extend_from_slice(&self.object_id.to_be_bytes());
        bytes.extend_from_slice(&self.revision.to_be_bytes());
        bytes
    }

    /// Read only the revision from the trailing 8 bytes of an encoded key
    pub fn revision_of(bytes: &[u8]) -> Result<RevisionId, KeyError> {
        let start = bytes.len().checked_sub(8).ok_or(KeyError::TooShort {
            expected: 8,
            actual: bytes.len(),
        })?;
        read_u64(&bytes[start..], 0)
    }
}

fn encode_ids(tag: u8, ids: &[u64]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(1 + ids.len() * 8);
    bytes.push(tag);
    for id in ids {
        bytes.extend_from_slice(&id.to_be_bytes());
    }
    bytes
}

/// Read the `index`-th big-endian u64 from `bytes`
fn read_u64(bytes: &[u8], index: usize) -> Result<u64, KeyError> {
    let start = index * 8;
    let end = start + 8;
    let chunk = bytes.get(start..end).ok_or(KeyError::TooShort {
        expected: end,
        actual: bytes.len(),
    })?;
    let mut buf = [0u8; 8];
    buf.copy_from_slice(chunk);
    Ok(u64::from_be_bytes(buf))
}

#[cfg(test)]
#[path = "key_tests.rs"]
mod tests;
