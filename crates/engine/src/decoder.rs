// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Record decoder
//!
//! `Decoder::decode` takes the scan context and one physical record and
//! returns the updated context together with the events the record
//! completes. Metadata records only prime the context, except for index,
//! transaction-begin and single-operation records. Puts and deletes pick up
//! what the preceding metadata announced.
//!
//! ```text
//! metadata(kind) ──▶ context.last_kind = kind
//!                        │
//! put/delete(cf, key) ───┴──▶ event(kind, ids from context, payload)
//! ```

use crate::cache::ResolverCache;
use crate::context::ScanContext;
use crate::error::TailError;
use crate::filter::Filter;
use serde_json::json;
use std::sync::Arc;
use walt_core::{
    Catalog, CollectionId, CollectionRef, ColumnFamily, DatabaseId, DatabaseInfo, DefinitionKey,
    DocumentKey, EventType, LogKind, LogValue, RawRecord, ReplicationEvent, TransactionId,
};

/// The context after a record, plus the events it completed
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub context: ScanContext,
    pub events: Vec<ReplicationEvent>,
}

impl Decoded {
    fn none(context: ScanContext) -> Self {
        Self {
            context,
            events: Vec::new(),
        }
    }

    fn one(context: ScanContext, event: ReplicationEvent) -> Self {
        Self {
            context,
            events: vec![event],
        }
    }
}

/// Decodes records for one scan
pub struct Decoder<'a, C: ?Sized> {
    filter: Filter<'a>,
    cache: ResolverCache<'a, C>,
}

impl<'a, C: Catalog + ?Sized> Decoder<'a, C> {
    pub fn new(filter: Filter<'a>, catalog: &'a C) -> Self {
        Self {
            filter,
            cache: ResolverCache::new(catalog),
        }
    }

    /// Database handle passed to the callback along with an event
    pub fn database(&mut self, id: DatabaseId) -> Option<Arc<DatabaseInfo>> {
        self.cache.database(id)
    }

    /// Decode the next record of the current batch
    pub fn decode(
        &mut self,
        context: ScanContext,
        record: &RawRecord,
    ) -> Result<Decoded, TailError> {
        let context = context.advance();
        match record {
            RawRecord::LogMetadata { value } => self.metadata(context, value),
            RawRecord::Put { cf, key, value } => self.put(context, *cf, key, value),
            RawRecord::Delete { cf, key } | RawRecord::SingleDelete { cf, key } => {
                self.delete(context, *cf, key)
            }
        }
    }

    fn metadata(&mut self, context: ScanContext, value: &LogValue) -> Result<Decoded, TailError> {
        let kind = value.kind();
        let mut decoded = self.apply_metadata(context, value)?;
        decoded.context.last_kind = Some(kind);
        Ok(decoded)
    }

    fn apply_metadata(
        &mut self,
        mut context: ScanContext,
        value: &LogValue,
    ) -> Result<Decoded, TailError> {
        match value {
            LogValue::DatabaseCreate { database_id } | LogValue::DatabaseDrop { database_id } => {
                context.database_id = *database_id;
                Ok(Decoded::none(context))
            }

            LogValue::CollectionCreate {
                database_id,
                collection_id,
            }
            | LogValue::CollectionChange {
                database_id,
                collection_id,
            }
            | LogValue::CollectionRename {
                database_id,
                collection_id,
            }
            | LogValue::CollectionDrop {
                database_id,
                collection_id,
                ..
            } => {
                // An index build rewrites its collection's definition
                if context.last_kind == Some(LogKind::IndexCreate)
                    && (context.database_id != *database_id
                        || context.collection_id != *collection_id)
                {
                    return Err(self.inconsistent(
                        &context,
                        format!(
                            "{} for {}/{} follows index_create for {}/{}",
                            value.kind().name(),
                            database_id,
                            collection_id,
                            context.database_id,
                            context.collection_id
                        ),
                    ));
                }
                context.database_id = *database_id;
                context.collection_id = *collection_id;
                if let LogValue::CollectionDrop { uuid, .. } = value {
                    context.dropped_uuid = Some(uuid.clone());
                }
                Ok(Decoded::none(context))
            }

            LogValue::IndexCreate {
                database_id,
                collection_id,
                index,
            } => {
                context.database_id = *database_id;
                context.collection_id = *collection_id;
                if !self.collection_visible(*database_id, *collection_id) {
                    return Ok(Decoded::none(context));
                }
                let Some(uuid) = self.cache.collection_uuid(*database_id, *collection_id) else {
                    return Ok(Decoded::none(context));
                };
                let event =
                    ReplicationEvent::new(context.tick, EventType::IndexCreate, *database_id)
                        .with_collection(CollectionRef::Uuid(uuid))
                        .with_data(index.clone());
                Ok(Decoded::one(context, event))
            }

            LogValue::IndexDrop {
                database_id,
                collection_id,
                index_id,
            } => {
                context.database_id = *database_id;
                context.collection_id = *collection_id;
                if !self.collection_visible(*database_id, *collection_id) {
                    return Ok(Decoded::none(context));
                }
                let event = ReplicationEvent::new(context.tick, EventType::IndexDrop, *database_id)
                    .with_collection(CollectionRef::Cid(*collection_id))
                    .with_data(json!({ "id": index_id.to_string() }));
                Ok(Decoded::one(context, event))
            }

            LogValue::ViewCreate { view_id, .. }
            | LogValue::ViewChange { view_id, .. }
            | LogValue::ViewDrop { view_id, .. } => {
                tracing::debug!(
                    tick = context.tick,
                    view = view_id,
                    "view records are not replicated"
                );
                Ok(Decoded::none(context))
            }

            LogValue::BeginTransaction {
                database_id,
                transaction_id,
            } => {
                if context.single_op {
                    return Err(self.inconsistent(
                        &context,
                        "begin_transaction inside a single operation",
                    ));
                }
                context.seen_begin = true;
                context.database_id = *database_id;
                context.transaction_id = *transaction_id;
                let event =
                    ReplicationEvent::new(context.tick, EventType::TransactionBegin, *database_id)
                        .with_transaction(*transaction_id);
                Ok(Decoded::one(context, event))
            }

            LogValue::DocumentOperationsPrologue { collection_id } => {
                context.collection_id = *collection_id;
                Ok(Decoded::none(context))
            }

            LogValue::DocumentRemove { key } => {
                context.pending_remove_key = Some(key.clone());
                Ok(Decoded::none(context))
            }

            LogValue::SingleRemove {
                database_id,
                collection_id,
                key,
            } => {
                let mut decoded = Self::single_operation(context, *database_id, *collection_id);
                decoded.context.pending_remove_key = Some(key.clone());
                Ok(decoded)
            }

            LogValue::SinglePut {
                database_id,
                collection_id,
            } => Ok(Self::single_operation(context, *database_id, *collection_id)),

            LogValue::Unknown => {
                tracing::warn!(tick = context.tick, "unhandled log metadata record");
                Ok(Decoded::none(context))
            }
        }
    }

    /// A single operation can only sit between transactions
    fn single_operation(
        context: ScanContext,
        database_id: DatabaseId,
        collection_id: CollectionId,
    ) -> Decoded {
        let (mut context, commit) = context.flush_transaction();
        context.single_op = true;
        context.database_id = database_id;
        context.collection_id = collection_id;
        context.transaction_id = 0;
        Decoded {
            context,
            events: commit.into_iter().collect(),
        }
    }

    fn put(
        &mut self,
        context: ScanContext,
        cf: ColumnFamily,
        key: &[u8],
        value: &serde_json::Value,
    ) -> Result<Decoded, TailError> {
        if !self.should_handle(&context, cf, key)? {
            return Ok(Decoded::none(context));
        }
        match cf {
            ColumnFamily::Definitions => self.put_definition(context, key, value),
            ColumnFamily::Documents => self.put_document(context, value),
            ColumnFamily::Other(_) => Ok(Decoded::none(context)),
        }
    }

    fn put_definition(
        &mut self,
        mut context: ScanContext,
        key: &[u8],
        value: &serde_json::Value,
    ) -> Result<Decoded, TailError> {
        match self.definition_key(&context, key)? {
            DefinitionKey::Database(_) => {
                let event_type = match context.last_kind {
                    Some(LogKind::DatabaseCreate) => EventType::DatabaseCreate,
                    Some(LogKind::DatabaseDrop) => EventType::DatabaseDrop,
                    other => {
                        return Err(self.inconsistent(
                            &context,
                            format!("database write after {}", kind_name(other)),
                        ))
                    }
                };
                let event = ReplicationEvent::new(context.tick, event_type, context.database_id)
                    .with_data(value.clone());
                context.last_kind = None;
                Ok(Decoded::one(context, event))
            }

            DefinitionKey::Collection(..) => {
                let event_type = match context.last_kind {
                    // The index record already reported this write
                    Some(LogKind::IndexCreate | LogKind::IndexDrop) => {
                        context.last_kind = None;
                        return Ok(Decoded::none(context));
                    }
                    Some(LogKind::CollectionCreate) => EventType::CollectionCreate,
                    Some(LogKind::CollectionChange) => EventType::CollectionChange,
                    Some(LogKind::CollectionRename) => EventType::CollectionRename,
                    other => {
                        return Err(self.inconsistent(
                            &context,
                            format!("collection write after {}", kind_name(other)),
                        ))
                    }
                };
                self.require_ids(&context)?;
                let (database_id, collection_id) = (context.database_id, context.collection_id);

                let Some(collection) = self.cache.collection(database_id, collection_id) else {
                    tracing::debug!(
                        tick = context.tick,
                        database = database_id,
                        collection = collection_id,
                        "collection no longer resolves, suppressed"
                    );
                    return Ok(Decoded::none(context.clear_collection()));
                };
                let data = match event_type {
                    EventType::CollectionRename => json!({
                        "id": collection_id.to_string(),
                        "name": collection.name,
                    }),
                    _ => value.clone(),
                };
                let event = ReplicationEvent::new(context.tick, event_type, database_id)
                    .with_collection(CollectionRef::Uuid(collection.uuid.clone()))
                    .with_data(data);
                Ok(Decoded::one(context.clear_collection(), event))
            }

            DefinitionKey::View(..) | DefinitionKey::Other(_) => Ok(Decoded::none(context)),
        }
    }

    fn put_document(
        &mut self,
        mut context: ScanContext,
        value: &serde_json::Value,
    ) -> Result<Decoded, TailError> {
        if context.seen_begin == context.single_op {
            return Err(self.inconsistent(
                &context,
                "document write needs exactly one of a transaction or a single operation",
            ));
        }
        self.require_transaction_id(&context)?;
        self.require_ids(&context)?;

        let transaction_id = Self::take_transaction_id(&mut context);
        let event =
            ReplicationEvent::new(context.tick, EventType::DocumentWrite, context.database_id)
                .with_collection(CollectionRef::Cid(context.collection_id))
                .with_transaction(transaction_id)
                .with_data(value.clone());
        Ok(Decoded::one(context, event))
    }

    fn delete(
        &mut self,
        context: ScanContext,
        cf: ColumnFamily,
        key: &[u8],
    ) -> Result<Decoded, TailError> {
        if !self.should_handle(&context, cf, key)? {
            return Ok(Decoded::none(context));
        }
        match cf {
            ColumnFamily::Definitions => self.delete_definition(context, key),
            ColumnFamily::Documents => self.delete_document(context, key),
            ColumnFamily::Other(_) => Ok(Decoded::none(context)),
        }
    }

    fn delete_definition(
        &mut self,
        context: ScanContext,
        key: &[u8],
    ) -> Result<Decoded, TailError> {
        let is_collection = matches!(
            self.definition_key(&context, key)?,
            DefinitionKey::Collection(..)
        );
        // A database drop deletes its collections without announcing them
        if !is_collection || context.last_kind != Some(LogKind::CollectionDrop) {
            return Ok(Decoded::none(context));
        }
        self.require_ids(&context)?;
        let (database_id, collection_id) = (context.database_id, context.collection_id);

        let uuid = match context.dropped_uuid.clone() {
            Some(uuid) => uuid,
            None => match self.cache.collection_uuid(database_id, collection_id) {
                Some(uuid) => uuid,
                None => {
                    return Err(self.inconsistent(
                        &context,
                        format!(
                            "dropped collection {}/{} has no stable id",
                            database_id, collection_id
                        ),
                    ))
                }
            },
        };
        let event = ReplicationEvent::new(context.tick, EventType::CollectionDrop, database_id)
            .with_collection(CollectionRef::Uuid(uuid))
            .with_data(json!({ "id": collection_id.to_string(), "name": "" }));
        Ok(Decoded::one(context.clear_collection(), event))
    }

    fn delete_document(
        &mut self,
        mut context: ScanContext,
        key: &[u8],
    ) -> Result<Decoded, TailError> {
        // Bulk deletes from a collection drop run outside any transaction
        if !context.in_transaction() {
            return Ok(Decoded::none(context));
        }
        if !matches!(
            context.last_kind,
            Some(LogKind::DocumentRemove | LogKind::SingleRemove)
        ) {
            return Ok(Decoded::none(context));
        }
        self.require_transaction_id(&context)?;
        self.require_ids(&context)?;

        let Some(document_key) = context.pending_remove_key.take() else {
            return Err(self.inconsistent(&context, "document delete without a staged key"));
        };
        // Later deletes in the transaction drop old revisions of updated documents
        context.last_kind = None;
        let revision =
            DocumentKey::revision_of(key).map_err(|e| TailError::MalformedRecord {
                tick: context.tick,
                message: format!("document key: {}", e),
            })?;

        let transaction_id = Self::take_transaction_id(&mut context);
        let event =
            ReplicationEvent::new(context.tick, EventType::DocumentRemove, context.database_id)
                .with_collection(CollectionRef::Cid(context.collection_id))
                .with_transaction(transaction_id)
                .with_data(json!({ "_key": document_key, "_rev": revision.to_string() }));
        Ok(Decoded::one(context, event))
    }

    /// Whether a put or delete is reported at all
    fn should_handle(
        &mut self,
        context: &ScanContext,
        cf: ColumnFamily,
        key: &[u8],
    ) -> Result<bool, TailError> {
        let collection_id = match cf {
            ColumnFamily::Definitions => match self.definition_key(context, key)? {
                DefinitionKey::Database(_) => return Ok(true),
                DefinitionKey::Collection(_, cid) | DefinitionKey::View(_, cid) => cid,
                DefinitionKey::Other(_) => return Ok(false),
            },
            ColumnFamily::Documents => context.collection_id,
            ColumnFamily::Other(_) => return Ok(false),
        };

        if !self.filter.includes(context.database_id, collection_id) {
            return Ok(false);
        }
        // A dropped collection no longer resolves; its drop is still reported
        if context.last_kind == Some(LogKind::CollectionDrop) {
            return Ok(true);
        }
        Ok(self.name_allowed(context.database_id, collection_id))
    }

    /// Filter check for records that name their collection directly
    fn collection_visible(&mut self, database_id: DatabaseId, collection_id: CollectionId) -> bool {
        self.filter.includes(database_id, collection_id)
            && self.name_allowed(database_id, collection_id)
    }

    fn name_allowed(&mut self, database_id: DatabaseId, collection_id: CollectionId) -> bool {
        match self.cache.collection_name(database_id, collection_id) {
            Some(name) => self.filter.allows_name(&name),
            None => false,
        }
    }

    fn definition_key(&self, context: &ScanContext, key: &[u8]) -> Result<DefinitionKey, TailError> {
        DefinitionKey::decode(key).map_err(|e| TailError::MalformedRecord {
            tick: context.tick,
            message: format!("definitions key: {}", e),
        })
    }

    /// Transaction id for a document event; consumes a single operation
    fn take_transaction_id(context: &mut ScanContext) -> TransactionId {
        if context.single_op {
            context.single_op = false;
            0
        } else {
            context.transaction_id
        }
    }

    fn require_ids(&self, context: &ScanContext) -> Result<(), TailError> {
        if context.database_id == 0 || context.collection_id == 0 {
            return Err(self.inconsistent(
                context,
                format!(
                    "missing ids (database {}, collection {})",
                    context.database_id, context.collection_id
                ),
            ));
        }
        Ok(())
    }

    fn require_transaction_id(&self, context: &ScanContext) -> Result<(), TailError> {
        if context.seen_begin && context.transaction_id == 0 {
            return Err(self.inconsistent(context, "transaction without an id"));
        }
        Ok(())
    }

    fn inconsistent(&self, context: &ScanContext, message: impl Into<String>) -> TailError {
        let message = message.into();
        tracing::error!(
            tick = context.tick,
            database = context.database_id,
            collection = context.collection_id,
            tid = context.transaction_id,
            last_kind = kind_name(context.last_kind),
            %message,
            "decoder invariant violated"
        );
        TailError::inconsistency(context.tick, message)
    }
}

fn kind_name(kind: Option<LogKind>) -> &'static str {
    kind.map(LogKind::name).unwrap_or("nothing")
}

#[cfg(test)]
#[path = "decoder_tests.rs"]
mod tests;
