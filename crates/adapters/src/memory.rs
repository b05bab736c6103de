// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory job store.
//!
//! Reference implementation of [`Store`] used by the workspace specs and by
//! embedders that do not need durability. One mutex guards the whole state,
//! which gives the per-`(repository, commit)` serialization the store
//! contract asks for.

use crate::store::{IndexableRepositoryUpdate, Store, StoreError, StoreTransaction};
use async_trait::async_trait;
use idx_core::{IndexRecord, RepositoryId};
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

#[derive(Default)]
struct MemoryState {
    next_id: u64,
    indexes: BTreeMap<u64, IndexRecord>,
    configurations: HashMap<RepositoryId, Vec<u8>>,
    indexable: HashMap<RepositoryId, IndexableRepositoryUpdate>,
    fail_transact: bool,
    fail_inserts: bool,
}

/// In-memory [`Store`] with buffered transactions.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stash an operator configuration payload for a repository.
    pub fn set_index_configuration(&self, repository_id: RepositoryId, raw: Vec<u8>) {
        self.state.lock().configurations.insert(repository_id, raw);
    }

    /// Committed records with their store-assigned ids, in id order.
    pub fn indexes(&self) -> Vec<(u64, IndexRecord)> {
        self.state
            .lock()
            .indexes
            .iter()
            .map(|(id, record)| (*id, record.clone()))
            .collect()
    }

    /// Bookkeeping row for a repository, if an enqueue has committed one.
    pub fn indexable_repository(
        &self,
        repository_id: RepositoryId,
    ) -> Option<IndexableRepositoryUpdate> {
        self.state.lock().indexable.get(&repository_id).cloned()
    }

    /// Make `transact` fail, for collaborator-unavailable tests.
    pub fn fail_transact(&self, fail: bool) {
        self.state.lock().fail_transact = fail;
    }

    /// Make `insert_index` fail, for rollback tests.
    pub fn fail_inserts(&self, fail: bool) {
        self.state.lock().fail_inserts = fail;
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn is_queued(
        &self,
        repository_id: RepositoryId,
        commit: &str,
    ) -> Result<bool, StoreError> {
        let state = self.state.lock();
        Ok(state
            .indexes
            .values()
            .any(|record| record.repository_id == repository_id && record.commit == commit))
    }

    async fn get_index_configuration(
        &self,
        repository_id: RepositoryId,
    ) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.state.lock().configurations.get(&repository_id).cloned())
    }

    async fn transact(&self) -> Result<Box<dyn StoreTransaction>, StoreError> {
        if self.state.lock().fail_transact {
            return Err(StoreError::Unavailable("transactions disabled".to_string()));
        }
        Ok(Box::new(MemoryTransaction {
            state: Arc::clone(&self.state),
            records: Vec::new(),
            updates: Vec::new(),
        }))
    }
}

/// Buffered writes, applied atomically on `done(true)` and discarded on
/// `done(false)` or drop.
struct MemoryTransaction {
    state: Arc<Mutex<MemoryState>>,
    records: Vec<(u64, IndexRecord)>,
    updates: Vec<IndexableRepositoryUpdate>,
}

#[async_trait]
impl StoreTransaction for MemoryTransaction {
    async fn insert_index(&mut self, record: IndexRecord) -> Result<u64, StoreError> {
        let id = {
            let mut state = self.state.lock();
            if state.fail_inserts {
                return Err(StoreError::Unavailable("insert failed".to_string()));
            }
            state.next_id += 1;
            state.next_id
        };
        self.records.push((id, record));
        Ok(id)
    }

    async fn update_indexable_repository(
        &mut self,
        update: IndexableRepositoryUpdate,
    ) -> Result<(), StoreError> {
        self.updates.push(update);
        Ok(())
    }

    async fn done(self: Box<Self>, ok: bool) -> Result<(), StoreError> {
        if !ok {
            return Ok(());
        }
        let mut state = self.state.lock();
        for (id, record) in self.records {
            state.indexes.insert(id, record);
        }
        for update in self.updates {
            state.indexable.insert(update.repository_id, update);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
