// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable job store interface.

use async_trait::async_trait;
use idx_core::{IndexRecord, RepositoryId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by the job store.
///
/// Store failures abort the enqueue invocation with nothing queued; retry
/// policy belongs to the embedding service, never to this core.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Repository bookkeeping written alongside a successful enqueue, within the
/// same transaction as the inserted records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexableRepositoryUpdate {
    pub repository_id: RepositoryId,
    /// Epoch milliseconds of the most recent enqueue for this repository.
    pub last_enqueued_at_ms: u64,
    /// Number of records queued by that enqueue.
    pub job_count: usize,
}

/// The persistent job store.
///
/// The idempotency check and the transactional insert must together behave as
/// if serialized per `(repository_id, commit)`: two concurrent non-forced
/// enqueues for the same commit must not both queue jobs.
#[async_trait]
pub trait Store: Send + Sync {
    /// Whether any index record exists for the given repository commit.
    async fn is_queued(
        &self,
        repository_id: RepositoryId,
        commit: &str,
    ) -> Result<bool, StoreError>;

    /// Raw bytes of the operator-stored index configuration, if any.
    async fn get_index_configuration(
        &self,
        repository_id: RepositoryId,
    ) -> Result<Option<Vec<u8>>, StoreError>;

    /// Open a transaction. All writes of one enqueue go through a single
    /// transaction so a partially-queued job set is never observable.
    async fn transact(&self) -> Result<Box<dyn StoreTransaction>, StoreError>;
}

/// An open store transaction. Dropping without calling [`done`] discards the
/// buffered writes.
///
/// [`done`]: StoreTransaction::done
#[async_trait]
pub trait StoreTransaction: Send {
    /// Insert a record, returning the id the store assigned to it.
    async fn insert_index(&mut self, record: IndexRecord) -> Result<u64, StoreError>;

    /// Update repository bookkeeping within this transaction.
    async fn update_indexable_repository(
        &mut self,
        update: IndexableRepositoryUpdate,
    ) -> Result<(), StoreError>;

    /// Commit when `ok`, roll back otherwise.
    async fn done(self: Box<Self>, ok: bool) -> Result<(), StoreError>;
}
