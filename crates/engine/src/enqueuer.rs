// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Enqueue orchestration.

use idx_adapters::{
    IndexableRepositoryUpdate, RepoClient, RepoError, RepositoryScope, Store, StoreError,
    StoreTransaction,
};
use idx_core::{Clock, IndexJob, IndexRecord, RepositoryId};
use idx_inference::InferenceError;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::resolvers::Resolution;

/// Fixed repository-root path of the in-repository configuration file.
pub const REPOSITORY_CONFIG_PATH: &str = "idx.yaml";

/// Inference producing more than this many jobs for one commit queues
/// nothing: a repository whose layout would explode into hundreds of
/// near-duplicate jobs is a misconfiguration, not a workload.
pub const MAX_INFERRED_JOBS: usize = 25;

/// Errors that abort an enqueue invocation with nothing queued.
#[derive(Debug, Error)]
pub enum EnqueueError {
    #[error("repository access error: {0}")]
    Repo(#[from] RepoError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("inference error: {0}")]
    Inference(#[from] InferenceError),
    #[error("enqueue cancelled before commit")]
    Cancelled,
}

/// How an enqueue invocation finished, and what it queued.
///
/// Only `Queued` creates records; every other variant is a successful
/// invocation that deliberately queued nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnqueueOutcome {
    /// Records were committed, ids in insertion order.
    Queued { index_ids: Vec<u64> },
    /// The commit was already queued and `force` was not set.
    AlreadyQueued,
    /// No resolver produced any jobs.
    NothingToIndex,
    /// An explicit configuration exists but does not parse. Deliberately not
    /// a fallthrough to inference: a broken explicit configuration fails
    /// loudly instead of silently substituting inferred behavior.
    InvalidConfiguration,
    /// Inference exceeded the safety cap; the whole inferred set was
    /// discarded.
    InferenceCapExceeded { inferred: usize },
}

/// Knobs for the orchestrator. Defaults match the documented behavior.
#[derive(Debug, Clone)]
pub struct EnqueuerOptions {
    /// Where the in-repository configuration file lives.
    pub repository_config_path: String,
    /// Safety cap on automatically inferred job counts.
    pub max_inferred_jobs: usize,
    /// Module prefix identifying internally-hosted dependencies; `None`
    /// disables dependency chasing.
    pub internal_module_prefix: Option<String>,
}

impl Default for EnqueuerOptions {
    fn default() -> Self {
        Self {
            repository_config_path: REPOSITORY_CONFIG_PATH.to_string(),
            max_inferred_jobs: MAX_INFERRED_JOBS,
            internal_module_prefix: None,
        }
    }
}

/// Decides the job set for a repository commit and commits it transactionally.
///
/// Invocations for different repositories may run concurrently; the only
/// shared mutable state is the store, which serializes the idempotency check
/// and the insert per `(repository, commit)`.
pub struct IndexEnqueuer<C: Clock> {
    pub(crate) store: Arc<dyn Store>,
    pub(crate) repo: Arc<dyn RepoClient>,
    clock: C,
    pub(crate) options: EnqueuerOptions,
}

impl<C: Clock> IndexEnqueuer<C> {
    pub fn new(
        store: Arc<dyn Store>,
        repo: Arc<dyn RepoClient>,
        clock: C,
        options: EnqueuerOptions,
    ) -> Self {
        Self {
            store,
            repo,
            clock,
            options,
        }
    }

    /// Queue index jobs for the current head of a repository.
    pub async fn enqueue(
        &self,
        repository_id: RepositoryId,
        force: bool,
        cancel: &CancellationToken,
    ) -> Result<EnqueueOutcome, EnqueueError> {
        let commit = self.repo.head(repository_id).await?;
        self.enqueue_at(repository_id, &commit, force, cancel).await
    }

    /// Queue index jobs for a specific commit of a repository.
    pub async fn enqueue_at(
        &self,
        repository_id: RepositoryId,
        commit: &str,
        force: bool,
        cancel: &CancellationToken,
    ) -> Result<EnqueueOutcome, EnqueueError> {
        if cancel.is_cancelled() {
            return Err(EnqueueError::Cancelled);
        }

        if !force && self.store.is_queued(repository_id, commit).await? {
            tracing::debug!(%repository_id, commit, "commit already queued");
            return Ok(EnqueueOutcome::AlreadyQueued);
        }

        let scope =
            RepositoryScope::new(Arc::clone(&self.repo), repository_id, commit.to_string());
        let jobs = match self.resolve_jobs(repository_id, &scope).await? {
            Resolution::Jobs(jobs) if !jobs.is_empty() => jobs,
            Resolution::Jobs(_) | Resolution::NotApplicable => {
                return Ok(EnqueueOutcome::NothingToIndex)
            }
            Resolution::Invalid => return Ok(EnqueueOutcome::InvalidConfiguration),
            Resolution::CapExceeded { inferred } => {
                return Ok(EnqueueOutcome::InferenceCapExceeded { inferred })
            }
        };

        // Last cancellation checkpoint: once the transaction opens it runs
        // to done(), commit or rollback, never interrupted mid-write.
        if cancel.is_cancelled() {
            return Err(EnqueueError::Cancelled);
        }

        let mut tx = self.store.transact().await?;
        match self
            .write_batch(tx.as_mut(), repository_id, commit, jobs)
            .await
        {
            Ok(index_ids) => {
                tx.done(true).await?;
                tracing::info!(
                    %repository_id,
                    commit,
                    count = index_ids.len(),
                    "queued index jobs"
                );
                Ok(EnqueueOutcome::Queued { index_ids })
            }
            Err(error) => {
                if let Err(rollback) = tx.done(false).await {
                    tracing::error!(%repository_id, error = %rollback, "rollback failed");
                }
                Err(error.into())
            }
        }
    }

    /// Insert the whole job set plus the repository bookkeeping update inside
    /// one open transaction.
    async fn write_batch(
        &self,
        tx: &mut dyn StoreTransaction,
        repository_id: RepositoryId,
        commit: &str,
        jobs: Vec<IndexJob>,
    ) -> Result<Vec<u64>, StoreError> {
        let queued_at_ms = self.clock.epoch_ms();
        let job_count = jobs.len();
        let mut index_ids = Vec::with_capacity(job_count);
        for job in jobs {
            let record = IndexRecord::queued(repository_id, commit, job, queued_at_ms);
            index_ids.push(tx.insert_index(record).await?);
        }
        tx.update_indexable_repository(IndexableRepositoryUpdate {
            repository_id,
            last_enqueued_at_ms: queued_at_ms,
            job_count,
        })
        .await?;
        Ok(index_ids)
    }
}

#[cfg(test)]
#[path = "enqueuer_tests.rs"]
mod tests;
