// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Index job descriptors and queue states.

use crate::repo::RepositoryId;
use serde::{Deserialize, Serialize};

/// One containerized setup step run before the indexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockerStep {
    /// Directory the commands run in, relative to the repository root
    /// (`""` = root).
    pub root: String,
    /// Image the commands run in.
    pub image: String,
    /// Shell commands, run in order.
    pub commands: Vec<String>,
}

impl DockerStep {
    pub fn new<C, S>(root: impl Into<String>, image: impl Into<String>, commands: C) -> Self
    where
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            root: root.into(),
            image: image.into(),
            commands: commands.into_iter().map(Into::into).collect(),
        }
    }
}

/// A unit of indexing work as inferred or configured, before it is bound to a
/// repository and commit.
///
/// `docker_steps` are ordered from the repository root downward to the job's
/// own root: a step for an ancestor directory precedes a step for a
/// descendant directory, because later steps may depend on artifacts the
/// earlier ones produce (a monorepo-root install must run before a nested
/// package's install).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexJob {
    /// Subdirectory the job concerns (`""` = repository root).
    pub root: String,
    /// Name/image identifier of the tool that performs the work.
    pub indexer: String,
    /// Arguments for the indexer invocation.
    pub indexer_args: Vec<String>,
    /// Expected output path, if the indexer writes one.
    pub outfile: Option<String>,
    /// Containerized setup steps, ordered root-to-leaf.
    pub docker_steps: Vec<DockerStep>,
    /// Shell commands run outside any container (environment preparation,
    /// e.g. pinning a runtime version).
    pub local_steps: Vec<String>,
}

/// Queue state of a persisted index record.
///
/// Records are only ever created as `Queued`; later transitions belong to the
/// worker fleet and the store's own lifecycle handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexState {
    Queued,
    Processing,
    Completed,
    Errored,
}

crate::simple_display! {
    IndexState {
        Queued => "queued",
        Processing => "processing",
        Completed => "completed",
        Errored => "errored",
    }
}

/// A persisted unit of indexing work, bound to one repository commit.
///
/// Constructed only by the enqueue orchestrator and immutable afterwards; the
/// store assigns the record id on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRecord {
    pub repository_id: RepositoryId,
    /// Immutable content hash the job indexes.
    pub commit: String,
    pub state: IndexState,
    /// Epoch milliseconds when the record was queued.
    pub queued_at_ms: u64,
    pub root: String,
    pub indexer: String,
    pub indexer_args: Vec<String>,
    pub outfile: Option<String>,
    pub docker_steps: Vec<DockerStep>,
    pub local_steps: Vec<String>,
}

impl IndexRecord {
    /// Bind a job description to a repository commit as a freshly queued record.
    pub fn queued(
        repository_id: RepositoryId,
        commit: impl Into<String>,
        job: IndexJob,
        queued_at_ms: u64,
    ) -> Self {
        Self {
            repository_id,
            commit: commit.into(),
            state: IndexState::Queued,
            queued_at_ms,
            root: job.root,
            indexer: job.indexer,
            indexer_args: job.indexer_args,
            outfile: job.outfile,
            docker_steps: job.docker_steps,
            local_steps: job.local_steps,
        }
    }
}

crate::builder! {
    pub struct IndexJobBuilder => IndexJob {
        into {
            root: String = "",
            indexer: String = "test-indexer",
        }
        set {
            indexer_args: Vec<String> = Vec::new(),
            docker_steps: Vec<DockerStep> = Vec::new(),
            local_steps: Vec<String> = Vec::new(),
        }
        option {
            outfile: String = None,
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
