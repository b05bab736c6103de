// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Revision resolution for the dependency chaser.

use async_trait::async_trait;
use idx_core::RepositoryId;
use thiserror::Error;

/// Errors from revision resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("unknown revision {rev} of {name}")]
    UnknownRevision { name: String, rev: String },
    #[error("revision resolution failed: {0}")]
    Unavailable(String),
}

/// Maps dependency references to repositories and concrete commits.
#[async_trait]
pub trait RevisionResolver: Send + Sync {
    /// Repository handle for an internally-hosted dependency name, or `None`
    /// when the name is not a repository this instance knows.
    async fn repository_id(&self, name: &str) -> Result<Option<RepositoryId>, ResolveError>;

    /// Resolve a tag or revision of a named repository to a commit.
    async fn resolve_revision(&self, name: &str, rev: &str) -> Result<String, ResolveError>;
}
