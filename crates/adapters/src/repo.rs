// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote repository content and metadata access.
//!
//! Repositories are never cloned locally; everything this core learns about a
//! repository flows through this capability.

use async_trait::async_trait;
use idx_core::RepositoryId;
use regex::Regex;
use std::sync::Arc;
use thiserror::Error;

/// Errors from the remote repository service.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("unknown repository {0}")]
    UnknownRepository(RepositoryId),
    #[error("file not found at {commit}: {path}")]
    FileNotFound { commit: String, path: String },
    #[error("repository access failed: {0}")]
    Unavailable(String),
}

/// Client for the remote repository content/metadata service.
#[async_trait]
pub trait RepoClient: Send + Sync {
    /// Current head commit of the repository.
    async fn head(&self, repository_id: RepositoryId) -> Result<String, RepoError>;

    /// Paths at a commit whose full path matches `filter`, in a stable order.
    ///
    /// The filter is the recognizer pattern union; passing it here avoids a
    /// full tree walk on large repositories.
    async fn list_files(
        &self,
        repository_id: RepositoryId,
        commit: &str,
        filter: &Regex,
    ) -> Result<Vec<String>, RepoError>;

    /// Whether a file exists at a commit.
    async fn file_exists(
        &self,
        repository_id: RepositoryId,
        commit: &str,
        path: &str,
    ) -> Result<bool, RepoError>;

    /// Raw file contents at a commit.
    async fn raw_contents(
        &self,
        repository_id: RepositoryId,
        commit: &str,
        path: &str,
    ) -> Result<Vec<u8>, RepoError>;
}

/// File access bound to exactly one repository and commit.
///
/// Recognizers only ever see this scoped handle, so an inference call cannot
/// read outside the commit it is deciding for.
#[derive(Clone)]
pub struct RepositoryScope {
    client: Arc<dyn RepoClient>,
    repository_id: RepositoryId,
    commit: String,
}

impl RepositoryScope {
    pub fn new(client: Arc<dyn RepoClient>, repository_id: RepositoryId, commit: String) -> Self {
        Self {
            client,
            repository_id,
            commit,
        }
    }

    pub fn repository_id(&self) -> RepositoryId {
        self.repository_id
    }

    pub fn commit(&self) -> &str {
        &self.commit
    }

    pub async fn list_files(&self, filter: &Regex) -> Result<Vec<String>, RepoError> {
        self.client
            .list_files(self.repository_id, &self.commit, filter)
            .await
    }

    pub async fn file_exists(&self, path: &str) -> Result<bool, RepoError> {
        self.client
            .file_exists(self.repository_id, &self.commit, path)
            .await
    }

    pub async fn raw_contents(&self, path: &str) -> Result<Vec<u8>, RepoError> {
        self.client
            .raw_contents(self.repository_id, &self.commit, path)
            .await
    }
}
