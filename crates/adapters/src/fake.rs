// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake collaborators for tests.
//!
//! [`FakeRepoClient`] serves a canned file tree per `(repository, commit)`
//! and records every capability call in order, so tests can assert not just
//! inference output but the number and order of lazy reads behind it.

use crate::repo::{RepoClient, RepoError};
use crate::resolver::{ResolveError, RevisionResolver};
use async_trait::async_trait;
use idx_core::RepositoryId;
use parking_lot::Mutex;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

#[derive(Default)]
struct FakeRepoState {
    heads: HashMap<RepositoryId, String>,
    trees: HashMap<(RepositoryId, String), BTreeMap<String, Vec<u8>>>,
    calls: Vec<String>,
}

/// Canned remote repository service.
#[derive(Clone, Default)]
pub struct FakeRepoClient {
    state: Arc<Mutex<FakeRepoState>>,
}

impl FakeRepoClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a commit as the repository head with an empty tree.
    pub fn add_commit(&self, repository_id: RepositoryId, commit: &str) {
        let mut state = self.state.lock();
        state.heads.insert(repository_id, commit.to_string());
        state
            .trees
            .entry((repository_id, commit.to_string()))
            .or_default();
    }

    /// Add a file to a commit's tree (registering the commit if needed).
    pub fn add_file(&self, repository_id: RepositoryId, commit: &str, path: &str, contents: &[u8]) {
        let mut state = self.state.lock();
        state.heads.entry(repository_id).or_insert_with(|| commit.to_string());
        state
            .trees
            .entry((repository_id, commit.to_string()))
            .or_default()
            .insert(path.to_string(), contents.to_vec());
    }

    /// Every capability call so far, in invocation order.
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().calls.clone()
    }

    /// Drop the recorded call log (keeps the canned trees).
    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }
}

#[async_trait]
impl RepoClient for FakeRepoClient {
    async fn head(&self, repository_id: RepositoryId) -> Result<String, RepoError> {
        let mut state = self.state.lock();
        state.calls.push(format!("head:{repository_id}"));
        state
            .heads
            .get(&repository_id)
            .cloned()
            .ok_or(RepoError::UnknownRepository(repository_id))
    }

    async fn list_files(
        &self,
        repository_id: RepositoryId,
        commit: &str,
        filter: &Regex,
    ) -> Result<Vec<String>, RepoError> {
        let mut state = self.state.lock();
        state.calls.push(format!("list:{repository_id}"));
        let tree = state
            .trees
            .get(&(repository_id, commit.to_string()))
            .ok_or_else(|| {
                RepoError::Unavailable(format!("no tree for {repository_id} at {commit}"))
            })?;
        Ok(tree
            .keys()
            .filter(|path| filter.is_match(path))
            .cloned()
            .collect())
    }

    async fn file_exists(
        &self,
        repository_id: RepositoryId,
        commit: &str,
        path: &str,
    ) -> Result<bool, RepoError> {
        let mut state = self.state.lock();
        state.calls.push(format!("exists:{path}"));
        let tree = state
            .trees
            .get(&(repository_id, commit.to_string()))
            .ok_or_else(|| {
                RepoError::Unavailable(format!("no tree for {repository_id} at {commit}"))
            })?;
        Ok(tree.contains_key(path))
    }

    async fn raw_contents(
        &self,
        repository_id: RepositoryId,
        commit: &str,
        path: &str,
    ) -> Result<Vec<u8>, RepoError> {
        let mut state = self.state.lock();
        state.calls.push(format!("read:{path}"));
        let tree = state
            .trees
            .get(&(repository_id, commit.to_string()))
            .ok_or_else(|| {
                RepoError::Unavailable(format!("no tree for {repository_id} at {commit}"))
            })?;
        tree.get(path).cloned().ok_or_else(|| RepoError::FileNotFound {
            commit: commit.to_string(),
            path: path.to_string(),
        })
    }
}

/// Canned revision resolver.
#[derive(Clone, Default)]
pub struct FakeRevisionResolver {
    repositories: Arc<Mutex<HashMap<String, RepositoryId>>>,
    revisions: Arc<Mutex<HashMap<(String, String), String>>>,
}

impl FakeRevisionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_repository(&self, name: &str, repository_id: RepositoryId) {
        self.repositories
            .lock()
            .insert(name.to_string(), repository_id);
    }

    pub fn add_revision(&self, name: &str, rev: &str, commit: &str) {
        self.revisions
            .lock()
            .insert((name.to_string(), rev.to_string()), commit.to_string());
    }
}

#[async_trait]
impl RevisionResolver for FakeRevisionResolver {
    async fn repository_id(&self, name: &str) -> Result<Option<RepositoryId>, ResolveError> {
        Ok(self.repositories.lock().get(name).copied())
    }

    async fn resolve_revision(&self, name: &str, rev: &str) -> Result<String, ResolveError> {
        self.revisions
            .lock()
            .get(&(name.to_string(), rev.to_string()))
            .cloned()
            .ok_or_else(|| ResolveError::UnknownRevision {
                name: name.to_string(),
                rev: rev.to_string(),
            })
    }
}
