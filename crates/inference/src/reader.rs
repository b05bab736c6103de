// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Memoized, commit-scoped file access for one inference call.

use idx_adapters::{RepoError, RepositoryScope};
use std::collections::HashMap;

/// Caches capability calls per path so refinement reads happen at most once
/// per directory within a single inference call.
///
/// The number and order of calls reaching the underlying capability is part
/// of the recognizer contract observable by tests.
pub(crate) struct MemoReader<'a> {
    scope: &'a RepositoryScope,
    exists: HashMap<String, bool>,
    contents: HashMap<String, Option<String>>,
}

impl<'a> MemoReader<'a> {
    pub(crate) fn new(scope: &'a RepositoryScope) -> Self {
        Self {
            scope,
            exists: HashMap::new(),
            contents: HashMap::new(),
        }
    }

    /// Whether a file exists at the scoped commit, memoized per path.
    pub(crate) async fn file_exists(&mut self, path: &str) -> Result<bool, RepoError> {
        if let Some(&found) = self.exists.get(path) {
            tracing::debug!(path, "memoized existence check");
            return Ok(found);
        }
        let found = self.scope.file_exists(path).await?;
        self.exists.insert(path.to_string(), found);
        Ok(found)
    }

    /// File contents at the scoped commit, memoized per path. A missing file
    /// is `None` rather than an error.
    pub(crate) async fn read_to_string(&mut self, path: &str) -> Result<Option<String>, RepoError> {
        if let Some(cached) = self.contents.get(path) {
            tracing::debug!(path, "memoized content read");
            return Ok(cached.clone());
        }
        let contents = match self.scope.raw_contents(path).await {
            Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
            Err(RepoError::FileNotFound { .. }) => None,
            Err(err) => return Err(err),
        };
        self.contents.insert(path.to_string(), contents.clone());
        Ok(contents)
    }
}
