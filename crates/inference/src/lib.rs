// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! idx-inference: per-ecosystem recognizers that infer ordered index jobs
//! from a repository's file tree, without ever cloning the repository.

pub mod go;
pub mod java;
mod path_set;
mod reader;
pub mod registry;
pub mod typescript;

pub use go::GoRecognizer;
pub use java::JavaRecognizer;
pub use path_set::PathSet;
pub use registry::{pattern_union, recognizers};
pub use typescript::TypeScriptRecognizer;

use idx_adapters::{RepoError, RepositoryScope};
use idx_core::IndexJob;
use thiserror::Error;

/// Errors from job inference.
///
/// Only capability failures surface here; a recognizer that finds nothing
/// applicable returns an empty job list instead.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// The closed set of ecosystem recognizers.
///
/// Dispatch is a match over a compile-time-known, audited list; there is no
/// runtime registration.
#[derive(Debug, Clone)]
pub enum Recognizer {
    Go(GoRecognizer),
    Java(JavaRecognizer),
    TypeScript(TypeScriptRecognizer),
}

impl Recognizer {
    /// Base names this recognizer wants present in its filtered path set.
    pub fn patterns(&self) -> &'static [&'static str] {
        match self {
            Recognizer::Go(r) => r.patterns(),
            Recognizer::Java(r) => r.patterns(),
            Recognizer::TypeScript(r) => r.patterns(),
        }
    }

    /// Cheap applicability check over the filtered path set.
    ///
    /// The file-access capability is deliberately not a parameter: during
    /// applicability no recognizer may read file contents, and the signature
    /// makes that rule structural.
    pub fn can_index(&self, paths: &PathSet) -> bool {
        match self {
            Recognizer::Go(r) => r.can_index(paths),
            Recognizer::Java(r) => r.can_index(paths),
            Recognizer::TypeScript(r) => r.can_index(paths),
        }
    }

    /// Infer ordered job descriptions for every project this recognizer
    /// detects; may lazily read file contents through the scoped capability.
    ///
    /// Deterministic: identical `(paths, scope)` inputs yield identical,
    /// identically-ordered output. Ordering matters: docker steps must run
    /// root-to-leaf and downstream job ids are assigned from position.
    pub async fn infer_index_jobs(
        &self,
        paths: &PathSet,
        scope: &RepositoryScope,
    ) -> Result<Vec<IndexJob>, InferenceError> {
        match self {
            Recognizer::Go(r) => Ok(r.infer_index_jobs(paths)),
            Recognizer::Java(r) => Ok(r.infer_index_jobs(paths)),
            Recognizer::TypeScript(r) => r.infer_index_jobs(paths, scope).await,
        }
    }
}
