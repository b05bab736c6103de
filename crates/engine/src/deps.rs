// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dependency chasing: recursively enqueue internally-hosted dependencies.
//!
//! Reads the Go module manifest at a commit, keeps the requirements whose
//! module path matches the configured internal host prefix, resolves each to
//! a concrete commit, and runs a non-forced enqueue for it. A dependency
//! that fails to resolve is logged and skipped; the batch continues.

use idx_adapters::{RepoError, RepositoryScope, RevisionResolver};
use idx_core::{Clock, RepositoryId};
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tokio_util::sync::CancellationToken;

use crate::enqueuer::{EnqueueError, IndexEnqueuer};

const GO_MANIFEST: &str = "go.mod";

/// One `require` directive from a Go module manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub module: String,
    pub version: String,
}

/// Tally of one dependency chase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySummary {
    /// Internal dependencies that resolved and went through enqueue
    /// (whatever that enqueue's outcome).
    pub processed: usize,
    /// Internal dependencies skipped because resolution failed.
    pub skipped: usize,
}

impl<C: Clock> IndexEnqueuer<C> {
    /// Chase the dependency manifest at a commit and enqueue indexing for
    /// every internally-hosted dependency that resolves.
    ///
    /// A no-op unless an internal module prefix is configured.
    pub async fn enqueue_dependencies(
        &self,
        resolver: &dyn RevisionResolver,
        repository_id: RepositoryId,
        commit: &str,
        cancel: &CancellationToken,
    ) -> Result<DependencySummary, EnqueueError> {
        let Some(prefix) = self.options.internal_module_prefix.clone() else {
            return Ok(DependencySummary::default());
        };

        let scope =
            RepositoryScope::new(Arc::clone(&self.repo), repository_id, commit.to_string());
        let contents = match scope.raw_contents(GO_MANIFEST).await {
            Ok(bytes) => bytes,
            Err(RepoError::FileNotFound { .. }) => return Ok(DependencySummary::default()),
            Err(error) => return Err(error.into()),
        };
        let manifest = String::from_utf8_lossy(&contents).into_owned();

        let mut summary = DependencySummary::default();
        for requirement in parse_require_directives(&manifest) {
            if !requirement.module.starts_with(&prefix) {
                continue;
            }
            let rev = revision_for_version(&requirement.version);
            let Some((dep_id, dep_commit)) =
                resolve_dependency(resolver, &requirement.module, rev).await
            else {
                summary.skipped += 1;
                continue;
            };
            self.enqueue_at(dep_id, &dep_commit, false, cancel).await?;
            summary.processed += 1;
        }
        Ok(summary)
    }
}

async fn resolve_dependency(
    resolver: &dyn RevisionResolver,
    module: &str,
    rev: &str,
) -> Option<(RepositoryId, String)> {
    let repository_id = match resolver.repository_id(module).await {
        Ok(Some(id)) => id,
        Ok(None) => {
            tracing::warn!(module, "dependency is not a known repository; skipping");
            return None;
        }
        Err(error) => {
            tracing::warn!(module, %error, "dependency lookup failed; skipping");
            return None;
        }
    };
    match resolver.resolve_revision(module, rev).await {
        Ok(commit) => Some((repository_id, commit)),
        Err(error) => {
            tracing::warn!(module, rev, %error, "revision resolution failed; skipping");
            None
        }
    }
}

/// Extract `(module, version)` pairs from `require` directives, both the
/// single-line and the block form. Comments (`// indirect` and friends) are
/// ignored.
pub fn parse_require_directives(manifest: &str) -> Vec<Requirement> {
    let mut requirements = Vec::new();
    let mut in_block = false;
    for raw_line in manifest.lines() {
        let line = raw_line.split("//").next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        if in_block {
            if line == ")" {
                in_block = false;
            } else {
                push_requirement(&mut requirements, line);
            }
        } else if let Some(rest) = line.strip_prefix("require ") {
            let rest = rest.trim();
            if rest == "(" {
                in_block = true;
            } else {
                push_requirement(&mut requirements, rest);
            }
        } else if line == "require(" {
            in_block = true;
        }
    }
    requirements
}

fn push_requirement(out: &mut Vec<Requirement>, line: &str) {
    let mut parts = line.split_whitespace();
    if let (Some(module), Some(version)) = (parts.next(), parts.next()) {
        out.push(Requirement {
            module: module.to_string(),
            version: version.to_string(),
        });
    }
}

// Allow expect here as the regex is compile-time verified to be valid
#[allow(clippy::expect_used)]
static PSEUDO_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v\d+\.\d+\.\d+-(?:[0-9A-Za-z.-]+[.-])?\d{14}-([0-9a-f]{12})$")
        .expect("constant regex pattern is valid")
});

/// The revision to resolve for a dependency version.
///
/// Pseudo-versions (`vX.Y.Z-yyyymmddhhmmss-abcdef123456` and the tagged
/// variants) embed the revision they were cut from; anything else is treated
/// as a tag and resolved as-is.
pub fn revision_for_version(version: &str) -> &str {
    match PSEUDO_VERSION.captures(version).and_then(|c| c.get(1)) {
        Some(fragment) => fragment.as_str(),
        None => version,
    }
}

#[cfg(test)]
#[path = "deps_tests.rs"]
mod tests;
