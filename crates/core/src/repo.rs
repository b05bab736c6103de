// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Repository identity.

use serde::{Deserialize, Serialize};

/// Integer handle of a repository known to this instance.
///
/// Commits are carried alongside as plain strings (immutable content hashes);
/// this core treats them opaquely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepositoryId(pub i64);

impl std::fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RepositoryId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}
