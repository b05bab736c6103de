// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Go module recognition: one job per module descriptor.

use crate::path_set::PathSet;
use idx_core::paths::{base_name, contains_no_segments, dir_without_dot};
use idx_core::{DockerStep, IndexJob};

const TRIGGER: &str = "go.mod";
const INDEXER: &str = "scip-go";

/// Segments that never contain indexable modules.
const BLOCKED_SEGMENTS: &[&str] =
    &["example", "examples", "integration", "test", "tests", "vendor"];

pub(crate) const PATTERNS: &[&str] = &[TRIGGER];

/// Recognizes Go modules. Each module gets a dependency download step rooted
/// at the module's own directory, run before the indexer.
#[derive(Debug, Clone, Default)]
pub struct GoRecognizer;

impl GoRecognizer {
    pub(crate) fn patterns(&self) -> &'static [&'static str] {
        PATTERNS
    }

    pub(crate) fn can_index(&self, paths: &PathSet) -> bool {
        paths.iter().any(is_module_descriptor)
    }

    pub(crate) fn infer_index_jobs(&self, paths: &PathSet) -> Vec<IndexJob> {
        paths
            .iter()
            .filter(|path| is_module_descriptor(path))
            .map(|path| {
                let root = dir_without_dot(path);
                IndexJob {
                    root: root.clone(),
                    indexer: INDEXER.to_string(),
                    indexer_args: vec![INDEXER.to_string(), "--no-animation".to_string()],
                    outfile: None,
                    docker_steps: vec![DockerStep::new(root, INDEXER, ["go mod download"])],
                    local_steps: Vec::new(),
                }
            })
            .collect()
    }
}

fn is_module_descriptor(path: &str) -> bool {
    base_name(path) == TRIGGER && contains_no_segments(path, BLOCKED_SEGMENTS)
}

#[cfg(test)]
#[path = "go_tests.rs"]
mod tests;
