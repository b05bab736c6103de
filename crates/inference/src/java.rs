// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JVM project recognition: fixed environment bootstrap, no container steps.

use crate::path_set::PathSet;
use idx_core::paths::{base_name, contains_no_segments, dir_without_dot};
use idx_core::IndexJob;

/// Build descriptors that mark an indexable JVM project.
const TRIGGERS: &[&str] = &["pom.xml", "build.gradle", "build.sbt"];
const INDEXER: &str = "scip-java";
const OUTFILE: &str = "index.scip";

/// Segments that never contain indexable projects.
const BLOCKED_SEGMENTS: &[&str] = &["example", "examples", "integration", "test", "tests"];

pub(crate) const PATTERNS: &[&str] = TRIGGERS;

/// The indexer bootstraps itself through coursier the same way regardless of
/// project layout, so every job carries this fixed step sequence and nothing
/// container-side.
const LOCAL_STEPS: [&str; 4] = [
    "curl -fLo coursier https://git.io/coursier-cli",
    "chmod +x coursier",
    "./coursier setup --yes --jvm 17",
    "./coursier install scip-java",
];

/// Recognizes Maven, Gradle, and sbt projects.
#[derive(Debug, Clone, Default)]
pub struct JavaRecognizer;

impl JavaRecognizer {
    pub(crate) fn patterns(&self) -> &'static [&'static str] {
        PATTERNS
    }

    pub(crate) fn can_index(&self, paths: &PathSet) -> bool {
        paths.iter().any(is_build_descriptor)
    }

    pub(crate) fn infer_index_jobs(&self, paths: &PathSet) -> Vec<IndexJob> {
        paths
            .iter()
            .filter(|path| is_build_descriptor(path))
            .map(|path| IndexJob {
                root: dir_without_dot(path),
                indexer: INDEXER.to_string(),
                indexer_args: vec![INDEXER.to_string(), "index".to_string()],
                outfile: Some(OUTFILE.to_string()),
                docker_steps: Vec::new(),
                local_steps: LOCAL_STEPS.iter().map(ToString::to_string).collect(),
            })
            .collect()
    }
}

fn is_build_descriptor(path: &str) -> bool {
    TRIGGERS.contains(&base_name(path)) && contains_no_segments(path, BLOCKED_SEGMENTS)
}

#[cfg(test)]
#[path = "java_tests.rs"]
mod tests;
