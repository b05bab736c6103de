// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! TypeScript project recognition: ancestor-walk install-chain inference.
//!
//! For every `tsconfig.json` this walks from the project directory up to the
//! repository root, collecting one install step per enclosing `package.json`.
//! Steps are collected leaf-to-root and reversed before they land on the job:
//! a monorepo-root install must run before a nested package's install.

use crate::path_set::PathSet;
use crate::reader::MemoReader;
use crate::InferenceError;
use idx_adapters::RepositoryScope;
use idx_core::paths::{ancestor_dirs, base_name, contains_no_segments, dir_without_dot, join_relative};
use idx_core::{DockerStep, IndexJob};
use serde::Deserialize;

/// Project descriptor that marks an indexable TypeScript root.
const DESCRIPTOR: &str = "tsconfig.json";
/// Package manifest consulted during the ancestor walk.
const MANIFEST: &str = "package.json";
const INDEXER: &str = "scip-typescript";

const YARN_LOCKFILE: &str = "yarn.lock";
const YARN_INSTALL: &str = "yarn --ignore-engines";
const NPM_INSTALL: &str = "npm install";

/// Segments that never contain indexable projects.
const BLOCKED_SEGMENTS: &[&str] =
    &["example", "examples", "integration", "test", "tests", "node_modules"];

/// Base names consulted from the filtered path set.
pub(crate) const PATTERNS: &[&str] = &[DESCRIPTOR, MANIFEST, YARN_LOCKFILE, "lerna.json", ".nvmrc"];

/// Monorepo manifest fields that refine the walk.
#[derive(Deserialize)]
struct LernaConfig {
    #[serde(default, rename = "npmClient")]
    npm_client: Option<String>,
}

/// Recognizes TypeScript projects and computes their ordered install chains.
#[derive(Debug, Clone, Default)]
pub struct TypeScriptRecognizer;

impl TypeScriptRecognizer {
    pub(crate) fn patterns(&self) -> &'static [&'static str] {
        PATTERNS
    }

    pub(crate) fn can_index(&self, paths: &PathSet) -> bool {
        paths.iter().any(is_project_descriptor)
    }

    pub(crate) async fn infer_index_jobs(
        &self,
        paths: &PathSet,
        scope: &RepositoryScope,
    ) -> Result<Vec<IndexJob>, InferenceError> {
        // One reader for the whole call: refinement reads are memoized per
        // path, so shared ancestors are consulted once no matter how many
        // projects sit below them.
        let mut reader = MemoReader::new(scope);
        let mut jobs = Vec::new();
        for path in paths.iter().filter(|path| is_project_descriptor(path)) {
            jobs.push(infer_one(paths, &mut reader, path).await?);
        }
        Ok(jobs)
    }
}

async fn infer_one(
    paths: &PathSet,
    reader: &mut MemoReader<'_>,
    descriptor: &str,
) -> Result<IndexJob, InferenceError> {
    let ancestors = ancestor_dirs(descriptor);

    // A lerna.json anywhere on the ancestor chain declaring yarn forces yarn
    // for the whole job, lockfiles or not.
    let mut prefer_yarn = false;
    for dir in &ancestors {
        if paths.contains(&join_relative(dir, "lerna.json")) && lerna_wants_yarn(reader, dir).await?
        {
            prefer_yarn = true;
        }
    }

    // The nearest .nvmrc pins the runtime for the job.
    let mut local_steps = Vec::new();
    for dir in &ancestors {
        let nvmrc = join_relative(dir, ".nvmrc");
        if paths.contains(&nvmrc) {
            if let Some(contents) = reader.read_to_string(&nvmrc).await? {
                let version = contents.trim();
                if !version.is_empty() {
                    local_steps.push(format!("n {version}"));
                }
            }
            break;
        }
    }

    // Collect one install step per enclosing manifest, leaf-to-root, then
    // reverse so ancestor installs precede descendant ones.
    let mut docker_steps = Vec::new();
    for dir in &ancestors {
        if !paths.contains(&join_relative(dir, MANIFEST)) {
            continue;
        }
        let install = if prefer_yarn || reader.file_exists(&join_relative(dir, YARN_LOCKFILE)).await?
        {
            YARN_INSTALL
        } else {
            NPM_INSTALL
        };
        docker_steps.push(DockerStep::new(dir.clone(), INDEXER, [install]));
    }
    docker_steps.reverse();

    Ok(IndexJob {
        root: dir_without_dot(descriptor),
        indexer: INDEXER.to_string(),
        indexer_args: vec![INDEXER.to_string(), "index".to_string()],
        outfile: None,
        docker_steps,
        local_steps,
    })
}

async fn lerna_wants_yarn(
    reader: &mut MemoReader<'_>,
    dir: &str,
) -> Result<bool, InferenceError> {
    let Some(contents) = reader.read_to_string(&join_relative(dir, "lerna.json")).await? else {
        return Ok(false);
    };
    match serde_json::from_str::<LernaConfig>(&contents) {
        Ok(config) => Ok(config.npm_client.as_deref() == Some("yarn")),
        Err(error) => {
            tracing::warn!(dir, %error, "ignoring unparsable lerna.json");
            Ok(false)
        }
    }
}

fn is_project_descriptor(path: &str) -> bool {
    base_name(path) == DESCRIPTOR && contains_no_segments(path, BLOCKED_SEGMENTS)
}

#[cfg(test)]
#[path = "typescript_tests.rs"]
mod tests;
