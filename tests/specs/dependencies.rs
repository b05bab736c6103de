// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dependency chasing across repositories.

use super::support::{world_with, COMMIT};
use idx_core::RepositoryId;
use idx_engine::{DependencySummary, EnqueuerOptions};
use similar_asserts::assert_eq;
use tokio_util::sync::CancellationToken;

const APP: RepositoryId = RepositoryId(1);
const LIB: RepositoryId = RepositoryId(2);
const INTERNAL: &str = "git.corp.example.com/";
const LIB_MODULE: &str = "git.corp.example.com/platform/lib";
const LIB_COMMIT: &str = "feedface00000000000000000000000000000000";

fn chasing_options() -> EnqueuerOptions {
    EnqueuerOptions {
        internal_module_prefix: Some(INTERNAL.to_string()),
        ..EnqueuerOptions::default()
    }
}

#[tokio::test]
async fn internal_dependency_at_a_pseudo_version_is_chased() {
    let w = world_with(chasing_options());
    let manifest = format!(
        "module {INTERNAL}platform/app\n\nrequire (\n    \
         {LIB_MODULE} v0.0.0-20260101120000-feedface0000\n    \
         github.com/public/dep v1.4.0\n)\n"
    );
    w.repo.add_file(APP, COMMIT, "go.mod", manifest.as_bytes());
    // the pseudo-version resolves by its embedded revision fragment
    w.resolver.add_repository(LIB_MODULE, LIB);
    w.resolver
        .add_revision(LIB_MODULE, "feedface0000", LIB_COMMIT);
    w.repo
        .add_file(LIB, LIB_COMMIT, "go.mod", b"module lib\n");

    let summary = w
        .enqueuer
        .enqueue_dependencies(&w.resolver, APP, COMMIT, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(
        summary,
        DependencySummary {
            processed: 1,
            skipped: 0,
        }
    );

    let indexes = w.store.indexes();
    assert_eq!(indexes.len(), 1);
    assert_eq!(indexes[0].1.repository_id, LIB);
    assert_eq!(indexes[0].1.commit, LIB_COMMIT);
    assert_eq!(indexes[0].1.indexer, "scip-go");
}

#[tokio::test]
async fn chase_after_enqueue_covers_parent_and_dependency() {
    let w = world_with(chasing_options());
    let manifest =
        format!("module {INTERNAL}platform/app\n\nrequire {LIB_MODULE} v2.1.0\n");
    w.repo.add_file(APP, COMMIT, "go.mod", manifest.as_bytes());
    w.resolver.add_repository(LIB_MODULE, LIB);
    w.resolver.add_revision(LIB_MODULE, "v2.1.0", LIB_COMMIT);
    w.repo
        .add_file(LIB, LIB_COMMIT, "go.mod", b"module lib\n");
    let cancel = CancellationToken::new();

    w.enqueuer.enqueue(APP, false, &cancel).await.unwrap();
    w.enqueuer
        .enqueue_dependencies(&w.resolver, APP, COMMIT, &cancel)
        .await
        .unwrap();

    let repositories: Vec<RepositoryId> = w
        .store
        .indexes()
        .into_iter()
        .map(|(_, record)| record.repository_id)
        .collect();
    assert_eq!(repositories, vec![APP, LIB]);
}

#[tokio::test]
async fn failed_resolutions_do_not_block_the_rest() {
    let w = world_with(chasing_options());
    let manifest = format!(
        "require (\n    {INTERNAL}platform/ghost v9.9.9\n    {LIB_MODULE} v2.1.0\n)\n"
    );
    w.repo.add_file(APP, COMMIT, "go.mod", manifest.as_bytes());
    w.resolver.add_repository(LIB_MODULE, LIB);
    w.resolver.add_revision(LIB_MODULE, "v2.1.0", LIB_COMMIT);
    w.repo
        .add_file(LIB, LIB_COMMIT, "go.mod", b"module lib\n");

    let summary = w
        .enqueuer
        .enqueue_dependencies(&w.resolver, APP, COMMIT, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(
        summary,
        DependencySummary {
            processed: 1,
            skipped: 1,
        }
    );
    assert_eq!(w.store.indexes().len(), 1);
}
