// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A polyglot monorepo end-to-end: every ecosystem contributes jobs, install
//! chains come out ordered root-to-leaf, and bookkeeping lands in the same
//! transaction.

use super::support::{world, COMMIT};
use idx_core::{Clock, DockerStep, IndexJob, IndexRecord, RepositoryId};
use similar_asserts::assert_eq;
use tokio_util::sync::CancellationToken;

const REPO: RepositoryId = RepositoryId(7);

#[tokio::test]
async fn polyglot_monorepo_queues_every_project() {
    let w = world();
    w.repo.add_file(REPO, COMMIT, "go.mod", b"module example.com/mono\n");
    w.repo.add_file(REPO, COMMIT, "backend/pom.xml", b"<project/>");
    w.repo.add_file(REPO, COMMIT, "web/package.json", b"{}");
    w.repo.add_file(REPO, COMMIT, "web/yarn.lock", b"");
    w.repo.add_file(REPO, COMMIT, "web/.nvmrc", b"18.17.0\n");
    w.repo.add_file(REPO, COMMIT, "web/app/tsconfig.json", b"{}");
    w.repo.add_file(REPO, COMMIT, "web/app/package.json", b"{}");

    w.enqueuer
        .enqueue(REPO, false, &CancellationToken::new())
        .await
        .unwrap();

    let queued_at_ms = w.clock.epoch_ms();
    let records: Vec<IndexRecord> = w
        .store
        .indexes()
        .into_iter()
        .map(|(_, record)| record)
        .collect();

    let expected = vec![
        IndexRecord::queued(
            REPO,
            COMMIT,
            IndexJob {
                root: "".to_string(),
                indexer: "scip-go".to_string(),
                indexer_args: vec!["scip-go".to_string(), "--no-animation".to_string()],
                outfile: None,
                docker_steps: vec![DockerStep::new("", "scip-go", ["go mod download"])],
                local_steps: Vec::new(),
            },
            queued_at_ms,
        ),
        IndexRecord::queued(
            REPO,
            COMMIT,
            IndexJob {
                root: "backend".to_string(),
                indexer: "scip-java".to_string(),
                indexer_args: vec!["scip-java".to_string(), "index".to_string()],
                outfile: Some("index.scip".to_string()),
                docker_steps: Vec::new(),
                local_steps: vec![
                    "curl -fLo coursier https://git.io/coursier-cli".to_string(),
                    "chmod +x coursier".to_string(),
                    "./coursier setup --yes --jvm 17".to_string(),
                    "./coursier install scip-java".to_string(),
                ],
            },
            queued_at_ms,
        ),
        IndexRecord::queued(
            REPO,
            COMMIT,
            IndexJob {
                root: "web/app".to_string(),
                indexer: "scip-typescript".to_string(),
                indexer_args: vec!["scip-typescript".to_string(), "index".to_string()],
                outfile: None,
                // monorepo install first, nested package install second
                docker_steps: vec![
                    DockerStep::new("web", "scip-typescript", ["yarn --ignore-engines"]),
                    DockerStep::new("web/app", "scip-typescript", ["npm install"]),
                ],
                local_steps: vec!["n 18.17.0".to_string()],
            },
            queued_at_ms,
        ),
    ];

    assert_eq!(records, expected);

    let bookkeeping = w.store.indexable_repository(REPO).unwrap();
    assert_eq!(bookkeeping.job_count, 3);
    assert_eq!(bookkeeping.last_enqueued_at_ms, queued_at_ms);
}

#[tokio::test]
async fn vendored_and_test_trees_stay_silent() {
    let w = world();
    w.repo
        .add_file(REPO, COMMIT, "vendor/dep/go.mod", b"module dep\n");
    w.repo
        .add_file(REPO, COMMIT, "examples/demo/pom.xml", b"<project/>");
    w.repo.add_file(
        REPO,
        COMMIT,
        "web/node_modules/pkg/tsconfig.json",
        b"{}",
    );

    let outcome = w
        .enqueuer
        .enqueue(REPO, false, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outcome, idx_engine::EnqueueOutcome::NothingToIndex);
    assert!(w.store.indexes().is_empty());
}
