// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-ecosystem enqueue scenarios and orchestrator policies.

use super::support::{world, COMMIT};
use idx_core::{DockerStep, IndexState, RepositoryId};
use idx_engine::EnqueueOutcome;
use similar_asserts::assert_eq;
use tokio_util::sync::CancellationToken;

const REPO: RepositoryId = RepositoryId(1);

#[tokio::test]
async fn go_module_at_repository_root() {
    let w = world();
    w.repo.add_file(REPO, COMMIT, "go.mod", b"module example.com/svc\n");

    let outcome = w
        .enqueuer
        .enqueue(REPO, false, &CancellationToken::new())
        .await
        .unwrap();

    assert!(matches!(outcome, EnqueueOutcome::Queued { .. }));
    let indexes = w.store.indexes();
    assert_eq!(indexes.len(), 1);

    let record = &indexes[0].1;
    assert_eq!(record.repository_id, REPO);
    assert_eq!(record.commit, COMMIT);
    assert_eq!(record.state, IndexState::Queued);
    assert_eq!(record.root, "");
    assert_eq!(record.indexer, "scip-go");
    assert_eq!(
        record.docker_steps,
        vec![DockerStep::new("", "scip-go", ["go mod download"])]
    );
}

#[tokio::test]
async fn java_project_gets_fixed_bootstrap() {
    let w = world();
    w.repo.add_file(REPO, COMMIT, "pom.xml", b"<project/>");

    w.enqueuer
        .enqueue(REPO, false, &CancellationToken::new())
        .await
        .unwrap();

    let indexes = w.store.indexes();
    assert_eq!(indexes.len(), 1);

    let record = &indexes[0].1;
    assert_eq!(record.root, "");
    assert_eq!(record.indexer, "scip-java");
    assert!(record.docker_steps.is_empty());
    assert_eq!(
        record.local_steps,
        vec![
            "curl -fLo coursier https://git.io/coursier-cli".to_string(),
            "chmod +x coursier".to_string(),
            "./coursier setup --yes --jvm 17".to_string(),
            "./coursier install scip-java".to_string(),
        ]
    );
}

#[tokio::test]
async fn typescript_project_with_yarn_lockfile() {
    let w = world();
    w.repo.add_file(REPO, COMMIT, "a/tsconfig.json", b"{}");
    w.repo.add_file(REPO, COMMIT, "a/package.json", b"{}");
    w.repo.add_file(REPO, COMMIT, "a/yarn.lock", b"");

    w.enqueuer
        .enqueue(REPO, false, &CancellationToken::new())
        .await
        .unwrap();

    let indexes = w.store.indexes();
    assert_eq!(indexes.len(), 1);

    let record = &indexes[0].1;
    assert_eq!(record.root, "a");
    assert_eq!(record.indexer, "scip-typescript");
    assert_eq!(
        record.docker_steps,
        vec![DockerStep::new(
            "a",
            "scip-typescript",
            ["yarn --ignore-engines"]
        )]
    );
}

#[tokio::test]
async fn second_enqueue_for_a_commit_is_a_noop() {
    let w = world();
    w.repo.add_file(REPO, COMMIT, "go.mod", b"module example.com/svc\n");
    let cancel = CancellationToken::new();

    w.enqueuer.enqueue(REPO, false, &cancel).await.unwrap();
    let again = w.enqueuer.enqueue(REPO, false, &cancel).await.unwrap();

    assert_eq!(again, EnqueueOutcome::AlreadyQueued);
    assert_eq!(w.store.indexes().len(), 1);
}

#[tokio::test]
async fn database_configuration_wins_over_repository_file() {
    let w = world();
    w.repo.add_file(
        REPO,
        COMMIT,
        "idx.yaml",
        b"indexJobs:\n  - indexer: from-file\n",
    );
    w.store.set_index_configuration(
        REPO,
        br#"{
            // operator-managed override
            "indexJobs": [ { "indexer": "from-database", "root": "svc" } ]
        }"#
        .to_vec(),
    );

    w.enqueuer
        .enqueue(REPO, false, &CancellationToken::new())
        .await
        .unwrap();

    let indexes = w.store.indexes();
    assert_eq!(indexes.len(), 1);
    assert_eq!(indexes[0].1.indexer, "from-database");
    assert_eq!(indexes[0].1.root, "svc");
}

#[tokio::test]
async fn broken_explicit_configuration_never_falls_back() {
    let w = world();
    // inference would find this module, but the broken explicit config wins
    w.repo.add_file(REPO, COMMIT, "go.mod", b"module example.com/svc\n");
    w.store.set_index_configuration(REPO, b"{ \"indexJobs\": [".to_vec());

    let outcome = w
        .enqueuer
        .enqueue(REPO, false, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outcome, EnqueueOutcome::InvalidConfiguration);
    assert!(w.store.indexes().is_empty());
}

#[tokio::test]
async fn runaway_inference_queues_nothing() {
    let w = world();
    for i in 0..30 {
        w.repo.add_file(
            REPO,
            COMMIT,
            &format!("services/svc{i:02}/go.mod"),
            b"module example.com/svc\n",
        );
    }

    let outcome = w
        .enqueuer
        .enqueue(REPO, false, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outcome, EnqueueOutcome::InferenceCapExceeded { inferred: 30 });
    assert!(w.store.indexes().is_empty());
}
