// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared spec harness: an enqueuer wired to in-memory collaborators.

use idx_adapters::{FakeRepoClient, FakeRevisionResolver, MemoryStore};
use idx_core::FakeClock;
use idx_engine::{EnqueuerOptions, IndexEnqueuer};
use std::sync::Arc;

pub const COMMIT: &str = "0123456789abcdef0123456789abcdef01234567";

pub struct World {
    pub store: MemoryStore,
    pub repo: FakeRepoClient,
    pub resolver: FakeRevisionResolver,
    pub clock: FakeClock,
    pub enqueuer: IndexEnqueuer<FakeClock>,
}

pub fn world() -> World {
    world_with(EnqueuerOptions::default())
}

pub fn world_with(options: EnqueuerOptions) -> World {
    let store = MemoryStore::new();
    let repo = FakeRepoClient::new();
    let resolver = FakeRevisionResolver::new();
    let clock = FakeClock::new();
    let enqueuer = IndexEnqueuer::new(
        Arc::new(store.clone()),
        Arc::new(repo.clone()),
        clock.clone(),
        options,
    );
    World {
        store,
        repo,
        resolver,
        clock,
        enqueuer,
    }
}
