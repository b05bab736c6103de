// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixed recognizer registry and the combined path filter.

use crate::{GoRecognizer, JavaRecognizer, Recognizer, TypeScriptRecognizer};
use indexmap::IndexMap;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Every known recognizer, keyed by ecosystem name and inserted in sorted
/// name order, which is the iteration order wherever output ordering matters.
static REGISTRY: LazyLock<IndexMap<&'static str, Recognizer>> = LazyLock::new(|| {
    IndexMap::from([
        ("go", Recognizer::Go(GoRecognizer)),
        ("java", Recognizer::Java(JavaRecognizer)),
        ("typescript", Recognizer::TypeScript(TypeScriptRecognizer)),
    ])
});

/// The fixed, audited recognizer set.
pub fn recognizers() -> &'static IndexMap<&'static str, Recognizer> {
    &REGISTRY
}

// Allow expect here as the alternation is built from escaped literals
#[allow(clippy::expect_used)]
static PATTERN_UNION: LazyLock<Regex> = LazyLock::new(|| {
    let names: BTreeSet<&str> = REGISTRY
        .values()
        .flat_map(|recognizer| recognizer.patterns().iter().copied())
        .collect();
    let alternation = names
        .iter()
        .map(|name| regex::escape(name))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!("(^|/)({alternation})$")).expect("escaped literal alternation is valid")
});

/// Single alternation over every recognizer's patterns.
///
/// Handed to the repository listing call so large repositories are filtered
/// server-side instead of walked in full.
pub fn pattern_union() -> &'static Regex {
    &PATTERN_UNION
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
