// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Path ancestry and directory-segment membership helpers.
//!
//! All paths are `/`-separated and relative to a repository root; the root
//! itself is spelled `""`, never `"."`.

/// Directory name of `path`, with the repository root normalized to `""`.
pub fn dir_without_dot(path: &str) -> String {
    match path.rsplit_once('/') {
        Some((dir, _)) => dir.to_string(),
        None => String::new(),
    }
}

/// Final component of `path`.
pub fn base_name(path: &str) -> &str {
    match path.rsplit_once('/') {
        Some((_, name)) => name,
        None => path,
    }
}

/// Join a directory and a file name, collapsing the repository root.
pub fn join_relative(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{dir}/{name}")
    }
}

/// Ancestor directories of `path` from its immediate parent up to and
/// including the repository root, leaf-to-root. The final element is always
/// `""`.
pub fn ancestor_dirs(path: &str) -> Vec<String> {
    let mut dirs = Vec::new();
    let mut dir = dir_without_dot(path);
    while !dir.is_empty() {
        let parent = dir_without_dot(&dir);
        dirs.push(dir);
        dir = parent;
    }
    dirs.push(String::new());
    dirs
}

/// True if any `/`-separated component of `path` equals `segment`.
pub fn contains_segment(path: &str, segment: &str) -> bool {
    path.split('/').any(|part| part == segment)
}

/// True if no `/`-separated component of `path` appears in `segments`.
///
/// Recognizers use this to keep build artifacts and vendored or test trees
/// from triggering inference.
pub fn contains_no_segments(path: &str, segments: &[&str]) -> bool {
    !segments.iter().any(|segment| contains_segment(path, segment))
}

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;
