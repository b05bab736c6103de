// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Explicit index configuration: an operator-authored alternative to inference.
//!
//! The same shape is accepted in two encodings: JSON-with-comments (the
//! database-stored configuration) and YAML (the in-repository file).

use crate::job::{DockerStep, IndexJob};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from decoding an explicit index configuration payload.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("malformed JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// An explicit job set: shared setup steps plus job templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndexConfiguration {
    /// Setup steps shared by every job in the configuration.
    pub shared_steps: Vec<DockerStep>,
    /// Job templates to queue.
    pub index_jobs: Vec<IndexJobSpec>,
}

/// One job template inside an [`IndexConfiguration`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndexJobSpec {
    /// Per-job setup steps, run after the shared ones.
    pub steps: Vec<DockerStep>,
    pub local_steps: Vec<String>,
    pub root: String,
    pub indexer: String,
    pub indexer_args: Vec<String>,
    pub outfile: Option<String>,
}

impl IndexConfiguration {
    /// Decode a JSON-with-comments payload (database-stored configuration).
    pub fn from_jsonc(raw: &[u8]) -> Result<Self, ConfigError> {
        let text = std::str::from_utf8(raw)?;
        Ok(serde_json::from_str(&strip_json_comments(text))?)
    }

    /// Decode a YAML payload (in-repository configuration file).
    pub fn from_yaml(raw: &[u8]) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_slice(raw)?)
    }

    /// Expand the templates into concrete job descriptions.
    ///
    /// Shared steps are repository-root-level, so prepending them to each
    /// job's own steps preserves root-to-leaf step ordering.
    pub fn into_jobs(self) -> Vec<IndexJob> {
        let shared = self.shared_steps;
        self.index_jobs
            .into_iter()
            .map(|spec| spec.into_job(&shared))
            .collect()
    }
}

impl IndexJobSpec {
    fn into_job(self, shared_steps: &[DockerStep]) -> IndexJob {
        let mut docker_steps = shared_steps.to_vec();
        docker_steps.extend(self.steps);
        IndexJob {
            root: self.root,
            indexer: self.indexer,
            indexer_args: self.indexer_args,
            outfile: self.outfile,
            docker_steps,
            local_steps: self.local_steps,
        }
    }
}

/// Drop `//` and `/* */` comments outside string literals.
///
/// Comments only; trailing commas are still rejected by the JSON parser.
fn strip_json_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;
    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '/' if chars.peek() == Some(&'/') => {
                while let Some(&next) = chars.peek() {
                    if next == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
                // keep token boundaries intact
                out.push(' ');
            }
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
