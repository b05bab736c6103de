// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration resolution precedence.
//!
//! Three independent strategies, evaluated once per enqueue in a strict
//! total order: database-stored configuration, then the in-repository
//! configuration file, then automatic inference. The first source that is
//! *applicable* decides; an applicable-but-malformed explicit source is
//! terminal, never a fallthrough.

use idx_adapters::RepositoryScope;
use idx_core::{Clock, IndexConfiguration, IndexJob, RepositoryId};
use idx_inference::{pattern_union, recognizers, PathSet};

use crate::enqueuer::{EnqueueError, IndexEnqueuer};

/// Outcome of job resolution, before anything touches the store.
pub(crate) enum Resolution {
    /// Some source was applicable and produced this set (possibly empty).
    Jobs(Vec<IndexJob>),
    /// No source was applicable.
    NotApplicable,
    /// An applicable explicit source failed to parse.
    Invalid,
    /// Inference was applicable but blew the safety cap.
    CapExceeded { inferred: usize },
}

impl<C: Clock> IndexEnqueuer<C> {
    pub(crate) async fn resolve_jobs(
        &self,
        repository_id: RepositoryId,
        scope: &RepositoryScope,
    ) -> Result<Resolution, EnqueueError> {
        if let Some(raw) = self.store.get_index_configuration(repository_id).await? {
            return Ok(match IndexConfiguration::from_jsonc(&raw) {
                Ok(config) => Resolution::Jobs(config.into_jobs()),
                Err(error) => {
                    tracing::warn!(
                        %repository_id,
                        %error,
                        "malformed database index configuration; queueing nothing"
                    );
                    Resolution::Invalid
                }
            });
        }

        if scope
            .file_exists(&self.options.repository_config_path)
            .await?
        {
            let raw = scope
                .raw_contents(&self.options.repository_config_path)
                .await?;
            return Ok(match IndexConfiguration::from_yaml(&raw) {
                Ok(config) => Resolution::Jobs(config.into_jobs()),
                Err(error) => {
                    tracing::warn!(
                        %repository_id,
                        path = %self.options.repository_config_path,
                        %error,
                        "malformed in-repository index configuration; queueing nothing"
                    );
                    Resolution::Invalid
                }
            });
        }

        self.infer_jobs(repository_id, scope).await
    }

    /// Automatic inference across the fixed recognizer registry.
    async fn infer_jobs(
        &self,
        repository_id: RepositoryId,
        scope: &RepositoryScope,
    ) -> Result<Resolution, EnqueueError> {
        let paths = PathSet::new(scope.list_files(pattern_union()).await?);

        let mut jobs = Vec::new();
        for (&name, recognizer) in recognizers() {
            if !recognizer.can_index(&paths) {
                continue;
            }
            let inferred = recognizer.infer_index_jobs(&paths, scope).await?;
            tracing::debug!(
                %repository_id,
                ecosystem = name,
                count = inferred.len(),
                "inferred index jobs"
            );
            jobs.extend(inferred);
        }

        if jobs.is_empty() {
            return Ok(Resolution::NotApplicable);
        }
        if jobs.len() > self.options.max_inferred_jobs {
            tracing::warn!(
                %repository_id,
                inferred = jobs.len(),
                cap = self.options.max_inferred_jobs,
                "inferred job count exceeds cap; queueing nothing"
            );
            return Ok(Resolution::CapExceeded {
                inferred: jobs.len(),
            });
        }
        Ok(Resolution::Jobs(jobs))
    }
}
