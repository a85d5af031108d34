//! Version-aware selection of API family implementations.
//!
//! Candidates are registered in an explicit `{max levels -> factory}`
//! table. Resolution is deterministic: sort all declared max levels
//! ascending, take the last candidate whose level does not exceed the
//! requested version, and fall back to the oldest known candidate when the
//! request predates everything. An old, unsupported target is served best
//! by the closest known API shape, so resolution never fails on version
//! grounds.

use super::version::ApiVersion;
use crate::error::{FormforgeError, Result};
use std::sync::Arc;
use tracing::debug;

/// One registered implementation of an API family.
///
/// A single candidate may declare several max levels, e.g. to take over a
/// point release between two of its neighbours.
pub struct ApiCandidate<A: ?Sized> {
    pub max_levels: Vec<ApiVersion>,
    pub factory: fn() -> Arc<A>,
}

/// Candidate table for one API family.
pub struct ApiResolver<A: ?Sized> {
    candidates: Vec<ApiCandidate<A>>,
}

impl<A: ?Sized> Default for ApiResolver<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: ?Sized> ApiResolver<A> {
    pub fn new() -> Self {
        ApiResolver {
            candidates: Vec::new(),
        }
    }

    pub fn with_candidate(
        mut self,
        max_levels: Vec<ApiVersion>,
        factory: fn() -> Arc<A>,
    ) -> Self {
        self.candidates.push(ApiCandidate {
            max_levels,
            factory,
        });
        self
    }

    /// Resolve the binding for a requested version. Fails only when the
    /// family has no candidates at all.
    pub fn resolve(&self, requested: &ApiVersion) -> Result<ApiSpecification<A>> {
        let mut table: Vec<(&ApiVersion, &ApiCandidate<A>)> = self
            .candidates
            .iter()
            .flat_map(|c| c.max_levels.iter().map(move |l| (l, c)))
            .collect();
        if table.is_empty() {
            return Err(FormforgeError::config(
                "No candidates registered for API family",
            ));
        }
        table.sort_by(|a, b| a.0.cmp(b.0));

        // qualifier is already identity-neutral in ApiVersion ordering, so
        // a snapshot selects exactly like its release
        let selected = table
            .iter()
            .rev()
            .find(|(level, _)| *level <= requested)
            .unwrap_or(&table[0]);

        debug!(
            requested = %requested,
            max_level = %selected.0,
            "Resolved API binding"
        );

        Ok(ApiSpecification {
            requested: requested.clone(),
            max_level: selected.0.clone(),
            api: (selected.1.factory)(),
        })
    }
}

/// A resolved, immutable binding of requested version, selected
/// implementation and its max level. Cheap to clone and share across one
/// generation request.
pub struct ApiSpecification<A: ?Sized> {
    requested: ApiVersion,
    max_level: ApiVersion,
    api: Arc<A>,
}

impl<A: ?Sized> Clone for ApiSpecification<A> {
    fn clone(&self) -> Self {
        ApiSpecification {
            requested: self.requested.clone(),
            max_level: self.max_level.clone(),
            api: Arc::clone(&self.api),
        }
    }
}

impl<A: ?Sized> ApiSpecification<A> {
    pub fn requested(&self) -> &ApiVersion {
        &self.requested
    }

    pub fn max_level(&self) -> &ApiVersion {
        &self.max_level
    }

    pub fn api(&self) -> &A {
        &self.api
    }
}

impl<A: ?Sized> std::ops::Deref for ApiSpecification<A> {
    type Target = A;

    fn deref(&self) -> &A {
        &self.api
    }
}
