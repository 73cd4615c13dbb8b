//! Concurrent saving of many scopes as one higher-level operation.
//!
//! A parent save ("save this product and all its variants") persists each
//! scope's BOM alongside the owner's own fields. Scopes are independent
//! transactions: one scope's failure must not block or roll back another's,
//! so the coordinator aggregates per-scope outcomes instead of failing fast.

use std::collections::HashMap;
use std::sync::Arc;

use bom_core::{BomLine, Scope};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::store::{BomStore, SaveError};

/// One scope's proposed full line list within a batch.
#[derive(Clone, Debug, PartialEq)]
pub struct ScopeSave {
    pub scope: Scope,
    pub lines: Vec<BomLine>,
}

impl ScopeSave {
    pub fn new(scope: Scope, lines: Vec<BomLine>) -> Self {
        Self { scope, lines }
    }
}

/// Aggregated per-scope outcomes of a batch save. Never an error itself;
/// the caller surfaces (and may retry) the failed subset.
#[derive(Debug)]
pub struct BatchOutcome {
    /// Scopes whose line lists were persisted, in input order.
    pub succeeded: Vec<Scope>,
    /// Scopes whose saves were rejected or failed, with the reason.
    pub failed: Vec<(Scope, SaveError)>,
}

impl BatchOutcome {
    /// Whether every scope in the batch was persisted.
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Runs per-scope saves concurrently and aggregates their outcomes.
#[derive(Clone)]
pub struct BatchCoordinator {
    store: BomStore,
    max_concurrency: usize,
}

impl BatchCoordinator {
    pub fn new(store: BomStore, max_concurrency: usize) -> Self {
        Self {
            store,
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// Saves every scope in the batch, each through the ordinary validating
    /// save path.
    ///
    /// Saves run concurrently up to the configured limit; they share no
    /// mutable state, so no ordering between scopes is guaranteed or needed.
    /// When the same scope appears more than once the last entry wins
    /// (full-replacement semantics make racing two replacements of one scope
    /// pointless). Outcomes are reported in input order.
    pub async fn save_all(&self, saves: Vec<ScopeSave>) -> BatchOutcome {
        // Dedupe: keep first-occurrence order, last-occurrence lines.
        let mut order: Vec<Scope> = Vec::with_capacity(saves.len());
        let mut pending: HashMap<Scope, Vec<BomLine>> = HashMap::with_capacity(saves.len());
        for save in saves {
            if !pending.contains_key(&save.scope) {
                order.push(save.scope);
            }
            pending.insert(save.scope, save.lines);
        }

        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let mut tasks: JoinSet<(Scope, Result<(), SaveError>)> = JoinSet::new();

        for scope in &order {
            let scope = *scope;
            let lines = pending.remove(&scope).unwrap_or_default();
            let store = self.store.clone();
            let semaphore = semaphore.clone();
            tasks.spawn(async move {
                // Closing the semaphore is impossible here, so acquire only
                // fails if the permit handle is dropped first.
                let _permit = semaphore.acquire().await;
                (scope, store.save(scope, lines).await)
            });
        }

        let mut results: HashMap<Scope, Result<(), SaveError>> =
            HashMap::with_capacity(order.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((scope, result)) => {
                    results.insert(scope, result);
                }
                Err(err) => {
                    // A panicked save task loses its scope tag; surface every
                    // scope still unaccounted for as failed below.
                    tracing::error!(error = %err, "scope save task failed to complete");
                }
            }
        }

        let mut outcome = BatchOutcome {
            succeeded: Vec::new(),
            failed: Vec::new(),
        };
        for scope in order {
            match results.remove(&scope) {
                Some(Ok(())) => outcome.succeeded.push(scope),
                Some(Err(err)) => outcome.failed.push((scope, err)),
                None => outcome.failed.push((
                    scope,
                    SaveError::Repository(catalog_core::CatalogError::Backend(
                        "scope save task did not complete".into(),
                    )),
                )),
            }
        }

        tracing::info!(
            succeeded = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            "batch scope save finished"
        );
        outcome
    }
}
