//! Rollup reads: load a scope's lines, resolve them, derive cost and stock.

use bom_core::{RollupSummary, Scope, summarize};
use catalog_core::CatalogError;
use serde::{Deserialize, Serialize};

use crate::resolver::ComponentResolver;
use crate::store::BomStore;

/// Derived cost/stock view of one scope, recomputed on every read.
///
/// Never persisted: the storefront's recorded stock stays the system of
/// record until an explicit push.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScopeRollup {
    pub scope: Scope,
    /// Total lines in the scope, including ones that no longer resolve.
    pub line_count: usize,
    pub summary: RollupSummary,
}

/// Computes a scope's composite unit cost and effective buildable stock from
/// its persisted lines and the components' current catalog state.
#[derive(Clone)]
pub struct RollupService {
    resolver: ComponentResolver,
    store: BomStore,
}

impl RollupService {
    pub fn new(resolver: ComponentResolver, store: BomStore) -> Self {
        Self { resolver, store }
    }

    /// Reads the scope's current rollup.
    ///
    /// Lines whose component no longer resolves are excluded from the math
    /// and reported in `summary.missing` for user cleanup.
    pub async fn read(&self, scope: Scope) -> Result<ScopeRollup, CatalogError> {
        let lines = self.store.load(scope).await?;
        let line_count = lines.len();

        let mut resolved = Vec::with_capacity(line_count);
        for line in lines {
            let resolution = self.resolver.resolve(&line.component).await?;
            resolved.push((line, resolution));
        }

        let summary = summarize(&resolved);
        if !summary.missing.is_empty() {
            tracing::warn!(
                %scope,
                missing = summary.missing.len(),
                "rollup computed with stale component lines"
            );
        }
        tracing::debug!(
            %scope,
            unit_cost = %summary.unit_cost,
            effective_stock = %summary.effective_stock,
            "rollup read"
        );

        Ok(ScopeRollup {
            scope,
            line_count,
            summary,
        })
    }
}
