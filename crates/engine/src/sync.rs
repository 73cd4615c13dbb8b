//! Reconciliation between derived stock and the storefront's record.
//!
//! The storefront's stock is authoritative and customer-visible; this module
//! only ever writes it on an explicit push. Drift checks are read-only.

use std::sync::Arc;

use bom_core::{Availability, Scope};
use catalog_core::CatalogError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storefront_core::{StorefrontError, StorefrontGateway};

use crate::rollup::RollupService;

/// Failures while reconciling a scope against the storefront.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SyncError {
    /// Transient storefront transport failure; the user may retry.
    #[error("storefront unreachable: {reason}")]
    Network { reason: String },

    /// The storefront refused the operation — the record usually no longer
    /// exists there. Terminal; surfaced, never retried automatically.
    #[error("storefront rejected the stock write: {reason}")]
    Rejected { reason: String },

    /// The catalog side failed while computing the effective stock.
    #[error("catalog read failed during reconciliation: {0}")]
    Catalog(#[from] CatalogError),
}

impl SyncError {
    /// Whether the user may sensibly retry the same request.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, SyncError::Network { .. })
    }
}

impl From<StorefrontError> for SyncError {
    fn from(err: StorefrontError) -> Self {
        match err {
            StorefrontError::Network(reason) => SyncError::Network { reason },
            StorefrontError::Rejected(reason) => SyncError::Rejected { reason },
        }
    }
}

/// Read-only comparison of derived stock against the storefront record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DriftReport {
    pub scope: Scope,
    pub effective_stock: Availability,
    /// The storefront's recorded stock; can be negative (oversold).
    pub external_stock: i64,
    /// Unbounded effective stock is always in sync: there is nothing to push.
    pub in_sync: bool,
    pub checked_at: DateTime<Utc>,
}

/// Result of an explicit push.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PushOutcome {
    pub scope: Scope,
    /// The storefront's recorded stock after the push.
    pub new_external_stock: i64,
    /// False when the scope was already in sync and nothing was written.
    pub changed: bool,
}

/// Compares effective buildable stock against the storefront and, on
/// explicit request only, pushes the corrected value.
#[derive(Clone)]
pub struct SyncReconciler {
    rollup: RollupService,
    storefront: Arc<dyn StorefrontGateway>,
}

impl SyncReconciler {
    pub fn new(rollup: RollupService, storefront: Arc<dyn StorefrontGateway>) -> Self {
        Self { rollup, storefront }
    }

    /// Reports drift between the scope's effective stock and the
    /// storefront's record. Read-only.
    pub async fn check_drift(&self, scope: Scope) -> Result<DriftReport, SyncError> {
        let rollup = self.rollup.read(scope).await?;
        let external_stock = self.storefront.stock(scope).await?;

        let effective_stock = rollup.summary.effective_stock;
        let in_sync = match effective_stock {
            Availability::Unbounded => true,
            Availability::Units(units) => {
                i64::try_from(units).is_ok_and(|units| units == external_stock)
            }
        };

        if !in_sync {
            tracing::warn!(
                %scope,
                %effective_stock,
                external_stock,
                "storefront stock has drifted from the derived value"
            );
        }

        Ok(DriftReport {
            scope,
            effective_stock,
            external_stock,
            in_sync,
            checked_at: Utc::now(),
        })
    }

    /// Pushes the derived effective stock to the storefront.
    ///
    /// Manually triggered only. When the scope is already in sync the push
    /// is a no-op success reporting the current external value, so pressing
    /// it repeatedly is safe.
    pub async fn push(&self, scope: Scope) -> Result<PushOutcome, SyncError> {
        let report = self.check_drift(scope).await?;

        if report.in_sync {
            return Ok(PushOutcome {
                scope,
                new_external_stock: report.external_stock,
                changed: false,
            });
        }

        // Unbounded is always in_sync, so a push here has a concrete count.
        let units = match report.effective_stock {
            Availability::Units(units) => units,
            Availability::Unbounded => unreachable!("unbounded stock is always in sync"),
        };

        let new_external_stock = self.storefront.write_stock(scope, units).await?;
        tracing::info!(
            %scope,
            previous = report.external_stock,
            new_external_stock,
            "pushed corrected stock to storefront"
        );

        Ok(PushOutcome {
            scope,
            new_external_stock,
            changed: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bom_core::{BomLine, ComponentRef, ProductId, SupplierLineId};
    use catalog_core::{BomRepository, MockCatalog, ProductRecord, SupplierLineRecord};
    use rust_decimal_macros::dec;
    use storefront_core::{FailureMode, MockStorefront};

    use crate::resolver::ComponentResolver;
    use crate::store::BomStore;

    async fn reconciler_with(stock: u64) -> (SyncReconciler, MockStorefront, MockCatalog) {
        let catalog = MockCatalog::new();
        catalog.insert_product(ProductRecord {
            id: ProductId(2),
            name: "Panel".into(),
            unit_cost: Some(dec!(4.00)),
            misc_costs: Vec::new(),
            manage_stock: true,
            stock_quantity: stock,
        });
        catalog
            .replace_lines(
                Scope::main(ProductId(1)),
                vec![BomLine::new(ComponentRef::product(ProductId(2)), dec!(2))],
            )
            .await
            .unwrap();

        let shared = Arc::new(catalog.clone());
        let rollup = RollupService::new(
            ComponentResolver::new(shared.clone()),
            BomStore::new(shared),
        );
        let storefront = MockStorefront::new();
        let reconciler = SyncReconciler::new(rollup, Arc::new(storefront.clone()));
        (reconciler, storefront, catalog)
    }

    #[tokio::test]
    async fn reports_drift_when_external_disagrees() {
        // 10 panels / 2 per unit = 5 buildable; storefront says 8.
        let (reconciler, storefront, _) = reconciler_with(10).await;
        let scope = Scope::main(ProductId(1));
        storefront.set_stock(scope, 8);

        let report = reconciler.check_drift(scope).await.unwrap();
        assert_eq!(report.effective_stock, Availability::Units(5));
        assert_eq!(report.external_stock, 8);
        assert!(!report.in_sync);
    }

    #[tokio::test]
    async fn push_corrects_drift_then_becomes_a_no_op() {
        let (reconciler, storefront, _) = reconciler_with(10).await;
        let scope = Scope::main(ProductId(1));
        storefront.set_stock(scope, 8);

        let outcome = reconciler.push(scope).await.unwrap();
        assert!(outcome.changed);
        assert_eq!(outcome.new_external_stock, 5);
        assert_eq!(storefront.write_count(), 1);

        // Already in sync: success, no write.
        let outcome = reconciler.push(scope).await.unwrap();
        assert!(!outcome.changed);
        assert_eq!(outcome.new_external_stock, 5);
        assert_eq!(storefront.write_count(), 1);
    }

    #[tokio::test]
    async fn unbounded_effective_stock_is_always_in_sync() {
        let catalog = MockCatalog::new();
        catalog.insert_supplier_line(SupplierLineRecord {
            id: SupplierLineId(1),
            name: "Glue".into(),
            unit_cost: dec!(0.10),
            lead_time_days: 3,
            min_order_quantity: dec!(10),
        });
        let scope = Scope::main(ProductId(1));
        catalog
            .replace_lines(
                scope,
                vec![BomLine::new(
                    ComponentRef::supplier(SupplierLineId(1)),
                    dec!(1),
                )],
            )
            .await
            .unwrap();

        let shared = Arc::new(catalog);
        let rollup = RollupService::new(
            ComponentResolver::new(shared.clone()),
            BomStore::new(shared),
        );
        let storefront = MockStorefront::new();
        storefront.set_stock(scope, -4);
        let reconciler = SyncReconciler::new(rollup, Arc::new(storefront.clone()));

        let report = reconciler.check_drift(scope).await.unwrap();
        assert!(report.in_sync);

        let outcome = reconciler.push(scope).await.unwrap();
        assert!(!outcome.changed);
        assert_eq!(storefront.write_count(), 0);
    }

    #[tokio::test]
    async fn network_failure_is_retryable_rejection_is_not() {
        let (reconciler, storefront, _) = reconciler_with(10).await;
        let scope = Scope::main(ProductId(1));
        storefront.set_stock(scope, 8);

        storefront.set_failure_mode(FailureMode::Network);
        let err = reconciler.push(scope).await.unwrap_err();
        assert!(matches!(err, SyncError::Network { .. }));
        assert!(err.is_retryable());

        storefront.set_failure_mode(FailureMode::Rejected);
        let err = reconciler.push(scope).await.unwrap_err();
        assert!(matches!(err, SyncError::Rejected { .. }));
        assert!(!err.is_retryable());

        // The user retries after the outage clears and the push lands.
        storefront.set_failure_mode(FailureMode::None);
        assert!(reconciler.push(scope).await.unwrap().changed);
    }

    #[tokio::test]
    async fn zero_component_stock_pushes_zero() {
        let (reconciler, storefront, _) = reconciler_with(0).await;
        let scope = Scope::main(ProductId(1));
        storefront.set_stock(scope, 3);

        let outcome = reconciler.push(scope).await.unwrap();
        assert!(outcome.changed);
        assert_eq!(outcome.new_external_stock, 0);
    }
}
