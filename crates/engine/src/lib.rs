//! Bill-of-materials engine for the commerce back office.
//!
//! Lets a composite catalog item declare itself as built from other catalog
//! items or raw-material supplier lines, derives its unit cost and maximum
//! buildable quantity from the components' current state, and reconciles the
//! derived quantity against the external storefront's stock record.
//!
//! The engine owns no storage and no transport: catalog records live behind
//! [`catalog_core::ComponentCatalog`] / [`catalog_core::BomRepository`], the
//! storefront behind [`storefront_core::StorefrontGateway`]. [`BomEngine`]
//! bundles the services behind one constructor so the surrounding
//! request/response layer can hold a single handle.
pub mod batch;
pub mod config;
pub mod resolver;
pub mod rollup;
pub mod session;
pub mod store;
pub mod sync;

use std::sync::Arc;

use catalog_core::{BomRepository, ComponentCatalog};
use storefront_core::StorefrontGateway;

pub use batch::{BatchCoordinator, BatchOutcome, ScopeSave};
pub use config::EngineConfig;
pub use resolver::ComponentResolver;
pub use rollup::{RollupService, ScopeRollup};
pub use session::EditSession;
pub use store::{BomStore, SaveError};
pub use sync::{DriftReport, PushOutcome, SyncError, SyncReconciler};

// Re-exported so callers can use the engine without naming the domain crate.
pub use bom_core::{
    Availability, BomLine, ComponentKind, ComponentRef, ProductId, RollupSummary, Scope,
    SupplierLineId, ValidationError, VariantId,
};

/// The assembled BOM engine: one handle per back-office process.
///
/// Cheap to clone; all services share the same collaborator handles.
#[derive(Clone)]
pub struct BomEngine {
    store: BomStore,
    rollup: RollupService,
    sync: SyncReconciler,
    batch: BatchCoordinator,
}

impl BomEngine {
    /// Wires the engine up from its three external collaborators.
    pub fn new(
        catalog: Arc<dyn ComponentCatalog>,
        repo: Arc<dyn BomRepository>,
        storefront: Arc<dyn StorefrontGateway>,
        config: EngineConfig,
    ) -> Self {
        let resolver = ComponentResolver::new(catalog);
        let store = BomStore::new(repo);
        let rollup = RollupService::new(resolver, store.clone());
        let sync = SyncReconciler::new(rollup.clone(), storefront);
        let batch = BatchCoordinator::new(store.clone(), config.batch_concurrency);

        Self {
            store,
            rollup,
            sync,
            batch,
        }
    }

    /// The validating line-list store.
    pub fn store(&self) -> &BomStore {
        &self.store
    }

    /// The rollup reader.
    pub fn rollup(&self) -> &RollupService {
        &self.rollup
    }

    /// The storefront reconciler.
    pub fn sync(&self) -> &SyncReconciler {
        &self.sync
    }

    /// The batch save coordinator.
    pub fn batch(&self) -> &BatchCoordinator {
        &self.batch
    }

    /// Starts an editor session over this engine's store.
    pub fn edit_session(&self) -> EditSession {
        EditSession::new(self.store.clone())
    }
}
