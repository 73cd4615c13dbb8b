//! Async traits for the catalog store collaborators.

use async_trait::async_trait;
use bom_core::{BomLine, ComponentRef, ProductId, Scope, SupplierLineId, VariantId};

use crate::types::{ProductRecord, SupplierLineRecord, VariantRecord};

/// Failures at the catalog store boundary.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    #[error("variant {0}/{1} not found")]
    VariantNotFound(ProductId, VariantId),

    #[error("supplier line {0} not found")]
    SupplierLineNotFound(SupplierLineId),

    #[error("catalog backend failure: {0}")]
    Backend(String),
}

impl CatalogError {
    /// Whether this error means "the referenced record no longer exists",
    /// as opposed to a backend failure. Not-found resolutions degrade to a
    /// flagged missing line instead of failing the rollup.
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            CatalogError::ProductNotFound(_)
                | CatalogError::VariantNotFound(_, _)
                | CatalogError::SupplierLineNotFound(_)
        )
    }
}

/// Read access to current component cost and stock.
///
/// Pure lookups: no derivation happens behind this trait.
#[async_trait]
pub trait ComponentCatalog: Send + Sync {
    /// Current snapshot of a product.
    async fn product(&self, id: ProductId) -> Result<ProductRecord, CatalogError>;

    /// Current snapshot of a product variant.
    async fn variant(
        &self,
        product: ProductId,
        variant: VariantId,
    ) -> Result<VariantRecord, CatalogError>;

    /// Current snapshot of a supplier raw-material line.
    async fn supplier_line(&self, id: SupplierLineId) -> Result<SupplierLineRecord, CatalogError>;
}

/// Persistence of per-scope component line lists.
///
/// The catalog store owns the storage; this core owns the invariants checked
/// before anything is written through it.
#[async_trait]
pub trait BomRepository: Send + Sync {
    /// The scope's current line list; empty when the scope has never been
    /// saved.
    async fn load_lines(&self, scope: Scope) -> Result<Vec<BomLine>, CatalogError>;

    /// Atomically replaces the scope's entire line list. Either the full new
    /// list is persisted or nothing changes.
    async fn replace_lines(&self, scope: Scope, lines: Vec<BomLine>) -> Result<(), CatalogError>;

    /// Whether the referenced component owns a non-empty scope of its own.
    ///
    /// Point lookup, not a traversal: composition is one level deep, so a
    /// component can never transitively own lines. Supplier lines never own
    /// a scope.
    async fn component_owns_lines(&self, component: &ComponentRef) -> Result<bool, CatalogError>;

    /// Cascade hook: drops the scope's line list when its owner is deleted.
    async fn delete_scope(&self, scope: Scope) -> Result<(), CatalogError>;
}
