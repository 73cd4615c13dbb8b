//! Validating store for per-scope line lists.
//!
//! Every save validates the *proposed* full line set — synchronous rules
//! first, then the nested-composition point lookups — before handing the
//! replacement to the repository. Either the whole new list is persisted or
//! nothing changes.

use std::sync::Arc;

use bom_core::{BomLine, Scope, ValidationError, validate_lines};
use catalog_core::{BomRepository, CatalogError};

/// Failures of a scope save.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SaveError {
    /// The proposed line set violates a structural invariant; nothing was
    /// written.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The catalog repository failed; the scope's previous lines remain.
    #[error("catalog repository failure: {0}")]
    Repository(#[from] CatalogError),
}

/// Persists and loads per-scope component line lists, enforcing the
/// structural invariants at write time.
#[derive(Clone)]
pub struct BomStore {
    repo: Arc<dyn BomRepository>,
}

impl BomStore {
    pub fn new(repo: Arc<dyn BomRepository>) -> Self {
        Self { repo }
    }

    /// Replaces the scope's entire line list.
    ///
    /// Validates self-reference, quantity/waste bounds, and duplicates
    /// synchronously, then checks each component against the
    /// nested-composition rule with a repository point lookup. On any
    /// violation the whole save is rejected with the specific rule and the
    /// previously persisted lines are untouched.
    pub async fn save(&self, scope: Scope, lines: Vec<BomLine>) -> Result<(), SaveError> {
        validate_lines(&scope, &lines)?;

        for line in &lines {
            if self.repo.component_owns_lines(&line.component).await? {
                return Err(ValidationError::NestedComposition {
                    component: line.component,
                }
                .into());
            }
        }

        let line_count = lines.len();
        self.repo.replace_lines(scope, lines).await?;
        tracing::info!(%scope, line_count, "bill of materials saved");
        Ok(())
    }

    /// The scope's current line list; empty when never saved.
    pub async fn load(&self, scope: Scope) -> Result<Vec<BomLine>, CatalogError> {
        self.repo.load_lines(scope).await
    }

    /// Triggers the catalog store's cascade delete of the scope's lines.
    ///
    /// Called when the owning product or variant is deleted; the storage
    /// cascade itself belongs to the catalog store.
    pub async fn purge(&self, scope: Scope) -> Result<(), CatalogError> {
        self.repo.delete_scope(scope).await?;
        tracing::info!(%scope, "bill of materials purged with its owner");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bom_core::{ComponentRef, ProductId, SupplierLineId, VariantId};
    use catalog_core::MockCatalog;
    use rust_decimal_macros::dec;

    fn store_with_catalog() -> (BomStore, MockCatalog) {
        let catalog = MockCatalog::new();
        (BomStore::new(Arc::new(catalog.clone())), catalog)
    }

    fn line(component: ComponentRef) -> BomLine {
        BomLine::new(component, dec!(1))
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let (store, _) = store_with_catalog();
        let scope = Scope::main(ProductId(1));
        let lines = vec![
            line(ComponentRef::product(ProductId(2))),
            line(ComponentRef::supplier(SupplierLineId(3))),
        ];

        store.save(scope, lines.clone()).await.unwrap();
        assert_eq!(store.load(scope).await.unwrap(), lines);
    }

    #[tokio::test]
    async fn save_is_a_full_replacement() {
        let (store, _) = store_with_catalog();
        let scope = Scope::main(ProductId(1));

        store
            .save(scope, vec![line(ComponentRef::product(ProductId(2)))])
            .await
            .unwrap();
        store
            .save(scope, vec![line(ComponentRef::product(ProductId(3)))])
            .await
            .unwrap();

        let loaded = store.load(scope).await.unwrap();
        assert_eq!(loaded, vec![line(ComponentRef::product(ProductId(3)))]);
    }

    #[tokio::test]
    async fn nested_composition_is_rejected_and_state_unchanged() {
        let (store, catalog) = store_with_catalog();

        // Product 5 owns a non-empty scope of its own.
        store
            .save(
                Scope::main(ProductId(5)),
                vec![line(ComponentRef::supplier(SupplierLineId(1)))],
            )
            .await
            .unwrap();

        let scope = Scope::main(ProductId(1));
        let previous = vec![line(ComponentRef::product(ProductId(2)))];
        store.save(scope, previous.clone()).await.unwrap();

        let err = store
            .save(scope, vec![line(ComponentRef::product(ProductId(5)))])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SaveError::Validation(ValidationError::NestedComposition { .. })
        ));

        // The rejected save must not have touched the persisted lines.
        assert_eq!(catalog.persisted_lines(scope), previous);
    }

    #[tokio::test]
    async fn self_reference_is_rejected() {
        let (store, _) = store_with_catalog();
        let scope = Scope::variant(ProductId(1), VariantId(4));

        let err = store
            .save(
                scope,
                vec![line(ComponentRef::variant(ProductId(1), VariantId(4)))],
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SaveError::Validation(ValidationError::SelfReference { .. })
        ));
        assert!(store.load(scope).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_save_clears_the_scope() {
        let (store, _) = store_with_catalog();
        let scope = Scope::main(ProductId(1));

        store
            .save(scope, vec![line(ComponentRef::product(ProductId(2)))])
            .await
            .unwrap();
        store.save(scope, Vec::new()).await.unwrap();

        assert!(store.load(scope).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn purge_drops_the_scope() {
        let (store, catalog) = store_with_catalog();
        let scope = Scope::main(ProductId(1));

        store
            .save(scope, vec![line(ComponentRef::product(ProductId(2)))])
            .await
            .unwrap();
        store.purge(scope).await.unwrap();

        assert!(catalog.persisted_lines(scope).is_empty());
    }
}
