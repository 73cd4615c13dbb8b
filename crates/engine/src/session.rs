//! Editing session with flush-on-switch semantics.
//!
//! The BOM editor keeps one scope open at a time. Before the open scope's
//! view is torn down — collapsed, or replaced by another scope — its pending
//! line edits must go through the same validating save path a manual save
//! uses, so transient UI state never silently discards unsaved edits.

use bom_core::{BomLine, Scope};

use crate::store::{BomStore, SaveError};

struct OpenScope {
    scope: Scope,
    lines: Vec<BomLine>,
    dirty: bool,
}

/// One editor session over a sequence of scopes.
pub struct EditSession {
    store: BomStore,
    current: Option<OpenScope>,
}

impl EditSession {
    pub fn new(store: BomStore) -> Self {
        Self {
            store,
            current: None,
        }
    }

    /// The scope currently open for editing, if any.
    pub fn current_scope(&self) -> Option<Scope> {
        self.current.as_ref().map(|open| open.scope)
    }

    /// Opens a scope for editing, flushing the previously open scope first.
    ///
    /// Returns the scope's persisted lines as the editing baseline. Fails if
    /// the previous scope's flush is rejected, leaving that scope open so the
    /// user can fix the offending line instead of losing it.
    pub async fn open(&mut self, scope: Scope) -> Result<Vec<BomLine>, SaveError> {
        self.flush().await?;

        let lines = self.store.load(scope).await?;
        self.current = Some(OpenScope {
            scope,
            lines: lines.clone(),
            dirty: false,
        });
        tracing::debug!(%scope, "scope opened for editing");
        Ok(lines)
    }

    /// Replaces the open scope's pending line edits.
    ///
    /// Returns false (and changes nothing) when no scope is open.
    pub fn stage(&mut self, lines: Vec<BomLine>) -> bool {
        match self.current.as_mut() {
            Some(open) => {
                open.lines = lines;
                open.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Saves the open scope's pending edits if there are any.
    ///
    /// A clean scope flushes as a no-op. The scope stays open either way.
    pub async fn flush(&mut self) -> Result<(), SaveError> {
        let Some(open) = self.current.as_mut() else {
            return Ok(());
        };
        if !open.dirty {
            return Ok(());
        }

        self.store.save(open.scope, open.lines.clone()).await?;
        open.dirty = false;
        Ok(())
    }

    /// Flushes and ends the session.
    pub async fn close(mut self) -> Result<(), SaveError> {
        self.flush().await?;
        self.current = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use bom_core::{ComponentRef, ProductId, SupplierLineId, VariantId};
    use catalog_core::MockCatalog;
    use rust_decimal_macros::dec;

    fn session() -> (EditSession, MockCatalog) {
        let catalog = MockCatalog::new();
        let store = BomStore::new(Arc::new(catalog.clone()));
        (EditSession::new(store), catalog)
    }

    fn line(id: u64) -> BomLine {
        BomLine::new(ComponentRef::supplier(SupplierLineId(id)), dec!(1))
    }

    #[tokio::test]
    async fn switching_scopes_flushes_pending_edits() {
        let (mut session, catalog) = session();
        let first = Scope::main(ProductId(1));
        let second = Scope::variant(ProductId(1), VariantId(2));

        session.open(first).await.unwrap();
        assert!(session.stage(vec![line(1)]));

        // Opening the second scope persists the first scope's edits.
        session.open(second).await.unwrap();
        assert_eq!(catalog.persisted_lines(first), vec![line(1)]);
        assert_eq!(session.current_scope(), Some(second));
    }

    #[tokio::test]
    async fn close_flushes_the_final_scope() {
        let (mut session, catalog) = session();
        let scope = Scope::main(ProductId(1));

        session.open(scope).await.unwrap();
        session.stage(vec![line(3)]);
        session.close().await.unwrap();

        assert_eq!(catalog.persisted_lines(scope), vec![line(3)]);
    }

    #[tokio::test]
    async fn clean_scope_flush_is_a_no_op() {
        let (mut session, catalog) = session();
        let scope = Scope::main(ProductId(1));
        catalog
            .insert_product(catalog_core::ProductRecord {
                id: ProductId(1),
                name: "Kit".into(),
                unit_cost: None,
                misc_costs: Vec::new(),
                manage_stock: false,
                stock_quantity: 0,
            });

        session.open(scope).await.unwrap();
        session.flush().await.unwrap();

        // Nothing was staged, so nothing was written.
        assert!(catalog.persisted_lines(scope).is_empty());
    }

    #[tokio::test]
    async fn rejected_flush_keeps_the_scope_open() {
        let (mut session, _) = session();
        let scope = Scope::main(ProductId(1));

        session.open(scope).await.unwrap();
        // Self-reference: the flush will be rejected.
        session.stage(vec![BomLine::new(
            ComponentRef::product(ProductId(1)),
            dec!(1),
        )]);

        let err = session
            .open(Scope::variant(ProductId(1), VariantId(2)))
            .await
            .unwrap_err();
        assert!(matches!(err, SaveError::Validation(_)));
        assert_eq!(session.current_scope(), Some(scope));
    }

    #[tokio::test]
    async fn stage_without_open_scope_is_refused() {
        let (mut session, _) = session();
        assert!(!session.stage(vec![line(1)]));
    }
}
