//! Mock catalog store for testing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bom_core::{BomLine, ComponentRef, ProductId, Scope, SupplierLineId, VariantId};

use crate::traits::{BomRepository, CatalogError, ComponentCatalog};
use crate::types::{ProductRecord, SupplierLineRecord, VariantRecord};

/// Mock catalog store for testing without a real back office.
///
/// Simulates both the component catalog and the line repository in-memory.
#[derive(Clone, Default)]
pub struct MockCatalog {
    products: Arc<Mutex<HashMap<ProductId, ProductRecord>>>,
    variants: Arc<Mutex<HashMap<(ProductId, VariantId), VariantRecord>>>,
    suppliers: Arc<Mutex<HashMap<SupplierLineId, SupplierLineRecord>>>,
    lines: Arc<Mutex<HashMap<Scope, Vec<BomLine>>>>,
    backend_down: Arc<Mutex<bool>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_product(&self, record: ProductRecord) {
        self.products.lock().unwrap().insert(record.id, record);
    }

    pub fn insert_variant(&self, record: VariantRecord) {
        self.variants
            .lock()
            .unwrap()
            .insert((record.product, record.id), record);
    }

    pub fn insert_supplier_line(&self, record: SupplierLineRecord) {
        self.suppliers.lock().unwrap().insert(record.id, record);
    }

    /// Removes a product, simulating deletion after it was added to a BOM.
    pub fn remove_product(&self, id: ProductId) {
        self.products.lock().unwrap().remove(&id);
    }

    /// Adjusts a product's on-hand quantity in place.
    pub fn set_product_stock(&self, id: ProductId, quantity: u64) {
        if let Some(record) = self.products.lock().unwrap().get_mut(&id) {
            record.stock_quantity = quantity;
        }
    }

    /// Adjusts a variant's on-hand quantity in place.
    pub fn set_variant_stock(&self, product: ProductId, variant: VariantId, quantity: u64) {
        if let Some(record) = self.variants.lock().unwrap().get_mut(&(product, variant)) {
            record.stock_quantity = quantity;
        }
    }

    /// Makes every catalog call fail with a backend error until cleared.
    pub fn set_backend_down(&self, down: bool) {
        *self.backend_down.lock().unwrap() = down;
    }

    /// The scope's currently persisted lines, for assertions.
    pub fn persisted_lines(&self, scope: Scope) -> Vec<BomLine> {
        self.lines
            .lock()
            .unwrap()
            .get(&scope)
            .cloned()
            .unwrap_or_default()
    }

    fn check_backend(&self) -> Result<(), CatalogError> {
        if *self.backend_down.lock().unwrap() {
            Err(CatalogError::Backend("injected catalog outage".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ComponentCatalog for MockCatalog {
    async fn product(&self, id: ProductId) -> Result<ProductRecord, CatalogError> {
        self.check_backend()?;
        self.products
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(CatalogError::ProductNotFound(id))
    }

    async fn variant(
        &self,
        product: ProductId,
        variant: VariantId,
    ) -> Result<VariantRecord, CatalogError> {
        self.check_backend()?;
        self.variants
            .lock()
            .unwrap()
            .get(&(product, variant))
            .cloned()
            .ok_or(CatalogError::VariantNotFound(product, variant))
    }

    async fn supplier_line(
        &self,
        id: SupplierLineId,
    ) -> Result<SupplierLineRecord, CatalogError> {
        self.check_backend()?;
        self.suppliers
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(CatalogError::SupplierLineNotFound(id))
    }
}

#[async_trait]
impl BomRepository for MockCatalog {
    async fn load_lines(&self, scope: Scope) -> Result<Vec<BomLine>, CatalogError> {
        self.check_backend()?;
        Ok(self.persisted_lines(scope))
    }

    async fn replace_lines(&self, scope: Scope, lines: Vec<BomLine>) -> Result<(), CatalogError> {
        self.check_backend()?;
        self.lines.lock().unwrap().insert(scope, lines);
        Ok(())
    }

    async fn component_owns_lines(&self, component: &ComponentRef) -> Result<bool, CatalogError> {
        self.check_backend()?;
        let owned_scope = match component {
            ComponentRef::Product(product) => Scope::main(*product),
            ComponentRef::Variant(product, variant) => Scope::variant(*product, *variant),
            ComponentRef::SupplierLine(_) => return Ok(false),
        };
        Ok(self
            .lines
            .lock()
            .unwrap()
            .get(&owned_scope)
            .is_some_and(|lines| !lines.is_empty()))
    }

    async fn delete_scope(&self, scope: Scope) -> Result<(), CatalogError> {
        self.check_backend()?;
        self.lines.lock().unwrap().remove(&scope);
        Ok(())
    }
}
