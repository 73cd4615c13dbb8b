//! Component resolution: reference in, current cost and stock out.

use std::sync::Arc;

use bom_core::{Availability, ComponentRef, LineResolution, ResolvedComponent};
use catalog_core::{CatalogError, ComponentCatalog};
use rust_decimal::Decimal;

/// Looks a component reference up in the catalog and answers with its
/// current unit cost and availability. Pure lookup; no derivation.
#[derive(Clone)]
pub struct ComponentResolver {
    catalog: Arc<dyn ComponentCatalog>,
}

impl ComponentResolver {
    pub fn new(catalog: Arc<dyn ComponentCatalog>) -> Self {
        Self { catalog }
    }

    /// Resolves one component reference.
    ///
    /// A reference that no longer exists resolves to
    /// [`LineResolution::Missing`] rather than an error: the line is excluded
    /// from the rollup and flagged for user cleanup. Backend failures are
    /// real errors and propagate.
    pub async fn resolve(
        &self,
        component: &ComponentRef,
    ) -> Result<LineResolution, CatalogError> {
        let resolved = match component {
            ComponentRef::Product(id) => match self.catalog.product(*id).await {
                Ok(record) => ResolvedComponent {
                    unit_cost: record.effective_unit_cost(),
                    stock: record.availability(),
                },
                Err(err) => return self.degrade(component, err),
            },
            ComponentRef::Variant(product, variant) => {
                let record = match self.catalog.variant(*product, *variant).await {
                    Ok(record) => record,
                    Err(err) => return self.degrade(component, err),
                };
                // Cost priority: variant override, then product cost, then 0.
                let base = match record.cost_override {
                    Some(cost) => cost,
                    None => match self.catalog.product(*product).await {
                        Ok(parent) => parent.unit_cost.unwrap_or(Decimal::ZERO),
                        Err(err) if err.is_not_found() => Decimal::ZERO,
                        Err(err) => return Err(err),
                    },
                };
                ResolvedComponent {
                    unit_cost: base + record.misc_total(),
                    stock: record.availability(),
                }
            }
            ComponentRef::SupplierLine(id) => match self.catalog.supplier_line(*id).await {
                Ok(record) => ResolvedComponent {
                    unit_cost: record.unit_cost,
                    // Suppliers are cost sources, never stock sources.
                    stock: Availability::Unbounded,
                },
                Err(err) => return self.degrade(component, err),
            },
        };

        Ok(LineResolution::Resolved(resolved))
    }

    fn degrade(
        &self,
        component: &ComponentRef,
        err: CatalogError,
    ) -> Result<LineResolution, CatalogError> {
        if err.is_not_found() {
            tracing::warn!(%component, "component no longer resolves; excluding line from rollup");
            Ok(LineResolution::Missing)
        } else {
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bom_core::{Availability, ProductId, SupplierLineId, VariantId};
    use catalog_core::{MiscCost, MockCatalog, ProductRecord, SupplierLineRecord, VariantRecord};
    use rust_decimal_macros::dec;

    fn catalog() -> MockCatalog {
        let catalog = MockCatalog::new();
        catalog.insert_product(ProductRecord {
            id: ProductId(1),
            name: "Frame".into(),
            unit_cost: Some(dec!(3.00)),
            misc_costs: vec![MiscCost::new(dec!(0.50), "Handling")],
            manage_stock: true,
            stock_quantity: 12,
        });
        catalog.insert_variant(VariantRecord {
            product: ProductId(1),
            id: VariantId(2),
            cost_override: None,
            misc_costs: Vec::new(),
            manage_stock: true,
            stock_quantity: 4,
        });
        catalog.insert_variant(VariantRecord {
            product: ProductId(1),
            id: VariantId(3),
            cost_override: Some(dec!(9.99)),
            misc_costs: vec![MiscCost::new(dec!(0.01), "Label")],
            manage_stock: false,
            stock_quantity: 0,
        });
        catalog.insert_supplier_line(SupplierLineRecord {
            id: SupplierLineId(7),
            name: "Oak board".into(),
            unit_cost: dec!(1.50),
            lead_time_days: 14,
            min_order_quantity: dec!(25),
        });
        catalog
    }

    fn resolver() -> ComponentResolver {
        ComponentResolver::new(Arc::new(catalog()))
    }

    async fn resolve(resolver: &ComponentResolver, component: ComponentRef) -> ResolvedComponent {
        match resolver.resolve(&component).await.unwrap() {
            LineResolution::Resolved(resolved) => resolved,
            LineResolution::Missing => panic!("{component} should resolve"),
        }
    }

    #[tokio::test]
    async fn product_cost_includes_misc_costs() {
        let resolver = resolver();
        let resolved = resolve(&resolver, ComponentRef::product(ProductId(1))).await;
        assert_eq!(resolved.unit_cost, dec!(3.50));
        assert_eq!(resolved.stock, Availability::Units(12));
    }

    #[tokio::test]
    async fn variant_without_override_falls_back_to_product_cost() {
        let resolver = resolver();
        let resolved =
            resolve(&resolver, ComponentRef::variant(ProductId(1), VariantId(2))).await;
        // Parent base cost only; the parent's misc costs belong to the parent.
        assert_eq!(resolved.unit_cost, dec!(3.00));
        assert_eq!(resolved.stock, Availability::Units(4));
    }

    #[tokio::test]
    async fn variant_override_wins_and_untracked_stock_is_unbounded() {
        let resolver = resolver();
        let resolved =
            resolve(&resolver, ComponentRef::variant(ProductId(1), VariantId(3))).await;
        assert_eq!(resolved.unit_cost, dec!(10.00));
        assert_eq!(resolved.stock, Availability::Unbounded);
    }

    #[tokio::test]
    async fn supplier_line_is_cost_only() {
        let resolver = resolver();
        let resolved = resolve(&resolver, ComponentRef::supplier(SupplierLineId(7))).await;
        assert_eq!(resolved.unit_cost, dec!(1.50));
        assert_eq!(resolved.stock, Availability::Unbounded);
    }

    #[tokio::test]
    async fn deleted_component_degrades_to_missing() {
        let resolver = resolver();
        let resolution = resolver
            .resolve(&ComponentRef::product(ProductId(999)))
            .await
            .unwrap();
        assert_eq!(resolution, LineResolution::Missing);
    }

    #[tokio::test]
    async fn backend_failure_propagates() {
        let catalog = catalog();
        catalog.set_backend_down(true);
        let resolver = ComponentResolver::new(Arc::new(catalog));
        let err = resolver
            .resolve(&ComponentRef::product(ProductId(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Backend(_)));
    }
}
