//! Record types exchanged with the catalog store.

use bom_core::{Availability, ProductId, SupplierLineId, VariantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A per-unit miscellaneous cost attached to a product or variant
/// (handling, labels, packaging) on top of its base cost of goods.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MiscCost {
    pub amount: Decimal,
    pub note: String,
}

impl MiscCost {
    pub fn new(amount: Decimal, note: impl Into<String>) -> Self {
        Self {
            amount,
            note: note.into(),
        }
    }
}

fn misc_total(misc_costs: &[MiscCost]) -> Decimal {
    misc_costs.iter().map(|cost| cost.amount).sum()
}

/// Current cost/stock snapshot of a catalog product.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    /// Base cost of goods for one unit. `None` when never configured; such a
    /// component contributes zero cost but still constrains stock.
    pub unit_cost: Option<Decimal>,
    /// Extra per-unit costs on top of the base cost.
    #[serde(default)]
    pub misc_costs: Vec<MiscCost>,
    /// Whether the storefront tracks on-hand quantity for this product.
    pub manage_stock: bool,
    /// On-hand quantity; meaningful only when `manage_stock` is set.
    pub stock_quantity: u64,
}

impl ProductRecord {
    /// Base cost plus all miscellaneous per-unit costs.
    pub fn effective_unit_cost(&self) -> Decimal {
        self.unit_cost.unwrap_or(Decimal::ZERO) + misc_total(&self.misc_costs)
    }

    /// Stock as seen by the rollup: tracked quantity, or unbounded when
    /// stock tracking is disabled.
    pub fn availability(&self) -> Availability {
        if self.manage_stock {
            Availability::Units(self.stock_quantity)
        } else {
            Availability::Unbounded
        }
    }
}

/// Current cost/stock snapshot of a product variant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VariantRecord {
    pub product: ProductId,
    pub id: VariantId,
    /// Variant-level cost override. `None` falls back to the parent
    /// product's base cost.
    pub cost_override: Option<Decimal>,
    #[serde(default)]
    pub misc_costs: Vec<MiscCost>,
    pub manage_stock: bool,
    pub stock_quantity: u64,
}

impl VariantRecord {
    /// Stock as seen by the rollup, from the variant's own tracking flag.
    pub fn availability(&self) -> Availability {
        if self.manage_stock {
            Availability::Units(self.stock_quantity)
        } else {
            Availability::Unbounded
        }
    }

    /// This variant's miscellaneous per-unit cost total.
    pub fn misc_total(&self) -> Decimal {
        misc_total(&self.misc_costs)
    }
}

/// A raw-material supplier catalog entry.
///
/// Suppliers carry cost, lead time, and minimum order quantity only; they are
/// never stock sources, so a supplier component never constrains buildable
/// stock.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SupplierLineRecord {
    pub id: SupplierLineId,
    pub name: String,
    pub unit_cost: Decimal,
    pub lead_time_days: u32,
    pub min_order_quantity: Decimal,
}
