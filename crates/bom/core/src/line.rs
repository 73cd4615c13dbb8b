//! One component line within a scope's bill of materials.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::component::ComponentRef;

/// One component entry within a scope.
///
/// `quantity_per_unit` is how much of the component one assembled unit
/// consumes; `waste_factor` is the fractional overage on top of that
/// (0.05 = 5% extra consumed per unit built). Line order within a scope is
/// preserved for display but has no computational meaning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BomLine {
    pub component: ComponentRef,
    pub quantity_per_unit: Decimal,
    #[serde(default)]
    pub waste_factor: Decimal,
}

impl BomLine {
    /// Line with no waste.
    pub fn new(component: ComponentRef, quantity_per_unit: Decimal) -> Self {
        Self {
            component,
            quantity_per_unit,
            waste_factor: Decimal::ZERO,
        }
    }

    /// Line with a fractional waste factor.
    pub fn with_waste(
        component: ComponentRef,
        quantity_per_unit: Decimal,
        waste_factor: Decimal,
    ) -> Self {
        Self {
            component,
            quantity_per_unit,
            waste_factor,
        }
    }

    /// Real consumption per assembled unit: `quantity × (1 + waste)`.
    pub fn effective_quantity(&self) -> Decimal {
        self.quantity_per_unit * (Decimal::ONE + self.waste_factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;
    use rust_decimal_macros::dec;

    #[test]
    fn effective_quantity_applies_waste_multiplicatively() {
        let line = BomLine::with_waste(
            ComponentRef::product(ProductId(1)),
            dec!(2),
            dec!(0.1),
        );
        assert_eq!(line.effective_quantity(), dec!(2.2));
    }

    #[test]
    fn zero_waste_leaves_quantity_unchanged() {
        let line = BomLine::new(ComponentRef::product(ProductId(1)), dec!(3.5));
        assert_eq!(line.effective_quantity(), dec!(3.5));
    }
}
