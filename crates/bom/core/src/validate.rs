//! Structural validation of a proposed line set.
//!
//! These are the synchronous rules: self-reference, quantity/waste bounds,
//! and duplicate components. The nested-composition rule needs a repository
//! lookup (does the candidate component own lines of its own?) and is
//! enforced by the store on top of these, before anything is written.

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::component::ComponentRef;
use crate::ids::Scope;
use crate::line::BomLine;

/// The specific invariant a proposed save violates.
///
/// Every variant carries the offending component so the UI can point at the
/// exact line. A violation rejects the entire save; no partial line list is
/// ever persisted.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{component} is the item being composed; a composite cannot consume itself")]
    SelfReference { component: ComponentRef },

    #[error("{component} owns a bill of materials of its own; composition is one level deep")]
    NestedComposition { component: ComponentRef },

    #[error("{component} has non-positive quantity per unit ({quantity})")]
    InvalidQuantity {
        component: ComponentRef,
        quantity: Decimal,
    },

    #[error("{component} has negative waste factor ({waste})")]
    NegativeWaste {
        component: ComponentRef,
        waste: Decimal,
    },

    #[error("{component} appears more than once in the scope")]
    DuplicateComponent { component: ComponentRef },
}

/// Checks the synchronous invariants for a proposed full line set.
///
/// Returns the first violation in line order, or `Ok` when the set is
/// structurally sound. An empty line set is valid.
pub fn validate_lines(scope: &Scope, lines: &[BomLine]) -> Result<(), ValidationError> {
    let mut seen: HashSet<ComponentRef> = HashSet::with_capacity(lines.len());

    for line in lines {
        if line.component.references_scope(scope) {
            return Err(ValidationError::SelfReference {
                component: line.component,
            });
        }
        if line.quantity_per_unit <= Decimal::ZERO {
            return Err(ValidationError::InvalidQuantity {
                component: line.component,
                quantity: line.quantity_per_unit,
            });
        }
        if line.waste_factor < Decimal::ZERO {
            return Err(ValidationError::NegativeWaste {
                component: line.component,
                waste: line.waste_factor,
            });
        }
        if !seen.insert(line.component) {
            return Err(ValidationError::DuplicateComponent {
                component: line.component,
            });
        }
    }

    Ok(())
}
