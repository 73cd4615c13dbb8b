//! Stock availability with an explicit "does not constrain" sentinel.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// How much of something is available for assembly.
///
/// `Unbounded` means the source does not constrain buildable stock at all:
/// either stock tracking is disabled for the component, or the component is a
/// supplier line (cost source, never a stock source).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    /// Does not constrain buildable stock.
    Unbounded,
    /// Exactly this many units on hand.
    Units(u64),
}

impl Availability {
    /// Whether this availability places no constraint on assembly.
    pub const fn is_unbounded(&self) -> bool {
        matches!(self, Availability::Unbounded)
    }

    /// The tracked unit count, if any.
    pub const fn units(&self) -> Option<u64> {
        match self {
            Availability::Unbounded => None,
            Availability::Units(units) => Some(*units),
        }
    }

    /// The tighter of two availabilities. `Units` always beats `Unbounded`.
    pub fn min(self, other: Availability) -> Availability {
        match (self, other) {
            (Availability::Unbounded, other) => other,
            (this, Availability::Unbounded) => this,
            (Availability::Units(a), Availability::Units(b)) => Availability::Units(a.min(b)),
        }
    }

    /// How many whole assemblies this availability allows when each one
    /// consumes `effective_quantity` units. Partial units cannot be
    /// assembled, so the result floors.
    ///
    /// A non-positive `effective_quantity` means the line consumes nothing
    /// and therefore cannot constrain; save-time validation rejects such
    /// lines before they reach a rollup.
    pub fn buildable(self, effective_quantity: Decimal) -> Availability {
        match self {
            Availability::Unbounded => Availability::Unbounded,
            Availability::Units(_) if effective_quantity <= Decimal::ZERO => Availability::Unbounded,
            Availability::Units(units) => {
                let assemblies = (Decimal::from(units) / effective_quantity).floor();
                Availability::Units(assemblies.to_u64().unwrap_or(u64::MAX))
            }
        }
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Availability::Unbounded => write!(f, "unbounded"),
            Availability::Units(units) => write!(f, "{units}"),
        }
    }
}
