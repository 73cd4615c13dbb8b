//! The two rollup derivations: composite unit cost and effective stock.
//!
//! Both are pure functions of a scope's lines and their resolved cost/stock.
//! Neither result is ever persisted; the engine recomputes them on every
//! read, and the storefront's recorded stock stays the system of record
//! until an explicit push.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::availability::Availability;
use crate::component::ComponentRef;
use crate::line::BomLine;

/// A component's current cost and stock, as answered by the resolver.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResolvedComponent {
    /// Cost of consuming one unit of the component.
    pub unit_cost: Decimal,
    /// Tracked on-hand quantity, or `Unbounded` when the component does not
    /// constrain assembly (untracked product, or any supplier line).
    pub stock: Availability,
}

/// Outcome of resolving one line's component reference.
///
/// A component that no longer exists is carried as `Missing`: the line is
/// excluded from the math and flagged for cleanup, never a hard error that
/// blocks the whole rollup.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum LineResolution {
    Resolved(ResolvedComponent),
    Missing,
}

/// Derived cost and stock for one scope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RollupSummary {
    /// `Σ quantity × (1 + waste) × unit cost` over resolved lines.
    pub unit_cost: Decimal,
    /// Minimum over stock-tracked lines of how many assemblies their stock
    /// allows; `Unbounded` when no line constrains.
    pub effective_stock: Availability,
    /// Components that no longer resolve, in line order.
    pub missing: Vec<ComponentRef>,
}

impl RollupSummary {
    /// Summary of a scope with no lines: costs nothing, constrains nothing.
    pub fn empty() -> Self {
        Self {
            unit_cost: Decimal::ZERO,
            effective_stock: Availability::Unbounded,
            missing: Vec::new(),
        }
    }
}

/// Rolls a scope's resolved lines up into composite unit cost and effective
/// buildable stock.
///
/// Missing lines contribute to neither figure. A scope whose every line is
/// unbounded (supplier-only, or nothing tracked) yields unbounded stock; any
/// tracked component at zero stock pins the result to zero.
pub fn summarize(lines: &[(BomLine, LineResolution)]) -> RollupSummary {
    let mut summary = RollupSummary::empty();

    for (line, resolution) in lines {
        let resolved = match resolution {
            LineResolution::Resolved(resolved) => resolved,
            LineResolution::Missing => {
                summary.missing.push(line.component);
                continue;
            }
        };

        let effective_quantity = line.effective_quantity();
        summary.unit_cost += effective_quantity * resolved.unit_cost;
        summary.effective_stock = summary
            .effective_stock
            .min(resolved.stock.buildable(effective_quantity));
    }

    summary
}
