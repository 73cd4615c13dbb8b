//! Pure bill-of-materials domain shared across the engine and collaborators.
//!
//! `bom-core` defines the canonical data model (scopes, component references,
//! lines) and the two rollup derivations (composite unit cost, effective
//! buildable stock) as synchronous, side-effect-free functions. Persistence
//! and remote synchronization live in the surrounding crates; everything here
//! is computable from its arguments alone.
pub mod availability;
pub mod component;
pub mod ids;
pub mod line;
pub mod rollup;
pub mod validate;

pub use availability::Availability;
pub use component::{ComponentKind, ComponentRef};
pub use ids::{ProductId, Scope, SupplierLineId, VariantId};
pub use line::BomLine;
pub use rollup::{LineResolution, ResolvedComponent, RollupSummary, summarize};
pub use validate::{ValidationError, validate_lines};
