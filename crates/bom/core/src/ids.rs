//! Identifier newtypes and the scope key.
//!
//! Catalog ids are the storefront's numeric ids, so every wrapper is a plain
//! `u64`. [`Scope`] is the identity of *what is being composed* and the unit
//! of save/read/sync for component lines.

use serde::{Deserialize, Serialize};

/// Storefront-assigned id of a catalog product.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Storefront-assigned id of a product variant.
///
/// [`VariantId::MAIN`] (zero) denotes the main product itself rather than a
/// concrete variant.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct VariantId(pub u64);

impl VariantId {
    /// Sentinel for "the main product itself".
    pub const MAIN: VariantId = VariantId(0);

    /// Whether this id denotes the main product rather than a variant.
    #[inline]
    pub const fn is_main(self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for VariantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Id of a raw-material supplier catalog entry.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SupplierLineId(pub u64);

impl std::fmt::Display for SupplierLineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of one bill of materials: the owning product plus the owning
/// variant, where [`VariantId::MAIN`] means the product itself.
///
/// A scope owns an ordered list of component lines and is the unit of
/// save, rollup, and storefront synchronization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Scope {
    pub product: ProductId,
    pub variant: VariantId,
}

impl Scope {
    /// Scope of the main product itself.
    pub const fn main(product: ProductId) -> Self {
        Self {
            product,
            variant: VariantId::MAIN,
        }
    }

    /// Scope of a specific variant of a product.
    pub const fn variant(product: ProductId, variant: VariantId) -> Self {
        Self { product, variant }
    }

    /// Whether this scope composes the main product rather than a variant.
    pub const fn is_main(&self) -> bool {
        self.variant.is_main()
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_main() {
            write!(f, "P{}", self.product)
        } else {
            write!(f, "P{}/V{}", self.product, self.variant)
        }
    }
}
