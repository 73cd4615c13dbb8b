//! References to the catalog entries a composite item is built from.

use serde::{Deserialize, Serialize};

use crate::ids::{ProductId, Scope, SupplierLineId, VariantId};

/// The kind of catalog entry a component reference points at.
///
/// Fieldless mirror of [`ComponentRef`], used for log fields and messages.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    /// A catalog product with its own cost and, if tracked, stock.
    Product,
    /// A concrete variant of a product.
    Variant,
    /// A raw-material supplier entry: cost only, never stock.
    SupplierLine,
}

/// Reference to one catalog entry consumed by a composite item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentRef {
    /// A whole product.
    Product(ProductId),
    /// A specific variant of a product. The variant id is never
    /// [`VariantId::MAIN`]; use [`ComponentRef::variant`] to normalize.
    Variant(ProductId, VariantId),
    /// A supplier raw-material line.
    SupplierLine(SupplierLineId),
}

impl ComponentRef {
    /// Reference to a whole product.
    pub const fn product(id: ProductId) -> Self {
        ComponentRef::Product(id)
    }

    /// Reference to a product variant.
    ///
    /// A [`VariantId::MAIN`] variant id collapses to a product reference so
    /// the two spellings of "the product itself" compare equal.
    pub fn variant(product: ProductId, variant: VariantId) -> Self {
        if variant.is_main() {
            ComponentRef::Product(product)
        } else {
            ComponentRef::Variant(product, variant)
        }
    }

    /// Reference to a supplier raw-material line.
    pub const fn supplier(id: SupplierLineId) -> Self {
        ComponentRef::SupplierLine(id)
    }

    /// The kind of catalog entry this reference points at.
    pub const fn kind(&self) -> ComponentKind {
        match self {
            ComponentRef::Product(_) => ComponentKind::Product,
            ComponentRef::Variant(_, _) => ComponentKind::Variant,
            ComponentRef::SupplierLine(_) => ComponentKind::SupplierLine,
        }
    }

    /// Whether this reference denotes the identity being composed by `scope`.
    ///
    /// A product reference counts as self-reference inside *any* scope owned
    /// by that product: a variant consuming its own parent would double-count
    /// stock it shares with the composite.
    pub fn references_scope(&self, scope: &Scope) -> bool {
        match self {
            ComponentRef::Product(product) => *product == scope.product,
            ComponentRef::Variant(product, variant) => {
                *product == scope.product && *variant == scope.variant
            }
            ComponentRef::SupplierLine(_) => false,
        }
    }
}

impl std::fmt::Display for ComponentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComponentRef::Product(id) => write!(f, "product {id}"),
            ComponentRef::Variant(product, variant) => {
                write!(f, "variant {product}/{variant}")
            }
            ComponentRef::SupplierLine(id) => write!(f, "supplier line {id}"),
        }
    }
}
