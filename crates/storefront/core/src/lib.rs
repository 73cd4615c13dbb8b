//! External storefront stock API boundary.
//!
//! The storefront owns the authoritative, customer-visible stock record for
//! every product and variant. This crate defines the read/write trait the
//! sync reconciler talks to, the error taxonomy for that remote boundary,
//! and an in-memory mock with failure injection for tests.
pub mod mock;
pub mod traits;

pub use mock::{FailureMode, MockStorefront};
pub use traits::{StorefrontError, StorefrontGateway};
