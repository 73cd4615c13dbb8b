//! Storefront stock API trait and error taxonomy.

use async_trait::async_trait;
use bom_core::Scope;

/// Failures at the storefront boundary.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum StorefrontError {
    /// Transient transport failure; the caller may retry.
    #[error("storefront unreachable: {0}")]
    Network(String),

    /// The storefront refused the operation, typically because the record no
    /// longer exists there or was disconnected. Terminal; do not retry.
    #[error("storefront rejected the request: {0}")]
    Rejected(String),
}

impl StorefrontError {
    /// Whether the user may sensibly retry the same call.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, StorefrontError::Network(_))
    }
}

/// Read/write access to the storefront's stock record for a scope.
///
/// Writing is an authoritative, customer-visible action (overselling if
/// wrong), so callers only write on explicit user request.
#[async_trait]
pub trait StorefrontGateway: Send + Sync {
    /// The storefront's current recorded stock for the scope. Storefronts can
    /// record oversold quantities, so the value may be negative.
    async fn stock(&self, scope: Scope) -> Result<i64, StorefrontError>;

    /// Writes a new stock value for the scope and returns the storefront's
    /// recorded value after the write.
    async fn write_stock(&self, scope: Scope, quantity: u64) -> Result<i64, StorefrontError>;

    /// Verifies connectivity to the storefront.
    async fn health_check(&self) -> Result<(), StorefrontError>;
}
