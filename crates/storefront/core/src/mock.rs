//! Mock storefront for testing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bom_core::Scope;

use crate::traits::{StorefrontError, StorefrontGateway};

/// Which failure the mock should inject on the next calls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailureMode {
    /// Operate normally.
    #[default]
    None,
    /// Every call fails with a transient network error.
    Network,
    /// Every call fails with a terminal rejection.
    Rejected,
}

/// Mock storefront stock API for testing without a remote shop.
///
/// Simulates the stock record in-memory; a scope with no record rejects
/// writes the way a disconnected product would.
#[derive(Clone, Default)]
pub struct MockStorefront {
    stock: Arc<Mutex<HashMap<Scope, i64>>>,
    failure: Arc<Mutex<FailureMode>>,
    writes: Arc<Mutex<u64>>,
}

impl MockStorefront {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the storefront's recorded stock for a scope.
    pub fn set_stock(&self, scope: Scope, quantity: i64) {
        self.stock.lock().unwrap().insert(scope, quantity);
    }

    /// Injects a failure mode for subsequent calls.
    pub fn set_failure_mode(&self, mode: FailureMode) {
        *self.failure.lock().unwrap() = mode;
    }

    /// Number of stock writes accepted so far, for idempotence assertions.
    pub fn write_count(&self) -> u64 {
        *self.writes.lock().unwrap()
    }

    fn check_failure(&self) -> Result<(), StorefrontError> {
        match *self.failure.lock().unwrap() {
            FailureMode::None => Ok(()),
            FailureMode::Network => Err(StorefrontError::Network(
                "injected storefront outage".into(),
            )),
            FailureMode::Rejected => Err(StorefrontError::Rejected(
                "injected storefront rejection".into(),
            )),
        }
    }
}

#[async_trait]
impl StorefrontGateway for MockStorefront {
    async fn stock(&self, scope: Scope) -> Result<i64, StorefrontError> {
        self.check_failure()?;
        self.stock
            .lock()
            .unwrap()
            .get(&scope)
            .copied()
            .ok_or_else(|| StorefrontError::Rejected(format!("no storefront record for {scope}")))
    }

    async fn write_stock(&self, scope: Scope, quantity: u64) -> Result<i64, StorefrontError> {
        self.check_failure()?;
        let mut stock = self.stock.lock().unwrap();
        if !stock.contains_key(&scope) {
            return Err(StorefrontError::Rejected(format!(
                "no storefront record for {scope}"
            )));
        }
        let recorded = quantity as i64;
        stock.insert(scope, recorded);
        *self.writes.lock().unwrap() += 1;
        Ok(recorded)
    }

    async fn health_check(&self) -> Result<(), StorefrontError> {
        self.check_failure()
    }
}
