//! Engine configuration structures and loaders.
use std::env;

/// Tunables for the BOM engine.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Upper bound on concurrently running scope saves within one batch.
    pub batch_concurrency: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            batch_concurrency: 4,
        }
    }
}

impl EngineConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BOM_BATCH_CONCURRENCY` - Concurrent scope saves per batch (default: 4)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(concurrency) = read_env::<usize>("BOM_BATCH_CONCURRENCY") {
            config.batch_concurrency = concurrency.max(1);
        }

        config
    }
}

fn read_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|value| value.parse().ok())
}
