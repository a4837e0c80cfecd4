use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::LookupError;
use crate::models::Symbol;

/// Current-price source. `Ok(None)` means the symbol is not listed.
#[async_trait]
pub trait PriceLookup: Send + Sync {
    async fn lookup(&self, symbol: &Symbol) -> Result<Option<f64>, LookupError>;
}

pub type SharedLookup = Arc<dyn PriceLookup>;

/// Runs one lookup, treating expiry of `limit` as a failure.
pub async fn lookup_within(
    lookup: &dyn PriceLookup,
    symbol: &Symbol,
    limit: Duration,
) -> Result<Option<f64>, LookupError> {
    match tokio::time::timeout(limit, lookup.lookup(symbol)).await {
        Ok(res) => res,
        Err(_) => Err(LookupError::Timeout(limit)),
    }
}
