use super::bundle::Bundle;
use super::product::{ProductId, UnitPrice};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

/// Read-only catalog lookups the quote engine depends on.
///
/// Implementations report infrastructure failures as
/// `QuoteError::CatalogUnavailable` and own any retry policy.
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// Bundles whose every component product is in `product_ids`.
    ///
    /// Quantities are not checked here. The returned order is the order in
    /// which the engine consumes the bundles.
    async fn qualifying_bundles(&self, product_ids: &HashSet<ProductId>) -> Result<Vec<Bundle>>;

    /// Unit prices for every id in `product_ids`.
    ///
    /// Fails with `QuoteError::ProductNotFound` if any id cannot be priced.
    async fn unit_prices(&self, product_ids: &HashSet<ProductId>) -> Result<Vec<UnitPrice>>;
}

pub type CatalogGatewayRef = Arc<dyn CatalogGateway>;
