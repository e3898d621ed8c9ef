use crate::domain::bundle::Bundle;
use crate::domain::ports::CatalogGateway;
use crate::domain::product::{ProductId, UnitPrice};
use crate::error::{QuoteError, Result};
use crate::interfaces::json::catalog_file::CatalogDocument;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct CatalogState {
    prices: HashMap<ProductId, Decimal>,
    bundles: Vec<Bundle>,
}

/// A thread-safe in-memory product and bundle catalog.
///
/// Bundles are kept in insertion order, which is the order quotes consume
/// them in. Cloning shares the underlying catalog.
#[derive(Default, Clone)]
pub struct InMemoryCatalog {
    state: Arc<RwLock<CatalogState>>,
}

impl InMemoryCatalog {
    /// Creates a new, empty in-memory catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from a parsed document, keeping its bundle order.
    pub async fn from_document(document: CatalogDocument) -> Self {
        document.into_catalog().await
    }

    /// Adds a product or replaces its unit price.
    pub async fn upsert_product(&self, product_id: ProductId, price: Decimal) {
        let mut state = self.state.write().await;
        state.prices.insert(product_id, price);
    }

    /// Appends a bundle after every bundle already in the catalog.
    pub async fn add_bundle(&self, bundle: Bundle) {
        let mut state = self.state.write().await;
        state.bundles.push(bundle);
    }
}

#[async_trait]
impl CatalogGateway for InMemoryCatalog {
    async fn qualifying_bundles(&self, product_ids: &HashSet<ProductId>) -> Result<Vec<Bundle>> {
        let state = self.state.read().await;
        Ok(state
            .bundles
            .iter()
            .filter(|bundle| bundle.qualifies_for(product_ids))
            .cloned()
            .collect())
    }

    async fn unit_prices(&self, product_ids: &HashSet<ProductId>) -> Result<Vec<UnitPrice>> {
        let state = self.state.read().await;
        let mut prices = Vec::with_capacity(product_ids.len());
        let mut missing: Option<ProductId> = None;
        for id in product_ids {
            match state.prices.get(id) {
                Some(&price) => prices.push(UnitPrice::new(*id, price)),
                None => missing = Some(missing.map_or(*id, |current| current.min(*id))),
            }
        }

        match missing {
            Some(id) => Err(QuoteError::ProductNotFound(id)),
            None => Ok(prices),
        }
    }
}
