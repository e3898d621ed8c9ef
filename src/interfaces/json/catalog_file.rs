//! JSON catalog documents.
//!
//! A document lists products with their unit prices and bundles with their
//! components. Bundle order in the document is the order quotes consume them.

use crate::domain::bundle::{Bundle, BundleComponent, BundleId};
use crate::domain::product::ProductId;
use crate::error::{QuoteError, Result};
use crate::infrastructure::in_memory::InMemoryCatalog;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductEntry {
    pub id: ProductId,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentEntry {
    pub product: ProductId,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleEntry {
    #[serde(default)]
    pub id: Option<BundleId>,
    pub price: Decimal,
    pub components: Vec<ComponentEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub products: Vec<ProductEntry>,
    #[serde(default)]
    pub bundles: Vec<BundleEntry>,
}

impl CatalogDocument {
    pub fn from_reader<R: Read>(source: R) -> Result<Self> {
        let document: Self = serde_json::from_reader(source)?;
        document.validate()?;
        Ok(document)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Rejects negative prices.
    pub fn validate(&self) -> Result<()> {
        if let Some(product) = self.products.iter().find(|p| p.price < Decimal::ZERO) {
            return Err(QuoteError::ValidationError(format!(
                "product {} has negative price {}",
                product.id, product.price
            )));
        }
        if let Some(bundle) = self.bundles.iter().find(|b| b.price < Decimal::ZERO) {
            return Err(QuoteError::ValidationError(format!(
                "bundle has negative price {}",
                bundle.price
            )));
        }
        Ok(())
    }

    /// Loads the document into an in-memory catalog, keeping bundle order.
    pub async fn into_catalog(self) -> InMemoryCatalog {
        let catalog = InMemoryCatalog::new();
        for product in self.products {
            catalog.upsert_product(product.id, product.price).await;
        }
        for entry in self.bundles {
            catalog.add_bundle(entry.into()).await;
        }
        catalog
    }
}

impl From<BundleEntry> for Bundle {
    fn from(entry: BundleEntry) -> Self {
        Self {
            id: entry.id.unwrap_or_default(),
            price: entry.price,
            components: entry
                .components
                .into_iter()
                .map(|c| BundleComponent::new(c.product, c.quantity))
                .collect(),
        }
    }
}
