use super::product::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BundleId(pub Uuid);

impl BundleId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BundleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BundleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One product slot of a bundle.
///
/// A `required_quantity` of zero is a malformed definition; the matcher stops
/// scanning a bundle when it meets one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleComponent {
    pub product_id: ProductId,
    pub required_quantity: u32,
}

impl BundleComponent {
    pub fn new(product_id: ProductId, required_quantity: u32) -> Self {
        Self {
            product_id,
            required_quantity,
        }
    }
}

/// A composite catalog entry selling several products at a combined price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    pub id: BundleId,
    pub price: Decimal,
    pub components: Vec<BundleComponent>,
}

impl Bundle {
    pub fn new(price: Decimal, components: Vec<BundleComponent>) -> Self {
        Self {
            id: BundleId::new(),
            price,
            components,
        }
    }

    /// Returns true when every component product is among `product_ids`.
    ///
    /// Only set membership is checked, never quantities. A bundle without
    /// components never qualifies.
    pub fn qualifies_for(&self, product_ids: &HashSet<ProductId>) -> bool {
        !self.components.is_empty()
            && self
                .components
                .iter()
                .all(|component| product_ids.contains(&component.product_id))
    }
}
