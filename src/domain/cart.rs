use super::product::ProductId;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One requested cart entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "product")]
    pub product_id: ProductId,
    pub quantity: u32,
}

impl LineItem {
    pub fn new(product_id: ProductId, quantity: u32) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}

/// Remaining unconsumed quantity per product for a single quote computation.
///
/// Quantities never drop below zero: consuming more than is left floors the
/// entry at zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemainingLedger {
    remaining: HashMap<ProductId, u64>,
}

impl RemainingLedger {
    /// Builds the ledger from the caller's line items.
    ///
    /// A product listed more than once keeps the quantity of its last
    /// occurrence; quantities are overwritten, not summed.
    pub fn from_line_items(items: &[LineItem]) -> Self {
        let mut remaining = HashMap::with_capacity(items.len());
        for item in items {
            remaining.insert(item.product_id, u64::from(item.quantity));
        }
        Self { remaining }
    }

    pub fn get(&self, product_id: &ProductId) -> Option<u64> {
        self.remaining.get(product_id).copied()
    }

    /// Removes `quantity` units of a product, flooring at zero.
    ///
    /// Products absent from the ledger are left absent.
    pub fn consume(&mut self, product_id: &ProductId, quantity: u64) {
        if let Some(left) = self.remaining.get_mut(product_id) {
            *left = left.saturating_sub(quantity);
        }
    }

    /// Every requested product id, including those requested with quantity zero.
    pub fn product_ids(&self) -> HashSet<ProductId> {
        self.remaining.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProductId, &u64)> {
        self.remaining.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }
}
