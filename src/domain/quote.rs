use super::bundle::BundleId;
use crate::error::{QuoteError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How many whole times a bundle was consumed by a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleApplication {
    pub bundle_id: BundleId,
    pub times: u64,
}

/// The parts that make up a quoted total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteBreakdown {
    pub bundle_revenue: Decimal,
    pub remainder_revenue: Decimal,
    pub applications: Vec<BundleApplication>,
}

impl QuoteBreakdown {
    /// Bundle plus remainder revenue, or `PriceOverflow` if it exceeds `Decimal`.
    pub fn total_price(&self) -> Result<Decimal> {
        self.bundle_revenue
            .checked_add(self.remainder_revenue)
            .ok_or(QuoteError::PriceOverflow("summing the quote"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResult {
    pub total_price: Decimal,
}

impl TryFrom<&QuoteBreakdown> for QuoteResult {
    type Error = QuoteError;

    fn try_from(breakdown: &QuoteBreakdown) -> Result<Self> {
        Ok(Self {
            total_price: breakdown.total_price()?,
        })
    }
}
