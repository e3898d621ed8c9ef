use super::engine::QuoteEngine;
use crate::domain::cart::LineItem;
use crate::domain::product::ProductId;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteOrderRequest {
    pub products: Vec<QuoteOrderProduct>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuoteOrderProduct {
    pub id: ProductId,
    pub quantity: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteOrderResponse {
    pub total_price: Decimal,
}

/// Quotes the items of an order, with discount bundles applied first.
#[derive(Clone)]
pub struct QuoteOrderHandler {
    engine: QuoteEngine,
}

impl QuoteOrderHandler {
    pub fn new(engine: QuoteEngine) -> Self {
        Self { engine }
    }

    pub async fn handle(&self, req: QuoteOrderRequest) -> Result<QuoteOrderResponse> {
        let items: Vec<LineItem> = req
            .products
            .into_iter()
            .map(|product| LineItem::new(product.id, product.quantity))
            .collect();

        let quote = self.engine.quote(&items).await?;
        Ok(QuoteOrderResponse {
            total_price: quote.total_price,
        })
    }
}
