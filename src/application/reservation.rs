use super::engine::QuoteEngine;
use crate::domain::cart::LineItem;
use crate::domain::product::ProductId;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteReservationRequest {
    pub products: Vec<QuoteReservationProduct>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuoteReservationProduct {
    pub id: ProductId,
    pub quantity: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuoteReservationResponse {
    pub price: Decimal,
}

/// Quotes the items of a prospective reservation.
#[derive(Clone)]
pub struct QuoteReservationHandler {
    engine: QuoteEngine,
}

impl QuoteReservationHandler {
    pub fn new(engine: QuoteEngine) -> Self {
        Self { engine }
    }

    pub async fn handle(&self, req: QuoteReservationRequest) -> Result<QuoteReservationResponse> {
        let items: Vec<LineItem> = req
            .products
            .iter()
            .map(|product| LineItem::new(product.id, product.quantity))
            .collect();

        let quote = self.engine.quote(&items).await?;
        Ok(QuoteReservationResponse {
            price: quote.total_price,
        })
    }
}
