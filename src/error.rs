use crate::domain::product::ProductId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),
    #[error("Price overflow while {0}")]
    PriceOverflow(&'static str),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, QuoteError>;
