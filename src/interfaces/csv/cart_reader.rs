use crate::domain::cart::LineItem;
use crate::error::{QuoteError, Result};
use std::io::Read;

/// Reads cart line items from a CSV source.
///
/// Expects a `product,quantity` header. Surrounding whitespace is trimmed and
/// each malformed row surfaces as its own error.
pub struct CartReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CartReader<R> {
    /// Creates a new `CartReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes line items.
    pub fn line_items(self) -> impl Iterator<Item = Result<LineItem>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(QuoteError::from))
    }

    /// Reads the whole cart, stopping at the first malformed row.
    pub fn read_all(self) -> Result<Vec<LineItem>> {
        self.line_items().collect()
    }
}
