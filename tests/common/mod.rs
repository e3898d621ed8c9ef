#![allow(dead_code)]

use bundle_quote::domain::bundle::{Bundle, BundleComponent};
use bundle_quote::domain::product::ProductId;
use bundle_quote::infrastructure::in_memory::InMemoryCatalog;
use rust_decimal_macros::dec;
use std::io::{Error, Write};
use tempfile::NamedTempFile;

pub const CHAIR: &str = "1fd49fff-e5c6-4878-9c42-f2fa77bdc2fe";
pub const TABLE: &str = "4491c392-4b6e-4a6e-aa64-c2897a258451";
pub const BENCH: &str = "b387b182-e12a-4757-99c8-31b6596d102d";

pub fn id(raw: &str) -> ProductId {
    raw.parse().expect("valid product id")
}

/// Chair 1.5, table 4, bench 2 and a chair x4 + table x1 box at 2.5.
pub async fn rental_catalog() -> InMemoryCatalog {
    let catalog = InMemoryCatalog::new();
    catalog.upsert_product(id(CHAIR), dec!(1.5)).await;
    catalog.upsert_product(id(TABLE), dec!(4)).await;
    catalog.upsert_product(id(BENCH), dec!(2)).await;
    catalog
        .add_bundle(Bundle::new(
            dec!(2.5),
            vec![
                BundleComponent::new(id(CHAIR), 4),
                BundleComponent::new(id(TABLE), 1),
            ],
        ))
        .await;
    catalog
}

pub fn write_cart(rows: &[(&str, &str)]) -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "product,quantity")?;
    for (product, quantity) in rows {
        writeln!(file, "{product},{quantity}")?;
    }
    Ok(file)
}
