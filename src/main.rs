use bundle_quote::application::engine::QuoteEngine;
use bundle_quote::application::order::{QuoteOrderHandler, QuoteOrderProduct, QuoteOrderRequest};
use bundle_quote::application::reservation::{
    QuoteReservationHandler, QuoteReservationProduct, QuoteReservationRequest,
};
use bundle_quote::config::{LogFormat, QuoteConfig, init_tracing};
use bundle_quote::domain::cart::LineItem;
use bundle_quote::infrastructure::in_memory::InMemoryCatalog;
use bundle_quote::interfaces::csv::cart_reader::CartReader;
use bundle_quote::interfaces::json::catalog_file::CatalogDocument;
use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Flavor {
    #[default]
    Reservation,
    Order,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Cart CSV file with a `product,quantity` header
    cart: PathBuf,

    /// Catalog JSON document with products and bundles
    #[arg(long)]
    catalog: PathBuf,

    /// Which call site shapes the response
    #[arg(long, value_enum, default_value_t = Flavor::Reservation)]
    flavor: Flavor,

    /// Print bundle and remainder revenue instead of the response
    #[arg(long)]
    breakdown: bool,

    /// Timeout for each catalog lookup, in milliseconds
    #[arg(long, env = "BUNDLE_QUOTE_TIMEOUT_MS")]
    timeout_ms: Option<u64>,

    /// Log output format, written to stderr
    #[arg(long, value_enum, env = "BUNDLE_QUOTE_LOG_FORMAT", default_value_t = LogFormat::Compact)]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let mut config = QuoteConfig::default();
    if let Some(ms) = cli.timeout_ms {
        config = config.with_lookup_timeout(Duration::from_millis(ms));
    }

    let document = CatalogDocument::from_path(&cli.catalog).into_diagnostic()?;
    let catalog = InMemoryCatalog::from_document(document).await;
    let engine = QuoteEngine::new(Arc::new(catalog), config);

    let file = File::open(&cli.cart).into_diagnostic()?;
    let items = CartReader::new(file).read_all().into_diagnostic()?;
    debug!(line_items = items.len(), "Read cart");

    let output = if cli.breakdown {
        let breakdown = engine.quote_breakdown(&items).await.into_diagnostic()?;
        serde_json::to_string(&breakdown).into_diagnostic()?
    } else {
        match cli.flavor {
            Flavor::Reservation => {
                let response = QuoteReservationHandler::new(engine)
                    .handle(reservation_request(&items))
                    .await
                    .into_diagnostic()?;
                serde_json::to_string(&response).into_diagnostic()?
            }
            Flavor::Order => {
                let response = QuoteOrderHandler::new(engine)
                    .handle(order_request(&items))
                    .await
                    .into_diagnostic()?;
                serde_json::to_string(&response).into_diagnostic()?
            }
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{output}").into_diagnostic()?;

    Ok(())
}

fn reservation_request(items: &[LineItem]) -> QuoteReservationRequest {
    QuoteReservationRequest {
        products: items
            .iter()
            .map(|item| QuoteReservationProduct {
                id: item.product_id,
                quantity: item.quantity,
            })
            .collect(),
    }
}

fn order_request(items: &[LineItem]) -> QuoteOrderRequest {
    QuoteOrderRequest {
        products: items
            .iter()
            .map(|item| QuoteOrderProduct {
                id: item.product_id,
                quantity: item.quantity,
            })
            .collect(),
    }
}
