use crate::config::QuoteConfig;
use crate::domain::cart::{LineItem, RemainingLedger};
use crate::domain::ports::CatalogGatewayRef;
use crate::domain::pricing::{match_bundles, price_remainder};
use crate::domain::quote::{QuoteBreakdown, QuoteResult};
use crate::error::{QuoteError, Result};
use std::future::Future;
use tracing::{info, instrument, warn};

/// Computes the price of a cart from qualifying bundles and unit prices.
///
/// The engine holds no per-quote state. Each call owns a fresh
/// `RemainingLedger`, so one engine can serve any number of concurrent quotes.
#[derive(Clone)]
pub struct QuoteEngine {
    catalog: CatalogGatewayRef,
    config: QuoteConfig,
}

impl QuoteEngine {
    /// Creates a new `QuoteEngine` instance.
    ///
    /// # Arguments
    ///
    /// * `catalog` - The gateway resolving bundles and unit prices.
    /// * `config` - Lookup timeout and other runtime settings.
    pub fn new(catalog: CatalogGatewayRef, config: QuoteConfig) -> Self {
        Self { catalog, config }
    }

    /// Quotes a cart, returning only the total.
    pub async fn quote(&self, items: &[LineItem]) -> Result<QuoteResult> {
        let breakdown = self.quote_breakdown(items).await?;
        QuoteResult::try_from(&breakdown)
    }

    /// Quotes a cart, returning bundle and remainder revenue separately.
    ///
    /// Bundles are consumed first, in catalog order, and what is left is
    /// priced per unit. The first catalog error aborts the computation, and
    /// so does revenue that no longer fits in a `Decimal`.
    #[instrument(skip_all, fields(line_items = items.len()))]
    pub async fn quote_breakdown(&self, items: &[LineItem]) -> Result<QuoteBreakdown> {
        let mut ledger = RemainingLedger::from_line_items(items);
        if ledger.is_empty() {
            return Ok(QuoteBreakdown::default());
        }
        let product_ids = ledger.product_ids();

        let bundles = self
            .lookup("qualifying bundles", self.catalog.qualifying_bundles(&product_ids))
            .await?;
        let matched = match_bundles(&mut ledger, &bundles)?;

        let prices = self
            .lookup("unit prices", self.catalog.unit_prices(&product_ids))
            .await?;
        let remainder_revenue = price_remainder(&ledger, &prices)?;

        let breakdown = QuoteBreakdown {
            bundle_revenue: matched.revenue,
            remainder_revenue,
            applications: matched.applications,
        };
        let total = breakdown.total_price()?;
        info!(
            %total,
            bundles_applied = breakdown.applications.len(),
            "Quoted cart"
        );
        Ok(breakdown)
    }

    async fn lookup<T, F>(&self, what: &'static str, request: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let Some(limit) = self.config.lookup_timeout else {
            return request.await;
        };
        match tokio::time::timeout(limit, request).await {
            Ok(result) => result,
            Err(_) => {
                warn!(lookup = what, ?limit, "Catalog lookup timed out");
                Err(QuoteError::CatalogUnavailable(format!(
                    "{what} lookup timed out after {limit:?}"
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bundle::{Bundle, BundleComponent};
    use crate::domain::ports::CatalogGateway;
    use crate::domain::product::{ProductId, UnitPrice};
    use crate::infrastructure::in_memory::InMemoryCatalog;
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    const CHAIR: ProductId = ProductId::from_u128(0x1fd49fff_e5c6_4878_9c42_f2fa77bdc2fe);
    const TABLE: ProductId = ProductId::from_u128(0x4491c392_4b6e_4a6e_aa64_c2897a258451);
    const BENCH: ProductId = ProductId::from_u128(0xb387b182_e12a_4757_99c8_31b6596d102d);

    fn chair_table_box() -> Bundle {
        Bundle::new(
            dec!(2.5),
            vec![
                BundleComponent::new(CHAIR, 4),
                BundleComponent::new(TABLE, 1),
            ],
        )
    }

    async fn seeded_catalog(
        bundles: Vec<Bundle>,
        prices: &[(ProductId, Decimal)],
    ) -> Arc<InMemoryCatalog> {
        let catalog = InMemoryCatalog::new();
        for &(id, price) in prices {
            catalog.upsert_product(id, price).await;
        }
        for bundle in bundles {
            catalog.add_bundle(bundle).await;
        }
        Arc::new(catalog)
    }

    fn engine(catalog: CatalogGatewayRef) -> QuoteEngine {
        QuoteEngine::new(catalog, QuoteConfig::default())
    }

    /// Returns fixed answers without any catalog-side validation.
    struct FixedCatalog {
        bundles: Vec<Bundle>,
        prices: Vec<UnitPrice>,
        calls: AtomicUsize,
    }

    impl FixedCatalog {
        fn new(bundles: Vec<Bundle>, prices: Vec<UnitPrice>) -> Self {
            Self {
                bundles,
                prices,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CatalogGateway for FixedCatalog {
        async fn qualifying_bundles(&self, _: &HashSet<ProductId>) -> Result<Vec<Bundle>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.bundles.clone())
        }

        async fn unit_prices(&self, _: &HashSet<ProductId>) -> Result<Vec<UnitPrice>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.prices.clone())
        }
    }

    enum Failing {
        Bundles,
        Prices,
    }

    #[async_trait]
    impl CatalogGateway for Failing {
        async fn qualifying_bundles(&self, _: &HashSet<ProductId>) -> Result<Vec<Bundle>> {
            match self {
                Failing::Bundles => Err(QuoteError::CatalogUnavailable("bundles down".into())),
                Failing::Prices => Ok(vec![chair_table_box()]),
            }
        }

        async fn unit_prices(&self, _: &HashSet<ProductId>) -> Result<Vec<UnitPrice>> {
            Err(QuoteError::CatalogUnavailable("prices down".into()))
        }
    }

    struct SlowCatalog;

    #[async_trait]
    impl CatalogGateway for SlowCatalog {
        async fn qualifying_bundles(&self, _: &HashSet<ProductId>) -> Result<Vec<Bundle>> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(vec![])
        }

        async fn unit_prices(&self, _: &HashSet<ProductId>) -> Result<Vec<UnitPrice>> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn test_all_products_in_one_box() {
        let catalog = seeded_catalog(
            vec![chair_table_box()],
            &[(CHAIR, dec!(1.5)), (TABLE, dec!(4))],
        )
        .await;
        let items = [LineItem::new(CHAIR, 40), LineItem::new(TABLE, 10)];

        let result = engine(catalog).quote(&items).await.unwrap();
        assert_eq!(result.total_price, dec!(25));
    }

    #[tokio::test]
    async fn test_box_with_unrequested_product_does_not_apply() {
        let with_bench = Bundle::new(
            dec!(2.5),
            vec![
                BundleComponent::new(CHAIR, 4),
                BundleComponent::new(TABLE, 1),
                BundleComponent::new(BENCH, 1),
            ],
        );
        let catalog =
            seeded_catalog(vec![with_bench], &[(CHAIR, dec!(1.5)), (TABLE, dec!(4))]).await;
        let items = [LineItem::new(CHAIR, 40), LineItem::new(TABLE, 10)];

        let breakdown = engine(catalog).quote_breakdown(&items).await.unwrap();
        assert!(breakdown.applications.is_empty());
        assert_eq!(breakdown.total_price().unwrap(), dec!(100));
    }

    #[tokio::test]
    async fn test_mixed_box_and_remainder() {
        let catalog = seeded_catalog(
            vec![chair_table_box()],
            &[(CHAIR, dec!(1.5)), (TABLE, dec!(4)), (BENCH, dec!(2))],
        )
        .await;
        let items = [
            LineItem::new(CHAIR, 45),
            LineItem::new(TABLE, 10),
            LineItem::new(BENCH, 3),
        ];

        let breakdown = engine(catalog).quote_breakdown(&items).await.unwrap();
        assert_eq!(breakdown.bundle_revenue, dec!(25));
        assert_eq!(breakdown.remainder_revenue, dec!(13.5));
        assert_eq!(breakdown.total_price().unwrap(), dec!(38.5));
        assert_eq!(breakdown.applications[0].times, 10);
    }

    #[tokio::test]
    async fn test_zero_quantity_item_is_free_and_resolvable() {
        let catalog = seeded_catalog(vec![], &[(CHAIR, dec!(1.5)), (BENCH, dec!(2))]).await;
        let items = [LineItem::new(CHAIR, 2), LineItem::new(BENCH, 0)];

        let result = engine(catalog).quote(&items).await.unwrap();
        assert_eq!(result.total_price, dec!(3.0));
    }

    #[tokio::test]
    async fn test_unpriced_requested_product_is_not_found() {
        let catalog = seeded_catalog(vec![], &[(CHAIR, dec!(1.5))]).await;
        let items = [LineItem::new(CHAIR, 2), LineItem::new(BENCH, 1)];

        let result = engine(catalog).quote(&items).await;
        assert!(matches!(result, Err(QuoteError::ProductNotFound(id)) if id == BENCH));
    }

    #[tokio::test]
    async fn test_fully_bundled_cart_needs_no_leftover_prices() {
        let fixed = Arc::new(FixedCatalog::new(vec![chair_table_box()], vec![]));
        let items = [LineItem::new(CHAIR, 40), LineItem::new(TABLE, 10)];

        let result = engine(fixed).quote(&items).await.unwrap();
        assert_eq!(result.total_price, dec!(25));
    }

    #[tokio::test]
    async fn test_empty_cart_is_free_without_catalog_calls() {
        let fixed = Arc::new(FixedCatalog::new(vec![chair_table_box()], vec![]));

        let result = engine(fixed.clone()).quote(&[]).await.unwrap();
        assert_eq!(result.total_price, Decimal::ZERO);
        assert_eq!(fixed.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_quote_is_idempotent() {
        let catalog = seeded_catalog(
            vec![chair_table_box()],
            &[(CHAIR, dec!(1.5)), (TABLE, dec!(4)), (BENCH, dec!(2))],
        )
        .await;
        let engine = engine(catalog);
        let items = [
            LineItem::new(CHAIR, 45),
            LineItem::new(TABLE, 10),
            LineItem::new(BENCH, 3),
        ];

        let first = engine.quote(&items).await.unwrap();
        let second = engine.quote(&items).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_bundle_lookup_error_is_propagated() {
        let result = engine(Arc::new(Failing::Bundles))
            .quote(&[LineItem::new(CHAIR, 4)])
            .await;
        assert!(
            matches!(result, Err(QuoteError::CatalogUnavailable(msg)) if msg == "bundles down")
        );
    }

    #[tokio::test]
    async fn test_price_lookup_error_aborts_after_matching() {
        let result = engine(Arc::new(Failing::Prices))
            .quote(&[LineItem::new(CHAIR, 4), LineItem::new(TABLE, 1)])
            .await;
        assert!(
            matches!(result, Err(QuoteError::CatalogUnavailable(msg)) if msg == "prices down")
        );
    }

    #[tokio::test]
    async fn test_slow_lookup_times_out() {
        let config = QuoteConfig::default().with_lookup_timeout(Duration::from_millis(20));
        let engine = QuoteEngine::new(Arc::new(SlowCatalog), config);

        let result = engine.quote(&[LineItem::new(CHAIR, 1)]).await;
        assert!(matches!(result, Err(QuoteError::CatalogUnavailable(_))));
    }

    #[tokio::test]
    async fn test_overflowing_bundle_price_is_an_error() {
        let huge_box = Bundle::new(Decimal::MAX, vec![BundleComponent::new(CHAIR, 1)]);
        let catalog = seeded_catalog(vec![huge_box], &[(CHAIR, dec!(1.5))]).await;

        let result = engine(catalog).quote(&[LineItem::new(CHAIR, 2)]).await;
        assert!(matches!(result, Err(QuoteError::PriceOverflow(_))));
    }

    #[tokio::test]
    async fn test_overflowing_unit_price_is_an_error() {
        let catalog = seeded_catalog(vec![], &[(CHAIR, Decimal::MAX)]).await;

        let result = engine(catalog).quote(&[LineItem::new(CHAIR, 2)]).await;
        assert!(matches!(result, Err(QuoteError::PriceOverflow(_))));
    }

    #[tokio::test]
    async fn test_overflowing_total_is_an_error() {
        let huge_box = Bundle::new(Decimal::MAX, vec![BundleComponent::new(CHAIR, 1)]);
        let catalog =
            seeded_catalog(vec![huge_box], &[(CHAIR, dec!(1)), (TABLE, dec!(1))]).await;

        let result = engine(catalog)
            .quote(&[LineItem::new(CHAIR, 1), LineItem::new(TABLE, 1)])
            .await;
        assert!(matches!(result, Err(QuoteError::PriceOverflow(_))));
    }
}
