//! Bundle matching and remainder pricing.
//!
//! Bundles are consumed greedily, one after the other, in the order the
//! catalog returned them. The allocation is locally greedy and not globally
//! optimal: reordering the bundles can change the quoted total.

use super::bundle::Bundle;
use super::cart::RemainingLedger;
use super::product::{ProductId, UnitPrice};
use super::quote::BundleApplication;
use crate::error::{QuoteError, Result};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::debug;

/// How many whole times a bundle fits in the ledger, as far as scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applicability {
    /// No component has been evaluated yet.
    Unevaluated,
    /// The bundle fits at most this many times.
    Bounded(u64),
    /// A component product is missing from the ledger.
    Blocked,
}

impl Applicability {
    fn bound(self, fits: u64) -> Self {
        match self {
            Applicability::Unevaluated => Applicability::Bounded(fits),
            Applicability::Bounded(current) => Applicability::Bounded(current.min(fits)),
            Applicability::Blocked => Applicability::Blocked,
        }
    }

    /// Number of applications this state allows, if any.
    pub fn times(self) -> Option<u64> {
        match self {
            Applicability::Bounded(times) if times > 0 => Some(times),
            _ => None,
        }
    }
}

/// Scans a bundle's components against the ledger.
///
/// Scanning stops at the first component whose product is missing from the
/// ledger (the bundle is blocked) and at the first component requiring zero
/// units, in which case whatever was computed so far stands.
pub fn applicability(bundle: &Bundle, ledger: &RemainingLedger) -> Applicability {
    let mut state = Applicability::Unevaluated;
    for component in &bundle.components {
        if component.required_quantity == 0 {
            break;
        }
        let Some(remaining) = ledger.get(&component.product_id) else {
            return Applicability::Blocked;
        };
        state = state.bound(remaining / u64::from(component.required_quantity));
    }
    state
}

/// Outcome of running every qualifying bundle against a ledger.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BundleMatch {
    pub revenue: Decimal,
    pub applications: Vec<BundleApplication>,
}

/// Applies each bundle as many whole times as the ledger allows, in order.
///
/// Consumed quantities are removed from `ledger`; skipped bundles leave it
/// untouched. Fails with `PriceOverflow` if the revenue exceeds `Decimal`.
pub fn match_bundles(ledger: &mut RemainingLedger, bundles: &[Bundle]) -> Result<BundleMatch> {
    let mut outcome = BundleMatch::default();

    for bundle in bundles {
        let Some(times) = applicability(bundle, ledger).times() else {
            continue;
        };

        let revenue = Decimal::from(times)
            .checked_mul(bundle.price)
            .ok_or(QuoteError::PriceOverflow("pricing bundles"))?;
        outcome.revenue = outcome
            .revenue
            .checked_add(revenue)
            .ok_or(QuoteError::PriceOverflow("pricing bundles"))?;
        outcome.applications.push(BundleApplication {
            bundle_id: bundle.id,
            times,
        });

        for component in &bundle.components {
            ledger.consume(
                &component.product_id,
                times.saturating_mul(u64::from(component.required_quantity)),
            );
        }

        debug!(bundle = %bundle.id, times, %revenue, "Applied bundle");
    }

    Ok(outcome)
}

/// Prices what is left in the ledger at standalone unit prices.
///
/// Every product with a positive remainder must have a price; the smallest
/// unpriced id is reported otherwise.
pub fn price_remainder(ledger: &RemainingLedger, prices: &[UnitPrice]) -> Result<Decimal> {
    let by_product: HashMap<_, _> = prices
        .iter()
        .map(|unit| (unit.product_id, unit.price))
        .collect();

    let mut total = Decimal::ZERO;
    let mut missing = None;
    for (product_id, &remaining) in ledger.iter() {
        if remaining == 0 {
            continue;
        }
        match by_product.get(product_id) {
            Some(&price) => {
                total = Decimal::from(remaining)
                    .checked_mul(price)
                    .and_then(|line| total.checked_add(line))
                    .ok_or(QuoteError::PriceOverflow("pricing remainder"))?;
            }
            None => {
                missing = Some(missing.map_or(*product_id, |current: ProductId| {
                    current.min(*product_id)
                }))
            }
        }
    }

    match missing {
        Some(product_id) => Err(QuoteError::ProductNotFound(product_id)),
        None => Ok(total),
    }
}
