//! Cross-bookmaker arbitrage detection.
//!
//! For every event, takes the best decimal price per outcome across all
//! bookmakers and markets. If the implied probabilities of those best
//! prices sum to strictly less than one, staking each outcome in
//! proportion to its implied probability returns the same payout
//! whichever outcome wins, and that payout exceeds the total stake.

use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::types::{Bet, Event, OddsDataError, Opportunity, Outcome};

/// Reciprocals are rounded to 28 digits, so a fair book such as three
/// outcomes at 3.0 sums to 0.999...9. Sums within this distance of one
/// count as one.
const IMPLIED_SUM_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 20);

// ---------------------------------------------------------------------------
// Best quotes
// ---------------------------------------------------------------------------

/// The best price found for one outcome, and the bookmaker offering it.
#[derive(Debug, Clone, PartialEq)]
pub struct BestQuote {
    pub outcome: String,
    pub price: Decimal,
    pub bookmaker: String,
    /// `1 / price`
    pub implied: Decimal,
}

/// Collect the best quote per outcome name, in first-seen order.
///
/// A strictly higher price replaces the current best, so on ties the
/// bookmaker encountered first is kept.
pub fn best_quotes(event: &Event) -> Result<Vec<BestQuote>, OddsDataError> {
    let mut quotes: Vec<BestQuote> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for bookmaker in &event.bookmakers {
        for market in &bookmaker.markets {
            for outcome in &market.outcomes {
                let (price, implied) = checked_price(event, &bookmaker.title, outcome)?;

                match index.get(outcome.name.as_str()) {
                    Some(&i) => {
                        let best = &mut quotes[i];
                        if price > best.price {
                            best.price = price;
                            best.implied = implied;
                            best.bookmaker = bookmaker.title.clone();
                        }
                    }
                    None => {
                        index.insert(outcome.name.as_str(), quotes.len());
                        quotes.push(BestQuote {
                            outcome: outcome.name.clone(),
                            price,
                            bookmaker: bookmaker.title.clone(),
                            implied,
                        });
                    }
                }
            }
        }
    }

    Ok(quotes)
}

/// Validate a quoted price and return it with its implied probability.
fn checked_price(
    event: &Event,
    bookmaker: &str,
    outcome: &Outcome,
) -> Result<(Decimal, Decimal), OddsDataError> {
    let price = outcome.price.ok_or_else(|| OddsDataError::MissingPrice {
        event: event.label(),
        bookmaker: bookmaker.to_string(),
        outcome: outcome.name.clone(),
    })?;

    let invalid = || OddsDataError::InvalidPrice {
        event: event.label(),
        bookmaker: bookmaker.to_string(),
        outcome: outcome.name.clone(),
        price,
    };

    if price <= Decimal::ZERO {
        return Err(invalid());
    }

    // Prices so large that 1/price underflows to zero are rejected too,
    // otherwise the implied sum could be zero.
    match Decimal::ONE.checked_div(price) {
        Some(implied) if !implied.is_zero() => Ok((price, implied)),
        _ => Err(invalid()),
    }
}

// ---------------------------------------------------------------------------
// Detection
// ---------------------------------------------------------------------------

/// Check one event for an arbitrage and size its legs.
///
/// Returns `Ok(None)` when the event has no outcomes or the implied sum
/// is at least one. `risk_multiplier` is the total stake split across legs.
pub fn scan_event(
    event: &Event,
    risk_multiplier: Decimal,
) -> Result<Option<Opportunity>, OddsDataError> {
    let quotes = best_quotes(event)?;
    if quotes.is_empty() {
        return Ok(None);
    }

    let implied_sum = match quotes
        .iter()
        .try_fold(Decimal::ZERO, |acc, q| acc.checked_add(q.implied))
    {
        Some(sum) => sum,
        // Overflow means the sum is astronomically above one.
        None => return Ok(None),
    };

    if implied_sum >= Decimal::ONE - IMPLIED_SUM_TOLERANCE {
        return Ok(None);
    }

    debug!(
        event = %event.label(),
        implied_sum = %implied_sum.round_dp(6),
        margin_pct = %((Decimal::ONE - implied_sum) * Decimal::ONE_HUNDRED).round_dp(3),
        outcomes = quotes.len(),
        "Arbitrage found"
    );

    let bets = quotes
        .into_iter()
        .map(|q| Bet {
            bet_amount: format_stake(risk_multiplier * q.implied / implied_sum),
            outcome: q.outcome,
            bookmaker: q.bookmaker,
        })
        .collect();

    Ok(Some(Opportunity {
        event: event.label(),
        bets,
    }))
}

/// Find all arbitrage opportunities across `events`.
///
/// Events with bad price data are logged and skipped; the rest are still
/// scanned. A non-positive multiplier yields no opportunities.
pub fn detect(events: &[Event], risk_multiplier: Decimal) -> Vec<Opportunity> {
    if risk_multiplier <= Decimal::ZERO {
        warn!(risk_multiplier = %risk_multiplier, "Non-positive risk multiplier, skipping detection");
        return Vec::new();
    }

    let mut opportunities = Vec::new();

    for event in events {
        match scan_event(event, risk_multiplier) {
            Ok(Some(opportunity)) => opportunities.push(opportunity),
            Ok(None) => {}
            Err(e) => {
                warn!(event = %event.label(), error = %e, "Skipping event with bad odds data");
            }
        }
    }

    opportunities
}

/// Render a stake with exactly two fractional digits, rounding half away
/// from zero (`1.125` → `"1.13"`, `5` → `"5.00"`).
pub fn format_stake(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
