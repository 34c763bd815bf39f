//! Covered-call rule with P/L-adaptive delta.

use crate::config::StrategyConfig;
use crate::models::{MarketSnapshot, Phase, PortfolioState, Signal};

use super::helpers::call_candidate;
use super::TradingRule;

const NAME: &str = "adaptive_call";

/// Sell a covered call against the held underlying.
///
/// With `adaptive_calls` configured, the delta slides between `min_delta`
/// (position under water, keep upside for recovery) and `max_delta`
/// (position in profit, harvest premium aggressively); without it the flat
/// `target_delta` applies.
#[must_use]
pub fn adaptive_call_rule() -> TradingRule {
    TradingRule {
        name: NAME,
        description: "Sell a covered call, delta adapted to position P/L",
        phase: Phase::HoldingEth,
        priority: 100,
        evaluate,
    }
}

fn evaluate(
    market: &MarketSnapshot,
    portfolio: &PortfolioState,
    config: &StrategyConfig,
) -> Option<Signal> {
    if portfolio.phase != Phase::HoldingEth {
        return None;
    }
    let position = portfolio.position.as_ref()?;
    let candidate = call_candidate(market, position, config)?;

    Some(Signal::SellCall {
        strike: candidate.strike,
        delta: candidate.delta,
        premium: candidate.premium,
        rule: NAME.to_string(),
        reason: format!(
            "sell {:.2}-delta call at strike {:.2}",
            candidate.delta, candidate.strike
        ),
    })
}
