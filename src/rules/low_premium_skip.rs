//! Skip rule for cycles whose call premium is not worth the fees.

use crate::config::StrategyConfig;
use crate::models::{MarketSnapshot, Phase, PortfolioState, Signal};

use super::helpers::call_candidate;
use super::TradingRule;

const NAME: &str = "low_premium_skip";

/// Skip the call cycle when the premium on offer is negligible.
///
/// Prices the exact call the adaptive rule would sell (same delta logic,
/// same strike clamping) and skips the cycle when the fee-adjusted premium
/// falls below `skip_threshold_pct` of position value. Runs ahead of the
/// call rule so a skip pre-empts the sale.
#[must_use]
pub fn low_premium_skip_rule() -> TradingRule {
    TradingRule {
        name: NAME,
        description: "Skip call cycles whose net premium is below the configured floor",
        phase: Phase::HoldingEth,
        priority: 50,
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
    let adaptive = config.adaptive_calls.as_ref()?;
    let position = portfolio.position.as_ref()?;
    let candidate = call_candidate(market, position, config)?;

    let net_premium =
        candidate.premium * config.contracts - config.fee_per_trade * config.contracts;
    let position_value = position.entry_price * config.contracts;
    let floor = adaptive.skip_threshold_pct * position_value;

    if net_premium < floor {
        Some(Signal::Skip {
            rule: NAME.to_string(),
            reason: format!(
                "net call premium {net_premium:.2} below floor {floor:.2} ({:.3}% of position value)",
                adaptive.skip_threshold_pct * 100.0
            ),
        })
    } else {
        None
    }
}
