//! Shared rule helpers: effective volatility, the IV/RV multiplier, and the
//! covered-call candidate used by both the call rule and the skip rule.

use crate::config::StrategyConfig;
use crate::models::{MarketSnapshot, OptionType, Position};
use crate::pricing::{bs_delta, bs_price, find_strike_for_delta};

/// Hard cap on any short option's target absolute delta.
pub(crate) const MAX_SHORT_DELTA: f64 = 0.50;

/// Volatility used for pricing: the market's IV when present, otherwise the
/// configured fallback.
pub(crate) fn effective_vol(market: &MarketSnapshot, config: &StrategyConfig) -> f64 {
    market.iv.unwrap_or(config.implied_vol)
}

/// IV/RV delta multiplier.
///
/// Unity when `iv_rv_spread` is absent or realized vol is missing or
/// non-positive; otherwise `vol_eff / realized_vol` clamped to the configured
/// band.
pub(crate) fn iv_rv_multiplier(market: &MarketSnapshot, config: &StrategyConfig) -> f64 {
    let Some(spread) = &config.iv_rv_spread else {
        return 1.0;
    };
    match market.realized_vol {
        Some(realized) if realized > 0.0 => (effective_vol(market, config) / realized)
            .clamp(spread.min_multiplier, spread.max_multiplier),
        _ => 1.0,
    }
}

/// A priced covered-call candidate.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CallCandidate {
    /// Candidate strike.
    pub strike: f64,
    /// Reported absolute delta; reflects the clamped strike when
    /// `min_strike_at_cost` lifted it.
    pub delta: f64,
    /// Per-contract premium, net of the bid-ask haircut.
    pub premium: f64,
}

/// Price the call this cycle would sell.
///
/// With `adaptive_calls` present the base delta interpolates between
/// `min_delta` and `max_delta` by the position's P/L; without it the flat
/// `target_delta` applies. The base delta is scaled by the IV/RV multiplier
/// and capped at 0.50, and the strike comes from the inverse-delta solver.
/// When `min_strike_at_cost` is set, a strike below cost basis is lifted to
/// the entry price with the premium and delta recomputed there.
pub(crate) fn call_candidate(
    market: &MarketSnapshot,
    position: &Position,
    config: &StrategyConfig,
) -> Option<CallCandidate> {
    let vol = effective_vol(market, config);
    let t = config.cycle_years();

    let base_delta = match &config.adaptive_calls {
        Some(adaptive) => {
            let pnl_pct = (market.spot - position.entry_price) / position.entry_price;
            let blend = ((pnl_pct + 1.0) / 2.0).clamp(0.0, 1.0);
            adaptive.min_delta + (adaptive.max_delta - adaptive.min_delta) * blend
        }
        None => config.target_delta,
    };
    let target = (base_delta * iv_rv_multiplier(market, config)).min(MAX_SHORT_DELTA);

    let mut strike = find_strike_for_delta(
        target,
        market.spot,
        t,
        config.risk_free_rate,
        vol,
        OptionType::Call,
    )?;
    let mut delta = target;

    let clamp_to_cost = config
        .adaptive_calls
        .as_ref()
        .is_some_and(|adaptive| adaptive.min_strike_at_cost);
    if clamp_to_cost && strike < position.entry_price {
        strike = position.entry_price;
        delta = bs_delta(
            OptionType::Call,
            market.spot,
            strike,
            t,
            config.risk_free_rate,
            vol,
        )
        .abs();
    }

    let premium = bs_price(
        OptionType::Call,
        market.spot,
        strike,
        t,
        config.risk_free_rate,
        vol,
    ) * (1.0 - config.bid_ask_spread_pct);

    Some(CallCandidate {
        strike,
        delta,
        premium,
    })
}
