//! Roll rule for short calls that have gone in the money.

use crate::config::StrategyConfig;
use crate::models::{MarketSnapshot, OptionType, Phase, PortfolioState, Signal};
use crate::pricing::{bs_price, find_strike_for_delta};

use super::helpers::{effective_vol, iv_rv_multiplier, MAX_SHORT_DELTA};
use super::TradingRule;

const NAME: &str = "roll_call";

/// Roll an ITM short call up and out before assignment takes the position.
///
/// Fires when spot has pushed `itm_threshold_pct` through the open strike.
/// The candidate is a fresh cycle-length call at the IV/RV-adjusted target
/// delta; the buy-back cost is the Black-Scholes value of the open call at
/// the current spot. With `require_net_credit` set, rolls that would debit
/// the account are suppressed.
#[must_use]
pub fn roll_call_rule() -> TradingRule {
    TradingRule {
        name: NAME,
        description: "Roll an ITM short call up and out, optionally only for a net credit",
        phase: Phase::ShortCall,
        priority: 30,
        evaluate,
    }
}

fn evaluate(
    market: &MarketSnapshot,
    portfolio: &PortfolioState,
    config: &StrategyConfig,
) -> Option<Signal> {
    if portfolio.phase != Phase::ShortCall {
        return None;
    }
    let roll = config.roll_call.as_ref()?;
    let open = portfolio.open_option.as_ref()?;
    if open.option_type != OptionType::Call {
        return None;
    }
    if market.spot < open.strike * (1.0 + roll.itm_threshold_pct) {
        return None;
    }

    let vol = effective_vol(market, config);
    let t = config.cycle_years();
    let new_delta = (config.target_delta * iv_rv_multiplier(market, config)).min(MAX_SHORT_DELTA);

    let new_strike = find_strike_for_delta(
        new_delta,
        market.spot,
        t,
        config.risk_free_rate,
        vol,
        OptionType::Call,
    )?;
    let new_premium = bs_price(
        OptionType::Call,
        market.spot,
        new_strike,
        t,
        config.risk_free_rate,
        vol,
    ) * (1.0 - config.bid_ask_spread_pct);
    let roll_cost = bs_price(
        OptionType::Call,
        market.spot,
        open.strike,
        t,
        config.risk_free_rate,
        vol,
    );
    let credit = new_premium - roll_cost;

    if roll.require_net_credit && credit <= 0.0 {
        return None;
    }

    Some(Signal::Roll {
        new_strike,
        new_delta,
        roll_cost,
        new_premium,
        credit,
        rule: NAME.to_string(),
        reason: format!(
            "spot {:.2} is {:.1}% through strike {:.2}; roll to {new_strike:.2} for {credit:.2} credit",
            market.spot,
            (market.spot / open.strike - 1.0) * 100.0,
            open.strike
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RollCallConfig;
    use crate::models::{OpenOption, Position};

    fn short_call(strike: f64) -> PortfolioState {
        PortfolioState {
            phase: Phase::ShortCall,
            position: Some(Position {
                size: 1.0,
                entry_price: strike * 0.95,
            }),
            open_option: Some(OpenOption {
                option_type: OptionType::Call,
                strike,
                delta: 0.30,
                premium: 40.0,
                open_day: 7,
                expiry_day: 14,
            }),
            ..PortfolioState::initial()
        }
    }

    fn market(spot: f64) -> MarketSnapshot {
        MarketSnapshot {
            day: 10,
            spot,
            iv: None,
            realized_vol: None,
        }
    }

    fn config(require_net_credit: bool) -> StrategyConfig {
        StrategyConfig {
            roll_call: Some(RollCallConfig {
                itm_threshold_pct: 0.05,
                require_net_credit,
            }),
            ..StrategyConfig::default()
        }
    }

    #[test]
    fn test_requires_roll_block() {
        let config = StrategyConfig::default();
        assert!(evaluate(&market(3000.0), &short_call(2500.0), &config).is_none());
    }

    #[test]
    fn test_no_trigger_below_threshold() {
        // 2600 is only 4% through a 2500 strike.
        assert!(evaluate(&market(2600.0), &short_call(2500.0), &config(false)).is_none());
    }

    #[test]
    fn test_rolls_up_when_deep_itm() {
        let signal = evaluate(&market(3000.0), &short_call(2500.0), &config(false)).unwrap();
        let Signal::Roll {
            new_strike,
            roll_cost,
            new_premium,
            credit,
            ..
        } = signal
        else {
            panic!("expected Roll");
        };
        assert!(new_strike > 3000.0, "new strike {new_strike} not above spot");
        // Buying back a 500-ITM call costs at least intrinsic value.
        assert!(roll_cost > 450.0);
        assert!((credit - (new_premium - roll_cost)).abs() < 1e-12);
        assert!(credit < 0.0, "deep ITM roll cannot be a credit");
    }

    #[test]
    fn test_net_credit_requirement_suppresses_debit_rolls() {
        assert!(evaluate(&market(3000.0), &short_call(2500.0), &config(true)).is_none());
    }

    #[test]
    fn test_trigger_just_above_threshold() {
        let signal = evaluate(&market(2626.0), &short_call(2500.0), &config(false));
        assert!(signal.is_some());
    }
}
