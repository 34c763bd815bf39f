//! Cash-secured put entry rule.

use crate::config::StrategyConfig;
use crate::models::{MarketSnapshot, OptionType, Phase, PortfolioState, Signal};
use crate::pricing::{bs_price, find_strike_for_delta};

use super::helpers::{effective_vol, iv_rv_multiplier, MAX_SHORT_DELTA};
use super::TradingRule;

const NAME: &str = "base_put";

/// The wheel's entry: sell a cash-secured put at the target delta whenever
/// the portfolio is sitting in idle cash.
#[must_use]
pub fn base_put_rule() -> TradingRule {
    TradingRule {
        name: NAME,
        description: "Sell a cash-secured put at the IV/RV-adjusted target delta",
        phase: Phase::IdleCash,
        priority: 100,
        evaluate,
    }
}

fn evaluate(
    market: &MarketSnapshot,
    portfolio: &PortfolioState,
    config: &StrategyConfig,
) -> Option<Signal> {
    if portfolio.phase != Phase::IdleCash {
        return None;
    }

    let vol = effective_vol(market, config);
    let t = config.cycle_years();
    let delta = (config.target_delta * iv_rv_multiplier(market, config)).min(MAX_SHORT_DELTA);

    let strike = find_strike_for_delta(
        delta,
        market.spot,
        t,
        config.risk_free_rate,
        vol,
        OptionType::Put,
    )?;
    let premium = bs_price(
        OptionType::Put,
        market.spot,
        strike,
        t,
        config.risk_free_rate,
        vol,
    ) * (1.0 - config.bid_ask_spread_pct);

    Some(Signal::SellPut {
        strike,
        delta,
        premium,
        rule: NAME.to_string(),
        reason: format!("sell {delta:.2}-delta put at strike {strike:.2}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn market(spot: f64) -> MarketSnapshot {
        MarketSnapshot {
            day: 0,
            spot,
            iv: None,
            realized_vol: None,
        }
    }

    #[test]
    fn test_sells_put_below_spot_in_idle_cash() {
        let config = StrategyConfig::default();
        let portfolio = PortfolioState::initial();
        let signal = evaluate(&market(2500.0), &portfolio, &config).unwrap();

        let Signal::SellPut {
            strike,
            delta,
            premium,
            rule,
            ..
        } = signal
        else {
            panic!("expected SellPut");
        };
        assert!(strike < 2500.0);
        assert!(premium > 0.0);
        assert!((delta - config.target_delta).abs() < 1e-12);
        assert_eq!(rule, NAME);
    }

    #[test]
    fn test_gates_on_phase() {
        let config = StrategyConfig::default();
        let mut portfolio = PortfolioState::initial();
        portfolio.phase = Phase::HoldingEth;
        assert!(evaluate(&market(2500.0), &portfolio, &config).is_none());
    }

    #[test]
    fn test_pure_with_equal_inputs() {
        let config = StrategyConfig::default();
        let portfolio = PortfolioState::initial();
        let a = evaluate(&market(2500.0), &portfolio, &config);
        let b = evaluate(&market(2500.0), &portfolio, &config);
        assert_eq!(a, b);
    }

    #[test]
    fn test_haircut_reduces_premium() {
        let portfolio = PortfolioState::initial();
        let no_haircut = StrategyConfig {
            bid_ask_spread_pct: 0.0,
            ..StrategyConfig::default()
        };
        let haircut = StrategyConfig {
            bid_ask_spread_pct: 0.10,
            ..StrategyConfig::default()
        };

        let gross = match evaluate(&market(2500.0), &portfolio, &no_haircut).unwrap() {
            Signal::SellPut { premium, .. } => premium,
            _ => unreachable!(),
        };
        let net = match evaluate(&market(2500.0), &portfolio, &haircut).unwrap() {
            Signal::SellPut { premium, .. } => premium,
            _ => unreachable!(),
        };
        assert!((net - gross * 0.9).abs() < 1e-9);
    }
}
