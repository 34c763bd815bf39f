//! Priority-ordered rule evaluation.

use crate::config::StrategyConfig;
use crate::models::{MarketSnapshot, PortfolioState, Signal};

use super::TradingRule;

/// Evaluate a rule set against one market observation.
///
/// Rules are sorted by ascending priority (stable, so ties keep insertion
/// order), and the first rule to produce a signal wins. When every rule
/// declines, the result is [`Signal::Hold`]. Rules are total; evaluation
/// cannot fail.
#[must_use]
pub fn evaluate_rules(
    rules: &[TradingRule],
    market: &MarketSnapshot,
    portfolio: &PortfolioState,
    config: &StrategyConfig,
) -> Signal {
    let mut ordered: Vec<&TradingRule> = rules.iter().collect();
    ordered.sort_by_key(|rule| rule.priority);

    for rule in ordered {
        if let Some(signal) = (rule.evaluate)(market, portfolio, config) {
            return signal;
        }
    }
    Signal::Hold
}
