//! Daily simulation driver.
//!
//! Walks the price series one day at a time: observe the market, resolve any
//! expired option, ask the rules for a signal at decision points, hand the
//! signal to the executor, fold the resulting events, and snapshot the day.
//! The driver reads no randomness of its own (all of it is baked into the
//! price path), so identical inputs produce byte-identical logs. Nothing in
//! this module can fail.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{StrategyConfig, DAYS_PER_YEAR};
use crate::execution::{Executor, SimulatedExecutor};
use crate::models::{
    DailyState, MarketSnapshot, Phase, PortfolioState, Signal, SignalLogEntry,
};
use crate::rules::{evaluate_rules, TradingRule};
use crate::state::apply_events;

/// Final-portfolio roll-up of one simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    /// Realized P/L at the end of the run.
    pub total_realized_pl: f64,
    /// Gross premium collected over the run.
    pub total_premium_collected: f64,
    /// Assignments over the run.
    pub total_assignments: u32,
    /// Skipped call cycles over the run.
    pub total_skipped_cycles: u32,
    /// Phase on the last day.
    pub final_phase: Phase,
    /// Last simulated day index.
    pub final_day: usize,
}

/// Output of one simulation: the full audit log, the per-day state series,
/// and the final summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// One entry per signal (including `Hold` entries framing expiries).
    pub signal_log: Vec<SignalLogEntry>,
    /// One entry per simulated day.
    pub daily_states: Vec<DailyState>,
    /// Final-portfolio roll-up.
    pub summary: SimulationSummary,
}

/// Annualized realized volatility from daily log returns.
///
/// Uses the sample standard deviation of the `lookback` log returns ending
/// at `day`, annualized by `sqrt(365)`. Returns `None` while the window is
/// not yet full (`day < lookback`) and `0` for a constant price series.
#[must_use]
pub fn compute_realized_vol(prices: &[f64], day: usize, lookback: usize) -> Option<f64> {
    if lookback == 0 || day < lookback || day >= prices.len() {
        return None;
    }

    let mut returns = Vec::with_capacity(lookback);
    for i in (day - lookback + 1)..=day {
        returns.push((prices[i] / prices[i - 1]).ln());
    }
    if returns.len() < 2 {
        return Some(0.0);
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns
        .iter()
        .map(|r| (r - mean) * (r - mean))
        .sum::<f64>()
        / (n - 1.0);
    Some(variance.sqrt() * DAYS_PER_YEAR.sqrt())
}

/// Whether `day` asks the strategy for a signal: no open option, or the open
/// option has reached its expiry day.
#[must_use]
pub fn is_decision_point(day: usize, portfolio: &PortfolioState) -> bool {
    portfolio
        .open_option
        .as_ref()
        .map_or(true, |open| day >= open.expiry_day)
}

fn is_roll_trigger(
    market: &MarketSnapshot,
    portfolio: &PortfolioState,
    config: &StrategyConfig,
) -> bool {
    let Some(roll) = config.roll_call.as_ref() else {
        return false;
    };
    if portfolio.phase != Phase::ShortCall {
        return false;
    }
    portfolio
        .open_option
        .as_ref()
        .is_some_and(|open| market.spot >= open.strike * (1.0 + roll.itm_threshold_pct))
}

/// Run a simulation with the default [`SimulatedExecutor`].
#[must_use]
pub fn simulate(
    prices: &[f64],
    rules: &[TradingRule],
    config: &StrategyConfig,
    iv_path: Option<&[f64]>,
) -> SimulationResult {
    simulate_with_executor(prices, rules, config, iv_path, &SimulatedExecutor)
}

/// Run a simulation against any executor implementation.
///
/// The executor is held by reference; the rule set never learns which
/// implementation is behind it.
#[must_use]
pub fn simulate_with_executor<E: Executor>(
    prices: &[f64],
    rules: &[TradingRule],
    config: &StrategyConfig,
    iv_path: Option<&[f64]>,
    executor: &E,
) -> SimulationResult {
    let mut portfolio = PortfolioState::initial();
    let mut signal_log = Vec::new();
    let mut daily_states = Vec::with_capacity(prices.len());

    for (day, &spot) in prices.iter().enumerate() {
        let realized_vol = config
            .iv_rv_spread
            .as_ref()
            .and_then(|spread| compute_realized_vol(prices, day, spread.lookback_days));
        let market = MarketSnapshot {
            day,
            spot,
            iv: iv_path.and_then(|path| path.get(day).copied()),
            realized_vol,
        };

        if is_decision_point(day, &portfolio) || is_roll_trigger(&market, &portfolio, config) {
            // Settle an expired option first so the rules see the
            // post-expiry phase.
            if portfolio
                .open_option
                .as_ref()
                .is_some_and(|open| day >= open.expiry_day)
            {
                let portfolio_before = portfolio.clone();
                let events = executor.resolve_expiration(&market, &portfolio, config);
                if !events.is_empty() {
                    let portfolio_after = apply_events(&portfolio, &events);
                    signal_log.push(SignalLogEntry {
                        day,
                        market: market.clone(),
                        portfolio_before,
                        signal: Signal::Hold,
                        events,
                        portfolio_after: portfolio_after.clone(),
                    });
                    portfolio = portfolio_after;
                }
            }

            let portfolio_before = portfolio.clone();
            let signal = evaluate_rules(rules, &market, &portfolio, config);
            if !signal.is_hold() {
                debug!(
                    day,
                    rule = signal.rule_name().unwrap_or_default(),
                    "executing signal"
                );
                let events = executor.execute(&signal, &market, &portfolio, config);
                let portfolio_after = apply_events(&portfolio, &events);
                signal_log.push(SignalLogEntry {
                    day,
                    market: market.clone(),
                    portfolio_before,
                    signal,
                    events,
                    portfolio_after: portfolio_after.clone(),
                });
                portfolio = portfolio_after;
            }
        }

        let unrealized_pl = portfolio
            .position
            .as_ref()
            .map_or(0.0, |position| (spot - position.entry_price) * position.size);
        daily_states.push(DailyState {
            day,
            price: spot,
            phase: portfolio.phase,
            cumulative_pl: portfolio.realized_pl,
            unrealized_pl,
            holding_eth: portfolio.position.is_some(),
        });
    }

    let summary = SimulationSummary {
        total_realized_pl: portfolio.realized_pl,
        total_premium_collected: portfolio.total_premium_collected,
        total_assignments: portfolio.total_assignments,
        total_skipped_cycles: portfolio.total_skipped_cycles,
        final_phase: portfolio.phase,
        final_day: prices.len().saturating_sub(1),
    };

    SimulationResult {
        signal_log,
        daily_states,
        summary,
    }
}
