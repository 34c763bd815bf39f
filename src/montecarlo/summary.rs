//! Per-run metrics: P/L, APR, drawdown, risk-adjusted ratios, and the
//! regime classification of the underlying path.

use serde::{Deserialize, Serialize};

use crate::config::{StrategyConfig, DAYS_PER_YEAR};
use crate::models::{Event, OptionType};
use crate::simulation::SimulationResult;

use super::stats::{mean, std_dev};

/// Coarse classification of the underlying's annualized return over the
/// simulated window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// Annualized return above +20%.
    Bull,
    /// Annualized return below -20%.
    Bear,
    /// Everything in between.
    Sideways,
}

impl Regime {
    /// All regimes in canonical reporting order.
    pub const ALL: [Self; 3] = [Self::Bull, Self::Bear, Self::Sideways];

    /// Display name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bull => "bull",
            Self::Bear => "bear",
            Self::Sideways => "sideways",
        }
    }
}

/// Classify a window by its annualized underlying return.
///
/// Boundaries are inclusive-exclusive: exactly +20% annualized is still
/// sideways, only strictly above is bull (and symmetrically for bear).
#[must_use]
pub fn classify_regime(underlying_return: f64, days: usize) -> Regime {
    let annualized = underlying_return * DAYS_PER_YEAR / days.saturating_sub(1).max(1) as f64;
    if annualized > 0.20 {
        Regime::Bull
    } else if annualized < -0.20 {
        Regime::Bear
    } else {
        Regime::Sideways
    }
}

/// Deterministic roll-up of one seeded simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Seed that generated this run's path.
    pub seed: u32,
    /// Realized plus unrealized P/L on the last day.
    pub total_pl: f64,
    /// Annualized percentage return on capital at risk.
    pub apr: f64,
    /// Peak-to-trough drawdown of the daily equity curve.
    pub max_drawdown: f64,
    /// Completed put-call-put loops (call assignments).
    pub full_cycles: u32,
    /// Assignments over the run.
    pub assignments: u32,
    /// Skipped call cycles over the run.
    pub skipped_cycles: u32,
    /// Gross premium collected over the run.
    pub premium_collected: f64,
    /// Buy-and-hold P/L over the same path.
    pub benchmark_pl: f64,
    /// Buy-and-hold APR.
    pub benchmark_apr: f64,
    /// Buy-and-hold peak-to-trough drawdown.
    pub benchmark_max_dd: f64,
    /// Annualized Sharpe ratio of daily strategy returns.
    pub sharpe: f64,
    /// Annualized Sortino ratio of daily strategy returns.
    pub sortino: f64,
    /// Annualized Sharpe ratio of the buy-and-hold benchmark.
    pub benchmark_sharpe: f64,
    /// Annualized Sortino ratio of the buy-and-hold benchmark.
    pub benchmark_sortino: f64,
    /// Simple return of the underlying over the window.
    pub underlying_return: f64,
    /// Regime classification of the window.
    pub regime: Regime,
}

/// Peak-to-trough drawdown of an equity curve; 0 for a non-decreasing one.
fn max_drawdown(curve: impl Iterator<Item = f64>) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut worst = 0.0_f64;
    for value in curve {
        peak = peak.max(value);
        worst = worst.max(peak - value);
    }
    worst
}

/// Annualized Sharpe and Sortino over a daily return series.
///
/// Both are 0 with fewer than two returns; Sharpe is 0 when the return
/// standard deviation is 0 and Sortino when the downside deviation is 0.
/// Downside deviation uses the same `n - 1` denominator as the full-series
/// sample deviation.
fn sharpe_sortino(returns: &[f64], risk_free_daily: f64) -> (f64, f64) {
    if returns.len() < 2 {
        return (0.0, 0.0);
    }
    let Some(avg) = mean(returns) else {
        return (0.0, 0.0);
    };
    let excess = avg - risk_free_daily;
    let annualize = DAYS_PER_YEAR.sqrt();

    let sharpe = match std_dev(returns) {
        Some(std) if std > 0.0 => excess / std * annualize,
        _ => 0.0,
    };

    let downside_sum: f64 = returns
        .iter()
        .filter(|r| **r < risk_free_daily)
        .map(|r| (r - risk_free_daily) * (r - risk_free_daily))
        .sum();
    let downside = (downside_sum / (returns.len() - 1) as f64).sqrt();
    let sortino = if downside > 0.0 {
        excess / downside * annualize
    } else {
        0.0
    };

    (sharpe, sortino)
}

/// Summarize one simulation into its per-run metrics.
#[must_use]
pub(super) fn summarize_run(
    prices: &[f64],
    result: &SimulationResult,
    config: &StrategyConfig,
    seed: u32,
) -> RunSummary {
    let days = prices.len();
    let first_price = prices[0];
    let last_price = prices[days - 1];
    let capital_at_risk = first_price * config.contracts;
    let years_elapsed = days as f64 / DAYS_PER_YEAR;
    let risk_free_daily = config.risk_free_rate / DAYS_PER_YEAR;

    let equity: Vec<f64> = result
        .daily_states
        .iter()
        .map(|daily| daily.cumulative_pl + daily.unrealized_pl)
        .collect();
    let last_equity = equity.last().copied().unwrap_or(0.0);

    let apr = (result.summary.total_realized_pl / capital_at_risk) / years_elapsed * 100.0;

    let full_cycles = result
        .signal_log
        .iter()
        .flat_map(|entry| entry.events.iter())
        .filter(|event| {
            matches!(
                event,
                Event::OptionExpired {
                    option_type: OptionType::Call,
                    assigned: true,
                    ..
                }
            )
        })
        .count() as u32;

    let returns: Vec<f64> = equity
        .windows(2)
        .map(|pair| (pair[1] - pair[0]) / capital_at_risk)
        .collect();
    let (sharpe, sortino) = sharpe_sortino(&returns, risk_free_daily);

    let benchmark_pl = (last_price - first_price) * config.contracts;
    let benchmark_apr = (benchmark_pl / capital_at_risk) / years_elapsed * 100.0;
    let benchmark_returns: Vec<f64> = prices
        .windows(2)
        .map(|pair| (pair[1] - pair[0]) / first_price)
        .collect();
    let (benchmark_sharpe, benchmark_sortino) =
        sharpe_sortino(&benchmark_returns, risk_free_daily);

    let underlying_return = (last_price - first_price) / first_price;

    RunSummary {
        seed,
        total_pl: last_equity,
        apr,
        max_drawdown: max_drawdown(equity.iter().copied()),
        full_cycles,
        assignments: result.summary.total_assignments,
        skipped_cycles: result.summary.total_skipped_cycles,
        premium_collected: result.summary.total_premium_collected,
        benchmark_pl,
        benchmark_apr,
        benchmark_max_dd: max_drawdown(
            prices
                .iter()
                .map(|price| (price - first_price) * config.contracts),
        ),
        sharpe,
        sortino,
        benchmark_sharpe,
        benchmark_sortino,
        underlying_return,
        regime: classify_regime(underlying_return, days),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::default_rules;
    use crate::simulation::simulate;

    #[test]
    fn test_regime_boundaries() {
        // 31 days -> 30 steps. 0.016 over the window annualizes to ~19.5%
        // (sideways); 0.017 annualizes to ~20.7% (bull). The +20% line
        // itself belongs to sideways: only strictly above is bull.
        let days = 31;
        assert_eq!(classify_regime(0.016, days), Regime::Sideways);
        assert_eq!(classify_regime(0.017, days), Regime::Bull);
        assert_eq!(classify_regime(-0.016, days), Regime::Sideways);
        assert_eq!(classify_regime(-0.017, days), Regime::Bear);
    }

    #[test]
    fn test_regime_single_day_window() {
        assert_eq!(classify_regime(0.0, 1), Regime::Sideways);
        assert_eq!(classify_regime(0.01, 1), Regime::Bull);
    }

    #[test]
    fn test_max_drawdown() {
        let curve = [0.0, 10.0, 4.0, 12.0, 2.0, 8.0];
        assert!((max_drawdown(curve.iter().copied()) - 10.0).abs() < 1e-12);

        let rising = [0.0, 1.0, 2.0, 3.0];
        assert!((max_drawdown(rising.iter().copied()) - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_sharpe_sortino_degenerate_cases() {
        assert_eq!(sharpe_sortino(&[], 0.0), (0.0, 0.0));
        assert_eq!(sharpe_sortino(&[0.01], 0.0), (0.0, 0.0));
        // Constant returns: zero deviation on both sides.
        assert_eq!(sharpe_sortino(&[0.01, 0.01, 0.01], 0.0), (0.0, 0.0));
    }

    #[test]
    fn test_sharpe_positive_for_steady_gains() {
        let returns = [0.011, 0.009, 0.012, 0.008, 0.010];
        let (sharpe, sortino) = sharpe_sortino(&returns, 0.0);
        assert!(sharpe > 0.0);
        // No sub-risk-free days: Sortino degenerates to 0 by contract.
        assert!((sortino - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_summarize_flat_run() {
        let prices = vec![2500.0; 30];
        let config = StrategyConfig::default();
        let result = simulate(&prices, &default_rules(), &config, None);
        let summary = summarize_run(&prices, &result, &config, 1);

        assert_eq!(summary.seed, 1);
        assert_eq!(summary.regime, Regime::Sideways);
        assert!((summary.underlying_return - 0.0).abs() < f64::EPSILON);
        assert!((summary.benchmark_pl - 0.0).abs() < f64::EPSILON);
        // Flat path: every put expires OTM, premium accumulates.
        assert!(summary.total_pl > 0.0);
        assert!(summary.premium_collected > 0.0);
        assert!(summary.apr > 0.0);
        assert!(summary.sharpe.is_finite() && summary.sortino.is_finite());
    }

    #[test]
    fn test_benchmark_metrics_on_trending_path() {
        // Rising path with a small deterministic wobble so the benchmark
        // return series has non-zero deviation.
        let prices: Vec<f64> = (0..30)
            .map(|i| 2500.0 + 10.0 * f64::from(i) + 3.0 * f64::from(i % 2))
            .collect();
        let config = StrategyConfig::default();
        let result = simulate(&prices, &default_rules(), &config, None);
        let summary = summarize_run(&prices, &result, &config, 3);

        assert!(summary.benchmark_pl > 0.0);
        assert!(summary.benchmark_apr > 0.0);
        assert!(summary.benchmark_sharpe > 0.0);
    }
}
