//! Monte Carlo driver and aggregate result.
//!
//! Runs one seeded simulation per seed `1..=num_runs`, summarizes each into
//! a [`RunSummary`], and reduces the batch into a [`MonteCarloResult`]. The
//! fan-out may run in parallel because every seed owns its pipeline
//! exclusively; results are collected in seed order and aggregated serially,
//! left to right, so the output is byte-identical to a serial run.

mod stats;
mod summary;

pub use summary::{classify_regime, Regime, RunSummary};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::StrategyConfig;
use crate::error::MarketError;
use crate::paths::{
    generate_prices, GeneratedPath, HestonParams, JumpParams, PathParams, PriceModel,
};
use crate::rules::default_rules;
use crate::simulation::{simulate, SimulationResult};

use stats::{mean, median, percentile, sorted_copy};

/// Market inputs shared by every run of a Monte Carlo batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketParams {
    /// Price on day 0.
    pub start_price: f64,
    /// Number of daily observations per path.
    pub days: usize,
    /// Annualized volatility.
    pub annual_vol: f64,
    /// Annualized drift.
    pub annual_drift: f64,
    /// Price model; defaults to GBM.
    #[serde(default)]
    pub model: PriceModel,
    /// Heston parameters, required by the Heston variants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heston: Option<HestonParams>,
    /// Jump parameters, required by the jump variants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jump: Option<JumpParams>,
}

impl MarketParams {
    fn path_params(&self, seed: u32) -> PathParams {
        PathParams {
            start_price: self.start_price,
            days: self.days,
            annual_drift: self.annual_drift,
            annual_vol: self.annual_vol,
            seed,
            model: self.model,
            heston: self.heston,
            jump: self.jump,
        }
    }
}

/// Per-regime slice of the aggregate result.
///
/// All three regimes are always reported; a regime with no runs carries a
/// zero count and zeroed means.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegimeStats {
    /// The regime.
    pub regime: Regime,
    /// Number of runs classified into this regime.
    pub count: usize,
    /// Mean strategy APR across those runs.
    pub mean_apr: f64,
    /// Mean buy-and-hold APR across those runs.
    pub mean_benchmark_apr: f64,
    /// Mean APR edge over buy-and-hold.
    pub mean_alpha: f64,
    /// Mean Sharpe ratio across those runs.
    pub mean_sharpe: f64,
    /// Share of profitable runs.
    pub win_rate: f64,
    /// Mean peak-to-trough drawdown.
    pub mean_max_drawdown: f64,
}

/// Aggregate result of a Monte Carlo batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloResult {
    /// Number of runs in the batch.
    pub num_runs: usize,
    /// Share of runs with positive total P/L.
    pub win_rate: f64,
    /// Mean strategy APR.
    pub mean_apr: f64,
    /// Median strategy APR.
    pub median_apr: f64,
    /// 5th percentile APR.
    pub apr_p5: f64,
    /// 25th percentile APR.
    pub apr_p25: f64,
    /// 75th percentile APR.
    pub apr_p75: f64,
    /// 95th percentile APR.
    pub apr_p95: f64,
    /// Mean total P/L.
    pub mean_pl: f64,
    /// Median total P/L.
    pub median_pl: f64,
    /// Mean peak-to-trough drawdown.
    pub mean_max_drawdown: f64,
    /// Mean buy-and-hold APR.
    pub mean_benchmark_apr: f64,
    /// Median buy-and-hold APR.
    pub median_benchmark_apr: f64,
    /// Mean buy-and-hold P/L.
    pub mean_benchmark_pl: f64,
    /// Mean buy-and-hold drawdown.
    pub mean_benchmark_max_dd: f64,
    /// Mean strategy Sharpe ratio.
    pub mean_sharpe: f64,
    /// Mean strategy Sortino ratio.
    pub mean_sortino: f64,
    /// Mean benchmark Sharpe ratio.
    pub mean_benchmark_sharpe: f64,
    /// Mean benchmark Sortino ratio.
    pub mean_benchmark_sortino: f64,
    /// Mean assignments per run.
    pub mean_assignments: f64,
    /// Mean completed wheel cycles per run.
    pub mean_full_cycles: f64,
    /// Mean skipped call cycles per run.
    pub mean_skipped_cycles: f64,
    /// Mean gross premium collected per run.
    pub mean_premium_collected: f64,
    /// Per-regime breakdown, always three entries.
    pub regime_breakdown: Vec<RegimeStats>,
    /// Every per-run summary, in seed order.
    pub runs: Vec<RunSummary>,
}

/// Path and full simulation output of a single re-examined seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleRun {
    /// The regenerated price path.
    pub path: GeneratedPath,
    /// The full simulation output for that path.
    pub result: SimulationResult,
}

/// Run `num_runs` seeded simulations and aggregate them.
///
/// Seeds run `1..=num_runs`; the default rule set drives every run. The
/// aggregation is order-independent (means, medians, percentiles over the
/// full batch), so the parallel fan-out reproduces a serial run exactly.
///
/// # Errors
///
/// Returns [`MarketError`] when `num_runs` is zero or the market parameters
/// fail path-generator validation.
pub fn run_monte_carlo(
    market: &MarketParams,
    config: &StrategyConfig,
    num_runs: usize,
) -> Result<MonteCarloResult, MarketError> {
    if num_runs == 0 {
        return Err(MarketError::NoRuns);
    }
    crate::paths::validate(&market.path_params(1))?;

    info!(
        num_runs,
        days = market.days,
        model = ?market.model,
        "starting monte carlo batch"
    );

    let rules = default_rules();
    let runs: Vec<RunSummary> = (1..num_runs + 1)
        .into_par_iter()
        .map(|run_index| {
            let seed = run_index as u32;
            let path = generate_prices(&market.path_params(seed))?;
            let result = simulate(&path.prices, &rules, config, path.iv_path.as_deref());
            debug!(seed, "run complete");
            Ok(summary::summarize_run(&path.prices, &result, config, seed))
        })
        .collect::<Result<Vec<_>, MarketError>>()?;

    let aggregate = aggregate_runs(runs);
    info!(
        num_runs = aggregate.num_runs,
        win_rate = aggregate.win_rate,
        mean_apr = aggregate.mean_apr,
        "monte carlo batch complete"
    );
    Ok(aggregate)
}

/// Regenerate one seed's path and rerun its full simulation.
///
/// # Errors
///
/// Returns [`MarketError`] when the market parameters fail validation.
pub fn rerun_single(
    market: &MarketParams,
    config: &StrategyConfig,
    seed: u32,
) -> Result<SingleRun, MarketError> {
    let path = generate_prices(&market.path_params(seed))?;
    let result = simulate(&path.prices, &default_rules(), config, path.iv_path.as_deref());
    Ok(SingleRun { path, result })
}

fn aggregate_runs(runs: Vec<RunSummary>) -> MonteCarloResult {
    let num_runs = runs.len();
    let count = num_runs as f64;

    let aprs: Vec<f64> = runs.iter().map(|run| run.apr).collect();
    let pls: Vec<f64> = runs.iter().map(|run| run.total_pl).collect();
    let benchmark_aprs: Vec<f64> = runs.iter().map(|run| run.benchmark_apr).collect();

    let sorted_aprs = sorted_copy(&aprs);
    let sorted_pls = sorted_copy(&pls);
    let sorted_benchmark_aprs = sorted_copy(&benchmark_aprs);

    let wins = runs.iter().filter(|run| run.total_pl > 0.0).count();

    let mean_of = |extract: fn(&RunSummary) -> f64| -> f64 {
        runs.iter().map(extract).sum::<f64>() / count
    };

    let regime_breakdown = Regime::ALL
        .iter()
        .map(|&regime| regime_stats(regime, &runs))
        .collect();

    MonteCarloResult {
        num_runs,
        win_rate: wins as f64 / count,
        mean_apr: mean(&aprs).unwrap_or(0.0),
        median_apr: median(&sorted_aprs).unwrap_or(0.0),
        apr_p5: percentile(&sorted_aprs, 0.05).unwrap_or(0.0),
        apr_p25: percentile(&sorted_aprs, 0.25).unwrap_or(0.0),
        apr_p75: percentile(&sorted_aprs, 0.75).unwrap_or(0.0),
        apr_p95: percentile(&sorted_aprs, 0.95).unwrap_or(0.0),
        mean_pl: mean(&pls).unwrap_or(0.0),
        median_pl: median(&sorted_pls).unwrap_or(0.0),
        mean_max_drawdown: mean_of(|run| run.max_drawdown),
        mean_benchmark_apr: mean(&benchmark_aprs).unwrap_or(0.0),
        median_benchmark_apr: median(&sorted_benchmark_aprs).unwrap_or(0.0),
        mean_benchmark_pl: mean_of(|run| run.benchmark_pl),
        mean_benchmark_max_dd: mean_of(|run| run.benchmark_max_dd),
        mean_sharpe: mean_of(|run| run.sharpe),
        mean_sortino: mean_of(|run| run.sortino),
        mean_benchmark_sharpe: mean_of(|run| run.benchmark_sharpe),
        mean_benchmark_sortino: mean_of(|run| run.benchmark_sortino),
        mean_assignments: mean_of(|run| f64::from(run.assignments)),
        mean_full_cycles: mean_of(|run| f64::from(run.full_cycles)),
        mean_skipped_cycles: mean_of(|run| f64::from(run.skipped_cycles)),
        mean_premium_collected: mean_of(|run| run.premium_collected),
        regime_breakdown,
        runs,
    }
}

fn regime_stats(regime: Regime, runs: &[RunSummary]) -> RegimeStats {
    let members: Vec<&RunSummary> = runs.iter().filter(|run| run.regime == regime).collect();
    let count = members.len();
    if count == 0 {
        return RegimeStats {
            regime,
            count: 0,
            mean_apr: 0.0,
            mean_benchmark_apr: 0.0,
            mean_alpha: 0.0,
            mean_sharpe: 0.0,
            win_rate: 0.0,
            mean_max_drawdown: 0.0,
        };
    }

    let n = count as f64;
    let mean_apr = members.iter().map(|run| run.apr).sum::<f64>() / n;
    let mean_benchmark_apr = members.iter().map(|run| run.benchmark_apr).sum::<f64>() / n;
    let wins = members.iter().filter(|run| run.total_pl > 0.0).count();

    RegimeStats {
        regime,
        count,
        mean_apr,
        mean_benchmark_apr,
        mean_alpha: members
            .iter()
            .map(|run| run.apr - run.benchmark_apr)
            .sum::<f64>()
            / n,
        mean_sharpe: members.iter().map(|run| run.sharpe).sum::<f64>() / n,
        win_rate: wins as f64 / n,
        mean_max_drawdown: members.iter().map(|run| run.max_drawdown).sum::<f64>() / n,
    }
}
