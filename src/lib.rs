//! Wheel Engine - deterministic backtest core for the options wheel.
//!
//! An event-driven pipeline that consumes a daily price path (plus optional
//! volatility path) and produces:
//!
//! - A fully auditable log of strategy decisions and execution events
//! - Per-day portfolio snapshots
//! - An aggregate Monte Carlo summary across many seeds
//!
//! # Architecture
//!
//! Layers, lowest first; dependencies only flow upward:
//!
//! - [`paths`]: seeded PRNG and the four price models (GBM, Heston QE,
//!   Merton jump, Heston+jump)
//! - [`pricing`]: Black-Scholes price/delta and the inverse-delta strike
//!   solver
//! - [`models`] / [`state`]: the signal/event/state machine and its pure
//!   reducer
//! - [`rules`] / [`execution`]: priority-ordered strategy rules and the
//!   executor boundary between intent and fills
//! - [`simulation`]: the per-day driver producing the audit log
//! - [`montecarlo`] / [`insights`]: the seeded batch driver, aggregate
//!   metrics, and advisory generation
//!
//! # Integration surface
//!
//! Consumers (the UI, a future live adapter) use exactly five functions:
//! [`generate_prices`], [`simulate`], [`run_monte_carlo`], [`rerun_single`],
//! and [`generate_insights`]. Every exposed function is pure and produces
//! identical `f64` outputs for identical inputs.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod execution;
pub mod insights;
pub mod models;
pub mod montecarlo;
pub mod paths;
pub mod pricing;
pub mod rules;
pub mod simulation;
pub mod state;

// Re-export the integration surface and the types it carries.
pub use config::{
    AdaptiveCallsConfig, IvRvSpreadConfig, RollCallConfig, StrategyConfig, DAYS_PER_YEAR,
};
pub use error::{ConfigError, MarketError};
pub use execution::{Executor, SimulatedExecutor};
pub use insights::{generate_insights, Insight, InsightLevel};
pub use models::{
    DailyState, Event, MarketSnapshot, OpenOption, OptionType, Phase, PortfolioState, Position,
    Signal, SignalLogEntry,
};
pub use montecarlo::{
    classify_regime, rerun_single, run_monte_carlo, MarketParams, MonteCarloResult, Regime,
    RegimeStats, RunSummary, SingleRun,
};
pub use paths::{
    generate_prices, GeneratedPath, HestonParams, JumpParams, PathParams, PriceModel, SplitMix32,
};
pub use pricing::{bs_delta, bs_price, find_strike_for_delta, norm_cdf};
pub use rules::{
    adaptive_call_rule, base_put_rule, default_rules, evaluate_rules, low_premium_skip_rule,
    roll_call_rule, RuleFn, TradingRule,
};
pub use simulation::{
    compute_realized_vol, is_decision_point, simulate, simulate_with_executor, SimulationResult,
    SimulationSummary,
};
pub use state::apply_events;
