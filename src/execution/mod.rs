//! Executor boundary between strategy intent and execution facts.
//!
//! The contract has exactly two operations, both pure with respect to their
//! inputs. Rules never talk to an executor directly; the simulation driver
//! hands it the winning signal and folds the resulting events into the
//! portfolio. A live exchange adapter is simply another implementation of
//! the same trait; rule code never changes.

mod simulated;

pub use simulated::SimulatedExecutor;

use crate::config::StrategyConfig;
use crate::models::{Event, MarketSnapshot, PortfolioState, Signal};

/// Translates strategy intent into execution facts.
pub trait Executor {
    /// Resolve an open option that has reached its expiry day.
    ///
    /// Returns an empty list when there is no open option or it has not yet
    /// expired. Otherwise emits exactly one `OptionExpired`, followed by the
    /// underlying purchase or sale when the option was assigned. Expiry
    /// never books premium; premium is booked once, at sale.
    fn resolve_expiration(
        &self,
        market: &MarketSnapshot,
        portfolio: &PortfolioState,
        config: &StrategyConfig,
    ) -> Vec<Event>;

    /// Translate a signal into its event sequence.
    ///
    /// `Hold` yields no events, as do signals whose preconditions no longer
    /// hold (closing without a position, rolling without an open option).
    fn execute(
        &self,
        signal: &Signal,
        market: &MarketSnapshot,
        portfolio: &PortfolioState,
        config: &StrategyConfig,
    ) -> Vec<Event>;
}
