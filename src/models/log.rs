//! Audit log entries: per-signal snapshots and per-day portfolio state.

use serde::{Deserialize, Serialize};

use super::event::Event;
use super::market::MarketSnapshot;
use super::portfolio::{Phase, PortfolioState};
use super::signal::Signal;

/// Deep snapshot pair framing the effect of a single signal on one day.
///
/// The log owns its entries exclusively: `portfolio_before` and
/// `portfolio_after` are independent copies, so later mutation of live state
/// can never rewrite history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalLogEntry {
    /// Day the signal was produced.
    pub day: usize,
    /// Market observation the rules saw.
    pub market: MarketSnapshot,
    /// Portfolio state before the events were applied.
    pub portfolio_before: PortfolioState,
    /// The signal (or `Hold` for pure expiry resolution).
    pub signal: Signal,
    /// Events the executor produced for this signal.
    pub events: Vec<Event>,
    /// Portfolio state after the events were applied.
    pub portfolio_after: PortfolioState,
}

/// End-of-day portfolio snapshot, one per simulated day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyState {
    /// Day index.
    pub day: usize,
    /// Spot price.
    pub price: f64,
    /// Strategy phase at end of day.
    pub phase: Phase,
    /// Realized P/L at end of day.
    pub cumulative_pl: f64,
    /// Mark-to-market P/L of the held underlying, 0 when not holding.
    pub unrealized_pl: f64,
    /// Whether the underlying is held.
    pub holding_eth: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_entry_snapshots_are_independent() {
        let mut live = PortfolioState::initial();
        let entry = SignalLogEntry {
            day: 0,
            market: MarketSnapshot {
                day: 0,
                spot: 2500.0,
                iv: None,
                realized_vol: None,
            },
            portfolio_before: live.clone(),
            signal: Signal::Hold,
            events: Vec::new(),
            portfolio_after: live.clone(),
        };

        live.realized_pl = 999.0;
        assert!((entry.portfolio_after.realized_pl - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_daily_state_serialization() {
        let daily = DailyState {
            day: 5,
            price: 2450.0,
            phase: Phase::HoldingEth,
            cumulative_pl: 12.5,
            unrealized_pl: -50.0,
            holding_eth: true,
        };
        let json = serde_json::to_value(daily).unwrap();
        assert_eq!(json.get("phase").unwrap(), "holding_eth");
        assert_eq!(json.get("holding_eth").unwrap(), true);
    }
}
