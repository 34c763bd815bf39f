//! Portfolio state: phase, underlying position, and open short option.

use serde::{Deserialize, Serialize};

/// Discrete strategy phase.
///
/// The wheel cycles through these four states. There is no terminal phase;
/// a simulation simply runs to the end of its price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Holding cash, no position and no open option.
    #[default]
    IdleCash,
    /// A short put is live.
    ShortPut,
    /// Holding the underlying with no open option.
    HoldingEth,
    /// Holding the underlying with a short call live against it.
    ShortCall,
}

/// Option contract type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionType {
    /// Put option.
    Put,
    /// Call option.
    Call,
}

/// Underlying holding, present only in `HoldingEth` and `ShortCall` phases.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Units held, equal to the configured contracts count.
    pub size: f64,
    /// Cost basis: the strike of the put that was assigned.
    pub entry_price: f64,
}

/// A live short option, present only in `ShortPut` and `ShortCall` phases.
///
/// A live put implies phase `ShortPut`; a live call implies `ShortCall`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpenOption {
    /// Contract type.
    pub option_type: OptionType,
    /// Strike price.
    pub strike: f64,
    /// Absolute delta at open.
    pub delta: f64,
    /// Per-contract premium, net of the bid-ask haircut.
    pub premium: f64,
    /// Day the option was sold.
    pub open_day: usize,
    /// Day the option expires: `open_day + cycle_length_days`.
    pub expiry_day: usize,
}

/// Full strategy portfolio state.
///
/// Created once per simulation via [`PortfolioState::initial`] and mutated
/// only through the event reducer. All counters are monotone non-decreasing
/// except `realized_pl`, which is a running sum of signed amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioState {
    /// Current strategy phase.
    pub phase: Phase,
    /// Underlying holding, present iff `phase ∈ {HoldingEth, ShortCall}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// Live short option, present iff `phase ∈ {ShortPut, ShortCall}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_option: Option<OpenOption>,
    /// Running realized P/L.
    pub realized_pl: f64,
    /// Gross premium collected across all option sales and rolls.
    pub total_premium_collected: f64,
    /// Number of assignments (put or call).
    pub total_assignments: u32,
    /// Number of deliberately skipped call cycles.
    pub total_skipped_cycles: u32,
}

impl PortfolioState {
    /// Starting state: idle cash, nothing open, all counters zero.
    #[must_use]
    pub fn initial() -> Self {
        Self {
            phase: Phase::IdleCash,
            position: None,
            open_option: None,
            realized_pl: 0.0,
            total_premium_collected: 0.0,
            total_assignments: 0,
            total_skipped_cycles: 0,
        }
    }

    /// Check whether the underlying is currently held.
    #[must_use]
    pub fn is_holding(&self) -> bool {
        self.position.is_some()
    }
}

impl Default for PortfolioState {
    fn default() -> Self {
        Self::initial()
    }
}
