//! Execution facts emitted by an executor and folded by the reducer.

use serde::{Deserialize, Serialize};

use super::portfolio::OptionType;

/// An execution fact.
///
/// Events are the only way portfolio state changes. Money fields on events
/// are aggregate amounts across the whole lot (premium × contracts), with the
/// single exception of `OptionSold::premium`, which stays per-contract
/// because it describes the open option itself rather than a cash flow; the
/// paired `PremiumCollected` event carries the aggregate booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Event {
    /// A short option was opened.
    OptionSold {
        /// Contract type.
        option_type: OptionType,
        /// Strike sold.
        strike: f64,
        /// Absolute delta at open.
        delta: f64,
        /// Per-contract premium, net of the bid-ask haircut.
        premium: f64,
        /// Day the option was sold.
        open_day: usize,
        /// Day the option expires.
        expiry_day: usize,
        /// Order fees: `fee_per_trade × contracts`.
        fees: f64,
    },
    /// An open option reached its expiry day.
    ///
    /// Expiry never books premium; premium is booked once, at sale.
    OptionExpired {
        /// Contract type.
        option_type: OptionType,
        /// Strike of the expired option.
        strike: f64,
        /// Spot price at expiry.
        spot: f64,
        /// Whether the option finished in the money against the seller.
        assigned: bool,
    },
    /// Underlying bought through put assignment.
    EthBought {
        /// Purchase price (the put strike).
        price: f64,
        /// Units bought.
        size: f64,
    },
    /// Underlying sold through call assignment.
    EthSold {
        /// Sale price (the call strike).
        price: f64,
        /// Units sold.
        size: f64,
        /// Realized P/L: `(price - entry_price) × size`.
        pl: f64,
    },
    /// Premium booked at option sale.
    PremiumCollected {
        /// Gross premium: per-contract premium × contracts.
        gross: f64,
        /// Order fees.
        fees: f64,
        /// Net booking: `gross - fees`.
        net: f64,
    },
    /// A call cycle was deliberately skipped.
    CycleSkipped {
        /// Name of the rule that chose to skip.
        rule: String,
        /// Why the cycle was skipped.
        reason: String,
    },
    /// The underlying position was closed at spot.
    PositionClosed {
        /// Sale price.
        price: f64,
        /// Units sold.
        size: f64,
        /// Realized P/L: `(price - entry_price) × size`.
        pl: f64,
    },
    /// An open short call was atomically replaced by a new one.
    OptionRolled {
        /// Strike of the closed call.
        old_strike: f64,
        /// Strike of the replacement call.
        new_strike: f64,
        /// Absolute delta of the replacement call.
        new_delta: f64,
        /// Gross premium originally collected for the closed call.
        original_premium: f64,
        /// Aggregate buy-back cost of the closed call.
        roll_cost: f64,
        /// Aggregate gross premium of the replacement call.
        new_premium: f64,
        /// Order fees for both legs: `2 × fee_per_trade × contracts`.
        fees: f64,
        /// Lot size, kept so the per-contract premium of the new leg is
        /// recoverable from the aggregate amounts.
        contracts: f64,
        /// Day the replacement call was opened.
        open_day: usize,
        /// Day the replacement call expires.
        expiry_day: usize,
    },
}

impl Event {
    /// Check whether this event is an expiry that assigned.
    #[must_use]
    pub fn is_assignment(&self) -> bool {
        matches!(self, Self::OptionExpired { assigned: true, .. })
    }
}
