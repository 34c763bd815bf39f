//! Strategy intent produced by rule evaluation.

use serde::{Deserialize, Serialize};

/// Strategy intent for one decision point.
///
/// A signal says what the strategy *wants*; only executor [`Event`]s say what
/// actually happened. Premium-like amounts carried by signals are
/// per-contract. Every non-`Hold` variant records the producing rule and a
/// human-readable reason for the audit log.
///
/// [`Event`]: super::Event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    /// Open a short put at the given strike.
    SellPut {
        /// Strike to sell.
        strike: f64,
        /// Absolute delta of the candidate put.
        delta: f64,
        /// Per-contract premium, net of the bid-ask haircut.
        premium: f64,
        /// Name of the producing rule.
        rule: String,
        /// Why the rule fired.
        reason: String,
    },
    /// Open a short call against the held underlying.
    SellCall {
        /// Strike to sell.
        strike: f64,
        /// Absolute delta of the candidate call.
        delta: f64,
        /// Per-contract premium, net of the bid-ask haircut.
        premium: f64,
        /// Name of the producing rule.
        rule: String,
        /// Why the rule fired.
        reason: String,
    },
    /// Stay in the holding phase one cycle without selling a call.
    Skip {
        /// Name of the producing rule.
        rule: String,
        /// Why the rule fired.
        reason: String,
    },
    /// Sell the underlying at spot and return to idle cash.
    ClosePosition {
        /// Name of the producing rule.
        rule: String,
        /// Why the rule fired.
        reason: String,
    },
    /// Close the current short call at intrinsic-plus-time cost and open a
    /// new one in a single atomic step.
    Roll {
        /// Strike of the replacement call.
        new_strike: f64,
        /// Absolute delta of the replacement call.
        new_delta: f64,
        /// Per-contract buy-back cost of the open call.
        roll_cost: f64,
        /// Per-contract premium of the replacement call, net of haircut.
        new_premium: f64,
        /// Per-contract net credit: `new_premium - roll_cost`.
        credit: f64,
        /// Name of the producing rule.
        rule: String,
        /// Why the rule fired.
        reason: String,
    },
    /// No action.
    Hold,
}

impl Signal {
    /// Check whether this is the no-action signal.
    #[must_use]
    pub fn is_hold(&self) -> bool {
        matches!(self, Self::Hold)
    }

    /// Name of the rule that produced this signal, if any.
    #[must_use]
    pub fn rule_name(&self) -> Option<&str> {
        match self {
            Self::SellPut { rule, .. }
            | Self::SellCall { rule, .. }
            | Self::Skip { rule, .. }
            | Self::ClosePosition { rule, .. }
            | Self::Roll { rule, .. } => Some(rule),
            Self::Hold => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_serialization() {
        let signal = Signal::SellPut {
            strike: 2360.0,
            delta: 0.30,
            premium: 41.5,
            rule: "base_put".to_string(),
            reason: "sell 0.30-delta put".to_string(),
        };
        let json = serde_json::to_value(&signal).unwrap();
        assert_eq!(json.get("type").unwrap(), "SELL_PUT");
        assert_eq!(json.get("strike").unwrap(), 2360.0);
    }

    #[test]
    fn test_hold_round_trip() {
        let json = serde_json::to_string(&Signal::Hold).unwrap();
        let back: Signal = serde_json::from_str(&json).unwrap();
        assert!(back.is_hold());
        assert!(back.rule_name().is_none());
    }

    #[test]
    fn test_rule_name() {
        let signal = Signal::Skip {
            rule: "low_premium_skip".to_string(),
            reason: "premium too small".to_string(),
        };
        assert_eq!(signal.rule_name(), Some("low_premium_skip"));
    }
}
