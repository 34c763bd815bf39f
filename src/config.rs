//! Strategy configuration and validation.
//!
//! `StrategyConfig` is a plain record with enumerated options. Unknown
//! options are rejected at deserialization (`deny_unknown_fields`); value
//! ranges are checked by [`StrategyConfig::validate`], which the UI layer is
//! expected to call when constructing a config from raw user inputs. The
//! simulation functions assume a validated config and perform no further
//! checks.
//!
//! Absent optional blocks disable the corresponding rule behavior: no
//! `adaptive_calls` means fixed-delta calls and no low-premium skip, no
//! `iv_rv_spread` means a unit IV/RV multiplier, no `roll_call` means open
//! calls are never rolled.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Days per year used everywhere in the engine.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Adaptive covered-call parameters.
///
/// When present, the call delta is interpolated between `min_delta` and
/// `max_delta` by the position's P/L, and cycles whose candidate call premium
/// is too small relative to position value are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdaptiveCallsConfig {
    /// Call delta when the position is deep under water.
    pub min_delta: f64,
    /// Call delta when the position is well in profit.
    pub max_delta: f64,
    /// Skip the cycle when net premium is below this fraction of position
    /// value.
    pub skip_threshold_pct: f64,
    /// Never sell a call struck below cost basis; clamp the strike up to the
    /// entry price instead.
    #[serde(default)]
    pub min_strike_at_cost: bool,
}

impl Default for AdaptiveCallsConfig {
    fn default() -> Self {
        Self {
            min_delta: 0.10,
            max_delta: 0.50,
            skip_threshold_pct: 0.001, // 0.1% of position value
            min_strike_at_cost: false,
        }
    }
}

/// IV/RV spread parameters.
///
/// When present, delta-adjusting rules scale their base delta by the ratio of
/// effective implied volatility to realized volatility, clamped to the
/// configured band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IvRvSpreadConfig {
    /// Number of daily log returns in the realized-vol window.
    pub lookback_days: usize,
    /// Lower clamp on the IV/RV multiplier.
    pub min_multiplier: f64,
    /// Upper clamp on the IV/RV multiplier.
    pub max_multiplier: f64,
}

impl Default for IvRvSpreadConfig {
    fn default() -> Self {
        Self {
            lookback_days: 20,
            min_multiplier: 0.75,
            max_multiplier: 1.50,
        }
    }
}

/// Roll parameters for in-the-money short calls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RollCallConfig {
    /// Roll when spot reaches `strike × (1 + itm_threshold_pct)`.
    pub itm_threshold_pct: f64,
    /// Suppress rolls whose new premium does not cover the buy-back cost.
    pub require_net_credit: bool,
}

impl Default for RollCallConfig {
    fn default() -> Self {
        Self {
            itm_threshold_pct: 0.05, // 5% through the strike
            require_net_credit: true,
        }
    }
}

/// Full strategy configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StrategyConfig {
    /// Target absolute delta for puts (and calls when adaptive is disabled).
    pub target_delta: f64,
    /// Fallback annualized IV when the market snapshot carries none.
    pub implied_vol: f64,
    /// Annualized risk-free rate, used in pricing and Sharpe/Sortino.
    pub risk_free_rate: f64,
    /// Days from option open to expiry.
    pub cycle_length_days: u32,
    /// Underlying units per option.
    pub contracts: f64,
    /// Multiplicative premium haircut at open: net = raw × (1 − pct).
    pub bid_ask_spread_pct: f64,
    /// Flat fee per contract per order; a roll counts as two orders.
    pub fee_per_trade: f64,
    /// Adaptive covered-call behavior, disabled when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adaptive_calls: Option<AdaptiveCallsConfig>,
    /// IV/RV delta scaling, disabled when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iv_rv_spread: Option<IvRvSpreadConfig>,
    /// ITM call rolling, disabled when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roll_call: Option<RollCallConfig>,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            target_delta: 0.30,
            implied_vol: 0.80,
            risk_free_rate: 0.05,
            cycle_length_days: 7,
            contracts: 1.0,
            bid_ask_spread_pct: 0.05,
            fee_per_trade: 0.50,
            adaptive_calls: None,
            iv_rv_spread: None,
            roll_call: None,
        }
    }
}

impl StrategyConfig {
    /// Option lifetime as a year fraction: `cycle_length_days / 365`.
    #[must_use]
    pub fn cycle_years(&self) -> f64 {
        f64::from(self.cycle_length_days) / DAYS_PER_YEAR
    }

    /// Validate all field ranges and cross-field consistency.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] encountered, field by field in
    /// declaration order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_in(
            "target_delta",
            self.target_delta,
            self.target_delta > 0.0 && self.target_delta <= 0.5,
            "must be in (0, 0.5]",
        )?;
        require_in(
            "implied_vol",
            self.implied_vol,
            self.implied_vol > 0.0 && self.implied_vol.is_finite(),
            "must be positive and finite",
        )?;
        require_in(
            "risk_free_rate",
            self.risk_free_rate,
            self.risk_free_rate.is_finite(),
            "must be finite",
        )?;
        if self.cycle_length_days == 0 {
            return Err(ConfigError::OutOfRange {
                field: "cycle_length_days",
                message: "must be at least 1".to_string(),
            });
        }
        require_in(
            "contracts",
            self.contracts,
            self.contracts > 0.0 && self.contracts.is_finite(),
            "must be positive and finite",
        )?;
        require_in(
            "bid_ask_spread_pct",
            self.bid_ask_spread_pct,
            (0.0..1.0).contains(&self.bid_ask_spread_pct),
            "must be in [0, 1)",
        )?;
        require_in(
            "fee_per_trade",
            self.fee_per_trade,
            self.fee_per_trade >= 0.0 && self.fee_per_trade.is_finite(),
            "must be non-negative and finite",
        )?;

        if let Some(adaptive) = &self.adaptive_calls {
            adaptive.validate()?;
        }
        if let Some(spread) = &self.iv_rv_spread {
            spread.validate()?;
        }
        if let Some(roll) = &self.roll_call {
            roll.validate()?;
        }
        Ok(())
    }
}

impl AdaptiveCallsConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        require_in(
            "adaptive_calls.min_delta",
            self.min_delta,
            self.min_delta > 0.0 && self.min_delta <= 0.5,
            "must be in (0, 0.5]",
        )?;
        require_in(
            "adaptive_calls.max_delta",
            self.max_delta,
            self.max_delta > 0.0 && self.max_delta <= 0.5,
            "must be in (0, 0.5]",
        )?;
        if self.min_delta > self.max_delta {
            return Err(ConfigError::Inconsistent {
                first: "adaptive_calls.min_delta",
                second: "adaptive_calls.max_delta",
                message: format!(
                    "min_delta {} exceeds max_delta {}",
                    self.min_delta, self.max_delta
                ),
            });
        }
        require_in(
            "adaptive_calls.skip_threshold_pct",
            self.skip_threshold_pct,
            self.skip_threshold_pct > 0.0 && self.skip_threshold_pct < 1.0,
            "must be in (0, 1)",
        )
    }
}

impl IvRvSpreadConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.lookback_days == 0 {
            return Err(ConfigError::OutOfRange {
                field: "iv_rv_spread.lookback_days",
                message: "must be at least 1".to_string(),
            });
        }
        require_in(
            "iv_rv_spread.min_multiplier",
            self.min_multiplier,
            self.min_multiplier > 0.0 && self.min_multiplier.is_finite(),
            "must be positive and finite",
        )?;
        require_in(
            "iv_rv_spread.max_multiplier",
            self.max_multiplier,
            self.max_multiplier > 0.0 && self.max_multiplier.is_finite(),
            "must be positive and finite",
        )?;
        if self.min_multiplier > self.max_multiplier {
            return Err(ConfigError::Inconsistent {
                first: "iv_rv_spread.min_multiplier",
                second: "iv_rv_spread.max_multiplier",
                message: format!(
                    "min_multiplier {} exceeds max_multiplier {}",
                    self.min_multiplier, self.max_multiplier
                ),
            });
        }
        Ok(())
    }
}

impl RollCallConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        require_in(
            "roll_call.itm_threshold_pct",
            self.itm_threshold_pct,
            self.itm_threshold_pct > 0.0 && self.itm_threshold_pct.is_finite(),
            "must be positive and finite",
        )
    }
}

fn require_in(
    field: &'static str,
    value: f64,
    ok: bool,
    message: &str,
) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            message: format!("{message}, got {value}"),
        })
    }
}
