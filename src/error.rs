//! Error types for input validation.
//!
//! Rules and executors never fail: a rule that does not apply returns `None`
//! and an executor with nothing to do returns an empty event list. The only
//! fallible boundaries are configuration construction and the market-facing
//! entry points (`generate_prices`, `run_monte_carlo`, `rerun_single`), which
//! validate their inputs once and assume them valid afterwards.

use thiserror::Error;

/// Errors from strategy configuration validation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// A numeric field is outside its documented range.
    #[error("invalid value for '{field}': {message}")]
    OutOfRange {
        /// Configuration field name.
        field: &'static str,
        /// Why the value was rejected.
        message: String,
    },

    /// Two fields are individually valid but mutually inconsistent.
    #[error("inconsistent fields '{first}' and '{second}': {message}")]
    Inconsistent {
        /// First field name.
        first: &'static str,
        /// Second field name.
        second: &'static str,
        /// Why the combination was rejected.
        message: String,
    },
}

/// Errors from market-input validation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MarketError {
    /// The simulated horizon must cover at least one day.
    #[error("price path must cover at least one day, got {days}")]
    EmptyHorizon {
        /// Requested number of days.
        days: usize,
    },

    /// The starting price must be strictly positive and finite.
    #[error("start price must be positive and finite, got {start_price}")]
    InvalidStartPrice {
        /// Rejected starting price.
        start_price: f64,
    },

    /// The annualized volatility must be non-negative and finite.
    #[error("annual volatility must be non-negative and finite, got {annual_vol}")]
    InvalidVolatility {
        /// Rejected volatility.
        annual_vol: f64,
    },

    /// The chosen price model needs a parameter block that was not supplied.
    #[error("model '{model}' requires the '{block}' parameter block")]
    MissingModelParams {
        /// Model name.
        model: &'static str,
        /// Missing block name.
        block: &'static str,
    },

    /// A model parameter is outside its documented range.
    #[error("invalid model parameter '{field}': {message}")]
    InvalidModelParams {
        /// Parameter field name.
        field: &'static str,
        /// Why the value was rejected.
        message: String,
    },

    /// A Monte Carlo batch must contain at least one run.
    #[error("monte carlo requires at least one run")]
    NoRuns,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::OutOfRange {
            field: "contracts",
            message: "must be positive".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value for 'contracts': must be positive"
        );
    }

    #[test]
    fn test_market_error_display() {
        let err = MarketError::EmptyHorizon { days: 0 };
        assert_eq!(
            err.to_string(),
            "price path must cover at least one day, got 0"
        );

        let err = MarketError::MissingModelParams {
            model: "heston",
            block: "heston",
        };
        assert_eq!(
            err.to_string(),
            "model 'heston' requires the 'heston' parameter block"
        );
    }
}
