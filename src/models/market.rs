//! Market observation passed to rules and executors.

use serde::{Deserialize, Serialize};

/// Read-only market observation for one simulated day.
///
/// This is the only data source a rule may consult besides the portfolio and
/// the strategy configuration. Optional fields are absent, never
/// sentinel-valued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Day index into the price series.
    pub day: usize,
    /// Spot price of the underlying.
    pub spot: f64,
    /// Instantaneous implied volatility, when the price model produces one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iv: Option<f64>,
    /// Annualized realized volatility over the configured lookback window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realized_vol: Option<f64>,
}
