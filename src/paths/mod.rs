//! Daily price-path generation.
//!
//! Four models share one deterministic PRNG stream ([`SplitMix32`]): plain
//! geometric Brownian motion, Heston stochastic volatility via the Andersen
//! quadratic-exponential scheme, Merton log-normal jumps, and Heston with
//! jumps. All models step daily (`dt = 1/365`), guarantee strictly positive
//! finite prices, and reproduce the exact same path for a fixed seed because
//! each consumes its draws in a fixed, documented order.

mod gbm;
mod heston;
mod jump;
mod rng;

use serde::{Deserialize, Serialize};

pub use rng::SplitMix32;

use crate::config::DAYS_PER_YEAR;
use crate::error::MarketError;

/// Daily time step in years.
pub(crate) const DT: f64 = 1.0 / DAYS_PER_YEAR;

/// Price model selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PriceModel {
    /// Geometric Brownian motion.
    #[default]
    Gbm,
    /// Heston stochastic volatility (Andersen QE discretization).
    Heston,
    /// Merton jump diffusion.
    Jump,
    /// Heston stochastic volatility with Merton jumps.
    HestonJump,
}

/// Heston model parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HestonParams {
    /// Mean-reversion speed of variance.
    pub kappa: f64,
    /// Long-run variance level.
    pub theta: f64,
    /// Volatility of variance.
    pub xi: f64,
    /// Correlation between variance and price Brownians.
    pub rho: f64,
    /// Initial variance.
    pub v0: f64,
}

impl Default for HestonParams {
    fn default() -> Self {
        Self {
            kappa: 2.0,
            theta: 0.64, // 80% long-run vol
            xi: 0.5,
            rho: -0.7,
            v0: 0.64,
        }
    }
}

/// Merton jump parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JumpParams {
    /// Expected jumps per year.
    pub lambda: f64,
    /// Mean log-jump size.
    pub mu_j: f64,
    /// Log-jump size standard deviation.
    pub sigma_j: f64,
}

impl Default for JumpParams {
    fn default() -> Self {
        Self {
            lambda: 12.0, // about one jump a month
            mu_j: -0.05,
            sigma_j: 0.10,
        }
    }
}

/// Inputs for one price path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathParams {
    /// Price on day 0.
    pub start_price: f64,
    /// Number of daily observations (including day 0).
    pub days: usize,
    /// Annualized drift.
    pub annual_drift: f64,
    /// Annualized volatility (diffusion component).
    pub annual_vol: f64,
    /// PRNG seed.
    pub seed: u32,
    /// Model to step with.
    #[serde(default)]
    pub model: PriceModel,
    /// Heston parameters, required by the Heston variants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heston: Option<HestonParams>,
    /// Jump parameters, required by the jump variants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jump: Option<JumpParams>,
}

/// A generated price path with its optional instantaneous-vol series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPath {
    /// Daily prices; `prices[0]` is the starting price.
    pub prices: Vec<f64>,
    /// Daily instantaneous vol, present only for the Heston variants.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iv_path: Option<Vec<f64>>,
}

/// Generate a daily price path under the configured model.
///
/// # Errors
///
/// Returns [`MarketError`] when the horizon is empty, the start price or
/// volatility is invalid, or a model-specific parameter block is missing or
/// out of range.
pub fn generate_prices(params: &PathParams) -> Result<GeneratedPath, MarketError> {
    validate(params)?;

    let mut rng = SplitMix32::new(params.seed);
    let path = match params.model {
        PriceModel::Gbm => GeneratedPath {
            prices: gbm::generate(params, &mut rng),
            iv_path: None,
        },
        PriceModel::Heston => {
            let heston_params = required_heston(params)?;
            let (prices, iv_path) = heston::generate(params, &heston_params, None, &mut rng);
            GeneratedPath {
                prices,
                iv_path: Some(iv_path),
            }
        }
        PriceModel::Jump => GeneratedPath {
            prices: jump::generate(params, &required_jump(params)?, &mut rng),
            iv_path: None,
        },
        PriceModel::HestonJump => {
            let heston_params = required_heston(params)?;
            let jump_params = required_jump(params)?;
            let (prices, iv_path) =
                heston::generate(params, &heston_params, Some(&jump_params), &mut rng);
            GeneratedPath {
                prices,
                iv_path: Some(iv_path),
            }
        }
    };

    Ok(path)
}

fn required_heston(params: &PathParams) -> Result<HestonParams, MarketError> {
    params.heston.ok_or(MarketError::MissingModelParams {
        model: model_name(params.model),
        block: "heston",
    })
}

fn required_jump(params: &PathParams) -> Result<JumpParams, MarketError> {
    params.jump.ok_or(MarketError::MissingModelParams {
        model: model_name(params.model),
        block: "jump",
    })
}

fn model_name(model: PriceModel) -> &'static str {
    match model {
        PriceModel::Gbm => "gbm",
        PriceModel::Heston => "heston",
        PriceModel::Jump => "jump",
        PriceModel::HestonJump => "heston_jump",
    }
}

pub(crate) fn validate(params: &PathParams) -> Result<(), MarketError> {
    if params.days < 1 {
        return Err(MarketError::EmptyHorizon { days: params.days });
    }
    if !(params.start_price > 0.0 && params.start_price.is_finite()) {
        return Err(MarketError::InvalidStartPrice {
            start_price: params.start_price,
        });
    }
    if !(params.annual_vol >= 0.0 && params.annual_vol.is_finite()) {
        return Err(MarketError::InvalidVolatility {
            annual_vol: params.annual_vol,
        });
    }

    if let Some(heston_params) = &params.heston {
        validate_heston(heston_params)?;
    }
    if let Some(jump_params) = &params.jump {
        validate_jump(jump_params)?;
    }
    Ok(())
}

fn validate_heston(h: &HestonParams) -> Result<(), MarketError> {
    let checks: [(&'static str, f64, bool); 5] = [
        ("heston.kappa", h.kappa, h.kappa > 0.0 && h.kappa.is_finite()),
        ("heston.theta", h.theta, h.theta > 0.0 && h.theta.is_finite()),
        ("heston.xi", h.xi, h.xi > 0.0 && h.xi.is_finite()),
        ("heston.rho", h.rho, (-1.0..=1.0).contains(&h.rho)),
        ("heston.v0", h.v0, h.v0 > 0.0 && h.v0.is_finite()),
    ];
    for (field, value, ok) in checks {
        if !ok {
            return Err(MarketError::InvalidModelParams {
                field,
                message: format!("got {value}"),
            });
        }
    }
    Ok(())
}

fn validate_jump(j: &JumpParams) -> Result<(), MarketError> {
    let checks: [(&'static str, f64, bool); 3] = [
        ("jump.lambda", j.lambda, j.lambda >= 0.0 && j.lambda.is_finite()),
        ("jump.mu_j", j.mu_j, j.mu_j.is_finite()),
        ("jump.sigma_j", j.sigma_j, j.sigma_j >= 0.0 && j.sigma_j.is_finite()),
    ];
    for (field, value, ok) in checks {
        if !ok {
            return Err(MarketError::InvalidModelParams {
                field,
                message: format!("got {value}"),
            });
        }
    }
    Ok(())
}
