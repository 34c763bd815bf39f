//! Heston stochastic volatility via the Andersen quadratic-exponential
//! scheme, optionally with Merton jumps.

use super::jump::{jump_compensator, sample_jump};
use super::rng::SplitMix32;
use super::{HestonParams, JumpParams, PathParams, DT};

/// Switch point between the quadratic and exponential QE branches.
const PSI_CRITICAL: f64 = 1.5;

/// Advance the variance one step with the QE scheme.
///
/// Consumes exactly one draw: a normal in the quadratic branch
/// (`psi <= 1.5`), a uniform in the exponential branch. The result is
/// clamped at zero.
pub(super) fn step_variance(
    v: f64,
    h: &HestonParams,
    exp_kdt: f64,
    rng: &mut SplitMix32,
) -> f64 {
    let m = h.theta + (v - h.theta) * exp_kdt;
    let s2 = v * h.xi * h.xi * exp_kdt * (1.0 - exp_kdt) / h.kappa
        + h.theta * h.xi * h.xi / (2.0 * h.kappa) * (1.0 - exp_kdt) * (1.0 - exp_kdt);
    let psi = s2 / (m * m);

    let v_next = if psi <= PSI_CRITICAL {
        let inv_psi_2 = 2.0 / psi;
        let b2 = inv_psi_2 - 1.0 + inv_psi_2.sqrt() * (inv_psi_2 - 1.0).sqrt();
        let a = m / (1.0 + b2);
        let z_v = rng.next_normal();
        let shifted = b2.sqrt() + z_v;
        a * shifted * shifted
    } else {
        let p = (psi - 1.0) / (psi + 1.0);
        let beta = (1.0 - p) / m;
        let u = rng.next_f64();
        if u <= p {
            0.0
        } else {
            ((1.0 - p) / (1.0 - u)).ln() / beta
        }
    };

    v_next.max(0.0)
}

/// Step a Heston path, returning `(prices, iv_path)`.
///
/// Per-day draw order: the QE variance draw, then two price normals
/// `Z1, Z2` forming the correlated Brownian `rho*Z1 + sqrt(1-rho^2)*Z2`,
/// then (only when `jump` is present) the jump-test uniform and its
/// optional jump normal. The step volatility averages the variance over the
/// step: `sigma_bar = sqrt((v + v_next) / 2)`.
///
/// `iv_path[0]` is `sqrt(v0)`; `iv_path[i]` records the variance prevailing
/// at day `i` (the stepped value).
pub(super) fn generate(
    params: &PathParams,
    h: &HestonParams,
    jump: Option<&JumpParams>,
    rng: &mut SplitMix32,
) -> (Vec<f64>, Vec<f64>) {
    let exp_kdt = (-h.kappa * DT).exp();
    let sqrt_dt = DT.sqrt();
    let rho_perp = (1.0 - h.rho * h.rho).sqrt();
    let compensator = jump.map_or(0.0, jump_compensator);

    let mut prices = Vec::with_capacity(params.days);
    let mut iv_path = Vec::with_capacity(params.days);

    let mut price = params.start_price;
    let mut v = h.v0;
    prices.push(price);
    iv_path.push(v.max(0.0).sqrt());

    for _ in 1..params.days {
        let v_next = step_variance(v, h, exp_kdt, rng);

        let z1 = rng.next_normal();
        let z2 = rng.next_normal();
        let z_s = h.rho * z1 + rho_perp * z2;

        let log_jump = match jump {
            Some(jump_params) => sample_jump(jump_params, rng),
            None => 0.0,
        };

        let sigma_bar = (0.5 * (v + v_next)).sqrt();
        let drift = (params.annual_drift - compensator - 0.5 * sigma_bar * sigma_bar) * DT;
        price *= (drift + sigma_bar * sqrt_dt * z_s + log_jump).exp();
        prices.push(price);

        v = v_next;
        iv_path.push(v.max(0.0).sqrt());
    }

    (prices, iv_path)
}
