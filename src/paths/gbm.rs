//! Geometric Brownian motion.

use super::rng::SplitMix32;
use super::{PathParams, DT};

/// Step a GBM path: one normal draw per day.
pub(super) fn generate(params: &PathParams, rng: &mut SplitMix32) -> Vec<f64> {
    let drift = (params.annual_drift - 0.5 * params.annual_vol * params.annual_vol) * DT;
    let vol = params.annual_vol * DT.sqrt();

    let mut prices = Vec::with_capacity(params.days);
    let mut price = params.start_price;
    prices.push(price);

    for _ in 1..params.days {
        let z = rng.next_normal();
        price *= (drift + vol * z).exp();
        prices.push(price);
    }

    prices
}
