//! European Black-Scholes price and delta.

use crate::models::OptionType;

/// Error function via the Abramowitz & Stegun 7.1.26 rational approximation;
/// max absolute error ~1.5e-7.
fn erf(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let ax = x.abs();

    let p = 0.3275911;
    let a1 = 0.254829592;
    let a2 = -0.284496736;
    let a3 = 1.421413741;
    let a4 = -1.453152027;
    let a5 = 1.061405429;

    let t = 1.0 / (1.0 + p * ax);
    let poly = ((((a5 * t + a4) * t + a3) * t + a2) * t + a1) * t;
    let y = 1.0 - poly * (-ax * ax).exp();

    sign * y
}

/// Standard normal cumulative distribution function.
#[must_use]
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x * std::f64::consts::FRAC_1_SQRT_2))
}

fn d1_d2(spot: f64, strike: f64, t: f64, rate: f64, sigma: f64) -> (f64, f64) {
    // Floors keep degenerate inputs finite; callers pass t > 0.
    let t = t.max(1e-12);
    let sigma = sigma.max(1e-8);
    let vs_t = sigma * t.sqrt();
    let d1 = ((spot / strike).ln() + (rate + 0.5 * sigma * sigma) * t) / vs_t;
    (d1, d1 - vs_t)
}

/// European Black-Scholes option price.
#[must_use]
pub fn bs_price(option_type: OptionType, spot: f64, strike: f64, t: f64, rate: f64, sigma: f64) -> f64 {
    let (d1, d2) = d1_d2(spot, strike, t, rate, sigma);
    let df = (-rate * t.max(1e-12)).exp();

    match option_type {
        OptionType::Call => spot * norm_cdf(d1) - strike * df * norm_cdf(d2),
        OptionType::Put => strike * df * norm_cdf(-d2) - spot * norm_cdf(-d1),
    }
}

/// Black-Scholes delta: `N(d1)` for calls, `N(d1) - 1` for puts.
#[must_use]
pub fn bs_delta(option_type: OptionType, spot: f64, strike: f64, t: f64, rate: f64, sigma: f64) -> f64 {
    let (d1, _) = d1_d2(spot, strike, t, rate, sigma);
    match option_type {
        OptionType::Call => norm_cdf(d1),
        OptionType::Put => norm_cdf(d1) - 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn test_norm_cdf_reference_values() {
        let cases = [
            (-3.0, 0.00135),
            (-1.0, 0.158655),
            (0.0, 0.5),
            (1.0, 0.841345),
            (3.0, 0.99865),
        ];
        for (x, expected) in cases {
            assert!(
                approx_eq(norm_cdf(x), expected, 2e-6),
                "norm_cdf({x}) expected {expected}, got {}",
                norm_cdf(x)
            );
        }
    }

    #[test]
    fn test_put_call_parity() {
        let (spot, strike, t, rate, sigma) = (2500.0, 2400.0, 30.0 / 365.0, 0.05, 0.8);
        let call = bs_price(OptionType::Call, spot, strike, t, rate, sigma);
        let put = bs_price(OptionType::Put, spot, strike, t, rate, sigma);
        let forward = spot - strike * (-rate * t).exp();
        assert!(
            approx_eq(call - put, forward, 1e-6),
            "parity violated: C-P = {}, S-K e^-rT = {forward}",
            call - put
        );
    }

    #[test]
    fn test_prices_are_positive_and_bounded() {
        let (spot, t, rate, sigma) = (100.0, 7.0 / 365.0, 0.05, 0.9);
        for strike in [60.0, 80.0, 100.0, 120.0, 140.0] {
            let call = bs_price(OptionType::Call, spot, strike, t, rate, sigma);
            let put = bs_price(OptionType::Put, spot, strike, t, rate, sigma);
            assert!(call >= 0.0 && call <= spot);
            assert!(put >= 0.0 && put <= strike);
        }
    }

    #[test]
    fn test_delta_signs_and_ranges() {
        let (spot, t, rate, sigma) = (2500.0, 7.0 / 365.0, 0.05, 0.9);
        for strike in [2000.0, 2250.0, 2500.0, 2750.0, 3000.0] {
            let call = bs_delta(OptionType::Call, spot, strike, t, rate, sigma);
            let put = bs_delta(OptionType::Put, spot, strike, t, rate, sigma);
            assert!((0.0..=1.0).contains(&call));
            assert!((-1.0..=0.0).contains(&put));
            // Same d1 for both sides.
            assert!(approx_eq(call - put, 1.0, 1e-12));
        }
    }

    #[test]
    fn test_put_abs_delta_increases_with_strike() {
        let (spot, t, rate, sigma) = (2500.0, 7.0 / 365.0, 0.05, 0.9);
        let mut last = -1.0;
        for strike in [1500.0, 1800.0, 2100.0, 2400.0, 2500.0] {
            let abs_delta = bs_delta(OptionType::Put, spot, strike, t, rate, sigma).abs();
            assert!(abs_delta > last, "put |delta| not increasing at {strike}");
            last = abs_delta;
        }
    }

    #[test]
    fn test_call_abs_delta_decreases_with_strike() {
        let (spot, t, rate, sigma) = (2500.0, 7.0 / 365.0, 0.05, 0.9);
        let mut last = 2.0;
        for strike in [2500.0, 2700.0, 2900.0, 3100.0, 3300.0] {
            let abs_delta = bs_delta(OptionType::Call, spot, strike, t, rate, sigma).abs();
            assert!(abs_delta < last, "call |delta| not decreasing at {strike}");
            last = abs_delta;
        }
    }

    #[test]
    fn test_deep_itm_call_value_near_forward_intrinsic() {
        let (spot, strike, t, rate, sigma) = (2500.0, 100.0, 7.0 / 365.0, 0.05, 0.5);
        let call = bs_price(OptionType::Call, spot, strike, t, rate, sigma);
        let intrinsic = spot - strike * (-rate * t).exp();
        assert!(approx_eq(call, intrinsic, 1e-6));
    }
}
