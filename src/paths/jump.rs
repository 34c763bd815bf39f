//! Merton jump diffusion.

use super::rng::SplitMix32;
use super::{JumpParams, PathParams, DT};

/// Expected relative jump size, used to compensate the drift.
pub(super) fn jump_compensator(jump: &JumpParams) -> f64 {
    jump.lambda * ((jump.mu_j + 0.5 * jump.sigma_j * jump.sigma_j).exp() - 1.0)
}

/// Draw the log-jump for one step, if one occurs.
///
/// Consumes one uniform (the jump test) and, only when the jump fires, one
/// further normal.
pub(super) fn sample_jump(jump: &JumpParams, rng: &mut SplitMix32) -> f64 {
    let u = rng.next_f64();
    if u < jump.lambda * DT {
        jump.mu_j + jump.sigma_j * rng.next_normal()
    } else {
        0.0
    }
}

/// Step a jump-diffusion path.
///
/// Per day, in order: one diffusion normal, one jump-test uniform, and one
/// jump normal when the test fires.
pub(super) fn generate(params: &PathParams, jump: &JumpParams, rng: &mut SplitMix32) -> Vec<f64> {
    let sigma = params.annual_vol;
    let drift = (params.annual_drift - 0.5 * sigma * sigma - jump_compensator(jump)) * DT;
    let vol = sigma * DT.sqrt();

    let mut prices = Vec::with_capacity(params.days);
    let mut price = params.start_price;
    prices.push(price);

    for _ in 1..params.days {
        let z = rng.next_normal();
        let log_jump = sample_jump(jump, rng);
        price *= (drift + vol * z + log_jump).exp();
        prices.push(price);
    }

    prices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compensator_sign() {
        // Negative mean jump with small sigma implies a negative expected
        // jump, so the compensator is negative and the drift correction
        // positive.
        let jump = JumpParams {
            lambda: 12.0,
            mu_j: -0.05,
            sigma_j: 0.01,
        };
        assert!(jump_compensator(&jump) < 0.0);
    }

    #[test]
    fn test_zero_lambda_never_jumps() {
        let jump = JumpParams {
            lambda: 0.0,
            mu_j: -0.05,
            sigma_j: 0.10,
        };
        let mut rng = SplitMix32::new(3);
        for _ in 0..1000 {
            assert!((sample_jump(&jump, &mut rng) - 0.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_certain_jump_consumes_normal() {
        // lambda*dt >= 1 forces a jump every step.
        let jump = JumpParams {
            lambda: 400.0,
            mu_j: 0.0,
            sigma_j: 0.10,
        };
        let mut a = SplitMix32::new(9);
        let mut b = SplitMix32::new(9);

        let _ = sample_jump(&jump, &mut a);
        let _ = b.next_f64(); // jump test
        let _ = b.next_normal(); // jump size

        assert_eq!(a.next_u32(), b.next_u32());
    }
}
