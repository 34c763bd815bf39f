//! Inverse-delta strike solver.

use crate::models::OptionType;

use super::black_scholes::bs_delta;

const BRACKET_TOLERANCE: f64 = 0.01;
const MAX_ITERATIONS: u32 = 100;

/// Find the strike whose absolute Black-Scholes delta equals
/// `target_abs_delta`, by bisection.
///
/// The bracket is `[0.5·spot, spot]` for puts and `[spot, 1.5·spot]` for
/// calls, relying on put `|Δ|` being increasing in strike and call `|Δ|`
/// decreasing. Bisection stops once the bracket is narrower than 0.01 or
/// after 100 iterations, and the midpoint is returned.
///
/// Returns `None` for nonsensical inputs (`t ≤ 0`, non-positive spot or
/// sigma, target outside `(0, 1)`); callers pass
/// `t = cycle_length_days / 365 > 0`.
#[must_use]
pub fn find_strike_for_delta(
    target_abs_delta: f64,
    spot: f64,
    t: f64,
    rate: f64,
    sigma: f64,
    option_type: OptionType,
) -> Option<f64> {
    if !(t > 0.0) || !(spot > 0.0) || !(sigma > 0.0) {
        return None;
    }
    if !(target_abs_delta > 0.0 && target_abs_delta < 1.0) {
        return None;
    }

    let (mut lo, mut hi) = match option_type {
        OptionType::Put => (0.5 * spot, spot),
        OptionType::Call => (spot, 1.5 * spot),
    };

    for _ in 0..MAX_ITERATIONS {
        if hi - lo < BRACKET_TOLERANCE {
            break;
        }
        let mid = 0.5 * (lo + hi);
        let abs_delta = bs_delta(option_type, spot, mid, t, rate, sigma).abs();
        let too_risky = abs_delta > target_abs_delta;
        match option_type {
            // Put |delta| grows with strike: too risky means strike too high.
            OptionType::Put => {
                if too_risky {
                    hi = mid;
                } else {
                    lo = mid;
                }
            }
            // Call |delta| shrinks with strike: too risky means strike too low.
            OptionType::Call => {
                if too_risky {
                    lo = mid;
                } else {
                    hi = mid;
                }
            }
        }
    }

    Some(0.5 * (lo + hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_strike_hits_target_delta() {
        let (spot, t, rate, sigma) = (2500.0, 7.0 / 365.0, 0.05, 0.92);
        for target in [0.10, 0.20, 0.30, 0.40, 0.50] {
            let strike =
                find_strike_for_delta(target, spot, t, rate, sigma, OptionType::Put).unwrap();
            assert!(strike > 0.5 * spot && strike < spot);
            let achieved = bs_delta(OptionType::Put, spot, strike, t, rate, sigma).abs();
            assert!(
                (achieved - target).abs() < 1e-3,
                "target {target}: achieved {achieved} at strike {strike}"
            );
        }
    }

    #[test]
    fn test_call_strike_hits_target_delta() {
        let (spot, t, rate, sigma) = (2500.0, 7.0 / 365.0, 0.05, 0.92);
        for target in [0.10, 0.20, 0.30, 0.40, 0.50] {
            let strike =
                find_strike_for_delta(target, spot, t, rate, sigma, OptionType::Call).unwrap();
            assert!(strike > spot && strike < 1.5 * spot);
            let achieved = bs_delta(OptionType::Call, spot, strike, t, rate, sigma).abs();
            assert!(
                (achieved - target).abs() < 1e-3,
                "target {target}: achieved {achieved} at strike {strike}"
            );
        }
    }

    #[test]
    fn test_longer_expiry_still_converges() {
        let (spot, t, rate, sigma) = (100.0, 30.0 / 365.0, 0.05, 0.6);
        let strike =
            find_strike_for_delta(0.25, spot, t, rate, sigma, OptionType::Put).unwrap();
        let achieved = bs_delta(OptionType::Put, spot, strike, t, rate, sigma).abs();
        assert!((achieved - 0.25).abs() < 1e-3);
    }

    #[test]
    fn test_rejects_nonsense_inputs() {
        assert!(find_strike_for_delta(0.3, 2500.0, 0.0, 0.05, 0.9, OptionType::Put).is_none());
        assert!(find_strike_for_delta(0.3, 2500.0, -1.0, 0.05, 0.9, OptionType::Put).is_none());
        assert!(find_strike_for_delta(0.3, 0.0, 0.02, 0.05, 0.9, OptionType::Put).is_none());
        assert!(find_strike_for_delta(0.3, 2500.0, 0.02, 0.05, 0.0, OptionType::Call).is_none());
        assert!(find_strike_for_delta(0.0, 2500.0, 0.02, 0.05, 0.9, OptionType::Put).is_none());
        assert!(find_strike_for_delta(1.0, 2500.0, 0.02, 0.05, 0.9, OptionType::Call).is_none());
    }

    #[test]
    fn test_deterministic() {
        let a = find_strike_for_delta(0.3, 2500.0, 7.0 / 365.0, 0.05, 0.92, OptionType::Put);
        let b = find_strike_for_delta(0.3, 2500.0, 7.0 / 365.0, 0.05, 0.92, OptionType::Put);
        assert_eq!(a, b);
    }
}
