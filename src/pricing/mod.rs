//! Option pricing: Black-Scholes and the inverse-delta strike solver.

mod black_scholes;
mod strike;

pub use black_scholes::{bs_delta, bs_price, norm_cdf};
pub use strike::find_strike_for_delta;
