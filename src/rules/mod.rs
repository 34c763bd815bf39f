//! Strategy rules and their evaluator.
//!
//! A rule is data, not a class: a record holding a name, a phase gate, an
//! integer priority (lower runs first), and a pure function pointer from
//! `(market, portfolio, config)` to an optional [`Signal`]. Rules never
//! mutate state and never consult anything beyond their three arguments. A
//! rule that does not apply (wrong phase, missing config block, no
//! candidate) returns `None` and the evaluator moves on.
//!
//! The default set wires four rules:
//!
//! | Rule | Priority | Phase |
//! |---|---|---|
//! | `roll_call` | 30 | short call |
//! | `low_premium_skip` | 50 | holding |
//! | `base_put` | 100 | idle cash |
//! | `adaptive_call` | 100 | holding |
//!
//! Consumers may pass any other list; new rules are added by pushing into
//! the collection.

mod adaptive_call;
mod base_put;
mod evaluator;
mod helpers;
mod low_premium_skip;
mod roll_call;

pub use adaptive_call::adaptive_call_rule;
pub use base_put::base_put_rule;
pub use evaluator::evaluate_rules;
pub use low_premium_skip::low_premium_skip_rule;
pub use roll_call::roll_call_rule;

use crate::config::StrategyConfig;
use crate::models::{MarketSnapshot, Phase, PortfolioState, Signal};

/// Signature of a rule's evaluation function.
pub type RuleFn = fn(&MarketSnapshot, &PortfolioState, &StrategyConfig) -> Option<Signal>;

/// A strategy rule: a named, phase-gated, priority-ordered pure predicate.
#[derive(Debug, Clone, Copy)]
pub struct TradingRule {
    /// Stable rule name, recorded on every signal it produces.
    pub name: &'static str,
    /// One-line description for tooling.
    pub description: &'static str,
    /// Phase the rule applies in.
    pub phase: Phase,
    /// Evaluation priority; lower runs first.
    pub priority: i32,
    /// The evaluation function.
    pub evaluate: RuleFn,
}

/// The default rule set.
#[must_use]
pub fn default_rules() -> Vec<TradingRule> {
    vec![
        low_premium_skip_rule(),
        base_put_rule(),
        adaptive_call_rule(),
        roll_call_rule(),
    ]
}
