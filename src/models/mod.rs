//! Core domain types for the wheel strategy state machine.
//!
//! The data model is layered the same way the engine is:
//!
//! - **Observations**: [`MarketSnapshot`] is what a rule is allowed to see.
//! - **Intent**: [`Signal`] is what the strategy wants to do at one
//!   decision point.
//! - **Facts**: [`Event`] is what actually happened when an executor
//!   carried the intent out.
//! - **State**: [`PortfolioState`] and its parts hold the fold of all facts
//!   so far.
//! - **Audit**: [`SignalLogEntry`] and [`DailyState`] are deep snapshots
//!   framing every decision and every simulated day.
//!
//! Signals and events are tagged sum types so the reducer and executor stay
//! exhaustive at the type level.

mod event;
mod log;
mod market;
mod portfolio;
mod signal;

pub use event::Event;
pub use log::{DailyState, SignalLogEntry};
pub use market::MarketSnapshot;
pub use portfolio::{OpenOption, OptionType, Phase, PortfolioState, Position};
pub use signal::Signal;
