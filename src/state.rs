//! Pure event reducer for portfolio state.
//!
//! `apply_events` is the single place portfolio state changes. It folds an
//! event list left to right into a fresh state and never mutates its input,
//! which keeps logged snapshots trustworthy and makes the reducer trivially
//! replayable: applying `a ++ b` equals applying `a` then `b`, and applying
//! an empty list is the identity.

use crate::models::{Event, OpenOption, OptionType, Phase, PortfolioState, Position};

/// Fold events into a new portfolio state.
#[must_use]
pub fn apply_events(state: &PortfolioState, events: &[Event]) -> PortfolioState {
    let mut next = state.clone();
    for event in events {
        apply_event(&mut next, event);
    }
    next
}

fn apply_event(state: &mut PortfolioState, event: &Event) {
    match event {
        Event::OptionSold {
            option_type,
            strike,
            delta,
            premium,
            open_day,
            expiry_day,
            ..
        } => {
            state.open_option = Some(OpenOption {
                option_type: *option_type,
                strike: *strike,
                delta: *delta,
                premium: *premium,
                open_day: *open_day,
                expiry_day: *expiry_day,
            });
            state.phase = match option_type {
                OptionType::Put => Phase::ShortPut,
                OptionType::Call => Phase::ShortCall,
            };
        }
        Event::OptionExpired {
            option_type,
            assigned,
            ..
        } => {
            state.open_option = None;
            if *assigned {
                state.total_assignments += 1;
                state.phase = match option_type {
                    OptionType::Put => Phase::HoldingEth,
                    OptionType::Call => Phase::IdleCash,
                };
            } else {
                state.phase = if state.position.is_some() {
                    Phase::HoldingEth
                } else {
                    Phase::IdleCash
                };
            }
        }
        Event::EthBought { price, size } => {
            state.position = Some(Position {
                size: *size,
                entry_price: *price,
            });
        }
        Event::EthSold { pl, .. } => {
            state.position = None;
            state.realized_pl += pl;
        }
        Event::PremiumCollected { gross, net, .. } => {
            state.total_premium_collected += gross;
            state.realized_pl += net;
        }
        Event::CycleSkipped { .. } => {
            state.total_skipped_cycles += 1;
        }
        Event::PositionClosed { pl, .. } => {
            state.position = None;
            state.realized_pl += pl;
            state.phase = Phase::IdleCash;
        }
        Event::OptionRolled {
            new_strike,
            new_delta,
            roll_cost,
            new_premium,
            fees,
            contracts,
            open_day,
            expiry_day,
            ..
        } => {
            state.total_premium_collected += new_premium;
            state.realized_pl += new_premium - roll_cost - fees;
            let per_contract = if *contracts > 0.0 {
                new_premium / contracts
            } else {
                0.0
            };
            state.open_option = Some(OpenOption {
                option_type: OptionType::Call,
                strike: *new_strike,
                delta: *new_delta,
                premium: per_contract,
                open_day: *open_day,
                expiry_day: *expiry_day,
            });
            state.phase = Phase::ShortCall;
        }
    }
}
