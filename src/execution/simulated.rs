//! Deterministic simulated executor.

use tracing::debug;

use crate::config::StrategyConfig;
use crate::models::{Event, MarketSnapshot, OptionType, PortfolioState, Signal};

use super::Executor;

/// Frictionless-fill executor for backtests.
///
/// Fills are deterministic: options open at their Black-Scholes premium net
/// of the configured haircut (already priced into the signal), expiries
/// settle against spot, and the only costs are the flat per-contract fees.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedExecutor;

impl Executor for SimulatedExecutor {
    fn resolve_expiration(
        &self,
        market: &MarketSnapshot,
        portfolio: &PortfolioState,
        config: &StrategyConfig,
    ) -> Vec<Event> {
        let Some(open) = portfolio.open_option.as_ref() else {
            return Vec::new();
        };
        if market.day < open.expiry_day {
            return Vec::new();
        }

        let assigned = match open.option_type {
            OptionType::Put => market.spot < open.strike,
            OptionType::Call => market.spot >= open.strike,
        };
        debug!(
            day = market.day,
            strike = open.strike,
            spot = market.spot,
            assigned,
            "option expired"
        );

        let mut events = vec![Event::OptionExpired {
            option_type: open.option_type,
            strike: open.strike,
            spot: market.spot,
            assigned,
        }];

        if assigned {
            match open.option_type {
                OptionType::Put => events.push(Event::EthBought {
                    price: open.strike,
                    size: config.contracts,
                }),
                OptionType::Call => {
                    if let Some(position) = portfolio.position.as_ref() {
                        events.push(Event::EthSold {
                            price: open.strike,
                            size: position.size,
                            pl: (open.strike - position.entry_price) * position.size,
                        });
                    }
                }
            }
        }

        events
    }

    fn execute(
        &self,
        signal: &Signal,
        market: &MarketSnapshot,
        portfolio: &PortfolioState,
        config: &StrategyConfig,
    ) -> Vec<Event> {
        match signal {
            Signal::Hold => Vec::new(),
            Signal::SellPut {
                strike,
                delta,
                premium,
                ..
            } => sell_option(OptionType::Put, *strike, *delta, *premium, market, config),
            Signal::SellCall {
                strike,
                delta,
                premium,
                ..
            } => sell_option(OptionType::Call, *strike, *delta, *premium, market, config),
            Signal::Skip { rule, reason } => vec![Event::CycleSkipped {
                rule: rule.clone(),
                reason: reason.clone(),
            }],
            Signal::ClosePosition { .. } => {
                let Some(position) = portfolio.position.as_ref() else {
                    return Vec::new();
                };
                vec![Event::PositionClosed {
                    price: market.spot,
                    size: position.size,
                    pl: (market.spot - position.entry_price) * position.size,
                }]
            }
            Signal::Roll {
                new_strike,
                new_delta,
                roll_cost,
                new_premium,
                ..
            } => {
                let Some(open) = portfolio.open_option.as_ref() else {
                    return Vec::new();
                };
                let contracts = config.contracts;
                vec![Event::OptionRolled {
                    old_strike: open.strike,
                    new_strike: *new_strike,
                    new_delta: *new_delta,
                    original_premium: open.premium * contracts,
                    roll_cost: roll_cost * contracts,
                    new_premium: new_premium * contracts,
                    fees: 2.0 * config.fee_per_trade * contracts,
                    contracts,
                    open_day: market.day,
                    expiry_day: market.day + config.cycle_length_days as usize,
                }]
            }
        }
    }
}

fn sell_option(
    option_type: OptionType,
    strike: f64,
    delta: f64,
    premium: f64,
    market: &MarketSnapshot,
    config: &StrategyConfig,
) -> Vec<Event> {
    let fees = config.fee_per_trade * config.contracts;
    let gross = premium * config.contracts;
    vec![
        Event::OptionSold {
            option_type,
            strike,
            delta,
            premium,
            open_day: market.day,
            expiry_day: market.day + config.cycle_length_days as usize,
            fees,
        },
        Event::PremiumCollected {
            gross,
            fees,
            net: gross - fees,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OpenOption, Phase, Position};

    fn market(day: usize, spot: f64) -> MarketSnapshot {
        MarketSnapshot {
            day,
            spot,
            iv: None,
            realized_vol: None,
        }
    }

    fn short_put(strike: f64, expiry_day: usize) -> PortfolioState {
        PortfolioState {
            phase: Phase::ShortPut,
            open_option: Some(OpenOption {
                option_type: OptionType::Put,
                strike,
                delta: 0.30,
                premium: 40.0,
                open_day: expiry_day.saturating_sub(7),
                expiry_day,
            }),
            ..PortfolioState::initial()
        }
    }

    fn short_call(strike: f64, entry_price: f64, expiry_day: usize) -> PortfolioState {
        PortfolioState {
            phase: Phase::ShortCall,
            position: Some(Position {
                size: 1.0,
                entry_price,
            }),
            open_option: Some(OpenOption {
                option_type: OptionType::Call,
                strike,
                delta: 0.30,
                premium: 40.0,
                open_day: expiry_day.saturating_sub(7),
                expiry_day,
            }),
            ..PortfolioState::initial()
        }
    }

    #[test]
    fn test_no_open_option_resolves_to_nothing() {
        let executor = SimulatedExecutor;
        let events = executor.resolve_expiration(
            &market(7, 2500.0),
            &PortfolioState::initial(),
            &StrategyConfig::default(),
        );
        assert!(events.is_empty());
    }

    #[test]
    fn test_unexpired_option_resolves_to_nothing() {
        let executor = SimulatedExecutor;
        let events = executor.resolve_expiration(
            &market(6, 2500.0),
            &short_put(2360.0, 7),
            &StrategyConfig::default(),
        );
        assert!(events.is_empty());
    }

    #[test]
    fn test_put_expires_otm_without_premium_event() {
        let executor = SimulatedExecutor;
        let events = executor.resolve_expiration(
            &market(7, 2500.0),
            &short_put(2360.0, 7),
            &StrategyConfig::default(),
        );
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            Event::OptionExpired {
                assigned: false,
                option_type: OptionType::Put,
                ..
            }
        ));
    }

    #[test]
    fn test_put_assignment_buys_at_strike() {
        let executor = SimulatedExecutor;
        let events = executor.resolve_expiration(
            &market(7, 2100.0),
            &short_put(2360.0, 7),
            &StrategyConfig::default(),
        );
        assert_eq!(events.len(), 2);
        assert!(events[0].is_assignment());
        let Event::EthBought { price, size } = &events[1] else {
            panic!("expected EthBought");
        };
        assert!((price - 2360.0).abs() < f64::EPSILON);
        assert!((size - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_call_assignment_sells_at_strike_with_pl() {
        let executor = SimulatedExecutor;
        let events = executor.resolve_expiration(
            &market(14, 2700.0),
            &short_call(2600.0, 2360.0, 14),
            &StrategyConfig::default(),
        );
        assert_eq!(events.len(), 2);
        let Event::EthSold { price, pl, .. } = &events[1] else {
            panic!("expected EthSold");
        };
        assert!((price - 2600.0).abs() < f64::EPSILON);
        assert!((pl - 240.0).abs() < 1e-9);
    }

    #[test]
    fn test_call_expiry_boundary_assigns_at_strike() {
        // Call assignment is inclusive: spot == strike assigns.
        let executor = SimulatedExecutor;
        let events = executor.resolve_expiration(
            &market(14, 2600.0),
            &short_call(2600.0, 2360.0, 14),
            &StrategyConfig::default(),
        );
        assert!(events[0].is_assignment());
    }

    #[test]
    fn test_sell_put_emits_sale_then_premium() {
        let executor = SimulatedExecutor;
        let config = StrategyConfig::default();
        let signal = Signal::SellPut {
            strike: 2360.0,
            delta: 0.30,
            premium: 41.5,
            rule: "base_put".to_string(),
            reason: String::new(),
        };
        let events = executor.execute(
            &signal,
            &market(0, 2500.0),
            &PortfolioState::initial(),
            &config,
        );
        assert_eq!(events.len(), 2);

        let Event::OptionSold {
            open_day,
            expiry_day,
            fees,
            ..
        } = &events[0]
        else {
            panic!("expected OptionSold");
        };
        assert_eq!(*open_day, 0);
        assert_eq!(*expiry_day, 7);
        assert!((fees - 0.5).abs() < f64::EPSILON);

        let Event::PremiumCollected { gross, fees, net } = &events[1] else {
            panic!("expected PremiumCollected");
        };
        assert!((gross - 41.5).abs() < f64::EPSILON);
        assert!((net - (gross - fees)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hold_and_missing_preconditions_yield_nothing() {
        let executor = SimulatedExecutor;
        let config = StrategyConfig::default();
        let idle = PortfolioState::initial();
        let snapshot = market(0, 2500.0);

        assert!(executor
            .execute(&Signal::Hold, &snapshot, &idle, &config)
            .is_empty());

        let close = Signal::ClosePosition {
            rule: "x".to_string(),
            reason: String::new(),
        };
        assert!(executor.execute(&close, &snapshot, &idle, &config).is_empty());

        let roll = Signal::Roll {
            new_strike: 2700.0,
            new_delta: 0.3,
            roll_cost: 100.0,
            new_premium: 50.0,
            credit: -50.0,
            rule: "roll_call".to_string(),
            reason: String::new(),
        };
        assert!(executor.execute(&roll, &snapshot, &idle, &config).is_empty());
    }

    #[test]
    fn test_roll_carries_both_legs_and_double_fees() {
        let executor = SimulatedExecutor;
        let config = StrategyConfig {
            contracts: 2.0,
            ..StrategyConfig::default()
        };
        let portfolio = short_call(2500.0, 2360.0, 14);
        let signal = Signal::Roll {
            new_strike: 3100.0,
            new_delta: 0.30,
            roll_cost: 510.0,
            new_premium: 55.0,
            credit: -455.0,
            rule: "roll_call".to_string(),
            reason: String::new(),
        };
        let events = executor.execute(&signal, &market(10, 3000.0), &portfolio, &config);
        assert_eq!(events.len(), 1);

        let Event::OptionRolled {
            old_strike,
            new_strike,
            roll_cost,
            new_premium,
            fees,
            contracts,
            open_day,
            expiry_day,
            ..
        } = &events[0]
        else {
            panic!("expected OptionRolled");
        };
        assert!((old_strike - 2500.0).abs() < f64::EPSILON);
        assert!((new_strike - 3100.0).abs() < f64::EPSILON);
        assert!((roll_cost - 1020.0).abs() < 1e-9);
        assert!((new_premium - 110.0).abs() < 1e-9);
        assert!((fees - 2.0).abs() < 1e-9);
        assert!((contracts - 2.0).abs() < f64::EPSILON);
        assert_eq!(*open_day, 10);
        assert_eq!(*expiry_day, 17);
    }

    #[test]
    fn test_skip_emits_cycle_skipped() {
        let executor = SimulatedExecutor;
        let signal = Signal::Skip {
            rule: "low_premium_skip".to_string(),
            reason: "premium too small".to_string(),
        };
        let events = executor.execute(
            &signal,
            &market(7, 2500.0),
            &PortfolioState::initial(),
            &StrategyConfig::default(),
        );
        assert!(matches!(events[0], Event::CycleSkipped { .. }));
    }
}
