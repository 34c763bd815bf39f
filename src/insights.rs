//! Advisory generation over an aggregate Monte Carlo result.
//!
//! `generate_insights` reduces a [`MonteCarloResult`] to a short list of
//! leveled advisories. Each rule group either contributes its one insight or
//! silently skips; nothing here can fail and nothing depends on run order.

use serde::{Deserialize, Serialize};

use crate::config::StrategyConfig;
use crate::montecarlo::{MonteCarloResult, RegimeStats};

/// Severity of an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightLevel {
    /// The strategy is doing something well.
    Positive,
    /// Informational, no action implied.
    Neutral,
    /// Worth attention.
    Warning,
    /// A material problem.
    Negative,
}

/// One tagged advisory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    /// Severity level.
    pub level: InsightLevel,
    /// Short headline.
    pub title: String,
    /// What the numbers show.
    pub message: String,
    /// Optional concrete adjustment to try.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Insight {
    fn new(level: InsightLevel, title: &str, message: String) -> Self {
        Self {
            level,
            title: title.to_string(),
            message,
            suggestion: None,
        }
    }

    fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestion = Some(suggestion);
        self
    }
}

/// Reduce an aggregate result to actionable advisories.
#[must_use]
pub fn generate_insights(mc: &MonteCarloResult, config: &StrategyConfig) -> Vec<Insight> {
    let mut insights = Vec::new();

    performance_insight(mc, &mut insights);
    alpha_insight(mc, &mut insights);
    downside_insight(mc, &mut insights);
    regime_insights(mc, &mut insights);
    risk_insights(mc, &mut insights);
    assignment_insight(mc, config, &mut insights);

    insights
}

/// Always fires exactly one: the headline risk-adjusted verdict.
fn performance_insight(mc: &MonteCarloResult, insights: &mut Vec<Insight>) {
    if mc.mean_sharpe < 0.0 {
        insights.push(Insight::new(
            InsightLevel::Negative,
            "Poor Risk-Adjusted Returns",
            format!(
                "Mean Sharpe ratio is {:.2}; the strategy loses money per unit of risk taken.",
                mc.mean_sharpe
            ),
        ));
    } else if mc.mean_sharpe < mc.mean_benchmark_sharpe {
        insights.push(Insight::new(
            InsightLevel::Warning,
            "Underperforming Benchmark",
            format!(
                "Mean Sharpe {:.2} trails buy-and-hold at {:.2}.",
                mc.mean_sharpe, mc.mean_benchmark_sharpe
            ),
        ));
    } else {
        insights.push(Insight::new(
            InsightLevel::Positive,
            "Strong Risk-Adjusted Returns",
            format!(
                "Mean Sharpe {:.2} beats buy-and-hold at {:.2}.",
                mc.mean_sharpe, mc.mean_benchmark_sharpe
            ),
        ));
    }
}

/// Always fires exactly one: APR edge over buy-and-hold, in percentage
/// points.
fn alpha_insight(mc: &MonteCarloResult, insights: &mut Vec<Insight>) {
    let alpha = mc.mean_apr - mc.mean_benchmark_apr;
    if alpha > 5.0 {
        insights.push(Insight::new(
            InsightLevel::Positive,
            "Significant Alpha",
            format!(
                "Mean APR {:.1}% beats buy-and-hold by {alpha:.1} points.",
                mc.mean_apr
            ),
        ));
    } else if alpha < -5.0 {
        insights.push(Insight::new(
            InsightLevel::Negative,
            "Negative Alpha",
            format!(
                "Mean APR {:.1}% trails buy-and-hold by {:.1} points.",
                mc.mean_apr, -alpha
            ),
        ));
    } else {
        insights.push(Insight::new(
            InsightLevel::Neutral,
            "Similar to Buy & Hold",
            format!(
                "Mean APR {:.1}% is within 5 points of buy-and-hold.",
                mc.mean_apr
            ),
        ));
    }
}

/// At most one: how the downside compares to overall variability.
fn downside_insight(mc: &MonteCarloResult, insights: &mut Vec<Insight>) {
    if mc.mean_sharpe > 0.0 && mc.mean_sortino > 1.5 * mc.mean_sharpe {
        insights.push(Insight::new(
            InsightLevel::Positive,
            "Downside Well Contained",
            format!(
                "Sortino {:.2} well above Sharpe {:.2}: most volatility is to the upside.",
                mc.mean_sortino, mc.mean_sharpe
            ),
        ));
    } else if mc.mean_sharpe < 0.0 && mc.mean_sortino > 1.2 * mc.mean_sharpe {
        // Both negative here, so Sortino close to Sharpe means losses are
        // concentrated in downside moves.
        insights.push(Insight::new(
            InsightLevel::Warning,
            "High Downside Volatility",
            format!(
                "Sortino {:.2} is close to a negative Sharpe {:.2}: losses cluster on down days.",
                mc.mean_sortino, mc.mean_sharpe
            ),
        ));
    }
}

/// Up to one warning per regime that is materially underwater vs benchmark.
fn regime_insights(mc: &MonteCarloResult, insights: &mut Vec<Insight>) {
    for stats in &mc.regime_breakdown {
        if stats.count > 0 && stats.mean_alpha < -10.0 {
            insights.push(regime_warning(stats));
        }
    }
}

fn regime_warning(stats: &RegimeStats) -> Insight {
    let title = match stats.regime.name() {
        "bull" => "Underperforms in Bull Markets",
        "bear" => "Underperforms in Bear Markets",
        _ => "Underperforms in Sideways Markets",
    };
    let suggestion = match stats.regime.name() {
        "bull" => "Consider higher call deltas or wider roll thresholds to keep more upside.",
        "bear" => "Consider lower put deltas or skipping entries when realized vol spikes.",
        _ => "Consider tightening premium floors so weak cycles are skipped.",
    };
    Insight::new(
        InsightLevel::Warning,
        title,
        format!(
            "{} {} runs trail buy-and-hold by {:.1} APR points on average.",
            stats.count,
            stats.regime.name(),
            -stats.mean_alpha
        ),
    )
    .with_suggestion(suggestion.to_string())
}

/// Independent checks: average drawdown against estimated capital, and the
/// batch win rate.
fn risk_insights(mc: &MonteCarloResult, insights: &mut Vec<Insight>) {
    if mc.mean_benchmark_apr != 0.0 {
        let estimated_capital = (mc.mean_benchmark_pl / (mc.mean_benchmark_apr / 100.0)).abs();
        if mc.mean_max_drawdown > 0.5 * estimated_capital {
            insights.push(Insight::new(
                InsightLevel::Negative,
                "Large Average Drawdown",
                format!(
                    "Mean drawdown {:.0} exceeds half the estimated capital at risk ({:.0}).",
                    mc.mean_max_drawdown, estimated_capital
                ),
            ));
        }
    }

    if mc.win_rate < 0.4 {
        insights.push(Insight::new(
            InsightLevel::Warning,
            "Low Win Rate",
            format!(
                "Only {:.0}% of runs finished profitable.",
                mc.win_rate * 100.0
            ),
        ));
    }
}

/// At most one: how often assignment interrupts the premium engine.
fn assignment_insight(
    mc: &MonteCarloResult,
    config: &StrategyConfig,
    insights: &mut Vec<Insight>,
) {
    if mc.runs.is_empty() || mc.mean_full_cycles == 0.0 || mc.mean_assignments < 3.0 {
        return;
    }

    let ratio = mc.mean_assignments / mc.mean_full_cycles;
    if ratio > 3.0 {
        insights.push(
            Insight::new(
                InsightLevel::Warning,
                "High Assignment Frequency",
                format!(
                    "{:.1} assignments per run against {:.1} completed wheel cycles.",
                    mc.mean_assignments, mc.mean_full_cycles
                ),
            )
            .with_suggestion(format!(
                "Consider a put delta below the current {:.2} to take assignment less often.",
                config.target_delta
            )),
        );
    } else if mc.mean_assignments >= 2.0 {
        insights.push(Insight::new(
            InsightLevel::Neutral,
            "Regular Assignment Cadence",
            format!(
                "{:.1} assignments per run with {:.1} completed wheel cycles; the wheel is turning as designed.",
                mc.mean_assignments, mc.mean_full_cycles
            ),
        ));
    }
}
