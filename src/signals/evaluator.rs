//! Threshold rule evaluation against a ticker's computed indicators

use crate::indicators::calculator::EmaRequest;
use crate::models::alert::{AlertEvent, AlertTrigger};
use crate::models::indicators::IndicatorResult;
use crate::models::rule::{Comparison, RuleKind, TickerRule};

pub struct RuleEvaluator;

impl RuleEvaluator {
    /// Decide whether `rule` fires for `ticker` given its indicators.
    ///
    /// Missing inputs never raise; they suppress the alert.
    pub fn evaluate(
        ticker: &str,
        rule: &TickerRule,
        indicators: &IndicatorResult,
    ) -> Option<AlertEvent> {
        let trigger = match rule.kind() {
            RuleKind::PriceEarnings { threshold } => {
                Self::evaluate_ratio(indicators.recomputed_pe, &rule.comparison, threshold).map(
                    |ratio| AlertTrigger::PriceEarnings {
                        ratio,
                        comparison: rule.comparison.clone(),
                        threshold,
                    },
                )
            }
            RuleKind::PriceBook { threshold } => {
                Self::evaluate_ratio(indicators.recomputed_pb, &rule.comparison, threshold).map(
                    |ratio| AlertTrigger::PriceBook {
                        ratio,
                        comparison: rule.comparison.clone(),
                        threshold,
                    },
                )
            }
            RuleKind::Ema { period } => Self::evaluate_ema(&rule.comparison, period, indicators),
            RuleKind::ReportOnly => None,
        }?;

        Some(AlertEvent::new(ticker, rule.clone(), trigger))
    }

    /// EMA figures the rule needs; report-only rules still get a current EMA
    /// over `default_period` for the report row.
    pub fn ema_request(rule: &TickerRule, default_period: u32) -> EmaRequest {
        match rule.kind() {
            RuleKind::Ema { period } => EmaRequest::with_previous_day(period),
            _ => EmaRequest::current_only(default_period),
        }
    }

    fn evaluate_ratio(ratio: Option<f64>, comparison: &Comparison, threshold: f64) -> Option<f64> {
        let ratio = ratio?;
        comparison.holds(ratio, threshold).then_some(ratio)
    }

    fn evaluate_ema(
        comparison: &Comparison,
        period: u32,
        indicators: &IndicatorResult,
    ) -> Option<AlertTrigger> {
        let current_ema = indicators.ema_current?;

        match comparison {
            Comparison::GreaterThan => {
                let price = indicators.current_price?;
                (price > current_ema).then_some(AlertTrigger::PriceAboveEma {
                    price,
                    ema: current_ema,
                    period,
                })
            }
            // Falling close with an eroding EMA, both day over day.
            Comparison::LessThan => {
                let prev_close = indicators.prev_day_close?;
                let current_close = indicators.current_day_close?;
                let prev_ema = indicators.ema_prev_day?;

                (prev_close > current_close && prev_ema > current_ema).then_some(
                    AlertTrigger::FallingTrend {
                        prev_close,
                        current_close,
                        prev_ema,
                        current_ema,
                        period,
                    },
                )
            }
            Comparison::Unrecognized(_) => None,
        }
    }
}
