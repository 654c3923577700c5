use serde::{Deserialize, Serialize};
use std::fmt;

use super::rule::{Comparison, TickerRule};

/// The figures that made a rule fire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlertTrigger {
    PriceEarnings {
        ratio: f64,
        comparison: Comparison,
        threshold: f64,
    },
    PriceBook {
        ratio: f64,
        comparison: Comparison,
        threshold: f64,
    },
    /// Current price strictly above the EMA.
    PriceAboveEma { price: f64, ema: f64, period: u32 },
    /// Close and EMA both lower than the previous session.
    FallingTrend {
        prev_close: f64,
        current_close: f64,
        prev_ema: f64,
        current_ema: f64,
        period: u32,
    },
}

impl AlertTrigger {
    fn describe(&self, ticker: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertTrigger::PriceEarnings {
                ratio,
                comparison,
                threshold,
            } => write!(
                f,
                "ALERT: {} P/E ratio ({:.2}) is {} threshold ({})!",
                ticker, ratio, comparison, threshold
            ),
            AlertTrigger::PriceBook {
                ratio,
                comparison,
                threshold,
            } => write!(
                f,
                "ALERT: {} P/B ratio ({:.2}) is {} threshold ({})!",
                ticker, ratio, comparison, threshold
            ),
            AlertTrigger::PriceAboveEma { price, ema, period } => write!(
                f,
                "ALERT: {} Current price ({:.2}) is above {}-day EMA ({:.2})!",
                ticker, price, period, ema
            ),
            AlertTrigger::FallingTrend {
                prev_close,
                current_close,
                prev_ema,
                current_ema,
                period,
            } => write!(
                f,
                "ALERT: {} EMA conditions met: Previous close ({:.2}) > Current close ({:.2}), \
                 Previous {}-day EMA ({:.2}) > Current {}-day EMA ({:.2})!",
                ticker, prev_close, current_close, period, prev_ema, period, current_ema
            ),
        }
    }
}

struct Message<'a> {
    ticker: &'a str,
    trigger: &'a AlertTrigger,
}

impl fmt::Display for Message<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.trigger.describe(self.ticker, f)
    }
}

/// A fired rule, ready for dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEvent {
    pub ticker: String,
    pub rule: TickerRule,
    pub trigger: AlertTrigger,
    pub message: String,
}

impl AlertEvent {
    pub fn new(ticker: impl Into<String>, rule: TickerRule, trigger: AlertTrigger) -> Self {
        let ticker = ticker.into();
        let message = Message {
            ticker: &ticker,
            trigger: &trigger,
        }
        .to_string();
        Self {
            ticker,
            rule,
            trigger,
            message,
        }
    }
}
