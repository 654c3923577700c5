use serde::Serialize;

use super::indicators::IndicatorResult;
use super::rule::TickerRule;

/// One report row: the configured rule, its figures and the alert it raised, if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRecord {
    pub ticker: String,
    pub rule: TickerRule,
    pub indicators: IndicatorResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<String>,
}

impl ResultRecord {
    pub fn new(ticker: impl Into<String>, rule: TickerRule, indicators: IndicatorResult) -> Self {
        Self {
            ticker: ticker.into(),
            rule,
            indicators,
            alert: None,
        }
    }

    pub fn with_alert(mut self, message: String) -> Self {
        self.alert = Some(message);
        self
    }
}
