use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One session close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Session closes for one security, ascending by date.
///
/// An empty series is valid and means no data was available.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series, sorting by date so callers can pass points in any order.
    pub fn new(mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        Self { points }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Keep only the `sessions` most recent points.
    pub fn most_recent(mut self, sessions: usize) -> Self {
        if self.points.len() > sessions {
            let excess = self.points.len() - sessions;
            self.points.drain(..excess);
        }
        self
    }

    /// Close `sessions_back` sessions before the most recent one.
    pub fn close_back(&self, sessions_back: usize) -> Option<f64> {
        let index = self.points.len().checked_sub(sessions_back + 1)?;
        self.points.get(index).map(|p| p.close)
    }
}

/// Point-in-time fundamentals for one security. Any figure may be unknown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundamentalsSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailing_eps: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_pe: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_value_per_share: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_pb: Option<f64>,
}

impl FundamentalsSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_current_price(mut self, price: f64) -> Self {
        self.current_price = Some(price);
        self
    }

    pub fn with_trailing_eps(mut self, eps: f64) -> Self {
        self.trailing_eps = Some(eps);
        self
    }

    pub fn with_vendor_pe(mut self, pe: f64) -> Self {
        self.vendor_pe = Some(pe);
        self
    }

    pub fn with_book_value(mut self, book_value: f64) -> Self {
        self.book_value_per_share = Some(book_value);
        self
    }

    pub fn with_vendor_pb(mut self, pb: f64) -> Self {
        self.vendor_pb = Some(pb);
        self
    }
}

/// Vendor-reported and locally recomputed valuation figures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValuationRatios {
    pub vendor_pe: Option<f64>,
    pub recomputed_pe: Option<f64>,
    pub vendor_pb: Option<f64>,
    pub recomputed_pb: Option<f64>,
    pub price: Option<f64>,
    pub eps: Option<f64>,
    pub book_value: Option<f64>,
}

/// Per-ticker indicator bundle. Every present figure is rounded to two decimals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorResult {
    pub vendor_pe: Option<f64>,
    pub recomputed_pe: Option<f64>,
    pub vendor_pb: Option<f64>,
    pub recomputed_pb: Option<f64>,
    pub current_price: Option<f64>,
    pub trailing_eps: Option<f64>,
    pub book_value_per_share: Option<f64>,
    pub ema_current: Option<f64>,
    pub ema_prev_day: Option<f64>,
    pub prev_day_close: Option<f64>,
    pub current_day_close: Option<f64>,
}

impl IndicatorResult {
    /// All figures unknown.
    pub fn unknown() -> Self {
        Self::default()
    }
}
