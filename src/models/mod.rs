//! Shared data models spanning the engine layers.

pub mod alert;
pub mod indicators;
pub mod report;
pub mod rule;

pub use alert::{AlertEvent, AlertTrigger};
pub use indicators::{
    FundamentalsSnapshot, IndicatorResult, PricePoint, PriceSeries, ValuationRatios,
};
pub use report::ResultRecord;
pub use rule::{Comparison, RuleKind, ThresholdType, TickerRule};
