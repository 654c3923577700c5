//! Trend indicators: EMA and session closes

pub mod ema;

pub use ema::*;
