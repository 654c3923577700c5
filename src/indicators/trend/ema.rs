//! EMA (Exponential Moving Average) indicator and session-close lookbacks

use crate::common::math;
use crate::models::indicators::PriceSeries;

/// EMA period used when no rule asks for a specific one.
pub const DEFAULT_EMA_PERIOD: u32 = 20;

/// Calculate the EMA over `series` as of `offset_days` sessions before the most recent one.
///
/// The average is seeded with the first close of the series. Returns `None` when
/// the series holds `offset_days` points or fewer, or when `period` is zero.
pub fn calculate_ema(series: &PriceSeries, period: u32, offset_days: usize) -> Option<f64> {
    if series.len() <= offset_days {
        return None;
    }

    let values = math::ema_series(&series.closes(), period as usize);
    let index = values.len().checked_sub(offset_days + 1)?;
    values.get(index).copied().map(math::round2)
}

/// Close of the second-most-recent session.
pub fn previous_close(series: &PriceSeries) -> Option<f64> {
    series.close_back(1).map(math::round2)
}

/// Close of the most recent session.
pub fn current_close(series: &PriceSeries) -> Option<f64> {
    series.close_back(0).map(math::round2)
}
