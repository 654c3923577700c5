//! Assembles the per-ticker indicator bundle from whatever data was retrieved.

use crate::common::math::round2_opt;
use crate::indicators::trend::{calculate_ema, current_close, previous_close};
use crate::indicators::valuation::valuation_ratios;
use crate::models::indicators::{FundamentalsSnapshot, IndicatorResult, PriceSeries};

/// Which EMA figures a ticker needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmaRequest {
    pub period: u32,
    /// Also compute the EMA one session back.
    pub with_previous_day: bool,
}

impl EmaRequest {
    pub fn current_only(period: u32) -> Self {
        Self {
            period,
            with_previous_day: false,
        }
    }

    pub fn with_previous_day(period: u32) -> Self {
        Self {
            period,
            with_previous_day: true,
        }
    }
}

/// Build an [`IndicatorResult`]. A missing series leaves the EMA and close
/// figures unknown; a missing snapshot leaves the valuation figures unknown.
pub fn compute_indicators(
    series: Option<&PriceSeries>,
    snapshot: Option<&FundamentalsSnapshot>,
    ema: EmaRequest,
) -> IndicatorResult {
    let mut result = IndicatorResult::unknown();

    if let Some(snapshot) = snapshot {
        let ratios = valuation_ratios(snapshot);
        result.vendor_pe = round2_opt(ratios.vendor_pe);
        result.recomputed_pe = ratios.recomputed_pe;
        result.vendor_pb = round2_opt(ratios.vendor_pb);
        result.recomputed_pb = ratios.recomputed_pb;
        result.current_price = round2_opt(ratios.price);
        result.trailing_eps = round2_opt(ratios.eps);
        result.book_value_per_share = round2_opt(ratios.book_value);
    }

    if let Some(series) = series {
        result.ema_current = calculate_ema(series, ema.period, 0);
        if ema.with_previous_day {
            result.ema_prev_day = calculate_ema(series, ema.period, 1);
        }
        result.prev_day_close = previous_close(series);
        result.current_day_close = current_close(series);
    }

    result
}
