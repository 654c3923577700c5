//! Numeric primitives used by the indicator layer.

/// Round to two fractional digits.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round an optional figure, keeping absence as absence.
pub fn round2_opt(value: Option<f64>) -> Option<f64> {
    value.map(round2)
}

/// Divide, degrading to `None` when either operand is unknown or the divisor is zero.
pub fn safe_ratio(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    let (numerator, denominator) = (numerator?, denominator?);
    if denominator == 0.0 {
        return None;
    }
    let ratio = numerator / denominator;
    ratio.is_finite().then_some(ratio)
}

/// Full EMA series over `values` using the non-adjusted recurrence:
/// the first value seeds the average, then
/// `ema[i] = values[i] * alpha + ema[i - 1] * (1 - alpha)` with `alpha = 2 / (period + 1)`.
///
/// Returns an empty vector for empty input or a zero period.
pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    if values.is_empty() || period == 0 {
        return Vec::new();
    }

    let alpha = 2.0 / (period as f64 + 1.0);
    let mut series = Vec::with_capacity(values.len());
    let mut current = values[0];
    series.push(current);

    for value in &values[1..] {
        current = value * alpha + current * (1.0 - alpha);
        series.push(current);
    }

    series
}

/// Latest EMA value over `values`, or `None` when nothing can be computed.
pub fn ema(values: &[f64], period: usize) -> Option<f64> {
    ema_series(values, period).last().copied()
}
