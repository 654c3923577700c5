use serde::Serialize;
use tabled::{Table, Tabled};

use crate::models::report::ResultRecord;
use crate::models::rule::ThresholdType;

const UNKNOWN: &str = "N/A";

/// Flattened, display-ready view of a [`ResultRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct ReportRow {
    pub ticker: String,
    pub current_price: String,
    pub ttm_eps: String,
    pub pe_ratio: String,
    pub calculated_pe_ratio: String,
    pub book_value: String,
    pub pb_ratio: String,
    pub calculated_pb_ratio: String,
    pub ema: String,
    pub prev_day_close: String,
    pub current_day_close: String,
    pub prev_day_ema: String,
    pub threshold_type: String,
    pub threshold_number: String,
    pub comparison: String,
    pub alert: String,
}

fn figure(value: Option<f64>) -> String {
    value.map_or_else(|| UNKNOWN.to_string(), |v| v.to_string())
}

impl From<&ResultRecord> for ReportRow {
    fn from(record: &ResultRecord) -> Self {
        let ind = &record.indicators;
        let threshold_type = match &record.rule.threshold_type {
            ThresholdType::None => UNKNOWN.to_string(),
            other => other.to_string(),
        };

        Self {
            ticker: record.ticker.clone(),
            current_price: figure(ind.current_price),
            ttm_eps: figure(ind.trailing_eps),
            pe_ratio: figure(ind.vendor_pe),
            calculated_pe_ratio: figure(ind.recomputed_pe),
            book_value: figure(ind.book_value_per_share),
            pb_ratio: figure(ind.vendor_pb),
            calculated_pb_ratio: figure(ind.recomputed_pb),
            ema: figure(ind.ema_current),
            prev_day_close: figure(ind.prev_day_close),
            current_day_close: figure(ind.current_day_close),
            prev_day_ema: figure(ind.ema_prev_day),
            threshold_type,
            threshold_number: figure(record.rule.threshold_number),
            comparison: record.rule.comparison.to_string(),
            alert: if record.alert.is_some() { "yes" } else { "no" }.to_string(),
        }
    }
}

/// Render all records as a console table, in input order.
pub fn render_table(records: &[ResultRecord]) -> String {
    Table::new(records.iter().map(ReportRow::from)).to_string()
}
