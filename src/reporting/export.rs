use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::table::ReportRow;
use crate::models::report::ResultRecord;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// `pe_pb_ema_ratios_<YYYYmmdd_HHMMSS>.csv`
pub fn export_filename(now: DateTime<Local>) -> String {
    format!("pe_pb_ema_ratios_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

/// Write the records as CSV into `dir` and return the file path.
pub fn write_csv(
    dir: &Path,
    records: &[ResultRecord],
    now: DateTime<Local>,
) -> Result<PathBuf, ReportError> {
    let path = dir.join(export_filename(now));
    let mut wtr = csv::Writer::from_path(&path)?;

    for record in records {
        wtr.serialize(ReportRow::from(record))?;
    }
    wtr.flush()?;

    Ok(path)
}
