//! Valuation and trend alerting for a configured list of securities.
//!
//! Each run fetches a price history and a fundamentals snapshot per ticker,
//! derives P/E, P/B and EMA figures, evaluates the ticker's threshold rule and
//! dispatches an alert when the rule fires.

pub mod alerts;
pub mod common;
pub mod config;
pub mod core;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod reporting;
pub mod services;
pub mod signals;
