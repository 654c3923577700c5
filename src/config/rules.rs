//! Rule document loading.
//!
//! Two shapes are accepted: a list of rule objects, or `{"stocks": [...]}`
//! listing bare tickers that are reported without alert logic.

use crate::models::rule::TickerRule;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read rule file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in rule file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected rule document structure")]
    UnexpectedShape,
}

#[derive(Deserialize)]
struct StockList {
    stocks: Vec<serde_json::Value>,
}

/// Parse a rule document.
///
/// Only a document that is not JSON, or has neither accepted shape, is an
/// error. Individual entries that do not deserialize are skipped with a
/// warning; a stock list entry that is not a string becomes a nameless rule
/// the runner skips.
pub fn parse_rules(content: &str) -> Result<Vec<TickerRule>, ConfigError> {
    let document: serde_json::Value = serde_json::from_str(content)?;

    if let serde_json::Value::Array(entries) = document {
        return Ok(entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| parse_entry(index, entry))
            .collect());
    }

    let is_stock_list = document
        .as_object()
        .is_some_and(|map| map.contains_key("stocks"));
    if !is_stock_list {
        return Err(ConfigError::UnexpectedShape);
    }

    let list: StockList = serde_json::from_value(document)?;
    Ok(list
        .stocks
        .into_iter()
        .map(|stock| match stock {
            serde_json::Value::String(ticker) => TickerRule::report_only(ticker),
            other => {
                warn!(value = %other, "Invalid stock data");
                TickerRule::default()
            }
        })
        .collect())
}

fn parse_entry(index: usize, entry: serde_json::Value) -> Option<TickerRule> {
    match serde_json::from_value::<TickerRule>(entry) {
        Ok(rule) => Some(rule),
        Err(e) => {
            warn!(index = index, error = %e, "Invalid stock data, skipping entry");
            None
        }
    }
}

/// Read and parse the rule file. Every failure is logged and yields no rules.
pub fn load_rules(path: &Path) -> Vec<TickerRule> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(source) => {
            let err = ConfigError::Io {
                path: path.display().to_string(),
                source,
            };
            error!(error = %err, "Could not load rules");
            return Vec::new();
        }
    };

    match parse_rules(&content) {
        Ok(rules) => {
            info!(path = %path.display(), count = rules.len(), "Loaded {} rules", rules.len());
            rules
        }
        Err(err) => {
            error!(path = %path.display(), error = %err, "Could not load rules");
            Vec::new()
        }
    }
}
