//! Market data provider interface and an in-memory implementation.

use crate::models::indicators::{FundamentalsSnapshot, PriceSeries};
use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

/// Per-call retrieval failure. Never fatal for a run.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} for {symbol}")]
    Status { symbol: String, status: u16 },

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("data unavailable for {symbol}: {reason}")]
    Unavailable { symbol: String, reason: String },
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Most recent `sessions` daily closes, ascending. Empty means no data.
    async fn get_price_history(
        &self,
        symbol: &str,
        sessions: usize,
    ) -> Result<PriceSeries, DataError>;

    /// Current fundamentals snapshot.
    async fn get_fundamentals(&self, symbol: &str) -> Result<FundamentalsSnapshot, DataError>;
}

/// Serves fixed data per symbol. Unknown symbols get an empty history and an
/// empty snapshot; symbols registered with [`with_failure`](Self::with_failure)
/// fail both calls.
#[derive(Debug, Clone, Default)]
pub struct StaticMarketDataProvider {
    histories: HashMap<String, PriceSeries>,
    fundamentals: HashMap<String, FundamentalsSnapshot>,
    failing: HashMap<String, String>,
}

impl StaticMarketDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(mut self, symbol: &str, series: PriceSeries) -> Self {
        self.histories.insert(symbol.to_string(), series);
        self
    }

    pub fn with_fundamentals(mut self, symbol: &str, snapshot: FundamentalsSnapshot) -> Self {
        self.fundamentals.insert(symbol.to_string(), snapshot);
        self
    }

    pub fn with_failure(mut self, symbol: &str, reason: &str) -> Self {
        self.failing.insert(symbol.to_string(), reason.to_string());
        self
    }

    fn check(&self, symbol: &str) -> Result<(), DataError> {
        match self.failing.get(symbol) {
            Some(reason) => Err(DataError::Unavailable {
                symbol: symbol.to_string(),
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl MarketDataProvider for StaticMarketDataProvider {
    async fn get_price_history(
        &self,
        symbol: &str,
        sessions: usize,
    ) -> Result<PriceSeries, DataError> {
        self.check(symbol)?;
        Ok(self
            .histories
            .get(symbol)
            .cloned()
            .unwrap_or_else(PriceSeries::empty)
            .most_recent(sessions))
    }

    async fn get_fundamentals(&self, symbol: &str) -> Result<FundamentalsSnapshot, DataError> {
        self.check(symbol)?;
        Ok(self.fundamentals.get(symbol).cloned().unwrap_or_default())
    }
}
