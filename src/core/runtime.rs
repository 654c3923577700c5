//! Batch runner: one sequential pass over the configured rules

use crate::alerts::AlertDispatcher;
use crate::config::AppConfig;
use crate::config::DEFAULT_HISTORY_SESSIONS;
use crate::indicators::calculator::compute_indicators;
use crate::indicators::trend::DEFAULT_EMA_PERIOD;
use crate::models::indicators::{FundamentalsSnapshot, PriceSeries};
use crate::models::report::ResultRecord;
use crate::models::rule::{ThresholdType, TickerRule};
use crate::services::market_data::MarketDataProvider;
use crate::signals::RuleEvaluator;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Configuration for the batch runner
#[derive(Debug, Clone, Copy)]
pub struct RunnerConfig {
    pub history_sessions: usize,
    pub default_ema_period: u32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            history_sessions: DEFAULT_HISTORY_SESSIONS,
            default_ema_period: DEFAULT_EMA_PERIOD,
        }
    }
}

impl From<&AppConfig> for RunnerConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            history_sessions: config.history_sessions,
            default_ema_period: config.default_ema_period,
        }
    }
}

pub struct BatchRunner {
    provider: Arc<dyn MarketDataProvider>,
    dispatcher: AlertDispatcher,
    config: RunnerConfig,
}

impl BatchRunner {
    pub fn new(provider: Arc<dyn MarketDataProvider>, dispatcher: AlertDispatcher) -> Self {
        Self {
            provider,
            dispatcher,
            config: RunnerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RunnerConfig) -> Self {
        self.config = config;
        self
    }

    /// Process `rules` in order and return one record per rule that names a ticker.
    ///
    /// Entries without a ticker are skipped with a warning. Data failures leave
    /// figures unknown but never drop a ticker or stop the batch.
    pub async fn run(&self, rules: &[TickerRule]) -> Vec<ResultRecord> {
        let mut records = Vec::with_capacity(rules.len());
        let mut alerts = 0usize;

        for rule in rules {
            let Some(ticker) = rule.ticker() else {
                warn!(rule = ?rule, "Skipping rule without a ticker");
                continue;
            };

            let record = self.process_ticker(ticker, rule).await;
            if record.alert.is_some() {
                alerts += 1;
            }
            records.push(record);
        }

        info!(
            tickers = records.len(),
            alerts = alerts,
            "Batch complete: {} tickers, {} alerts",
            records.len(),
            alerts
        );
        records
    }

    async fn process_ticker(&self, ticker: &str, rule: &TickerRule) -> ResultRecord {
        info!(symbol = %ticker, "Processing {}", ticker);

        if rule.has_invalid_ema_period() {
            warn!(
                symbol = %ticker,
                threshold_number = ?rule.threshold_number,
                "EMA rule needs a positive integer period; reporting only"
            );
        }
        if let ThresholdType::Unsupported(kind) = &rule.threshold_type {
            warn!(symbol = %ticker, threshold_type = %kind, "Unsupported threshold type; reporting only");
        }

        let snapshot = self.fetch_fundamentals(ticker).await;
        let series = self.fetch_history(ticker).await;

        let ema = RuleEvaluator::ema_request(rule, self.config.default_ema_period);
        let indicators = compute_indicators(series.as_ref(), snapshot.as_ref(), ema);

        if snapshot.is_some() {
            if indicators.recomputed_pe.is_none() {
                warn!(symbol = %ticker, "Missing price or valid TTM EPS for {}", ticker);
            }
            if indicators.recomputed_pb.is_none() {
                warn!(symbol = %ticker, "Missing price or valid book value for {}", ticker);
            }
        }

        let record = ResultRecord::new(ticker, rule.clone(), indicators);
        match RuleEvaluator::evaluate(ticker, rule, &record.indicators) {
            Some(event) => {
                let message = event.message.clone();
                let outcome = self.dispatcher.dispatch(event).await;
                debug!(symbol = %ticker, outcome = ?outcome, "Alert dispatched");
                record.with_alert(message)
            }
            None => {
                debug!(symbol = %ticker, "No alert for {}", ticker);
                record
            }
        }
    }

    async fn fetch_fundamentals(&self, ticker: &str) -> Option<FundamentalsSnapshot> {
        match self.provider.get_fundamentals(ticker).await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                error!(symbol = %ticker, error = %e, "Error fetching fundamentals for {}", ticker);
                None
            }
        }
    }

    async fn fetch_history(&self, ticker: &str) -> Option<PriceSeries> {
        match self
            .provider
            .get_price_history(ticker, self.config.history_sessions)
            .await
        {
            Ok(series) => {
                if series.is_empty() {
                    warn!(symbol = %ticker, "No historical data for {}", ticker);
                }
                Some(series)
            }
            Err(e) => {
                error!(symbol = %ticker, error = %e, "Error fetching price history for {}", ticker);
                None
            }
        }
    }
}
