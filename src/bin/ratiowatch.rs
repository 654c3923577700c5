//! Ratiowatch
//!
//! Evaluates the configured ticker rules once, or on a fixed interval when
//! `EVAL_INTERVAL_SECONDS` is set.

use dotenvy::dotenv;
use ratiowatch::alerts::AlertDispatcher;
use ratiowatch::config::AppConfig;
use ratiowatch::core::cycle::RunCycle;
use ratiowatch::core::runtime::{BatchRunner, RunnerConfig};
use ratiowatch::core::scheduler::{RunScheduler, ScheduledJob};
use ratiowatch::logging;
use ratiowatch::services::market_data::MarketDataProvider;
use ratiowatch::services::notification::{Notifier, TelegramNotifier};
use ratiowatch::services::yahoo::YahooMarketDataProvider;
use std::sync::Arc;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = AppConfig::from_env();
    info!(environment = %config.environment, "Starting Ratiowatch");
    info!(rules_file = %config.rules_file.display(), "Rule file");

    let provider: Arc<dyn MarketDataProvider> = Arc::new(
        YahooMarketDataProvider::with_base_url(&config.yahoo_api_url)
            .with_cookie_url(&config.yahoo_cookie_url),
    );

    let notifier = TelegramNotifier::from_credentials(
        config.telegram_bot_token.as_deref(),
        config.telegram_chat_id.as_deref(),
        &config.telegram_api_url,
    )
    .map(|n| Arc::new(n) as Arc<dyn Notifier>);
    let dispatcher = AlertDispatcher::new(notifier);

    let runner = BatchRunner::new(provider, dispatcher).with_config(RunnerConfig::from(&config));
    let cycle = Arc::new(RunCycle::from_config(runner, &config));

    if config.eval_interval_seconds == 0 {
        cycle.execute().await;
        return Ok(());
    }

    let scheduler = RunScheduler::new(config.eval_interval_seconds)?;
    scheduler.start(cycle as Arc<dyn ScheduledJob>).await;

    info!(cron = %scheduler.cron_expr(), "Scheduler started, waiting for shutdown signal...");
    signal::ctrl_c().await?;

    info!("Shutting down...");
    scheduler.stop().await;
    Ok(())
}
