//! One complete run: load rules, evaluate every ticker, report.

use crate::config::{load_rules, AppConfig};
use crate::core::runtime::BatchRunner;
use crate::core::scheduler::ScheduledJob;
use crate::models::report::ResultRecord;
use crate::reporting::{render_table, write_csv};
use async_trait::async_trait;
use chrono::Local;
use std::path::PathBuf;
use tracing::{error, info};

pub struct RunCycle {
    runner: BatchRunner,
    rules_file: PathBuf,
    export_dir: Option<PathBuf>,
}

impl RunCycle {
    pub fn new(runner: BatchRunner, rules_file: PathBuf) -> Self {
        Self {
            runner,
            rules_file,
            export_dir: None,
        }
    }

    pub fn from_config(runner: BatchRunner, config: &AppConfig) -> Self {
        let cycle = Self::new(runner, config.rules_file.clone());
        if config.export_csv {
            cycle.with_csv_export(config.export_dir.clone())
        } else {
            cycle
        }
    }

    pub fn with_csv_export(mut self, dir: PathBuf) -> Self {
        self.export_dir = Some(dir);
        self
    }

    /// Run once and return the records. An empty or unreadable rule file ends
    /// the run early with no records.
    pub async fn execute(&self) -> Vec<ResultRecord> {
        let rules = load_rules(&self.rules_file);
        if rules.is_empty() {
            error!(path = %self.rules_file.display(), "No stock data to process.");
            return Vec::new();
        }

        let records = self.runner.run(&rules).await;

        if let Some(dir) = &self.export_dir {
            match write_csv(dir, &records, Local::now()) {
                Ok(path) => info!(path = %path.display(), "Results saved to {}", path.display()),
                Err(e) => error!(error = %e, "Failed to export results"),
            }
        }

        println!("\nP/E, P/B, and EMA Results:");
        println!("{}", render_table(&records));

        records
    }
}

#[async_trait]
impl ScheduledJob for RunCycle {
    async fn run_once(&self) {
        self.execute().await;
    }
}
