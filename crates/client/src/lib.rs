//! Headless battle client.
//!
//! ```text
//! Client
//!   ├─→ Runtime (rules, providers, event bus)
//!   └─→ Output  (log feed and summary on stdout)
//! ```
//!
//! The client starts the battle, streams the `Log` topic while the runtime
//! autoplays both sides, and prints the summary once the battle ends.

mod builder;
pub mod config;
pub mod format;
pub mod setup;

pub use builder::ClientBuilder;
pub use config::ClientConfig;

use anyhow::Result;
use arena_core::{BattleSummary, StartBattleAction};
use arena_runtime::{Event, Runtime, Topic};
use tokio::sync::broadcast::error::RecvError;

use format::{format_log_entry, format_summary};

/// How results reach stdout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Output {
    /// Stream each log line while the battle runs.
    pub feed: bool,
    /// Print the summary as JSON.
    pub json_summary: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self {
            feed: true,
            json_summary: false,
        }
    }
}

/// Top-level client container.
pub struct Client {
    runtime: Runtime,
    start: StartBattleAction,
    output: Output,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Runs one battle to completion and prints its summary.
    pub async fn run(self) -> Result<BattleSummary> {
        let handle = self.runtime.handle();

        let feed_task = self.output.feed.then(|| {
            let mut log = handle.subscribe(Topic::Log);
            tokio::spawn(async move {
                loop {
                    match log.recv().await {
                        Ok(Event::Log(entry)) => println!("{}", format_log_entry(&entry)),
                        Ok(_) => {}
                        Err(RecvError::Lagged(missed)) => {
                            tracing::warn!(missed, "log feed lagged");
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            })
        });

        handle.start_battle(self.start).await?;
        let result = self.runtime.run_until_ended().await;

        // Let the feed drain what the worker already published.
        tokio::task::yield_now().await;
        drop(handle);
        let shutdown = self.runtime.shutdown().await;
        if let Some(task) = feed_task
            && let Err(error) = task.await
        {
            tracing::warn!(%error, "log feed task failed");
        }

        let summary = result?;
        shutdown?;

        if self.output.json_summary {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            println!("{}", format_summary(&summary));
        }
        Ok(summary)
    }
}
