//! Client builder with dependency injection pattern.

use anyhow::{Context, Result};
use arena_core::StartBattleAction;
use arena_runtime::Runtime;

use crate::{Client, Output};

/// Builder for constructing a [`Client`].
///
/// Runtime and opening are required; output defaults to a text feed.
#[derive(Default)]
pub struct ClientBuilder {
    runtime: Option<Runtime>,
    start: Option<StartBattleAction>,
    output: Output,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runtime with both side providers installed.
    pub fn runtime(mut self, runtime: Runtime) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn start(mut self, start: StartBattleAction) -> Self {
        self.start = Some(start);
        self
    }

    pub fn output(mut self, output: Output) -> Self {
        self.output = output;
        self
    }

    pub fn build(self) -> Result<Client> {
        let runtime = self
            .runtime
            .context("Runtime is required. Use .runtime() to set it.")?;
        let start = self
            .start
            .context("Battle opening is required. Use .start() to set it.")?;

        Ok(Client {
            runtime,
            start,
            output: self.output,
        })
    }
}
