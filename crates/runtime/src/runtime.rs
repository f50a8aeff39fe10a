//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up the command channel and
//! event bus, and drives turns by asking each side's [`ActionProvider`] for
//! decisions. AI sequences are replayed as discrete commands so every step
//! observes the state left by the one before it.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use arena_core::{
    Action, ActionResult, BattleSummary, MatchState, Phase, PlannedAction, Side, TurnReport,
};

use crate::api::{ActionProvider, Decision, Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::workers::{Command, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Seed for AI providers and opponent generation.
    pub seed: u64,
    /// Presentation pause between AI sequence steps. Zero disables it.
    pub ai_step_delay: Duration,
    /// Upper bound on provider decisions within one turn.
    pub max_actions_per_turn: usize,
    /// [`Runtime::run_until_ended`] gives up after this many turns.
    pub max_turns: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 256,
            command_buffer_size: 32,
            seed: 0,
            ai_step_delay: Duration::ZERO,
            max_actions_per_turn: 32,
            max_turns: 200,
        }
    }
}

impl RuntimeConfig {
    /// Defaults overridden by `ARENA_SEED`, `ARENA_AI_STEP_DELAY_MS` and
    /// `ARENA_EVENT_BUFFER` when set and parseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            seed: read_env("ARENA_SEED").unwrap_or(defaults.seed),
            ai_step_delay: read_env("ARENA_AI_STEP_DELAY_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.ai_step_delay),
            event_buffer_size: read_env("ARENA_EVENT_BUFFER").unwrap_or(defaults.event_buffer_size),
            ..defaults
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

fn read_env<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok()?.parse().ok()
}

/// Main runtime that orchestrates a match.
///
/// Design: Runtime owns the worker and the providers.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    config: RuntimeConfig,
    handle: RuntimeHandle,

    human_provider: Option<Box<dyn ActionProvider>>,
    opponent_provider: Option<Box<dyn ActionProvider>>,

    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn set_human_provider(&mut self, provider: impl ActionProvider + 'static) {
        self.human_provider = Some(Box::new(provider));
    }

    pub fn set_opponent_provider(&mut self, provider: impl ActionProvider + 'static) {
        self.opponent_provider = Some(Box::new(provider));
    }

    fn provider(&self, side: Side) -> Result<&dyn ActionProvider> {
        let provider = match side {
            Side::Human => self.human_provider.as_deref(),
            Side::Opponent => self.opponent_provider.as_deref(),
        };
        provider.ok_or(RuntimeError::ProviderNotSet { side })
    }

    /// Plays `side`'s turn to completion and ends it.
    ///
    /// Returns `None` when the battle ended during the turn, or when it is
    /// not `side`'s battle turn to begin with.
    pub async fn play_turn(&self, side: Side) -> Result<Option<TurnReport>> {
        let provider = self.provider(side)?;
        let mut actions = 0;

        loop {
            let snapshot = self.handle.query_state().await?;
            if snapshot.phase != Phase::Battle || snapshot.active_side != side {
                return Ok(None);
            }
            if actions >= self.config.max_actions_per_turn {
                tracing::debug!(%side, actions, "action limit reached, ending turn");
                break;
            }

            match provider.decide(side, &snapshot).await? {
                Decision::EndTurn => break,
                Decision::Single(step) => {
                    actions += 1;
                    match self.execute_step(step).await? {
                        StepResult::Ended => return Ok(None),
                        StepResult::Skipped => break,
                        StepResult::Applied => {}
                    }
                    let after = self.handle.query_state().await?;
                    if !provider.chain_after_single(side, &after).await {
                        break;
                    }
                }
                Decision::Sequence(steps) => {
                    tracing::debug!(%side, steps = steps.len(), "replaying plan");
                    for step in steps {
                        actions += 1;
                        if self.execute_step(step).await? == StepResult::Ended {
                            return Ok(None);
                        }
                        self.pace().await;
                    }
                    break;
                }
            }
        }

        self.handle.end_turn(side).await.map(Some)
    }

    async fn execute_step(&self, step: PlannedAction) -> Result<StepResult> {
        let outcome = self.handle.execute(Action::Planned(step)).await?;
        Ok(if outcome.ended().is_some() {
            StepResult::Ended
        } else if outcome.result == ActionResult::Skipped {
            StepResult::Skipped
        } else {
            StepResult::Applied
        })
    }

    async fn pace(&self) {
        tokio::task::yield_now().await;
        if !self.config.ai_step_delay.is_zero() {
            tokio::time::sleep(self.config.ai_step_delay).await;
        }
    }

    /// Alternates turns until the battle reaches a terminal phase.
    pub async fn run_until_ended(&self) -> Result<BattleSummary> {
        loop {
            let state = self.handle.query_state().await?;
            match state.phase {
                Phase::Setup => return Err(RuntimeError::NotInBattle),
                Phase::Victory | Phase::Defeat => {
                    return state.summary().ok_or(RuntimeError::NotInBattle);
                }
                Phase::Battle => {
                    if state.turn > self.config.max_turns {
                        return Err(RuntimeError::TurnLimit {
                            turns: self.config.max_turns,
                        });
                    }
                    self.play_turn(state.active_side).await?;
                }
            }
        }
    }

    /// Shutdown the runtime gracefully.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepResult {
    Applied,
    Skipped,
    Ended,
}

/// Builder for [`Runtime`].
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    state: Option<MatchState>,
    human_provider: Option<Box<dyn ActionProvider>>,
    opponent_provider: Option<Box<dyn ActionProvider>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            state: None,
            human_provider: None,
            opponent_provider: None,
        }
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Starting state. Defaults to an empty match in the setup phase.
    pub fn initial_state(mut self, state: MatchState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn human_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.human_provider = Some(Box::new(provider));
        self
    }

    pub fn opponent_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.opponent_provider = Some(Box::new(provider));
        self
    }

    /// Spawns the simulation worker. Must be called inside a tokio runtime.
    pub fn build(self) -> Runtime {
        let state = self.state.unwrap_or_default();
        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_bus.clone());
        let worker = SimulationWorker::new(state, command_rx, event_bus);
        let sim_worker_handle = tokio::spawn(worker.run());

        Runtime {
            config: self.config,
            handle,
            human_provider: self.human_provider,
            opponent_provider: self.opponent_provider,
            sim_worker_handle,
        }
    }
}
