//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for each
//! caller-visible operation, plus topic subscriptions for the event feed.
use tokio::sync::{broadcast, mpsc, oneshot};

use arena_core::{
    Action, AttackAction, CreatureId, CreatureRef, DefendAction, DeployAction, ExecutionOutcome,
    ItemId, MatchState, ResetAction, Side, StartBattleAction, TurnReport, UseSpellAction,
    UseToolAction,
};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Cloneable command sender plus event subscriptions.
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Execute an action. Rejections come back as [`RuntimeError::Rejected`]
    /// after the rejection line has been appended to the match log.
    pub async fn execute(&self, action: impl Into<Action>) -> Result<ExecutionOutcome> {
        let action = action.into();
        self.request(|reply| Command::Execute { action, reply })
            .await?
    }

    /// Execute an action and return the resulting snapshot.
    ///
    /// On rejection the snapshot is the previous state plus exactly one
    /// appended log line.
    pub async fn submit(&self, action: impl Into<Action>) -> Result<MatchState> {
        let action = action.into();
        self.request(|reply| Command::Submit { action, reply }).await
    }

    pub async fn start_battle(&self, start: StartBattleAction) -> Result<MatchState> {
        self.submit(Action::system(start)).await
    }

    pub async fn deploy(&self, side: Side, creature: CreatureId) -> Result<MatchState> {
        self.submit(Action::combat(DeployAction::new(side, creature)))
            .await
    }

    pub async fn attack(
        &self,
        side: Side,
        attacker: CreatureId,
        target: CreatureId,
    ) -> Result<MatchState> {
        self.submit(Action::combat(AttackAction::new(side, attacker, target)))
            .await
    }

    pub async fn use_tool(&self, side: Side, tool: ItemId, target: CreatureId) -> Result<MatchState> {
        self.submit(Action::combat(UseToolAction::new(side, tool, target)))
            .await
    }

    pub async fn use_spell(
        &self,
        side: Side,
        spell: ItemId,
        caster: CreatureId,
        target: CreatureRef,
    ) -> Result<MatchState> {
        self.submit(Action::combat(UseSpellAction::new(side, spell, caster, target)))
            .await
    }

    pub async fn defend(&self, side: Side, creature: CreatureId) -> Result<MatchState> {
        self.submit(Action::combat(DefendAction::new(side, creature)))
            .await
    }

    pub async fn reset(&self) -> Result<MatchState> {
        self.submit(Action::system(ResetAction)).await
    }

    /// Run the end-of-turn sequence for `side`.
    pub async fn end_turn(&self, side: Side) -> Result<TurnReport> {
        self.request(|reply| Command::EndTurn { side, reply })
            .await?
    }

    /// Snapshot of the current match.
    pub async fn query_state(&self) -> Result<MatchState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Receiver for one topic: `Log` lines, `Battle` lifecycle and action
    /// results, or `Turn` changes.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }
}
