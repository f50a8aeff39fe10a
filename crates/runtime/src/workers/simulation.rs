//! Simulation worker that owns the authoritative [`MatchState`].
//!
//! Receives commands from [`crate::RuntimeHandle`], executes actions via
//! [`BattleEngine`], and publishes events to the [`EventBus`].

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use arena_core::{
    Action, BattleEngine, BattleError, ExecutionOutcome, LogEntry, MatchState, Phase, Side,
    SystemActionKind, TurnReport, record_rejection,
};

use crate::api::{Result, RuntimeError};
use crate::events::{BattleEvent, Event, EventBus, TurnEvent};

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Execute an action. A rejection leaves one log line and comes back as
    /// [`RuntimeError::Rejected`].
    Execute {
        action: Action,
        reply: oneshot::Sender<Result<ExecutionOutcome>>,
    },
    /// Execute an action and reply with the resulting snapshot either way.
    Submit {
        action: Action,
        reply: oneshot::Sender<MatchState>,
    },
    /// Run the end-of-turn sequence for `side`.
    EndTurn {
        side: Side,
        reply: oneshot::Sender<Result<TurnReport>>,
    },
    /// Query the current match state (read-only).
    QueryState { reply: oneshot::Sender<MatchState> },
}

fn is_reset(action: &Action) -> bool {
    matches!(
        action,
        Action::System {
            kind: SystemActionKind::Reset(_)
        }
    )
}

/// Snapshot of the fields that drive lifecycle and turn events.
#[derive(Clone, Copy)]
struct Marker {
    phase: Phase,
    turn: u32,
    active_side: Side,
}

impl Marker {
    fn of(state: &MatchState) -> Self {
        Self {
            phase: state.phase,
            turn: state.turn,
            active_side: state.active_side,
        }
    }
}

/// Background task that processes match commands.
///
/// The worker is a pure rules executor: it does not own providers or handle
/// I/O. Provider orchestration is done by [`crate::Runtime`].
pub struct SimulationWorker {
    state: MatchState,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl SimulationWorker {
    pub fn new(state: MatchState, command_rx: mpsc::Receiver<Command>, event_bus: EventBus) -> Self {
        info!(
            phase = %state.phase,
            difficulty = %state.difficulty,
            "SimulationWorker initialized"
        );

        Self {
            state,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop. Ends once every command sender is dropped.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    self.handle_command(cmd);
                }
                else => break,
            }
        }
        debug!("SimulationWorker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Execute { action, reply } => {
                let result = self.execute(&action);
                if reply.send(result).is_err() {
                    debug!("Execute reply channel closed (caller dropped)");
                }
            }
            Command::Submit { action, reply } => {
                if let Err(error) = self.execute(&action) {
                    if error.is_recoverable() {
                        debug!(%error, "Submit answered with the rejection snapshot");
                    } else {
                        warn!(%error, "Submit failed with an unrecoverable error");
                    }
                }
                if reply.send(self.state.clone()).is_err() {
                    debug!("Submit reply channel closed (caller dropped)");
                }
            }
            Command::EndTurn { side, reply } => {
                let result = self.end_turn(side);
                if reply.send(result).is_err() {
                    debug!("EndTurn reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.state.clone()).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
        }
    }

    /// Executes one action atomically and publishes what changed.
    ///
    /// This is the only place the worker calls [`BattleEngine::execute`].
    fn execute(&mut self, action: &Action) -> Result<ExecutionOutcome> {
        let before = Marker::of(&self.state);
        let name = action.as_snake_case();

        match BattleEngine::new(&mut self.state).execute(action) {
            Ok(outcome) => {
                debug!(
                    target: "runtime::worker",
                    action = name,
                    side = ?action.side(),
                    result = ?outcome.result,
                    "transition applied"
                );
                self.publish_entries(&outcome.new_entries);
                self.event_bus.publish(Event::Battle(BattleEvent::ActionApplied {
                    side: action.side(),
                    action: name.to_owned(),
                    result: outcome.result.clone(),
                }));
                if is_reset(action) {
                    info!("battle reset");
                    self.event_bus.publish(Event::Battle(BattleEvent::Reset));
                }
                self.publish_lifecycle(before);
                Ok(outcome)
            }
            Err(error) => {
                warn!(
                    target: "runtime::worker",
                    action = name,
                    side = ?action.side(),
                    code = error.error_code(),
                    "transition rejected: {}",
                    error
                );
                let log_before = self.state.log.len();
                record_rejection(&mut self.state, action, &error);
                self.publish_new_log(log_before);
                self.event_bus.publish(Event::Battle(BattleEvent::ActionRejected {
                    side: action.side(),
                    action: name.to_owned(),
                    reason: error.to_string(),
                }));
                Err(RuntimeError::Rejected(error))
            }
        }
    }

    fn end_turn(&mut self, side: Side) -> Result<TurnReport> {
        let before = Marker::of(&self.state);

        let result = {
            let mut engine = BattleEngine::new(&mut self.state);
            match side {
                Side::Human => engine.end_human_turn(),
                Side::Opponent => engine.end_opponent_turn(),
            }
        };

        match result {
            Ok(report) => {
                debug!(
                    target: "runtime::worker",
                    side = %side,
                    turn = report.turn,
                    entries = report.new_entries.len(),
                    "turn ended"
                );
                self.publish_entries(&report.new_entries);
                self.publish_lifecycle(before);
                Ok(report)
            }
            Err(error) => {
                warn!(
                    target: "runtime::worker",
                    side = %side,
                    code = error.error_code(),
                    "end of turn rejected: {}",
                    error
                );
                let log_before = self.state.log.len();
                self.state
                    .push_log(Some(side), format!("Rejected end_turn: {error}"));
                self.publish_new_log(log_before);
                Err(RuntimeError::Turn(error))
            }
        }
    }

    fn publish_entries(&self, entries: &[LogEntry]) {
        for entry in entries {
            self.event_bus.publish(Event::Log(entry.clone()));
        }
    }

    fn publish_new_log(&self, from: usize) {
        if let Some(entries) = self.state.log.get(from..) {
            self.publish_entries(entries);
        }
    }

    /// Publishes phase and turn changes relative to `before`.
    fn publish_lifecycle(&self, before: Marker) {
        let now = Marker::of(&self.state);

        if before.phase != now.phase {
            info!(from = %before.phase, to = %now.phase, "phase changed");
            match now.phase {
                Phase::Battle => self.event_bus.publish(Event::Battle(BattleEvent::Started {
                    difficulty: self.state.difficulty,
                })),
                Phase::Setup => {}
                Phase::Victory | Phase::Defeat => {
                    if let Some(summary) = self.state.summary() {
                        info!(
                            outcome = %summary.outcome,
                            turns = summary.turns,
                            max_combo = summary.max_combo,
                            "battle ended"
                        );
                        self.event_bus
                            .publish(Event::Battle(BattleEvent::Ended(summary)));
                    }
                }
            }
        }

        if now.phase == Phase::Battle
            && (before.phase != now.phase
                || before.turn != now.turn
                || before.active_side != now.active_side)
        {
            self.event_bus.publish(Event::Turn(TurnEvent {
                turn: now.turn,
                active_side: now.active_side,
            }));
        }
    }
}
