//! End-of-turn orchestration.
//!
//! Each end-of-turn is a fixed sequence of system actions executed through
//! the engine on a working copy. The whole sequence commits or nothing
//! does. When a step ends the battle, the remaining steps are dropped.

use crate::action::{
    Action, AddLogAction, ApplyEnergyDecayAction, ApplyOngoingEffectsAction, ComboBonusAction,
    DrawCardAction, IncrementTurnAction, RegenerateEnergyAction, SetActiveSideAction,
    SystemActionKind,
};
use crate::config::BattleConfig;
use crate::error::{BattleError, ErrorSeverity};
use crate::state::{LogEntry, Outcome, Phase, Side};

use super::{BattleEngine, ExecuteError};

/// Errors that can occur while ending a turn.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("no battle in progress (phase: {phase})")]
    NotInBattle { phase: Phase },

    #[error("cannot end the {expected} turn while {active} is active")]
    NotActiveSide { expected: Side, active: Side },

    #[error("end-of-turn step failed: {0}")]
    Step(#[from] ExecuteError),
}

impl BattleError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotInBattle { .. } | Self::NotActiveSide { .. } => ErrorSeverity::Recoverable,
            Self::Step(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotInBattle { .. } => "TURN_NOT_IN_BATTLE",
            Self::NotActiveSide { .. } => "TURN_NOT_ACTIVE_SIDE",
            Self::Step(error) => error.error_code(),
        }
    }
}

/// What an end-of-turn pass produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    pub new_entries: Vec<LogEntry>,
    /// Set when a step ended the battle; later steps were dropped.
    pub outcome: Option<Outcome>,
    pub turn: u32,
}

/// Runs system steps until the battle leaves the battle phase.
struct TurnRunner<'e, 'a> {
    engine: &'e mut BattleEngine<'a>,
    report: TurnReport,
}

impl<'e, 'a> TurnRunner<'e, 'a> {
    fn new(engine: &'e mut BattleEngine<'a>) -> Self {
        Self {
            engine,
            report: TurnReport::default(),
        }
    }

    /// Executes one step. Returns `false` once the battle is over.
    fn step(&mut self, kind: impl Into<SystemActionKind>) -> Result<bool, TurnError> {
        let outcome = self.engine.execute(&Action::system(kind))?;
        self.report.new_entries.extend(outcome.new_entries.iter().cloned());
        if let Some(ended) = outcome.ended() {
            self.report.outcome = Some(ended);
        }
        Ok(self.engine.state().phase == Phase::Battle)
    }

    fn decay_both(&mut self) -> Result<bool, TurnError> {
        Ok(self.step(ApplyEnergyDecayAction::new(Side::Human))?
            && self.step(ApplyEnergyDecayAction::new(Side::Opponent))?)
    }

    fn finish(mut self) -> TurnReport {
        self.report.turn = self.engine.state().turn;
        self.report
    }
}

fn human_steps(turn: &mut TurnRunner<'_, '_>) -> Result<(), TurnError> {
    let streak = turn.engine.state().human.consecutive_actions;
    if streak >= BattleConfig::COMBO_THRESHOLD
        && !turn.step(ComboBonusAction::new(Side::Human, streak))?
    {
        return Ok(());
    }
    if !turn.step(ApplyOngoingEffectsAction)? {
        return Ok(());
    }
    if !turn.decay_both()? {
        return Ok(());
    }
    if !turn.step(SetActiveSideAction::new(Side::Opponent))? {
        return Ok(());
    }
    turn.step(AddLogAction::new(None, "Enemy's turn..."))?;
    Ok(())
}

fn opponent_steps(turn: &mut TurnRunner<'_, '_>) -> Result<(), TurnError> {
    // Captured before the side switch resets the counter.
    let streak = turn.engine.state().opponent.consecutive_actions;

    if !turn.step(ApplyOngoingEffectsAction)? {
        return Ok(());
    }
    if !turn.decay_both()? {
        return Ok(());
    }
    if !turn.step(IncrementTurnAction)? {
        return Ok(());
    }
    if !turn.step(SetActiveSideAction::new(Side::Human))? {
        return Ok(());
    }
    for side in [Side::Human, Side::Opponent] {
        if turn.engine.state().can_draw(side) && !turn.step(DrawCardAction::new(side))? {
            return Ok(());
        }
    }
    for side in [Side::Human, Side::Opponent] {
        if !turn.step(RegenerateEnergyAction::new(side))? {
            return Ok(());
        }
    }
    if streak >= BattleConfig::COMBO_THRESHOLD
        && !turn.step(ComboBonusAction::new(Side::Opponent, streak))?
    {
        return Ok(());
    }
    let number = turn.engine.state().turn;
    turn.step(AddLogAction::new(
        None,
        format!("Turn {number} begins. Your move!"),
    ))?;
    Ok(())
}

/// Turn orchestration methods for BattleEngine.
impl<'a> BattleEngine<'a> {
    /// Closes the human turn: combo bonus, effect pass, decay, side switch.
    pub fn end_human_turn(&mut self) -> Result<TurnReport, TurnError> {
        self.end_turn(Side::Human)
    }

    /// Closes the opponent turn: effect pass, decay, turn increment, side
    /// switch, draws, regeneration and the opponent's combo bonus.
    pub fn end_opponent_turn(&mut self) -> Result<TurnReport, TurnError> {
        self.end_turn(Side::Opponent)
    }

    /// Ends whichever side's turn is active.
    pub fn end_turn_for_active(&mut self) -> Result<TurnReport, TurnError> {
        match self.state.active_side {
            Side::Human => self.end_human_turn(),
            Side::Opponent => self.end_opponent_turn(),
        }
    }

    fn end_turn(&mut self, side: Side) -> Result<TurnReport, TurnError> {
        if self.state.phase != Phase::Battle {
            return Err(TurnError::NotInBattle {
                phase: self.state.phase,
            });
        }
        if self.state.active_side != side {
            return Err(TurnError::NotActiveSide {
                expected: side,
                active: self.state.active_side,
            });
        }

        let mut working = self.state.clone();
        let report = {
            let mut engine = BattleEngine::new(&mut working);
            let mut runner = TurnRunner::new(&mut engine);
            match side {
                Side::Human => human_steps(&mut runner)?,
                Side::Opponent => opponent_steps(&mut runner)?,
            }
            runner.finish()
        };
        *self.state = working;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{
        BaseStats, BattleStats, Creature, CreatureId, DifficultyProfile, Effect, MatchState,
        StatDeltas,
    };

    fn creature(id: u32) -> Creature {
        Creature::new(
            CreatureId(id),
            format!("Mon{id}"),
            0,
            BaseStats::new(3, 3, 3, 3, 3),
            BattleStats {
                max_health: 50,
                physical_attack: 8,
                magical_attack: 4,
                physical_defense: 2,
                magical_defense: 2,
                initiative: 3,
                energy_cost: 0,
            },
        )
    }

    fn battle() -> MatchState {
        let rules = DifficultyProfile::new(3, 2, 1, 30, 6);
        let mut state = MatchState::new(Default::default(), rules);
        state.phase = Phase::Battle;
        state.human.field.push(creature(1));
        state.human.deck.push(creature(2));
        state.opponent.field.push(creature(100));
        state.opponent.deck.push(creature(101));
        state.human.energy = 10;
        state.opponent.energy = 10;
        state
    }

    #[test]
    fn human_turn_switches_and_resets_combo() {
        let mut state = battle();
        state.human.consecutive_actions = 3;
        state.human.energy = 20;

        let report = BattleEngine::new(&mut state).end_human_turn().unwrap();
        assert_eq!(state.active_side, Side::Opponent);
        assert_eq!(state.human.consecutive_actions, 0);
        // combo bonus +2
        assert_eq!(state.human.field[0].stats.physical_attack, 10);
        // decay 20 -> 18
        assert_eq!(state.human.energy, 18);
        assert_eq!(report.outcome, None);
        assert_eq!(
            report.new_entries.last().map(|e| e.message.as_str()),
            Some("Enemy's turn...")
        );
    }

    #[test]
    fn opponent_turn_draws_regenerates_and_advances() {
        let mut state = battle();
        state.active_side = Side::Opponent;
        state.opponent.consecutive_actions = 4;

        let report = BattleEngine::new(&mut state).end_opponent_turn().unwrap();
        assert_eq!(state.turn, 2);
        assert_eq!(report.turn, 2);
        assert_eq!(state.active_side, Side::Human);
        assert_eq!(state.human.hand.len(), 1);
        assert_eq!(state.opponent.hand.len(), 1);
        // 10 + 3 base + 0 field (3/10) + 0 momentum
        assert_eq!(state.human.energy, 13);
        // tier bonus +1
        assert_eq!(state.opponent.energy, 14);
        // opponent combo bonus applied after the switch
        assert_eq!(state.opponent.field[0].stats.physical_attack, 10);
        assert_eq!(state.opponent.consecutive_actions, 0);
    }

    #[test]
    fn battle_ending_effect_pass_drops_remaining_steps() {
        let mut state = battle();
        state.opponent.deck.clear();
        state.opponent.field[0].current_health = 2;
        state.opponent.field[0]
            .active_effects
            .push(Effect::new("Burn", StatDeltas::new(), -10, 2));

        let report = BattleEngine::new(&mut state).end_human_turn().unwrap();
        assert_eq!(report.outcome, Some(Outcome::Victory));
        assert_eq!(state.phase, Phase::Victory);
        // side switch never happened
        assert_eq!(state.active_side, Side::Human);
    }

    #[test]
    fn wrong_side_cannot_end_turn() {
        let mut state = battle();
        let before = state.clone();
        assert!(matches!(
            BattleEngine::new(&mut state).end_opponent_turn(),
            Err(TurnError::NotActiveSide { .. })
        ));
        assert_eq!(state, before);
    }
}
