//! Swappable decision heuristics.

use arena_core::{Action, BattleEngine, Difficulty, Phase};

use super::context::AiContext;
use super::scoring::{best, candidates};
use crate::api::Decision;

/// Longest plan a sequence planner will emit.
pub const MAX_PLAN_STEPS: usize = 8;

/// A pure policy from a match snapshot to a decision.
///
/// Implementations must only reference creatures and items present in the
/// snapshot and must never budget more energy than the side holds.
pub trait Strategy: Send + Sync {
    fn decide(&self, ctx: &AiContext<'_>) -> Decision;
}

/// Whether a turn is decided one action at a time or planned up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerMode {
    Single,
    Sequence,
}

impl PlannerMode {
    pub const fn for_difficulty(difficulty: Difficulty) -> Self {
        if difficulty.plans_sequences() {
            Self::Sequence
        } else {
            Self::Single
        }
    }
}

/// Greedy utility policy. Without an explicit mode the tier picks one.
#[derive(Debug, Clone, Copy, Default)]
pub struct UtilityStrategy {
    mode: Option<PlannerMode>,
}

impl UtilityStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: PlannerMode) -> Self {
        Self { mode: Some(mode) }
    }

    fn single(ctx: &AiContext<'_>) -> Decision {
        let cands = candidates(ctx, ctx.energy());
        match best(&cands) {
            Some(pick) => Decision::Single(pick.step.clone()),
            None => Decision::EndTurn,
        }
    }

    /// Plans steps against a scratch copy of the match, so later steps see
    /// the field occupancy and health left by earlier ones. The summed cost
    /// never exceeds the energy snapshot.
    fn sequence(ctx: &AiContext<'_>) -> Decision {
        let snapshot = ctx.energy();
        let mut scratch = ctx.state.clone();
        let mut spent = 0;
        let mut steps = Vec::new();

        while steps.len() < MAX_PLAN_STEPS {
            let view = AiContext::new(ctx.side, &scratch);
            let budget = snapshot.saturating_sub(spent).min(view.energy());
            let cands = candidates(&view, budget);
            let Some(pick) = best(&cands) else {
                break;
            };
            let step = pick.step.clone();

            if BattleEngine::new(&mut scratch)
                .execute(&Action::combat(step.action.clone()))
                .is_err()
            {
                break;
            }
            spent += step.cost;
            steps.push(step);
            if scratch.phase != Phase::Battle {
                break;
            }
        }

        if steps.is_empty() {
            Decision::EndTurn
        } else {
            Decision::Sequence(steps)
        }
    }
}

impl Strategy for UtilityStrategy {
    fn decide(&self, ctx: &AiContext<'_>) -> Decision {
        let mode = self
            .mode
            .unwrap_or_else(|| PlannerMode::for_difficulty(ctx.state.difficulty));
        match mode {
            PlannerMode::Single => Self::single(ctx),
            PlannerMode::Sequence => Self::sequence(ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ai::testing::{battle_state, creature};
    use arena_core::{CombatAction, Side};

    #[test]
    fn tiers_pick_planner_modes() {
        assert_eq!(PlannerMode::for_difficulty(Difficulty::Easy), PlannerMode::Single);
        assert_eq!(PlannerMode::for_difficulty(Difficulty::Medium), PlannerMode::Single);
        assert_eq!(PlannerMode::for_difficulty(Difficulty::Hard), PlannerMode::Sequence);
        assert_eq!(PlannerMode::for_difficulty(Difficulty::Expert), PlannerMode::Sequence);
    }

    #[test]
    fn ends_turn_without_energy() {
        let mut state = battle_state(Difficulty::Medium);
        let own = state.side_mut(Side::Opponent);
        own.energy = 0;
        own.tools.clear();
        let ctx = AiContext::new(Side::Opponent, &state);

        assert_eq!(UtilityStrategy::new().decide(&ctx), Decision::EndTurn);
        assert_eq!(
            UtilityStrategy::with_mode(PlannerMode::Sequence).decide(&ctx),
            Decision::EndTurn
        );
    }

    #[test]
    fn sequence_stays_within_snapshot() {
        let state = battle_state(Difficulty::Expert);
        let ctx = AiContext::new(Side::Opponent, &state);
        let decision = UtilityStrategy::new().decide(&ctx);

        let Decision::Sequence(steps) = &decision else {
            panic!("expert plans sequences, got {decision:?}");
        };
        assert!(!steps.is_empty());
        assert!(steps.len() <= MAX_PLAN_STEPS);
        assert!(decision.planned_cost() <= state.side(Side::Opponent).energy);
    }

    #[test]
    fn sequence_respects_field_capacity() {
        let mut state = battle_state(Difficulty::Expert);
        state.rules.field_capacity = 2;
        let own = state.side_mut(Side::Opponent);
        own.energy = 25;
        own.hand.push(creature(1003, 0, 5));
        let ctx = AiContext::new(Side::Opponent, &state);

        let Decision::Sequence(steps) = UtilityStrategy::new().decide(&ctx) else {
            panic!("expected a plan");
        };
        let deploys = steps
            .iter()
            .filter(|s| matches!(s.action, CombatAction::Deploy(_)))
            .count();
        assert!(deploys <= 1);
    }
}
