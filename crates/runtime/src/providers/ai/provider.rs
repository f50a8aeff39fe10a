//! Utility-based AI action provider.

use std::sync::Mutex;

use async_trait::async_trait;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use arena_core::{BattleConfig, MatchState, Phase, Side};

use super::context::AiContext;
use super::strategy::{Strategy, UtilityStrategy};
use crate::api::{ActionProvider, Decision, Result};

/// Drives a side with a [`Strategy`].
///
/// The provider refuses to act outside its own battle turn and drops any
/// decision that budgets more energy than the side holds. Multi-action
/// chaining after a single step is rolled from a seeded RNG, so two
/// providers built with the same seed make the same choices.
pub struct AiProvider<S = UtilityStrategy> {
    strategy: S,
    rng: Mutex<SmallRng>,
}

impl AiProvider<UtilityStrategy> {
    pub fn new(seed: u64) -> Self {
        Self::with_strategy(UtilityStrategy::new(), seed)
    }
}

impl<S: Strategy> AiProvider<S> {
    pub fn with_strategy(strategy: S, seed: u64) -> Self {
        Self {
            strategy,
            rng: Mutex::new(SmallRng::seed_from_u64(seed)),
        }
    }

    fn within_budget(decision: &Decision, energy: u32) -> bool {
        let steps_fit = match decision {
            Decision::EndTurn => true,
            Decision::Single(step) => step.cost <= energy,
            Decision::Sequence(steps) => steps.iter().all(|step| step.cost <= energy),
        };
        steps_fit && decision.planned_cost() <= energy
    }
}

fn is_turn_of(state: &MatchState, side: Side) -> bool {
    state.phase == Phase::Battle && state.active_side == side
}

#[async_trait]
impl<S: Strategy> ActionProvider for AiProvider<S> {
    async fn decide(&self, side: Side, state: &MatchState) -> Result<Decision> {
        if !is_turn_of(state, side) {
            return Ok(Decision::EndTurn);
        }

        let ctx = AiContext::new(side, state);
        let decision = self.strategy.decide(&ctx);
        let energy = ctx.energy();

        if !Self::within_budget(&decision, energy) {
            tracing::warn!(
                %side,
                energy,
                planned = decision.planned_cost(),
                "AI decision exceeds energy snapshot, ending turn"
            );
            return Ok(Decision::EndTurn);
        }

        tracing::debug!(%side, energy, ?decision, "AI decided");
        Ok(decision)
    }

    async fn chain_after_single(&self, side: Side, state: &MatchState) -> bool {
        if !is_turn_of(state, side) || state.side(side).energy < BattleConfig::ATTACK_COST {
            return false;
        }
        let Ok(mut rng) = self.rng.lock() else {
            return false;
        };
        let roll: u32 = rng.gen_range(0..100);
        let chained = roll < state.rules.multi_action_pct;
        tracing::debug!(%side, roll, chance = state.rules.multi_action_pct, chained, "multi-action roll");
        chained
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ai::testing::battle_state;
    use arena_core::{Difficulty, PlannedAction, DefendAction, CreatureId};

    struct Overspender;

    impl Strategy for Overspender {
        fn decide(&self, ctx: &AiContext<'_>) -> Decision {
            Decision::Single(PlannedAction {
                action: DefendAction::new(ctx.side, CreatureId(1001)).into(),
                cost: ctx.energy() + 1,
            })
        }
    }

    #[tokio::test]
    async fn waits_outside_own_turn() {
        let state = battle_state(Difficulty::Medium);
        let provider = AiProvider::new(1);
        let decision = provider.decide(Side::Human, &state).await.unwrap();
        assert_eq!(decision, Decision::EndTurn);
    }

    #[tokio::test]
    async fn drops_overspending_decisions() {
        let state = battle_state(Difficulty::Medium);
        let provider = AiProvider::with_strategy(Overspender, 1);
        let decision = provider.decide(Side::Opponent, &state).await.unwrap();
        assert_eq!(decision, Decision::EndTurn);
    }

    #[tokio::test]
    async fn chaining_follows_tier_chance() {
        let mut state = battle_state(Difficulty::Medium);
        let provider = AiProvider::new(9);

        state.rules.multi_action_pct = 100;
        assert!(provider.chain_after_single(Side::Opponent, &state).await);

        state.rules.multi_action_pct = 0;
        assert!(!provider.chain_after_single(Side::Opponent, &state).await);

        state.rules.multi_action_pct = 100;
        state.side_mut(Side::Opponent).energy = 1;
        assert!(!provider.chain_after_single(Side::Opponent, &state).await);
    }

    #[tokio::test]
    async fn same_seed_same_rolls() {
        let state = battle_state(Difficulty::Medium);
        let a = AiProvider::new(42);
        let b = AiProvider::new(42);
        for _ in 0..16 {
            assert_eq!(
                a.chain_after_single(Side::Opponent, &state).await,
                b.chain_after_single(Side::Opponent, &state).await
            );
        }
    }
}
