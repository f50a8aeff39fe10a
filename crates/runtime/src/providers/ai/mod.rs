//! Utility AI for opponent (and autopiloted human) turns.
//!
//! Candidates are generated from the snapshot, scored with a four-part
//! [`Score`], and picked greedily by a [`Strategy`]. Easy and medium tiers
//! decide one action at a time; hard and expert plan a whole sequence.

mod context;
mod provider;
mod scoring;
mod strategy;

pub use context::AiContext;
pub use provider::AiProvider;
pub use scoring::{Candidate, MIN_VALUE, Score, Temperament, best, candidates};
pub use strategy::{MAX_PLAN_STEPS, PlannerMode, Strategy, UtilityStrategy};

#[cfg(test)]
pub(crate) mod testing {
    use arena_content::derive_stats;
    use arena_core::{
        BaseStats, Creature, CreatureId, Difficulty, DifficultyProfile, EffectFamily, Item,
        ItemId, ItemType, MatchState, Phase, Rarity, Side,
    };

    pub fn creature(id: u32, form_level: u32, strength: u32) -> Creature {
        let base = BaseStats::new(strength, 3, 4, 3, 3);
        Creature::new(CreatureId(id), "Tester", form_level, base, derive_stats(base, form_level))
    }

    /// Opponent to act, one creature fielded per side, one in hand, a tool
    /// and a spell, 10 energy.
    pub fn battle_state(difficulty: Difficulty) -> MatchState {
        let mut state = MatchState::new(difficulty, DifficultyProfile::default());
        state.phase = Phase::Battle;
        state.active_side = Side::Opponent;

        let human = state.side_mut(Side::Human);
        human.field.push(creature(1, 0, 3));
        human.energy = 10;

        let opponent = state.side_mut(Side::Opponent);
        opponent.field.push(creature(1001, 0, 3));
        opponent.hand.push(creature(1002, 0, 4));
        opponent.energy = 10;
        opponent.tools.push(Item::tool(
            ItemId(1000),
            "Warding Tonic",
            ItemType::Stamina,
            EffectFamily::Shield,
            Rarity::Common,
        ));
        opponent.spells.push(Item::spell(
            ItemId(1001),
            "Leeching Bolt",
            ItemType::Magic,
            EffectFamily::Drain,
            Rarity::Common,
        ));
        state
    }
}
