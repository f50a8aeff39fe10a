//! AI context for utility-based decision making.
//!
//! The [`AiContext`] is the read-only "blackboard" shared by candidate
//! generation and scoring: the deciding side, a match snapshot and helper
//! queries over it.

use arena_core::combat::{calculate_damage, combo_multiplier_pct, power_pct, scale_pct};
use arena_core::{Creature, MatchState, Rarity, Side, SideState};

pub struct AiContext<'a> {
    /// The side making the decision.
    pub side: Side,

    /// Read-only access to the match snapshot.
    pub state: &'a MatchState,
}

impl<'a> AiContext<'a> {
    pub fn new(side: Side, state: &'a MatchState) -> Self {
        Self { side, state }
    }

    pub fn own(&self) -> &'a SideState {
        self.state.side(self.side)
    }

    pub fn enemy(&self) -> &'a SideState {
        self.state.side(self.side.opposite())
    }

    pub fn energy(&self) -> u32 {
        self.own().energy
    }

    /// Free field slots for the deciding side.
    pub fn field_room(&self) -> usize {
        self.state
            .field_capacity(self.side)
            .saturating_sub(self.own().field.len())
    }

    /// Item power for this match's tier.
    pub fn item_power(&self, rarity: Rarity) -> u32 {
        power_pct(self.state.difficulty, rarity)
    }

    /// Damage `attacker` would deal to `target` right now, including the
    /// owner's current combo scaling.
    pub fn estimate_damage(&self, owner: Side, attacker: &Creature, target: &Creature) -> u32 {
        let (kind, attack) = attacker.attack_profile();
        let base = calculate_damage(attack, target.defense_against(kind), target.is_defending);
        let streak = self.state.side(owner).consecutive_actions;
        scale_pct(base, combo_multiplier_pct(streak))
    }

    /// Highest damage any enemy creature could deal to `ally` next turn.
    pub fn threat_to(&self, ally: &Creature) -> u32 {
        let enemy_side = self.side.opposite();
        self.enemy()
            .field
            .iter()
            .map(|foe| self.estimate_damage(enemy_side, foe, ally))
            .max()
            .unwrap_or(0)
    }

    /// Own fielded creature with the lowest health ratio.
    pub fn most_wounded_ally(&self) -> Option<&'a Creature> {
        self.own().field.iter().min_by_key(|c| c.health_ratio_pct())
    }

    /// Own fielded creature with the highest magical attack.
    pub fn best_caster(&self) -> Option<&'a Creature> {
        self.own()
            .field
            .iter()
            .max_by_key(|c| (c.stats.magical_attack, c.base.magic))
    }

    /// Enemy fielded creature with the lowest current health.
    pub fn weakest_enemy(&self) -> Option<&'a Creature> {
        self.enemy().field.iter().min_by_key(|c| c.current_health)
    }
}
