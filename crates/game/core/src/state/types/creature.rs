//! Creature battle instances and their stat blocks.

use crate::config::BattleConfig;

use super::common::CreatureId;
use super::effect::ActiveEffects;

/// Base attributes a creature is minted with.
///
/// Battle stats are derived from these by an external collaborator; the
/// `energy` attribute also feeds the field regeneration bonus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub strength: u32,
    pub magic: u32,
    pub stamina: u32,
    pub speed: u32,
    pub energy: u32,
}

impl BaseStats {
    pub const fn new(strength: u32, magic: u32, stamina: u32, speed: u32, energy: u32) -> Self {
        Self {
            strength,
            magic,
            stamina,
            speed,
            energy,
        }
    }
}

/// Modifiable stats used during combat.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatKind {
    MaxHealth,
    PhysicalAttack,
    MagicalAttack,
    PhysicalDefense,
    MagicalDefense,
    Initiative,
    EnergyCost,
}

/// Derived combat stats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleStats {
    pub max_health: i32,
    pub physical_attack: i32,
    pub magical_attack: i32,
    pub physical_defense: i32,
    pub magical_defense: i32,
    pub initiative: i32,
    pub energy_cost: u32,
}

impl BattleStats {
    pub fn get(&self, stat: StatKind) -> i32 {
        match stat {
            StatKind::MaxHealth => self.max_health,
            StatKind::PhysicalAttack => self.physical_attack,
            StatKind::MagicalAttack => self.magical_attack,
            StatKind::PhysicalDefense => self.physical_defense,
            StatKind::MagicalDefense => self.magical_defense,
            StatKind::Initiative => self.initiative,
            StatKind::EnergyCost => self.energy_cost as i32,
        }
    }

    /// Adds `delta` to a stat. Max health never drops below 1 and energy
    /// cost never below 0; other stats may go negative under debuffs.
    pub fn add(&mut self, stat: StatKind, delta: i32) {
        match stat {
            StatKind::MaxHealth => self.max_health = (self.max_health + delta).max(1),
            StatKind::PhysicalAttack => self.physical_attack += delta,
            StatKind::MagicalAttack => self.magical_attack += delta,
            StatKind::PhysicalDefense => self.physical_defense += delta,
            StatKind::MagicalDefense => self.magical_defense += delta,
            StatKind::Initiative => self.initiative += delta,
            StatKind::EnergyCost => {
                self.energy_cost = (self.energy_cost as i32 + delta).max(0) as u32
            }
        }
    }
}

/// Whether an attack uses the physical or magical channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AttackKind {
    Physical,
    Magical,
}

/// A creature instance owned by exactly one side's deck, hand or field.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Creature {
    pub id: CreatureId,
    pub species: String,
    pub form_level: u32,
    pub base: BaseStats,
    pub stats: BattleStats,
    pub current_health: i32,
    pub active_effects: ActiveEffects,
    pub is_defending: bool,
}

impl Creature {
    /// Builds a battle instance at full health.
    ///
    /// The supplied energy cost is discarded and recomputed from the form level.
    pub fn new(
        id: CreatureId,
        species: impl Into<String>,
        form_level: u32,
        base: BaseStats,
        mut stats: BattleStats,
    ) -> Self {
        stats.energy_cost = Self::deploy_cost_for(form_level);
        stats.max_health = stats.max_health.max(1);
        Self {
            id,
            species: species.into(),
            form_level,
            base,
            stats,
            current_health: stats.max_health,
            active_effects: ActiveEffects::empty(),
            is_defending: false,
        }
    }

    /// `5 + form_level`, capped at the energy maximum so any creature
    /// stays deployable.
    #[inline]
    pub const fn deploy_cost_for(form_level: u32) -> u32 {
        let cost = BattleConfig::DEPLOY_BASE_COST.saturating_add(form_level);
        if cost > BattleConfig::MAX_ENERGY {
            BattleConfig::MAX_ENERGY
        } else {
            cost
        }
    }

    #[inline]
    pub fn deploy_cost(&self) -> u32 {
        Self::deploy_cost_for(self.form_level)
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    /// Returns the channel this creature attacks with and its attack value.
    ///
    /// Physical wins only when strictly higher than magical.
    pub fn attack_profile(&self) -> (AttackKind, i32) {
        if self.stats.physical_attack > self.stats.magical_attack {
            (AttackKind::Physical, self.stats.physical_attack)
        } else {
            (AttackKind::Magical, self.stats.magical_attack)
        }
    }

    pub fn defense_against(&self, kind: AttackKind) -> i32 {
        match kind {
            AttackKind::Physical => self.stats.physical_defense,
            AttackKind::Magical => self.stats.magical_defense,
        }
    }

    /// Applies a signed health change clamped into `[0, max_health]`.
    /// Returns the change actually applied.
    pub fn change_health(&mut self, delta: i32) -> i32 {
        let before = self.current_health;
        self.current_health = (self.current_health + delta).clamp(0, self.stats.max_health);
        self.current_health - before
    }

    /// Adds to a stat, keeping current health within a changed maximum.
    pub fn add_stat(&mut self, stat: StatKind, delta: i32) {
        self.stats.add(stat, delta);
        if stat == StatKind::MaxHealth {
            self.current_health = self.current_health.min(self.stats.max_health);
        }
    }

    pub fn health_ratio_pct(&self) -> i32 {
        if self.stats.max_health <= 0 {
            return 0;
        }
        self.current_health * 100 / self.stats.max_health
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(form_level: u32) -> Creature {
        let stats = BattleStats {
            max_health: 50,
            physical_attack: 12,
            magical_attack: 8,
            physical_defense: 6,
            magical_defense: 4,
            initiative: 10,
            energy_cost: 99,
        };
        Creature::new(CreatureId(1), "Emberling", form_level, BaseStats::default(), stats)
    }

    #[test]
    fn energy_cost_is_recomputed_from_form_level() {
        assert_eq!(sample(0).stats.energy_cost, 5);
        assert_eq!(sample(2).stats.energy_cost, 7);
    }

    #[test]
    fn health_changes_are_clamped() {
        let mut creature = sample(0);
        assert_eq!(creature.change_health(-70), -50);
        assert_eq!(creature.current_health, 0);
        assert!(!creature.is_alive());
        assert_eq!(creature.change_health(80), 50);
        assert_eq!(creature.current_health, 50);
    }

    #[test]
    fn ties_attack_with_magic() {
        let mut creature = sample(0);
        creature.stats.magical_attack = creature.stats.physical_attack;
        assert_eq!(creature.attack_profile().0, AttackKind::Magical);
    }

    #[test]
    fn lowering_max_health_trims_current_health() {
        let mut creature = sample(0);
        creature.add_stat(StatKind::MaxHealth, -20);
        assert_eq!(creature.current_health, 30);
    }
}
