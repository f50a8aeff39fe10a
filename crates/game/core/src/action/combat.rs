//! Combat actions issued by either side during its turn.
//!
//! Each action checks phase, turn ownership, participants and energy in
//! `pre_validate`, then charges energy, resolves through [`crate::combat`],
//! removes fallen creatures and advances the acting side's combo counter.

use crate::combat::{
    self, ItemEffectProfile, families_synergize, power_pct, resolve_attack, resolve_defend,
    resolve_spell, resolve_tool,
};
use crate::energy::{self, CostKind, action_cost};
use crate::state::{Creature, CreatureId, CreatureRef, Item, ItemId, MatchState, Phase, Side};

use super::error::ActionError;
use super::transition::ActionTransition;

// ============================================================================
// Shared validation
// ============================================================================

/// Requires battle phase and that `side` holds the turn.
pub(crate) fn ensure_turn(state: &MatchState, side: Side) -> Result<(), ActionError> {
    if state.phase != Phase::Battle {
        return Err(ActionError::NotInBattle { phase: state.phase });
    }
    if state.active_side != side {
        return Err(ActionError::NotActiveSide {
            side,
            active: state.active_side,
        });
    }
    Ok(())
}

fn ensure_energy(state: &MatchState, side: Side, required: u32) -> Result<(), ActionError> {
    let available = state.side(side).energy;
    if required > available {
        return Err(ActionError::InsufficientEnergy {
            side,
            required,
            available,
        });
    }
    Ok(())
}

fn charge(state: &mut MatchState, side: Side, amount: u32) -> Result<(), ActionError> {
    energy::spend(state.side_mut(side), amount).map_err(|e| ActionError::InsufficientEnergy {
        side,
        required: e.required,
        available: e.available,
    })
}

fn fielded(state: &MatchState, creature: CreatureRef) -> Result<&Creature, ActionError> {
    state
        .side(creature.side)
        .field_creature(creature.id)
        .ok_or(ActionError::NotOnField { creature })
}

fn replace_on_field(state: &mut MatchState, side: Side, updated: Creature) {
    if let Some(slot) = state.side_mut(side).field_creature_mut(updated.id) {
        *slot = updated;
    }
}

/// Drops creatures at zero health from both fields, logging each.
pub(crate) fn sweep_fallen(state: &mut MatchState) -> usize {
    let mut count = 0;
    for side in [Side::Human, Side::Opponent] {
        for fallen in state.side_mut(side).remove_fallen() {
            state.push_log(Some(side), format!("{} left the field", fallen.species));
            count += 1;
        }
    }
    count
}

/// Counts the action towards the combo and narrates a running streak.
fn record_success(state: &mut MatchState, side: Side, message: String) {
    let streak = state.bump_combo(side);
    if streak > 1 {
        state.push_log(Some(side), format!("{message} Combo x{streak}!"));
    } else {
        state.push_log(Some(side), message);
    }
}

/// Builds an item profile, substituting the conservative default for
/// malformed data and applying family synergy with the previous item.
fn item_profile(
    state: &mut MatchState,
    side: Side,
    item: &Item,
    build: impl FnOnce(&Item, u32) -> Result<ItemEffectProfile, combat::ItemDataError>,
) -> ItemEffectProfile {
    let power = power_pct(state.difficulty, item.rarity);
    let mut profile = match build(item, power) {
        Ok(profile) => profile,
        Err(error) => {
            state.push_log(
                Some(side),
                format!("Invalid item data ({error}); {} falls back to a default effect", item.name),
            );
            ItemEffectProfile::fallback(item.category)
        }
    };

    if let (Some(previous), Some(current)) = (state.side(side).last_item_family, item.family)
        && families_synergize(previous, current)
    {
        profile = profile.with_synergy();
        state.push_log(Some(side), format!("{previous} and {current} synergize!"));
    }
    state.side_mut(side).last_item_family = item.family;
    profile
}

// ============================================================================
// Deploy
// ============================================================================

/// Moves a creature from hand to field for `5 + form_level` energy.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeployAction {
    pub side: Side,
    pub creature: CreatureId,
    /// Externally supplied cost. Never trusted; logged when inconsistent.
    pub declared_cost: Option<u32>,
}

impl DeployAction {
    pub fn new(side: Side, creature: CreatureId) -> Self {
        Self {
            side,
            creature,
            declared_cost: None,
        }
    }

    pub fn with_declared_cost(mut self, cost: u32) -> Self {
        self.declared_cost = Some(cost);
        self
    }
}

impl ActionTransition for DeployAction {
    type Error = ActionError;
    type Result = u32;

    fn cost(&self, state: &MatchState) -> u32 {
        state
            .side(self.side)
            .hand_creature(self.creature)
            .map_or(0, Creature::deploy_cost)
    }

    fn pre_validate(&self, state: &MatchState) -> Result<(), Self::Error> {
        ensure_turn(state, self.side)?;
        let side = state.side(self.side);

        if side.field_creature(self.creature).is_some() {
            return Err(ActionError::DuplicateDeployment { id: self.creature });
        }
        let creature = side
            .hand_creature(self.creature)
            .ok_or(ActionError::NotInHand {
                side: self.side,
                id: self.creature,
            })?;
        let capacity = state.field_capacity(self.side);
        if side.field.len() >= capacity {
            return Err(ActionError::FieldFull {
                side: self.side,
                capacity,
            });
        }

        let cost = energy::resolve_deploy_cost(creature.form_level, self.declared_cost).cost;
        ensure_energy(state, self.side, cost)
    }

    fn apply(&self, state: &mut MatchState) -> Result<Self::Result, Self::Error> {
        let form_level = state
            .side(self.side)
            .hand_creature(self.creature)
            .map(|c| c.form_level)
            .ok_or(ActionError::NotInHand {
                side: self.side,
                id: self.creature,
            })?;

        let resolved = energy::resolve_deploy_cost(form_level, self.declared_cost);
        if let Some(declared) = resolved.replaced {
            state.push_log(
                Some(self.side),
                format!(
                    "Declared deploy cost {declared} exceeds the maximum; using {}",
                    resolved.cost
                ),
            );
        }

        charge(state, self.side, resolved.cost)?;
        let mut creature = state
            .side_mut(self.side)
            .take_from_hand(self.creature)
            .ok_or(ActionError::NotInHand {
                side: self.side,
                id: self.creature,
            })?;
        creature.stats.energy_cost = resolved.cost;
        let species = creature.species.clone();
        state.side_mut(self.side).field.push(creature);

        let message = format!(
            "{} deployed {} to the battlefield (-{} energy).",
            self.side.label(),
            species,
            resolved.cost
        );
        record_success(state, self.side, message);
        Ok(resolved.cost)
    }

    fn post_validate(&self, state: &MatchState) -> Result<(), Self::Error> {
        let capacity = state.field_capacity(self.side);
        if state.side(self.side).field.len() > capacity {
            return Err(ActionError::FieldFull {
                side: self.side,
                capacity,
            });
        }
        Ok(())
    }
}

// ============================================================================
// Attack
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackOutcome {
    pub damage: u32,
    pub target_defeated: bool,
}

/// A fielded creature attacks a creature on the opposing field.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackAction {
    pub side: Side,
    pub attacker: CreatureId,
    pub target: CreatureId,
}

impl AttackAction {
    pub fn new(side: Side, attacker: CreatureId, target: CreatureId) -> Self {
        Self {
            side,
            attacker,
            target,
        }
    }
}

impl ActionTransition for AttackAction {
    type Error = ActionError;
    type Result = AttackOutcome;

    fn cost(&self, _state: &MatchState) -> u32 {
        action_cost(CostKind::Attack)
    }

    fn pre_validate(&self, state: &MatchState) -> Result<(), Self::Error> {
        ensure_turn(state, self.side)?;
        fielded(state, CreatureRef::new(self.side, self.attacker))?;
        fielded(state, CreatureRef::new(self.side.opposite(), self.target))?;
        ensure_energy(state, self.side, self.cost(state))
    }

    fn apply(&self, state: &mut MatchState) -> Result<Self::Result, Self::Error> {
        let attacker = fielded(state, CreatureRef::new(self.side, self.attacker))?.clone();
        let defender = fielded(state, CreatureRef::new(self.side.opposite(), self.target))?.clone();

        charge(state, self.side, self.cost(state))?;
        let streak = state.side(self.side).consecutive_actions;
        let resolution = resolve_attack(&attacker, &defender, streak);
        let outcome = AttackOutcome {
            damage: resolution.damage,
            target_defeated: !resolution.defender.is_alive(),
        };

        replace_on_field(state, self.side, resolution.attacker);
        replace_on_field(state, self.side.opposite(), resolution.defender);
        record_success(state, self.side, resolution.log);
        sweep_fallen(state);
        Ok(outcome)
    }
}

// ============================================================================
// Tool
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemOutcome {
    /// True when malformed data forced the default effect.
    pub fallback: bool,
    pub energy_gained: u32,
}

/// Uses a tool on a creature of the acting side's field. Tools are free.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UseToolAction {
    pub side: Side,
    pub tool: ItemId,
    pub target: CreatureId,
}

impl UseToolAction {
    pub fn new(side: Side, tool: ItemId, target: CreatureId) -> Self {
        Self { side, tool, target }
    }
}

impl ActionTransition for UseToolAction {
    type Error = ActionError;
    type Result = ItemOutcome;

    fn cost(&self, _state: &MatchState) -> u32 {
        action_cost(CostKind::Tool)
    }

    fn pre_validate(&self, state: &MatchState) -> Result<(), Self::Error> {
        ensure_turn(state, self.side)?;
        if state.side(self.side).tool(self.tool).is_none() {
            return Err(ActionError::ItemNotFound {
                side: self.side,
                item: self.tool,
            });
        }
        fielded(state, CreatureRef::new(self.side, self.target))?;
        ensure_energy(state, self.side, self.cost(state))
    }

    fn apply(&self, state: &mut MatchState) -> Result<Self::Result, Self::Error> {
        let target = fielded(state, CreatureRef::new(self.side, self.target))?.clone();
        let tool = state
            .side_mut(self.side)
            .take_tool(self.tool)
            .ok_or(ActionError::ItemNotFound {
                side: self.side,
                item: self.tool,
            })?;

        charge(state, self.side, self.cost(state))?;
        let profile = item_profile(state, self.side, &tool, combat::tool_profile);
        let resolution = resolve_tool(&target, &tool.name, &profile);
        let energy_gained = energy::grant(state.side_mut(self.side), profile.energy_gain);

        replace_on_field(state, self.side, resolution.target);
        let mut message = format!("{}: {}", self.side.label(), resolution.log);
        if energy_gained > 0 {
            message.push_str(&format!(" (+{energy_gained} energy)"));
        }
        record_success(state, self.side, message);
        sweep_fallen(state);

        Ok(ItemOutcome {
            fallback: profile.fallback,
            energy_gained,
        })
    }
}

// ============================================================================
// Spell
// ============================================================================

/// Casts a spell from a fielded caster at any fielded creature, itself
/// included.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UseSpellAction {
    pub side: Side,
    pub spell: ItemId,
    pub caster: CreatureId,
    pub target: CreatureRef,
}

impl UseSpellAction {
    pub fn new(side: Side, spell: ItemId, caster: CreatureId, target: CreatureRef) -> Self {
        Self {
            side,
            spell,
            caster,
            target,
        }
    }

    fn is_self_cast(&self) -> bool {
        self.target.side == self.side && self.target.id == self.caster
    }
}

impl ActionTransition for UseSpellAction {
    type Error = ActionError;
    type Result = ItemOutcome;

    fn cost(&self, _state: &MatchState) -> u32 {
        action_cost(CostKind::Spell)
    }

    fn pre_validate(&self, state: &MatchState) -> Result<(), Self::Error> {
        ensure_turn(state, self.side)?;
        if state.side(self.side).spell(self.spell).is_none() {
            return Err(ActionError::ItemNotFound {
                side: self.side,
                item: self.spell,
            });
        }
        fielded(state, CreatureRef::new(self.side, self.caster))?;
        fielded(state, self.target)?;
        ensure_energy(state, self.side, self.cost(state))
    }

    fn apply(&self, state: &mut MatchState) -> Result<Self::Result, Self::Error> {
        let caster = fielded(state, CreatureRef::new(self.side, self.caster))?.clone();
        let target = if self.is_self_cast() {
            None
        } else {
            Some(fielded(state, self.target)?.clone())
        };
        let spell = state
            .side_mut(self.side)
            .take_spell(self.spell)
            .ok_or(ActionError::ItemNotFound {
                side: self.side,
                item: self.spell,
            })?;

        charge(state, self.side, self.cost(state))?;
        let profile = item_profile(state, self.side, &spell, |item, power| {
            combat::spell_profile(item, &caster, power)
        });
        let resolution = resolve_spell(&caster, target.as_ref(), &spell.name, &profile);
        let energy_gained = energy::grant(state.side_mut(self.side), profile.energy_gain);

        replace_on_field(state, self.side, resolution.caster);
        if let Some(updated) = resolution.target {
            replace_on_field(state, self.target.side, updated);
        }
        record_success(
            state,
            self.side,
            format!("{}: {}", self.side.label(), resolution.log),
        );
        sweep_fallen(state);

        Ok(ItemOutcome {
            fallback: profile.fallback,
            energy_gained,
        })
    }
}

// ============================================================================
// Defend
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefendAction {
    pub side: Side,
    pub creature: CreatureId,
}

impl DefendAction {
    pub fn new(side: Side, creature: CreatureId) -> Self {
        Self { side, creature }
    }
}

impl ActionTransition for DefendAction {
    type Error = ActionError;
    type Result = ();

    fn cost(&self, _state: &MatchState) -> u32 {
        action_cost(CostKind::Defend)
    }

    fn pre_validate(&self, state: &MatchState) -> Result<(), Self::Error> {
        ensure_turn(state, self.side)?;
        fielded(state, CreatureRef::new(self.side, self.creature))?;
        ensure_energy(state, self.side, self.cost(state))
    }

    fn apply(&self, state: &mut MatchState) -> Result<Self::Result, Self::Error> {
        let creature = fielded(state, CreatureRef::new(self.side, self.creature))?.clone();
        charge(state, self.side, self.cost(state))?;
        let (updated, log) = resolve_defend(&creature);
        replace_on_field(state, self.side, updated);
        record_success(state, self.side, format!("{}: {}", self.side.label(), log));
        Ok(())
    }
}

// ============================================================================
// Combat action union
// ============================================================================

/// Any action a side can take during its turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatAction {
    Deploy(DeployAction),
    Attack(AttackAction),
    UseTool(UseToolAction),
    UseSpell(UseSpellAction),
    Defend(DefendAction),
}

impl CombatAction {
    pub fn side(&self) -> Side {
        match self {
            Self::Deploy(a) => a.side,
            Self::Attack(a) => a.side,
            Self::UseTool(a) => a.side,
            Self::UseSpell(a) => a.side,
            Self::Defend(a) => a.side,
        }
    }

    /// Canonical energy cost against the given state.
    pub fn cost(&self, state: &MatchState) -> u32 {
        match self {
            Self::Deploy(a) => a.cost(state),
            Self::Attack(a) => a.cost(state),
            Self::UseTool(a) => a.cost(state),
            Self::UseSpell(a) => a.cost(state),
            Self::Defend(a) => a.cost(state),
        }
    }

    pub fn as_snake_case(&self) -> &'static str {
        match self {
            Self::Deploy(_) => "deploy",
            Self::Attack(_) => "attack",
            Self::UseTool(_) => "use_tool",
            Self::UseSpell(_) => "use_spell",
            Self::Defend(_) => "defend",
        }
    }
}

impl From<DeployAction> for CombatAction {
    fn from(action: DeployAction) -> Self {
        Self::Deploy(action)
    }
}

impl From<AttackAction> for CombatAction {
    fn from(action: AttackAction) -> Self {
        Self::Attack(action)
    }
}

impl From<UseToolAction> for CombatAction {
    fn from(action: UseToolAction) -> Self {
        Self::UseTool(action)
    }
}

impl From<UseSpellAction> for CombatAction {
    fn from(action: UseSpellAction) -> Self {
        Self::UseSpell(action)
    }
}

impl From<DefendAction> for CombatAction {
    fn from(action: DefendAction) -> Self {
        Self::Defend(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{BaseStats, BattleStats, EffectFamily, ItemType, Rarity};

    fn creature(id: u32, form_level: u32) -> Creature {
        Creature::new(
            CreatureId(id),
            format!("Beast{id}"),
            form_level,
            BaseStats::new(5, 3, 5, 5, 5),
            BattleStats {
                max_health: 40,
                physical_attack: 12,
                magical_attack: 6,
                physical_defense: 4,
                magical_defense: 4,
                initiative: 5,
                energy_cost: 0,
            },
        )
    }

    fn battle() -> MatchState {
        let mut state = MatchState::default();
        state.phase = Phase::Battle;
        state.human.energy = 10;
        state.opponent.energy = 10;
        state.human.hand = vec![creature(1, 0), creature(2, 3)];
        state.opponent.field = vec![creature(100, 0)];
        state
    }

    #[test]
    fn deploy_charges_form_cost() {
        let mut state = battle();
        let action = DeployAction::new(Side::Human, CreatureId(1));
        action.pre_validate(&state).unwrap();
        let cost = action.apply(&mut state).unwrap();
        action.post_validate(&state).unwrap();

        assert_eq!(cost, 5);
        assert_eq!(state.human.energy, 5);
        assert_eq!(state.human.field.len(), 1);
        assert_eq!(state.human.hand.len(), 1);
        assert_eq!(state.human.energy_momentum, 5);
        assert_eq!(state.human.consecutive_actions, 1);
    }

    #[test]
    fn oversized_declared_cost_is_ignored() {
        let mut state = battle();
        let action = DeployAction::new(Side::Human, CreatureId(2)).with_declared_cost(99);
        action.pre_validate(&state).unwrap();
        assert_eq!(action.apply(&mut state).unwrap(), 8);
        assert_eq!(state.human.energy, 2);
        assert!(state.log.iter().any(|l| l.message.contains("exceeds the maximum")));
    }

    #[test]
    fn deploy_rejects_duplicates_and_full_field() {
        let mut state = battle();
        state.human.field = vec![creature(1, 0)];
        let err = DeployAction::new(Side::Human, CreatureId(1))
            .pre_validate(&state)
            .unwrap_err();
        assert_eq!(err, ActionError::DuplicateDeployment { id: CreatureId(1) });

        state.human.field = vec![creature(10, 0), creature(11, 0), creature(12, 0)];
        let err = DeployAction::new(Side::Human, CreatureId(2))
            .pre_validate(&state)
            .unwrap_err();
        assert!(matches!(err, ActionError::FieldFull { capacity: 3, .. }));
    }

    #[test]
    fn opponent_capacity_tracks_current_rules() {
        let mut state = battle();
        state.active_side = Side::Opponent;
        state.opponent.hand = vec![creature(101, 0)];
        state.rules.field_capacity = 1;
        let action = DeployAction::new(Side::Opponent, CreatureId(101));
        assert!(matches!(
            action.pre_validate(&state),
            Err(ActionError::FieldFull { capacity: 1, .. })
        ));

        state.rules.field_capacity = 2;
        action.pre_validate(&state).unwrap();
        action.apply(&mut state).unwrap();
        action.post_validate(&state).unwrap();
        assert_eq!(state.opponent.field.len(), 2);
    }

    #[test]
    fn attack_requires_active_side() {
        let mut state = battle();
        state.opponent.field.push(creature(101, 0));
        let action = AttackAction::new(Side::Opponent, CreatureId(100), CreatureId(1));
        assert!(matches!(
            action.pre_validate(&state),
            Err(ActionError::NotActiveSide { .. })
        ));
    }

    #[test]
    fn attack_removes_defeated_target() {
        let mut state = battle();
        state.human.field = vec![creature(1, 0)];
        state.opponent.field[0].current_health = 3;
        let action = AttackAction::new(Side::Human, CreatureId(1), CreatureId(100));
        action.pre_validate(&state).unwrap();
        let outcome = action.apply(&mut state).unwrap();

        assert!(outcome.target_defeated);
        assert!(state.opponent.field.is_empty());
        assert_eq!(state.human.energy, 8);
    }

    #[test]
    fn malformed_tool_falls_back() {
        let mut state = battle();
        state.human.field = vec![creature(1, 0)];
        let mut tool = Item::tool(ItemId(9), "Mystery", ItemType::Speed, EffectFamily::Echo, Rarity::Common);
        tool.item_type = None;
        state.human.tools.push(tool);

        let action = UseToolAction::new(Side::Human, ItemId(9), CreatureId(1));
        action.pre_validate(&state).unwrap();
        let outcome = action.apply(&mut state).unwrap();

        assert!(outcome.fallback);
        assert!(state.human.tools.is_empty());
        assert!(state.log.iter().any(|l| l.message.contains("Invalid item data")));
    }

    #[test]
    fn spell_can_target_caster() {
        let mut state = battle();
        state.human.field = vec![creature(1, 0)];
        state.human.field[0].current_health = 10;
        state
            .human
            .spells
            .push(Item::spell(ItemId(3), "Renew", ItemType::Stamina, EffectFamily::Shield, Rarity::Common));

        let action = UseSpellAction::new(
            Side::Human,
            ItemId(3),
            CreatureId(1),
            CreatureRef::new(Side::Human, CreatureId(1)),
        );
        action.pre_validate(&state).unwrap();
        action.apply(&mut state).unwrap();

        let caster = &state.human.field[0];
        assert!(caster.current_health > 10);
        assert_eq!(state.human.energy, 6);
    }

    #[test]
    fn consecutive_actions_scale_attacks() {
        let mut state = battle();
        state.human.field = vec![creature(1, 0)];
        state.opponent.field[0].stats.max_health = 500;
        state.opponent.field[0].current_health = 500;

        let attack = AttackAction::new(Side::Human, CreatureId(1), CreatureId(100));
        let first = attack.apply(&mut state).unwrap();
        let second = attack.apply(&mut state).unwrap();
        let third = attack.apply(&mut state).unwrap();
        assert_eq!(first.damage, second.damage);
        assert!(third.damage > second.damage);
        assert_eq!(state.max_combo, 3);
    }
}
