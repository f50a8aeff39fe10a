//! Utility scoring for candidate actions.
//!
//! Every candidate carries a [`Score`] built from four components:
//!
//! - **is_possible**: can the step be taken within the budget at all?
//! - **situation**: how favorable the board makes it (0-100)
//! - **personality**: how much this tier's [`Temperament`] likes it (0-100)
//! - **modifier**: contextual adjustment (0-200, typically 100)
//!
//! ```text
//! final_score = is_possible × situation × personality × modifier / 10000
//! ```

use arena_core::combat::{spell_profile, tool_profile, ItemEffectProfile};
use arena_core::{
    AttackAction, CombatAction, Creature, CreatureRef, DefendAction, DeployAction, Difficulty,
    PlannedAction, UseSpellAction, UseToolAction,
};

use super::context::AiContext;

/// Candidates scoring below this are never chosen.
pub const MIN_VALUE: u32 = 15;

/// Generic scoring result shared by every candidate kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub is_possible: bool,
    /// Board favorability (0-100).
    pub situation: u32,
    /// Tier preference (0-100).
    pub personality: u32,
    /// Contextual adjustment (0-200, typically 100).
    pub modifier: u32,
}

impl Score {
    pub const fn new(is_possible: bool, situation: u32, personality: u32, modifier: u32) -> Self {
        Self {
            is_possible,
            situation,
            personality,
            modifier,
        }
    }

    pub const fn impossible() -> Self {
        Self::new(false, 0, 0, 0)
    }

    pub const fn value(&self) -> u32 {
        if !self.is_possible {
            return 0;
        }
        (self.situation * self.personality * self.modifier) / 10000
    }
}

/// How strongly a tier leans toward each kind of play (0-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Temperament {
    pub offense: u32,
    pub support: u32,
    pub caution: u32,
    pub build: u32,
}

impl Temperament {
    pub const fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self::new(70, 50, 40, 90),
            Difficulty::Medium => Self::new(85, 70, 60, 95),
            Difficulty::Hard => Self::new(95, 85, 75, 100),
            Difficulty::Expert => Self::new(100, 95, 90, 100),
        }
    }

    const fn new(offense: u32, support: u32, caution: u32, build: u32) -> Self {
        Self {
            offense,
            support,
            caution,
            build,
        }
    }
}

/// A priced step and its utility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub step: PlannedAction,
    pub score: Score,
}

/// Scores every legal step the context's side can afford within `budget`.
///
/// Candidates only reference creatures and items present in the snapshot.
pub fn candidates(ctx: &AiContext<'_>, budget: u32) -> Vec<Candidate> {
    let temperament = Temperament::for_difficulty(ctx.state.difficulty);
    let mut out = Vec::new();

    deploys(ctx, temperament, &mut out);
    attacks(ctx, temperament, &mut out);
    spells(ctx, temperament, &mut out);
    tools(ctx, temperament, &mut out);
    defends(ctx, temperament, &mut out);

    out.retain(|c| c.score.is_possible && c.step.cost <= budget);
    out
}

/// Highest-valued candidate above [`MIN_VALUE`]; ties keep the earliest.
pub fn best(candidates: &[Candidate]) -> Option<&Candidate> {
    let mut best: Option<&Candidate> = None;
    for candidate in candidates {
        let value = candidate.score.value();
        if value < MIN_VALUE {
            continue;
        }
        if best.is_none_or(|b| value > b.score.value()) {
            best = Some(candidate);
        }
    }
    best
}

fn push(ctx: &AiContext<'_>, out: &mut Vec<Candidate>, action: impl Into<CombatAction>, score: Score) {
    out.push(Candidate {
        step: PlannedAction::priced(action, ctx.state),
        score,
    });
}

fn wounded_pct(creature: &Creature) -> u32 {
    (100 - creature.health_ratio_pct()).clamp(0, 100) as u32
}

/// Share of `health` a hit of `damage` removes, scaled onto `span`.
fn damage_share(damage: u32, health: i32, span: u32) -> u32 {
    let health = health.max(1) as u32;
    (damage.saturating_mul(span) / health).min(span)
}

fn deploys(ctx: &AiContext<'_>, temperament: Temperament, out: &mut Vec<Candidate>) {
    if ctx.field_room() == 0 {
        return;
    }
    let empty_field = ctx.own().field.is_empty();
    for creature in &ctx.own().hand {
        let power = creature.stats.physical_attack.max(creature.stats.magical_attack).max(0) as u32;
        let situation = if empty_field { 100 } else { 50 + power.min(40) };
        push(
            ctx,
            out,
            DeployAction::new(ctx.side, creature.id),
            Score::new(true, situation, temperament.build, 100),
        );
    }
}

fn attacks(ctx: &AiContext<'_>, temperament: Temperament, out: &mut Vec<Candidate>) {
    for attacker in &ctx.own().field {
        for target in &ctx.enemy().field {
            let damage = ctx.estimate_damage(ctx.side, attacker, target);
            let lethal = damage as i32 >= target.current_health;
            let score = if lethal {
                Score::new(true, 100, temperament.offense, 120)
            } else {
                let situation = 30 + damage_share(damage, target.current_health, 60);
                Score::new(damage > 0, situation, temperament.offense, 100)
            };
            push(ctx, out, AttackAction::new(ctx.side, attacker.id, target.id), score);
        }
    }
}

fn restores(profile: &ItemEffectProfile) -> bool {
    profile.target_heal > 0
        || profile.timed.as_ref().is_some_and(|e| e.health_effect > 0)
        || profile.target_stats.values().any(|v| *v > 0)
}

fn harms(profile: &ItemEffectProfile) -> bool {
    profile.damage > 0 || profile.timed.as_ref().is_some_and(|e| e.health_effect < 0)
}

fn tools(ctx: &AiContext<'_>, temperament: Temperament, out: &mut Vec<Candidate>) {
    let Some(target) = ctx.most_wounded_ally() else {
        return;
    };
    for tool in &ctx.own().tools {
        let situation = match tool_profile(tool, ctx.item_power(tool.rarity)) {
            Ok(profile) if profile.energy_gain > 0 => 40,
            Ok(profile) if restores(&profile) => 30 + wounded_pct(target).min(60),
            Ok(_) => 30,
            Err(_) => 20,
        };
        push(
            ctx,
            out,
            UseToolAction::new(ctx.side, tool.id, target.id),
            Score::new(true, situation, temperament.support, 100),
        );
    }
}

fn spells(ctx: &AiContext<'_>, temperament: Temperament, out: &mut Vec<Candidate>) {
    let Some(caster) = ctx.best_caster() else {
        return;
    };
    let enemy = ctx.side.opposite();
    for spell in &ctx.own().spells {
        let power = ctx.item_power(spell.rarity);
        let (target, score) = match spell_profile(spell, caster, power) {
            Ok(profile) if harms(&profile) => {
                let Some(foe) = ctx.weakest_enemy() else {
                    continue;
                };
                let score = if profile.damage as i32 >= foe.current_health {
                    Score::new(true, 100, temperament.offense, 120)
                } else {
                    let situation = 40 + damage_share(profile.damage, foe.current_health, 50);
                    Score::new(true, situation, temperament.offense, 100)
                };
                (CreatureRef::new(enemy, foe.id), score)
            }
            Ok(profile) => {
                let Some(ally) = ctx.most_wounded_ally() else {
                    continue;
                };
                let situation = if restores(&profile) {
                    30 + wounded_pct(ally).min(60)
                } else {
                    30
                };
                (
                    CreatureRef::new(ctx.side, ally.id),
                    Score::new(true, situation, temperament.support, 100),
                )
            }
            Err(_) => {
                let target = ctx
                    .weakest_enemy()
                    .map_or(CreatureRef::new(ctx.side, caster.id), |foe| {
                        CreatureRef::new(enemy, foe.id)
                    });
                (target, Score::new(true, 25, temperament.offense, 100))
            }
        };
        push(
            ctx,
            out,
            UseSpellAction::new(ctx.side, spell.id, caster.id, target),
            score,
        );
    }
}

fn defends(ctx: &AiContext<'_>, temperament: Temperament, out: &mut Vec<Candidate>) {
    for creature in &ctx.own().field {
        if creature.is_defending {
            continue;
        }
        let threatened = ctx.threat_to(creature) as i32 >= creature.current_health;
        push(
            ctx,
            out,
            DefendAction::new(ctx.side, creature.id),
            Score::new(threatened, 70, temperament.caution, 100),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ai::testing::{battle_state, creature};
    use arena_core::{BattleConfig, Side};

    #[test]
    fn score_value_combines_components() {
        assert_eq!(Score::new(true, 100, 80, 120).value(), 96);
        assert_eq!(Score::new(false, 100, 100, 100).value(), 0);
        assert_eq!(Score::impossible().value(), 0);
    }

    #[test]
    fn nothing_affordable_with_zero_budget() {
        let state = battle_state(Difficulty::Medium);
        let ctx = AiContext::new(Side::Opponent, &state);
        let cands = candidates(&ctx, 0);
        assert!(cands.iter().all(|c| c.step.cost == 0));
    }

    #[test]
    fn lethal_attack_outranks_deploy() {
        let mut state = battle_state(Difficulty::Medium);
        state.side_mut(Side::Human).field[0].current_health = 1;
        let ctx = AiContext::new(Side::Opponent, &state);

        let cands = candidates(&ctx, state.side(Side::Opponent).energy);
        let pick = best(&cands).expect("a candidate");
        assert!(matches!(pick.step.action, CombatAction::Attack(_)));
    }

    #[test]
    fn candidates_only_reference_present_creatures() {
        let state = battle_state(Difficulty::Expert);
        let ctx = AiContext::new(Side::Opponent, &state);
        let own = state.side(Side::Opponent);
        let foe = state.side(Side::Human);

        for candidate in candidates(&ctx, BattleConfig::MAX_ENERGY) {
            match &candidate.step.action {
                CombatAction::Deploy(a) => assert!(own.hand_creature(a.creature).is_some()),
                CombatAction::Attack(a) => {
                    assert!(own.field_creature(a.attacker).is_some());
                    assert!(foe.field_creature(a.target).is_some());
                }
                CombatAction::UseTool(a) => assert!(own.tool(a.tool).is_some()),
                CombatAction::UseSpell(a) => assert!(own.spell(a.spell).is_some()),
                CombatAction::Defend(a) => assert!(own.field_creature(a.creature).is_some()),
            }
        }
    }

    #[test]
    fn defends_only_when_outmatched() {
        let mut state = battle_state(Difficulty::Hard);
        let ctx = AiContext::new(Side::Opponent, &state);
        assert!(
            candidates(&ctx, 25)
                .iter()
                .all(|c| !matches!(c.step.action, CombatAction::Defend(_)))
        );

        state.side_mut(Side::Opponent).field[0].current_health = 1;
        state.side_mut(Side::Human).field.push(creature(90, 0, 12));
        let ctx = AiContext::new(Side::Opponent, &state);
        assert!(
            candidates(&ctx, 25)
                .iter()
                .any(|c| matches!(c.step.action, CombatAction::Defend(_)))
        );
    }
}
