//! Seeded opponent roster and inventory generation.
//!
//! Everything here draws from a caller-supplied RNG, so the same seed and
//! human roster always produce the same opponent.

use arena_core::{
    BaseStats, Creature, CreatureId, Difficulty, DifficultyProfile, EffectFamily, Item, ItemId,
    ItemType, Loadout, Rarity,
};
use rand::Rng;

use crate::stats::derive_stats;

/// Opponent creature ids start here unless the human roster already uses it.
pub const OPPONENT_ID_BASE: u32 = 1000;
/// Opponent item ids start here.
pub const OPPONENT_ITEM_ID_BASE: u32 = 1000;

pub const SPECIES_POOL: [&str; 8] = [
    "Emberling",
    "Tidepup",
    "Thornback",
    "Voltkit",
    "Gloomwing",
    "Pebblejaw",
    "Frostfang",
    "Mossmaw",
];

const ITEM_TYPES: [ItemType; 5] = [
    ItemType::Energy,
    ItemType::Strength,
    ItemType::Magic,
    ItemType::Stamina,
    ItemType::Speed,
];

const FAMILIES: [EffectFamily; 5] = [
    EffectFamily::Surge,
    EffectFamily::Shield,
    EffectFamily::Echo,
    EffectFamily::Drain,
    EffectFamily::Charge,
];

/// How a tier shapes generated opponents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct TierShape {
    /// Attribute scaling relative to the human roster average, in percent.
    stat_pct: u32,
    min_form: u32,
    max_form: u32,
    tools: usize,
    spells: usize,
    /// Cumulative rarity thresholds out of 100 for rare, epic and legendary.
    rarity_rolls: [u32; 3],
}

impl TierShape {
    const fn of(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                stat_pct: 80,
                min_form: 0,
                max_form: 0,
                tools: 1,
                spells: 0,
                rarity_rolls: [90, 100, 100],
            },
            Difficulty::Medium => Self {
                stat_pct: 100,
                min_form: 0,
                max_form: 1,
                tools: 2,
                spells: 1,
                rarity_rolls: [70, 95, 100],
            },
            Difficulty::Hard => Self {
                stat_pct: 115,
                min_form: 1,
                max_form: 2,
                tools: 2,
                spells: 2,
                rarity_rolls: [50, 85, 97],
            },
            Difficulty::Expert => Self {
                stat_pct: 130,
                min_form: 2,
                max_form: 3,
                tools: 3,
                spells: 3,
                rarity_rolls: [30, 70, 90],
            },
        }
    }

    fn roll_rarity<R: Rng + ?Sized>(&self, rng: &mut R) -> Rarity {
        let roll = rng.gen_range(0..100);
        let [rare, epic, legendary] = self.rarity_rolls;
        if roll < rare {
            Rarity::Common
        } else if roll < epic {
            Rarity::Rare
        } else if roll < legendary {
            Rarity::Epic
        } else {
            Rarity::Legendary
        }
    }
}

/// Attribute-wise average of a roster, or a flat 3 across the board.
fn reference_stats(roster: &[Creature]) -> BaseStats {
    if roster.is_empty() {
        return BaseStats::new(3, 3, 3, 3, 3);
    }
    let n = roster.len() as u32;
    let sum = roster.iter().fold(BaseStats::default(), |acc, c| {
        BaseStats::new(
            acc.strength + c.base.strength,
            acc.magic + c.base.magic,
            acc.stamina + c.base.stamina,
            acc.speed + c.base.speed,
            acc.energy + c.base.energy,
        )
    });
    BaseStats::new(
        sum.strength / n,
        sum.magic / n,
        sum.stamina / n,
        sum.speed / n,
        sum.energy / n,
    )
}

fn jitter<R: Rng + ?Sized>(rng: &mut R, value: u32, pct: u32) -> u32 {
    let scaled = (value * pct / 100) as i32;
    (scaled + rng.gen_range(-1..=1)).max(1) as u32
}

/// Generates `size` opponent creatures scaled against the human roster.
///
/// Attributes track the human average scaled by tier with a ±1 jitter;
/// form levels rise with the tier. Ids never collide with human ids.
pub fn generate_opponent_roster<R: Rng + ?Sized>(
    difficulty: Difficulty,
    size: usize,
    human_roster: &[Creature],
    rng: &mut R,
) -> Vec<Creature> {
    let shape = TierShape::of(difficulty);
    let reference = reference_stats(human_roster);
    let first_id = human_roster
        .iter()
        .map(|c| c.id.0 + 1)
        .max()
        .map_or(OPPONENT_ID_BASE, |next| next.max(OPPONENT_ID_BASE));

    (0..size as u32)
        .map(|offset| {
            let species = SPECIES_POOL[rng.gen_range(0..SPECIES_POOL.len())];
            let form_level = rng.gen_range(shape.min_form..=shape.max_form);
            let base = BaseStats::new(
                jitter(rng, reference.strength, shape.stat_pct),
                jitter(rng, reference.magic, shape.stat_pct),
                jitter(rng, reference.stamina, shape.stat_pct),
                jitter(rng, reference.speed, shape.stat_pct),
                jitter(rng, reference.energy, shape.stat_pct),
            );
            Creature::new(
                CreatureId(first_id + offset),
                species,
                form_level,
                base,
                derive_stats(base, form_level),
            )
        })
        .collect()
}

/// Tools and spells handed to the opponent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GeneratedItems {
    pub tools: Vec<Item>,
    pub spells: Vec<Item>,
}

impl GeneratedItems {
    pub fn len(&self) -> usize {
        self.tools.len() + self.spells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn tool_name(item_type: ItemType, family: EffectFamily) -> String {
    let noun = match item_type {
        ItemType::Energy => "Battery",
        ItemType::Strength => "Gauntlet",
        ItemType::Magic => "Crystal",
        ItemType::Stamina => "Tonic",
        ItemType::Speed => "Boots",
    };
    format!("{} {noun}", family_adjective(family))
}

fn spell_name(item_type: ItemType, family: EffectFamily) -> String {
    let noun = match item_type {
        ItemType::Energy => "Spark",
        ItemType::Strength => "Smite",
        ItemType::Magic => "Bolt",
        ItemType::Stamina => "Mend",
        ItemType::Speed => "Gust",
    };
    format!("{} {noun}", family_adjective(family))
}

fn family_adjective(family: EffectFamily) -> &'static str {
    match family {
        EffectFamily::Surge => "Surging",
        EffectFamily::Shield => "Warding",
        EffectFamily::Echo => "Echoing",
        EffectFamily::Drain => "Leeching",
        EffectFamily::Charge => "Charged",
    }
}

/// Generates the opponent's tools and spells; harder tiers carry more and
/// rarer items.
pub fn generate_opponent_items<R: Rng + ?Sized>(
    difficulty: Difficulty,
    rng: &mut R,
) -> GeneratedItems {
    let shape = TierShape::of(difficulty);
    let mut next_id = OPPONENT_ITEM_ID_BASE;
    let mut roll = |rng: &mut R| {
        let item_type = ITEM_TYPES[rng.gen_range(0..ITEM_TYPES.len())];
        let family = FAMILIES[rng.gen_range(0..FAMILIES.len())];
        let rarity = shape.roll_rarity(rng);
        let id = ItemId(next_id);
        next_id += 1;
        (id, item_type, family, rarity)
    };

    let tools = (0..shape.tools)
        .map(|_| {
            let (id, item_type, family, rarity) = roll(rng);
            Item::tool(id, tool_name(item_type, family), item_type, family, rarity)
        })
        .collect();
    let spells = (0..shape.spells)
        .map(|_| {
            let (id, item_type, family, rarity) = roll(rng);
            Item::spell(id, spell_name(item_type, family), item_type, family, rarity)
        })
        .collect();

    GeneratedItems { tools, spells }
}

/// Builds the full opponent loadout for a tier: `profile.deck_size`
/// creatures plus generated items.
pub fn opponent_loadout<R: Rng + ?Sized>(
    difficulty: Difficulty,
    profile: &DifficultyProfile,
    human_roster: &[Creature],
    rng: &mut R,
) -> Loadout {
    let roster = generate_opponent_roster(difficulty, profile.deck_size, human_roster, rng);
    let items = generate_opponent_items(difficulty, rng);
    Loadout::new(roster).with_items(items.tools, items.spells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::DifficultyTable;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn human_roster() -> Vec<Creature> {
        [(1, 6, 2), (2, 2, 6), (3, 4, 4)]
            .into_iter()
            .map(|(id, strength, magic)| {
                let base = BaseStats::new(strength, magic, 4, 4, 3);
                Creature::new(CreatureId(id), "Ally", 0, base, derive_stats(base, 0))
            })
            .collect()
    }

    #[test]
    fn same_seed_same_roster() {
        let human = human_roster();
        let a = generate_opponent_roster(
            Difficulty::Hard,
            6,
            &human,
            &mut SmallRng::seed_from_u64(7),
        );
        let b = generate_opponent_roster(
            Difficulty::Hard,
            6,
            &human,
            &mut SmallRng::seed_from_u64(7),
        );
        assert_eq!(a, b);
        assert_eq!(a.len(), 6);
    }

    #[test]
    fn roster_ids_are_unique_and_clear_of_human_ids() {
        let mut human = human_roster();
        human[0].id = CreatureId(1500);
        let roster = generate_opponent_roster(
            Difficulty::Medium,
            5,
            &human,
            &mut SmallRng::seed_from_u64(1),
        );
        assert_eq!(roster[0].id, CreatureId(1501));
        assert!(roster.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn tiers_bound_form_levels() {
        let human = human_roster();
        let mut rng = SmallRng::seed_from_u64(3);
        let easy = generate_opponent_roster(Difficulty::Easy, 8, &human, &mut rng);
        let expert = generate_opponent_roster(Difficulty::Expert, 8, &human, &mut rng);

        assert!(easy.iter().all(|c| c.form_level == 0));
        assert!(expert.iter().all(|c| (2..=3).contains(&c.form_level)));
        assert!(expert.iter().all(|c| c.stats.energy_cost == 5 + c.form_level));
    }

    #[test]
    fn item_counts_scale_with_tier() {
        let mut rng = SmallRng::seed_from_u64(11);
        let easy = generate_opponent_items(Difficulty::Easy, &mut rng);
        let expert = generate_opponent_items(Difficulty::Expert, &mut rng);

        assert_eq!((easy.tools.len(), easy.spells.len()), (1, 0));
        assert_eq!((expert.tools.len(), expert.spells.len()), (3, 3));
        assert!(expert.tools.iter().chain(&expert.spells).all(|item| {
            item.item_type.is_some() && item.family.is_some()
        }));
    }

    #[test]
    fn loadout_uses_tier_deck_size() {
        let table = DifficultyTable::standard();
        let profile = table.profile(Difficulty::Expert);
        let loadout = opponent_loadout(
            Difficulty::Expert,
            &profile,
            &human_roster(),
            &mut SmallRng::seed_from_u64(5),
        );
        assert_eq!(loadout.roster.len(), profile.deck_size);
        assert_eq!(loadout.tools.len() + loadout.spells.len(), 6);
    }
}
