/// Battle rule constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleConfig {
    /// Number of creatures the human side draws into its opening hand.
    pub opening_hand_size: usize,
}

impl BattleConfig {
    // ===== energy economy =====
    pub const ATTACK_COST: u32 = 2;
    pub const DEFEND_COST: u32 = 1;
    pub const SPELL_COST: u32 = 4;
    pub const TOOL_COST: u32 = 0;
    /// Deploy cost is `DEPLOY_BASE_COST + form_level`.
    pub const DEPLOY_BASE_COST: u32 = 5;
    pub const BASE_REGEN: u32 = 3;
    pub const MAX_ENERGY: u32 = 25;
    pub const STARTING_ENERGY: u32 = 10;
    /// Decay only applies above this balance.
    pub const DECAY_THRESHOLD: u32 = 10;
    /// Decay removes `energy / DECAY_DIVISOR` (10%, floored).
    pub const DECAY_DIVISOR: u32 = 10;
    /// Momentum and field energy are converted at one bonus point per ten.
    pub const BONUS_DIVISOR: u32 = 10;

    // ===== combo =====
    pub const COMBO_THRESHOLD: u32 = 3;
    pub const COMBO_ATTACK_BONUS: i32 = 2;
    /// Attack damage grows by this many percent per consecutive action.
    pub const COMBO_STEP_PCT: u32 = 5;

    // ===== capacities (compile-time bounds) =====
    pub const HUMAN_FIELD_CAPACITY: usize = 3;
    pub const MAX_FIELD_SLOTS: usize = 6;
    pub const HUMAN_HAND_CAP: usize = 5;
    pub const MAX_ACTIVE_EFFECTS: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_OPENING_HAND: usize = 3;

    pub fn new() -> Self {
        Self {
            opening_hand_size: Self::DEFAULT_OPENING_HAND,
        }
    }

    pub fn with_opening_hand_size(opening_hand_size: usize) -> Self {
        Self { opening_hand_size }
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
