use crate::PokemonType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which stat pair a damaging move reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveCategory {
    Physical,
    Special,
}

impl fmt::Display for MoveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveCategory::Physical => write!(f, "Physical"),
            MoveCategory::Special => write!(f, "Special"),
        }
    }
}

/// The five battle-modifiable stats. HP lives beside them in the ledger but
/// is never a stat-change target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatType {
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

impl StatType {
    pub const ALL: [StatType; 5] = [
        StatType::Attack,
        StatType::Defense,
        StatType::SpecialAttack,
        StatType::SpecialDefense,
        StatType::Speed,
    ];
}

impl fmt::Display for StatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatType::Attack => write!(f, "Attack"),
            StatType::Defense => write!(f, "Defense"),
            StatType::SpecialAttack => write!(f, "Special Attack"),
            StatType::SpecialDefense => write!(f, "Special Defense"),
            StatType::Speed => write!(f, "Speed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    User,
    Target,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::User => write!(f, "User"),
            Target::Target => write!(f, "Target"),
        }
    }
}

/// Secondary behaviour attached to a move. A move lists any number of these
/// and they are applied in order after the damage roll.
///
/// Chance parameters are percentages compared against a 1..=100 roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveEffect {
    // Status infliction
    Paralyze(u8),
    Burn(u8),
    Freeze(u8),
    Poison(u8),
    Sleep(u8),
    Confuse(u8),
    Seed(u8),
    Flinch(u8),

    // Stat ledger (target, stat, delta, chance)
    StatChange(Target, StatType, i16, u8),

    // Hit count
    MultiHit,
    DoubleHit,

    // HP transfer
    Recoil(u8), // divisor of damage dealt
    Drain(u8),  // divisor of damage dealt
    Heal(u8),   // percent of max HP
    Rest(u8),   // sleep turns
    Substitute,

    // Fixed damage
    LevelDamage,
    Psywave,
    SuperFang,
    OneHitKo,

    // Copy / redirect
    MirrorMove,
    Metronome,
    Mimic,
    Transform,

    // Field and self
    Haze,
    Explode,
    Splash,

    // Flags read by the damage calculator and turn order
    HighCritical,
    FocusEnergy,
    Screen(MoveCategory),
    Priority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveData {
    pub id: u16,
    pub name: String,
    pub move_type: PokemonType,
    pub category: MoveCategory,
    pub power: u16, // 0 for pure status moves
    pub accuracy: u8,
    #[serde(default)]
    pub pp: u8,
    pub max_pp: u8,
    #[serde(default)]
    pub effects: Vec<MoveEffect>,
}

impl MoveData {
    pub fn has_effect(&self, predicate: impl Fn(&MoveEffect) -> bool) -> bool {
        self.effects.iter().any(predicate)
    }

    pub fn is_priority(&self) -> bool {
        self.has_effect(|e| matches!(e, MoveEffect::Priority))
    }

    pub fn is_high_critical(&self) -> bool {
        self.has_effect(|e| matches!(e, MoveEffect::HighCritical))
    }

    pub fn is_explosive(&self) -> bool {
        self.has_effect(|e| matches!(e, MoveEffect::Explode))
    }

    pub fn grants_focus(&self) -> bool {
        self.has_effect(|e| matches!(e, MoveEffect::FocusEnergy))
    }

    pub fn is_mirror_move(&self) -> bool {
        self.has_effect(|e| matches!(e, MoveEffect::MirrorMove))
    }

    /// The damage category this move screens against, if it is a screen.
    pub fn screen_category(&self) -> Option<MoveCategory> {
        self.effects.iter().find_map(|e| match e {
            MoveEffect::Screen(category) => Some(*category),
            _ => None,
        })
    }
}

impl fmt::Display for MoveData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) | Power: {}, Accuracy: {}, PP: {}/{}",
            self.name, self.move_type, self.power, self.accuracy, self.pp, self.max_pp
        )
    }
}
