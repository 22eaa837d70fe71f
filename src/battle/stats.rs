use schema::{BaseStats, StatType};
use serde::{Deserialize, Serialize};

/// Working copy of a creature's HP and five battle stats.
///
/// Stat changes are additive deltas on the value itself; there are no
/// stages. HP stays within `[0, max_hp]` and no stat drops below 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatLedger {
    base: BaseStats,
    hp: u16,
    attack: u16,
    defense: u16,
    sp_attack: u16,
    sp_defense: u16,
    speed: u16,
}

impl StatLedger {
    pub fn new(base: BaseStats) -> Self {
        Self {
            base,
            hp: base.hp,
            attack: base.attack,
            defense: base.defense,
            sp_attack: base.sp_attack,
            sp_defense: base.sp_defense,
            speed: base.speed,
        }
    }

    pub fn hp(&self) -> u16 {
        self.hp
    }

    pub fn max_hp(&self) -> u16 {
        self.base.hp
    }

    pub fn base(&self) -> &BaseStats {
        &self.base
    }

    pub fn is_fainted(&self) -> bool {
        self.hp == 0
    }

    pub fn get(&self, stat: StatType) -> u16 {
        match stat {
            StatType::Attack => self.attack,
            StatType::Defense => self.defense,
            StatType::SpecialAttack => self.sp_attack,
            StatType::SpecialDefense => self.sp_defense,
            StatType::Speed => self.speed,
        }
    }

    fn slot_mut(&mut self, stat: StatType) -> &mut u16 {
        match stat {
            StatType::Attack => &mut self.attack,
            StatType::Defense => &mut self.defense,
            StatType::SpecialAttack => &mut self.sp_attack,
            StatType::SpecialDefense => &mut self.sp_defense,
            StatType::Speed => &mut self.speed,
        }
    }

    /// Apply a signed delta, flooring at 0. Returns the new value.
    pub fn modify(&mut self, stat: StatType, delta: i16) -> u16 {
        let slot = self.slot_mut(stat);
        *slot = slot.saturating_add_signed(delta);
        *slot
    }

    pub fn set_hp(&mut self, hp: u16) {
        self.hp = hp.min(self.base.hp);
    }

    /// Subtract damage. Returns how much HP was actually lost.
    pub fn damage(&mut self, amount: u16) -> u16 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    /// Add HP up to the maximum. Returns how much was actually restored.
    pub fn heal(&mut self, amount: u16) -> u16 {
        let restored = amount.min(self.base.hp - self.hp);
        self.hp += restored;
        restored
    }

    /// Put all five stats back to their base values. HP is untouched.
    pub fn reset(&mut self) {
        let base = self.base;
        self.attack = base.attack;
        self.defense = base.defense;
        self.sp_attack = base.sp_attack;
        self.sp_defense = base.sp_defense;
        self.speed = base.speed;
    }

    /// Adopt another creature's stats (Transform). The current HP and its
    /// maximum stay our own.
    pub fn rebase(&mut self, other: &StatLedger) {
        self.base = BaseStats {
            hp: self.base.hp,
            ..other.base
        };
        self.attack = other.attack;
        self.defense = other.defense;
        self.sp_attack = other.sp_attack;
        self.sp_defense = other.sp_defense;
        self.speed = other.speed;
    }
}
