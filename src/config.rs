//! Rule knobs for a battle.
//!
//! Every field has a default matching the classic rules, so an empty RON
//! document `()` is a valid config.

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// What happens when both attackers have exactly the same speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpeedTie {
    /// Side 1 acts first.
    #[default]
    FirstSideFirst,
    /// A 50/50 draw from the turn's RNG.
    CoinFlip,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    pub speed_tie: SpeedTie,
    /// Percent chance a paralyzed creature loses its action.
    pub paralysis_block_chance: u8,
    /// Percent chance a confused creature hits itself.
    pub confusion_self_hit_chance: u8,
    /// Inclusive range sleep duration is drawn from at infliction.
    pub sleep_turns: (u8, u8),
    /// Inclusive range confusion duration is drawn from at infliction.
    pub confusion_turns: (u8, u8),
    /// Burn, poison and seed ticks deal max_hp / this.
    pub status_damage_divisor: u16,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            speed_tie: SpeedTie::FirstSideFirst,
            paralysis_block_chance: 25,
            confusion_self_hit_chance: 50,
            sleep_turns: (1, 3),
            confusion_turns: (2, 5),
            status_damage_divisor: 16,
        }
    }
}

impl BattleConfig {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: BattleConfig =
            ron::from_str(source).map_err(|err| ConfigError::Parse(err.to_string()))?;
        Ok(config.normalized())
    }

    /// Load a config from a RON file on disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|err| ConfigError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        Self::from_ron_str(&content)
    }

    // Swapped ranges and a zero divisor would otherwise panic deep inside a turn.
    fn normalized(mut self) -> Self {
        if self.sleep_turns.0 > self.sleep_turns.1 {
            self.sleep_turns = (self.sleep_turns.1, self.sleep_turns.0);
        }
        if self.confusion_turns.0 > self.confusion_turns.1 {
            self.confusion_turns = (self.confusion_turns.1, self.confusion_turns.0);
        }
        self.status_damage_divisor = self.status_damage_divisor.max(1);
        self
    }
}
