use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum PokemonType {
    Normal,
    Fire,
    Water,
    Grass,
    Electric,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
    Typeless,
}

impl fmt::Display for PokemonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// How an attacking type lands on a defending type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum Effectiveness {
    Immune,
    Resisted,
    Weak,
    Neutral,
}

impl Effectiveness {
    /// Damage multiplier: 0.0, 0.5, 2.0 or 1.0.
    pub fn multiplier(self) -> f64 {
        match self {
            Effectiveness::Immune => 0.0,
            Effectiveness::Resisted => 0.5,
            Effectiveness::Weak => 2.0,
            Effectiveness::Neutral => 1.0,
        }
    }

    /// Player-facing text, or None when a hit is unremarkable.
    pub fn message(self) -> Option<&'static str> {
        match self {
            Effectiveness::Immune => Some("It had no effect!"),
            Effectiveness::Resisted => Some("It's not very effective..."),
            Effectiveness::Weak => Some("It's super effective!"),
            Effectiveness::Neutral => None,
        }
    }
}

impl PokemonType {
    /// Attacking types this type takes double damage from.
    pub fn weaknesses(self) -> &'static [PokemonType] {
        use PokemonType::*;

        match self {
            Normal => &[Fighting],
            Fire => &[Water, Ground, Rock],
            Water => &[Electric, Grass],
            Grass => &[Fire, Ice, Poison, Flying, Bug],
            Electric => &[Ground],
            Ice => &[Fire, Fighting, Rock, Steel],
            Fighting => &[Flying, Psychic, Fairy],
            Poison => &[Ground, Psychic],
            Ground => &[Water, Grass, Ice],
            Flying => &[Electric, Ice, Rock],
            Psychic => &[Bug, Ghost, Dark],
            Bug => &[Fire, Flying, Rock],
            Rock => &[Water, Grass, Fighting, Ground, Steel],
            Ghost => &[Ghost, Dark],
            Dragon => &[Ice, Dragon, Fairy],
            Dark => &[Fighting, Bug, Fairy],
            Steel => &[Fire, Fighting, Ground],
            Fairy => &[Poison, Steel],
            Typeless => &[],
        }
    }

    /// Attacking types this type takes half damage from.
    pub fn resistances(self) -> &'static [PokemonType] {
        use PokemonType::*;

        match self {
            Normal => &[],
            Fire => &[Fire, Grass, Ice, Bug, Steel, Fairy],
            Water => &[Fire, Water, Ice, Steel],
            Grass => &[Water, Grass, Electric, Ground],
            Electric => &[Electric, Flying, Steel],
            Ice => &[Ice],
            Fighting => &[Bug, Rock, Dark],
            Poison => &[Grass, Fighting, Poison, Bug, Fairy],
            Ground => &[Poison, Rock],
            Flying => &[Grass, Fighting, Bug],
            Psychic => &[Fighting, Psychic],
            Bug => &[Grass, Fighting, Ground],
            Rock => &[Normal, Fire, Poison, Flying],
            Ghost => &[Poison, Bug],
            Dragon => &[Fire, Water, Grass, Electric],
            Dark => &[Ghost, Dark],
            Steel => &[
                Normal, Grass, Ice, Flying, Psychic, Bug, Rock, Dragon, Steel, Fairy,
            ],
            Fairy => &[Fighting, Bug, Dark],
            Typeless => &[],
        }
    }

    /// Attacking types that do nothing to this type.
    pub fn immunities(self) -> &'static [PokemonType] {
        use PokemonType::*;

        match self {
            Normal => &[Ghost],
            Ground => &[Electric],
            Flying => &[Ground],
            Ghost => &[Normal, Fighting],
            Dark => &[Psychic],
            Steel => &[Poison],
            Fairy => &[Dragon],
            _ => &[],
        }
    }

    /// Look up the table for an attack of type `attacking` landing on `defending`.
    /// Immunity is checked before resistance, and resistance before weakness.
    pub fn effectiveness(attacking: PokemonType, defending: PokemonType) -> Effectiveness {
        if defending.immunities().contains(&attacking) {
            Effectiveness::Immune
        } else if defending.resistances().contains(&attacking) {
            Effectiveness::Resisted
        } else if defending.weaknesses().contains(&attacking) {
            Effectiveness::Weak
        } else {
            Effectiveness::Neutral
        }
    }

    pub fn is_immune(attacking: PokemonType, defending: PokemonType) -> bool {
        Self::effectiveness(attacking, defending) == Effectiveness::Immune
    }
}
