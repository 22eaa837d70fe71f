use crate::errors::{ActionError, CreatureError};
use schema::{BaseStats, Effectiveness, MoveData, PokemonType};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAX_MOVES: usize = 4;
pub const MAX_LEVEL: u8 = 100;

/// A roster entry as handed to the engine by whatever loads species data.
///
/// Identity never changes during a battle except through Transform, which
/// works on the battle's own copy (see `Combatant`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    pub name: String,
    pub pokedex_number: u16,
    pub pokemon_type: PokemonType,
    pub level: u8,
    pub base_stats: BaseStats,
    pub moves: Vec<MoveData>,
}

impl Creature {
    /// Levels outside 1..=100 fall back to 1.
    pub fn new(
        name: impl Into<String>,
        pokedex_number: u16,
        pokemon_type: PokemonType,
        level: u8,
        base_stats: BaseStats,
    ) -> Self {
        let level = if (1..=MAX_LEVEL).contains(&level) { level } else { 1 };
        Self {
            name: name.into(),
            pokedex_number,
            pokemon_type,
            level,
            base_stats,
            moves: Vec::new(),
        }
    }

    /// Builder-style variant of `add_move` for a whole move set.
    pub fn with_moves(mut self, moves: Vec<MoveData>) -> Result<Self, CreatureError> {
        for move_data in moves {
            self.add_move(move_data)?;
        }
        Ok(self)
    }

    pub fn add_move(&mut self, move_data: MoveData) -> Result<(), CreatureError> {
        if self.moves.len() >= MAX_MOVES {
            return Err(CreatureError::MoveSetFull {
                name: self.name.clone(),
                max: MAX_MOVES,
            });
        }
        self.moves.push(move_data);
        Ok(())
    }

    pub fn move_names(&self) -> Vec<&str> {
        self.moves.iter().map(|m| m.name.as_str()).collect()
    }

    /// Spend one PP. The engine never calls this; it is for whoever picks
    /// actions, once a choice is final.
    pub fn use_pp(&mut self, move_index: usize) -> Result<u8, ActionError> {
        let move_data = self
            .moves
            .get_mut(move_index)
            .ok_or(ActionError::InvalidMoveIndex(move_index))?;
        if move_data.pp == 0 {
            return Err(ActionError::NoPpRemaining(move_data.name.clone()));
        }
        move_data.pp -= 1;
        Ok(move_data.pp)
    }

    /// How an incoming attack of `move_type` lands on this creature.
    pub fn receive_attack(&self, move_type: PokemonType) -> Effectiveness {
        PokemonType::effectiveness(move_type, self.pokemon_type)
    }

    /// Raise the level by one and grow every base stat. Returns false at the cap.
    pub fn level_up(&mut self) -> bool {
        if self.level >= MAX_LEVEL {
            log::info!("{} is already max level", self.name);
            return false;
        }

        self.level += 1;
        let grow = |stat: u16, factor: f64| (f64::from(stat) * factor).round() as u16;
        let stats = &mut self.base_stats;
        stats.hp = grow(stats.hp, 1.020);
        stats.attack = grow(stats.attack, 1.017);
        stats.defense = grow(stats.defense, 1.016);
        stats.sp_attack = grow(stats.sp_attack, 1.017);
        stats.sp_defense = grow(stats.sp_defense, 1.016);
        stats.speed = grow(stats.speed, 1.015);

        log::info!("{} leveled up to level {}", self.name, self.level);
        true
    }
}

impl fmt::Display for Creature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (#{}) Type: {}, Level: {}",
            self.name, self.pokedex_number, self.pokemon_type, self.level
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_data::get_move_data;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn bulbasaur(level: u8) -> Creature {
        Creature::new(
            "Bulbasaur",
            1,
            PokemonType::Grass,
            level,
            BaseStats::new(45, 49, 49, 65, 65, 45),
        )
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(50, 50)]
    #[case(100, 100)]
    #[case(101, 1)]
    fn test_level_is_clamped(#[case] requested: u8, #[case] expected: u8) {
        assert_eq!(bulbasaur(requested).level, expected);
    }

    #[test]
    fn test_fifth_move_is_rejected() {
        let tackle = get_move_data("Tackle").unwrap();
        let mut creature = bulbasaur(5)
            .with_moves(vec![tackle.clone(), tackle.clone(), tackle.clone(), tackle.clone()])
            .unwrap();

        let result = creature.add_move(tackle);

        assert_eq!(
            result,
            Err(CreatureError::MoveSetFull {
                name: "Bulbasaur".to_string(),
                max: MAX_MOVES
            })
        );
        assert_eq!(creature.moves.len(), MAX_MOVES);
    }

    #[test]
    fn test_use_pp_counts_down_and_stops() {
        let mut move_data = get_move_data("Explosion").unwrap();
        move_data.pp = 1;
        let mut creature = bulbasaur(5).with_moves(vec![move_data]).unwrap();

        assert_eq!(creature.use_pp(0), Ok(0));
        assert_eq!(
            creature.use_pp(0),
            Err(ActionError::NoPpRemaining("Explosion".to_string()))
        );
        assert_eq!(creature.use_pp(3), Err(ActionError::InvalidMoveIndex(3)));
    }

    #[test]
    fn test_receive_attack() {
        let creature = bulbasaur(5);
        assert_eq!(creature.receive_attack(PokemonType::Fire), Effectiveness::Weak);
        assert_eq!(creature.receive_attack(PokemonType::Water), Effectiveness::Resisted);
        assert_eq!(creature.receive_attack(PokemonType::Normal), Effectiveness::Neutral);
    }

    #[test]
    fn test_level_up_grows_stats() {
        let mut creature = bulbasaur(5);
        assert!(creature.level_up());
        assert_eq!(creature.level, 6);
        // 45 * 1.020 = 45.9, 49 * 1.017 = 49.833, 45 * 1.015 = 45.675
        assert_eq!(creature.base_stats.hp, 46);
        assert_eq!(creature.base_stats.attack, 50);
        assert_eq!(creature.base_stats.speed, 46);
    }

    #[test]
    fn test_level_up_stops_at_cap() {
        let mut creature = bulbasaur(100);
        assert!(!creature.level_up());
        assert_eq!(creature.base_stats.hp, 45);
    }
}
