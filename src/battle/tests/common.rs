// In: src/battle/tests/common.rs

use crate::battle::conditions::StatusCondition;
use crate::battle::state::{Field, TurnRng};
use crate::combatant::Combatant;
use crate::config::BattleConfig;
use crate::creature::Creature;
use crate::errors::BattleResult;
use crate::move_data::get_move_data;
use crate::trainer::Trainer;
use schema::{BaseStats, PokemonType};

/// Builds a `Combatant` with sensible defaults: level 10, Normal type,
/// 100 HP, 80 in every other stat, and Tackle as its only move.
pub struct TestCreatureBuilder {
    name: String,
    pokemon_type: PokemonType,
    level: u8,
    stats: BaseStats,
    moves: Vec<String>,
    status: Option<StatusCondition>,
    hp: Option<u16>,
}

impl TestCreatureBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            pokemon_type: PokemonType::Normal,
            level: 10,
            stats: BaseStats::new(100, 80, 80, 80, 80, 80),
            moves: vec!["Tackle".to_string()],
            status: None,
            hp: None,
        }
    }

    pub fn with_type(mut self, pokemon_type: PokemonType) -> Self {
        self.pokemon_type = pokemon_type;
        self
    }

    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    pub fn with_stats(mut self, stats: BaseStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_speed(mut self, speed: u16) -> Self {
        self.stats.speed = speed;
        self
    }

    pub fn with_moves(mut self, moves: &[&str]) -> Self {
        self.moves = moves.iter().map(|name| name.to_string()).collect();
        self
    }

    pub fn with_status(mut self, status: StatusCondition) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_hp(mut self, hp: u16) -> Self {
        self.hp = Some(hp);
        self
    }

    pub fn build(self) -> Combatant {
        let moves = self
            .moves
            .iter()
            .map(|name| get_move_data(name).unwrap_or_else(|_| panic!("unknown move {}", name)))
            .collect();
        let creature = Creature::new(self.name, 0, self.pokemon_type, self.level, self.stats)
            .with_moves(moves)
            .unwrap();

        let mut combatant = Combatant::new(creature);
        combatant.status = self.status;
        if let Some(hp) = self.hp {
            combatant.ledger.set_hp(hp);
        }
        combatant
    }
}

/// A trainer whose team is exactly `team`, with the first member active.
pub fn create_test_trainer(name: &str, team: Vec<Combatant>) -> Trainer {
    let roster: Vec<Creature> = team.iter().map(|member| member.creature.clone()).collect();
    let mut trainer = Trainer::new(name, &roster);
    trainer.team = team;
    trainer
}

/// Red (side 0) against Blue (side 1), one creature each.
pub fn create_test_field(red: Combatant, blue: Combatant) -> Field {
    create_team_field(vec![red], vec![blue])
}

pub fn create_team_field(red: Vec<Combatant>, blue: Vec<Combatant>) -> Field {
    Field::new(create_test_trainer("Red", red), create_test_trainer("Blue", blue))
}

pub fn create_configured_field(red: Combatant, blue: Combatant, config: BattleConfig) -> Field {
    Field::with_config(
        create_test_trainer("Red", vec![red]),
        create_test_trainer("Blue", vec![blue]),
        config,
    )
}

/// 50 for every draw: hits anything above 50 accuracy, never crits at the
/// default speeds, and takes the lowest damage factor.
pub fn predictable_rng() -> TurnRng {
    TurnRng::new_for_test(vec![50; 100])
}

pub fn assert_ok<T>(result: BattleResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("expected Ok, got {}", err),
    }
}

pub fn hp(field: &Field, side: usize) -> u16 {
    field.active(side).map_or(0, |active| active.ledger.hp())
}

pub fn has_message(messages: &[String], text: &str) -> bool {
    messages.iter().any(|message| message == text)
}
