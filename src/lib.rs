// In: src/lib.rs

//! Pokemon Combat Engine
//!
//! Resolves one turn of a two-sided, Generation 1 style battle: turn order,
//! status gating, the damage formula and the per-move effect table. Roster
//! loading, action selection and any user interface live outside the crate.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod combatant;
pub mod config;
pub mod creature;
pub mod errors;
pub mod move_data;
pub mod trainer;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{
    BaseStats, Effectiveness, MoveCategory, MoveData, MoveEffect, PokemonType, StatType, Target,
};

// --- From this crate's modules (`src/`) ---

// Turn resolution and battle state.
pub use battle::calculators::{calculate_damage, DamageOutcome};
pub use battle::conditions::StatusCondition;
pub use battle::engine::{resolve_turn, TurnReport};
pub use battle::state::{BattleEvent, EventBus, Field, GameState, TurnRng};
pub use battle::stats::StatLedger;

// Runtime types for a battle.
pub use combatant::Combatant;
pub use config::{BattleConfig, SpeedTie};
pub use creature::Creature;
pub use trainer::{Trainer, TrainerAction};

// Errors and data access.
pub use errors::{BattleEngineError, BattleResult};
pub use move_data::{get_move_data, hit_itself, struggle};
