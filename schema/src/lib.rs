// Pokemon Combat Schema - Shared data definitions
// Plain records and enums used by the combat engine and by whatever loads
// creature and move data for it. Nothing in here knows about a battle.

// Re-export the main types
pub use move_types::*;
pub use pokemon_types::*;
pub use species_data::*;

pub mod move_types;
pub mod pokemon_types;
pub mod species_data;
