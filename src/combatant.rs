use crate::battle::conditions::StatusCondition;
use crate::battle::stats::StatLedger;
use crate::creature::Creature;
use schema::{MoveData, PokemonType};
use serde::{Deserialize, Serialize};

/// A creature as it exists inside one battle: its own copy of the roster
/// entry plus everything the battle tracks about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub creature: Creature,
    pub ledger: StatLedger,
    pub status: Option<StatusCondition>,
    /// Moves used since this creature last entered the field, oldest first.
    pub move_history: Vec<MoveData>,
    pub substitute_hp: u16,
}

impl Combatant {
    pub fn new(creature: Creature) -> Self {
        let ledger = StatLedger::new(creature.base_stats);
        Self {
            creature,
            ledger,
            status: None,
            move_history: Vec::new(),
            substitute_hp: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.creature.name
    }

    pub fn pokemon_type(&self) -> PokemonType {
        self.creature.pokemon_type
    }

    pub fn level(&self) -> u8 {
        self.creature.level
    }

    pub fn is_fainted(&self) -> bool {
        self.ledger.is_fainted()
    }

    pub fn last_move(&self) -> Option<&MoveData> {
        self.move_history.last()
    }

    pub fn has_used(&self, predicate: impl Fn(&MoveData) -> bool) -> bool {
        self.move_history.iter().any(predicate)
    }

    pub fn has_substitute(&self) -> bool {
        self.substitute_hp > 0
    }

    /// Drop a volatile status (confusion, seed, flinch). Persistent ones stay.
    pub fn clear_volatile_status(&mut self) -> Option<StatusCondition> {
        match self.status {
            Some(status) if status.is_volatile() => self.status.take(),
            _ => None,
        }
    }

    /// Reset everything that only lasts while the creature is on the field.
    pub fn leave_field(&mut self) {
        self.move_history.clear();
        self.ledger.reset();
        self.substitute_hp = 0;
        self.clear_volatile_status();
    }
}
