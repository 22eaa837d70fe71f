use crate::combatant::Combatant;
use crate::creature::Creature;
use crate::errors::ActionError;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainerAction {
    // Position (0-3) in the active creature's move list.
    Attack { move_index: usize },

    // Position in the trainer's remaining team.
    Switch { team_index: usize },

    Surrender,
}

/// One side of the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trainer {
    pub trainer_name: String,
    // The battle's own copy of the roster; fainted creatures are removed.
    pub team: Vec<Combatant>,
    // None once the active creature faints, until a replacement is chosen.
    pub active_index: Option<usize>,
}

impl Trainer {
    /// Takes a copy of `roster`, so the caller's list is left untouched.
    pub fn new(trainer_name: impl Into<String>, roster: &[Creature]) -> Self {
        let team: Vec<Combatant> = roster.iter().cloned().map(Combatant::new).collect();
        let active_index = if team.is_empty() { None } else { Some(0) };
        Self {
            trainer_name: trainer_name.into(),
            team,
            active_index,
        }
    }

    pub fn active(&self) -> Option<&Combatant> {
        self.active_index.and_then(|index| self.team.get(index))
    }

    pub fn active_mut(&mut self) -> Option<&mut Combatant> {
        let index = self.active_index?;
        self.team.get_mut(index)
    }

    pub fn has_creatures_left(&self) -> bool {
        !self.team.is_empty()
    }

    /// True when the active slot is empty but someone could fill it.
    pub fn needs_replacement(&self) -> bool {
        self.active_index.is_none() && self.has_creatures_left()
    }

    /// Check that `team_index` names a creature that could come in right now.
    pub fn validate_switch(&self, team_index: usize) -> Result<(), ActionError> {
        let candidate = self
            .team
            .get(team_index)
            .ok_or(ActionError::InvalidCreatureIndex(team_index))?;
        if self.active_index == Some(team_index) {
            return Err(ActionError::AlreadyActive(team_index));
        }
        if candidate.is_fainted() {
            return Err(ActionError::CreatureFainted(team_index));
        }
        Ok(())
    }

    /// Check that the active creature can use the move at `move_index`.
    pub fn validate_attack(&self, move_index: usize) -> Result<(), ActionError> {
        let move_data = self
            .active()
            .and_then(|active| active.creature.moves.get(move_index))
            .ok_or(ActionError::InvalidMoveIndex(move_index))?;
        if move_data.pp == 0 {
            return Err(ActionError::NoPpRemaining(move_data.name.clone()));
        }
        Ok(())
    }

    /// Bring `team_index` in. The outgoing creature loses its battle-only state.
    pub fn switch_to(&mut self, team_index: usize) -> Result<(), ActionError> {
        self.validate_switch(team_index)?;
        if let Some(outgoing) = self.active_mut() {
            outgoing.leave_field();
        }
        self.active_index = Some(team_index);
        Ok(())
    }

    /// Remove the fainted active creature from the team.
    pub fn remove_active(&mut self) -> Option<Combatant> {
        let index = self.active_index.take()?;
        if index < self.team.len() {
            Some(self.team.remove(index))
        } else {
            None
        }
    }
}
