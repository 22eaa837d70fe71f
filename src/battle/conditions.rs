// In: src/battle/conditions.rs

use crate::battle::state::{ActionFailureReason, BattleEvent, EventBus, Field, TurnRng};
use crate::combatant::Combatant;
use crate::config::BattleConfig;
use schema::{Effectiveness, PokemonType};
use serde::{Deserialize, Serialize};

/// The single condition a creature can carry. Counters count the remaining
/// actions the condition affects and are decremented by the action gate.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCondition {
    Paralyzed,
    Burned,
    Poisoned,
    Asleep(u8),
    Frozen,
    Confused(u8),
    Seeded,
    Flinched,
}

impl StatusCondition {
    /// Volatile conditions are the ones Haze and switching clear.
    pub fn is_volatile(&self) -> bool {
        matches!(
            self,
            StatusCondition::Confused(_) | StatusCondition::Seeded | StatusCondition::Flinched
        )
    }

    /// Conditions that chip HP after their owner acts.
    pub fn deals_damage(&self) -> bool {
        matches!(
            self,
            StatusCondition::Burned | StatusCondition::Poisoned | StatusCondition::Seeded
        )
    }

    /// Conditions a move cannot inflict on a target immune to the move's type.
    fn respects_move_immunity(&self) -> bool {
        matches!(
            self,
            StatusCondition::Paralyzed
                | StatusCondition::Burned
                | StatusCondition::Poisoned
                | StatusCondition::Seeded
        )
    }

    /// Target types that can never receive this condition.
    fn blocking_types(&self) -> &'static [PokemonType] {
        match self {
            StatusCondition::Paralyzed => &[PokemonType::Electric],
            StatusCondition::Burned => &[PokemonType::Fire],
            StatusCondition::Frozen => &[PokemonType::Fire, PokemonType::Ice],
            StatusCondition::Poisoned => &[PokemonType::Poison, PokemonType::Steel],
            StatusCondition::Seeded => &[PokemonType::Grass],
            StatusCondition::Asleep(_)
            | StatusCondition::Confused(_)
            | StatusCondition::Flinched => &[],
        }
    }
}

/// What the status gate decided about an attempted action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionGate {
    Proceed,
    Blocked(ActionFailureReason),
    HitSelf,
}

/// Whether `status` may be put on `target` by a move of `move_type`.
pub fn can_inflict(target: &Combatant, status: &StatusCondition, move_type: PokemonType) -> bool {
    if target.status.is_some() || target.is_fainted() {
        return false;
    }
    if status.respects_move_immunity()
        && target.creature.receive_attack(move_type) == Effectiveness::Immune
    {
        return false;
    }
    !status.blocking_types().contains(&target.pokemon_type())
}

/// Run the once-per-action status check on the creature about to act.
///
/// Counted conditions tick down first; one that runs out is removed and the
/// action goes ahead. Paralysis and confusion each draw one percentage roll.
pub fn check_action_gate(
    actor: &mut Combatant,
    config: &BattleConfig,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> ActionGate {
    let Some(status) = actor.status else {
        return ActionGate::Proceed;
    };
    let name = actor.name().to_string();

    match status {
        StatusCondition::Asleep(turns) => {
            let remaining = turns.saturating_sub(1);
            if remaining == 0 {
                actor.status = None;
                bus.push(BattleEvent::StatusRemoved {
                    target: name,
                    status,
                });
                ActionGate::Proceed
            } else {
                actor.status = Some(StatusCondition::Asleep(remaining));
                ActionGate::Blocked(ActionFailureReason::IsAsleep)
            }
        }
        StatusCondition::Frozen => ActionGate::Blocked(ActionFailureReason::IsFrozen),
        StatusCondition::Flinched => {
            actor.status = None;
            ActionGate::Blocked(ActionFailureReason::IsFlinching)
        }
        StatusCondition::Paralyzed => {
            if rng.chance(config.paralysis_block_chance, "Paralysis Check") {
                ActionGate::Blocked(ActionFailureReason::IsParalyzed)
            } else {
                ActionGate::Proceed
            }
        }
        StatusCondition::Confused(turns) => {
            let remaining = turns.saturating_sub(1);
            if remaining == 0 {
                actor.status = None;
                bus.push(BattleEvent::StatusRemoved {
                    target: name,
                    status,
                });
                return ActionGate::Proceed;
            }
            actor.status = Some(StatusCondition::Confused(remaining));
            bus.push(BattleEvent::IsConfused { creature: name });
            if rng.chance(config.confusion_self_hit_chance, "Confusion Self-Hit Check") {
                ActionGate::HitSelf
            } else {
                ActionGate::Proceed
            }
        }
        StatusCondition::Burned | StatusCondition::Poisoned | StatusCondition::Seeded => {
            ActionGate::Proceed
        }
    }
}

/// Burn, poison and seed damage for the creature on `side` after it acts.
/// Seed hands the drained HP to the opposing active creature.
pub fn apply_status_damage(field: &mut Field, side: usize, bus: &mut EventBus) {
    let divisor = field.config.status_damage_divisor.max(1);
    let Some((actor, opponent)) = field.active_pair_mut(side) else {
        return;
    };
    let Some(status) = actor.status.filter(StatusCondition::deals_damage) else {
        return;
    };
    if actor.is_fainted() {
        return;
    }

    let damage = actor.ledger.damage(actor.ledger.max_hp() / divisor);
    if damage == 0 {
        return;
    }
    bus.push(BattleEvent::StatusDamage {
        target: actor.name().to_string(),
        status,
        damage,
        remaining_hp: actor.ledger.hp(),
    });

    if status == StatusCondition::Seeded && !opponent.is_fainted() {
        let amount = opponent.ledger.heal(damage);
        if amount > 0 {
            bus.push(BattleEvent::CreatureHealed {
                target: opponent.name().to_string(),
                amount,
                new_hp: opponent.ledger.hp(),
            });
        }
    }
}
