// In: src/battle/move_effects/special_effects.rs

// --- IMPORTS ---
use super::{move_failed, EffectContext, EffectResult};
use crate::battle::conditions::StatusCondition;
use crate::battle::state::{BattleEvent, EventBus, Field, TurnRng};
use crate::move_data::STRUGGLE_ID;
use schema::{MoveCategory, MoveData, MoveEffect};

/// PP a transformed creature gets for each copied move.
const TRANSFORM_PP: u8 = 5;

// --- HP AND SHIELDS ---

pub(super) fn apply_heal_effect(
    percent: u8,
    context: &EffectContext,
    field: &mut Field,
    damage: u16,
    bus: &mut EventBus,
) -> EffectResult {
    let Some(attacker) = field.active_mut(context.attacker_index) else {
        return EffectResult::Skip;
    };
    let max_hp = attacker.ledger.max_hp();
    if attacker.ledger.hp() >= max_hp {
        return move_failed(context, field, bus);
    }

    let wanted = (u32::from(max_hp) * u32::from(percent) / 100).max(1);
    let amount = attacker
        .ledger
        .heal(u16::try_from(wanted).unwrap_or(u16::MAX));
    bus.push(BattleEvent::CreatureHealed {
        target: attacker.name().to_string(),
        amount,
        new_hp: attacker.ledger.hp(),
    });
    EffectResult::Continue(damage)
}

/// Full heal, then sleep for exactly `turns`, replacing whatever status was there.
pub(super) fn apply_rest_effect(
    turns: u8,
    context: &EffectContext,
    field: &mut Field,
    damage: u16,
    bus: &mut EventBus,
) -> EffectResult {
    let Some(attacker) = field.active_mut(context.attacker_index) else {
        return EffectResult::Skip;
    };
    let max_hp = attacker.ledger.max_hp();
    if attacker.ledger.hp() >= max_hp {
        return move_failed(context, field, bus);
    }

    let amount = attacker.ledger.heal(max_hp);
    let status = StatusCondition::Asleep(turns);
    attacker.status = Some(status);
    let name = attacker.name().to_string();
    bus.push(BattleEvent::StatusApplied {
        target: name.clone(),
        status,
    });
    bus.push(BattleEvent::CreatureHealed {
        target: name,
        amount,
        new_hp: max_hp,
    });
    EffectResult::Continue(damage)
}

pub(super) fn apply_substitute_effect(
    context: &EffectContext,
    field: &mut Field,
    damage: u16,
    bus: &mut EventBus,
) -> EffectResult {
    let Some(attacker) = field.active_mut(context.attacker_index) else {
        return EffectResult::Skip;
    };
    let cost = attacker.ledger.max_hp() / 4;
    if cost == 0 || attacker.has_substitute() || attacker.ledger.hp() <= cost {
        return move_failed(context, field, bus);
    }

    attacker.ledger.damage(cost);
    attacker.substitute_hp = cost;
    bus.push(BattleEvent::SubstituteCreated {
        target: attacker.name().to_string(),
        hp: cost,
    });
    EffectResult::Continue(damage)
}

pub(super) fn apply_explode_effect(
    context: &EffectContext,
    field: &mut Field,
    damage: u16,
) -> EffectResult {
    if let Some(attacker) = field.active_mut(context.attacker_index) {
        attacker.ledger.set_hp(0);
    }
    EffectResult::Continue(damage)
}

// --- COPY AND REDIRECT ---

pub(super) fn apply_mirror_move_effect(
    context: &EffectContext,
    field: &Field,
    bus: &mut EventBus,
) -> EffectResult {
    let mirrored = field
        .active(context.defender_index)
        .and_then(|defender| defender.last_move())
        .filter(|last| !last.is_mirror_move())
        .cloned();
    match mirrored {
        Some(move_data) => EffectResult::Redirect(move_data),
        None => move_failed(context, field, bus),
    }
}

pub(super) fn apply_metronome_effect(
    context: &EffectContext,
    field: &Field,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> EffectResult {
    let candidates: Vec<&MoveData> = [context.attacker_index, context.defender_index]
        .into_iter()
        .filter_map(|side| field.active(side))
        .flat_map(|creature| creature.creature.moves.iter())
        .filter(|candidate| {
            candidate.id != STRUGGLE_ID
                && !candidate.has_effect(|effect| matches!(effect, MoveEffect::Metronome))
        })
        .collect();
    if candidates.is_empty() {
        return move_failed(context, field, bus);
    }

    let index = rng.pick_index(candidates.len(), "Metronome Move Choice");
    match candidates.get(index) {
        Some(chosen) => EffectResult::Redirect((*chosen).clone()),
        None => move_failed(context, field, bus),
    }
}

/// Swap the Mimic slot for a random move the target knows. Lasts the battle.
pub(super) fn apply_mimic_effect(
    context: &EffectContext,
    field: &mut Field,
    damage: u16,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> EffectResult {
    let Some((attacker, defender)) = field.active_pair_mut(context.attacker_index) else {
        return EffectResult::Skip;
    };
    let slot = attacker
        .creature
        .moves
        .iter()
        .position(|known| known.id == context.move_used.id);
    let (Some(slot), false) = (slot, defender.creature.moves.is_empty()) else {
        return move_failed(context, field, bus);
    };

    let index = rng.pick_index(defender.creature.moves.len(), "Mimic Move Choice");
    let Some(mut learned) = defender.creature.moves.get(index).cloned() else {
        return move_failed(context, field, bus);
    };
    if let Some(old) = attacker.creature.moves.get_mut(slot) {
        learned.pp = old.pp;
        *old = learned.clone();
    }
    bus.push(BattleEvent::MoveLearned {
        creature: attacker.name().to_string(),
        move_name: learned.name,
    });
    EffectResult::Continue(damage)
}

/// Copy the target's type, stats and moves. HP stays our own.
pub(super) fn apply_transform_effect(
    context: &EffectContext,
    field: &mut Field,
    damage: u16,
    bus: &mut EventBus,
) -> EffectResult {
    let Some((attacker, defender)) = field.active_pair_mut(context.attacker_index) else {
        return EffectResult::Skip;
    };

    attacker.creature.pokemon_type = defender.pokemon_type();
    attacker.ledger.rebase(&defender.ledger);
    attacker.creature.moves = defender
        .creature
        .moves
        .iter()
        .cloned()
        .map(|mut copied| {
            copied.pp = copied.max_pp.min(TRANSFORM_PP);
            copied
        })
        .collect();

    bus.push(BattleEvent::Transformed {
        creature: attacker.name().to_string(),
        into: defender.name().to_string(),
    });
    EffectResult::Continue(damage)
}

// --- FLAVOR AND MARKERS ---

pub(super) fn apply_splash_effect(damage: u16, bus: &mut EventBus) -> EffectResult {
    bus.push(BattleEvent::Splashed);
    EffectResult::Continue(damage)
}

/// The screen itself lives in the move history; this only announces it.
pub(super) fn apply_screen_effect(
    category: MoveCategory,
    context: &EffectContext,
    field: &Field,
    damage: u16,
    bus: &mut EventBus,
) -> EffectResult {
    if let Some(attacker) = field.active(context.attacker_index) {
        bus.push(BattleEvent::ScreenRaised {
            creature: attacker.name().to_string(),
            category,
        });
    }
    EffectResult::Continue(damage)
}

pub(super) fn apply_focus_energy_effect(
    context: &EffectContext,
    field: &Field,
    damage: u16,
    bus: &mut EventBus,
) -> EffectResult {
    if let Some(attacker) = field.active(context.attacker_index) {
        bus.push(BattleEvent::FocusEnergy {
            creature: attacker.name().to_string(),
        });
    }
    EffectResult::Continue(damage)
}
