// In: src/battle/move_effects/stat_effects.rs

// --- IMPORTS ---
use super::{fail_if_status_move, EffectContext, EffectResult};
use crate::battle::state::{BattleEvent, EventBus, Field, TurnRng};
use schema::{StatType, Target};

// --- STANDALONE HELPER FUNCTIONS ---

#[allow(clippy::too_many_arguments)]
pub(super) fn apply_stat_change_effect(
    target: &Target,
    stat: StatType,
    delta: i16,
    chance: u8,
    context: &EffectContext,
    field: &mut Field,
    damage: u16,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> EffectResult {
    let target_index = context.target_index(target);

    // A substitute shields its owner from the opponent's stat drops.
    let shielded = *target == Target::Target
        && field
            .active(target_index)
            .is_none_or(|creature| creature.has_substitute() || creature.is_fainted());
    if shielded {
        return fail_if_status_move(context, field, damage, bus);
    }

    if chance < 100 && !rng.chance(chance, "Stat Change Check") {
        return EffectResult::Continue(damage);
    }

    if let Some(creature) = field.active_mut(target_index) {
        let new_value = creature.ledger.modify(stat, delta);
        bus.push(BattleEvent::StatChanged {
            target: creature.name().to_string(),
            stat,
            delta,
            new_value,
        });
    }
    EffectResult::Continue(damage)
}

/// Both actives lose every stat change, volatile status and remembered move.
pub(super) fn apply_haze_effect(
    context: &EffectContext,
    field: &mut Field,
    damage: u16,
    bus: &mut EventBus,
) -> EffectResult {
    for side in [context.attacker_index, context.defender_index] {
        let Some(creature) = field.active_mut(side) else {
            continue;
        };
        creature.ledger.reset();
        creature.move_history.clear();
        if let Some(status) = creature.clear_volatile_status() {
            bus.push(BattleEvent::StatusRemoved {
                target: creature.name().to_string(),
                status,
            });
        }
    }
    bus.push(BattleEvent::StatsReset);
    EffectResult::Continue(damage)
}
