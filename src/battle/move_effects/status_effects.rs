// In: src/battle/move_effects/status_effects.rs

// --- IMPORTS ---
use super::{fail_if_status_move, EffectContext, EffectResult};
use crate::battle::conditions::{can_inflict, StatusCondition};
use crate::battle::state::{BattleEvent, EventBus, Field, TurnRng};
use crate::config::BattleConfig;

// --- SHARED INFLICTION PATH ---

/// Eligibility first, then the chance roll, then `build` picks the final
/// condition (drawing a duration where one applies).
#[allow(clippy::too_many_arguments)]
fn try_inflict(
    candidate: StatusCondition,
    chance: u8,
    reason: &str,
    context: &EffectContext,
    field: &mut Field,
    damage: u16,
    rng: &mut TurnRng,
    bus: &mut EventBus,
    build: impl FnOnce(&BattleConfig, &mut TurnRng) -> StatusCondition,
) -> EffectResult {
    let move_type = context.move_used.move_type;
    let eligible = field
        .active(context.defender_index)
        .is_some_and(|target| !target.has_substitute() && can_inflict(target, &candidate, move_type));
    if !eligible {
        return fail_if_status_move(context, field, damage, bus);
    }

    if chance < 100 && !rng.chance(chance, reason) {
        return EffectResult::Continue(damage);
    }

    let status = build(&field.config, rng);
    if let Some(target) = field.active_mut(context.defender_index) {
        target.status = Some(status);
        bus.push(BattleEvent::StatusApplied {
            target: target.name().to_string(),
            status,
        });
    }
    EffectResult::Continue(damage)
}

fn draw_turns(range: (u8, u8), reason: &str, rng: &mut TurnRng) -> u8 {
    let turns = rng.draw(u16::from(range.0), u16::from(range.1), reason);
    u8::try_from(turns).unwrap_or(range.1)
}

// --- STANDALONE HELPER FUNCTIONS ---

pub(super) fn apply_paralyze_effect(
    chance: u8,
    context: &EffectContext,
    field: &mut Field,
    damage: u16,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> EffectResult {
    try_inflict(
        StatusCondition::Paralyzed,
        chance,
        "Apply Paralysis Check",
        context,
        field,
        damage,
        rng,
        bus,
        |_, _| StatusCondition::Paralyzed,
    )
}

pub(super) fn apply_burn_effect(
    chance: u8,
    context: &EffectContext,
    field: &mut Field,
    damage: u16,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> EffectResult {
    try_inflict(
        StatusCondition::Burned,
        chance,
        "Apply Burn Check",
        context,
        field,
        damage,
        rng,
        bus,
        |_, _| StatusCondition::Burned,
    )
}

pub(super) fn apply_freeze_effect(
    chance: u8,
    context: &EffectContext,
    field: &mut Field,
    damage: u16,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> EffectResult {
    try_inflict(
        StatusCondition::Frozen,
        chance,
        "Apply Freeze Check",
        context,
        field,
        damage,
        rng,
        bus,
        |_, _| StatusCondition::Frozen,
    )
}

pub(super) fn apply_poison_effect(
    chance: u8,
    context: &EffectContext,
    field: &mut Field,
    damage: u16,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> EffectResult {
    try_inflict(
        StatusCondition::Poisoned,
        chance,
        "Apply Poison Check",
        context,
        field,
        damage,
        rng,
        bus,
        |_, _| StatusCondition::Poisoned,
    )
}

pub(super) fn apply_sleep_effect(
    chance: u8,
    context: &EffectContext,
    field: &mut Field,
    damage: u16,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> EffectResult {
    try_inflict(
        StatusCondition::Asleep(1),
        chance,
        "Apply Sleep Check",
        context,
        field,
        damage,
        rng,
        bus,
        |config, rng| StatusCondition::Asleep(draw_turns(config.sleep_turns, "Sleep Duration", rng)),
    )
}

pub(super) fn apply_confuse_effect(
    chance: u8,
    context: &EffectContext,
    field: &mut Field,
    damage: u16,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> EffectResult {
    try_inflict(
        StatusCondition::Confused(1),
        chance,
        "Apply Confusion Check",
        context,
        field,
        damage,
        rng,
        bus,
        |config, rng| {
            StatusCondition::Confused(draw_turns(config.confusion_turns, "Confusion Duration", rng))
        },
    )
}

pub(super) fn apply_seed_effect(
    chance: u8,
    context: &EffectContext,
    field: &mut Field,
    damage: u16,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> EffectResult {
    try_inflict(
        StatusCondition::Seeded,
        chance,
        "Apply Seed Check",
        context,
        field,
        damage,
        rng,
        bus,
        |_, _| StatusCondition::Seeded,
    )
}

pub(super) fn apply_flinch_effect(
    chance: u8,
    context: &EffectContext,
    field: &mut Field,
    damage: u16,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> EffectResult {
    try_inflict(
        StatusCondition::Flinched,
        chance,
        "Apply Flinch Check",
        context,
        field,
        damage,
        rng,
        bus,
        |_, _| StatusCondition::Flinched,
    )
}
