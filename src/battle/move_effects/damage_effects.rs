// In: src/battle/move_effects/damage_effects.rs

// --- IMPORTS ---
use super::{move_failed, EffectContext, EffectResult};
use crate::battle::state::{BattleEvent, EventBus, Field, TurnRng};
use schema::{Effectiveness, StatType};

/// Hit count for a 1..=100 roll: 37% two, 37% three, 12% four, 13% five,
/// and the last 1% a single hit.
pub(crate) fn multi_hit_count(roll: u16) -> u8 {
    match roll {
        0..=37 => 2,
        38..=74 => 3,
        75..=86 => 4,
        87..=99 => 5,
        _ => 1,
    }
}

// --- HIT COUNT ---

pub(super) fn apply_multi_hit_effect(
    damage: u16,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> EffectResult {
    let hits = multi_hit_count(rng.roll_percent("Multi-Hit Count"));
    bus.push(BattleEvent::MultiHit { hits });
    EffectResult::Continue(damage.saturating_mul(u16::from(hits)))
}

pub(super) fn apply_double_hit_effect(damage: u16, bus: &mut EventBus) -> EffectResult {
    bus.push(BattleEvent::MultiHit { hits: 2 });
    EffectResult::Continue(damage.saturating_mul(2))
}

// --- FIXED DAMAGE ---

pub(super) fn apply_level_damage_effect(context: &EffectContext, field: &Field) -> EffectResult {
    let level = field
        .active(context.attacker_index)
        .map_or(0, |attacker| u16::from(attacker.level()));
    EffectResult::Continue(level)
}

pub(super) fn apply_psywave_effect(
    context: &EffectContext,
    field: &Field,
    rng: &mut TurnRng,
) -> EffectResult {
    let level = field
        .active(context.attacker_index)
        .map_or(0, |attacker| u32::from(attacker.level()));
    let percent = u32::from(rng.draw(50, 150, "Psywave Power"));
    let damage = (level * percent / 100).max(1);
    EffectResult::Continue(u16::try_from(damage).unwrap_or(u16::MAX))
}

pub(super) fn apply_super_fang_effect(context: &EffectContext, field: &Field) -> EffectResult {
    let current_hp = field
        .active(context.defender_index)
        .map_or(0, |defender| defender.ledger.hp());
    EffectResult::Continue((current_hp / 2).max(1))
}

/// Only lands on a slower target, and never through a type immunity.
pub(super) fn apply_one_hit_ko_effect(
    context: &EffectContext,
    field: &Field,
    bus: &mut EventBus,
) -> EffectResult {
    let (Some(attacker), Some(defender)) = (
        field.active(context.attacker_index),
        field.active(context.defender_index),
    ) else {
        return EffectResult::Skip;
    };

    if defender.creature.receive_attack(context.move_used.move_type) == Effectiveness::Immune {
        bus.push(BattleEvent::AttackTypeEffectiveness {
            effectiveness: Effectiveness::Immune,
        });
        return EffectResult::Skip;
    }
    if attacker.ledger.get(StatType::Speed) <= defender.ledger.get(StatType::Speed) {
        return move_failed(context, field, bus);
    }
    EffectResult::Continue(defender.ledger.hp())
}

// --- DAMAGE-BASED FOLLOW-UPS ---

pub(super) fn apply_recoil_effect(
    divisor: u8,
    damage_dealt: u16,
    context: &EffectContext,
    field: &mut Field,
    bus: &mut EventBus,
) {
    let recoil = (damage_dealt / u16::from(divisor.max(1))).max(1);
    if let Some(attacker) = field.active_mut(context.attacker_index) {
        let lost = attacker.ledger.damage(recoil);
        if lost > 0 {
            bus.push(BattleEvent::RecoilDamage {
                target: attacker.name().to_string(),
                damage: lost,
                remaining_hp: attacker.ledger.hp(),
            });
        }
    }
}

pub(super) fn apply_drain_effect(
    divisor: u8,
    damage_dealt: u16,
    context: &EffectContext,
    field: &mut Field,
    bus: &mut EventBus,
) {
    let drained = (damage_dealt / u16::from(divisor.max(1))).max(1);
    if let Some(attacker) = field.active_mut(context.attacker_index) {
        if attacker.is_fainted() {
            return;
        }
        let amount = attacker.ledger.heal(drained);
        if amount > 0 {
            bus.push(BattleEvent::CreatureHealed {
                target: attacker.name().to_string(),
                amount,
                new_hp: attacker.ledger.hp(),
            });
        }
    }
}
