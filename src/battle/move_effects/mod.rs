// In: src/battle/move_effects/mod.rs

// --- 1. DECLARE HELPER MODULES ---
mod damage_effects;
mod special_effects;
mod stat_effects;
mod status_effects;

// --- 2. IMPORTS ---
use crate::battle::state::{ActionFailureReason, BattleEvent, EventBus, Field, TurnRng};
use schema::{MoveData, MoveEffect, Target};
use self::{damage_effects::*, special_effects::*, stat_effects::*, status_effects::*};

// --- 3. BATTLE-SPECIFIC DATA STRUCTURES ---
#[derive(Debug, Clone)]
pub struct EffectContext {
    pub attacker_index: usize,
    pub defender_index: usize,
    pub move_used: MoveData,
}

impl EffectContext {
    pub fn new(attacker_index: usize, defender_index: usize, move_used: MoveData) -> Self {
        Self {
            attacker_index,
            defender_index,
            move_used,
        }
    }

    pub fn target_index(&self, target: &Target) -> usize {
        match target {
            Target::User => self.attacker_index,
            Target::Target => self.defender_index,
        }
    }

    /// Pure status moves report a failed effect as a failed move.
    pub fn is_status_move(&self) -> bool {
        self.move_used.power == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EffectResult {
    /// Keep going with this (possibly adjusted) damage.
    Continue(u16),
    /// The move failed outright; no damage and no further effects.
    Skip,
    /// Run this move through the pipeline instead (Mirror Move, Metronome).
    Redirect(MoveData),
}

// --- 4. SHARED FAILURE HELPERS ---

/// "But it failed!" from the attacker, and nothing further happens.
fn move_failed(context: &EffectContext, field: &Field, bus: &mut EventBus) -> EffectResult {
    if let Some(attacker) = field.active(context.attacker_index) {
        bus.push(BattleEvent::ActionFailed {
            creature: attacker.name().to_string(),
            reason: ActionFailureReason::MoveFailed,
        });
    }
    EffectResult::Skip
}

/// A secondary effect that cannot land is silent; a status move that
/// cannot land has failed.
fn fail_if_status_move(
    context: &EffectContext,
    field: &Field,
    damage: u16,
    bus: &mut EventBus,
) -> EffectResult {
    if context.is_status_move() {
        move_failed(context, field, bus)
    } else {
        EffectResult::Continue(damage)
    }
}

// --- 5. THE PUBLIC EXTENSION TRAITS ---

pub trait BattleMoveEffectExt {
    fn apply(
        &self,
        context: &EffectContext,
        field: &mut Field,
        damage: u16,
        rng: &mut TurnRng,
        bus: &mut EventBus,
    ) -> EffectResult;

    /// Effects that act on the user and so still happen when the target is immune.
    fn lands_through_immunity(&self) -> bool;
}

pub trait BattleMoveDataExt {
    /// Recoil and drain, sized from the damage that actually landed.
    fn apply_damage_based_effects(
        &self,
        context: &EffectContext,
        field: &mut Field,
        damage_dealt: u16,
        bus: &mut EventBus,
    );
}

// --- 6. THE LEAN IMPLEMENTATIONS ---

impl BattleMoveEffectExt for MoveEffect {
    fn apply(
        &self,
        context: &EffectContext,
        field: &mut Field,
        damage: u16,
        rng: &mut TurnRng,
        bus: &mut EventBus,
    ) -> EffectResult {
        log::trace!("applying {:?} from {}", self, context.move_used.name);

        match self {
            // Status infliction
            Self::Paralyze(chance) => {
                apply_paralyze_effect(*chance, context, field, damage, rng, bus)
            }
            Self::Burn(chance) => apply_burn_effect(*chance, context, field, damage, rng, bus),
            Self::Freeze(chance) => apply_freeze_effect(*chance, context, field, damage, rng, bus),
            Self::Poison(chance) => apply_poison_effect(*chance, context, field, damage, rng, bus),
            Self::Sleep(chance) => apply_sleep_effect(*chance, context, field, damage, rng, bus),
            Self::Confuse(chance) => {
                apply_confuse_effect(*chance, context, field, damage, rng, bus)
            }
            Self::Seed(chance) => apply_seed_effect(*chance, context, field, damage, rng, bus),
            Self::Flinch(chance) => apply_flinch_effect(*chance, context, field, damage, rng, bus),

            // Stat ledger
            Self::StatChange(target, stat, delta, chance) => apply_stat_change_effect(
                target, *stat, *delta, *chance, context, field, damage, rng, bus,
            ),
            Self::Haze => apply_haze_effect(context, field, damage, bus),

            // Damage shaping
            Self::MultiHit => apply_multi_hit_effect(damage, rng, bus),
            Self::DoubleHit => apply_double_hit_effect(damage, bus),
            Self::LevelDamage => apply_level_damage_effect(context, field),
            Self::Psywave => apply_psywave_effect(context, field, rng),
            Self::SuperFang => apply_super_fang_effect(context, field),
            Self::OneHitKo => apply_one_hit_ko_effect(context, field, bus),

            // Special moves
            Self::Heal(percent) => apply_heal_effect(*percent, context, field, damage, bus),
            Self::Rest(turns) => apply_rest_effect(*turns, context, field, damage, bus),
            Self::Substitute => apply_substitute_effect(context, field, damage, bus),
            Self::MirrorMove => apply_mirror_move_effect(context, field, bus),
            Self::Metronome => apply_metronome_effect(context, field, rng, bus),
            Self::Mimic => apply_mimic_effect(context, field, damage, rng, bus),
            Self::Transform => apply_transform_effect(context, field, damage, bus),
            Self::Explode => apply_explode_effect(context, field, damage),
            Self::Splash => apply_splash_effect(damage, bus),
            Self::Screen(category) => {
                apply_screen_effect(*category, context, field, damage, bus)
            }
            Self::FocusEnergy => apply_focus_energy_effect(context, field, damage, bus),

            // Read elsewhere: the calculator and the turn order
            Self::Recoil(_) | Self::Drain(_) | Self::HighCritical | Self::Priority => {
                EffectResult::Continue(damage)
            }
        }
    }

    fn lands_through_immunity(&self) -> bool {
        matches!(self, Self::Explode | Self::StatChange(Target::User, ..))
    }
}

impl BattleMoveDataExt for MoveData {
    fn apply_damage_based_effects(
        &self,
        context: &EffectContext,
        field: &mut Field,
        damage_dealt: u16,
        bus: &mut EventBus,
    ) {
        if damage_dealt == 0 {
            return;
        }
        for effect in &self.effects {
            match effect {
                MoveEffect::Recoil(divisor) => {
                    apply_recoil_effect(*divisor, damage_dealt, context, field, bus)
                }
                MoveEffect::Drain(divisor) => {
                    apply_drain_effect(*divisor, damage_dealt, context, field, bus)
                }
                _ => {}
            }
        }
    }
}
