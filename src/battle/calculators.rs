use crate::battle::conditions::StatusCondition;
use crate::battle::state::TurnRng;
use crate::combatant::Combatant;
use schema::{Effectiveness, MoveCategory, MoveData, PokemonType, StatType};

/// Crit rolls are compared against this many values, 0..=255.
pub const CRIT_ROLL_MAX: u16 = 255;
/// Lower bound of the damage spread. The upper bound is 255, i.e. x1.0.
pub const DAMAGE_FACTOR_MIN: u16 = 217;
pub const DAMAGE_FACTOR_MAX: u16 = 255;
/// Effective stats above this are quartered together.
const STAT_OVERFLOW_LIMIT: u32 = 255;

/// Result of one run of the damage calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageOutcome {
    pub damage: u16,
    pub is_critical: bool,
    pub move_hit: bool,
    pub effectiveness: Effectiveness,
}

impl DamageOutcome {
    pub fn missed() -> Self {
        Self {
            damage: 0,
            is_critical: false,
            move_hit: false,
            effectiveness: Effectiveness::Neutral,
        }
    }
}

/// The value a 0..=255 crit roll must be under for a critical hit.
pub fn crit_threshold(attacker: &Combatant, move_data: &MoveData) -> u16 {
    let speed = u32::from(attacker.ledger.get(StatType::Speed));
    let focused = attacker.has_used(MoveData::grants_focus);

    let threshold = match (focused, move_data.is_high_critical()) {
        (true, true) => u32::from(CRIT_ROLL_MAX),
        (true, false) => (speed + 236) * 2 / 4,
        (false, true) => (speed + 76) * 8 / 4,
        (false, false) => (speed + 76) / 4,
    };
    threshold.min(u32::from(CRIT_ROLL_MAX)) as u16
}

/// Attack and defense as the base formula sees them.
///
/// Order matters: the 8-bit overflow quarter, then burn on the attack side,
/// then the screen (skipped on crits) and the explosion halving on defense.
pub fn effective_attack_defense(
    attacker: &Combatant,
    defender: &Combatant,
    move_data: &MoveData,
    is_critical: bool,
) -> (u32, u32) {
    let (attack_stat, defense_stat) = match move_data.category {
        MoveCategory::Physical => (StatType::Attack, StatType::Defense),
        MoveCategory::Special => (StatType::SpecialAttack, StatType::SpecialDefense),
    };
    let mut attack = u32::from(attacker.ledger.get(attack_stat));
    let mut defense = u32::from(defender.ledger.get(defense_stat));

    if attack > STAT_OVERFLOW_LIMIT || defense > STAT_OVERFLOW_LIMIT {
        attack /= 4;
        defense /= 4;
    }

    if attacker.status == Some(StatusCondition::Burned) {
        attack /= 2;
    }

    if !is_critical
        && defender.has_used(|used| used.screen_category() == Some(move_data.category))
    {
        defense *= 2;
    }

    if move_data.is_explosive() {
        defense = (defense / 2).max(1);
    }

    (attack, defense.max(1))
}

/// The deterministic part of the formula: everything but the random spread.
pub fn base_damage(
    level: u8,
    power: u16,
    attack: u32,
    defense: u32,
    is_critical: bool,
    stab: bool,
    effectiveness: Effectiveness,
) -> u16 {
    let crit_multiplier = if is_critical { 2.0 } else { 1.0 };
    let level = f64::from(level);
    let ratio = f64::from(attack) / f64::from(defense.max(1));

    let base = ((2.0 * level * crit_multiplier / 5.0 + 2.0) * f64::from(power) * ratio / 50.0
        + 2.0)
        .floor();
    let stab_multiplier = if stab { 1.5 } else { 1.0 };
    let scaled = (base * stab_multiplier * effectiveness.multiplier()).trunc();
    scaled.clamp(0.0, f64::from(u16::MAX)) as u16
}

/// Apply the 217..=255 spread. A base of exactly 1 is left alone.
pub fn apply_random_factor(base: u16, factor: u16) -> u16 {
    if base <= 1 {
        return base;
    }
    let scaled = u32::from(base) * u32::from(factor) / u32::from(DAMAGE_FACTOR_MAX);
    (scaled as u16).max(1)
}

/// Roll to hit, roll for a crit and compute damage for `move_data`.
///
/// Always draws the hit roll. Moves with power draw the crit roll and the
/// damage factor as well, even when the factor ends up unused.
pub fn calculate_damage(
    attacker: &Combatant,
    defender: &Combatant,
    move_data: &MoveData,
    rng: &mut TurnRng,
) -> DamageOutcome {
    let hit_roll = rng.draw(0, 99, "Accuracy Check");
    if hit_roll >= u16::from(move_data.accuracy) {
        return DamageOutcome::missed();
    }

    let effectiveness = defender.creature.receive_attack(move_data.move_type);
    if move_data.power == 0 {
        return DamageOutcome {
            damage: 0,
            is_critical: false,
            move_hit: true,
            effectiveness,
        };
    }

    let crit_roll = rng.draw(0, CRIT_ROLL_MAX, "Critical Hit Check");
    let is_critical = crit_roll < crit_threshold(attacker, move_data);
    let factor = rng.draw(DAMAGE_FACTOR_MIN, DAMAGE_FACTOR_MAX, "Damage Factor");

    let (attack, defense) = effective_attack_defense(attacker, defender, move_data, is_critical);
    let stab = move_data.move_type != PokemonType::Typeless
        && move_data.move_type == attacker.pokemon_type();
    let base = base_damage(
        attacker.level(),
        move_data.power,
        attack,
        defense,
        is_critical,
        stab,
        effectiveness,
    );

    // An immune target zeroes the base, and the 1-damage floor needs a base of at least 1.
    DamageOutcome {
        damage: apply_random_factor(base, factor),
        is_critical,
        move_hit: true,
        effectiveness,
    }
}
