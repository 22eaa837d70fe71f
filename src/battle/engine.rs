use crate::battle::calculators::calculate_damage;
use crate::battle::conditions::{apply_status_damage, check_action_gate, ActionGate, StatusCondition};
use crate::battle::move_effects::{
    BattleMoveDataExt, BattleMoveEffectExt, EffectContext, EffectResult,
};
use crate::battle::state::{
    ActionFailureReason, BattleEvent, EventBus, Field, GameState, OrderReason, TurnRng,
};
use crate::combatant::Combatant;
use crate::config::SpeedTie;
use crate::errors::{BattleEngineError, BattleResult, BattleStateError};
use crate::move_data::hit_itself;
use crate::trainer::TrainerAction;
use schema::{Effectiveness, MoveData, PokemonType, StatType};

/// Mirror Move and Metronome can hand off to each other; this caps the chain.
const MAX_REDIRECTS: u8 = 4;

/// Everything the caller learns from one resolved turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnReport {
    pub continue_battle: bool,
    pub messages: Vec<String>,
    pub events: EventBus,
    /// Per side: the active slot is empty and `Field::replace_active` must be called.
    pub needs_switch: [bool; 2],
    pub winner: Option<usize>,
}

/// Main entry point for turn resolution.
///
/// Validates both actions before touching anything, then runs surrender,
/// switches, attacks in speed order, end-of-turn cleanup and the faint pass.
pub fn resolve_turn(
    field: &mut Field,
    action1: TrainerAction,
    action2: TrainerAction,
    rng: &mut TurnRng,
) -> BattleResult<TurnReport> {
    let actions = [action1, action2];
    if let Err(err) = validate_turn(field, &actions) {
        log::warn!("rejected turn {}: {}", field.turn_number + 1, err);
        return Err(err);
    }

    let mut bus = EventBus::new();

    // 1. Initialization
    field.turn_number += 1;
    log::debug!("resolving turn {}: {:?} vs {:?}", field.turn_number, action1, action2);
    bus.push(BattleEvent::TurnStarted {
        turn_number: field.turn_number,
    });

    // 2. Surrender ends everything; side 1 is checked first.
    if let Some(side) = actions
        .iter()
        .position(|action| matches!(action, TrainerAction::Surrender))
    {
        execute_surrender(field, side, &mut bus);
        bus.push(BattleEvent::TurnEnded);
        return Ok(build_report(field, bus));
    }

    // 3. Switches land before any attack.
    for (side, action) in actions.iter().enumerate() {
        if let TrainerAction::Switch { team_index } = action {
            execute_switch(field, side, *team_index, &mut bus)?;
        }
    }

    // 4. Attacks in turn order.
    let attacks: Vec<(usize, usize)> = actions
        .iter()
        .enumerate()
        .filter_map(|(side, action)| match action {
            TrainerAction::Attack { move_index } => Some((side, *move_index)),
            _ => None,
        })
        .collect();
    for (side, move_index) in determine_attack_order(field, attacks, rng, &mut bus) {
        execute_attack(field, side, move_index, rng, &mut bus);
    }

    // 5. End of turn: flinch never outlives the turn it was inflicted in.
    for side in 0..2 {
        if let Some(active) = field.active_mut(side) {
            if active.status == Some(StatusCondition::Flinched) {
                active.status = None;
            }
        }
    }

    // 6. Faint pass and win check.
    run_faint_pass(field, &mut bus);
    bus.push(BattleEvent::TurnEnded);

    Ok(build_report(field, bus))
}

// --- VALIDATION ---

fn validate_turn(field: &Field, actions: &[TrainerAction; 2]) -> BattleResult<()> {
    if field.game_state.is_over() {
        return Err(BattleStateError::BattleOver.into());
    }
    if actions.contains(&TrainerAction::Surrender) {
        return Ok(());
    }
    if field.active(0).is_none() && field.active(1).is_none() {
        return Err(BattleStateError::NoActiveCreature.into());
    }

    for (side, action) in actions.iter().enumerate() {
        let trainer = &field.trainers[side];
        if trainer.active().is_none() {
            let err = if trainer.needs_replacement() {
                BattleStateError::ReplacementPending(side)
            } else {
                BattleStateError::NoActiveCreature
            };
            return Err(err.into());
        }
        match action {
            TrainerAction::Attack { move_index } => trainer.validate_attack(*move_index)?,
            TrainerAction::Switch { team_index } => trainer.validate_switch(*team_index)?,
            TrainerAction::Surrender => {}
        }
    }
    Ok(())
}

// --- TRAINER ACTIONS ---

fn execute_surrender(field: &mut Field, side: usize, bus: &mut EventBus) {
    let winner = 1 - side;
    log::debug!("side {} surrendered, side {} wins", side, winner);
    bus.push(BattleEvent::Surrendered { side });
    field.game_state = if winner == 0 {
        GameState::Trainer1Win
    } else {
        GameState::Trainer2Win
    };
    bus.push(BattleEvent::BattleEnded {
        winner: Some(winner),
    });
}

fn execute_switch(
    field: &mut Field,
    side: usize,
    team_index: usize,
    bus: &mut EventBus,
) -> BattleResult<()> {
    let trainer = &mut field.trainers[side];
    let old_creature = trainer.active().map(|active| active.name().to_string());
    trainer.switch_to(team_index)?;
    let new_creature = trainer
        .active()
        .map(|active| active.name().to_string())
        .ok_or(BattleEngineError::BattleState(BattleStateError::NoActiveCreature))?;

    log::debug!("side {} switched {:?} -> {}", side, old_creature, new_creature);
    bus.push(BattleEvent::CreatureSwitched {
        side,
        old_creature,
        new_creature,
    });
    Ok(())
}

/// Priority moves first, then higher speed, then the configured tie rule.
fn determine_attack_order(
    field: &Field,
    mut attacks: Vec<(usize, usize)>,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> Vec<(usize, usize)> {
    if attacks.len() < 2 {
        return attacks;
    }

    let standing = |side: usize, move_index: usize| -> (bool, u16) {
        field.active(side).map_or((false, 0), |active| {
            let priority = active
                .creature
                .moves
                .get(move_index)
                .is_some_and(MoveData::is_priority);
            (priority, active.ledger.get(StatType::Speed))
        })
    };
    let (first_side, first_move) = attacks[0];
    let (second_side, second_move) = attacks[1];
    let (first_priority, first_speed) = standing(first_side, first_move);
    let (second_priority, second_speed) = standing(second_side, second_move);

    let (second_goes_first, reason) = if first_priority != second_priority {
        (second_priority, OrderReason::Priority)
    } else if first_speed != second_speed {
        (second_speed > first_speed, OrderReason::Speed)
    } else {
        let flip = match field.config.speed_tie {
            SpeedTie::FirstSideFirst => false,
            SpeedTie::CoinFlip => rng.draw(0, 1, "Speed Tie") == 1,
        };
        (flip, OrderReason::SpeedTie)
    };
    if second_goes_first {
        attacks.swap(0, 1);
    }

    let leader = attacks[0].0;
    if let Some(active) = field.active(leader) {
        log::debug!("side {} acts first ({:?})", leader, reason);
        bus.push(BattleEvent::TurnOrderDecided {
            side: leader,
            creature: active.name().to_string(),
            reason,
        });
    }
    attacks
}

// --- ATTACK PIPELINE ---

/// One attacker's whole turn: gate, move, status tick, own flinch cleared.
fn execute_attack(
    field: &mut Field,
    side: usize,
    move_index: usize,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    let defender_side = 1 - side;
    if !field.active(side).is_some_and(|actor| !actor.is_fainted()) {
        return;
    }

    if field.active(defender_side).is_some_and(|target| !target.is_fainted()) {
        attempt_move(field, side, move_index, rng, bus);
    } else if let Some(actor) = field.active(side) {
        bus.push(BattleEvent::ActionFailed {
            creature: actor.name().to_string(),
            reason: ActionFailureReason::NoTarget,
        });
    }

    // Burn, poison and seed still tick when there was nothing to hit.
    apply_status_damage(field, side, bus);
    if let Some(actor) = field.active_mut(side) {
        if actor.status == Some(StatusCondition::Flinched) {
            actor.status = None;
        }
    }
}

/// Status gate, then the move itself or a confused self-hit.
fn attempt_move(
    field: &mut Field,
    side: usize,
    move_index: usize,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    let config = field.config.clone();
    let Some(actor) = field.active_mut(side) else {
        return;
    };
    let Some(move_data) = actor.creature.moves.get(move_index).cloned() else {
        return;
    };
    let creature = actor.name().to_string();

    match check_action_gate(actor, &config, rng, bus) {
        ActionGate::Blocked(reason) => {
            bus.push(BattleEvent::ActionFailed { creature, reason });
        }
        ActionGate::HitSelf => execute_self_hit(actor, rng, bus),
        ActionGate::Proceed => {
            bus.push(BattleEvent::MoveUsed {
                side,
                creature,
                move_name: move_data.name.clone(),
            });
            execute_move(field, side, move_data, 0, rng, bus);
        }
    }
}

/// Confusion: the actor hits itself with a typeless power-40 attack.
fn execute_self_hit(actor: &mut Combatant, rng: &mut TurnRng, bus: &mut EventBus) {
    let outcome = {
        let actor: &Combatant = actor;
        calculate_damage(actor, actor, &hit_itself(), rng)
    };
    let damage = actor.ledger.damage(outcome.damage);
    bus.push(BattleEvent::HitItself {
        creature: actor.name().to_string(),
        damage,
        remaining_hp: actor.ledger.hp(),
    });
}

/// Steps from "remember the move" to recoil. Redirecting effects re-enter
/// here with the chosen move, skipping the status gate.
fn execute_move(
    field: &mut Field,
    side: usize,
    move_data: MoveData,
    redirects: u8,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    let defender_side = 1 - side;
    let Some(actor) = field.active_mut(side) else {
        return;
    };
    actor.move_history.push(move_data.clone());
    let attacker_name = actor.name().to_string();

    let outcome = match (field.active(side), field.active(defender_side)) {
        (Some(attacker), Some(defender)) => calculate_damage(attacker, defender, &move_data, rng),
        _ => return,
    };
    if !outcome.move_hit {
        bus.push(BattleEvent::MoveMissed {
            attacker: attacker_name,
            move_name: move_data.name.clone(),
        });
        return;
    }
    if let Some(defender) = field.active(defender_side) {
        bus.push(BattleEvent::MoveHit {
            attacker: attacker_name.clone(),
            defender: defender.name().to_string(),
            move_name: move_data.name.clone(),
        });
    }

    if move_data.power > 0 {
        if outcome.is_critical && outcome.damage > 0 {
            bus.push(BattleEvent::CriticalHit {
                attacker: attacker_name.clone(),
            });
        }
        bus.push(BattleEvent::AttackTypeEffectiveness {
            effectiveness: outcome.effectiveness,
        });
    }
    // An immune target shrugs off the hit, but the user still pays for it.
    let immune = move_data.power > 0 && outcome.effectiveness == Effectiveness::Immune;

    let context = EffectContext::new(side, defender_side, move_data.clone());
    let mut damage = outcome.damage;
    for effect in &move_data.effects {
        if immune && !effect.lands_through_immunity() {
            continue;
        }
        match effect.apply(&context, field, damage, rng, bus) {
            EffectResult::Continue(adjusted) => damage = adjusted,
            EffectResult::Skip => return,
            EffectResult::Redirect(next_move) => {
                if redirects >= MAX_REDIRECTS {
                    bus.push(BattleEvent::ActionFailed {
                        creature: attacker_name,
                        reason: ActionFailureReason::MoveFailed,
                    });
                    return;
                }
                bus.push(BattleEvent::MoveUsed {
                    side,
                    creature: attacker_name,
                    move_name: next_move.name.clone(),
                });
                execute_move(field, side, next_move, redirects + 1, rng, bus);
                return;
            }
        }
    }

    let dealt = apply_damage(field, defender_side, damage, bus);

    if dealt > 0 && move_data.move_type == PokemonType::Fire {
        thaw(field, defender_side, bus);
    }

    move_data.apply_damage_based_effects(&context, field, dealt, bus);
}

/// Subtract `damage` from the defender, letting a substitute soak it first.
/// Returns what actually landed.
fn apply_damage(field: &mut Field, defender_side: usize, damage: u16, bus: &mut EventBus) -> u16 {
    if damage == 0 {
        return 0;
    }
    let Some(defender) = field.active_mut(defender_side) else {
        return 0;
    };
    let target = defender.name().to_string();

    if defender.has_substitute() {
        let absorbed = damage.min(defender.substitute_hp);
        defender.substitute_hp -= absorbed;
        bus.push(BattleEvent::SubstituteDamaged {
            target: target.clone(),
            damage: absorbed,
        });
        if defender.substitute_hp == 0 {
            bus.push(BattleEvent::SubstituteBroke { target });
        }
        return absorbed;
    }

    let lost = defender.ledger.damage(damage);
    bus.push(BattleEvent::DamageDealt {
        target,
        damage: lost,
        remaining_hp: defender.ledger.hp(),
    });
    lost
}

fn thaw(field: &mut Field, side: usize, bus: &mut EventBus) {
    if let Some(defender) = field.active_mut(side) {
        if defender.status == Some(StatusCondition::Frozen) {
            defender.status = None;
            bus.push(BattleEvent::StatusRemoved {
                target: defender.name().to_string(),
                status: StatusCondition::Frozen,
            });
        }
    }
}

// --- END OF TURN ---

/// Remove fainted actives, then decide between replacement, a winner or a draw.
fn run_faint_pass(field: &mut Field, bus: &mut EventBus) {
    let mut defeated = [false; 2];
    for (side, trainer) in field.trainers.iter_mut().enumerate() {
        if !trainer.active().is_some_and(Combatant::is_fainted) {
            continue;
        }
        if let Some(fainted) = trainer.remove_active() {
            log::debug!("side {}: {} fainted", side, fainted.name());
            bus.push(BattleEvent::CreatureFainted {
                side,
                creature: fainted.name().to_string(),
            });
        }
        defeated[side] = !trainer.has_creatures_left();
    }

    let winner = match defeated {
        [true, true] => {
            field.game_state = GameState::Draw;
            None
        }
        [true, false] => {
            field.game_state = GameState::Trainer2Win;
            Some(1)
        }
        [false, true] => {
            field.game_state = GameState::Trainer1Win;
            Some(0)
        }
        [false, false] => {
            field.refresh_game_state();
            for side in 0..2 {
                if field.trainers[side].needs_replacement() {
                    bus.push(BattleEvent::ReplacementRequired { side });
                }
            }
            return;
        }
    };

    for (side, lost) in defeated.iter().enumerate() {
        if *lost {
            bus.push(BattleEvent::TrainerDefeated { side });
        }
    }
    log::debug!("battle over, winner: {:?}", winner);
    bus.push(BattleEvent::BattleEnded { winner });
}

fn build_report(field: &Field, events: EventBus) -> TurnReport {
    let continue_battle = !field.game_state.is_over();
    let needs_switch = if continue_battle {
        [
            field.trainers[0].needs_replacement(),
            field.trainers[1].needs_replacement(),
        ]
    } else {
        [false, false]
    };
    TurnReport {
        continue_battle,
        messages: events.messages(field),
        needs_switch,
        winner: field.winner(),
        events,
    }
}
