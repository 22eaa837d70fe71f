use crate::battle::conditions::StatusCondition;
use crate::combatant::Combatant;
use crate::config::BattleConfig;
use crate::errors::{BattleResult, BattleStateError};
use crate::trainer::Trainer;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use schema::{Effectiveness, MoveCategory, StatType};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Copy)]
pub enum GameState {
    WaitingForActions,
    WaitingForTrainer1Replacement, // Trainer 1 needs to send out a new creature after a faint
    WaitingForTrainer2Replacement, // Trainer 2 needs to send out a new creature after a faint
    WaitingForBothReplacements,    // Both trainers need to send out new creatures
    Trainer1Win,
    Trainer2Win,
    Draw,
}

impl GameState {
    pub fn is_over(&self) -> bool {
        matches!(
            self,
            GameState::Trainer1Win | GameState::Trainer2Win | GameState::Draw
        )
    }

    pub fn winner(&self) -> Option<usize> {
        match self {
            GameState::Trainer1Win => Some(0),
            GameState::Trainer2Win => Some(1),
            _ => None,
        }
    }
}

/// Why one attacker went before the other.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderReason {
    Priority,
    Speed,
    SpeedTie,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionFailureReason {
    IsAsleep,
    IsFrozen,
    IsParalyzed,
    IsFlinching,
    NoTarget, // The opposing creature fainted before this attack came up
    MoveFailed,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Turn Management
    TurnStarted {
        turn_number: u32,
    },
    TurnEnded,
    TurnOrderDecided {
        side: usize,
        creature: String,
        reason: OrderReason,
    },

    // Trainer Actions
    Surrendered {
        side: usize,
    },
    CreatureSwitched {
        side: usize,
        old_creature: Option<String>,
        new_creature: String,
    },

    // Attacks
    MoveUsed {
        side: usize,
        creature: String,
        move_name: String,
    },
    MoveMissed {
        attacker: String,
        move_name: String,
    },
    MoveHit {
        attacker: String,
        defender: String,
        move_name: String,
    },
    CriticalHit {
        attacker: String,
    },
    AttackTypeEffectiveness {
        effectiveness: Effectiveness,
    },
    DamageDealt {
        target: String,
        damage: u16,
        remaining_hp: u16,
    },
    MultiHit {
        hits: u8,
    },
    IsConfused {
        creature: String,
    },
    HitItself {
        creature: String,
        damage: u16,
        remaining_hp: u16,
    },
    ActionFailed {
        creature: String,
        reason: ActionFailureReason,
    },

    // Status Conditions
    StatusApplied {
        target: String,
        status: StatusCondition,
    },
    StatusRemoved {
        target: String,
        status: StatusCondition,
    },
    StatusDamage {
        target: String,
        status: StatusCondition,
        damage: u16,
        remaining_hp: u16,
    },

    // Stat Ledger
    StatChanged {
        target: String,
        stat: StatType,
        delta: i16,
        new_value: u16,
    },
    StatsReset,

    // HP Transfer
    CreatureHealed {
        target: String,
        amount: u16,
        new_hp: u16,
    },
    RecoilDamage {
        target: String,
        damage: u16,
        remaining_hp: u16,
    },
    SubstituteCreated {
        target: String,
        hp: u16,
    },
    SubstituteDamaged {
        target: String,
        damage: u16,
    },
    SubstituteBroke {
        target: String,
    },

    // Special Moves
    MoveLearned {
        creature: String,
        move_name: String,
    },
    Transformed {
        creature: String,
        into: String,
    },
    ScreenRaised {
        creature: String,
        category: MoveCategory,
    },
    FocusEnergy {
        creature: String,
    },
    Splashed,

    // Fainting and Battle End
    CreatureFainted {
        side: usize,
        creature: String,
    },
    ReplacementRequired {
        side: usize,
    },
    TrainerDefeated {
        side: usize,
    },
    BattleEnded {
        winner: Option<usize>,
    },
}

impl BattleEvent {
    /// Formats the event into a human-readable string using battle context.
    /// Returns None for silent events that should not produce user-visible text.
    pub fn format(&self, field: &Field) -> Option<String> {
        let trainer = |side: &usize| field.trainer_name(*side);

        match self {
            // === Turn Management Events ===
            BattleEvent::TurnStarted { turn_number } => {
                Some(format!("=== Turn {} ===", turn_number))
            }
            BattleEvent::TurnEnded => None,
            BattleEvent::TurnOrderDecided {
                creature, reason, ..
            } => match reason {
                OrderReason::Priority => Some(format!("{} moves first!", creature)),
                OrderReason::Speed | OrderReason::SpeedTie => {
                    Some(format!("{} is faster!", creature))
                }
            },

            // === Trainer Action Events ===
            BattleEvent::Surrendered { side } => Some(format!("{} surrendered!", trainer(side))),
            BattleEvent::CreatureSwitched {
                side, new_creature, ..
            } => Some(format!("{} sent out {}!", trainer(side), new_creature)),

            // === Attack Events ===
            BattleEvent::MoveUsed {
                creature,
                move_name,
                ..
            } => Some(format!("{} used {}!", creature, move_name)),
            BattleEvent::MoveMissed { attacker, .. } => {
                Some(format!("{}'s attack missed!", attacker))
            }
            BattleEvent::MoveHit { .. } => None,
            BattleEvent::CriticalHit { .. } => Some("A critical hit!".to_string()),
            BattleEvent::AttackTypeEffectiveness { effectiveness } => {
                effectiveness.message().map(str::to_string)
            }
            BattleEvent::DamageDealt { target, damage, .. } => {
                Some(format!("{} took {} damage!", target, damage))
            }
            BattleEvent::MultiHit { hits } => Some(if *hits == 1 {
                "Hit 1 time!".to_string()
            } else {
                format!("Hit {} times!", hits)
            }),
            BattleEvent::IsConfused { creature } => Some(format!("{} is confused!", creature)),
            BattleEvent::HitItself {
                creature, damage, ..
            } => Some(format!(
                "{} hurt itself in its confusion! ({} damage)",
                creature, damage
            )),
            BattleEvent::ActionFailed { creature, reason } => {
                Some(Self::format_action_failure(creature, reason))
            }

            // === Status Events ===
            BattleEvent::StatusApplied { target, status } => {
                Some(format!("{} {}", target, Self::format_status_applied(status)))
            }
            BattleEvent::StatusRemoved { target, status } => {
                Some(format!("{} {}", target, Self::format_status_removed(status)))
            }
            BattleEvent::StatusDamage {
                target,
                status,
                damage,
                ..
            } => Some(format!(
                "{} is hurt by its {}! ({} damage)",
                target,
                Self::format_status(status),
                damage
            )),

            // === Stat Events ===
            BattleEvent::StatChanged {
                target,
                stat,
                delta,
                ..
            } => {
                let direction = if *delta > 0 { "rose" } else { "fell" };
                let degree = if delta.abs() >= 2 { " sharply" } else { "" };
                Some(format!("{}'s {} {}{}!", target, stat, direction, degree))
            }
            BattleEvent::StatsReset => Some("All stat changes were eliminated!".to_string()),

            // === HP Transfer Events ===
            BattleEvent::CreatureHealed { target, amount, .. } => {
                Some(format!("{} recovered {} HP!", target, amount))
            }
            BattleEvent::RecoilDamage { target, damage, .. } => {
                Some(format!("{} is hit with recoil! ({} damage)", target, damage))
            }
            BattleEvent::SubstituteCreated { target, .. } => {
                Some(format!("{} put in a substitute!", target))
            }
            BattleEvent::SubstituteDamaged { target, .. } => {
                Some(format!("The substitute took damage for {}!", target))
            }
            BattleEvent::SubstituteBroke { target } => {
                Some(format!("{}'s substitute faded!", target))
            }

            // === Special Move Events ===
            BattleEvent::MoveLearned {
                creature,
                move_name,
            } => Some(format!("{} learned {}!", creature, move_name)),
            BattleEvent::Transformed { creature, into } => {
                Some(format!("{} transformed into {}!", creature, into))
            }
            BattleEvent::ScreenRaised { creature, category } => Some(format!(
                "{} is protected against {} attacks!",
                creature,
                category.to_string().to_lowercase()
            )),
            BattleEvent::FocusEnergy { creature } => {
                Some(format!("{} is getting pumped!", creature))
            }
            BattleEvent::Splashed => Some("But nothing happened!".to_string()),

            // === Battle End Events ===
            BattleEvent::CreatureFainted { creature, .. } => {
                Some(format!("{} was defeated!", creature))
            }
            BattleEvent::ReplacementRequired { side } => Some(format!(
                "{} must choose another Pokémon!",
                trainer(side)
            )),
            BattleEvent::TrainerDefeated { side } => {
                Some(format!("{} has no Pokémon left!", trainer(side)))
            }
            BattleEvent::BattleEnded { winner } => match winner {
                Some(side) => Some(format!("{} won the battle!", trainer(side))),
                None => Some("The battle ended in a draw!".to_string()),
            },
        }
    }

    // --- Private Helper Functions ---

    fn format_action_failure(creature: &str, reason: &ActionFailureReason) -> String {
        match reason {
            ActionFailureReason::IsAsleep => format!("{} is fast asleep.", creature),
            ActionFailureReason::IsFrozen => format!("{} is frozen solid!", creature),
            ActionFailureReason::IsParalyzed => format!("{} is fully paralyzed!", creature),
            ActionFailureReason::IsFlinching => {
                format!("{} flinched and couldn't move!", creature)
            }
            ActionFailureReason::NoTarget => "But there was no target...".to_string(),
            ActionFailureReason::MoveFailed => "But it failed!".to_string(),
        }
    }

    fn format_status(status: &StatusCondition) -> &'static str {
        match status {
            StatusCondition::Paralyzed => "paralysis",
            StatusCondition::Burned => "burn",
            StatusCondition::Poisoned => "poison",
            StatusCondition::Asleep(_) => "sleep",
            StatusCondition::Frozen => "freeze",
            StatusCondition::Confused(_) => "confusion",
            StatusCondition::Seeded => "leech seed",
            StatusCondition::Flinched => "flinch",
        }
    }

    fn format_status_applied(status: &StatusCondition) -> String {
        match status {
            StatusCondition::Paralyzed => "is paralyzed! It may be unable to move!".to_string(),
            StatusCondition::Burned => "was burned!".to_string(),
            StatusCondition::Poisoned => "was poisoned!".to_string(),
            StatusCondition::Asleep(_) => "fell asleep!".to_string(),
            StatusCondition::Frozen => "was frozen solid!".to_string(),
            StatusCondition::Confused(_) => "became confused!".to_string(),
            StatusCondition::Seeded => "was seeded!".to_string(),
            StatusCondition::Flinched => "flinched!".to_string(),
        }
    }

    fn format_status_removed(status: &StatusCondition) -> String {
        match status {
            StatusCondition::Asleep(_) => "woke up!".to_string(),
            StatusCondition::Frozen => "thawed out!".to_string(),
            StatusCondition::Confused(_) => "snapped out of its confusion!".to_string(),
            _ => format!("was cured of its {}!", Self::format_status(status)),
        }
    }
}

/// Event bus for collecting and managing battle events.
///
/// ```rust,ignore
/// event_bus.print_debug();                               // Just print events
/// event_bus.print_debug_with_message("Turn 1 events:");  // With header message
/// let lines = event_bus.messages(&field);                // Player-facing text
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Print all events in debug format with indentation.
    pub fn print_debug(&self) {
        for event in &self.events {
            println!("  {:?}", event);
        }
    }

    /// Print all events in debug format with a custom prefix message.
    pub fn print_debug_with_message(&self, message: &str) {
        println!("{}", message);
        self.print_debug();
    }

    /// The formatted text of every non-silent event, in order.
    pub fn messages(&self, field: &Field) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|event| event.format(field))
            .collect()
    }

    /// Return true if the event bus contains no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Return the number of events in the bus.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl std::fmt::Display for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum RngSource {
    Seeded(StdRng),
    Scripted { outcomes: Vec<u16>, index: usize },
}

/// The one random source a battle draws from.
///
/// Every draw names its reason, which shows up in trace logs and in the
/// panic message when a scripted source runs dry.
#[derive(Debug, Clone)]
pub struct TurnRng {
    source: RngSource,
}

impl TurnRng {
    /// Reproducible stream: the same seed and inputs give the same battle.
    pub fn seeded(seed: u64) -> Self {
        Self {
            source: RngSource::Seeded(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn new_random() -> Self {
        Self {
            source: RngSource::Seeded(StdRng::from_os_rng()),
        }
    }

    /// Scripted outcomes, consumed in order. Each value is clamped into the
    /// range the draw asks for, so `0` is always "lowest" and `u16::MAX`
    /// always "highest".
    pub fn new_for_test(outcomes: Vec<u16>) -> Self {
        Self {
            source: RngSource::Scripted { outcomes, index: 0 },
        }
    }

    /// Draw a value in `lo..=hi`.
    ///
    /// # Panics
    /// A scripted source panics once its outcomes are exhausted.
    pub fn draw(&mut self, lo: u16, hi: u16, reason: &str) -> u16 {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        let outcome = match &mut self.source {
            RngSource::Seeded(rng) => rng.random_range(lo..=hi),
            RngSource::Scripted { outcomes, index } => {
                let Some(raw) = outcomes.get(*index).copied() else {
                    panic!(
                        "TurnRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                        reason
                    );
                };
                *index += 1;

                #[cfg(test)]
                println!("[RNG] Consumed {} for: {}", raw, reason);

                raw.clamp(lo, hi)
            }
        };
        log::trace!("rng {}..={} -> {} for {}", lo, hi, outcome, reason);
        outcome
    }

    /// Roll 1..=100.
    pub fn roll_percent(&mut self, reason: &str) -> u16 {
        self.draw(1, 100, reason)
    }

    /// True with `percent` percent probability.
    pub fn chance(&mut self, percent: u8, reason: &str) -> bool {
        self.roll_percent(reason) <= u16::from(percent)
    }

    /// Uniform index into a non-empty collection of `len` items.
    pub fn pick_index(&mut self, len: usize, reason: &str) -> usize {
        let hi = u16::try_from(len.saturating_sub(1)).unwrap_or(u16::MAX);
        usize::from(self.draw(0, hi, reason))
    }
}

/// Everything one battle owns: both sides, the turn counter and the rules.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub trainers: [Trainer; 2],
    pub turn_number: u32,
    pub game_state: GameState,
    pub config: BattleConfig,
}

impl Field {
    pub fn new(trainer1: Trainer, trainer2: Trainer) -> Self {
        Self::with_config(trainer1, trainer2, BattleConfig::default())
    }

    pub fn with_config(trainer1: Trainer, trainer2: Trainer, config: BattleConfig) -> Self {
        Self {
            trainers: [trainer1, trainer2],
            turn_number: 0,
            game_state: GameState::WaitingForActions,
            config,
        }
    }

    pub fn trainer_name(&self, side: usize) -> &str {
        self.trainers
            .get(side)
            .map(|trainer| trainer.trainer_name.as_str())
            .unwrap_or("Unknown trainer")
    }

    pub fn active(&self, side: usize) -> Option<&Combatant> {
        self.trainers.get(side).and_then(Trainer::active)
    }

    pub fn active_mut(&mut self, side: usize) -> Option<&mut Combatant> {
        self.trainers.get_mut(side).and_then(Trainer::active_mut)
    }

    /// Both active creatures at once, the `attacker_side` one first.
    pub fn active_pair_mut(
        &mut self,
        attacker_side: usize,
    ) -> Option<(&mut Combatant, &mut Combatant)> {
        let [first, second] = &mut self.trainers;
        let (attacker, defender) = match attacker_side {
            0 => (first, second),
            1 => (second, first),
            _ => return None,
        };
        Some((attacker.active_mut()?, defender.active_mut()?))
    }

    pub fn winner(&self) -> Option<usize> {
        self.game_state.winner()
    }

    /// Fill a slot emptied by a faint. Validated like a switch.
    pub fn replace_active(&mut self, side: usize, team_index: usize) -> BattleResult<()> {
        if self.game_state.is_over() {
            return Err(BattleStateError::BattleOver.into());
        }
        let trainer = self
            .trainers
            .get_mut(side)
            .ok_or(BattleStateError::InvalidSideIndex(side))?;
        if !trainer.needs_replacement() {
            return Err(BattleStateError::NoReplacementPending(side).into());
        }
        trainer.switch_to(team_index)?;

        log::debug!("side {} replaced its active creature with #{}", side, team_index);
        self.refresh_game_state();
        Ok(())
    }

    /// Spend one PP of the active creature's move on `side`.
    pub fn use_pp(&mut self, side: usize, move_index: usize) -> BattleResult<u8> {
        let trainer = self
            .trainers
            .get_mut(side)
            .ok_or(BattleStateError::InvalidSideIndex(side))?;
        let active = trainer
            .active_mut()
            .ok_or(BattleStateError::ReplacementPending(side))?;
        Ok(active.creature.use_pp(move_index)?)
    }

    /// Recompute the waiting state from which slots are still empty.
    pub(crate) fn refresh_game_state(&mut self) {
        if self.game_state.is_over() {
            return;
        }
        self.game_state = match (
            self.trainers[0].needs_replacement(),
            self.trainers[1].needs_replacement(),
        ) {
            (true, true) => GameState::WaitingForBothReplacements,
            (true, false) => GameState::WaitingForTrainer1Replacement,
            (false, true) => GameState::WaitingForTrainer2Replacement,
            (false, false) => GameState::WaitingForActions,
        };
    }
}
