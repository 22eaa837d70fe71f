use thiserror::Error;

/// Main error type for the combat engine.
///
/// Misses, status blocks and zero-damage moves are not errors; they come back
/// as events in the turn report. Everything here means the caller asked for
/// something the battle cannot do, or the battle itself is broken.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleEngineError {
    #[error("Move data error: {0}")]
    MoveData(#[from] MoveDataError),
    #[error("Creature error: {0}")]
    Creature(#[from] CreatureError),
    #[error("Battle state error: {0}")]
    BattleState(#[from] BattleStateError),
    #[error("Action error: {0}")]
    Action(#[from] ActionError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors related to move data operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveDataError {
    /// The specified move was not found in the catalogue
    #[error("Move not found: {0}")]
    MoveNotFound(String),
    /// Catalogue text could not be read or parsed
    #[error("Malformed move data: {0}")]
    MalformedData(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreatureError {
    #[error("{name} already knows {max} moves")]
    MoveSetFull { name: String, max: usize },
}

/// Errors related to battle state validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleStateError {
    /// Neither side has an active creature. The lifecycle must always
    /// guarantee a replacement before a turn resumes.
    #[error("No active creature on either side")]
    NoActiveCreature,
    #[error("Invalid side index: {0}")]
    InvalidSideIndex(usize),
    /// A side lost its active creature and has not picked a replacement yet
    #[error("Side {0} must choose a replacement before the next turn")]
    ReplacementPending(usize),
    #[error("No replacement is pending for side {0}")]
    NoReplacementPending(usize),
    #[error("The battle is already over")]
    BattleOver,
}

/// Errors related to trainer actions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Move index is out of bounds for the active creature
    #[error("Invalid move index: {0}")]
    InvalidMoveIndex(usize),
    #[error("{0} has no PP left")]
    NoPpRemaining(String),
    /// Team index is out of bounds
    #[error("Invalid creature index: {0}")]
    InvalidCreatureIndex(usize),
    #[error("Creature {0} is already in battle")]
    AlreadyActive(usize),
    #[error("Creature {0} has fainted")]
    CreatureFainted(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Could not read {path}: {message}")]
    Io { path: String, message: String },
    #[error("Could not parse battle config: {0}")]
    Parse(String),
}

/// Type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Type alias for Results using MoveDataError
pub type MoveDataResult<T> = Result<T, MoveDataError>;
