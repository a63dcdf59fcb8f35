//! Errors surfaced when a command cannot be executed.
//!
//! Rejections leave the simulation untouched; the issuing controller decides
//! what to do next. Broken invariants are not reported here, they panic.

use game_core::{ErrorSeverity, FactionId, GameError, ScenarioError, TileId, UnitId};

pub type Result<T> = std::result::Result<T, CommandError>;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("the game is over")]
    GameOver,

    #[error("another action is still in flight")]
    ActionInFlight,

    #[error("{unit} does not exist")]
    UnknownUnit { unit: UnitId },

    #[error("{unit} belongs to {faction}, which is not acting")]
    NotActingFaction { unit: UnitId, faction: FactionId },

    #[error("{unit} is not standing on a tile")]
    NotPlaced { unit: UnitId },

    #[error("{tile} is not on the board")]
    UnknownTile { tile: TileId },

    #[error("{tile} is occupied")]
    Occupied { tile: TileId },

    #[error("{tile} is out of reach for {unit}")]
    OutOfReach { unit: UnitId, tile: TileId },

    #[error("{target} is not hostile to {attacker}")]
    TargetNotHostile { attacker: UnitId, target: UnitId },

    #[error("{target} is out of {attacker}'s attack range")]
    TargetOutOfRange { attacker: UnitId, target: UnitId },
}

impl GameError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            CommandError::GameOver => ErrorSeverity::Fatal,
            CommandError::ActionInFlight
            | CommandError::Occupied { .. }
            | CommandError::OutOfReach { .. }
            | CommandError::TargetOutOfRange { .. } => ErrorSeverity::Recoverable,
            CommandError::UnknownUnit { .. }
            | CommandError::NotActingFaction { .. }
            | CommandError::NotPlaced { .. }
            | CommandError::UnknownTile { .. }
            | CommandError::TargetNotHostile { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            CommandError::GameOver => "COMMAND_GAME_OVER",
            CommandError::ActionInFlight => "COMMAND_ACTION_IN_FLIGHT",
            CommandError::UnknownUnit { .. } => "COMMAND_UNKNOWN_UNIT",
            CommandError::NotActingFaction { .. } => "COMMAND_NOT_ACTING_FACTION",
            CommandError::NotPlaced { .. } => "COMMAND_NOT_PLACED",
            CommandError::UnknownTile { .. } => "COMMAND_UNKNOWN_TILE",
            CommandError::Occupied { .. } => "COMMAND_OCCUPIED",
            CommandError::OutOfReach { .. } => "COMMAND_OUT_OF_REACH",
            CommandError::TargetNotHostile { .. } => "COMMAND_TARGET_NOT_HOSTILE",
            CommandError::TargetOutOfRange { .. } => "COMMAND_TARGET_OUT_OF_RANGE",
        }
    }
}

/// Failures while setting up or driving a [`Simulation`](crate::Simulation).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum RuntimeError {
    #[error("invalid scenario: {0}")]
    Scenario(#[from] ScenarioError),

    #[error("command rejected: {0}")]
    Command(#[from] CommandError),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Scenario(err) => err.severity(),
            RuntimeError::Command(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::Scenario(err) => err.error_code(),
            RuntimeError::Command(err) => err.error_code(),
        }
    }
}
