//! Command values issued by controllers.
//!
//! Human input and the AI both express intent as a [`Command`]; the runtime
//! dispatcher validates and executes it. Commands are plain data so a future
//! transport could ship them as-is.

use crate::grid::TileId;
use crate::unit::UnitId;

/// Walk a unit to a destination tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveCommand {
    pub unit: UnitId,
    pub destination: TileId,
}

impl MoveCommand {
    pub fn new(unit: UnitId, destination: TileId) -> Self {
        Self { unit, destination }
    }
}

/// Strike a hostile unit. Ends the acting faction's turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackCommand {
    pub attacker: UnitId,
    pub target: UnitId,
}

impl AttackCommand {
    pub fn new(attacker: UnitId, target: UnitId) -> Self {
        Self { attacker, target }
    }
}

/// Recover hit points. Ends the acting faction's turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RestCommand {
    pub unit: UnitId,
}

impl RestCommand {
    pub fn new(unit: UnitId) -> Self {
        Self { unit }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    Move(MoveCommand),
    Attack(AttackCommand),
    Rest(RestCommand),
}

impl Command {
    /// The unit performing the command.
    pub fn actor(&self) -> UnitId {
        match self {
            Command::Move(command) => command.unit,
            Command::Attack(command) => command.attacker,
            Command::Rest(command) => command.unit,
        }
    }

    /// Whether completing this command hands the turn to the next faction.
    pub fn ends_turn(&self) -> bool {
        !matches!(self, Command::Move(_))
    }

    pub fn as_snake_case(&self) -> &'static str {
        match self {
            Command::Move(_) => "move",
            Command::Attack(_) => "attack",
            Command::Rest(_) => "rest",
        }
    }
}

impl From<MoveCommand> for Command {
    fn from(command: MoveCommand) -> Self {
        Command::Move(command)
    }
}

impl From<AttackCommand> for Command {
    fn from(command: AttackCommand) -> Self {
        Command::Attack(command)
    }
}

impl From<RestCommand> for Command {
    fn from(command: RestCommand) -> Self {
        Command::Rest(command)
    }
}
