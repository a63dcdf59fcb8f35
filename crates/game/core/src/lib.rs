//! Deterministic rules of the tactics engine.
//!
//! `game-core` owns the tile graph and its range/path queries, units and
//! factions, combat resolution and turn bookkeeping. It has no clock and no
//! I/O: the runtime drives it frame by frame and turns its results into
//! timed sequences and events.
pub mod combat;
pub mod command;
pub mod config;
pub mod error;
pub mod faction;
pub mod grid;
pub mod scenario;
pub mod turn;
pub mod unit;
pub mod world;

pub use combat::{AttackInstance, DamageBonusTable, HitOutcome};
pub use command::{AttackCommand, Command, MoveCommand, RestCommand};
pub use config::GameConfig;
pub use error::{ErrorSeverity, GameError};
pub use faction::{Faction, FactionId};
pub use grid::{Grid, GridError, Tile, TileCoord, TileId, Traversal};
pub use scenario::{BonusEntry, FactionSpec, Scenario, ScenarioError, UnitSpec};
pub use turn::{GameOver, TurnChange, TurnOrchestrator, TurnOutcome};
pub use unit::{AttackDelivery, ProjectileKind, Unit, UnitId, UnitProfile, UnitType};
pub use world::World;
