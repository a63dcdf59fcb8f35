//! Frame-driven runtime for the tactics engine.
//!
//! `game-core` decides what is legal and what an attack does; this crate
//! decides *when* things happen. Committed commands become chains of timed
//! states that play out over successive [`Simulation::tick`] calls, while a
//! single action gate keeps at most one of them in flight.
//!
//! Modules are organized by responsibility:
//! - [`simulation`] hosts the frame loop and owns everything below
//! - [`dispatch`] validates commands and starts their sequences
//! - [`sequences`] holds the move, attack and rest state chains
//! - [`providers`] turns faction turns into commands (human relay and AI)
//! - [`events`] provides the topic-based event bus hosts subscribe to
//! - [`animation`], [`projectile`] and [`popups`] carry presentation state
pub mod animation;
pub mod arena;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod popups;
pub mod projectile;
pub mod providers;
pub mod sequences;
pub mod simulation;

pub use animation::{PathTween, Pose, RotateTween, Tween};
pub use arena::Arena;
pub use config::{AiWeights, RuntimeConfig, TimingConfig};
pub use dispatch::CommandDispatcher;
pub use error::{CommandError, Result, RuntimeError};
pub use events::{EventBus, GameEvent, Topic};
pub use popups::{FloatingText, PopupQueue};
pub use projectile::{ArrowProjectile, Projectile};
pub use providers::{
    ActionChoice, AiAction, AiController, Controller, PlayerController, PlayerMode, TargetMode,
    ThreatMap,
};
pub use simulation::Simulation;
