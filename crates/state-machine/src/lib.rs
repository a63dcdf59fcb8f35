//! Lightweight state sequencer for frame-driven, multi-phase game actions.
//!
//! Where a turn-based rule completes instantly, its presentation usually does
//! not: an attack rotates, animates, waits for a projectile and only then
//! lands. This crate provides the single cooperative primitive used to spread
//! such work over successive frames.
//!
//! - **Delta time**: every tick receives the elapsed seconds since the last one
//! - **Running state**: a state keeps control until it reports [`Status::Finished`]
//! - **Single-use states**: states are consumed as the chain advances
//! - **Zero dependencies**: pure Rust with no external crates
//!
//! # Architecture
//!
//! - [`State`]: core trait implemented by every phase
//! - [`Status`]: Running or Finished
//! - [`StateMachine`]: owns the active state and the queue of follow-up states
//! - Leaf states: [`Wait`], [`Once`]

pub mod builder;
pub mod leaf;
pub mod machine;
pub mod state;
pub mod status;

// Re-export core types for ergonomic API
pub use leaf::{Once, Wait};
pub use machine::StateMachine;
pub use state::State;
pub use status::Status;
