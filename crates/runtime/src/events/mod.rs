//! Topic-based event bus for simulation events.
//!
//! The simulation collects [`GameEvent`]s while it advances and publishes
//! them once per frame; hosts subscribe to the [`Topic`]s they render.

mod bus;
mod types;

pub use bus::{EventBus, Topic};
pub use types::GameEvent;
