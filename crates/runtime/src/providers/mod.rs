//! Controllers that turn a faction's turn into commands.
//!
//! Each faction is driven by exactly one [`Controller`]: a human relay fed by
//! selection input, or the AI polled whenever the action gate is open.

pub mod ai;
pub mod player;

pub use ai::{AiAction, AiController, ThreatMap};
pub use player::{ActionChoice, PlayerController, PlayerMode, TargetMode};

use rand::RngCore;

use game_core::{Command, FactionId, World};

use crate::arena::Arena;

#[derive(Clone, Debug)]
pub enum Controller {
    Human(PlayerController),
    Computer(AiController),
}

impl Controller {
    pub fn faction(&self) -> FactionId {
        match self {
            Controller::Human(player) => player.faction(),
            Controller::Computer(ai) => ai.faction(),
        }
    }

    pub fn is_human(&self) -> bool {
        matches!(self, Controller::Human(_))
    }

    pub fn on_turn_changed(&mut self, world: &World, faction: FactionId, rng: &mut dyn RngCore) {
        match self {
            Controller::Human(player) => player.on_turn_changed(faction),
            Controller::Computer(ai) => ai.on_turn_changed(world, faction, rng),
        }
    }

    /// Commands the controller issues on its own. Humans only act on input.
    pub fn poll(&mut self, arena: &Arena, rng: &mut dyn RngCore) -> Option<Command> {
        match self {
            Controller::Human(_) => None,
            Controller::Computer(ai) => ai.poll(arena, rng),
        }
    }
}
