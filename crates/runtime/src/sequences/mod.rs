//! Multi-frame sequences that play out committed commands.
//!
//! Each builder returns the chain of states the action [`StateMachine`]
//! runs against the [`Arena`]. Rules effects happen at fixed points in the
//! chain: the hit lands inside [`ResolveAttack`], occupancy is restored at
//! the end of [`FollowPath`], the turn passes in [`EndAttack`] or at the end
//! of a rest.
//!
//! [`StateMachine`]: state_machine::StateMachine

mod attack;
mod movement;
mod rest;

pub use attack::{EndAttack, ResolveAttack, RotateTowardsTarget, StartAttack, attack_sequence};
pub use movement::{FollowPath, move_sequence};
pub use rest::rest_sequence;

use state_machine::State;

use crate::arena::Arena;

pub type BoxedState = Box<dyn State<Arena>>;
