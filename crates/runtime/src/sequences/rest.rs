use state_machine::builder;

use super::BoxedState;
use crate::arena::Arena;

/// Pause, then pass the turn.
///
/// Hit points are restored when the rest is dispatched; this chain only
/// times the end of the turn.
pub fn rest_sequence(end_turn_delay: f32) -> Vec<BoxedState> {
    vec![
        builder::wait(end_turn_delay),
        builder::once("end_rest", |arena: &mut Arena| arena.end_turn()),
    ]
}
