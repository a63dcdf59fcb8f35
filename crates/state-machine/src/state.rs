//! Core state trait.
//!
//! This module defines the [`State`] trait, the fundamental abstraction for
//! every phase driven by a [`StateMachine`](crate::StateMachine). The trait
//! is generic over a context type `C`, through which states read and mutate
//! the simulation they belong to.

use crate::Status;

/// One phase of a multi-frame sequence.
pub trait State<C> {
    /// Called once when the state becomes active.
    fn on_start(&mut self, _ctx: &mut C) {}

    /// Called every frame while the state is active.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Mutable reference to the shared context.
    /// * `dt` - Seconds elapsed since the previous frame.
    ///
    /// # Returns
    ///
    /// - `Status::Running` to stay active
    /// - `Status::Finished` to end this state and advance
    fn on_update(&mut self, _ctx: &mut C, _dt: f32) -> Status {
        Status::Finished
    }

    /// Called once after the state reports `Finished`.
    fn on_end(&mut self, _ctx: &mut C) {}

    /// Short label used in diagnostics.
    fn name(&self) -> &'static str {
        "state"
    }
}

/// Blanket implementation for boxed states.
///
/// This allows `Box<dyn State<C>>` to also implement `State<C>`,
/// so chains can mix concrete and boxed states.
impl<C> State<C> for Box<dyn State<C>> {
    #[inline]
    fn on_start(&mut self, ctx: &mut C) {
        (**self).on_start(ctx)
    }

    #[inline]
    fn on_update(&mut self, ctx: &mut C, dt: f32) -> Status {
        (**self).on_update(ctx, dt)
    }

    #[inline]
    fn on_end(&mut self, ctx: &mut C) {
        (**self).on_end(ctx)
    }

    #[inline]
    fn name(&self) -> &'static str {
        (**self).name()
    }
}
