//! Builder utilities for ergonomic chain construction.
//!
//! Instead of writing `Box::new(Wait::new(0.5))` inside every chain, you can
//! use shorter functions like `wait(0.5)`.

use crate::{Once, State, Wait};

/// Creates a boxed wait state.
///
/// Shorthand for `Box::new(Wait::new(seconds))`.
#[inline]
pub fn wait<C>(seconds: f32) -> Box<dyn State<C>> {
    Box::new(Wait::new(seconds))
}

/// Creates a boxed one-shot state.
///
/// Shorthand for `Box::new(Once::new(label, action))`.
#[inline]
pub fn once<C, F>(label: &'static str, action: F) -> Box<dyn State<C>>
where
    F: FnOnce(&mut C) + 'static,
{
    Box::new(Once::new(label, action))
}

/// Boxes any concrete state.
#[inline]
pub fn boxed<C, S>(state: S) -> Box<dyn State<C>>
where
    S: State<C> + 'static,
{
    Box::new(state)
}
