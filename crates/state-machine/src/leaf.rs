//! Reusable leaf states.
//!
//! [`Wait`] holds the chain for a fixed duration (the deferred-timer
//! building block) and [`Once`] runs a closure and finishes immediately.

use crate::{State, Status};

/// Keeps the chain paused for a fixed number of seconds.
#[derive(Debug, Clone, Copy)]
pub struct Wait {
    duration: f32,
    elapsed: f32,
}

impl Wait {
    /// Creates a wait of `seconds`. Negative durations are treated as zero.
    pub fn new(seconds: f32) -> Self {
        Self {
            duration: seconds.max(0.0),
            elapsed: 0.0,
        }
    }

    /// Seconds spent in this state so far.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

impl<C> State<C> for Wait {
    fn on_update(&mut self, _ctx: &mut C, dt: f32) -> Status {
        self.elapsed += dt;
        Status::running_if(self.elapsed < self.duration)
    }

    fn name(&self) -> &'static str {
        "wait"
    }
}

/// Runs a closure when started, then finishes on the next update.
pub struct Once<F> {
    label: &'static str,
    action: Option<F>,
}

impl<F> Once<F> {
    /// Wraps `action` under a diagnostic `label`.
    pub fn new(label: &'static str, action: F) -> Self {
        Self {
            label,
            action: Some(action),
        }
    }
}

impl<C, F> State<C> for Once<F>
where
    F: FnOnce(&mut C),
{
    fn on_start(&mut self, ctx: &mut C) {
        if let Some(action) = self.action.take() {
            action(ctx);
        }
    }

    fn name(&self) -> &'static str {
        self.label
    }
}
