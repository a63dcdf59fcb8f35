//! The sequencer that drives a chain of states frame by frame.
//!
//! A [`StateMachine`] holds at most one active state plus a queue of states
//! that follow it. Each state's successor is simply the next entry in the
//! queue, so chains can be declared up front ([`StateMachine::start`]) or
//! grown while running ([`StateMachine::push`]).

use std::collections::VecDeque;

use crate::{State, Status};

type BoxedState<C> = Box<dyn State<C>>;
type Completion<C> = Box<dyn FnOnce(&mut C)>;

/// Runs a chain of single-use states against a shared context.
///
/// # Semantics
///
/// - The first state's `on_start` runs as soon as the chain is started
/// - Each [`tick`](Self::tick) calls `on_update` on the active state
/// - When it returns `Finished`, `on_end` fires and the next queued state
///   starts in the same tick (its first update happens on the next tick)
/// - When the queue is exhausted the machine becomes idle and the optional
///   completion callback fires exactly once
pub struct StateMachine<C> {
    current: Option<BoxedState<C>>,
    pending: VecDeque<BoxedState<C>>,
    on_complete: Option<Completion<C>>,
}

impl<C> StateMachine<C> {
    /// Creates an idle machine.
    pub fn new() -> Self {
        Self {
            current: None,
            pending: VecDeque::new(),
            on_complete: None,
        }
    }

    /// Returns `true` when no state is active.
    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    /// Name of the active state, if any.
    pub fn current_name(&self) -> Option<&'static str> {
        self.current.as_ref().map(|state| state.name())
    }

    /// Number of states waiting behind the active one.
    pub fn queued(&self) -> usize {
        self.pending.len()
    }

    /// Starts a new chain of states.
    ///
    /// # Panics
    ///
    /// Panics if `states` is empty or if the machine is already running a
    /// chain. Starting over a running chain would silently drop its pending
    /// `on_end` calls and likely indicates a programming error.
    pub fn start(&mut self, ctx: &mut C, states: Vec<BoxedState<C>>) {
        assert!(!states.is_empty(), "StateMachine chain must have at least one state");
        assert!(
            self.current.is_none(),
            "StateMachine already running '{}'",
            self.current_name().unwrap_or("state")
        );

        self.pending.extend(states);
        self.advance(ctx);
    }

    /// Appends a state to the end of the chain.
    ///
    /// If the machine is idle the state starts immediately.
    pub fn push(&mut self, ctx: &mut C, state: BoxedState<C>) {
        self.pending.push_back(state);
        if self.current.is_none() {
            self.advance(ctx);
        }
    }

    /// Registers a callback fired once when the current chain is exhausted.
    ///
    /// Replaces any previously registered callback.
    pub fn on_complete(&mut self, callback: impl FnOnce(&mut C) + 'static) {
        self.on_complete = Some(Box::new(callback));
    }

    /// Advances the active state by `dt` seconds.
    ///
    /// Returns `Running` while any state remains active after this tick.
    pub fn tick(&mut self, ctx: &mut C, dt: f32) -> Status {
        let Some(state) = self.current.as_mut() else {
            return Status::Finished;
        };

        if state.on_update(ctx, dt).is_running() {
            return Status::Running;
        }

        if let Some(mut finished) = self.current.take() {
            finished.on_end(ctx);
        }

        self.advance(ctx);
        Status::running_if(self.current.is_some())
    }

    fn advance(&mut self, ctx: &mut C) {
        match self.pending.pop_front() {
            Some(mut next) => {
                next.on_start(ctx);
                self.current = Some(next);
            }
            None => {
                if let Some(callback) = self.on_complete.take() {
                    callback(ctx);
                }
            }
        }
    }
}

impl<C> Default for StateMachine<C> {
    fn default() -> Self {
        Self::new()
    }
}
