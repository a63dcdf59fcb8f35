//! Status returned by state updates.

/// The result of updating a state for one frame.
///
/// # Frame-driven Semantics
///
/// A state that waits on an animation, timer or projectile returns
/// `Running` on every frame until the awaited work completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The state needs more frames.
    Running,

    /// The state completed; the machine ends it and advances.
    Finished,
}

impl Status {
    /// Returns `true` if this status is `Running`.
    #[inline]
    pub fn is_running(self) -> bool {
        matches!(self, Status::Running)
    }

    /// Returns `true` if this status is `Finished`.
    #[inline]
    pub fn is_finished(self) -> bool {
        matches!(self, Status::Finished)
    }

    /// Maps a "keep going" flag onto a status.
    ///
    /// `true` becomes `Running`, `false` becomes `Finished`.
    #[inline]
    pub fn running_if(keep_going: bool) -> Self {
        if keep_going {
            Status::Running
        } else {
            Status::Finished
        }
    }
}
