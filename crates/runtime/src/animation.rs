//! Timed transitions for unit poses.
//!
//! Hosts render from [`Pose`]s; the sequences in [`crate::sequences`] drive
//! them with the tweens below instead of relying on a scene-graph tween
//! facility.

use std::f32::consts::PI;

use glam::Vec2;

/// Where a unit stands on the horizontal plane and which way it faces.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Pose {
    /// World (x, z) position.
    pub position: Vec2,
    /// Heading in radians, 0 facing +z.
    pub yaw: f32,
}

impl Pose {
    pub fn new(position: Vec2) -> Self {
        Self { position, yaw: 0.0 }
    }

    /// Heading that faces `target` from this pose. Keeps the current yaw
    /// when both points coincide.
    pub fn yaw_towards(&self, target: Vec2) -> f32 {
        let offset = target - self.position;
        if offset.length_squared() <= f32::EPSILON {
            return self.yaw;
        }
        offset.x.atan2(offset.y)
    }
}

/// Linear progress over a fixed duration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    duration: f32,
    elapsed: f32,
}

impl Tween {
    pub fn new(duration: f32) -> Self {
        Self {
            duration: duration.max(0.0),
            elapsed: 0.0,
        }
    }

    /// Advances by `dt` seconds and returns progress in `[0, 1]`.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.progress()
    }

    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }
}

/// Smallest signed rotation from `from` to `to`, in `(-PI, PI]`.
pub fn angle_delta(from: f32, to: f32) -> f32 {
    let mut delta = (to - from) % (2.0 * PI);
    if delta > PI {
        delta -= 2.0 * PI;
    } else if delta <= -PI {
        delta += 2.0 * PI;
    }
    delta
}

/// Turns a heading toward a target heading over a fixed duration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotateTween {
    from: f32,
    delta: f32,
    tween: Tween,
}

impl RotateTween {
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            delta: angle_delta(from, to),
            tween: Tween::new(duration),
        }
    }

    /// Advances and returns the current heading.
    pub fn advance(&mut self, dt: f32) -> f32 {
        let t = self.tween.advance(dt);
        self.from + self.delta * t
    }

    pub fn is_finished(&self) -> bool {
        self.tween.is_finished()
    }
}

/// Moves along a polyline of waypoints at constant speed per segment.
#[derive(Clone, Debug, PartialEq)]
pub struct PathTween {
    waypoints: Vec<Vec2>,
    tween: Tween,
}

impl PathTween {
    /// `waypoints` includes the starting point.
    pub fn new(waypoints: Vec<Vec2>, duration: f32) -> Self {
        Self {
            waypoints,
            tween: Tween::new(duration),
        }
    }

    /// Advances and returns the current position and the heading of the
    /// active segment.
    pub fn advance(&mut self, dt: f32) -> Option<(Vec2, Vec2)> {
        let t = self.tween.advance(dt);
        self.sample(t)
    }

    pub fn is_finished(&self) -> bool {
        self.tween.is_finished()
    }

    fn sample(&self, t: f32) -> Option<(Vec2, Vec2)> {
        let first = *self.waypoints.first()?;
        let segments = self.waypoints.len().saturating_sub(1);
        if segments == 0 {
            return Some((first, first));
        }

        let scaled = t * segments as f32;
        let index = (scaled.floor() as usize).min(segments - 1);
        let local = scaled - index as f32;
        let start = self.waypoints[index];
        let end = self.waypoints[index + 1];
        Some((start.lerp(end, local), end))
    }
}
