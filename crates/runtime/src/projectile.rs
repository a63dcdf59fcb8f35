//! Projectile behaviours for ranged attacks.
//!
//! Every behaviour offers the same small contract: [`start`](Projectile::start)
//! once the launch delay has passed, [`update`](Projectile::update) per frame
//! until [`finished`](Projectile::finished), and a
//! [`start_delay`](Projectile::start_delay) measured from the start of the
//! attack animation.

use glam::Vec2;

use game_core::ProjectileKind;

use crate::config::TimingConfig;

/// An arrow flying on a parabolic arc toward its target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrowProjectile {
    origin: Vec2,
    direction: Vec2,
    distance: f32,
    speed: f32,
    travelled: f32,
    start_delay: f32,
    finished: bool,
}

impl ArrowProjectile {
    pub fn new(start_delay: f32) -> Self {
        Self {
            origin: Vec2::ZERO,
            direction: Vec2::ZERO,
            distance: 0.0,
            speed: 0.0,
            travelled: 0.0,
            start_delay,
            finished: true,
        }
    }

    /// Launches from `from` toward `to`.
    ///
    /// The arrow covers half of the attacker's reach (`attack_range`
    /// tiles of `tile_size`) per second.
    pub fn start(&mut self, from: Vec2, to: Vec2, attack_range: u32, tile_size: f32) {
        let offset = to - from;
        self.origin = from;
        self.distance = offset.length();
        self.direction = offset.normalize_or_zero();
        self.speed = attack_range as f32 * tile_size * 0.5;
        self.travelled = 0.0;
        self.finished = self.distance <= 0.0;
    }

    pub fn update(&mut self, dt: f32) {
        if self.finished {
            return;
        }
        self.travelled += self.speed * dt;
        self.finished = self.travelled >= self.distance || self.speed <= 0.0;
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    pub fn start_delay(&self) -> f32 {
        self.start_delay
    }

    /// Current ground position.
    pub fn position(&self) -> Vec2 {
        self.origin + self.direction * self.travelled.min(self.distance)
    }

    /// Height above the launch point: `-h^2 + h * d` for horizontal
    /// progress `h` over distance `d`.
    pub fn height(&self) -> f32 {
        let h = self.travelled.min(self.distance);
        -h * h + h * self.distance
    }
}

/// A ranged attack in flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Projectile {
    Arrow(ArrowProjectile),
}

impl Projectile {
    pub fn for_kind(kind: ProjectileKind, timing: &TimingConfig) -> Self {
        match kind {
            ProjectileKind::Arrow => Projectile::Arrow(ArrowProjectile::new(timing.arrow_start_delay)),
        }
    }

    pub fn start(&mut self, from: Vec2, to: Vec2, attack_range: u32, tile_size: f32) {
        match self {
            Projectile::Arrow(arrow) => arrow.start(from, to, attack_range, tile_size),
        }
    }

    pub fn update(&mut self, dt: f32) {
        match self {
            Projectile::Arrow(arrow) => arrow.update(dt),
        }
    }

    pub fn finished(&self) -> bool {
        match self {
            Projectile::Arrow(arrow) => arrow.finished(),
        }
    }

    pub fn start_delay(&self) -> f32 {
        match self {
            Projectile::Arrow(arrow) => arrow.start_delay(),
        }
    }

    pub fn kind(&self) -> ProjectileKind {
        match self {
            Projectile::Arrow(_) => ProjectileKind::Arrow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_flies_at_half_reach_per_second() {
        let mut arrow = ArrowProjectile::new(0.5);
        // Range 5 on 0.2 tiles: 0.5 units per second over 1 unit.
        arrow.start(Vec2::ZERO, Vec2::new(1.0, 0.0), 5, 0.2);
        assert!(!arrow.finished());

        arrow.update(1.0);
        assert!(!arrow.finished());
        assert!((arrow.position().x - 0.5).abs() < 1e-5);
        assert!((arrow.height() - 0.25).abs() < 1e-5);

        arrow.update(1.0);
        assert!(arrow.finished());
        assert!(arrow.height().abs() < 1e-5);
    }

    #[test]
    fn arrow_is_idle_until_started() {
        let arrow = ArrowProjectile::new(0.5);
        assert!(arrow.finished());
        assert_eq!(arrow.start_delay(), 0.5);
    }

    #[test]
    fn projectile_dispatches_to_arrow() {
        let timing = TimingConfig::new();
        let mut projectile = Projectile::for_kind(ProjectileKind::Arrow, &timing);
        assert_eq!(projectile.start_delay(), timing.arrow_start_delay);
        projectile.start(Vec2::ZERO, Vec2::new(0.0, 0.42), 2, 0.2);
        projectile.update(10.0);
        assert!(projectile.finished());
        assert_eq!(projectile.kind(), ProjectileKind::Arrow);
    }
}
