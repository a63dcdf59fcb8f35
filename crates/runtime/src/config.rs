//! Runtime configuration: animation timing, AI weights and event buffers.

use std::env;

/// Durations and speeds of the timed sequences, in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimingConfig {
    /// Tiles travelled per second while following a path.
    pub move_speed: f32,
    /// Time to turn toward an attack target.
    pub rotation_duration: f32,
    /// Length of the attack animation.
    pub attack_duration: f32,
    /// Fraction of the attack animation at which a melee hit lands.
    pub melee_hit_fraction: f32,
    /// Delay between the start of the animation and an arrow's release.
    pub arrow_start_delay: f32,
    /// Pause after an attack or rest before the turn passes.
    pub end_turn_delay: f32,
    /// Time a floating text takes to rise and fade.
    pub popup_duration: f32,
    /// Pause between two consecutive floating texts.
    pub popup_gap: f32,
}

impl TimingConfig {
    pub const DEFAULT_MOVE_SPEED: f32 = 1.0;
    pub const DEFAULT_ROTATION_DURATION: f32 = 1.0;
    pub const DEFAULT_ATTACK_DURATION: f32 = 1.0;
    pub const DEFAULT_MELEE_HIT_FRACTION: f32 = 0.5;
    pub const DEFAULT_ARROW_START_DELAY: f32 = 0.5;
    pub const DEFAULT_END_TURN_DELAY: f32 = 0.5;
    pub const DEFAULT_POPUP_DURATION: f32 = 1.0;
    pub const DEFAULT_POPUP_GAP: f32 = 0.0;

    pub fn new() -> Self {
        Self {
            move_speed: Self::DEFAULT_MOVE_SPEED,
            rotation_duration: Self::DEFAULT_ROTATION_DURATION,
            attack_duration: Self::DEFAULT_ATTACK_DURATION,
            melee_hit_fraction: Self::DEFAULT_MELEE_HIT_FRACTION,
            arrow_start_delay: Self::DEFAULT_ARROW_START_DELAY,
            end_turn_delay: Self::DEFAULT_END_TURN_DELAY,
            popup_duration: Self::DEFAULT_POPUP_DURATION,
            popup_gap: Self::DEFAULT_POPUP_GAP,
        }
    }

    /// Every sequence resolves on its first frame.
    pub fn instant() -> Self {
        Self {
            move_speed: f32::INFINITY,
            rotation_duration: 0.0,
            attack_duration: 0.0,
            melee_hit_fraction: 0.0,
            arrow_start_delay: 0.0,
            end_turn_delay: 0.0,
            popup_duration: 0.0,
            popup_gap: 0.0,
        }
    }

    /// Stretches (`factor > 1`) or compresses every duration.
    pub fn scaled(mut self, factor: f32) -> Self {
        let factor = factor.max(0.0);
        self.move_speed = if factor == 0.0 {
            f32::INFINITY
        } else {
            self.move_speed / factor
        };
        self.rotation_duration *= factor;
        self.attack_duration *= factor;
        self.arrow_start_delay *= factor;
        self.end_turn_delay *= factor;
        self.popup_duration *= factor;
        self.popup_gap *= factor;
        self
    }

    /// Seconds needed to walk through `waypoints` tiles.
    pub fn walk_duration(&self, waypoints: usize) -> f32 {
        if self.move_speed <= 0.0 || !self.move_speed.is_finite() {
            return 0.0;
        }
        waypoints as f32 / self.move_speed
    }

    pub fn melee_hit_time(&self) -> f32 {
        self.attack_duration * self.melee_hit_fraction
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Score increments used when ranking AI candidate actions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AiWeights {
    /// Any hostile can be attacked from the tile.
    pub attack: f32,
    /// The best attack carries a positive type bonus.
    pub bonus: f32,
    /// The best attack kills its target.
    pub lethal: f32,
    /// The best attack leaves its target below the near-lethal threshold.
    pub near_lethal: f32,
}

impl AiWeights {
    pub const DEFAULT_ATTACK: f32 = 2.0;
    pub const DEFAULT_BONUS: f32 = 2.0;
    pub const DEFAULT_LETHAL: f32 = 5.0;
    pub const DEFAULT_NEAR_LETHAL: f32 = 3.0;
}

impl Default for AiWeights {
    fn default() -> Self {
        Self {
            attack: Self::DEFAULT_ATTACK,
            bonus: Self::DEFAULT_BONUS,
            lethal: Self::DEFAULT_LETHAL,
            near_lethal: Self::DEFAULT_NEAR_LETHAL,
        }
    }
}

/// Configuration for a [`Simulation`](crate::Simulation).
#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeConfig {
    pub timing: TimingConfig,
    pub ai: AiWeights,
    /// Per-topic capacity of the event bus.
    pub event_capacity: usize,
    /// Seed for the AI tie-break RNG. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl RuntimeConfig {
    pub const DEFAULT_EVENT_CAPACITY: usize = 100;

    pub fn new() -> Self {
        Self {
            timing: TimingConfig::new(),
            ai: AiWeights::default(),
            event_capacity: Self::DEFAULT_EVENT_CAPACITY,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_ai_weights(mut self, ai: AiWeights) -> Self {
        self.ai = ai;
        self
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TACTICS_SEED` - AI tie-break seed (default: entropy)
    /// - `TACTICS_EVENT_CAPACITY` - Event bus capacity per topic (default: 100)
    /// - `TACTICS_MOVE_SPEED` - Tiles per second while walking (default: 1)
    /// - `TACTICS_ANIMATION_SCALE` - Multiplier on every duration (default: 1)
    pub fn from_env() -> Self {
        let mut config = Self::new();

        if let Some(seed) = read_env::<u64>("TACTICS_SEED") {
            config.seed = Some(seed);
        }
        if let Some(capacity) = read_env::<usize>("TACTICS_EVENT_CAPACITY") {
            config.event_capacity = capacity.max(1);
        }
        if let Some(speed) = read_env::<f32>("TACTICS_MOVE_SPEED")
            && speed > 0.0
        {
            config.timing.move_speed = speed;
        }
        if let Some(scale) = read_env::<f32>("TACTICS_ANIMATION_SCALE") {
            config.timing = config.timing.scaled(scale);
        }

        config
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
