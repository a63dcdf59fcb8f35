//! Events emitted by the simulation.

use game_core::{AttackInstance, FactionId, HitOutcome, ProjectileKind, TileId, UnitId};
use serde::{Deserialize, Serialize};

/// Everything a host can observe about a running battle.
///
/// Events are produced in the order the underlying state changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A faction starts acting.
    TurnChanged {
        faction: FactionId,
        name: String,
        turn: u32,
        upcoming: Option<FactionId>,
        upcoming_name: Option<String>,
    },

    /// No faction is left to oppose the winner.
    GameOver {
        winner: Option<FactionId>,
        winner_name: Option<String>,
        turns: u32,
    },

    MoveStarted {
        unit: UnitId,
        from: TileId,
        destination: TileId,
        steps: u32,
    },

    MoveEnded {
        unit: UnitId,
        tile: TileId,
    },

    AttackStarted {
        attack: AttackInstance,
    },

    ProjectileLaunched {
        attacker: UnitId,
        target: UnitId,
        kind: ProjectileKind,
    },

    /// An attack landed. `outcome.life_ratio` drives life bars; `at` is
    /// where the target stood (world x, z).
    UnitHit {
        attack: AttackInstance,
        outcome: HitOutcome,
        at: [f32; 2],
    },

    UnitDied {
        unit: UnitId,
        faction: FactionId,
    },

    UnitRested {
        unit: UnitId,
        recovered: f32,
    },

    /// A floating combat text became visible above `anchor` (world x, z).
    TextPopup {
        text: String,
        anchor: [f32; 2],
    },
}

impl GameEvent {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::TurnChanged { .. } => "turn_changed",
            GameEvent::GameOver { .. } => "game_over",
            GameEvent::MoveStarted { .. } => "move_started",
            GameEvent::MoveEnded { .. } => "move_ended",
            GameEvent::AttackStarted { .. } => "attack_started",
            GameEvent::ProjectileLaunched { .. } => "projectile_launched",
            GameEvent::UnitHit { .. } => "unit_hit",
            GameEvent::UnitDied { .. } => "unit_died",
            GameEvent::UnitRested { .. } => "unit_rested",
            GameEvent::TextPopup { .. } => "text_popup",
        }
    }
}
