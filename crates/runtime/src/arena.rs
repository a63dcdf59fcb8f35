//! Shared mutable context handed to every running sequence.

use std::collections::BTreeMap;

use glam::Vec2;

use game_core::{
    AttackInstance, FactionId, GameOver, HitOutcome, TileId, TurnChange, TurnOrchestrator,
    TurnOutcome, UnitId, World,
};

use crate::animation::Pose;
use crate::config::TimingConfig;
use crate::events::GameEvent;

/// The battle as seen by sequences: rules state plus presentation poses.
///
/// Sequences mutate the world only through the methods here, which record
/// a [`GameEvent`] for every observable change.
pub struct Arena {
    world: World,
    turns: TurnOrchestrator,
    poses: BTreeMap<UnitId, Pose>,
    timing: TimingConfig,
    events: Vec<GameEvent>,
}

impl Arena {
    pub fn new(world: World, timing: TimingConfig) -> Self {
        let poses = world
            .units()
            .filter_map(|unit| {
                let tile = unit.tile()?;
                Some((unit.id(), Pose::new(world.grid().tile(tile).position())))
            })
            .collect();

        Self {
            world,
            turns: TurnOrchestrator::new(),
            poses,
            timing,
            events: Vec::new(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn turns(&self) -> &TurnOrchestrator {
        &self.turns
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    pub fn pose(&self, unit: UnitId) -> Option<Pose> {
        self.poses.get(&unit).copied()
    }

    pub fn poses(&self) -> impl Iterator<Item = (UnitId, Pose)> + '_ {
        self.poses.iter().map(|(&id, &pose)| (id, pose))
    }

    pub fn tile_position(&self, tile: TileId) -> Vec2 {
        self.world.grid().tile(tile).position()
    }

    pub fn can_perform_action(&self) -> bool {
        self.turns.can_perform_action()
    }

    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub(crate) fn turns_mut(&mut self) -> &mut TurnOrchestrator {
        &mut self.turns
    }

    pub(crate) fn set_pose(&mut self, unit: UnitId, pose: Pose) {
        self.poses.insert(unit, pose);
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Takes every event recorded since the last drain.
    pub(crate) fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Restarts turn order at the first faction with units.
    pub(crate) fn reset_turns(&mut self) {
        match self.turns.reset(&mut self.world) {
            TurnOutcome::Advanced(change) => self.announce_turn(change),
            TurnOutcome::GameOver(over) => self.announce_game_over(over),
        }
    }

    /// Hands the turn to the next faction, or ends the game.
    pub(crate) fn end_turn(&mut self) {
        match self.turns.end_turn(&mut self.world) {
            TurnOutcome::Advanced(change) => self.announce_turn(change),
            TurnOutcome::GameOver(over) => self.announce_game_over(over),
        }
    }

    /// Lands an attack, recording the hit and a possible death.
    pub(crate) fn land_hit(&mut self, attack: &AttackInstance) -> Option<HitOutcome> {
        let faction = self.world.unit(attack.target)?.faction();
        let at = self.pose(attack.target).unwrap_or_default().position;
        let outcome = self.world.apply_hit(attack)?;

        tracing::debug!(
            target = %attack.target,
            damage = outcome.damage,
            remaining = outcome.remaining_hp,
            "hit landed"
        );
        self.emit(GameEvent::UnitHit {
            attack: *attack,
            outcome,
            at: at.to_array(),
        });

        if outcome.killed {
            tracing::info!(unit = %attack.target, %faction, "unit killed");
            self.poses.remove(&attack.target);
            self.emit(GameEvent::UnitDied {
                unit: attack.target,
                faction,
            });
        }
        Some(outcome)
    }

    pub(crate) fn rest(&mut self, unit: UnitId) -> f32 {
        let recovered = self.world.rest(unit);
        tracing::debug!(%unit, recovered, "unit rested");
        self.emit(GameEvent::UnitRested { unit, recovered });
        recovered
    }

    fn announce_turn(&mut self, change: TurnChange) {
        let name = self.world.faction_name(change.faction).to_owned();
        let upcoming_name = change
            .upcoming
            .map(|faction| self.world.faction_name(faction).to_owned());

        tracing::info!(turn = change.turn, faction = %name, "turn started");
        self.emit(GameEvent::TurnChanged {
            faction: change.faction,
            name,
            turn: change.turn,
            upcoming: change.upcoming,
            upcoming_name,
        });
    }

    fn announce_game_over(&mut self, over: GameOver) {
        let winner_name = over
            .winner
            .map(|faction: FactionId| self.world.faction_name(faction).to_owned());

        tracing::info!(
            winner = winner_name.as_deref().unwrap_or("nobody"),
            turns = over.turns,
            "game over"
        );
        self.emit(GameEvent::GameOver {
            winner: over.winner,
            winner_name,
            turns: over.turns,
        });
    }
}
