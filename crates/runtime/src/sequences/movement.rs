use glam::Vec2;

use game_core::{TileId, UnitId};
use state_machine::{State, Status, builder};

use super::BoxedState;
use crate::animation::PathTween;
use crate::arena::Arena;
use crate::events::GameEvent;

/// Walks a lifted unit along `waypoints` (start tile first) to the last one.
pub fn move_sequence(unit: UnitId, waypoints: Vec<TileId>, duration: f32) -> Vec<BoxedState> {
    vec![builder::boxed(FollowPath::new(unit, waypoints, duration))]
}

/// Animates a unit along a tile path, then puts it down on the final tile
/// and reopens the action gate.
///
/// The unit must already be lifted off its starting tile.
pub struct FollowPath {
    unit: UnitId,
    waypoints: Vec<TileId>,
    duration: f32,
    tween: Option<PathTween>,
}

impl FollowPath {
    pub fn new(unit: UnitId, waypoints: Vec<TileId>, duration: f32) -> Self {
        Self {
            unit,
            waypoints,
            duration,
            tween: None,
        }
    }

    fn arrive(&self, arena: &mut Arena) {
        let Some(&destination) = self.waypoints.last() else {
            return;
        };
        arena.world_mut().land_unit(self.unit, destination);

        let position = arena.tile_position(destination);
        let mut pose = arena.pose(self.unit).unwrap_or_default();
        pose.position = position;
        arena.set_pose(self.unit, pose);

        arena.emit(GameEvent::MoveEnded {
            unit: self.unit,
            tile: destination,
        });
        arena.turns_mut().end_action();
    }
}

impl State<Arena> for FollowPath {
    fn on_start(&mut self, arena: &mut Arena) {
        let points: Vec<Vec2> = self
            .waypoints
            .iter()
            .map(|&tile| arena.tile_position(tile))
            .collect();
        self.tween = Some(PathTween::new(points, self.duration));
    }

    fn on_update(&mut self, arena: &mut Arena, dt: f32) -> Status {
        let Some(tween) = self.tween.as_mut() else {
            return Status::Finished;
        };

        if let Some((position, heading)) = tween.advance(dt) {
            let mut pose = arena.pose(self.unit).unwrap_or_default();
            pose.position = position;
            pose.yaw = pose.yaw_towards(heading);
            arena.set_pose(self.unit, pose);
        }

        if tween.is_finished() {
            self.arrive(arena);
            return Status::Finished;
        }
        Status::Running
    }

    fn name(&self) -> &'static str {
        "follow_path"
    }
}
