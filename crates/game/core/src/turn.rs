//! Faction turn order and the single action-in-flight gate.
//!
//! A faction's turn consists of any number of moves followed by one
//! turn-ending action (attack or rest). Moves bracket themselves with
//! [`start_action`](TurnOrchestrator::start_action) /
//! [`end_action`](TurnOrchestrator::end_action); turn-ending actions finish
//! with [`end_turn`](TurnOrchestrator::end_turn), which also releases the gate.

use crate::faction::FactionId;
use crate::world::World;

/// The acting faction changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnChange {
    pub faction: FactionId,
    pub turn: u32,
    /// Faction that will act after this one, for turn banners.
    pub upcoming: Option<FactionId>,
}

/// Only one faction still has units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameOver {
    /// `None` when nobody is left standing.
    pub winner: Option<FactionId>,
    pub turns: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    Advanced(TurnChange),
    GameOver(GameOver),
}

#[derive(Clone, Debug, Default)]
pub struct TurnOrchestrator {
    current: FactionId,
    turn: u32,
    in_flight: bool,
    finished: Option<GameOver>,
}

impl TurnOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_faction(&self) -> FactionId {
        self.current
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn is_action_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn game_over(&self) -> Option<GameOver> {
        self.finished
    }

    pub fn is_finished(&self) -> bool {
        self.finished.is_some()
    }

    /// Whether a controller may issue a new command right now.
    pub fn can_perform_action(&self) -> bool {
        !self.in_flight && self.finished.is_none()
    }

    /// Closes the gate for the duration of one unit action.
    ///
    /// # Panics
    ///
    /// Panics if an action is already in flight or the game is over.
    pub fn start_action(&mut self) {
        assert!(!self.in_flight, "start_action called while an action is in flight");
        assert!(self.finished.is_none(), "start_action called after game over");
        self.in_flight = true;
    }

    /// Reopens the gate after a non turn-ending action.
    ///
    /// # Panics
    ///
    /// Panics if no action is in flight.
    pub fn end_action(&mut self) {
        assert!(self.in_flight, "end_action called without an action in flight");
        self.in_flight = false;
    }

    /// Next faction after the current one that still has units.
    pub fn upcoming_faction(&self, world: &World) -> Option<FactionId> {
        self.next_with_units(world, self.current)
    }

    /// Releases the gate and hands the turn to the next faction with units.
    ///
    /// If no other faction has units left, the game ends instead and the
    /// current faction wins when it still has units.
    pub fn end_turn(&mut self, world: &mut World) -> TurnOutcome {
        self.in_flight = false;

        if let Some(over) = self.finished {
            return TurnOutcome::GameOver(over);
        }

        let Some(next) = self.next_with_units(world, self.current) else {
            let winner = world
                .faction(self.current)
                .filter(|faction| faction.has_units())
                .map(|faction| faction.id());
            return self.finish(winner);
        };

        self.current = next;
        self.turn += 1;
        world.restore_moves(next);

        TurnOutcome::Advanced(TurnChange {
            faction: next,
            turn: self.turn,
            upcoming: self.next_with_units(world, next),
        })
    }

    /// Returns to turn 0 with the first faction that has units acting.
    ///
    /// Factions without units are skipped. When fewer than two factions
    /// have units the game is over before it starts.
    pub fn reset(&mut self, world: &mut World) -> TurnOutcome {
        *self = Self::default();

        let Some(first) = world
            .factions()
            .iter()
            .find(|faction| faction.has_units())
            .map(|faction| faction.id())
        else {
            return self.finish(None);
        };
        self.current = first;

        let upcoming = self.next_with_units(world, first);
        if upcoming.is_none() {
            return self.finish(Some(first));
        }
        world.restore_moves(first);

        TurnOutcome::Advanced(TurnChange {
            faction: first,
            turn: self.turn,
            upcoming,
        })
    }

    fn finish(&mut self, winner: Option<FactionId>) -> TurnOutcome {
        let over = GameOver {
            winner,
            turns: self.turn,
        };
        self.finished = Some(over);
        TurnOutcome::GameOver(over)
    }

    fn next_with_units(&self, world: &World, from: FactionId) -> Option<FactionId> {
        let count = world.factions().len();
        (1..count)
            .map(|offset| FactionId(((from.index() + offset) % count) as u32))
            .find(|&id| world.faction(id).is_some_and(|faction| faction.has_units()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::grid::TileCoord;
    use crate::unit::{UnitProfile, UnitType};

    fn three_way() -> World {
        let mut world = World::new(GameConfig::new());
        for (index, name) in ["a", "b", "c"].into_iter().enumerate() {
            let faction = world.add_faction(name, index == 0);
            world
                .spawn_unit(
                    faction,
                    UnitProfile::preset(UnitType::Infantry),
                    TileCoord::new(index as i32, 0),
                )
                .unwrap();
        }
        world
    }

    #[test]
    fn turns_cycle_through_factions() {
        let mut world = three_way();
        let mut turns = TurnOrchestrator::new();
        let start = turns.reset(&mut world);
        assert_eq!(
            start,
            TurnOutcome::Advanced(TurnChange {
                faction: FactionId(0),
                turn: 0,
                upcoming: Some(FactionId(1)),
            })
        );

        let order: Vec<_> = (0..4)
            .map(|_| match turns.end_turn(&mut world) {
                TurnOutcome::Advanced(change) => change.faction,
                TurnOutcome::GameOver(_) => panic!("game ended early"),
            })
            .collect();
        assert_eq!(order, [FactionId(1), FactionId(2), FactionId(0), FactionId(1)]);
        assert_eq!(turns.turn(), 4);
    }

    #[test]
    fn gate_blocks_until_released() {
        let mut world = three_way();
        let mut turns = TurnOrchestrator::new();
        turns.reset(&mut world);

        assert!(turns.can_perform_action());
        turns.start_action();
        assert!(!turns.can_perform_action());
        turns.end_action();
        assert!(turns.can_perform_action());

        turns.start_action();
        turns.end_turn(&mut world);
        assert!(turns.can_perform_action());
    }

    #[test]
    #[should_panic(expected = "while an action is in flight")]
    fn nested_start_action_panics() {
        let mut turns = TurnOrchestrator::new();
        turns.start_action();
        turns.start_action();
    }

    #[test]
    #[should_panic(expected = "without an action")]
    fn unpaired_end_action_panics() {
        let mut turns = TurnOrchestrator::new();
        turns.end_action();
    }

    #[test]
    fn last_faction_standing_wins() {
        let mut world = World::new(GameConfig::new());
        let a = world.add_faction("a", true);
        world.add_faction("b", false);
        world
            .spawn_unit(a, UnitProfile::preset(UnitType::Pikes), TileCoord::ORIGIN)
            .unwrap();

        let mut turns = TurnOrchestrator::new();
        turns.reset(&mut world);
        assert_eq!(turns.upcoming_faction(&world), None);

        let outcome = turns.end_turn(&mut world);
        assert_eq!(
            outcome,
            TurnOutcome::GameOver(GameOver {
                winner: Some(a),
                turns: 0
            })
        );
        assert!(!turns.can_perform_action());
    }

    #[test]
    fn reset_skips_factions_without_units() {
        let mut world = World::new(GameConfig::new());
        world.add_faction("ghosts", false);
        let a = world.add_faction("a", false);
        let b = world.add_faction("b", false);
        for (faction, x) in [(a, 0), (b, 3)] {
            world
                .spawn_unit(faction, UnitProfile::preset(UnitType::Pikes), TileCoord::new(x, 0))
                .unwrap();
        }

        let mut turns = TurnOrchestrator::new();
        let start = turns.reset(&mut world);
        assert_eq!(
            start,
            TurnOutcome::Advanced(TurnChange {
                faction: a,
                turn: 0,
                upcoming: Some(b),
            })
        );
        assert!(turns.can_perform_action());

        let order: Vec<_> = (0..3)
            .map(|_| match turns.end_turn(&mut world) {
                TurnOutcome::Advanced(change) => change.faction,
                TurnOutcome::GameOver(_) => panic!("game ended early"),
            })
            .collect();
        assert_eq!(order, [b, a, b]);
    }

    #[test]
    fn reset_with_one_armed_faction_is_game_over() {
        let mut world = World::new(GameConfig::new());
        world.add_faction("ghosts", true);
        let a = world.add_faction("a", false);
        world
            .spawn_unit(a, UnitProfile::preset(UnitType::Pikes), TileCoord::ORIGIN)
            .unwrap();

        let mut turns = TurnOrchestrator::new();
        assert_eq!(
            turns.reset(&mut world),
            TurnOutcome::GameOver(GameOver {
                winner: Some(a),
                turns: 0
            })
        );
        assert!(!turns.can_perform_action());

        let mut empty = World::new(GameConfig::new());
        empty.add_faction("x", true);
        empty.add_faction("y", false);
        let mut turns = TurnOrchestrator::new();
        assert!(matches!(
            turns.reset(&mut empty),
            TurnOutcome::GameOver(GameOver { winner: None, .. })
        ));
    }
}
