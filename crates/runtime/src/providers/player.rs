//! Human input relay.
//!
//! Translates "tile selected" / "unit selected" / menu choices into
//! commands. The controller never mutates the arena; it only reads it to
//! decide which tiles to highlight and which command a selection means.

use game_core::{
    AttackCommand, Command, FactionId, MoveCommand, RestCommand, TileId, Traversal, UnitId,
};

use crate::arena::Arena;

/// Entries of the action menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionChoice {
    Move,
    Attack,
    Rest,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetMode {
    Move,
    Attack,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PlayerMode {
    /// Another faction is acting.
    #[default]
    Inactive,
    SelectingUnit,
    ChoosingAction {
        unit: UnitId,
    },
    Targeting {
        unit: UnitId,
        mode: TargetMode,
        tiles: Vec<TileId>,
    },
}

#[derive(Clone, Debug)]
pub struct PlayerController {
    faction: FactionId,
    mode: PlayerMode,
}

impl PlayerController {
    pub fn new(faction: FactionId) -> Self {
        Self {
            faction,
            mode: PlayerMode::Inactive,
        }
    }

    pub fn faction(&self) -> FactionId {
        self.faction
    }

    pub fn mode(&self) -> &PlayerMode {
        &self.mode
    }

    /// Unit whose action menu or targeting is open.
    pub fn selected_unit(&self) -> Option<UnitId> {
        match self.mode {
            PlayerMode::ChoosingAction { unit } | PlayerMode::Targeting { unit, .. } => Some(unit),
            PlayerMode::Inactive | PlayerMode::SelectingUnit => None,
        }
    }

    /// Tiles the UI should highlight while targeting.
    pub fn highlighted_tiles(&self) -> &[TileId] {
        match &self.mode {
            PlayerMode::Targeting { tiles, .. } => tiles,
            _ => &[],
        }
    }

    pub fn on_turn_changed(&mut self, faction: FactionId) {
        self.mode = if faction == self.faction {
            PlayerMode::SelectingUnit
        } else {
            PlayerMode::Inactive
        };
    }

    pub fn on_tile_selected(&mut self, arena: &Arena, tile: TileId) -> Option<Command> {
        match std::mem::take(&mut self.mode) {
            PlayerMode::Inactive => None,
            PlayerMode::SelectingUnit | PlayerMode::ChoosingAction { .. } => {
                self.mode = self.select_unit_on(arena, tile);
                None
            }
            PlayerMode::Targeting { unit, mode, tiles } => {
                if !tiles.contains(&tile) {
                    self.mode = PlayerMode::ChoosingAction { unit };
                    return None;
                }
                self.mode = PlayerMode::SelectingUnit;
                match mode {
                    TargetMode::Move => Some(MoveCommand::new(unit, tile).into()),
                    TargetMode::Attack => {
                        let target = arena.world().grid().occupant(tile)?;
                        Some(AttackCommand::new(unit, target).into())
                    }
                }
            }
        }
    }

    pub fn on_unit_selected(&mut self, arena: &Arena, unit: UnitId) -> Option<Command> {
        let tile = arena.world().unit(unit)?.tile()?;
        self.on_tile_selected(arena, tile)
    }

    /// Applies a menu choice for the selected unit.
    ///
    /// Move and Attack open targeting; Rest is issued immediately.
    pub fn choose(&mut self, arena: &Arena, choice: ActionChoice) -> Option<Command> {
        let PlayerMode::ChoosingAction { unit } = self.mode else {
            return None;
        };
        if !arena.can_perform_action() {
            return None;
        }

        match choice {
            ActionChoice::Move => {
                let tiles = arena.world().reachable_tiles(unit);
                self.mode = PlayerMode::Targeting {
                    unit,
                    mode: TargetMode::Move,
                    tiles,
                };
                None
            }
            ActionChoice::Attack => {
                let tiles = attack_targets(arena, unit);
                self.mode = PlayerMode::Targeting {
                    unit,
                    mode: TargetMode::Attack,
                    tiles,
                };
                None
            }
            ActionChoice::Rest => {
                self.mode = PlayerMode::SelectingUnit;
                Some(RestCommand::new(unit).into())
            }
        }
    }

    fn select_unit_on(&self, arena: &Arena, tile: TileId) -> PlayerMode {
        let friendly = arena
            .world()
            .unit_at(tile)
            .filter(|unit| unit.faction() == self.faction);

        match friendly {
            Some(unit) if arena.can_perform_action() => PlayerMode::ChoosingAction { unit: unit.id() },
            _ => PlayerMode::SelectingUnit,
        }
    }
}

/// Tiles within attack range that hold a hostile unit.
fn attack_targets(arena: &Arena, unit: UnitId) -> Vec<TileId> {
    let world = arena.world();
    let Some(attacker) = world.unit(unit) else {
        return Vec::new();
    };
    let Some(origin) = attacker.tile() else {
        return Vec::new();
    };

    world
        .grid()
        .tiles_within_distance(origin, attacker.attack_range(), Traversal::Unrestricted)
        .into_iter()
        .filter(|&tile| {
            world
                .grid()
                .occupant(tile)
                .is_some_and(|occupant| world.is_hostile(unit, occupant))
        })
        .collect()
}
