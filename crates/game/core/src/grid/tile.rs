use std::fmt;

use arrayvec::ArrayVec;
use glam::Vec2;

use crate::unit::UnitId;

/// Dense index of a tile inside its [`Grid`](super::Grid).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileId(pub u32);

impl TileId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tile#{}", self.0)
    }
}

/// Integer grid coordinates of a tile: column `x`, row `z`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileCoord {
    pub x: i32,
    pub z: i32,
}

impl TileCoord {
    pub const ORIGIN: Self = Self { x: 0, z: 0 };

    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Grid distance ignoring obstacles.
    pub fn manhattan(self, other: TileCoord) -> u32 {
        self.x.abs_diff(other.x) + self.z.abs_diff(other.z)
    }

    /// Orthogonal neighbours in the order north, south, east, west.
    pub fn orthogonal(self) -> [TileCoord; 4] {
        [
            TileCoord::new(self.x, self.z + 1),
            TileCoord::new(self.x, self.z - 1),
            TileCoord::new(self.x + 1, self.z),
            TileCoord::new(self.x - 1, self.z),
        ]
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// One cell of the grid.
///
/// Tiles are created once with the grid and never destroyed. The occupant is
/// only written through [`World`](crate::World), which keeps it the inverse
/// of the unit's own tile reference.
#[derive(Clone, Debug)]
pub struct Tile {
    id: TileId,
    coord: TileCoord,
    position: Vec2,
    occupant: Option<UnitId>,
    neighbors: ArrayVec<TileId, 4>,
}

impl Tile {
    pub(crate) fn new(id: TileId, coord: TileCoord, position: Vec2) -> Self {
        Self {
            id,
            coord,
            position,
            occupant: None,
            neighbors: ArrayVec::new(),
        }
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn coord(&self) -> TileCoord {
        self.coord
    }

    /// Centre of the tile on the horizontal (x, z) plane, in world units.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn occupant(&self) -> Option<UnitId> {
        self.occupant
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn neighbors(&self) -> &[TileId] {
        &self.neighbors
    }

    pub(crate) fn set_occupant(&mut self, occupant: Option<UnitId>) {
        self.occupant = occupant;
    }

    pub(crate) fn push_neighbor(&mut self, neighbor: TileId) {
        self.neighbors.push(neighbor);
    }
}
