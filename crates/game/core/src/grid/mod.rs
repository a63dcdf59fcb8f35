//! Tile graph and the spatial queries built on top of it.
//!
//! The [`Grid`] owns every [`Tile`] of a `width × length` board and links each
//! tile to its orthogonal neighbours once, at construction. Two query families
//! run over that graph:
//!
//! - [`path`](Grid::path) / [`distance`](Grid::distance): A* search
//! - [`tiles_within_distance`](Grid::tiles_within_distance): layered range query
//!
//! Both take a [`Traversal`] mode. Search bookkeeping lives in a scoped
//! context owned by each query, so no search state survives between calls.

mod pathfinding;
mod range;
mod search;
mod tile;

use glam::Vec2;

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::unit::UnitId;

pub use tile::{Tile, TileCoord, TileId};

/// Which tiles a search may pass through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Traversal {
    /// Occupied tiles block passage, except a search's own destination.
    /// Used for movement.
    Walkable,
    /// Occupancy is ignored. Used for threat and attack range.
    Unrestricted,
}

impl Traversal {
    pub fn is_walkable_only(self) -> bool {
        matches!(self, Traversal::Walkable)
    }
}

/// Errors raised when addressing tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("coordinate {coord} is outside the {width}x{length} grid")]
    OutOfBounds {
        coord: TileCoord,
        width: u32,
        length: u32,
    },

    #[error("{tile} does not exist")]
    UnknownTile { tile: TileId },

    #[error("{tile} is already occupied by unit {occupant}")]
    Occupied { tile: TileId, occupant: UnitId },
}

impl GameError for GridError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            GridError::OutOfBounds { .. } | GridError::UnknownTile { .. } => {
                ErrorSeverity::Validation
            }
            GridError::Occupied { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            GridError::OutOfBounds { .. } => "GRID_OUT_OF_BOUNDS",
            GridError::UnknownTile { .. } => "GRID_UNKNOWN_TILE",
            GridError::Occupied { .. } => "GRID_OCCUPIED",
        }
    }
}

/// Static adjacency structure over a rectangular board.
#[derive(Clone, Debug)]
pub struct Grid {
    width: u32,
    length: u32,
    tile_size: f32,
    tile_spacing: f32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Builds a `width × length` grid and links orthogonal neighbours.
    ///
    /// Tile ids are assigned column-major: `id = x * length + z`.
    pub fn new(width: u32, length: u32, tile_size: f32, tile_spacing: f32) -> Self {
        let pitch = tile_size + tile_spacing;
        let mut tiles = Vec::with_capacity((width as usize) * (length as usize));

        for x in 0..width as i32 {
            for z in 0..length as i32 {
                let id = TileId(tiles.len() as u32);
                let position = Vec2::new(x as f32 * pitch, z as f32 * pitch);
                tiles.push(Tile::new(id, TileCoord::new(x, z), position));
            }
        }

        let mut grid = Self {
            width,
            length,
            tile_size,
            tile_spacing,
            tiles,
        };
        grid.link_neighbors();
        grid
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.width,
            config.length,
            config.tile_size,
            config.tile_spacing,
        )
    }

    fn link_neighbors(&mut self) {
        for index in 0..self.tiles.len() {
            let coord = self.tiles[index].coord();
            for neighbor in coord.orthogonal() {
                if let Some(id) = self.tile_at(neighbor) {
                    self.tiles[index].push_neighbor(id);
                }
            }
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn tile_spacing(&self) -> f32 {
        self.tile_spacing
    }

    /// Distance between the centres of two adjacent tiles.
    pub fn pitch(&self) -> f32 {
        self.tile_size + self.tile_spacing
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, coord: TileCoord) -> bool {
        coord.x >= 0
            && coord.z >= 0
            && coord.x < self.width as i32
            && coord.z < self.length as i32
    }

    /// Looks up the tile at `coord`, if it lies on the board.
    pub fn tile_at(&self, coord: TileCoord) -> Option<TileId> {
        if !self.contains(coord) {
            return None;
        }
        Some(TileId(coord.x as u32 * self.length + coord.z as u32))
    }

    /// Like [`tile_at`](Self::tile_at) but reports why the lookup failed.
    pub fn require_tile_at(&self, coord: TileCoord) -> Result<TileId, GridError> {
        self.tile_at(coord).ok_or(GridError::OutOfBounds {
            coord,
            width: self.width,
            length: self.length,
        })
    }

    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.index())
    }

    /// Returns the tile with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this grid.
    pub fn tile(&self, id: TileId) -> &Tile {
        &self.tiles[id.index()]
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn occupant(&self, id: TileId) -> Option<UnitId> {
        self.get(id).and_then(Tile::occupant)
    }

    /// Neighbours of `id` that `traversal` allows entering.
    ///
    /// In walkable mode occupied neighbours are filtered out.
    pub fn neighbors(&self, id: TileId, traversal: Traversal) -> impl Iterator<Item = TileId> + '_ {
        self.tile(id)
            .neighbors()
            .iter()
            .copied()
            .filter(move |&neighbor| match traversal {
                Traversal::Unrestricted => true,
                Traversal::Walkable => !self.tile(neighbor).is_occupied(),
            })
    }

    /// Squared world-space distance between two tile centres.
    pub fn distance_squared(&self, a: TileId, b: TileId) -> f32 {
        self.tile(a).position().distance_squared(self.tile(b).position())
    }

    pub(crate) fn set_occupant(&mut self, id: TileId, occupant: Option<UnitId>) {
        self.tiles[id.index()].set_occupant(occupant);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiles_are_indexed_column_major() {
        let grid = Grid::new(3, 4, 1.0, 0.0);
        assert_eq!(grid.len(), 12);
        assert_eq!(grid.tile_at(TileCoord::new(0, 0)), Some(TileId(0)));
        assert_eq!(grid.tile_at(TileCoord::new(1, 2)), Some(TileId(6)));
        assert_eq!(grid.tile(TileId(6)).coord(), TileCoord::new(1, 2));
    }

    #[test]
    fn out_of_bounds_lookups_do_not_wrap() {
        let grid = Grid::new(3, 4, 1.0, 0.0);
        assert_eq!(grid.tile_at(TileCoord::new(1, -1)), None);
        assert_eq!(grid.tile_at(TileCoord::new(0, 4)), None);
        assert!(matches!(
            grid.require_tile_at(TileCoord::new(3, 0)),
            Err(GridError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn corner_has_two_neighbors_and_interior_has_four() {
        let grid = Grid::new(4, 4, 1.0, 0.0);
        let corner = grid.tile_at(TileCoord::new(0, 0)).unwrap();
        let interior = grid.tile_at(TileCoord::new(2, 2)).unwrap();
        assert_eq!(grid.tile(corner).neighbors().len(), 2);
        assert_eq!(grid.tile(interior).neighbors().len(), 4);
    }

    #[test]
    fn world_position_uses_size_and_spacing() {
        let grid = Grid::new(8, 8, 0.2, 0.01);
        let tile = grid.tile(grid.tile_at(TileCoord::new(2, 3)).unwrap());
        assert!((tile.position().x - 0.42).abs() < 1e-5);
        assert!((tile.position().y - 0.63).abs() < 1e-5);
    }

    #[test]
    fn walkable_neighbors_skip_occupied_tiles() {
        let mut grid = Grid::new(3, 3, 1.0, 0.0);
        let center = grid.tile_at(TileCoord::new(1, 1)).unwrap();
        let north = grid.tile_at(TileCoord::new(1, 2)).unwrap();
        grid.set_occupant(north, Some(UnitId(7)));

        let walkable: Vec<_> = grid.neighbors(center, Traversal::Walkable).collect();
        let all: Vec<_> = grid.neighbors(center, Traversal::Unrestricted).collect();
        assert_eq!(walkable.len(), 3);
        assert!(!walkable.contains(&north));
        assert_eq!(all.len(), 4);
    }
}
