use super::search::{AStar, SearchOutcome};
use super::{Grid, TileId, Traversal};

impl Grid {
    /// Number of steps on the shortest path from `src` to `dst`.
    ///
    /// Returns `None` when the destination cannot be reached under
    /// `traversal`. The source tile never blocks its own search, and in
    /// walkable mode the destination may be occupied.
    pub fn distance(&self, src: TileId, dst: TileId, traversal: Traversal) -> Option<u32> {
        let mut search = AStar::new(self, src, dst, traversal);
        match search.run() {
            SearchOutcome::Reached => Some(search.cost(dst)),
            SearchOutcome::Exhausted => None,
        }
    }

    /// Tiles to walk through from `src` to `dst`, in travel order, excluding `src`.
    ///
    /// When `dst` cannot be reached the path leads to the explored tile
    /// closest to it instead, so a blocked unit still approaches its goal.
    /// Returns an empty path when `src == dst` or nothing was explored.
    pub fn path(&self, src: TileId, dst: TileId, traversal: Traversal) -> Vec<TileId> {
        let mut search = AStar::new(self, src, dst, traversal);
        match search.run() {
            SearchOutcome::Reached => search.trace(dst),
            SearchOutcome::Exhausted => search
                .nearest_closed()
                .map(|tile| search.trace(tile))
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::TileCoord;
    use crate::unit::UnitId;

    fn at(grid: &Grid, x: i32, z: i32) -> TileId {
        grid.tile_at(TileCoord::new(x, z)).unwrap()
    }

    #[test]
    fn distance_to_self_is_zero() {
        let grid = Grid::new(5, 5, 0.2, 0.01);
        let tile = at(&grid, 2, 2);
        assert_eq!(grid.distance(tile, tile, Traversal::Walkable), Some(0));
        assert!(grid.path(tile, tile, Traversal::Walkable).is_empty());
    }

    #[test]
    fn open_board_distance_matches_manhattan() {
        let grid = Grid::new(8, 8, 0.2, 0.01);
        let src = at(&grid, 0, 5);
        let dst = at(&grid, 7, 5);
        assert_eq!(grid.distance(src, dst, Traversal::Unrestricted), Some(7));
        assert_eq!(grid.distance(src, dst, Traversal::Walkable), Some(7));
    }

    #[test]
    fn occupied_destination_is_reachable_when_walking() {
        let mut grid = Grid::new(4, 1, 1.0, 0.0);
        let dst = at(&grid, 3, 0);
        grid.set_occupant(dst, Some(UnitId(1)));
        assert_eq!(grid.distance(at(&grid, 0, 0), dst, Traversal::Walkable), Some(3));
    }

    #[test]
    fn walls_force_a_detour() {
        // 3 x 3 board with the middle column blocked except the top row.
        let mut grid = Grid::new(3, 3, 1.0, 0.0);
        grid.set_occupant(at(&grid, 1, 0), Some(UnitId(1)));
        grid.set_occupant(at(&grid, 1, 1), Some(UnitId(2)));

        let src = at(&grid, 0, 0);
        let dst = at(&grid, 2, 0);
        assert_eq!(grid.distance(src, dst, Traversal::Walkable), Some(6));
        assert_eq!(grid.distance(src, dst, Traversal::Unrestricted), Some(2));

        let path = grid.path(src, dst, Traversal::Walkable);
        assert_eq!(path.len(), 6);
        assert_eq!(path.last(), Some(&dst));
        assert!(path.iter().all(|&tile| !grid.tile(tile).is_occupied()));
    }

    #[test]
    fn unreachable_goal_yields_none_and_nearest_fallback() {
        // Goal at (4, 0) is walled off by a full column of units at x = 3.
        let mut grid = Grid::new(5, 3, 1.0, 0.0);
        for z in 0..3 {
            grid.set_occupant(at(&grid, 3, z), Some(UnitId(z as u32 + 1)));
        }
        let src = at(&grid, 0, 0);
        let dst = at(&grid, 4, 0);

        assert_eq!(grid.distance(src, dst, Traversal::Walkable), None);

        let path = grid.path(src, dst, Traversal::Walkable);
        assert_eq!(path.last(), Some(&at(&grid, 2, 0)));
        assert!(path.iter().all(|&tile| !grid.tile(tile).is_occupied()));
    }

    #[test]
    fn boxed_in_source_gets_empty_path() {
        let mut grid = Grid::new(3, 3, 1.0, 0.0);
        let src = at(&grid, 0, 0);
        grid.set_occupant(at(&grid, 1, 0), Some(UnitId(1)));
        grid.set_occupant(at(&grid, 0, 1), Some(UnitId(2)));

        let dst = at(&grid, 2, 2);
        assert_eq!(grid.distance(src, dst, Traversal::Walkable), None);
        assert!(grid.path(src, dst, Traversal::Walkable).is_empty());
    }

    #[test]
    fn path_starts_adjacent_to_source() {
        let grid = Grid::new(6, 6, 0.2, 0.01);
        let src = at(&grid, 1, 1);
        let dst = at(&grid, 4, 5);
        let path = grid.path(src, dst, Traversal::Walkable);

        assert_eq!(Some(path.len() as u32), grid.distance(src, dst, Traversal::Walkable));
        assert!(grid.tile(src).neighbors().contains(&path[0]));
        for pair in path.windows(2) {
            assert!(grid.tile(pair[0]).neighbors().contains(&pair[1]));
        }
    }
}
