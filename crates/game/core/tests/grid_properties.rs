use game_core::{Grid, TileCoord, TileId, Traversal};

fn grids() -> Vec<Grid> {
    [(1, 1), (1, 6), (3, 3), (5, 8), (8, 8)]
        .into_iter()
        .map(|(w, l)| Grid::new(w, l, 0.2, 0.01))
        .collect()
}

fn all_tiles(grid: &Grid) -> Vec<TileId> {
    grid.tiles().map(|tile| tile.id()).collect()
}

#[test]
fn zero_range_is_always_empty() {
    for grid in grids() {
        for tile in all_tiles(&grid) {
            assert!(grid.tiles_within_distance(tile, 0, Traversal::Walkable).is_empty());
            assert!(grid.tiles_within_distance(tile, 0, Traversal::Unrestricted).is_empty());
        }
    }
}

#[test]
fn unrestricted_range_grows_with_steps() {
    for grid in grids().into_iter().filter(|grid| grid.len() <= 40) {
        for tile in all_tiles(&grid) {
            let mut previous = 0;
            for steps in 0..=(grid.width() + grid.length()) {
                let count = grid
                    .tiles_within_distance(tile, steps, Traversal::Unrestricted)
                    .len();
                assert!(count >= previous, "range shrank at {steps} steps from {tile}");
                previous = count;
            }
            // Everything but the origin is eventually in range.
            assert_eq!(previous, grid.len() - 1);
        }
    }
}

#[test]
fn range_never_contains_origin_or_duplicates() {
    let grid = Grid::new(6, 6, 0.2, 0.01);
    let origin = grid.tile_at(TileCoord::new(2, 3)).unwrap();
    let mut tiles = grid.tiles_within_distance(origin, 4, Traversal::Walkable);
    let len = tiles.len();
    tiles.sort();
    tiles.dedup();
    assert_eq!(tiles.len(), len);
    assert!(!tiles.contains(&origin));
}

#[test]
fn path_length_matches_distance_on_open_boards() {
    for grid in grids() {
        let tiles = all_tiles(&grid);
        for &src in &tiles {
            for &dst in &tiles {
                let distance = grid.distance(src, dst, Traversal::Walkable);
                let path = grid.path(src, dst, Traversal::Walkable);
                assert_eq!(Some(path.len() as u32), distance);

                if src == dst {
                    assert!(path.is_empty());
                    continue;
                }
                assert!(grid.tile(src).neighbors().contains(&path[0]));
                assert_eq!(path.last(), Some(&dst));
            }
        }
    }
}

#[test]
fn open_board_distance_is_manhattan() {
    let grid = Grid::new(8, 8, 0.2, 0.01);
    for a in grid.tiles() {
        for b in grid.tiles() {
            assert_eq!(
                grid.distance(a.id(), b.id(), Traversal::Unrestricted),
                Some(a.coord().manhattan(b.coord()))
            );
        }
    }
}

#[test]
fn queries_leave_no_state_behind() {
    let grid = Grid::new(8, 8, 0.2, 0.01);
    let a = grid.tile_at(TileCoord::new(0, 0)).unwrap();
    let b = grid.tile_at(TileCoord::new(7, 7)).unwrap();

    let first = grid.path(a, b, Traversal::Walkable);
    grid.tiles_within_distance(b, 5, Traversal::Unrestricted);
    let second = grid.path(a, b, Traversal::Walkable);
    assert_eq!(first, second);
}
