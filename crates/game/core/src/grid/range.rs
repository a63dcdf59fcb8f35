use super::{Grid, TileId, Traversal};

impl Grid {
    /// Tiles reachable from `origin` in at most `max_steps` steps.
    ///
    /// Candidates come from a layered breadth-first expansion and are then
    /// confirmed with [`distance`](Grid::distance) under the same traversal,
    /// which catches detours the layering alone would understate. The origin
    /// is never part of the result and `max_steps == 0` yields nothing.
    ///
    /// Only membership is meaningful; callers must not depend on ordering.
    pub fn tiles_within_distance(
        &self,
        origin: TileId,
        max_steps: u32,
        traversal: Traversal,
    ) -> Vec<TileId> {
        if max_steps == 0 {
            return Vec::new();
        }

        let mut visited = vec![false; self.len()];
        visited[origin.index()] = true;

        let mut candidates = Vec::new();
        let mut frontier = vec![origin];

        for _ in 0..max_steps {
            let mut next = Vec::new();
            for &tile in &frontier {
                for neighbor in self.neighbors(tile, traversal) {
                    if visited[neighbor.index()] {
                        continue;
                    }
                    visited[neighbor.index()] = true;
                    next.push(neighbor);
                }
            }

            if next.is_empty() {
                break;
            }
            candidates.extend_from_slice(&next);
            frontier = next;
        }

        candidates.retain(|&tile| {
            self.distance(origin, tile, traversal)
                .is_some_and(|steps| steps <= max_steps)
        });
        candidates
    }
}
