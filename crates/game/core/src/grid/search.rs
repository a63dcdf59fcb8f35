//! Scoped A* bookkeeping.
//!
//! Every query builds its own [`AStar`] over a borrowed grid. Open/closed
//! markers, costs and parent links live in the search, not on the tiles, so
//! dropping the search is the reset: tiles never carry state from one query
//! into the next.

use super::{Grid, TileId, Traversal};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum ListState {
    #[default]
    Unassigned,
    Open,
    Closed,
}

#[derive(Clone, Copy, Debug, Default)]
struct Node {
    state: ListState,
    /// Steps from the start tile.
    cost: u32,
    /// Squared world distance to the goal.
    heuristic: f32,
    parent: Option<TileId>,
}

impl Node {
    fn total(&self) -> f32 {
        self.cost as f32 + self.heuristic
    }
}

/// Result of driving a search to completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SearchOutcome {
    Reached,
    Exhausted,
}

pub(crate) struct AStar<'g> {
    grid: &'g Grid,
    start: TileId,
    goal: TileId,
    traversal: Traversal,
    nodes: Vec<Node>,
    open: Vec<TileId>,
    closed: Vec<TileId>,
}

impl<'g> AStar<'g> {
    pub(crate) fn new(grid: &'g Grid, start: TileId, goal: TileId, traversal: Traversal) -> Self {
        Self {
            grid,
            start,
            goal,
            traversal,
            nodes: vec![Node::default(); grid.len()],
            open: Vec::new(),
            closed: Vec::new(),
        }
    }

    /// Expands tiles until the goal is selected or the open list empties.
    pub(crate) fn run(&mut self) -> SearchOutcome {
        let mut current = self.start;

        loop {
            if current == self.goal {
                return SearchOutcome::Reached;
            }

            self.close(current);
            self.expand(current);

            match self.pop_lowest() {
                Some(next) => current = next,
                None => return SearchOutcome::Exhausted,
            }
        }
    }

    /// Step count recorded for `tile`. Only meaningful after `run` reached it.
    pub(crate) fn cost(&self, tile: TileId) -> u32 {
        self.nodes[tile.index()].cost
    }

    /// Tiles from `end` back to the start, in travel order, excluding the start.
    pub(crate) fn trace(&self, end: TileId) -> Vec<TileId> {
        let mut path = Vec::new();
        let mut cursor = Some(end);

        while let Some(tile) = cursor {
            if tile == self.start {
                break;
            }
            path.push(tile);
            cursor = self.nodes[tile.index()].parent;
        }

        path.reverse();
        path
    }

    /// Closed tile nearest to the goal by straight-line distance.
    ///
    /// Scans in closing order and stops early at the first tile within
    /// 1.5 tile pitches of the goal.
    pub(crate) fn nearest_closed(&self) -> Option<TileId> {
        let early_exit = (self.grid.pitch() * 1.5).powi(2);
        let mut best: Option<(TileId, f32)> = None;

        for &tile in &self.closed {
            let distance = self.grid.distance_squared(tile, self.goal);
            if best.is_none_or(|(_, lowest)| distance < lowest) {
                best = Some((tile, distance));
                if distance < early_exit {
                    break;
                }
            }
        }

        best.map(|(tile, _)| tile)
    }

    #[cfg(test)]
    pub(crate) fn state(&self, tile: TileId) -> ListState {
        self.nodes[tile.index()].state
    }

    fn close(&mut self, tile: TileId) {
        self.nodes[tile.index()].state = ListState::Closed;
        self.closed.push(tile);
    }

    fn passable(&self, tile: TileId) -> bool {
        match self.traversal {
            Traversal::Unrestricted => true,
            Traversal::Walkable => tile == self.goal || !self.grid.tile(tile).is_occupied(),
        }
    }

    fn expand(&mut self, current: TileId) {
        let cost = self.nodes[current.index()].cost + 1;
        let grid = self.grid;

        for &neighbor in grid.tile(current).neighbors() {
            if !self.passable(neighbor) {
                continue;
            }

            let heuristic = grid.distance_squared(neighbor, self.goal);
            let node = &mut self.nodes[neighbor.index()];
            match node.state {
                ListState::Unassigned => {
                    node.state = ListState::Open;
                    node.cost = cost;
                    node.heuristic = heuristic;
                    node.parent = Some(current);
                    self.open.push(neighbor);
                }
                ListState::Open if cost < node.cost => {
                    node.cost = cost;
                    node.parent = Some(current);
                }
                ListState::Open | ListState::Closed => {}
            }
        }
    }

    /// Removes the open tile with the lowest total cost.
    ///
    /// Ties go to the tile inserted first.
    fn pop_lowest(&mut self) -> Option<TileId> {
        let mut best: Option<(usize, f32)> = None;

        for (position, tile) in self.open.iter().enumerate() {
            let total = self.nodes[tile.index()].total();
            if best.is_none_or(|(_, lowest)| total < lowest) {
                best = Some((position, total));
            }
        }

        best.map(|(position, _)| self.open.remove(position))
    }
}
