use std::collections::BTreeSet;

use game_core::{FactionId, TileId, Traversal, World};

/// Per-tile exposure to hostile retaliation.
///
/// Every hostile unit lowers the weight of each tile it could strike this
/// coming turn by one: tiles it can attack from where it stands, or from
/// any tile it could walk to first. A unit counts once per tile no matter
/// how many of its origins reach it.
#[derive(Clone, Debug)]
pub struct ThreatMap {
    weights: Vec<i32>,
}

impl ThreatMap {
    /// Builds the exposure map as seen by `faction`.
    pub fn build(world: &World, faction: FactionId) -> Self {
        let grid = world.grid();
        let mut weights = vec![0; grid.len()];

        for enemy in world.units().filter(|unit| unit.faction() != faction) {
            let Some(origin) = enemy.tile() else {
                continue;
            };

            let mut origins = vec![origin];
            origins.extend(grid.tiles_within_distance(
                origin,
                enemy.profile().move_range,
                Traversal::Walkable,
            ));

            let threatened: BTreeSet<TileId> = origins
                .into_iter()
                .flat_map(|from| {
                    grid.tiles_within_distance(from, enemy.attack_range(), Traversal::Unrestricted)
                })
                .collect();

            for tile in threatened {
                weights[tile.index()] -= 1;
            }
        }

        Self { weights }
    }

    pub fn weight(&self, tile: TileId) -> i32 {
        self.weights.get(tile.index()).copied().unwrap_or(0)
    }

    pub fn is_exposed(&self, tile: TileId) -> bool {
        self.weight(tile) < 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{GameConfig, TileCoord, UnitProfile, UnitType};

    #[test]
    fn exposure_counts_each_enemy_once() {
        let mut world = World::new(GameConfig::new().with_dimensions(6, 6));
        let ai = world.add_faction("ai", false);
        let player = world.add_faction("player", true);
        let pikes = UnitProfile::preset(UnitType::Pikes);
        world.spawn_unit(ai, pikes, TileCoord::new(0, 0)).unwrap();
        world.spawn_unit(player, pikes, TileCoord::new(3, 3)).unwrap();
        world.spawn_unit(player, pikes, TileCoord::new(3, 4)).unwrap();

        let threat = ThreatMap::build(&world, ai);
        let grid = world.grid();
        let between = grid.tile_at(TileCoord::new(2, 3)).unwrap();
        let far = grid.tile_at(TileCoord::new(0, 0)).unwrap();

        assert_eq!(threat.weight(between), -2);
        assert_eq!(threat.weight(far), 0);
        assert!(!threat.is_exposed(far));
    }

    #[test]
    fn own_units_do_not_threaten() {
        let mut world = World::new(GameConfig::new());
        let ai = world.add_faction("ai", false);
        world.add_faction("player", true);
        world
            .spawn_unit(ai, UnitProfile::preset(UnitType::Archers), TileCoord::new(4, 4))
            .unwrap();

        let threat = ThreatMap::build(&world, ai);
        assert!(world.grid().tiles().all(|tile| threat.weight(tile.id()) == 0));
    }
}
