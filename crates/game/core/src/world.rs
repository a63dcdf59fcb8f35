//! The simulation context: grid, factions, units and the bonus table.
//!
//! [`World`] is the only writer of tile occupancy and unit placement, and it
//! changes both sides of that relation together. Violations of the pairing
//! are programming errors and panic.

use std::collections::BTreeMap;

use crate::combat::{self, AttackInstance, DamageBonusTable, HitOutcome};
use crate::config::GameConfig;
use crate::faction::{Faction, FactionId};
use crate::grid::{Grid, GridError, TileCoord, TileId, Traversal};
use crate::unit::{Unit, UnitId, UnitProfile};

#[derive(Clone, Debug)]
pub struct World {
    config: GameConfig,
    grid: Grid,
    factions: Vec<Faction>,
    units: BTreeMap<UnitId, Unit>,
    bonuses: DamageBonusTable,
    next_unit: u32,
}

impl World {
    pub fn new(config: GameConfig) -> Self {
        Self {
            grid: Grid::from_config(&config),
            config,
            factions: Vec::new(),
            units: BTreeMap::new(),
            bonuses: DamageBonusTable::new(),
            next_unit: 0,
        }
    }

    pub fn with_bonuses(mut self, bonuses: DamageBonusTable) -> Self {
        self.bonuses = bonuses;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn bonuses(&self) -> &DamageBonusTable {
        &self.bonuses
    }

    // ========================================================================
    // Factions
    // ========================================================================

    /// Registers a faction. Turn order follows registration order.
    pub fn add_faction(&mut self, name: impl Into<String>, human: bool) -> FactionId {
        let id = FactionId(self.factions.len() as u32);
        self.factions.push(Faction::new(id, name, human));
        id
    }

    pub fn faction(&self, id: FactionId) -> Option<&Faction> {
        self.factions.get(id.index())
    }

    pub fn factions(&self) -> &[Faction] {
        &self.factions
    }

    pub fn faction_name(&self, id: FactionId) -> &str {
        self.faction(id).map(Faction::name).unwrap_or("unknown")
    }

    /// Live units of `faction`, in roster order.
    pub fn living_units(&self, faction: FactionId) -> impl Iterator<Item = &Unit> + '_ {
        self.faction(faction)
            .into_iter()
            .flat_map(|faction| faction.units().iter())
            .filter_map(|id| self.units.get(id))
    }

    /// Unit of `faction` with the fewest hit points. Earlier roster entries
    /// win ties.
    pub fn weakest_unit(&self, faction: FactionId) -> Option<UnitId> {
        let mut weakest: Option<&Unit> = None;
        for unit in self.living_units(faction) {
            if weakest.is_none_or(|current| unit.hp() < current.hp()) {
                weakest = Some(unit);
            }
        }
        weakest.map(Unit::id)
    }

    /// Restores the per-turn move allowance of every unit in `faction`.
    pub fn restore_moves(&mut self, faction: FactionId) {
        let Some(roster) = self.faction(faction).map(|f| f.units().to_vec()) else {
            return;
        };
        for id in roster {
            if let Some(unit) = self.units.get_mut(&id) {
                unit.restore_moves();
            }
        }
    }

    // ========================================================================
    // Units
    // ========================================================================

    /// Creates a unit and places it on the tile at `coord`.
    ///
    /// # Panics
    ///
    /// Panics if `faction` was not registered with [`add_faction`](Self::add_faction).
    pub fn spawn_unit(
        &mut self,
        faction: FactionId,
        profile: UnitProfile,
        coord: TileCoord,
    ) -> Result<UnitId, GridError> {
        let tile = self.grid.require_tile_at(coord)?;
        if let Some(occupant) = self.grid.occupant(tile) {
            return Err(GridError::Occupied { tile, occupant });
        }

        let id = UnitId(self.next_unit);
        self.next_unit += 1;

        let roster = self
            .factions
            .get_mut(faction.index())
            .unwrap_or_else(|| panic!("{faction} is not registered"));
        let ordinal = roster.add_unit(id);

        let mut unit = Unit::new(id, faction, ordinal, profile);
        unit.set_tile(Some(tile));
        self.grid.set_occupant(tile, Some(id));
        self.units.insert(id, unit);

        Ok(id)
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    pub fn units(&self) -> impl Iterator<Item = &Unit> + '_ {
        self.units.values()
    }

    pub fn unit_at(&self, tile: TileId) -> Option<&Unit> {
        self.grid.occupant(tile).and_then(|id| self.units.get(&id))
    }

    pub fn is_hostile(&self, a: UnitId, b: UnitId) -> bool {
        match (self.unit(a), self.unit(b)) {
            (Some(a), Some(b)) => a.faction() != b.faction(),
            _ => false,
        }
    }

    /// Deducts `steps` from the unit's remaining moves, saturating at zero.
    pub fn spend_moves(&mut self, id: UnitId, steps: u32) {
        if let Some(unit) = self.units.get_mut(&id) {
            let left = unit.moves_left().saturating_sub(steps);
            unit.set_moves_left(left);
        }
    }

    /// Takes a unit off its tile before it starts walking.
    ///
    /// # Panics
    ///
    /// Panics if the unit is unknown, already lifted, or its tile does not
    /// name it as occupant.
    pub fn lift_unit(&mut self, id: UnitId) -> TileId {
        let unit = self
            .units
            .get_mut(&id)
            .unwrap_or_else(|| panic!("cannot lift unknown {id}"));
        let tile = unit
            .tile()
            .unwrap_or_else(|| panic!("{id} is already off the board"));
        assert_eq!(
            self.grid.occupant(tile),
            Some(id),
            "{tile} does not hold {id}"
        );

        unit.set_tile(None);
        self.grid.set_occupant(tile, None);
        tile
    }

    /// Puts a lifted unit down on `tile`.
    ///
    /// # Panics
    ///
    /// Panics if the unit is unknown, still placed, or `tile` is occupied.
    pub fn land_unit(&mut self, id: UnitId, tile: TileId) {
        let unit = self
            .units
            .get_mut(&id)
            .unwrap_or_else(|| panic!("cannot land unknown {id}"));
        assert!(unit.tile().is_none(), "{id} is still placed on the board");
        if let Some(occupant) = self.grid.occupant(tile) {
            panic!("{tile} is already occupied by {occupant}");
        }

        unit.set_tile(Some(tile));
        self.grid.set_occupant(tile, Some(id));
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Tiles the unit can walk to with its remaining moves.
    pub fn reachable_tiles(&self, id: UnitId) -> Vec<TileId> {
        let Some(unit) = self.unit(id) else {
            return Vec::new();
        };
        let Some(origin) = unit.tile() else {
            return Vec::new();
        };
        self.grid
            .tiles_within_distance(origin, unit.moves_left(), Traversal::Walkable)
    }

    /// Hostile units the attacker could strike if it stood on `from`.
    pub fn attackable_from(&self, attacker: UnitId, from: TileId) -> Vec<UnitId> {
        let Some(unit) = self.unit(attacker) else {
            return Vec::new();
        };
        self.grid
            .tiles_within_distance(from, unit.attack_range(), Traversal::Unrestricted)
            .into_iter()
            .filter_map(|tile| self.grid.occupant(tile))
            .filter(|&occupant| occupant != attacker && self.is_hostile(attacker, occupant))
            .collect()
    }

    /// Whether `target` is hostile and within the attacker's range right now.
    pub fn can_attack(&self, attacker: UnitId, target: UnitId) -> bool {
        let (Some(from), Some(to)) = (
            self.unit(attacker).and_then(Unit::tile),
            self.unit(target).and_then(Unit::tile),
        ) else {
            return false;
        };
        if !self.is_hostile(attacker, target) {
            return false;
        }
        let range = self.unit(attacker).map_or(0, Unit::attack_range);
        self.grid
            .distance(from, to, Traversal::Unrestricted)
            .is_some_and(|steps| steps >= 1 && steps <= range)
    }

    pub fn resolve_attack(&self, attacker: UnitId, target: UnitId) -> Option<AttackInstance> {
        let attacker = self.unit(attacker)?;
        let target = self.unit(target)?;
        Some(combat::resolve(attacker, target, &self.bonuses))
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Lands a resolved attack on its target.
    ///
    /// Returns `None` if the target no longer exists. A killed target is
    /// removed from its tile, its faction and the world in one step.
    pub fn apply_hit(&mut self, attack: &AttackInstance) -> Option<HitOutcome> {
        let unit = self.units.get_mut(&attack.target)?;
        let remaining = unit.hp() - attack.total_damage;
        unit.set_hp(remaining);

        let outcome = HitOutcome {
            target: attack.target,
            damage: attack.total_damage,
            remaining_hp: remaining.max(0.0),
            life_ratio: unit.life_ratio(),
            killed: remaining <= 0.0,
        };

        if outcome.killed {
            self.remove_unit(attack.target);
        }
        Some(outcome)
    }

    /// Restores a share of the unit's maximum hit points and returns the
    /// amount actually recovered.
    pub fn rest(&mut self, id: UnitId) -> f32 {
        let ratio = self.config.rest_ratio;
        let Some(unit) = self.units.get_mut(&id) else {
            return 0.0;
        };
        let before = unit.hp();
        unit.set_hp(before + unit.max_hp() * ratio);
        unit.hp() - before
    }

    fn remove_unit(&mut self, id: UnitId) {
        let Some(unit) = self.units.remove(&id) else {
            return;
        };
        if let Some(tile) = unit.tile() {
            self.grid.set_occupant(tile, None);
        }
        if let Some(faction) = self.factions.get_mut(unit.faction().index()) {
            faction.remove_unit(id);
        }
    }

    /// Checks that tile occupants and unit placements mirror each other.
    ///
    /// # Panics
    ///
    /// Panics on the first mismatch.
    pub fn assert_occupancy_consistent(&self) {
        for tile in self.grid.tiles() {
            if let Some(occupant) = tile.occupant() {
                let placed = self.unit(occupant).and_then(Unit::tile);
                assert_eq!(
                    placed,
                    Some(tile.id()),
                    "{} names {occupant} but the unit is elsewhere",
                    tile.id()
                );
            }
        }
        for unit in self.units.values() {
            if let Some(tile) = unit.tile() {
                assert_eq!(
                    self.grid.occupant(tile),
                    Some(unit.id()),
                    "{} claims {tile} but the tile disagrees",
                    unit.id()
                );
            }
            assert!(
                self.faction(unit.faction())
                    .is_some_and(|faction| faction.contains(unit.id())),
                "{} is missing from its faction roster",
                unit.id()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::UnitType;

    struct TestContext {
        world: World,
        red: FactionId,
        blue: FactionId,
    }

    impl TestContext {
        fn new() -> Self {
            let mut world = World::new(GameConfig::new());
            let red = world.add_faction("red", true);
            let blue = world.add_faction("blue", false);
            Self { world, red, blue }
        }

        fn spawn(&mut self, faction: FactionId, unit_type: UnitType, x: i32, z: i32) -> UnitId {
            self.world
                .spawn_unit(faction, UnitProfile::preset(unit_type), TileCoord::new(x, z))
                .unwrap()
        }
    }

    #[test]
    fn spawn_rejects_occupied_and_out_of_bounds_tiles() {
        let mut ctx = TestContext::new();
        ctx.spawn(ctx.red, UnitType::Pikes, 0, 0);

        let taken = ctx.world.spawn_unit(
            ctx.blue,
            UnitProfile::preset(UnitType::Pikes),
            TileCoord::new(0, 0),
        );
        assert!(matches!(taken, Err(GridError::Occupied { .. })));

        let outside = ctx.world.spawn_unit(
            ctx.blue,
            UnitProfile::preset(UnitType::Pikes),
            TileCoord::new(8, 0),
        );
        assert!(matches!(outside, Err(GridError::OutOfBounds { .. })));
        ctx.world.assert_occupancy_consistent();
    }

    #[test]
    fn ordinals_are_per_faction() {
        let mut ctx = TestContext::new();
        let a = ctx.spawn(ctx.red, UnitType::Pikes, 0, 0);
        let b = ctx.spawn(ctx.blue, UnitType::Pikes, 1, 0);
        let c = ctx.spawn(ctx.red, UnitType::Pikes, 2, 0);
        assert_eq!(ctx.world.unit(a).unwrap().ordinal(), 0);
        assert_eq!(ctx.world.unit(b).unwrap().ordinal(), 0);
        assert_eq!(ctx.world.unit(c).unwrap().ordinal(), 1);
    }

    #[test]
    fn lift_and_land_keep_occupancy_paired() {
        let mut ctx = TestContext::new();
        let unit = ctx.spawn(ctx.red, UnitType::Infantry, 0, 0);
        let from = ctx.world.lift_unit(unit);
        assert_eq!(ctx.world.grid().occupant(from), None);
        assert_eq!(ctx.world.unit(unit).unwrap().tile(), None);

        let to = ctx.world.grid().tile_at(TileCoord::new(0, 2)).unwrap();
        ctx.world.land_unit(unit, to);
        assert_eq!(ctx.world.unit_at(to).map(Unit::id), Some(unit));
        ctx.world.assert_occupancy_consistent();
    }

    #[test]
    #[should_panic(expected = "already occupied")]
    fn landing_on_occupied_tile_panics() {
        let mut ctx = TestContext::new();
        let walker = ctx.spawn(ctx.red, UnitType::Infantry, 0, 0);
        ctx.spawn(ctx.blue, UnitType::Infantry, 0, 1);
        ctx.world.lift_unit(walker);
        let blocked = ctx.world.grid().tile_at(TileCoord::new(0, 1)).unwrap();
        ctx.world.land_unit(walker, blocked);
    }

    #[test]
    fn lethal_hit_removes_unit_everywhere() {
        let mut ctx = TestContext::new();
        let attacker = ctx.spawn(ctx.red, UnitType::Chivalry, 0, 0);
        let target = ctx.spawn(ctx.blue, UnitType::Archers, 0, 1);
        let tile = ctx.world.unit(target).unwrap().tile().unwrap();

        let mut attack = ctx.world.resolve_attack(attacker, target).unwrap();
        attack.total_damage = 100.0;
        let outcome = ctx.world.apply_hit(&attack).unwrap();

        assert!(outcome.killed);
        assert_eq!(outcome.life_ratio, 0.0);
        assert!(ctx.world.unit(target).is_none());
        assert_eq!(ctx.world.grid().occupant(tile), None);
        assert!(!ctx.world.faction(ctx.blue).unwrap().has_units());
        assert!(ctx.world.apply_hit(&attack).is_none());
        ctx.world.assert_occupancy_consistent();
    }

    #[test]
    fn rest_recovers_ten_percent_clamped() {
        let mut ctx = TestContext::new();
        let unit = ctx.spawn(ctx.red, UnitType::Infantry, 0, 0);
        assert_eq!(ctx.world.rest(unit), 0.0);

        ctx.world.units.get_mut(&unit).unwrap().set_hp(9.5);
        let recovered = ctx.world.rest(unit);
        assert!((recovered - 0.5).abs() < 1e-6);
        assert_eq!(ctx.world.unit(unit).unwrap().hp(), 10.0);
    }

    #[test]
    fn attackable_from_only_lists_hostiles_in_range() {
        let mut ctx = TestContext::new();
        let archer = ctx.spawn(ctx.red, UnitType::Archers, 0, 0);
        let friend = ctx.spawn(ctx.red, UnitType::Pikes, 0, 1);
        let foe = ctx.spawn(ctx.blue, UnitType::Pikes, 0, 4);
        let far = ctx.spawn(ctx.blue, UnitType::Pikes, 7, 7);

        let from = ctx.world.unit(archer).unwrap().tile().unwrap();
        let targets = ctx.world.attackable_from(archer, from);
        assert_eq!(targets, vec![foe]);
        assert!(!targets.contains(&friend));
        assert!(!targets.contains(&far));
        assert!(ctx.world.can_attack(archer, foe));
        assert!(!ctx.world.can_attack(archer, friend));
    }

    #[test]
    fn weakest_unit_picks_lowest_hp() {
        let mut ctx = TestContext::new();
        let a = ctx.spawn(ctx.red, UnitType::Infantry, 0, 0);
        let b = ctx.spawn(ctx.red, UnitType::Infantry, 1, 0);
        assert_eq!(ctx.world.weakest_unit(ctx.red), Some(a));

        ctx.world.units.get_mut(&b).unwrap().set_hp(3.0);
        assert_eq!(ctx.world.weakest_unit(ctx.red), Some(b));
        assert_eq!(ctx.world.weakest_unit(ctx.blue), None);
    }
}
