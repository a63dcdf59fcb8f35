//! Battle setup: board configuration, type bonuses and starting units.

use crate::combat::DamageBonusTable;
use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::grid::{GridError, TileCoord};
use crate::unit::{UnitProfile, UnitType};
use crate::world::World;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ScenarioError {
    #[error("a battle needs at least two factions, found {found}")]
    NotEnoughFactions { found: usize },

    #[error("grid must be at least 1x1, got {width}x{length}")]
    EmptyGrid { width: u32, length: u32 },

    #[error("cannot place {unit_type} of faction '{faction}': {source}")]
    Placement {
        faction: String,
        unit_type: UnitType,
        #[source]
        source: GridError,
    },
}

impl GameError for ScenarioError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            ScenarioError::NotEnoughFactions { .. } => "SCENARIO_NOT_ENOUGH_FACTIONS",
            ScenarioError::EmptyGrid { .. } => "SCENARIO_EMPTY_GRID",
            ScenarioError::Placement { .. } => "SCENARIO_PLACEMENT",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BonusEntry {
    pub attacker: UnitType,
    pub target: UnitType,
    pub bonus: f32,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitSpec {
    pub unit_type: UnitType,
    pub at: TileCoord,
    /// Replaces the preset for `unit_type` when given.
    #[cfg_attr(feature = "serde", serde(default))]
    pub profile: Option<UnitProfile>,
}

impl UnitSpec {
    pub fn new(unit_type: UnitType, x: i32, z: i32) -> Self {
        Self {
            unit_type,
            at: TileCoord::new(x, z),
            profile: None,
        }
    }

    pub fn with_profile(mut self, profile: UnitProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn profile(&self) -> UnitProfile {
        self.profile
            .unwrap_or_else(|| UnitProfile::preset(self.unit_type))
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FactionSpec {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub human: bool,
    pub units: Vec<UnitSpec>,
}

impl FactionSpec {
    pub fn new(name: impl Into<String>, human: bool) -> Self {
        Self {
            name: name.into(),
            human,
            units: Vec::new(),
        }
    }

    pub fn with_unit(mut self, unit: UnitSpec) -> Self {
        self.units.push(unit);
        self
    }
}

/// Everything needed to build a [`World`].
///
/// Factions take turns in the order listed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario {
    #[cfg_attr(feature = "serde", serde(default))]
    pub config: GameConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonuses: Vec<BonusEntry>,
    pub factions: Vec<FactionSpec>,
}

impl Scenario {
    /// The default 8x8 battle: a human "player" faction against an "AI"
    /// faction, four unit types each.
    pub fn skirmish() -> Self {
        let player = FactionSpec::new("player", true)
            .with_unit(UnitSpec::new(UnitType::Infantry, 2, 1))
            .with_unit(UnitSpec::new(UnitType::Chivalry, 3, 1))
            .with_unit(UnitSpec::new(UnitType::Pikes, 4, 1))
            .with_unit(UnitSpec::new(UnitType::Archers, 3, 0));
        let ai = FactionSpec::new("AI", false)
            .with_unit(UnitSpec::new(UnitType::Infantry, 5, 6))
            .with_unit(UnitSpec::new(UnitType::Chivalry, 4, 6))
            .with_unit(UnitSpec::new(UnitType::Pikes, 3, 6))
            .with_unit(UnitSpec::new(UnitType::Archers, 4, 7));

        Self {
            config: GameConfig::new(),
            bonuses: default_bonuses(),
            factions: vec![player, ai],
        }
    }

    pub fn bonus_table(&self) -> DamageBonusTable {
        self.bonuses
            .iter()
            .map(|entry| (entry.attacker, entry.target, entry.bonus))
            .collect()
    }

    /// Treats every faction as computer-controlled.
    pub fn all_computer(mut self) -> Self {
        for faction in &mut self.factions {
            faction.human = false;
        }
        self
    }
}

fn default_bonuses() -> Vec<BonusEntry> {
    [
        (UnitType::Chivalry, UnitType::Archers, 0.8),
        (UnitType::Pikes, UnitType::Chivalry, 0.7),
        (UnitType::Archers, UnitType::Chivalry, 0.3),
        (UnitType::Infantry, UnitType::Archers, 0.1),
    ]
    .into_iter()
    .map(|(attacker, target, bonus)| BonusEntry {
        attacker,
        target,
        bonus,
    })
    .collect()
}

impl World {
    /// Builds a world from a scenario, validating every placement.
    pub fn from_scenario(scenario: &Scenario) -> Result<World, ScenarioError> {
        let config = scenario.config.clone();
        if config.width == 0 || config.length == 0 {
            return Err(ScenarioError::EmptyGrid {
                width: config.width,
                length: config.length,
            });
        }
        if scenario.factions.len() < 2 {
            return Err(ScenarioError::NotEnoughFactions {
                found: scenario.factions.len(),
            });
        }

        let mut world = World::new(config).with_bonuses(scenario.bonus_table());
        for spec in &scenario.factions {
            let faction = world.add_faction(spec.name.clone(), spec.human);
            for unit in &spec.units {
                world
                    .spawn_unit(faction, unit.profile(), unit.at)
                    .map_err(|source| ScenarioError::Placement {
                        faction: spec.name.clone(),
                        unit_type: unit.unit_type,
                        source,
                    })?;
            }
        }

        Ok(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skirmish_builds_two_full_factions() {
        let world = World::from_scenario(&Scenario::skirmish()).unwrap();
        assert_eq!(world.factions().len(), 2);
        assert!(world.factions()[0].is_human());
        assert!(!world.factions()[1].is_human());
        assert_eq!(world.units().count(), 8);
        assert_eq!(world.bonuses().get(UnitType::Chivalry, UnitType::Archers), 0.8);
        world.assert_occupancy_consistent();
    }

    #[test]
    fn single_faction_is_rejected() {
        let mut scenario = Scenario::skirmish();
        scenario.factions.truncate(1);
        assert_eq!(
            World::from_scenario(&scenario).unwrap_err(),
            ScenarioError::NotEnoughFactions { found: 1 }
        );
    }

    #[test]
    fn double_booked_tile_is_rejected() {
        let mut scenario = Scenario::skirmish();
        scenario.factions[1]
            .units
            .push(UnitSpec::new(UnitType::Pikes, 2, 1));
        let error = World::from_scenario(&scenario).unwrap_err();
        assert!(matches!(
            error,
            ScenarioError::Placement {
                source: GridError::Occupied { .. },
                ..
            }
        ));
    }
}
