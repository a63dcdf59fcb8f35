use std::fmt;

use crate::unit::UnitId;

/// Index of a faction in the world's turn order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FactionId(pub u32);

impl FactionId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for FactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "faction#{}", self.0)
    }
}

/// A side in the battle and its roster of live units, in joining order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Faction {
    id: FactionId,
    name: String,
    human: bool,
    units: Vec<UnitId>,
    joined: u32,
}

impl Faction {
    pub(crate) fn new(id: FactionId, name: impl Into<String>, human: bool) -> Self {
        Self {
            id,
            name: name.into(),
            human,
            units: Vec::new(),
            joined: 0,
        }
    }

    pub fn id(&self) -> FactionId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether turns of this faction are driven by a human.
    pub fn is_human(&self) -> bool {
        self.human
    }

    pub fn units(&self) -> &[UnitId] {
        &self.units
    }

    pub fn has_units(&self) -> bool {
        !self.units.is_empty()
    }

    pub fn contains(&self, unit: UnitId) -> bool {
        self.units.contains(&unit)
    }

    /// Appends `unit` to the roster and returns its ordinal.
    pub(crate) fn add_unit(&mut self, unit: UnitId) -> u32 {
        let ordinal = self.joined;
        self.joined += 1;
        self.units.push(unit);
        ordinal
    }

    pub(crate) fn remove_unit(&mut self, unit: UnitId) -> bool {
        let before = self.units.len();
        self.units.retain(|&member| member != unit);
        self.units.len() != before
    }
}
