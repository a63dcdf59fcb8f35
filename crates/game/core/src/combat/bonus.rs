use std::collections::BTreeMap;

use crate::unit::UnitType;

/// Sparse type-advantage table keyed by `(attacker, target)`.
///
/// Missing pairs have no bonus. Negative entries act as penalties.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DamageBonusTable {
    entries: BTreeMap<(UnitType, UnitType), f32>,
}

impl DamageBonusTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces the bonus for a matchup.
    pub fn add(&mut self, attacker: UnitType, target: UnitType, bonus: f32) -> &mut Self {
        self.entries.insert((attacker, target), bonus);
        self
    }

    pub fn with(mut self, attacker: UnitType, target: UnitType, bonus: f32) -> Self {
        self.add(attacker, target, bonus);
        self
    }

    pub fn get(&self, attacker: UnitType, target: UnitType) -> f32 {
        self.entries
            .get(&(attacker, target))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (UnitType, UnitType, f32)> + '_ {
        self.entries
            .iter()
            .map(|(&(attacker, target), &bonus)| (attacker, target, bonus))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(UnitType, UnitType, f32)> for DamageBonusTable {
    fn from_iter<I: IntoIterator<Item = (UnitType, UnitType, f32)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (attacker, target, bonus) in iter {
            table.add(attacker, target, bonus);
        }
        table
    }
}
