use super::DamageBonusTable;
use crate::unit::{Unit, UnitId};

/// Resolved outcome of one attacker striking one target.
///
/// Produced by [`resolve`] and never mutated afterwards. The AI builds these
/// speculatively to score candidates; the runtime builds one when an attack
/// is committed and lands it later.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackInstance {
    pub attacker: UnitId,
    pub target: UnitId,
    /// Type-advantage multiplier applied on top of base damage.
    pub bonus: f32,
    pub total_damage: f32,
    /// Whether the target's hit points reach zero, judged at resolve time.
    pub lethal: bool,
}

impl AttackInstance {
    /// Target hit points that would remain, not clamped.
    pub fn remaining_hp(&self, target_hp: f32) -> f32 {
        target_hp - self.total_damage
    }
}

/// Computes damage, bonus and lethality without side effects.
pub fn resolve(attacker: &Unit, target: &Unit, bonuses: &DamageBonusTable) -> AttackInstance {
    let bonus = bonuses.get(attacker.unit_type(), target.unit_type());
    let total_damage = attacker.damage() * (1.0 + bonus);

    AttackInstance {
        attacker: attacker.id(),
        target: target.id(),
        bonus,
        total_damage,
        lethal: target.hp() - total_damage <= 0.0,
    }
}

/// What landing an [`AttackInstance`] did to its target.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitOutcome {
    pub target: UnitId,
    pub damage: f32,
    pub remaining_hp: f32,
    /// Remaining fraction of maximum hit points, for life bars.
    pub life_ratio: f32,
    pub killed: bool,
}
