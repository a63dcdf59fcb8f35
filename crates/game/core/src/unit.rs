//! Units and their static profiles.

use std::fmt;

use crate::faction::FactionId;
use crate::grid::TileId;

/// Stable identifier of a unit within one [`World`](crate::World).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unit#{}", self.0)
    }
}

/// Unit type tag used by the damage-bonus table.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum UnitType {
    Chivalry,
    Pikes,
    Archers,
    Infantry,
}

/// Projectile families a ranged unit can launch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProjectileKind {
    Arrow,
}

/// How an attack reaches its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackDelivery {
    /// Hit lands partway through the attack animation.
    #[default]
    Melee,
    /// Hit lands when the projectile reaches the target.
    Projectile(ProjectileKind),
}

impl AttackDelivery {
    pub fn is_ranged(self) -> bool {
        matches!(self, AttackDelivery::Projectile(_))
    }
}

/// Static characteristics shared by every unit of a kind.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitProfile {
    pub unit_type: UnitType,
    pub max_hp: f32,
    /// Steps the unit may walk per turn.
    pub move_range: u32,
    /// Steps, ignoring occupancy, at which the unit can strike.
    pub attack_range: u32,
    /// Base damage before type bonuses.
    pub damage: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub delivery: AttackDelivery,
}

impl UnitProfile {
    pub fn new(unit_type: UnitType, max_hp: f32, move_range: u32, attack_range: u32) -> Self {
        Self {
            unit_type,
            max_hp,
            move_range,
            attack_range,
            damage: 1.0,
            delivery: AttackDelivery::Melee,
        }
    }

    /// Default profile for a unit type.
    pub fn preset(unit_type: UnitType) -> Self {
        match unit_type {
            UnitType::Chivalry => Self::new(unit_type, 10.0, 4, 1).with_damage(3.0),
            UnitType::Pikes => Self::new(unit_type, 12.0, 2, 1).with_damage(3.0),
            UnitType::Archers => Self::new(unit_type, 8.0, 2, 5)
                .with_damage(2.0)
                .with_delivery(AttackDelivery::Projectile(ProjectileKind::Arrow)),
            UnitType::Infantry => Self::new(unit_type, 10.0, 3, 1).with_damage(3.0),
        }
    }

    pub fn with_damage(mut self, damage: f32) -> Self {
        self.damage = damage;
        self
    }

    pub fn with_delivery(mut self, delivery: AttackDelivery) -> Self {
        self.delivery = delivery;
        self
    }

    pub fn with_max_hp(mut self, max_hp: f32) -> Self {
        self.max_hp = max_hp;
        self
    }

    pub fn with_move_range(mut self, move_range: u32) -> Self {
        self.move_range = move_range;
        self
    }

    pub fn with_attack_range(mut self, attack_range: u32) -> Self {
        self.attack_range = attack_range;
        self
    }
}

/// A live unit on the board.
///
/// `tile` is `None` while the unit is walking between tiles. Whenever it is
/// `Some(t)`, tile `t` names this unit as its occupant; [`World`](crate::World)
/// is the only writer of both sides.
#[derive(Clone, Debug, PartialEq)]
pub struct Unit {
    id: UnitId,
    faction: FactionId,
    /// Position within the faction roster at the time the unit joined.
    ordinal: u32,
    profile: UnitProfile,
    hp: f32,
    moves_left: u32,
    tile: Option<TileId>,
}

impl Unit {
    pub(crate) fn new(id: UnitId, faction: FactionId, ordinal: u32, profile: UnitProfile) -> Self {
        Self {
            id,
            faction,
            ordinal,
            profile,
            hp: profile.max_hp,
            moves_left: profile.move_range,
            tile: None,
        }
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn faction(&self) -> FactionId {
        self.faction
    }

    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    pub fn profile(&self) -> &UnitProfile {
        &self.profile
    }

    pub fn unit_type(&self) -> UnitType {
        self.profile.unit_type
    }

    pub fn hp(&self) -> f32 {
        self.hp
    }

    pub fn max_hp(&self) -> f32 {
        self.profile.max_hp
    }

    /// Fraction of maximum hit points remaining, in `[0, 1]`.
    pub fn life_ratio(&self) -> f32 {
        if self.profile.max_hp <= 0.0 {
            return 0.0;
        }
        (self.hp / self.profile.max_hp).clamp(0.0, 1.0)
    }

    pub fn moves_left(&self) -> u32 {
        self.moves_left
    }

    pub fn attack_range(&self) -> u32 {
        self.profile.attack_range
    }

    pub fn damage(&self) -> f32 {
        self.profile.damage
    }

    pub fn delivery(&self) -> AttackDelivery {
        self.profile.delivery
    }

    pub fn tile(&self) -> Option<TileId> {
        self.tile
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }

    pub(crate) fn set_tile(&mut self, tile: Option<TileId>) {
        self.tile = tile;
    }

    pub(crate) fn set_hp(&mut self, hp: f32) {
        self.hp = hp.min(self.profile.max_hp);
    }

    pub(crate) fn set_moves_left(&mut self, moves: u32) {
        self.moves_left = moves.min(self.profile.move_range);
    }

    pub(crate) fn restore_moves(&mut self) {
        self.moves_left = self.profile.move_range;
    }
}
