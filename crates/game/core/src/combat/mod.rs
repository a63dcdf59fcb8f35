//! Combat resolution.
//!
//! Everything here is pure: [`resolve`] reads an attacker, a target and the
//! bonus table and produces an [`AttackInstance`] without touching either
//! unit. Hit points only change when the runtime lands the hit through
//! [`World::apply_hit`](crate::World::apply_hit).
//!
//! # Formula
//!
//! ```text
//! bonus        = table[(attacker type, target type)]   (0 when absent)
//! total_damage = damage * (1 + bonus)
//! lethal       = target.hp - total_damage <= 0
//! ```

mod attack;
mod bonus;

pub use attack::{AttackInstance, HitOutcome, resolve};
pub use bonus::DamageBonusTable;
