//! Candidate generation, scoring and selection.
//!
//! For one unit every tile it could stand on this turn (its current tile
//! plus its walkable range) becomes a candidate [`AiAction`]. A candidate
//! starts at the tile's exposure weight and gains points for the best attack
//! available from there.

use rand::{Rng, RngCore};

use game_core::{AttackCommand, MoveCommand, TileId, UnitId, World};

use super::threat::ThreatMap;
use crate::config::AiWeights;

/// One unit's intended move and optional follow-up attack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AiAction {
    pub unit: UnitId,
    /// `None` when the unit stays where it is.
    pub move_to: Option<TileId>,
    pub target: Option<UnitId>,
    pub score: f32,
}

impl AiAction {
    /// Actions that attack end the faction's turn.
    pub fn ends_turn(&self) -> bool {
        self.target.is_some()
    }

    pub fn move_command(&self) -> Option<MoveCommand> {
        self.move_to.map(|tile| MoveCommand::new(self.unit, tile))
    }

    pub fn attack_command(&self) -> Option<AttackCommand> {
        self.target.map(|target| AttackCommand::new(self.unit, target))
    }
}

/// Scores candidate tiles for the units of one faction.
pub struct ActionScorer<'a> {
    world: &'a World,
    threat: &'a ThreatMap,
    weights: AiWeights,
}

impl<'a> ActionScorer<'a> {
    pub fn new(world: &'a World, threat: &'a ThreatMap, weights: AiWeights) -> Self {
        Self {
            world,
            threat,
            weights,
        }
    }

    /// Every candidate for `unit`, current tile first.
    pub fn candidates(&self, unit: UnitId) -> Vec<AiAction> {
        let Some(origin) = self.world.unit(unit).and_then(|u| u.tile()) else {
            return Vec::new();
        };

        let mut tiles = vec![origin];
        tiles.extend(self.world.reachable_tiles(unit));

        tiles
            .into_iter()
            .map(|tile| self.score_tile(unit, origin, tile))
            .collect()
    }

    fn score_tile(&self, unit: UnitId, origin: TileId, tile: TileId) -> AiAction {
        let base = self.threat.weight(tile) as f32;
        let near_lethal = self.world.config().near_lethal_threshold;
        let mut best: Option<(UnitId, f32)> = None;

        for target in self.world.attackable_from(unit, tile) {
            let (Some(attack), Some(victim)) = (
                self.world.resolve_attack(unit, target),
                self.world.unit(target),
            ) else {
                continue;
            };

            let mut score = base + self.weights.attack;
            if attack.bonus > 0.0 {
                score += self.weights.bonus;
            }
            if attack.lethal {
                score += self.weights.lethal;
            } else if attack.remaining_hp(victim.hp()) < near_lethal {
                score += self.weights.near_lethal;
            }

            if best.is_none_or(|(_, highest)| score > highest) {
                best = Some((target, score));
            }
        }

        AiAction {
            unit,
            move_to: (tile != origin).then_some(tile),
            target: best.map(|(target, _)| target),
            score: best.map_or(base, |(_, score)| score),
        }
    }
}

/// Picks uniformly among the highest-scoring candidates.
pub fn choose(mut candidates: Vec<AiAction>, rng: &mut dyn RngCore) -> Option<AiAction> {
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    let top = candidates.first()?.score;
    let tied = candidates
        .iter()
        .take_while(|candidate| candidate.score == top)
        .count();

    let chosen = candidates[rng.gen_range(0..tied)];
    tracing::debug!(
        unit = %chosen.unit,
        score = chosen.score,
        tied,
        move_to = ?chosen.move_to,
        target = ?chosen.target,
        "ai candidate chosen"
    );
    Some(chosen)
}

/// Moves first, then attacks, each group by descending score.
pub fn order_plan(actions: &mut [AiAction]) {
    actions.sort_by(|a, b| {
        a.ends_turn()
            .cmp(&b.ends_turn())
            .then_with(|| b.score.total_cmp(&a.score))
    });
}
