//! Computer-controlled factions.
//!
//! When its faction's turn begins the controller scores every unit's options
//! once and queues one action per unit. Each time the action gate reopens it
//! is polled for the next command, re-validating queued actions against the
//! current world and recomputing a unit's decision when its plan went stale.
//! Once the queue is exhausted the faction's weakest unit rests.

mod scoring;
mod threat;

pub use scoring::{AiAction, ActionScorer, choose, order_plan};
pub use threat::ThreatMap;

use std::collections::VecDeque;

use rand::RngCore;

use game_core::{AttackCommand, Command, FactionId, RestCommand, UnitId, World};

use crate::arena::Arena;
use crate::config::AiWeights;

#[derive(Clone, Debug)]
pub struct AiController {
    faction: FactionId,
    weights: AiWeights,
    plan: VecDeque<AiAction>,
    follow_up: Option<AttackCommand>,
    active: bool,
}

impl AiController {
    pub fn new(faction: FactionId, weights: AiWeights) -> Self {
        Self {
            faction,
            weights,
            plan: VecDeque::new(),
            follow_up: None,
            active: false,
        }
    }

    pub fn faction(&self) -> FactionId {
        self.faction
    }

    /// Actions still queued for this turn.
    pub fn plan(&self) -> impl Iterator<Item = &AiAction> {
        self.plan.iter()
    }

    /// Builds this turn's plan when `faction` is ours, otherwise goes idle.
    pub fn on_turn_changed(&mut self, world: &World, faction: FactionId, rng: &mut dyn RngCore) {
        self.plan.clear();
        self.follow_up = None;
        self.active = faction == self.faction;
        if !self.active {
            return;
        }

        let threat = ThreatMap::build(world, self.faction);
        let scorer = ActionScorer::new(world, &threat, self.weights);
        let mut plan: Vec<AiAction> = world
            .living_units(self.faction)
            .filter_map(|unit| choose(scorer.candidates(unit.id()), rng))
            .collect();
        order_plan(&mut plan);

        tracing::debug!(
            faction = %self.faction,
            actions = plan.len(),
            attacks = plan.iter().filter(|action| action.ends_turn()).count(),
            "ai plan built"
        );
        self.plan = plan.into();
    }

    /// Next command to issue, if it is our turn and the gate is open.
    pub fn poll(&mut self, arena: &Arena, rng: &mut dyn RngCore) -> Option<Command> {
        if !self.active
            || !arena.can_perform_action()
            || arena.turns().current_faction() != self.faction
        {
            return None;
        }
        let world = arena.world();

        if let Some(attack) = self.follow_up.take() {
            if world.can_attack(attack.attacker, attack.target) {
                return Some(attack.into());
            }
            tracing::warn!(
                attacker = %attack.attacker,
                target = %attack.target,
                "queued attack target no longer in range; recomputing"
            );
            if let Some(fresh) = self.decide(world, attack.attacker, rng) {
                self.plan.push_front(fresh);
            }
        }

        while let Some(action) = self.plan.pop_front() {
            if world.unit(action.unit).is_none() {
                continue;
            }

            let action = if is_stale(world, &action) {
                tracing::warn!(
                    unit = %action.unit,
                    move_to = ?action.move_to,
                    target = ?action.target,
                    "queued action went stale; recomputing"
                );
                match self.decide(world, action.unit, rng) {
                    Some(fresh) if !is_stale(world, &fresh) => fresh,
                    _ => continue,
                }
            } else {
                action
            };

            if let Some(command) = self.issue(action) {
                return Some(command);
            }
        }

        self.active = false;
        let weakest = world.weakest_unit(self.faction)?;
        tracing::debug!(unit = %weakest, "ai plan exhausted; resting weakest unit");
        Some(RestCommand::new(weakest).into())
    }

    /// Fresh single-unit decision against the current world.
    fn decide(&self, world: &World, unit: UnitId, rng: &mut dyn RngCore) -> Option<AiAction> {
        let threat = ThreatMap::build(world, self.faction);
        let scorer = ActionScorer::new(world, &threat, self.weights);
        choose(scorer.candidates(unit), rng)
    }

    fn issue(&mut self, action: AiAction) -> Option<Command> {
        match (action.move_command(), action.attack_command()) {
            (Some(step), attack) => {
                self.follow_up = attack;
                Some(step.into())
            }
            (None, Some(attack)) => Some(attack.into()),
            (None, None) => None,
        }
    }
}

/// Whether a queued action can no longer be carried out as planned.
fn is_stale(world: &World, action: &AiAction) -> bool {
    match (action.move_to, action.target) {
        (Some(tile), target) => {
            if world.grid().occupant(tile).is_some()
                || !world.reachable_tiles(action.unit).contains(&tile)
            {
                return true;
            }
            target.is_some_and(|target| !world.attackable_from(action.unit, tile).contains(&target))
        }
        (None, Some(target)) => !world.can_attack(action.unit, target),
        (None, None) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use game_core::{GameConfig, MoveCommand, TileCoord, TileId, UnitProfile, UnitType};

    use crate::config::TimingConfig;

    struct TestContext {
        arena: Arena,
        ai: AiController,
        rng: StdRng,
        knight: UnitId,
        blocker: UnitId,
        enemy: UnitId,
    }

    impl TestContext {
        /// AI knight in a corner with its ally beside it and an enemy three
        /// tiles down the edge.
        fn new() -> Self {
            let mut world = World::new(GameConfig::new());
            let ai = world.add_faction("ai", false);
            let player = world.add_faction("player", true);
            let knight = world
                .spawn_unit(ai, UnitProfile::preset(UnitType::Chivalry), TileCoord::new(0, 0))
                .unwrap();
            let blocker = world
                .spawn_unit(ai, UnitProfile::preset(UnitType::Pikes), TileCoord::new(0, 1))
                .unwrap();
            let enemy = world
                .spawn_unit(player, UnitProfile::preset(UnitType::Pikes), TileCoord::new(3, 0))
                .unwrap();

            let mut arena = Arena::new(world, TimingConfig::instant());
            arena.reset_turns();
            Self {
                arena,
                ai: AiController::new(ai, AiWeights::default()),
                rng: StdRng::seed_from_u64(3),
                knight,
                blocker,
                enemy,
            }
        }

        fn tile(&self, x: i32, z: i32) -> TileId {
            self.arena.world().grid().tile_at(TileCoord::new(x, z)).unwrap()
        }
    }

    #[test]
    fn inactive_controller_issues_nothing() {
        let mut ctx = TestContext::new();
        assert_eq!(ctx.ai.poll(&ctx.arena, &mut ctx.rng), None);
    }

    #[test]
    fn plan_has_one_action_per_unit() {
        let mut ctx = TestContext::new();
        let faction = ctx.ai.faction();
        ctx.ai.on_turn_changed(ctx.arena.world(), faction, &mut ctx.rng);

        let units: Vec<UnitId> = ctx.ai.plan().map(|action| action.unit).collect();
        assert_eq!(units.len(), 2);
        assert!(units.contains(&ctx.knight));
        assert!(units.contains(&ctx.blocker));
    }

    #[test]
    fn stale_move_is_recomputed() {
        let mut ctx = TestContext::new();
        let occupied = ctx.tile(0, 1);
        ctx.ai.active = true;
        ctx.ai.plan.push_back(AiAction {
            unit: ctx.knight,
            move_to: Some(occupied),
            target: None,
            score: 10.0,
        });

        let command = ctx.ai.poll(&ctx.arena, &mut ctx.rng).unwrap();
        match command {
            Command::Move(MoveCommand { unit, destination }) => {
                assert_eq!(unit, ctx.knight);
                assert_ne!(destination, occupied);
                assert!(ctx.arena.world().reachable_tiles(unit).contains(&destination));
                assert!(ctx.ai.follow_up.is_some());
            }
            other => panic!("expected a fresh move, got {other:?}"),
        }
    }

    #[test]
    fn exhausted_plan_rests_weakest_unit() {
        let mut ctx = TestContext::new();
        ctx.ai.active = true;

        let command = ctx.ai.poll(&ctx.arena, &mut ctx.rng).unwrap();
        assert_eq!(command, RestCommand::new(ctx.knight).into());
        assert_eq!(ctx.ai.poll(&ctx.arena, &mut ctx.rng), None);
    }

    #[test]
    fn follow_up_attack_out_of_range_is_recomputed() {
        let mut ctx = TestContext::new();
        ctx.ai.active = true;
        ctx.ai.follow_up = Some(AttackCommand::new(ctx.knight, ctx.enemy));
        assert!(!ctx.arena.world().can_attack(ctx.knight, ctx.enemy));

        let command = ctx.ai.poll(&ctx.arena, &mut ctx.rng).unwrap();
        match command {
            Command::Move(MoveCommand { unit, destination }) => {
                assert_eq!(unit, ctx.knight);
                let world = ctx.arena.world();
                assert!(world.reachable_tiles(unit).contains(&destination));
                assert_eq!(ctx.ai.follow_up, Some(AttackCommand::new(ctx.knight, ctx.enemy)));
                assert!(world.attackable_from(unit, destination).contains(&ctx.enemy));
            }
            other => panic!("expected a move into range, got {other:?}"),
        }
    }

    #[test]
    fn follow_up_attack_on_dead_target_is_dropped() {
        let mut ctx = TestContext::new();
        while ctx.arena.world().unit(ctx.enemy).is_some() {
            let hit = ctx.arena.world().resolve_attack(ctx.knight, ctx.enemy).unwrap();
            ctx.arena.world_mut().apply_hit(&hit);
        }
        ctx.ai.active = true;
        ctx.ai.follow_up = Some(AttackCommand::new(ctx.knight, ctx.enemy));

        let command = ctx.ai.poll(&ctx.arena, &mut ctx.rng).unwrap();
        assert!(
            !matches!(command, Command::Attack(_)),
            "stale attack issued: {command:?}"
        );
        assert_eq!(ctx.ai.follow_up, None);
    }
}
