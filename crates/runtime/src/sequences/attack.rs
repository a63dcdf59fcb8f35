use game_core::{AttackDelivery, AttackInstance};
use state_machine::{State, Status, builder};

use super::BoxedState;
use crate::animation::RotateTween;
use crate::arena::Arena;
use crate::events::GameEvent;
use crate::projectile::Projectile;

/// Start, rotate, resolve, pause, end.
pub fn attack_sequence(attack: AttackInstance, end_turn_delay: f32) -> Vec<BoxedState> {
    vec![
        builder::boxed(StartAttack::new(attack)),
        builder::boxed(RotateTowardsTarget::new(attack)),
        builder::boxed(ResolveAttack::new(attack)),
        builder::wait(end_turn_delay),
        builder::boxed(EndAttack),
    ]
}

/// Closes the action gate and announces the attack.
pub struct StartAttack {
    attack: AttackInstance,
}

impl StartAttack {
    pub fn new(attack: AttackInstance) -> Self {
        Self { attack }
    }
}

impl State<Arena> for StartAttack {
    fn on_start(&mut self, arena: &mut Arena) {
        arena.turns_mut().start_action();
        arena.emit(GameEvent::AttackStarted {
            attack: self.attack,
        });
    }

    fn name(&self) -> &'static str {
        "start_attack"
    }
}

/// Turns the attacker to face its target.
pub struct RotateTowardsTarget {
    attack: AttackInstance,
    rotation: Option<RotateTween>,
}

impl RotateTowardsTarget {
    pub fn new(attack: AttackInstance) -> Self {
        Self {
            attack,
            rotation: None,
        }
    }
}

impl State<Arena> for RotateTowardsTarget {
    fn on_start(&mut self, arena: &mut Arena) {
        let (Some(pose), Some(target)) = (
            arena.pose(self.attack.attacker),
            arena.pose(self.attack.target),
        ) else {
            return;
        };
        let facing = pose.yaw_towards(target.position);
        self.rotation = Some(RotateTween::new(
            pose.yaw,
            facing,
            arena.timing().rotation_duration,
        ));
    }

    fn on_update(&mut self, arena: &mut Arena, dt: f32) -> Status {
        let Some(rotation) = self.rotation.as_mut() else {
            return Status::Finished;
        };
        let yaw = rotation.advance(dt);
        if let Some(mut pose) = arena.pose(self.attack.attacker) {
            pose.yaw = yaw;
            arena.set_pose(self.attack.attacker, pose);
        }
        Status::running_if(!rotation.is_finished())
    }

    fn name(&self) -> &'static str {
        "rotate_towards_target"
    }
}

/// Plays the attack animation and lands the hit.
///
/// Melee hits land at a fixed fraction of the animation. Ranged hits land
/// when the projectile, released after its start delay, arrives.
pub struct ResolveAttack {
    attack: AttackInstance,
    elapsed: f32,
    projectile: Option<Projectile>,
    launched: bool,
    landed: bool,
}

impl ResolveAttack {
    pub fn new(attack: AttackInstance) -> Self {
        Self {
            attack,
            elapsed: 0.0,
            projectile: None,
            launched: false,
            landed: false,
        }
    }

    fn land(&mut self, arena: &mut Arena) {
        self.landed = true;
        arena.land_hit(&self.attack);
    }

    fn launch(&mut self, arena: &mut Arena) {
        let Some(projectile) = self.projectile.as_mut() else {
            return;
        };
        self.launched = true;

        let (Some(from), Some(to)) = (
            arena.pose(self.attack.attacker),
            arena.pose(self.attack.target),
        ) else {
            return;
        };
        let range = arena
            .world()
            .unit(self.attack.attacker)
            .map_or(0, |unit| unit.attack_range());
        projectile.start(
            from.position,
            to.position,
            range,
            arena.world().grid().tile_size(),
        );

        let kind = projectile.kind();
        arena.emit(GameEvent::ProjectileLaunched {
            attacker: self.attack.attacker,
            target: self.attack.target,
            kind,
        });
    }
}

impl State<Arena> for ResolveAttack {
    fn on_start(&mut self, arena: &mut Arena) {
        let delivery = arena
            .world()
            .unit(self.attack.attacker)
            .map(|unit| unit.delivery())
            .unwrap_or_default();
        if let AttackDelivery::Projectile(kind) = delivery {
            self.projectile = Some(Projectile::for_kind(kind, arena.timing()));
        }
    }

    fn on_update(&mut self, arena: &mut Arena, dt: f32) -> Status {
        self.elapsed += dt;
        let timing = *arena.timing();

        if self.projectile.is_none() {
            if !self.landed && self.elapsed >= timing.melee_hit_time() {
                self.land(arena);
            }
        } else {
            if !self.launched {
                let delay = self.projectile.map_or(0.0, |p| p.start_delay());
                if self.elapsed >= delay {
                    self.launch(arena);
                }
            } else if let Some(projectile) = self.projectile.as_mut()
                && !projectile.finished()
            {
                projectile.update(dt);
            }

            let arrived = self.projectile.is_some_and(|p| p.finished());
            if self.launched && arrived && !self.landed {
                self.land(arena);
            }
        }

        Status::running_if(!self.landed || self.elapsed < timing.attack_duration)
    }

    fn name(&self) -> &'static str {
        "resolve_attack"
    }
}

/// Passes the turn. Also reopens the action gate.
pub struct EndAttack;

impl State<Arena> for EndAttack {
    fn on_start(&mut self, arena: &mut Arena) {
        arena.end_turn();
    }

    fn name(&self) -> &'static str {
        "end_attack"
    }
}
