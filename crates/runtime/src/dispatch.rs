//! Validation and execution of controller commands.
//!
//! The dispatcher is the only entry point that turns a [`Command`] into a
//! running sequence. Every check happens before anything is mutated, so a
//! rejected command leaves the arena exactly as it was.

use game_core::{AttackCommand, Command, MoveCommand, RestCommand, Traversal, Unit, UnitId};
use state_machine::StateMachine;

use crate::arena::Arena;
use crate::error::{CommandError, Result};
use crate::events::GameEvent;
use crate::sequences::{attack_sequence, move_sequence, rest_sequence};

/// Stateless executor for commands against an [`Arena`].
#[derive(Clone, Copy, Debug, Default)]
pub struct CommandDispatcher;

impl CommandDispatcher {
    pub fn new() -> Self {
        Self
    }

    /// Validates `command` and starts its sequence on `machine`.
    pub fn execute(
        &self,
        arena: &mut Arena,
        machine: &mut StateMachine<Arena>,
        command: Command,
    ) -> Result<()> {
        self.check_gate(arena)?;
        self.check_actor(arena, command.actor())?;

        tracing::debug!(
            command = command.as_snake_case(),
            unit = %command.actor(),
            "dispatching command"
        );

        match command {
            Command::Move(command) => self.execute_move(arena, machine, command),
            Command::Attack(command) => self.execute_attack(arena, machine, command),
            Command::Rest(command) => self.execute_rest(arena, machine, command),
        }
    }

    fn check_gate(&self, arena: &Arena) -> Result<()> {
        if arena.turns().is_finished() {
            return Err(CommandError::GameOver);
        }
        if arena.turns().is_action_in_flight() {
            return Err(CommandError::ActionInFlight);
        }
        Ok(())
    }

    fn check_actor(&self, arena: &Arena, unit: UnitId) -> Result<()> {
        let actor = arena
            .world()
            .unit(unit)
            .ok_or(CommandError::UnknownUnit { unit })?;

        let acting = arena.turns().current_faction();
        if actor.faction() != acting {
            return Err(CommandError::NotActingFaction {
                unit,
                faction: actor.faction(),
            });
        }
        if actor.tile().is_none() {
            return Err(CommandError::NotPlaced { unit });
        }
        Ok(())
    }

    fn execute_move(
        &self,
        arena: &mut Arena,
        machine: &mut StateMachine<Arena>,
        command: MoveCommand,
    ) -> Result<()> {
        let MoveCommand { unit, destination } = command;
        let world = arena.world();

        if world.grid().get(destination).is_none() {
            return Err(CommandError::UnknownTile { tile: destination });
        }
        if world.grid().occupant(destination).is_some() {
            return Err(CommandError::Occupied { tile: destination });
        }
        if !world.reachable_tiles(unit).contains(&destination) {
            return Err(CommandError::OutOfReach {
                unit,
                tile: destination,
            });
        }

        let Some(from) = world.unit(unit).and_then(Unit::tile) else {
            return Err(CommandError::NotPlaced { unit });
        };
        let mut waypoints = vec![from];
        waypoints.extend(world.grid().path(from, destination, Traversal::Walkable));
        let steps = (waypoints.len() - 1) as u32;
        let duration = arena.timing().walk_duration(waypoints.len());

        arena.world_mut().spend_moves(unit, steps);
        arena.turns_mut().start_action();
        arena.world_mut().lift_unit(unit);
        arena.emit(GameEvent::MoveStarted {
            unit,
            from,
            destination,
            steps,
        });

        machine.start(arena, move_sequence(unit, waypoints, duration));
        Ok(())
    }

    fn execute_attack(
        &self,
        arena: &mut Arena,
        machine: &mut StateMachine<Arena>,
        command: AttackCommand,
    ) -> Result<()> {
        let AttackCommand { attacker, target } = command;
        let world = arena.world();

        if world.unit(target).is_none() {
            return Err(CommandError::UnknownUnit { unit: target });
        }
        if !world.is_hostile(attacker, target) {
            return Err(CommandError::TargetNotHostile { attacker, target });
        }
        if !world.can_attack(attacker, target) {
            return Err(CommandError::TargetOutOfRange { attacker, target });
        }
        let attack = world
            .resolve_attack(attacker, target)
            .ok_or(CommandError::UnknownUnit { unit: target })?;

        tracing::debug!(
            %attacker,
            %target,
            damage = attack.total_damage,
            bonus = attack.bonus,
            lethal = attack.lethal,
            "attack resolved"
        );

        let delay = arena.timing().end_turn_delay;
        machine.start(arena, attack_sequence(attack, delay));
        Ok(())
    }

    fn execute_rest(
        &self,
        arena: &mut Arena,
        machine: &mut StateMachine<Arena>,
        command: RestCommand,
    ) -> Result<()> {
        arena.turns_mut().start_action();
        arena.rest(command.unit);

        let delay = arena.timing().end_turn_delay;
        machine.start(arena, rest_sequence(delay));
        Ok(())
    }
}
