//! The frame-driven battle loop.
//!
//! [`Simulation`] owns the [`Arena`], the action [`StateMachine`], the popup
//! queue and one [`Controller`] per faction. A host calls
//! [`tick`](Simulation::tick) once per frame and feeds human input through
//! the `select_*` / [`choose`](Simulation::choose) methods; everything that
//! changed is published on the [`EventBus`].

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tokio::sync::broadcast;

use game_core::{Command, GameError, GameOver, Scenario, TileId, UnitId, World};
use state_machine::StateMachine;

use crate::arena::Arena;
use crate::config::RuntimeConfig;
use crate::dispatch::CommandDispatcher;
use crate::error::{CommandError, Result, RuntimeError};
use crate::events::{EventBus, GameEvent, Topic};
use crate::popups::PopupQueue;
use crate::providers::{ActionChoice, AiController, Controller, PlayerController};

pub struct Simulation {
    arena: Arena,
    actions: StateMachine<Arena>,
    popups: PopupQueue,
    dispatcher: CommandDispatcher,
    controllers: Vec<Controller>,
    bus: EventBus,
    rng: Box<dyn RngCore + Send>,
    frame: u64,
}

impl Simulation {
    /// Wraps `world`, giving human factions a player controller and every
    /// other faction the AI.
    pub fn new(world: World, config: RuntimeConfig) -> Self {
        let controllers = world
            .factions()
            .iter()
            .map(|faction| {
                if faction.is_human() {
                    Controller::Human(PlayerController::new(faction.id()))
                } else {
                    Controller::Computer(AiController::new(faction.id(), config.ai))
                }
            })
            .collect();

        let rng: Box<dyn RngCore + Send> = match config.seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(StdRng::from_entropy()),
        };

        Self {
            arena: Arena::new(world, config.timing),
            actions: StateMachine::new(),
            popups: PopupQueue::new(&config.timing),
            dispatcher: CommandDispatcher::new(),
            controllers,
            bus: EventBus::with_capacity(config.event_capacity),
            rng,
            frame: 0,
        }
    }

    pub fn from_scenario(
        scenario: &Scenario,
        config: RuntimeConfig,
    ) -> std::result::Result<Self, RuntimeError> {
        let world = World::from_scenario(scenario)?;
        Ok(Self::new(world, config))
    }

    /// Replaces the tie-break randomness source.
    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Installs `controller` for its faction, replacing the current one.
    pub fn set_controller(&mut self, controller: Controller) {
        let faction = controller.faction();
        match self.controllers.iter_mut().find(|c| c.faction() == faction) {
            Some(slot) => *slot = controller,
            None => self.controllers.push(controller),
        }
    }

    /// Starts (or restarts) turn order at the first faction.
    pub fn start(&mut self) {
        tracing::info!(
            factions = self.arena.world().factions().len(),
            units = self.arena.world().units().count(),
            "simulation started"
        );
        self.arena.reset_turns();
        self.pump_events();
    }

    /// Advances every running sequence by `dt` seconds, then lets the acting
    /// controller issue its next command.
    pub fn tick(&mut self, dt: f32) {
        self.frame += 1;
        self.actions.tick(&mut self.arena, dt);
        self.popups.tick(dt);
        self.pump_events();
        self.poll_controller();
    }

    /// Validates and starts `command`.
    pub fn dispatch(&mut self, command: Command) -> Result<()> {
        if !self.actions.is_idle() {
            return Err(CommandError::ActionInFlight);
        }
        let result = self
            .dispatcher
            .execute(&mut self.arena, &mut self.actions, command);
        self.pump_events();
        result
    }

    /// Forwards a tile selection to the acting human faction.
    pub fn select_tile(&mut self, tile: TileId) -> Result<()> {
        let command = match self.acting_player() {
            Some(index) => match &mut self.controllers[index] {
                Controller::Human(player) => player.on_tile_selected(&self.arena, tile),
                Controller::Computer(_) => None,
            },
            None => None,
        };
        self.dispatch_optional(command)
    }

    /// Forwards a unit selection to the acting human faction.
    pub fn select_unit(&mut self, unit: UnitId) -> Result<()> {
        let command = match self.acting_player() {
            Some(index) => match &mut self.controllers[index] {
                Controller::Human(player) => player.on_unit_selected(&self.arena, unit),
                Controller::Computer(_) => None,
            },
            None => None,
        };
        self.dispatch_optional(command)
    }

    /// Applies an action-menu choice for the acting human faction.
    pub fn choose(&mut self, choice: ActionChoice) -> Result<()> {
        let command = match self.acting_player() {
            Some(index) => match &mut self.controllers[index] {
                Controller::Human(player) => player.choose(&self.arena, choice),
                Controller::Computer(_) => None,
            },
            None => None,
        };
        self.dispatch_optional(command)
    }

    /// The acting faction's player controller, if a human is acting.
    pub fn player(&self) -> Option<&PlayerController> {
        let index = self.acting_player()?;
        match &self.controllers[index] {
            Controller::Human(player) => Some(player),
            Controller::Computer(_) => None,
        }
    }

    pub fn controllers(&self) -> &[Controller] {
        &self.controllers
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn world(&self) -> &World {
        self.arena.world()
    }

    pub fn popups(&self) -> &PopupQueue {
        &self.popups
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<GameEvent> {
        self.bus.subscribe(topic)
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// No sequence is running.
    pub fn is_idle(&self) -> bool {
        self.actions.is_idle()
    }

    pub fn game_over(&self) -> Option<GameOver> {
        self.arena.turns().game_over()
    }

    pub fn is_over(&self) -> bool {
        self.arena.turns().is_finished()
    }

    fn acting_player(&self) -> Option<usize> {
        let acting = self.arena.turns().current_faction();
        self.controllers
            .iter()
            .position(|c| c.is_human() && c.faction() == acting)
    }

    fn dispatch_optional(&mut self, command: Option<Command>) -> Result<()> {
        match command {
            Some(command) => self.dispatch(command),
            None => Ok(()),
        }
    }

    fn poll_controller(&mut self) {
        if !self.actions.is_idle() || !self.arena.can_perform_action() {
            return;
        }
        let acting = self.arena.turns().current_faction();
        let Some(controller) = self.controllers.iter_mut().find(|c| c.faction() == acting) else {
            return;
        };
        let Some(command) = controller.poll(&self.arena, &mut *self.rng) else {
            return;
        };

        if let Err(err) = self.dispatch(command) {
            tracing::warn!(
                error = %err,
                code = err.error_code(),
                command = command.as_snake_case(),
                "controller command rejected"
            );
        }
    }

    /// Publishes everything the arena recorded, reacting to turn changes and
    /// hits along the way.
    fn pump_events(&mut self) {
        for event in self.arena.drain_events() {
            match &event {
                GameEvent::TurnChanged { faction, .. } => {
                    for controller in &mut self.controllers {
                        controller.on_turn_changed(self.arena.world(), *faction, &mut *self.rng);
                    }
                }
                GameEvent::UnitHit {
                    attack,
                    outcome,
                    at,
                } => {
                    self.popups.on_hit(attack, outcome, (*at).into());
                }
                _ => {}
            }
            tracing::trace!(kind = event.kind(), "publishing event");
            self.bus.publish(event);
        }

        for text in self.popups.drain_shown() {
            self.bus.publish(GameEvent::TextPopup {
                text: text.text,
                anchor: text.anchor.to_array(),
            });
        }
    }
}
