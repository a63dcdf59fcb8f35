//! Human-readable battle transcript on stdout.

use std::collections::HashMap;

use tokio::sync::broadcast::{self, error::TryRecvError};

use game_core::{TileId, UnitId, World};
use runtime::{GameEvent, Simulation, Topic};

/// Prints events as they are published.
pub struct Reporter {
    receivers: Vec<broadcast::Receiver<GameEvent>>,
    names: HashMap<UnitId, String>,
}

impl Reporter {
    /// Subscribes to every topic. Unit names are captured up front so
    /// fallen units can still be named.
    pub fn new(sim: &Simulation) -> Self {
        let world = sim.world();
        let names = world
            .units()
            .map(|unit| {
                let faction = world.faction_name(unit.faction());
                let name = format!("{} {}#{}", faction, unit.unit_type(), unit.ordinal());
                (unit.id(), name)
            })
            .collect();

        // Unit and presentation events precede the turn change they cause.
        let receivers = [Topic::Unit, Topic::Presentation, Topic::Turn]
            .into_iter()
            .map(|topic| sim.subscribe(topic))
            .collect();

        Self { receivers, names }
    }

    pub fn flush(&mut self, sim: &Simulation) {
        let world = sim.world();
        for index in 0..self.receivers.len() {
            loop {
                match self.receivers[index].try_recv() {
                    Ok(event) => self.print(world, &event),
                    Err(TryRecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "event reporter fell behind");
                    }
                    Err(TryRecvError::Empty | TryRecvError::Closed) => break,
                }
            }
        }
    }

    pub fn summary(&self, sim: &Simulation) {
        match sim.game_over() {
            Some(over) => {
                let winner = over
                    .winner
                    .map(|faction| sim.world().faction_name(faction).to_owned())
                    .unwrap_or_else(|| "nobody".to_owned());
                println!("Battle over: {winner} wins after {} turns.", over.turns);
            }
            None => println!(
                "No winner after {} frames (turn {}).",
                sim.frame(),
                sim.arena().turns().turn()
            ),
        }

        for faction in sim.world().factions() {
            let survivors: Vec<String> = sim
                .world()
                .living_units(faction.id())
                .map(|unit| format!("{} ({:.1} hp)", self.name(unit.id()), unit.hp()))
                .collect();
            println!("  {}: {}", faction.name(), survivors.join(", "));
        }
    }

    fn print(&self, world: &World, event: &GameEvent) {
        match event {
            GameEvent::TurnChanged {
                name,
                turn,
                upcoming_name,
                ..
            } => {
                let next = upcoming_name.as_deref().unwrap_or("-");
                println!("=== Turn {turn}: {name} (next: {next}) ===");
            }
            GameEvent::GameOver {
                winner_name, turns, ..
            } => {
                let winner = winner_name.as_deref().unwrap_or("nobody");
                println!("*** {winner} wins after {turns} turns ***");
            }
            GameEvent::MoveStarted {
                unit,
                from,
                destination,
                steps,
            } => println!(
                "{} moves {} -> {} ({steps} steps)",
                self.name(*unit),
                coord(world, *from),
                coord(world, *destination)
            ),
            GameEvent::AttackStarted { attack } => println!(
                "{} attacks {} for {:.1}{}",
                self.name(attack.attacker),
                self.name(attack.target),
                attack.total_damage,
                if attack.lethal { " (lethal)" } else { "" }
            ),
            GameEvent::UnitHit { outcome, .. } => println!(
                "{} hit: {:.1} hp left ({:.0}%)",
                self.name(outcome.target),
                outcome.remaining_hp,
                outcome.life_ratio * 100.0
            ),
            GameEvent::UnitDied { unit, .. } => println!("{} falls", self.name(*unit)),
            GameEvent::UnitRested { unit, recovered } => {
                println!("{} rests (+{recovered:.1} hp)", self.name(*unit))
            }
            GameEvent::TextPopup { text, .. } => println!("    \"{text}\""),
            GameEvent::MoveEnded { .. } | GameEvent::ProjectileLaunched { .. } => {
                tracing::debug!(kind = event.kind(), "event");
            }
        }
    }

    fn name(&self, unit: UnitId) -> String {
        self.names
            .get(&unit)
            .cloned()
            .unwrap_or_else(|| unit.to_string())
    }
}

fn coord(world: &World, tile: TileId) -> String {
    world
        .grid()
        .get(tile)
        .map(|tile| tile.coord().to_string())
        .unwrap_or_else(|| tile.to_string())
}
