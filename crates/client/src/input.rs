//! Line-based input for the human faction.
//!
//! Each line is one selection: `tile <x> <z>` selects a tile, `move`,
//! `attack` and `rest` pick from the action menu, `quit` stops the run.

use std::io::{self, BufRead, Lines, StdinLock, Write};

use anyhow::Result;

use game_core::TileCoord;
use runtime::{ActionChoice, PlayerMode, Simulation};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Tile(TileCoord),
    Choice(ActionChoice),
    Quit,
}

pub fn parse_input(line: &str) -> Result<Input, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err("empty input".to_owned());
    };

    match head.to_ascii_lowercase().as_str() {
        "tile" | "t" => {
            let mut coord = words.map(|word| word.parse::<i32>());
            match (coord.next(), coord.next(), coord.next()) {
                (Some(Ok(x)), Some(Ok(z)), None) => Ok(Input::Tile(TileCoord::new(x, z))),
                _ => Err("usage: tile <x> <z>".to_owned()),
            }
        }
        "move" | "m" => Ok(Input::Choice(ActionChoice::Move)),
        "attack" | "a" => Ok(Input::Choice(ActionChoice::Attack)),
        "rest" | "r" => Ok(Input::Choice(ActionChoice::Rest)),
        "quit" | "q" | "exit" => Ok(Input::Quit),
        other => Err(format!("unknown input '{other}'")),
    }
}

pub struct StdinRelay {
    lines: Lines<StdinLock<'static>>,
}

impl StdinRelay {
    pub fn new() -> Self {
        Self {
            lines: io::stdin().lock().lines(),
        }
    }

    /// Reads one line and forwards it to the simulation.
    ///
    /// Returns `false` once input is closed or the user quits.
    pub fn prompt(&mut self, sim: &mut Simulation) -> Result<bool> {
        print_hint(sim);
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = self.lines.next() else {
            return Ok(false);
        };
        let line = line?;

        let result = match parse_input(&line) {
            Ok(Input::Quit) => return Ok(false),
            Ok(Input::Tile(coord)) => {
                let tile = sim.world().grid().tile_at(coord);
                match tile {
                    Some(tile) => sim.select_tile(tile),
                    None => {
                        println!("{coord} is off the board");
                        Ok(())
                    }
                }
            }
            Ok(Input::Choice(choice)) => sim.choose(choice),
            Err(message) => {
                println!("{message}");
                Ok(())
            }
        };

        if let Err(err) = result {
            println!("rejected: {err}");
        }
        Ok(true)
    }
}

impl Default for StdinRelay {
    fn default() -> Self {
        Self::new()
    }
}

fn print_hint(sim: &Simulation) {
    let Some(player) = sim.player() else {
        return;
    };
    let grid = sim.world().grid();

    match player.mode() {
        PlayerMode::Inactive => {}
        PlayerMode::SelectingUnit => println!("select a unit with: tile <x> <z>"),
        PlayerMode::ChoosingAction { unit } => {
            println!("{unit} selected; choose: move | attack | rest")
        }
        PlayerMode::Targeting { tiles, .. } => {
            let coords: Vec<String> = tiles
                .iter()
                .map(|&tile| grid.tile(tile).coord().to_string())
                .collect();
            println!("targets: {}", coords.join(" "));
        }
    }
}
