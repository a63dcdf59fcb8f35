use rand::SeedableRng;
use rand::rngs::StdRng;

use game_core::{
    Command, FactionId, GameConfig, TileCoord, UnitId, UnitProfile, UnitType, World,
};
use runtime::{
    AiController, AiWeights, Arena, GameEvent, RuntimeConfig, Simulation, TimingConfig, Topic,
};

fn ai_first_world() -> (World, FactionId, FactionId) {
    let mut world = World::new(GameConfig::new());
    let ai = world.add_faction("AI", false);
    let player = world.add_faction("player", true);
    (world, ai, player)
}

fn arena_for(world: World) -> Arena {
    Arena::new(world, TimingConfig::instant())
}

#[test]
fn exposed_lethal_attack_beats_safe_moves() {
    let (mut world, ai, player) = ai_first_world();
    let infantry = world
        .spawn_unit(ai, UnitProfile::preset(UnitType::Infantry), TileCoord::new(3, 3))
        .unwrap();
    let wounded = world
        .spawn_unit(
            player,
            UnitProfile::preset(UnitType::Pikes).with_max_hp(2.0),
            TileCoord::new(3, 4),
        )
        .unwrap();

    let arena = arena_for(world);
    let mut rng = StdRng::seed_from_u64(42);
    let mut controller = AiController::new(ai, AiWeights::default());
    controller.on_turn_changed(arena.world(), ai, &mut rng);

    let plan: Vec<_> = controller.plan().copied().collect();
    assert_eq!(plan.len(), 1);
    let action = plan[0];
    assert_eq!(action.unit, infantry);
    assert_eq!(action.target, Some(wounded));
    assert_eq!(action.score, 6.0);
}

#[test]
fn near_lethal_bonus_only_applies_when_not_lethal() {
    let (mut world, ai, player) = ai_first_world();
    world
        .spawn_unit(ai, UnitProfile::preset(UnitType::Infantry), TileCoord::new(3, 3))
        .unwrap();
    let target = world
        .spawn_unit(
            player,
            UnitProfile::preset(UnitType::Pikes).with_max_hp(3.1),
            TileCoord::new(3, 4),
        )
        .unwrap();

    let arena = arena_for(world);
    let mut rng = StdRng::seed_from_u64(1);
    let mut controller = AiController::new(ai, AiWeights::default());
    controller.on_turn_changed(arena.world(), ai, &mut rng);

    let action = controller.plan().next().copied().unwrap();
    assert_eq!(action.target, Some(target));
    // exposed (-1), attack (+2), leaves 0.1 hp (+3)
    assert_eq!(action.score, 4.0);
}

#[test]
fn unit_already_in_range_attacks_without_moving() {
    let (mut world, ai, player) = ai_first_world();
    let archer = world
        .spawn_unit(ai, UnitProfile::preset(UnitType::Archers), TileCoord::new(0, 0))
        .unwrap();
    let target = world
        .spawn_unit(
            player,
            UnitProfile::preset(UnitType::Infantry).with_max_hp(1.0),
            TileCoord::new(0, 5),
        )
        .unwrap();

    let arena = arena_for(world);
    let mut rng = StdRng::seed_from_u64(9);
    let mut controller = AiController::new(ai, AiWeights::default());
    controller.on_turn_changed(arena.world(), ai, &mut rng);

    let action = controller.plan().next().copied().unwrap();
    assert_eq!(action.target, Some(target));

    // The first command either attacks in place or steps to another
    // firing tile; both keep the target in range.
    match controller.poll(&arena, &mut rng) {
        Some(Command::Attack(attack)) => {
            assert_eq!(attack.attacker, archer);
            assert_eq!(attack.target, target);
        }
        Some(Command::Move(step)) => {
            assert_eq!(step.unit, archer);
            let tile = step.destination;
            assert!(arena.world().attackable_from(archer, tile).contains(&target));
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn idle_turn_ends_with_weakest_unit_resting() {
    let (mut world, ai, player) = ai_first_world();
    world
        .spawn_unit(ai, UnitProfile::preset(UnitType::Pikes), TileCoord::new(0, 0))
        .unwrap();
    let frail = world
        .spawn_unit(
            ai,
            UnitProfile::preset(UnitType::Pikes).with_max_hp(5.0),
            TileCoord::new(1, 0),
        )
        .unwrap();
    world
        .spawn_unit(player, UnitProfile::preset(UnitType::Pikes), TileCoord::new(7, 7))
        .unwrap();

    let config = RuntimeConfig::new()
        .with_seed(5)
        .with_timing(TimingConfig::instant());
    let mut sim = Simulation::new(world, config);
    let mut units = sim.subscribe(Topic::Unit);
    sim.start();

    for _ in 0..200 {
        if sim.arena().turns().current_faction() == player {
            break;
        }
        sim.tick(0.1);
    }
    assert_eq!(sim.arena().turns().current_faction(), player);

    let mut rested = None;
    while let Ok(event) = units.try_recv() {
        if let GameEvent::UnitRested { unit, .. } = event {
            rested = Some(unit);
        }
    }
    assert_eq!(rested, Some(frail));
}

#[test]
fn same_seed_replays_identically() {
    fn run(seed: u64) -> Vec<(UnitId, Option<TileCoord>, f32)> {
        let scenario = game_core::Scenario::skirmish().all_computer();
        let config = RuntimeConfig::new()
            .with_seed(seed)
            .with_timing(TimingConfig::instant());
        let mut sim = Simulation::from_scenario(&scenario, config).unwrap();
        sim.start();
        for _ in 0..600 {
            if sim.is_over() {
                break;
            }
            sim.tick(0.1);
            sim.world().assert_occupancy_consistent();
        }

        let world = sim.world();
        world
            .units()
            .map(|unit| {
                let coord = unit.tile().map(|tile| world.grid().tile(tile).coord());
                (unit.id(), coord, unit.hp())
            })
            .collect()
    }

    assert_eq!(run(17), run(17));
}

#[test]
fn battle_starts_with_first_faction_that_has_units() {
    let mut world = World::new(GameConfig::new());
    let ghosts = world.add_faction("ghosts", false);
    let red = world.add_faction("red", false);
    let blue = world.add_faction("blue", false);
    world
        .spawn_unit(red, UnitProfile::preset(UnitType::Pikes), TileCoord::new(0, 0))
        .unwrap();
    world
        .spawn_unit(blue, UnitProfile::preset(UnitType::Pikes), TileCoord::new(7, 7))
        .unwrap();

    let config = RuntimeConfig::new()
        .with_seed(3)
        .with_timing(TimingConfig::instant());
    let mut sim = Simulation::new(world, config);
    sim.start();
    assert_eq!(sim.arena().turns().current_faction(), red);

    for _ in 0..600 {
        sim.tick(1.0 / 60.0);
    }
    let turns = sim.arena().turns();
    assert!(turns.turn() > 0, "turn order never advanced");
    assert_ne!(turns.current_faction(), ghosts);
}
