use maze_chase_core::{AgentId, Cell, CellCoord, Command, Event, Grid, HunterId};
use maze_chase_system_movement::Movement;
use maze_chase_system_pathfinding::{Algorithm, AlgorithmPolicy};
use maze_chase_world::{self as world, query, Maze, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn world_with_open_cells(columns: u32, rows: u32, open: &[(u32, u32)]) -> World {
    let mut grid = Grid::filled(columns, rows, Cell::Wall);
    for (column, row) in open {
        grid.set(CellCoord::new(*column, *row), Cell::Open);
    }
    let mut maze = Maze::from_grid(grid).expect("valid grid");
    maze.place_resource_points();
    World::new(maze, 1)
}

fn corridor() -> World {
    world_with_open_cells(7, 3, &[(1, 1), (2, 1), (3, 1), (4, 1), (5, 1)])
}

fn open_room() -> World {
    let mut open = Vec::new();
    for row in 1..4 {
        for column in 1..6 {
            open.push((column, row));
        }
    }
    world_with_open_cells(7, 5, &open)
}

fn spawn(world: &mut World, column: u32, row: u32, speed: f64) -> HunterId {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::SpawnHunter {
            cell: CellCoord::new(column, row),
            speed,
        },
        &mut events,
    );
    events
        .into_iter()
        .find_map(|event| match event {
            Event::HunterSpawned { hunter, .. } => Some(hunter),
            _ => None,
        })
        .expect("hunter spawned")
}

fn tick(world: &mut World) {
    let mut events = Vec::new();
    world::apply(world, Command::Tick, &mut events);
}

fn apply_all(world: &mut World, commands: Vec<Command>) -> Vec<Event> {
    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

fn seeker_commands(world: &World, movement: &Movement, seed: u64) -> Vec<Command> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut commands = Vec::new();
    movement.update_seeker(
        query::grid(world),
        &query::seeker(world),
        query::resource_points(world),
        &query::hunter_view(world),
        &mut rng,
        &mut commands,
    );
    commands
}

fn hunter_commands(world: &World, movement: &Movement, hunter: HunterId, seed: u64) -> Vec<Command> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let hunters = query::hunter_view(world);
    let snapshot = hunters.get(hunter).expect("hunter registered").clone();
    let mut commands = Vec::new();
    movement.update_hunter(
        query::grid(world),
        query::level_number(world),
        &snapshot,
        &query::seeker(world),
        &hunters,
        &mut rng,
        &mut commands,
    );
    commands
}

fn fixed(algorithm: Algorithm) -> Movement {
    Movement::new(AlgorithmPolicy::Fixed(algorithm))
}

#[test]
fn seeker_steps_toward_nearest_resource_and_collects_it() {
    let mut world = corridor();
    tick(&mut world);

    for algorithm in Algorithm::ALL {
        let commands = seeker_commands(&world, &fixed(algorithm), 3);
        assert_eq!(
            commands,
            vec![Command::MoveSeeker {
                to: CellCoord::new(2, 1),
                on_route: true,
            }]
        );
    }

    let commands = seeker_commands(&world, &Movement::default(), 3);
    let events = apply_all(&mut world, commands);
    assert!(events.contains(&Event::ResourceCollected {
        cell: CellCoord::new(2, 1),
        remaining: 2,
    }));
}

#[test]
fn seeker_may_step_back_onto_recent_cells() {
    let mut world = world_with_open_cells(7, 5, &[(1, 1), (2, 1), (3, 1), (1, 2)]);
    for (column, row) in [(1, 2), (1, 1), (2, 1), (1, 1)] {
        tick(&mut world);
        let events = apply_all(
            &mut world,
            vec![Command::MoveSeeker {
                to: CellCoord::new(column, row),
                on_route: true,
            }],
        );
        assert!(matches!(events.first(), Some(Event::SeekerAdvanced { .. })));
    }
    tick(&mut world);

    let seeker = query::seeker(&world);
    assert!(seeker.history.visited_recently(CellCoord::new(2, 1), 2));
    assert_eq!(
        query::resource_points(&world).iter().copied().collect::<Vec<_>>(),
        vec![CellCoord::new(3, 1)]
    );

    for algorithm in Algorithm::ALL {
        for seed in 0..8 {
            assert_eq!(
                seeker_commands(&world, &fixed(algorithm), seed),
                vec![Command::MoveSeeker {
                    to: CellCoord::new(2, 1),
                    on_route: true,
                }]
            );
        }
    }
}

#[test]
fn seeker_without_a_route_wanders_without_heading() {
    let mut world = world_with_open_cells(4, 3, &[(1, 1), (2, 1)]);
    assert!(query::resources_exhausted(&world));
    tick(&mut world);

    let commands = seeker_commands(&world, &Movement::default(), 5);
    assert_eq!(
        commands,
        vec![Command::MoveSeeker {
            to: CellCoord::new(2, 1),
            on_route: false,
        }]
    );

    let _ = apply_all(&mut world, commands);
    let seeker = query::seeker(&world);
    assert_eq!(seeker.cell, CellCoord::new(2, 1));
    assert_eq!(seeker.heading, None);
}

#[test]
fn idle_agents_emit_nothing() {
    let mut world = corridor();
    let hunter = spawn(&mut world, 5, 1, 0.5);

    assert!(seeker_commands(&world, &Movement::default(), 1).is_empty());

    tick(&mut world);
    assert!(hunter_commands(&world, &Movement::default(), hunter, 1).is_empty());
}

#[test]
fn boxed_in_seeker_holds() {
    let mut world = world_with_open_cells(3, 3, &[(1, 1)]);
    tick(&mut world);

    let commands = seeker_commands(&world, &Movement::default(), 8);

    assert_eq!(
        commands,
        vec![Command::Hold {
            agent: AgentId::Seeker
        }]
    );
    let events = apply_all(&mut world, commands);
    assert_eq!(
        events,
        vec![Event::AgentHeld {
            agent: AgentId::Seeker
        }]
    );
}

#[test]
fn hunter_closes_in_on_seeker() {
    let mut world = corridor();
    let hunter = spawn(&mut world, 5, 1, 1.0);
    tick(&mut world);

    for algorithm in Algorithm::ALL {
        assert_eq!(
            hunter_commands(&world, &fixed(algorithm), hunter, 4),
            vec![Command::MoveHunter {
                hunter,
                to: CellCoord::new(4, 1)
            }]
        );
    }
}

#[test]
fn hunter_sidesteps_cell_held_by_another_hunter() {
    let mut world = corridor();
    let _front = spawn(&mut world, 3, 1, 1.0);
    let rear = spawn(&mut world, 4, 1, 1.0);
    tick(&mut world);

    for seed in 0..8 {
        assert_eq!(
            hunter_commands(&world, &fixed(Algorithm::BreadthFirst), rear, seed),
            vec![Command::MoveHunter {
                hunter: rear,
                to: CellCoord::new(5, 1)
            }]
        );
    }
}

#[test]
fn hunter_does_not_retrace_recent_cells() {
    let mut world = open_room();
    let hunter = spawn(&mut world, 2, 1, 1.0);
    for column in [3, 4] {
        tick(&mut world);
        let events = apply_all(
            &mut world,
            vec![Command::MoveHunter {
                hunter,
                to: CellCoord::new(column, 1),
            }],
        );
        assert!(matches!(events.as_slice(), [Event::HunterAdvanced { .. }]));
    }
    tick(&mut world);

    let legal = [
        CellCoord::new(3, 1),
        CellCoord::new(5, 1),
        CellCoord::new(4, 2),
    ];
    let destinations: Vec<CellCoord> = (0..32)
        .filter_map(|seed| {
            match hunter_commands(&world, &fixed(Algorithm::BreadthFirst), hunter, seed).as_slice() {
                [Command::MoveHunter { to, .. }] => Some(*to),
                _ => None,
            }
        })
        .collect();

    assert_eq!(destinations.len(), 32);
    assert!(destinations.iter().all(|cell| legal.contains(cell)));
    assert!(destinations.iter().any(|cell| *cell != CellCoord::new(3, 1)));
}

#[test]
fn boxed_in_hunter_holds() {
    let mut world = corridor();
    let _left = spawn(&mut world, 3, 1, 1.0);
    let _right = spawn(&mut world, 5, 1, 1.0);
    let middle = spawn(&mut world, 4, 1, 1.0);
    tick(&mut world);

    assert_eq!(
        hunter_commands(&world, &Movement::default(), middle, 2),
        vec![Command::Hold {
            agent: AgentId::Hunter(middle)
        }]
    );
}
