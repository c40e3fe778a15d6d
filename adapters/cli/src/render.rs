//! Plain-text snapshot of a level.

use std::collections::HashSet;

use maze_chase_core::{Cell, CellCoord};
use maze_chase_world::{query, World};

const WALL: char = '#';
const RESOURCE: char = '.';
const SEEKER: char = 'S';
const HUNTER: char = 'H';
const FLOOR: char = ' ';

/// Draws the maze one text row per grid row. Hunters are drawn over the seeker.
pub(crate) fn render(world: &World) -> String {
    let grid = query::grid(world);
    let resources = query::resource_points(world);
    let seeker = query::seeker(world).cell;
    let hunters: HashSet<CellCoord> = query::hunter_view(world).cells().into_iter().collect();

    let mut out = String::with_capacity(grid.cell_count() + grid.rows() as usize);
    for row in 0..grid.rows() {
        for column in 0..grid.columns() {
            let cell = CellCoord::new(column, row);
            let glyph = if hunters.contains(&cell) {
                HUNTER
            } else if cell == seeker {
                SEEKER
            } else if resources.contains(&cell) {
                RESOURCE
            } else if grid.cell(cell) == Some(Cell::Wall) {
                WALL
            } else {
                FLOOR
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_chase_core::{Command, Grid};
    use maze_chase_world::{self as world, Maze};

    #[test]
    fn draws_every_layer() {
        let mut grid = Grid::filled(7, 3, Cell::Wall);
        for column in 1..6 {
            grid.set(CellCoord::new(column, 1), Cell::Open);
        }
        let mut maze = Maze::from_grid(grid).expect("valid grid");
        maze.place_resource_points();
        let mut world = World::new(maze, 1);
        let mut events = Vec::new();
        world::apply(
            &mut world,
            Command::SpawnHunter {
                cell: CellCoord::new(5, 1),
                speed: 1.0,
            },
            &mut events,
        );

        assert_eq!(render(&world), "#######\n#S...H#\n#######\n");
    }
}
