//! Pickup and capture rules evaluated after creatures move.

use maze_chase_core::{Body, CellCoord, Tile, DOT_RADIUS};

use crate::maze::Maze;

/// Removes the dot under `player` when the two circles overlap.
///
/// Returns the cell that held the eaten dot.
pub(crate) fn eat_dot(maze: &mut Maze, player: &Body) -> Option<CellCoord> {
    let cell = player.cell();
    if maze.tile(cell) != Some(Tile::Dot) {
        return None;
    }

    let reach = player.radius() + DOT_RADIUS;
    if player.position().distance_squared(cell.center()) >= reach * reach {
        return None;
    }

    maze.set_tile(cell, Tile::Air);
    Some(cell)
}

/// Reports whether `enemy` has caught `player`.
pub(crate) fn caught(enemy: &Body, player: &Body) -> bool {
    enemy.overlaps(player)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Layout;
    use maze_chase_core::Position;

    fn single_dot_maze() -> Maze {
        Maze::new(
            Layout::parse(
                "#######\n\
                 #_____#\n\
                 #_____#\n\
                 #__.__#\n\
                 #_____#\n\
                 #######",
            )
            .expect("valid layout"),
        )
    }

    #[test]
    fn overlapping_player_eats_dot() {
        let mut maze = single_dot_maze();
        let player = Body::new(Position::new(3.25, 3.5), 0.375, 0.07);

        assert_eq!(eat_dot(&mut maze, &player), Some(CellCoord::new(3, 3)));
        assert_eq!(maze.tile(CellCoord::new(3, 3)), Some(Tile::Air));
        assert_eq!(maze.dot_count(), 0);
    }

    #[test]
    fn player_on_cell_edge_does_not_reach_dot() {
        let mut maze = single_dot_maze();
        let player = Body::new(Position::new(3.0, 3.5), 0.375, 0.07);

        assert_eq!(eat_dot(&mut maze, &player), None);
        assert_eq!(maze.dot_count(), 1);
    }

    #[test]
    fn capture_is_symmetric() {
        let enemy = Body::new(Position::new(2.0, 2.5), 0.375, 0.06);
        let player = Body::new(Position::new(2.7, 2.5), 0.375, 0.07);

        assert!(caught(&enemy, &player));
        assert!(caught(&player, &enemy));
    }
}
