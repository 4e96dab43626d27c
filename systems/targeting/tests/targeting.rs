use maze_chase_core::{CellCoord, GridQuery, Heading, StrategyKind, Tile, TileView};
use maze_chase_system_targeting::{retarget, Pursuer, Quarry};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn corridor_with_wall_at_column_ten() -> Vec<Tile> {
    let columns = 12;
    let rows = 8;
    let mut tiles = vec![Tile::Block; columns * rows];
    for column in 1..10 {
        tiles[5 * columns + column] = Tile::Air;
    }
    tiles
}

#[test]
fn cutting_targets_last_free_cell_ahead_of_player() {
    let tiles = corridor_with_wall_at_column_ten();
    let grid = TileView::new(&tiles, 12, 8);
    assert!(grid.is_free(CellCoord::new(9, 5)));
    assert!(!grid.is_free(CellCoord::new(10, 5)));
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    let target = retarget(
        Pursuer {
            strategy: StrategyKind::Cutting,
            cell: CellCoord::new(1, 5),
            target: CellCoord::new(1, 5),
        },
        Quarry {
            cell: CellCoord::new(5, 5),
            moving: Heading::EAST,
        },
        &grid,
        &mut rng,
    );

    assert_eq!(target, CellCoord::new(9, 5));
}

#[test]
fn random_target_holds_until_reached() {
    let tiles = vec![Tile::Air; 36];
    let grid = TileView::new(&tiles, 6, 6);
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let pursuer = Pursuer {
        strategy: StrategyKind::Random,
        cell: CellCoord::new(0, 0),
        target: CellCoord::new(4, 4),
    };
    let quarry = Quarry {
        cell: CellCoord::new(2, 2),
        moving: Heading::STILL,
    };

    for _ in 0..10 {
        assert_eq!(retarget(pursuer, quarry, &grid, &mut rng), CellCoord::new(4, 4));
    }
}

#[test]
fn random_target_never_commits_a_blocked_cell() {
    let rows = ["######", "#....#", "#.##.#", "#....#", "######"];
    let tiles: Vec<Tile> = rows
        .iter()
        .flat_map(|row| {
            row.chars()
                .map(|glyph| if glyph == '#' { Tile::Block } else { Tile::Air })
        })
        .collect();
    let grid = TileView::new(&tiles, 6, 5);
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let quarry = Quarry {
        cell: CellCoord::new(1, 1),
        moving: Heading::STILL,
    };
    let mut target = CellCoord::new(1, 1);
    let mut moved = 0;

    for _ in 0..500 {
        let next = retarget(
            Pursuer {
                strategy: StrategyKind::Random,
                cell: target,
                target,
            },
            quarry,
            &grid,
            &mut rng,
        );
        assert!(grid.is_free(next), "committed blocked target {next:?}");
        if next != target {
            moved += 1;
        }
        target = next;
    }

    assert!(moved > 0, "random strategy never left its first target");
}

#[test]
fn random_draws_are_reproducible_for_equal_seeds() {
    let tiles = vec![Tile::Air; 100];
    let grid = TileView::new(&tiles, 10, 10);
    let quarry = Quarry {
        cell: CellCoord::new(0, 0),
        moving: Heading::STILL,
    };
    let pursuer = Pursuer {
        strategy: StrategyKind::Random,
        cell: CellCoord::new(5, 5),
        target: CellCoord::new(5, 5),
    };

    let mut first = ChaCha8Rng::seed_from_u64(42);
    let mut second = ChaCha8Rng::seed_from_u64(42);

    assert_eq!(
        retarget(pursuer, quarry, &grid, &mut first),
        retarget(pursuer, quarry, &grid, &mut second)
    );
}
