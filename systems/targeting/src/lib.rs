#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that picks the cell each enemy walks toward.

use log::debug;
use maze_chase_core::{CellCoord, GridQuery, Heading, Step, StrategyKind};
use rand::Rng;

/// What the targeting rules need to know about the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Quarry {
    /// Cell containing the player's center.
    pub cell: CellCoord,
    /// Heading currently applied to the player.
    pub moving: Heading,
}

/// Enemy-side inputs to a retargeting decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pursuer {
    /// Rule driving the enemy.
    pub strategy: StrategyKind,
    /// Cell containing the enemy's center.
    pub cell: CellCoord,
    /// Target committed by the previous decision.
    pub target: CellCoord,
}

/// Computes the target cell for `pursuer` under its strategy.
///
/// The returned cell is always either walkable or the pursuer's previous
/// target; the random strategy discards blocked draws instead of retrying.
pub fn retarget<G, R>(pursuer: Pursuer, quarry: Quarry, grid: &G, rng: &mut R) -> CellCoord
where
    G: GridQuery + ?Sized,
    R: Rng,
{
    match pursuer.strategy {
        StrategyKind::Chasing => quarry.cell,
        StrategyKind::Cutting => cut_off(quarry, grid),
        StrategyKind::Random => wander(pursuer, grid, rng),
    }
}

fn cut_off<G>(quarry: Quarry, grid: &G) -> CellCoord
where
    G: GridQuery + ?Sized,
{
    let heading = if !quarry.moving.x().is_still() {
        quarry.moving.with_y(Step::Still)
    } else {
        quarry.moving
    };
    if heading.is_still() {
        return quarry.cell;
    }

    // A straight run can never be longer than the grid's longest side.
    let limit = grid.columns().max(grid.rows());
    let mut target = quarry.cell;
    for _ in 0..limit {
        let next = target.offset(heading);
        if !grid.is_free(next) {
            break;
        }
        target = next;
    }
    target
}

fn wander<G, R>(pursuer: Pursuer, grid: &G, rng: &mut R) -> CellCoord
where
    G: GridQuery + ?Sized,
    R: Rng,
{
    if pursuer.cell != pursuer.target {
        return pursuer.target;
    }

    let (Ok(columns), Ok(rows)) = (i32::try_from(grid.columns()), i32::try_from(grid.rows())) else {
        return pursuer.target;
    };
    if columns == 0 || rows == 0 {
        return pursuer.target;
    }

    let candidate = CellCoord::new(rng.gen_range(0..columns), rng.gen_range(0..rows));
    if grid.is_free(candidate) {
        debug!("wander target moved to {candidate:?}");
        candidate
    } else {
        pursuer.target
    }
}
