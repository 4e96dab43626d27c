#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic motion engine shared by the player and every enemy.
//!
//! A creature's tick is split in two halves so the caller can recompute
//! preferred headings in between:
//!
//! 1. [`advance`] resolves the moving heading, moves the body and reports which
//!    axes passed a cell midpoint.
//! 2. [`settle`] attempts a turn when a midpoint was crossed and then snaps the
//!    body out of any wall it is heading into.

use log::trace;
use maze_chase_core::{floor_to_index, Body, CellCoord, GridQuery, Heading, Position, Step};

/// Axes whose coordinate passed a cell midpoint during [`advance`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CenterCrossing {
    x: bool,
    y: bool,
}

impl CenterCrossing {
    /// Crossing where neither axis passed a midpoint.
    pub const NONE: Self = Self::new(false, false);

    /// Creates a crossing report from explicit per-axis flags.
    #[must_use]
    pub const fn new(x: bool, y: bool) -> Self {
        Self { x, y }
    }

    /// Whether the column coordinate passed a midpoint.
    #[must_use]
    pub const fn x(&self) -> bool {
        self.x
    }

    /// Whether the row coordinate passed a midpoint.
    #[must_use]
    pub const fn y(&self) -> bool {
        self.y
    }

    /// Whether any axis passed a midpoint.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.x || self.y
    }
}

/// Applies the first half of a tick: heading resolution and displacement.
///
/// The new position is committed unconditionally; walls are resolved later by
/// [`settle`].
pub fn advance(body: &mut Body) -> CenterCrossing {
    let moving = resolve_moving(body.preferred(), body.moving());
    body.set_moving(moving);

    let before = body.position();
    let speed = body.speed();
    let after = Position::new(
        before.x() + moving.x().as_f64() * speed,
        before.y() + moving.y().as_f64() * speed,
    );
    body.set_position(after);

    CenterCrossing::new(
        crossed_center(before.x(), after.x()),
        crossed_center(before.y(), after.y()),
    )
}

/// Applies the second half of a tick: turn arbitration and wall snapping.
pub fn settle<G>(body: &mut Body, grid: &G, crossing: CenterCrossing)
where
    G: GridQuery + ?Sized,
{
    if crossing.any() {
        turn(body, grid, crossing);
    }
    resolve_walls(body, grid);
}

fn resolve_moving(preferred: Heading, moving: Heading) -> Heading {
    if moving.is_still() {
        return preferred;
    }

    let mut resolved = moving;
    if !moving.x().is_still() && !preferred.x().is_still() {
        resolved = resolved.with_x(preferred.x());
    }
    if !moving.y().is_still() && !preferred.y().is_still() {
        resolved = resolved.with_y(preferred.y());
    }
    resolved
}

// Speeds stay below half a tile, so a wrap of more than half a tile in the
// offset from the midpoint can only come from passing that midpoint.
fn crossed_center(before: f64, after: f64) -> bool {
    let before_offset = (before - 0.5).rem_euclid(1.0);
    let after_offset = (after - 0.5).rem_euclid(1.0);
    (before_offset - after_offset).abs() > 0.5
}

fn turn<G>(body: &mut Body, grid: &G, crossing: CenterCrossing)
where
    G: GridQuery + ?Sized,
{
    let preferred = body.preferred();
    let moving = body.moving();
    let cell = body.cell();

    let x_to_y = crossing.x()
        && !moving.x().is_still()
        && !preferred.y().is_still()
        && grid.is_free(cell.offset(Heading::new(Step::Still, preferred.y())));
    let y_to_x = crossing.y()
        && !moving.y().is_still()
        && !preferred.x().is_still()
        && grid.is_free(cell.offset(Heading::new(preferred.x(), Step::Still)));

    if x_to_y {
        snap_x(body);
        body.set_moving(Heading::new(Step::Still, preferred.y()));
        trace!("turned onto the row axis at {cell:?}");
    } else if y_to_x {
        snap_y(body);
        body.set_moving(Heading::new(preferred.x(), Step::Still));
        trace!("turned onto the column axis at {cell:?}");
    }
}

fn resolve_walls<G>(body: &mut Body, grid: &G)
where
    G: GridQuery + ?Sized,
{
    let moving = body.moving();

    if !moving.x().is_still() {
        let position = body.position();
        let leading = floor_to_index(position.x() + 0.5 * moving.x().as_f64());
        let ahead = CellCoord::new(leading, floor_to_index(position.y()));
        if !grid.is_free(ahead) {
            snap_x(body);
            trace!("stopped by wall at {ahead:?}");
        }
    }

    if !moving.y().is_still() {
        let position = body.position();
        let leading = floor_to_index(position.y() + 0.5 * moving.y().as_f64());
        let ahead = CellCoord::new(floor_to_index(position.x()), leading);
        if !grid.is_free(ahead) {
            snap_y(body);
            trace!("stopped by wall at {ahead:?}");
        }
    }

    // Diagonal travel can clip a wall corner that neither axis sees on its own.
    let moving = body.moving();
    if !moving.x().is_still() && !moving.y().is_still() {
        let position = body.position();
        let corner = CellCoord::new(
            floor_to_index(position.x() + 0.5 * moving.x().as_f64()),
            floor_to_index(position.y() + 0.5 * moving.y().as_f64()),
        );
        if !grid.is_free(corner) {
            snap_y(body);
            trace!("stopped by wall corner at {corner:?}");
        }
    }
}

fn snap_x(body: &mut Body) {
    let position = body.position();
    body.set_position(Position::new(cell_center(position.x()), position.y()));
    body.set_moving(body.moving().with_x(Step::Still));
}

fn snap_y(body: &mut Body) {
    let position = body.position();
    body.set_position(Position::new(position.x(), cell_center(position.y())));
    body.set_moving(body.moving().with_y(Step::Still));
}

fn cell_center(coordinate: f64) -> f64 {
    coordinate.floor() + 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stationary_body_adopts_both_preferred_axes() {
        let preferred = Heading::new(Step::Positive, Step::Negative);
        assert_eq!(resolve_moving(preferred, Heading::STILL), preferred);
    }

    #[test]
    fn moving_axis_accepts_reversal() {
        assert_eq!(resolve_moving(Heading::WEST, Heading::EAST), Heading::WEST);
    }

    #[test]
    fn moving_axis_ignores_perpendicular_preference() {
        assert_eq!(resolve_moving(Heading::SOUTH, Heading::EAST), Heading::EAST);
        assert_eq!(resolve_moving(Heading::STILL, Heading::NORTH), Heading::NORTH);
    }

    #[test]
    fn crossing_detected_when_passing_midpoint_in_either_direction() {
        assert!(crossed_center(2.25, 2.5));
        assert!(crossed_center(2.4, 2.6));
        assert!(crossed_center(2.6, 2.4));
        assert!(!crossed_center(2.5, 2.75));
        assert!(!crossed_center(2.75, 3.25));
        assert!(!crossed_center(3.0, 3.0));
    }

    #[test]
    fn cell_center_snaps_to_half_tile() {
        assert_eq!(cell_center(3.9), 3.5);
        assert_eq!(cell_center(3.0), 3.5);
    }
}
