use maze_chase_core::{Body, GridQuery, Heading, Position, Step, Tile, TileView};
use maze_chase_system_motion::{advance, settle, CenterCrossing};

/// Parses `#` as walls and anything else as open floor.
fn grid_from_rows(rows: &[&str]) -> (Vec<Tile>, u32, u32) {
    let columns = rows[0].len() as u32;
    let tiles = rows
        .iter()
        .flat_map(|row| {
            row.chars().map(|glyph| match glyph {
                '#' => Tile::Block,
                _ => Tile::Air,
            })
        })
        .collect();
    (tiles, columns, rows.len() as u32)
}

fn tick(body: &mut Body, grid: &TileView<'_>) -> CenterCrossing {
    let crossing = advance(body);
    settle(body, grid, crossing);
    crossing
}

const OPEN_ROOM: [&str; 5] = ["#####", "#...#", "#...#", "#...#", "#####"];

#[test]
fn body_accelerates_from_rest_toward_preferred_heading() {
    let (tiles, columns, rows) = grid_from_rows(&OPEN_ROOM);
    let grid = TileView::new(&tiles, columns, rows);
    let mut body = Body::new(Position::new(1.5, 2.5), 0.375, 0.25);
    body.set_preferred(Heading::EAST);

    let crossing = tick(&mut body, &grid);

    assert_eq!(crossing, CenterCrossing::NONE);
    assert_eq!(body.moving(), Heading::EAST);
    assert_eq!(body.position(), Position::new(1.75, 2.5));
}

#[test]
fn body_snaps_to_center_when_reaching_a_wall() {
    let (tiles, columns, rows) = grid_from_rows(&OPEN_ROOM);
    let grid = TileView::new(&tiles, columns, rows);
    let mut body = Body::new(Position::new(1.5, 2.5), 0.375, 0.25);
    body.set_preferred(Heading::EAST);

    for _ in 0..20 {
        let _ = tick(&mut body, &grid);
        assert!(grid.is_free(body.cell()), "entered a wall at {:?}", body.cell());
    }

    assert_eq!(body.position(), Position::new(3.5, 2.5));
    assert_eq!(body.moving(), Heading::STILL);
}

#[test]
fn body_turns_at_cell_center_when_perpendicular_cell_is_free() {
    let (tiles, columns, rows) = grid_from_rows(&OPEN_ROOM);
    let grid = TileView::new(&tiles, columns, rows);
    let mut body = Body::new(Position::new(1.5, 1.5), 0.375, 0.25);
    body.set_preferred(Heading::EAST);
    let _ = tick(&mut body, &grid);

    body.set_preferred(Heading::SOUTH);
    let _ = tick(&mut body, &grid);
    assert_eq!(body.moving(), Heading::EAST, "turns wait for a cell center");
    let _ = tick(&mut body, &grid);

    let crossing = tick(&mut body, &grid);

    assert!(crossing.x());
    assert_eq!(body.moving(), Heading::SOUTH);
    assert_eq!(body.position(), Position::new(2.5, 1.5));

    let _ = tick(&mut body, &grid);
    assert_eq!(body.position(), Position::new(2.5, 1.75));
}

#[test]
fn turn_is_refused_when_perpendicular_cell_is_blocked() {
    let corridor = ["#####", "#...#", "#####"];
    let (tiles, columns, rows) = grid_from_rows(&corridor);
    let grid = TileView::new(&tiles, columns, rows);
    let mut body = Body::new(Position::new(1.5, 1.5), 0.375, 0.25);
    body.set_preferred(Heading::EAST);
    let _ = tick(&mut body, &grid);
    body.set_preferred(Heading::SOUTH);

    for _ in 0..3 {
        let _ = tick(&mut body, &grid);
    }

    assert_eq!(body.moving(), Heading::EAST);
    assert_eq!(body.position(), Position::new(2.5, 1.5));
}

#[test]
fn reversal_happens_between_cell_centers() {
    let (tiles, columns, rows) = grid_from_rows(&OPEN_ROOM);
    let grid = TileView::new(&tiles, columns, rows);
    let mut body = Body::new(Position::new(1.5, 2.5), 0.375, 0.25);
    body.set_preferred(Heading::EAST);
    let _ = tick(&mut body, &grid);
    assert_eq!(body.position(), Position::new(1.75, 2.5));

    body.set_preferred(Heading::WEST);
    let _ = tick(&mut body, &grid);

    assert_eq!(body.moving().x(), Step::Negative);
    assert_eq!(body.position(), Position::new(1.5, 2.5));
}

#[test]
fn moving_heading_components_stay_unit_sized() {
    let (tiles, columns, rows) = grid_from_rows(&OPEN_ROOM);
    let grid = TileView::new(&tiles, columns, rows);
    let mut body = Body::new(Position::new(2.5, 2.5), 0.375, 0.125);
    let script = [
        Heading::NORTH,
        Heading::EAST,
        Heading::SOUTH,
        Heading::WEST,
        Heading::new(Step::Positive, Step::Positive),
    ];

    for frame in 0..200 {
        body.set_preferred(script[(frame / 7) % script.len()]);
        let _ = tick(&mut body, &grid);

        let moving = body.moving();
        assert!((-1..=1).contains(&moving.x().value()));
        assert!((-1..=1).contains(&moving.y().value()));
        assert!(grid.is_free(body.cell()), "frame {frame} entered {:?}", body.cell());
    }
}

#[test]
fn diagonal_heading_does_not_cut_through_inner_corner() {
    let pillar = ["#####", "#...#", "#.#.#", "#...#", "#####"];
    let (tiles, columns, rows) = grid_from_rows(&pillar);
    let grid = TileView::new(&tiles, columns, rows);
    let mut body = Body::new(Position::new(1.5, 1.5), 0.375, 0.25);
    body.set_preferred(Heading::new(Step::Positive, Step::Positive));

    let _ = tick(&mut body, &grid);
    assert_eq!(body.position(), Position::new(1.75, 1.5));
    assert_eq!(body.moving(), Heading::EAST);

    for frame in 0..40 {
        let _ = tick(&mut body, &grid);
        assert!(grid.is_free(body.cell()), "frame {frame} entered {:?}", body.cell());
    }
}
