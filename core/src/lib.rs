#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Chase engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and the pure systems. Adapters submit [`Command`]
//! values describing sampled input and frame requests, the world executes
//! those commands via its `apply` entry point, and then broadcasts [`Event`]
//! values describing what happened during the frame. Systems operate on the
//! plain data types declared here and query the maze through [`GridQuery`].

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Maze Chase.";

/// Radius of a dot pickup measured in tiles.
pub const DOT_RADIUS: f64 = 0.125;

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Stores the player's preferred heading. The most recent value wins.
    Steer {
        /// Heading sampled from the input device.
        heading: Heading,
    },
    /// Simulates exactly one frame.
    Tick,
    /// Restores the initial state without waiting for a win or loss.
    Reset,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Indicates that a new frame started.
    FrameAdvanced {
        /// One-based index of the frame that was simulated.
        frame: u64,
    },
    /// Confirms that the player consumed a dot.
    DotEaten {
        /// Cell that held the dot.
        cell: CellCoord,
        /// Number of dots left in the maze after the pickup.
        remaining: usize,
    },
    /// Announces that the last dot was eaten.
    Won,
    /// Announces that an enemy caught the player.
    Lost {
        /// Enemy whose body overlapped the player.
        enemy: EnemyId,
    },
    /// Confirms that every creature and the maze returned to the initial state.
    WorldReset,
}

/// Value of a single axis of a heading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    /// Movement toward decreasing coordinates.
    Negative,
    /// No movement along the axis.
    #[default]
    Still,
    /// Movement toward increasing coordinates.
    Positive,
}

impl Step {
    /// Creates a step from the sign of the provided value.
    #[must_use]
    pub const fn from_sign(value: i32) -> Self {
        if value < 0 {
            Self::Negative
        } else if value > 0 {
            Self::Positive
        } else {
            Self::Still
        }
    }

    /// Signed integer representation in `{-1, 0, 1}`.
    #[must_use]
    pub const fn value(self) -> i32 {
        match self {
            Self::Negative => -1,
            Self::Still => 0,
            Self::Positive => 1,
        }
    }

    /// Signed floating point representation in `{-1.0, 0.0, 1.0}`.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.value())
    }

    /// Reports whether the axis is at rest.
    #[must_use]
    pub const fn is_still(self) -> bool {
        matches!(self, Self::Still)
    }
}

/// Pair of independent axis steps describing a direction of travel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Heading {
    x: Step,
    y: Step,
}

impl Heading {
    /// Heading with both axes at rest.
    pub const STILL: Self = Self::new(Step::Still, Step::Still);
    /// Movement toward decreasing rows.
    pub const NORTH: Self = Self::new(Step::Still, Step::Negative);
    /// Movement toward increasing columns.
    pub const EAST: Self = Self::new(Step::Positive, Step::Still);
    /// Movement toward increasing rows.
    pub const SOUTH: Self = Self::new(Step::Still, Step::Positive);
    /// Movement toward decreasing columns.
    pub const WEST: Self = Self::new(Step::Negative, Step::Still);

    /// Creates a heading from explicit axis steps.
    #[must_use]
    pub const fn new(x: Step, y: Step) -> Self {
        Self { x, y }
    }

    /// Step applied along the column axis.
    #[must_use]
    pub const fn x(&self) -> Step {
        self.x
    }

    /// Step applied along the row axis.
    #[must_use]
    pub const fn y(&self) -> Step {
        self.y
    }

    /// Returns a copy with the column step replaced.
    #[must_use]
    pub const fn with_x(self, x: Step) -> Self {
        Self { x, y: self.y }
    }

    /// Returns a copy with the row step replaced.
    #[must_use]
    pub const fn with_y(self, y: Step) -> Self {
        Self { x: self.x, y }
    }

    /// Reports whether both axes are at rest.
    #[must_use]
    pub const fn is_still(&self) -> bool {
        self.x.is_still() && self.y.is_still()
    }
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
///
/// Coordinates are signed so that neighbours of border cells can be expressed
/// and rejected by [`GridQuery::is_free`] instead of wrapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: i32,
    row: i32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column.abs_diff(other.column) + self.row.abs_diff(other.row)
    }

    /// Cell reached by moving one step along each axis of `heading`.
    #[must_use]
    pub const fn offset(self, heading: Heading) -> Self {
        Self {
            column: self.column + heading.x().value(),
            row: self.row + heading.y().value(),
        }
    }

    /// Continuous position of the cell's midpoint.
    #[must_use]
    pub fn center(self) -> Position {
        Position::new(f64::from(self.column) + 0.5, f64::from(self.row) + 0.5)
    }
}

/// Continuous location measured in tiles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    x: f64,
    y: f64,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Column-axis coordinate in tiles.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Row-axis coordinate in tiles.
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Cell that contains the position.
    #[must_use]
    pub fn cell(&self) -> CellCoord {
        CellCoord::new(floor_to_index(self.x), floor_to_index(self.y))
    }

    /// Squared euclidean distance to `other`.
    #[must_use]
    pub fn distance_squared(&self, other: Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }
}

/// Converts a tile-space coordinate into the index of the containing cell.
#[must_use]
pub fn floor_to_index(coordinate: f64) -> i32 {
    coordinate.floor() as i32
}

/// Content of a single maze tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    /// Empty corridor.
    #[default]
    Air,
    /// Solid wall that nothing may enter.
    Block,
    /// Corridor holding an uneaten dot.
    Dot,
}

impl Tile {
    /// Reports whether creatures may occupy the tile.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        !matches!(self, Self::Block)
    }
}

/// Walkability queries every system performs against the maze.
pub trait GridQuery {
    /// Number of columns contained in the grid.
    fn columns(&self) -> u32;

    /// Number of rows contained in the grid.
    fn rows(&self) -> u32;

    /// Reports whether a creature may occupy `cell`.
    ///
    /// Coordinates outside the grid are never free.
    fn is_free(&self, cell: CellCoord) -> bool;

    /// Reports whether `cell` lies inside the grid bounds.
    fn contains(&self, cell: CellCoord) -> bool {
        u32::try_from(cell.column()).map_or(false, |column| column < self.columns())
            && u32::try_from(cell.row()).map_or(false, |row| row < self.rows())
    }
}

/// Read-only view into a dense, row-major tile grid.
#[derive(Clone, Copy, Debug)]
pub struct TileView<'a> {
    tiles: &'a [Tile],
    columns: u32,
    rows: u32,
}

impl<'a> TileView<'a> {
    /// Captures a new tile view backed by the provided slice.
    #[must_use]
    pub fn new(tiles: &'a [Tile], columns: u32, rows: u32) -> Self {
        Self {
            tiles,
            columns,
            rows,
        }
    }

    /// Returns the tile stored at `cell`, if it lies inside the grid.
    #[must_use]
    pub fn tile(&self, cell: CellCoord) -> Option<Tile> {
        self.index(cell)
            .and_then(|index| self.tiles.get(index).copied())
    }

    /// Iterator over all tiles in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Tile> + 'a {
        self.tiles.iter().copied()
    }

    /// Counts the tiles that still hold a dot.
    #[must_use]
    pub fn dot_count(&self) -> usize {
        self.tiles.iter().filter(|tile| **tile == Tile::Dot).count()
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }
}

impl GridQuery for TileView<'_> {
    fn columns(&self) -> u32 {
        self.columns
    }

    fn rows(&self) -> u32 {
        self.rows
    }

    fn is_free(&self, cell: CellCoord) -> bool {
        self.tile(cell).map_or(false, Tile::is_walkable)
    }
}

/// Kinematic state shared by the player and every enemy.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    position: Position,
    radius: f64,
    speed: f64,
    preferred: Heading,
    moving: Heading,
    initial_position: Position,
}

impl Body {
    /// Creates a body at rest at `position`, which also becomes its reset point.
    #[must_use]
    pub const fn new(position: Position, radius: f64, speed: f64) -> Self {
        Self {
            position,
            radius,
            speed,
            preferred: Heading::STILL,
            moving: Heading::STILL,
            initial_position: position,
        }
    }

    /// Current continuous position.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Cell containing the body's center.
    #[must_use]
    pub fn cell(&self) -> CellCoord {
        self.position.cell()
    }

    /// Collision radius in tiles.
    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    /// Distance travelled per tick along a moving axis, in tiles.
    #[must_use]
    pub const fn speed(&self) -> f64 {
        self.speed
    }

    /// Heading the body wants to take.
    #[must_use]
    pub const fn preferred(&self) -> Heading {
        self.preferred
    }

    /// Heading currently applied to the position.
    #[must_use]
    pub const fn moving(&self) -> Heading {
        self.moving
    }

    /// Position restored by [`Body::reset`].
    #[must_use]
    pub const fn initial_position(&self) -> Position {
        self.initial_position
    }

    /// Replaces the preferred heading.
    pub fn set_preferred(&mut self, heading: Heading) {
        self.preferred = heading;
    }

    /// Replaces the moving heading.
    pub fn set_moving(&mut self, heading: Heading) {
        self.moving = heading;
    }

    /// Moves the body to `position`.
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Reports whether the circles of both bodies overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Body) -> bool {
        let reach = self.radius + other.radius;
        self.position.distance_squared(other.position) < reach * reach
    }

    /// Restores the initial position and stops both headings.
    pub fn reset(&mut self) {
        self.position = self.initial_position;
        self.preferred = Heading::STILL;
        self.moving = Heading::STILL;
    }
}

/// Visual appearance applied to a creature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreatureColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl CreatureColor {
    /// Pure yellow used by the player.
    pub const YELLOW: Self = Self::from_rgb(0xff, 0xff, 0x00);
    /// Pure red.
    pub const RED: Self = Self::from_rgb(0xff, 0x00, 0x00);
    /// Pure green.
    pub const GREEN: Self = Self::from_rgb(0x00, 0xff, 0x00);
    /// Magenta.
    pub const MAGENTA: Self = Self::from_rgb(0xff, 0x00, 0xff);

    /// Creates a new creature color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Rule an enemy uses to pick the cell it walks toward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Targets the player's current cell.
    Chasing,
    /// Targets the last free cell ahead of the player along its corridor.
    Cutting,
    /// Wanders between randomly drawn free cells.
    Random,
}

/// Immutable representation of the player used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Continuous position of the player's center.
    pub position: Position,
    /// Cell containing the player's center.
    pub cell: CellCoord,
    /// Collision radius in tiles.
    pub radius: f64,
    /// Heading currently applied to the player.
    pub moving: Heading,
    /// Heading most recently requested by input.
    pub preferred: Heading,
    /// Appearance assigned to the player.
    pub color: CreatureColor,
}

/// Immutable representation of a single enemy used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Continuous position of the enemy's center.
    pub position: Position,
    /// Cell containing the enemy's center.
    pub cell: CellCoord,
    /// Collision radius in tiles.
    pub radius: f64,
    /// Heading currently applied to the enemy.
    pub moving: Heading,
    /// Heading chosen by the enemy's pathfinding.
    pub preferred: Heading,
    /// Cell the enemy is currently walking toward.
    pub target: CellCoord,
    /// Targeting rule driving the enemy.
    pub strategy: StrategyKind,
    /// Appearance assigned to the enemy.
    pub color: CreatureColor,
}

/// Read-only snapshot describing all enemies within the maze.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Enemy whose center lies closest to `position`, if any.
    #[must_use]
    pub fn nearest_to(&self, position: Position) -> Option<&EnemySnapshot> {
        self.snapshots.iter().min_by(|left, right| {
            position
                .distance_squared(left.position)
                .total_cmp(&position.distance_squared(right.position))
        })
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}
