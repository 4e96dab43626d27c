#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Maze Chase adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use maze_chase_core::{
    CreatureColor, EnemyView, GridQuery, Heading, PlayerSnapshot, Position, Tile, TileView,
};
use std::{error::Error, fmt, time::Duration};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

impl From<CreatureColor> for Color {
    fn from(color: CreatureColor) -> Self {
        Self::from_rgb_u8(color.red(), color.green(), color.blue())
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Heading sampled from the input device, if one was pressed this frame.
    pub heading: Option<Heading>,
    /// Whether the adapter detected a restart request on this frame.
    pub reset: bool,
}

/// Describes the tile grid that frames the maze.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileGridPresentation {
    /// Number of columns contained in the grid.
    pub columns: u32,
    /// Number of rows contained in the grid.
    pub rows: u32,
    /// Side length of a single tile expressed in screen units.
    pub tile_length: f32,
    /// Color used to fill blocked tiles.
    pub wall_color: Color,
    /// Color used to draw dots.
    pub dot_color: Color,
}

impl TileGridPresentation {
    /// Creates a new tile grid descriptor.
    ///
    /// Returns an error when `tile_length` is not a positive finite number.
    pub fn new(
        columns: u32,
        rows: u32,
        tile_length: f32,
        wall_color: Color,
        dot_color: Color,
    ) -> std::result::Result<Self, RenderingError> {
        if !(tile_length.is_finite() && tile_length > 0.0) {
            return Err(RenderingError::InvalidTileLength { tile_length });
        }

        Ok(Self {
            columns,
            rows,
            tile_length,
            wall_color,
            dot_color,
        })
    }
}

/// Outline drawn for a creature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CreatureShape {
    /// Filled circle, used for the player.
    Disc,
    /// Filled square, used for enemies.
    Square,
}

/// Creature rendered at a continuous position, expressed in tile units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CreaturePresentation {
    /// Center of the creature.
    pub center: Vec2,
    /// Radius of the creature's body.
    pub radius: f32,
    /// Fill color of the body.
    pub color: Color,
    /// Unit vector pointing where the creature looks, or zero.
    pub gaze: Vec2,
    /// Outline of the body.
    pub shape: CreatureShape,
}

impl CreaturePresentation {
    /// Creates a creature looking from `center` toward `focus`.
    #[must_use]
    pub fn looking_at(
        center: Vec2,
        radius: f32,
        color: Color,
        focus: Option<Vec2>,
        shape: CreatureShape,
    ) -> Self {
        let gaze = focus.map_or(Vec2::ZERO, |focus| (focus - center).normalize_or_zero());
        Self {
            center,
            radius,
            color,
            gaze,
            shape,
        }
    }

    /// Eye placement derived from the body size and gaze.
    #[must_use]
    pub fn eyes(&self) -> EyesPresentation {
        let eye_radius = self.radius / 3.0;
        let eye_y = self.center.y - self.radius / 3.0;
        let left = Vec2::new(self.center.x - self.radius / 2.0, eye_y);
        let right = Vec2::new(self.center.x + self.radius / 2.0, eye_y);
        let pupil_shift = self.gaze * 0.4 * eye_radius;

        EyesPresentation {
            left,
            right,
            eye_radius,
            left_pupil: left + pupil_shift,
            right_pupil: right + pupil_shift,
            pupil_radius: eye_radius / 2.0,
        }
    }
}

/// White eyes with black pupils shifted toward the gaze.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EyesPresentation {
    /// Center of the left eye.
    pub left: Vec2,
    /// Center of the right eye.
    pub right: Vec2,
    /// Radius of each eye.
    pub eye_radius: f32,
    /// Center of the left pupil.
    pub left_pupil: Vec2,
    /// Center of the right pupil.
    pub right_pupil: Vec2,
    /// Radius of each pupil.
    pub pupil_radius: f32,
}

/// Scene description combining the maze tiles and its inhabitants.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Tile grid that composes the play area.
    pub tile_grid: TileGridPresentation,
    /// Tiles in row-major order.
    pub tiles: Vec<Tile>,
    /// The player.
    pub player: CreaturePresentation,
    /// Enemies in roster order.
    pub enemies: Vec<CreaturePresentation>,
    /// Number of dots still on the board.
    pub dots_remaining: usize,
}

impl Scene {
    /// Captures the current world state.
    ///
    /// The player looks at the nearest enemy; each enemy looks at the center
    /// of the cell it is heading for.
    pub fn capture(
        tile_length: f32,
        palette: ScenePalette,
        tiles: TileView<'_>,
        player: &PlayerSnapshot,
        enemies: &EnemyView,
    ) -> std::result::Result<Self, RenderingError> {
        let tile_grid = TileGridPresentation::new(
            tiles.columns(),
            tiles.rows(),
            tile_length,
            palette.wall,
            palette.dot,
        )?;

        let player = CreaturePresentation::looking_at(
            to_vec2(player.position),
            player.radius as f32,
            Color::from(player.color),
            enemies
                .nearest_to(player.position)
                .map(|enemy| to_vec2(enemy.position)),
            CreatureShape::Disc,
        );
        let enemies = enemies
            .iter()
            .map(|enemy| {
                CreaturePresentation::looking_at(
                    to_vec2(enemy.position),
                    enemy.radius as f32,
                    Color::from(enemy.color),
                    Some(to_vec2(enemy.target.center())),
                    CreatureShape::Square,
                )
            })
            .collect();

        Ok(Self {
            tile_grid,
            tiles: tiles.iter().collect(),
            player,
            enemies,
            dots_remaining: tiles.dot_count(),
        })
    }

    /// Tile drawn at the provided grid location.
    #[must_use]
    pub fn tile(&self, column: u32, row: u32) -> Option<Tile> {
        if column >= self.tile_grid.columns || row >= self.tile_grid.rows {
            return None;
        }
        let index = usize::try_from(row)
            .ok()?
            .checked_mul(usize::try_from(self.tile_grid.columns).ok()?)?
            .checked_add(usize::try_from(column).ok()?)?;
        self.tiles.get(index).copied()
    }
}

/// Colors applied to the static parts of the maze.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScenePalette {
    /// Fill used for blocked tiles.
    pub wall: Color,
    /// Fill used for dots.
    pub dot: Color,
}

impl Default for ScenePalette {
    fn default() -> Self {
        Self {
            wall: Color::from_rgb_u8(33, 33, 222),
            dot: Color::from_rgb_u8(255, 255, 255),
        }
    }
}

fn to_vec2(position: Position) -> Vec2 {
    Vec2::new(position.x() as f32, position.y() as f32)
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window or report.
    pub window_title: String,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            scene,
        }
    }
}

/// Rendering backend capable of presenting Maze Chase scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the simulated frame delta,
    /// per-frame input captured by the adapter, and may mutate the scene before
    /// it is rendered, allowing adapters to animate world snapshots
    /// deterministically.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> AnyResult<()>;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Tiles must have a positive finite side length.
    InvalidTileLength {
        /// Provided length that failed validation.
        tile_length: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTileLength { tile_length } => {
                write!(f, "tile_length must be positive (received {tile_length})")
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_chase_core::{CellCoord, EnemyId, EnemySnapshot, StrategyKind};

    fn player_at(x: f64, y: f64) -> PlayerSnapshot {
        let position = Position::new(x, y);
        PlayerSnapshot {
            position,
            cell: position.cell(),
            radius: 0.375,
            moving: Heading::STILL,
            preferred: Heading::STILL,
            color: CreatureColor::YELLOW,
        }
    }

    fn enemy_at(id: u32, x: f64, y: f64, target: CellCoord) -> EnemySnapshot {
        let position = Position::new(x, y);
        EnemySnapshot {
            id: EnemyId::new(id),
            position,
            cell: position.cell(),
            radius: 0.375,
            moving: Heading::STILL,
            preferred: Heading::STILL,
            target,
            strategy: StrategyKind::Chasing,
            color: CreatureColor::RED,
        }
    }

    #[test]
    fn tile_grid_rejects_non_positive_tile_length_without_panicking() {
        let error = TileGridPresentation::new(
            4,
            4,
            0.0,
            Color::from_rgb_u8(0, 0, 0),
            Color::from_rgb_u8(255, 255, 255),
        )
        .expect_err("zero tile_length must be rejected");

        assert_eq!(error, RenderingError::InvalidTileLength { tile_length: 0.0 });
    }

    #[test]
    fn creature_colors_convert_to_opaque_channels() {
        let color = Color::from(CreatureColor::RED);

        assert_eq!(color, Color::new(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn player_looks_at_nearest_enemy_and_enemies_at_their_target() {
        let tiles = [Tile::Air; 25];
        let view = TileView::new(&tiles, 5, 5);
        let enemies = EnemyView::from_snapshots(vec![
            enemy_at(0, 4.5, 2.5, CellCoord::new(4, 0)),
            enemy_at(1, 1.5, 4.5, CellCoord::new(0, 4)),
        ]);

        let scene = Scene::capture(
            16.0,
            ScenePalette::default(),
            view,
            &player_at(1.5, 2.5),
            &enemies,
        )
        .expect("valid scene");

        assert_eq!(scene.player.gaze, Vec2::new(0.0, 1.0));
        assert_eq!(scene.player.shape, CreatureShape::Disc);
        assert_eq!(scene.enemies[0].gaze, Vec2::new(0.0, -1.0));
        assert_eq!(scene.enemies[1].gaze, Vec2::new(-1.0, 0.0));
        assert_eq!(scene.enemies[1].shape, CreatureShape::Square);
    }

    #[test]
    fn lone_player_looks_straight_ahead() {
        let tiles = [Tile::Dot, Tile::Air, Tile::Block];
        let scene = Scene::capture(
            8.0,
            ScenePalette::default(),
            TileView::new(&tiles, 3, 1),
            &player_at(1.5, 0.5),
            &EnemyView::default(),
        )
        .expect("valid scene");

        assert_eq!(scene.player.gaze, Vec2::ZERO);
        assert_eq!(scene.dots_remaining, 1);
        assert_eq!(scene.tile(2, 0), Some(Tile::Block));
        assert_eq!(scene.tile(3, 0), None);
    }

    #[test]
    fn pupils_shift_toward_gaze() {
        let creature = CreaturePresentation {
            center: Vec2::new(3.0, 3.0),
            radius: 0.75,
            color: Color::from_rgb_u8(255, 255, 0),
            gaze: Vec2::new(1.0, 0.0),
            shape: CreatureShape::Disc,
        };

        let eyes = creature.eyes();

        assert_eq!(eyes.eye_radius, 0.25);
        assert_eq!(eyes.left, Vec2::new(2.625, 2.75));
        assert_eq!(eyes.right, Vec2::new(3.375, 2.75));
        assert!((eyes.left_pupil - Vec2::new(2.725, 2.75)).length() < 1e-6);
        assert!((eyes.right_pupil - Vec2::new(3.475, 2.75)).length() < 1e-6);
        assert_eq!(eyes.pupil_radius, 0.125);
    }
}
