//! Tunable creature roster.

use maze_chase_core::{CellCoord, CreatureColor, GridQuery, Position, StrategyKind};
use thiserror::Error;

const DEFAULT_SEED: u64 = 0x5eed_c4a5_e000_0001;
const DEFAULT_RADIUS: f64 = 0.375;

/// Creature roster and random seed used to populate a world.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldConfig {
    /// Player spawn and movement parameters.
    pub player: PlayerConfig,
    /// Enemies in the order they are ticked.
    pub enemies: Vec<EnemyConfig>,
    /// Seed from which every enemy's random generator is derived.
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            player: PlayerConfig {
                spawn: Position::new(13.5, 10.5),
                radius: DEFAULT_RADIUS,
                speed: 0.07,
            },
            enemies: vec![
                EnemyConfig {
                    spawn: Position::new(12.5, 8.5),
                    radius: DEFAULT_RADIUS,
                    speed: 0.06,
                    color: CreatureColor::RED,
                    strategy: StrategyKind::Chasing,
                },
                EnemyConfig {
                    spawn: Position::new(13.5, 8.5),
                    radius: DEFAULT_RADIUS,
                    speed: 0.065,
                    color: CreatureColor::GREEN,
                    strategy: StrategyKind::Cutting,
                },
                EnemyConfig {
                    spawn: Position::new(14.5, 8.5),
                    radius: DEFAULT_RADIUS,
                    speed: 0.07,
                    color: CreatureColor::MAGENTA,
                    strategy: StrategyKind::Random,
                },
            ],
            seed: DEFAULT_SEED,
        }
    }
}

impl WorldConfig {
    /// Checks that every creature spawns on a free cell with usable parameters.
    pub fn validate<G>(&self, grid: &G) -> Result<(), ConfigError>
    where
        G: GridQuery + ?Sized,
    {
        check_creature(
            grid,
            Creature::Player,
            self.player.spawn,
            self.player.radius,
            self.player.speed,
        )?;
        for (index, enemy) in self.enemies.iter().enumerate() {
            check_creature(
                grid,
                Creature::Enemy(index),
                enemy.spawn,
                enemy.radius,
                enemy.speed,
            )?;
        }
        Ok(())
    }
}

/// Player spawn and movement parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerConfig {
    /// Initial position, restored on every reset.
    pub spawn: Position,
    /// Collision radius in tiles.
    pub radius: f64,
    /// Tiles travelled per tick.
    pub speed: f64,
}

/// Enemy spawn, movement and behaviour parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyConfig {
    /// Initial position, restored on every reset.
    pub spawn: Position,
    /// Collision radius in tiles.
    pub radius: f64,
    /// Tiles travelled per tick.
    pub speed: f64,
    /// Appearance handed to renderers.
    pub color: CreatureColor,
    /// Targeting rule.
    pub strategy: StrategyKind,
}

/// Creature a [`ConfigError`] refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Creature {
    /// The player.
    Player,
    /// The enemy at the given roster index.
    Enemy(usize),
}

impl std::fmt::Display for Creature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Player => write!(f, "player"),
            Self::Enemy(index) => write!(f, "enemy #{index}"),
        }
    }
}

/// Reasons a roster can be rejected for a given maze.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// The spawn position lies in a wall or outside the maze.
    #[error("{creature} spawns on {cell:?}, which is not a free cell")]
    BlockedSpawn {
        /// Creature with the bad spawn.
        creature: Creature,
        /// Cell containing the spawn position.
        cell: CellCoord,
    },
    /// Speeds must be positive and below half a tile per tick.
    #[error("{creature} speed {speed} must lie strictly between 0 and 0.5")]
    InvalidSpeed {
        /// Creature with the bad speed.
        creature: Creature,
        /// Rejected speed.
        speed: f64,
    },
    /// Radii must be positive.
    #[error("{creature} radius {radius} must be positive")]
    InvalidRadius {
        /// Creature with the bad radius.
        creature: Creature,
        /// Rejected radius.
        radius: f64,
    },
}

fn check_creature<G>(
    grid: &G,
    creature: Creature,
    spawn: Position,
    radius: f64,
    speed: f64,
) -> Result<(), ConfigError>
where
    G: GridQuery + ?Sized,
{
    let cell = spawn.cell();
    if !grid.is_free(cell) {
        return Err(ConfigError::BlockedSpawn { creature, cell });
    }
    if !(speed > 0.0 && speed < 0.5) {
        return Err(ConfigError::InvalidSpeed { creature, speed });
    }
    if !(radius > 0.0) {
        return Err(ConfigError::InvalidRadius { creature, radius });
    }
    Ok(())
}
