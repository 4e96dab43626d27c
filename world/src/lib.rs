#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Maze Chase.
//!
//! The world owns the maze, the player and the enemy roster. Each
//! [`Command::Tick`] simulates one frame: the player moves first, then every
//! enemy in roster order. When a win or loss fires, the world resets at once
//! and the rest of that frame is skipped.

mod config;
mod layout;
mod maze;
mod rules;

use log::{debug, info};
use maze_chase_core::{
    Body, CellCoord, Command, CreatureColor, EnemyId, Event, StrategyKind, WELCOME_BANNER,
};
use maze_chase_system_motion as motion;
use maze_chase_system_pathfinding::{heading_between, Pathfinder};
use maze_chase_system_targeting::{retarget, Pursuer, Quarry};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub use config::{ConfigError, Creature, EnemyConfig, PlayerConfig, WorldConfig};
pub use layout::{Layout, LayoutError};
pub use maze::Maze;

/// Represents the authoritative Maze Chase world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    maze: Maze,
    player: Player,
    enemies: Vec<Enemy>,
    pathfinder: Pathfinder,
    frame: u64,
}

impl World {
    /// Creates a world on the classic board with the default roster.
    #[must_use]
    pub fn new() -> Self {
        Self::assemble(Layout::classic(), WorldConfig::default())
    }

    /// Creates a world from a custom layout and roster.
    pub fn with_layout(layout: Layout, config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate(&layout.view())?;
        Ok(Self::assemble(layout, config))
    }

    fn assemble(layout: Layout, config: WorldConfig) -> Self {
        let player = Player {
            body: Body::new(config.player.spawn, config.player.radius, config.player.speed),
            color: CreatureColor::YELLOW,
        };
        let enemies = config
            .enemies
            .iter()
            .enumerate()
            .map(|(index, enemy)| Enemy::spawn(index, enemy, config.seed))
            .collect();

        Self {
            banner: WELCOME_BANNER,
            maze: Maze::new(layout),
            player,
            enemies,
            pathfinder: Pathfinder::new(),
            frame: 0,
        }
    }

    fn run_frame(&mut self, out_events: &mut Vec<Event>) {
        self.frame = self.frame.saturating_add(1);
        out_events.push(Event::FrameAdvanced { frame: self.frame });

        if self.tick_player(out_events) == FrameFlow::Restarted {
            return;
        }
        for index in 0..self.enemies.len() {
            if self.tick_enemy(index, out_events) == FrameFlow::Restarted {
                return;
            }
        }
    }

    fn tick_player(&mut self, out_events: &mut Vec<Event>) -> FrameFlow {
        let crossing = motion::advance(&mut self.player.body);
        if crossing.any() {
            self.steer_enemies();
        }
        motion::settle(&mut self.player.body, &self.maze, crossing);

        let Some(cell) = rules::eat_dot(&mut self.maze, &self.player.body) else {
            return FrameFlow::Continue;
        };
        let remaining = self.maze.dot_count();
        out_events.push(Event::DotEaten { cell, remaining });
        if remaining > 0 {
            return FrameFlow::Continue;
        }

        info!("all dots eaten on frame {}", self.frame);
        out_events.push(Event::Won);
        self.restart(out_events);
        FrameFlow::Restarted
    }

    fn tick_enemy(&mut self, index: usize, out_events: &mut Vec<Event>) -> FrameFlow {
        let quarry = self.quarry();
        let Some(enemy) = self.enemies.get_mut(index) else {
            return FrameFlow::Continue;
        };

        let crossing = motion::advance(&mut enemy.body);
        if crossing.any() {
            steer(enemy, quarry, &self.maze, &mut self.pathfinder);
        }
        motion::settle(&mut enemy.body, &self.maze, crossing);

        if !rules::caught(&enemy.body, &self.player.body) {
            return FrameFlow::Continue;
        }

        let id = enemy.id;
        info!("enemy {} caught the player on frame {}", id.get(), self.frame);
        out_events.push(Event::Lost { enemy: id });
        self.restart(out_events);
        FrameFlow::Restarted
    }

    fn steer_enemies(&mut self) {
        let quarry = self.quarry();
        for enemy in &mut self.enemies {
            steer(enemy, quarry, &self.maze, &mut self.pathfinder);
        }
    }

    fn quarry(&self) -> Quarry {
        Quarry {
            cell: self.player.body.cell(),
            moving: self.player.body.moving(),
        }
    }

    fn restart(&mut self, out_events: &mut Vec<Event>) {
        self.maze.reset();
        self.player.body.reset();
        for enemy in &mut self.enemies {
            enemy.reset();
        }
        out_events.push(Event::WorldReset);
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Steer { heading } => world.player.body.set_preferred(heading),
        Command::Tick => world.run_frame(out_events),
        Command::Reset => world.restart(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use maze_chase_core::{EnemySnapshot, EnemyView, PlayerSnapshot, TileView};

    use super::{Maze, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the live maze.
    #[must_use]
    pub fn maze(world: &World) -> &Maze {
        &world.maze
    }

    /// Read-only view over the live tiles.
    #[must_use]
    pub fn tile_view(world: &World) -> TileView<'_> {
        world.maze.view()
    }

    /// Number of dots still waiting to be eaten.
    #[must_use]
    pub fn dot_count(world: &World) -> usize {
        world.maze.dot_count()
    }

    /// Number of frames simulated since the world was created.
    #[must_use]
    pub fn frame(world: &World) -> u64 {
        world.frame
    }

    /// Captures the player's current state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        let body = &world.player.body;
        PlayerSnapshot {
            position: body.position(),
            cell: body.cell(),
            radius: body.radius(),
            moving: body.moving(),
            preferred: body.preferred(),
            color: world.player.color,
        }
    }

    /// Captures a read-only view of the enemies roaming the maze.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(
            world
                .enemies
                .iter()
                .map(|enemy| EnemySnapshot {
                    id: enemy.id,
                    position: enemy.body.position(),
                    cell: enemy.body.cell(),
                    radius: enemy.body.radius(),
                    moving: enemy.body.moving(),
                    preferred: enemy.body.preferred(),
                    target: enemy.target,
                    strategy: enemy.strategy,
                    color: enemy.color,
                })
                .collect(),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FrameFlow {
    Continue,
    Restarted,
}

#[derive(Clone, Debug)]
struct Player {
    body: Body,
    color: CreatureColor,
}

#[derive(Clone, Debug)]
struct Enemy {
    id: EnemyId,
    body: Body,
    color: CreatureColor,
    strategy: StrategyKind,
    target: CellCoord,
    home: CellCoord,
    rng: ChaCha8Rng,
}

impl Enemy {
    fn spawn(index: usize, config: &EnemyConfig, seed: u64) -> Self {
        let body = Body::new(config.spawn, config.radius, config.speed);
        let home = body.cell();
        Self {
            id: EnemyId::new(u32::try_from(index).unwrap_or(u32::MAX)),
            body,
            color: config.color,
            strategy: config.strategy,
            target: home,
            home,
            rng: ChaCha8Rng::seed_from_u64(seed.wrapping_add(index as u64)),
        }
    }

    fn reset(&mut self) {
        self.body.reset();
        self.target = self.home;
    }
}

/// Runs the enemy's targeting rule and points it along the first step of the
/// shortest route. An unreachable target leaves the preferred heading alone.
fn steer(enemy: &mut Enemy, quarry: Quarry, maze: &Maze, pathfinder: &mut Pathfinder) {
    let cell = enemy.body.cell();
    enemy.target = retarget(
        Pursuer {
            strategy: enemy.strategy,
            cell,
            target: enemy.target,
        },
        quarry,
        maze,
        &mut enemy.rng,
    );

    match pathfinder.first_step(maze, cell, enemy.target) {
        Some(step) => enemy.body.set_preferred(heading_between(cell, step)),
        None => debug!(
            "enemy {} has no route from {cell:?} to {:?}",
            enemy.id.get(),
            enemy.target
        ),
    }
}
