#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs Maze Chase headlessly.

mod input_script;
mod roster_file;
mod terminal;

use std::{fs, io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use maze_chase_core::{Command, Event};
use maze_chase_rendering::{Presentation, RenderingBackend, Scene, ScenePalette};
use maze_chase_world::{self as world, query, Layout, World, WorldConfig};

use crate::{input_script::InputScript, roster_file::RosterFile, terminal::TerminalBackend};

const DEFAULT_FRAMES: u64 = 600;
const TILE_LENGTH: f32 = 50.0;

/// Runs the simulation for a fixed number of frames and prints the final board.
#[derive(Debug, Parser)]
#[command(name = "maze-chase", version, about)]
struct Args {
    /// Number of frames to simulate. Defaults to the script length, or 600.
    #[arg(long)]
    frames: Option<u64>,
    /// Seed for the enemies' random generators, overriding the roster file.
    #[arg(long)]
    seed: Option<u64>,
    /// Text maze template using `#`, `.` and `_`.
    #[arg(long)]
    layout: Option<PathBuf>,
    /// TOML file describing the creature roster.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Scripted input such as `D*120,W*30,_*10,R`.
    #[arg(long, default_value = "")]
    input: String,
}

#[derive(Debug, Default)]
struct Tally {
    dots: u64,
    wins: u64,
    losses: u64,
}

impl Tally {
    fn record(&mut self, event: &Event) {
        match event {
            Event::DotEaten { cell, remaining } => {
                self.dots += 1;
                debug!("dot eaten at {cell:?}, {remaining} left");
            }
            Event::Won => self.wins += 1,
            Event::Lost { .. } => self.losses += 1,
            Event::FrameAdvanced { .. } | Event::WorldReset => {}
        }
    }
}

/// Entry point for the Maze Chase command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let script = InputScript::parse(&args.input).context("invalid input script")?;
    let frames = args.frames.unwrap_or(match script.frame_count() {
        0 => DEFAULT_FRAMES,
        length => length,
    });

    let mut world = build_world(&args)?;
    info!("{}", query::welcome_banner(&world));

    let scene = capture(&world)?;
    let presentation = Presentation::new(query::welcome_banner(&world), scene);

    let mut tally = Tally::default();
    let mut events = Vec::new();
    let backend = TerminalBackend::new(frames, script, io::stdout().lock());
    backend.run(presentation, |_dt, input, scene| {
        events.clear();
        if input.reset {
            world::apply(&mut world, Command::Reset, &mut events);
        }
        if let Some(heading) = input.heading {
            world::apply(&mut world, Command::Steer { heading }, &mut events);
        }
        world::apply(&mut world, Command::Tick, &mut events);
        for event in &events {
            tally.record(event);
        }
        *scene = capture(&world)?;
        Ok(())
    })?;

    println!(
        "frames: {frames}, dots eaten: {}, wins: {}, losses: {}",
        tally.dots, tally.wins, tally.losses
    );
    Ok(())
}

fn build_world(args: &Args) -> Result<World> {
    let layout = match &args.layout {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read layout at {}", path.display()))?;
            Layout::parse(&text)
                .with_context(|| format!("failed to parse layout at {}", path.display()))?
        }
        None => Layout::classic(),
    };

    let mut config = match &args.config {
        Some(path) => RosterFile::load(path)?.into_config(),
        None => WorldConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    World::with_layout(layout, config).context("roster does not fit the layout")
}

fn capture(world: &World) -> Result<Scene> {
    Scene::capture(
        TILE_LENGTH,
        ScenePalette::default(),
        query::tile_view(world),
        &query::player(world),
        &query::enemy_view(world),
    )
    .context("failed to capture scene")
}
