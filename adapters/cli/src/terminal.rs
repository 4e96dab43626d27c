use std::{io::Write, time::Duration};

use anyhow::{Context, Result};
use maze_chase_core::Tile;
use maze_chase_rendering::{
    CreaturePresentation, CreatureShape, FrameInput, Presentation, RenderingBackend, Scene,
};

use crate::input_script::InputScript;

/// Simulated time between two frames, matching a 60 Hz display.
pub(crate) const FRAME_DURATION: Duration = Duration::from_millis(1000 / 60);

/// Headless backend that replays scripted input and prints the final frame as
/// text.
#[derive(Debug)]
pub(crate) struct TerminalBackend<W> {
    frames: u64,
    script: InputScript,
    out: W,
}

impl<W> TerminalBackend<W>
where
    W: Write,
{
    /// Creates a backend that runs `frames` frames, sampling input from `script`.
    pub(crate) fn new(frames: u64, script: InputScript, out: W) -> Self {
        Self {
            frames,
            script,
            out,
        }
    }
}

impl<W> RenderingBackend for TerminalBackend<W>
where
    W: Write,
{
    fn run<F>(mut self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> Result<()>,
    {
        let Presentation {
            window_title,
            mut scene,
        } = presentation;

        for frame in 0..self.frames {
            update_scene(FRAME_DURATION, self.script.input_for(frame), &mut scene)
                .with_context(|| format!("failed to simulate frame {frame}"))?;
        }

        writeln!(self.out, "{window_title}")?;
        write!(self.out, "{}", render_ascii(&scene))?;
        writeln!(self.out, "dots remaining: {}", scene.dots_remaining)?;
        self.out.flush().context("failed to flush terminal output")
    }
}

/// Draws the scene one character per tile, creatures on top of the maze.
pub(crate) fn render_ascii(scene: &Scene) -> String {
    let columns = scene.tile_grid.columns;
    let rows = scene.tile_grid.rows;
    let mut canvas: Vec<Vec<char>> = (0..rows)
        .map(|row| {
            (0..columns)
                .map(|column| match scene.tile(column, row) {
                    Some(Tile::Block) => '#',
                    Some(Tile::Dot) => '.',
                    Some(Tile::Air) | None => ' ',
                })
                .collect()
        })
        .collect();

    for creature in scene.enemies.iter().chain(std::iter::once(&scene.player)) {
        if let Some(slot) = cell_of(creature)
            .and_then(|(column, row)| canvas.get_mut(row).and_then(|line| line.get_mut(column)))
        {
            *slot = glyph(creature);
        }
    }

    let mut text = String::with_capacity(canvas.len() * (columns as usize + 1));
    for line in canvas {
        text.extend(line);
        text.push('\n');
    }
    text
}

fn cell_of(creature: &CreaturePresentation) -> Option<(usize, usize)> {
    let column = creature.center.x.floor();
    let row = creature.center.y.floor();
    if column < 0.0 || row < 0.0 {
        return None;
    }
    Some((column as usize, row as usize))
}

fn glyph(creature: &CreaturePresentation) -> char {
    match creature.shape {
        CreatureShape::Disc => '@',
        CreatureShape::Square => 'E',
    }
}
