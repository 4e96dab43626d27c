use std::{fs, path::Path};

use anyhow::{Context, Result};
use maze_chase_core::{CreatureColor, Position, StrategyKind};
use maze_chase_world::{EnemyConfig, WorldConfig};
use serde::Deserialize;

const ENEMY_RADIUS: f64 = 0.375;

/// Creature roster read from a TOML file.
///
/// Every field is optional; missing values fall back to the classic roster.
/// Listing any `[[enemies]]` replaces the classic enemies entirely.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RosterFile {
    seed: Option<u64>,
    #[serde(default)]
    player: PlayerEntry,
    #[serde(default)]
    enemies: Vec<EnemyEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlayerEntry {
    spawn: Option<[f64; 2]>,
    radius: Option<f64>,
    speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EnemyEntry {
    spawn: [f64; 2],
    speed: f64,
    strategy: StrategyKind,
    radius: Option<f64>,
    color: Option<[u8; 3]>,
}

impl RosterFile {
    /// Reads and parses the roster stored at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read roster file at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to parse roster file at {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("invalid roster toml contents")
    }

    /// Applies the file on top of the classic roster.
    pub(crate) fn into_config(self) -> WorldConfig {
        let mut config = WorldConfig::default();
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some([x, y]) = self.player.spawn {
            config.player.spawn = Position::new(x, y);
        }
        if let Some(radius) = self.player.radius {
            config.player.radius = radius;
        }
        if let Some(speed) = self.player.speed {
            config.player.speed = speed;
        }
        if !self.enemies.is_empty() {
            config.enemies = self.enemies.into_iter().map(EnemyEntry::into_config).collect();
        }
        config
    }
}

impl EnemyEntry {
    fn into_config(self) -> EnemyConfig {
        let [x, y] = self.spawn;
        let color = self.color.map_or_else(
            || default_color(self.strategy),
            |[red, green, blue]| CreatureColor::from_rgb(red, green, blue),
        );
        EnemyConfig {
            spawn: Position::new(x, y),
            radius: self.radius.unwrap_or(ENEMY_RADIUS),
            speed: self.speed,
            color,
            strategy: self.strategy,
        }
    }
}

fn default_color(strategy: StrategyKind) -> CreatureColor {
    match strategy {
        StrategyKind::Chasing => CreatureColor::RED,
        StrategyKind::Cutting => CreatureColor::GREEN,
        StrategyKind::Random => CreatureColor::MAGENTA,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_keeps_classic_roster() {
        let roster = RosterFile::parse("").expect("empty roster parses");

        assert_eq!(roster.into_config(), WorldConfig::default());
    }

    #[test]
    fn overrides_replace_selected_fields() {
        let roster = RosterFile::parse(
            r#"
            seed = 99

            [player]
            speed = 0.1

            [[enemies]]
            spawn = [1.5, 1.5]
            speed = 0.05
            strategy = "cutting"

            [[enemies]]
            spawn = [2.5, 1.5]
            speed = 0.04
            strategy = "random"
            color = [10, 20, 30]
            "#,
        )
        .expect("roster parses");

        let config = roster.into_config();

        assert_eq!(config.seed, 99);
        assert_eq!(config.player.speed, 0.1);
        assert_eq!(config.player.spawn, WorldConfig::default().player.spawn);
        assert_eq!(config.enemies.len(), 2);
        assert_eq!(config.enemies[0].color, CreatureColor::GREEN);
        assert_eq!(config.enemies[0].radius, ENEMY_RADIUS);
        assert_eq!(config.enemies[1].strategy, StrategyKind::Random);
        assert_eq!(config.enemies[1].color, CreatureColor::from_rgb(10, 20, 30));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(RosterFile::parse("lives = 3").is_err());
    }
}
