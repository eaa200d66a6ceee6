/// Runtime-tunable gameplay configuration.
///
/// [`SimConfig`] mirrors the tunable subset of [`crate::constants`]. At
/// startup the binary calls [`SimConfig::load`] on an optional TOML file;
/// missing keys fall back to the compiled defaults, so a file can override
/// just the values being tuned:
///
/// ```toml
/// enemies_per_wave = 10
/// powerup_drop_chance = 0.5
/// spawn_mode = "classic"
/// ```

use std::path::Path;

use serde::Deserialize;

use crate::constants::*;
use crate::error::ConfigError;

/// How enemies enter the playfield.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnMode {
    /// Batches of enemies, breaks between waves and a boss every stage.
    Waves,
    /// A continuous stream paced by the difficulty curve, no bosses.
    Classic,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // ── Playfield ─────────────────────────────────────────────────────────────
    pub width: f32,
    pub height: f32,

    // ── Player ────────────────────────────────────────────────────────────────
    pub player_speed: f32,
    pub invulnerable_time: u64,
    pub shot_cooldown: u64,
    pub laser_cooldown: u64,
    pub missile_cooldown: u64,

    // ── Enemies & waves ───────────────────────────────────────────────────────
    pub spawn_mode: SpawnMode,
    pub enemy_speed: f32,
    pub enemy_spawn_interval: u64,
    pub min_spawn_interval: u64,
    pub enemies_per_wave: u32,
    pub wave_spawn_interval: u64,
    pub break_between_waves: u64,
    pub boss_spawn_delay: u64,

    // ── Scoring ───────────────────────────────────────────────────────────────
    pub combo_threshold: u32,
    pub max_multiplier: u32,

    // ── Power-ups ─────────────────────────────────────────────────────────────
    pub powerup_drop_chance: f64,
    pub rapid_fire_duration: u64,
    pub shield_duration: u64,
    pub weapon_duration: u64,

    // ── Weapons & feel ────────────────────────────────────────────────────────
    pub missile_explosion_radius: f32,
    pub hit_stop: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            player_speed: PLAYER_SPEED,
            invulnerable_time: PLAYER_INVULNERABLE_TIME,
            shot_cooldown: SHOT_COOLDOWN,
            laser_cooldown: LASER_COOLDOWN,
            missile_cooldown: MISSILE_COOLDOWN,
            spawn_mode: SpawnMode::Waves,
            enemy_speed: ENEMY_SPEED,
            enemy_spawn_interval: ENEMY_SPAWN_INTERVAL,
            min_spawn_interval: MIN_SPAWN_INTERVAL,
            enemies_per_wave: ENEMIES_PER_WAVE,
            wave_spawn_interval: WAVE_SPAWN_INTERVAL,
            break_between_waves: BREAK_BETWEEN_WAVES,
            boss_spawn_delay: BOSS_SPAWN_DELAY,
            combo_threshold: COMBO_THRESHOLD,
            max_multiplier: MAX_MULTIPLIER,
            powerup_drop_chance: POWERUP_DROP_CHANCE,
            rapid_fire_duration: RAPID_FIRE_DURATION,
            shield_duration: SHIELD_DURATION,
            weapon_duration: WEAPON_DURATION,
            missile_explosion_radius: MISSILE_EXPLOSION_RADIUS,
            hit_stop: true,
        }
    }
}

impl SimConfig {
    /// Parse a TOML document, then validate it.
    pub fn from_toml_str(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate the config file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents, path)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("width", self.width)?;
        positive("height", self.height)?;
        positive("player_speed", self.player_speed)?;
        positive("enemy_speed", self.enemy_speed)?;
        positive("missile_explosion_radius", self.missile_explosion_radius)?;
        nonzero("enemy_spawn_interval", self.enemy_spawn_interval)?;
        nonzero("min_spawn_interval", self.min_spawn_interval)?;
        nonzero("wave_spawn_interval", self.wave_spawn_interval)?;
        nonzero("enemies_per_wave", self.enemies_per_wave.into())?;
        nonzero("combo_threshold", self.combo_threshold.into())?;
        nonzero("max_multiplier", self.max_multiplier.into())?;
        if !(0.0..=1.0).contains(&self.powerup_drop_chance) {
            return Err(ConfigError::Invalid {
                field: "powerup_drop_chance",
                value: self.powerup_drop_chance.to_string(),
                expected: "a probability in [0, 1]",
            });
        }
        if self.width <= PLAYER_WIDTH || self.height <= PLAYER_HEIGHT + PLAYER_START_OFFSET {
            return Err(ConfigError::Invalid {
                field: "width/height",
                value: format!("{}x{}", self.width, self.height),
                expected: "a playfield larger than the player ship",
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            value: value.to_string(),
            expected: "a finite number > 0",
        })
    }
}

fn nonzero(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if value > 0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            value: value.to_string(),
            expected: "a value > 0",
        })
    }
}
