/// Difficulty curve: pure functions of elapsed time, score and wave.
///
/// Nothing here touches state, so callers can feed synthetic inputs.

use crate::config::SimConfig;
use crate::constants::FINAL_WAVE;

/// Overall pressure level. Grows with time, with score (capped), and by a
/// further 0.3 per wave once past the final scripted wave.
pub fn difficulty_level(elapsed_seconds: f32, score: u64, current_wave: u32) -> f32 {
    let score_term = (score as f32 / 2500.0).min(1.5) * 0.8;
    let mut level = 1.0 + elapsed_seconds / 45.0 + score_term;
    if current_wave > FINAL_WAVE {
        level += (current_wave - FINAL_WAVE) as f32 * 0.3;
    }
    level
}

/// Milliseconds between spawns in classic mode.
pub fn spawn_interval(cfg: &SimConfig, level: f32, score: u64) -> u64 {
    let base = cfg.enemy_spawn_interval as f32 / (1.0 + level * 0.3) - score as f32 * 0.02;
    base.max(cfg.min_spawn_interval as f32).round() as u64
}

/// Descent speed before the per-enemy random factor.
pub fn enemy_speed(cfg: &SimConfig, level: f32) -> f32 {
    cfg.enemy_speed + (level * 0.8).min(4.0)
}

pub fn zigzag_chance(level: f32) -> f64 {
    (0.3 + level as f64 * 0.08).min(0.55)
}

pub fn zigzag_horizontal_speed(level: f32) -> f32 {
    2.0 + (level * 0.4).min(3.0)
}
