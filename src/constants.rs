/// Compile-time defaults for every gameplay number.
///
/// [`crate::config::SimConfig::default`] copies these; a TOML file can
/// override the tunable subset at startup. Distances are playfield pixels,
/// times are milliseconds, speeds are pixels per frame.

// ── Playfield ─────────────────────────────────────────────────────────────────

pub const CANVAS_WIDTH: f32 = 800.0;
pub const CANVAS_HEIGHT: f32 = 600.0;
/// Entities further than this outside the playfield are dropped.
pub const OFFSCREEN_MARGIN: f32 = 20.0;

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_WIDTH: f32 = 50.0;
pub const PLAYER_HEIGHT: f32 = 50.0;
pub const PLAYER_SPEED: f32 = 5.0;
/// Distance from the bottom edge to the player's top edge at spawn.
pub const PLAYER_START_OFFSET: f32 = 70.0;
pub const PLAYER_MAX_LIVES: u8 = 3;
pub const PLAYER_INVULNERABLE_TIME: u64 = 1500;
/// Grace added to invulnerability each time a shield is picked up.
pub const SHIELD_PICKUP_GRACE: u64 = 250;

// ── Player weapons ────────────────────────────────────────────────────────────

pub const BULLET_WIDTH: f32 = 6.0;
pub const BULLET_HEIGHT: f32 = 12.0;
pub const BULLET_SPEED: f32 = 8.0;
pub const SHOT_COOLDOWN: u64 = 200;

pub const LASER_WIDTH: f32 = 4.0;
pub const LASER_HEIGHT: f32 = 30.0;
pub const LASER_SPEED: f32 = 12.0;
pub const LASER_COOLDOWN: u64 = 260;
pub const LASER_PIERCE: u32 = 3;

pub const MISSILE_WIDTH: f32 = 10.0;
pub const MISSILE_HEIGHT: f32 = 18.0;
pub const MISSILE_SPEED: f32 = 6.0;
pub const MISSILE_COOLDOWN: u64 = 400;
pub const MISSILE_STEER_FACTOR: f32 = 0.05;
pub const MISSILE_MAX_STEER: f32 = 0.6;
pub const MISSILE_MAX_VX: f32 = 4.0;
pub const MISSILE_EXPLOSION_RADIUS: f32 = 110.0;
pub const MISSILE_EXPLOSION_DURATION: u64 = 350;

/// Cooldowns are divided by this while rapid fire is active.
pub const RAPID_FIRE_DIVISOR: u64 = 2;

// ── Enemies ───────────────────────────────────────────────────────────────────

pub const ENEMY_WIDTH: f32 = 40.0;
pub const ENEMY_HEIGHT: f32 = 40.0;
pub const ENEMY_SPEED: f32 = 2.5;
pub const ENEMY_SPAWN_INTERVAL: u64 = 1000;
pub const MIN_SPAWN_INTERVAL: u64 = 320;

pub const ZIGZAG_FLIP_TICKS: u32 = 30;

pub const ARC_AMPLITUDE_MIN: f32 = 60.0;
pub const ARC_AMPLITUDE_MAX: f32 = 140.0;
pub const ARC_FREQUENCY_MIN: f32 = 0.002;
pub const ARC_FREQUENCY_MAX: f32 = 0.004;

pub const TRACKER_SPEED_MIN: f32 = 1.5;
pub const TRACKER_SPEED_MAX: f32 = 2.5;
pub const TRACKER_FIRE_INTERVAL: u64 = 1800;

pub const TRACKER_ROLL: f64 = 0.18;
pub const ARC_ROLL: f64 = 0.36;

// ── Enemy bullets ─────────────────────────────────────────────────────────────

pub const ENEMY_BULLET_SIZE: f32 = 10.0;
pub const SPREAD_BULLET_SPEED: f32 = 4.0;
pub const HOMING_BULLET_SPEED: f32 = 3.5;
pub const HOMING_TURN_RATE: f32 = 0.05;

// ── Waves ─────────────────────────────────────────────────────────────────────

pub const ENEMIES_PER_WAVE: u32 = 8;
pub const WAVE_SPAWN_INTERVAL: u64 = 300;
pub const BREAK_BETWEEN_WAVES: u64 = 3000;
pub const BOSS_SPAWN_DELAY: u64 = 1500;
pub const WAVES_PER_STAGE: u32 = 3;
/// Last scripted wave; the boss after it is the final boss and every wave
/// beyond it is endless mode.
pub const FINAL_WAVE: u32 = 9;
pub const ANNOUNCEMENT_TIME: u64 = 2000;

// ── Bosses ────────────────────────────────────────────────────────────────────

pub const BOSS_WIDTH: f32 = 120.0;
pub const BOSS_HEIGHT: f32 = 80.0;
pub const FINAL_BOSS_WIDTH: f32 = 160.0;
pub const FINAL_BOSS_HEIGHT: f32 = 100.0;
pub const BOSS_DESCENT_SPEED: f32 = 1.0;
pub const BOSS_HOLD_Y: f32 = 50.0;
pub const BOSS_HORIZONTAL_SPEED: f32 = 2.0;
pub const BOSS_FLIP_TICKS: u32 = 60;

pub const BOSS_BASE_HEALTH: u32 = 5;
pub const BOSS_HEALTH_PER_TIER: u32 = 2;
pub const BOSS_BASE_SHOOT_INTERVAL: u64 = 1500;
pub const BOSS_SHOOT_INTERVAL_STEP: u64 = 150;
pub const BOSS_MIN_SHOOT_INTERVAL: u64 = 700;

pub const FINAL_BOSS_HEALTH: u32 = 30;
pub const FINAL_BOSS_SHOOT_INTERVAL: u64 = 600;
pub const FINAL_BOSS_HOMING_CHANCE: f64 = 0.4;

pub const ENDLESS_BOSS_BASE_HEALTH: u32 = 12;
pub const ENDLESS_BOSS_HEALTH_PER_TIER: u32 = 3;
pub const ENDLESS_BOSS_BASE_SHOOT_INTERVAL: u64 = 1100;
pub const ENDLESS_BOSS_SHOOT_INTERVAL_STEP: u64 = 60;
pub const ENDLESS_BOSS_MIN_SHOOT_INTERVAL: u64 = 450;

// ── Scoring ───────────────────────────────────────────────────────────────────

pub const NORMAL_KILL_SCORE: u32 = 100;
pub const LASER_KILL_SCORE: u32 = 120;
pub const MISSILE_KILL_SCORE: u32 = 150;
pub const SPLASH_KILL_SCORE: u32 = 100;
pub const RAM_KILL_SCORE: u32 = 100;
pub const BOSS_KILL_SCORE: u32 = 1000;
pub const FINAL_BOSS_KILL_SCORE: u32 = 5000;
pub const BOSS_COMBO_BONUS: u32 = 3;
pub const COMBO_THRESHOLD: u32 = 5;
pub const MAX_MULTIPLIER: u32 = 8;

// ── Damage ────────────────────────────────────────────────────────────────────

pub const BULLET_BOSS_DAMAGE: u32 = 1;
pub const MISSILE_BOSS_DAMAGE: u32 = 2;

// ── Power-ups ─────────────────────────────────────────────────────────────────

pub const POWERUP_SIZE: f32 = 24.0;
pub const POWERUP_FALL_SPEED: f32 = 2.0;
pub const POWERUP_DROP_CHANCE: f64 = 0.28;
pub const RAPID_FIRE_DURATION: u64 = 8000;
pub const SHIELD_DURATION: u64 = 6000;
pub const WEAPON_DURATION: u64 = 10000;

// ── Effects ───────────────────────────────────────────────────────────────────

pub const KILL_EXPLOSION_RADIUS: f32 = 28.0;
pub const KILL_EXPLOSION_DURATION: u64 = 250;
pub const BOSS_EXPLOSION_RADIUS: f32 = 140.0;
pub const BOSS_EXPLOSION_DURATION: u64 = 700;
pub const PARTICLES_PER_BURST: usize = 12;
pub const PARTICLE_LIFETIME: u64 = 600;
pub const PARTICLE_DRAG: f32 = 0.96;

pub const HIT_STOP_BOSS_HIT: u64 = 30;
pub const HIT_STOP_PLAYER_HIT: u64 = 90;
pub const HIT_STOP_BOSS_DEFEAT: u64 = 150;
