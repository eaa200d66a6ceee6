/// All game entity types: pure data, no game rules.
///
/// Entity polymorphism is by `kind` enums carrying per-kind state, matched
/// exhaustively by the movement and collision passes. Times are simulation
/// milliseconds from [`SimulationState::now`].

use crate::constants::{PLAYER_HEIGHT, PLAYER_MAX_LIVES, PLAYER_START_OFFSET, PLAYER_WIDTH};

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle; `x`/`y` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Strict overlap test: rectangles that only share an edge do not
    /// intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Anything with a collision rectangle.
pub trait Bounded {
    fn bounds(&self) -> Rect;

    fn center(&self) -> (f32, f32) {
        self.bounds().center()
    }
}

// ── Timed effects ─────────────────────────────────────────────────────────────

/// A window that is active while `now < active_until`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimedEffect {
    pub active_until: u64,
}

impl TimedEffect {
    pub fn is_active(&self, now: u64) -> bool {
        now < self.active_until
    }

    /// Stack `duration` on top of whatever is left of the window.
    pub fn extend(&mut self, now: u64, duration: u64) {
        self.active_until = self.active_until.max(now) + duration;
    }

    /// Start a fresh window, discarding any remaining time.
    pub fn restart(&mut self, now: u64, duration: u64) {
        self.active_until = now + duration;
    }

    pub fn remaining(&self, now: u64) -> u64 {
        self.active_until.saturating_sub(now)
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Weapon {
    #[default]
    Default,
    Laser,
    Missile,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    /// Always within `0..=PLAYER_MAX_LIVES`.
    pub lives: u8,
    pub invulnerable: TimedEffect,
    pub shield: TimedEffect,
    pub rapid_fire: TimedEffect,
    pub weapon: Weapon,
    pub weapon_effect: TimedEffect,
    pub last_shot_at: Option<u64>,
}

impl Player {
    /// A fresh ship centred at the bottom of a `width`×`height` playfield.
    pub fn spawn(width: f32, height: f32, speed: f32) -> Self {
        Player {
            x: width / 2.0 - PLAYER_WIDTH / 2.0,
            y: height - PLAYER_START_OFFSET,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            speed,
            lives: PLAYER_MAX_LIVES,
            invulnerable: TimedEffect::default(),
            shield: TimedEffect::default(),
            rapid_fire: TimedEffect::default(),
            weapon: Weapon::Default,
            weapon_effect: TimedEffect::default(),
            last_shot_at: None,
        }
    }
}

impl Bounded for Player {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Held keys for one frame, as reported by the input collaborator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerIntent {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum BulletKind {
    Normal,
    /// Survives `pierce_remaining` hits.
    Laser { pierce_remaining: u32 },
    /// Steers horizontally toward the nearest enemy.
    Missile { vx: f32 },
}

/// A player-fired projectile travelling upward at `speed`.
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub kind: BulletKind,
}

impl Bounded for Bullet {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum EnemyBulletKind {
    Spread,
    Homing { turn_rate: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnemyBullet {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub vx: f32,
    pub vy: f32,
    pub speed: f32,
    pub kind: EnemyBulletKind,
}

impl Bounded for EnemyBullet {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct BossState {
    /// Reaching exactly 0 defeats the boss.
    pub health: u32,
    pub max_health: u32,
    pub shoot_interval: u64,
    pub last_shot_at: u64,
    /// +1.0 moving right, -1.0 moving left.
    pub direction: f32,
    pub move_timer: u32,
    pub is_final: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EnemyKind {
    Normal,
    Zigzag {
        direction: f32,
        timer: u32,
        horizontal_speed: f32,
    },
    Arc {
        amplitude: f32,
        /// Radians per millisecond.
        frequency: f32,
        base_x: f32,
        spawned_at: u64,
    },
    Tracker {
        tracking_speed: f32,
        fire_interval: u64,
        last_fire_at: u64,
    },
    Boss(BossState),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub kind: EnemyKind,
}

impl Enemy {
    pub fn is_boss(&self) -> bool {
        matches!(self.kind, EnemyKind::Boss(_))
    }
}

impl Bounded for Enemy {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Power-ups ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Halves weapon cooldowns for a while.
    RapidFire,
    /// Destroys anything that touches the ship for a while.
    Shield,
    /// One extra life, up to the maximum.
    Life,
    /// Piercing beam weapon.
    Laser,
    /// Homing missiles with splash damage.
    Missile,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PowerUp {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub fall_speed: f32,
    /// Cosmetic.
    pub rotation: f32,
    pub rotation_speed: f32,
    pub kind: PowerUpKind,
}

impl Bounded for PowerUp {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }
}

// ── Effects ───────────────────────────────────────────────────────────────────

/// An expanding blast. Missile explosions also define the splash area.
#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub started_at: u64,
    pub duration: u64,
}

impl Explosion {
    /// Fraction of the lifetime elapsed, in `[0, 1]`.
    pub fn progress(&self, now: u64) -> f32 {
        if self.duration == 0 {
            return 1.0;
        }
        (now.saturating_sub(self.started_at) as f32 / self.duration as f32).min(1.0)
    }

    pub fn is_finished(&self, now: u64) -> bool {
        now.saturating_sub(self.started_at) >= self.duration
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub born_at: u64,
    pub lifetime: u64,
}

// ── Run state ─────────────────────────────────────────────────────────────────

/// Where the wave director is. Boss phase and normal spawning cannot both
/// be in effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WavePhase {
    /// Run just started; wave 1 begins on the next director pass.
    Idle,
    /// Spawning (or waiting for the spawned enemies to be cleared).
    Active,
    /// Between waves; the next wave starts once the break has elapsed.
    Break { since: u64 },
    /// A boss has been scheduled and appears at `spawn_at`.
    BossIncoming { spawn_at: u64 },
    /// A boss is on the field.
    Boss,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WaveState {
    pub current_wave: u32,
    pub enemies_spawned: u32,
    pub enemies_destroyed: u32,
    pub phase: WavePhase,
    pub last_spawn_at: Option<u64>,
}

impl WaveState {
    pub fn new() -> Self {
        WaveState {
            current_wave: 1,
            enemies_spawned: 0,
            enemies_destroyed: 0,
            phase: WavePhase::Idle,
            last_spawn_at: None,
        }
    }

    pub fn is_wave_active(&self) -> bool {
        self.phase == WavePhase::Active
    }

    pub fn is_boss_phase(&self) -> bool {
        self.phase == WavePhase::Boss
    }

    /// Three waves per stage, counted from 0.
    pub fn stage_index(&self) -> u32 {
        (self.current_wave.max(1) - 1) / crate::constants::WAVES_PER_STAGE
    }
}

impl Default for WaveState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreState {
    pub score: u64,
    pub combo_count: u32,
    /// Always within `1..=max_multiplier`.
    pub multiplier: u32,
}

impl Default for ScoreState {
    fn default() -> Self {
        ScoreState {
            score: 0,
            combo_count: 0,
            multiplier: 1,
        }
    }
}

/// A banner shown by the HUD until `until`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Announcement {
    pub text: String,
    pub until: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Title,
    Playing,
    Paused,
    GameOver,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire simulation state. Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct SimulationState {
    pub status: GameStatus,
    /// Simulation clock in milliseconds; only advances while a run is live.
    pub now: u64,
    pub run_started_at: u64,
    pub frame: u64,
    pub player: Player,
    pub intent: PlayerIntent,
    pub bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<EnemyBullet>,
    pub enemies: Vec<Enemy>,
    pub power_ups: Vec<PowerUp>,
    pub explosions: Vec<Explosion>,
    pub particles: Vec<Particle>,
    pub wave: WaveState,
    pub scoring: ScoreState,
    /// Best score seen before and during this run.
    pub high_score: u64,
    /// Best score when this run started.
    pub previous_high_score: u64,
    /// While `now` is below this, gameplay passes are skipped.
    pub hit_stop_until: u64,
    pub announcement: Option<Announcement>,
    pub width: f32,
    pub height: f32,
}

impl SimulationState {
    /// Elapsed run time in seconds, the input to the difficulty curve.
    pub fn elapsed_seconds(&self) -> f32 {
        self.now.saturating_sub(self.run_started_at) as f32 / 1000.0
    }

    /// Only a strictly higher score counts; tying the old best does not.
    pub fn is_new_high_score(&self) -> bool {
        self.scoring.score > self.previous_high_score
    }

    pub fn boss(&self) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.is_boss())
    }

    pub fn non_boss_enemy_count(&self) -> usize {
        self.enemies.iter().filter(|e| !e.is_boss()).count()
    }
}
