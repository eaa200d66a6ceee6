/// Top-level game state machine and the per-frame pipeline.
///
/// The public functions take an immutable reference to the current
/// [`SimulationState`] (plus, where needed, an RNG handle) and return a
/// brand-new state together with the events the step produced. Side
/// effects are limited to the injected RNG. [`Simulation`] wraps this for
/// callers that prefer to own one mutable instance.

use rand::Rng;
use tracing::info;

use crate::collision;
use crate::config::SimConfig;
use crate::entities::{
    GameStatus, Player, PlayerIntent, ScoreState, SimulationState, WaveState,
};
use crate::events::GameEvent;
use crate::movement;
use crate::player;
use crate::spawner;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Title-screen state for a playfield described by `cfg`.
pub fn init_state(cfg: &SimConfig, high_score: u64) -> SimulationState {
    SimulationState {
        status: GameStatus::Title,
        now: 0,
        run_started_at: 0,
        frame: 0,
        player: Player::spawn(cfg.width, cfg.height, cfg.player_speed),
        intent: PlayerIntent::default(),
        bullets: Vec::new(),
        enemy_bullets: Vec::new(),
        enemies: Vec::new(),
        power_ups: Vec::new(),
        explosions: Vec::new(),
        particles: Vec::new(),
        wave: WaveState::new(),
        scoring: ScoreState::default(),
        high_score,
        previous_high_score: high_score,
        hit_stop_until: 0,
        announcement: None,
        width: cfg.width,
        height: cfg.height,
    }
}

// ── State-machine transitions (pure) ─────────────────────────────────────────

/// Title → Playing with a fresh run. No effect in any other status.
pub fn start_run(state: &SimulationState, cfg: &SimConfig) -> (SimulationState, Vec<GameEvent>) {
    if state.status != GameStatus::Title {
        return (state.clone(), Vec::new());
    }
    let mut next = init_state(cfg, state.high_score);
    next.status = GameStatus::Playing;
    info!(high_score = next.high_score, "run started");
    (next, vec![GameEvent::RunStarted])
}

/// Playing ⇄ Paused.
pub fn toggle_pause(state: &SimulationState) -> (SimulationState, Vec<GameEvent>) {
    let mut next = state.clone();
    let event = match state.status {
        GameStatus::Playing => {
            next.status = GameStatus::Paused;
            GameEvent::Paused
        }
        GameStatus::Paused => {
            next.status = GameStatus::Playing;
            GameEvent::Resumed
        }
        GameStatus::Title | GameStatus::GameOver => return (next, Vec::new()),
    };
    (next, vec![event])
}

/// GameOver → Title, keeping the best score.
pub fn restart(state: &SimulationState, cfg: &SimConfig) -> SimulationState {
    if state.status != GameStatus::GameOver {
        return state.clone();
    }
    init_state(cfg, state.high_score)
}

/// Record the held keys for the next tick.
pub fn apply_player_intent(state: &SimulationState, intent: PlayerIntent) -> SimulationState {
    SimulationState {
        intent,
        ..state.clone()
    }
}

// ── Per-frame tick (nearly pure: the RNG is injected) ───────────────────────

/// Advance the simulation by one frame of `dt_ms` milliseconds.
pub fn tick(
    state: &SimulationState,
    cfg: &SimConfig,
    dt_ms: u64,
    rng: &mut impl Rng,
) -> (SimulationState, Vec<GameEvent>) {
    let mut next = state.clone();
    let mut events = Vec::new();

    match next.status {
        GameStatus::Title | GameStatus::Paused => {}
        GameStatus::GameOver => {
            next.now += dt_ms;
            movement::update_effects(&mut next);
        }
        GameStatus::Playing => step_playing(&mut next, cfg, dt_ms, rng, &mut events),
    }

    (next, events)
}

fn step_playing(
    state: &mut SimulationState,
    cfg: &SimConfig,
    dt_ms: u64,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) {
    state.now += dt_ms;
    state.frame += 1;
    let now = state.now;

    if state.announcement.as_ref().is_some_and(|a| a.until <= now) {
        state.announcement = None;
    }
    if now < state.hit_stop_until {
        return;
    }

    // ── 1. Player ────────────────────────────────────────────────────────────
    let intent = state.intent;
    player::apply_intent(&mut state.player, &intent, state.width, state.height);
    if intent.fire {
        let shots = player::try_shoot(&mut state.player, cfg, now, events);
        state.bullets.extend(shots);
    }

    // ── 2. Projectiles ───────────────────────────────────────────────────────
    movement::update_bullets(state);
    movement::update_enemy_bullets(state);

    // ── 3. Spawning & enemies ────────────────────────────────────────────────
    spawner::update(state, cfg, rng, events);
    movement::update_enemies(state, rng);

    // ── 4. Pickups & effects ─────────────────────────────────────────────────
    movement::update_power_ups(state, cfg, events);
    movement::update_effects(state);

    // ── 5. Collisions ────────────────────────────────────────────────────────
    let outcome = collision::resolve_collisions(state, cfg, rng, events);
    if outcome.player_dead {
        end_run(state, events);
    }
}

fn end_run(state: &mut SimulationState, events: &mut Vec<GameEvent>) {
    state.status = GameStatus::GameOver;
    let score = state.scoring.score;
    let new_high_score = state.is_new_high_score();
    state.high_score = state.high_score.max(score);
    info!(
        score,
        wave = state.wave.current_wave,
        new_high_score,
        "run ended"
    );
    events.push(GameEvent::RunEnded {
        score,
        new_high_score,
    });
}

// ── Owning wrapper ───────────────────────────────────────────────────────────

/// One game instance: its configuration and current state.
#[derive(Clone, Debug)]
pub struct Simulation {
    config: SimConfig,
    state: SimulationState,
}

impl Simulation {
    pub fn new(config: SimConfig, high_score: u64) -> Self {
        let state = init_state(&config, high_score);
        Simulation { config, state }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn start(&mut self) -> Vec<GameEvent> {
        let (state, events) = start_run(&self.state, &self.config);
        self.state = state;
        events
    }

    pub fn apply_player_intent(&mut self, intent: PlayerIntent) {
        self.state.intent = intent;
    }

    pub fn on_pause_toggle(&mut self) -> Vec<GameEvent> {
        let (state, events) = toggle_pause(&self.state);
        self.state = state;
        events
    }

    pub fn on_restart(&mut self) {
        self.state = restart(&self.state, &self.config);
    }

    pub fn step(&mut self, dt_ms: u64, rng: &mut impl Rng) -> Vec<GameEvent> {
        let (state, events) = tick(&self.state, &self.config, dt_ms, rng);
        self.state = state;
        events
    }
}
