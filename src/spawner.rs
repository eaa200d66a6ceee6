/// Wave director and enemy/boss factories.
///
/// In wave mode the director cycles `Idle → Active → Break → Active …`,
/// detouring through `BossIncoming → Boss` after every third wave. Normal
/// spawning only ever happens in `Active`, so a boss fight never overlaps
/// regular enemies being added.

use rand::Rng;
use tracing::{debug, info};

use crate::config::{SimConfig, SpawnMode};
use crate::constants::*;
use crate::difficulty;
use crate::entities::{Announcement, BossState, Enemy, EnemyKind, SimulationState, WavePhase};
use crate::events::{EnemyClass, GameEvent, MusicCue};

/// Run the director for one frame.
pub fn update(
    state: &mut SimulationState,
    cfg: &SimConfig,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) {
    match cfg.spawn_mode {
        SpawnMode::Waves => update_waves(state, cfg, rng, events),
        SpawnMode::Classic => update_classic(state, cfg, rng),
    }
}

fn update_waves(
    state: &mut SimulationState,
    cfg: &SimConfig,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) {
    let now = state.now;
    match state.wave.phase.clone() {
        WavePhase::Idle => start_wave(state, events),
        WavePhase::Break { since } => {
            if now.saturating_sub(since) >= cfg.break_between_waves {
                start_wave(state, events);
            }
        }
        WavePhase::BossIncoming { spawn_at } => {
            if now >= spawn_at {
                spawn_boss(state, events);
            }
        }
        WavePhase::Boss => {}
        WavePhase::Active => {
            let wave = &state.wave;
            let due = wave
                .last_spawn_at
                .map_or(true, |last| now.saturating_sub(last) >= cfg.wave_spawn_interval);
            if wave.enemies_spawned < cfg.enemies_per_wave && due {
                let class = choose_archetype(state, rng);
                let enemy = make_enemy(state, cfg, class, rng);
                state.enemies.push(enemy);
                state.wave.enemies_spawned += 1;
                state.wave.last_spawn_at = Some(now);
            }
            if is_wave_complete(state, cfg) {
                complete_wave(state, cfg, events);
            }
        }
    }
}

/// Earlier revisions: a steady stream paced by the difficulty curve.
fn update_classic(state: &mut SimulationState, cfg: &SimConfig, rng: &mut impl Rng) {
    let now = state.now;
    state.wave.phase = WavePhase::Active;
    let level = current_level(state);
    let interval = difficulty::spawn_interval(cfg, level, state.scoring.score);
    let due = state
        .wave
        .last_spawn_at
        .map_or(true, |last| now.saturating_sub(last) >= interval);
    if due {
        let class = if rng.gen::<f64>() < difficulty::zigzag_chance(level) {
            EnemyClass::Zigzag
        } else {
            EnemyClass::Normal
        };
        let enemy = make_enemy(state, cfg, class, rng);
        state.enemies.push(enemy);
        state.wave.enemies_spawned += 1;
        state.wave.last_spawn_at = Some(now);
    }
}

pub fn current_level(state: &SimulationState) -> f32 {
    difficulty::difficulty_level(
        state.elapsed_seconds(),
        state.scoring.score,
        state.wave.current_wave,
    )
}

/// All of this wave's enemies have spawned and none of them are left.
pub fn is_wave_complete(state: &SimulationState, cfg: &SimConfig) -> bool {
    state.wave.enemies_spawned >= cfg.enemies_per_wave && state.non_boss_enemy_count() == 0
}

/// Whether arriving at `wave` should bring a boss first.
pub fn boss_due(wave: u32) -> bool {
    wave > 1 && (wave - 1) % WAVES_PER_STAGE == 0
}

fn announce(state: &mut SimulationState, text: String) {
    state.announcement = Some(Announcement {
        text,
        until: state.now + ANNOUNCEMENT_TIME,
    });
}

pub fn start_wave(state: &mut SimulationState, events: &mut Vec<GameEvent>) {
    let wave = &mut state.wave;
    wave.phase = WavePhase::Active;
    wave.enemies_spawned = 0;
    wave.enemies_destroyed = 0;
    wave.last_spawn_at = None;
    let number = wave.current_wave;
    let stage = wave.stage_index();

    debug!(wave = number, stage, "wave started");
    events.push(GameEvent::WaveStarted { wave: number });
    // After a boss the stage theme was already cued by `end_boss_phase`.
    if (number - 1) % WAVES_PER_STAGE == 0 && !boss_due(number) {
        events.push(GameEvent::Music(MusicCue::Stage(stage)));
    }
    let label = if number > FINAL_WAVE {
        format!("WAVE {number} - ENDLESS")
    } else {
        format!("WAVE {number}")
    };
    announce(state, label);
}

fn complete_wave(state: &mut SimulationState, cfg: &SimConfig, events: &mut Vec<GameEvent>) {
    let cleared = state.wave.current_wave;
    state.wave.current_wave += 1;
    let next = state.wave.current_wave;
    events.push(GameEvent::WaveCleared { wave: cleared });
    debug!(wave = cleared, "wave cleared");

    if cfg.spawn_mode == SpawnMode::Waves && boss_due(next) {
        state.wave.phase = WavePhase::BossIncoming {
            spawn_at: state.now + cfg.boss_spawn_delay,
        };
        events.push(GameEvent::BossIncoming { wave: next });
        announce(state, "WARNING: BOSS APPROACHING".to_string());
    } else {
        state.wave.phase = WavePhase::Break { since: state.now };
    }
}

/// Pick a regular archetype. Later stages unlock arcs, then trackers.
pub fn choose_archetype(state: &SimulationState, rng: &mut impl Rng) -> EnemyClass {
    let stage = state.wave.stage_index();
    let roll = rng.gen::<f64>();
    if stage >= 2 && roll < TRACKER_ROLL {
        return EnemyClass::Tracker;
    }
    if stage >= 1 && roll < ARC_ROLL {
        return EnemyClass::Arc;
    }
    if rng.gen::<f64>() < difficulty::zigzag_chance(current_level(state)) {
        EnemyClass::Zigzag
    } else {
        EnemyClass::Normal
    }
}

/// Build a regular enemy just above the top edge at a random column.
pub fn make_enemy(
    state: &SimulationState,
    cfg: &SimConfig,
    class: EnemyClass,
    rng: &mut impl Rng,
) -> Enemy {
    let level = current_level(state);
    let now = state.now;
    let max_x = (state.width - ENEMY_WIDTH).max(0.0);
    let x = if max_x > 0.0 { rng.gen_range(0.0..max_x) } else { 0.0 };
    let speed = difficulty::enemy_speed(cfg, level) * rng.gen_range(0.9..=1.1);

    let kind = match class {
        EnemyClass::Normal | EnemyClass::Boss => EnemyKind::Normal,
        EnemyClass::Zigzag => EnemyKind::Zigzag {
            direction: if rng.gen_bool(0.5) { 1.0 } else { -1.0 },
            timer: 0,
            horizontal_speed: difficulty::zigzag_horizontal_speed(level),
        },
        EnemyClass::Arc => EnemyKind::Arc {
            amplitude: rng.gen_range(ARC_AMPLITUDE_MIN..ARC_AMPLITUDE_MAX),
            frequency: rng.gen_range(ARC_FREQUENCY_MIN..ARC_FREQUENCY_MAX),
            base_x: x,
            spawned_at: now,
        },
        EnemyClass::Tracker => EnemyKind::Tracker {
            tracking_speed: rng.gen_range(TRACKER_SPEED_MIN..TRACKER_SPEED_MAX),
            fire_interval: TRACKER_FIRE_INTERVAL,
            last_fire_at: now,
        },
    };

    Enemy {
        x,
        y: -ENEMY_HEIGHT,
        width: ENEMY_WIDTH,
        height: ENEMY_HEIGHT,
        speed,
        kind,
    }
}

/// Health, shot interval and final-boss flag for the boss met on `wave`.
pub fn boss_stats(wave: u32) -> (u32, u64, bool) {
    let tier = (wave.max(1) - 1) / WAVES_PER_STAGE;
    if wave == FINAL_WAVE + 1 {
        (FINAL_BOSS_HEALTH, FINAL_BOSS_SHOOT_INTERVAL, true)
    } else if wave > FINAL_WAVE + 1 {
        let health = ENDLESS_BOSS_BASE_HEALTH + tier * ENDLESS_BOSS_HEALTH_PER_TIER;
        let interval = ENDLESS_BOSS_BASE_SHOOT_INTERVAL
            .saturating_sub(tier as u64 * ENDLESS_BOSS_SHOOT_INTERVAL_STEP)
            .max(ENDLESS_BOSS_MIN_SHOOT_INTERVAL);
        (health, interval, false)
    } else {
        let health = BOSS_BASE_HEALTH + tier * BOSS_HEALTH_PER_TIER;
        let interval = BOSS_BASE_SHOOT_INTERVAL
            .saturating_sub(tier as u64 * BOSS_SHOOT_INTERVAL_STEP)
            .max(BOSS_MIN_SHOOT_INTERVAL);
        (health, interval, false)
    }
}

pub fn make_boss(wave: u32, width: f32, now: u64) -> Enemy {
    let (health, shoot_interval, is_final) = boss_stats(wave);
    let (w, h) = if is_final {
        (FINAL_BOSS_WIDTH, FINAL_BOSS_HEIGHT)
    } else {
        (BOSS_WIDTH, BOSS_HEIGHT)
    };
    Enemy {
        x: width / 2.0 - w / 2.0,
        y: -h,
        width: w,
        height: h,
        speed: BOSS_DESCENT_SPEED,
        kind: EnemyKind::Boss(BossState {
            health,
            max_health: health,
            shoot_interval,
            last_shot_at: now,
            direction: 1.0,
            move_timer: 0,
            is_final,
        }),
    }
}

fn spawn_boss(state: &mut SimulationState, events: &mut Vec<GameEvent>) {
    let boss = make_boss(state.wave.current_wave, state.width, state.now);
    let is_final = matches!(&boss.kind, EnemyKind::Boss(b) if b.is_final);
    state.enemies.push(boss);
    state.wave.phase = WavePhase::Boss;

    info!(wave = state.wave.current_wave, is_final, "boss spawned");
    events.push(GameEvent::BossSpawned { is_final });
    events.push(GameEvent::Music(if is_final {
        MusicCue::FinalBoss
    } else {
        MusicCue::Boss
    }));
    announce(
        state,
        if is_final { "FINAL BOSS".to_string() } else { "BOSS".to_string() },
    );
}

/// Leave the boss phase: clear hostile fire and restart the break timer.
pub fn end_boss_phase(state: &mut SimulationState, events: &mut Vec<GameEvent>) {
    state.wave.phase = WavePhase::Break { since: state.now };
    state.enemy_bullets.clear();
    events.push(GameEvent::Music(MusicCue::Stage(state.wave.stage_index())));
    announce(state, "BOSS DEFEATED".to_string());
}
