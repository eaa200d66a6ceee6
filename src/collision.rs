/// Collision and resolution engine.
///
/// Runs once per frame, in three passes:
///
/// 1. player bullets vs enemies (with missile splash),
/// 2. enemies vs player,
/// 3. enemy bullets vs player.
///
/// Stores are scanned from the last index to the first. Removals are
/// marked during a pass and swept afterwards, so indices stay valid while
/// a splash reaches other enemies and surviving entities keep their order.

use rand::Rng;
use tracing::info;

use crate::config::SimConfig;
use crate::constants::*;
use crate::entities::{
    Bounded, BulletKind, EnemyKind, Explosion, PowerUp, PowerUpKind, Rect, SimulationState,
};
use crate::events::{EnemyClass, GameEvent, SoundCue};
use crate::movement;
use crate::player;
use crate::scoring;
use crate::spawner;

/// Result of one resolution pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionOutcome {
    /// The player lost their last life this frame.
    pub player_dead: bool,
}

/// Resolve every interaction for the current frame.
pub fn resolve_collisions(
    state: &mut SimulationState,
    cfg: &SimConfig,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) -> CollisionOutcome {
    bullets_vs_enemies(state, cfg, rng, events);
    if enemies_vs_player(state, cfg, rng, events) {
        return CollisionOutcome { player_dead: true };
    }
    CollisionOutcome {
        player_dead: enemy_bullets_vs_player(state, cfg, rng, events),
    }
}

/// Strict rectangle overlap; shared edges do not count.
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.intersects(b)
}

/// Remove every item whose flag is set, keeping the rest in order.
fn sweep<T>(items: &mut Vec<T>, removed: &[bool]) {
    let mut index = 0;
    items.retain(|_| {
        let keep = !removed.get(index).copied().unwrap_or(false);
        index += 1;
        keep
    });
}

fn hit_stop(state: &mut SimulationState, cfg: &SimConfig, duration: u64) {
    if cfg.hit_stop {
        state.hit_stop_until = state.hit_stop_until.max(state.now + duration);
    }
}

// ── Pass 1: player bullets vs enemies ─────────────────────────────────────────

fn bullets_vs_enemies(
    state: &mut SimulationState,
    cfg: &SimConfig,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) {
    let mut destroyed = vec![false; state.enemies.len()];
    let mut spent = vec![false; state.bullets.len()];

    for i in (0..state.enemies.len()).rev() {
        if destroyed[i] {
            continue;
        }
        let enemy_rect = state.enemies[i].bounds();
        let hit = (0..state.bullets.len())
            .rev()
            .find(|&j| !spent[j] && state.bullets[j].bounds().intersects(&enemy_rect));
        let Some(j) = hit else {
            continue;
        };

        let bullet = &mut state.bullets[j];
        let (impact_x, impact_y) = bullet.center();
        let is_missile = matches!(bullet.kind, BulletKind::Missile { .. });
        let (base_score, boss_damage) = match &mut bullet.kind {
            BulletKind::Normal => {
                spent[j] = true;
                (NORMAL_KILL_SCORE, BULLET_BOSS_DAMAGE)
            }
            BulletKind::Laser { pierce_remaining } => {
                *pierce_remaining = pierce_remaining.saturating_sub(1);
                if *pierce_remaining == 0 {
                    spent[j] = true;
                }
                (LASER_KILL_SCORE, BULLET_BOSS_DAMAGE)
            }
            BulletKind::Missile { .. } => {
                spent[j] = true;
                (MISSILE_KILL_SCORE, MISSILE_BOSS_DAMAGE)
            }
        };

        if state.enemies[i].is_boss() {
            damage_boss(state, cfg, i, boss_damage, &mut destroyed, rng, events);
        } else {
            destroyed[i] = true;
            destroy_enemy(state, cfg, i, base_score, 1, true, rng, events);
        }
        if is_missile {
            trigger_missile_explosion(state, cfg, impact_x, impact_y, i, &mut destroyed, rng, events);
        }
    }

    sweep(&mut state.enemies, &destroyed);
    sweep(&mut state.bullets, &spent);
}

/// Area damage around a missile impact. The directly hit enemy
/// (`exclude`) has already been resolved.
#[allow(clippy::too_many_arguments)]
pub fn trigger_missile_explosion(
    state: &mut SimulationState,
    cfg: &SimConfig,
    x: f32,
    y: f32,
    exclude: usize,
    destroyed: &mut [bool],
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) {
    let radius = cfg.missile_explosion_radius;
    state.explosions.push(Explosion {
        x,
        y,
        radius,
        started_at: state.now,
        duration: MISSILE_EXPLOSION_DURATION,
    });
    events.push(GameEvent::Sound(SoundCue::Explosion));

    for k in (0..state.enemies.len()).rev() {
        if k == exclude || destroyed[k] {
            continue;
        }
        let (ex, ey) = state.enemies[k].center();
        if (ex - x).hypot(ey - y) > radius {
            continue;
        }
        if state.enemies[k].is_boss() {
            damage_boss(state, cfg, k, MISSILE_BOSS_DAMAGE, destroyed, rng, events);
        } else {
            destroyed[k] = true;
            destroy_enemy(state, cfg, k, SPLASH_KILL_SCORE, 1, true, rng, events);
        }
    }
}

fn damage_boss(
    state: &mut SimulationState,
    cfg: &SimConfig,
    index: usize,
    damage: u32,
    destroyed: &mut [bool],
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) {
    let EnemyKind::Boss(boss) = &mut state.enemies[index].kind else {
        return;
    };
    boss.health = boss.health.saturating_sub(damage);
    let (health, max_health) = (boss.health, boss.max_health);
    events.push(GameEvent::BossDamaged { health, max_health });
    hit_stop(state, cfg, HIT_STOP_BOSS_HIT);

    if health == 0 {
        destroyed[index] = true;
        handle_boss_defeat(state, cfg, index, rng, events);
    }
}

/// Score, drop and effects for a boss kill, then leave the boss phase.
fn handle_boss_defeat(
    state: &mut SimulationState,
    cfg: &SimConfig,
    index: usize,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) {
    let enemy = &state.enemies[index];
    let (cx, cy) = enemy.center();
    let is_final = matches!(&enemy.kind, EnemyKind::Boss(b) if b.is_final);
    let base = if is_final { FINAL_BOSS_KILL_SCORE } else { BOSS_KILL_SCORE };

    let outcome = scoring::on_enemy_destroyed(&mut state.scoring, cfg, base, BOSS_COMBO_BONUS);
    announce_multiplier(state, outcome.multiplier_steps, events);

    let kind = scoring::boss_drop(rng);
    state.power_ups.push(make_power_up(kind, cx, cy, rng));
    events.push(GameEvent::PowerUpDropped { kind });

    state.explosions.push(Explosion {
        x: cx,
        y: cy,
        radius: BOSS_EXPLOSION_RADIUS,
        started_at: state.now,
        duration: BOSS_EXPLOSION_DURATION,
    });
    movement::spawn_particles(state, cx, cy, rng);
    movement::spawn_particles(state, cx, cy, rng);
    events.push(GameEvent::Sound(SoundCue::Explosion));

    let wave = state.wave.current_wave;
    info!(wave, points = outcome.points, is_final, "boss defeated");
    events.push(GameEvent::BossDefeated {
        wave,
        points: outcome.points,
    });
    spawner::end_boss_phase(state, events);
    hit_stop(state, cfg, HIT_STOP_BOSS_DEFEAT);
}

/// Score an ordinary kill and run the drop roll.
#[allow(clippy::too_many_arguments)]
fn destroy_enemy(
    state: &mut SimulationState,
    cfg: &SimConfig,
    index: usize,
    base_score: u32,
    combo_bonus: u32,
    allow_drops: bool,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) {
    let enemy = &state.enemies[index];
    let class = EnemyClass::from(&enemy.kind);
    let (cx, cy) = enemy.center();

    let outcome = scoring::on_enemy_destroyed(&mut state.scoring, cfg, base_score, combo_bonus);
    announce_multiplier(state, outcome.multiplier_steps, events);
    events.push(GameEvent::EnemyDestroyed {
        class,
        x: cx,
        y: cy,
        points: outcome.points,
    });
    events.push(GameEvent::Sound(SoundCue::Explosion));
    state.wave.enemies_destroyed = (state.wave.enemies_destroyed + 1).min(cfg.enemies_per_wave);

    explode_at(state, cx, cy, rng);

    if allow_drops {
        if let Some(kind) = scoring::roll_drop(cfg, rng) {
            state.power_ups.push(make_power_up(kind, cx, cy, rng));
            events.push(GameEvent::PowerUpDropped { kind });
        }
    }
}

fn announce_multiplier(state: &SimulationState, steps: u32, events: &mut Vec<GameEvent>) {
    if steps > 0 {
        events.push(GameEvent::MultiplierUp {
            multiplier: state.scoring.multiplier,
        });
        events.push(GameEvent::Sound(SoundCue::ComboUp));
    }
}

fn explode_at(state: &mut SimulationState, x: f32, y: f32, rng: &mut impl Rng) {
    state.explosions.push(Explosion {
        x,
        y,
        radius: KILL_EXPLOSION_RADIUS,
        started_at: state.now,
        duration: KILL_EXPLOSION_DURATION,
    });
    movement::spawn_particles(state, x, y, rng);
}

/// A falling pickup centred on `(cx, cy)`.
pub fn make_power_up(kind: PowerUpKind, cx: f32, cy: f32, rng: &mut impl Rng) -> PowerUp {
    PowerUp {
        x: cx - POWERUP_SIZE / 2.0,
        y: cy - POWERUP_SIZE / 2.0,
        size: POWERUP_SIZE,
        fall_speed: POWERUP_FALL_SPEED,
        rotation: 0.0,
        rotation_speed: rng.gen_range(-0.1..0.1),
        kind,
    }
}

// ── Pass 2 and 3: threats vs player ───────────────────────────────────────────

/// Unmitigated hit. Returns `true` when that was the last life.
fn damage_player(
    state: &mut SimulationState,
    cfg: &SimConfig,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) -> bool {
    let lives = player::take_damage(&mut state.player, cfg, state.now);
    scoring::reset_combo(&mut state.scoring);
    events.push(GameEvent::PlayerDamaged { lives });
    events.push(GameEvent::Sound(SoundCue::Explosion));
    let (px, py) = state.player.center();
    movement::spawn_particles(state, px, py, rng);
    hit_stop(state, cfg, HIT_STOP_PLAYER_HIT);
    lives == 0
}

fn enemies_vs_player(
    state: &mut SimulationState,
    cfg: &SimConfig,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) -> bool {
    let mut destroyed = vec![false; state.enemies.len()];
    let mut dead = false;

    for i in (0..state.enemies.len()).rev() {
        let player_rect = state.player.bounds();
        if !state.enemies[i].bounds().intersects(&player_rect) {
            continue;
        }
        let now = state.now;
        let is_boss = state.enemies[i].is_boss();

        if state.player.shield.is_active(now) {
            if !is_boss {
                destroyed[i] = true;
                destroy_enemy(state, cfg, i, RAM_KILL_SCORE, 1, true, rng, events);
                events.push(GameEvent::ShieldAbsorbed);
            }
            continue;
        }
        if state.player.invulnerable.is_active(now) {
            continue;
        }

        if !is_boss {
            destroyed[i] = true;
            let (cx, cy) = state.enemies[i].center();
            explode_at(state, cx, cy, rng);
        }
        if damage_player(state, cfg, rng, events) {
            dead = true;
            break;
        }
    }

    sweep(&mut state.enemies, &destroyed);
    dead
}

fn enemy_bullets_vs_player(
    state: &mut SimulationState,
    cfg: &SimConfig,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) -> bool {
    let mut consumed = vec![false; state.enemy_bullets.len()];
    let mut dead = false;

    for j in (0..state.enemy_bullets.len()).rev() {
        let player_rect = state.player.bounds();
        if !state.enemy_bullets[j].bounds().intersects(&player_rect) {
            continue;
        }
        let now = state.now;
        if state.player.shield.is_active(now) {
            consumed[j] = true;
            events.push(GameEvent::ShieldAbsorbed);
            continue;
        }
        if state.player.invulnerable.is_active(now) {
            continue;
        }
        consumed[j] = true;
        if damage_player(state, cfg, rng, events) {
            dead = true;
            break;
        }
    }

    sweep(&mut state.enemy_bullets, &consumed);
    dead
}
