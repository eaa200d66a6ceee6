/// Per-frame kinematics for every entity store.
///
/// Speeds are pixels per frame. Each updater also drops whatever has left
/// the playfield, iterating so that the surviving order is unchanged.

use rand::Rng;

use crate::config::SimConfig;
use crate::constants::*;
use crate::entities::{
    Bounded, BulletKind, Enemy, EnemyBullet, EnemyBulletKind, EnemyKind, Particle, Player,
    SimulationState,
};
use crate::events::{GameEvent, SoundCue};
use crate::player;

// ── Player bullets ────────────────────────────────────────────────────────────

/// Move player bullets upward; missiles steer toward a target first.
pub fn update_bullets(state: &mut SimulationState) {
    let enemies = &state.enemies;
    for bullet in state.bullets.iter_mut() {
        if let BulletKind::Missile { vx } = &mut bullet.kind {
            let (cx, cy) = bullet_center(bullet.x, bullet.y, bullet.width, bullet.height);
            if let Some(target) = missile_target(enemies, cx, cy) {
                let (tx, _) = target.center();
                *vx = steer(*vx, tx - cx);
            }
            bullet.x += *vx;
        }
        bullet.y -= bullet.speed;
    }
    let width = state.width;
    state.bullets.retain(|b| {
        b.y + b.height >= 0.0 && b.x + b.width >= -OFFSCREEN_MARGIN && b.x <= width + OFFSCREEN_MARGIN
    });
}

fn bullet_center(x: f32, y: f32, w: f32, h: f32) -> (f32, f32) {
    (x + w / 2.0, y + h / 2.0)
}

/// Clamped proportional steering: the correction is bounded per frame and
/// the resulting horizontal speed is bounded too.
pub fn steer(vx: f32, dx: f32) -> f32 {
    let correction = (dx * MISSILE_STEER_FACTOR).clamp(-MISSILE_MAX_STEER, MISSILE_MAX_STEER);
    (vx + correction).clamp(-MISSILE_MAX_VX, MISSILE_MAX_VX)
}

/// Nearest non-boss enemy, or the boss when nothing else is alive.
pub fn missile_target(enemies: &[Enemy], cx: f32, cy: f32) -> Option<&Enemy> {
    let distance = |e: &Enemy| {
        let (ex, ey) = e.center();
        (ex - cx).hypot(ey - cy)
    };
    enemies
        .iter()
        .filter(|e| !e.is_boss())
        .min_by(|a, b| distance(a).total_cmp(&distance(b)))
        .or_else(|| enemies.iter().find(|e| e.is_boss()))
}

// ── Enemy bullets ─────────────────────────────────────────────────────────────

pub fn update_enemy_bullets(state: &mut SimulationState) {
    let (px, py) = state.player.center();
    for bullet in state.enemy_bullets.iter_mut() {
        if let EnemyBulletKind::Homing { turn_rate } = bullet.kind {
            let (bx, by) = bullet.center();
            let (vx, vy) = home(bullet.vx, bullet.vy, px - bx, py - by, turn_rate, bullet.speed);
            bullet.vx = vx;
            bullet.vy = vy;
        }
        bullet.x += bullet.vx;
        bullet.y += bullet.vy;
    }
    let (width, height) = (state.width, state.height);
    state.enemy_bullets.retain(|b| {
        b.x + b.width >= -OFFSCREEN_MARGIN
            && b.x <= width + OFFSCREEN_MARGIN
            && b.y + b.height >= -OFFSCREEN_MARGIN
            && b.y <= height + OFFSCREEN_MARGIN
    });
}

/// Blend the unit vector toward the target into the velocity, then restore
/// the bullet's constant speed.
pub fn home(vx: f32, vy: f32, dx: f32, dy: f32, turn_rate: f32, speed: f32) -> (f32, f32) {
    let distance = dx.hypot(dy);
    if distance <= f32::EPSILON {
        return (vx, vy);
    }
    let nx = vx + dx / distance * speed * turn_rate;
    let ny = vy + dy / distance * speed * turn_rate;
    let length = nx.hypot(ny);
    if length <= f32::EPSILON {
        return (vx, vy);
    }
    (nx / length * speed, ny / length * speed)
}

fn homing_bullet(cx: f32, bottom: f32) -> EnemyBullet {
    EnemyBullet {
        x: cx - ENEMY_BULLET_SIZE / 2.0,
        y: bottom,
        width: ENEMY_BULLET_SIZE,
        height: ENEMY_BULLET_SIZE,
        vx: 0.0,
        vy: HOMING_BULLET_SPEED,
        speed: HOMING_BULLET_SPEED,
        kind: EnemyBulletKind::Homing {
            turn_rate: HOMING_TURN_RATE,
        },
    }
}

fn spread_bullet(cx: f32, bottom: f32, vx: f32, speed: f32) -> EnemyBullet {
    let vy = (speed * speed - vx * vx).max(0.0).sqrt();
    EnemyBullet {
        x: cx - ENEMY_BULLET_SIZE / 2.0,
        y: bottom,
        width: ENEMY_BULLET_SIZE,
        height: ENEMY_BULLET_SIZE,
        vx,
        vy,
        speed,
        kind: EnemyBulletKind::Spread,
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

/// Advance every enemy by one frame; trackers and bosses may open fire.
pub fn update_enemies(state: &mut SimulationState, rng: &mut impl Rng) {
    let now = state.now;
    let (width, height) = (state.width, state.height);
    let (player_cx, _) = state.player.center();
    let mut fired = Vec::new();

    for enemy in state.enemies.iter_mut() {
        move_enemy(enemy, now, width, player_cx, &mut fired, rng);
    }

    state.enemy_bullets.extend(fired);
    state.enemies.retain(|e| e.y <= height);
}

fn move_enemy(
    enemy: &mut Enemy,
    now: u64,
    width: f32,
    player_cx: f32,
    fired: &mut Vec<EnemyBullet>,
    rng: &mut impl Rng,
) {
    let max_x = (width - enemy.width).max(0.0);
    let cx = enemy.x + enemy.width / 2.0;
    let bottom = enemy.y + enemy.height;

    match &mut enemy.kind {
        EnemyKind::Normal => enemy.y += enemy.speed,
        EnemyKind::Zigzag {
            direction,
            timer,
            horizontal_speed,
        } => {
            enemy.y += enemy.speed;
            *timer += 1;
            if *timer % ZIGZAG_FLIP_TICKS == 0 {
                *direction = -*direction;
            }
            enemy.x += *direction * *horizontal_speed;
            if enemy.x <= 0.0 || enemy.x >= max_x {
                *direction = -*direction;
                enemy.x = enemy.x.clamp(0.0, max_x);
            }
        }
        EnemyKind::Arc {
            amplitude,
            frequency,
            base_x,
            spawned_at,
        } => {
            enemy.y += enemy.speed;
            let elapsed = now.saturating_sub(*spawned_at) as f32;
            enemy.x = (*base_x + (elapsed * *frequency).sin() * *amplitude).clamp(0.0, max_x);
        }
        EnemyKind::Tracker {
            tracking_speed,
            fire_interval,
            last_fire_at,
        } => {
            enemy.y += enemy.speed;
            let dx = player_cx - cx;
            enemy.x = (enemy.x + dx.clamp(-*tracking_speed, *tracking_speed)).clamp(0.0, max_x);
            if now.saturating_sub(*last_fire_at) >= *fire_interval {
                *last_fire_at = now;
                fired.push(homing_bullet(enemy.x + enemy.width / 2.0, bottom));
            }
        }
        EnemyKind::Boss(boss) => {
            if enemy.y < BOSS_HOLD_Y {
                enemy.y += enemy.speed;
            }
            boss.move_timer += 1;
            if boss.move_timer % BOSS_FLIP_TICKS == 0 {
                boss.direction = -boss.direction;
            }
            enemy.x += boss.direction * BOSS_HORIZONTAL_SPEED;
            if enemy.x <= 0.0 || enemy.x >= max_x {
                boss.direction = -boss.direction;
                enemy.x = enemy.x.clamp(0.0, max_x);
            }
            if now.saturating_sub(boss.last_shot_at) >= boss.shoot_interval {
                boss.last_shot_at = now;
                let cx = enemy.x + enemy.width / 2.0;
                let bottom = enemy.y + enemy.height;
                if boss.is_final {
                    for vx in [-3.0, -1.5, 0.0, 1.5, 3.0] {
                        fired.push(spread_bullet(cx, bottom, vx, SPREAD_BULLET_SPEED + 0.5));
                    }
                    if rng.gen::<f64>() < FINAL_BOSS_HOMING_CHANCE {
                        fired.push(homing_bullet(enemy.x + ENEMY_BULLET_SIZE, bottom));
                        fired.push(homing_bullet(enemy.x + enemy.width - ENEMY_BULLET_SIZE, bottom));
                    }
                } else {
                    for vx in [-2.0, 0.0, 2.0] {
                        fired.push(spread_bullet(cx, bottom, vx, SPREAD_BULLET_SPEED));
                    }
                }
            }
        }
    }
}

// ── Power-ups ─────────────────────────────────────────────────────────────────

/// Let power-ups fall and apply any the player touches.
pub fn update_power_ups(state: &mut SimulationState, cfg: &SimConfig, events: &mut Vec<GameEvent>) {
    let now = state.now;
    let height = state.height;
    let player: &mut Player = &mut state.player;
    state.power_ups.retain_mut(|p| {
        p.y += p.fall_speed;
        p.rotation += p.rotation_speed;
        if p.bounds().intersects(&player.bounds()) {
            player::apply_power_up(player, cfg, p.kind, now);
            events.push(GameEvent::PowerUpCollected { kind: p.kind });
            events.push(GameEvent::Sound(SoundCue::PowerUp));
            return false;
        }
        p.y <= height
    });
}

// ── Effects ───────────────────────────────────────────────────────────────────

/// Integrate particles and drop finished particles and explosions.
pub fn update_effects(state: &mut SimulationState) {
    let now = state.now;
    for particle in state.particles.iter_mut() {
        particle.x += particle.vx;
        particle.y += particle.vy;
        particle.vx *= PARTICLE_DRAG;
        particle.vy *= PARTICLE_DRAG;
    }
    state
        .particles
        .retain(|p| now.saturating_sub(p.born_at) < p.lifetime);
    state.explosions.retain(|e| !e.is_finished(now));
}

/// Scatter a burst of particles from `(x, y)`.
pub fn spawn_particles(state: &mut SimulationState, x: f32, y: f32, rng: &mut impl Rng) {
    let now = state.now;
    state.particles.extend((0..PARTICLES_PER_BURST).map(|_| {
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let speed = rng.gen_range(1.0..4.0);
        Particle {
            x,
            y,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
            born_at: now,
            lifetime: PARTICLE_LIFETIME,
        }
    }));
}
