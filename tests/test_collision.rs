use rand::rngs::StdRng;
use rand::SeedableRng;

use arcade_shooter::collision::*;
use arcade_shooter::compute::{init_state, start_run};
use arcade_shooter::config::SimConfig;
use arcade_shooter::entities::*;
use arcade_shooter::events::{EnemyClass, GameEvent};
use arcade_shooter::spawner::make_boss;

const NOW: u64 = 10_000;

fn no_drops() -> SimConfig {
    SimConfig {
        powerup_drop_chance: 0.0,
        ..SimConfig::default()
    }
}

/// Player sits at (375, 530)–(425, 580).
fn playing_state(cfg: &SimConfig) -> SimulationState {
    let (mut state, _) = start_run(&init_state(cfg, 0), cfg);
    state.now = NOW;
    state.wave.phase = WavePhase::Active;
    state
}

fn enemy(x: f32, y: f32) -> Enemy {
    Enemy {
        x,
        y,
        width: 40.0,
        height: 40.0,
        speed: 2.5,
        kind: EnemyKind::Normal,
    }
}

fn bullet(x: f32, y: f32, kind: BulletKind) -> Bullet {
    Bullet {
        x,
        y,
        width: 6.0,
        height: 12.0,
        speed: 8.0,
        kind,
    }
}

fn enemy_bullet(x: f32, y: f32) -> EnemyBullet {
    EnemyBullet {
        x,
        y,
        width: 10.0,
        height: 10.0,
        vx: 0.0,
        vy: 4.0,
        speed: 4.0,
        kind: EnemyBulletKind::Spread,
    }
}

fn boss_at(x: f32, y: f32, health: u32) -> Enemy {
    let mut boss = make_boss(4, 800.0, NOW);
    boss.x = x;
    boss.y = y;
    if let EnemyKind::Boss(b) = &mut boss.kind {
        b.health = health;
    }
    boss
}

fn boss_health(state: &SimulationState) -> Option<u32> {
    state.boss().and_then(|e| match &e.kind {
        EnemyKind::Boss(b) => Some(b.health),
        _ => None,
    })
}

fn resolve(state: &mut SimulationState, cfg: &SimConfig) -> (CollisionOutcome, Vec<GameEvent>) {
    let mut rng = StdRng::seed_from_u64(42);
    let mut events = Vec::new();
    let outcome = resolve_collisions(state, cfg, &mut rng, &mut events);
    (outcome, events)
}

#[test]
fn intersects_excludes_shared_edges() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(!intersects(&a, &Rect::new(10.0, 0.0, 5.0, 5.0)));
    assert!(intersects(&a, &Rect::new(9.0, 9.0, 5.0, 5.0)));
}

// ── Player bullets vs enemies ─────────────────────────────────────────────────

#[test]
fn bullet_destroys_enemy_and_scores() {
    let cfg = no_drops();
    let mut state = playing_state(&cfg);
    state.enemies.push(enemy(100.0, 100.0));
    state.bullets.push(bullet(110.0, 110.0, BulletKind::Normal));

    let (outcome, events) = resolve(&mut state, &cfg);

    assert!(!outcome.player_dead);
    assert!(state.enemies.is_empty());
    assert!(state.bullets.is_empty());
    assert_eq!(state.scoring.score, 100);
    assert_eq!(state.scoring.combo_count, 1);
    assert_eq!(state.wave.enemies_destroyed, 1);
    assert!(events.contains(&GameEvent::EnemyDestroyed {
        class: EnemyClass::Normal,
        x: 120.0,
        y: 120.0,
        points: 100,
    }));
    assert_eq!(state.explosions.len(), 1);
    assert_eq!(state.particles.len(), 12);
    assert!(state.power_ups.is_empty());
}

#[test]
fn a_spent_bullet_hits_only_the_highest_index_enemy() {
    let cfg = no_drops();
    let mut state = playing_state(&cfg);
    state.enemies.push(enemy(100.0, 100.0));
    state.enemies.push(enemy(110.0, 100.0));
    state.bullets.push(bullet(125.0, 110.0, BulletKind::Normal));

    resolve(&mut state, &cfg);

    assert_eq!(state.enemies.len(), 1);
    assert_eq!(state.enemies[0].x, 100.0);
    assert!(state.bullets.is_empty());
}

#[test]
fn an_enemy_consumes_only_one_bullet() {
    let cfg = no_drops();
    let mut state = playing_state(&cfg);
    state.enemies.push(enemy(100.0, 100.0));
    state.bullets.push(bullet(110.0, 110.0, BulletKind::Normal));
    state.bullets.push(bullet(120.0, 110.0, BulletKind::Normal));

    resolve(&mut state, &cfg);

    assert!(state.enemies.is_empty());
    assert_eq!(state.bullets.len(), 1);
    assert_eq!(state.bullets[0].x, 110.0);
    assert_eq!(state.scoring.score, 100);
}

#[test]
fn laser_pierces_until_exhausted() {
    let cfg = no_drops();
    let mut state = playing_state(&cfg);
    state.enemies.push(enemy(100.0, 100.0));
    state.enemies.push(enemy(100.0, 100.0));
    state.bullets.push(bullet(
        110.0,
        110.0,
        BulletKind::Laser {
            pierce_remaining: 3,
        },
    ));

    resolve(&mut state, &cfg);

    assert!(state.enemies.is_empty());
    assert_eq!(state.scoring.score, 240);
    assert_eq!(
        state.bullets[0].kind,
        BulletKind::Laser {
            pierce_remaining: 1
        }
    );

    state.enemies.push(enemy(100.0, 100.0));
    resolve(&mut state, &cfg);
    assert!(state.enemies.is_empty());
    assert!(state.bullets.is_empty());
}

#[test]
fn missile_splash_reaches_exactly_its_radius() {
    let cfg = no_drops();
    let mut state = playing_state(&cfg);
    // Direct hit: centre (200, 200)
    state.enemies.push(enemy(180.0, 180.0));
    // Centre exactly 110 away
    state.enemies.push(enemy(290.0, 180.0));
    // Centre 111 away
    state.enemies.push(enemy(180.0, 291.0));
    state.bullets.push(Bullet {
        x: 195.0,
        y: 191.0,
        width: 10.0,
        height: 18.0,
        speed: 6.0,
        kind: BulletKind::Missile { vx: 0.0 },
    });

    resolve(&mut state, &cfg);

    assert_eq!(state.enemies.len(), 1);
    assert_eq!(state.enemies[0].y, 291.0);
    assert!(state.bullets.is_empty());
    // 150 direct + 100 splash
    assert_eq!(state.scoring.score, 250);
    assert_eq!(state.scoring.combo_count, 2);
    assert!(state.explosions.iter().any(|e| e.radius == 110.0));
}

#[test]
fn missile_splash_damages_boss() {
    let cfg = no_drops();
    let mut state = playing_state(&cfg);
    state.wave.phase = WavePhase::Boss;
    state.enemies.push(boss_at(240.0, 160.0, 7));
    state.enemies.push(enemy(180.0, 180.0));
    state.bullets.push(Bullet {
        x: 195.0,
        y: 191.0,
        width: 10.0,
        height: 18.0,
        speed: 6.0,
        kind: BulletKind::Missile { vx: 0.0 },
    });

    resolve(&mut state, &cfg);

    assert_eq!(state.enemies.len(), 1);
    assert_eq!(boss_health(&state), Some(5));
}

// ── Bosses ────────────────────────────────────────────────────────────────────

#[test]
fn bullet_chips_boss_health() {
    let cfg = no_drops();
    let mut state = playing_state(&cfg);
    state.wave.phase = WavePhase::Boss;
    state.enemies.push(boss_at(340.0, 50.0, 7));
    state.bullets.push(bullet(400.0, 100.0, BulletKind::Normal));

    let (_, events) = resolve(&mut state, &cfg);

    assert_eq!(boss_health(&state), Some(6));
    assert!(state.bullets.is_empty());
    assert!(events.contains(&GameEvent::BossDamaged {
        health: 6,
        max_health: 7
    }));
    assert_eq!(state.hit_stop_until, NOW + 30);
    assert_eq!(state.scoring.score, 0);
}

#[test]
fn missile_does_double_damage_to_boss() {
    let cfg = no_drops();
    let mut state = playing_state(&cfg);
    state.wave.phase = WavePhase::Boss;
    state.enemies.push(boss_at(340.0, 50.0, 3));
    state.bullets.push(Bullet {
        x: 395.0,
        y: 100.0,
        width: 10.0,
        height: 18.0,
        speed: 6.0,
        kind: BulletKind::Missile { vx: 0.0 },
    });

    resolve(&mut state, &cfg);
    assert_eq!(boss_health(&state), Some(1));
}

#[test]
fn boss_falls_at_exactly_zero_health() {
    let cfg = no_drops();
    let mut state = playing_state(&cfg);
    state.wave.current_wave = 4;
    state.wave.phase = WavePhase::Boss;
    state.enemies.push(boss_at(340.0, 50.0, 1));
    state.enemy_bullets.push(enemy_bullet(10.0, 300.0));
    state.bullets.push(bullet(400.0, 100.0, BulletKind::Normal));

    let (_, events) = resolve(&mut state, &cfg);

    assert!(state.boss().is_none());
    assert_eq!(state.wave.phase, WavePhase::Break { since: NOW });
    assert!(state.enemy_bullets.is_empty());
    // Bosses always drop, whatever the configured chance
    assert_eq!(state.power_ups.len(), 1);
    assert_eq!(state.scoring.score, 1000);
    assert_eq!(state.scoring.combo_count, 3);
    assert!(events.contains(&GameEvent::BossDefeated {
        wave: 4,
        points: 1000
    }));
    assert_eq!(state.hit_stop_until, NOW + 150);
}

// ── Enemies vs player ─────────────────────────────────────────────────────────

#[test]
fn enemy_ram_costs_a_life_and_the_combo() {
    let cfg = no_drops();
    let mut state = playing_state(&cfg);
    state.scoring.combo_count = 3;
    state.scoring.multiplier = 2;
    state.enemies.push(enemy(380.0, 540.0));

    let (outcome, events) = resolve(&mut state, &cfg);

    assert!(!outcome.player_dead);
    assert_eq!(state.player.lives, 2);
    assert_eq!(state.player.invulnerable.active_until, NOW + 1500);
    assert!(state.enemies.is_empty());
    assert_eq!(state.scoring.combo_count, 0);
    assert_eq!(state.scoring.multiplier, 1);
    assert_eq!(state.scoring.score, 0);
    assert!(events.contains(&GameEvent::PlayerDamaged { lives: 2 }));
    assert_eq!(state.hit_stop_until, NOW + 90);
}

#[test]
fn shield_destroys_rammer_for_points() {
    let cfg = no_drops();
    let mut state = playing_state(&cfg);
    state.player.shield.active_until = NOW + 5000;
    state.enemies.push(enemy(380.0, 540.0));

    let (_, events) = resolve(&mut state, &cfg);

    assert!(state.enemies.is_empty());
    assert_eq!(state.player.lives, 3);
    assert_eq!(state.scoring.score, 100);
    assert_eq!(state.player.shield.active_until, NOW + 5000);
    assert_eq!(state.player.invulnerable.active_until, 0);
    assert!(events.contains(&GameEvent::ShieldAbsorbed));
}

#[test]
fn invulnerable_player_passes_through_enemies() {
    let cfg = no_drops();
    let mut state = playing_state(&cfg);
    state.player.invulnerable.active_until = NOW + 1000;
    state.scoring.combo_count = 3;
    state.enemies.push(enemy(380.0, 540.0));

    let (_, events) = resolve(&mut state, &cfg);

    assert_eq!(state.enemies.len(), 1);
    assert_eq!(state.player.lives, 3);
    assert_eq!(state.scoring.combo_count, 3);
    assert!(events.is_empty());
}

#[test]
fn two_rammers_in_one_frame_cost_one_life() {
    let cfg = no_drops();
    let mut state = playing_state(&cfg);
    state.enemies.push(enemy(380.0, 540.0));
    state.enemies.push(enemy(390.0, 545.0));

    resolve(&mut state, &cfg);

    assert_eq!(state.player.lives, 2);
    assert_eq!(state.enemies.len(), 1);
    assert_eq!(state.enemies[0].x, 380.0);
}

#[test]
fn boss_contact_hurts_but_boss_survives() {
    let cfg = no_drops();
    let mut state = playing_state(&cfg);
    state.wave.phase = WavePhase::Boss;
    state.enemies.push(boss_at(340.0, 500.0, 7));

    resolve(&mut state, &cfg);

    assert_eq!(state.player.lives, 2);
    assert_eq!(boss_health(&state), Some(7));
}

#[test]
fn last_life_lost_reports_death() {
    let cfg = no_drops();
    let mut state = playing_state(&cfg);
    state.player.lives = 1;
    state.enemies.push(enemy(380.0, 540.0));

    let (outcome, _) = resolve(&mut state, &cfg);

    assert!(outcome.player_dead);
    assert_eq!(state.player.lives, 0);
}

#[test]
fn enemy_shot_down_this_frame_cannot_ram() {
    let cfg = no_drops();
    let mut state = playing_state(&cfg);
    state.enemies.push(enemy(380.0, 500.0));
    state.bullets.push(bullet(390.0, 510.0, BulletKind::Normal));

    resolve(&mut state, &cfg);

    assert!(state.enemies.is_empty());
    assert_eq!(state.player.lives, 3);
    assert_eq!(state.scoring.score, 100);
}

// ── Enemy bullets vs player ───────────────────────────────────────────────────

#[test]
fn enemy_bullet_hit_is_consumed() {
    let cfg = no_drops();
    let mut state = playing_state(&cfg);
    state.scoring.combo_count = 3;
    state.scoring.multiplier = 2;
    state.enemy_bullets.push(enemy_bullet(395.0, 550.0));

    resolve(&mut state, &cfg);

    assert!(state.enemy_bullets.is_empty());
    assert_eq!(state.player.lives, 2);
    assert_eq!(state.scoring.combo_count, 0);
    assert_eq!(state.scoring.multiplier, 1);
    assert_eq!(state.player.invulnerable.active_until, NOW + 1500);
}

#[test]
fn two_enemy_bullets_in_one_frame_cost_one_life() {
    let cfg = no_drops();
    let mut state = playing_state(&cfg);
    state.enemy_bullets.push(enemy_bullet(380.0, 540.0));
    state.enemy_bullets.push(enemy_bullet(395.0, 550.0));

    resolve(&mut state, &cfg);

    // The later bullet lands first; the grace window then lets the other pass.
    assert_eq!(state.player.lives, 2);
    assert_eq!(state.enemy_bullets.len(), 1);
    assert_eq!(state.enemy_bullets[0].x, 380.0);
}

#[test]
fn invulnerable_player_ignores_enemy_bullets() {
    let cfg = no_drops();
    let mut state = playing_state(&cfg);
    state.player.invulnerable.active_until = NOW + 1;
    state.enemy_bullets.push(enemy_bullet(395.0, 550.0));

    resolve(&mut state, &cfg);

    assert_eq!(state.enemy_bullets.len(), 1);
    assert_eq!(state.player.lives, 3);
}

#[test]
fn shield_absorbs_enemy_bullets() {
    let cfg = no_drops();
    let mut state = playing_state(&cfg);
    state.player.shield.active_until = NOW + 1;
    state.enemy_bullets.push(enemy_bullet(395.0, 550.0));
    state.enemy_bullets.push(enemy_bullet(380.0, 540.0));

    let (_, events) = resolve(&mut state, &cfg);

    assert!(state.enemy_bullets.is_empty());
    assert_eq!(state.player.lives, 3);
    assert_eq!(
        events
            .iter()
            .filter(|e| **e == GameEvent::ShieldAbsorbed)
            .count(),
        2
    );
}

// ── Drops and feel ────────────────────────────────────────────────────────────

#[test]
fn guaranteed_drop_appears_at_enemy_centre() {
    let cfg = SimConfig {
        powerup_drop_chance: 1.0,
        ..SimConfig::default()
    };
    let mut state = playing_state(&cfg);
    state.enemies.push(enemy(100.0, 100.0));
    state.bullets.push(bullet(110.0, 110.0, BulletKind::Normal));

    let (_, events) = resolve(&mut state, &cfg);

    assert_eq!(state.power_ups.len(), 1);
    assert_eq!(state.power_ups[0].x, 108.0);
    assert_eq!(state.power_ups[0].y, 108.0);
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::PowerUpDropped { .. })));
}

#[test]
fn fifth_kill_announces_multiplier() {
    let cfg = no_drops();
    let mut state = playing_state(&cfg);
    state.scoring.combo_count = 4;
    state.enemies.push(enemy(100.0, 100.0));
    state.bullets.push(bullet(110.0, 110.0, BulletKind::Normal));

    let (_, events) = resolve(&mut state, &cfg);

    assert_eq!(state.scoring.multiplier, 2);
    assert!(events.contains(&GameEvent::MultiplierUp { multiplier: 2 }));
}

#[test]
fn hit_stop_can_be_disabled() {
    let cfg = SimConfig {
        hit_stop: false,
        ..no_drops()
    };
    let mut state = playing_state(&cfg);
    state.enemies.push(enemy(380.0, 540.0));

    resolve(&mut state, &cfg);

    assert_eq!(state.player.lives, 2);
    assert_eq!(state.hit_stop_until, 0);
}
