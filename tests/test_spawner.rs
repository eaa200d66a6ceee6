use rand::rngs::StdRng;
use rand::SeedableRng;

use arcade_shooter::compute::{init_state, start_run};
use arcade_shooter::config::{SimConfig, SpawnMode};
use arcade_shooter::entities::*;
use arcade_shooter::events::{EnemyClass, GameEvent, MusicCue};
use arcade_shooter::spawner::*;

fn playing_state(cfg: &SimConfig) -> SimulationState {
    let (state, _) = start_run(&init_state(cfg, 0), cfg);
    state
}

fn normal_enemy() -> Enemy {
    Enemy {
        x: 100.0,
        y: 100.0,
        width: 40.0,
        height: 40.0,
        speed: 2.5,
        kind: EnemyKind::Normal,
    }
}

/// Put the director at the end of `wave`, with everything spawned and cleared.
fn finished_wave(cfg: &SimConfig, wave: u32, now: u64) -> SimulationState {
    let mut state = playing_state(cfg);
    state.now = now;
    state.wave.current_wave = wave;
    state.wave.phase = WavePhase::Active;
    state.wave.enemies_spawned = cfg.enemies_per_wave;
    state.wave.last_spawn_at = Some(now);
    state
}

// ── Wave lifecycle ────────────────────────────────────────────────────────────

#[test]
fn first_pass_starts_wave_one() {
    let cfg = SimConfig::default();
    let mut rng = StdRng::seed_from_u64(42);
    let mut state = playing_state(&cfg);
    let mut events = Vec::new();

    update(&mut state, &cfg, &mut rng, &mut events);

    assert_eq!(state.wave.phase, WavePhase::Active);
    assert!(state.enemies.is_empty());
    assert!(events.contains(&GameEvent::WaveStarted { wave: 1 }));
    assert!(events.contains(&GameEvent::Music(MusicCue::Stage(0))));
    assert_eq!(
        state.announcement.as_ref().map(|a| a.text.as_str()),
        Some("WAVE 1")
    );

    update(&mut state, &cfg, &mut rng, &mut events);
    assert_eq!(state.enemies.len(), 1);
    assert_eq!(state.wave.enemies_spawned, 1);
    assert_eq!(state.wave.last_spawn_at, Some(0));
}

#[test]
fn wave_spawns_exactly_its_quota_at_the_wave_interval() {
    let cfg = SimConfig::default();
    let mut rng = StdRng::seed_from_u64(42);
    let mut state = playing_state(&cfg);
    let mut events = Vec::new();
    let mut spawn_times = Vec::new();

    for step in 0..60 {
        state.now = step * 100;
        let before = state.wave.enemies_spawned;
        update(&mut state, &cfg, &mut rng, &mut events);
        if state.wave.enemies_spawned > before {
            spawn_times.push(state.now);
        }
    }

    assert_eq!(state.wave.enemies_spawned, 8);
    assert_eq!(spawn_times.len(), 8);
    assert!(spawn_times.windows(2).all(|w| w[1] - w[0] >= 300));
    // Enemies are still alive, so the wave is not over
    assert_eq!(state.wave.phase, WavePhase::Active);
    assert_eq!(state.wave.current_wave, 1);
}

#[test]
fn live_enemies_block_wave_completion() {
    let cfg = SimConfig::default();
    let mut rng = StdRng::seed_from_u64(42);
    let mut state = finished_wave(&cfg, 1, 5000);
    state.enemies.push(normal_enemy());
    let mut events = Vec::new();

    update(&mut state, &cfg, &mut rng, &mut events);
    assert_eq!(state.wave.current_wave, 1);
    assert_eq!(state.wave.phase, WavePhase::Active);

    state.enemies.clear();
    update(&mut state, &cfg, &mut rng, &mut events);
    assert_eq!(state.wave.current_wave, 2);
    assert_eq!(state.wave.phase, WavePhase::Break { since: 5000 });
    assert!(events.contains(&GameEvent::WaveCleared { wave: 1 }));
}

#[test]
fn next_wave_starts_after_the_break() {
    let cfg = SimConfig::default();
    let mut rng = StdRng::seed_from_u64(42);
    let mut state = playing_state(&cfg);
    state.wave.current_wave = 2;
    state.wave.phase = WavePhase::Break { since: 1000 };
    let mut events = Vec::new();

    state.now = 3999;
    update(&mut state, &cfg, &mut rng, &mut events);
    assert_eq!(state.wave.phase, WavePhase::Break { since: 1000 });

    state.now = 4000;
    update(&mut state, &cfg, &mut rng, &mut events);
    assert_eq!(state.wave.phase, WavePhase::Active);
    assert_eq!(state.wave.enemies_spawned, 0);
    assert_eq!(events, vec![GameEvent::WaveStarted { wave: 2 }]);
}

// ── Bosses ────────────────────────────────────────────────────────────────────

#[test]
fn boss_is_due_every_third_wave() {
    assert!(!boss_due(1));
    assert!(!boss_due(2));
    assert!(!boss_due(3));
    assert!(boss_due(4));
    assert!(boss_due(7));
    assert!(boss_due(10));
    assert!(boss_due(13));
    assert!(!boss_due(11));
}

#[test]
fn boss_arrives_after_delay() {
    let cfg = SimConfig::default();
    let mut rng = StdRng::seed_from_u64(42);
    let mut state = finished_wave(&cfg, 3, 10_000);
    let mut events = Vec::new();

    update(&mut state, &cfg, &mut rng, &mut events);
    assert_eq!(state.wave.current_wave, 4);
    assert_eq!(state.wave.phase, WavePhase::BossIncoming { spawn_at: 11_500 });
    assert!(events.contains(&GameEvent::BossIncoming { wave: 4 }));
    assert!(state.enemies.is_empty());

    state.now = 11_499;
    update(&mut state, &cfg, &mut rng, &mut events);
    assert!(state.boss().is_none());

    events.clear();
    state.now = 11_500;
    update(&mut state, &cfg, &mut rng, &mut events);
    assert_eq!(state.wave.phase, WavePhase::Boss);
    let boss = state.boss().expect("boss should have spawned");
    match &boss.kind {
        EnemyKind::Boss(b) => {
            assert_eq!(b.health, 7);
            assert!(!b.is_final);
        }
        other => panic!("expected a boss, got {other:?}"),
    }
    assert!(events.contains(&GameEvent::BossSpawned { is_final: false }));
    assert!(events.contains(&GameEvent::Music(MusicCue::Boss)));
}

#[test]
fn wave_ten_brings_the_final_boss() {
    let cfg = SimConfig::default();
    let mut rng = StdRng::seed_from_u64(42);
    let mut state = finished_wave(&cfg, 9, 0);
    let mut events = Vec::new();

    update(&mut state, &cfg, &mut rng, &mut events);
    state.now = 1500;
    update(&mut state, &cfg, &mut rng, &mut events);

    assert!(events.contains(&GameEvent::BossSpawned { is_final: true }));
    assert!(events.contains(&GameEvent::Music(MusicCue::FinalBoss)));
    let boss = state.boss().expect("final boss should have spawned");
    assert_eq!(boss.width, 160.0);
}

#[test]
fn no_regular_spawns_during_boss_fight() {
    let cfg = SimConfig::default();
    let mut rng = StdRng::seed_from_u64(42);
    let mut state = playing_state(&cfg);
    state.wave.current_wave = 4;
    state.wave.phase = WavePhase::Boss;
    state.enemies.push(make_boss(4, 800.0, 0));
    let mut events = Vec::new();

    for step in 0..100 {
        state.now = step * 100;
        update(&mut state, &cfg, &mut rng, &mut events);
    }
    assert_eq!(state.enemies.len(), 1);
    assert_eq!(state.wave.enemies_spawned, 0);
    assert!(events.is_empty());
}

#[test]
fn boss_does_not_count_towards_wave_completion() {
    let cfg = SimConfig::default();
    let mut state = finished_wave(&cfg, 5, 0);
    state.enemies.push(make_boss(4, 800.0, 0));
    assert!(is_wave_complete(&state, &cfg));
    state.enemies.push(normal_enemy());
    assert!(!is_wave_complete(&state, &cfg));
}

#[test]
fn boss_stats_scale_by_tier() {
    assert_eq!(boss_stats(4), (7, 1350, false));
    assert_eq!(boss_stats(7), (9, 1200, false));
    assert_eq!(boss_stats(10), (30, 600, true));
    assert_eq!(boss_stats(13), (24, 860, false));
    // The interval never drops below the endless floor
    assert_eq!(boss_stats(100).1, 450);
}

#[test]
fn boss_enters_from_above_centred() {
    let boss = make_boss(4, 800.0, 123);
    assert_eq!(boss.x, 340.0);
    assert_eq!(boss.y, -80.0);
    match boss.kind {
        EnemyKind::Boss(b) => {
            assert_eq!(b.last_shot_at, 123);
            assert_eq!(b.max_health, b.health);
        }
        other => panic!("expected a boss, got {other:?}"),
    }
}

#[test]
fn ending_boss_phase_clears_hostile_fire() {
    let cfg = SimConfig::default();
    let mut state = playing_state(&cfg);
    state.now = 20_000;
    state.wave.current_wave = 4;
    state.wave.phase = WavePhase::Boss;
    state.enemy_bullets.push(EnemyBullet {
        x: 10.0,
        y: 10.0,
        width: 10.0,
        height: 10.0,
        vx: 0.0,
        vy: 4.0,
        speed: 4.0,
        kind: EnemyBulletKind::Spread,
    });
    let mut events = Vec::new();

    end_boss_phase(&mut state, &mut events);
    assert_eq!(state.wave.phase, WavePhase::Break { since: 20_000 });
    assert!(state.enemy_bullets.is_empty());
    assert!(events.contains(&GameEvent::Music(MusicCue::Stage(1))));
    assert_eq!(
        state.announcement.as_ref().map(|a| a.text.as_str()),
        Some("BOSS DEFEATED")
    );
}

#[test]
fn stage_theme_is_cued_once_after_a_boss() {
    let cfg = SimConfig::default();
    let mut rng = StdRng::seed_from_u64(42);
    let mut state = playing_state(&cfg);
    state.now = 20_000;
    state.wave.current_wave = 4;
    state.wave.phase = WavePhase::Boss;
    let mut events = Vec::new();

    end_boss_phase(&mut state, &mut events);
    state.now = 20_000 + cfg.break_between_waves;
    update(&mut state, &cfg, &mut rng, &mut events);

    assert_eq!(state.wave.phase, WavePhase::Active);
    assert!(events.contains(&GameEvent::WaveStarted { wave: 4 }));
    let cues: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, GameEvent::Music(_)))
        .collect();
    assert_eq!(cues, vec![&GameEvent::Music(MusicCue::Stage(1))]);
}

// ── Factories ─────────────────────────────────────────────────────────────────

#[test]
fn first_stage_only_has_basic_archetypes() {
    let cfg = SimConfig::default();
    let mut rng = StdRng::seed_from_u64(42);
    let state = playing_state(&cfg);
    for _ in 0..500 {
        let class = choose_archetype(&state, &mut rng);
        assert!(matches!(class, EnemyClass::Normal | EnemyClass::Zigzag));
    }
}

#[test]
fn third_stage_unlocks_trackers_and_arcs() {
    let cfg = SimConfig::default();
    let mut rng = StdRng::seed_from_u64(42);
    let mut state = playing_state(&cfg);
    state.wave.current_wave = 7;
    let (mut trackers, mut arcs) = (0, 0);
    for _ in 0..2000 {
        match choose_archetype(&state, &mut rng) {
            EnemyClass::Tracker => trackers += 1,
            EnemyClass::Arc => arcs += 1,
            _ => {}
        }
    }
    // 18 % each on average
    assert!((250..500).contains(&trackers), "trackers: {trackers}");
    assert!((250..500).contains(&arcs), "arcs: {arcs}");
}

#[test]
fn enemies_spawn_above_the_top_edge() {
    let cfg = SimConfig::default();
    let mut rng = StdRng::seed_from_u64(42);
    let state = playing_state(&cfg);
    for _ in 0..200 {
        let enemy = make_enemy(&state, &cfg, EnemyClass::Normal, &mut rng);
        assert_eq!(enemy.y, -40.0);
        assert!(enemy.x >= 0.0 && enemy.x < 760.0);
        // Level 1: 3.3 px/frame ±10 %
        assert!(enemy.speed >= 2.96 && enemy.speed <= 3.64, "speed {}", enemy.speed);
    }
}

#[test]
fn arc_enemy_oscillates_around_spawn_column() {
    let cfg = SimConfig::default();
    let mut rng = StdRng::seed_from_u64(42);
    let mut state = playing_state(&cfg);
    state.now = 777;
    let enemy = make_enemy(&state, &cfg, EnemyClass::Arc, &mut rng);
    match enemy.kind {
        EnemyKind::Arc {
            amplitude,
            base_x,
            spawned_at,
            ..
        } => {
            assert_eq!(base_x, enemy.x);
            assert_eq!(spawned_at, 777);
            assert!((60.0..140.0).contains(&amplitude));
        }
        other => panic!("expected an arc enemy, got {other:?}"),
    }
}

// ── Classic mode ──────────────────────────────────────────────────────────────

#[test]
fn classic_mode_streams_enemies_without_bosses() {
    let cfg = SimConfig {
        spawn_mode: SpawnMode::Classic,
        ..SimConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(42);
    let mut state = playing_state(&cfg);
    let mut events = Vec::new();
    let mut total = 0;

    for step in 0..300 {
        state.now = step * 100;
        update(&mut state, &cfg, &mut rng, &mut events);
        total += state.enemies.len();
        for enemy in &state.enemies {
            assert!(matches!(
                enemy.kind,
                EnemyKind::Normal | EnemyKind::Zigzag { .. }
            ));
        }
        state.enemies.clear();
    }

    assert!(total > 20);
    assert_eq!(state.wave.current_wave, 1);
    assert!(state.boss().is_none());
    assert!(events.is_empty());
}
