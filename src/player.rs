/// Player state machine: movement, shooting, pickups and damage.
///
/// The four timed windows on [`Player`] (invulnerability, shield, rapid
/// fire, weapon) are independent; each is active while `now` is below its
/// deadline.

use crate::config::SimConfig;
use crate::constants::*;
use crate::entities::{Bullet, BulletKind, Player, PlayerIntent, PowerUpKind, Weapon};
use crate::events::{GameEvent, SoundCue};

/// Move the ship by one frame of held directions, clamped to the playfield.
pub fn apply_intent(player: &mut Player, intent: &PlayerIntent, width: f32, height: f32) {
    if intent.left {
        player.x -= player.speed;
    }
    if intent.right {
        player.x += player.speed;
    }
    if intent.up {
        player.y -= player.speed;
    }
    if intent.down {
        player.y += player.speed;
    }
    player.x = player.x.clamp(0.0, (width - player.width).max(0.0));
    player.y = player.y.clamp(0.0, (height - player.height).max(0.0));
}

/// Weapon currently in hand; reverts to the default once the window lapses.
pub fn current_weapon(player: &mut Player, now: u64) -> Weapon {
    if player.weapon != Weapon::Default && !player.weapon_effect.is_active(now) {
        player.weapon = Weapon::Default;
    }
    player.weapon
}

pub fn shot_cooldown(cfg: &SimConfig, weapon: Weapon, rapid: bool) -> u64 {
    let base = match weapon {
        Weapon::Default => cfg.shot_cooldown,
        Weapon::Laser => cfg.laser_cooldown,
        Weapon::Missile => cfg.missile_cooldown,
    };
    if rapid {
        base / RAPID_FIRE_DIVISOR
    } else {
        base
    }
}

/// Fire if the weapon's cooldown has elapsed. Returns the new bullet(s).
pub fn try_shoot(
    player: &mut Player,
    cfg: &SimConfig,
    now: u64,
    events: &mut Vec<GameEvent>,
) -> Vec<Bullet> {
    let weapon = current_weapon(player, now);
    let cooldown = shot_cooldown(cfg, weapon, player.rapid_fire.is_active(now));
    if let Some(last) = player.last_shot_at {
        if now.saturating_sub(last) < cooldown {
            return Vec::new();
        }
    }
    player.last_shot_at = Some(now);
    events.push(GameEvent::Sound(SoundCue::Shot(weapon)));

    let center_x = player.x + player.width / 2.0;
    let (width, height, speed, kind) = match weapon {
        Weapon::Default => (BULLET_WIDTH, BULLET_HEIGHT, BULLET_SPEED, BulletKind::Normal),
        Weapon::Laser => (
            LASER_WIDTH,
            LASER_HEIGHT,
            LASER_SPEED,
            BulletKind::Laser {
                pierce_remaining: LASER_PIERCE,
            },
        ),
        Weapon::Missile => (
            MISSILE_WIDTH,
            MISSILE_HEIGHT,
            MISSILE_SPEED,
            BulletKind::Missile { vx: 0.0 },
        ),
    };
    vec![Bullet {
        x: center_x - width / 2.0,
        y: player.y - height,
        width,
        height,
        speed,
        kind,
    }]
}

/// Apply a collected power-up. Timed windows stack on what is left; a
/// different weapon replaces the current weapon window.
pub fn apply_power_up(player: &mut Player, cfg: &SimConfig, kind: PowerUpKind, now: u64) {
    match kind {
        PowerUpKind::RapidFire => player.rapid_fire.extend(now, cfg.rapid_fire_duration),
        PowerUpKind::Shield => {
            player.shield.extend(now, cfg.shield_duration);
            player.invulnerable.extend(now, SHIELD_PICKUP_GRACE);
        }
        PowerUpKind::Life => player.lives = (player.lives + 1).min(PLAYER_MAX_LIVES),
        PowerUpKind::Laser => equip(player, Weapon::Laser, cfg.weapon_duration, now),
        PowerUpKind::Missile => equip(player, Weapon::Missile, cfg.weapon_duration, now),
    }
}

fn equip(player: &mut Player, weapon: Weapon, duration: u64, now: u64) {
    if current_weapon(player, now) == weapon {
        player.weapon_effect.extend(now, duration);
    } else {
        player.weapon = weapon;
        player.weapon_effect.restart(now, duration);
    }
}

/// Take one unmitigated hit. Returns the remaining lives.
pub fn take_damage(player: &mut Player, cfg: &SimConfig, now: u64) -> u8 {
    player.lives = player.lives.saturating_sub(1);
    player.invulnerable.restart(now, cfg.invulnerable_time);
    player.lives
}
