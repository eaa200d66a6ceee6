/// Rendering layer. All terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// simulation state. No game logic is performed; this module only maps the
/// pixel playfield onto terminal cells and translates state into terminal
/// commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use arcade_shooter::entities::{
    Bullet, BulletKind, Enemy, EnemyBullet, EnemyKind, GameStatus, PowerUp, PowerUpKind,
    SimulationState, Weapon,
};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_COMBO: Color = Color::Magenta;
const C_PLAYER: Color = Color::White;
const C_SHIELD: Color = Color::Cyan;
const C_ENEMY_NORMAL: Color = Color::Red;
const C_ENEMY_ZIGZAG: Color = Color::Magenta;
const C_ENEMY_ARC: Color = Color::Green;
const C_ENEMY_TRACKER: Color = Color::DarkYellow;
const C_BOSS: Color = Color::DarkRed;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_EXPLOSION: Color = Color::DarkYellow;
const C_HINT: Color = Color::DarkGrey;

/// Maps playfield pixels onto the bordered terminal area.
struct Viewport {
    cols: u16,
    rows: u16,
    scale_x: f32,
    scale_y: f32,
}

impl Viewport {
    fn new(state: &SimulationState) -> std::io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        let inner_w = cols.saturating_sub(2).max(1) as f32;
        let inner_h = rows.saturating_sub(4).max(1) as f32;
        Ok(Viewport {
            cols,
            rows,
            scale_x: inner_w / state.width,
            scale_y: inner_h / state.height,
        })
    }

    /// Terminal cell for a playfield point, or `None` when off-screen.
    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let col = 1 + (x * self.scale_x) as u16;
        let row = 2 + (y * self.scale_y) as u16;
        if col >= self.cols.saturating_sub(1) || row >= self.rows.saturating_sub(2) {
            return None;
        }
        Some((col, row))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &SimulationState, volume: u8) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let view = Viewport::new(state)?;

    draw_border(out, &view)?;

    if state.status == GameStatus::Title {
        draw_title(out, &view, state)?;
    } else {
        draw_hud(out, &view, state, volume)?;
        for explosion in &state.explosions {
            let glyph = if explosion.progress(state.now) < 0.5 { "✸" } else { "·" };
            put(out, &view, explosion.x, explosion.y, glyph, C_EXPLOSION)?;
        }
        for particle in &state.particles {
            put(out, &view, particle.x, particle.y, ".", C_EXPLOSION)?;
        }
        for enemy in &state.enemies {
            draw_enemy(out, &view, enemy)?;
        }
        for power_up in &state.power_ups {
            draw_power_up(out, &view, power_up)?;
        }
        for bullet in &state.bullets {
            draw_bullet(out, &view, bullet)?;
        }
        for bullet in &state.enemy_bullets {
            draw_enemy_bullet(out, &view, bullet)?;
        }
        draw_player(out, &view, state)?;
        draw_announcement(out, &view, state)?;

        match state.status {
            GameStatus::Paused => draw_banner(out, &view, &[("PAUSED", Color::White), ("P - Resume", C_HINT)])?,
            GameStatus::GameOver => draw_game_over(out, &view, state)?,
            GameStatus::Title | GameStatus::Playing => {}
        }
    }
    draw_controls_hint(out, &view)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn put<W: Write>(
    out: &mut W,
    view: &Viewport,
    x: f32,
    y: f32,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    if let Some((col, row)) = view.cell(x, y) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

fn centered<W: Write>(
    out: &mut W,
    view: &Viewport,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = (view.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1: top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2: bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    view: &Viewport,
    state: &SimulationState,
    volume: u8,
) -> std::io::Result<()> {
    let now = state.now;

    // Left: score and high score
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    let best = state.high_score.max(state.scoring.score);
    out.queue(Print(format!(
        "Score:{:>7}  Hi:{:>7}",
        state.scoring.score, best
    )))?;

    // Combo, after the score
    out.queue(style::SetForegroundColor(C_HUD_COMBO))?;
    out.queue(Print(format!(
        "  x{} ({})",
        state.scoring.multiplier, state.scoring.combo_count
    )))?;

    // Centre: wave or boss health
    let wave_str = match state.boss() {
        Some(Enemy {
            kind: EnemyKind::Boss(boss),
            ..
        }) if state.wave.is_boss_phase() => format!("[ BOSS {}/{} ]", boss.health, boss.max_health),
        _ if !state.wave.is_wave_active() => {
            format!("[ WAVE {} · GET READY ]", state.wave.current_wave)
        }
        _ => format!(
            "[ WAVE {} · {}/{} ]",
            state.wave.current_wave,
            state.wave.enemies_destroyed,
            state.wave.enemies_spawned
        ),
    };
    centered(out, view, 0, &wave_str, Color::White)?;

    // Right: active effects and lives
    let mut tags = String::new();
    if state.player.shield.is_active(now) {
        tags.push_str(&format!("[SHD {:>2}s] ", state.player.shield.remaining(now) / 1000 + 1));
    }
    if state.player.rapid_fire.is_active(now) {
        tags.push_str(&format!("[RPD {:>2}s] ", state.player.rapid_fire.remaining(now) / 1000 + 1));
    }
    if state.player.weapon != Weapon::Default && state.player.weapon_effect.is_active(now) {
        let name = match state.player.weapon {
            Weapon::Laser => "LSR",
            Weapon::Missile => "MSL",
            Weapon::Default => "",
        };
        tags.push_str(&format!(
            "[{} {:>2}s] ",
            name,
            state.player.weapon_effect.remaining(now) / 1000 + 1
        ));
    }
    let hearts: String = "♥".repeat(state.player.lives as usize);
    let right_str = format!("{}Vol:{:>2} Lives:{}", tags, volume, hearts);
    let rx = view
        .cols
        .saturating_sub(right_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&right_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, view: &Viewport, state: &SimulationState) -> std::io::Result<()> {
    let p = &state.player;
    let now = state.now;
    // Blink while invulnerable
    if p.invulnerable.is_active(now) && (now / 100) % 2 == 0 {
        return Ok(());
    }
    let color = if p.shield.is_active(now) { C_SHIELD } else { C_PLAYER };
    let cx = p.x + p.width / 2.0;
    put(out, view, cx, p.y, "▲", color)?;
    if let Some((col, row)) = view.cell(cx, p.y + p.height) {
        out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print("/█\\"))?;
    }
    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, view: &Viewport, enemy: &Enemy) -> std::io::Result<()> {
    let cx = enemy.x + enemy.width / 2.0;
    let cy = enemy.y + enemy.height / 2.0;
    let (glyph, color) = match &enemy.kind {
        EnemyKind::Normal => ("«▼»", C_ENEMY_NORMAL),
        EnemyKind::Zigzag { .. } => ("<◆>", C_ENEMY_ZIGZAG),
        EnemyKind::Arc { .. } => ("(◎)", C_ENEMY_ARC),
        EnemyKind::Tracker { .. } => ("[✚]", C_ENEMY_TRACKER),
        EnemyKind::Boss(boss) if boss.is_final => ("╔══◉◉◉══╗", C_BOSS),
        EnemyKind::Boss(_) => ("╔═◉◉═╗", C_BOSS),
    };
    let half = glyph.chars().count() as f32 / 2.0 / view.scale_x;
    put(out, view, cx - half, cy, glyph, color)
}

fn draw_bullet<W: Write>(out: &mut W, view: &Viewport, bullet: &Bullet) -> std::io::Result<()> {
    let glyph = match bullet.kind {
        BulletKind::Normal => "║",
        BulletKind::Laser { .. } => "┃",
        BulletKind::Missile { .. } => "⇡",
    };
    put(out, view, bullet.x + bullet.width / 2.0, bullet.y, glyph, C_BULLET_PLAYER)
}

fn draw_enemy_bullet<W: Write>(out: &mut W, view: &Viewport, bullet: &EnemyBullet) -> std::io::Result<()> {
    let (cx, cy) = (bullet.x + bullet.width / 2.0, bullet.y + bullet.height / 2.0);
    put(out, view, cx, cy, "•", C_BULLET_ENEMY)
}

/// Symbols:
///   R (cyan): rapid fire
///   S (blue): shield
///   ♥ (magenta): extra life
///   L (yellow): laser
///   M (red): missiles
fn draw_power_up<W: Write>(out: &mut W, view: &Viewport, power_up: &PowerUp) -> std::io::Result<()> {
    let (glyph, color) = match power_up.kind {
        PowerUpKind::RapidFire => ("R", Color::Cyan),
        PowerUpKind::Shield => ("S", Color::Blue),
        PowerUpKind::Life => ("♥", Color::Magenta),
        PowerUpKind::Laser => ("L", Color::Yellow),
        PowerUpKind::Missile => ("M", Color::Red),
    };
    let half = power_up.size / 2.0;
    put(out, view, power_up.x + half, power_up.y + half, glyph, color)
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_announcement<W: Write>(out: &mut W, view: &Viewport, state: &SimulationState) -> std::io::Result<()> {
    if let Some(announcement) = &state.announcement {
        centered(out, view, view.rows / 3, &announcement.text, Color::Yellow)?;
    }
    Ok(())
}

fn draw_banner<W: Write>(out: &mut W, view: &Viewport, lines: &[(&str, Color)]) -> std::io::Result<()> {
    let start = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (text, color)) in lines.iter().enumerate() {
        centered(out, view, start + i as u16, text, *color)?;
    }
    Ok(())
}

fn draw_title<W: Write>(out: &mut W, view: &Viewport, state: &SimulationState) -> std::io::Result<()> {
    let best = format!("Best Score: {}", state.high_score);
    draw_banner(
        out,
        view,
        &[
            ("★  STAR  BARRAGE  ★", Color::Cyan),
            ("", Color::White),
            (best.as_str(), Color::Yellow),
            ("", Color::White),
            ("SPACE / ENTER - Start", Color::White),
            ("R rapid  S shield  ♥ life  L laser  M missile", C_HINT),
        ],
    )
}

fn draw_game_over<W: Write>(out: &mut W, view: &Viewport, state: &SimulationState) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:>7}", state.scoring.score);
    let wave_line = format!("Reached wave {}", state.wave.current_wave);
    let new_best = state.is_new_high_score();
    let best_line = if new_best {
        format!("★ NEW BEST: {:>7} ★", state.high_score)
    } else {
        format!("Best Score:  {:>7}", state.high_score)
    };
    draw_banner(
        out,
        view,
        &[
            ("╔════════════════════╗", Color::Red),
            ("║    GAME  OVER      ║", Color::Red),
            ("╚════════════════════╝", Color::Red),
            (score_line.as_str(), Color::Yellow),
            (wave_line.as_str(), Color::White),
            (best_line.as_str(), if new_best { Color::Yellow } else { Color::DarkGrey }),
            ("R - Title  Q - Quit", Color::White),
        ],
    )
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("Arrows/WASD: Move  SPACE: Fire  P: Pause  +/-: Volume  Q: Quit"))?;
    Ok(())
}
