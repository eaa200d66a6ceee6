mod audio;
mod display;

use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
    ExecutableCommand,
};
use rand::thread_rng;
use tracing::{info, warn};
use tracing_subscriber::filter::EnvFilter;

use arcade_shooter::compute::Simulation;
use arcade_shooter::config::SimConfig;
use arcade_shooter::entities::{GameStatus, PlayerIntent};
use arcade_shooter::events::GameEvent;
use arcade_shooter::highscore::HighScoreFile;

use crate::audio::TerminalAudio;

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// Longest frame delta fed to the simulation, so a stalled terminal does
/// not fast-forward every timer at once.
const MAX_FRAME_DELTA_MS: u64 = 50;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events.
const HOLD_WINDOW: u64 = 8;

const DEFAULT_CONFIG_PATH: &str = "arcade_shooter.toml";

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

// ── Ambient setup ─────────────────────────────────────────────────────────────

/// Log to a file: the terminal itself is busy drawing the game.
fn init_logging() {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let path = PathBuf::from(home).join(".arcade_shooter.log");
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

fn load_config() -> SimConfig {
    let path = std::env::var("ARCADE_SHOOTER_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
    if !path.exists() {
        info!(path = %path.display(), "no config file; using compiled defaults");
        return SimConfig::default();
    }
    match SimConfig::load(&path) {
        Ok(config) => {
            info!(path = %path.display(), "loaded config");
            config
        }
        Err(err) => {
            warn!(error = %err, "config rejected; using compiled defaults");
            SimConfig::default()
        }
    }
}

// ── Effects ───────────────────────────────────────────────────────────────────

fn dispatch<W: Write>(
    out: &mut W,
    events: Vec<GameEvent>,
    audio: &TerminalAudio,
    scores: &HighScoreFile,
) {
    for event in events {
        match event {
            GameEvent::Sound(cue) => {
                // Best effort: a failed cue never interrupts the game.
                let _ = audio.play(out, cue);
            }
            GameEvent::Music(cue) => audio.music(cue),
            GameEvent::RunEnded { score, .. } => match scores.save_if_higher(score) {
                Ok(true) => info!(score, "new high score saved"),
                Ok(false) => {}
                Err(err) => warn!(error = %err, "could not save high score"),
            },
            _ => {}
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: instead of acting on each key event individually, we maintain
/// a `key_frame` map that records the frame number of the last press/repeat
/// event for every key. Each frame the still-fresh keys become one
/// [`PlayerIntent`] snapshot, so fire and movement can be held together.
/// One-shot keys (pause, restart, volume, quit) act on press.
fn game_loop<W: Write>(
    out: &mut W,
    sim: &mut Simulation,
    rx: &mpsc::Receiver<Event>,
    scores: &HighScoreFile,
) -> std::io::Result<()> {
    let mut rng = thread_rng();
    let mut audio = TerminalAudio::new(audio::MAX_VOLUME / 2);

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(event) = rx.try_recv() {
            // Resize and focus events are picked up by the next render.
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = event else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        KeyCode::Char('p') | KeyCode::Char('P') => {
                            let events = sim.on_pause_toggle();
                            dispatch(out, events, &audio, scores);
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') => sim.on_restart(),
                        KeyCode::Char('+') | KeyCode::Char('=') => audio.volume_up(),
                        KeyCode::Char('-') => audio.volume_down(),
                        KeyCode::Char(' ') | KeyCode::Enter
                            if sim.state().status == GameStatus::Title =>
                        {
                            let events = sim.start();
                            dispatch(out, events, &audio, scores);
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Held keys → intent snapshot ───────────────────────────────────────
        let intent = PlayerIntent {
            left: any_held(&key_frame, &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')], frame),
            right: any_held(&key_frame, &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')], frame),
            up: any_held(&key_frame, &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')], frame),
            down: any_held(&key_frame, &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')], frame),
            fire: is_held(&key_frame, &KeyCode::Char(' '), frame),
        };
        sim.apply_player_intent(intent);

        let dt = (last_frame.elapsed().as_millis() as u64).min(MAX_FRAME_DELTA_MS);
        last_frame = Instant::now();
        let events = sim.step(dt, &mut rng);
        dispatch(out, events, &audio, scores);

        display::render(out, sim.state(), audio.volume())?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    init_logging();
    let config = load_config();
    let scores = HighScoreFile::default_location();
    let high_score = scores.load().unwrap_or_else(|err| {
        warn!(error = %err, "ignoring unreadable high score");
        0
    });
    let mut sim = Simulation::new(config, high_score);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &mut sim, &rx, &scores);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
