/// Effects produced by a simulation step.
///
/// Each step returns these in the order they happened. The front end
/// forwards sound and music cues to the audio collaborator and persists the
/// score on [`GameEvent::RunEnded`]; none of them feed back into the state.

use crate::entities::{EnemyKind, PowerUpKind, Weapon};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundCue {
    Shot(Weapon),
    Explosion,
    PowerUp,
    ComboUp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MusicCue {
    Stage(u32),
    Boss,
    FinalBoss,
}

/// Coarse enemy class for events, without the per-kind movement state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyClass {
    Normal,
    Zigzag,
    Arc,
    Tracker,
    Boss,
}

impl From<&EnemyKind> for EnemyClass {
    fn from(kind: &EnemyKind) -> Self {
        match kind {
            EnemyKind::Normal => EnemyClass::Normal,
            EnemyKind::Zigzag { .. } => EnemyClass::Zigzag,
            EnemyKind::Arc { .. } => EnemyClass::Arc,
            EnemyKind::Tracker { .. } => EnemyClass::Tracker,
            EnemyKind::Boss(_) => EnemyClass::Boss,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    Sound(SoundCue),
    Music(MusicCue),
    RunStarted,
    WaveStarted { wave: u32 },
    WaveCleared { wave: u32 },
    BossIncoming { wave: u32 },
    BossSpawned { is_final: bool },
    BossDamaged { health: u32, max_health: u32 },
    BossDefeated { wave: u32, points: u64 },
    EnemyDestroyed { class: EnemyClass, x: f32, y: f32, points: u64 },
    MultiplierUp { multiplier: u32 },
    PowerUpDropped { kind: PowerUpKind },
    PowerUpCollected { kind: PowerUpKind },
    ShieldAbsorbed,
    PlayerDamaged { lives: u8 },
    RunEnded { score: u64, new_high_score: bool },
    Paused,
    Resumed,
}
