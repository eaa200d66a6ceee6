/// Audio collaborator: fire-and-forget cues rendered as terminal bells.
///
/// The terminal has no synthesiser, so only the loud cues ring the bell.
/// Failures are returned to the caller, which ignores them.

use std::io::Write;

use arcade_shooter::error::AudioError;
use arcade_shooter::events::{MusicCue, SoundCue};
use tracing::debug;

pub const MAX_VOLUME: u8 = 10;

pub struct TerminalAudio {
    volume: u8,
}

impl TerminalAudio {
    pub fn new(volume: u8) -> Self {
        TerminalAudio {
            volume: volume.min(MAX_VOLUME),
        }
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn volume_up(&mut self) {
        self.volume = (self.volume + 1).min(MAX_VOLUME);
    }

    pub fn volume_down(&mut self) {
        self.volume = self.volume.saturating_sub(1);
    }

    pub fn play<W: Write>(&self, out: &mut W, cue: SoundCue) -> Result<(), AudioError> {
        if self.volume == 0 {
            return Ok(());
        }
        match cue {
            SoundCue::Explosion | SoundCue::PowerUp => {
                out.write_all(b"\x07")?;
            }
            // Too frequent for a bell.
            SoundCue::Shot(_) | SoundCue::ComboUp => {}
        }
        Ok(())
    }

    pub fn music(&self, cue: MusicCue) {
        debug!(?cue, "background theme changed");
    }
}
