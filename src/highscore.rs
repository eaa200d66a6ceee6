/// High-score persistence: a single non-negative integer in a text file.

use std::path::{Path, PathBuf};

use crate::error::HighScoreError;

#[derive(Clone, Debug)]
pub struct HighScoreFile {
    path: PathBuf,
}

impl HighScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        HighScoreFile { path: path.into() }
    }

    /// `$HOME/.arcade_shooter_score`, or the working directory without a home.
    pub fn default_location() -> Self {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        Self::new(PathBuf::from(home).join(".arcade_shooter_score"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored score; a missing file means no score yet.
    pub fn load(&self) -> Result<u64, HighScoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(source) => {
                return Err(HighScoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        match contents.trim().parse() {
            Ok(score) => Ok(score),
            Err(_) => Err(HighScoreError::Corrupt {
                path: self.path.clone(),
                contents,
            }),
        }
    }

    /// Persist `score` if it beats what is stored. Returns whether it did.
    pub fn save_if_higher(&self, score: u64) -> Result<bool, HighScoreError> {
        let stored = self.load().unwrap_or(0);
        if score <= stored {
            return Ok(false);
        }
        std::fs::write(&self.path, score.to_string()).map_err(|source| HighScoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        Ok(true)
    }
}
