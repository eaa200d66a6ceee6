/// Error types for the I/O edges of the game.
///
/// The simulation itself never fails: out-of-range numbers are clamped and
/// entity kinds are sum types. Only loading configuration, persisting the
/// high score and playing sound cues can go wrong, and every caller in the
/// binary recovers locally from these.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A value parsed fine but is outside the range the simulation accepts.
    #[error("config value `{field}` = {value} is invalid: expected {expected}")]
    Invalid {
        field: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error("failed to read high score from {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("high score file {path} does not contain a number: {contents:?}")]
    Corrupt { path: PathBuf, contents: String },

    #[error("failed to write high score to {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio output unavailable: {0}")]
    Unavailable(#[from] std::io::Error),
}
