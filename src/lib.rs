/// Arcade shoot-'em-up simulation core.
///
/// The library owns every rule of the game: entity stores, the wave
/// director, movement, collision resolution, scoring and the top-level
/// state machine. It performs no terminal or audio I/O; each step returns
/// a list of [`events::GameEvent`]s for the front end to act on.

pub mod collision;
pub mod compute;
pub mod config;
pub mod constants;
pub mod difficulty;
pub mod entities;
pub mod error;
pub mod events;
pub mod highscore;
pub mod movement;
pub mod player;
pub mod scoring;
pub mod spawner;
