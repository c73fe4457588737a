//! setup‑time failures; nothing in the turn loop returns these
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("config {path} must be a JSON object at the top level")]
    NotAnObject { path: PathBuf },
    #[error("merged config does not match the expected layout: {0}")]
    Layout(#[source] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("surface floor has no passable tile to spawn the player on")]
    NoSpawnTile,
}
