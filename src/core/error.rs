//! Error types for chunkgrid

use thiserror::Error;

use crate::world::entity::EntityId;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Entity {0} is already placed")]
    AlreadyPlaced(EntityId),
}
