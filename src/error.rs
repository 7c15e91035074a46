//! Errors raised while assembling a puzzle configuration.
//!
//! Searching never fails: an exhausted search is reported through
//! [`crate::search::Termination`], not through this type.

use thiserror::Error;

/// A configuration that cannot be handed to the engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("the knight has not been placed")]
    MissingStart,

    #[error("key {} has not been placed", .0 + 1)]
    MissingKey(usize),

    #[error("the door has not been placed")]
    MissingDoor,

    #[error("key slot {0} does not exist (slots are 0, 1 and 2)")]
    InvalidKeySlot(usize),

    #[error("invalid square {0:?}: row/col must be integers between 0 and 7")]
    InvalidCoordinate(String),

    #[error("unknown preset {0:?}")]
    UnknownPreset(String),
}
