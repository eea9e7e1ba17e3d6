//! Error types

use std::fmt;

/// Failures the game can surface
///
/// A collision is not an error: it is the normal end of a session.
#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// Frame input that cannot be applied (non-finite or backwards time)
    InvalidInput { reason: String },
    /// A visual element the game needs is absent from the document
    MissingElement(String),
    /// Spawn interval bounds are inverted or start at zero
    SpawnRangeInvalid { min: u32, max: u32 },
}

impl GameError {
    /// Whether the game can keep running after this error
    pub fn is_fatal(&self) -> bool {
        !matches!(self, GameError::InvalidInput { .. })
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidInput { reason } => write!(f, "invalid frame input: {}", reason),
            GameError::MissingElement(selector) => {
                write!(f, "required element not found: {}", selector)
            }
            GameError::SpawnRangeInvalid { min, max } => {
                write!(f, "invalid spawn interval range [{}, {}]", min, max)
            }
        }
    }
}

impl std::error::Error for GameError {}
