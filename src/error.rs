//! Centralized error type for the midi-message umbrella crate.
//!
//! Wraps the codec's errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Encode: {0}")]
    Encode(#[from] midi_message_core::EncodeError),

    #[error("Config: {0}")]
    Config(#[from] midi_message_core::ControllerOverrideError),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Raw input that is not a 1-3 byte message.
    #[error("Invalid frame length: {0} bytes (expected 1-3)")]
    FrameLength(usize),
}

impl Error {
    /// The encode error behind this error, if any.
    pub fn as_encode(&self) -> Option<&midi_message_core::EncodeError> {
        match self {
            Error::Encode(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
