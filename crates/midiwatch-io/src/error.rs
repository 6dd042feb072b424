//! Error types for the MIDI input subsystem.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No MIDI input port matching '{name}' (available: {available:?})")]
    DeviceNotFound { name: String, available: Vec<String> },

    #[error("MIDI input port '{name}' could not be opened: {reason}")]
    DeviceUnavailable { name: String, reason: String },

    #[error("MIDI input port '{name}' disconnected")]
    Disconnected { name: String },

    #[error("MIDI backend error: {0}")]
    Backend(String),

    #[error("MIDI decode error: {0}")]
    Decode(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Listener already closed")]
    AlreadyClosed,
}

impl From<midly::Error> for Error {
    fn from(e: midly::Error) -> Self {
        Error::Decode(e.to_string())
    }
}

#[cfg(feature = "midi-io")]
impl From<midir::InitError> for Error {
    fn from(e: midir::InitError) -> Self {
        Error::Backend(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
