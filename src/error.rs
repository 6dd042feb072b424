//! Centralized error type for the midiwatch umbrella crate.
//!
//! Wraps subsystem errors so `?` propagates naturally up to `main`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Midi(#[from] midiwatch_io::Error),

    #[error("Listener task: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
