//! # midiwatch
//!
//! Listens to one MIDI controller and prints every incoming message, one line
//! per event, until interrupted.
//!
//! ## Architecture
//!
//! midiwatch is an umbrella crate over:
//! - **midiwatch-io** - event decoding, transport traits, midir backend, listener
//!
//! and adds the process glue: logging setup and Ctrl-C driven shutdown.
//!
//! ## Quick Start
//!
//! ```ignore
//! use midiwatch::prelude::*;
//!
//! let config = ListenerConfig::default(); // "Launchpad S"
//! let (trigger, shutdown) = shutdown_channel();
//! let transport = MidirTransport::new(&config).with_shutdown(shutdown);
//! midiwatch::run_until_ctrl_c(transport, config, trigger).await?;
//! ```
//!
//! ## Feature Flags
//!
//! - `default` - hardware input
//! - `midi-hardware` - midir-backed ports

/// Re-export of midiwatch-io for direct access
pub use midiwatch_io as io;

pub use midiwatch_io::{
    shutdown_channel, EventListener, InputPort, ListenerConfig, ListenerState, MidiEvent,
    MidiMessage, MidiTransport, Shutdown, ShutdownTrigger, STATUS_LINE,
};

#[cfg(feature = "midi-hardware")]
pub use midiwatch_io::{MidiInputDevice, MidirTransport};

mod error;
pub use error::{Error, Result};

mod runner;
pub use runner::{run_until, run_until_ctrl_c};

mod logging;
pub use logging::init_logging;

pub mod prelude {
    pub use crate::{
        shutdown_channel, EventListener, ListenerConfig, MidiEvent, MidiMessage, Result,
    };

    #[cfg(feature = "midi-hardware")]
    pub use crate::MidirTransport;
}
