//! MIDI input subsystem for midiwatch.
//!
//! Opens one input port, decodes what it delivers and writes each event as a
//! line of text.
//!
//! Feature gates: `midi-io` (hardware ports via midir).
//!
//! # Example
//!
//! ```ignore
//! use midiwatch_io::{EventListener, ListenerConfig, MidirTransport};
//!
//! let config = ListenerConfig::builder().device_name("Launchpad S").build()?;
//! let transport = MidirTransport::new(&config);
//! EventListener::new(transport, config).run(&mut std::io::stdout())?;
//! ```

pub mod error;
pub use error::{Error, Result};

mod config;
pub use config::{ListenerConfig, ListenerConfigBuilder, DEFAULT_DEVICE_NAME};

pub(crate) mod event;
pub use event::{MidiEvent, MidiMessage};

pub mod transport;
pub use transport::{match_port_name, Events, InputPort, MidiTransport, PortGuard};

mod listener;
pub use listener::{EventListener, ListenerState, STATUS_LINE};

mod shutdown;
pub use shutdown::{shutdown_channel, Shutdown, ShutdownTrigger};

#[cfg_attr(not(feature = "midi-io"), allow(dead_code))]
mod inbox;

#[cfg(feature = "midi-io")]
pub(crate) mod io;

#[cfg(feature = "midi-io")]
pub use io::{MidiInputDevice, MidirInputPort, MidirTransport};
