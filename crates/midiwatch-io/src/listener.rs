//! Event listener: open one input port and print every event it delivers.

use std::io::Write;

use tracing::{debug, info, trace};

use crate::config::ListenerConfig;
use crate::error::{Error, Result};
use crate::transport::{InputPort, MidiTransport, PortGuard};

/// Written once the port is open, before the first event.
pub const STATUS_LINE: &str = "Listening for MIDI...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerState {
    Closed,
    Listening,
}

/// Pass-through from a MIDI input port to a text stream.
///
/// Runs once: after the listening loop ends the listener stays `Closed` and
/// [`run`](Self::run) fails with `Error::AlreadyClosed`.
pub struct EventListener<T: MidiTransport> {
    transport: T,
    config: ListenerConfig,
    state: ListenerState,
    finished: bool,
}

impl<T: MidiTransport> EventListener<T> {
    pub fn new(transport: T, config: ListenerConfig) -> Self {
        Self {
            transport,
            config,
            state: ListenerState::Closed,
            finished: false,
        }
    }

    pub fn state(&self) -> ListenerState {
        self.state
    }

    pub fn config(&self) -> &ListenerConfig {
        &self.config
    }

    /// Open the configured port and write one line per event to `out`.
    ///
    /// Returns `Ok(())` only when the port reports it was closed. Open
    /// failures return before anything is written.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<()> {
        if self.finished {
            return Err(Error::AlreadyClosed);
        }

        let device = self.config.device_name.as_str();
        let port = self.transport.open_input(device)?;
        let mut port = PortGuard::new(port);

        self.state = ListenerState::Listening;
        info!(device, port = port.name(), "MIDI input port open");

        let result = pump(&mut *port, out);
        drop(port);

        self.state = ListenerState::Closed;
        self.finished = true;

        match &result {
            Ok(count) => info!(events = count, "MIDI input port closed"),
            Err(e) => debug!(error = %e, "listening loop failed"),
        }
        result.map(|_| ())
    }
}

fn pump<P: InputPort, W: Write>(port: &mut P, out: &mut W) -> Result<u64> {
    writeln!(out, "{}", STATUS_LINE)?;
    out.flush()?;

    let mut count = 0u64;
    for event in port.events() {
        let event = event?;
        trace!(timestamp_us = event.timestamp_us, "MIDI event");
        writeln!(out, "{}", event)?;
        out.flush()?;
        count += 1;
    }
    Ok(count)
}
