//! Hand-off of raw bytes from a backend callback to the listener thread.
//!
//! The callback side only sends [`RawMessage`]s; [`next_event`] decodes them
//! and turns channel hangup, device removal and shutdown into port results.

use std::time::Duration;

use crossbeam_channel::{never, select, Receiver};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::event::MidiEvent;
use crate::shutdown::Shutdown;

/// Bytes exactly as the backend delivered them.
pub(crate) struct RawMessage {
    pub timestamp: u64,
    pub bytes: Vec<u8>,
}

enum Wake {
    Message(RawMessage),
    Hangup,
    Shutdown,
    Idle,
}

/// Block until the next decodable event.
///
/// Undecodable bytes are skipped. Every `poll` without traffic asks
/// `still_present`; a vanished port or a dropped sender is `Disconnected`.
/// A fired `shutdown` yields `Ok(None)`.
pub(crate) fn next_event(
    port: &str,
    inbox: &Receiver<RawMessage>,
    shutdown: Option<&Shutdown>,
    poll: Duration,
    mut still_present: impl FnMut() -> bool,
) -> Result<Option<MidiEvent>> {
    let idle = never();
    let stop = shutdown.map_or(&idle, |s| s.receiver());

    loop {
        let wake = select! {
            recv(inbox) -> msg => msg.map_or(Wake::Hangup, Wake::Message),
            recv(stop) -> _ => Wake::Shutdown,
            default(poll) => Wake::Idle,
        };

        match wake {
            Wake::Message(raw) => match MidiEvent::from_bytes(raw.timestamp, &raw.bytes) {
                Ok(event) => return Ok(Some(event)),
                Err(e) => {
                    debug!(bytes = ?raw.bytes, error = %e, "skipping undecodable MIDI bytes")
                }
            },
            Wake::Hangup => return Err(disconnected(port)),
            Wake::Shutdown => {
                debug!(port, "shutdown while waiting for MIDI");
                return Ok(None);
            }
            Wake::Idle => {
                if !still_present() {
                    warn!(port, "MIDI input port vanished");
                    return Err(disconnected(port));
                }
            }
        }
    }
}

fn disconnected(port: &str) -> Error {
    Error::Disconnected {
        name: port.to_string(),
    }
}
