//! Transport abstraction between the listener and a MIDI backend.
//!
//! A [`MidiTransport`] enumerates and opens input ports; an [`InputPort`] is a
//! blocking source of decoded events. [`PortGuard`] scopes a port's lifetime and
//! [`Events`] turns it into a lazy iterator.

use std::ops::{Deref, DerefMut};

use crate::error::Result;
use crate::event::MidiEvent;

pub trait MidiTransport {
    type Port: InputPort;

    /// Names of all input ports currently visible to the backend.
    fn list_ports(&self) -> Result<Vec<String>>;

    /// Open the input port identified by `name`.
    ///
    /// Fails with `Error::DeviceNotFound` when nothing matches and with
    /// `Error::DeviceUnavailable` when the port exists but cannot be opened.
    fn open_input(&self, name: &str) -> Result<Self::Port>;
}

pub trait InputPort {
    fn name(&self) -> &str;

    /// Block until the next event arrives.
    ///
    /// `Ok(None)` means the port was closed; `Err(Error::Disconnected)` means
    /// the device went away.
    fn recv(&mut self) -> Result<Option<MidiEvent>>;

    fn close(&mut self);

    fn events(&mut self) -> Events<'_, Self>
    where
        Self: Sized,
    {
        Events::new(self)
    }
}

/// Pick the port a requested device name refers to.
///
/// An exact name wins; otherwise the first name containing `wanted`,
/// ignoring case. Backends decorate names (ALSA reports
/// `Launchpad S:Launchpad S MIDI 1 20:0`), so the loose match is needed.
pub fn match_port_name(available: &[String], wanted: &str) -> Option<usize> {
    if let Some(index) = available.iter().position(|name| name == wanted) {
        return Some(index);
    }
    let wanted = wanted.to_lowercase();
    available
        .iter()
        .position(|name| name.to_lowercase().contains(&wanted))
}

/// Lazy, blocking, non-restartable event sequence.
///
/// Ends when the port closes; yields the first error and then stays exhausted.
pub struct Events<'a, P: InputPort> {
    port: &'a mut P,
    done: bool,
}

impl<'a, P: InputPort> Events<'a, P> {
    pub fn new(port: &'a mut P) -> Self {
        Self { port, done: false }
    }
}

impl<P: InputPort> Iterator for Events<'_, P> {
    type Item = Result<MidiEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.port.recv() {
            Ok(Some(event)) => Some(Ok(event)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<P: InputPort> std::iter::FusedIterator for Events<'_, P> {}

/// Exclusive ownership of an open port; closes it exactly once on drop.
pub struct PortGuard<P: InputPort> {
    port: P,
}

impl<P: InputPort> PortGuard<P> {
    pub fn new(port: P) -> Self {
        Self { port }
    }
}

impl<P: InputPort> Deref for PortGuard<P> {
    type Target = P;

    fn deref(&self) -> &P {
        &self.port
    }
}

impl<P: InputPort> DerefMut for PortGuard<P> {
    fn deref_mut(&mut self) -> &mut P {
        &mut self.port
    }
}

impl<P: InputPort> Drop for PortGuard<P> {
    fn drop(&mut self) {
        tracing::debug!(port = self.port.name(), "closing MIDI input port");
        self.port.close();
    }
}
