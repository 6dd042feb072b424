//! MIDI input over midir.
//!
//! The midir callback runs on the backend's thread and only forwards raw bytes
//! into a channel; decoding happens on the thread calling `recv`.

use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver};
use midir::{Ignore, MidiInput, MidiInputConnection, MidiInputPort};
use tracing::debug;

use crate::config::ListenerConfig;
use crate::error::{Error, Result};
use crate::event::MidiEvent;
use crate::inbox::{next_event, RawMessage};
use crate::shutdown::Shutdown;
use crate::transport::{match_port_name, InputPort, MidiTransport};

/// Information about an available MIDI input device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiInputDevice {
    /// Position in the backend's port list
    pub index: usize,
    pub name: String,
}

/// Hardware transport backed by the platform MIDI API.
pub struct MidirTransport {
    client_name: String,
    disconnect_poll: Duration,
    shutdown: Option<Shutdown>,
}

impl MidirTransport {
    pub fn new(config: &ListenerConfig) -> Self {
        Self {
            client_name: config.client_name.clone(),
            disconnect_poll: config.disconnect_poll,
            shutdown: None,
        }
    }

    /// Ports opened afterwards report closure once `shutdown` fires.
    pub fn with_shutdown(mut self, shutdown: Shutdown) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    pub fn list_devices(&self) -> Result<Vec<MidiInputDevice>> {
        let input = self.client("list")?;
        Ok(device_list(&input))
    }

    fn client(&self, role: &str) -> Result<MidiInput> {
        let mut input = MidiInput::new(&format!("{}-{}", self.client_name, role))?;
        input.ignore(Ignore::None);
        Ok(input)
    }
}

fn device_list(input: &MidiInput) -> Vec<MidiInputDevice> {
    describe(input, &input.ports())
}

fn describe(input: &MidiInput, ports: &[MidiInputPort]) -> Vec<MidiInputDevice> {
    ports
        .iter()
        .enumerate()
        .map(|(index, port)| MidiInputDevice {
            index,
            name: input
                .port_name(port)
                .unwrap_or_else(|_| format!("Unknown Device {}", index)),
        })
        .collect()
}

impl MidiTransport for MidirTransport {
    type Port = MidirInputPort;

    fn list_ports(&self) -> Result<Vec<String>> {
        Ok(self.list_devices()?.into_iter().map(|d| d.name).collect())
    }

    fn open_input(&self, name: &str) -> Result<MidirInputPort> {
        let input = self.client("input")?;
        let ports = input.ports();
        let names: Vec<String> = describe(&input, &ports)
            .into_iter()
            .map(|d| d.name)
            .collect();
        debug!(available = ?names, "MIDI input ports");

        let index = match_port_name(&names, name).ok_or_else(|| Error::DeviceNotFound {
            name: name.to_string(),
            available: names.clone(),
        })?;
        let port_name = names[index].clone();

        // Second client: the connecting one is consumed by `connect`.
        let probe = self.client("probe")?;

        let (sender, receiver) = unbounded();
        let connection = input
            .connect(
                &ports[index],
                &format!("{}-in", self.client_name),
                move |timestamp, message, _| {
                    let _ = sender.send(RawMessage {
                        timestamp,
                        bytes: message.to_vec(),
                    });
                },
                (),
            )
            .map_err(|e| Error::DeviceUnavailable {
                name: port_name.clone(),
                reason: e.to_string(),
            })?;

        Ok(MidirInputPort {
            name: port_name,
            connection: Some(connection),
            receiver,
            probe,
            disconnect_poll: self.disconnect_poll,
            shutdown: self.shutdown.clone(),
        })
    }
}

pub struct MidirInputPort {
    name: String,
    connection: Option<MidiInputConnection<()>>,
    receiver: Receiver<RawMessage>,
    probe: MidiInput,
    disconnect_poll: Duration,
    shutdown: Option<Shutdown>,
}

impl MidirInputPort {
    fn still_present(&self) -> bool {
        self.probe.ports().iter().any(|port| {
            self.probe
                .port_name(port)
                .map(|name| name == self.name)
                .unwrap_or(false)
        })
    }
}

impl InputPort for MidirInputPort {
    fn name(&self) -> &str {
        &self.name
    }

    fn recv(&mut self) -> Result<Option<MidiEvent>> {
        if self.connection.is_none() {
            return Ok(None);
        }
        next_event(
            &self.name,
            &self.receiver,
            self.shutdown.as_ref(),
            self.disconnect_poll,
            || self.still_present(),
        )
    }

    fn close(&mut self) {
        if let Some(connection) = self.connection.take() {
            connection.close();
            debug!(port = %self.name, "MIDI connection closed");
        }
    }
}
