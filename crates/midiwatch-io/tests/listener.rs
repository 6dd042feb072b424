//! Listener tests against a scripted in-memory transport.
//!
//! No MIDI hardware involved: the fake port replays a fixed script of events
//! and faults, and records how often it was opened and closed.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use midiwatch_io::{
    match_port_name, Error, EventListener, InputPort, ListenerConfig, ListenerState, MidiEvent,
    MidiMessage, MidiTransport, Result, STATUS_LINE,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

#[derive(Clone)]
enum Step {
    Event(MidiEvent),
    Fault,
}

#[derive(Default)]
struct PortStats {
    opened: usize,
    closed: usize,
    received: usize,
}

struct FakePort {
    name: String,
    script: VecDeque<Step>,
    stats: Arc<Mutex<PortStats>>,
}

impl InputPort for FakePort {
    fn name(&self) -> &str {
        &self.name
    }

    fn recv(&mut self) -> Result<Option<MidiEvent>> {
        match self.script.pop_front() {
            Some(Step::Event(event)) => {
                self.stats.lock().unwrap().received += 1;
                Ok(Some(event))
            }
            Some(Step::Fault) => Err(Error::Disconnected {
                name: self.name.clone(),
            }),
            // End of script stands in for external termination.
            None => Ok(None),
        }
    }

    fn close(&mut self) {
        self.stats.lock().unwrap().closed += 1;
    }
}

struct FakeTransport {
    ports: Vec<String>,
    busy: Vec<String>,
    script: Vec<Step>,
    stats: Arc<Mutex<PortStats>>,
}

impl FakeTransport {
    fn with_ports(ports: &[&str], script: Vec<Step>) -> Self {
        Self {
            ports: ports.iter().map(|p| p.to_string()).collect(),
            busy: Vec::new(),
            script,
            stats: Arc::new(Mutex::new(PortStats::default())),
        }
    }

    fn stats(&self) -> Arc<Mutex<PortStats>> {
        Arc::clone(&self.stats)
    }
}

impl MidiTransport for FakeTransport {
    type Port = FakePort;

    fn list_ports(&self) -> Result<Vec<String>> {
        Ok(self.ports.clone())
    }

    fn open_input(&self, name: &str) -> Result<FakePort> {
        let available = self.list_ports()?;
        let index = match_port_name(&available, name).ok_or_else(|| Error::DeviceNotFound {
            name: name.to_string(),
            available: available.clone(),
        })?;
        let port_name = available[index].clone();
        if self.busy.contains(&port_name) {
            return Err(Error::DeviceUnavailable {
                name: port_name,
                reason: "held by another client".into(),
            });
        }
        self.stats.lock().unwrap().opened += 1;
        Ok(FakePort {
            name: port_name,
            script: self.script.iter().cloned().collect(),
            stats: Arc::clone(&self.stats),
        })
    }
}

fn launchpad_config() -> ListenerConfig {
    ListenerConfig::default()
}

/// Note-ons as a device would send them, decoded from wire bytes.
fn note_events(n: u8) -> Vec<Step> {
    (0..n)
        .map(|i| {
            let bytes = MidiMessage::note_on(0, 36 + i, 100).to_bytes();
            Step::Event(MidiEvent::from_bytes(u64::from(i), &bytes).unwrap())
        })
        .collect()
}

fn run_to_string(listener: &mut EventListener<FakeTransport>) -> (Result<()>, String) {
    let mut out: Vec<u8> = Vec::new();
    let result = listener.run(&mut out);
    (result, String::from_utf8(out).unwrap())
}

// ---------------------------------------------------------------------------
// 1. Ordering and counts
// ---------------------------------------------------------------------------

/// N events in, exactly N lines out after the status line, same order.
#[test]
fn test_prints_one_line_per_event_in_order() {
    for n in [0u8, 1, 5, 32] {
        let transport = FakeTransport::with_ports(&["Launchpad S"], note_events(n));
        let mut listener = EventListener::new(transport, launchpad_config());
        let (result, text) = run_to_string(&mut listener);
        result.unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), n as usize + 1);
        assert_eq!(lines[0], STATUS_LINE);
        for (i, line) in lines[1..].iter().enumerate() {
            assert_eq!(
                *line,
                format!("note_on channel=0 note={} velocity=100", 36 + i)
            );
        }
    }
}

/// Mixed message kinds are written unfiltered, exactly as delivered.
#[test]
fn test_no_filtering_of_system_messages() {
    let script = vec![
        Step::Event(MidiMessage::Clock.into()),
        Step::Event(MidiMessage::SysEx { data: vec![0x7E, 0x00] }.into()),
        Step::Event(MidiMessage::note_on(0, 60, 0).into()),
        Step::Event(MidiMessage::Clock.into()),
    ];
    let transport = FakeTransport::with_ports(&["Launchpad S"], script);
    let mut listener = EventListener::new(transport, launchpad_config());
    let (result, text) = run_to_string(&mut listener);
    result.unwrap();

    assert_eq!(
        text,
        "Listening for MIDI...\n\
         clock\n\
         sysex data=(126,0)\n\
         note_on channel=0 note=60 velocity=0\n\
         clock\n"
    );
}

// ---------------------------------------------------------------------------
// 2. Open failures
// ---------------------------------------------------------------------------

/// Missing device: not-found error, no status line, no port, no close.
#[test]
fn test_missing_device_prints_nothing() {
    let transport = FakeTransport::with_ports(&["Midi Through Port-0"], note_events(3));
    let stats = transport.stats();
    let mut listener = EventListener::new(transport, launchpad_config());
    let (result, text) = run_to_string(&mut listener);

    match result {
        Err(Error::DeviceNotFound { name, available }) => {
            assert_eq!(name, "Launchpad S");
            assert_eq!(available, vec!["Midi Through Port-0".to_string()]);
        }
        other => panic!("expected DeviceNotFound, got {other:?}"),
    }
    assert!(text.is_empty());
    assert_eq!(stats.lock().unwrap().opened, 0);
    assert_eq!(stats.lock().unwrap().closed, 0);
    assert_eq!(listener.state(), ListenerState::Closed);
}

/// Port exists but is held elsewhere: unavailable error, no status line.
#[test]
fn test_busy_device_is_unavailable() {
    let mut transport = FakeTransport::with_ports(&["Launchpad S"], note_events(1));
    transport.busy.push("Launchpad S".into());
    let stats = transport.stats();
    let mut listener = EventListener::new(transport, launchpad_config());
    let (result, text) = run_to_string(&mut listener);

    assert!(matches!(result, Err(Error::DeviceUnavailable { .. })));
    assert!(text.is_empty());
    assert_eq!(stats.lock().unwrap().closed, 0);
}

// ---------------------------------------------------------------------------
// 3. Mid-stream faults
// ---------------------------------------------------------------------------

/// Fault after K events: K lines printed, error propagates, one close.
#[test]
fn test_disconnect_after_k_events() {
    for k in [0u8, 1, 4] {
        let mut script = note_events(k);
        script.push(Step::Fault);
        script.extend(note_events(2));

        let transport = FakeTransport::with_ports(&["Launchpad S"], script);
        let stats = transport.stats();
        let mut listener = EventListener::new(transport, launchpad_config());
        let (result, text) = run_to_string(&mut listener);

        assert!(matches!(result, Err(Error::Disconnected { .. })));
        assert_eq!(text.lines().count(), k as usize + 1);
        assert_eq!(text.lines().next(), Some(STATUS_LINE));

        let stats = stats.lock().unwrap();
        assert_eq!(stats.received, k as usize);
        assert_eq!(stats.opened, 1);
        assert_eq!(stats.closed, 1);
    }
}

// ---------------------------------------------------------------------------
// 4. End-to-end scenarios
// ---------------------------------------------------------------------------

/// Launchpad present, note-on then volume CC, then termination.
#[test]
fn test_launchpad_note_and_cc() {
    let script = vec![
        Step::Event(MidiEvent::from_bytes(10, &[0x90, 60, 100]).unwrap()),
        Step::Event(MidiEvent::from_bytes(20, &[0xB0, 7, 64]).unwrap()),
    ];
    let transport = FakeTransport::with_ports(&["Launchpad S"], script);
    let stats = transport.stats();
    let mut listener = EventListener::new(transport, launchpad_config());
    let (result, text) = run_to_string(&mut listener);
    result.unwrap();

    assert_eq!(
        text,
        "Listening for MIDI...\n\
         note_on channel=0 note=60 velocity=100\n\
         control_change channel=0 control=7 value=64\n"
    );
    assert_eq!(stats.lock().unwrap().closed, 1);
    assert_eq!(listener.state(), ListenerState::Closed);
}

/// Decorated backend name still resolves to the configured device.
#[test]
fn test_decorated_port_name_resolves() {
    let transport = FakeTransport::with_ports(
        &[
            "Midi Through:Midi Through Port-0 14:0",
            "Launchpad S:Launchpad S MIDI 1 20:0",
        ],
        note_events(1),
    );
    let mut listener = EventListener::new(transport, launchpad_config());
    let (result, text) = run_to_string(&mut listener);
    result.unwrap();
    assert_eq!(text.lines().count(), 2);
}

// ---------------------------------------------------------------------------
// 5. Rendering
// ---------------------------------------------------------------------------

/// Rendering the same value twice gives the same text.
#[test]
fn test_rendering_is_repeatable() {
    let event = MidiEvent::from_bytes(99, &[0xE3, 0x00, 0x50]).unwrap();
    assert_eq!(event.to_string(), event.to_string());
    assert_eq!(format!("{}", event), format!("{}", event.clone()));
    assert_eq!(event.to_string(), "pitchwheel channel=3 pitch=2048");
}
