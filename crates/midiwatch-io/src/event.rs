//! Decoded MIDI input events and their textual rendering.

use std::fmt;

use midly::live::{LiveEvent, MtcQuarterFrameMessage, SystemCommon, SystemRealtime};
use midly::num::u7;

use crate::error::Result;

/// One MIDI 1.0 message. Channels are 0-based.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MidiMessage {
    NoteOff { channel: u8, note: u8, velocity: u8 },
    NoteOn { channel: u8, note: u8, velocity: u8 },
    PolyTouch { channel: u8, note: u8, value: u8 },
    ControlChange { channel: u8, control: u8, value: u8 },
    ProgramChange { channel: u8, program: u8 },
    Aftertouch { channel: u8, value: u8 },
    /// Signed bend, 0 = centre.
    PitchWheel { channel: u8, pitch: i16 },
    /// Payload without the 0xF0/0xF7 framing bytes.
    SysEx { data: Vec<u8> },
    QuarterFrame { frame_type: u8, frame_value: u8 },
    SongPosition { pos: u16 },
    SongSelect { song: u8 },
    TuneRequest,
    Clock,
    Start,
    Continue,
    Stop,
    ActiveSensing,
    Reset,
    /// Reserved system status byte (0xF4, 0xF5, 0xF9, 0xFD).
    Undefined { status: u8, data: Vec<u8> },
}

impl MidiMessage {
    #[inline]
    pub fn note_on(channel: u8, note: u8, velocity: u8) -> Self {
        MidiMessage::NoteOn {
            channel,
            note,
            velocity,
        }
    }

    #[inline]
    pub fn note_off(channel: u8, note: u8, velocity: u8) -> Self {
        MidiMessage::NoteOff {
            channel,
            note,
            velocity,
        }
    }

    #[inline]
    pub fn control_change(channel: u8, control: u8, value: u8) -> Self {
        MidiMessage::ControlChange {
            channel,
            control,
            value,
        }
    }

    #[inline]
    pub fn program_change(channel: u8, program: u8) -> Self {
        MidiMessage::ProgramChange { channel, program }
    }

    #[inline]
    pub fn pitch_wheel(channel: u8, pitch: i16) -> Self {
        MidiMessage::PitchWheel { channel, pitch }
    }

    /// Channel of a channel-voice message, `None` for system messages.
    pub fn channel(&self) -> Option<u8> {
        match *self {
            MidiMessage::NoteOff { channel, .. }
            | MidiMessage::NoteOn { channel, .. }
            | MidiMessage::PolyTouch { channel, .. }
            | MidiMessage::ControlChange { channel, .. }
            | MidiMessage::ProgramChange { channel, .. }
            | MidiMessage::Aftertouch { channel, .. }
            | MidiMessage::PitchWheel { channel, .. } => Some(channel),
            _ => None,
        }
    }

    /// Wire bytes of this message.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            MidiMessage::NoteOff {
                channel,
                note,
                velocity,
            } => vec![0x80 | (channel & 0x0F), note & 0x7F, velocity & 0x7F],
            MidiMessage::NoteOn {
                channel,
                note,
                velocity,
            } => vec![0x90 | (channel & 0x0F), note & 0x7F, velocity & 0x7F],
            MidiMessage::PolyTouch {
                channel,
                note,
                value,
            } => vec![0xA0 | (channel & 0x0F), note & 0x7F, value & 0x7F],
            MidiMessage::ControlChange {
                channel,
                control,
                value,
            } => vec![0xB0 | (channel & 0x0F), control & 0x7F, value & 0x7F],
            MidiMessage::ProgramChange { channel, program } => {
                vec![0xC0 | (channel & 0x0F), program & 0x7F]
            }
            MidiMessage::Aftertouch { channel, value } => {
                vec![0xD0 | (channel & 0x0F), value & 0x7F]
            }
            MidiMessage::PitchWheel { channel, pitch } => {
                let raw = (i32::from(*pitch) + 0x2000).clamp(0, 0x3FFF) as u16;
                vec![
                    0xE0 | (channel & 0x0F),
                    (raw & 0x7F) as u8,
                    (raw >> 7) as u8,
                ]
            }
            MidiMessage::SysEx { data } => {
                let mut bytes = Vec::with_capacity(data.len() + 2);
                bytes.push(0xF0);
                bytes.extend(data.iter().map(|b| b & 0x7F));
                bytes.push(0xF7);
                bytes
            }
            MidiMessage::QuarterFrame {
                frame_type,
                frame_value,
            } => vec![0xF1, ((frame_type & 0x07) << 4) | (frame_value & 0x0F)],
            MidiMessage::SongPosition { pos } => {
                vec![0xF2, (pos & 0x7F) as u8, ((pos >> 7) & 0x7F) as u8]
            }
            MidiMessage::SongSelect { song } => vec![0xF3, song & 0x7F],
            MidiMessage::TuneRequest => vec![0xF6],
            MidiMessage::Clock => vec![0xF8],
            MidiMessage::Start => vec![0xFA],
            MidiMessage::Continue => vec![0xFB],
            MidiMessage::Stop => vec![0xFC],
            MidiMessage::ActiveSensing => vec![0xFE],
            MidiMessage::Reset => vec![0xFF],
            MidiMessage::Undefined { status, data } => {
                let mut bytes = Vec::with_capacity(data.len() + 1);
                bytes.push(*status);
                bytes.extend_from_slice(data);
                bytes
            }
        }
    }

    fn from_live(event: LiveEvent<'_>) -> Self {
        match event {
            LiveEvent::Midi { channel, message } => {
                let channel = channel.as_int();
                match message {
                    midly::MidiMessage::NoteOff { key, vel } => MidiMessage::NoteOff {
                        channel,
                        note: key.as_int(),
                        velocity: vel.as_int(),
                    },
                    midly::MidiMessage::NoteOn { key, vel } => MidiMessage::NoteOn {
                        channel,
                        note: key.as_int(),
                        velocity: vel.as_int(),
                    },
                    midly::MidiMessage::Aftertouch { key, vel } => MidiMessage::PolyTouch {
                        channel,
                        note: key.as_int(),
                        value: vel.as_int(),
                    },
                    midly::MidiMessage::Controller { controller, value } => {
                        MidiMessage::ControlChange {
                            channel,
                            control: controller.as_int(),
                            value: value.as_int(),
                        }
                    }
                    midly::MidiMessage::ProgramChange { program } => MidiMessage::ProgramChange {
                        channel,
                        program: program.as_int(),
                    },
                    midly::MidiMessage::ChannelAftertouch { vel } => MidiMessage::Aftertouch {
                        channel,
                        value: vel.as_int(),
                    },
                    midly::MidiMessage::PitchBend { bend } => MidiMessage::PitchWheel {
                        channel,
                        pitch: bend.as_int(),
                    },
                }
            }
            LiveEvent::Common(common) => match common {
                SystemCommon::SysEx(data) => MidiMessage::SysEx {
                    data: data_bytes(data),
                },
                SystemCommon::MidiTimeCodeQuarterFrame(kind, value) => MidiMessage::QuarterFrame {
                    frame_type: quarter_frame_type(kind),
                    frame_value: value.as_int(),
                },
                SystemCommon::SongPosition(pos) => MidiMessage::SongPosition { pos: pos.as_int() },
                SystemCommon::SongSelect(song) => MidiMessage::SongSelect {
                    song: song.as_int(),
                },
                SystemCommon::TuneRequest => MidiMessage::TuneRequest,
                SystemCommon::Undefined(status, data) => MidiMessage::Undefined {
                    status,
                    data: data_bytes(data),
                },
            },
            LiveEvent::Realtime(realtime) => match realtime {
                SystemRealtime::TimingClock => MidiMessage::Clock,
                SystemRealtime::Start => MidiMessage::Start,
                SystemRealtime::Continue => MidiMessage::Continue,
                SystemRealtime::Stop => MidiMessage::Stop,
                SystemRealtime::ActiveSensing => MidiMessage::ActiveSensing,
                SystemRealtime::Reset => MidiMessage::Reset,
                SystemRealtime::Undefined(status) => MidiMessage::Undefined {
                    status,
                    data: Vec::new(),
                },
            },
        }
    }
}

fn data_bytes(data: &[u7]) -> Vec<u8> {
    data.iter().map(|b| b.as_int()).collect()
}

fn quarter_frame_type(kind: MtcQuarterFrameMessage) -> u8 {
    match kind {
        MtcQuarterFrameMessage::FramesLow => 0,
        MtcQuarterFrameMessage::FramesHigh => 1,
        MtcQuarterFrameMessage::SecondsLow => 2,
        MtcQuarterFrameMessage::SecondsHigh => 3,
        MtcQuarterFrameMessage::MinutesLow => 4,
        MtcQuarterFrameMessage::MinutesHigh => 5,
        MtcQuarterFrameMessage::HoursLow => 6,
        MtcQuarterFrameMessage::HoursHigh => 7,
    }
}

fn write_data(f: &mut fmt::Formatter<'_>, data: &[u8]) -> fmt::Result {
    f.write_str("(")?;
    for (i, byte) in data.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{}", byte)?;
    }
    f.write_str(")")
}

impl fmt::Display for MidiMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MidiMessage::NoteOff {
                channel,
                note,
                velocity,
            } => write!(
                f,
                "note_off channel={} note={} velocity={}",
                channel, note, velocity
            ),
            MidiMessage::NoteOn {
                channel,
                note,
                velocity,
            } => write!(
                f,
                "note_on channel={} note={} velocity={}",
                channel, note, velocity
            ),
            MidiMessage::PolyTouch {
                channel,
                note,
                value,
            } => write!(
                f,
                "polytouch channel={} note={} value={}",
                channel, note, value
            ),
            MidiMessage::ControlChange {
                channel,
                control,
                value,
            } => write!(
                f,
                "control_change channel={} control={} value={}",
                channel, control, value
            ),
            MidiMessage::ProgramChange { channel, program } => {
                write!(f, "program_change channel={} program={}", channel, program)
            }
            MidiMessage::Aftertouch { channel, value } => {
                write!(f, "aftertouch channel={} value={}", channel, value)
            }
            MidiMessage::PitchWheel { channel, pitch } => {
                write!(f, "pitchwheel channel={} pitch={}", channel, pitch)
            }
            MidiMessage::SysEx { data } => {
                f.write_str("sysex data=")?;
                write_data(f, data)
            }
            MidiMessage::QuarterFrame {
                frame_type,
                frame_value,
            } => write!(
                f,
                "quarter_frame frame_type={} frame_value={}",
                frame_type, frame_value
            ),
            MidiMessage::SongPosition { pos } => write!(f, "songpos pos={}", pos),
            MidiMessage::SongSelect { song } => write!(f, "song_select song={}", song),
            MidiMessage::TuneRequest => f.write_str("tune_request"),
            MidiMessage::Clock => f.write_str("clock"),
            MidiMessage::Start => f.write_str("start"),
            MidiMessage::Continue => f.write_str("continue"),
            MidiMessage::Stop => f.write_str("stop"),
            MidiMessage::ActiveSensing => f.write_str("active_sensing"),
            MidiMessage::Reset => f.write_str("reset"),
            MidiMessage::Undefined { status, data } => {
                write!(f, "undefined status={:#04x} data=", status)?;
                write_data(f, data)
            }
        }
    }
}

/// A message as received from an input port.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MidiEvent {
    /// Receive time reported by the backend, in microseconds.
    pub timestamp_us: u64,
    pub message: MidiMessage,
}

impl MidiEvent {
    #[inline]
    pub fn new(timestamp_us: u64, message: MidiMessage) -> Self {
        Self {
            timestamp_us,
            message,
        }
    }

    /// Parse exactly one complete live MIDI message.
    pub fn from_bytes(timestamp_us: u64, bytes: &[u8]) -> Result<Self> {
        let live = LiveEvent::parse(bytes)?;
        Ok(Self {
            timestamp_us,
            message: MidiMessage::from_live(live),
        })
    }

    #[inline]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.message.to_bytes()
    }
}

impl From<MidiMessage> for MidiEvent {
    fn from(message: MidiMessage) -> Self {
        Self::new(0, message)
    }
}

/// Renders the message only; the timestamp is not part of the text.
impl fmt::Display for MidiEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.message, f)
    }
}
