//! Named message request -> raw frame.
//!
//! Every data byte the encoder emits is 7-bit. Requests that would need a wider
//! value fail with [`EncodeErrorKind::InvalidValue`] instead of being truncated.

use serde::{Deserialize, Serialize};

use crate::controller::CCNumber;
use crate::error::{EncodeError, EncodeErrorKind, Result};
use crate::frame::{status_byte, Channel, MessageType, RawFrame, DATA_MASK, PITCH_BEND_MAX};
use crate::note::NoteIndex;
use crate::params::MessageParams;

/// Velocity used for note off when none is given.
pub const NOTE_OFF_DEFAULT_VELOCITY: u8 = 0;

/// Velocity used for note on when none is given.
pub const NOTE_ON_DEFAULT_VELOCITY: u8 = 127;

const OPERATION: &str = "encode";

/// A note given either by number or by table name (e.g. `"C(5)"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NoteRef {
    Number(u8),
    Name(String),
}

impl From<u8> for NoteRef {
    fn from(number: u8) -> Self {
        NoteRef::Number(number)
    }
}

impl From<&str> for NoteRef {
    fn from(name: &str) -> Self {
        NoteRef::Name(name.to_string())
    }
}

impl From<String> for NoteRef {
    fn from(name: String) -> Self {
        NoteRef::Name(name)
    }
}

/// A message to encode. Each variant carries exactly the fields its frame needs.
///
/// Channels are 1-16.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "messageType", rename_all_fields = "camelCase")]
pub enum EncodeRequest {
    #[serde(rename = "note off")]
    NoteOff {
        channel: Channel,
        note: NoteRef,
        #[serde(default)]
        velocity: Option<u8>,
    },
    #[serde(rename = "note on")]
    NoteOn {
        channel: Channel,
        note: NoteRef,
        #[serde(default)]
        velocity: Option<u8>,
    },
    #[serde(rename = "aftertouch (polyphonic)")]
    PolyAftertouch {
        channel: Channel,
        note: NoteRef,
        pressure: u8,
    },
    #[serde(rename = "control")]
    Control {
        channel: Channel,
        controller: CCNumber,
        value: u8,
    },
    #[serde(rename = "programChange")]
    ProgramChange { channel: Channel, patch: u8 },
    #[serde(rename = "aftertouch (monophonic)")]
    ChannelAftertouch { channel: Channel, pressure: u8 },
    #[serde(rename = "pitch bend")]
    PitchBend { channel: Channel, value: u16 },
    /// Accepted so callers can round-trip decoded records, but never encodable.
    #[serde(rename = "sysex")]
    Sysex { channel: Channel },
}

impl EncodeRequest {
    pub fn note_on(channel: Channel, note: impl Into<NoteRef>, velocity: u8) -> Self {
        Self::NoteOn {
            channel,
            note: note.into(),
            velocity: Some(velocity),
        }
    }

    /// Note off with the default release velocity.
    pub fn note_off(channel: Channel, note: impl Into<NoteRef>) -> Self {
        Self::NoteOff {
            channel,
            note: note.into(),
            velocity: None,
        }
    }

    pub fn control_change(channel: Channel, controller: CCNumber, value: u8) -> Self {
        Self::Control {
            channel,
            controller,
            value,
        }
    }

    pub fn pitch_bend(channel: Channel, value: u16) -> Self {
        Self::PitchBend { channel, value }
    }

    pub fn program_change(channel: Channel, patch: u8) -> Self {
        Self::ProgramChange { channel, patch }
    }

    pub fn message_type(&self) -> MessageType {
        match self {
            Self::NoteOff { .. } => MessageType::NoteOff,
            Self::NoteOn { .. } => MessageType::NoteOn,
            Self::PolyAftertouch { .. } => MessageType::PolyAftertouch,
            Self::Control { .. } => MessageType::Control,
            Self::ProgramChange { .. } => MessageType::ProgramChange,
            Self::ChannelAftertouch { .. } => MessageType::ChannelAftertouch,
            Self::PitchBend { .. } => MessageType::PitchBend,
            Self::Sysex { .. } => MessageType::Sysex,
        }
    }

    pub fn channel(&self) -> Channel {
        match *self {
            Self::NoteOff { channel, .. }
            | Self::NoteOn { channel, .. }
            | Self::PolyAftertouch { channel, .. }
            | Self::Control { channel, .. }
            | Self::ProgramChange { channel, .. }
            | Self::ChannelAftertouch { channel, .. }
            | Self::PitchBend { channel, .. }
            | Self::Sysex { channel } => channel,
        }
    }
}

/// Encodes requests, resolving note names against a [`NoteIndex`].
#[derive(Debug, Clone, Copy)]
pub struct Encoder<'a> {
    notes: &'a NoteIndex,
}

impl<'a> Encoder<'a> {
    pub fn new(notes: &'a NoteIndex) -> Self {
        Self { notes }
    }

    pub fn notes(&self) -> &'a NoteIndex {
        self.notes
    }

    pub fn encode(&self, request: &EncodeRequest) -> Result<RawFrame> {
        let kind = request.message_type();
        if kind == MessageType::Sysex {
            return Err(unsupported(kind));
        }
        let status = status_byte(kind.nibble(), check_channel(kind, request.channel())?);

        let frame = match request {
            EncodeRequest::NoteOff { note, velocity, .. } => [
                status,
                self.note_number(kind, note)?,
                data_byte(kind, "velocity", velocity.unwrap_or(NOTE_OFF_DEFAULT_VELOCITY))?,
            ],
            EncodeRequest::NoteOn { note, velocity, .. } => [
                status,
                self.note_number(kind, note)?,
                data_byte(kind, "velocity", velocity.unwrap_or(NOTE_ON_DEFAULT_VELOCITY))?,
            ],
            EncodeRequest::PolyAftertouch { note, pressure, .. } => [
                status,
                self.note_number(kind, note)?,
                data_byte(kind, "velocity", *pressure)?,
            ],
            EncodeRequest::Control {
                controller, value, ..
            } => [
                status,
                data_byte(kind, "controllerNumber", *controller)?,
                data_byte(kind, "value", *value)?,
            ],
            EncodeRequest::ProgramChange { patch, .. } => {
                [status, data_byte(kind, "patchNumber", *patch)?, 0]
            }
            EncodeRequest::ChannelAftertouch { pressure, .. } => {
                [status, data_byte(kind, "velocity", *pressure)?, 0]
            }
            EncodeRequest::PitchBend { value, .. } => {
                let value = *value;
                if value > PITCH_BEND_MAX {
                    return Err(EncodeError::new(
                        OPERATION,
                        EncodeErrorKind::InvalidValue,
                        format!(
                            "'{kind}' messageType requires 'value' between 0 and {PITCH_BEND_MAX} (given: {value})"
                        ),
                    ));
                }
                [
                    status,
                    (value & DATA_MASK as u16) as u8,
                    ((value >> 7) & DATA_MASK as u16) as u8,
                ]
            }
            EncodeRequest::Sysex { .. } => return Err(unsupported(kind)),
        };

        Ok(frame)
    }

    /// Encode loosely typed parameters. `None` stands for "no arguments at all".
    pub fn encode_params(&self, params: Option<&MessageParams>) -> Result<RawFrame> {
        let params = params.ok_or_else(|| {
            EncodeError::new(
                OPERATION,
                EncodeErrorKind::MissingArguments,
                "null arguments",
            )
        })?;
        self.encode(&params.to_request()?)
    }

    fn note_number(&self, kind: MessageType, note: &NoteRef) -> Result<u8> {
        match note {
            NoteRef::Number(number) => data_byte(kind, "noteNumber", *number),
            NoteRef::Name(name) => self.notes.number(name).ok_or_else(|| {
                EncodeError::new(
                    OPERATION,
                    EncodeErrorKind::UnknownNoteName,
                    format!("unknown noteName ({name}) on '{kind}' message"),
                )
            }),
        }
    }
}

impl Default for Encoder<'static> {
    fn default() -> Self {
        Self::new(NoteIndex::shared())
    }
}

/// Encode a request against the process-wide note table.
#[inline]
pub fn encode(request: &EncodeRequest) -> Result<RawFrame> {
    Encoder::default().encode(request)
}

fn check_channel(kind: MessageType, channel: Channel) -> Result<Channel> {
    if (1..=16).contains(&channel) {
        Ok(channel)
    } else {
        Err(EncodeError::new(
            OPERATION,
            EncodeErrorKind::InvalidChannel,
            format!("'{kind}' messageType requires 'channel' between 1 and 16 (given: {channel})"),
        ))
    }
}

fn unsupported(kind: MessageType) -> EncodeError {
    EncodeError::new(
        OPERATION,
        EncodeErrorKind::UnsupportedMessageType,
        format!("'{kind}' messageType cannot be encoded as a 3-byte frame"),
    )
}

fn data_byte(kind: MessageType, field: &str, value: u8) -> Result<u8> {
    if value <= DATA_MASK {
        Ok(value)
    } else {
        Err(EncodeError::new(
            OPERATION,
            EncodeErrorKind::InvalidValue,
            format!("'{kind}' messageType requires '{field}' between 0 and 127 (given: {value})"),
        ))
    }
}
