//! Raw frame -> named message record.

use serde::Serialize;

use crate::controller::{CCNumber, ControlInfo, ControllerIndex};
use crate::frame::{status_channel, status_nibble, Channel, MessageType, RawFrame};
use crate::note::NoteIndex;

/// Message-specific part of a decoded frame.
///
/// Serialises with a `messageType` tag and camelCase fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "messageType", rename_all_fields = "camelCase")]
pub enum ChannelMessage<'a> {
    #[serde(rename = "note off")]
    NoteOff {
        note_number: u8,
        #[serde(skip_serializing_if = "Option::is_none")]
        note_name: Option<&'a str>,
        velocity: u8,
    },
    #[serde(rename = "note on")]
    NoteOn {
        note_number: u8,
        #[serde(skip_serializing_if = "Option::is_none")]
        note_name: Option<&'a str>,
        velocity: u8,
    },
    /// Per-note pressure; `velocity` is the pressure amount.
    #[serde(rename = "aftertouch (polyphonic)")]
    PolyAftertouch {
        note_number: u8,
        #[serde(skip_serializing_if = "Option::is_none")]
        note_name: Option<&'a str>,
        velocity: u8,
    },
    #[serde(rename = "control")]
    Control {
        controller_number: CCNumber,
        value: u8,
        control_info: ControlInfo<'a>,
    },
    #[serde(rename = "programChange")]
    ProgramChange { patch_number: u8 },
    /// Channel-wide pressure; `velocity` is the pressure amount.
    #[serde(rename = "aftertouch (monophonic)")]
    ChannelAftertouch { velocity: u8 },
    /// 14-bit bend, 0 = full down, 8192 = center, 16383 = full up.
    #[serde(rename = "pitch bend")]
    PitchBend { value: u16 },
    #[serde(rename = "sysex")]
    Sysex,
}

impl ChannelMessage<'_> {
    pub fn message_type(&self) -> MessageType {
        match self {
            Self::NoteOff { .. } => MessageType::NoteOff,
            Self::NoteOn { .. } => MessageType::NoteOn,
            Self::PolyAftertouch { .. } => MessageType::PolyAftertouch,
            Self::Control { .. } => MessageType::Control,
            Self::ProgramChange { .. } => MessageType::ProgramChange,
            Self::ChannelAftertouch { .. } => MessageType::ChannelAftertouch,
            Self::PitchBend { .. } => MessageType::PitchBend,
            Self::Sysex => MessageType::Sysex,
        }
    }
}

/// A decoded frame.
///
/// `message` is `None` when the status nibble is below 8, i.e. the frame does not
/// start with a channel message status byte. Callers must treat that as an
/// unrecognised frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedMessage<'a> {
    pub raw: RawFrame,
    /// 1-16.
    pub channel: Channel,
    /// High nibble of the status byte.
    pub midi_message: u8,
    #[serde(flatten)]
    pub message: Option<ChannelMessage<'a>>,
}

impl<'a> DecodedMessage<'a> {
    #[inline]
    pub fn message_type(&self) -> Option<MessageType> {
        self.message.as_ref().map(ChannelMessage::message_type)
    }

    #[inline]
    pub fn is_recognized(&self) -> bool {
        self.message.is_some()
    }

    pub fn note_number(&self) -> Option<u8> {
        match self.message {
            Some(ChannelMessage::NoteOff { note_number, .. })
            | Some(ChannelMessage::NoteOn { note_number, .. })
            | Some(ChannelMessage::PolyAftertouch { note_number, .. }) => Some(note_number),
            _ => None,
        }
    }

    pub fn note_name(&self) -> Option<&'a str> {
        match self.message {
            Some(ChannelMessage::NoteOff { note_name, .. })
            | Some(ChannelMessage::NoteOn { note_name, .. })
            | Some(ChannelMessage::PolyAftertouch { note_name, .. }) => note_name,
            _ => None,
        }
    }

    /// Note velocity, or pressure for both aftertouch kinds.
    pub fn velocity(&self) -> Option<u8> {
        match self.message {
            Some(ChannelMessage::NoteOff { velocity, .. })
            | Some(ChannelMessage::NoteOn { velocity, .. })
            | Some(ChannelMessage::PolyAftertouch { velocity, .. })
            | Some(ChannelMessage::ChannelAftertouch { velocity }) => Some(velocity),
            _ => None,
        }
    }

    pub fn controller_number(&self) -> Option<CCNumber> {
        match self.message {
            Some(ChannelMessage::Control {
                controller_number, ..
            }) => Some(controller_number),
            _ => None,
        }
    }

    /// Control value or pitch bend value.
    pub fn value(&self) -> Option<u16> {
        match self.message {
            Some(ChannelMessage::Control { value, .. }) => Some(value as u16),
            Some(ChannelMessage::PitchBend { value }) => Some(value),
            _ => None,
        }
    }

    pub fn patch_number(&self) -> Option<u8> {
        match self.message {
            Some(ChannelMessage::ProgramChange { patch_number }) => Some(patch_number),
            _ => None,
        }
    }

    pub fn control_info(&self) -> Option<&ControlInfo<'a>> {
        match &self.message {
            Some(ChannelMessage::Control { control_info, .. }) => Some(control_info),
            _ => None,
        }
    }
}

/// Decodes frames against a pair of lookup tables.
///
/// Holds only shared references, so it is `Copy` and can be used from any
/// number of threads at once.
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'a> {
    notes: &'a NoteIndex,
    controllers: &'a ControllerIndex,
}

impl<'a> Decoder<'a> {
    pub fn new(notes: &'a NoteIndex, controllers: &'a ControllerIndex) -> Self {
        Self { notes, controllers }
    }

    /// Decode a frame. Byte ranges are not checked.
    pub fn decode(&self, frame: RawFrame) -> DecodedMessage<'a> {
        let [status, data1, data2] = frame;
        let midi_message = status_nibble(status);

        let message = MessageType::from_nibble(midi_message).map(|kind| match kind {
            MessageType::NoteOff => ChannelMessage::NoteOff {
                note_number: data1,
                note_name: self.notes.name(data1),
                velocity: data2,
            },
            MessageType::NoteOn => ChannelMessage::NoteOn {
                note_number: data1,
                note_name: self.notes.name(data1),
                velocity: data2,
            },
            MessageType::PolyAftertouch => ChannelMessage::PolyAftertouch {
                note_number: data1,
                note_name: self.notes.name(data1),
                velocity: data2,
            },
            MessageType::Control => ChannelMessage::Control {
                controller_number: data1,
                value: data2,
                control_info: self.controllers.resolve(data1, data2),
            },
            MessageType::ProgramChange => ChannelMessage::ProgramChange { patch_number: data1 },
            MessageType::ChannelAftertouch => ChannelMessage::ChannelAftertouch { velocity: data1 },
            MessageType::PitchBend => ChannelMessage::PitchBend {
                value: ((data2 as u16) << 7) | data1 as u16,
            },
            MessageType::Sysex => ChannelMessage::Sysex,
        });

        DecodedMessage {
            raw: frame,
            channel: status_channel(status),
            midi_message,
            message,
        }
    }
}

impl Default for Decoder<'static> {
    fn default() -> Self {
        Self::new(NoteIndex::shared(), ControllerIndex::shared())
    }
}

/// Decode a frame against the process-wide tables.
#[inline]
pub fn decode(frame: RawFrame) -> DecodedMessage<'static> {
    Decoder::default().decode(frame)
}
