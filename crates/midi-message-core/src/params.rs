//! Loosely typed message parameters.
//!
//! `MessageParams` mirrors the named-argument records produced by decoding (and
//! typed by hand or sent as JSON by callers): every field is optional and
//! numbers may arrive as integers or as digit strings. Converting it into an
//! [`EncodeRequest`] is the single place where missing or malformed fields are
//! reported.

use serde::{Deserialize, Serialize};

use crate::encode::{EncodeRequest, NoteRef};
use crate::error::{EncodeError, EncodeErrorKind, Result};
use crate::frame::{MessageType, DATA_MASK, PITCH_BEND_MAX};

const OPERATION: &str = "encode_params";

/// Longest digit string accepted as a numeral.
const MAX_NUMERAL_DIGITS: usize = 5;
const MAX_NUMERAL: u32 = 99_999;

/// A number as loosely typed input carries it.
///
/// Only non-negative whole numbers with at most five digits count as numerals
/// (`64.0` included); anything else is treated as "non-numeric".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeral {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Numeral {
    pub fn value(&self) -> Option<u32> {
        match self {
            Numeral::Integer(n) => u32::try_from(*n).ok().filter(|n| *n <= MAX_NUMERAL),
            Numeral::Float(x) => {
                let whole = x.fract() == 0.0 && (0.0..=MAX_NUMERAL as f64).contains(x);
                whole.then_some(*x as u32)
            }
            Numeral::Text(s) => {
                let is_numeral = (1..=MAX_NUMERAL_DIGITS).contains(&s.len())
                    && s.bytes().all(|b| b.is_ascii_digit());
                if is_numeral {
                    s.parse().ok()
                } else {
                    None
                }
            }
        }
    }
}

impl From<i64> for Numeral {
    fn from(n: i64) -> Self {
        Numeral::Integer(n)
    }
}

impl From<i32> for Numeral {
    fn from(n: i32) -> Self {
        Numeral::Integer(n as i64)
    }
}

impl From<&str> for Numeral {
    fn from(s: &str) -> Self {
        Numeral::Text(s.to_string())
    }
}

impl std::fmt::Display for Numeral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Numeral::Integer(n) => write!(f, "{n}"),
            Numeral::Float(x) => write!(f, "{x}"),
            Numeral::Text(s) => f.write_str(s),
        }
    }
}

/// Named message parameters, field names as in decoded records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MessageParams {
    pub message_type: Option<String>,
    pub channel: Option<Numeral>,
    pub note_number: Option<Numeral>,
    pub note_name: Option<String>,
    /// Note velocity, or pressure for aftertouch.
    pub velocity: Option<Numeral>,
    pub controller_number: Option<Numeral>,
    /// Control value or pitch bend value.
    pub value: Option<Numeral>,
    pub patch_number: Option<Numeral>,
}

impl MessageParams {
    pub fn new(message_type: impl Into<String>) -> Self {
        Self {
            message_type: Some(message_type.into()),
            ..Default::default()
        }
    }

    pub fn channel(mut self, channel: impl Into<Numeral>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub fn note_number(mut self, note: impl Into<Numeral>) -> Self {
        self.note_number = Some(note.into());
        self
    }

    pub fn note_name(mut self, name: impl Into<String>) -> Self {
        self.note_name = Some(name.into());
        self
    }

    pub fn velocity(mut self, velocity: impl Into<Numeral>) -> Self {
        self.velocity = Some(velocity.into());
        self
    }

    pub fn controller_number(mut self, controller: impl Into<Numeral>) -> Self {
        self.controller_number = Some(controller.into());
        self
    }

    pub fn value(mut self, value: impl Into<Numeral>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn patch_number(mut self, patch: impl Into<Numeral>) -> Self {
        self.patch_number = Some(patch.into());
        self
    }

    pub fn to_request(&self) -> Result<EncodeRequest> {
        let kind = self.message_type()?;
        if kind == MessageType::Sysex {
            return Err(error(
                EncodeErrorKind::UnsupportedMessageType,
                "'sysex' messageType cannot be encoded as a 3-byte frame",
            ));
        }

        let channel = self.channel_number(kind)?;
        let request = match kind {
            MessageType::NoteOff => EncodeRequest::NoteOff {
                channel,
                note: self.note(kind)?,
                velocity: self.optional_velocity(kind)?,
            },
            MessageType::NoteOn => EncodeRequest::NoteOn {
                channel,
                note: self.note(kind)?,
                velocity: self.optional_velocity(kind)?,
            },
            MessageType::PolyAftertouch => EncodeRequest::PolyAftertouch {
                channel,
                note: self.note(kind)?,
                pressure: data_field(kind, "velocity", &self.velocity)?,
            },
            MessageType::Control => EncodeRequest::Control {
                channel,
                controller: data_field(kind, "controllerNumber", &self.controller_number)?,
                value: data_field(kind, "value", &self.value)?,
            },
            MessageType::ProgramChange => EncodeRequest::ProgramChange {
                channel,
                patch: data_field(kind, "patchNumber", &self.patch_number)?,
            },
            MessageType::ChannelAftertouch => EncodeRequest::ChannelAftertouch {
                channel,
                pressure: data_field(kind, "velocity", &self.velocity)?,
            },
            MessageType::PitchBend => EncodeRequest::PitchBend {
                channel,
                value: required(kind, "value", &self.value, PITCH_BEND_MAX as u32)? as u16,
            },
            MessageType::Sysex => EncodeRequest::Sysex { channel },
        };
        Ok(request)
    }

    fn message_type(&self) -> Result<MessageType> {
        let name = match self.message_type.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => {
                return Err(error(
                    EncodeErrorKind::MissingMessageType,
                    "missing 'messageType' argument",
                ))
            }
        };
        name.parse().map_err(|_| {
            error(
                EncodeErrorKind::UnknownMessageType,
                format!("unknown 'messageType' ({name})"),
            )
        })
    }

    fn channel_number(&self, kind: MessageType) -> Result<u8> {
        let Some(channel) = &self.channel else {
            return Err(error(
                EncodeErrorKind::MissingChannel,
                format!("'{kind}' messageType requires 'channel'"),
            ));
        };
        match channel.value() {
            Some(n @ 1..=16) => Ok(n as u8),
            _ => Err(error(
                EncodeErrorKind::InvalidChannel,
                format!("'{kind}' messageType requires 'channel' between 1 and 16 (given: {channel})"),
            )),
        }
    }

    /// `noteNumber` wins over `noteName` when both are present.
    fn note(&self, kind: MessageType) -> Result<NoteRef> {
        if self.note_number.is_some() {
            return data_field(kind, "noteNumber", &self.note_number).map(NoteRef::Number);
        }
        match &self.note_name {
            Some(name) => Ok(NoteRef::Name(name.clone())),
            None => Err(error(
                EncodeErrorKind::MissingNoteIdentity,
                format!("noteNumber and noteName are missing on '{kind}' message"),
            )),
        }
    }

    /// Absent or non-numeric velocity falls back to the encoder default.
    fn optional_velocity(&self, kind: MessageType) -> Result<Option<u8>> {
        match self.velocity.as_ref().and_then(Numeral::value) {
            None => Ok(None),
            Some(v) if v <= DATA_MASK as u32 => Ok(Some(v as u8)),
            Some(v) => Err(error(
                EncodeErrorKind::InvalidValue,
                format!("'{kind}' messageType requires 'velocity' between 0 and 127 (given: {v})"),
            )),
        }
    }
}

impl TryFrom<&MessageParams> for EncodeRequest {
    type Error = EncodeError;

    fn try_from(params: &MessageParams) -> Result<Self> {
        params.to_request()
    }
}

fn error(kind: EncodeErrorKind, message: impl Into<String>) -> EncodeError {
    EncodeError::new(OPERATION, kind, message)
}

fn required(kind: MessageType, field: &str, value: &Option<Numeral>, max: u32) -> Result<u32> {
    let Some(value) = value else {
        return Err(error(
            EncodeErrorKind::MissingValue,
            format!("'{kind}' messageType requires '{field}'"),
        ));
    };
    match value.value() {
        Some(n) if n <= max => Ok(n),
        _ => Err(error(
            EncodeErrorKind::InvalidValue,
            format!("'{kind}' messageType requires '{field}' between 0 and {max} (given: {value})"),
        )),
    }
}

fn data_field(kind: MessageType, field: &str, value: &Option<Numeral>) -> Result<u8> {
    required(kind, field, value, DATA_MASK as u32).map(|n| n as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode;

    fn kind_of(params: &MessageParams) -> EncodeErrorKind {
        params.to_request().unwrap_err().kind
    }

    #[test]
    fn test_numeral() {
        assert_eq!(Numeral::from(12).value(), Some(12));
        assert_eq!(Numeral::from("12").value(), Some(12));
        assert_eq!(Numeral::from("00007").value(), Some(7));
        assert_eq!(Numeral::from("99999").value(), Some(99_999));
        assert_eq!(Numeral::from("100000").value(), None);
        assert_eq!(Numeral::from(100_000).value(), None);
        assert_eq!(Numeral::from(-1).value(), None);
        assert_eq!(Numeral::from("").value(), None);
        assert_eq!(Numeral::from(" 1").value(), None);
        assert_eq!(Numeral::from("loud").value(), None);
        assert_eq!(Numeral::Float(1.5).value(), None);
        assert_eq!(Numeral::Float(64.0).value(), Some(64));
        assert_eq!(Numeral::Float(-0.0).value(), Some(0));
        assert_eq!(Numeral::Float(-1.0).value(), None);
        assert_eq!(Numeral::Float(100_000.0).value(), None);
        assert_eq!(Numeral::Float(f64::NAN).value(), None);
    }

    #[test]
    fn test_deserialize_whole_floats() {
        let params: MessageParams = serde_json::from_str(
            r#"{"messageType": "note on", "channel": 1.0, "noteNumber": 60, "velocity": 64.0}"#,
        )
        .unwrap();
        let frame = encode(&params.to_request().unwrap()).unwrap();
        assert_eq!(frame, [0x90, 60, 64]);
    }

    #[test]
    fn test_missing_message_type() {
        assert_eq!(
            kind_of(&MessageParams::default()),
            EncodeErrorKind::MissingMessageType
        );
        assert_eq!(
            kind_of(&MessageParams::new("   ")),
            EncodeErrorKind::MissingMessageType
        );
    }

    #[test]
    fn test_unknown_message_type() {
        assert_eq!(
            kind_of(&MessageParams::new("note sideways").channel(1)),
            EncodeErrorKind::UnknownMessageType
        );
    }

    #[test]
    fn test_channel_validation() {
        let base = || MessageParams::new("note on").note_number(60);
        assert_eq!(kind_of(&base()), EncodeErrorKind::MissingChannel);
        assert_eq!(kind_of(&base().channel("one")), EncodeErrorKind::InvalidChannel);
        assert_eq!(kind_of(&base().channel(0)), EncodeErrorKind::InvalidChannel);
        assert_eq!(kind_of(&base().channel("17")), EncodeErrorKind::InvalidChannel);
        assert_eq!(kind_of(&base().channel("123456")), EncodeErrorKind::InvalidChannel);
        assert!(base().channel("16").to_request().is_ok());
    }

    #[test]
    fn test_missing_note_identity() {
        let params = MessageParams::new("note on").channel(1);
        assert_eq!(kind_of(&params), EncodeErrorKind::MissingNoteIdentity);
    }

    #[test]
    fn test_note_number_wins_over_name() {
        let request = MessageParams::new("note on")
            .channel(1)
            .note_number(61)
            .note_name("C(5)")
            .to_request()
            .unwrap();
        assert_eq!(encode(&request).unwrap(), [0x90, 61, 127]);
    }

    #[test]
    fn test_unknown_note_name_surfaces_at_encode() {
        let request = MessageParams::new("note on")
            .channel(1)
            .note_name("Z#(9)")
            .to_request()
            .unwrap();
        assert_eq!(
            encode(&request).unwrap_err().kind,
            EncodeErrorKind::UnknownNoteName
        );
    }

    #[test]
    fn test_velocity_defaults() {
        let off = MessageParams::new("note off").channel(1).note_number(60);
        assert_eq!(encode(&off.to_request().unwrap()).unwrap(), [0x80, 60, 0]);

        let on = MessageParams::new("note on").channel(1).note_number(60);
        assert_eq!(encode(&on.to_request().unwrap()).unwrap(), [0x90, 60, 127]);

        let non_numeric = on.clone().velocity("loud");
        assert_eq!(
            encode(&non_numeric.to_request().unwrap()).unwrap(),
            [0x90, 60, 127]
        );

        let given = on.velocity("64");
        assert_eq!(encode(&given.to_request().unwrap()).unwrap(), [0x90, 60, 64]);
    }

    #[test]
    fn test_velocity_too_large() {
        let params = MessageParams::new("note on")
            .channel(1)
            .note_number(60)
            .velocity(300);
        assert_eq!(kind_of(&params), EncodeErrorKind::InvalidValue);
    }

    #[test]
    fn test_pitch_bend_value() {
        let base = || MessageParams::new("pitch bend").channel(1);
        assert_eq!(kind_of(&base()), EncodeErrorKind::MissingValue);
        assert_eq!(kind_of(&base().value("up")), EncodeErrorKind::InvalidValue);
        assert_eq!(kind_of(&base().value(16384)), EncodeErrorKind::InvalidValue);
        assert_eq!(
            base().value("8192").to_request().unwrap(),
            EncodeRequest::pitch_bend(1, 8192)
        );
    }

    #[test]
    fn test_other_message_kinds() {
        let control = MessageParams::new("control")
            .channel(2)
            .controller_number(7)
            .value(100);
        assert_eq!(
            control.to_request().unwrap(),
            EncodeRequest::control_change(2, 7, 100)
        );
        assert_eq!(
            kind_of(&MessageParams::new("control").channel(2).value(1)),
            EncodeErrorKind::MissingValue
        );

        let program = MessageParams::new("programChange").channel(1).patch_number(5);
        assert_eq!(
            program.to_request().unwrap(),
            EncodeRequest::program_change(1, 5)
        );

        let mono = MessageParams::new("aftertouch (monophonic)")
            .channel(1)
            .velocity(80);
        assert_eq!(
            mono.to_request().unwrap(),
            EncodeRequest::ChannelAftertouch {
                channel: 1,
                pressure: 80
            }
        );

        let poly = MessageParams::new("aftertouch (polyphonic)")
            .channel(1)
            .note_name("C(5)");
        assert_eq!(kind_of(&poly), EncodeErrorKind::MissingValue);
    }

    #[test]
    fn test_sysex_unsupported_without_channel() {
        let err = MessageParams::new("sysex").to_request().unwrap_err();
        assert_eq!(err.kind, EncodeErrorKind::UnsupportedMessageType);
        assert_eq!(err.operation, "encode_params");
    }

    #[test]
    fn test_deserialize_mixed_numerals() {
        let params: MessageParams = serde_json::from_str(
            r#"{"messageType": "note on", "channel": "3", "noteName": "G(5)", "velocity": 108}"#,
        )
        .unwrap();
        assert_eq!(
            params.to_request().unwrap(),
            EncodeRequest::note_on(3, "G(5)", 108)
        );
    }

    #[test]
    fn test_deserialize_ignores_decoded_extras() {
        // A decoded record carries fields the encoder does not need
        let params: MessageParams = serde_json::from_str(
            r#"{"raw": [144, 60, 100], "channel": 1, "midiMessage": 9,
                "messageType": "note on", "noteNumber": 60, "noteName": "C(5)",
                "velocity": 100}"#,
        )
        .unwrap();
        let frame = encode(&params.to_request().unwrap()).unwrap();
        assert_eq!(frame, [0x90, 60, 100]);
    }
}
