//! Raw 3-byte frames and the status-byte layout.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// `[status, data1, data2]` as handed over by a MIDI port.
pub type RawFrame = [u8; 3];

/// MIDI channel, 1-16 (the wire carries 0-15).
pub type Channel = u8;

/// Mask for a 7-bit MIDI data byte.
pub const DATA_MASK: u8 = 0x7F;

/// Largest 14-bit pitch bend value.
pub const PITCH_BEND_MAX: u16 = 0x3FFF;

/// Pitch bend value meaning "no bend".
pub const PITCH_BEND_CENTER: u16 = 0x2000;

#[inline]
pub const fn status_nibble(status: u8) -> u8 {
    status >> 4
}

/// 1-based channel carried in the low nibble of `status`.
#[inline]
pub const fn status_channel(status: u8) -> Channel {
    (status & 0x0F) + 1
}

/// Pack a status nibble and a 1-based channel. Only the low nibble of
/// `channel - 1` is kept, so out-of-range channels wrap instead of panicking.
#[inline]
pub const fn status_byte(nibble: u8, channel: Channel) -> u8 {
    (nibble << 4) | (channel.wrapping_sub(1) & 0x0F)
}

/// Kind of channel message, named the way decoded records spell it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageType {
    #[serde(rename = "note off")]
    NoteOff,
    #[serde(rename = "note on")]
    NoteOn,
    #[serde(rename = "aftertouch (polyphonic)")]
    PolyAftertouch,
    #[serde(rename = "control")]
    Control,
    #[serde(rename = "programChange")]
    ProgramChange,
    #[serde(rename = "aftertouch (monophonic)")]
    ChannelAftertouch,
    #[serde(rename = "pitch bend")]
    PitchBend,
    #[serde(rename = "sysex")]
    Sysex,
}

impl MessageType {
    pub const ALL: [MessageType; 8] = [
        Self::NoteOff,
        Self::NoteOn,
        Self::PolyAftertouch,
        Self::Control,
        Self::ProgramChange,
        Self::ChannelAftertouch,
        Self::PitchBend,
        Self::Sysex,
    ];

    /// Returns `None` for nibbles outside 8-15.
    pub const fn from_nibble(nibble: u8) -> Option<MessageType> {
        match nibble {
            8 => Some(Self::NoteOff),
            9 => Some(Self::NoteOn),
            10 => Some(Self::PolyAftertouch),
            11 => Some(Self::Control),
            12 => Some(Self::ProgramChange),
            13 => Some(Self::ChannelAftertouch),
            14 => Some(Self::PitchBend),
            15 => Some(Self::Sysex),
            _ => None,
        }
    }

    pub const fn nibble(self) -> u8 {
        match self {
            Self::NoteOff => 8,
            Self::NoteOn => 9,
            Self::PolyAftertouch => 10,
            Self::Control => 11,
            Self::ProgramChange => 12,
            Self::ChannelAftertouch => 13,
            Self::PitchBend => 14,
            Self::Sysex => 15,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoteOff => "note off",
            Self::NoteOn => "note on",
            Self::PolyAftertouch => "aftertouch (polyphonic)",
            Self::Control => "control",
            Self::ProgramChange => "programChange",
            Self::ChannelAftertouch => "aftertouch (monophonic)",
            Self::PitchBend => "pitch bend",
            Self::Sysex => "sysex",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known message type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown message type '{0}'")]
pub struct UnknownMessageType(pub String);

impl FromStr for MessageType {
    type Err = UnknownMessageType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownMessageType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_split() {
        assert_eq!(status_nibble(0x90), 9);
        assert_eq!(status_channel(0x90), 1);
        assert_eq!(status_nibble(0xEF), 14);
        assert_eq!(status_channel(0xEF), 16);
    }

    #[test]
    fn test_status_byte() {
        assert_eq!(status_byte(8, 1), 0x80);
        assert_eq!(status_byte(9, 16), 0x9F);
        assert_eq!(status_byte(14, 3), 0xE2);
    }

    #[test]
    fn test_status_byte_wraps_unchecked_channel() {
        assert_eq!(status_byte(8, 0), 0x8F);
        assert_eq!(status_byte(9, 17), 0x90);
    }

    #[test]
    fn test_nibble_mapping() {
        for t in MessageType::ALL {
            assert_eq!(MessageType::from_nibble(t.nibble()), Some(t));
        }
        for n in 0..8 {
            assert_eq!(MessageType::from_nibble(n), None);
        }
    }

    #[test]
    fn test_from_str() {
        for t in MessageType::ALL {
            assert_eq!(t.as_str().parse::<MessageType>(), Ok(t));
        }
        assert!("Note On".parse::<MessageType>().is_err());
        assert!("".parse::<MessageType>().is_err());
    }

    #[test]
    fn test_serde_names_match_display() {
        for t in MessageType::ALL {
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t));
        }
    }
}
