//! MIDI message codec.
//!
//! Translates 3-byte MIDI channel voice / channel mode frames into named records
//! and back.
//!
//! # Features
//!
//! - **Decoding**: `[status, data1, data2]` -> [`DecodedMessage`] with channel,
//!   message type, note name, controller name and 14-bit pitch bend
//! - **Encoding**: typed [`EncodeRequest`] or loosely typed [`MessageParams`] ->
//!   `[u8; 3]`, with every data byte kept 7-bit
//! - **Lookup tables**: [`NoteIndex`] (`C(0)`..`G(10)`) and [`ControllerIndex`]
//!   (controller names plus channel-mode messages 120-127)
//!
//! Nothing here allocates global mutable state or logs; tables are immutable and
//! can be shared freely between threads.
//!
//! # Example
//!
//! ```
//! use midi_message_core::{decode, encode, EncodeRequest, MessageType};
//!
//! let msg = decode([0x90, 60, 100]);
//! assert_eq!(msg.message_type(), Some(MessageType::NoteOn));
//! assert_eq!(msg.note_name(), Some("C(5)"));
//!
//! let frame = encode(&EncodeRequest::note_on(1, "C(5)", 100))?;
//! assert_eq!(frame, [0x90, 60, 100]);
//! # Ok::<(), midi_message_core::EncodeError>(())
//! ```

pub mod error;
pub use error::{EncodeError, EncodeErrorKind, Result, Severity};

pub mod controller;
pub mod frame;
pub mod note;

pub(crate) mod decode;
pub(crate) mod encode;
pub(crate) mod params;

pub use controller::{
    is_channel_mode, CCNumber, ControlInfo, ControllerIndex, ControllerOverrideError,
};
pub use decode::{decode, ChannelMessage, DecodedMessage, Decoder};
pub use encode::{
    encode, EncodeRequest, Encoder, NoteRef, NOTE_OFF_DEFAULT_VELOCITY, NOTE_ON_DEFAULT_VELOCITY,
};
pub use frame::{Channel, MessageType, RawFrame, PITCH_BEND_CENTER, PITCH_BEND_MAX};
pub use note::NoteIndex;
pub use params::{MessageParams, Numeral};
