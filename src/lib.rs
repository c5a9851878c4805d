//! # midi-message - MIDI Message Codec
//!
//! Translates raw 3-byte MIDI channel voice / channel mode frames into named
//! records and builds frames from named parameters.
//!
//! ## Architecture
//!
//! midi-message is an umbrella crate over:
//! - **midi-message-core** - pure codec: note and controller tables, decoder,
//!   encoder, loosely typed parameter validation
//!
//! and adds the [`MidiMessage`] facade (shared tables, builder configuration,
//! `tracing` instrumentation, JSON requests).
//!
//! ## Quick Start
//!
//! ```
//! use midi_message::prelude::*;
//!
//! let codec = MidiMessage::new();
//!
//! // Incoming: hand over the bytes from the MIDI input callback
//! let msg = codec.decode([0xB1, 122, 0]);
//! assert_eq!(msg.channel, 2);
//! assert_eq!(msg.message_type(), Some(MessageType::Control));
//! let info = msg.control_info().unwrap();
//! assert!(info.channel_mode);
//! assert_eq!(info.control_name.as_deref(), Some("local control off"));
//!
//! // Outgoing: build a frame for the MIDI output port
//! let frame = codec.encode(&EncodeRequest::pitch_bend(1, PITCH_BEND_CENTER))?;
//! assert_eq!(frame, [0xE0, 0x00, 0x40]);
//! # Ok::<(), midi_message::Error>(())
//! ```

/// Re-export of midi-message-core for direct access
pub use midi_message_core as core;

// Codec types
pub use midi_message_core::{
    decode, encode, is_channel_mode, CCNumber, Channel, ChannelMessage, ControlInfo,
    ControllerIndex, ControllerOverrideError, DecodedMessage, Decoder, EncodeError,
    EncodeErrorKind, EncodeRequest, Encoder, MessageParams, MessageType, NoteIndex, NoteRef,
    Numeral, RawFrame, Severity, PITCH_BEND_CENTER, PITCH_BEND_MAX,
};

mod error;
pub use error::{Error, Result};

mod builder;
mod codec;

pub use builder::MidiMessageBuilder;
pub use codec::MidiMessage;

/// Convenience prelude for common imports
pub mod prelude {
    pub use crate::{MidiMessage, MidiMessageBuilder};

    pub use crate::core::{
        DecodedMessage, EncodeError, EncodeRequest, MessageParams, MessageType, NoteRef,
        RawFrame, PITCH_BEND_CENTER,
    };
}
