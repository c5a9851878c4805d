//! MidiMessage, the codec facade over the shared lookup tables.

use std::sync::Arc;

use midi_message_core::{
    ControllerIndex, DecodedMessage, Decoder, EncodeError, EncodeRequest, Encoder, MessageParams,
    NoteIndex, RawFrame,
};

use crate::builder::MidiMessageBuilder;
use crate::{Error, Result};

/// Decodes and encodes 3-byte MIDI frames.
///
/// Cloning is cheap: the note and controller tables sit behind `Arc` and are
/// never mutated, so clones can be moved to other threads (e.g. one per MIDI
/// input callback).
///
/// The codec itself only reports through return values; it additionally emits
/// `tracing` events (`trace` per decode, `debug` per encode, `warn` per rejected
/// request) for hosts that install a subscriber.
///
/// # Example
///
/// ```
/// use midi_message::prelude::*;
///
/// let codec = MidiMessage::new();
///
/// let msg = codec.decode([0x90, 60, 100]);
/// assert_eq!(msg.note_name(), Some("C(5)"));
///
/// let frame = codec.encode(&EncodeRequest::note_off(1, "C(5)"))?;
/// assert_eq!(frame, [0x80, 60, 0]);
/// # Ok::<(), midi_message::EncodeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MidiMessage {
    notes: Arc<NoteIndex>,
    controllers: Arc<ControllerIndex>,
    log_errors: bool,
}

impl MidiMessage {
    /// Codec with the standard tables.
    pub fn new() -> Self {
        Self::from_parts(
            Arc::new(NoteIndex::new()),
            Arc::new(ControllerIndex::new()),
            true,
        )
    }

    pub fn builder() -> MidiMessageBuilder {
        MidiMessageBuilder::default()
    }

    pub(crate) fn from_parts(
        notes: Arc<NoteIndex>,
        controllers: Arc<ControllerIndex>,
        log_errors: bool,
    ) -> Self {
        Self {
            notes,
            controllers,
            log_errors,
        }
    }

    pub fn notes(&self) -> &NoteIndex {
        &self.notes
    }

    pub fn controllers(&self) -> &ControllerIndex {
        &self.controllers
    }

    pub fn logs_errors(&self) -> bool {
        self.log_errors
    }

    pub fn decoder(&self) -> Decoder<'_> {
        Decoder::new(&self.notes, &self.controllers)
    }

    pub fn encoder(&self) -> Encoder<'_> {
        Encoder::new(&self.notes)
    }

    /// Decode a frame. Never fails; check [`DecodedMessage::message_type`] for
    /// unrecognised status bytes.
    pub fn decode(&self, frame: RawFrame) -> DecodedMessage<'_> {
        let msg = self.decoder().decode(frame);
        match msg.message_type() {
            Some(kind) => tracing::trace!(?frame, channel = msg.channel, "Decoded {}", kind),
            None => tracing::debug!(?frame, "Unrecognized MIDI status byte {:#04x}", frame[0]),
        }
        msg
    }

    /// Decode a message as delivered by an OS MIDI API.
    ///
    /// Program change and channel aftertouch arrive as two bytes; missing data
    /// bytes are read as 0. Empty input or more than three bytes is rejected.
    pub fn decode_bytes(&self, bytes: &[u8]) -> Result<DecodedMessage<'_>> {
        if bytes.is_empty() || bytes.len() > 3 {
            return Err(Error::FrameLength(bytes.len()));
        }
        let mut frame = [0u8; 3];
        frame[..bytes.len()].copy_from_slice(bytes);
        Ok(self.decode(frame))
    }

    pub fn encode(&self, request: &EncodeRequest) -> midi_message_core::Result<RawFrame> {
        let result = self.encoder().encode(request);
        self.trace_encode(result)
    }

    /// Encode loosely typed parameters. `None` means no parameters were given.
    pub fn encode_params(
        &self,
        params: Option<&MessageParams>,
    ) -> midi_message_core::Result<RawFrame> {
        let result = self.encoder().encode_params(params);
        self.trace_encode(result)
    }

    /// Encode a JSON parameter record, e.g.
    /// `{"messageType": "note on", "channel": 1, "noteName": "C(5)"}`.
    ///
    /// A JSON `null` is treated as missing arguments.
    pub fn encode_json(&self, json: &str) -> Result<RawFrame> {
        let params: Option<MessageParams> = serde_json::from_str(json)?;
        Ok(self.encode_params(params.as_ref())?)
    }

    fn trace_encode(
        &self,
        result: midi_message_core::Result<RawFrame>,
    ) -> midi_message_core::Result<RawFrame> {
        match &result {
            Ok(frame) => tracing::debug!(?frame, "Encoded MIDI frame"),
            Err(e) => self.report(e),
        }
        result
    }

    fn report(&self, err: &EncodeError) {
        if self.log_errors {
            tracing::warn!(
                kind = %err.kind,
                code = err.code(),
                operation = err.operation,
                severity = ?err.severity,
                "{}",
                err.message
            );
        }
    }
}

impl Default for MidiMessage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use midi_message_core::{EncodeErrorKind, MessageType};

    #[test]
    fn test_decode_bytes_pads_short_messages() {
        let codec = MidiMessage::new();
        let msg = codec.decode_bytes(&[0xC0, 5]).unwrap();
        assert_eq!(msg.message_type(), Some(MessageType::ProgramChange));
        assert_eq!(msg.patch_number(), Some(5));
        assert_eq!(msg.raw, [0xC0, 5, 0]);
    }

    #[test]
    fn test_decode_bytes_rejects_bad_length() {
        let codec = MidiMessage::new();
        assert!(matches!(codec.decode_bytes(&[]), Err(Error::FrameLength(0))));
        assert!(matches!(
            codec.decode_bytes(&[0xF0, 1, 2, 3]),
            Err(Error::FrameLength(4))
        ));
    }

    #[test]
    fn test_encode_json() {
        let codec = MidiMessage::new();
        let frame = codec
            .encode_json(r#"{"messageType": "note on", "channel": 1, "noteName": "C(5)", "velocity": 64}"#)
            .unwrap();
        assert_eq!(frame, [0x90, 60, 64]);
    }

    #[test]
    fn test_encode_json_null_is_missing_arguments() {
        let codec = MidiMessage::new();
        let err = codec.encode_json("null").unwrap_err();
        assert_eq!(
            err.as_encode().map(|e| e.kind),
            Some(EncodeErrorKind::MissingArguments)
        );
    }

    #[test]
    fn test_encode_json_malformed() {
        let codec = MidiMessage::new();
        assert!(matches!(codec.encode_json("{not json"), Err(Error::Json(_))));
    }

    #[test]
    fn test_clones_share_tables() {
        let codec = MidiMessage::new();
        let clone = codec.clone();
        assert!(std::ptr::eq(codec.notes(), clone.notes()));
        assert!(std::ptr::eq(codec.controllers(), clone.controllers()));
    }
}
