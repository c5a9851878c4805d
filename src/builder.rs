//! Builder for configuring and constructing a `MidiMessage` codec.

use std::sync::Arc;

use midi_message_core::{CCNumber, ControllerIndex, NoteIndex};

use crate::{MidiMessage, Result};

/// Tables are built once in [`build`](Self::build) and never change afterwards.
///
/// # Example
///
/// ```
/// use midi_message::MidiMessage;
///
/// let codec = MidiMessage::builder()
///     .controller_name(102, "chord trigger")
///     .build()?;
///
/// let msg = codec.decode([0xB0, 102, 127]);
/// assert_eq!(
///     msg.control_info().and_then(|i| i.control_name.as_deref()),
///     Some("chord trigger")
/// );
/// # Ok::<(), midi_message::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct MidiMessageBuilder {
    controller_names: Vec<(CCNumber, String)>,
    log_errors: bool,
}

impl Default for MidiMessageBuilder {
    fn default() -> Self {
        Self {
            controller_names: Vec::new(),
            log_errors: true,
        }
    }
}

impl MidiMessageBuilder {
    /// Rename a continuous controller (0-119). Later calls for the same number win.
    pub fn controller_name(mut self, number: CCNumber, name: impl Into<String>) -> Self {
        self.controller_names.push((number, name.into()));
        self
    }

    /// Emit a `warn` event for every rejected encode request. Default: true
    pub fn log_errors(mut self, enabled: bool) -> Self {
        self.log_errors = enabled;
        self
    }

    /// Fails if an override targets a channel-mode controller (120-127) or a
    /// number above 127.
    pub fn build(self) -> Result<MidiMessage> {
        let controllers = if self.controller_names.is_empty() {
            ControllerIndex::new()
        } else {
            tracing::debug!(
                "Applying {} controller name override(s)",
                self.controller_names.len()
            );
            ControllerIndex::with_overrides(self.controller_names)?
        };

        Ok(MidiMessage::from_parts(
            Arc::new(NoteIndex::new()),
            Arc::new(controllers),
            self.log_errors,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use midi_message_core::ControllerOverrideError;

    #[test]
    fn test_default_build() {
        let codec = MidiMessageBuilder::default().build().unwrap();
        assert!(codec.logs_errors());
        assert_eq!(codec.controllers().name(1), Some("mod wheel"));
    }

    #[test]
    fn test_override_last_wins() {
        let codec = MidiMessageBuilder::default()
            .controller_name(20, "first")
            .controller_name(20, "second")
            .build()
            .unwrap();
        assert_eq!(codec.controllers().name(20), Some("second"));
    }

    #[test]
    fn test_reserved_override_rejected() {
        let err = MidiMessageBuilder::default()
            .controller_name(123, "panic button")
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ControllerOverrideError::Reserved(123))
        ));
    }

    #[test]
    fn test_log_errors_flag() {
        let codec = MidiMessageBuilder::default().log_errors(false).build().unwrap();
        assert!(!codec.logs_errors());
    }
}
