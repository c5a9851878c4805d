//! Controller (CC) names and channel-mode message resolution.
//!
//! Controllers 0-119 are continuous controllers looked up in a static table.
//! Controllers 120-127 are reserved for channel-mode messages, whose meaning also
//! depends on the data value.

use std::borrow::Cow;
use std::sync::OnceLock;

use serde::Serialize;
use thiserror::Error;

/// MIDI CC number (0-127)
pub type CCNumber = u8;

/// First controller number of the reserved channel-mode range.
pub const CHANNEL_MODE_FIRST: CCNumber = 120;

/// Number of controller numbers.
pub const CONTROLLER_COUNT: usize = 128;

/// Default controller names, indexed by controller number.
pub const CONTROLLER_NAMES: [&str; CONTROLLER_COUNT] = [
    "bank select",
    "mod wheel",
    "breath controller",
    "undefined",
    "foot controller",
    "portamento time",
    "data entry MSB",
    "main volume",
    "balance",
    "undefined",
    "pan",
    "0Ch",
    "effect control 1",
    "effect control 2",
    "undefined",
    "undefined",
    "general purpose controller 1",
    "general purpose controller 2",
    "general purpose controller 3",
    "general purpose controller 4",
    "undefined",
    "undefined",
    "undefined",
    "undefined",
    "undefined",
    "undefined",
    "undefined",
    "undefined",
    "undefined",
    "undefined",
    "undefined",
    "undefined",
    "controller 0 LSB",
    "controller 1 LSB",
    "controller 2 LSB",
    "controller 3 LSB",
    "controller 4 LSB",
    "controller 5 LSB",
    "controller 6 LSB",
    "controller 7 LSB",
    "controller 8 LSB",
    "controller 9 LSB",
    "controller 10 LSB",
    "controller 11 LSB",
    "controller 12 LSB",
    "controller 13 LSB",
    "controller 14 LSB",
    "controller 15 LSB",
    "controller 16 LSB",
    "controller 17 LSB",
    "controller 18 LSB",
    "controller 19 LSB",
    "controller 20 LSB",
    "controller 21 LSB",
    "controller 22 LSB",
    "controller 23 LSB",
    "controller 24 LSB",
    "controller 25 LSB",
    "controller 26 LSB",
    "controller 27 LSB",
    "controller 28 LSB",
    "controller 29 LSB",
    "controller 30 LSB",
    "controller 31 LSB",
    "damper pedal",
    "portamento",
    "sostenuto",
    "soft pedal",
    "legato footswitch",
    "hold 2",
    "sound controller 1 (expression)",
    "sound controller 2 (timbre)",
    "sound controller 3 (release)",
    "sound controller 4 (attack)",
    "sound controller 5 (brightness)",
    "sound controller 6",
    "sound controller 7",
    "sound controller 8",
    "sound controller 9",
    "sound controller 10",
    "general purpose controller 5",
    "general purpose controller 6",
    "general purpose controller 7",
    "general purpose controller 8",
    "portamento control",
    "undefined",
    "undefined",
    "undefined",
    "undefined",
    "undefined",
    "undefined",
    "effect 1 depth (external)",
    "effect 2 depth (tremolo)",
    "effect 3 depth (chorus)",
    "effect 4 depth (detune)",
    "effect 5 depth (phaser)",
    "data increment",
    "data increment",
    "non-registered parameter number LSB",
    "non-registered parameter number LSB",
    "registered parameter number LSB",
    "registered parameter number MSB",
    "undefined",
    "undefined",
    "undefined",
    "undefined",
    "undefined",
    "undefined",
    "undefined",
    "undefined",
    "undefined",
    "undefined",
    "undefined",
    "undefined",
    "undefined",
    "undefined",
    "undefined",
    "undefined",
    "undefined",
    "undefined",
    "undefined",
    "undefined",
    "undefined",
    "undefined",
    "undefined",
    "undefined",
    "undefined",
    "undefined",
];

/// What a control message means.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlInfo<'a> {
    /// `true` for a recognised channel-mode message (controllers 120-127).
    pub channel_mode: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_name: Option<Cow<'a, str>>,
}

impl<'a> ControlInfo<'a> {
    fn controller(name: Option<&'a str>) -> Self {
        Self {
            channel_mode: false,
            control_name: name.map(Cow::Borrowed),
        }
    }

    fn mode_message(name: impl Into<Cow<'a, str>>) -> Self {
        Self {
            channel_mode: true,
            control_name: Some(name.into()),
        }
    }

    fn unassigned() -> Self {
        Self {
            channel_mode: false,
            control_name: None,
        }
    }

    pub fn into_owned(self) -> ControlInfo<'static> {
        ControlInfo {
            channel_mode: self.channel_mode,
            control_name: self.control_name.map(|n| Cow::Owned(n.into_owned())),
        }
    }
}

/// Rejected controller name override.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControllerOverrideError {
    #[error("controller {0} is reserved for channel mode messages")]
    Reserved(CCNumber),

    #[error("controller {0} is out of range (0-127)")]
    OutOfRange(CCNumber),
}

/// Immutable controller name table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerIndex {
    names: Vec<Cow<'static, str>>,
}

impl ControllerIndex {
    pub fn new() -> Self {
        Self {
            names: CONTROLLER_NAMES.iter().map(|n| Cow::Borrowed(*n)).collect(),
        }
    }

    /// Process-wide standard table, built on first use.
    pub fn shared() -> &'static ControllerIndex {
        static SHARED: OnceLock<ControllerIndex> = OnceLock::new();
        SHARED.get_or_init(ControllerIndex::new)
    }

    /// Standard table with some continuous controllers renamed.
    ///
    /// Only controllers 0-119 can be renamed; the channel-mode range keeps its
    /// fixed meaning.
    pub fn with_overrides<I, S>(overrides: I) -> Result<Self, ControllerOverrideError>
    where
        I: IntoIterator<Item = (CCNumber, S)>,
        S: Into<String>,
    {
        let mut index = Self::new();
        for (number, name) in overrides {
            if number as usize >= CONTROLLER_COUNT {
                return Err(ControllerOverrideError::OutOfRange(number));
            }
            if is_channel_mode(number) {
                return Err(ControllerOverrideError::Reserved(number));
            }
            index.names[number as usize] = Cow::Owned(name.into());
        }
        Ok(index)
    }

    /// Table name of a controller, without channel-mode interpretation.
    #[inline]
    pub fn name(&self, number: CCNumber) -> Option<&str> {
        self.names.get(number as usize).map(|n| n.as_ref())
    }

    /// Interpret a control message's two data bytes.
    pub fn resolve(&self, number: CCNumber, value: u8) -> ControlInfo<'_> {
        if !is_channel_mode(number) {
            return ControlInfo::controller(self.name(number));
        }

        match (number, value) {
            (120, 0) => ControlInfo::mode_message("all sound off"),
            (121, _) => ControlInfo::mode_message("reset all controllers"),
            (122, 0) => ControlInfo::mode_message("local control off"),
            (122, 127) => ControlInfo::mode_message("local control on"),
            (122, _) => ControlInfo::mode_message("local control (unspecified)"),
            (123, 0) => ControlInfo::mode_message("all notes off"),
            (124, 0) => ControlInfo::mode_message("omni mode off"),
            (125, 0) => ControlInfo::mode_message("omni mode on"),
            (126, 0) => ControlInfo::mode_message("mono mode 0 (omni on)"),
            (126, channels) => ControlInfo::mode_message(format!("mono mode ({channels})")),
            (127, 0) => ControlInfo::mode_message("poly mode on"),
            _ => ControlInfo::unassigned(),
        }
    }
}

impl Default for ControllerIndex {
    fn default() -> Self {
        Self::new()
    }
}

/// `true` for controllers 120-127.
#[inline]
pub const fn is_channel_mode(number: CCNumber) -> bool {
    number >= CHANNEL_MODE_FIRST && (number as usize) < CONTROLLER_COUNT
}
