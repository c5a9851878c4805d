//! Error types for message encoding.
//!
//! Decoding never fails; every encode failure is an [`EncodeError`] value.

use std::fmt;

use thiserror::Error;

/// What went wrong while building a frame.
///
/// The numeric [`code`](EncodeErrorKind::code) of each kind is stable and safe to
/// persist or match on from other languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodeErrorKind {
    /// No parameters were supplied at all.
    MissingArguments,
    MissingMessageType,
    MissingChannel,
    /// Channel is not a 1-5 digit numeral, or lies outside 1-16.
    InvalidChannel,
    /// Neither a note number nor a note name was given.
    MissingNoteIdentity,
    UnknownNoteName,
    MissingValue,
    /// A value is non-numeric or does not fit its data byte(s).
    InvalidValue,
    /// Well-formed request for a message kind that has no 3-byte frame encoding.
    UnsupportedMessageType,
    UnknownMessageType,
}

impl EncodeErrorKind {
    pub const fn code(self) -> u16 {
        match self {
            Self::MissingArguments => 1,
            Self::MissingMessageType => 2,
            Self::MissingChannel => 3,
            Self::InvalidChannel => 4,
            Self::MissingNoteIdentity => 5,
            Self::UnknownNoteName => 6,
            Self::MissingValue => 7,
            Self::InvalidValue => 8,
            Self::UnsupportedMessageType => 9,
            Self::UnknownMessageType => 10,
        }
    }

    pub const fn severity(self) -> Severity {
        match self {
            Self::UnsupportedMessageType => Severity::Low,
            _ => Severity::High,
        }
    }
}

impl fmt::Display for EncodeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MissingArguments => "missing arguments",
            Self::MissingMessageType => "missing message type",
            Self::MissingChannel => "missing channel",
            Self::InvalidChannel => "invalid channel",
            Self::MissingNoteIdentity => "missing note identity",
            Self::UnknownNoteName => "unknown note name",
            Self::MissingValue => "missing value",
            Self::InvalidValue => "invalid value",
            Self::UnsupportedMessageType => "unsupported message type",
            Self::UnknownMessageType => "unknown message type",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// The request was well formed but cannot be expressed as a frame.
    Low,
    /// The request itself is malformed.
    High,
}

/// A rejected encode request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct EncodeError {
    pub kind: EncodeErrorKind,
    /// Operation that rejected the request.
    pub operation: &'static str,
    pub severity: Severity,
    pub message: String,
}

impl EncodeError {
    pub fn new(operation: &'static str, kind: EncodeErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            operation,
            severity: kind.severity(),
            message: message.into(),
        }
    }

    #[inline]
    pub fn code(&self) -> u16 {
        self.kind.code()
    }
}

pub type Result<T> = std::result::Result<T, EncodeError>;
