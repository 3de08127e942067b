//! Type-safe option values for the Termux:API helpers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placement of a toast on the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastGravity {
    Top,
    Middle,
    Bottom,
}

impl fmt::Display for ToastGravity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToastGravity::Top => write!(f, "top"),
            ToastGravity::Middle => write!(f, "middle"),
            ToastGravity::Bottom => write!(f, "bottom"),
        }
    }
}

/// Options for [`toast`](crate::TermuxClient::toast).
#[derive(Debug, Clone, Default)]
pub struct ToastOptions {
    /// Show the toast only briefly.
    pub short: bool,
    /// Text color, e.g. `"white"` or `"#FFFFFF"`.
    pub text_color: Option<String>,
    /// Background color.
    pub background: Option<String>,
    /// Where the toast appears; the device default when `None`.
    pub gravity: Option<ToastGravity>,
}

/// Options for [`dialog_text`](crate::TermuxClient::dialog_text).
#[derive(Debug, Clone, Copy, Default)]
pub struct TextInputOptions {
    /// Allow multiple lines of input.
    pub multiple_lines: bool,
    /// Hide the typed input.
    pub password: bool,
    /// Restrict input to numbers.
    pub numeric: bool,
}

/// Answer to a confirmation dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Confirmation {
    Yes,
    No,
    /// The dialog was dismissed without answering.
    Dismissed,
}

/// Texts shown on a fingerprint authentication prompt.
///
/// Every field is optional; the device shows its stock wording for any
/// field left unset.
#[derive(Debug, Clone, Default)]
pub struct FingerprintPrompt {
    pub title: Option<String>,
    pub description: Option<String>,
    pub subtitle: Option<String>,
    /// Label of the cancel button.
    pub cancel: Option<String>,
}

/// Outcome of a fingerprint authentication prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthResult {
    Success,
    Failure,
    /// The helper reported something other than success or failure,
    /// e.g. too many failed attempts or a hardware error.
    Unknown,
}

/// One of the six Android audio streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeStream {
    Call,
    System,
    Ring,
    Music,
    Alarm,
    Notification,
}

impl VolumeStream {
    /// Every stream, in the order the helper reports them.
    pub const ALL: [VolumeStream; 6] = [
        VolumeStream::Call,
        VolumeStream::System,
        VolumeStream::Ring,
        VolumeStream::Music,
        VolumeStream::Alarm,
        VolumeStream::Notification,
    ];

    /// The stream name the helper expects.
    pub fn as_str(&self) -> &'static str {
        match self {
            VolumeStream::Call => "call",
            VolumeStream::System => "system",
            VolumeStream::Ring => "ring",
            VolumeStream::Music => "music",
            VolumeStream::Alarm => "alarm",
            VolumeStream::Notification => "notification",
        }
    }
}

impl fmt::Display for VolumeStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
