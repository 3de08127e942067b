use std::time::Duration;

use crate::pipe::{Channel, Exit};

/// Errors that can occur when using termux-api.
///
/// Errors are organized by category:
/// - Spawn errors: failed to start a helper process
/// - IO errors: communication failures with a running child
/// - Protocol errors: unexpected or malformed helper output
/// - Runtime errors: failures during waiting and teardown
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    // -------------------------------------------------------------------------
    // Spawn errors
    // -------------------------------------------------------------------------
    /// The program to spawn was not found.
    #[error("program not found: {program}")]
    NotFound { program: String },

    /// Failed to spawn the child process.
    #[error("failed to spawn child process: {0}")]
    Spawn(#[source] std::io::Error),

    // -------------------------------------------------------------------------
    // IO errors
    // -------------------------------------------------------------------------
    /// IO error communicating with the child process.
    ///
    /// A write to a channel whose peer has gone away surfaces here as a
    /// broken-pipe error rather than a signal; see [`Error::is_broken_pipe`].
    #[error("IO error: {0}")]
    Io(#[source] std::io::Error),

    /// The requested channel is not open on this pipe.
    ///
    /// Returned when reading stderr from a two-pipe spawn, or when using any
    /// channel after `close`.
    #[error("{channel} channel is not open")]
    ChannelClosed { channel: Channel },

    // -------------------------------------------------------------------------
    // Protocol errors
    // -------------------------------------------------------------------------
    /// Failed to parse JSON from the helper's output.
    #[error("failed to parse JSON: {message}")]
    JsonParse {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// The helper reported an error of its own (an `error` field in a reply,
    /// or an error message on stderr).
    #[error("helper error: {message}")]
    Api { message: String },

    // -------------------------------------------------------------------------
    // Runtime errors
    // -------------------------------------------------------------------------
    /// A bounded wait elapsed without the child terminating.
    ///
    /// The child is left running and can still be reaped via `close`.
    #[error("child did not exit within {0:?}")]
    WaitTimeout(Duration),

    /// Operation attempted on a pipe with no live or pending child,
    /// typically a double `close`.
    #[error("no such child process")]
    NoSuchChild,

    /// The child left a status that is neither a clean exit nor a signal
    /// termination. Should not occur under POSIX semantics.
    #[error("child terminated abnormally (raw status {raw})")]
    AbnormalExit { raw: i32 },

    /// A helper invocation finished with a failure status.
    #[error("helper command failed: {exit}")]
    Failed { exit: Exit },
}

/// A specialized Result type for termux-api operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a JSON parse error with context.
    pub(crate) fn json_parse(source: serde_json::Error, raw: &str) -> Self {
        Self::JsonParse {
            message: format!(
                "at position {}: {}",
                source.column(),
                raw.chars().take(100).collect::<String>()
            ),
            source,
        }
    }

    /// Create an IO error.
    pub(crate) fn io(source: std::io::Error) -> Self {
        Self::Io(source)
    }

    /// Check if this error is a broken-pipe condition (the child closed its
    /// end of the channel before the write completed).
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::BrokenPipe)
    }

    /// Check if this error is a wait timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::WaitTimeout(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::JsonParse {
            message: err.to_string(),
            source: err,
        }
    }
}
