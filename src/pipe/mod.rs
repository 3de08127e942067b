//! Process-pipe primitives for talking to Termux:API helper programs.
//!
//! This module handles spawning a child process with piped standard streams
//! and communicating with it until teardown.
//!
//! # Architecture
//!
//! ```text
//! termux-api                        helper process
//! ┌─────────────┐                   ┌─────────────┐
//! │    Pipe     │───stdin──────────▶│             │
//! │             │◀──stdout──────────│             │
//! │             │◀──stderr (open3)──│             │
//! └─────────────┘                   └─────────────┘
//! ```
//!
//! A [`Pipe`] is created by [`Pipe::open`] (stdin + stdout captured) or
//! [`Pipe::open3`] (stderr captured as well), used through its read/write
//! primitives, optionally waited on with [`Pipe::wait`], and finalized
//! exactly once by [`Pipe::close`], which reaps the child and reports its
//! [`Exit`] status.
//!
//! # Lifecycle
//!
//! At any time the pipe is either open (live or already-exited child, pid
//! known) or closed (all channels released, pid cleared). `close` is the
//! only operation that releases the channels and reaps the child; calling
//! it a second time fails with [`Error::NoSuchChild`](crate::Error::NoSuchChild).

mod io;
mod spawn;

pub use io::{ReadChannel, WriteChannel};
pub use spawn::{Exit, Pipe};

use std::fmt;

/// Interval between termination requests while reaping an unresponsive
/// child in [`Pipe::close`].
pub(crate) const REAP_INTERVAL_MS: u64 = 10;

/// One directional byte stream connected to a child's standard stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// The child's standard input (written by the parent).
    Stdin,
    /// The child's standard output (read by the parent).
    Stdout,
    /// The child's standard error (read by the parent, three-pipe only).
    Stderr,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Stdin => write!(f, "stdin"),
            Channel::Stdout => write!(f, "stdout"),
            Channel::Stderr => write!(f, "stderr"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn types_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Pipe>();
        assert_send_sync::<Exit>();
        assert_send_sync::<Channel>();
    }

    #[test]
    fn channel_display() {
        assert_eq!(Channel::Stdin.to_string(), "stdin");
        assert_eq!(Channel::Stdout.to_string(), "stdout");
        assert_eq!(Channel::Stderr.to_string(), "stderr");
    }
}
