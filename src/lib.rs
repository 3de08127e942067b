//! # termux-api
//!
//! Async Rust interface to the Termux:API helper programs on Android.
//!
//! Each feature call spawns one helper process, talks to it over piped
//! standard streams, and tears it down deterministically. The crate has two
//! layers:
//!
//! - [`pipe`]: the process-pipe primitive. Spawns a child with two or three
//!   piped standard streams, offers byte/line I/O and wait with an optional
//!   timeout, and tears down in a way that reaps the child on every path.
//! - [`TermuxClient`]: one method per Termux:API feature (clipboard,
//!   dialogs, sensors, toast, torch, vibration, volume, fingerprint),
//!   building the helper's argument vector and decoding its JSON reply.
//!
//! Only POSIX targets are supported; the pipe layer leans directly on
//! process ids, termination signals, and wait statuses.
//!
//! ## Quick Start
//!
//! ```ignore
//! use termux_api::{Result, TermuxClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = TermuxClient::new();
//!     client.toast("hello!", &Default::default()).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Talking to an arbitrary program
//!
//! ```ignore
//! use termux_api::pipe::Pipe;
//!
//! let mut pipe = Pipe::open("/bin/cat", ["-"], None).await?;
//! pipe.write_line("echoed back").await?;
//! pipe.flush().await?;
//! let line = pipe.read_line().await?;
//! let exit = pipe.close().await?;
//! ```
//!
//! ## Watching sensors
//!
//! ```ignore
//! use futures::StreamExt;
//!
//! let mut stream = client.sensor_watch(&["accelerometer"], None).await?;
//! while let Some(readings) = stream.next().await {
//!     println!("{:?}", readings?);
//! }
//! ```

mod api;
mod client;
pub mod config;
mod error;
pub mod pipe;
pub mod protocol;

pub use error::{Error, Result};

// Re-export the main client types at crate root
pub use client::{ClientBuilder, TermuxClient};

// Re-export commonly used config types at crate root
pub use config::{
    ApiConfig, ApiConfigBuilder, AuthResult, Confirmation, FingerprintPrompt, TextInputOptions,
    ToastGravity, ToastOptions, VolumeStream,
};

// Re-export commonly used pipe types at crate root
pub use pipe::{Channel, Exit, Pipe};

// Re-export the feature data types at crate root
pub use api::{SensorStream, StreamVolume, Volumes};

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}
    fn assert_send<T: Send>() {}

    /// All major public types must be Send + Sync for use across async tasks.
    #[test]
    fn public_types_are_send_sync() {
        // Client types
        assert_send_sync::<TermuxClient>();
        assert_send_sync::<ClientBuilder>();

        // Configuration types
        assert_send_sync::<ApiConfig>();
        assert_send_sync::<ApiConfigBuilder>();
        assert_send_sync::<ToastOptions>();
        assert_send_sync::<VolumeStream>();

        // Pipe types
        assert_send_sync::<Pipe>();
        assert_send_sync::<Exit>();
        assert_send_sync::<Channel>();

        // Feature data types
        assert_send_sync::<Volumes>();
        assert_send_sync::<StreamVolume>();

        // Error type
        assert_send_sync::<Error>();
    }

    /// SensorStream is Send but not Sync (it holds an in-flight read).
    #[test]
    fn sensor_stream_is_send() {
        assert_send::<SensorStream>();
    }
}
