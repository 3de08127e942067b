//! Configuration for the Termux:API client.
//!
//! This module provides:
//!
//! - [`ApiConfig`] and [`ApiConfigBuilder`] for configuring the client
//! - Type-safe options like [`ToastGravity`], [`VolumeStream`], and
//!   [`TextInputOptions`]
//!
//! # Example
//!
//! ```ignore
//! use termux_api::config::ApiConfig;
//!
//! let config = ApiConfig::builder()
//!     .api_path("/custom/bin/termux-api")
//!     .env("ANDROID_DATA", "/data")
//!     .build();
//! ```

pub mod builder;
pub mod options;

// Re-export commonly used types
pub use builder::{ApiConfig, ApiConfigBuilder, TERMUX_PREFIX};
pub use options::{
    AuthResult, Confirmation, FingerprintPrompt, TextInputOptions, ToastGravity, ToastOptions,
    VolumeStream,
};
