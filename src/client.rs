//! High-level client for the Termux:API feature helpers.
//!
//! This module provides [`TermuxClient`], the main entry point for calling
//! into the Termux:API app.
//!
//! # Example
//!
//! ```ignore
//! use termux_api::{Result, TermuxClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = TermuxClient::new();
//!     client.toast("hello from Rust", &Default::default()).await?;
//!     let clipboard = client.clipboard_get().await?;
//!     println!("{}", clipboard);
//!     Ok(())
//! }
//! ```

use std::sync::Arc;
use std::time::Duration;

use crate::api;
use crate::config::{
    ApiConfig, ApiConfigBuilder, AuthResult, Confirmation, FingerprintPrompt, TextInputOptions,
    ToastOptions, VolumeStream,
};
use crate::{Result, SensorStream, Volumes};

/// A client for the Termux:API helper programs.
///
/// Every call spawns one helper process, exchanges bytes with it over its
/// standard streams, and tears it down before returning. The client itself
/// holds only configuration; it is `Send + Sync`, cheap to clone, and
/// concurrent calls are independent.
#[derive(Debug, Clone)]
pub struct TermuxClient {
    config: Arc<ApiConfig>,
}

impl Default for TermuxClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TermuxClient {
    /// Create a client with the default configuration (stock Termux paths).
    pub fn new() -> Self {
        Self::with_config(ApiConfig::default())
    }

    /// Create a client with the given configuration.
    pub fn with_config(config: ApiConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Create a builder for configuring a new client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Get a reference to the client's configuration.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Keep-alive service
    // -------------------------------------------------------------------------

    /// Start the Termux:API keep-alive service, so the app stays warm
    /// across many helper calls.
    pub async fn start_keep_alive(&self) -> Result<()> {
        api::start_keep_alive(&self.config).await
    }

    /// Stop the keep-alive service again.
    pub async fn stop_keep_alive(&self) -> Result<()> {
        api::stop_keep_alive(&self.config).await
    }

    // -------------------------------------------------------------------------
    // Clipboard
    // -------------------------------------------------------------------------

    /// Read the system clipboard.
    pub async fn clipboard_get(&self) -> Result<String> {
        api::clipboard::get(&self.config).await
    }

    /// Replace the system clipboard contents.
    pub async fn clipboard_set(&self, text: &str) -> Result<()> {
        api::clipboard::set(&self.config, text).await
    }

    // -------------------------------------------------------------------------
    // Dialogs
    // -------------------------------------------------------------------------

    /// Ask a yes/no question.
    pub async fn dialog_confirm(
        &self,
        hint: Option<&str>,
        title: Option<&str>,
    ) -> Result<Confirmation> {
        api::dialog::confirm(&self.config, hint, title).await
    }

    /// Offer checkboxes; `Ok(Some(indexes))` of the ticked entries, or
    /// `Ok(None)` if the dialog was dismissed.
    pub async fn dialog_checkbox<S: AsRef<str>>(
        &self,
        values: &[S],
        title: Option<&str>,
    ) -> Result<Option<Vec<usize>>> {
        api::dialog::checkbox(&self.config, values, title).await
    }

    /// Pick a number between `min` and `max`, starting at `start`.
    pub async fn dialog_counter(
        &self,
        title: Option<&str>,
        min: i32,
        max: i32,
        start: i32,
    ) -> Result<Option<i32>> {
        api::dialog::counter(&self.config, title, min, max, start).await
    }

    /// Pick a date, formatted per `format` (`SimpleDateFormat` syntax) or
    /// the device default.
    pub async fn dialog_date(
        &self,
        format: Option<&str>,
        title: Option<&str>,
    ) -> Result<Option<String>> {
        api::dialog::date(&self.config, format, title).await
    }

    /// Pick exactly one of `values` via radio buttons.
    pub async fn dialog_radio<S: AsRef<str>>(
        &self,
        values: &[S],
        title: Option<&str>,
    ) -> Result<Option<usize>> {
        api::dialog::radio(&self.config, values, title).await
    }

    /// Pick one of `values` from a bottom sheet.
    pub async fn dialog_sheet<S: AsRef<str>>(
        &self,
        values: &[S],
        title: Option<&str>,
    ) -> Result<Option<usize>> {
        api::dialog::sheet(&self.config, values, title).await
    }

    /// Pick one of `values` from a spinner.
    pub async fn dialog_spinner<S: AsRef<str>>(
        &self,
        values: &[S],
        title: Option<&str>,
    ) -> Result<Option<usize>> {
        api::dialog::spinner(&self.config, values, title).await
    }

    /// Take spoken input. Fails with [`Error::Api`](crate::Error::Api) when
    /// the device has no speech recognizer.
    pub async fn dialog_speech(
        &self,
        hint: Option<&str>,
        title: Option<&str>,
    ) -> Result<Option<String>> {
        api::dialog::speech(&self.config, hint, title).await
    }

    /// Take typed input.
    pub async fn dialog_text(
        &self,
        hint: Option<&str>,
        title: Option<&str>,
        options: TextInputOptions,
    ) -> Result<Option<String>> {
        api::dialog::text(&self.config, hint, title, options).await
    }

    /// Pick a time of day; `Ok(Some((hour, minute)))` on confirmation.
    pub async fn dialog_time(&self, title: Option<&str>) -> Result<Option<(u32, u32)>> {
        api::dialog::time(&self.config, title).await
    }

    // -------------------------------------------------------------------------
    // Fingerprint
    // -------------------------------------------------------------------------

    /// Prompt for fingerprint authentication.
    pub async fn fingerprint(&self, prompt: &FingerprintPrompt) -> Result<AuthResult> {
        api::fingerprint::authenticate(&self.config, prompt).await
    }

    // -------------------------------------------------------------------------
    // Sensors
    // -------------------------------------------------------------------------

    /// List the device's sensors by name.
    pub async fn sensor_list(&self) -> Result<Vec<String>> {
        api::sensor::list(&self.config).await
    }

    /// Take a single reading from one sensor.
    pub async fn sensor_read(&self, sensor: &str) -> Result<Vec<f64>> {
        api::sensor::read_one(&self.config, sensor).await
    }

    /// Watch one or more sensors continuously. The returned stream yields
    /// one readings document per update until closed.
    pub async fn sensor_watch<S: AsRef<str>>(
        &self,
        sensors: &[S],
        delay: Option<Duration>,
    ) -> Result<SensorStream> {
        api::sensor::watch(&self.config, sensors, delay).await
    }

    /// Release the app's sensor listeners (battery-friendly after watching).
    pub async fn sensor_cleanup(&self) -> Result<()> {
        api::sensor::cleanup(&self.config).await
    }

    // -------------------------------------------------------------------------
    // Toast, torch, vibration
    // -------------------------------------------------------------------------

    /// Show a toast.
    pub async fn toast(&self, text: &str, options: &ToastOptions) -> Result<()> {
        api::device::toast(&self.config, text, options).await
    }

    /// Switch the camera torch on or off.
    pub async fn torch(&self, enabled: bool) -> Result<()> {
        api::device::torch(&self.config, enabled).await
    }

    /// Vibrate for `duration` (the stock one second when `None`); `force`
    /// vibrates even in silent mode.
    pub async fn vibrate(&self, duration: Option<Duration>, force: bool) -> Result<()> {
        api::device::vibrate(&self.config, duration, force).await
    }

    // -------------------------------------------------------------------------
    // Volume
    // -------------------------------------------------------------------------

    /// Read every audio stream's volume and ceiling.
    pub async fn volume_get(&self) -> Result<Volumes> {
        api::volume::get(&self.config).await
    }

    /// Set one audio stream's volume.
    pub async fn set_volume(&self, stream: VolumeStream, volume: i32) -> Result<()> {
        api::volume::set(&self.config, stream, volume).await
    }

    /// Bring the device to the target volumes, one set per changed stream;
    /// returns what was actually applied after clamping to each ceiling.
    pub async fn volume_apply(&self, target: &Volumes) -> Result<Volumes> {
        api::volume::apply(&self.config, target).await
    }
}

/// Builder for [`TermuxClient`].
///
/// This wraps [`ApiConfigBuilder`] and builds directly into a client.
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    inner: ApiConfigBuilder,
}

impl ClientBuilder {
    /// Create a new client builder with default settings.
    pub fn new() -> Self {
        Self {
            inner: ApiConfigBuilder::default(),
        }
    }

    /// Path of the API dispatch binary.
    pub fn api_path(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.inner = self.inner.api_path(path);
        self
    }

    /// Path of the `am` (activity manager) binary.
    pub fn am_path(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.inner = self.inner.am_path(path);
        self
    }

    /// Upper bound on reading a helper's reply.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.inner = self.inner.timeout(duration);
        self
    }

    /// Add/override an environment variable for spawned helpers.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.inner = self.inner.env(key, value);
        self
    }

    /// Whether spawned helpers inherit the parent environment.
    pub fn inherit_env(mut self, inherit: bool) -> Self {
        self.inner = self.inner.inherit_env(inherit);
        self
    }

    /// Build the client.
    pub fn build(self) -> TermuxClient {
        TermuxClient::with_config(self.inner.build())
    }
}
