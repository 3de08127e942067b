//! Toast, torch, and vibration.

use std::time::Duration;

use super::{extra, open_api, run_checked, RUN_TIMEOUT, TOAST_TIMEOUT};
use crate::config::{ApiConfig, ToastOptions};
use crate::Result;

fn toast_args(options: &ToastOptions) -> Vec<String> {
    let mut args = vec!["Toast".to_string()];
    if options.short {
        extra(&mut args, "--ez", "short", "true");
    }
    if let Some(color) = &options.text_color {
        extra(&mut args, "--es", "text_color", color);
    }
    if let Some(background) = &options.background {
        extra(&mut args, "--es", "background", background);
    }
    if let Some(gravity) = options.gravity {
        extra(&mut args, "--es", "gravity", gravity.to_string());
    }
    args
}

fn torch_args(enabled: bool) -> Vec<String> {
    let mut args = vec!["Torch".to_string()];
    extra(&mut args, "--ez", "enabled", if enabled { "1" } else { "0" });
    args
}

fn vibrate_args(duration: Option<Duration>, force: bool) -> Vec<String> {
    let ms = duration.map_or(1000, |d| d.as_millis().max(1) as u64);
    let mut args = vec!["Vibrate".to_string()];
    extra(&mut args, "--ei", "duration_ms", ms.to_string());
    if force {
        extra(&mut args, "--ez", "force", "true");
    }
    args
}

/// Show a toast. The text travels over the helper's stdin, not the
/// argument vector, so arbitrary content is safe.
///
/// Toasts outlive their helper process; the short bounded wait only gives
/// the helper a chance to hand the text off before teardown.
pub(crate) async fn toast(config: &ApiConfig, text: &str, options: &ToastOptions) -> Result<()> {
    let args = toast_args(options);
    let mut pipe = open_api(config, &args).await?;
    pipe.write_line(text).await?;
    pipe.flush().await?;
    if let Err(e) = pipe.wait(Some(TOAST_TIMEOUT)).await {
        if !e.is_timeout() {
            tracing::warn!(error = %e, "waiting on toast helper failed");
        }
    }
    let exit = pipe.close().await?;
    if !exit.success() {
        tracing::debug!(%exit, "toast helper did not exit cleanly");
    }
    Ok(())
}

/// Switch the camera torch on or off.
pub(crate) async fn torch(config: &ApiConfig, enabled: bool) -> Result<()> {
    run_checked(config, torch_args(enabled), RUN_TIMEOUT).await
}

/// Vibrate the device. `None` uses the stock one-second duration; `force`
/// vibrates even in silent mode.
pub(crate) async fn vibrate(
    config: &ApiConfig,
    duration: Option<Duration>,
    force: bool,
) -> Result<()> {
    run_checked(config, vibrate_args(duration, force), RUN_TIMEOUT).await
}
