//! Feature wrappers over the Termux:API helper programs.
//!
//! Every feature call follows the same shape: build an argument vector for
//! the dispatch binary (a feature name followed by `--es`/`--ez`/`--ei`
//! extra pairs), spawn it through the [`pipe`](crate::pipe) layer, feed it
//! input and/or collect its output, and tear the child down.
//!
//! The shared plumbing lives here; one submodule per feature family does
//! the argument building and reply interpretation.

pub(crate) mod clipboard;
pub(crate) mod device;
pub(crate) mod dialog;
pub(crate) mod fingerprint;
pub(crate) mod sensor;
pub(crate) mod volume;

pub use sensor::SensorStream;
pub use volume::{StreamVolume, Volumes};

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::pipe::{Exit, Pipe};
use crate::{Error, Result};

/// Bounded wait applied to fire-and-forget helper runs before teardown.
pub(crate) const RUN_TIMEOUT: Duration = Duration::from_millis(1000);

/// Shorter bound for toasts, which linger on screen past their exit.
pub(crate) const TOAST_TIMEOUT: Duration = Duration::from_millis(300);

/// Component name of the keep-alive service inside the Termux:API app.
const KEEP_ALIVE_SERVICE: &str = "com.termux.api/.KeepAliveService";

/// Spawn the dispatch binary with a feature argument vector (stdin + stdout
/// piped, stderr inherited).
pub(crate) async fn open_api(config: &ApiConfig, args: &[String]) -> Result<Pipe> {
    let env = config.spawn_env();
    Pipe::open(config.api_path(), args, env.as_ref()).await
}

/// Append one `flag key value` extra to an argument vector.
pub(crate) fn extra(args: &mut Vec<String>, flag: &str, key: &str, value: impl Into<String>) {
    args.push(flag.to_string());
    args.push(key.to_string());
    args.push(value.into());
}

/// Run a helper to completion: spawn, bounded wait, tear down.
///
/// A helper that outlives the bound is run down by `close`; the returned
/// [`Exit`] then reports the termination signal instead of an exit code.
pub(crate) async fn run(config: &ApiConfig, args: Vec<String>, timeout: Duration) -> Result<Exit> {
    let mut pipe = open_api(config, &args).await?;
    if let Err(e) = pipe.wait(Some(timeout)).await {
        if !e.is_timeout() {
            tracing::warn!(error = %e, "waiting on helper failed");
        }
    }
    pipe.close().await
}

/// [`run`], failing with [`Error::Failed`] unless the helper exited cleanly.
pub(crate) async fn run_checked(
    config: &ApiConfig,
    args: Vec<String>,
    timeout: Duration,
) -> Result<()> {
    let exit = run(config, args, timeout).await?;
    if exit.success() {
        Ok(())
    } else {
        Err(Error::Failed { exit })
    }
}

/// Run a helper that consumes its input: spawn, write, signal end-of-input,
/// give the helper a bounded window to finish, tear down.
pub(crate) async fn write_text(config: &ApiConfig, args: Vec<String>, data: &[u8]) -> Result<Exit> {
    let mut pipe = open_api(config, &args).await?;
    pipe.write_all(data).await?;
    pipe.close_input().await?;
    if let Err(e) = pipe.wait(Some(RUN_TIMEOUT)).await {
        if !e.is_timeout() {
            tracing::warn!(error = %e, "waiting on helper failed");
        }
    }
    pipe.close().await
}

/// Run a helper that produces output: spawn, read to end-of-stream, tear
/// down. The configured reply timeout bounds the read, when set.
pub(crate) async fn read_text(config: &ApiConfig, args: Vec<String>) -> Result<Vec<u8>> {
    let mut pipe = open_api(config, &args).await?;
    let data = match config.timeout() {
        None => pipe.read_to_end().await?,
        Some(limit) => tokio::time::timeout(limit, pipe.read_to_end())
            .await
            .map_err(|_| Error::WaitTimeout(limit))??,
    };
    let exit = pipe.close().await?;
    if !exit.success() {
        tracing::debug!(%exit, "helper finished with failure status");
    }
    Ok(data)
}

/// Run a helper and decode its single JSON reply document.
pub(crate) async fn read_json<T: DeserializeOwned>(
    config: &ApiConfig,
    args: Vec<String>,
) -> Result<T> {
    let data = read_text(config, args).await?;
    let raw = String::from_utf8_lossy(&data);
    serde_json::from_str(&raw).map_err(|e| Error::json_parse(e, &raw))
}

/// Ask the activity manager to start the Termux:API keep-alive service.
///
/// `am` reports a missing service on stderr, which is why this is a
/// three-pipe spawn.
pub(crate) async fn start_keep_alive(config: &ApiConfig) -> Result<()> {
    let env = config.spawn_env();
    let mut pipe = Pipe::open3(
        config.am_path(),
        ["startservice", "-n", KEEP_ALIVE_SERVICE],
        env.as_ref(),
    )
    .await?;
    let stderr = pipe.read_err_to_end().await?;
    pipe.close().await?;

    let message = String::from_utf8_lossy(&stderr);
    if message.trim_start().starts_with("Error") {
        return Err(Error::Api {
            message: message.trim().to_string(),
        });
    }
    Ok(())
}

/// Stop the keep-alive service again.
pub(crate) async fn stop_keep_alive(config: &ApiConfig) -> Result<()> {
    let env = config.spawn_env();
    let mut pipe = Pipe::open3(
        config.am_path(),
        ["stopservice", "-n", KEEP_ALIVE_SERVICE],
        env.as_ref(),
    )
    .await?;
    let _ = pipe.wait(None).await?;
    pipe.close().await?;
    Ok(())
}
