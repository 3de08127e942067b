//! The dialog family: interactive prompts rendered by the Termux:API app.
//!
//! Every dialog is one helper invocation with `input_method` selecting the
//! widget. The reply's `code` mirrors the Android button constant that
//! dismissed the dialog, so "confirmed" is `-1` for alert-style dialogs and
//! `0` for the sheet and speech widgets. A non-confirming code maps to
//! `Ok(None)` here.

use super::{extra, read_json};
use crate::config::{ApiConfig, Confirmation, TextInputOptions};
use crate::protocol::DialogReply;
use crate::{Error, Result};

/// Reply code of an alert-style dialog confirmed with the positive button.
const CODE_POSITIVE: i64 = -1;

fn dialog_args(
    method: &str,
    hint: Option<&str>,
    title: Option<&str>,
    values: Option<&str>,
) -> Vec<String> {
    let mut args = vec!["Dialog".to_string()];
    extra(&mut args, "--es", "input_method", method);
    if let Some(hint) = hint {
        extra(&mut args, "--es", "input_hint", hint);
    }
    if let Some(title) = title {
        extra(&mut args, "--es", "input_title", title);
    }
    if let Some(values) = values {
        extra(&mut args, "--es", "input_values", values);
    }
    args
}

/// Join choice labels the way the helper expects: one comma-separated
/// string. Empty input yields `None`, leaving the extra off entirely.
fn join_values<S: AsRef<str>>(values: &[S]) -> Option<String> {
    if values.is_empty() {
        return None;
    }
    Some(
        values
            .iter()
            .map(|v| v.as_ref())
            .collect::<Vec<_>>()
            .join(","),
    )
}

pub(crate) async fn confirm(
    config: &ApiConfig,
    hint: Option<&str>,
    title: Option<&str>,
) -> Result<Confirmation> {
    let reply: DialogReply = read_json(config, dialog_args("confirm", hint, title, None)).await?;
    Ok(match reply.text.as_deref() {
        Some("yes") => Confirmation::Yes,
        Some("no") => Confirmation::No,
        _ => Confirmation::Dismissed,
    })
}

pub(crate) async fn checkbox<S: AsRef<str>>(
    config: &ApiConfig,
    values: &[S],
    title: Option<&str>,
) -> Result<Option<Vec<usize>>> {
    let joined = join_values(values);
    let args = dialog_args("checkbox", None, title, joined.as_deref());
    let reply: DialogReply = read_json(config, args).await?;
    if reply.code != Some(CODE_POSITIVE) {
        return Ok(None);
    }
    let selected = reply
        .values
        .unwrap_or_default()
        .into_iter()
        .map(|v| v.index as usize)
        .collect();
    Ok(Some(selected))
}

pub(crate) async fn counter(
    config: &ApiConfig,
    title: Option<&str>,
    min: i32,
    max: i32,
    start: i32,
) -> Result<Option<i32>> {
    let mut args = dialog_args("counter", None, title, None);
    extra(&mut args, "--eia", "input_range", format!("{},{},{}", min, max, start));
    let reply: DialogReply = read_json(config, args).await?;
    if reply.code != Some(CODE_POSITIVE) {
        return Ok(None);
    }
    let text = reply.text.unwrap_or_default();
    let value = text.trim().parse::<i32>().map_err(|_| Error::Api {
        message: format!("counter reply is not a number: {:?}", text),
    })?;
    Ok(Some(value))
}

pub(crate) async fn date(
    config: &ApiConfig,
    format: Option<&str>,
    title: Option<&str>,
) -> Result<Option<String>> {
    let mut args = dialog_args("date", None, title, None);
    if let Some(format) = format {
        extra(&mut args, "--es", "date_format", format);
    }
    let reply: DialogReply = read_json(config, args).await?;
    if reply.code != Some(CODE_POSITIVE) {
        return Ok(None);
    }
    Ok(reply.text)
}

pub(crate) async fn radio<S: AsRef<str>>(
    config: &ApiConfig,
    values: &[S],
    title: Option<&str>,
) -> Result<Option<usize>> {
    single_choice(config, "radio", values, title, CODE_POSITIVE).await
}

pub(crate) async fn sheet<S: AsRef<str>>(
    config: &ApiConfig,
    values: &[S],
    title: Option<&str>,
) -> Result<Option<usize>> {
    // the bottom sheet reports its pick with code 0, not the positive button
    single_choice(config, "sheet", values, title, 0).await
}

pub(crate) async fn spinner<S: AsRef<str>>(
    config: &ApiConfig,
    values: &[S],
    title: Option<&str>,
) -> Result<Option<usize>> {
    single_choice(config, "spinner", values, title, CODE_POSITIVE).await
}

async fn single_choice<S: AsRef<str>>(
    config: &ApiConfig,
    method: &str,
    values: &[S],
    title: Option<&str>,
    confirmed: i64,
) -> Result<Option<usize>> {
    let joined = join_values(values);
    let args = dialog_args(method, None, title, joined.as_deref());
    let reply: DialogReply = read_json(config, args).await?;
    if reply.code != Some(confirmed) {
        return Ok(None);
    }
    Ok(reply.index.map(|i| i as usize))
}

pub(crate) async fn speech(
    config: &ApiConfig,
    hint: Option<&str>,
    title: Option<&str>,
) -> Result<Option<String>> {
    let reply: DialogReply = read_json(config, dialog_args("speech", hint, title, None)).await?;
    if reply.code.is_none() {
        return Err(Error::Api {
            message: reply
                .error
                .unwrap_or_else(|| "speech input failed".to_string()),
        });
    }
    if reply.code != Some(0) {
        return Ok(None);
    }
    Ok(reply.text)
}

pub(crate) async fn text(
    config: &ApiConfig,
    hint: Option<&str>,
    title: Option<&str>,
    options: TextInputOptions,
) -> Result<Option<String>> {
    let mut args = dialog_args("text", hint, title, None);
    if options.multiple_lines {
        extra(&mut args, "--ez", "multiple_lines", "true");
    }
    if options.password {
        extra(&mut args, "--ez", "password", "true");
    }
    if options.numeric {
        extra(&mut args, "--ez", "numeric", "true");
    }
    let reply: DialogReply = read_json(config, args).await?;
    if reply.code != Some(CODE_POSITIVE) {
        return Ok(None);
    }
    Ok(reply.text)
}

pub(crate) async fn time(config: &ApiConfig, title: Option<&str>) -> Result<Option<(u32, u32)>> {
    let reply: DialogReply = read_json(config, dialog_args("time", None, title, None)).await?;
    if reply.code != Some(CODE_POSITIVE) {
        return Ok(None);
    }
    let text = reply.text.unwrap_or_default();
    Ok(parse_time(&text))
}

/// Parse the time widget's `"HH:MM"` reply.
fn parse_time(text: &str) -> Option<(u32, u32)> {
    let (hour, minute) = text.trim().split_once(':')?;
    Some((hour.trim().parse().ok()?, minute.trim().parse().ok()?))
}
