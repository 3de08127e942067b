//! Fingerprint authentication.

use super::{extra, read_json};
use crate::config::{ApiConfig, AuthResult, FingerprintPrompt};
use crate::protocol::FingerprintReply;
use crate::Result;

fn fingerprint_args(prompt: &FingerprintPrompt) -> Vec<String> {
    let mut args = vec!["Fingerprint".to_string()];
    if let Some(title) = &prompt.title {
        extra(&mut args, "--es", "title", title);
    }
    if let Some(description) = &prompt.description {
        extra(&mut args, "--es", "description", description);
    }
    if let Some(subtitle) = &prompt.subtitle {
        extra(&mut args, "--es", "subtitle", subtitle);
    }
    if let Some(cancel) = &prompt.cancel {
        extra(&mut args, "--es", "cancel", cancel);
    }
    args
}

/// Prompt for a fingerprint and report the outcome.
pub(crate) async fn authenticate(
    config: &ApiConfig,
    prompt: &FingerprintPrompt,
) -> Result<AuthResult> {
    let reply: FingerprintReply = read_json(config, fingerprint_args(prompt)).await?;
    if !reply.errors.is_empty() {
        tracing::debug!(errors = ?reply.errors, "fingerprint helper reported errors");
    }
    Ok(match reply.auth_result.as_deref() {
        Some("AUTH_RESULT_SUCCESS") => AuthResult::Success,
        Some("AUTH_RESULT_FAILURE") => AuthResult::Failure,
        _ => AuthResult::Unknown,
    })
}
