//! Clipboard access.

use super::{extra, read_text, write_text};
use crate::config::ApiConfig;
use crate::{Error, Result};

fn get_args() -> Vec<String> {
    vec!["Clipboard".to_string()]
}

fn set_args() -> Vec<String> {
    let mut args = vec!["Clipboard".to_string()];
    extra(&mut args, "-e", "api_version", "2");
    extra(&mut args, "--ez", "set", "true");
    args
}

/// Read the current clipboard contents.
pub(crate) async fn get(config: &ApiConfig) -> Result<String> {
    let data = read_text(config, get_args()).await?;
    Ok(String::from_utf8_lossy(&data).into_owned())
}

/// Replace the clipboard contents.
pub(crate) async fn set(config: &ApiConfig, text: &str) -> Result<()> {
    let exit = write_text(config, set_args(), text.as_bytes()).await?;
    if exit.success() {
        Ok(())
    } else {
        Err(Error::Failed { exit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_args_bare_feature_name() {
        assert_eq!(get_args(), ["Clipboard"]);
    }

    #[test]
    fn set_args_request_v2_set() {
        assert_eq!(
            set_args(),
            ["Clipboard", "-e", "api_version", "2", "--ez", "set", "true"]
        );
    }
}
