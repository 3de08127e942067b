//! A stand-in for the Termux:API dispatch binary.
//!
//! The real helpers only exist on an Android device; these tests exercise
//! the wrapper layer against a generated shell script that records its
//! argument vector and serves a canned reply.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use tempfile::TempDir;
use termux_api::TermuxClient;

pub struct StubHelper {
    dir: TempDir,
}

impl StubHelper {
    /// A stub that prints `reply` on stdout and exits cleanly.
    pub fn replying(reply: &str) -> Self {
        let dir = tempfile::tempdir().expect("create stub dir");
        let reply_path = dir.path().join("reply.dat");
        fs::write(&reply_path, reply).expect("write stub reply");

        let body = format!(
            "printf '%s\\n' \"$@\" > \"{args}\"\nexec cat \"{reply}\"",
            args = dir.path().join("args.txt").display(),
            reply = reply_path.display(),
        );
        Self::with_script(dir, &body)
    }

    /// A stub that copies its stdin to a capture file.
    pub fn capturing() -> Self {
        let dir = tempfile::tempdir().expect("create stub dir");
        let body = format!(
            "printf '%s\\n' \"$@\" > \"{args}\"\nexec cat > \"{captured}\"",
            args = dir.path().join("args.txt").display(),
            captured = dir.path().join("captured.dat").display(),
        );
        Self::with_script(dir, &body)
    }

    /// A stub that reports `message` on stderr, the way `am` announces a
    /// missing service.
    pub fn erroring(message: &str) -> Self {
        let dir = tempfile::tempdir().expect("create stub dir");
        let message_path = dir.path().join("message.dat");
        fs::write(&message_path, message).expect("write stub message");
        let body = format!(
            "cat \"{message}\" >&2\nexit 0",
            message = message_path.display(),
        );
        Self::with_script(dir, &body)
    }

    /// A stub that exits with `code` without producing output.
    pub fn exiting(code: i32) -> Self {
        let dir = tempfile::tempdir().expect("create stub dir");
        let body = format!(
            "printf '%s\\n' \"$@\" > \"{args}\"\nexit {code}",
            args = dir.path().join("args.txt").display(),
        );
        Self::with_script(dir, &body)
    }

    fn with_script(dir: TempDir, body: &str) -> Self {
        let path = dir.path().join("termux-api");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write stub script");
        let mut perms = fs::metadata(&path).expect("stat stub").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).expect("chmod stub");
        Self { dir }
    }

    /// Path of the stub script, to use as the client's api path.
    pub fn path(&self) -> PathBuf {
        self.dir.path().join("termux-api")
    }

    /// A client wired to this stub.
    pub fn client(&self) -> TermuxClient {
        TermuxClient::builder().api_path(self.path()).build()
    }

    /// The argument vector of the last invocation, one entry per element.
    pub fn args(&self) -> Vec<String> {
        let raw = fs::read_to_string(self.dir.path().join("args.txt"))
            .expect("stub was never invoked");
        raw.lines().map(str::to_string).collect()
    }

    /// What the last invocation read from its stdin.
    pub fn captured(&self) -> String {
        fs::read_to_string(self.dir.path().join("captured.dat"))
            .expect("stub captured nothing")
    }
}
