//! Child process spawning, waiting, and teardown.

use std::collections::HashMap;
use std::ffi::OsStr;
use std::fmt;
use std::os::unix::process::ExitStatusExt;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use tokio::process::{Child, ChildStderr, ChildStdout, Command};

use super::io::{ReadChannel, WriteChannel};
use super::{Channel, REAP_INTERVAL_MS};
use crate::{Error, Result};

/// How a child process terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Exit {
    /// The child exited normally with this status code.
    Code(i32),
    /// The child was terminated by this signal number.
    Signal(i32),
}

impl Exit {
    /// True for a clean zero exit.
    pub fn success(&self) -> bool {
        matches!(self, Exit::Code(0))
    }

    /// The exit code, if the child exited normally.
    pub fn code(&self) -> Option<i32> {
        match self {
            Exit::Code(code) => Some(*code),
            Exit::Signal(_) => None,
        }
    }

    /// The signal number, if the child was terminated by a signal.
    pub fn signal(&self) -> Option<i32> {
        match self {
            Exit::Code(_) => None,
            Exit::Signal(signal) => Some(*signal),
        }
    }
}

impl fmt::Display for Exit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exit::Code(code) => write!(f, "exit code {}", code),
            Exit::Signal(signal) => write!(f, "signal {}", signal),
        }
    }
}

/// A child process with piped standard streams.
///
/// Created by [`Pipe::open`] (stdin + stdout) or [`Pipe::open3`]
/// (stdin + stdout + stderr). Each channel exclusively owns its underlying
/// descriptor; nothing is shared across `Pipe` instances.
///
/// # Teardown
///
/// [`close`](Self::close) is the only operation that reaps the child. It
/// always runs the child down, force-requesting termination if needed, and
/// leaves the pipe in a final state where every further `wait`/`close`
/// fails with [`Error::NoSuchChild`].
///
/// Dropping a `Pipe` that was never closed kills the child outright as a
/// last resort, without reaping it; prefer `close`.
#[derive(Debug)]
pub struct Pipe {
    child: Option<Child>,
    pid: Option<u32>,
    writer: Option<WriteChannel>,
    reader: Option<ReadChannel<ChildStdout>>,
    err_reader: Option<ReadChannel<ChildStderr>>,
}

impl Pipe {
    /// Spawn `program` with stdin and stdout piped; stderr is inherited
    /// from the caller.
    ///
    /// `args` does not include the program name. `env` of `None` inherits
    /// the caller's environment; `Some` replaces it wholesale.
    ///
    /// On any partial failure, every descriptor created so far is released
    /// before the error is returned; no child is left running.
    pub async fn open<S, I, A>(
        program: S,
        args: I,
        env: Option<&HashMap<String, String>>,
    ) -> Result<Self>
    where
        S: AsRef<OsStr>,
        I: IntoIterator<Item = A>,
        A: AsRef<OsStr>,
    {
        Self::spawn(program, args, env, false)
    }

    /// Spawn `program` with stdin, stdout, and stderr all piped.
    pub async fn open3<S, I, A>(
        program: S,
        args: I,
        env: Option<&HashMap<String, String>>,
    ) -> Result<Self>
    where
        S: AsRef<OsStr>,
        I: IntoIterator<Item = A>,
        A: AsRef<OsStr>,
    {
        Self::spawn(program, args, env, true)
    }

    fn spawn<S, I, A>(
        program: S,
        args: I,
        env: Option<&HashMap<String, String>>,
        capture_stderr: bool,
    ) -> Result<Self>
    where
        S: AsRef<OsStr>,
        I: IntoIterator<Item = A>,
        A: AsRef<OsStr>,
    {
        let program = program.as_ref();

        let mut cmd = Command::new(program);
        cmd.args(args);
        if let Some(env) = env {
            cmd.env_clear();
            cmd.envs(env);
        }
        cmd.stdin(Stdio::piped());
        cmd.stdout(Stdio::piped());
        cmd.stderr(if capture_stderr {
            Stdio::piped()
        } else {
            Stdio::inherit()
        });

        let mut child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::NotFound {
                    program: program.to_string_lossy().into_owned(),
                }
            } else {
                Error::Spawn(e)
            }
        })?;

        let pid = child.id();
        tracing::debug!(program = %program.to_string_lossy(), pid, "spawned child");

        let writer = child.stdin.take().map(WriteChannel::new);
        let reader = child.stdout.take().map(ReadChannel::new);
        let err_reader = child.stderr.take().map(ReadChannel::new);

        Ok(Self {
            child: Some(child),
            pid,
            writer,
            reader,
            err_reader,
        })
    }

    /// The child's process id, or `None` once the pipe has been closed.
    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    // -------------------------------------------------------------------------
    // Write channel
    // -------------------------------------------------------------------------

    /// Write a buffer to the child's input.
    pub async fn write_all(&mut self, data: &[u8]) -> Result<()> {
        self.write_channel()?.write_all(data).await
    }

    /// Write a single byte to the child's input.
    pub async fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.write_channel()?.write_byte(byte).await
    }

    /// Write a line to the child's input, appending a newline.
    pub async fn write_line(&mut self, line: &str) -> Result<()> {
        self.write_channel()?.write_line(line).await
    }

    /// Flush buffered writes through to the child.
    ///
    /// Call this before [`wait`](Self::wait) whenever the child must see
    /// written input in order to make progress; unflushed data is not
    /// visible to the child and both sides can otherwise deadlock.
    pub async fn flush(&mut self) -> Result<()> {
        self.write_channel()?.flush().await
    }

    /// Flush and close the child's input, signaling end-of-input.
    ///
    /// Further writes fail with [`Error::ChannelClosed`].
    pub async fn close_input(&mut self) -> Result<()> {
        match self.writer.take() {
            Some(writer) => writer.shutdown().await,
            None => Err(Error::ChannelClosed {
                channel: Channel::Stdin,
            }),
        }
    }

    // -------------------------------------------------------------------------
    // Read channels
    // -------------------------------------------------------------------------

    /// Read up to `buf.len()` bytes from the child's output. Zero means the
    /// child closed its output.
    pub async fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.read_channel()?.read(buf).await
    }

    /// Read a single byte from the child's output, `None` at end-of-stream.
    pub async fn read_byte(&mut self) -> Result<Option<u8>> {
        self.read_channel()?.read_byte().await
    }

    /// Read one line from the child's output, `None` at end-of-stream.
    pub async fn read_line(&mut self) -> Result<Option<String>> {
        self.read_channel()?.read_line().await
    }

    /// Read the child's output until it closes the channel.
    pub async fn read_to_end(&mut self) -> Result<Vec<u8>> {
        self.read_channel()?.read_to_end().await
    }

    /// Read up to `buf.len()` bytes from the child's error channel.
    pub async fn read_err(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.err_channel()?.read(buf).await
    }

    /// Read a single byte from the child's error channel.
    pub async fn read_err_byte(&mut self) -> Result<Option<u8>> {
        self.err_channel()?.read_byte().await
    }

    /// Read one line from the child's error channel.
    pub async fn read_err_line(&mut self) -> Result<Option<String>> {
        self.err_channel()?.read_line().await
    }

    /// Read the child's error channel until it is closed.
    pub async fn read_err_to_end(&mut self) -> Result<Vec<u8>> {
        self.err_channel()?.read_to_end().await
    }

    // -------------------------------------------------------------------------
    // Wait / close
    // -------------------------------------------------------------------------

    /// Block until the child terminates, or until `timeout` elapses.
    ///
    /// A non-blocking status check runs first: a child that has already
    /// exited is reported immediately regardless of `timeout`. `None` waits
    /// without bound. On expiry of a bounded wait the child is untouched,
    /// still running, and can be reaped via [`close`](Self::close).
    ///
    /// The runtime arms the wait such that a child exiting concurrently
    /// with the call is never missed, and interrupted system calls are
    /// retried internally; unlike a process-wide signal-mask dance,
    /// bounded waits on different pipes may run concurrently.
    pub async fn wait(&mut self, timeout: Option<Duration>) -> Result<Exit> {
        let child = self.child.as_mut().ok_or(Error::NoSuchChild)?;

        if let Some(status) = child.try_wait().map_err(Error::io)? {
            return decode_status(status);
        }

        match timeout {
            None => decode_status(child.wait().await.map_err(Error::io)?),
            Some(limit) => match tokio::time::timeout(limit, child.wait()).await {
                Ok(status) => decode_status(status.map_err(Error::io)?),
                Err(_) => Err(Error::WaitTimeout(limit)),
            },
        }
    }

    /// Tear down the pipe: release every channel, run the child down, reap
    /// it, and report how it terminated.
    ///
    /// Channel-close failures are cleared rather than propagated; releasing
    /// the child takes priority. While the non-blocking status check finds
    /// the child still running, a termination request (SIGTERM) is sent and
    /// the check repeated. A child that ignores SIGTERM can stall this loop
    /// indefinitely; there is no escalation to a forceful kill.
    ///
    /// After `close` returns, the pipe is in its final state: all channels
    /// are gone, [`pid`](Self::pid) is `None`, and a second `close` fails
    /// with [`Error::NoSuchChild`].
    pub async fn close(&mut self) -> Result<Exit> {
        let mut child = self.child.take().ok_or(Error::NoSuchChild)?;
        let pid = self.pid.take();

        if let Some(writer) = self.writer.take() {
            // end-of-input often suffices for the child to exit
            let _ = writer.shutdown().await;
        }
        self.reader.take();
        self.err_reader.take();

        let status = loop {
            match child.try_wait().map_err(Error::io)? {
                Some(status) => break status,
                None => {
                    if let Some(pid) = pid {
                        // delivery failure is retried on the next round
                        let _ = kill(Pid::from_raw(pid as i32), Signal::SIGTERM);
                    }
                    tokio::time::sleep(Duration::from_millis(REAP_INTERVAL_MS)).await;
                }
            }
        };

        let exit = decode_status(status)?;
        tracing::debug!(pid, %exit, "reaped child");
        Ok(exit)
    }
}

impl Drop for Pipe {
    fn drop(&mut self) {
        if let Some(child) = self.child.as_mut() {
            let _ = child.start_kill();
        }
    }
}

impl Pipe {
    fn write_channel(&mut self) -> Result<&mut WriteChannel> {
        self.writer.as_mut().ok_or(Error::ChannelClosed {
            channel: Channel::Stdin,
        })
    }

    fn read_channel(&mut self) -> Result<&mut ReadChannel<ChildStdout>> {
        self.reader.as_mut().ok_or(Error::ChannelClosed {
            channel: Channel::Stdout,
        })
    }

    fn err_channel(&mut self) -> Result<&mut ReadChannel<ChildStderr>> {
        self.err_reader.as_mut().ok_or(Error::ChannelClosed {
            channel: Channel::Stderr,
        })
    }
}

/// Decode a raw wait status into an [`Exit`].
fn decode_status(status: ExitStatus) -> Result<Exit> {
    if let Some(code) = status.code() {
        return Ok(Exit::Code(code));
    }
    if let Some(signal) = status.signal() {
        return Ok(Exit::Signal(signal));
    }
    Err(Error::AbnormalExit {
        raw: status.into_raw(),
    })
}
