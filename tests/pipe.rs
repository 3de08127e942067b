//! Integration tests for the process-pipe layer, using real children.

use std::collections::HashMap;
use std::time::Duration;

use termux_api::pipe::{Channel, Exit, Pipe};
use termux_api::Error;

const SIGTERM: i32 = 15;

async fn sh(script: &str) -> Pipe {
    Pipe::open("/bin/sh", ["-c", script], None)
        .await
        .expect("spawn /bin/sh")
}

async fn sh3(script: &str) -> Pipe {
    Pipe::open3("/bin/sh", ["-c", script], None)
        .await
        .expect("spawn /bin/sh")
}

#[tokio::test]
async fn spawn_populates_pid() {
    let mut a = sh("exit 0").await;
    let mut b = sh("exit 0").await;
    let pid_a = a.pid().expect("pid set after spawn");
    let pid_b = b.pid().expect("pid set after spawn");
    assert_ne!(pid_a, pid_b, "process ids are unique");
    a.close().await.unwrap();
    b.close().await.unwrap();
}

#[tokio::test]
async fn two_pipe_spawn_has_no_error_channel() {
    let mut pipe = sh("exit 0").await;
    let err = pipe.read_err_line().await.unwrap_err();
    assert!(matches!(
        err,
        Error::ChannelClosed {
            channel: Channel::Stderr
        }
    ));
    pipe.close().await.unwrap();
}

#[tokio::test]
async fn echo_round_trip() {
    let mut pipe = sh(r#"read line; echo "$line""#).await;
    pipe.write_line("hello pipe").await.unwrap();
    pipe.flush().await.unwrap();

    let line = pipe.read_line().await.unwrap();
    assert_eq!(line.as_deref(), Some("hello pipe"));

    // let the child finish before teardown so the clean exit is observable
    assert_eq!(pipe.wait(None).await.unwrap(), Exit::Code(0));
    assert_eq!(pipe.close().await.unwrap(), Exit::Code(0));
}

#[tokio::test]
async fn immediate_exit_code_three() {
    let mut pipe = sh("exit 3").await;
    let exit = pipe.wait(None).await.unwrap();
    assert_eq!(exit, Exit::Code(3));

    // close re-reports the same status without double-reaping
    let exit = pipe.close().await.unwrap();
    assert_eq!(exit, Exit::Code(3));
}

#[tokio::test]
async fn bounded_wait_on_finished_child_returns_status() {
    let mut pipe = sh("exit 5").await;
    let exit = pipe.wait(Some(Duration::from_secs(5))).await.unwrap();
    assert_eq!(exit, Exit::Code(5));
    pipe.close().await.unwrap();
}

#[tokio::test]
async fn bounded_wait_times_out_and_child_remains_reapable() {
    let mut pipe = sh("sleep 5").await;

    let err = pipe.wait(Some(Duration::from_millis(100))).await.unwrap_err();
    assert!(err.is_timeout());

    // the timed-out child is untouched and still ours to reap
    assert!(pipe.pid().is_some());
    let exit = pipe.close().await.unwrap();
    assert_eq!(exit, Exit::Signal(SIGTERM));
    assert!(pipe.pid().is_none());
}

#[tokio::test]
async fn self_terminated_child_reports_signal() {
    let mut pipe = sh("kill -TERM $$").await;
    let exit = pipe.close().await.unwrap();
    assert_eq!(exit, Exit::Signal(SIGTERM));
}

#[tokio::test]
async fn exit_127_convention_preserved() {
    let mut pipe = sh("exit 127").await;
    assert_eq!(pipe.wait(None).await.unwrap(), Exit::Code(127));
    assert_eq!(pipe.close().await.unwrap(), Exit::Code(127));
}

#[tokio::test]
async fn close_twice_reports_no_such_child() {
    let mut pipe = sh("exit 0").await;
    pipe.close().await.unwrap();

    assert!(matches!(pipe.close().await, Err(Error::NoSuchChild)));
    assert!(matches!(pipe.wait(None).await, Err(Error::NoSuchChild)));
    assert!(pipe.pid().is_none());
}

#[tokio::test]
async fn channels_gone_after_close() {
    let mut pipe = sh3("exit 0").await;
    pipe.close().await.unwrap();

    assert!(matches!(
        pipe.write_all(b"late").await,
        Err(Error::ChannelClosed {
            channel: Channel::Stdin
        })
    ));
    assert!(matches!(
        pipe.read_byte().await,
        Err(Error::ChannelClosed {
            channel: Channel::Stdout
        })
    ));
    assert!(matches!(
        pipe.read_err_byte().await,
        Err(Error::ChannelClosed {
            channel: Channel::Stderr
        })
    ));
}

#[tokio::test]
async fn read_to_end_then_zero_length_reads() {
    let mut pipe = sh("printf abc").await;
    let data = pipe.read_to_end().await.unwrap();
    assert_eq!(data, b"abc");

    // the channel stays at end-of-stream
    let mut buf = [0u8; 8];
    assert_eq!(pipe.read(&mut buf).await.unwrap(), 0);
    assert_eq!(pipe.read_byte().await.unwrap(), None);

    assert_eq!(pipe.close().await.unwrap(), Exit::Code(0));
}

#[tokio::test]
async fn flush_before_wait_delivers_input() {
    // The child blocks reading its input before it can exit. Flushing
    // before waiting is what makes buffered input visible to it; without
    // the flush this wait would deadlock until the timeout.
    let mut pipe = sh("read x; exit 0").await;
    pipe.write_line("go").await.unwrap();
    pipe.flush().await.unwrap();

    let exit = pipe.wait(Some(Duration::from_secs(5))).await.unwrap();
    assert_eq!(exit, Exit::Code(0));
    pipe.close().await.unwrap();
}

#[tokio::test]
async fn write_after_child_exit_is_broken_pipe() {
    let mut pipe = sh("exit 0").await;
    pipe.wait(None).await.unwrap();

    // the buffered write may succeed; pushing it to the OS cannot
    pipe.write_all(b"too late").await.ok();
    let err = pipe.flush().await.unwrap_err();
    assert!(err.is_broken_pipe(), "expected broken pipe, got {err:?}");

    pipe.close().await.unwrap();
}

#[tokio::test]
async fn close_input_signals_end_of_input() {
    let mut pipe = sh("cat").await;
    pipe.write_all(b"all of it").await.unwrap();
    pipe.close_input().await.unwrap();

    let data = pipe.read_to_end().await.unwrap();
    assert_eq!(data, b"all of it");
    assert_eq!(pipe.close().await.unwrap(), Exit::Code(0));

    // a second end-of-input is an error, the channel is gone
    let mut pipe = sh("cat").await;
    pipe.close_input().await.unwrap();
    assert!(matches!(
        pipe.close_input().await,
        Err(Error::ChannelClosed {
            channel: Channel::Stdin
        })
    ));
    pipe.close().await.unwrap();
}

#[tokio::test]
async fn three_pipe_separates_stderr() {
    let mut pipe = sh3("echo out; echo err >&2; exit 0").await;

    assert_eq!(pipe.read_line().await.unwrap().as_deref(), Some("out"));
    assert_eq!(pipe.read_err_line().await.unwrap().as_deref(), Some("err"));
    assert_eq!(pipe.wait(None).await.unwrap(), Exit::Code(0));
    assert_eq!(pipe.close().await.unwrap(), Exit::Code(0));
}

#[tokio::test]
async fn environment_replaced_wholesale() {
    let mut env = HashMap::new();
    env.insert("PIPE_TEST_MARKER".to_string(), "present".to_string());

    let mut pipe = Pipe::open(
        "/bin/sh",
        ["-c", r#"printf '%s/%s' "$PIPE_TEST_MARKER" "${HOME:-unset}""#],
        Some(&env),
    )
    .await
    .unwrap();

    let data = pipe.read_to_end().await.unwrap();
    // the override is visible and the parent environment is not
    assert_eq!(data, b"present/unset");
    pipe.close().await.unwrap();
}

#[tokio::test]
async fn environment_inherited_by_default() {
    let mut pipe = sh(r#"printf '%s' "$PATH""#).await;
    let data = pipe.read_to_end().await.unwrap();
    assert!(!data.is_empty(), "inherited PATH should be visible");
    pipe.close().await.unwrap();
}

#[tokio::test]
async fn missing_program_fails_at_spawn() {
    let err = Pipe::open("/no/such/binary/anywhere", ["x"], None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}

#[tokio::test]
async fn close_runs_down_a_lingering_child() {
    // ignores end-of-input, only a termination request gets it
    let mut pipe = sh("while :; do sleep 1; done").await;
    let exit = pipe.close().await.unwrap();
    assert_eq!(exit, Exit::Signal(SIGTERM));
}
