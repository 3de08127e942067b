//! Device sensors: listing, one-shot reads, and continuous watching.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use super::{extra, open_api, read_json, run_checked, RUN_TIMEOUT};
use crate::config::ApiConfig;
use crate::pipe::{Exit, Pipe};
use crate::protocol::{SensorList, SensorReadings};
use crate::{Error, Result};

fn list_args() -> Vec<String> {
    let mut args = vec!["Sensor".to_string()];
    args.push("-a".to_string());
    args.push("list".to_string());
    args
}

fn read_args(sensor: &str) -> Vec<String> {
    let mut args = vec!["Sensor".to_string()];
    args.push("-a".to_string());
    args.push("sensors".to_string());
    extra(&mut args, "--es", "sensors", sensor);
    extra(&mut args, "--ei", "limit", "1");
    args
}

fn watch_args(sensors: &str, delay: Option<Duration>) -> Vec<String> {
    let mut args = vec!["Sensor".to_string()];
    args.push("-a".to_string());
    args.push("sensors".to_string());
    extra(&mut args, "--es", "sensors", sensors);
    if let Some(delay) = delay {
        extra(&mut args, "--ei", "delay", delay.as_millis().to_string());
    }
    args
}

fn cleanup_args() -> Vec<String> {
    let mut args = vec!["Sensor".to_string()];
    args.push("-a".to_string());
    args.push("cleanup".to_string());
    args
}

/// List the names of every sensor the device exposes.
pub(crate) async fn list(config: &ApiConfig) -> Result<Vec<String>> {
    let reply: SensorList = read_json(config, list_args()).await?;
    Ok(reply.sensors)
}

/// Take a single reading from one sensor.
pub(crate) async fn read_one(config: &ApiConfig, sensor: &str) -> Result<Vec<f64>> {
    let mut readings: SensorReadings = read_json(config, read_args(sensor)).await?;
    if let Some(reading) = readings.remove(sensor) {
        return Ok(reading.values);
    }
    // The helper keys the document by the sensor's full hardware name,
    // which need not equal the requested shorthand.
    if readings.len() == 1 {
        if let Some(reading) = readings.into_values().next() {
            return Ok(reading.values);
        }
    }
    Err(Error::Api {
        message: format!("no reading for sensor {:?}", sensor),
    })
}

/// Release the app's sensor listeners.
pub(crate) async fn cleanup(config: &ApiConfig) -> Result<()> {
    run_checked(config, cleanup_args(), RUN_TIMEOUT).await
}

/// Start a continuous watch over one or more sensors.
pub(crate) async fn watch<S: AsRef<str>>(
    config: &ApiConfig,
    sensors: &[S],
    delay: Option<Duration>,
) -> Result<SensorStream> {
    let joined = sensors
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(",");
    let args = watch_args(&joined, delay);
    let pipe = open_api(config, &args).await?;
    Ok(SensorStream::new(pipe))
}

/// Pulls JSON documents out of the helper's continuous output.
struct WatchReader {
    pipe: Pipe,
    buf: Vec<u8>,
}

impl WatchReader {
    /// Read the next complete readings document, or `None` once the helper
    /// closes its output.
    async fn next_document(&mut self) -> Result<Option<SensorReadings>> {
        loop {
            // A complete document may already be buffered from the last read.
            let parsed = {
                let mut documents =
                    serde_json::Deserializer::from_slice(&self.buf).into_iter::<SensorReadings>();
                match documents.next() {
                    Some(Ok(doc)) => Some(Ok((doc, documents.byte_offset()))),
                    Some(Err(e)) if e.is_eof() => None,
                    Some(Err(e)) => Some(Err(e)),
                    None => None,
                }
            };
            match parsed {
                Some(Ok((doc, consumed))) => {
                    self.buf.drain(..consumed);
                    return Ok(Some(doc));
                }
                Some(Err(e)) => {
                    let raw = String::from_utf8_lossy(&self.buf).into_owned();
                    return Err(Error::json_parse(e, &raw));
                }
                None => {}
            }

            let mut chunk = [0u8; 4096];
            let n = self.pipe.read(&mut chunk).await?;
            if n == 0 {
                if self.buf.iter().all(|b| b.is_ascii_whitespace()) {
                    return Ok(None);
                }
                // end-of-stream in the middle of a document
                let raw = String::from_utf8_lossy(&self.buf).into_owned();
                return match serde_json::from_str::<SensorReadings>(&raw) {
                    Ok(doc) => {
                        self.buf.clear();
                        Ok(Some(doc))
                    }
                    Err(e) => Err(Error::json_parse(e, &raw)),
                };
            }
            self.buf.extend_from_slice(&chunk[..n]);
        }
    }
}

type PendingRead =
    Pin<Box<dyn Future<Output = (WatchReader, Result<Option<SensorReadings>>)> + Send>>;

/// A continuous stream of sensor readings.
///
/// Implements [`futures::Stream`]; each item is one readings document from
/// the helper. Dropping the stream kills the helper outright; prefer
/// [`close`](Self::close), which runs it down cleanly and reports its exit,
/// and consider a `sensor_cleanup` call afterward to release the app's
/// sensor listeners.
pub struct SensorStream {
    reader: Option<WatchReader>,
    pending: Option<PendingRead>,
}

impl SensorStream {
    fn new(pipe: Pipe) -> Self {
        Self {
            reader: Some(WatchReader {
                pipe,
                buf: Vec::new(),
            }),
            pending: None,
        }
    }

    /// Tear down the watch: run the helper down and reap it.
    ///
    /// If a read is in flight, it is allowed to finish first.
    pub async fn close(mut self) -> Result<Exit> {
        if let Some(pending) = self.pending.take() {
            let (reader, _) = pending.await;
            self.reader = Some(reader);
        }
        match self.reader.take() {
            Some(mut reader) => reader.pipe.close().await,
            None => Err(Error::NoSuchChild),
        }
    }
}

impl futures::Stream for SensorStream {
    type Item = Result<SensorReadings>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        // If we have a pending read future, poll it
        if let Some(ref mut pending) = self.pending {
            match pending.as_mut().poll(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready((reader, result)) => {
                    self.pending = None;
                    self.reader = Some(reader);
                    match result {
                        Ok(Some(doc)) => return Poll::Ready(Some(Ok(doc))),
                        Ok(None) => return Poll::Ready(None),
                        Err(e) => return Poll::Ready(Some(Err(e))),
                    }
                }
            }
        }

        // Take the reader and create a new read future
        if let Some(mut reader) = self.reader.take() {
            let fut = Box::pin(async move {
                let result = reader.next_document().await;
                (reader, result)
            });
            self.pending = Some(fut);
            cx.waker().wake_by_ref();
            return Poll::Pending;
        }

        // No reader available, stream is exhausted
        Poll::Ready(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_args_limit_one() {
        assert_eq!(
            read_args("accelerometer"),
            [
                "Sensor", "-a", "sensors", "--es", "sensors", "accelerometer", "--ei", "limit",
                "1"
            ]
        );
    }

    #[test]
    fn watch_args_without_delay() {
        assert_eq!(
            watch_args("accelerometer,light", None),
            ["Sensor", "-a", "sensors", "--es", "sensors", "accelerometer,light"]
        );
    }

    #[test]
    fn watch_args_with_delay() {
        assert_eq!(
            watch_args("light", Some(Duration::from_millis(500))),
            ["Sensor", "-a", "sensors", "--es", "sensors", "light", "--ei", "delay", "500"]
        );
    }

    #[test]
    fn cleanup_args_shape() {
        assert_eq!(cleanup_args(), ["Sensor", "-a", "cleanup"]);
    }

    #[test]
    fn list_args_shape() {
        assert_eq!(list_args(), ["Sensor", "-a", "list"]);
    }

    #[test]
    fn sensor_stream_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<SensorStream>();
    }
}
