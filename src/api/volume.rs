//! Audio stream volumes.

use super::{extra, read_json, run_checked, RUN_TIMEOUT};
use crate::config::{ApiConfig, VolumeStream};
use crate::protocol::VolumeEntry;
use crate::Result;

/// Level and ceiling of one audio stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamVolume {
    pub volume: i32,
    pub max_volume: i32,
}

/// The volume of every audio stream on the device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Volumes {
    pub call: StreamVolume,
    pub system: StreamVolume,
    pub ring: StreamVolume,
    pub music: StreamVolume,
    pub alarm: StreamVolume,
    pub notification: StreamVolume,
}

impl Volumes {
    /// The entry for one stream.
    pub fn get(&self, stream: VolumeStream) -> StreamVolume {
        *self.entry(stream)
    }

    fn entry(&self, stream: VolumeStream) -> &StreamVolume {
        match stream {
            VolumeStream::Call => &self.call,
            VolumeStream::System => &self.system,
            VolumeStream::Ring => &self.ring,
            VolumeStream::Music => &self.music,
            VolumeStream::Alarm => &self.alarm,
            VolumeStream::Notification => &self.notification,
        }
    }

    fn entry_mut(&mut self, stream: VolumeStream) -> &mut StreamVolume {
        match stream {
            VolumeStream::Call => &mut self.call,
            VolumeStream::System => &mut self.system,
            VolumeStream::Ring => &mut self.ring,
            VolumeStream::Music => &mut self.music,
            VolumeStream::Alarm => &mut self.alarm,
            VolumeStream::Notification => &mut self.notification,
        }
    }
}

fn get_args() -> Vec<String> {
    vec!["Volume".to_string()]
}

fn set_args(stream: VolumeStream, volume: i32) -> Vec<String> {
    let mut args = vec!["Volume".to_string()];
    args.push("-a".to_string());
    args.push("set-volume".to_string());
    extra(&mut args, "--es", "stream", stream.as_str());
    extra(&mut args, "--ei", "volume", volume.to_string());
    args
}

/// Read the current volume of every stream.
pub(crate) async fn get(config: &ApiConfig) -> Result<Volumes> {
    let entries: Vec<VolumeEntry> = read_json(config, get_args()).await?;
    let mut volumes = Volumes::default();
    for entry in entries {
        let stream = match entry.stream.as_str() {
            "call" => VolumeStream::Call,
            "system" => VolumeStream::System,
            "ring" => VolumeStream::Ring,
            "music" => VolumeStream::Music,
            "alarm" => VolumeStream::Alarm,
            "notification" => VolumeStream::Notification,
            other => {
                tracing::debug!(stream = other, "ignoring unknown audio stream");
                continue;
            }
        };
        *volumes.entry_mut(stream) = StreamVolume {
            volume: entry.volume,
            max_volume: entry.max_volume,
        };
    }
    Ok(volumes)
}

/// Set one stream's volume.
pub(crate) async fn set(config: &ApiConfig, stream: VolumeStream, volume: i32) -> Result<()> {
    run_checked(config, set_args(stream, volume), RUN_TIMEOUT).await
}

/// Bring the device to the target volumes: read the current state, issue
/// one set per stream that differs, and report what was actually applied
/// (requests above a stream's ceiling are clamped to it).
pub(crate) async fn apply(config: &ApiConfig, target: &Volumes) -> Result<Volumes> {
    let current = get(config).await?;
    let mut applied = current;
    for stream in VolumeStream::ALL {
        let want = target.get(stream);
        let have = current.get(stream);
        if want.volume == have.volume {
            continue;
        }
        set(config, stream, want.volume).await?;
        applied.entry_mut(stream).volume = want.volume.min(have.max_volume);
    }
    Ok(applied)
}
