//! Reply documents emitted by the helper programs.
//!
//! Field names match the helper's JSON exactly; unknown fields are ignored
//! so newer helper versions stay readable.

use std::collections::HashMap;

use serde::Deserialize;

/// Reply from the `Dialog` helper.
///
/// Which fields are present depends on the input method: single-choice
/// dialogs carry `index`, checkbox dialogs carry `values`, text-like
/// dialogs carry `text`. A missing `code` paired with `error` means the
/// helper failed outright (seen with speech input on devices without a
/// recognizer).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DialogReply {
    pub code: Option<i64>,
    pub text: Option<String>,
    pub index: Option<i64>,
    pub values: Option<Vec<DialogSelection>>,
    pub error: Option<String>,
}

/// One selected entry of a checkbox dialog.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DialogSelection {
    pub index: i64,
    pub text: Option<String>,
}

/// Reply from the `Fingerprint` helper.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FingerprintReply {
    pub auth_result: Option<String>,
    #[serde(default)]
    pub errors: Vec<String>,
    pub failed_attempts: Option<i64>,
}

/// Reply from `Sensor -a list`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SensorList {
    #[serde(default)]
    pub sensors: Vec<String>,
}

/// One sensor's values inside a readings document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SensorReading {
    #[serde(default)]
    pub values: Vec<f64>,
}

/// A readings document: sensor name to its latest values.
pub type SensorReadings = HashMap<String, SensorReading>;

/// One audio stream's entry in the `Volume` helper reply.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VolumeEntry {
    pub stream: String,
    pub volume: i32,
    pub max_volume: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialog_reply_text_input() {
        let reply: DialogReply =
            serde_json::from_str(r#"{"code": -1, "text": "hello"}"#).unwrap();
        assert_eq!(reply.code, Some(-1));
        assert_eq!(reply.text.as_deref(), Some("hello"));
        assert!(reply.index.is_none());
        assert!(reply.values.is_none());
        assert!(reply.error.is_none());
    }

    #[test]
    fn dialog_reply_checkbox() {
        let raw = r#"{
            "code": -1,
            "text": "[two, three]",
            "values": [
                {"index": 1, "text": "two"},
                {"index": 2, "text": "three"}
            ]
        }"#;
        let reply: DialogReply = serde_json::from_str(raw).unwrap();
        let values = reply.values.unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0].index, 1);
        assert_eq!(values[1].text.as_deref(), Some("three"));
    }

    #[test]
    fn dialog_reply_speech_error() {
        let reply: DialogReply =
            serde_json::from_str(r#"{"error": "recognizer not present"}"#).unwrap();
        assert!(reply.code.is_none());
        assert_eq!(reply.error.as_deref(), Some("recognizer not present"));
    }

    #[test]
    fn fingerprint_reply() {
        let raw = r#"{"errors": [], "failed_attempts": 0, "auth_result": "AUTH_RESULT_SUCCESS"}"#;
        let reply: FingerprintReply = serde_json::from_str(raw).unwrap();
        assert_eq!(reply.auth_result.as_deref(), Some("AUTH_RESULT_SUCCESS"));
        assert!(reply.errors.is_empty());
        assert_eq!(reply.failed_attempts, Some(0));
    }

    #[test]
    fn sensor_list_reply() {
        let raw = r#"{"sensors": ["accelerometer", "gyroscope"]}"#;
        let reply: SensorList = serde_json::from_str(raw).unwrap();
        assert_eq!(reply.sensors, vec!["accelerometer", "gyroscope"]);
    }

    #[test]
    fn sensor_readings_document() {
        let raw = r#"{
            "accelerometer": {"values": [0.1, 9.8, 0.0]},
            "light": {"values": [122.0]}
        }"#;
        let readings: SensorReadings = serde_json::from_str(raw).unwrap();
        assert_eq!(readings["accelerometer"].values, vec![0.1, 9.8, 0.0]);
        assert_eq!(readings["light"].values, vec![122.0]);
    }

    #[test]
    fn volume_entries() {
        let raw = r#"[
            {"stream": "music", "volume": 5, "max_volume": 15},
            {"stream": "ring", "volume": 0, "max_volume": 7}
        ]"#;
        let entries: Vec<VolumeEntry> = serde_json::from_str(raw).unwrap();
        assert_eq!(entries[0].stream, "music");
        assert_eq!(entries[0].volume, 5);
        assert_eq!(entries[1].max_volume, 7);
    }

    #[test]
    fn unknown_fields_ignored() {
        let reply: DialogReply =
            serde_json::from_str(r#"{"code": -2, "brand_new_field": true}"#).unwrap();
        assert_eq!(reply.code, Some(-2));
    }
}
