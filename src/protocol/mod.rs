//! Typed JSON replies from the Termux:API helper programs.
//!
//! The helpers answer on their standard output with a single JSON document
//! (the continuous sensor mode emits a sequence of them). This module holds
//! the serde types those documents decode into; transporting the bytes is
//! the [`pipe`](crate::pipe) module's job, interpreting them happens in the
//! feature wrappers.

mod replies;

pub use replies::{
    DialogReply, DialogSelection, FingerprintReply, SensorList, SensorReading, SensorReadings,
    VolumeEntry,
};
