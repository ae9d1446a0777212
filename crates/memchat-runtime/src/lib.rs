//! # memchat-runtime
//!
//! Runtime backends for memchat. Provides the device/dtype descriptors reported
//! in API metadata, a byte-level tokenizer, a deterministic [`MockEngine`] that
//! stands in for a real model, and telemetry hooks (latency, tok/s).

pub mod device;
pub mod mock;
pub mod telemetry;
pub mod tokenizer;

pub use device::{DType, Device, DeviceParseError};
pub use mock::MockEngine;
pub use telemetry::{InferenceMetrics, InferenceTimer, LogTelemetry, NoopTelemetry, TelemetryHook, TracingTelemetry};
pub use tokenizer::ByteTokenizer;
