//! Telemetry hooks for generation performance measurement.
//!
//! Provides:
//! - [`InferenceMetrics`]: latency, tokens/sec and token counts for one reply
//! - [`TelemetryHook`] trait: callback interface for metric reporting
//! - [`InferenceTimer`]: records the start instant and computes metrics
//! - [`NoopTelemetry`] / [`TracingTelemetry`] / [`LogTelemetry`]: built-in hooks

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use crate::device::Device;

/// Aggregate metrics from one generation call.
#[derive(Debug, Clone)]
pub struct InferenceMetrics {
    /// Device the engine reported.
    pub device: Device,
    /// Prompt tokens handed to the engine (after truncation).
    pub prompt_tokens: usize,
    /// Tokens produced beyond the prompt.
    pub generated_tokens: usize,
    /// Wall-clock seconds from prompt submission to decoded output.
    pub latency_sec: f64,
    /// Generated tokens per second over the whole call.
    pub tokens_per_sec: f64,
}

/// Callback trait for inference telemetry.
///
/// Methods default to no-ops so hooks can be selective.
pub trait TelemetryHook: Send + Sync {
    /// Called when a generation call starts.
    fn on_generation_start(&self, _prompt_tokens: usize) {}

    /// Called when generation finishes with the full metrics summary.
    fn on_generation_complete(&self, _metrics: &InferenceMetrics) {}
}

/// No-op telemetry hook.
#[derive(Debug, Clone, Copy)]
pub struct NoopTelemetry;

impl TelemetryHook for NoopTelemetry {}

/// Emits one `tracing` event per completed generation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTelemetry;

impl TelemetryHook for TracingTelemetry {
    fn on_generation_start(&self, prompt_tokens: usize) {
        tracing::debug!(prompt_tokens, "generation started");
    }

    fn on_generation_complete(&self, metrics: &InferenceMetrics) {
        tracing::info!(
            device = %metrics.device,
            prompt_tokens = metrics.prompt_tokens,
            generated_tokens = metrics.generated_tokens,
            latency_sec = metrics.latency_sec,
            tokens_per_sec = metrics.tokens_per_sec,
            "generation complete"
        );
    }
}

/// Collects metrics into a retrievable report.
#[derive(Debug, Clone)]
pub struct LogTelemetry {
    last_report: Arc<Mutex<Option<InferenceMetrics>>>,
}

impl Default for LogTelemetry {
    fn default() -> Self {
        Self::new()
    }
}

impl LogTelemetry {
    pub fn new() -> Self {
        Self {
            last_report: Arc::new(Mutex::new(None)),
        }
    }

    /// Retrieve the last completed generation's metrics.
    pub fn last_metrics(&self) -> Option<InferenceMetrics> {
        self.last_report
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl TelemetryHook for LogTelemetry {
    fn on_generation_complete(&self, metrics: &InferenceMetrics) {
        *self.last_report.lock().unwrap_or_else(PoisonError::into_inner) = Some(metrics.clone());
    }
}

/// Times one generation call and computes [`InferenceMetrics`].
///
/// Usage:
/// 1. Call [`InferenceTimer::start`] right before handing the prompt to the engine
/// 2. Call [`InferenceTimer::finish`] with the number of generated tokens
pub struct InferenceTimer {
    device: Device,
    prompt_tokens: usize,
    start: Instant,
    hook: Arc<dyn TelemetryHook>,
}

impl InferenceTimer {
    /// Start timing. Fires `on_generation_start`.
    pub fn start(device: Device, prompt_tokens: usize, hook: Arc<dyn TelemetryHook>) -> Self {
        hook.on_generation_start(prompt_tokens);
        Self {
            device,
            prompt_tokens,
            start: Instant::now(),
            hook,
        }
    }

    /// Finalize and return metrics. Fires `on_generation_complete`.
    pub fn finish(self, generated_tokens: usize) -> InferenceMetrics {
        let latency_sec = self.start.elapsed().as_secs_f64();
        let tokens_per_sec = if latency_sec > 0.0 && generated_tokens > 0 {
            generated_tokens as f64 / latency_sec
        } else {
            0.0
        };

        let metrics = InferenceMetrics {
            device: self.device,
            prompt_tokens: self.prompt_tokens,
            generated_tokens,
            latency_sec,
            tokens_per_sec,
        };

        self.hook.on_generation_complete(&metrics);
        metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_metrics() -> InferenceMetrics {
        InferenceMetrics {
            device: Device::Cpu,
            prompt_tokens: 4,
            generated_tokens: 8,
            latency_sec: 0.5,
            tokens_per_sec: 16.0,
        }
    }

    #[test]
    fn noop_and_tracing_hooks_run() {
        NoopTelemetry.on_generation_complete(&sample_metrics());
        TracingTelemetry.on_generation_start(4);
        TracingTelemetry.on_generation_complete(&sample_metrics());
    }

    #[test]
    fn log_telemetry_captures_metrics() {
        let hook = LogTelemetry::new();
        assert!(hook.last_metrics().is_none());

        hook.on_generation_complete(&sample_metrics());

        let captured = hook.last_metrics().unwrap();
        assert_eq!(captured.latency_sec, 0.5);
        assert_eq!(captured.generated_tokens, 8);
    }

    #[test]
    fn timer_fires_hooks() {
        let log = LogTelemetry::new();
        let timer = InferenceTimer::start(Device::Metal, 3, Arc::new(log.clone()));
        let metrics = timer.finish(2);

        assert_eq!(metrics.device, Device::Metal);
        assert_eq!(metrics.prompt_tokens, 3);
        assert_eq!(metrics.generated_tokens, 2);
        assert!(metrics.latency_sec >= 0.0);

        let captured = log.last_metrics().unwrap();
        assert_eq!(captured.generated_tokens, 2);
    }

    #[test]
    fn zero_tokens_reports_zero_throughput() {
        let timer = InferenceTimer::start(Device::Cpu, 1, Arc::new(NoopTelemetry));
        let metrics = timer.finish(0);
        assert_eq!(metrics.tokens_per_sec, 0.0);
    }
}
