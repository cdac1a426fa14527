//! Logger capability handed to the runner.

/// Sink for free-form diagnostic lines.
pub trait Logger: Send + Sync {
    fn log(&self, message: &str);
}

/// Default logger: forwards to `tracing` with the extension prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, message: &str) {
        tracing::info!(" > ksbanim {}", message);
    }
}
