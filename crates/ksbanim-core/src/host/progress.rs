//! Scoped progress notifications.
//!
//! A [`ProgressHandle`] is opened by the host for one action and released
//! when it is dropped, so every exit path of the action closes the
//! notification exactly once. [`Ticker`] posts a fixed status message on an
//! interval and is stopped when dropped; no report starts after the drop
//! returns.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Host-side notification that can display status text.
pub trait ProgressSink: Send + Sync {
    /// Show a status message under the notification title.
    fn report(&self, message: &str);

    /// Close the notification. Called exactly once by [`ProgressHandle`].
    fn finish(&self);
}

/// Cloneable reporting side of a progress notification.
#[derive(Clone)]
pub struct ProgressReporter {
    sink: Arc<dyn ProgressSink>,
}

impl ProgressReporter {
    pub fn report(&self, message: &str) {
        self.sink.report(message);
    }
}

/// Owning scope of a progress notification; closes it on drop.
pub struct ProgressHandle {
    sink: Arc<dyn ProgressSink>,
}

impl ProgressHandle {
    pub fn new(sink: Arc<dyn ProgressSink>) -> Self {
        Self { sink }
    }

    pub fn report(&self, message: &str) {
        self.sink.report(message);
    }

    /// A reporter that can be moved into background tasks.
    pub fn reporter(&self) -> ProgressReporter {
        ProgressReporter {
            sink: Arc::clone(&self.sink),
        }
    }
}

impl Drop for ProgressHandle {
    fn drop(&mut self) {
        self.sink.finish();
    }
}

impl std::fmt::Debug for ProgressHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressHandle").finish_non_exhaustive()
    }
}

/// Repeating status update bound to the lifetime of the value.
#[derive(Debug)]
pub struct Ticker {
    task: JoinHandle<()>,
    stopped: Arc<Mutex<bool>>,
}

impl Ticker {
    /// Post `message` every `period`, starting one period from now.
    ///
    /// Must be called inside a tokio runtime.
    pub fn start(reporter: ProgressReporter, period: Duration, message: impl Into<String>) -> Self {
        let message = message.into();
        let stopped = Arc::new(Mutex::new(false));
        let gate = Arc::clone(&stopped);
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                // Held while reporting so `drop` waits for an in-flight tick.
                let stopped = gate.lock().unwrap_or_else(PoisonError::into_inner);
                if *stopped {
                    break;
                }
                reporter.report(&message);
            }
        });
        Self { task, stopped }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        *self.stopped.lock().unwrap_or_else(PoisonError::into_inner) = true;
        self.task.abort();
    }
}
