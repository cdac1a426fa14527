//! Host that forwards runner activity to the UI thread.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::Sender;

use ksbanim_core::host::{Host, Notice, ProgressHandle, ProgressSink};

/// Messages drained by the render loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    ProgressStarted(String),
    ProgressReport(String),
    ProgressFinished,
    Notice(Notice),
    ActionDone { action_id: String, success: bool },
}

#[derive(Debug, Clone)]
pub struct TuiHost {
    roots: Vec<PathBuf>,
    events: Sender<UiEvent>,
}

impl TuiHost {
    pub fn new(roots: Vec<PathBuf>, events: Sender<UiEvent>) -> Self {
        Self { roots, events }
    }
}

impl Host for TuiHost {
    fn workspace_roots(&self) -> Vec<PathBuf> {
        self.roots.clone()
    }

    fn notify(&self, notice: Notice) {
        // The UI may already be gone while a background action finishes.
        let _ = self.events.send(UiEvent::Notice(notice));
    }

    fn begin_progress(&self, title: &str) -> ProgressHandle {
        let _ = self.events.send(UiEvent::ProgressStarted(title.to_string()));
        ProgressHandle::new(Arc::new(ChannelSink {
            events: self.events.clone(),
        }))
    }
}

struct ChannelSink {
    events: Sender<UiEvent>,
}

impl ProgressSink for ChannelSink {
    fn report(&self, message: &str) {
        let _ = self.events.send(UiEvent::ProgressReport(message.to_string()));
    }

    fn finish(&self) {
        let _ = self.events.send(UiEvent::ProgressFinished);
    }
}
