//! Terminal host: spinner for progress, styled lines for notices.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use ksbanim_core::host::{Host, Notice, ProgressHandle, ProgressSink};

#[derive(Debug, Clone)]
pub struct TerminalHost {
    roots: Vec<PathBuf>,
}

impl TerminalHost {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }
}

impl Host for TerminalHost {
    fn workspace_roots(&self) -> Vec<PathBuf> {
        self.roots.clone()
    }

    fn notify(&self, notice: Notice) {
        match notice {
            Notice::Info(message) => println!("{} {}", style("✓").green(), message),
            Notice::Error(message) => eprintln!("{} {}", style("✗").red(), message),
        }
    }

    fn begin_progress(&self, title: &str) -> ProgressHandle {
        ProgressHandle::new(Arc::new(SpinnerSink::new(title)))
    }
}

struct SpinnerSink {
    title: String,
    bar: ProgressBar,
}

impl SpinnerSink {
    fn new(title: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")
        {
            bar.set_style(spinner_style);
        }
        bar.set_message(title.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self {
            title: title.to_string(),
            bar,
        }
    }
}

impl ProgressSink for SpinnerSink {
    fn report(&self, message: &str) {
        self.bar.set_message(format!("{} {}", self.title, style(message).dim()));
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
