//! UI state: list selection, running action and status log.

use crossterm::event::KeyCode;
use ksbanim_core::commands::ListEntry;

use crate::host::UiEvent;

const MAX_STATUS_LINES: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub is_error: bool,
}

/// What the render loop should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    None,
    Run(String),
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub entries: Vec<ListEntry>,
    pub selected: usize,
    pub status: Vec<StatusLine>,
    /// Title and latest report of the open progress notification.
    pub progress: Option<(String, Option<String>)>,
    pub running: Option<String>,
}

impl App {
    pub fn new(entries: Vec<ListEntry>) -> Self {
        Self {
            entries,
            selected: 0,
            status: Vec::new(),
            progress: None,
            running: None,
        }
    }

    pub fn on_key(&mut self, code: KeyCode) -> KeyAction {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                KeyAction::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.entries.len() {
                    self.selected += 1;
                }
                KeyAction::None
            }
            KeyCode::Enter => self.start_selected(),
            _ => KeyAction::None,
        }
    }

    fn start_selected(&mut self) -> KeyAction {
        if let Some(running) = &self.running {
            self.push_status(format!("{running} is still running"), true);
            return KeyAction::None;
        }
        let Some(entry) = self.entries.get(self.selected) else {
            return KeyAction::None;
        };
        let id = entry.action_id.clone();
        self.running = Some(id.clone());
        KeyAction::Run(id)
    }

    pub fn on_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::ProgressStarted(title) => self.progress = Some((title, None)),
            UiEvent::ProgressReport(message) => {
                if let Some((_, report)) = &mut self.progress {
                    *report = Some(message);
                }
            }
            UiEvent::ProgressFinished => self.progress = None,
            UiEvent::Notice(notice) => {
                let is_error = notice.is_error();
                self.push_status(notice.message().to_string(), is_error);
            }
            UiEvent::ActionDone { action_id, success } => {
                tracing::debug!(action = %action_id, success, "action finished");
                if self.running.as_deref() == Some(action_id.as_str()) {
                    self.running = None;
                }
            }
        }
    }

    fn push_status(&mut self, text: String, is_error: bool) {
        self.status.push(StatusLine { text, is_error });
        if self.status.len() > MAX_STATUS_LINES {
            let excess = self.status.len() - MAX_STATUS_LINES;
            self.status.drain(..excess);
        }
    }
}
