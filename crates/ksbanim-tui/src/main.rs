//! ksbanim TUI - Terminal User Interface
//!
//! Ratatui-based list of workspace setup commands.
//!
//! Usage:
//!   ksbanim-tui [WORKSPACE]

mod app;
mod host;

use std::path::PathBuf;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    layout::{Constraint, Layout},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, Paragraph},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ksbanim_core::commands::CommandRegistry;
use ksbanim_core::context::AppContext;
use ksbanim_core::runner::ActionRunner;

use crate::app::{App, KeyAction};
use crate::host::{TuiHost, UiEvent};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

type Backend = ratatui::backend::CrosstermBackend<std::io::Stdout>;

fn main() -> anyhow::Result<()> {
    // Logs would draw over the alternate screen.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ksbanim_tui=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::sink))
        .init();

    let workspace = match std::env::args_os().nth(1) {
        Some(path) => PathBuf::from(path),
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let ctx = AppContext::load(None)?;
    let registry = ctx.command_registry();
    let (tx, rx) = mpsc::channel();
    let host = TuiHost::new(vec![workspace], tx.clone());
    let runner = Arc::new(ctx.runner(Arc::new(host))?);

    let mut session = Session {
        app: App::new(registry.entries()),
        registry,
        runner,
        runtime,
        events: rx,
        sender: tx,
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = session.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    session.runtime.shutdown_timeout(Duration::from_secs(1));

    if let Err(err) = res {
        eprintln!("{err:?}");
    }

    Ok(())
}

struct Session {
    app: App,
    registry: CommandRegistry,
    runner: Arc<ActionRunner>,
    runtime: tokio::runtime::Runtime,
    events: mpsc::Receiver<UiEvent>,
    sender: mpsc::Sender<UiEvent>,
}

impl Session {
    fn run(&mut self, terminal: &mut Terminal<Backend>) -> anyhow::Result<()> {
        loop {
            while let Ok(ui_event) = self.events.try_recv() {
                self.app.on_event(ui_event);
            }

            terminal.draw(|f| ui(f, &self.app))?;

            if !event::poll(POLL_INTERVAL)? {
                continue;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match self.app.on_key(key.code) {
                KeyAction::Quit => return Ok(()),
                KeyAction::Run(action_id) => self.spawn(action_id),
                KeyAction::None => {}
            }
        }
    }

    fn spawn(&self, action_id: String) {
        let registry = self.registry.clone();
        let runner = Arc::clone(&self.runner);
        let sender = self.sender.clone();

        self.runtime.spawn(async move {
            let success = match registry.dispatch(&runner, &action_id).await {
                Ok(outcome) => outcome.is_success(),
                Err(err) => {
                    let _ = sender.send(UiEvent::Notice(ksbanim_core::host::Notice::Error(
                        err.to_string(),
                    )));
                    false
                }
            };
            let _ = sender.send(UiEvent::ActionDone { action_id, success });
        });
    }
}

fn ui(f: &mut Frame, app: &App) {
    let [list_area, progress_area, status_area, help_area] = Layout::vertical([
        Constraint::Length(app.entries.len() as u16 + 2),
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(f.area());

    let items: Vec<ListItem> = app
        .entries
        .iter()
        .map(|entry| {
            ListItem::new(Line::from(vec![
                Span::raw(format!("{:<20} ", entry.label)),
                Span::styled(entry.action_id.clone(), Style::new().fg(Color::DarkGray)),
            ]))
        })
        .collect();
    let list = List::new(items)
        .block(Block::bordered().title("ksbanim setup"))
        .highlight_style(Style::new().reversed())
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(list, list_area, &mut state);

    let progress = match &app.progress {
        Some((title, Some(report))) => format!("{title} {report}"),
        Some((title, None)) => title.clone(),
        None => String::new(),
    };
    f.render_widget(
        Paragraph::new(progress).block(Block::bordered().title("Progress")),
        progress_area,
    );

    let visible = status_area.height.saturating_sub(2) as usize;
    let skip = app.status.len().saturating_sub(visible);
    let lines: Vec<Line> = app
        .status
        .iter()
        .skip(skip)
        .map(|line| {
            let color = if line.is_error { Color::Red } else { Color::Green };
            Line::from(Span::styled(line.text.clone(), Style::new().fg(color)))
        })
        .collect();
    f.render_widget(
        Paragraph::new(lines).block(Block::bordered().title("Status")),
        status_area,
    );

    f.render_widget(
        Paragraph::new("↑/↓ select  Enter run  q quit").dim(),
        help_area,
    );
}
