//! Interactive command picker.
//!
//! Presents the same entries as the list surface and returns the chosen
//! command identifier. Uses dialoguer for terminal UI prompts.

use std::io::{self, Write};

use anyhow::Result;
use console::style;
use dialoguer::{Select, theme::ColorfulTheme};

use ksbanim_core::commands::ListEntry;

pub struct Picker<W: Write = io::Stdout> {
    entries: Vec<ListEntry>,
    writer: W,
    theme: ColorfulTheme,
}

impl Picker<io::Stdout> {
    pub fn new(entries: Vec<ListEntry>) -> Self {
        Self {
            entries,
            writer: io::stdout(),
            theme: ColorfulTheme::default(),
        }
    }
}

impl<W: Write> Picker<W> {
    #[cfg(test)]
    pub fn with_writer(entries: Vec<ListEntry>, writer: W) -> Self {
        Self {
            entries,
            writer,
            theme: ColorfulTheme::default(),
        }
    }

    /// Prompt for an entry. `None` when the user cancels.
    pub fn pick(&mut self) -> Result<Option<String>> {
        if self.entries.is_empty() {
            return Ok(None);
        }
        self.print_header()?;

        let items = self.items();
        let selection = Select::with_theme(&self.theme)
            .with_prompt("What do you want to set up?")
            .items(&items)
            .default(0)
            .interact_opt()?;

        Ok(selection.map(|index| self.entries[index].action_id.clone()))
    }

    fn print_header(&mut self) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", style("  ksbanim setup").bold().cyan())?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn items(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| format!("{:<20} {}", entry.label, style(&entry.action_id).dim()))
            .collect()
    }
}
