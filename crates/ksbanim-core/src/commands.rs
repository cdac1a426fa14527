//! Command identifiers and list entries.
//!
//! Frontends never hold actions of their own: they look them up here by
//! command identifier, and list surfaces render [`CommandRegistry::entries`].

use serde::Serialize;

use crate::action::{Action, ActionOutcome};
use crate::config::KsbConfig;
use crate::error::UnknownCommand;
use crate::runner::ActionRunner;

/// One selectable row in a list surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListEntry {
    pub label: String,
    pub action_id: String,
    pub icon: String,
}

impl From<&Action> for ListEntry {
    fn from(action: &Action) -> Self {
        Self {
            label: action.label.clone(),
            action_id: action.id.clone(),
            icon: action.icon.clone(),
        }
    }
}

/// Ordered mapping from command identifier to [`Action`].
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    actions: Vec<Action>,
}

impl CommandRegistry {
    /// The three built-in commands, in list order.
    pub fn from_config(config: &KsbConfig) -> Self {
        Self {
            actions: vec![
                Action::fetch_file(config),
                Action::install_dependency(config),
                Action::install_extension(config),
            ],
        }
    }

    pub fn get(&self, id: &str) -> Option<&Action> {
        self.actions.iter().find(|action| action.id == id)
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn command_ids(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(|action| action.id.as_str())
    }

    pub fn entries(&self) -> Vec<ListEntry> {
        self.actions.iter().map(ListEntry::from).collect()
    }

    /// Run the action registered under `id`.
    pub async fn dispatch(
        &self,
        runner: &ActionRunner,
        id: &str,
    ) -> Result<ActionOutcome, UnknownCommand> {
        let action = self
            .get(id)
            .ok_or_else(|| UnknownCommand(id.to_string()))?;
        tracing::debug!(command = id, "dispatching command");
        Ok(runner.run(action).await)
    }
}
