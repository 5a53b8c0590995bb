//! Commands exposed by entities
//!
//! A [`Commands`] container maps command names to [`Command`]s. Names are
//! unique within a container; the container and each command carry their
//! own `enabled` flag.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::snapshot::{join_path, AttributeEntry, Snapshot};

/// Name of the start/stop command on charging and climatization
pub const START_STOP: &str = "start-stop";

/// Kinds of commands known to the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    /// Start or stop climatization
    ClimatizationStartStop,
    /// Start or stop charging
    ChargingStartStop,
}

impl CommandKind {
    /// Name the command is registered under
    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::ClimatizationStartStop | CommandKind::ChargingStartStop => START_STOP,
        }
    }
}

/// A single command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Command {
    name: &'static str,
    kind: CommandKind,
    /// Whether the command may currently be issued
    pub enabled: bool,
}

impl Command {
    /// Create a disabled command of the given kind
    pub fn new(kind: CommandKind) -> Self {
        Self {
            name: kind.name(),
            kind,
            enabled: false,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }
}

/// Name-indexed container of commands
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Commands {
    /// Whether the container is exposed at all
    pub enabled: bool,
    commands: BTreeMap<&'static str, Command>,
}

impl Commands {
    /// Create an empty, disabled container
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_command(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Register a command; fails if the name is taken
    pub fn add_command(&mut self, command: Command) -> ModelResult<()> {
        if self.commands.contains_key(command.name) {
            return Err(ModelError::DuplicateCommand(command.name.to_string()));
        }
        self.commands.insert(command.name, command);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Command> {
        self.commands.get_mut(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Snapshot for Commands {
    /// One entry per command, valued with its effective enabled state
    fn collect(&self, prefix: &str, out: &mut Vec<AttributeEntry>) {
        let prefix = join_path(prefix, "commands");
        for command in self.commands.values() {
            out.push(AttributeEntry::fixed(
                join_path(&prefix, command.name),
                serde_json::Value::Bool(self.enabled && command.enabled),
            ));
        }
    }
}
