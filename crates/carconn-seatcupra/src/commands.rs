//! Default command registration
//!
//! Climatization (and charging, where present) always expose a start/stop
//! command, so integrations can rely on it before the connector wires up
//! the actual request handling.

use carconn_model::{Command, CommandKind, Commands};

/// Make sure `slot` holds an enabled container with an enabled `kind` command
///
/// Converges to the same state no matter how often it runs. Returns `true`
/// if anything had to change.
pub fn ensure_command(slot: &mut Option<Commands>, kind: CommandKind) -> bool {
    let mut changed = false;

    let commands = slot.get_or_insert_with(|| {
        changed = true;
        Commands::new()
    });

    match commands.get_mut(kind.name()) {
        Some(command) => {
            if !command.enabled {
                command.enabled = true;
                changed = true;
            }
        }
        None => {
            let mut command = Command::new(kind);
            command.enabled = true;
            if commands.add_command(command).is_ok() {
                changed = true;
            }
        }
    }

    if !commands.enabled {
        commands.enabled = true;
        changed = true;
    }

    if changed {
        tracing::debug!(?kind, "Registered default command");
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use carconn_model::START_STOP;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_creates_container_and_command() {
        let mut slot = None;
        assert!(ensure_command(&mut slot, CommandKind::ClimatizationStartStop));

        let commands = slot.unwrap();
        assert!(commands.enabled);
        assert_eq!(commands.len(), 1);
        let command = commands.get(START_STOP).unwrap();
        assert!(command.enabled);
        assert_eq!(command.kind(), CommandKind::ClimatizationStartStop);
    }

    #[test]
    fn test_second_run_is_noop() {
        let mut slot = None;
        ensure_command(&mut slot, CommandKind::ChargingStartStop);
        let once = slot.clone();

        assert!(!ensure_command(&mut slot, CommandKind::ChargingStartStop));
        assert_eq!(slot, once);
    }

    #[test]
    fn test_enables_existing_command_and_container() {
        let mut commands = Commands::new();
        commands
            .add_command(Command::new(CommandKind::ChargingStartStop))
            .unwrap();
        let mut slot = Some(commands);

        assert!(ensure_command(&mut slot, CommandKind::ChargingStartStop));
        let commands = slot.unwrap();
        assert!(commands.enabled);
        assert_eq!(commands.len(), 1);
        assert!(commands.get(START_STOP).unwrap().enabled);
    }
}
