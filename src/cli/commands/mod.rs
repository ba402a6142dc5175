pub mod billing;
pub mod config;
pub mod system;

use crate::cli::registry::{CommandEntry, CommandRegistry};

pub(crate) fn all_entries() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(billing::definitions());
    commands.extend(config::definitions());
    commands.extend(system::definitions());
    commands
}

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    for entry in all_entries() {
        registry.register(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_names_are_unique_and_lowercase() {
        let entries = all_entries();
        let mut names: Vec<_> = entries.iter().map(|entry| entry.name).collect();
        assert!(names.iter().all(|name| *name == name.to_lowercase()));
        names.sort();
        names.dedup();
        assert_eq!(names.len(), entries.len());
    }

    #[test]
    fn registry_keeps_definition_order() {
        let mut registry = CommandRegistry::new();
        register_all(&mut registry);
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names.first(), Some(&"info"));
        assert_eq!(names.last(), Some(&"exit"));
    }
}
