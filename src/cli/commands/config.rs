use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::config::model::CONFIG_KEYS;

const CONFIG_USAGE: &str = "config [show|set <key> <value>|reset]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change saved preferences",
        CONFIG_USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let action = args.first().map(|arg| arg.to_lowercase());
    match action.as_deref() {
        None | Some("show") => {
            show_config(context);
            Ok(())
        }
        Some("set") => {
            if args.len() < 3 {
                return Err(CommandError::InvalidArguments(format!(
                    "usage: config set <{}> <value>",
                    CONFIG_KEYS.join("|")
                )));
            }
            let key = args[1].to_lowercase();
            let value = args[2..].join(" ");
            let mut updated = context.config.clone();
            updated.set(&key, &value)?;
            context.config_manager.save(&updated)?;
            context.config = updated;
            context.apply_output_preferences();
            output::success(format!("Saved {} = {}", key, value.trim()));
            Ok(())
        }
        Some("reset") => {
            context.config = Default::default();
            context.config_manager.save(&context.config)?;
            context.apply_output_preferences();
            output::success("Preferences reset to defaults.");
            Ok(())
        }
        Some(_) => Err(CommandError::InvalidArguments(format!(
            "usage: {CONFIG_USAGE}"
        ))),
    }
}

fn show_config(context: &ShellContext) {
    output::section("Configuration");
    let rows: Vec<(&str, String)> = CONFIG_KEYS
        .iter()
        .map(|key| (*key, context.config.get(key).unwrap_or_default()))
        .collect();
    output::two_column(&rows);
    output::info(format!(
        "Stored at {}",
        context.config_manager.config_path().display()
    ));
}
