use crate::calendar::parse_calendar_date;
use crate::cli::core::{expect_args, CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::utils::build_info;

const AS_OF_USAGE: &str = "as-of [YYYY-MM-DD|today]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "as-of",
            "Show or pin the reference date used by billing commands",
            AS_OF_USAGE,
            cmd_as_of,
        ),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_as_of(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    expect_args(args, 0..=1, AS_OF_USAGE)?;
    match args.first() {
        None => {}
        Some(arg) if arg.eq_ignore_ascii_case("today") => context.reference = None,
        Some(arg) => {
            let date = parse_calendar_date(arg)?;
            context.reference = Some(date);
        }
    }

    let today = context.format_date(context.reference_date());
    match context.reference {
        Some(_) => output::info(format!("Reference date pinned to {}.", today)),
        None => output::info(format!("Reference date follows the system clock ({}).", today)),
    }
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(format!("Academy Billing {}", meta.version));
    output::two_column(&[
        (
            "Build hash",
            format!("{} ({})", meta.git_hash, meta.git_status),
        ),
        ("Built at", meta.timestamp.to_string()),
        ("Target", meta.target.to_string()),
        ("Profile", meta.profile.to_string()),
        ("Rustc", meta.rustc.to_string()),
    ]);
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        match context.command(&name.to_lowercase()) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(name),
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
