use crate::billing::{is_before_registration, registration_year_month};
use crate::calendar::YearMonth;
use crate::cli::core::{expect_args, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

const INFO_USAGE: &str = "info <registration YYYY-MM-DD> [--json]";
const PERIODS_USAGE: &str = "periods <registration YYYY-MM-DD>";
const UNPAID_USAGE: &str = "unpaid <registration YYYY-MM-DD> [paid YYYY-MM ...]";
const BEFORE_USAGE: &str = "before <YYYY-MM> <registration YYYY-MM-DD>";
const REG_MONTH_USAGE: &str = "reg-month <registration YYYY-MM-DD>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "info",
            "Show the due period and timing for a registration date",
            INFO_USAGE,
            cmd_info,
        ),
        CommandEntry::new(
            "periods",
            "List every period due since registration",
            PERIODS_USAGE,
            cmd_periods,
        ),
        CommandEntry::new(
            "unpaid",
            "List due periods missing from the paid months",
            UNPAID_USAGE,
            cmd_unpaid,
        ),
        CommandEntry::new(
            "before",
            "Check whether a month precedes the registration month",
            BEFORE_USAGE,
            cmd_before,
        ),
        CommandEntry::new(
            "reg-month",
            "Show the registration month",
            REG_MONTH_USAGE,
            cmd_reg_month,
        ),
    ]
}

fn cmd_info(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    expect_args(args, 1..=2, INFO_USAGE)?;
    let json = match args.get(1) {
        None => false,
        Some(flag) if flag.eq_ignore_ascii_case("--json") => true,
        Some(_) => return Err(CommandError::InvalidArguments(format!("usage: {INFO_USAGE}"))),
    };

    let cycle = context.calculator().billing_cycle(args[0], None)?;
    if json {
        output::line(serde_json::to_string_pretty(&cycle.info())?);
        return Ok(());
    }

    output::section(format!(
        "Billing as of {}",
        context.format_date(cycle.reference_date)
    ));
    output::two_column(&[
        ("Billing day", cycle.billing_day.to_string()),
        ("Current due month", cycle.current_due_year_month.to_string()),
        ("Period due date", context.format_date(cycle.period_due_date)),
        ("Days since due", cycle.days_since_due.to_string()),
        ("Next due date", context.format_date(cycle.next_due_date)),
        ("Days until next due", cycle.days_until_next_due.to_string()),
    ]);

    if is_before_registration(&cycle.current_due_year_month.to_string(), args[0])? {
        output::warning("Current due month precedes registration; nothing is owed yet.");
    } else if cycle.is_due_today() {
        output::info("A new billing period opens today.");
    }
    Ok(())
}

fn cmd_periods(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    expect_args(args, 1..=1, PERIODS_USAGE)?;
    let periods = context.calculator().due_periods(args[0], None)?;
    print_periods(
        context,
        &periods,
        "Due periods",
        "No billing periods due yet.",
    );
    Ok(())
}

fn cmd_unpaid(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(CommandError::InvalidArguments(format!("usage: {UNPAID_USAGE}")));
    }
    let paid = args[1..]
        .iter()
        .map(|raw| raw.parse::<YearMonth>())
        .collect::<Result<Vec<_>, _>>()?;
    let unpaid = context.calculator().unpaid_periods(args[0], None, paid)?;
    print_periods(
        context,
        &unpaid,
        "Unpaid periods",
        "All due periods are paid.",
    );
    Ok(())
}

fn print_periods(context: &ShellContext, periods: &[YearMonth], title: &str, empty: &str) {
    if periods.is_empty() {
        output::info(empty);
        return;
    }
    output::section(format!(
        "{} as of {}",
        title,
        context.format_date(context.reference_date())
    ));
    for period in periods {
        output::line(format!("  {}", period));
    }
    output::info(format!("{} period(s).", periods.len()));
}

fn cmd_before(_context: &mut ShellContext, args: &[&str]) -> CommandResult {
    expect_args(args, 2..=2, BEFORE_USAGE)?;
    let registration_month = registration_year_month(args[1])?;
    if is_before_registration(args[0], args[1])? {
        output::info(format!(
            "{} is before registration month {}.",
            args[0], registration_month
        ));
    } else {
        output::info(format!(
            "{} is not before registration month {}.",
            args[0], registration_month
        ));
    }
    Ok(())
}

fn cmd_reg_month(_context: &mut ShellContext, args: &[&str]) -> CommandResult {
    expect_args(args, 1..=1, REG_MONTH_USAGE)?;
    output::info(format!(
        "Registration month: {}",
        registration_year_month(args[0])?
    ));
    Ok(())
}
