use assert_cmd::Command;
use predicates::prelude::*;
use std::error::Error;
use tempfile::TempDir;

fn script(home: &TempDir, input: &str) -> Result<assert_cmd::assert::Assert, Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("academy_billing_cli")?;
    Ok(cmd
        .env("ACADEMY_BILLING_CLI_SCRIPT", "1")
        .env("ACADEMY_BILLING_HOME", home.path())
        .write_stdin(input.to_string())
        .assert())
}

#[test]
fn info_reports_due_month_and_timing() -> Result<(), Box<dyn Error>> {
    let home = TempDir::new()?;
    script(&home, "as-of 2026-01-10\ninfo 2025-12-20\nexit\n")?
        .success()
        .stdout(
            predicate::str::contains("Reference date pinned to 2026-01-10.")
                .and(predicate::str::is_match(r"Current due month\s+2025-12")?)
                .and(predicate::str::is_match(r"Next due date\s+2026-01-20")?)
                .and(predicate::str::is_match(r"Days until next due\s+10")?),
        );
    Ok(())
}

#[test]
fn info_json_uses_camel_case() -> Result<(), Box<dyn Error>> {
    let home = TempDir::new()?;
    script(&home, "as-of 2026-02-15\ninfo 2026-01-15 --json\n")?
        .success()
        .stdout(
            predicate::str::contains("\"currentDueYearMonth\": \"2026-02\"")
                .and(predicate::str::contains("\"daysSinceDue\": 0")),
        );
    Ok(())
}

#[test]
fn invalid_registration_is_reported_not_defaulted() -> Result<(), Box<dyn Error>> {
    let home = TempDir::new()?;
    script(&home, "info 2025-02-30\n")?
        .success()
        .stdout(predicate::str::contains("ERROR: [x] Invalid date: `2025-02-30`"));
    Ok(())
}

#[test]
fn future_registration_policy_is_configurable() -> Result<(), Box<dyn Error>> {
    let home = TempDir::new()?;
    script(&home, "as-of 2025-01-04\ninfo 2025-01-05\n")?
        .success()
        .stdout(predicate::str::contains("precedes registration date"));

    script(
        &home,
        "config set future_registration allow\nas-of 2025-01-04\ninfo 2025-01-05\n",
    )?
    .success()
    .stdout(
        predicate::str::is_match(r"Current due month\s+2024-12")?
            .and(predicate::str::contains("nothing is owed yet")),
    );

    // The preference persists across runs.
    script(&home, "config show\n")?
        .success()
        .stdout(predicate::str::is_match(r"future_registration\s+allow")?);
    Ok(())
}

#[test]
fn periods_and_unpaid_listing() -> Result<(), Box<dyn Error>> {
    let home = TempDir::new()?;
    script(
        &home,
        "as-of 2026-01-25\nperiods 2025-10-20\nunpaid 2025-10-20 2025-10 2025-12\n",
    )?
    .success()
    .stdout(
        predicate::str::contains("4 period(s).")
            .and(predicate::str::contains("2 period(s)."))
            .and(predicate::str::contains("  2025-11"))
            .and(predicate::str::contains("  2026-01")),
    );
    Ok(())
}

#[test]
fn registration_month_helpers() -> Result<(), Box<dyn Error>> {
    let home = TempDir::new()?;
    script(
        &home,
        "before 2024-12 2025-01-05\nbefore 2025-01 2025-01-05\nreg-month 2025-01-05\n",
    )?
    .success()
    .stdout(
        predicate::str::contains("2024-12 is before registration month 2025-01.")
            .and(predicate::str::contains(
                "2025-01 is not before registration month 2025-01.",
            ))
            .and(predicate::str::contains("Registration month: 2025-01")),
    );
    Ok(())
}

#[test]
fn unknown_command_suggests_nearest() -> Result<(), Box<dyn Error>> {
    let home = TempDir::new()?;
    script(&home, "inof 2025-01-05\n")?
        .success()
        .stdout(
            predicate::str::contains("Unknown command `inof`")
                .and(predicate::str::contains("Suggestion: `info`?")),
        );
    Ok(())
}

#[test]
fn version_prints_build_metadata() -> Result<(), Box<dyn Error>> {
    let home = TempDir::new()?;
    let output = script(&home, "version\n")?.success().get_output().stdout.clone();
    let stdout = String::from_utf8(output)?;
    let pattern = regex::Regex::new(r"=== Academy Billing \d+\.\d+\.\d+ ===")?;
    assert!(pattern.is_match(&stdout), "unexpected output: {stdout}");
    assert!(stdout.contains("Build hash"));
    Ok(())
}

#[test]
fn exit_stops_reading_script() -> Result<(), Box<dyn Error>> {
    let home = TempDir::new()?;
    script(&home, "exit\nreg-month 2025-01-05\n")?
        .success()
        .stdout(predicate::str::contains("Registration month").not());
    Ok(())
}
