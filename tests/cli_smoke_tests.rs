use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

const BIN_NAME: &str = "expense_core_cli";

fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).unwrap();
    cmd.env("EXPENSE_CORE_HOME", home.path());
    cmd
}

#[test]
fn no_arguments_prints_usage_and_fails() {
    let home = TempDir::new().unwrap();
    cli(&home).assert().failure().stderr(contains("Usage"));
}

#[test]
fn unknown_commands_fail_with_usage() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .arg("definitely-not-a-command")
        .assert()
        .failure()
        .stderr(contains("Usage"));
}

#[test]
fn totals_runs_on_a_fresh_home() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .arg("totals")
        .assert()
        .success()
        .stdout(contains("Balance"));
}

#[test]
fn limit_persists_between_invocations() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["limit", "1500"])
        .assert()
        .success()
        .stdout(contains("Monthly limit set to 1500.00."));

    cli(&home)
        .arg("budget")
        .assert()
        .success()
        .stdout(contains("1500.00"));
}

#[test]
fn export_writes_the_csv_header() {
    let home = TempDir::new().unwrap();
    let target = home.path().join("history.csv");
    cli(&home)
        .args(["export", target.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("Exported 0 transactions"));

    let written = std::fs::read_to_string(&target).unwrap();
    assert!(written.starts_with("Date,Title,Amount,Type"));
}

#[test]
fn clear_with_yes_flag_resets_without_prompting() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["limit", "900"])
        .assert()
        .success();

    cli(&home)
        .args(["clear", "--yes"])
        .assert()
        .success()
        .stdout(contains("All data cleared."));

    // The limit survives a clear; only history and categories reset.
    cli(&home)
        .arg("budget")
        .assert()
        .success()
        .stdout(contains("900.00"));
}
