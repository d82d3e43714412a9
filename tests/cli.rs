use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("reclaim").unwrap();
    cmd.env_remove("RECLAIM_ACCESS_CODE").env_remove("RUST_LOG");
    cmd
}

#[test]
fn project_prints_base_case_table() {
    cmd()
        .arg("project")
        .assert()
        .success()
        .stdout(contains("Scenario: Base Case"))
        .stdout(contains("Year 3"))
        .stdout(contains("$17,820,600"));
}

#[test]
fn project_json_has_results_and_summary() {
    cmd()
        .args(["project", "--json"])
        .assert()
        .success()
        .stdout(contains("\"results\""))
        .stdout(contains("\"summary\""))
        .stdout(contains("\"revenue_target\": 17820600.0"));
}

#[test]
fn overrides_show_in_header() {
    cmd()
        .args(["project", "--volume", "-10", "--override", "2:price=15"])
        .assert()
        .success()
        .stdout(contains("Global: volume=-10%"))
        .stdout(contains("Year 2 override: price=+15%"));
}

#[test]
fn out_of_range_input_is_clamped_by_default() {
    cmd()
        .args(["project", "--volume", "90"])
        .assert()
        .success()
        .stdout(contains("clamped global volume: +90% -> +50%"));
}

#[test]
fn strict_mode_rejects_out_of_range_input() {
    cmd()
        .args(["project", "--strict", "--volume", "90"])
        .assert()
        .code(2)
        .stderr(contains("Volume Variance"));
}

#[test]
fn malformed_override_is_a_usage_error() {
    cmd().args(["project", "--override", "4:price=10"]).assert().failure();
}

#[test]
fn cash_summary_includes_liquidity_walk() {
    cmd()
        .args(["summary", "--view", "cash"])
        .assert()
        .success()
        .stdout(contains("Year 2 ERA Grant"))
        .stdout(contains("Year 2 Liquidity Walk"))
        .stdout(contains("$610,000"));
}

#[test]
fn wrong_access_code_is_denied() {
    cmd()
        .env("RECLAIM_ACCESS_CODE", "cedar")
        .args(["project", "--access-code", "oak"])
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(contains("Access Denied."));
}

#[test]
fn correct_access_code_is_admitted() {
    cmd()
        .env("RECLAIM_ACCESS_CODE", "cedar")
        .args(["summary", "--access-code", "cedar"])
        .assert()
        .success()
        .stdout(contains("Year 3 Revenue"));
}

#[test]
fn closed_stdin_without_code_is_denied() {
    cmd()
        .env("RECLAIM_ACCESS_CODE", "cedar")
        .arg("project")
        .write_stdin("")
        .assert()
        .code(3);
}
