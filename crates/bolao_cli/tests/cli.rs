use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn bolao() -> Command {
    Command::cargo_bin("bolao").unwrap()
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn explicit_flags_write_plan_and_reports() {
    let out = tempfile::tempdir().unwrap();
    bolao()
        .args(["--participants", "10", "--contribution", "100"])
        .args(["--render", "text", "--render", "json", "--render", "table"])
        .arg("--out")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("PLAN:"));

    let plan = read_json(&out.path().join("plan.json"));
    assert_eq!(plan["selection"]["stability_key"], "9-1-10");
    assert_eq!(plan["inputs"]["budget"], "1000.00");

    let report = read_json(&out.path().join("report.json"));
    let keys: Vec<&str> = report.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, ["inputs", "tiers", "selection", "pool", "groups", "id"]);
    assert_eq!(report["id"], plan["id"]);

    let share = fs::read_to_string(out.path().join("share.txt")).unwrap();
    assert!(share.starts_with("*Bolao da Mega-Sena*"));
    assert!(share.contains("OK - *9 dezenas*"));
    assert!(share.contains("Contribuição por Participante: R$ 50,40"));

    let tiers = fs::read_to_string(out.path().join("tiers.txt")).unwrap();
    assert!(tiers.starts_with("Within budget\n"));
    assert!(tiers.contains("Over budget"));
}

#[test]
fn plan_file_mode() {
    let dir = tempfile::tempdir().unwrap();
    let plan = dir.path().join("bolao.json");
    fs::write(&plan, r#"{"participants": 10, "contribution": "10.00", "tickets": [{"choices": 6, "count": 4}]}"#).unwrap();
    let out = dir.path().join("out");

    bolao().arg("--plan").arg(&plan).arg("--out").arg(&out).arg("--quiet").assert().success();

    let doc = read_json(&out.join("plan.json"));
    assert_eq!(doc["selection"]["source"], "explicit");
    assert_eq!(doc["pool"]["total_slips"], 2);
}

#[test]
fn same_inputs_same_id() {
    let run = |dir: &Path| {
        let out = bolao()
            .args(["--participants", "12", "--budget", "1200", "--quiet", "--out"])
            .arg(dir)
            .output()
            .unwrap();
        assert!(out.status.success());
        String::from_utf8(out.stdout).unwrap()
    };
    let a = tempfile::tempdir().unwrap();
    let b = tempfile::tempdir().unwrap();
    assert_eq!(run(a.path()), run(b.path()));
}

#[test]
fn invalid_inputs_still_succeed() {
    let out = tempfile::tempdir().unwrap();
    bolao()
        .args(["--participants", "0", "--contribution", "100", "--render", "text", "--out"])
        .arg(out.path())
        .assert()
        .success();

    let doc = read_json(&out.path().join("plan.json"));
    assert_eq!(doc["inputs"]["inputs_valid"], false);
    assert!(doc["pool"].is_null());
    assert!(!out.path().join("share.txt").exists());
}

#[test]
fn validate_only_writes_nothing() {
    let out = tempfile::tempdir().unwrap();
    bolao()
        .args(["--participants", "3", "--budget", "60", "--validate-only", "--out"])
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    assert!(!out.path().join("plan.json").exists());
}

#[test]
fn flag_errors_exit_2() {
    bolao().args(["--participants", "3"]).assert().code(2);
    bolao()
        .args(["--participants", "3", "--budget", "60", "--contribution", "20"])
        .assert()
        .code(2);
    bolao()
        .args(["--plan", "https://example.com/plan.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no scheme"));
    bolao()
        .args(["--participants", "3", "--budget", "60", "--prices", "missing.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn domain_errors_exit_2() {
    let out = tempfile::tempdir().unwrap();
    bolao()
        .args(["--participants", "3", "--budget", "60", "--tickets", "21x1", "--out"])
        .arg(out.path())
        .assert()
        .code(2);

    let prices = out.path().join("prices.json");
    fs::write(&prices, r#"[{"choices": 7, "price": "42"}, {"choices": 6, "price": "6"}]"#).unwrap();
    bolao()
        .args(["--participants", "3", "--budget", "60", "--prices"])
        .arg(&prices)
        .arg("--out")
        .arg(out.path())
        .assert()
        .code(2);

    let plan = out.path().join("plan-in.json");
    fs::write(&plan, r#"{"participants": 3, "budget": "60", "color": "blue"}"#).unwrap();
    bolao().arg("--plan").arg(&plan).arg("--out").arg(out.path()).assert().code(2);
}

#[test]
fn custom_prices_and_tickets() {
    let dir = tempfile::tempdir().unwrap();
    let prices = dir.path().join("prices.json");
    fs::write(&prices, r#"[{"choices": 6, "price": "5"}, {"choices": 7, "price": "35"}]"#).unwrap();

    bolao()
        .args(["--participants", "2", "--budget", "60", "--tickets", "6x3,7", "--prices"])
        .arg(&prices)
        .arg("--out")
        .arg(dir.path())
        .arg("--quiet")
        .assert()
        .success();

    let doc = read_json(&dir.path().join("plan.json"));
    assert_eq!(doc["pool"]["total_cost"], "50.00");
    assert_eq!(doc["pool"]["total_tickets"], 4);
}

#[test]
fn oversized_ticket_counts_exit_2() {
    let out = tempfile::tempdir().unwrap();
    bolao()
        .args(["--participants", "1", "--budget", "6", "--tickets", "6x4294967295", "--out"])
        .arg(out.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("at most 100000"));
    assert!(!out.path().join("plan.json").exists());
}

#[test]
fn huge_budget_writes_plan_without_pool() {
    let out = tempfile::tempdir().unwrap();
    bolao()
        .args(["--participants", "1", "--budget", "100000000000000", "--quiet", "--out"])
        .arg(out.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("too large to select"));

    let doc = read_json(&out.path().join("plan.json"));
    assert_eq!(doc["selection"]["sync"], "oversized");
    assert!(doc["pool"].is_null());
}
