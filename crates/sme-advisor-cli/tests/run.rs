use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};

fn write_fixtures(dir: &Path, api_url: &str, save_runs: bool) -> PathBuf {
    fs::write(
        dir.join("packages.txt"),
        "Shield Basic: monitoring tier.\nShield Plus: adds managed response.\n",
    )
    .unwrap();
    fs::write(
        dir.join("vendors.txt"),
        "EDR\nSIEM-lite\nWazuh\nDefender for Business\n",
    )
    .unwrap();
    fs::write(
        dir.join("profiles.yaml"),
        r#"
SME_Profiles:
  - SME_Name: Acme
    Industry: Retail
    Size: { Headcount: 20, Endpoints: 25 }
    Cloud_On_Prem_Mix: { Cloud: 60%, On_Prem: 40% }
    Regulatory_Drivers: [PCI-DSS]
    Monthly_Budget_Band: $500-1000
"#,
    )
    .unwrap();
    let config_path = dir.join("config.yaml");
    fs::write(
        &config_path,
        format!(
            "save_runs: {save_runs}\n\
             package_definitions: {dir}/packages.txt\n\
             vendor_components: {dir}/vendors.txt\n\
             input_profiles: {dir}/profiles.yaml\n\
             model: openai/gpt-oss-20b\n\
             HF_API_URL: {api_url}\n",
            dir = dir.display(),
        ),
    )
    .unwrap();
    config_path
}

fn answer_body() -> Value {
    let answer = json!({
        "package": "Shield Basic",
        "tooling_stack": ["EDR", "SIEM-lite"],
        "justification": "Small retailer needing PCI coverage"
    })
    .to_string();
    json!({"choices": [{"message": {"content": answer}}]})
}

fn run_dir_in(runs_dir: &Path) -> PathBuf {
    let mut entries: Vec<_> = fs::read_dir(runs_dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    entries.sort();
    assert_eq!(entries.len(), 1, "expected exactly one run directory");
    let dir = entries.pop().unwrap();
    assert!(dir
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("run_"));
    dir
}

#[test]
fn end_to_end_writes_all_three_artifacts() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .header("authorization", "Bearer test-token");
        then.status(200).json_body(answer_body());
    });

    let temp = tempfile::tempdir().unwrap();
    let config = write_fixtures(temp.path(), &server.url("/v1/chat/completions"), true);
    let runs_dir = temp.path().join("runs");

    let mut cmd = Command::cargo_bin("sme-advisor-cli").unwrap();
    cmd.args([
        "--config",
        config.to_str().unwrap(),
        "--runs-dir",
        runs_dir.to_str().unwrap(),
    ])
    .env("HF_API_TOKEN", "test-token")
    .assert()
    .success();

    mock.assert();
    let run_dir = run_dir_in(&runs_dir);

    let pdf = fs::read(run_dir.join("SME_Recommendations.pdf")).unwrap();
    assert!(pdf.starts_with(b"%PDF"));

    let summary: Value =
        serde_json::from_str(&fs::read_to_string(run_dir.join("SME_Summary_Table.json")).unwrap())
            .unwrap();
    assert_eq!(summary.as_array().unwrap().len(), 1);
    assert_eq!(summary[0]["SME_Name"], "Acme");
    assert_eq!(summary[0]["Recommended_Package"], "Shield Basic");
    assert_eq!(summary[0]["Tooling_Stack"], json!(["EDR", "SIEM-lite"]));

    let condensed: Value = serde_json::from_str(
        &fs::read_to_string(run_dir.join("Concise_SME_Summary.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(condensed[0]["Name"], "Acme");
    assert_eq!(condensed[0]["Tooling_Stack"], "EDR, SIEM-lite");
}

#[test]
fn model_failure_still_exits_zero_with_empty_summaries() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(500).body("backend exploded");
    });

    let temp = tempfile::tempdir().unwrap();
    let config = write_fixtures(temp.path(), &server.url("/v1/chat/completions"), true);
    let runs_dir = temp.path().join("runs");

    let mut cmd = Command::cargo_bin("sme-advisor-cli").unwrap();
    cmd.args([
        "--config",
        config.to_str().unwrap(),
        "--runs-dir",
        runs_dir.to_str().unwrap(),
    ])
    .env("HF_API_TOKEN", "test-token")
    .assert()
    .success();

    let run_dir = run_dir_in(&runs_dir);
    let summary: Value =
        serde_json::from_str(&fs::read_to_string(run_dir.join("SME_Summary_Table.json")).unwrap())
            .unwrap();
    assert_eq!(summary, json!([]));
    assert!(run_dir.join("SME_Recommendations.pdf").exists());
}

#[test]
fn save_runs_false_writes_into_the_current_directory() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200).json_body(answer_body());
    });

    let temp = tempfile::tempdir().unwrap();
    let config = write_fixtures(temp.path(), &server.url("/v1/chat/completions"), false);

    let mut cmd = Command::cargo_bin("sme-advisor-cli").unwrap();
    cmd.args(["--config", config.to_str().unwrap()])
        .current_dir(temp.path())
        .env("HF_API_TOKEN", "test-token")
        .assert()
        .success();

    assert!(temp.path().join("SME_Recommendations.pdf").exists());
    assert!(temp.path().join("SME_Summary_Table.json").exists());
    assert!(temp.path().join("Concise_SME_Summary.json").exists());
    assert!(!temp.path().join("runs").exists());
}

#[test]
fn missing_config_file_is_fatal() {
    let temp = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("sme-advisor-cli").unwrap();
    cmd.args([
        "--config",
        temp.path().join("nope.yaml").to_str().unwrap(),
    ])
    .env("HF_API_TOKEN", "test-token")
    .assert()
    .failure()
    .stderr(predicate::str::contains("nope.yaml"));
}

#[test]
fn missing_api_token_is_fatal_before_any_model_call() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200).json_body(answer_body());
    });

    let temp = tempfile::tempdir().unwrap();
    let config = write_fixtures(temp.path(), &server.url("/v1/chat/completions"), true);

    let mut cmd = Command::cargo_bin("sme-advisor-cli").unwrap();
    cmd.args(["--config", config.to_str().unwrap()])
        .env_remove("HF_API_TOKEN")
        .assert()
        .failure()
        .stderr(predicate::str::contains("HF_API_TOKEN"));

    mock.assert_hits(0);
}
