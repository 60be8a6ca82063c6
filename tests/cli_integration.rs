/// CLI integration tests for rxscan.
///
/// Each test spawns the compiled binary via the `assert_cmd::cargo_bin_cmd!`
/// macro and sets `RXSCAN_HOME` to a fresh `TempDir` so tests never touch the
/// developer's real `~/.rxscan` data.
use assert_cmd::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

const AMOXICILLIN_TEXT: &str = "PRESCRIPTION\nDr. Emily Chen\nCity Medical Clinic\nPatient: Jane Smith\nDate: 06/10/2023\n\nRx: Amoxicillin 500mg\nTake three times daily with food\nRefills: 0\nDuration: 10 days\n\nDispense: 30 capsules";

// ── helpers ──────────────────────────────────────────────────────────────────

/// Returns a `Command` with `RXSCAN_HOME` pointing at `dir`.
fn cmd_in(dir: &TempDir) -> assert_cmd::Command {
    let mut c = cargo_bin_cmd!("rxscan");
    c.env("RXSCAN_HOME", dir.path());
    c.env_remove("RXSCAN_LOG");
    c
}

fn init_dir(dir: &TempDir) {
    cmd_in(dir).arg("init").assert().success();
}

/// Parse stdout JSON and return the root `Value`.
fn parse_json(output: &assert_cmd::assert::Assert) -> Value {
    let bytes = output.get_output().stdout.clone();
    serde_json::from_slice(&bytes).expect("stdout is not valid JSON")
}

/// Parse stderr JSON and return the root `Value`.
fn parse_stderr_json(output: &assert_cmd::assert::Assert) -> Value {
    let bytes = output.get_output().stderr.clone();
    serde_json::from_slice(&bytes).expect("stderr is not valid JSON")
}

/// Scan `text`, save it and return the new prescription id.
fn scan_and_save(dir: &TempDir, text: &str) -> String {
    let assert = cmd_in(dir)
        .args(["scan", "--save", "--text", text])
        .assert()
        .success();
    let json = parse_json(&assert);
    json["data"]["prescription"]["id"]
        .as_str()
        .expect("id in scan output")
        .to_string()
}

// ── init ─────────────────────────────────────────────────────────────────────

#[test]
fn test_init_creates_config_and_db() {
    let dir = TempDir::new().unwrap();
    cmd_in(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Config initialized"));

    assert!(dir.path().join("config.toml").exists());
    assert!(dir.path().join("data.db").exists());
}

#[test]
fn test_init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    init_dir(&dir);
}

// ── scan ─────────────────────────────────────────────────────────────────────

#[test]
fn test_scan_text_json_output() {
    let dir = TempDir::new().unwrap();
    let assert = cmd_in(&dir)
        .args(["scan", "--text", AMOXICILLIN_TEXT])
        .assert()
        .success();

    let json = parse_json(&assert);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["command"], "scan");
    assert_eq!(json["data"]["input"], "text");
    assert_eq!(json["data"]["saved"], false);

    let rx = &json["data"]["prescription"];
    assert_eq!(rx["name"], "Amoxicillin");
    assert_eq!(rx["dosage"], "500mg");
    assert_eq!(rx["frequency"], "three times daily");
    assert_eq!(rx["duration"], "10 days");
    assert_eq!(rx["doctor"], "Emily Chen");
    assert_eq!(rx["date"], "06/10/2023");
    assert_eq!(rx["status"], "active");
    assert!(rx["id"].as_str().unwrap().starts_with("rx-"));

    assert_eq!(json["data"]["sources"]["name"], "dictionary");
    assert_eq!(json["data"]["defaulted"], serde_json::json!([]));
}

#[test]
fn test_scan_reads_stdin() {
    let dir = TempDir::new().unwrap();
    let assert = cmd_in(&dir)
        .arg("scan")
        .write_stdin("Rx: Hydrocortisone 50mg")
        .assert()
        .success();

    let json = parse_json(&assert);
    assert_eq!(json["data"]["input"], "stdin");
    assert_eq!(json["data"]["prescription"]["name"], "Hydrocortisone");
    assert_eq!(json["data"]["prescription"]["dosage"], "50mg");
    assert_eq!(json["data"]["sources"]["name"], "label");
}

#[test]
fn test_scan_reads_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ocr.txt");
    fs::write(&path, AMOXICILLIN_TEXT).unwrap();

    let assert = cmd_in(&dir)
        .arg("scan")
        .arg(&path)
        .assert()
        .success();

    let json = parse_json(&assert);
    assert_eq!(json["data"]["input"], "file");
    assert_eq!(json["data"]["prescription"]["doctor"], "Emily Chen");
}

#[test]
fn test_scan_tolerates_invalid_utf8_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("noisy.txt");
    let mut bytes = b"Rx: Amoxicillin 500mg \xff\xfe\x80 twice daily".to_vec();
    bytes.extend_from_slice(b"\nDr. Emily Chen");
    fs::write(&path, bytes).unwrap();

    let assert = cmd_in(&dir).arg("scan").arg(&path).assert().success();
    let json = parse_json(&assert);
    assert_eq!(json["data"]["prescription"]["name"], "Amoxicillin");
    assert_eq!(json["data"]["prescription"]["frequency"], "twice daily");
    assert_eq!(json["data"]["prescription"]["doctor"], "Emily Chen");
}

#[test]
fn test_scan_tolerates_invalid_utf8_stdin() {
    let dir = TempDir::new().unwrap();
    let assert = cmd_in(&dir)
        .arg("scan")
        .write_stdin(b"\xc3\x28 Rx: Hydrocortisone 50mg \xa0\xa1".to_vec())
        .assert()
        .success();
    let json = parse_json(&assert);
    assert_eq!(json["data"]["prescription"]["name"], "Hydrocortisone");
    assert_eq!(json["data"]["prescription"]["dosage"], "50mg");
}

#[test]
fn test_scan_missing_file_errors() {
    let dir = TempDir::new().unwrap();
    let assert = cmd_in(&dir)
        .args(["scan", "does-not-exist.txt"])
        .assert()
        .failure();

    let json = parse_stderr_json(&assert);
    assert_eq!(json["status"], "error");
    assert_eq!(json["command"], "scan");
    assert!(
        json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("cannot read")
    );
}

#[test]
fn test_scan_simulated_sample() {
    let dir = TempDir::new().unwrap();
    let assert = cmd_in(&dir)
        .args(["scan", "--simulate", "cholesterol_rx.jpg"])
        .assert()
        .success();

    let json = parse_json(&assert);
    assert_eq!(json["data"]["input"], "simulated");
    assert_eq!(json["data"]["prescription"]["name"], "Atorvastatin");
    assert_eq!(json["data"]["prescription"]["frequency"], "once daily");
}

#[test]
fn test_scan_date_override_fills_missing_date() {
    let dir = TempDir::new().unwrap();
    let assert = cmd_in(&dir)
        .args(["--date", "2024-01-02", "scan", "--text", "Take aspirin 81 mg once daily"])
        .assert()
        .success();

    let json = parse_json(&assert);
    assert_eq!(json["data"]["prescription"]["date"], "2024-01-02");
    assert_eq!(
        json["data"]["defaulted"],
        serde_json::json!(["duration", "doctor", "date"])
    );
}

#[test]
fn test_scan_short_text_all_placeholders() {
    let dir = TempDir::new().unwrap();
    let assert = cmd_in(&dir)
        .args(["scan", "--text", "  hi  "])
        .assert()
        .success();

    let json = parse_json(&assert);
    let rx = &json["data"]["prescription"];
    assert_eq!(rx["name"], "Unknown");
    assert_eq!(rx["dosage"], "Not specified");
    assert_eq!(rx["frequency"], "As directed");
    assert_eq!(rx["duration"], "As prescribed");
    assert_eq!(rx["doctor"], "Unknown");
}

#[test]
fn test_scan_human_output_flags_missing_fields() {
    let dir = TempDir::new().unwrap();
    cmd_in(&dir)
        .args(["--human", "scan", "--text", "Take aspirin 81 mg once daily"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Aspirin"))
        .stdout(predicate::str::contains("Not found, please verify"));
}

// ── list / show / edit / status / remove ─────────────────────────────────────

#[test]
fn test_saved_prescription_lifecycle() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    let id = scan_and_save(&dir, AMOXICILLIN_TEXT);

    let json = parse_json(&cmd_in(&dir).arg("list").assert().success());
    assert_eq!(json["data"]["count"], 1);
    assert_eq!(json["data"]["prescriptions"][0]["id"], id.as_str());

    let json = parse_json(&cmd_in(&dir).args(["show", &id]).assert().success());
    assert_eq!(json["data"]["prescription"]["name"], "Amoxicillin");

    let json = parse_json(
        &cmd_in(&dir)
            .args(["edit", &id, "--dosage", "250 mg", "--rx-date", "2023-06-10"])
            .assert()
            .success(),
    );
    assert_eq!(json["data"]["prescription"]["dosage"], "250 mg");
    assert_eq!(json["data"]["prescription"]["date"], "2023-06-10");
    assert_eq!(json["data"]["prescription"]["id"], id.as_str());

    let json = parse_json(&cmd_in(&dir).args(["status", &id, "expired"]).assert().success());
    assert_eq!(json["data"]["status"], "expired");

    let json = parse_json(
        &cmd_in(&dir)
            .args(["list", "--status", "active"])
            .assert()
            .success(),
    );
    assert_eq!(json["data"]["count"], 0);

    let json = parse_json(&cmd_in(&dir).args(["remove", &id, "--yes"]).assert().success());
    assert_eq!(json["data"]["removed"], true);

    let json = parse_json(&cmd_in(&dir).arg("list").assert().success());
    assert_eq!(json["data"]["count"], 0);
}

#[test]
fn test_list_human_table() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    cmd_in(&dir)
        .args(["--human", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No prescriptions saved."));

    scan_and_save(&dir, AMOXICILLIN_TEXT);
    cmd_in(&dir)
        .args(["--human", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Amoxicillin"))
        .stdout(predicate::str::contains("active"));
}

#[test]
fn test_show_missing_reports_error_envelope() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    let assert = cmd_in(&dir).args(["show", "rx-missing"]).assert().failure();

    let json = parse_stderr_json(&assert);
    assert_eq!(json["status"], "error");
    assert_eq!(json["command"], "show");
    assert_eq!(json["error"]["code"], "general_error");
    assert!(json["data"].is_null());
}

#[test]
fn test_edit_without_fields_fails() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    let id = scan_and_save(&dir, AMOXICILLIN_TEXT);
    cmd_in(&dir)
        .args(["edit", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to edit"));
}

#[test]
fn test_status_rejects_unknown_value() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    let id = scan_and_save(&dir, AMOXICILLIN_TEXT);
    cmd_in(&dir).args(["status", &id, "paused"]).assert().failure();
}

#[test]
fn test_remove_without_confirmation_aborts() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    let id = scan_and_save(&dir, AMOXICILLIN_TEXT);

    cmd_in(&dir)
        .args(["remove", &id])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Aborted"));

    let json = parse_json(&cmd_in(&dir).arg("list").assert().success());
    assert_eq!(json["data"]["count"], 1);
}

// ── dict / config ────────────────────────────────────────────────────────────

#[test]
fn test_dict_add_extends_scanning() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);

    let json = parse_json(&cmd_in(&dir).args(["dict", "add", "Warfarin"]).assert().success());
    assert_eq!(json["data"]["added"], "warfarin");

    let assert = cmd_in(&dir)
        .args(["scan", "--text", "Rx: Warfarin 5mg daily"])
        .assert()
        .success();
    let json = parse_json(&assert);
    assert_eq!(json["data"]["sources"]["name"], "dictionary");

    let json = parse_json(&cmd_in(&dir).args(["dict", "list"]).assert().success());
    assert_eq!(json["data"]["count"], 21);
    assert_eq!(json["data"]["extra"], serde_json::json!(["warfarin"]));
}

#[test]
fn test_dict_add_builtin_name_fails() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    cmd_in(&dir)
        .args(["dict", "add", "Aspirin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already in the dictionary"));
}

#[test]
fn test_config_show_json() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    let json = parse_json(&cmd_in(&dir).args(["config", "show"]).assert().success());
    assert_eq!(json["command"], "config");
    assert_eq!(json["data"]["config"]["dictionary"]["extra"], serde_json::json!([]));
}

// ── completions ──────────────────────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    let dir = TempDir::new().unwrap();
    cmd_in(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rxscan"));
}
