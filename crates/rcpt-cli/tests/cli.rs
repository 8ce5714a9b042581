use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `rcpt` command isolated from any user configuration.
fn rcpt(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("rcpt").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn parse_from_stdin_prints_json() {
    let home = TempDir::new().unwrap();

    rcpt(&home)
        .arg("parse")
        .write_stdin("Swiggy\nOrder 25/12/2024\nGrand Total: 349.00\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""amount":"349""#))
        .stdout(predicate::str::contains(r#""date":"25/12/2024""#))
        .stdout(predicate::str::contains(r#""category":"Food & Dining""#));
}

#[test]
fn parse_empty_input_gives_empty_record() {
    let home = TempDir::new().unwrap();

    rcpt(&home)
        .arg("parse")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"{"merchant":"","date":"","amount":"","category":"Other"}"#,
        ));
}

#[test]
fn parse_strict_rejects_empty_input() {
    let home = TempDir::new().unwrap();

    rcpt(&home)
        .args(["parse", "--strict"])
        .write_stdin("   \n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No text provided"));
}

#[test]
fn parse_file_as_csv() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("receipt.txt");
    fs::write(&input, "Apollo Pharmacy\n01/02/2024\nNet Amount: 512.40\n").unwrap();

    rcpt(&home)
        .args(["parse", "--format", "csv"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("merchant,date,iso_date,amount,category"))
        .stdout(predicate::str::contains("01/02/2024,2024-02-01,512.4,Health"));
}

#[test]
fn parse_missing_file_fails() {
    let home = TempDir::new().unwrap();

    rcpt(&home)
        .args(["parse", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn parse_show_warnings() {
    let home = TempDir::new().unwrap();

    rcpt(&home)
        .args(["parse", "--show-warnings", "--format", "text"])
        .write_stdin("Hello\nWorld\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Amount:   (not found)"))
        .stderr(predicate::str::contains("Could not extract total amount"));
}

#[test]
fn parse_with_explicit_config() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("config.json");
    fs::write(
        &config,
        r#"{ "categories": [ { "category": "Shopping", "keywords": ["bazaar"] } ] }"#,
    )
    .unwrap();

    rcpt(&home)
        .arg("--config")
        .arg(&config)
        .arg("parse")
        .write_stdin("City Bazaar\nTotal: 99.00\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""category":"Shopping""#));
}

#[test]
fn batch_writes_outputs_and_summary() {
    let home = TempDir::new().unwrap();
    let input_dir = home.path().join("in");
    let output_dir = home.path().join("out");
    fs::create_dir_all(&input_dir).unwrap();
    fs::write(input_dir.join("a.txt"), "Uber\nTrip fare\nTotal: 250.00\n").unwrap();
    fs::write(input_dir.join("b.txt"), "Airtel\nRecharge\nAmount: 299\n").unwrap();
    fs::write(input_dir.join("ignored.png"), "not text").unwrap();

    let pattern = format!("{}/*", input_dir.display());

    rcpt(&home)
        .args(["batch", &pattern, "--summary", "--output-dir"])
        .arg(&output_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 files"));

    let a = fs::read_to_string(output_dir.join("a.json")).unwrap();
    assert!(a.contains(r#""amount":"250""#));
    assert!(a.contains(r#""category":"Travel/Transport""#));

    let summary = fs::read_to_string(output_dir.join("summary.csv")).unwrap();
    assert!(summary.starts_with("filename,status,merchant"));
    assert!(summary.contains("b.txt,success"));
    assert!(summary.contains("299,Mobile/Internet"));
}

#[test]
fn config_init_and_get() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("custom.json");

    rcpt(&home)
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .success();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("\"fallback_window\": 8"));

    rcpt(&home)
        .args(["config", "get", "extraction.merchant_lines"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3"));
}

#[test]
fn config_set_rejects_unknown_key() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("custom.json");

    rcpt(&home)
        .arg("--config")
        .arg(&path)
        .args(["config", "set", "extraction.fallback_windw", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));

    assert!(!path.exists());
}

#[test]
fn config_commands_use_global_config_path() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("custom.json");

    rcpt(&home)
        .arg("--config")
        .arg(&path)
        .args(["config", "set", "extraction.fallback_window", "5"])
        .assert()
        .success();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("\"fallback_window\": 5"));

    rcpt(&home)
        .arg("--config")
        .arg(&path)
        .args(["config", "get", "extraction.fallback_window"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5"));

    rcpt(&home)
        .args(["config", "get", "extraction.fallback_window"])
        .assert()
        .success()
        .stdout(predicate::str::contains("8"));
}
