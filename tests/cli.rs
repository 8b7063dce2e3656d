mod common;

use common::TestEnv;
use predicates::prelude::*;
use predicates::str::contains;
use serde_json::Value;

fn listed_passwords(stdout: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .filter_map(|line| {
            let (idx, rest) = line.split_once(". ")?;
            idx.chars().all(|c| c.is_ascii_digit()).then(|| rest.to_string())
        })
        .collect()
}

#[test]
fn generate_mixed_policy() {
    let env = TestEnv::new();
    let out = env
        .cmd()
        .args([
            "generate", "--length", "12", "--classes", "lower,upper,digit",
            "--allow-ambiguous", "--require-each", "--count", "1",
        ])
        .assert()
        .success()
        .stdout(contains("Entropy:"))
        .get_output()
        .stdout
        .clone();

    let passwords = listed_passwords(&out);
    assert_eq!(passwords.len(), 1);
    let pw = &passwords[0];
    assert_eq!(pw.chars().count(), 12);
    assert!(pw.chars().any(|c| c.is_ascii_lowercase()));
    assert!(pw.chars().any(|c| c.is_ascii_uppercase()));
    assert!(pw.chars().any(|c| c.is_ascii_digit()));
}

#[test]
fn too_short_for_classes_fails() {
    let env = TestEnv::new();
    env.cmd()
        .args(["generate", "--length", "2", "--classes", "lower,upper,digit", "--require-each"])
        .assert()
        .failure()
        .stderr(contains("too short"));
}

#[test]
fn zero_count_fails() {
    let env = TestEnv::new();
    env.cmd()
        .args(["generate", "--count", "0"])
        .assert()
        .failure()
        .stderr(contains("Count must be at least 1"));
}

#[test]
fn preview_digits_without_ambiguous() {
    let env = TestEnv::new();
    env.cmd()
        .args(["preview", "--classes", "digit", "--avoid-ambiguous", "--length", "8"])
        .assert()
        .success()
        .stdout(contains("23456789"))
        .stdout(contains("Charset size: 8"));
}

#[test]
fn estimate_sixteen_lowercase() {
    let env = TestEnv::new();
    env.cmd()
        .args(["estimate", "--length", "16", "--pool-size", "26"])
        .assert()
        .success()
        .stdout(contains("75.2 bits").and(contains("Strong")));
}

#[test]
fn exports_csv_batch() {
    let env = TestEnv::new();
    let path = env.file("out/batch.csv");
    env.cmd()
        .args(["generate", "--count", "4", "--output"])
        .arg(&path)
        .assert()
        .success()
        .stdout(contains("saved to"));

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines[0], "index,password,bits,rating");
    assert_eq!(lines.len(), 5);
    assert!(lines[4].starts_with("4,"));
}

#[test]
fn save_uses_timestamped_text_file() {
    let env = TestEnv::new();
    env.cmd().args(["generate", "--count", "2", "--save"]).assert().success();

    let saved: Vec<_> = std::fs::read_dir(env.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("passwords_") && name.ends_with(".txt"))
        .collect();
    assert_eq!(saved.len(), 1);

    let content = std::fs::read_to_string(env.file(&saved[0])).unwrap();
    assert!(content.starts_with("01. "));
    assert_eq!(content.lines().count(), 2);
}

#[test]
fn json_mode_generates_from_stdin() {
    let env = TestEnv::new();
    let out = env
        .cmd()
        .args(["--json", "generate"])
        .write_stdin(r#"{"length": 20, "count": 3, "classes": ["digit"], "avoid_ambiguous": true}"#)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let response: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(response["success"], true);
    assert_eq!(response["pool_size"], 8);
    let passwords = response["passwords"].as_array().unwrap();
    assert_eq!(passwords.len(), 3);
    for item in passwords {
        let pw = item["password"].as_str().unwrap();
        assert_eq!(pw.len(), 20);
        assert!(pw.chars().all(|c| "23456789".contains(c)));
    }
}

#[test]
fn json_mode_reports_errors() {
    let env = TestEnv::new();
    env.cmd()
        .args(["--json", "generate"])
        .write_stdin(r#"{"classes": []}"#)
        .assert()
        .failure()
        .stdout(contains("\"success\":false"))
        .stdout(contains("No character class selected"));
}

#[test]
fn batches_do_not_repeat() {
    let env = TestEnv::new();
    let run = || {
        let out = env
            .cmd()
            .args(["generate", "--count", "20", "--workers", "4"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        listed_passwords(&out)
    };
    let first = run();
    let second = run();
    assert_eq!(first.len(), 20);
    assert!(first.iter().all(|pw| !second.contains(pw)));
}

#[test]
fn rejects_unknown_class_name() {
    let env = TestEnv::new();
    env.cmd()
        .args(["generate", "--classes", "lower,emoji"])
        .assert()
        .failure()
        .stderr(contains("unknown character class").or(contains("invalid value")));
}

#[test]
fn invalid_settings_are_logged_and_skipped() {
    let env = TestEnv::new();
    env.cmd()
        .env("STRENGTH_WEAK_BITS", "abc")
        .env("WEB_PORT", "notaport")
        .args(["estimate", "--length", "16", "--pool-size", "26"])
        .assert()
        .success()
        .stdout(contains("Strong"));

    let log = std::fs::read_to_string(env.log_file()).unwrap();
    assert!(log.contains("Ignoring invalid value 'abc' for STRENGTH_WEAK_BITS"));
    assert!(log.contains("Ignoring invalid value 'notaport' for WEB_PORT"));
}

#[test]
fn default_count_comes_from_environment() {
    let env = TestEnv::new();
    let out = env
        .cmd()
        .env("DEFAULT_PASSWORD_COUNT", "3")
        .args(["generate"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(listed_passwords(&out).len(), 3);
}
