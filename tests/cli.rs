use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn wm() -> Command {
    let mut cmd = Command::cargo_bin("wm").expect("Failed to find wm binary");
    cmd.env_remove("COLUMNS").env_remove("WAYMARK_WIDTH");
    cmd
}

fn parse_jsonl(stdout: &[u8]) -> Vec<Value> {
    let s = String::from_utf8_lossy(stdout);
    s.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str::<Value>(l).expect("valid jsonl line"))
        .collect()
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("waymarks.jsonl")
}

#[test]
fn find_filters_by_type_and_mention() {
    let assert = wm()
        .arg("--records")
        .arg(fixture())
        .args(["--format", "jsonl", "find", "todo", "@agent"])
        .assert()
        .success();

    let items = parse_jsonl(&assert.get_output().stdout);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["file"], "src/auth.rs");
    assert_eq!(items[0]["start_line"], 12);
}

#[test]
fn find_resolves_plural_types() {
    let assert = wm()
        .arg("--records")
        .arg(fixture())
        .args(["--format", "jsonl", "find", "todos"])
        .assert()
        .success();

    let lines: Vec<u64> = parse_jsonl(&assert.get_output().stdout)
        .iter()
        .map(|v| v["start_line"].as_u64().unwrap())
        .collect();
    assert_eq!(lines, vec![12, 58]);
}

#[test]
fn find_applies_exclusions_and_properties() {
    let assert = wm()
        .arg("--records")
        .arg(fixture())
        .args(["--format", "jsonl", "find", "owner:@alice", "!@bob"])
        .assert()
        .success();

    let items = parse_jsonl(&assert.get_output().stdout);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["type"], "note");

    let assert = wm()
        .arg("--records")
        .arg(fixture())
        .args(["--format", "jsonl", "find", "!fix", "!todo"])
        .assert()
        .success();
    let types: Vec<String> = parse_jsonl(&assert.get_output().stdout)
        .iter()
        .map(|v| v["type"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(types, vec!["note", "tldr", "question"]);
}

#[test]
fn find_accepts_global_flags_after_query() {
    let assert = wm()
        .arg("--records")
        .arg(fixture())
        .args(["find", "todo", "!@bob", "--format", "jsonl", "--compact"])
        .assert()
        .success();

    let items = parse_jsonl(&assert.get_output().stdout);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["start_line"], 12);

    wm().arg("--records")
        .arg(fixture())
        .args(["find", "tldr", "--compact", "--width", "200"])
        .assert()
        .success()
        .stdout("src/cache.rs:7  tldr ::: LRU cache for rendered pages\n");
}

#[test]
fn find_matches_mentions_inside_property_values() {
    let assert = wm()
        .arg("--records")
        .arg(fixture())
        .args(["--format", "jsonl", "find", "@alice"])
        .assert()
        .success();

    let items = parse_jsonl(&assert.get_output().stdout);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["type"], "note");
    assert_eq!(items[0]["start_line"], 105);
}

#[test]
fn find_reads_records_from_stdin() {
    let record = r#"{"file":"lib.rs","start_line":3,"end_line":3,"type":"fixme","content":"off by one"}"#;

    wm().args(["--width", "80", "find", "fix"])
        .write_stdin(format!("{}\n", record))
        .assert()
        .success()
        .stdout("lib.rs\n 3:  fixme ::: off by one\n");
}

#[test]
fn find_with_no_matches_prints_nothing() {
    wm().arg("--records")
        .arg(fixture())
        .args(["find", "@nobody"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn find_reports_invalid_records() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("bad.jsonl");
    write_file(
        &path,
        "{\"file\":\"a.rs\",\"start_line\":1,\"end_line\":1,\"type\":\"todo\",\"content\":\"x\"}\n{oops\n",
    );

    wm().arg("--records")
        .arg(&path)
        .args(["find", "todo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid record on line 2"));
}

#[test]
fn find_reports_missing_records_file() {
    wm().args(["--records", "does/not/exist.jsonl", "find"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open records file"));
}

#[test]
fn query_prints_compiled_filter() {
    let assert = wm()
        .args([
            "query",
            "todo",
            "@agent",
            "#perf:hotpath",
            "owner:@alice",
            "from:",
            "!fix",
            "big refactor",
        ])
        .assert()
        .success();

    let spec: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(spec["types"], serde_json::json!(["todo"]));
    assert_eq!(spec["mentions"], serde_json::json!(["@agent"]));
    assert_eq!(spec["tags"], serde_json::json!(["#perf:hotpath"]));
    assert_eq!(spec["properties"]["owner"], "@alice");
    assert_eq!(spec["properties"]["from"], true);
    assert_eq!(spec["exclusions"]["types"], serde_json::json!(["fix"]));
    assert_eq!(spec["text_terms"], serde_json::json!(["big", "refactor"]));
}

#[test]
fn query_keeps_flags_out_of_terms() {
    let assert = wm().args(["query", "todo", "--pretty"]).assert().success();
    let spec: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(spec["types"], serde_json::json!(["todo"]));
    assert_eq!(spec["text_terms"], serde_json::json!([]));
}

#[test]
fn query_phrases_need_embedded_quotes() {
    let assert = wm().args(["query", "race condition"]).assert().success();
    let spec: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(spec["text_terms"], serde_json::json!(["race", "condition"]));

    let assert = wm()
        .args(["query", "\"race condition\""])
        .assert()
        .success();
    let spec: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(spec["text_terms"], serde_json::json!(["race condition"]));
}

#[test]
fn query_with_no_terms_is_empty() {
    let assert = wm().arg("query").assert().success();
    let spec: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(spec["types"], serde_json::json!([]));
    assert_eq!(spec["properties"], serde_json::json!({}));
    assert_eq!(spec["exclusions"]["mentions"], serde_json::json!([]));
}

#[test]
fn tokens_reconstruct_content() {
    let content = "fix bug #perf, owner:@alice see:#auth/core";
    let assert = wm().args(["tokens", content]).assert().success();

    let tokens = parse_jsonl(&assert.get_output().stdout);
    let rebuilt: String = tokens
        .iter()
        .map(|t| t["value"].as_str().unwrap())
        .collect();
    assert_eq!(rebuilt, content);

    let kinds: Vec<&str> = tokens.iter().map(|t| t["kind"].as_str().unwrap()).collect();
    assert!(kinds.contains(&"tag"));
    assert!(kinds.contains(&"comma"));
    assert!(kinds.contains(&"property"));
}

#[test]
fn wrap_force_splits_oversized_token() {
    let content = "#verylongtagthatexceedsavailablewidthbutcannotbesplit";
    let assert = wm()
        .args(["--width", "30", "wrap", content, "--indent", "10"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines.len() > 1);
    assert_eq!(lines.concat(), content);
}

#[test]
fn wrap_honors_columns_env() {
    wm().env("COLUMNS", "12")
        .args(["wrap", "alpha beta gamma"])
        .assert()
        .success()
        .stdout("alpha beta\ngamma\n");
}

#[test]
fn zero_width_is_rejected() {
    wm().args(["--width", "0", "wrap", "x"]).assert().failure();
}
