//! Integration tests for the searchkit binary.
//!
//! Spawns the binary on layout files written to a temp directory and checks
//! the JSON report printed to stdout.

use std::path::PathBuf;
use std::process::{Command, Output};

const LAYOUT: &str = "\
%%%%%%
%S..M%
%.%%.%
%M...%
%%%%%%";

const WALLED_OFF: &str = "\
%%%%%
%S%M%
%%%%%";

/// Writes `contents` to a file unique to this test and returns its path.
fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("searchkit-{}-{}", std::process::id(), name));
    std::fs::write(&path, contents).unwrap();
    path
}

fn run(args: &[&str]) -> Output {
    let exe = env!("CARGO_BIN_EXE_searchkit");
    Command::new(exe)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to start searchkit")
}

fn report(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn solves_layout_with_default_config() {
    let layout = write_temp("default.lay", LAYOUT);
    let json = report(&run(&[layout.to_str().unwrap()]));

    assert_eq!(json["algorithm"], "astar");
    assert_eq!(json["cost"], 7.0);
    assert_eq!(json["actions"].as_array().unwrap().len(), 7);
    assert!(json["expanded"].as_u64().unwrap() > 0);
}

#[test]
fn flags_select_algorithm_and_heuristic() {
    let layout = write_temp("flags.lay", LAYOUT);
    for algorithm in ["bfs", "ucs", "astar"] {
        let json = report(&run(&[
            layout.to_str().unwrap(),
            "--algorithm",
            algorithm,
            "--heuristic",
            "single",
        ]));
        assert_eq!(json["algorithm"], algorithm);
        assert_eq!(json["cost"], 7.0);
    }
}

#[test]
fn flags_override_config_file() {
    let layout = write_temp("override.lay", LAYOUT);
    let config = write_temp("override.json", r#"{"algorithm": "bfs", "heuristic": "gen"}"#);

    let from_file = report(&run(&[
        layout.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]));
    assert_eq!(from_file["algorithm"], "bfs");

    let overridden = report(&run(&[
        layout.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--algorithm",
        "ucs",
    ]));
    assert_eq!(overridden["algorithm"], "ucs");
}

#[test]
fn configured_step_costs_change_the_plan() {
    let layout = write_temp("costs.lay", LAYOUT);
    let config = write_temp(
        "costs.json",
        r#"{"heuristic": "better", "costs": {"n": 4.0, "s": 1.0, "e": 9.0, "w": 1.0}}"#,
    );

    let unit = report(&run(&[layout.to_str().unwrap(), "--heuristic", "better"]));
    assert_eq!(unit["cost"], 7.0);

    let from_file = report(&run(&[
        layout.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]));
    assert_eq!(from_file["cost"], 32.0);

    let from_flag = report(&run(&[
        layout.to_str().unwrap(),
        "--heuristic",
        "better",
        "--costs",
        "4,1,9,1",
    ]));
    assert_eq!(from_flag["cost"], 32.0);
}

#[test]
fn mistyped_config_key_is_an_error() {
    let layout = write_temp("typo.lay", LAYOUT);
    let config = write_temp("typo.json", r#"{"algoritm": "bfs"}"#);
    let output = run(&[layout.to_str().unwrap(), "--config", config.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn unsolvable_layout_reports_null_actions() {
    let layout = write_temp("walled.lay", WALLED_OFF);
    let json = report(&run(&[layout.to_str().unwrap(), "--algorithm", "bfs"]));
    assert!(json["actions"].is_null());
    assert!(json["cost"].is_null());
}

#[test]
fn unknown_flag_exits_with_usage() {
    let output = run(&["--frobnicate"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}

#[test]
fn malformed_layout_is_an_error() {
    let layout = write_temp("bad.lay", "%%%\n%.%\n%%%");
    let output = run(&[layout.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("start"));
}

#[test]
fn logs_go_to_stderr_only() {
    let layout = write_temp("logs.lay", LAYOUT);
    let output = run(&[layout.to_str().unwrap(), "--log", "debug"]);
    let json = report(&output);
    assert_eq!(json["cost"], 7.0);
    assert!(!output.stderr.is_empty());
}
