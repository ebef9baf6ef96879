//! E2E CLI tests covering:
//! - `scorerank rank` in json, text, and pretty modes
//! - `scorerank table`, `scorerank convergence`, `scorerank graph`
//! - Config file discovery and flag overrides
//! - Structured errors for bad input
//!
//! Each test runs the `scorerank` binary as a subprocess in an isolated temp
//! directory.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test Harness
// ---------------------------------------------------------------------------

/// Build a Command targeting the scorerank binary, rooted in `dir`.
fn sr_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("scorerank"));
    cmd.current_dir(dir);
    cmd.env("SCORERANK_LOG", "error");
    cmd.env_remove("FORMAT");
    cmd
}

/// Four teams, one round robin, no odds. Leeds win everything.
const MINI_LEAGUE: &str = "\
Div,Date,HomeTeam,AwayTeam,FTHG,FTAG,FTR
E0,16/08/14,Leeds,Derby,3,0,H
E0,17/08/14,Leeds,Hull,2,1,H
E0,23/08/14,Leeds,Stoke,4,1,H
E0,24/08/14,Derby,Hull,1,1,D
E0,30/08/14,Derby,Stoke,2,2,D
E0,31/08/14,Hull,Stoke,0,1,A
";

fn setup() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("E0.csv");
    fs::write(&path, MINI_LEAGUE).expect("write fixture");
    (dir, path)
}

fn run_json(dir: &Path, args: &[&str]) -> Value {
    let output = sr_cmd(dir)
        .args(args)
        .args(["--format", "json"])
        .output()
        .expect("command should not crash");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid JSON on stdout")
}

fn team_order(json: &Value) -> Vec<String> {
    json["ranking"]
        .as_array()
        .expect("ranking array")
        .iter()
        .map(|row| row["team"].as_str().expect("team").to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// rank
// ---------------------------------------------------------------------------

#[test]
fn rank_json_orders_teams_by_score() {
    let (dir, _) = setup();
    let json = run_json(dir.path(), &["rank", "E0.csv"]);

    assert_eq!(json["matches"], 6);
    assert_eq!(json["teams"], 4);
    assert_eq!(json["state"]["state"], "iterated");
    assert_eq!(json["state"]["iterations"], 5);
    assert_eq!(team_order(&json), ["Leeds", "Stoke", "Hull", "Derby"]);
    assert_eq!(json["ranking"][0]["position"], 1);
}

#[test]
fn rank_top_limits_rows() {
    let (dir, _) = setup();
    let json = run_json(dir.path(), &["rank", "E0.csv", "--top", "2"]);
    assert_eq!(team_order(&json), ["Leeds", "Stoke"]);
    assert_eq!(json["teams"], 4);
}

#[test]
fn rank_text_is_tab_separated() {
    let (dir, _) = setup();
    sr_cmd(dir.path())
        .args(["rank", "E0.csv", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("1\tLeeds\t"))
        .stdout(predicate::str::contains("4\tDerby\t"));
}

#[test]
fn rank_pretty_has_heading() {
    let (dir, _) = setup();
    sr_cmd(dir.path())
        .args(["rank", "E0.csv", "--format", "pretty"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ScoreRank"))
        .stdout(predicate::str::contains("Leeds"));
}

#[test]
fn rank_flags_override_defaults() {
    let (dir, _) = setup();
    let json = run_json(
        dir.path(),
        &["rank", "E0.csv", "--baseline", "normalized", "-n", "3", "--leak", "0.5"],
    );
    assert_eq!(json["config"]["baseline"], "normalized");
    assert_eq!(json["config"]["iterations"], 3);
    assert_eq!(json["state"]["iterations"], 3);
    // Normalized scores never exceed a total of one.
    assert!(json["total_score"].as_f64().unwrap() <= 1.0 + 1e-9);
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

#[test]
fn config_file_in_cwd_is_picked_up() {
    let (dir, _) = setup();
    fs::write(dir.path().join("scorerank.toml"), "[rank]\niterations = 7\n").unwrap();
    let json = run_json(dir.path(), &["rank", "E0.csv"]);
    assert_eq!(json["config"]["iterations"], 7);
    assert_eq!(json["config"]["baseline"], "constant");
}

#[test]
fn explicit_config_and_flags_layer() {
    let (dir, _) = setup();
    let cfg = dir.path().join("custom.toml");
    fs::write(&cfg, "[rank]\nbaseline = \"normalized\"\niterations = 7\n").unwrap();
    let json = run_json(
        dir.path(),
        &["--config", cfg.to_str().unwrap(), "rank", "E0.csv", "-n", "2"],
    );
    assert_eq!(json["config"]["baseline"], "normalized");
    assert_eq!(json["config"]["iterations"], 2);
}

#[test]
fn unparseable_config_fails() {
    let (dir, _) = setup();
    fs::write(dir.path().join("scorerank.toml"), "[rank\n").unwrap();
    sr_cmd(dir.path())
        .args(["rank", "E0.csv", "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse"));
}

// ---------------------------------------------------------------------------
// table / convergence / graph
// ---------------------------------------------------------------------------

#[test]
fn table_compares_points_with_scorerank() {
    let (dir, _) = setup();
    let json = run_json(dir.path(), &["table", "E0.csv"]);

    let table = json["table"].as_array().unwrap();
    assert_eq!(table[0]["team"], "Leeds");
    assert_eq!(table[0]["points"], 9);
    assert_eq!(table[1]["team"], "Stoke");
    assert_eq!(table[1]["points"], 4);

    // Derby out-point Hull but concede more to better teams.
    let rows = json["comparison"]["rows"].as_array().unwrap();
    let derby = rows.iter().find(|r| r["team"] == "Derby").unwrap();
    assert_eq!(derby["table_position"], 3);
    assert_eq!(derby["score_position"], 4);
    assert!(json["comparison"]["spearman"].as_f64().unwrap() > 0.5);
}

#[test]
fn convergence_reports_every_pass() {
    let (dir, _) = setup();
    let json = run_json(dir.path(), &["convergence", "E0.csv", "-n", "4"]);

    let passes = json["passes"].as_array().unwrap();
    assert_eq!(passes.len(), 4);
    assert_eq!(passes[3]["iteration"], 4);
    assert_eq!(passes[3]["sink_count"], 0);

    let teams = json["teams"].as_array().unwrap();
    assert_eq!(teams[0]["team"], "Leeds");
    assert_eq!(teams[0]["scores"].as_array().unwrap().len(), 5);
    assert!((teams[0]["scores"][0].as_f64().unwrap() - 1.0).abs() < 1e-12);
}

#[test]
fn graph_stats_and_edges() {
    let (dir, _) = setup();
    let json = run_json(dir.path(), &["graph", "E0.csv"]);

    assert_eq!(json["stats"]["vertex_count"], 4);
    assert_eq!(json["stats"]["edge_count"], 12);
    assert_eq!(json["stats"]["total_weight"], 18);
    assert_eq!(json["stats"]["sink_count"], 0);
    assert_eq!(json["stats"]["weakly_connected_component_count"], 1);

    // Stoke conceded four at Leeds: the heaviest vote.
    assert_eq!(json["edges"][0]["from"], "Stoke");
    assert_eq!(json["edges"][0]["to"], "Leeds");
    assert_eq!(json["edges"][0]["weight"], 4);
}

#[test]
fn graph_dot_renders_digraph() {
    let (dir, _) = setup();
    sr_cmd(dir.path())
        .args(["graph", "E0.csv", "--dot", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph"))
        .stdout(predicate::str::contains("\"Leeds\""));
}

// ---------------------------------------------------------------------------
// errors
// ---------------------------------------------------------------------------

#[test]
fn missing_file_is_a_load_error() {
    let (dir, _) = setup();
    let output = sr_cmd(dir.path())
        .args(["rank", "nope.csv", "--format", "json"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let json: Value = serde_json::from_slice(&output.stderr).expect("error JSON on stderr");
    assert_eq!(json["error"]["error_code"], "load_error");
    assert!(json["error"]["message"].as_str().unwrap().contains("nope.csv"));
    assert!(json["error"]["suggestion"].is_string());
}

#[test]
fn bad_date_names_the_line() {
    let (dir, _) = setup();
    fs::write(
        dir.path().join("bad.csv"),
        "Date,HomeTeam,AwayTeam,FTHG,FTAG\n16/08/14,Leeds,Hull,1,0\nsoon,Hull,Leeds,0,2\n",
    )
    .unwrap();
    sr_cmd(dir.path())
        .args(["rank", "bad.csv", "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[load_error]"))
        .stderr(predicate::str::contains("soon"));
}

#[test]
fn invalid_leak_reports_code() {
    let (dir, _) = setup();
    let output = sr_cmd(dir.path())
        .args(["rank", "E0.csv", "--leak", "1.5", "--format", "json"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let json: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(json["error"]["error_code"], "E1001");
}

#[test]
fn completions_emit_script() {
    let dir = TempDir::new().unwrap();
    sr_cmd(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("scorerank"));
}
