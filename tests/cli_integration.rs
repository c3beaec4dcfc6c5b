/// CLI integration tests for nutrilog.
///
/// Each test spawns the compiled binary via the `assert_cmd::cargo_bin_cmd!`
/// macro and sets `NUTRILOG_HOME` to a fresh `TempDir` so tests are fully
/// isolated from the developer's real `~/.nutrilog` data.
use assert_cmd::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

// ── helpers ──────────────────────────────────────────────────────────────────

fn cmd_in(dir: &TempDir) -> assert_cmd::Command {
    let mut c = cargo_bin_cmd!("nutrilog");
    c.env("NUTRILOG_HOME", dir.path());
    c.env_remove("NUTRILOG_LOG");
    c.env_remove("NUTRILOG_LOG_FORMAT");
    c
}

/// `init --skip --user alice`, so later commands have a default user.
fn init_dir(dir: &TempDir) {
    cmd_in(dir)
        .args(["init", "--skip", "--user", "alice"])
        .assert()
        .success();
}

fn parse_json(output: &assert_cmd::assert::Assert) -> Value {
    let bytes = output.get_output().stdout.clone();
    serde_json::from_slice(&bytes).expect("stdout is not valid JSON")
}

fn parse_stderr_json(output: &assert_cmd::assert::Assert) -> Value {
    let bytes = output.get_output().stderr.clone();
    serde_json::from_slice(&bytes).expect("stderr is not valid JSON")
}

fn set_profile(dir: &TempDir, extra: &[&str]) {
    let mut args = vec![
        "profile", "set", "--goal", "lose_weight", "--age", "30", "--gender", "male",
        "--height", "180", "--weight", "75", "--activity", "1.55",
    ];
    args.extend_from_slice(extra);
    cmd_in(dir).args(&args).assert().success();
}

// ── init ─────────────────────────────────────────────────────────────────────

#[test]
fn test_init_skip_creates_config_and_db() {
    let dir = TempDir::new().unwrap();
    cmd_in(&dir)
        .args(["init", "--skip", "--user", "alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config initialized"));

    assert!(dir.path().join("config.toml").exists());
    assert!(dir.path().join("data.db").exists());
    let config = fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(config.contains("default_user = \"alice\""));
}

#[test]
fn test_init_skip_is_idempotent() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    init_dir(&dir);
}

// ── log / show ───────────────────────────────────────────────────────────────

#[test]
fn test_log_then_merge_json() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);

    let first = cmd_in(&dir)
        .args(["--date", "2026-03-10", "log", "lunch", "salad", "--calories", "320"])
        .assert()
        .success();
    let json = parse_json(&first);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["command"], "log");
    assert_eq!(json["data"]["merged"], false);
    assert_eq!(json["data"]["entry"]["nutrients"]["NUTR_CONT1"], "320");

    let second = cmd_in(&dir)
        .args(["--date", "2026-03-10", "log", "lunch", "salad", "-q", "2"])
        .assert()
        .success();
    let json = parse_json(&second);
    assert_eq!(json["data"]["merged"], true);
    assert_eq!(json["data"]["entry"]["quantity"], 3);
}

#[test]
fn test_log_dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);

    let out = cmd_in(&dir)
        .args(["--date", "2026-03-10", "log", "dinner", "soup", "--dry-run"])
        .assert()
        .success();
    assert_eq!(parse_json(&out)["data"]["action"]["action"], "insert");

    let show = cmd_in(&dir).args(["show", "--raw"]).assert().success();
    assert_eq!(parse_json(&show)["data"]["entries"], serde_json::json!([]));
}

#[test]
fn test_show_grouped_has_canonical_slots() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    cmd_in(&dir)
        .args(["--date", "2026-03-10", "log", "brunch", "waffles"])
        .assert()
        .success();

    let out = cmd_in(&dir).arg("show").assert().success();
    let day = &parse_json(&out)["data"]["meals"]["2026-03-10"];
    assert_eq!(day["breakfast"], serde_json::json!([]));
    assert_eq!(day["brunch"][0]["description"], "waffles");
}

#[test]
fn test_log_batch() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    let batch = r#"[{"meal_type":"breakfast","description":"oats"},{"meal_type":"snack","description":"apple","quantity":2}]"#;

    let out = cmd_in(&dir)
        .args(["--date", "2026-03-10", "log", "--batch", batch])
        .assert()
        .success();
    assert_eq!(parse_json(&out)["data"]["entries"].as_array().unwrap().len(), 2);
}

#[test]
fn test_log_bad_nutrient_is_validation_error() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);

    let out = cmd_in(&dir)
        .args(["log", "lunch", "rice", "--nutrient", "NUTR_CONT1=lots"])
        .assert()
        .failure();
    let err = parse_stderr_json(&out);
    assert_eq!(err["status"], "error");
    assert_eq!(err["command"], "log");
    assert_eq!(err["error"]["code"], "validation_error");
}

#[test]
fn test_without_user_fails() {
    let dir = TempDir::new().unwrap();
    let out = cmd_in(&dir).args(["log", "lunch", "rice"]).assert().failure();
    assert_eq!(parse_stderr_json(&out)["error"]["code"], "validation_error");
}

// ── update / delete ──────────────────────────────────────────────────────────

#[test]
fn test_update_and_delete_by_id() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    let logged = cmd_in(&dir).args(["log", "lunch", "rice"]).assert().success();
    let id = parse_json(&logged)["data"]["entry"]["id"].as_i64().unwrap().to_string();

    let updated = cmd_in(&dir)
        .args(["update", &id, "--quantity", "4"])
        .assert()
        .success();
    assert_eq!(parse_json(&updated)["data"]["quantity"], 4);

    cmd_in(&dir).args(["delete", &id]).assert().success();
    let again = cmd_in(&dir).args(["delete", &id]).assert().failure();
    assert_eq!(parse_stderr_json(&again)["error"]["code"], "not_found");
}

// ── totals ───────────────────────────────────────────────────────────────────

#[test]
fn test_totals_and_week() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    cmd_in(&dir)
        .args(["--date", "2026-03-10", "log", "lunch", "rice", "--calories", "250.8", "-q", "2"])
        .assert()
        .success();
    cmd_in(&dir)
        .args(["--date", "2026-03-02", "log", "dinner", "pasta", "--calories", "700"])
        .assert()
        .success();

    let totals = cmd_in(&dir)
        .args(["--date", "2026-03-10", "totals"])
        .assert()
        .success();
    assert_eq!(parse_json(&totals)["data"]["calories"], 500);

    let week = cmd_in(&dir)
        .args(["--date", "2026-03-10", "week"])
        .assert()
        .success();
    let data = &parse_json(&week)["data"];
    assert_eq!(data["recent_total"], 500);
    assert_eq!(data["previous_total"], 700);
    assert_eq!(data["recent"].as_object().unwrap().len(), 7);
}

#[test]
fn test_calories_range_zero_filled() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);

    let out = cmd_in(&dir)
        .args(["calories", "--from", "2026-02-27", "--to", "2026-03-02"])
        .assert()
        .success();
    let series = parse_json(&out)["data"]["calories"].clone();
    assert_eq!(series.as_object().unwrap().len(), 4);
    assert_eq!(series["2026-02-28"], 0);
}

// ── profile / recommend ──────────────────────────────────────────────────────

#[test]
fn test_recommend_reference_profile() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    set_profile(&dir, &["--allergies", "peanut"]);
    cmd_in(&dir)
        .args(["catalog", "add", "Peanut toast", "--meal-type", "breakfast", "--diet", "medium-carb", "--allergen", "peanut"])
        .assert()
        .success();
    cmd_in(&dir)
        .args(["catalog", "add", "Oat bowl", "--meal-type", "breakfast", "--diet", "medium-carb"])
        .assert()
        .success();

    let out = cmd_in(&dir).arg("recommend").assert().success();
    let data = &parse_json(&out)["data"];
    assert_eq!(data["diet_category"], "medium-carb");
    assert_eq!(data["daily_calories"], 2269);
    assert_eq!(data["macros"]["carbohydrates"], 227);
    assert_eq!(data["macros"]["proteins"], 227);
    assert_eq!(data["macros"]["fats"], 50);
    assert_eq!(data["meals"]["breakfast"].as_array().unwrap().len(), 1);
    assert_eq!(data["meals"]["breakfast"][0]["name"], "Oat bowl");
    assert_eq!(data["meals"]["dinner"], "no suitable meals found");
}

#[test]
fn test_recommend_without_profile_is_not_found() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    let out = cmd_in(&dir).arg("recommend").assert().failure();
    assert_eq!(parse_stderr_json(&out)["error"]["code"], "not_found");
}

#[test]
fn test_profile_update_and_show_human() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    set_profile(&dir, &[]);

    cmd_in(&dir)
        .args(["profile", "update", "--weight", "73"])
        .assert()
        .success();
    cmd_in(&dir)
        .args(["--human", "profile", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("weight: 73 kg"));
}

#[test]
fn test_profile_rejects_bad_height() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    let out = cmd_in(&dir)
        .args([
            "profile", "set", "--goal", "maintain", "--age", "40", "--gender", "female",
            "--height", "0", "--weight", "60",
        ])
        .assert()
        .failure();
    assert_eq!(parse_stderr_json(&out)["error"]["code"], "validation_error");
}

// ── catalog / config ─────────────────────────────────────────────────────────

#[test]
fn test_catalog_import_and_list() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    let file = dir.path().join("meals.json");
    fs::write(
        &file,
        r#"[{"name":"Lentil soup","meal_type":"dinner","diet_types":["medium-carb"],"allergy_tags":["celery"]}]"#,
    )
    .unwrap();

    let out = cmd_in(&dir)
        .args(["catalog", "import", file.to_str().unwrap()])
        .assert()
        .success();
    assert_eq!(parse_json(&out)["data"]["imported"], 1);

    let list = cmd_in(&dir).args(["catalog", "list"]).assert().success();
    assert_eq!(parse_json(&list)["data"]["meals"][0]["name"], "Lentil soup");
}

#[test]
fn test_config_set_nutrient_code() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    cmd_in(&dir)
        .args(["config", "set", "nutrients.calories", "ENERC_KCAL"])
        .assert()
        .success();

    let out = cmd_in(&dir)
        .args(["log", "snack", "apple", "--calories", "80"])
        .assert()
        .success();
    assert_eq!(parse_json(&out)["data"]["entry"]["nutrients"]["ENERC_KCAL"], "80");
}

#[test]
fn test_config_set_unknown_key_fails() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    let out = cmd_in(&dir)
        .args(["config", "set", "colour", "blue"])
        .assert()
        .failure();
    assert_eq!(parse_stderr_json(&out)["error"]["code"], "general_error");
}

#[test]
fn test_completions_bash() {
    let dir = TempDir::new().unwrap();
    cmd_in(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nutrilog"));
}
