//! End-to-end tests driving the `fz` binary against a fixture directory.
//!
//! Covers the replay loop: read the simulated date, move it, and check that
//! every view is recomputed for the new date.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const GAMES: &str = r#"[
    {"id": 1, "team_a": "Saudi Arabia", "team_b": "Japan", "date": "2034-06-12",
     "time": "18:00", "stadium_id": 1, "stage": "group", "group": "A",
     "result": {"score_a": 2, "score_b": 0}, "winner": "Saudi Arabia"},
    {"id": 2, "team_a": "Peru", "team_b": "Mexico", "date": "2034-06-15",
     "time": "21:00", "stadium_id": 1, "stage": "group", "group": "A",
     "result": {"score_a": 1, "score_b": 1}, "winner": null},
    {"id": 3, "team_a": "Saudi Arabia", "team_b": "Mexico", "date": "2034-06-30",
     "time": "21:00", "stadium_id": 1, "stage": "round_of_16",
     "result": {"score_a": 0, "score_b": 1}, "winner": "Mexico"},
    {"id": 4, "team_a": "Brazil", "stage": "group", "group": "B", "date": "2034-06-14"}
]"#;

const FANS: &str = r#"[
    {"id": 1, "name": "Layla", "nationality": "Saudi", "team_supported": "Saudi Arabia",
     "attending_games": [1, 3],
     "hotel_stays": [
        {"hotel_id": 1, "check_in": "2034-06-10", "check_out": "2034-06-14"},
        {"hotel_id": 2, "check_in": "2034-06-14", "check_out": "2034-07-01"}
     ],
     "preferences": {"cuisine": ["Arabic", "Italian"]}}
]"#;

const HOTELS: &str = r#"[
    {"id": 1, "name": "Desert Rose", "city": "Riyadh"},
    {"id": 2, "name": "Red Sea Inn", "city": "Jeddah"}
]"#;

const STADIUMS: &str = r#"[{"id": 1, "name": "King Fahd Stadium", "city": "Riyadh"}]"#;

fn fz_binary() -> String {
    env!("CARGO_BIN_EXE_fz").to_string()
}

/// Writes a full fixture set with the simulated date at 2034-06-13.
fn fixture_dir() -> TempDir {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("data");
    std::fs::create_dir_all(&data).unwrap();
    std::fs::write(data.join("games.json"), GAMES).unwrap();
    std::fs::write(data.join("fans.json"), FANS).unwrap();
    std::fs::write(data.join("hotels.json"), HOTELS).unwrap();
    std::fs::write(data.join("stadiums.json"), STADIUMS).unwrap();
    std::fs::write(data.join("date.json"), r#"{"date": "2034-06-13"}"#).unwrap();
    temp
}

fn fz(home: &Path, args: &[&str]) -> Output {
    Command::new(fz_binary())
        .env("HOME", home)
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("FZ_API_URL")
        .env_remove("FZ_FAN_ID")
        .env("FZ_DATA_DIR", home.join("data"))
        .args(args)
        .output()
        .expect("failed to run fz")
}

fn stdout_of(home: &Path, args: &[&str]) -> String {
    let output = fz(home, args);
    assert!(
        output.status.success(),
        "fz {args:?} should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn date_round_trip_through_fixture_store() {
    let temp = fixture_dir();

    assert_eq!(stdout_of(temp.path(), &["date"]).trim(), "2034-06-13");

    let output = stdout_of(temp.path(), &["date", "set", "+2"]);
    assert!(output.contains("Simulated date: 2034-06-13 -> 2034-06-15"));
    assert!(output.contains("Peru 1 - 1 Mexico"));

    assert_eq!(stdout_of(temp.path(), &["date"]).trim(), "2034-06-15");
    let stored = std::fs::read_to_string(temp.path().join("data/date.json")).unwrap();
    assert!(stored.contains("2034-06-15"));
}

#[test]
fn invalid_date_is_rejected_without_writing() {
    let temp = fixture_dir();

    let output = fz(temp.path(), &["date", "set", "2034-02-30"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid date"), "stderr: {stderr}");

    assert_eq!(stdout_of(temp.path(), &["date"]).trim(), "2034-06-13");
}

#[test]
fn views_follow_the_simulated_date() {
    let temp = fixture_dir();

    let before: serde_json::Value =
        serde_json::from_str(&stdout_of(temp.path(), &["matches", "--json"])).unwrap();
    let knockout = before
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["id"] == 3)
        .unwrap();
    assert_eq!(knockout["team_a"], "TBD");
    assert_eq!(knockout["status"], "upcoming");
    assert!(knockout["result"].is_null());

    stdout_of(temp.path(), &["date", "set", "2034-06-30"]);

    let after: serde_json::Value =
        serde_json::from_str(&stdout_of(temp.path(), &["matches", "--json"])).unwrap();
    let knockout = after
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["id"] == 3)
        .unwrap();
    assert_eq!(knockout["team_a"], "Saudi Arabia");
    assert_eq!(knockout["status"], "live");
    assert_eq!(knockout["winner"], "Mexico");

    let bracket = stdout_of(temp.path(), &["bracket"]);
    assert!(bracket.contains("Saudi Arabia 0 - 1 Mexico  (winner: Mexico)"));
}

#[test]
fn standings_and_status_report_skipped_records() {
    let temp = fixture_dir();

    let status = stdout_of(temp.path(), &["status"]);
    assert!(status.contains("Source: local fixtures"));
    assert!(status.contains("Simulated date: 2034-06-13"));
    assert!(status.contains("Skipped records: 1"));

    let standings = stdout_of(temp.path(), &["standings", "--group", "A"]);
    assert!(standings.contains("Group A (1 decisive, 0 drawn)"));
    assert!(standings.contains("Saudi Arabia"));
    assert!(!standings.contains("Group B"));
}

#[test]
fn fan_views_use_the_fan_flag() {
    let temp = fixture_dir();

    let stays = stdout_of(temp.path(), &["stays", "--fan", "1"]);
    assert!(stays.contains("Currently staying at Desert Rose, checking out in 1 days."));

    let briefing = stdout_of(temp.path(), &["briefing", "--fan", "1"]);
    assert!(briefing.contains("Fan: Layla (Saudi), supporting Saudi Arabia"));
    assert!(briefing.contains("Past match on 2034-06-12: Saudi Arabia vs Japan at King Fahd Stadium"));
    assert!(briefing.contains("Preferences: cuisine: Arabic, Italian."));

    let missing = fz(temp.path(), &["stays"]);
    assert!(!missing.status.success());
}

#[test]
fn chat_needs_the_data_service() {
    let temp = fixture_dir();

    let output = fz(temp.path(), &["chat", "hello", "--fan", "1"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("needs the data service"));
}
