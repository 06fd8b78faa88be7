//! Integration tests for the teller CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Create a temp directory with two valid stories.
fn test_stories() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("house.yaml"),
        r#"title: The house that killed Sam
start:
  title: The House
  description: You are in a house. A familiar house, but it is dark.
  options:
    - text: Turn on the light
      page: death-by-light
    - text: Don't turn on the light
      page: death-by-darkness
    - text: Offer food
      page: offer-food
death-by-light:
  description: You turn on the light, and see the mighty Nuala.
  ending: death
death-by-darkness:
  description: You leave the light off; better safe than sorry.
  ending: death
offer-food:
  description: The licking turns to crunching, before fading away.
  ending: won
"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("ferry.json"),
        r#"{
  "title": "The Night Ferry",
  "start": {
    "description": "The last ferry idles at the pier.",
    "options": [
      {"text": "Pay the fare", "page": "deck"},
      {"text": "Walk away", "page": "pier"}
    ]
  },
  "deck": {"description": "Fog swallows the shore.", "ending": "won"},
  "pier": {
    "description": "The ferry leaves without you.",
    "options": [{"text": "Wait", "page": "start"}]
  }
}"#,
    )
    .unwrap();
    dir
}

fn teller() -> Command {
    Command::cargo_bin("teller").unwrap()
}

fn dir_arg(dir: &TempDir) -> &str {
    dir.path().to_str().unwrap()
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_reports_loaded_stories() {
    let dir = test_stories();
    teller()
        .args(["check", "-d", dir_arg(&dir)])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("All checks passed: 2 stories")
                .and(predicate::str::contains("The house that killed Sam (4 pages, 3 endings)"))
                .and(predicate::str::contains("The Night Ferry (3 pages, 1 endings)")),
        );
}

#[test]
fn bundled_stories_pass_check() {
    let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/../../stories");
    teller()
        .args(["check", "-d", dir])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("All checks passed: 2 stories")
                .and(predicate::str::contains("The Night Ferry (5 pages, 2 endings)")),
        );
}

#[test]
fn check_fails_on_dangling_option() {
    let dir = test_stories();
    fs::write(
        dir.path().join("broken.yaml"),
        "title: Broken\nstart:\n  description: A door.\n  options:\n    - text: Open\n      page: hallway\n",
    )
    .unwrap();

    teller()
        .args(["check", "-d", dir_arg(&dir)])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("Broken").and(predicate::str::contains("unknown page \"hallway\"")),
        );
}

#[test]
fn check_fails_on_empty_directory() {
    let dir = TempDir::new().unwrap();
    teller()
        .args(["check", "-d", dir_arg(&dir)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no stories found"));
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

#[test]
fn list_shows_table() {
    let dir = test_stories();
    teller()
        .args(["list", "-d", dir_arg(&dir)])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Title")
                .and(predicate::str::contains("The Night Ferry"))
                .and(predicate::str::contains("death, won"))
                .and(predicate::str::contains("2 stories")),
        );
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_story_to_death() {
    let dir = test_stories();
    teller()
        .args(["play", "-d", dir_arg(&dir)])
        .write_stdin("/start\nThe house that killed Sam\nTurn on the light\nDone\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Hi! My name is the story teller.")
                .and(predicate::str::contains("**The House**"))
                .and(predicate::str::contains("Offer food"))
                .and(predicate::str::contains("see the mighty Nuala"))
                .and(predicate::str::contains("Better luck next time, I hope!"))
                .and(predicate::str::contains("Until next time!")),
        );
}

#[test]
fn play_rejects_unknown_story_and_invalid_choice() {
    let dir = test_stories();
    teller()
        .args(["play", "-d", dir_arg(&dir)])
        .write_stdin("The Moon\nThe Night Ferry\npay the fare\nPay the fare\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("I don't know a story called \"The Moon\".")
                .and(predicate::str::contains("That is not one of the options."))
                .and(predicate::str::contains("Fog swallows the shore."))
                .and(predicate::str::contains("Well done! Until next time!")),
        );
}

#[test]
fn play_separate_chats() {
    let dir = test_stories();
    teller()
        .args(["play", "-d", dir_arg(&dir)])
        .write_stdin("The Night Ferry\n@2 The house that killed Sam\nWalk away\n@2 Offer food\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("chat 2")
                .and(predicate::str::contains("The ferry leaves without you."))
                .and(predicate::str::contains("The licking turns to crunching")),
        );
}

#[test]
fn play_persists_sessions() {
    let dir = test_stories();
    let state = TempDir::new().unwrap();
    let sessions = state.path().join("sessions.json");
    let sessions_arg = sessions.to_str().unwrap();

    teller()
        .args(["play", "-d", dir_arg(&dir), "--sessions", sessions_arg])
        .write_stdin("The Night Ferry\nWalk away\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved 1 sessions"));
    assert!(sessions.exists());

    // The second run picks up on the pier.
    teller()
        .args(["play", "-d", dir_arg(&dir), "--sessions", sessions_arg])
        .write_stdin("Wait\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("The last ferry idles at the pier."));
}

#[test]
fn play_with_config_overrides() {
    let dir = test_stories();
    let state = TempDir::new().unwrap();
    let config = state.path().join("teller.yaml");
    fs::write(
        &config,
        "reset_keyword: Stop\nfarewell: Goodbye, reader.\nstory_chosen: 'You have chosen {story}.'\n",
    )
    .unwrap();

    teller()
        .args([
            "play",
            "-d",
            dir_arg(&dir),
            "--config",
            config.to_str().unwrap(),
        ])
        .write_stdin("The Night Ferry\nStop\nDone\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("You have chosen The Night Ferry.")
                .and(predicate::str::contains("Goodbye, reader."))
                .and(predicate::str::contains("I don't know a story called \"Done\".")),
        );
}
