use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn deck_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp deck");
    file.write_all(content.as_bytes()).expect("write temp deck");
    file
}

#[test]
fn prints_four_line_accumulator() {
    let output = Command::cargo_bin("prize-odds")
        .unwrap()
        .args(["--deck", "data.txt", "--seed", "7", "run", "--trials", "2000"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<u64> = stdout.lines().map(|l| l.trim().parse().unwrap()).collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0] <= 2000);
    assert_eq!(lines[1..], [0, 0, 0]);
}

#[test]
fn zero_trials_prints_zeros() {
    Command::cargo_bin("prize-odds")
        .unwrap()
        .args(["--deck", "data.txt", "run", "-n", "0"])
        .assert()
        .success()
        .stdout("0\n0\n0\n0\n");
}

#[test]
fn short_deck_exits_with_error() {
    let deck = deck_file("Pokémon: 2\n2 Lugia V SIT 138 basic\n");

    Command::cargo_bin("prize-odds")
        .unwrap()
        .arg("--deck")
        .arg(deck.path())
        .args(["run", "-n", "10"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("deck has 2 cards, expected 60"));
}

#[test]
fn missing_deck_exits_with_error() {
    Command::cargo_bin("prize-odds")
        .unwrap()
        .args(["--deck", "definitely-missing.txt", "run", "-n", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse deck file"));
}

#[test]
fn json_report_is_valid() {
    let output = Command::cargo_bin("prize-odds")
        .unwrap()
        .args(["--deck", "data.txt", "--seed", "3", "run", "-n", "500", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["trials"], 500);
    assert_eq!(report["seed"], 3);
    assert_eq!(report["accumulator"].as_array().unwrap().len(), 4);
}

#[test]
fn show_lists_every_card() {
    Command::cargo_bin("prize-odds")
        .unwrap()
        .args(["--deck", "data.txt", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("01 Archeops Pokemon"))
        .stdout(predicate::str::contains("60 Mist Energy Energy"))
        .stdout(predicate::str::contains("Lugia V Pokemon, Basic"));
}
