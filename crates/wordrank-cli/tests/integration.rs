//! Integration test: count real files, rank, render JSONL, and drive the binary.

use std::fs;
use std::process::Command;
use wordrank_core::{RankConfig, RankError, TieBreak};
use wordrank_count::{Engine, rank_top_words};
use wordrank_render::{JsonlWriter, Totals};

const SAMPLE: &str = "The quick brown fox jumps over the lazy dog.\n\
                      The dog sleeps; the fox doesn't.\n\
                      Co-operate, co-ordinate, COOPERATE!\n";

fn create_input(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input.txt");
    fs::write(&path, content).unwrap();
    (dir, path)
}

fn wordrank() -> Command {
    Command::new(env!("CARGO_BIN_EXE_wordrank"))
}

#[test]
fn rank_file() {
    let (_dir, path) = create_input(SAMPLE);
    let result = Engine::default().rank_path(&path, 3).unwrap();
    // the: 4, co: 2, dog: 2, fox: 2 -> ties resolved alphabetically
    assert_eq!(result.words(), ["the", "co", "dog"]);
    assert!(result.is_complete());
}

#[test]
fn file_and_reader_agree() {
    let (_dir, path) = create_input(SAMPLE);
    let from_file = Engine::default().rank_path(&path, 10).unwrap();
    let from_reader = rank_top_words(fs::File::open(&path).unwrap(), 10).unwrap();
    assert_eq!(from_file, from_reader);
}

#[test]
fn large_file_counts_are_conserved() {
    let line = "alpha beta beta gamma gamma gamma\n";
    let (_dir, path) = create_input(&line.repeat(5_000));
    let tally = Engine::default().count_path(&path).unwrap();
    let summary = tally.summary();
    assert_eq!(summary.tokens, 30_000);
    assert_eq!(summary.distinct_words, 3);
    assert_eq!(tally.rank(2).words(), ["gamma", "beta"]);
}

#[test]
fn config_file_drives_engine() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("wordrank.json");
    fs::write(
        &config_path,
        r#"{"tie_break": "reverse_lexicographic", "initial_capacity": 8}"#,
    )
    .unwrap();
    let config = RankConfig::load(&config_path).unwrap();
    let result = Engine::new(config).rank_str("a a b b c c", 2).unwrap();
    assert_eq!(result.words(), ["c", "b"]);
}

#[test]
fn rank_to_jsonl() {
    let (_dir, path) = create_input(SAMPLE);
    let tally = Engine::default().count_path(&path).unwrap();
    let summary = tally.summary();
    let entries = tally.rank_entries(2).unwrap();
    let totals = Totals {
        distinct_words: summary.distinct_words,
        tokens: summary.tokens,
        complete: summary.complete,
    };

    let output = JsonlWriter::new(2, TieBreak::Lexicographic)
        .show_counts(true)
        .render(&entries, &totals)
        .unwrap();

    let lines: Vec<serde_json::Value> = output
        .trim()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[1]["Word"], "the");
    assert_eq!(lines[1]["Count"], 4);
    assert_eq!(lines[3]["Tokens"], summary.tokens);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Engine::default()
        .rank_path(&dir.path().join("absent.txt"), 1)
        .unwrap_err();
    assert!(matches!(err, RankError::Io(_)));
}

// --- binary ---

#[test]
fn binary_top_plain() {
    let (_dir, path) = create_input(SAMPLE);
    let output = wordrank()
        .args(["top", "-n", "2"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "the\nco\n");
}

#[test]
fn binary_top_counts() {
    let (_dir, path) = create_input("b a b");
    let output = wordrank()
        .args(["top", "--counts"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "b\t2\na\t1\n");
}

#[test]
fn binary_rejects_negative_n() {
    let (_dir, path) = create_input(SAMPLE);
    let output = wordrank()
        .args(["top", "-n", "-1"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("invalid argument"), "stderr: {stderr}");
}

#[test]
fn binary_stats() {
    let (_dir, path) = create_input("one two two");
    let output = wordrank().arg("stats").arg(&path).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Tokens: 3"));
    assert!(stdout.contains("Distinct words: 2"));
}
