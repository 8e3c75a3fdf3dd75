//! Integration tests for hash-forge

use assert_cmd::Command;
use hash_forge::{
    config, Alphabet, DigestFn, HashForgeError, MatchMode, Md5Digest, RandomHashSearcher,
    SearchConfig, SearchReport,
};
use predicates::prelude::*;

const ENV_VARS: &[&str] = &[
    config::ENV_PATTERN,
    config::ENV_LENGTH,
    config::ENV_ALPHABET,
    config::ENV_MATCH_MODE,
    config::ENV_LIMIT_MODE,
    config::ENV_THREADS,
    config::ENV_BATCH_SIZE,
    config::ENV_PROGRESS_INTERVAL,
    config::ENV_SEED,
    config::ENV_REPORT,
];

/// Binary with a clean HASH_FORGE_* environment
fn cli() -> Command {
    let mut cmd = Command::cargo_bin("hash-forge").unwrap();
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.env("RUST_LOG", "off");
    cmd
}

#[test]
fn test_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("USAGE:"));
}

#[test]
fn test_limit_one_produces_no_output() {
    cli()
        .arg("1")
        .env(config::ENV_LENGTH, "10")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_default_bound_is_100() {
    let dir = tempfile::tempdir().unwrap();
    let report_path = dir.path().join("report.json");

    cli()
        .env(config::ENV_REPORT, &report_path)
        .env(config::ENV_SEED, "1")
        .assert()
        .success();

    let report = SearchReport::load(&report_path).unwrap();
    assert_eq!(report.config.iteration_limit, 100);
    assert_eq!(report.iterations, 99);
    assert_eq!(report.seed, Some(1));
    assert!(!report.cancelled);
}

#[test]
fn test_unparsable_bound_runs_zero_iterations() {
    let dir = tempfile::tempdir().unwrap();
    let report_path = dir.path().join("report.json");

    cli()
        .arg("lots")
        .env(config::ENV_REPORT, &report_path)
        .assert()
        .success()
        .stdout("");

    let report = SearchReport::load(&report_path).unwrap();
    assert_eq!(report.config.iteration_limit, 0);
    assert_eq!(report.iterations, 0);
}

#[test]
fn test_empty_pattern_fails() {
    cli()
        .env(config::ENV_PATTERN, "")
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("pattern"));
}

#[test]
fn test_zero_length_fails() {
    cli()
        .env(config::ENV_LENGTH, "0")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("candidate length"));
}

#[test]
fn test_bad_env_value_fails() {
    cli()
        .env(config::ENV_MATCH_MODE, "base64")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(config::ENV_MATCH_MODE));
}

#[test]
fn test_progress_lines() {
    // 'z' never appears in hex output, so only progress lines are printed
    cli()
        .arg("31")
        .env(config::ENV_PATTERN, "z")
        .env(config::ENV_MATCH_MODE, "hex")
        .env(config::ENV_PROGRESS_INTERVAL, "10")
        .assert()
        .success()
        .stdout("At 10\nAt 20\nAt 30\n");
}

#[test]
fn test_parallel_progress_lines() {
    let output = cli()
        .arg("1001")
        .env(config::ENV_PATTERN, "z")
        .env(config::ENV_MATCH_MODE, "hex")
        .env(config::ENV_PROGRESS_INTERVAL, "100")
        .env(config::ENV_THREADS, "4")
        .env(config::ENV_BATCH_SIZE, "16")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let mut lines: Vec<&str> = stdout.lines().collect();
    lines.sort_by_key(|l| l[3..].parse::<u64>().unwrap());
    let expected: Vec<String> = (1..=10).map(|k| format!("At {}", k * 100)).collect();
    assert_eq!(lines, expected);
}

#[test]
fn test_hex_matches_printed() {
    let output = cli()
        .arg("60")
        .env(config::ENV_PATTERN, "0")
        .env(config::ENV_MATCH_MODE, "hex")
        .env(config::ENV_SEED, "2024")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.lines().count() > 0);
    for line in stdout.lines() {
        let (candidate, digest) = line.split_once(" --> ").unwrap();
        assert_eq!(candidate.len(), 10);
        assert_eq!(digest.len(), 32);
        assert!(digest.contains('0'));
    }
}

#[test]
fn test_library_search_matches_md5() {
    let config = SearchConfig::default()
        .with_pattern("F")
        .with_candidate_length(5)
        .with_alphabet(Alphabet::Legacy)
        .with_match_mode(MatchMode::Hex)
        .with_iteration_limit(300)
        .with_seed(8);
    let searcher = RandomHashSearcher::md5(config).unwrap();
    let mut out = Vec::new();
    let summary = searcher.search(&mut out).unwrap();

    assert_eq!(summary.iterations, 299);
    assert!(!summary.matches.is_empty());
    for found in &summary.matches {
        let recomputed = Md5Digest.digest(found.candidate.as_bytes()).unwrap();
        assert_eq!(recomputed, found.digest);
        assert!(found.digest.to_hex().contains('f'));
        assert!(!found.candidate.contains('i'));
    }
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), summary.matches.len());
}

#[test]
fn test_error_handling() {
    let error = HashForgeError::invalid_argument("pattern", "must not be empty");
    assert!(error.to_string().contains("must not be empty"));

    let error = HashForgeError::config("config error");
    assert!(error.to_string().contains("config error"));

    let error = HashForgeError::hash_failure("md5", "boom");
    assert!(error.user_message().contains("md5"));
}

#[test]
fn test_library_initialization() {
    let result = hash_forge::init();
    assert!(result.is_ok());
}
