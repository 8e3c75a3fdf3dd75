//! Configuration loading from the environment and the command line

use std::path::PathBuf;
use std::str::FromStr;

use crate::config_error;
use crate::error::Result;
use crate::types::SearchConfig;

/// Iteration bound used when no argument is given
pub const DEFAULT_ITERATION_LIMIT: u64 = 100;

pub const ENV_PATTERN: &str = "HASH_FORGE_PATTERN";
pub const ENV_LENGTH: &str = "HASH_FORGE_LENGTH";
pub const ENV_ALPHABET: &str = "HASH_FORGE_ALPHABET";
pub const ENV_MATCH_MODE: &str = "HASH_FORGE_MATCH_MODE";
pub const ENV_LIMIT_MODE: &str = "HASH_FORGE_LIMIT_MODE";
pub const ENV_THREADS: &str = "HASH_FORGE_THREADS";
pub const ENV_BATCH_SIZE: &str = "HASH_FORGE_BATCH_SIZE";
pub const ENV_PROGRESS_INTERVAL: &str = "HASH_FORGE_PROGRESS_INTERVAL";
pub const ENV_SEED: &str = "HASH_FORGE_SEED";
pub const ENV_REPORT: &str = "HASH_FORGE_REPORT";

/// Parse the positional iteration bound.
///
/// Missing gives [`DEFAULT_ITERATION_LIMIT`]. Otherwise the leading decimal
/// digits are used; no digits gives 0 and overflow saturates.
pub fn parse_iteration_limit(arg: Option<&str>) -> u64 {
    let Some(arg) = arg else {
        return DEFAULT_ITERATION_LIMIT;
    };
    let trimmed = arg.trim_start();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);

    digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .try_fold(0u64, |acc, d| acc.checked_mul(10)?.checked_add(u64::from(d - b'0')))
        .unwrap_or(u64::MAX)
}

impl SearchConfig {
    /// Build a configuration from `HASH_FORGE_*` environment variables
    pub fn from_env(iteration_limit: u64) -> Result<Self> {
        Self::from_lookup(iteration_limit, |key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup
    pub fn from_lookup<F>(iteration_limit: u64, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = SearchConfig {
            iteration_limit,
            ..Default::default()
        };

        if let Some(pattern) = lookup(ENV_PATTERN) {
            config.pattern = pattern;
        }
        if let Some(length) = parse_var(&lookup, ENV_LENGTH)? {
            config.candidate_length = length;
        }
        if let Some(alphabet) = parse_var(&lookup, ENV_ALPHABET)? {
            config.alphabet = alphabet;
        }
        if let Some(mode) = parse_var(&lookup, ENV_MATCH_MODE)? {
            config.match_mode = mode;
        }
        if let Some(mode) = parse_var(&lookup, ENV_LIMIT_MODE)? {
            config.limit_mode = mode;
        }
        if let Some(threads) = parse_var(&lookup, ENV_THREADS)? {
            config.threads = threads;
        }
        if let Some(batch_size) = parse_var(&lookup, ENV_BATCH_SIZE)? {
            config.batch_size = batch_size;
        }
        if let Some(interval) = parse_var(&lookup, ENV_PROGRESS_INTERVAL)? {
            config.progress_interval = interval;
        }
        config.seed = parse_var(&lookup, ENV_SEED)?;
        config.report_path = lookup(ENV_REPORT)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(config)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| config_error!("{}={:?}: {}", key, raw, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HashForgeError;
    use crate::hunt::Alphabet;
    use crate::types::{LimitMode, MatchMode};
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_iteration_limit_parsing() {
        assert_eq!(parse_iteration_limit(None), 100);
        assert_eq!(parse_iteration_limit(Some("5000")), 5000);
        assert_eq!(parse_iteration_limit(Some("  +42")), 42);
        assert_eq!(parse_iteration_limit(Some("12abc")), 12);
        assert_eq!(parse_iteration_limit(Some("abc")), 0);
        assert_eq!(parse_iteration_limit(Some("")), 0);
        assert_eq!(parse_iteration_limit(Some("99999999999999999999999")), u64::MAX);
    }

    #[test]
    fn test_defaults_without_env() {
        let config = SearchConfig::from_lookup(100, |_| None).unwrap();
        assert_eq!(config.pattern, "'='");
        assert_eq!(config.candidate_length, 10);
        assert_eq!(config.iteration_limit, 100);
        assert_eq!(config.threads, 1);
        assert_eq!(config.progress_interval, 10_000_000);
        assert!(config.seed.is_none());
        assert!(config.report_path.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let lookup = lookup_from(&[
            (ENV_PATTERN, "CAFE"),
            (ENV_LENGTH, "4"),
            (ENV_ALPHABET, "legacy"),
            (ENV_MATCH_MODE, "hex"),
            (ENV_LIMIT_MODE, "inclusive"),
            (ENV_THREADS, "8"),
            (ENV_SEED, "1234"),
            (ENV_REPORT, "out/report.json"),
        ]);
        let config = SearchConfig::from_lookup(7, lookup).unwrap();
        assert_eq!(config.pattern, "CAFE");
        assert_eq!(config.candidate_length, 4);
        assert_eq!(config.alphabet, Alphabet::Legacy);
        assert_eq!(config.match_mode, MatchMode::Hex);
        assert_eq!(config.limit_mode, LimitMode::Inclusive);
        assert_eq!(config.threads, 8);
        assert_eq!(config.seed, Some(1234));
        assert_eq!(config.report_path, Some(PathBuf::from("out/report.json")));
    }

    #[test]
    fn test_bad_env_value() {
        let err = SearchConfig::from_lookup(1, lookup_from(&[(ENV_THREADS, "many")])).unwrap_err();
        assert!(matches!(err, HashForgeError::Config { .. }));
        assert!(err.to_string().contains(ENV_THREADS));
    }
}
