//! Core types and structures for hash-forge

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::hunt::{Alphabet, Digest};

/// How the pattern is compared against a digest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Search the 16 raw digest bytes
    #[default]
    Raw,
    /// Search the 32-character lowercase hex rendering
    Hex,
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchMode::Raw => write!(f, "raw"),
            MatchMode::Hex => write!(f, "hex"),
        }
    }
}

impl std::str::FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" => Ok(MatchMode::Raw),
            "hex" => Ok(MatchMode::Hex),
            other => Err(format!("unknown match mode '{}' (expected raw or hex)", other)),
        }
    }
}

/// Whether the iteration limit itself is visited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitMode {
    /// Indices `1..limit`; the limit value is skipped
    #[default]
    Exclusive,
    /// Indices `1..=limit`
    Inclusive,
}

impl std::fmt::Display for LimitMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LimitMode::Exclusive => write!(f, "exclusive"),
            LimitMode::Inclusive => write!(f, "inclusive"),
        }
    }
}

impl std::str::FromStr for LimitMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exclusive" => Ok(LimitMode::Exclusive),
            "inclusive" => Ok(LimitMode::Inclusive),
            other => Err(format!("unknown limit mode '{}' (expected exclusive or inclusive)", other)),
        }
    }
}

/// Configuration for a search run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub pattern: String,
    pub candidate_length: usize,
    pub iteration_limit: u64,
    pub alphabet: Alphabet,
    pub match_mode: MatchMode,
    pub limit_mode: LimitMode,
    pub threads: usize,
    pub batch_size: u64,
    pub progress_interval: u64,
    pub seed: Option<u64>,
    #[serde(skip)]
    pub report_path: Option<PathBuf>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            pattern: "'='".to_string(),
            candidate_length: 10,
            iteration_limit: 100,
            alphabet: Alphabet::Base36,
            match_mode: MatchMode::Raw,
            limit_mode: LimitMode::Exclusive,
            threads: 1,
            batch_size: 4096,
            progress_interval: 10_000_000,
            seed: None,
            report_path: None,
        }
    }
}

impl SearchConfig {
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    pub fn with_candidate_length(mut self, length: usize) -> Self {
        self.candidate_length = length;
        self
    }

    pub fn with_iteration_limit(mut self, limit: u64) -> Self {
        self.iteration_limit = limit;
        self
    }

    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    pub fn with_limit_mode(mut self, mode: LimitMode) -> Self {
        self.limit_mode = mode;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_batch_size(mut self, batch_size: u64) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Iteration indices visited by the search, or `None` when nothing runs
    pub fn iteration_range(&self) -> Option<RangeInclusive<u64>> {
        let last = match self.limit_mode {
            LimitMode::Exclusive => self.iteration_limit.checked_sub(1)?,
            LimitMode::Inclusive => self.iteration_limit,
        };
        if last == 0 {
            None
        } else {
            Some(1..=last)
        }
    }

    /// Number of iterations the search will run
    pub fn iteration_count(&self) -> u64 {
        self.iteration_range().map_or(0, |r| *r.end())
    }
}

/// A candidate whose digest contained the pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchMatch {
    pub iteration: u64,
    pub candidate: String,
    pub digest: Digest,
}

/// Outcome of a search run
#[derive(Debug, Clone, Default)]
pub struct SearchSummary {
    /// Seed the run was started from; `None` when the caller supplied the RNG
    pub seed: Option<u64>,
    pub iterations: u64,
    pub matches: Vec<SearchMatch>,
    pub elapsed: Duration,
    pub cancelled: bool,
}

impl SearchSummary {
    pub fn hashes_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.iterations as f64 / secs
        } else {
            0.0
        }
    }
}

/// Lock-free counters shared by search workers
#[derive(Debug)]
pub struct SearchMetrics {
    candidates_generated: AtomicU64,
    digests_computed: AtomicU64,
    matches_found: AtomicU64,
    started: Instant,
}

impl SearchMetrics {
    pub fn new() -> Self {
        Self {
            candidates_generated: AtomicU64::new(0),
            digests_computed: AtomicU64::new(0),
            matches_found: AtomicU64::new(0),
            started: Instant::now(),
        }
    }

    pub fn increment_candidates(&self) {
        self.candidates_generated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_digests(&self) {
        self.digests_computed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_matches(&self) {
        self.matches_found.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            candidates_generated: self.candidates_generated.load(Ordering::Relaxed),
            digests_computed: self.digests_computed.load(Ordering::Relaxed),
            matches_found: self.matches_found.load(Ordering::Relaxed),
            elapsed: self.started.elapsed(),
        }
    }
}

impl Default for SearchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time copy of [`SearchMetrics`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsSnapshot {
    pub candidates_generated: u64,
    pub digests_computed: u64,
    pub matches_found: u64,
    pub elapsed: Duration,
}

impl MetricsSnapshot {
    pub fn digests_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.digests_computed as f64 / secs
        } else {
            0.0
        }
    }
}
