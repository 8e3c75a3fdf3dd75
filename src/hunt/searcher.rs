//! Random hash searcher - the generate, digest, match loop

use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use parking_lot::Mutex;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::{CandidateGenerator, DigestFn, Md5Digest, PatternMatcher};
use crate::error::{HashForgeError, Result};
use crate::types::{SearchConfig, SearchMatch, SearchMetrics, SearchSummary};
use crate::{internal_error, invalid_argument};

/// Longest candidate a searcher accepts, in bytes
pub const MAX_CANDIDATE_LENGTH: usize = 1 << 20;

/// Progress line for an iteration index: `At 10M`, `At 20M`, ...
pub fn format_progress(index: u64) -> String {
    if index % 1_000_000 == 0 {
        format!("At {}M", index / 1_000_000)
    } else if index % 1_000 == 0 {
        format!("At {}K", index / 1_000)
    } else {
        format!("At {}", index)
    }
}

/// Per-worker seed derived from the run seed; worker 0 keeps the run seed
pub fn worker_seed(seed: u64, worker: usize) -> u64 {
    seed ^ (worker as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// What a single worker contributed to the run
struct WorkerOutcome {
    iterations: u64,
    matches: Vec<SearchMatch>,
}

/// Brute-force searcher for digests containing a pattern
pub struct RandomHashSearcher {
    config: SearchConfig,
    matcher: PatternMatcher,
    digest_fn: Arc<dyn DigestFn>,
    metrics: Arc<SearchMetrics>,
    stop: Arc<AtomicBool>,
}

impl RandomHashSearcher {
    /// Create a searcher, validating the configuration up front
    pub fn new(config: SearchConfig, digest_fn: Arc<dyn DigestFn>) -> Result<Self> {
        if config.candidate_length == 0 {
            return Err(invalid_argument!("candidate length", "must be positive"));
        }
        if config.candidate_length > MAX_CANDIDATE_LENGTH {
            return Err(invalid_argument!(
                "candidate length",
                "{} exceeds the maximum of {}",
                config.candidate_length,
                MAX_CANDIDATE_LENGTH
            ));
        }
        if config.threads == 0 {
            return Err(invalid_argument!("threads", "must be at least 1"));
        }
        if config.batch_size == 0 {
            return Err(invalid_argument!("batch size", "must be positive"));
        }
        if config.progress_interval == 0 {
            return Err(invalid_argument!("progress interval", "must be positive"));
        }
        let matcher = PatternMatcher::new(&config.pattern, config.match_mode)?;

        Ok(Self {
            config,
            matcher,
            digest_fn,
            metrics: Arc::new(SearchMetrics::new()),
            stop: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Create a searcher backed by MD5
    pub fn md5(config: SearchConfig) -> Result<Self> {
        Self::new(config, Arc::new(Md5Digest))
    }

    /// Share an external stop flag (e.g. set from a Ctrl-C handler).
    /// A run that observes the flag consumes it, so the next run starts fresh.
    pub fn with_stop_flag(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = stop;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn metrics(&self) -> Arc<SearchMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Run the configured search, seeding `SmallRng` from the config
    /// (or a fresh random seed). Uses worker threads when `threads > 1`.
    pub fn search<W: Write + Send>(&self, out: &mut W) -> Result<SearchSummary> {
        let seed = self.config.seed.unwrap_or_else(rand::random);
        tracing::info!(
            seed = %seed,
            threads = %self.config.threads,
            iterations = %self.config.iteration_count(),
            pattern = %self.config.pattern,
            mode = %self.matcher.mode(),
            digest = %self.digest_fn.name(),
            "Starting hash search"
        );

        let mut summary = if self.config.threads > 1 {
            self.search_parallel(seed, out)?
        } else {
            self.search_with(SmallRng::seed_from_u64(seed), out)?
        };
        summary.seed = Some(seed);
        Ok(summary)
    }

    /// Run the search on the calling thread with a caller-supplied RNG
    pub fn search_with<R: Rng, W: Write>(&self, rng: R, out: &mut W) -> Result<SearchSummary> {
        let start = Instant::now();
        let mut summary = SearchSummary::default();
        let Some(range) = self.config.iteration_range() else {
            return Ok(summary);
        };

        let mut generator =
            CandidateGenerator::new(self.config.alphabet, self.config.candidate_length, rng);
        tracing::debug!(
            alphabet = %self.config.alphabet,
            length = %generator.length(),
            search_space = ?generator.search_space(),
            "Candidate generator ready"
        );

        for index in range {
            if self.stop.load(Ordering::Relaxed) {
                summary.cancelled = true;
                break;
            }
            self.process_index(index, &mut generator, &mut summary.matches, &mut |line: &str| {
                writeln!(out, "{}", line)
            })?;
            summary.iterations += 1;
        }
        out.flush()?;
        if summary.cancelled {
            self.stop.store(false, Ordering::Relaxed);
        }

        summary.elapsed = start.elapsed();
        self.log_summary(&summary);
        Ok(summary)
    }

    /// Split the range across workers that claim `batch_size` chunks from a
    /// shared cursor. Each index is visited exactly once.
    fn search_parallel<W: Write + Send>(&self, seed: u64, out: &mut W) -> Result<SearchSummary> {
        let start = Instant::now();
        let mut summary = SearchSummary::default();
        let Some(range) = self.config.iteration_range() else {
            return Ok(summary);
        };
        let (first, last) = (*range.start(), *range.end());

        let next_batch = AtomicU64::new(0);
        let halt = AtomicBool::new(false);
        let out = Mutex::new(out);

        let outcomes: Vec<Result<WorkerOutcome>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..self.config.threads)
                .map(|worker| {
                    let next_batch = &next_batch;
                    let halt = &halt;
                    let out = &out;
                    scope.spawn(move || {
                        self.run_worker(worker, seed, first, last, next_batch, halt, out)
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|_| Err(internal_error!("search worker panicked")))
                })
                .collect()
        });

        for outcome in outcomes {
            let outcome = outcome?;
            summary.iterations += outcome.iterations;
            summary.matches.extend(outcome.matches);
        }
        out.lock().flush()?;

        summary.matches.sort_by_key(|m| m.iteration);
        summary.cancelled = summary.iterations < last - first + 1;
        if summary.cancelled {
            self.stop.store(false, Ordering::Relaxed);
        }
        summary.elapsed = start.elapsed();
        self.log_summary(&summary);
        Ok(summary)
    }

    #[allow(clippy::too_many_arguments)]
    fn run_worker<W: Write>(
        &self,
        worker: usize,
        seed: u64,
        first: u64,
        last: u64,
        next_batch: &AtomicU64,
        halt: &AtomicBool,
        out: &Mutex<&mut W>,
    ) -> Result<WorkerOutcome> {
        let rng = SmallRng::seed_from_u64(worker_seed(seed, worker));
        let mut generator =
            CandidateGenerator::new(self.config.alphabet, self.config.candidate_length, rng);
        let mut outcome = WorkerOutcome {
            iterations: 0,
            matches: Vec::new(),
        };
        let batch = self.config.batch_size;

        let halted = || self.stop.load(Ordering::Relaxed) || halt.load(Ordering::Relaxed);

        while !halted() {
            let batch_no = next_batch.fetch_add(1, Ordering::Relaxed);
            let Some(chunk_start) = batch_no
                .checked_mul(batch)
                .and_then(|offset| offset.checked_add(first))
                .filter(|&s| s <= last)
            else {
                break;
            };
            let chunk_end = chunk_start.saturating_add(batch - 1).min(last);

            for index in chunk_start..=chunk_end {
                if halted() {
                    break;
                }
                let mut emit = |line: &str| writeln!(out.lock(), "{}", line);
                let processed =
                    self.process_index(index, &mut generator, &mut outcome.matches, &mut emit);
                if let Err(e) = processed {
                    // Halt the other workers of this run before reporting.
                    halt.store(true, Ordering::Relaxed);
                    tracing::warn!(worker = %worker, index = %index, error = %e, "Search worker failed");
                    return Err(e);
                }
                outcome.iterations += 1;
            }
        }

        tracing::debug!(worker = %worker, iterations = %outcome.iterations, "Search worker finished");
        Ok(outcome)
    }

    /// One iteration: progress line, candidate, digest, match test
    fn process_index<R, F>(
        &self,
        index: u64,
        generator: &mut CandidateGenerator<R>,
        matches: &mut Vec<SearchMatch>,
        emit: &mut F,
    ) -> Result<()>
    where
        R: Rng,
        F: FnMut(&str) -> std::io::Result<()>,
    {
        if index % self.config.progress_interval == 0 {
            emit(&format_progress(index))?;
        }

        let candidate = generator.next_candidate();
        self.metrics.increment_candidates();

        let digest = self.digest_fn.digest(candidate).map_err(|e| match e {
            HashForgeError::HashFailure { .. } => e,
            other => HashForgeError::hash_failure(self.digest_fn.name(), other.to_string()),
        })?;
        self.metrics.increment_digests();

        if self.matcher.matches(&digest) {
            let candidate = String::from_utf8_lossy(candidate).into_owned();
            emit(&format!("{} --> {}", candidate, self.matcher.render(&digest)))?;
            self.metrics.increment_matches();
            tracing::debug!(index = %index, candidate = %candidate, digest = %digest, "Match found");
            matches.push(SearchMatch {
                iteration: index,
                candidate,
                digest,
            });
        }

        Ok(())
    }

    fn log_summary(&self, summary: &SearchSummary) {
        let metrics = self.metrics.snapshot();
        tracing::info!(
            iterations = %summary.iterations,
            matches = %summary.matches.len(),
            cancelled = %summary.cancelled,
            elapsed_ms = %summary.elapsed.as_millis(),
            hashes_per_second = %format!("{:.0}", summary.hashes_per_second()),
            lifetime_digests = %metrics.digests_computed,
            lifetime_digests_per_second = %format!("{:.0}", metrics.digests_per_second()),
            "Hash search completed"
        );
    }
}
