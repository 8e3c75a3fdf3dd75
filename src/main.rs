//! Hash Forge - brute-force search for MD5 digests containing a pattern
//!
//! Stdout carries only progress and match lines; diagnostics go to stderr.

use anyhow::Context;
use chrono::Utc;
use hash_forge::{
    config::parse_iteration_limit, HashForgeError, RandomHashSearcher, SearchConfig,
    SearchReport,
};
use std::env;
use std::process;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize the library
    if let Err(e) = hash_forge::init() {
        eprintln!("❌ Failed to initialize: {}", e);
        process::exit(1);
    }
    init_tracing();

    // Get command line arguments
    let args: Vec<String> = env::args().collect();

    // Check for help
    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h") {
        print_help();
        return;
    }

    let iteration_limit = parse_iteration_limit(args.get(1).map(String::as_str));

    if let Err(e) = run_search(iteration_limit).await {
        match e.downcast_ref::<HashForgeError>() {
            Some(err) => eprintln!("{}", err.user_message()),
            None => eprintln!("❌ Error: {:#}", e),
        }
        process::exit(1);
    }
}

/// Diagnostics to stderr, filtered by RUST_LOG
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("hash_forge=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Main search workflow
async fn run_search(iteration_limit: u64) -> anyhow::Result<()> {
    let config = SearchConfig::from_env(iteration_limit)?;
    tracing::debug!(?config, "Resolved configuration");

    let searcher = Arc::new(RandomHashSearcher::md5(config)?);

    // Ctrl-C stops the loop between iterations; the summary and report still get written
    let stop = searcher.stop_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping search");
            stop.store(true, Ordering::Relaxed);
        }
    });

    let started_at = Utc::now();
    let worker = Arc::clone(&searcher);
    let summary = tokio::task::spawn_blocking(move || {
        let mut out = std::io::stdout();
        worker.search(&mut out)
    })
    .await
    .context("search task did not complete")??;

    let config = searcher.config();
    if let Some(path) = &config.report_path {
        let report = SearchReport::new(config, &summary, started_at);
        report.save(path)?;
        tracing::info!(
            path = %path.display(),
            elapsed_ms = report.elapsed().num_milliseconds(),
            "Report written"
        );
    }

    Ok(())
}

/// Print help information
fn print_help() {
    println!("Hash Forge - brute-force search for MD5 digests containing a pattern");
    println!();
    println!("USAGE:");
    println!("    hash-forge [ITERATION_LIMIT]");
    println!();
    println!("ARGS:");
    println!("    ITERATION_LIMIT    Upper bound on iterations (default: 100)");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    HASH_FORGE_PATTERN            Pattern to search for (default: \"'='\")");
    println!("    HASH_FORGE_LENGTH             Candidate length (default: 10)");
    println!("    HASH_FORGE_ALPHABET           base36 | legacy (default: base36)");
    println!("    HASH_FORGE_MATCH_MODE         raw | hex (default: raw)");
    println!("    HASH_FORGE_LIMIT_MODE         exclusive | inclusive (default: exclusive)");
    println!("    HASH_FORGE_THREADS            Worker threads (default: 1)");
    println!("    HASH_FORGE_BATCH_SIZE         Indices claimed per worker step (default: 4096)");
    println!("    HASH_FORGE_PROGRESS_INTERVAL  Iterations between progress lines (default: 10000000)");
    println!("    HASH_FORGE_SEED               PRNG seed (default: random, logged)");
    println!("    HASH_FORGE_REPORT             Write a JSON run report to this path");
    println!();
    println!("    RUST_LOG                      Log filter for stderr (default: hash_forge=info)");
}
