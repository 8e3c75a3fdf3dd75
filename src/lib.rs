//! Hash Forge - brute-force search for digests containing a pattern
//!
//! Generates random fixed-length candidates, hashes each with MD5 and reports
//! every digest whose representation contains the target pattern.

pub mod config;
pub mod error;
pub mod hunt;
pub mod types;

// Re-export commonly used types
pub use error::{HashForgeError, Result};
pub use types::{
    LimitMode, MatchMode, MetricsSnapshot, SearchConfig, SearchMatch, SearchMetrics,
    SearchSummary,
};

// Re-export main functionality
pub use hunt::{Alphabet, Digest, DigestFn, Md5Digest, RandomHashSearcher, SearchReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}
