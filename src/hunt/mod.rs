//! Random hash hunting - generate candidates, digest them, look for a pattern

mod digest;
mod generator;
mod matcher;
mod report;
mod searcher;

pub use digest::{Digest, DigestFn, Md5Digest, DIGEST_LEN};
pub use generator::CandidateGenerator;
pub use matcher::PatternMatcher;
pub use report::{ReportedMatch, SearchReport};
pub use searcher::{format_progress, worker_seed, RandomHashSearcher, MAX_CANDIDATE_LENGTH};

use serde::{Deserialize, Serialize};

/// Character set candidates are drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alphabet {
    /// Digits and lowercase letters (0-9, a-z)
    #[default]
    Base36,
    /// Digits and lowercase letters without 'i'
    Legacy,
}

impl Alphabet {
    pub fn bytes(&self) -> &'static [u8] {
        match self {
            Alphabet::Base36 => b"0123456789abcdefghijklmnopqrstuvwxyz",
            Alphabet::Legacy => b"0123456789abcdefghjklmnopqrstuvwxyz",
        }
    }

    pub fn contains(&self, byte: u8) -> bool {
        self.bytes().contains(&byte)
    }
}

impl std::fmt::Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Alphabet::Base36 => write!(f, "base36"),
            Alphabet::Legacy => write!(f, "legacy"),
        }
    }
}

impl std::str::FromStr for Alphabet {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "base36" => Ok(Alphabet::Base36),
            "legacy" => Ok(Alphabet::Legacy),
            other => Err(format!("unknown alphabet '{}' (expected base36 or legacy)", other)),
        }
    }
}
