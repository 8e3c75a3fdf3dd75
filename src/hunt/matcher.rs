//! Pattern matching against digests

use super::Digest;
use crate::error::Result;
use crate::invalid_argument;
use crate::types::MatchMode;

/// Lower-cased byte pattern searched for inside each digest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatcher {
    pattern: Vec<u8>,
    mode: MatchMode,
}

impl PatternMatcher {
    pub fn new(pattern: &str, mode: MatchMode) -> Result<Self> {
        if pattern.is_empty() {
            return Err(invalid_argument!("pattern", "must not be empty"));
        }
        Ok(Self {
            pattern: pattern.as_bytes().to_ascii_lowercase(),
            mode,
        })
    }

    pub fn pattern(&self) -> &[u8] {
        &self.pattern
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// True when the pattern occurs contiguously in the digest representation
    pub fn matches(&self, digest: &Digest) -> bool {
        match self.mode {
            MatchMode::Raw => contains(digest.as_bytes(), &self.pattern),
            MatchMode::Hex => contains(digest.to_hex().as_bytes(), &self.pattern),
        }
    }

    /// Digest rendering used on match lines
    pub fn render(&self, digest: &Digest) -> String {
        match self.mode {
            MatchMode::Raw => digest.to_integral_string(),
            MatchMode::Hex => digest.to_hex(),
        }
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    needle.len() <= haystack.len() && haystack.windows(needle.len()).any(|w| w == needle)
}
