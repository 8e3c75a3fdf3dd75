//! JSON run report

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{HashForgeError, Result};
use crate::types::{SearchConfig, SearchSummary};

/// Persistent record of a finished search run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchReport {
    /// Report identifier
    pub run_id: String,
    /// Configuration the run used
    pub config: SearchConfig,
    /// Seed the run was started from
    pub seed: Option<u64>,
    /// Iterations actually performed
    pub iterations: u64,
    /// Matches in iteration order
    pub matches: Vec<ReportedMatch>,
    /// Stopped before the iteration bound
    pub cancelled: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// A match as written to the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportedMatch {
    pub iteration: u64,
    pub candidate: String,
    pub digest_hex: String,
}

impl SearchReport {
    /// Build a report from a completed run
    pub fn new(config: &SearchConfig, summary: &SearchSummary, started_at: DateTime<Utc>) -> Self {
        let finished_at = Utc::now();
        Self {
            run_id: format!("hunt_{}", started_at.format("%Y%m%d_%H%M%S")),
            config: config.clone(),
            seed: summary.seed,
            iterations: summary.iterations,
            matches: summary
                .matches
                .iter()
                .map(|m| ReportedMatch {
                    iteration: m.iteration,
                    candidate: m.candidate.clone(),
                    digest_hex: m.digest.to_hex(),
                })
                .collect(),
            cancelled: summary.cancelled,
            started_at,
            finished_at,
        }
    }

    /// Load report from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            HashForgeError::io(e.to_string(), Some(path.to_string_lossy().to_string()))
        })?;

        serde_json::from_str(&content).map_err(|e| HashForgeError::parse(e.to_string(), Some(content)))
    }

    /// Save report to file
    pub fn save(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                HashForgeError::io(e.to_string(), Some(parent.to_string_lossy().to_string()))
            })?;
        }

        let content = serde_json::to_string_pretty(self).map_err(|e| {
            HashForgeError::internal(format!("Failed to serialize report: {}", e))
        })?;

        std::fs::write(path, content).map_err(|e| {
            HashForgeError::io(e.to_string(), Some(path.to_string_lossy().to_string()))
        })
    }

    /// Wall-clock duration of the run
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}
