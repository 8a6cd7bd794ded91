//! End-of-session summary with JSON export.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::operation::OperationKind;
use crate::session::{Session, Tally};

/// Final results of one drill session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Unique session identifier.
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Configured time budget in seconds.
    pub duration_secs: u32,
    pub score: u64,
    pub correct: u32,
    pub incorrect: u32,
    /// Rounded percentage.
    pub accuracy: u32,
    pub per_operation: Vec<OperationSummary>,
}

/// Results for one operation kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationSummary {
    pub operation: OperationKind,
    pub correct: u32,
    pub incorrect: u32,
}

impl SessionSummary {
    pub fn new(
        session: &Session,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
        duration_secs: u32,
    ) -> Self {
        let per_operation = session
            .by_operation
            .iter()
            .map(|(&operation, &Tally { correct, incorrect })| OperationSummary {
                operation,
                correct,
                incorrect,
            })
            .collect();

        Self {
            id: Uuid::new_v4(),
            started_at,
            finished_at,
            duration_secs,
            score: session.score,
            correct: session.correct,
            incorrect: session.incorrect,
            accuracy: session.accuracy(),
            per_operation,
        }
    }

    /// Save the summary as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize summary")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write summary to {}", path.display()))?;
        Ok(())
    }

    /// Load a summary previously written by [`SessionSummary::save_json`].
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read summary from {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse summary JSON: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{Problem, Slot};
    use crate::validator::validate;

    #[test]
    fn summary_reflects_session() {
        let mut session = Session::new();
        let add = Problem::new(OperationKind::Add, 1, 2, 3, Slot::Result).unwrap();
        let modulo = Problem::new(OperationKind::Modulo, 17, 5, 2, Slot::Result).unwrap();
        session.record(&add, &validate(&add, "3"));
        session.record(&modulo, &validate(&modulo, "4"));

        let now = Utc::now();
        let summary = SessionSummary::new(&session, now, now, 60);
        assert_eq!(summary.score, 10);
        assert_eq!(summary.accuracy, 50);
        assert_eq!(summary.per_operation.len(), 2);
        assert_eq!(summary.per_operation[0].operation, OperationKind::Add);
        assert_eq!(summary.per_operation[1].incorrect, 1);
    }

    #[test]
    fn save_json_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("summary.json");
        let now = Utc::now();
        let summary = SessionSummary::new(&Session::new(), now, now, 30);
        summary.save_json(&path).unwrap();

        let loaded = SessionSummary::load_json(&path).unwrap();
        assert_eq!(loaded.id, summary.id);
        assert_eq!(loaded.duration_secs, 30);
        assert!(loaded.per_operation.is_empty());
    }

    #[test]
    fn load_json_reports_missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        let err = SessionSummary::load_json(&missing).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read summary"));

        let garbled = dir.path().join("garbled.json");
        std::fs::write(&garbled, "{\"score\": ").unwrap();
        let err = SessionSummary::load_json(&garbled).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse summary JSON"));
    }
}
