use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::classify::ClassifierMode;
use crate::config::CleanerConfig;
use crate::error::Result;
use crate::pipeline::CleanSummary;

/// Record of one cleaning run, written alongside the output on request.
#[derive(Debug, Clone, Serialize)]
pub struct CleanReport {
    pub run_id: Uuid,
    pub processed_at: DateTime<Utc>,
    /// Hex SHA-256 of the raw input bytes
    pub input_sha256: String,
    pub mode: ClassifierMode,
    pub primary_column: String,
    pub dedupe: bool,
    #[serde(flatten)]
    pub summary: CleanSummary,
    pub removed_total: usize,
}

impl CleanReport {
    pub fn new(config: &CleanerConfig, input: &[u8], summary: CleanSummary) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            processed_at: Utc::now(),
            input_sha256: sha256_hex(input),
            mode: config.mode,
            primary_column: config.primary_column.clone(),
            dedupe: config.dedupe,
            summary,
            removed_total: summary.removed.total(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Three-figure summary in the order the cleaner has always shown it.
    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            format!("Original: {}", self.summary.original_rows),
            format!("Cleaned:  {}", self.summary.kept_rows),
            format!(
                "Removed:  {} ({} action items, {} unclassified, {} duplicates)",
                self.removed_total,
                self.summary.removed.action_items,
                self.summary.removed.unclassified,
                self.summary.removed.duplicates
            ),
            format!(
                "Cleaned file ready with {} unique primary tasks",
                self.summary.kept_rows
            ),
        ]
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::RemovalCounts;

    fn summary() -> CleanSummary {
        CleanSummary {
            original_rows: 4,
            kept_rows: 2,
            removed: RemovalCounts {
                action_items: 1,
                unclassified: 0,
                duplicates: 1,
            },
        }
    }

    #[test]
    fn test_sha256_hex_known_value() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_report_json_is_flat() {
        let report = CleanReport::new(&CleanerConfig::default(), b"a,b\n", summary());
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(value["mode"], "keyword");
        assert_eq!(value["original_rows"], 4);
        assert_eq!(value["kept_rows"], 2);
        assert_eq!(value["removed"]["duplicates"], 1);
        assert_eq!(value["removed_total"], 2);
        assert_eq!(value["primary_column"], "Parent task");
    }

    #[test]
    fn test_summary_lines() {
        let report = CleanReport::new(&CleanerConfig::default(), b"", summary());
        let lines = report.summary_lines();
        assert_eq!(lines[0], "Original: 4");
        assert_eq!(lines[1], "Cleaned:  2");
        assert!(lines[2].starts_with("Removed:  2"));
        assert_eq!(lines[3], "Cleaned file ready with 2 unique primary tasks");
    }
}
