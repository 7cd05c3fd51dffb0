use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::classify::{RowClass, RowClassifier};
use crate::config::CleanerConfig;
use crate::error::Result;
use crate::metrics::{time_operation, CleanerMetrics};
use crate::normalize::normalize_address;
use crate::report::CleanReport;
use crate::table::Table;

/// Why rows left the table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RemovalCounts {
    /// Subtasks and to-do rows
    pub action_items: usize,
    /// Rows whose primary field is neither an address nor a task
    pub unclassified: usize,
    /// Address rows already seen under the same normalized key
    pub duplicates: usize,
}

impl RemovalCounts {
    /// Rows that failed classification, whatever the reason
    pub fn failed_classification(&self) -> usize {
        self.action_items + self.unclassified
    }

    pub fn total(&self) -> usize {
        self.failed_classification() + self.duplicates
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CleanSummary {
    pub original_rows: usize,
    pub kept_rows: usize,
    pub removed: RemovalCounts,
}

/// Result of a complete cleaning pass
#[derive(Debug, Clone)]
pub struct CleanOutcome {
    pub table: Table,
    pub summary: CleanSummary,
}

/// Single-pass filter over a table: classify, dedupe, drop the display
/// column, move the primary column into place.
pub struct CleaningPipeline {
    config: CleanerConfig,
    classifier: RowClassifier,
}

impl CleaningPipeline {
    pub fn new(config: CleanerConfig) -> Result<Self> {
        config.validate()?;
        let classifier =
            RowClassifier::new(config.mode).rejecting_action_items(config.reject_action_items);
        Ok(Self { config, classifier })
    }

    pub fn config(&self) -> &CleanerConfig {
        &self.config
    }

    pub fn classifier(&self) -> &RowClassifier {
        &self.classifier
    }

    /// Clean `table`. Fails without output if a configured column is missing.
    #[instrument(skip_all, fields(primary = %self.config.primary_column, mode = %self.config.mode))]
    pub fn run(&self, table: &Table) -> Result<CleanOutcome> {
        let _timing = time_operation(CleanerMetrics::DURATION_HISTOGRAM);

        let (primary_idx, action_idx) = match self.resolve_columns(table) {
            Ok(indices) => indices,
            Err(e) => {
                CleanerMetrics::record_config_error();
                warn!(error = %e, "refusing to clean table");
                return Err(e);
            }
        };

        let mut removed = RemovalCounts::default();
        let mut keep: Vec<bool> = table
            .rows()
            .iter()
            .map(|row| {
                let class = self
                    .classifier
                    .classify(row.get(primary_idx), row.get(action_idx));
                match class {
                    RowClass::Primary => {}
                    RowClass::ActionItem => removed.action_items += 1,
                    RowClass::Invalid => removed.unclassified += 1,
                }
                class.is_kept()
            })
            .collect();

        if self.config.dedupe {
            removed.duplicates = Self::mark_duplicates(table, primary_idx, &mut keep);
        }

        let mut cleaned = table.select_rows(&keep);

        if let Some(drop) = self.config.drop_column() {
            if drop.to_lowercase() == self.config.primary_column.to_lowercase() {
                warn!(column = drop, "drop column matches the primary column; it will be removed");
            }
            let dropped = cleaned.drop_columns_ignore_case(drop);
            debug!(column = drop, dropped, "dropped display column");
        }

        cleaned.move_column(&self.config.primary_column, self.config.primary_position);

        let summary = CleanSummary {
            original_rows: table.len(),
            kept_rows: cleaned.len(),
            removed,
        };

        CleanerMetrics::record_rows_read(summary.original_rows);
        CleanerMetrics::record_rows_kept(summary.kept_rows);
        CleanerMetrics::record_rows_removed(removed.action_items, removed.unclassified, removed.duplicates);

        info!(
            original = summary.original_rows,
            kept = summary.kept_rows,
            action_items = removed.action_items,
            unclassified = removed.unclassified,
            duplicates = removed.duplicates,
            "cleaning pass finished"
        );

        Ok(CleanOutcome {
            table: cleaned,
            summary,
        })
    }

    /// Parse CSV bytes, clean them and serialize the result. Nothing is
    /// returned unless every step succeeds.
    pub fn clean_csv(&self, input: &[u8]) -> Result<(Vec<u8>, CleanReport)> {
        let table = Table::read_csv(input)?;
        let outcome = self.run(&table)?;

        let mut output = Vec::new();
        outcome.table.write_csv(&mut output)?;

        let report = CleanReport::new(&self.config, input, outcome.summary);
        Ok((output, report))
    }

    fn resolve_columns(&self, table: &Table) -> Result<(usize, usize)> {
        let primary_idx = table.require_column(&self.config.primary_column)?;
        let action_idx = match &self.config.name_column {
            Some(name) => table.require_column(name)?,
            None => primary_idx,
        };
        Ok((primary_idx, action_idx))
    }

    /// Clear `keep` for every kept row whose normalized address was already
    /// seen earlier. Rows without a key are never treated as duplicates.
    fn mark_duplicates(table: &Table, primary_idx: usize, keep: &mut [bool]) -> usize {
        let mut seen = HashSet::new();
        let mut duplicates = 0;

        for (i, row) in table.rows().iter().enumerate() {
            if !keep[i] {
                continue;
            }
            let Some(key) = normalize_address(row.get(primary_idx)) else {
                continue;
            };
            if !seen.insert(key) {
                keep[i] = false;
                duplicates += 1;
                debug!(row = i + 1, "duplicate address dropped");
            }
        }
        duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ClassifierMode;
    use crate::error::CleanerError;

    fn export(primary: &[&str]) -> Table {
        let mut table = Table::new(vec![
            "Task ID".to_string(),
            "Name".to_string(),
            "Section".to_string(),
            "Parent task".to_string(),
        ]);
        for (i, value) in primary.iter().enumerate() {
            table
                .push_row(vec![
                    Some(format!("{}", i + 1)),
                    Some(format!("task {}", i + 1)),
                    Some("Inbox".to_string()),
                    (!value.is_empty()).then(|| value.to_string()),
                ])
                .unwrap();
        }
        table
    }

    fn primary_values(table: &Table) -> Vec<Option<&str>> {
        table.column_values("Parent task").unwrap()
    }

    #[test]
    fn test_keyword_dedupe_end_to_end() {
        let pipeline = CleaningPipeline::new(CleanerConfig::default()).unwrap();
        let table = export(&["123 Main St", "456 Oak Ave", "123 main st.", "Call client"]);

        let outcome = pipeline.run(&table).unwrap();

        assert_eq!(
            primary_values(&outcome.table),
            vec![Some("123 Main St"), Some("456 Oak Ave")]
        );
        assert_eq!(outcome.summary.original_rows, 4);
        assert_eq!(outcome.summary.kept_rows, 2);
        assert_eq!(outcome.summary.removed.total(), 2);
        assert_eq!(outcome.summary.removed.duplicates, 1);
        assert_eq!(outcome.summary.removed.action_items, 1);
        assert_eq!(outcome.summary.removed.unclassified, 0);
    }

    #[test]
    fn test_output_drops_name_and_moves_primary() {
        let pipeline = CleaningPipeline::new(CleanerConfig::default()).unwrap();
        let outcome = pipeline.run(&export(&["9 Elm Rd"])).unwrap();

        assert_eq!(outcome.table.columns(), &["Task ID", "Parent task", "Section"]);
        assert_eq!(outcome.table.rows()[0].get(0), Some("1"));
        assert_eq!(outcome.table.rows()[0].get(1), Some("9 Elm Rd"));
    }

    #[test]
    fn test_dedupe_disabled_keeps_repeats() {
        let config = CleanerConfig {
            dedupe: false,
            ..CleanerConfig::default()
        };
        let pipeline = CleaningPipeline::new(config).unwrap();
        let outcome = pipeline.run(&export(&["123 Main St", "123 MAIN ST."])).unwrap();

        assert_eq!(outcome.summary.kept_rows, 2);
        assert_eq!(outcome.summary.removed.duplicates, 0);
    }

    #[test]
    fn test_missing_primary_column_fails() {
        let config = CleanerConfig {
            primary_column: "Address".to_string(),
            ..CleanerConfig::default()
        };
        let pipeline = CleaningPipeline::new(config).unwrap();
        let err = pipeline.run(&export(&["123 Main St"])).unwrap_err();
        assert!(matches!(err, CleanerError::MissingColumn { ref column, .. } if column == "Address"));
    }

    #[test]
    fn test_missing_name_column_fails() {
        let config = CleanerConfig {
            name_column: Some("Assignee".to_string()),
            ..CleanerConfig::default()
        };
        let pipeline = CleaningPipeline::new(config).unwrap();
        assert!(pipeline.run(&export(&["123 Main St"])).is_err());
    }

    #[test]
    fn test_blank_primary_values_are_removed() {
        let pipeline = CleaningPipeline::new(CleanerConfig::default()).unwrap();
        let outcome = pipeline.run(&export(&["", "", "77 Bay St."])).unwrap();

        assert_eq!(outcome.summary.kept_rows, 1);
        assert_eq!(outcome.summary.removed.unclassified, 2);
        assert_eq!(outcome.summary.removed.duplicates, 0);
    }

    #[test]
    fn test_blank_keys_never_collapse() {
        let table = Table::from_records(&["Parent task"], &[&[""], &[""]]).unwrap();
        let mut keep = vec![true, true];
        let dupes = CleaningPipeline::mark_duplicates(&table, 0, &mut keep);
        assert_eq!(dupes, 0);
        assert_eq!(keep, vec![true, true]);
    }

    #[test]
    fn test_reject_action_items_with_name_column() {
        let config = CleanerConfig {
            name_column: Some("Name".to_string()),
            reject_action_items: true,
            ..CleanerConfig::default()
        };
        let pipeline = CleaningPipeline::new(config).unwrap();

        let mut table = export(&["12 Pine St.", "14 Pine St."]);
        table
            .push_row(vec![
                Some("3".to_string()),
                Some("Call plumber".to_string()),
                None,
                Some("16 Pine St.".to_string()),
            ])
            .unwrap();

        let outcome = pipeline.run(&table).unwrap();
        assert_eq!(outcome.summary.kept_rows, 2);
        assert_eq!(outcome.summary.removed.action_items, 1);
    }

    #[test]
    fn test_pattern_mode_pipeline() {
        let config = CleanerConfig {
            mode: ClassifierMode::Pattern,
            ..CleanerConfig::default()
        };
        let pipeline = CleaningPipeline::new(config).unwrap();
        let outcome = pipeline
            .run(&export(&["123 Main St", "Review lease", "PO Box 9"]))
            .unwrap();

        assert_eq!(
            primary_values(&outcome.table),
            vec![Some("123 Main St"), Some("PO Box 9")]
        );
    }

    #[test]
    fn test_clean_csv_round_trip() {
        let pipeline = CleaningPipeline::new(CleanerConfig::default()).unwrap();
        let input = b"Name,Parent task,Notes\nx,Call client,\ny,\"1 Elm St, Apt 2\",gate code\n";

        let (output, report) = pipeline.clean_csv(input).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Notes,Parent task\ngate code,\"1 Elm St, Apt 2\"\n"
        );
        assert_eq!(report.summary.kept_rows, 1);
    }
}
