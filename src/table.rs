use std::io::{Read, Write};

use csv::{ReaderBuilder, WriterBuilder};
use tracing::debug;

use crate::error::{CleanerError, Result};

/// One data row. Cells line up with the owning table's columns; an empty CSV
/// cell is stored as `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    cells: Vec<Option<String>>,
}

impl Row {
    pub fn get(&self, index: usize) -> Option<&str> {
        self.cells.get(index).and_then(|c| c.as_deref())
    }

    pub fn cells(&self) -> &[Option<String>] {
        &self.cells
    }
}

/// An in-memory string table with ordered, named columns.
///
/// Column lookups are exact and resolve to the first column carrying the name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table from string literals, treating empty strings as missing.
    /// Mostly useful in tests and for small literal tables.
    pub fn from_records(columns: &[&str], records: &[&[&str]]) -> Result<Self> {
        let mut table = Table::new(columns.iter().map(|c| c.to_string()).collect());
        for record in records {
            table.push_row(record.iter().map(|v| cell_value(v)).collect())?;
        }
        Ok(table)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Like `column_index`, but a missing column is a configuration error.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| CleanerError::missing_column(name, &self.columns))
    }

    pub fn push_row(&mut self, cells: Vec<Option<String>>) -> Result<()> {
        if cells.len() != self.columns.len() {
            return Err(CleanerError::Config(format!(
                "row {} has {} cells but the table has {} columns",
                self.rows.len() + 1,
                cells.len(),
                self.columns.len()
            )));
        }
        self.rows.push(Row { cells });
        Ok(())
    }

    /// Value of `column` in every row, in row order.
    pub fn column_values(&self, column: &str) -> Result<Vec<Option<&str>>> {
        let idx = self.require_column(column)?;
        Ok(self.rows.iter().map(|r| r.get(idx)).collect())
    }

    /// A new table with the same columns holding the rows where `keep[i]` is set.
    pub fn select_rows(&self, keep: &[bool]) -> Table {
        let rows = self
            .rows
            .iter()
            .zip(keep)
            .filter(|(_, k)| **k)
            .map(|(r, _)| r.clone())
            .collect();
        Table {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Remove every column whose name matches `name` ignoring case.
    /// Returns how many columns were removed.
    pub fn drop_columns_ignore_case(&mut self, name: &str) -> usize {
        let target = name.to_lowercase();
        let keep: Vec<bool> = self
            .columns
            .iter()
            .map(|c| c.to_lowercase() != target)
            .collect();
        let removed = keep.iter().filter(|k| !**k).count();
        if removed == 0 {
            return 0;
        }

        self.columns = retain_by_mask(std::mem::take(&mut self.columns), &keep);
        for row in &mut self.rows {
            row.cells = retain_by_mask(std::mem::take(&mut row.cells), &keep);
        }
        removed
    }

    /// Move `name` to `position`, shifting the others but keeping their
    /// relative order. Positions past the end clamp to the last slot.
    /// Returns false when the column does not exist.
    pub fn move_column(&mut self, name: &str, position: usize) -> bool {
        let Some(from) = self.column_index(name) else {
            return false;
        };
        let to = position.min(self.columns.len() - 1);
        if from == to {
            return true;
        }

        let column = self.columns.remove(from);
        self.columns.insert(to, column);
        for row in &mut self.rows {
            let cell = row.cells.remove(from);
            row.cells.insert(to, cell);
        }
        true
    }

    /// Read a headed, comma-delimited CSV. Every value is kept as a string.
    pub fn read_csv<R: Read>(reader: R) -> Result<Table> {
        let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

        let columns: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
        let mut table = Table::new(columns);

        for record in rdr.records() {
            let record = record?;
            table.rows.push(Row {
                cells: record.iter().map(cell_value).collect(),
            });
        }

        debug!(
            columns = table.columns.len(),
            rows = table.rows.len(),
            "read CSV table"
        );
        Ok(table)
    }

    /// Write the table as CSV: header row first, missing values as empty cells.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = WriterBuilder::new().from_writer(writer);
        wtr.write_record(&self.columns)?;
        for row in &self.rows {
            wtr.write_record(row.cells.iter().map(|c| c.as_deref().unwrap_or("")))?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn to_csv_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        String::from_utf8(buf).map_err(|e| CleanerError::Config(format!("output is not UTF-8: {}", e)))
    }
}

fn cell_value(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

fn retain_by_mask<T>(items: Vec<T>, keep: &[bool]) -> Vec<T> {
    items
        .into_iter()
        .zip(keep)
        .filter_map(|(item, k)| k.then_some(item))
        .collect()
}
