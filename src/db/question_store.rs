use std::collections::BTreeSet;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use super::{Result, StoreError};
use crate::models::question::{COLUMNS, Question};

/// Cell contents read back as null.
const MISSING_MARKERS: [&str; 9] = ["NaN", "nan", "NA", "N/A", "n/a", "#N/A", "NULL", "null", "<NA>"];

fn normalize_cell(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || MISSING_MARKERS.contains(&trimmed) {
        None
    } else {
        Some(value.to_string())
    }
}

fn parse_nr(value: &str, line: u64) -> Result<u32> {
    let value = value.trim();
    if let Ok(nr) = value.parse::<u32>() {
        return Ok(nr);
    }
    // Spreadsheet exports tend to write integers as floats
    match value.parse::<f64>() {
        Ok(nr) if nr >= 0.0 && nr.fract() == 0.0 && nr <= u32::MAX as f64 => Ok(nr as u32),
        _ => Err(StoreError::InvalidRow {
            line,
            reason: format!("nr {value:?} is not a non-negative integer"),
        }),
    }
}

fn check_columns(columns: &[String]) -> Result<()> {
    if columns.is_empty() {
        return Err(StoreError::SchemaMismatch("table has no header row".into()));
    }
    for (i, column) in columns.iter().enumerate() {
        if !COLUMNS.contains(&column.as_str()) {
            return Err(StoreError::SchemaMismatch(format!("unknown column {column:?}")));
        }
        if columns[..i].contains(column) {
            return Err(StoreError::SchemaMismatch(format!("duplicate column {column:?}")));
        }
    }
    Ok(())
}

/// In-memory question table: the column schema of the backing file plus its rows
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Question>,
}

impl Table {
    pub fn rows(&self) -> &[Question] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Question> {
        self.rows
    }

    /// The `nr` a newly added question receives.
    pub fn next_nr(&self) -> Result<u32> {
        let max = self.rows.iter().map(|q| q.nr).max().unwrap_or(0);
        max.checked_add(1).ok_or(StoreError::NrExhausted)
    }

    /// Sorted distinct non-null values of a column.
    pub fn distinct(&self, column: &str) -> BTreeSet<String> {
        self.rows.iter().filter_map(|q| q.field(column)).collect()
    }

    /// Adds a question given as a JSON record keyed by column name.
    ///
    /// The record must carry exactly the table's columns; `nr` may be left
    /// out, null or `0`, in which case the next free number is assigned.
    /// The returned table lists the most recent question first.
    pub fn append(mut self, record: &Map<String, Value>) -> Result<Table> {
        for key in record.keys() {
            if key != "nr" && !self.columns.contains(key) {
                return Err(StoreError::SchemaMismatch(format!("unknown column {key:?}")));
            }
        }
        for column in self.columns.iter().filter(|c| *c != "nr") {
            if !record.contains_key(column) {
                return Err(StoreError::SchemaMismatch(format!("missing column {column:?}")));
            }
        }

        let mut question: Question = serde_json::from_value(Value::Object(record.clone()))
            .map_err(|e| StoreError::SchemaMismatch(e.to_string()))?;
        for column in &self.columns {
            if let Some(slot) = question.text_slot(column) {
                *slot = slot.as_deref().and_then(normalize_cell);
            }
        }

        if question.nr == 0 {
            question.nr = self.next_nr()?;
        } else if self.rows.iter().any(|q| q.nr == question.nr) {
            return Err(StoreError::DuplicateNr(question.nr));
        }

        self.rows.push(question);
        self.rows.sort_by(|a, b| b.nr.cmp(&a.nr));
        Ok(self)
    }
}

/// Question table backed by a CSV file that is read and rewritten whole
#[derive(Debug, Clone)]
pub struct QuestionStore {
    path: PathBuf,
}

impl QuestionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the table sorted by `nr` and renumbers it to run from 1 without
    /// gaps. A `nr` that appears twice is rejected.
    pub fn load(&self) -> Result<Table> {
        let file = File::open(&self.path).map_err(|e| StoreError::unavailable(&self.path, e))?;
        let mut reader = csv::Reader::from_reader(file);

        let columns: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        check_columns(&columns)?;
        let nr_index = columns.iter().position(|c| c == "nr");

        let mut rows = Vec::new();
        for (position, record) in reader.records().enumerate() {
            let record = record?;
            let line = record.position().map_or(0, |p| p.line());

            let nr = match nr_index {
                Some(i) => parse_nr(record.get(i).unwrap_or_default(), line)?,
                None => position as u32,
            };
            let mut question = Question {
                nr,
                ..Question::default()
            };
            for (column, value) in columns.iter().zip(record.iter()) {
                if let Some(slot) = question.text_slot(column) {
                    *slot = normalize_cell(value);
                }
            }
            rows.push((line, question));
        }

        rows.sort_by_key(|(_, q)| q.nr);
        if let Some(pair) = rows.windows(2).find(|pair| pair[0].1.nr == pair[1].1.nr) {
            let (line, question) = &pair[1];
            return Err(StoreError::InvalidRow {
                line: *line,
                reason: format!("nr {} is used more than once", question.nr),
            });
        }
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(i, (_, question))| {
                let nr = u32::try_from(i + 1).map_err(|_| StoreError::NrExhausted)?;
                Ok(Question { nr, ..question })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!("Loaded {} questions from {}", rows.len(), self.path.display());
        Ok(Table { columns, rows })
    }

    /// Overwrites the backing file with the table, sorted by ascending `nr`.
    ///
    /// There is no locking: a concurrent writer that loaded before this call
    /// silently loses its changes (last write wins).
    pub fn persist(&self, table: &Table) -> Result<()> {
        let mut rows: Vec<&Question> = table.rows.iter().collect();
        rows.sort_by_key(|q| q.nr);

        let file = File::create(&self.path).map_err(|e| StoreError::unavailable(&self.path, e))?;
        let mut writer = csv::Writer::from_writer(file);
        writer
            .write_record(&table.columns)
            .map_err(|e| self.write_failure(e))?;
        for question in rows {
            let cells = table
                .columns
                .iter()
                .map(|column| question.field(column).unwrap_or_default());
            writer.write_record(cells).map_err(|e| self.write_failure(e))?;
        }
        writer
            .flush()
            .map_err(|e| StoreError::unavailable(&self.path, e))?;

        tracing::info!("Persisted {} questions to {}", table.rows.len(), self.path.display());
        Ok(())
    }

    fn write_failure(&self, error: csv::Error) -> StoreError {
        if error.is_io_error() {
            StoreError::unavailable(&self.path, io::Error::other(error))
        } else {
            StoreError::Csv(error)
        }
    }
}
