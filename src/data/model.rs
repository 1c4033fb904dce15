use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDateTime;

use super::dates::coerce_datetime;
use super::error::LoadError;
use super::schema::{ColumnMapping, normalize_headers};

// ---------------------------------------------------------------------------
// CellValue – a single cell of the source sheet
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring what spreadsheet/CSV/parquet readers
/// hand back before any column is given a meaning.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::DateTime(d) => write!(f, "{d}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Numeric view of the cell. Text is parsed leniently (`" 12.5 "` → 12.5);
    /// non-finite results count as missing.
    pub fn as_f64(&self) -> Option<f64> {
        let v = match self {
            CellValue::Float(v) => *v,
            CellValue::Integer(i) => *i as f64,
            CellValue::String(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        v.is_finite().then_some(v)
    }

    /// Label view of the cell, used for group keys. Blank text is missing.
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::String(s) if s.trim().is_empty() => None,
            CellValue::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// Table – raw rows with normalized headers
// ---------------------------------------------------------------------------

/// The first sheet of a source file, read completely into memory.
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Normalized column names.
    pub headers: Vec<String>,
    /// Row-major cells; rows shorter than `headers` are treated as null-padded.
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Build a table, normalizing the raw header row.
    pub fn new(raw_headers: &[String], rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            headers: normalize_headers(raw_headers),
            rows,
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&CellValue::Null)
    }

    /// Rewrite `name` in place so every cell is either `DateTime` or `Null`.
    ///
    /// Returns how many non-null cells could not be parsed and were nulled.
    pub fn coerce_datetime_column(&mut self, name: &str) -> Result<usize, LoadError> {
        let col = self
            .column_index(name)
            .ok_or_else(|| LoadError::MissingColumns {
                missing: vec![name.to_string()],
            })?;

        let mut failed = 0;
        for row in &mut self.rows {
            let Some(cell) = row.get_mut(col) else {
                continue;
            };
            let coerced = match coerce_datetime(cell) {
                Some(dt) => CellValue::DateTime(dt),
                None => {
                    if !cell.is_null() {
                        failed += 1;
                    }
                    CellValue::Null
                }
            };
            *cell = coerced;
        }

        if failed > 0 {
            log::warn!(
                "{failed} value(s) in '{name}' could not be parsed as dates; treated as missing"
            );
        }
        Ok(failed)
    }
}

// ---------------------------------------------------------------------------
// SalesRecord – one order row with its logical fields resolved
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SalesRecord {
    pub region: Option<String>,
    pub category: Option<String>,
    /// `None` when the source value was missing or unparseable.
    pub purchased_at: Option<NaiveDateTime>,
    pub final_price: Option<f64>,
    /// Per-order metric (average ticket or average price per order).
    pub order_metric: Option<f64>,
}

// ---------------------------------------------------------------------------
// SalesDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// All records plus the selector options derived from them.
#[derive(Debug, Clone, Default)]
pub struct SalesDataset {
    pub records: Vec<SalesRecord>,
    /// Mapping the records were resolved with.
    pub columns: ColumnMapping,
    /// Sorted distinct non-null regions.
    pub regions: BTreeSet<String>,
    /// Sorted distinct non-null categories.
    pub categories: BTreeSet<String>,
}

impl SalesDataset {
    /// Resolve `mapping` against `table`, coercing the timestamp column.
    pub fn from_table(mut table: Table, mapping: &ColumnMapping) -> Result<Self, LoadError> {
        let mapping = mapping.normalized();
        let missing = mapping.missing_columns(&table.headers);
        if !missing.is_empty() {
            return Err(LoadError::MissingColumns { missing });
        }

        table.coerce_datetime_column(&mapping.timestamp)?;

        // missing_columns() was empty, so every lookup below succeeds.
        let idx = |name: &str| table.column_index(name).unwrap_or(usize::MAX);
        let (region, category, timestamp, price, metric) = (
            idx(&mapping.region),
            idx(&mapping.category),
            idx(&mapping.timestamp),
            idx(&mapping.price),
            idx(&mapping.order_metric),
        );

        let records = (0..table.rows.len())
            .map(|row| SalesRecord {
                region: table.cell(row, region).as_text(),
                category: table.cell(row, category).as_text(),
                purchased_at: match table.cell(row, timestamp) {
                    CellValue::DateTime(dt) => Some(*dt),
                    _ => None,
                },
                final_price: table.cell(row, price).as_f64(),
                order_metric: table.cell(row, metric).as_f64(),
            })
            .collect();

        Ok(Self::from_records(records, mapping))
    }

    /// Build a dataset from already-typed records.
    pub fn from_records(records: Vec<SalesRecord>, columns: ColumnMapping) -> Self {
        let regions = records.iter().filter_map(|r| r.region.clone()).collect();
        let categories = records.iter().filter_map(|r| r.category.clone()).collect();
        SalesDataset {
            records,
            columns,
            regions,
            categories,
        }
    }

    /// Dataset holding only the records at `indices` (in that order).
    pub fn subset(&self, indices: &[usize]) -> Self {
        let records = indices
            .iter()
            .filter_map(|&i| self.records.get(i).cloned())
            .collect();
        Self::from_records(records, self.columns.clone())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
