use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::error::EmptyRangeError;
use super::model::{CellValue, SalesDataset};

// ---------------------------------------------------------------------------
// Best-effort datetime coercion
// ---------------------------------------------------------------------------

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

// Ambiguous slash dates read month-first; day-first only when that fails.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y"];

/// Interpret a cell as a datetime, or `None` if it isn't one.
///
/// Never fails: anything unrecognised (including plain numbers) is missing.
pub fn coerce_datetime(cell: &CellValue) -> Option<NaiveDateTime> {
    match cell {
        CellValue::DateTime(dt) => Some(*dt),
        CellValue::String(s) => parse_datetime_str(s),
        _ => None,
    }
}

/// Parse a date or datetime string; formats are tried in order.
pub fn parse_datetime_str(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

// ---------------------------------------------------------------------------
// DateRange – inclusive calendar-date interval
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Inclusive range; bounds are swapped if given in reverse.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Smallest range covering every non-null purchase date in `dataset`.
    pub fn spanning(dataset: &SalesDataset) -> Result<Self, EmptyRangeError> {
        let mut dates = dataset
            .records
            .iter()
            .filter_map(|r| r.purchased_at.map(|dt| dt.date()));

        let first = dates.next().ok_or_else(|| EmptyRangeError {
            column: dataset.columns.timestamp.clone(),
        })?;
        let (start, end) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Ok(Self { start, end })
    }

    /// Clamp both bounds into `outer`.
    pub fn clamp_to(&self, outer: &DateRange) -> Self {
        Self::new(
            self.start.clamp(outer.start, outer.end),
            self.end.clamp(outer.start, outer.end),
        )
    }
}
