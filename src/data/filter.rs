use super::dates::DateRange;
use super::model::{SalesDataset, SalesRecord};

// ---------------------------------------------------------------------------
// Filter predicate: region AND category AND date range
// ---------------------------------------------------------------------------

/// The active selection. Built fresh for every interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub region: String,
    pub category: String,
    pub date_range: DateRange,
}

impl FilterCriteria {
    pub fn new(
        region: impl Into<String>,
        category: impl Into<String>,
        date_range: DateRange,
    ) -> Self {
        Self {
            region: region.into(),
            category: category.into(),
            date_range,
        }
    }

    /// A record passes when all of these hold:
    /// * region equals the selected region (case-sensitive)
    /// * category equals the selected category (case-sensitive)
    /// * the calendar date of its purchase timestamp lies in the range
    ///
    /// A missing field never matches.
    pub fn matches(&self, record: &SalesRecord) -> bool {
        record.region.as_deref() == Some(self.region.as_str())
            && record.category.as_deref() == Some(self.category.as_str())
            && record
                .purchased_at
                .is_some_and(|dt| self.date_range.contains(dt.date()))
    }
}

/// Indices of records that pass `criteria`, in dataset order.
pub fn filtered_indices(dataset: &SalesDataset, criteria: &FilterCriteria) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| criteria.matches(r))
        .map(|(i, _)| i)
        .collect()
}

/// The matching records as their own dataset. Empty when nothing matches.
pub fn filter_dataset(dataset: &SalesDataset, criteria: &FilterCriteria) -> SalesDataset {
    dataset.subset(&filtered_indices(dataset, criteria))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::ColumnMapping;
    use chrono::{NaiveDate, NaiveDateTime};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32) -> Option<NaiveDateTime> {
        date(y, m, d).and_hms_opt(12, 0, 0)
    }

    fn record(
        region: &str,
        category: &str,
        purchased_at: Option<NaiveDateTime>,
        price: f64,
    ) -> SalesRecord {
        SalesRecord {
            region: Some(region.into()),
            category: Some(category.into()),
            purchased_at,
            final_price: Some(price),
            order_metric: Some(price / 2.0),
        }
    }

    fn sample() -> SalesDataset {
        SalesDataset::from_records(
            vec![
                record("North", "A", at(2024, 1, 1), 10.0),
                record("North", "B", at(2024, 1, 2), 20.0),
                record("South", "A", at(2024, 1, 1), 5.0),
            ],
            ColumnMapping::default(),
        )
    }

    fn january() -> DateRange {
        DateRange::new(date(2024, 1, 1), date(2024, 1, 31))
    }

    #[test]
    fn worked_example_matches_only_first_record() {
        let ds = sample();
        let criteria = FilterCriteria::new("North", "A", january());
        assert_eq!(filtered_indices(&ds, &criteria), vec![0]);

        let filtered = filter_dataset(&ds, &criteria);
        assert_eq!(filtered.records, vec![ds.records[0].clone()]);
    }

    #[test]
    fn result_is_subset_satisfying_every_predicate() {
        let mut records = sample().records;
        records.push(record("North", "A", at(2024, 2, 10), 1.0));
        records.push(record("north", "A", at(2024, 1, 3), 1.0));
        records.push(record("North", "A", at(2024, 1, 31), 2.0));
        let ds = SalesDataset::from_records(records, ColumnMapping::default());

        for (region, category) in [("North", "A"), ("North", "B"), ("South", "A"), ("East", "A")] {
            let criteria = FilterCriteria::new(region, category, january());
            let filtered = filter_dataset(&ds, &criteria);
            assert!(filtered.len() <= ds.len());
            for r in &filtered.records {
                assert!(ds.records.contains(r));
                assert_eq!(r.region.as_deref(), Some(region));
                assert_eq!(r.category.as_deref(), Some(category));
                assert!(january().contains(r.purchased_at.unwrap().date()));
            }
        }

        // Both ends inclusive; region match is case-sensitive.
        let criteria = FilterCriteria::new("North", "A", january());
        assert_eq!(filtered_indices(&ds, &criteria), vec![0, 5]);
    }

    #[test]
    fn wider_range_than_data_span_changes_nothing() {
        let ds = sample();
        let span = DateRange::spanning(&ds).unwrap();
        let wide = DateRange::new(date(1990, 1, 1), date(2100, 12, 31));
        for (region, category) in [("North", "A"), ("North", "B"), ("South", "A")] {
            assert_eq!(
                filtered_indices(&ds, &FilterCriteria::new(region, category, span)),
                filtered_indices(&ds, &FilterCriteria::new(region, category, wide)),
            );
        }
    }

    #[test]
    fn missing_dates_never_match() {
        let ds = SalesDataset::from_records(
            vec![
                record("North", "A", None, 10.0),
                record("North", "A", at(2024, 1, 5), 10.0),
            ],
            ColumnMapping::default(),
        );
        let everything = DateRange::new(NaiveDate::MIN, NaiveDate::MAX);
        let criteria = FilterCriteria::new("North", "A", everything);
        assert_eq!(filtered_indices(&ds, &criteria), vec![1]);
    }

    #[test]
    fn missing_region_or_category_never_match() {
        let mut r = record("North", "A", at(2024, 1, 5), 1.0);
        r.region = None;
        let criteria = FilterCriteria::new("North", "A", january());
        assert!(!criteria.matches(&r));

        let mut r = record("North", "A", at(2024, 1, 5), 1.0);
        r.category = None;
        assert!(!criteria.matches(&r));
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let ds = sample();
        let criteria = FilterCriteria::new("South", "B", january());
        let filtered = filter_dataset(&ds, &criteria);
        assert!(filtered.is_empty());
        assert!(filtered.regions.is_empty());
    }
}
