use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use super::model::SalesDataset;

/// Group key → derived value, iterated in ascending key order.
pub type AggregateView<K, V> = BTreeMap<K, V>;

/// Total final price per exact purchase timestamp.
///
/// Records without a timestamp have no group; a missing price adds 0.
pub fn sum_by_date(dataset: &SalesDataset) -> AggregateView<NaiveDateTime, f64> {
    let mut view = AggregateView::new();
    for r in &dataset.records {
        if let Some(ts) = r.purchased_at {
            *view.entry(ts).or_insert(0.0) += r.final_price.unwrap_or(0.0);
        }
    }
    view
}

/// Total final price per category.
pub fn sum_by_category(dataset: &SalesDataset) -> AggregateView<String, f64> {
    let mut view = AggregateView::new();
    for r in &dataset.records {
        if let Some(category) = &r.category {
            *view.entry(category.clone()).or_insert(0.0) += r.final_price.unwrap_or(0.0);
        }
    }
    view
}

/// Number of records per region; records without a region are not counted.
///
/// Callers pass the full dataset: the regional breakdown ignores the active
/// selection.
pub fn count_by_region(dataset: &SalesDataset) -> AggregateView<String, usize> {
    let mut view = AggregateView::new();
    for r in &dataset.records {
        if let Some(region) = &r.region {
            *view.entry(region.clone()).or_insert(0) += 1;
        }
    }
    view
}

// ---------------------------------------------------------------------------
// Histogram of the per-order metric
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Non-missing per-order metric values, in record order.
pub fn order_metric_values(dataset: &SalesDataset) -> Vec<f64> {
    dataset.records.iter().filter_map(|r| r.order_metric).collect()
}

/// Equal-width bins over `[min, max]` of the finite `values`.
///
/// Every bin is half-open except the last, which also holds `max`.
/// A zero-width span collapses to a single bin.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if bins == 0 || finite.is_empty() {
        return Vec::new();
    }

    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    if range <= f64::EPSILON * max.abs().max(1.0) {
        return vec![HistogramBin {
            start: min,
            end: max,
            count: finite.len(),
        }];
    }

    let width = range / bins as f64;
    let mut counts = vec![0usize; bins];
    for v in &finite {
        let bin = (((v - min) / width) as usize).min(bins - 1);
        counts[bin] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: min + width * i as f64,
            end: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dates::DateRange;
    use crate::data::filter::{FilterCriteria, filter_dataset};
    use crate::data::model::SalesRecord;
    use crate::data::schema::ColumnMapping;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(0, 0, 0).unwrap()
    }

    fn record(region: &str, category: &str, ts: NaiveDateTime, price: f64) -> SalesRecord {
        SalesRecord {
            region: Some(region.into()),
            category: Some(category.into()),
            purchased_at: Some(ts),
            final_price: Some(price),
            order_metric: Some(price),
        }
    }

    fn sample() -> SalesDataset {
        SalesDataset::from_records(
            vec![
                record("North", "A", midnight(2024, 1, 1), 10.0),
                record("North", "B", midnight(2024, 1, 2), 20.0),
                record("South", "A", midnight(2024, 1, 1), 5.0),
            ],
            ColumnMapping::default(),
        )
    }

    #[test]
    fn worked_example_aggregates() {
        let ds = sample();
        let criteria = FilterCriteria::new(
            "North",
            "A",
            DateRange::new(date(2024, 1, 1), date(2024, 1, 31)),
        );
        let filtered = filter_dataset(&ds, &criteria);

        let by_date = sum_by_date(&filtered);
        assert_eq!(
            by_date.into_iter().collect::<Vec<_>>(),
            vec![(midnight(2024, 1, 1), 10.0)]
        );

        let by_region = count_by_region(&ds);
        assert_eq!(
            by_region.into_iter().collect::<Vec<_>>(),
            vec![("North".to_string(), 2), ("South".to_string(), 1)]
        );
    }

    #[test]
    fn sum_by_date_keys_on_exact_timestamp_ascending() {
        let morning = date(2024, 1, 1).and_hms_opt(9, 0, 0).unwrap();
        let evening = date(2024, 1, 1).and_hms_opt(18, 0, 0).unwrap();
        let ds = SalesDataset::from_records(
            vec![
                record("North", "A", evening, 4.0),
                record("North", "A", morning, 1.0),
                record("North", "A", morning, 2.0),
                SalesRecord {
                    final_price: None,
                    ..record("North", "A", midnight(2023, 12, 31), 0.0)
                },
                SalesRecord {
                    purchased_at: None,
                    ..record("North", "A", morning, 100.0)
                },
            ],
            ColumnMapping::default(),
        );
        let view: Vec<_> = sum_by_date(&ds).into_iter().collect();
        assert_eq!(
            view,
            vec![(midnight(2023, 12, 31), 0.0), (morning, 3.0), (evening, 4.0)]
        );
    }

    #[test]
    fn count_by_region_drops_missing_regions() {
        let mut records = sample().records;
        records.push(SalesRecord::default());
        let ds = SalesDataset::from_records(records, ColumnMapping::default());
        assert_eq!(count_by_region(&ds).values().sum::<usize>(), 3);
    }

    #[test]
    fn sum_by_category_totals_prices() {
        let view = sum_by_category(&sample());
        assert_eq!(view.get("A"), Some(&15.0));
        assert_eq!(view.get("B"), Some(&20.0));
    }

    #[test]
    fn empty_input_gives_empty_views() {
        let empty = SalesDataset::default();
        assert!(sum_by_date(&empty).is_empty());
        assert!(sum_by_category(&empty).is_empty());
        assert!(count_by_region(&empty).is_empty());
        assert!(histogram(&order_metric_values(&empty), 20).is_empty());
    }

    #[test]
    fn histogram_equal_width_with_closed_last_bin() {
        let bins = histogram(&[0.0, 1.0, 2.5, 5.0, 9.99, 10.0], 4);
        assert_eq!(bins.len(), 4);
        assert_eq!(bins.iter().map(|b| b.count).collect::<Vec<_>>(), vec![2, 1, 1, 2]);
        assert_eq!(bins[0].start, 0.0);
        assert_eq!(bins[3].end, 10.0);
        assert_eq!(bins[1].width(), 2.5);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 6);
    }

    #[test]
    fn histogram_degenerate_inputs() {
        let single = histogram(&[3.0, 3.0, f64::NAN], 20);
        assert_eq!(single, vec![HistogramBin { start: 3.0, end: 3.0, count: 2 }]);
        assert!(histogram(&[1.0, 2.0], 0).is_empty());
    }
}
