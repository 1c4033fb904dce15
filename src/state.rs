use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

use crate::color::ColorMap;
use crate::config::ChartConfig;
use crate::data::aggregate::{
    AggregateView, HistogramBin, count_by_region, histogram, order_metric_values,
    sum_by_category, sum_by_date,
};
use crate::data::dates::DateRange;
use crate::data::error::EmptyRangeError;
use crate::data::filter::{FilterCriteria, filter_dataset};
use crate::data::model::SalesDataset;
use crate::data::source::{DataSource, DatasetCache};

// ---------------------------------------------------------------------------
// Derived chart data
// ---------------------------------------------------------------------------

/// Everything the charts draw. Recomputed on every selection change.
#[derive(Debug, Clone, Default)]
pub struct DashboardViews {
    pub sales_by_category: AggregateView<String, f64>,
    pub sales_by_date: AggregateView<NaiveDateTime, f64>,
    pub metric_histogram: Vec<HistogramBin>,
    /// Always over the full dataset; the selection does not apply.
    pub orders_by_region: AggregateView<String, usize>,
    pub filtered_count: usize,
}

impl DashboardViews {
    fn clear_filtered(&mut self) {
        self.sales_by_category.clear();
        self.sales_by_date.clear();
        self.metric_histogram.clear();
        self.filtered_count = 0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Charts,
    Narrative,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<Arc<SalesDataset>>,

    /// Where the dataset came from, for the top bar.
    pub source_name: Option<String>,

    pub selected_region: Option<String>,
    pub selected_category: Option<String>,
    pub selected_range: Option<DateRange>,

    /// Span of the valid purchase dates, if there are any.
    pub full_range: Result<DateRange, EmptyRangeError>,

    pub views: DashboardViews,

    pub category_colors: Option<ColorMap>,
    pub region_colors: Option<ColorMap>,

    pub histogram_bins: usize,

    pub tab: Tab,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&ChartConfig::default())
    }
}

impl AppState {
    pub fn new(charts: &ChartConfig) -> Self {
        Self {
            dataset: None,
            source_name: None,
            selected_region: None,
            selected_category: None,
            selected_range: None,
            full_range: Err(EmptyRangeError {
                column: String::new(),
            }),
            views: DashboardViews::default(),
            category_colors: None,
            region_colors: None,
            histogram_bins: charts.histogram_bins.max(1),
            tab: Tab::default(),
            status_message: None,
        }
    }

    /// Pull the dataset from `cache` (loading it on first use) and show it.
    pub fn load_from<S: DataSource>(&mut self, cache: &mut DatasetCache<S>) {
        let name = cache.source().describe();
        match cache.get() {
            Ok(dataset) => self.set_dataset(dataset, name),
            Err(e) => {
                log::error!("Failed to load {name}: {e}");
                self.status_message = Some(format!("Error loading {name}: {e}"));
            }
        }
    }

    /// Ingest a newly loaded dataset, initialise selections and colours.
    ///
    /// Defaults mirror a fresh page: first region, first category, whole span.
    pub fn set_dataset(&mut self, dataset: Arc<SalesDataset>, source_name: String) {
        self.selected_region = dataset.regions.first().cloned();
        self.selected_category = dataset.categories.first().cloned();
        self.full_range = DateRange::spanning(&dataset);
        self.selected_range = self.full_range.as_ref().ok().copied();

        self.status_message = match &self.full_range {
            Ok(_) => None,
            Err(e) => {
                log::warn!("{e}; date-based charts will be empty");
                Some(format!("{e}: date filter and date-based charts unavailable"))
            }
        };

        self.category_colors = Some(ColorMap::new(&dataset.categories));
        self.region_colors = Some(ColorMap::new(&dataset.regions));

        // Filter-invariant: computed once per dataset.
        self.views = DashboardViews {
            orders_by_region: count_by_region(&dataset),
            ..Default::default()
        };

        self.dataset = Some(dataset);
        self.source_name = Some(source_name);
        self.refilter();
    }

    /// The active selection, if every part of it is set.
    pub fn criteria(&self) -> Option<FilterCriteria> {
        Some(FilterCriteria::new(
            self.selected_region.clone()?,
            self.selected_category.clone()?,
            self.selected_range?,
        ))
    }

    /// Recompute the filtered views after a selection change.
    pub fn refilter(&mut self) {
        let Some(dataset) = self.dataset.clone() else {
            return;
        };
        let Some(criteria) = self.criteria() else {
            self.views.clear_filtered();
            return;
        };

        let filtered = filter_dataset(&dataset, &criteria);
        log::debug!(
            "Filter {}/{} {}..={} matched {} of {} records",
            criteria.region,
            criteria.category,
            criteria.date_range.start,
            criteria.date_range.end,
            filtered.len(),
            dataset.len()
        );

        self.views.sales_by_category = sum_by_category(&filtered);
        self.views.sales_by_date = sum_by_date(&filtered);
        self.views.metric_histogram =
            histogram(&order_metric_values(&filtered), self.histogram_bins);
        self.views.filtered_count = filtered.len();
    }

    pub fn select_region(&mut self, region: String) {
        self.selected_region = Some(region);
        self.refilter();
    }

    pub fn select_category(&mut self, category: String) {
        self.selected_category = Some(category);
        self.refilter();
    }

    /// Only meaningful once the dataset has at least one valid date.
    /// Picks outside the data span are clamped to it.
    pub fn set_date_range(&mut self, start: NaiveDate, end: NaiveDate) {
        let Ok(full) = &self.full_range else {
            return;
        };
        self.selected_range = Some(DateRange::new(start, end).clamp_to(full));
        self.refilter();
    }

    pub fn reset_date_range(&mut self) {
        self.selected_range = self.full_range.as_ref().ok().copied();
        self.refilter();
    }
}
