use std::ops::RangeInclusive;

use chrono::DateTime;
use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoint, PlotPoints};

use crate::state::AppState;

const EMPTY_SELECTION: &str = "No data for the current selection";

// ---------------------------------------------------------------------------
// Charts tab (central panel)
// ---------------------------------------------------------------------------

/// Render the four charts in a 2×2 grid.
pub fn charts_tab(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view the dashboard  (File → Open…)");
        });
        return;
    }

    let height = (ui.available_height() / 2.0 - 40.0).max(140.0);

    ui.columns(2, |cols| {
        sales_by_category(&mut cols[0], state, height);
        sales_over_time(&mut cols[1], state, height);
    });
    ui.add_space(8.0);
    ui.columns(2, |cols| {
        metric_histogram(&mut cols[0], state, height);
        orders_by_region(&mut cols[1], state, height);
    });
}

fn sales_by_category(ui: &mut Ui, state: &AppState, height: f32) {
    ui.strong("Sales by category");
    let view = &state.views.sales_by_category;
    if view.is_empty() {
        ui.label(EMPTY_SELECTION);
        return;
    }

    let labels: Vec<String> = view.keys().cloned().collect();
    let bars = view
        .iter()
        .enumerate()
        .map(|(i, (category, total))| {
            let color = state
                .category_colors
                .as_ref()
                .map(|cm| cm.color_for(category))
                .unwrap_or(Color32::LIGHT_BLUE);
            Bar::new(i as f64, *total).name(category).fill(color)
        })
        .collect();

    Plot::new("sales_by_category")
        .height(height)
        .y_axis_label("precio_final")
        .x_axis_formatter(category_axis(labels))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).width(0.6));
        });
}

fn sales_over_time(ui: &mut Ui, state: &AppState, height: f32) {
    ui.strong("Sales over time");
    let view = &state.views.sales_by_date;
    if view.is_empty() {
        ui.label(EMPTY_SELECTION);
        return;
    }

    let points: PlotPoints = view
        .iter()
        .map(|(ts, total)| [ts.and_utc().timestamp() as f64, *total])
        .collect();

    Plot::new("sales_over_time")
        .height(height)
        .y_axis_label("precio_final")
        .x_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| format_day(mark.value))
        .label_formatter(|_name: &str, point: &PlotPoint| {
            format!("{}\n{:.2}", format_timestamp(point.x), point.y)
        })
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).name("precio_final").width(1.5));
        });
}

fn metric_histogram(ui: &mut Ui, state: &AppState, height: f32) {
    ui.strong("Per-order metric distribution");
    let bins = &state.views.metric_histogram;
    if bins.is_empty() {
        ui.label(EMPTY_SELECTION);
        return;
    }

    let bars = bins
        .iter()
        .map(|bin| {
            let width = if bin.width() > 0.0 { bin.width() } else { 1.0 };
            Bar::new(bin.center(), bin.count as f64)
                .width(width)
                .name(format!("{:.2} to {:.2}", bin.start, bin.end))
        })
        .collect();

    let metric = state
        .dataset
        .as_ref()
        .map(|ds| ds.columns.order_metric.clone())
        .unwrap_or_default();

    Plot::new("metric_histogram")
        .height(height)
        .x_axis_label(metric)
        .y_axis_label("count")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(Color32::from_rgb(99, 110, 250)));
        });
}

fn orders_by_region(ui: &mut Ui, state: &AppState, height: f32) {
    ui.strong("Orders by region (all data)");
    let view = &state.views.orders_by_region;
    if view.is_empty() {
        ui.label("No regions in this dataset");
        return;
    }

    let labels: Vec<String> = view.keys().cloned().collect();
    let bars = view
        .iter()
        .enumerate()
        .map(|(i, (region, count))| {
            let color = state
                .region_colors
                .as_ref()
                .map(|cm| cm.color_for(region))
                .unwrap_or(Color32::LIGHT_BLUE);
            Bar::new(i as f64, *count as f64).name(region).fill(color)
        })
        .collect();

    Plot::new("orders_by_region")
        .height(height)
        .y_axis_label("orders")
        .x_axis_formatter(category_axis(labels))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).width(0.6));
        });
}

// ---------------------------------------------------------------------------
// Axis helpers
// ---------------------------------------------------------------------------

/// Label integer grid marks with the key at that index; blank elsewhere.
fn category_axis(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let i = mark.value.round();
        if (mark.value - i).abs() > 1e-6 || i < 0.0 {
            return String::new();
        }
        labels.get(i as usize).cloned().unwrap_or_default()
    }
}

fn format_day(secs: f64) -> String {
    DateTime::from_timestamp(secs as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn format_timestamp(secs: f64) -> String {
    DateTime::from_timestamp(secs.round() as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}
