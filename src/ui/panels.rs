use std::path::PathBuf;

use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::DatePickerButton;

use crate::state::{AppState, Tab};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds.clone(),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    // ---- Region ----
    ui.strong("Region");
    let mut region = state.selected_region.clone().unwrap_or_default();
    egui::ComboBox::from_id_salt("region")
        .selected_text(region.as_str())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for r in &dataset.regions {
                ui.selectable_value(&mut region, r.clone(), r.as_str());
            }
        });
    if !region.is_empty() && state.selected_region.as_deref() != Some(region.as_str()) {
        state.select_region(region);
    }
    ui.add_space(6.0);

    // ---- Category ----
    ui.strong("Category");
    let mut category = state.selected_category.clone().unwrap_or_default();
    egui::ComboBox::from_id_salt("category")
        .selected_text(category.as_str())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for c in &dataset.categories {
                ui.selectable_value(&mut category, c.clone(), c.as_str());
            }
        });
    if !category.is_empty() && state.selected_category.as_deref() != Some(category.as_str()) {
        state.select_category(category);
    }
    ui.add_space(6.0);

    // ---- Purchase date range ----
    ui.strong("Purchase date");
    match state.full_range.clone() {
        Ok(full) => {
            let current = state.selected_range.unwrap_or(full);
            let (mut start, mut end) = (current.start, current.end);
            egui::Grid::new("date_range").num_columns(2).show(ui, |ui: &mut Ui| {
                ui.label("From");
                ui.add(DatePickerButton::new(&mut start).id_salt("date_from"));
                ui.end_row();
                ui.label("To");
                ui.add(DatePickerButton::new(&mut end).id_salt("date_to"));
                ui.end_row();
            });
            if start != current.start || end != current.end {
                state.set_date_range(start, end);
            }
            ui.small(format!("Data spans {} to {}", full.start, full.end));
            if ui.small_button("Full range").clicked() {
                state.reset_date_range();
            }
        }
        Err(e) => {
            ui.label(RichText::new(e.to_string()).color(Color32::YELLOW));
        }
    }

    ui.separator();
    ui.label(format!(
        "{} of {} records match",
        state.views.filtered_count,
        dataset.len()
    ));
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar. Returns a file the user asked to open.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) -> Option<PathBuf> {
    let mut picked = None;

    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                picked = pick_file();
                ui.close_menu();
            }
        });

        ui.separator();
        ui.selectable_value(&mut state.tab, Tab::Charts, "Charts");
        ui.selectable_value(&mut state.tab, Tab::Narrative, "Narrative");
        ui.separator();

        if let (Some(ds), Some(name)) = (&state.dataset, &state.source_name) {
            ui.label(format!("{name}: {} records", ds.len()));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });

    picked
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn pick_file() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open sales data")
        .add_filter(
            "Supported files",
            &["xlsx", "xlsm", "xlsb", "xls", "ods", "csv", "parquet", "pq", "json"],
        )
        .add_filter("Spreadsheets", &["xlsx", "xlsm", "xlsb", "xls", "ods"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .pick_file()
}
