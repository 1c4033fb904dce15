use std::path::PathBuf;

use eframe::egui;

use crate::config::AppConfig;
use crate::data::schema::ColumnMapping;
use crate::data::source::{DatasetCache, FileSource};
use crate::state::{AppState, Tab};
use crate::ui::{charts, narrative, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SalesDashboardApp {
    pub state: AppState,
    /// Explicit layout from config/CLI; `None` means detect per file.
    columns: Option<ColumnMapping>,
    /// One cache per opened file; replaced when another file is opened.
    cache: Option<DatasetCache<FileSource>>,
}

impl SalesDashboardApp {
    pub fn new(config: &AppConfig) -> Self {
        let mut app = Self {
            state: AppState::new(&config.charts),
            columns: config.columns.clone(),
            cache: None,
        };
        if let Some(path) = &config.data_file {
            app.open(path.clone());
        }
        app
    }

    pub fn open(&mut self, path: PathBuf) {
        log::info!("Opening {}", path.display());
        let cache = self
            .cache
            .insert(DatasetCache::new(FileSource::new(path, self.columns.clone())));
        self.state.load_from(cache);
    }
}

impl eframe::App for SalesDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        let mut picked = None;
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            picked = panels::top_bar(ui, &mut self.state);
        });
        if let Some(path) = picked {
            self.open(path);
        }

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts or narrative ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.tab {
            Tab::Charts => charts::charts_tab(ui, &self.state),
            Tab::Narrative => narrative::narrative_tab(ui),
        });
    }
}
