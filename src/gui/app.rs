//! Dashboard Main Application
//! Main window wiring the loader, the aggregator and the chart together.

use crate::charts::ChartData;
use crate::data::{
    comparison_totals, discover_year_files, read_csv, unique_values, DataLoader, Selection,
    ALL_CAUSES, ALL_REGIONS, CAUSE_COL, REGION_COL,
};
use crate::gui::control_panel::UserSettings;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use polars::prelude::*;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::thread;

/// Settings file written next to the executable's working directory
const SETTINGS_FILE: &str = "obitos_dashboard.json";

/// CSV loading result from background thread
enum LoadResult {
    Progress(String),
    Complete {
        tables: Vec<(String, PathBuf, DataFrame)>,
    },
    Error(String),
}

/// Main application window.
pub struct ObitosApp {
    loader: DataLoader,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    /// (year, path) pairs of the active dataset, in year order
    year_files: Vec<(String, PathBuf)>,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl ObitosApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = Self {
            loader: DataLoader::new(),
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
            year_files: Vec::new(),
            load_rx: None,
            is_loading: false,
        };

        app.control_panel.settings = UserSettings::load(Path::new(SETTINGS_FILE));

        // Reopen the last dataset automatically
        if let Some(dir) = app.control_panel.settings.data_dir.clone() {
            if dir.is_dir() {
                app.start_load(dir);
            }
        }

        app
    }

    /// Handle data folder selection
    fn handle_browse_data(&mut self) {
        if self.is_loading {
            return; // Already loading
        }

        if let Some(dir) = rfd::FileDialog::new().pick_folder() {
            self.start_load(dir);
        }
    }

    /// Discover the year files in a data directory and parse the ones
    /// not already cached on a background thread.
    fn start_load(&mut self, dir: PathBuf) {
        let year_files = match discover_year_files(&dir) {
            Ok(files) => files,
            Err(e) => {
                self.control_panel.set_progress(0.0, &format!("Error: {}", e));
                return;
            }
        };

        self.control_panel.settings.data_dir = Some(dir);
        self.year_files = year_files;

        let misses: Vec<(String, PathBuf)> = self
            .year_files
            .iter()
            .filter(|(_, path)| !self.loader.is_cached(path))
            .cloned()
            .collect();

        if misses.is_empty() {
            // Every year table is already cached
            self.finish_load();
            return;
        }

        self.chart_viewer.clear();
        self.control_panel.set_progress(5.0, "Loading CSV files...");
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        // Parse the cache misses in a background thread
        thread::spawn(move || {
            let _ = tx.send(LoadResult::Progress(format!(
                "Reading {} CSV files...",
                misses.len()
            )));

            let results: Vec<_> = misses
                .into_par_iter()
                .map(|(year, path)| read_csv(&path).map(|df| (year, path, df)))
                .collect();

            let mut tables = Vec::with_capacity(results.len());
            for result in results {
                match result {
                    Ok(table) => tables.push(table),
                    Err(e) => {
                        let _ = tx.send(LoadResult::Error(e.to_string()));
                        return;
                    }
                }
            }

            let _ = tx.send(LoadResult::Complete { tables });
        });
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(status) => {
                        self.control_panel.set_progress(20.0, &status);
                    }
                    LoadResult::Complete { tables } => {
                        for (_, path, df) in tables {
                            self.loader.insert(path, df);
                        }
                        self.is_loading = false;
                        should_keep_receiver = false;
                        self.finish_load();
                    }
                    LoadResult::Error(error) => {
                        self.control_panel
                            .set_progress(0.0, &format!("Error: {}", error));
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Populate the filter dropdowns from the reference year's table and
    /// run the first aggregation.
    fn finish_load(&mut self) {
        let Some((_, reference_path)) = self.year_files.first() else {
            return;
        };
        let Some(reference_df) = self.loader.get(reference_path) else {
            return;
        };

        let mut causes = unique_values(reference_df, CAUSE_COL);
        causes.insert(0, ALL_CAUSES.to_string());
        let mut regions = unique_values(reference_df, REGION_COL);
        regions.insert(0, ALL_REGIONS.to_string());

        self.control_panel.update_filters(causes, regions);
        self.control_panel.set_progress(
            100.0,
            &format!("Complete! {} year tables loaded", self.year_files.len()),
        );

        self.run_aggregation();
    }

    /// Re-aggregate the yearly totals for the current selections and hand
    /// the result to the chart viewer. One selection change triggers one
    /// full re-aggregation and re-render.
    fn run_aggregation(&mut self) {
        if self.year_files.is_empty() {
            return;
        }

        let mut tables: Vec<(String, DataFrame)> = Vec::with_capacity(self.year_files.len());
        for (year, path) in &self.year_files {
            match self.loader.load_csv(path) {
                Ok(df) => tables.push((year.clone(), df.clone())),
                Err(e) => {
                    self.control_panel.set_progress(0.0, &format!("Error: {}", e));
                    return;
                }
            }
        }

        let cause = Selection::from_label(&self.control_panel.settings.cause, ALL_CAUSES);
        let region = Selection::from_label(&self.control_panel.settings.region, ALL_REGIONS);

        match comparison_totals(&tables, &cause, &region) {
            Ok(totals) => {
                self.chart_viewer.set_chart_data(ChartData {
                    cause_label: self.control_panel.settings.cause.clone(),
                    totals,
                });
            }
            Err(e) => {
                // Never fabricate a zero total; surface the lookup failure
                self.chart_viewer.clear();
                self.control_panel.set_progress(0.0, &format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for ObitosApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();

        // Request repaint while loading
        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowseData => self.handle_browse_data(),
                        ControlPanelAction::SelectionChanged => self.run_aggregation(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(e) = self
            .control_panel
            .settings
            .save(Path::new(SETTINGS_FILE))
        {
            eprintln!("Failed to save settings: {}", e);
        }
    }
}
