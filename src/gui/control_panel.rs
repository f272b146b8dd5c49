//! Control Panel Widget
//! Left side panel with the data-source picker and the cause/region filters.

use anyhow::Context;
use egui::{Color32, ComboBox, RichText};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// User settings, persisted between runs
#[derive(Default, Clone, Serialize, Deserialize)]
pub struct UserSettings {
    pub data_dir: Option<PathBuf>,
    pub cause: String,
    pub region: String,
}

impl UserSettings {
    /// Load settings from a JSON file, falling back to defaults when the
    /// file does not exist or cannot be parsed.
    pub fn load(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|contents| serde_json::from_str(&contents).ok())
            .unwrap_or_default()
    }

    /// Save settings to a JSON file.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write settings to {}", path.display()))
    }
}

/// Left side control panel with data-source selection and filter controls.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub causes: Vec<String>,
    pub regions: Vec<String>,
    pub progress: f32,
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            settings: UserSettings::default(),
            causes: Vec::new(),
            regions: Vec::new(),
            progress: 0.0,
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the filter dropdowns after a dataset load. The sentinel
    /// entries come first and are the default selection.
    pub fn update_filters(&mut self, causes: Vec<String>, regions: Vec<String>) {
        self.causes = causes;
        self.regions = regions;

        if !self.causes.contains(&self.settings.cause) {
            self.settings.cause = self.causes.first().cloned().unwrap_or_default();
        }
        if !self.regions.contains(&self.settings.region) {
            self.settings.region = self.regions.first().cloned().unwrap_or_default();
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 Análise de Óbitos")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Comparativo anual por doença e estado")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let dir_text = self
                        .settings
                        .data_dir
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No folder selected".to_string());

                    ui.label(RichText::new(&dir_text).size(12.0).color(
                        if self.settings.data_dir.is_some() {
                            Color32::WHITE
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseData;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Filters Section =====
        ui.label(RichText::new("🔎 Filters").size(14.0).strong());
        ui.add_space(8.0);

        let label_width = 80.0;
        let combo_width = 190.0;

        // Cause filter - aligned
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Doença:"));
            ComboBox::from_id_salt("cause_filter")
                .width(combo_width)
                .selected_text(&self.settings.cause)
                .show_ui(ui, |ui| {
                    for cause in &self.causes {
                        if ui
                            .selectable_label(self.settings.cause == *cause, cause)
                            .clicked()
                        {
                            self.settings.cause = cause.clone();
                            action = ControlPanelAction::SelectionChanged;
                        }
                    }
                });
        });

        ui.add_space(5.0);

        // Region filter - aligned
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Estado:"));
            ComboBox::from_id_salt("region_filter")
                .width(combo_width)
                .selected_text(&self.settings.region)
                .show_ui(ui, |ui| {
                    for region in &self.regions {
                        if ui
                            .selectable_label(self.settings.region == *region, region)
                            .clicked()
                        {
                            self.settings.region = region.clone();
                            action = ControlPanelAction::SelectionChanged;
                        }
                    }
                });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Progress Section =====
        ui.label(RichText::new("📊 Progress").size(14.0).strong());
        ui.add_space(5.0);

        ui.add(
            egui::ProgressBar::new(self.progress / 100.0)
                .show_percentage()
                .animate(self.progress > 0.0 && self.progress < 100.0),
        );

        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Complete") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set progress and status
    pub fn set_progress(&mut self, progress: f32, status: &str) {
        self.progress = progress;
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseData,
    SelectionChanged,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_json_round_trip() {
        let path = std::env::temp_dir().join(format!("obitos_settings_{}.json", std::process::id()));
        let settings = UserSettings {
            data_dir: Some(PathBuf::from("/tmp/dados")),
            cause: "TODAS DOENÇAS".to_string(),
            region: "SP".to_string(),
        };
        settings.save(&path).unwrap();

        let loaded = UserSettings::load(&path);
        assert_eq!(loaded.data_dir, settings.data_dir);
        assert_eq!(loaded.cause, settings.cause);
        assert_eq!(loaded.region, settings.region);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn load_missing_settings_falls_back_to_defaults() {
        let loaded = UserSettings::load(Path::new("/nonexistent/settings.json"));
        assert!(loaded.data_dir.is_none());
        assert!(loaded.cause.is_empty());
    }

    #[test]
    fn update_filters_resets_stale_selections() {
        let mut panel = ControlPanel::new();
        panel.settings.cause = "GONE".to_string();
        panel.settings.region = "SP".to_string();

        panel.update_filters(
            vec!["TODAS DOENÇAS".to_string(), "COVID".to_string()],
            vec!["BRASIL".to_string(), "SP".to_string()],
        );

        assert_eq!(panel.settings.cause, "TODAS DOENÇAS");
        assert_eq!(panel.settings.region, "SP");
    }
}
