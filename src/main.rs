//! Análise de Óbitos - Yearly Death-Record Comparison Dashboard
//!
//! A Rust application for comparing yearly death-record totals by disease
//! cause and region, displayed as an interactive bar chart.

mod data;
mod charts;
mod gui;

use eframe::egui;
use gui::ObitosApp;

fn main() -> eframe::Result<()> {
    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 700.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Análise de Óbitos"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Análise de Óbitos",
        options,
        Box::new(|cc| Ok(Box::new(ObitosApp::new(cc)))),
    )
}
