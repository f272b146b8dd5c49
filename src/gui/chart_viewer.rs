//! Chart Viewer Widget
//! Central panel displaying the yearly comparison chart.

use crate::charts::{ChartData, ChartPlotter};
use egui::RichText;

/// Central chart display area.
pub struct ChartViewer {
    /// Current comparison chart, if an aggregation has run
    pub chart_data: Option<ChartData>,
}

impl Default for ChartViewer {
    fn default() -> Self {
        Self { chart_data: None }
    }
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the chart
    pub fn clear(&mut self) {
        self.chart_data = None;
    }

    /// Set the chart to display
    pub fn set_chart_data(&mut self, chart_data: ChartData) {
        self.chart_data = Some(chart_data);
    }

    /// Draw the chart viewer
    pub fn show(&mut self, ui: &mut egui::Ui) {
        let Some(chart_data) = &self.chart_data else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        egui::Frame::none()
            .rounding(8.0)
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ChartPlotter::draw_comparison_chart(ui, chart_data);
            });
    }
}
