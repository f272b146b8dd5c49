//! Chart Plotter Module
//! Creates the yearly comparison bar chart using egui_plot.

use crate::data::YearlyTotal;
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Plot};

/// Bar fill color
pub const BAR_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue

/// Data for one rendered comparison chart.
#[derive(Clone)]
pub struct ChartData {
    pub cause_label: String,
    pub totals: Vec<YearlyTotal>,
}

/// Creates the comparison visualization using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Chart title interpolating the active cause label.
    pub fn comparison_title(cause_label: &str) -> String {
        format!("Total de óbitos por {}", cause_label)
    }

    /// Draw the yearly comparison bar chart.
    /// X-axis: years, Y-axis: total deaths.
    pub fn draw_comparison_chart(ui: &mut egui::Ui, chart_data: &ChartData) {
        ui.label(
            RichText::new(Self::comparison_title(&chart_data.cause_label))
                .size(18.0)
                .strong(),
        );
        ui.add_space(8.0);

        // Custom x-axis labels
        let x_labels: Vec<String> = chart_data
            .totals
            .iter()
            .map(|t| t.year.clone())
            .collect();

        let bars: Vec<Bar> = chart_data
            .totals
            .iter()
            .enumerate()
            .map(|(i, t)| {
                Bar::new(i as f64, t.total as f64)
                    .width(0.6)
                    .name(&t.year)
                    .fill(BAR_COLOR)
            })
            .collect();

        Plot::new("comparison_chart")
            .height(420.0)
            .allow_scroll(false)
            .x_axis_label("Ano")
            .y_axis_label("Total")
            .include_y(0.0)
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if (mark.value - idx as f64).abs() < 1e-6 && idx < x_labels.len() {
                    x_labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                // An empty result renders an empty plot, no bars
                plot_ui.bar_chart(BarChart::new(bars).color(BAR_COLOR));
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_interpolates_cause_label() {
        assert_eq!(
            ChartPlotter::comparison_title("TODAS DOENÇAS"),
            "Total de óbitos por TODAS DOENÇAS"
        );
        assert_eq!(
            ChartPlotter::comparison_title("COVID"),
            "Total de óbitos por COVID"
        );
    }
}
