//! Dashboard Widget
//! Central scrollable panel showing the correlation heatmap and the weekly
//! popularity chart for the chosen year.

use egui::{Color32, RichText, ScrollArea};

use crate::charts::{ChartData, ChartPlotter};
use crate::gui::DashboardView;

const WARNING_COLOR: Color32 = Color32::from_rgb(255, 193, 7);

/// Scrollable dashboard area fed by the current view.
pub struct Dashboard {
    pub view: Option<DashboardView>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self { view: None }
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the displayed view.
    pub fn set_view(&mut self, view: DashboardView) {
        self.view = Some(view);
    }

    /// Draw the dashboard for the current view.
    pub fn show(&mut self, ui: &mut egui::Ui) {
        let Some(view) = &self.view else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        match view {
            DashboardView::Empty { year } => {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        RichText::new(format!("⚠ No data available for {year}"))
                            .size(18.0)
                            .color(WARNING_COLOR),
                    );
                });
            }
            DashboardView::Ready(data) => {
                ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        Self::draw_year(ui, data);
                    });
            }
        }
    }

    fn draw_year(ui: &mut egui::Ui, data: &ChartData) {
        ui.add_space(5.0);
        ui.label(
            RichText::new("Volleyball searches on Google Trends in Brazil")
                .size(20.0)
                .strong(),
        );
        ui.add_space(10.0);

        if data.series.is_empty() {
            ui.label(
                RichText::new("Select at least one event to draw the charts")
                    .size(14.0)
                    .color(Color32::GRAY),
            );
            return;
        }

        // Correlation section
        ui.label(
            RichText::new(format!("Correlation between searches in {}", data.year))
                .size(16.0)
                .strong(),
        );
        ui.add_space(8.0);

        if data.correlation.has_signal() {
            ChartPlotter::draw_heatmap(ui, &data.correlation);
        } else {
            ui.label(
                RichText::new("Not enough data to draw the correlation chart")
                    .size(13.0)
                    .color(Color32::GRAY),
            );
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // Popularity section
        ui.label(
            RichText::new(format!("Popularity of searches in {}", data.year))
                .size(16.0)
                .strong(),
        );
        ui.add_space(8.0);
        ChartPlotter::draw_line_chart(ui, data);
    }
}
