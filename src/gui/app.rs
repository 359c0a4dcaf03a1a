//! Volley Trends Main Application
//! Main window with control panel and dashboard.

use crate::charts::StaticChartRenderer;
use crate::data::TrendDataset;
use crate::gui::{ControlPanel, ControlPanelAction, Dashboard, DashboardView};
use egui::SidePanel;
use tracing::info;

/// Main application window.
pub struct VolleyTrendsApp {
    dataset: TrendDataset,
    control_panel: ControlPanel,
    dashboard: Dashboard,
}

impl VolleyTrendsApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, dataset: TrendDataset) -> Self {
        let years = dataset.years();
        let series = dataset.series_names();

        let mut app = Self {
            control_panel: ControlPanel::new(years, series.clone()),
            dashboard: Dashboard::new(),
            dataset,
        };
        app.control_panel.set_status(&format!(
            "Loaded {} weeks across {} series",
            app.dataset.week_count(),
            series.len()
        ));
        app.rebuild_view();
        app
    }

    /// Recompute the dashboard view from the current year and selection.
    fn rebuild_view(&mut self) {
        let year = self.control_panel.selected_year;
        let selection = self.control_panel.selection();

        match DashboardView::build(&self.dataset, year, &selection) {
            Ok(view) => {
                self.control_panel.export_enabled =
                    matches!(&view, DashboardView::Ready(data) if !data.series.is_empty());
                self.dashboard.set_view(view);
            }
            Err(e) => {
                self.control_panel.export_enabled = false;
                self.control_panel.set_status(&format!("Error: {e}"));
            }
        }
    }

    /// Render the current view to a PNG at a user-chosen location.
    fn handle_export_png(&mut self) {
        let Some(DashboardView::Ready(data)) = &self.dashboard.view else {
            self.control_panel.set_status("No charts to export");
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name(format!("volley_trends_{}.png", data.year))
            .save_file()
        else {
            return; // User cancelled
        };

        match StaticChartRenderer::render_dashboard_to_bytes(data, 1400, 1000) {
            Ok(png_bytes) => match std::fs::write(&path, png_bytes) {
                Ok(()) => {
                    info!(path = %path.display(), "dashboard exported");
                    self.control_panel
                        .set_status(&format!("Exported {}", path.display()));
                    let _ = open::that(&path);
                }
                Err(e) => {
                    self.control_panel.set_status(&format!("Error: {e}"));
                }
            },
            Err(e) => {
                self.control_panel.set_status(&format!("Error: {e}"));
            }
        }
    }
}

impl eframe::App for VolleyTrendsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::SelectionChanged => self.rebuild_view(),
                        ControlPanelAction::ExportPng => self.handle_export_png(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Dashboard
        egui::CentralPanel::default().show(ctx, |ui| {
            self.dashboard.show(ui);
        });
    }
}
