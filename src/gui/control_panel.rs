//! Control Panel Widget
//! Left side panel with the year picker and event selection.

use egui::{Color32, ComboBox, RichText, ScrollArea};

use crate::data::SeriesAvailability;

/// Left side control panel driving the dashboard filters.
pub struct ControlPanel {
    years: Vec<i32>,
    all_series: Vec<String>,
    pub selected_year: i32,
    offered: Vec<String>,
    checked: Vec<bool>,
    pub export_enabled: bool,
    pub status: String,
}

impl ControlPanel {
    /// Panel over the dataset's years and series. Starts on the earliest
    /// year with every offered event ticked.
    pub fn new(years: Vec<i32>, all_series: Vec<String>) -> Self {
        let selected_year = years.first().copied().unwrap_or_default();
        let offered = SeriesAvailability::offered(selected_year, &all_series);
        let checked = vec![true; offered.len()];
        Self {
            years,
            all_series,
            selected_year,
            offered,
            checked,
            export_enabled: false,
            status: "Ready".to_string(),
        }
    }

    /// Switch to another year. The offered events are re-derived and every
    /// selection starts over with all of them ticked.
    pub fn select_year(&mut self, year: i32) {
        self.selected_year = year;
        self.offered = SeriesAvailability::offered(year, &self.all_series);
        self.checked = vec![true; self.offered.len()];
    }

    /// Events offered for the current year.
    pub fn offered(&self) -> &[String] {
        &self.offered
    }

    /// Currently ticked events, in dataset order.
    pub fn selection(&self) -> Vec<String> {
        self.offered
            .iter()
            .zip(self.checked.iter())
            .filter(|(_, &checked)| checked)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Set status line
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🏐 Volley Trends")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Google Trends search interest in Brazil")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Year Section =====
        ui.label(RichText::new("📅 Year").size(14.0).strong());
        ui.add_space(5.0);

        let mut picked_year: Option<i32> = None;
        ui.horizontal(|ui| {
            ui.add_sized([110.0, 20.0], egui::Label::new("Choose a year:"));
            ComboBox::from_id_salt("year_select")
                .width(150.0)
                .selected_text(self.selected_year.to_string())
                .show_ui(ui, |ui| {
                    for &year in &self.years {
                        if ui
                            .selectable_label(self.selected_year == year, year.to_string())
                            .clicked()
                        {
                            picked_year = Some(year);
                        }
                    }
                });
        });
        if let Some(year) = picked_year {
            if year != self.selected_year {
                self.select_year(year);
                action = ControlPanelAction::SelectionChanged;
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Events Section =====
        ui.label(RichText::new("🏆 Events").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical().max_height(120.0).show(ui, |ui| {
                    for (i, name) in self.offered.iter().enumerate() {
                        if i < self.checked.len()
                            && ui.checkbox(&mut self.checked[i], name).changed()
                        {
                            action = ControlPanelAction::SelectionChanged;
                        }
                    }
                });
            });

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.small_button("Select All").clicked() {
                self.checked.iter_mut().for_each(|v| *v = true);
                action = ControlPanelAction::SelectionChanged;
            }
            if ui.small_button("Clear All").clicked() {
                self.checked.iter_mut().for_each(|v| *v = false);
                action = ControlPanelAction::SelectionChanged;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export Section =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("🖼 Export PNG").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportPng;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        ui.label(RichText::new("ℹ Status").size(14.0).strong());
        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    SelectionChanged,
    ExportPng,
}
