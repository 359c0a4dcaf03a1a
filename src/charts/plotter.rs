//! Chart Plotter Module
//! Creates the interactive dashboard charts using egui_plot.

use crate::stats::CorrelationMatrix;
use chrono::{Datelike, NaiveDate};
use egui::{Align2, Color32, FontId};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

/// Color palette for the plotted series
pub const PALETTE: [Color32; 6] = [
    Color32::from_rgb(231, 76, 60),  // Red
    Color32::from_rgb(46, 204, 113), // Green
    Color32::from_rgb(155, 89, 182), // Purple
    Color32::from_rgb(243, 156, 18), // Orange
    Color32::from_rgb(26, 188, 156), // Teal
    Color32::from_rgb(233, 30, 99),  // Pink
];

/// Days between 0001-01-01 and the unix epoch, for the date axis.
const EPOCH_DAYS: i32 = 719_163;

/// Chart data for a single dashboard year. `values[i]` holds the weekly
/// column for `series[i]`, aligned with `weeks`.
#[derive(Debug, Clone)]
pub struct ChartData {
    pub year: i32,
    pub series: Vec<String>,
    pub weeks: Vec<NaiveDate>,
    pub values: Vec<Vec<i64>>,
    pub correlation: CorrelationMatrix,
}

/// Draws the dashboard visualizations using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Get color for a series by its position in the selection.
    pub fn series_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Week date as an x-axis value (days since the unix epoch).
    pub fn date_to_x(date: NaiveDate) -> f64 {
        (date.num_days_from_ce() - EPOCH_DAYS) as f64
    }

    /// Inverse of [`Self::date_to_x`], for axis labels and hover text.
    pub fn x_to_date(x: f64) -> Option<NaiveDate> {
        NaiveDate::from_num_days_from_ce_opt(x.round() as i32 + EPOCH_DAYS)
    }

    /// Diverging cell color for a correlation coefficient, blue through
    /// white to red over [-1, 1]. NaN cells come out neutral gray.
    pub fn correlation_color(r: f64) -> Color32 {
        if r.is_nan() {
            return Color32::from_gray(70);
        }
        let t = ((r + 1.0) / 2.0).clamp(0.0, 1.0) as f32;
        if t < 0.5 {
            let k = t / 0.5;
            Color32::from_rgb(
                (59.0 + (245.0 - 59.0) * k) as u8,
                (76.0 + (245.0 - 76.0) * k) as u8,
                (192.0 + (245.0 - 192.0) * k) as u8,
            )
        } else {
            let k = (t - 0.5) / 0.5;
            Color32::from_rgb(
                (245.0 - (245.0 - 180.0) * k) as u8,
                (245.0 - (245.0 - 4.0) * k) as u8,
                (245.0 - (245.0 - 38.0) * k) as u8,
            )
        }
    }

    /// Draw the weekly interest lines for every selected series.
    /// X-axis: weeks, Y-axis: search interest (0-100 scale).
    pub fn draw_line_chart(ui: &mut egui::Ui, data: &ChartData) {
        Plot::new(format!("trend_lines_{}", data.year))
            .legend(Legend::default())
            .height(360.0)
            .allow_scroll(false)
            .x_axis_label("Week")
            .y_axis_label("Interest")
            .x_axis_formatter(|mark, _range| {
                Self::x_to_date(mark.value)
                    .map(|date| date.format("%b %d").to_string())
                    .unwrap_or_default()
            })
            .label_formatter(|name, point| {
                let week = Self::x_to_date(point.x)
                    .map(|date| date.format("%Y-%m-%d").to_string())
                    .unwrap_or_default();
                if name.is_empty() {
                    format!("{week}\n{:.0}", point.y)
                } else {
                    format!("{name}\n{week}\n{:.0}", point.y)
                }
            })
            .show(ui, |plot_ui| {
                for (index, (name, column)) in
                    data.series.iter().zip(data.values.iter()).enumerate()
                {
                    let color = Self::series_color(index);
                    let points: Vec<[f64; 2]> = data
                        .weeks
                        .iter()
                        .zip(column.iter())
                        .map(|(&week, &value)| [Self::date_to_x(week), value as f64])
                        .collect();

                    plot_ui.line(
                        Line::new(PlotPoints::from_iter(points.iter().copied()))
                            .color(color)
                            .width(2.0)
                            .name(name),
                    );

                    // Week markers on top of the line
                    plot_ui.points(
                        Points::new(PlotPoints::from_iter(points.iter().copied()))
                            .radius(2.5)
                            .color(color)
                            .name(name),
                    );
                }
            });
    }

    /// Draw the annotated correlation heatmap for the selected series.
    pub fn draw_heatmap(ui: &mut egui::Ui, matrix: &CorrelationMatrix) {
        let n = matrix.size();
        if n == 0 {
            return;
        }

        let cell = 92.0f32;
        let label_w = 120.0f32;
        let label_h = 24.0f32;
        let size = egui::vec2(label_w + cell * n as f32, label_h + cell * n as f32);
        let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
        let painter = ui.painter();
        let origin = rect.min + egui::vec2(label_w, label_h);
        let text_default = ui.visuals().text_color();

        for (index, label) in matrix.labels().iter().enumerate() {
            let offset = index as f32 * cell + cell / 2.0;
            painter.text(
                egui::pos2(origin.x + offset, rect.min.y + label_h / 2.0),
                Align2::CENTER_CENTER,
                label,
                FontId::proportional(12.0),
                text_default,
            );
            painter.text(
                egui::pos2(rect.min.x + label_w - 8.0, origin.y + offset),
                Align2::RIGHT_CENTER,
                label,
                FontId::proportional(12.0),
                text_default,
            );
        }

        for row in 0..n {
            for col in 0..n {
                let r = matrix.get(row, col);
                let cell_rect = egui::Rect::from_min_size(
                    origin + egui::vec2(col as f32 * cell, row as f32 * cell),
                    egui::vec2(cell, cell),
                );
                painter.rect_filled(cell_rect.shrink(1.0), 2.0, Self::correlation_color(r));

                let annotation = if r.is_nan() {
                    "-".to_string()
                } else {
                    format!("{:.2}", r)
                };
                let annotation_color = if !r.is_nan() && r.abs() > 0.6 {
                    Color32::WHITE
                } else {
                    Color32::BLACK
                };
                painter.text(
                    cell_rect.center(),
                    Align2::CENTER_CENTER,
                    annotation,
                    FontId::proportional(13.0),
                    annotation_color,
                );
            }
        }
    }
}
