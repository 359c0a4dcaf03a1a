//! Static Chart Renderer
//! Renders the dashboard to a PNG for export.
//!
//! Layout:
//! 1. Top: annotated correlation heatmap (or the insufficient-data notice)
//! 2. Bottom: weekly interest lines with markers, legend and rotated
//!    date labels

use crate::charts::ChartData;
use crate::stats::CorrelationMatrix;
use chrono::NaiveDate;
use image::{ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::io::Cursor;
use thiserror::Error;

/// Line colors matching the interactive palette
const LINE_COLORS: [RGBColor; 6] = [
    RGBColor(231, 76, 60),  // Red
    RGBColor(46, 204, 113), // Green
    RGBColor(155, 89, 182), // Purple
    RGBColor(243, 156, 18), // Orange
    RGBColor(26, 188, 156), // Teal
    RGBColor(233, 30, 99),  // Pink
];

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Chart drawing error: {0}")]
    Draw(String),
    #[error("Image encoding error: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Rendered buffer has unexpected size")]
    BufferSize,
    #[error("Nothing to render")]
    EmptyChart,
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render the heatmap and the weekly lines into one PNG image.
    pub fn render_dashboard_to_bytes(
        data: &ChartData,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, RenderError> {
        if data.series.is_empty() || data.weeks.is_empty() {
            return Err(RenderError::EmptyChart);
        }

        let mut buffer = vec![0u8; (width * height * 3) as usize];
        {
            let root =
                BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE)
                .map_err(|e| RenderError::Draw(e.to_string()))?;

            let (top, bottom) = root.split_vertically(height * 2 / 5);
            if data.correlation.has_signal() {
                Self::draw_heatmap(&top, data.year, &data.correlation)?;
            } else {
                Self::draw_gate_notice(&top, data.year)?;
            }
            Self::draw_lines(&bottom, data)?;

            root.present()
                .map_err(|e| RenderError::Draw(e.to_string()))?;
        }

        let img = RgbImage::from_raw(width, height, buffer).ok_or(RenderError::BufferSize)?;
        let mut png = Cursor::new(Vec::new());
        img.write_to(&mut png, ImageFormat::Png)?;
        Ok(png.into_inner())
    }

    /// Annotated heatmap with the series names on both axes.
    fn draw_heatmap(
        area: &DrawingArea<BitMapBackend, Shift>,
        year: i32,
        matrix: &CorrelationMatrix,
    ) -> Result<(), RenderError> {
        let n = matrix.size();
        let labels = matrix.labels();

        let mut chart = ChartBuilder::on(area)
            .caption(
                format!("Correlation between searches in {year}"),
                ("sans-serif", 22),
            )
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(110)
            .build_cartesian_2d((0..n).into_segmented(), (0..n).into_segmented())
            .map_err(|e| RenderError::Draw(e.to_string()))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_label_formatter(&|seg| match seg {
                SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
                _ => String::new(),
            })
            .y_label_formatter(&|seg| match seg {
                // Row 0 sits at the top, so the y axis reads flipped
                SegmentValue::CenterOf(i) => n
                    .checked_sub(i + 1)
                    .and_then(|row| labels.get(row))
                    .cloned()
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .label_style(("sans-serif", 13))
            .draw()
            .map_err(|e| RenderError::Draw(e.to_string()))?;

        for row in 0..n {
            for col in 0..n {
                let r = matrix.get(row, col);
                let y = n - 1 - row;

                chart
                    .draw_series(std::iter::once(Rectangle::new(
                        [
                            (SegmentValue::Exact(col), SegmentValue::Exact(y)),
                            (SegmentValue::Exact(col + 1), SegmentValue::Exact(y + 1)),
                        ],
                        Self::correlation_color(r).filled(),
                    )))
                    .map_err(|e| RenderError::Draw(e.to_string()))?;

                let annotation = if r.is_nan() {
                    "-".to_string()
                } else {
                    format!("{:.2}", r)
                };
                let annotation_color = if !r.is_nan() && r.abs() > 0.6 {
                    WHITE
                } else {
                    BLACK
                };
                let style = ("sans-serif", 15)
                    .into_font()
                    .color(&annotation_color)
                    .pos(Pos::new(HPos::Center, VPos::Center));
                chart
                    .draw_series(std::iter::once(Text::new(
                        annotation,
                        (SegmentValue::CenterOf(col), SegmentValue::CenterOf(y)),
                        style,
                    )))
                    .map_err(|e| RenderError::Draw(e.to_string()))?;
            }
        }
        Ok(())
    }

    /// Centered notice shown where the heatmap would go.
    fn draw_gate_notice(
        area: &DrawingArea<BitMapBackend, Shift>,
        year: i32,
    ) -> Result<(), RenderError> {
        let (w, h) = area.dim_in_pixel();
        let style = ("sans-serif", 18)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        area.draw(&Text::new(
            format!("Not enough data to draw the correlation chart for {year}"),
            ((w / 2) as i32, (h / 2) as i32),
            style,
        ))
        .map_err(|e| RenderError::Draw(e.to_string()))?;
        Ok(())
    }

    /// Weekly interest lines with circular markers and rotated date labels.
    fn draw_lines(
        area: &DrawingArea<BitMapBackend, Shift>,
        data: &ChartData,
    ) -> Result<(), RenderError> {
        let first = data
            .weeks
            .first()
            .copied()
            .ok_or(RenderError::EmptyChart)?;
        let last = data.weeks.last().copied().unwrap_or(first);
        let x_end = if last > first {
            last
        } else {
            first.succ_opt().unwrap_or(first)
        };

        let y_max = data
            .values
            .iter()
            .flatten()
            .copied()
            .max()
            .unwrap_or(0)
            .max(1);

        let mut chart = ChartBuilder::on(area)
            .caption(
                format!("Popularity of searches in {}", data.year),
                ("sans-serif", 22),
            )
            .margin(10)
            .x_label_area_size(80)
            .y_label_area_size(45)
            .build_cartesian_2d(first..x_end, 0i64..y_max + 10)
            .map_err(|e| RenderError::Draw(e.to_string()))?;

        chart
            .configure_mesh()
            .x_labels(12)
            .y_labels(8)
            .x_desc("Week")
            .y_desc("Interest")
            .x_label_formatter(&|date: &NaiveDate| date.format("%Y-%m-%d").to_string())
            .x_label_style(
                ("sans-serif", 12)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .draw()
            .map_err(|e| RenderError::Draw(e.to_string()))?;

        for (index, (name, column)) in data.series.iter().zip(data.values.iter()).enumerate() {
            let color = LINE_COLORS[index % LINE_COLORS.len()];
            let points: Vec<(NaiveDate, i64)> = data
                .weeks
                .iter()
                .copied()
                .zip(column.iter().copied())
                .collect();

            chart
                .draw_series(LineSeries::new(
                    points.iter().copied(),
                    color.stroke_width(2),
                ))
                .map_err(|e| RenderError::Draw(e.to_string()))?
                .label(name.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
                });

            chart
                .draw_series(
                    points
                        .iter()
                        .map(|&(week, value)| Circle::new((week, value), 3, color.filled())),
                )
                .map_err(|e| RenderError::Draw(e.to_string()))?;
        }

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.85))
            .border_style(&BLACK)
            .draw()
            .map_err(|e| RenderError::Draw(e.to_string()))?;
        Ok(())
    }

    /// Diverging coolwarm-style color for a coefficient in [-1, 1].
    fn correlation_color(r: f64) -> RGBColor {
        if r.is_nan() {
            return RGBColor(70, 70, 70);
        }
        let t = ((r + 1.0) / 2.0).clamp(0.0, 1.0);
        if t < 0.5 {
            let k = t / 0.5;
            RGBColor(
                (59.0 + (245.0 - 59.0) * k) as u8,
                (76.0 + (245.0 - 76.0) * k) as u8,
                (192.0 + (245.0 - 192.0) * k) as u8,
            )
        } else {
            let k = (t - 0.5) / 0.5;
            RGBColor(
                (245.0 - (245.0 - 180.0) * k) as u8,
                (245.0 - (245.0 - 4.0) * k) as u8,
                (245.0 - (245.0 - 38.0) * k) as u8,
            )
        }
    }
}
