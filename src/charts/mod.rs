//! Charts module - Chart rendering

mod plotter;
mod renderer;


pub use plotter::{ChartData, ChartPlotter};
pub use renderer::{RenderError, StaticChartRenderer};
