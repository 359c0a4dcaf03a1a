//! GUI module - User interface components

mod app;
mod control_panel;
mod dashboard;
mod view;


pub use app::VolleyTrendsApp;
pub use control_panel::{ControlPanel, ControlPanelAction};
pub use dashboard::Dashboard;
pub use view::{DashboardView, ViewError};
