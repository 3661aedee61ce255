//! View components shared by the admin templates.

pub mod charts;

pub use charts::{BarRow, SPARKLINE_HEIGHT, SPARKLINE_WIDTH, Sparkline, bar_width, sparkline_path};
