//! Charts module - static chart rendering

mod palette;
mod plotter;
mod renderer;

pub use palette::{Colormap, Qualitative};
pub use plotter::{ChartPlotter, GroupedBars, LineData, Panel};
pub use renderer::{GridRenderer, RenderError, GRID1_FILE, GRID2_FILE, GRID3_FILE};
