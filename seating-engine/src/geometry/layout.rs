//! Canvas grid layout
//!
//! Default on-screen placement for newly created tables: a square-ish
//! grid capped by what fits across the canvas, centered horizontally,
//! with a fixed vertical pitch. Purely presentational.

use crate::core::EngineConfig;

/// Computed grid for one batch of tables
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    pub cols: u32,
    pub rows: u32,
    /// Horizontal pitch, widened so the grid spans the available width
    pub cell_width: f64,
    /// Vertical pitch: tallest table plus the minimum gap
    pub row_height: f64,
    margin: f64,
    max_table_height: f64,
}

/// Compute the grid for `total` tables whose largest footprint is
/// `max_width` x `max_height`.
///
/// Columns: whichever is smaller of "how many fit across" and the
/// square-ish `ceil(sqrt(total))`, floored at one column.
pub fn grid_layout(
    total: u32,
    max_width: f64,
    max_height: f64,
    config: &EngineConfig,
) -> GridLayout {
    let available = (config.canvas_width - 2.0 * config.canvas_margin).max(max_width);
    let fit = (available / (max_width + config.min_table_spacing)).floor() as u32;
    let square = (total as f64).sqrt().ceil() as u32;
    let cols = fit.min(square).max(1);
    let rows = total.div_ceil(cols);

    GridLayout {
        cols,
        rows,
        cell_width: available / cols as f64,
        row_height: max_height + config.min_table_spacing,
        margin: config.canvas_margin,
        max_table_height: max_height,
    }
}

impl GridLayout {
    /// Center position of the table at `index` (row-major order)
    pub fn position(&self, index: u32) -> (f64, f64) {
        let col = index % self.cols;
        let row = index / self.cols;
        let x = self.margin + (col as f64 + 0.5) * self.cell_width;
        let y = self.margin + row as f64 * self.row_height + self.max_table_height / 2.0;
        (x, y)
    }
}
