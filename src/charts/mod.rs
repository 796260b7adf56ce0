//! Charts module - Chart rendering

mod plotter;
mod renderer;

pub use plotter::ChartPlotter;
pub use renderer::{ChartError, StaticChartRenderer, CHART_TITLE};

/// Series colors shared by the interactive and static charts (RGB).
pub const PALETTE: [(u8, u8, u8); 10] = [
    (52, 152, 219),  // Blue
    (231, 76, 60),   // Red
    (46, 204, 113),  // Green
    (155, 89, 182),  // Purple
    (243, 156, 18),  // Orange
    (26, 188, 156),  // Teal
    (233, 30, 99),   // Pink
    (0, 188, 212),   // Cyan
    (255, 87, 34),   // Deep Orange
    (96, 125, 139),  // Blue Grey
];

/// Fraction of each source slot covered by its bar group.
pub const GROUP_WIDTH: f64 = 0.8;

pub fn series_color(series_idx: usize) -> (u8, u8, u8) {
    PALETTE[series_idx % PALETTE.len()]
}

/// Width of a single bar when `n_series` bars share one slot.
pub fn bar_width(n_series: usize) -> f64 {
    GROUP_WIDTH / n_series.max(1) as f64
}

/// Center of bar `series_idx` within the slot centered on `slot`.
pub fn bar_center(slot: usize, series_idx: usize, n_series: usize) -> f64 {
    let width = bar_width(n_series);
    slot as f64 - GROUP_WIDTH / 2.0 + width * (series_idx as f64 + 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_series_is_centered() {
        assert!((bar_center(3, 0, 1) - 3.0).abs() < 1e-9);
        assert!((bar_width(1) - GROUP_WIDTH).abs() < 1e-9);
    }

    #[test]
    fn test_bars_fill_group_symmetrically() {
        let n = 4;
        let first = bar_center(0, 0, n);
        let last = bar_center(0, n - 1, n);
        assert!((first + last).abs() < 1e-9);
        assert!((last - first - (GROUP_WIDTH - bar_width(n))).abs() < 1e-9);
    }

    #[test]
    fn test_palette_wraps() {
        assert_eq!(series_color(0), series_color(PALETTE.len()));
        assert_ne!(series_color(0), series_color(1));
        assert!((bar_width(0) - GROUP_WIDTH).abs() < 1e-9);
    }
}
