// Pixel <-> cell conversion for zoomable grids with fixed headers and a zoom-dependent gap.

use crate::config::types::GridConfig;
use crate::grid::{GridPoint, GridSize};
use crate::input::Point;

/// Inter-cell gap for a given cell size: thin below the threshold, wide at or above it.
pub fn gap_for(cell_size: f32, config: &GridConfig) -> f32 {
    if cell_size < config.gap_threshold {
        config.gap_small
    } else {
        config.gap_large
    }
}

/// Resolved layout for one zoom level. Cheap to rebuild on every render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    pub cell_size: f32,
    pub gap: f32,
    /// Distance from the content origin to the top-left of cell (0, 0), on both axes.
    pub offset: f32,
}

impl GridMetrics {
    pub fn new(cell_size: f32, config: &GridConfig) -> Self {
        let gap = gap_for(cell_size, config);
        Self {
            cell_size,
            gap,
            offset: config.header_size + config.padding + config.border + gap,
        }
    }

    /// Distance between the top-left corners of adjacent cells.
    pub fn stride(&self) -> f32 {
        self.cell_size + self.gap
    }

    /// Unclamped `(row, col)` for a content-relative pixel position.
    ///
    /// Positions over the headers produce negative indices and positions past the
    /// last cell produce indices beyond the grid; callers decide whether to clamp.
    pub fn raw_cell(&self, x: f32, y: f32) -> (i64, i64) {
        let stride = self.stride();
        let col = ((x - self.offset) / stride).floor() as i64;
        let row = ((y - self.offset) / stride).floor() as i64;
        (row, col)
    }

    /// Cell under the position, clamped into the grid. Used while chasing the pointer.
    pub fn clamped_cell(&self, x: f32, y: f32, size: GridSize) -> GridPoint {
        let (row, col) = self.raw_cell(x, y);
        size.clamp(row, col)
    }

    /// Cell under the position, or `None` over headers, padding, or past the edges.
    pub fn hit_cell(&self, x: f32, y: f32, size: GridSize) -> Option<GridPoint> {
        let (row, col) = self.raw_cell(x, y);
        size.contains(row, col).then(|| GridPoint::new(row as usize, col as usize))
    }

    /// Content-relative pixel position of a cell's top-left corner.
    pub fn cell_origin(&self, point: GridPoint) -> Point {
        let stride = self.stride();
        Point::new(
            self.offset + point.col as f32 * stride,
            self.offset + point.row as f32 * stride,
        )
    }

    /// Content-relative pixel position of a cell's center.
    pub fn cell_center(&self, point: GridPoint) -> Point {
        let origin = self.cell_origin(point);
        let half = self.cell_size / 2.0;
        Point::new(origin.x + half, origin.y + half)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn config() -> GridConfig {
        GridConfig::default()
    }

    // ── Gap rule ────────────────────────────────────────────────────

    #[test]
    fn gap_is_small_below_threshold() {
        assert_eq!(gap_for(15.0, &config()), 1.0);
        assert_eq!(gap_for(39.9, &config()), 1.0);
    }

    #[test]
    fn gap_is_large_at_and_above_threshold() {
        assert_eq!(gap_for(40.0, &config()), 4.0);
        assert_eq!(gap_for(120.0, &config()), 4.0);
    }

    #[test]
    fn offset_sums_header_padding_border_gap() {
        let m = GridMetrics::new(40.0, &config());
        // 40 header + 8 padding + 1 border + 4 gap
        assert_eq!(m.offset, 53.0);
        assert_eq!(m.stride(), 44.0);
    }

    // ── Raw mapping ─────────────────────────────────────────────────

    #[test]
    fn raw_cell_at_first_cell_origin() {
        let m = GridMetrics::new(40.0, &config());
        assert_eq!(m.raw_cell(53.0, 53.0), (0, 0));
    }

    #[test]
    fn raw_cell_over_header_is_negative() {
        let m = GridMetrics::new(40.0, &config());
        let (row, col) = m.raw_cell(10.0, 10.0);
        assert!(row < 0 && col < 0);
    }

    #[test]
    fn raw_cell_past_last_cell_overflows() {
        let m = GridMetrics::new(40.0, &config());
        let (row, col) = m.raw_cell(53.0 + 44.0 * 12.5, 53.0 + 44.0 * 30.0);
        assert_eq!((row, col), (30, 12));
    }

    // ── Clamp / hit-test ────────────────────────────────────────────

    #[test]
    fn clamped_cell_stays_in_bounds() {
        let m = GridMetrics::new(40.0, &config());
        let size = GridSize::new(10, 10);
        assert_eq!(m.clamped_cell(-500.0, -500.0, size), GridPoint::new(0, 0));
        assert_eq!(m.clamped_cell(9_999.0, 9_999.0, size), GridPoint::new(9, 9));
    }

    #[test]
    fn hit_cell_rejects_headers() {
        let m = GridMetrics::new(40.0, &config());
        let size = GridSize::new(10, 10);
        assert_eq!(m.hit_cell(20.0, 100.0, size), None);
        assert_eq!(m.hit_cell(100.0, 20.0, size), None);
        assert_eq!(m.hit_cell(100.0, 100.0, size), Some(GridPoint::new(1, 1)));
    }

    // ── Round trip ──────────────────────────────────────────────────

    #[rstest]
    #[case(15.0)]
    #[case(40.0)]
    #[case(80.0)]
    #[case(120.0)]
    fn cell_center_maps_back_to_cell(#[case] cell_size: f32) {
        let m = GridMetrics::new(cell_size, &config());
        let size = GridSize::new(30, 30);
        for row in [0, 1, 7, 29] {
            for col in [0, 3, 18, 29] {
                let p = GridPoint::new(row, col);
                let c = m.cell_center(p);
                assert_eq!(m.hit_cell(c.x, c.y, size), Some(p), "cell_size={cell_size}");
            }
        }
    }

    proptest! {
        #[test]
        fn center_roundtrip_any_zoom(
            cell_size in 4.0f32..200.0,
            row in 0usize..500,
            col in 0usize..500,
        ) {
            let m = GridMetrics::new(cell_size, &config());
            let p = GridPoint::new(row, col);
            let c = m.cell_center(p);
            prop_assert_eq!(m.raw_cell(c.x, c.y), (row as i64, col as i64));
        }
    }
}
