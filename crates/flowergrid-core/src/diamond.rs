//! Axis-aligned lattice of diamond (rotated square) cells.

use kurbo::{Line, Point, Rect};

use crate::budget::{self, DeviceTier};

/// Inner diamond size relative to its cell.
pub const INNER_RATIO: f64 = 0.6;

/// One diamond cell. Vertices and diagonals are derived on demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiamondCell {
    pub center: Point,
    /// Full diagonal length of the outer diamond.
    pub size: f64,
}

impl DiamondCell {
    pub fn new(center: Point, size: f64) -> Self {
        Self { center, size }
    }

    /// Size of the inner diamond.
    pub fn inner_size(&self) -> f64 {
        self.size * INNER_RATIO
    }

    /// Outer vertices: top, right, bottom, left.
    pub fn vertices(&self) -> [Point; 4] {
        diamond_vertices(self.center, self.size / 2.0)
    }

    /// Inner diamond vertices in the same order as [`vertices`](Self::vertices).
    pub fn inner_vertices(&self) -> [Point; 4] {
        diamond_vertices(self.center, self.inner_size() / 2.0)
    }

    /// Horizontal and vertical diagonals joining opposite outer vertices.
    pub fn diagonals(&self) -> [Line; 2] {
        let [top, right, bottom, left] = self.vertices();
        [Line::new(left, right), Line::new(top, bottom)]
    }
}

fn diamond_vertices(center: Point, half: f64) -> [Point; 4] {
    [
        Point::new(center.x, center.y - half),
        Point::new(center.x + half, center.y),
        Point::new(center.x, center.y + half),
        Point::new(center.x - half, center.y),
    ]
}

/// Cell centers on a square grid of pitch `cell_size` anchored at `origin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiamondLattice {
    pub cell_size: f64,
    pub origin: Point,
}

impl DiamondLattice {
    pub fn new(cell_size: f64) -> Self {
        Self {
            cell_size,
            origin: Point::ZERO,
        }
    }

    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    fn is_usable(&self) -> bool {
        self.cell_size.is_finite() && self.cell_size > 0.0 && self.origin.is_finite()
    }

    /// Grid index range covering `viewport`, outward-rounded.
    fn index_bounds(&self, viewport: Rect) -> Option<(i64, i64, i64, i64)> {
        if !self.is_usable()
            || !viewport.is_finite()
            || viewport.x0 > viewport.x1
            || viewport.y0 > viewport.y1
        {
            return None;
        }
        let s = self.cell_size;
        let start_x = ((viewport.x0 - self.origin.x) / s).floor() as i64;
        let start_y = ((viewport.y0 - self.origin.y) / s).floor() as i64;
        let end_x = ((viewport.x1 - self.origin.x) / s).ceil() as i64;
        let end_y = ((viewport.y1 - self.origin.y) / s).ceil() as i64;
        Some((start_x, start_y, end_x, end_y))
    }

    fn center_at(&self, ix: i64, iy: i64) -> Point {
        Point::new(
            self.origin.x + ix as f64 * self.cell_size,
            self.origin.y + iy as f64 * self.cell_size,
        )
    }

    /// Cells covering `viewport`, row-major, at most `budget` of them.
    pub fn cells(&self, viewport: Rect, budget: usize) -> Vec<DiamondCell> {
        let Some((start_x, start_y, end_x, end_y)) = self.index_bounds(viewport) else {
            return Vec::new();
        };
        let mut cells = Vec::new();
        for iy in start_y..=end_y {
            for ix in start_x..=end_x {
                if cells.len() >= budget {
                    log::debug!("diamond cell budget of {} reached", budget);
                    return cells;
                }
                cells.push(DiamondCell::new(self.center_at(ix, iy), self.cell_size));
            }
        }
        cells
    }

    /// Cells for `viewport` capped by the motif budget of `tier`.
    pub fn cells_for_tier(&self, viewport: Rect, tier: DeviceTier) -> Vec<DiamondCell> {
        self.cells(viewport, budget::motif_budget(viewport, tier))
    }

    /// Cell center nearest to `point`, in constant time.
    pub fn nearest_center(&self, point: Point) -> Option<Point> {
        if !self.is_usable() || !point.is_finite() {
            return None;
        }
        let s = self.cell_size;
        Some(Point::new(
            ((point.x - self.origin.x) / s).round() * s + self.origin.x,
            ((point.y - self.origin.y) / s).round() * s + self.origin.y,
        ))
    }

    /// Cell centers within `radius` of `point`, row-major.
    pub fn centers_near(&self, point: Point, radius: f64) -> Vec<Point> {
        let window = Rect::from_center_size(point, (2.0 * radius, 2.0 * radius));
        let Some((start_x, start_y, end_x, end_y)) = self.index_bounds(window) else {
            return Vec::new();
        };
        let mut centers = Vec::new();
        for iy in start_y..=end_y {
            for ix in start_x..=end_x {
                let c = self.center_at(ix, iy);
                if c.distance(point) <= radius {
                    centers.push(c);
                }
            }
        }
        centers
    }
}

/// Diamond cells covering `viewport` on a grid anchored at the origin.
pub fn diamond_cells(viewport: Rect, cell_size: f64) -> Vec<DiamondCell> {
    DiamondLattice::new(cell_size).cells(viewport, usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_cover_viewport() {
        let cells = diamond_cells(Rect::new(0.0, 0.0, 100.0, 100.0), 40.0);
        // 0, 40, 80, 120 on each axis
        assert_eq!(cells.len(), 16);
        assert_eq!(cells[0].center, Point::ZERO);
        assert_eq!(cells[1].center, Point::new(40.0, 0.0));
        assert_eq!(cells[4].center, Point::new(0.0, 40.0));
    }

    #[test]
    fn test_cell_geometry() {
        let cells = diamond_cells(Rect::new(0.0, 0.0, 100.0, 100.0), 40.0);
        let cell = cells[0];
        assert!((cell.inner_size() - 24.0).abs() < 1e-12);
        let v = cell.vertices();
        assert_eq!(v.len(), 4);
        assert_eq!(v[0], Point::new(0.0, -20.0));
        assert_eq!(v[1], Point::new(20.0, 0.0));
        assert_eq!(v[2], Point::new(0.0, 20.0));
        assert_eq!(v[3], Point::new(-20.0, 0.0));
        let inner = cell.inner_vertices();
        assert!((inner[1].x - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_diagonals_span_corners() {
        let cell = DiamondCell::new(Point::new(10.0, 10.0), 8.0);
        let [h, v] = cell.diagonals();
        assert_eq!(h, Line::new((6.0, 10.0), (14.0, 10.0)));
        assert_eq!(v, Line::new((10.0, 6.0), (10.0, 14.0)));
    }

    #[test]
    fn test_no_row_offset() {
        let cells = diamond_cells(Rect::new(0.0, 0.0, 100.0, 100.0), 40.0);
        let row_xs = |y: f64| -> Vec<f64> {
            cells
                .iter()
                .filter(|c| c.center.y == y)
                .map(|c| c.center.x)
                .collect()
        };
        assert_eq!(row_xs(0.0), row_xs(40.0));
    }

    #[test]
    fn test_origin_shifts_grid() {
        let lattice = DiamondLattice::new(10.0).with_origin(Point::new(3.0, 4.0));
        let cells = lattice.cells(Rect::new(0.0, 0.0, 10.0, 10.0), usize::MAX);
        assert_eq!(cells[0].center, Point::new(-7.0, -6.0));
        assert_eq!(lattice.nearest_center(Point::new(14.0, 12.0)), Some(Point::new(13.0, 14.0)));
    }

    #[test]
    fn test_nearest_center_rounds() {
        let lattice = DiamondLattice::new(40.0);
        assert_eq!(lattice.nearest_center(Point::new(19.0, 21.0)), Some(Point::new(0.0, 40.0)));
        assert_eq!(lattice.nearest_center(Point::new(-61.0, -5.0)), Some(Point::new(-80.0, 0.0)));
        assert_eq!(DiamondLattice::new(0.0).nearest_center(Point::ZERO), None);
    }

    #[test]
    fn test_centers_near() {
        let lattice = DiamondLattice::new(10.0);
        let near = lattice.centers_near(Point::new(1.0, 1.0), 10.0);
        assert!(near.contains(&Point::ZERO));
        assert!(near.contains(&Point::new(10.0, 0.0)));
        assert!(!near.contains(&Point::new(10.0, 10.0)));
        for c in near {
            assert!(c.distance(Point::new(1.0, 1.0)) <= 10.0);
        }
    }

    #[test]
    fn test_budget_caps_cells() {
        let lattice = DiamondLattice::new(1.0);
        let view = Rect::new(0.0, 0.0, 100.0, 100.0);
        let cells = lattice.cells_for_tier(view, DeviceTier::Constrained);
        assert_eq!(cells.len(), 1);
        let cells = lattice.cells(Rect::new(0.0, 0.0, 100.0, 100.0), 37);
        assert_eq!(cells.len(), 37);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(diamond_cells(Rect::new(0.0, 0.0, 100.0, 100.0), 0.0).is_empty());
        assert!(diamond_cells(Rect::new(0.0, 0.0, 100.0, 100.0), -5.0).is_empty());
        assert!(diamond_cells(Rect::new(10.0, 0.0, 0.0, 100.0), 5.0).is_empty());
    }
}
