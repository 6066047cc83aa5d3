//! Hexagonal lattice of Flower of Life motif centers.

use kurbo::{Point, Rect};

use crate::budget::{self, DeviceTier, TruncationPolicy};

/// Upper bound on centers scanned when ranking by distance to the viewport
/// center. Windows holding more than this are ranked over the first
/// `MAX_RANKED_SCAN` centers only.
pub const MAX_RANKED_SCAN: usize = 100_000;

/// Hexagonal packing of motifs with a shared radius.
///
/// Rows are `radius·√3` apart and odd rows shift right by `radius`, so every
/// motif touches six neighbours. The lattice is anchored at the world origin;
/// row 0 always contains a motif centered at `(0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotifLattice {
    radius: f64,
}

impl MotifLattice {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Distance between neighbouring centers in one row.
    pub fn spacing_x(&self) -> f64 {
        2.0 * self.radius
    }

    /// Distance between rows.
    pub fn spacing_y(&self) -> f64 {
        self.radius * 3f64.sqrt()
    }

    /// Horizontal shift applied to a row.
    fn row_offset(&self, row: i64) -> f64 {
        if row.rem_euclid(2) == 1 { self.radius } else { 0.0 }
    }

    /// Center of the motif at `(row, col)`.
    pub fn center_at(&self, row: i64, col: i64) -> Point {
        Point::new(
            col as f64 * self.spacing_x() + self.row_offset(row),
            row as f64 * self.spacing_y(),
        )
    }

    /// Enumerate centers inside `viewport` grown by `padding` on every side,
    /// stopping after `budget` centers.
    pub fn centers(&self, viewport: Rect, padding: f64, budget: usize) -> MotifCenters {
        MotifCenters::new(*self, viewport.inflate(padding, padding), budget)
    }

    /// Enumerate centers using the padding and budget of a device tier.
    pub fn centers_for_tier(&self, viewport: Rect, tier: DeviceTier) -> MotifCenters {
        let padding = budget::padding_factor(tier) * self.radius;
        self.centers(viewport, padding, budget::motif_budget(viewport, tier))
    }

    /// Collect centers for `viewport`, truncating to `budget` with `policy`.
    pub fn visible_centers(
        &self,
        viewport: Rect,
        padding: f64,
        budget: usize,
        policy: TruncationPolicy,
    ) -> Vec<Point> {
        match policy {
            TruncationPolicy::GenerationOrder => self.centers(viewport, padding, budget).collect(),
            TruncationPolicy::NearestToCenter => {
                let scan = self.centers(viewport, padding, MAX_RANKED_SCAN.max(budget));
                let all: Vec<Point> = scan.collect();
                budget::truncate(all, budget, policy, viewport.center(), |p| *p)
            }
        }
    }
}

/// Enumerate motif centers for `radius` over the padded viewport.
pub fn motif_centers(radius: f64, viewport: Rect, padding: f64, budget: usize) -> MotifCenters {
    MotifLattice::new(radius).centers(viewport, padding, budget)
}

/// Lazy row-major sequence of motif centers.
///
/// Output is capped at the budget: once that many centers have been yielded
/// the sequence ends, even if more would fall inside the window. Call
/// [`MotifLattice::centers`] again for a fresh pass with another budget.
///
/// Rows whose column range is empty are skipped in constant time, so a pass
/// costs O(budget) however tall the window is.
#[derive(Debug, Clone)]
pub struct MotifCenters {
    lattice: MotifLattice,
    /// Column range of even rows and of odd rows.
    cols: [(i64, i64); 2],
    row: i64,
    row_end: i64,
    col: i64,
    col_end: i64,
    emitted: usize,
    budget: usize,
    done: bool,
    truncated: bool,
}

fn parity(row: i64) -> usize {
    row.rem_euclid(2) as usize
}

impl MotifCenters {
    fn new(lattice: MotifLattice, window: Rect, budget: usize) -> Self {
        let mut iter = Self {
            lattice,
            cols: [(0, -1); 2],
            row: 0,
            row_end: -1,
            col: 0,
            col_end: -1,
            emitted: 0,
            budget,
            done: false,
            truncated: false,
        };

        let radius = lattice.radius;
        let usable = radius.is_finite()
            && radius > 0.0
            && window.is_finite()
            && window.x0 <= window.x1
            && window.y0 <= window.y1;
        if !usable {
            iter.done = true;
            return iter;
        }

        let sx = lattice.spacing_x();
        let col_range = |offset: f64| {
            (
                ((window.x0 - offset) / sx).ceil() as i64,
                ((window.x1 - offset) / sx).floor() as i64,
            )
        };
        iter.cols = [col_range(0.0), col_range(radius)];
        if iter.cols.iter().all(|(start, end)| start > end) {
            iter.done = true;
            return iter;
        }

        let sy = lattice.spacing_y();
        iter.row = (window.y0 / sy).ceil() as i64;
        iter.row_end = (window.y1 / sy).floor() as i64;
        if !iter.row_has_columns(iter.row) {
            iter.row = iter.row.saturating_add(1);
        }
        iter.start_row();
        iter
    }

    fn row_has_columns(&self, row: i64) -> bool {
        let (start, end) = self.cols[parity(row)];
        start <= end
    }

    /// Next row at or after `row + 1` that has columns. At least one parity
    /// does, so this is never more than two rows ahead.
    fn next_row(&self) -> i64 {
        let next = self.row.saturating_add(1);
        if self.row_has_columns(next) {
            next
        } else {
            next.saturating_add(1)
        }
    }

    /// Load the column range of the current row.
    fn start_row(&mut self) {
        (self.col, self.col_end) = self.cols[parity(self.row)];
    }

    /// Whether the budget cut the sequence short.
    ///
    /// Stays set after the sequence has been drained.
    pub fn is_truncated(&self) -> bool {
        self.truncated || (self.emitted >= self.budget && self.has_remaining())
    }

    fn has_remaining(&self) -> bool {
        !self.done
            && self.row <= self.row_end
            && (self.col <= self.col_end || self.next_row() <= self.row_end)
    }
}

impl Iterator for MotifCenters {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.done {
            return None;
        }
        loop {
            if self.row > self.row_end {
                self.done = true;
                return None;
            }
            if self.emitted >= self.budget {
                if self.has_remaining() {
                    self.truncated = true;
                    log::debug!(
                        "motif budget of {} reached, dropping remaining centers",
                        self.budget
                    );
                }
                self.done = true;
                return None;
            }
            if self.col <= self.col_end {
                let center = self.lattice.center_at(self.row, self.col);
                self.col += 1;
                self.emitted += 1;
                return Some(center);
            }
            self.row = self.next_row();
            self.start_row();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        (0, Some(self.budget.saturating_sub(self.emitted)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const R: f64 = 37.795;

    fn viewport() -> Rect {
        Rect::new(-200.0, -150.0, 400.0, 300.0)
    }

    #[test]
    fn test_origin_motif_present() {
        let window = Rect::new(-10.0, -10.0, 10.0, 10.0);
        let centers: Vec<Point> = motif_centers(R, window, 0.0, 100).collect();
        assert_eq!(centers, vec![Point::ZERO]);
    }

    #[test]
    fn test_deterministic() {
        let a: Vec<Point> = motif_centers(R, viewport(), 2.0 * R, 800).collect();
        let b: Vec<Point> = motif_centers(R, viewport(), 2.0 * R, 800).collect();
        assert!(!a.is_empty());
        assert_eq!(a, b);
    }

    #[test]
    fn test_row_and_column_spacing() {
        let centers: Vec<Point> = motif_centers(R, viewport(), 0.0, 800).collect();
        let sy = R * 3f64.sqrt();
        let mut saw_row_step = false;
        for pair in centers.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if (a.y - b.y).abs() < 1e-9 {
                assert!(((b.x - a.x) - 2.0 * R).abs() < 1e-9);
            } else {
                assert!(((b.y - a.y) - sy).abs() < 1e-9);
                saw_row_step = true;
            }
        }
        assert!(saw_row_step);
    }

    #[test]
    fn test_odd_rows_are_offset() {
        let lattice = MotifLattice::new(R);
        assert_eq!(lattice.center_at(0, 1), Point::new(2.0 * R, 0.0));
        let odd = lattice.center_at(1, 0);
        assert!((odd.x - R).abs() < 1e-12);
        let negative_odd = lattice.center_at(-1, 0);
        assert!((negative_odd.x - R).abs() < 1e-12);
    }

    #[test]
    fn test_centers_stay_inside_padded_window() {
        let padding = 1.5 * R;
        let window = viewport().inflate(padding, padding);
        for c in motif_centers(R, viewport(), padding, 800) {
            assert!(c.x >= window.x0 - 1e-9 && c.x <= window.x1 + 1e-9);
            assert!(c.y >= window.y0 - 1e-9 && c.y <= window.y1 + 1e-9);
        }
    }

    #[test]
    fn test_budget_is_hard_cap() {
        let all: Vec<Point> = motif_centers(R, viewport(), 2.0 * R, usize::MAX).collect();
        assert!(all.len() > 10);
        let mut capped = motif_centers(R, viewport(), 2.0 * R, 10);
        let first: Vec<Point> = capped.by_ref().take(10).collect();
        assert!(capped.is_truncated());
        assert_eq!(capped.next(), None);
        assert_eq!(first, all[..10].to_vec());
    }

    #[test]
    fn test_truncation_flag_survives_draining() {
        let mut capped = motif_centers(R, viewport(), 0.0, 10);
        assert_eq!(capped.by_ref().count(), 10);
        assert!(capped.is_truncated());

        let total = motif_centers(R, viewport(), 0.0, usize::MAX).count();
        let mut exact = motif_centers(R, viewport(), 0.0, total);
        assert_eq!(exact.by_ref().count(), total);
        assert!(!exact.is_truncated());
    }

    #[test]
    fn test_sliver_between_columns_ends_immediately() {
        // Misses both the even column at x=0 and the odd column at x=R.
        let sliver = Rect::new(0.5, -1e12, 0.6, 1e12);
        let mut centers = motif_centers(R, sliver, 0.0, 10);
        assert_eq!(centers.next(), None);
        assert!(!centers.is_truncated());
    }

    #[test]
    fn test_sliver_through_odd_column_skips_even_rows() {
        let sliver = Rect::new(R - 0.1, -1e12, R + 0.1, 1e12);
        let mut centers = motif_centers(R, sliver, 0.0, 10);
        let found: Vec<Point> = centers.by_ref().collect();
        assert_eq!(found.len(), 10);
        assert!(centers.is_truncated());
        let sy = R * 3f64.sqrt();
        for c in &found {
            assert!((c.x - R).abs() < 1e-6);
        }
        for pair in found.windows(2) {
            assert!(((pair[1].y - pair[0].y) - 2.0 * sy).abs() < 1e-3);
        }
    }

    #[test]
    fn test_zero_budget_yields_nothing() {
        assert_eq!(motif_centers(R, viewport(), 0.0, 0).count(), 0);
    }

    #[test]
    fn test_degenerate_inputs_yield_nothing() {
        assert_eq!(motif_centers(0.0, viewport(), 0.0, 100).count(), 0);
        assert_eq!(motif_centers(f64::NAN, viewport(), 0.0, 100).count(), 0);
        assert_eq!(motif_centers(R, Rect::new(10.0, 0.0, -10.0, 5.0), 0.0, 100).count(), 0);
    }

    #[test]
    fn test_nearest_to_center_keeps_middle() {
        let lattice = MotifLattice::new(R);
        let view = Rect::new(-400.0, -400.0, 400.0, 400.0);
        let kept = lattice.visible_centers(view, 0.0, 1, TruncationPolicy::NearestToCenter);
        assert_eq!(kept, vec![Point::ZERO]);
        let first = lattice.visible_centers(view, 0.0, 1, TruncationPolicy::GenerationOrder);
        assert_eq!(first.len(), 1);
        assert!(first[0].y < -300.0);
    }

    #[test]
    fn test_tier_budget_applied() {
        let lattice = MotifLattice::new(5.0);
        let huge = Rect::new(0.0, 0.0, 5000.0, 5000.0);
        assert_eq!(lattice.centers_for_tier(huge, DeviceTier::Full).count(), 800);
        assert_eq!(lattice.centers_for_tier(huge, DeviceTier::Constrained).count(), 25);
    }
}
