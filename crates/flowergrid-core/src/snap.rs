//! Snap functionality for pulling points onto guide features.

use kurbo::{Point, Rect};

use crate::units::UnitConfig;

/// Default snap radius in screen pixels.
pub const DEFAULT_PIXEL_TOLERANCE: f64 = 10.0;

/// Type of snap target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapTargetKind {
    /// Center of a Flower of Life motif.
    MotifCenter,
    /// Point where motif circles cross.
    Intersection,
    /// Center of a diamond cell.
    CellCenter,
}

/// A point that can be snapped to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapTarget {
    /// The snap point location.
    pub point: Point,
    /// Type of snap target for visual feedback.
    pub kind: SnapTargetKind,
}

impl SnapTarget {
    pub fn new(point: Point, kind: SnapTargetKind) -> Self {
        Self { point, kind }
    }
}

/// Result of a snap operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapResult {
    /// The point moved onto `target`.
    Snapped { point: Point, target: SnapTarget },
    /// Nothing was close enough; `point` is the input unchanged.
    Unsnapped { point: Point },
}

impl SnapResult {
    /// Create a result with no snapping.
    pub fn none(point: Point) -> Self {
        SnapResult::Unsnapped { point }
    }

    fn snapped(target: SnapTarget) -> Self {
        SnapResult::Snapped {
            point: target.point,
            target,
        }
    }

    /// The point the caller should commit.
    pub fn point(&self) -> Point {
        match *self {
            SnapResult::Snapped { point, .. } | SnapResult::Unsnapped { point } => point,
        }
    }

    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        matches!(self, SnapResult::Snapped { .. })
    }

    /// The feature snapped to, if any.
    pub fn target(&self) -> Option<SnapTarget> {
        match *self {
            SnapResult::Snapped { target, .. } => Some(target),
            SnapResult::Unsnapped { .. } => None,
        }
    }
}

/// Something that offers snap targets.
pub trait FeatureSource {
    /// Snap targets lying inside `window` (edges included), in a fixed order.
    fn candidates(&self, window: Rect) -> Vec<SnapTarget>;

    /// Nearest target computed directly, for lattices that allow it.
    ///
    /// When this returns `Some`, [`snap`] uses it instead of scanning
    /// [`candidates`](Self::candidates).
    fn closed_form(&self, _point: Point) -> Option<SnapTarget> {
        None
    }
}

/// Inclusive containment; `Rect::contains` excludes the far edges.
pub(crate) fn window_contains(window: Rect, point: Point) -> bool {
    point.x >= window.x0 && point.x <= window.x1 && point.y >= window.y0 && point.y <= window.y1
}

/// Snap a point to the nearest target within `threshold`.
///
/// Ties resolve to whichever target comes first in `targets`. That order is
/// an artifact of enumeration and callers should not depend on it.
pub fn snap_to_targets(point: Point, targets: &[SnapTarget], threshold: f64) -> SnapResult {
    let mut best_target: Option<&SnapTarget> = None;
    let mut best_dist_sq = f64::INFINITY;

    for target in targets {
        let dist_sq = point.distance_squared(target.point);
        if dist_sq < best_dist_sq {
            best_dist_sq = dist_sq;
            best_target = Some(target);
        }
    }

    match best_target {
        Some(target) if best_dist_sq <= threshold * threshold => SnapResult::snapped(*target),
        _ => SnapResult::none(point),
    }
}

/// Snap `point` to the nearest feature of `source`.
///
/// The pixel tolerance is divided by the scale, so the snap radius in logical
/// units shrinks while zooming in. Only a window of ±tolerance around the
/// point is searched, which keeps the cost independent of scene size.
pub fn snap<S: FeatureSource + ?Sized>(
    point: Point,
    source: &S,
    units: UnitConfig,
    pixel_tolerance: f64,
) -> SnapResult {
    let tolerance = units.logical_tolerance(pixel_tolerance);
    if !point.is_finite() || tolerance.is_nan() || tolerance < 0.0 {
        return SnapResult::none(point);
    }

    if let Some(target) = source.closed_form(point) {
        let result = snap_to_targets(point, &[target], tolerance);
        log::trace!("closed-form snap of {:?}: {:?}", point, result);
        return result;
    }

    let window = Rect::from_center_size(point, (2.0 * tolerance, 2.0 * tolerance));
    let candidates = source.candidates(window);
    let result = snap_to_targets(point, &candidates, tolerance);
    log::trace!(
        "snap of {:?} over {} candidates within {}: {:?}",
        point,
        candidates.len(),
        tolerance,
        result
    );
    result
}
