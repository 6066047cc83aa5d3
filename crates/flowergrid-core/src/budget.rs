//! Per-call element budgets selected by device tier.
//!
//! Every generator caps its output so one call costs O(budget) no matter how
//! much of the plane is visible. Hitting a cap drops the rest silently.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Viewport area (in logical units squared) per motif on full-tier devices.
const AREA_PER_MOTIF: f64 = 10_000.0;

/// Motif floor on full-tier devices.
pub const FULL_MIN_MOTIFS: usize = 200;

/// Motif ceiling on full-tier devices.
pub const FULL_MAX_MOTIFS: usize = 800;

/// Motif ceiling in constrained mode.
pub const CONSTRAINED_MAX_MOTIFS: usize = 25;

/// Intersection ceiling on full-tier devices.
pub const FULL_MAX_INTERSECTIONS: usize = 500;

/// Intersection ceiling in constrained mode.
pub const CONSTRAINED_MAX_INTERSECTIONS: usize = 100;

/// Device capability classification supplied by an external monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceTier {
    #[default]
    Full,
    /// Low frame rate, low memory or on battery.
    Constrained,
}

impl DeviceTier {
    /// Pick the tier from the monitor's boolean signal.
    pub fn from_constrained(constrained: bool) -> Self {
        if constrained {
            DeviceTier::Constrained
        } else {
            DeviceTier::Full
        }
    }

    pub fn is_constrained(self) -> bool {
        self == DeviceTier::Constrained
    }
}

/// What to keep when a generator hits its budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TruncationPolicy {
    /// Keep the first `budget` elements in generation order.
    #[default]
    GenerationOrder,
    /// Keep the `budget` elements closest to the viewport center.
    NearestToCenter,
}

/// Maximum number of motif centers for a viewport.
pub fn motif_budget(viewport: Rect, tier: DeviceTier) -> usize {
    let by_area = (viewport.area().abs() / AREA_PER_MOTIF).floor();
    // `as` saturates, so huge or NaN areas land on the clamp bounds.
    let by_area = by_area as usize;
    match tier {
        DeviceTier::Full => by_area.clamp(FULL_MIN_MOTIFS, FULL_MAX_MOTIFS),
        DeviceTier::Constrained => by_area.clamp(1, CONSTRAINED_MAX_MOTIFS),
    }
}

/// Maximum number of intersection points per call.
pub fn intersection_budget(tier: DeviceTier) -> usize {
    match tier {
        DeviceTier::Full => FULL_MAX_INTERSECTIONS,
        DeviceTier::Constrained => CONSTRAINED_MAX_INTERSECTIONS,
    }
}

/// Viewport padding as a multiple of the radius.
pub fn padding_factor(tier: DeviceTier) -> f64 {
    match tier {
        DeviceTier::Full => 2.0,
        DeviceTier::Constrained => 1.5,
    }
}

/// Truncate `items` to `budget` according to `policy`.
///
/// `position` maps an item to the point used for distance ordering. The sort
/// is stable so equal distances keep generation order.
pub(crate) fn truncate<T>(
    mut items: Vec<T>,
    budget: usize,
    policy: TruncationPolicy,
    center: Point,
    position: impl Fn(&T) -> Point,
) -> Vec<T> {
    if items.len() <= budget {
        return items;
    }
    log::debug!(
        "budget of {} hit ({} candidates), truncating by {:?}",
        budget,
        items.len(),
        policy
    );
    if policy == TruncationPolicy::NearestToCenter {
        items.sort_by(|a, b| {
            let da = position(a).distance_squared(center);
            let db = position(b).distance_squared(center);
            da.total_cmp(&db)
        });
    }
    items.truncate(budget);
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_budget_clamps() {
        // 100x100 = 1 motif by area, floored to 200
        assert_eq!(motif_budget(Rect::new(0.0, 0.0, 100.0, 100.0), DeviceTier::Full), 200);
        // 3000x2000 = 600
        assert_eq!(motif_budget(Rect::new(0.0, 0.0, 3000.0, 2000.0), DeviceTier::Full), 600);
        // huge viewport caps at 800
        assert_eq!(motif_budget(Rect::new(0.0, 0.0, 1e6, 1e6), DeviceTier::Full), 800);
    }

    #[test]
    fn test_constrained_budget_clamps() {
        assert_eq!(motif_budget(Rect::new(0.0, 0.0, 10.0, 10.0), DeviceTier::Constrained), 1);
        assert_eq!(motif_budget(Rect::new(0.0, 0.0, 400.0, 400.0), DeviceTier::Constrained), 16);
        assert_eq!(motif_budget(Rect::new(0.0, 0.0, 1e5, 1e5), DeviceTier::Constrained), 25);
    }

    #[test]
    fn test_intersection_budget() {
        assert_eq!(intersection_budget(DeviceTier::Full), 500);
        assert_eq!(intersection_budget(DeviceTier::Constrained), 100);
    }

    #[test]
    fn test_tier_from_signal() {
        assert_eq!(DeviceTier::from_constrained(true), DeviceTier::Constrained);
        assert_eq!(DeviceTier::from_constrained(false), DeviceTier::Full);
        assert!(DeviceTier::Constrained.is_constrained());
    }

    #[test]
    fn test_truncate_generation_order() {
        let items = vec![5.0, 1.0, 3.0, 0.0];
        let kept = truncate(items, 2, TruncationPolicy::GenerationOrder, Point::ZERO, |x| {
            Point::new(*x, 0.0)
        });
        assert_eq!(kept, vec![5.0, 1.0]);
    }

    #[test]
    fn test_truncate_nearest_to_center() {
        let items = vec![5.0, 1.0, 3.0, 0.0];
        let kept = truncate(items, 2, TruncationPolicy::NearestToCenter, Point::ZERO, |x| {
            Point::new(*x, 0.0)
        });
        assert_eq!(kept, vec![0.0, 1.0]);
    }

    #[test]
    fn test_truncate_under_budget_is_untouched() {
        let items = vec![3.0, 2.0];
        let kept = truncate(items, 5, TruncationPolicy::NearestToCenter, Point::ZERO, |x| {
            Point::new(*x, 0.0)
        });
        assert_eq!(kept, vec![3.0, 2.0]);
    }
}
