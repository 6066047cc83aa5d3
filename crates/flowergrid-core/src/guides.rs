//! Alignment guide lines drawn around the pointer.
//!
//! Guides are advisory: the renderer draws them for feedback and nothing
//! keeps them around.

use kurbo::{Line, Point, Vec2};
use std::f64::consts::FRAC_PI_3;

/// Half-length of axis and radial guides in logical units.
pub const GUIDE_HALF_LENGTH: f64 = 1000.0;

/// Number of radial spokes around the pointer.
pub const RADIAL_COUNT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuideKind {
    /// Horizontal or vertical line through the point.
    Axis,
    /// Spoke leaving the point at a multiple of 60°.
    Radial,
    /// Segment from the point to a nearby feature center.
    ToCenter,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideLine {
    pub line: Line,
    pub kind: GuideKind,
}

impl GuideLine {
    pub fn new(p0: Point, p1: Point, kind: GuideKind) -> Self {
        Self {
            line: Line::new(p0, p1),
            kind,
        }
    }
}

/// Hexagonal guides: a horizontal and a vertical line through `point`
/// spanning ±[`GUIDE_HALF_LENGTH`], then six spokes of the same length at
/// 0°, 60°, …, 300°.
///
/// The shape never depends on nearby features or on whether `point` was
/// snapped.
pub fn radial_guides(point: Point) -> Vec<GuideLine> {
    let mut guides = Vec::with_capacity(RADIAL_COUNT + 2);
    let h = Vec2::new(GUIDE_HALF_LENGTH, 0.0);
    let v = Vec2::new(0.0, GUIDE_HALF_LENGTH);
    guides.push(GuideLine::new(point - h, point + h, GuideKind::Axis));
    guides.push(GuideLine::new(point - v, point + v, GuideKind::Axis));
    for k in 0..RADIAL_COUNT {
        let dir = Vec2::from_angle(k as f64 * FRAC_PI_3);
        guides.push(GuideLine::new(point, point + dir * GUIDE_HALF_LENGTH, GuideKind::Radial));
    }
    guides
}

/// Diamond guides: one segment from `point` to each of `centers` within
/// `reach`. Centers sitting exactly on `point` produce no segment.
pub fn center_guides(point: Point, centers: &[Point], reach: f64) -> Vec<GuideLine> {
    centers
        .iter()
        .filter(|c| {
            let d = c.distance(point);
            d > 0.0 && d <= reach
        })
        .map(|c| GuideLine::new(point, *c, GuideKind::ToCenter))
        .collect()
}
