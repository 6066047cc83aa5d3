//! Motif circles and analytic circle-circle intersection.

use kurbo::{Circle, Point, Vec2};
use std::f64::consts::FRAC_PI_3;

/// Number of petals around a motif center.
pub const PETAL_COUNT: usize = 6;

/// Relative tolerance for tangency and coincidence tests.
const EPSILON: f64 = 1e-9;

/// One Flower of Life motif: a center circle and six petals of equal radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motif {
    pub center: Point,
    pub radius: f64,
}

impl Motif {
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Petal centers at 0°, 60°, …, 300°.
    ///
    /// With equal radii each petal center also lies on the center circle and
    /// on its two neighbouring petals, so these double as the motif's
    /// center-petal intersection points.
    pub fn petals(&self) -> [Point; PETAL_COUNT] {
        std::array::from_fn(|k| self.center + Vec2::from_angle(k as f64 * FRAC_PI_3) * self.radius)
    }

    /// The center circle followed by the six petals.
    pub fn circles(&self) -> [Circle; PETAL_COUNT + 1] {
        let petals = self.petals();
        std::array::from_fn(|i| {
            if i == 0 {
                Circle::new(self.center, self.radius)
            } else {
                Circle::new(petals[i - 1], self.radius)
            }
        })
    }
}

/// The seven circles of the motif centered at `center`.
pub fn motif_circles(center: Point, radius: f64) -> [Circle; PETAL_COUNT + 1] {
    Motif::new(center, radius).circles()
}

/// Intersection of two circles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CircleIntersection {
    /// Disjoint, nested, concentric or coincident circles.
    None,
    /// Externally or internally tangent circles.
    Tangent(Point),
    /// Two proper crossing points.
    Crossing(Point, Point),
}

impl CircleIntersection {
    pub fn len(&self) -> usize {
        match self {
            CircleIntersection::None => 0,
            CircleIntersection::Tangent(_) => 1,
            CircleIntersection::Crossing(..) => 2,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CircleIntersection::None)
    }

    /// Iterate over the 0, 1 or 2 points.
    pub fn points(self) -> impl Iterator<Item = Point> {
        let (points, count) = match self {
            CircleIntersection::None => ([Point::ZERO; 2], 0),
            CircleIntersection::Tangent(p) => ([p, p], 1),
            CircleIntersection::Crossing(a, b) => ([a, b], 2),
        };
        points.into_iter().take(count)
    }
}

/// Intersect two circles using the radical line construction.
///
/// Coincident circles intersect everywhere, which has no finite
/// representation, so they report [`CircleIntersection::None`].
pub fn circle_intersections(c1: Circle, c2: Circle) -> CircleIntersection {
    let (r1, r2) = (c1.radius, c2.radius);
    let delta = c2.center - c1.center;
    let d = delta.hypot();
    let eps = EPSILON * (r1 + r2).max(1.0);

    if !d.is_finite() || d < eps {
        // Concentric: coincident or nested, never a finite point set.
        return CircleIntersection::None;
    }
    if d > r1 + r2 + eps || d < (r1 - r2).abs() - eps {
        return CircleIntersection::None;
    }

    // Distance from c1 to the radical line along the center line.
    let a = (r1 * r1 - r2 * r2 + d * d) / (2.0 * d);
    let unit = delta / d;
    let base = c1.center + unit * a;

    let tangent = (d - (r1 + r2)).abs() <= eps || (d - (r1 - r2).abs()).abs() <= eps;
    if tangent {
        return CircleIntersection::Tangent(base);
    }

    let h = (r1 * r1 - a * a).max(0.0).sqrt();
    let perp = Vec2::new(-unit.y, unit.x) * h;
    CircleIntersection::Crossing(base + perp, base - perp)
}
