//! Intersection points of the visible motif circles.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

use crate::budget::{self, DeviceTier, TruncationPolicy};
use crate::circles::{Motif, circle_intersections};
use crate::lattice::MotifLattice;

/// How intersection points are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntersectionMode {
    /// Petal centers stand in for the center-petal intersections. Exact for
    /// the equal-radius motif and far cheaper.
    #[default]
    Petals,
    /// Intersect every pair of nearby circles, including across motifs.
    General,
}

/// Collects intersection points for the motifs visible in a viewport.
///
/// Points shared by neighbouring motifs are reported once per motif; no
/// deduplication happens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionIndex {
    lattice: MotifLattice,
    mode: IntersectionMode,
    policy: TruncationPolicy,
}

impl IntersectionIndex {
    pub fn new(radius: f64) -> Self {
        Self {
            lattice: MotifLattice::new(radius),
            mode: IntersectionMode::default(),
            policy: TruncationPolicy::default(),
        }
    }

    pub fn with_mode(mut self, mode: IntersectionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_policy(mut self, policy: TruncationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn lattice(&self) -> &MotifLattice {
        &self.lattice
    }

    /// All intersection points for `viewport` under the budgets of `tier`.
    pub fn all_intersections(&self, viewport: Rect, tier: DeviceTier) -> Vec<Point> {
        let padding = budget::padding_factor(tier) * self.lattice.radius();
        self.intersections(
            viewport,
            padding,
            budget::motif_budget(viewport, tier),
            budget::intersection_budget(tier),
        )
    }

    /// Intersection points with explicit padding and budgets.
    ///
    /// `motif_budget` caps the motifs considered and `budget` caps the
    /// points returned. The two caps are independent.
    pub fn intersections(
        &self,
        viewport: Rect,
        padding: f64,
        motif_budget: usize,
        budget: usize,
    ) -> Vec<Point> {
        let centers = self.lattice.visible_centers(viewport, padding, motif_budget, self.policy);
        let radius = self.lattice.radius();
        // Ranking needs every candidate; generation order can stop early.
        let limit = match self.policy {
            TruncationPolicy::GenerationOrder => budget.saturating_add(1),
            TruncationPolicy::NearestToCenter => usize::MAX,
        };
        let points = match self.mode {
            IntersectionMode::Petals => petal_intersections(&centers, radius, limit),
            IntersectionMode::General => general_intersections(&centers, radius, limit),
        };
        budget::truncate(points, budget, self.policy, viewport.center(), |p| *p)
    }
}

/// The six center-petal intersections of each motif, in motif order.
fn petal_intersections(centers: &[Point], radius: f64, limit: usize) -> Vec<Point> {
    centers
        .iter()
        .flat_map(|c| Motif::new(*c, radius).petals())
        .take(limit)
        .collect()
}

/// Analytic intersections of every pair of distinct circles that can meet.
///
/// Pairs are visited motif by motif: first the pairs inside motif `i`, then
/// pairs between motif `i` and each later motif close enough to touch it.
fn general_intersections(centers: &[Point], radius: f64, limit: usize) -> Vec<Point> {
    let mut points = Vec::new();
    // Circles of two motifs can only meet when the motif centers are at most
    // four radii apart.
    let reach = 4.0 * radius * (1.0 + 1e-9);
    let reach_sq = reach * reach;

    for (i, a) in centers.iter().enumerate() {
        let circles_a = Motif::new(*a, radius).circles();
        for (k, ca) in circles_a.iter().enumerate() {
            for cb in &circles_a[k + 1..] {
                points.extend(circle_intersections(*ca, *cb).points());
                if points.len() >= limit {
                    points.truncate(limit);
                    return points;
                }
            }
        }
        for b in &centers[i + 1..] {
            if a.distance_squared(*b) > reach_sq {
                continue;
            }
            let circles_b = Motif::new(*b, radius).circles();
            for ca in &circles_a {
                for cb in &circles_b {
                    points.extend(circle_intersections(*ca, *cb).points());
                    if points.len() >= limit {
                        points.truncate(limit);
                        return points;
                    }
                }
            }
        }
    }
    points
}
