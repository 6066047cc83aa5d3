//! Grid facade: one entry point per grid type for the canvas.

use kurbo::{Circle, Point, Rect};
use serde::{Deserialize, Serialize};

use crate::budget::{DeviceTier, TruncationPolicy, padding_factor};
use crate::circles::{Motif, PETAL_COUNT};
use crate::config::GridConfig;
use crate::diamond::{DiamondCell, DiamondLattice};
use crate::guides::{GuideLine, center_guides, radial_guides};
use crate::intersections::{IntersectionIndex, IntersectionMode};
use crate::lattice::{MAX_RANKED_SCAN, MotifLattice};
use crate::snap::{FeatureSource, SnapResult, SnapTarget, SnapTargetKind, snap, window_contains};
use crate::units::UnitConfig;

/// Which guide grid is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridType {
    /// Flower of Life motifs on a hexagonal lattice.
    #[default]
    Hex,
    /// Diamond cells on a square lattice.
    Diamond,
}

impl GridType {
    /// Cycle to the next grid type.
    pub fn next(self) -> Self {
        match self {
            GridType::Hex => GridType::Diamond,
            GridType::Diamond => GridType::Hex,
        }
    }

    /// Get display name for this grid type.
    pub fn name(self) -> &'static str {
        match self {
            GridType::Hex => "Flower of Life",
            GridType::Diamond => "Diamond",
        }
    }
}

/// Flower of Life grid at a fixed radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexGrid {
    pub radius: f64,
    pub tier: DeviceTier,
    pub policy: TruncationPolicy,
    pub mode: IntersectionMode,
}

impl HexGrid {
    pub fn new(units: UnitConfig) -> Self {
        Self {
            radius: units.radius(),
            tier: DeviceTier::default(),
            policy: TruncationPolicy::default(),
            mode: IntersectionMode::default(),
        }
    }

    pub fn with_tier(mut self, tier: DeviceTier) -> Self {
        self.tier = tier;
        self
    }

    pub fn lattice(&self) -> MotifLattice {
        MotifLattice::new(self.radius)
    }

    /// Motif centers to draw for `viewport`.
    pub fn motif_centers(&self, viewport: Rect) -> Vec<Point> {
        let padding = padding_factor(self.tier) * self.radius;
        let budget = crate::budget::motif_budget(viewport, self.tier);
        self.lattice().visible_centers(viewport, padding, budget, self.policy)
    }

    /// Circles to stroke for `viewport`, seven per motif.
    pub fn circles(&self, viewport: Rect) -> Vec<Circle> {
        self.motif_centers(viewport)
            .into_iter()
            .flat_map(|c| Motif::new(c, self.radius).circles())
            .collect()
    }

    /// Intersection dots to draw for `viewport`.
    pub fn intersections(&self, viewport: Rect) -> Vec<Point> {
        IntersectionIndex::new(self.radius)
            .with_mode(self.mode)
            .with_policy(self.policy)
            .all_intersections(viewport, self.tier)
    }
}

/// Clip `window` to a square around its center that holds well under
/// `MAX_RANKED_SCAN` lattice cells of area `cell_area`.
///
/// The square is still hundreds of pitches wide, and every point lies within
/// one pitch of a feature, so the nearest feature to the window center always
/// survives the clip.
fn scan_window(window: Rect, cell_area: f64) -> Rect {
    let side = 0.5 * (MAX_RANKED_SCAN as f64 * cell_area).sqrt();
    if window.width() <= side && window.height() <= side {
        return window;
    }
    log::trace!("clipping snap window {:?} to {} around its center", window, side);
    window.intersect(Rect::from_center_size(window.center(), (side, side)))
}

impl FeatureSource for HexGrid {
    /// Motif centers and petal points inside `window`, motif by motif.
    ///
    /// Very large windows are clipped around their center first.
    fn candidates(&self, window: Rect) -> Vec<SnapTarget> {
        let lattice = self.lattice();
        let window = scan_window(window, lattice.spacing_x() * lattice.spacing_y());
        // Petals reach one radius beyond their motif center.
        let centers = lattice.centers(window, self.radius, MAX_RANKED_SCAN);
        let mut targets = Vec::new();
        for center in centers {
            if window_contains(window, center) {
                targets.push(SnapTarget::new(center, SnapTargetKind::MotifCenter));
            }
            let petals: [Point; PETAL_COUNT] = Motif::new(center, self.radius).petals();
            targets.extend(
                petals
                    .into_iter()
                    .filter(|p| window_contains(window, *p))
                    .map(|p| SnapTarget::new(p, SnapTargetKind::Intersection)),
            );
        }
        targets
    }
}

/// Diamond grid with cells one radius wide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiamondGrid {
    pub lattice: DiamondLattice,
    pub tier: DeviceTier,
}

impl DiamondGrid {
    pub fn new(units: UnitConfig) -> Self {
        Self {
            lattice: DiamondLattice::new(units.radius()),
            tier: DeviceTier::default(),
        }
    }

    pub fn with_tier(mut self, tier: DeviceTier) -> Self {
        self.tier = tier;
        self
    }

    pub fn cells(&self, viewport: Rect) -> Vec<DiamondCell> {
        self.lattice.cells_for_tier(viewport, self.tier)
    }
}

impl FeatureSource for DiamondGrid {
    fn candidates(&self, window: Rect) -> Vec<SnapTarget> {
        let size = self.lattice.cell_size;
        let window = scan_window(window, size * size);
        self.lattice
            .cells(window, MAX_RANKED_SCAN)
            .into_iter()
            .map(|cell| cell.center)
            .filter(|c| window_contains(window, *c))
            .map(|c| SnapTarget::new(c, SnapTargetKind::CellCenter))
            .collect()
    }

    fn closed_form(&self, point: Point) -> Option<SnapTarget> {
        self.lattice
            .nearest_center(point)
            .map(|c| SnapTarget::new(c, SnapTargetKind::CellCenter))
    }
}

/// The active grid, built from the caller's configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Grid {
    Hex(HexGrid),
    Diamond(DiamondGrid),
}

impl Grid {
    pub fn new(grid_type: GridType, units: UnitConfig) -> Self {
        match grid_type {
            GridType::Hex => Grid::Hex(HexGrid::new(units)),
            GridType::Diamond => Grid::Diamond(DiamondGrid::new(units)),
        }
    }

    pub fn from_config(config: &GridConfig) -> Self {
        let units = config.units();
        match config.grid_type {
            GridType::Hex => Grid::Hex(HexGrid {
                policy: config.truncation,
                mode: config.intersection_mode,
                ..HexGrid::new(units).with_tier(config.tier)
            }),
            GridType::Diamond => Grid::Diamond(DiamondGrid::new(units).with_tier(config.tier)),
        }
    }

    pub fn grid_type(&self) -> GridType {
        match self {
            Grid::Hex(_) => GridType::Hex,
            Grid::Diamond(_) => GridType::Diamond,
        }
    }

    /// Snap a raw pointer position.
    pub fn snap(&self, point: Point, units: UnitConfig, pixel_tolerance: f64) -> SnapResult {
        match self {
            Grid::Hex(hex) => snap(point, hex, units, pixel_tolerance),
            Grid::Diamond(diamond) => snap(point, diamond, units, pixel_tolerance),
        }
    }

    /// Guide lines around `point`.
    ///
    /// Hex guides have a fixed shape. Diamond guides join `point` to every
    /// cell center within twice the logical snap tolerance.
    pub fn guides(&self, point: Point, units: UnitConfig, pixel_tolerance: f64) -> Vec<GuideLine> {
        match self {
            Grid::Hex(_) => radial_guides(point),
            Grid::Diamond(diamond) => {
                let reach = 2.0 * units.logical_tolerance(pixel_tolerance);
                let centers = diamond.lattice.centers_near(point, reach);
                center_guides(point, &centers, reach)
            }
        }
    }
}

impl FeatureSource for Grid {
    fn candidates(&self, window: Rect) -> Vec<SnapTarget> {
        match self {
            Grid::Hex(hex) => hex.candidates(window),
            Grid::Diamond(diamond) => diamond.candidates(window),
        }
    }

    fn closed_form(&self, point: Point) -> Option<SnapTarget> {
        match self {
            Grid::Hex(hex) => hex.closed_form(point),
            Grid::Diamond(diamond) => diamond.closed_form(point),
        }
    }
}
